//! HTML rendering of list tables with Tera.

use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

use crate::dto::table::TableView;
use crate::services::Notice;

const TABLE_TEMPLATE: &str = "table.html";

#[derive(Debug, Error)]
#[error("failed to render template: {0}")]
pub struct RenderError(#[from] tera::Error);

/// Renders table views with the bundled templates.
#[derive(Clone, Debug)]
pub struct TableRenderer {
    tera: Tera,
}

impl TableRenderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_template(TABLE_TEMPLATE, include_str!("../templates/table.html"))?;
        Ok(Self { tera })
    }

    /// Renders `view` with an optional notice above it.
    pub fn render<K: Serialize>(
        &self,
        view: &TableView<K>,
        notice: Option<&Notice>,
    ) -> Result<String, RenderError> {
        let mut context = Context::new();
        context.insert("table", view);
        context.insert("notice", &notice);

        self.tera.render(TABLE_TEMPLATE, &context).map_err(|err| {
            log::error!("Failed to render {TABLE_TEMPLATE}: {err}");
            RenderError(err)
        })
    }
}
