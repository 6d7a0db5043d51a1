//! Command-line front end: signs in and prints list pages as HTML tables.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use thiserror::Error;

use raglet_console::domain::account::Credentials;
use raglet_console::domain::types::{AuthorId, CampusId, TypeConstraintError};
use raglet_console::listing::{Filter, PageLimit};
use raglet_console::models::config::{ConfigError, ConsoleConfig};
use raglet_console::render::{RenderError, TableRenderer};
use raglet_console::services::{
    ServiceError, account, campuses::CampusesPage, members::MembersPage,
    questions::QuestionsPage, suggested_questions::SuggestedQuestionsPage,
};
use raglet_console::session::{SessionContext, SessionError};
use raglet_console::{StartupError, connect};

#[derive(Debug, Parser)]
#[command(name = "raglet-console", about = "Admin console for the campus Q&A knowledge base")]
struct Cli {
    /// Settings file used instead of `config/default` and the profile.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and store the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "RAGLET_PASSWORD")]
        password: String,
    },
    /// Forget the stored session.
    Logout,
    Campuses {
        #[arg(long, default_value = "")]
        search: String,
        /// `ACTIVE`, `INACTIVE` or `all`.
        #[arg(long, default_value = "all")]
        status: String,
        #[command(flatten)]
        page: PageArgs,
    },
    Questions {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        campus: Option<String>,
        #[arg(long, default_value = "all")]
        status: String,
        #[command(flatten)]
        page: PageArgs,
    },
    Members {
        /// `MASTER_ADMIN`, `SUB_ADMIN`, `NORMAL_USER` or `all`.
        #[arg(long, default_value = "all")]
        role: String,
        #[arg(long, default_value = "all")]
        status: String,
        #[command(flatten)]
        page: PageArgs,
    },
    SuggestedQuestions {
        /// `true`, `false` or `all`.
        #[arg(long, default_value = "all")]
        active: String,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Debug, Args)]
struct PageArgs {
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long, default_value_t = 10)]
    limit: u32,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("invalid filter value: {0}")]
    Filter(String),
    #[error("unsupported page size {0}")]
    Limit(u32),
    #[error("session_file is not configured")]
    NoSessionFile,
    #[error("not signed in")]
    NotSignedIn,
}

impl From<TypeConstraintError> for CliError {
    fn from(err: TypeConstraintError) -> Self {
        CliError::Filter(err.to_string())
    }
}

fn choice<T>(raw: &str) -> Result<Filter<T>, CliError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    Filter::from_choice(raw).map_err(|err| CliError::Filter(format!("{raw}: {err}")))
}

fn limit(args: &PageArgs) -> Result<PageLimit, CliError> {
    PageLimit::try_from(args.limit).map_err(|_| CliError::Limit(args.limit))
}

fn session_path(config: &ConsoleConfig) -> Result<&Path, CliError> {
    config
        .session_file
        .as_deref()
        .ok_or(CliError::NoSessionFile)
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => ConsoleConfig::load_file(path)?,
        None => ConsoleConfig::load()?,
    };
    let console = connect(&config)?;
    let api = console.api;
    let renderer = TableRenderer::new()?;

    let html = match cli.command {
        Command::Login { email, password } => {
            let session = account::login(&api, Credentials { email, password }).await?;
            session.save(session_path(&config)?)?;
            println!("Signed in as {}", session.user().email);
            return Ok(());
        }
        Command::Logout => {
            SessionContext::clear(session_path(&config)?)?;
            println!("Signed out");
            return Ok(());
        }
        Command::Campuses {
            search,
            status,
            page: args,
        } => {
            // Setter tickets are dropped; `mount` issues the one request for the final filters.
            let mut page = CampusesPage::new();
            let _ = page.set_search(&search);
            let _ = page.set_status(choice(&status)?);
            let _ = page.set_limit(limit(&args)?);
            let ticket = page.mount();
            page.sync(&api, Some(ticket)).await;
            if let Some(ticket) = page.set_page(args.page) {
                page.sync(&api, Some(ticket)).await;
            }
            renderer.render(&page.view(), None)?
        }
        Command::Questions {
            search,
            author,
            campus,
            status,
            page: args,
        } => {
            let mut page = QuestionsPage::new();
            let _ = page.set_search(&search);
            let _ = page.set_author(author.map(AuthorId::new).transpose()?.into());
            let _ = page.set_campus(campus.map(CampusId::new).transpose()?.into());
            let _ = page.set_status(choice(&status)?);
            let _ = page.set_limit(limit(&args)?);
            let ticket = page.mount();
            page.sync(&api, Some(ticket)).await;
            if let Some(ticket) = page.set_page(args.page) {
                page.sync(&api, Some(ticket)).await;
            }
            renderer.render(&page.view(), None)?
        }
        Command::Members {
            role,
            status,
            page: args,
        } => {
            let session = console.session.ok_or(CliError::NotSignedIn)?;
            let mut page = MembersPage::open(&session)?;
            let _ = page.set_role(choice(&role)?);
            let _ = page.set_status(choice(&status)?);
            let _ = page.set_limit(limit(&args)?);
            let ticket = page.mount();
            page.sync(&api, Some(ticket)).await;
            if let Some(ticket) = page.set_page(args.page) {
                page.sync(&api, Some(ticket)).await;
            }
            renderer.render(&page.view(), None)?
        }
        Command::SuggestedQuestions { active, page: args } => {
            let mut page = SuggestedQuestionsPage::new();
            let _ = page.set_active_filter(choice(&active)?);
            let _ = page.set_limit(limit(&args)?);
            let ticket = page.mount();
            page.sync(&api, Some(ticket)).await;
            if let Some(ticket) = page.set_page(args.page) {
                page.sync(&api, Some(ticket)).await;
            }
            renderer.render(&page.view(), None)?
        }
    };

    println!("{html}");
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    if let Err(err) = run(Cli::parse()).await {
        log::error!("{err}");
        std::process::exit(1);
    }
}
