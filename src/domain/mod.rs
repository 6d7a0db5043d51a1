pub mod account;
pub mod campus;
pub mod member;
pub mod question;
pub mod suggested_question;
pub mod types;
