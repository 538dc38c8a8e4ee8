use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum HomesteadError {
    #[error("Database error: {0}")]
    #[diagnostic(code(homestead::db))]
    Db(#[from] sea_orm::DbErr),

    #[error("Bad request: {0}")]
    #[diagnostic(code(homestead::bad_request))]
    BadRequest(String),
}
