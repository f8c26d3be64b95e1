use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("catalog unavailable: {0}")]
    CatalogUnavailable(String),
    #[error("catalog malformed: {0}")]
    CatalogMalformed(String),
    #[error("repository list unreadable: {0}")]
    InputUnreadable(String),
    #[error("repository list malformed: {0}")]
    InputMalformed(String),
    #[error("repository '{0}' is not owned by any service in the catalog")]
    UnresolvedRepository(String),
    #[error("ticket creation failed: {0}")]
    TicketCreation(String),
    #[error("notification failed: {0}")]
    Notification(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
