//! Error types for the travel planner Lambda functions.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while serving a schedule request.
///
/// Each variant's display string is the exact `msg` the API returns for it.
#[derive(Error, Debug)]
pub enum Error {
    /// Required `userId` query parameter absent
    #[error("missing user id")]
    MissingUserId,

    /// User lookup returned no record or an empty record
    #[error("user id doesn't exist")]
    UserNotFound,

    /// Batch fetch left unprocessed keys or returned no responses
    #[error("can not get schedule attributes")]
    ScheduleBatchIncomplete,

    /// Batch fetch call itself failed
    #[error("schedule id doesn't exist")]
    ScheduleBatchFailed,

    /// Schedule write failed; carries the underlying store error text
    #[error("{0}")]
    ScheduleWrite(String),

    /// Parameter extraction failed (non-numeric paging values and the like)
    #[error("missing required parameters!")]
    MalformedRequest,

    /// HTTP method other than GET or POST
    #[error("unsupported http method: {0}")]
    UnsupportedMethod(String),
}

impl Error {
    /// Get HTTP status code for this error.
    ///
    /// The gateway contract only ever surfaces 400 on failure.
    pub fn status_code(&self) -> u16 {
        400
    }
}
