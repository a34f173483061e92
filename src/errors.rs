use reqwest::StatusCode;

/// Coarse classification of an [`IdentityError`].
///
/// Every failure of a remote call collapses into [`ErrorKind::BadRequest`];
/// callers that need more detail inspect the wrapped [`BadRequestCause`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    EmptyResult,
    NotImplemented,
    Configuration,
}

#[derive(Debug, thiserror::Error)]
pub enum BadRequestCause {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected HTTP status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("JSON parsing error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Remote error {errcode}: {errmsg}")]
    Remote { errcode: i64, errmsg: String },
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Bad request: {0}")]
    BadRequest(#[source] BadRequestCause),
    #[error("Empty result: {0}")]
    EmptyResult(&'static str),
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("HTTP client configuration error: {0}")]
    Client(#[source] reqwest::Error),
}

impl IdentityError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::BadRequest(_) => ErrorKind::BadRequest,
            IdentityError::EmptyResult(_) => ErrorKind::EmptyResult,
            IdentityError::NotImplemented(_) => ErrorKind::NotImplemented,
            IdentityError::Client(_) => ErrorKind::Configuration,
        }
    }

    /// The wrapped remote-call failure, if this is a bad request.
    pub fn cause(&self) -> Option<&BadRequestCause> {
        match self {
            IdentityError::BadRequest(cause) => Some(cause),
            _ => None,
        }
    }
}

impl From<BadRequestCause> for IdentityError {
    fn from(cause: BadRequestCause) -> Self {
        IdentityError::BadRequest(cause)
    }
}

impl From<reqwest::Error> for IdentityError {
    fn from(err: reqwest::Error) -> Self {
        IdentityError::BadRequest(BadRequestCause::Transport(err))
    }
}

impl From<serde_json::Error> for IdentityError {
    fn from(err: serde_json::Error) -> Self {
        IdentityError::BadRequest(BadRequestCause::Decode(err))
    }
}

pub type IdentityResult<T> = Result<T, IdentityError>;
