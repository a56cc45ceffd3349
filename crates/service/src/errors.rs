use requesthandler::RequestError;
use thiserror::Error;
use tracing::{error, info};

/// Failures surfaced by the service handler.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,
    #[error("user has no permission")]
    NoPermission,
    #[error("validation error: {0}")]
    Validation(String),
    #[error("request error: {0}")]
    Request(#[from] RequestError),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::NotFound => 1003,
            ServiceError::NoPermission => 1004,
            ServiceError::Request(RequestError::Status(404)) => 1003,
            ServiceError::Request(_) => 1100,
            ServiceError::Db(_) => 1200,
        }
    }
}

/// Log a failed step inside the current operation span and pass the error on.
pub(crate) trait LogErr<T> {
    fn log_err(self, msg: &str) -> Result<T, ServiceError>;
}

impl<T, E: Into<ServiceError>> LogErr<T> for Result<T, E> {
    fn log_err(self, msg: &str) -> Result<T, ServiceError> {
        self.map_err(|e| {
            let e = e.into();
            match e {
                ServiceError::NotFound | ServiceError::NoPermission | ServiceError::Validation(_) => info!(
                    error = %e,
                    code = e.code(),
                    "{msg}"
                ),
                _ => error!(error = %e, code = e.code(), "{msg}"),
            }
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_and_codes() {
        assert_eq!(ServiceError::NotFound.to_string(), "not found");
        assert_eq!(ServiceError::NoPermission.to_string(), "user has no permission");
        assert_eq!(
            ServiceError::from(RequestError::Status(404)).code(),
            ServiceError::NotFound.code()
        );
        assert_eq!(
            ServiceError::from(RequestError::Status(500)).to_string(),
            "request error: response code: 500"
        );
    }
}
