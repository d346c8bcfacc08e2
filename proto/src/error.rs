use thiserror::Error;

/// Failures surfaced by any participant. Each kind maps to one HTTP status so that the
/// kind survives a trip over the wire.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DfsError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("transport failure: {0}")]
    TransportFailure(String),
    #[error("storage failure: {0}")]
    StorageFailure(String),
}

pub type Result<T> = std::result::Result<T, DfsError>;

impl DfsError {
    pub fn status_code(&self) -> u16 {
        match self {
            DfsError::InvalidArgument(_) => 400,
            DfsError::NotFound(_) => 404,
            DfsError::AlreadyExists(_) => 409,
            DfsError::TransportFailure(_) => 502,
            DfsError::StorageFailure(_) => 500,
        }
    }

    /// Message without the kind prefix, as sent in `{error}` bodies.
    pub fn message(&self) -> &str {
        match self {
            DfsError::InvalidArgument(m)
            | DfsError::AlreadyExists(m)
            | DfsError::NotFound(m)
            | DfsError::TransportFailure(m)
            | DfsError::StorageFailure(m) => m,
        }
    }

    /// Rebuilds the error a peer reported with a non-success status.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 | 422 => DfsError::InvalidArgument(message),
            404 => DfsError::NotFound(message),
            409 => DfsError::AlreadyExists(message),
            500..=599 if status != 502 => DfsError::StorageFailure(message),
            _ => DfsError::TransportFailure(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_survive_the_wire() {
        let errors = [
            DfsError::InvalidArgument("filename is required".into()),
            DfsError::AlreadyExists("doc.bin".into()),
            DfsError::NotFound("doc.bin".into()),
            DfsError::StorageFailure("disk full".into()),
            DfsError::TransportFailure("connection refused".into()),
        ];
        for error in errors {
            let rebuilt = DfsError::from_status(error.status_code(), error.message());
            assert_eq!(rebuilt, error);
        }
    }

    #[test]
    fn unexpected_status_is_a_transport_failure() {
        assert!(matches!(
            DfsError::from_status(301, "moved"),
            DfsError::TransportFailure(_)
        ));
    }
}
