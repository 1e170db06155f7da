use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, ListingError>;

/// Failures surfaced by a listing fetch. None of them are retried internally.
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("invalid listing request: {0}")]
    InvalidRequest(String),

    #[error("transport failure: {0}")]
    Transport(#[source] BoxError),

    #[error("listing response had an empty body")]
    EmptyResponse,

    #[error("listing response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ListingError {
    /// Only transport failures may succeed when the caller tries again.
    pub fn is_transient(&self) -> bool {
        matches!(self, ListingError::Transport(_))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got `{value}`")]
    InvalidLimit { var: &'static str, value: String },

    #[error("{var} is not a valid url: `{value}`")]
    InvalidUrl { var: &'static str, value: String },

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn only_transport_failures_are_transient() {
        let io_err = io::Error::new(io::ErrorKind::TimedOut, "timed out");
        assert!(ListingError::Transport(Box::new(io_err)).is_transient());
        assert!(!ListingError::EmptyResponse.is_transient());
        assert!(!ListingError::InvalidRequest("empty subreddit".into()).is_transient());

        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(!ListingError::from(decode).is_transient());
    }

    #[test]
    fn transport_failure_keeps_underlying_error() {
        use std::error::Error as _;

        let io_err = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        let err = ListingError::Transport(Box::new(io_err));
        let source = err.source().unwrap();
        let io_err = source.downcast_ref::<io::Error>().unwrap();
        assert_eq!(io_err.kind(), io::ErrorKind::ConnectionRefused);
    }
}
