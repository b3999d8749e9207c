//! Store Errors
//!
//! Error taxonomy for the KeySwitch stores.

use std::error::Error as StdError;
use thiserror::Error;

pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Errors returned by [`super::KeySwitchService`] implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Non-success status, transport fault or unreadable response.
    #[error("{message}")]
    Persistence {
        message: String,
        status: Option<u16>,
        #[source]
        source: Option<BoxError>,
    },

    /// A read of a specific id returned no data.
    #[error("KeySwitch with id of {id} not found")]
    NotFound { id: String },
}

impl StoreError {
    /// The store answered with something other than 200
    pub fn status(operation: &str, status: u16) -> Self {
        Self::Persistence {
            message: format!(
                "{} was not successful with status code: {}",
                operation, status
            ),
            status: Some(status),
            source: None,
        }
    }

    /// The request never produced a response
    pub fn transport(operation: &str, err: reqwest::Error) -> Self {
        Self::Persistence {
            message: format!("{} request failed", operation),
            status: err.status().map(|s| s.as_u16()),
            source: Some(Box::new(err)),
        }
    }

    /// The response body could not be parsed
    pub fn decode(operation: &str, err: serde_json::Error) -> Self {
        Self::Persistence {
            message: format!("{} response could not be parsed", operation),
            status: None,
            source: Some(Box::new(err)),
        }
    }

    pub fn missing_id(operation: &str) -> Self {
        Self::Persistence {
            message: format!("{} requires a KeySwitch with an id", operation),
            status: None,
            source: None,
        }
    }

    pub fn not_found(id: &str) -> Self {
        Self::NotFound { id: id.to_string() }
    }

    /// HTTP status carried by the error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Persistence { status, .. } => *status,
            Self::NotFound { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Whether the message alone is meaningful to the user.
    ///
    /// Errors wrapping a lower-level fault are not: they get a generic
    /// summary plus the cause chain as detail.
    pub fn is_caller_facing(&self) -> bool {
        match self {
            Self::Persistence { source, .. } => source.is_none(),
            Self::NotFound { .. } => true,
        }
    }
}

/// Walk an error's source chain into one line.
pub fn diagnostic_chain(err: &(dyn StdError + 'static)) -> String {
    let mut details = err.to_string();
    let mut cause = err.source();
    while let Some(inner) = cause {
        details.push_str("    Caused by: ");
        details.push_str(&inner.to_string());
        cause = inner.source();
    }
    details
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = StoreError::status("Create", 401);
        assert_eq!(
            err.to_string(),
            "Create was not successful with status code: 401"
        );
        assert_eq!(err.status_code(), Some(401));
        assert!(err.is_caller_facing());
    }

    #[test]
    fn test_not_found_message() {
        let err = StoreError::not_found("-Nmissing");
        assert_eq!(err.to_string(), "KeySwitch with id of -Nmissing not found");
        assert!(err.is_not_found());
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_decode_error_is_not_caller_facing() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = StoreError::decode("Read", parse_err);
        assert!(!err.is_caller_facing());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_diagnostic_chain_includes_causes() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let cause = parse_err.to_string();
        let err = StoreError::decode("Read", parse_err);

        let chain = diagnostic_chain(&err);
        assert!(chain.starts_with("Read response could not be parsed"));
        assert!(chain.contains("    Caused by: "));
        assert!(chain.ends_with(&cause));
    }

    #[test]
    fn test_diagnostic_chain_without_cause() {
        let err = StoreError::missing_id("Update");
        assert_eq!(
            diagnostic_chain(&err),
            "Update requires a KeySwitch with an id"
        );
    }
}
