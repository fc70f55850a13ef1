use attachstore_core::StoreError;
use thiserror::Error;

/// Errors specific to S3 operations.
#[derive(Debug, Error)]
pub enum S3Error {
    /// The service returned an error.
    #[error("S3 service error: {0}")]
    ServiceError(String),

    /// The request was throttled.
    #[error("S3 request throttled")]
    Throttled,

    /// A network or connection error occurred.
    #[error("S3 connection error: {0}")]
    Connection(String),

    /// The request timed out.
    #[error("S3 request timed out")]
    Timeout,

    /// Credential resolution failed or the credentials are incomplete.
    #[error("credential error: {0}")]
    CredentialError(String),

    /// Configuration is missing or invalid.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl From<S3Error> for StoreError {
    fn from(err: S3Error) -> Self {
        match err {
            S3Error::CredentialError(msg) | S3Error::Configuration(msg) => {
                StoreError::Configuration(msg)
            }
            other => StoreError::Remote(other.to_string()),
        }
    }
}

/// Classify an SDK error message into the appropriate [`S3Error`].
///
/// Inspects the message for throttling, timeout and connection patterns;
/// everything else is a service error.
pub fn classify_sdk_error(error_str: &str) -> S3Error {
    let lower = error_str.to_lowercase();
    if lower.contains("throttl") || lower.contains("slowdown") || lower.contains("too many") {
        S3Error::Throttled
    } else if lower.contains("timeout") || lower.contains("timed out") {
        S3Error::Timeout
    } else if lower.contains("connection")
        || lower.contains("connect")
        || lower.contains("dns")
        || lower.contains("dispatch failure")
    {
        S3Error::Connection(error_str.to_owned())
    } else {
        S3Error::ServiceError(error_str.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_failures_map_to_remote() {
        let err: StoreError = S3Error::Throttled.into();
        assert!(matches!(err, StoreError::Remote(msg) if msg == "S3 request throttled"));

        let err: StoreError = S3Error::Connection("reset".into()).into();
        assert!(matches!(err, StoreError::Remote(_)));

        let err: StoreError = S3Error::ServiceError("AccessDenied".into()).into();
        assert!(matches!(err, StoreError::Remote(msg) if msg.contains("AccessDenied")));
    }

    #[test]
    fn configuration_failures_map_to_configuration() {
        let err: StoreError = S3Error::CredentialError("no credentials".into()).into();
        assert!(matches!(err, StoreError::Configuration(_)));

        let err: StoreError = S3Error::Configuration("no bucket".into()).into();
        assert!(matches!(err, StoreError::Configuration(_)));
    }

    #[test]
    fn classify_throttled() {
        assert!(matches!(
            classify_sdk_error("SlowDown: Please reduce your request rate"),
            S3Error::Throttled
        ));
    }

    #[test]
    fn classify_timeout() {
        assert!(matches!(
            classify_sdk_error("Request timed out after 30s"),
            S3Error::Timeout
        ));
    }

    #[test]
    fn classify_connection() {
        assert!(matches!(
            classify_sdk_error("dispatch failure: io error: Connection refused"),
            S3Error::Connection(_)
        ));
    }

    #[test]
    fn classify_generic_service_error() {
        assert!(matches!(
            classify_sdk_error("NoSuchBucket: The specified bucket does not exist"),
            S3Error::ServiceError(_)
        ));
    }

    #[test]
    fn error_display() {
        assert_eq!(S3Error::Timeout.to_string(), "S3 request timed out");
        assert_eq!(
            S3Error::ServiceError("bad".into()).to_string(),
            "S3 service error: bad"
        );
    }
}
