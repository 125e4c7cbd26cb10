use crate::billing::ValidationError;

/// The main error type for billing-kit
#[derive(Debug, thiserror::Error)]
pub enum KitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse billing config: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl KitError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn service_unavailable(msg: impl Into<String>) -> Self {
        Self::ServiceUnavailable(msg.into())
    }

    /// Whether the caller supplied something wrong (catalogue, selection or
    /// request) as opposed to an environment or upstream failure.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::NotFound(_) | Self::BadRequest(_) | Self::Parse(_)
        )
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// The validation issues, if this is a catalogue validation failure.
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type alias for billing-kit operations
pub type Result<T> = std::result::Result<T, KitError>;

// Common error type conversions

impl From<serde_json::Error> for KitError {
    fn from(err: serde_json::Error) -> Self {
        // Classify based on error category
        if err.is_data() || err.is_syntax() || err.is_eof() {
            KitError::parse(format!("JSON error: {}", err))
        } else {
            KitError::internal(format!("JSON serialization error: {}", err))
        }
    }
}

#[cfg(feature = "toml")]
impl From<toml::de::Error> for KitError {
    fn from(err: toml::de::Error) -> Self {
        KitError::parse(format!("TOML error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::FieldPath;

    #[test]
    fn test_error_constructors() {
        assert!(matches!(KitError::not_found("plan"), KitError::NotFound(_)));
        assert!(matches!(KitError::bad_request("seats"), KitError::BadRequest(_)));
        assert!(matches!(KitError::config("path"), KitError::Config(_)));
        assert_eq!(
            KitError::not_found("Plan not found: pro").to_string(),
            "Not found: Plan not found: pro"
        );
    }

    struct BrokenWriter;

    impl std::io::Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_json_io_error_is_internal() {
        let err: KitError = serde_json::to_writer(BrokenWriter, &serde_json::json!({ "a": 1 }))
            .unwrap_err()
            .into();
        assert!(matches!(err, KitError::Internal(_)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_json_syntax_error_is_parse_error() {
        let err: KitError = serde_json::from_str::<serde_json::Value>("{ not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, KitError::Parse(_)));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let validation =
            ValidationError::schema(FieldPath::root().key("provider"), "missing field `provider`");
        let expected = validation.to_string();
        let err: KitError = validation.into();

        assert_eq!(err.to_string(), expected);
        assert!(err.as_validation().is_some());
        assert!(err.is_client_error());
    }

    #[test]
    fn test_io_error_is_not_client_error() {
        let err: KitError = std::io::Error::new(std::io::ErrorKind::NotFound, "billing.json").into();
        assert!(!err.is_client_error());
        assert!(!err.is_not_found());
    }
}
