use thiserror::Error;

/// Core error type for dashboard operations.
#[derive(Error, Debug)]
pub enum LiveError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Node unavailable: {node}: {reason}")]
    NodeUnavailable { node: String, reason: String },

    #[error("Invalid time range: {0}")]
    InvalidRange(String),

    #[error("Frame error: {0}")]
    Frame(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LiveError {
    /// Create a node unavailable error.
    pub fn node_unavailable(node: impl Into<String>, reason: impl Into<String>) -> Self {
        LiveError::NodeUnavailable {
            node: node.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error comes from a collaborator (node catalog or time
    /// range) rather than from the request itself.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            LiveError::NodeUnavailable { .. } | LiveError::InvalidRange(_)
        )
    }
}

impl From<toml::de::Error> for LiveError {
    fn from(e: toml::de::Error) -> Self {
        LiveError::Config(format!("Failed to parse config: {}", e))
    }
}

/// Result type alias using LiveError.
pub type Result<T> = std::result::Result<T, LiveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_unavailable_display() {
        let err = LiveError::node_unavailable("n1:9", "connection refused");
        assert_eq!(
            err.to_string(),
            "Node unavailable: n1:9: connection refused"
        );
        assert!(err.is_collaborator_failure());
    }

    #[test]
    fn test_missing_parameter_is_not_collaborator_failure() {
        let err = LiveError::MissingParameter("comonode".into());
        assert!(!err.is_collaborator_failure());
        assert!(LiveError::InvalidRange("etime < stime".into()).is_collaborator_failure());
    }

    #[test]
    fn test_io_error_converts() {
        fn bind() -> Result<()> {
            Err::<(), _>(std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken"))?;
            Ok(())
        }
        let err = bind().unwrap_err();
        assert!(matches!(err, LiveError::Io(_)));
        assert!(!err.is_collaborator_failure());
    }
}
