use thiserror::Error;

/// Unified error type for bump-version operations
#[derive(Error, Debug)]
pub enum BumpError {
    #[error("Invalid version format: {0}")]
    InvalidVersion(String),

    #[error("Cannot release {to} from {from}: {reason}")]
    TransitionRejected {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml_edit::TomlError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in bump-version
pub type Result<T> = std::result::Result<T, BumpError>;

impl BumpError {
    /// Create an invalid version error for the given input
    pub fn invalid_version(input: impl Into<String>) -> Self {
        BumpError::InvalidVersion(input.into())
    }

    /// Create a rejected transition error naming both channels
    pub fn rejected(
        from: impl Into<String>,
        to: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        BumpError::TransitionRejected {
            from: from.into(),
            to: to.into(),
            reason: reason.into(),
        }
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        BumpError::Manifest(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        BumpError::Config(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        BumpError::Remote(msg.into())
    }

    /// The current version string could not be parsed.
    ///
    /// Callers should point the user at the manifest rather than at the
    /// requested channel.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, BumpError::InvalidVersion(_))
    }

    /// The version parsed but the requested channel move is forbidden.
    pub fn is_transition_rejected(&self) -> bool {
        matches!(self, BumpError::TransitionRejected { .. })
    }
}
