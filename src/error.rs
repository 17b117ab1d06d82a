//! Custom error types for gh-releaser.
//!
//! Every variant is fatal for the current run. The one remote outcome that
//! is recovered, a missing release on lookup, never reaches this type: it is
//! reported as [`crate::forge::request::ReleaseLookup::Absent`].

use thiserror::Error;

/// Main error type for gh-releaser operations.
#[derive(Error, Debug)]
pub enum GhReleaserError {
    // Configuration errors
    #[error("Failed to read release config {path} at {revision}: {reason}")]
    ConfigRead {
        revision: String,
        path: String,
        reason: String,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Git history errors
    #[error("Failed to resolve revision '{revision}': {source}")]
    RevisionResolution {
        revision: String,
        #[source]
        source: git2::Error,
    },

    #[error("Failed to read commit history: {0}")]
    CommandExecution(String),

    #[error("Git operation failed: {0}")]
    GitError(#[from] git2::Error),

    // Event errors
    #[error("This action does not support {0} event")]
    UnsupportedEvent(String),

    #[error("Invalid event payload: {0}")]
    InvalidEvent(String),

    // Forge errors
    #[error("Unexpected error while fetching release for tag {tag}: {reason}")]
    Lookup { tag: String, reason: String },

    #[error("Failed to create release for tag {tag}: {reason}")]
    Create { tag: String, reason: String },

    #[error("Failed to update release for tag {tag}: {reason}")]
    Update { tag: String, reason: String },

    #[error("Failed to comment on pull request #{issue_number}: {reason}")]
    Comment { issue_number: u64, reason: String },

    #[error("Forge operation failed: {0}")]
    ForgeError(String),

    // Parsing errors - automatic conversions via #[from]
    #[error("YAML parse error: {0}")]
    YamlParseError(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Regular expression error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::str::Utf8Error),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),

    // Generic wrapper for other errors
    #[error(transparent)]
    Other(#[from] color_eyre::Report),
}

/// Result type alias using GhReleaserError
pub type Result<T> = std::result::Result<T, GhReleaserError>;

impl GhReleaserError {
    /// Create a forge error with context
    pub fn forge(msg: impl Into<String>) -> Self {
        Self::ForgeError(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an invalid event error
    pub fn invalid_event(msg: impl Into<String>) -> Self {
        Self::InvalidEvent(msg.into())
    }

    pub fn config_read(
        revision: impl Into<String>,
        path: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::ConfigRead {
            revision: revision.into(),
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn lookup(tag: impl Into<String>, reason: impl ToString) -> Self {
        Self::Lookup {
            tag: tag.into(),
            reason: reason.to_string(),
        }
    }

    pub fn create(tag: impl Into<String>, reason: impl ToString) -> Self {
        Self::Create {
            tag: tag.into(),
            reason: reason.to_string(),
        }
    }

    pub fn update(tag: impl Into<String>, reason: impl ToString) -> Self {
        Self::Update {
            tag: tag.into(),
            reason: reason.to_string(),
        }
    }

    pub fn comment(issue_number: u64, reason: impl ToString) -> Self {
        Self::Comment {
            issue_number,
            reason: reason.to_string(),
        }
    }
}

// Generic I/O errors are wrapped in the Other variant
impl From<std::io::Error> for GhReleaserError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(color_eyre::Report::from(err))
    }
}

// Implement From for octocrab errors (GitHub API)
impl From<octocrab::Error> for GhReleaserError {
    fn from(err: octocrab::Error) -> Self {
        Self::ForgeError(format!("GitHub API error: {}", err))
    }
}

impl From<crate::forge::request::ReleaseInputBuilderError>
    for GhReleaserError
{
    fn from(err: crate::forge::request::ReleaseInputBuilderError) -> Self {
        Self::Other(color_eyre::Report::msg(format!("Builder error: {}", err)))
    }
}
