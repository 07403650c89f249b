use thiserror::Error;

use crate::domain::BumpCategory;

/// Unified error type for git-tag-bump operations
#[derive(Error, Debug)]
pub enum TagBumpError {
    #[error("Repository access failed: {0}")]
    RepositoryAccess(String),

    #[error("Malformed version tag '{tag}': {reason}")]
    MalformedTag { tag: String, reason: String },

    #[error("Invalid {rule} rule pattern '{pattern}': {source}")]
    InvalidRule {
        rule: BumpCategory,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("No rule matches branch '{branch}'")]
    NoMatchingRule { branch: String },

    #[error("Base version {requested} does not match repository version {derived}")]
    OverrideMismatch { requested: String, derived: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-tag-bump
pub type Result<T> = std::result::Result<T, TagBumpError>;

impl TagBumpError {
    /// Create a repository access error with context
    pub fn repository(msg: impl Into<String>) -> Self {
        TagBumpError::RepositoryAccess(msg.into())
    }

    /// Create a malformed tag error for the given tag
    pub fn malformed(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        TagBumpError::MalformedTag {
            tag: tag.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        TagBumpError::Config(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        TagBumpError::Tag(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        TagBumpError::Remote(msg.into())
    }
}

impl From<toml::de::Error> for TagBumpError {
    fn from(err: toml::de::Error) -> Self {
        TagBumpError::Config(err.to_string())
    }
}
