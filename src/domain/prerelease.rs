//! Pre-release suffix formats
//!
//! A pre-release tag looks like `1.4.0-rc.3`: a configurable prefix followed by
//! a counter or a timestamp. According to semver.org: https://semver.org/#spec-item-9

use crate::error::{Result, TagBumpError};
use chrono::NaiveDateTime;
use semver::Prerelease;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the part after the pre-release prefix is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PreReleaseFormat {
    /// Numeric counter: `rc.1`, `rc.2`, ...
    #[default]
    SemVer,
    /// Current date: `rc.20240309`
    Date,
    /// Current date and time to the minute: `rc.202403091405`
    DateTime,
}

impl PreReleaseFormat {
    /// Timestamp suffix for the date based formats, `None` for `SemVer`
    pub fn timestamp(&self, now: NaiveDateTime) -> Option<String> {
        match self {
            PreReleaseFormat::SemVer => None,
            PreReleaseFormat::Date => Some(now.format("%Y%m%d").to_string()),
            PreReleaseFormat::DateTime => Some(now.format("%Y%m%d%H%M").to_string()),
        }
    }
}

/// Check that `prefix` can lead a pre-release: `<prefix>.1` must be valid semver.
///
/// An empty prefix, an empty identifier (`rc..x`), a numeric identifier with a
/// leading zero (`01`) or a character outside `[0-9A-Za-z-]` would mint a tag
/// that can never be read back.
pub fn validate_prefix(prefix: &str) -> Result<()> {
    if prefix.is_empty() {
        return Err(TagBumpError::config("Pre-release prefix must not be empty"));
    }
    Prerelease::new(&format!("{}.1", prefix)).map_err(|e| {
        TagBumpError::config(format!("Invalid pre-release prefix '{}': {}", prefix, e))
    })?;
    Ok(())
}

impl FromStr for PreReleaseFormat {
    type Err = TagBumpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "semver" => Ok(PreReleaseFormat::SemVer),
            "date" => Ok(PreReleaseFormat::Date),
            "datetime" => Ok(PreReleaseFormat::DateTime),
            _ => Err(TagBumpError::config(format!(
                "Invalid pre-release format: '{}' (expected semver, date or datetime)",
                s
            ))),
        }
    }
}

impl fmt::Display for PreReleaseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreReleaseFormat::SemVer => write!(f, "semver"),
            PreReleaseFormat::Date => write!(f, "date"),
            PreReleaseFormat::DateTime => write!(f, "datetime"),
        }
    }
}
