use crate::error::{Result, TagBumpError};
use semver::Prerelease;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Semantic version as found in a tag name.
///
/// Remembers whether the tag carried a leading `v` so that a bumped version
/// can be rendered in the same style. The prefix plays no part in precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Prerelease,
    pub v_prefix: bool,
}

impl SemanticVersion {
    /// Create a release version without a `v` prefix
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            pre: Prerelease::EMPTY,
            v_prefix: false,
        }
    }

    /// The version used when a repository has no version tags yet
    pub fn zero() -> Self {
        Self::new(0, 0, 0)
    }

    /// Parse a tag such as `v1.2.3` or `1.2.3-rc.1`.
    ///
    /// Numeric components may carry leading zeros. The pre-release part must
    /// be a valid semver pre-release: no empty identifiers and no leading zeros
    /// in numeric identifiers.
    pub fn parse(tag: &str) -> Result<Self> {
        let (v_prefix, rest) = match tag.strip_prefix('v') {
            Some(rest) => (true, rest),
            None => (false, tag),
        };

        let (core, pre) = match rest.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (rest, None),
        };

        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() != 3 {
            return Err(TagBumpError::malformed(
                tag,
                "expected MAJOR.MINOR.PATCH",
            ));
        }

        let major = parse_component(tag, "major", parts[0])?;
        let minor = parse_component(tag, "minor", parts[1])?;
        let patch = parse_component(tag, "patch", parts[2])?;

        let pre = match pre {
            None => Prerelease::EMPTY,
            Some("") => return Err(TagBumpError::malformed(tag, "empty pre-release")),
            Some(pre) => Prerelease::new(pre)
                .map_err(|e| TagBumpError::malformed(tag, format!("invalid pre-release: {}", e)))?,
        };

        Ok(SemanticVersion {
            major,
            minor,
            patch,
            pre,
            v_prefix,
        })
    }

    /// The pre-release suffix, if any
    pub fn prerelease(&self) -> Option<&str> {
        if self.pre.is_empty() {
            None
        } else {
            Some(self.pre.as_str())
        }
    }

    pub fn is_prerelease(&self) -> bool {
        !self.pre.is_empty()
    }

    /// `[v]major.minor.patch` without any pre-release
    pub fn core(&self) -> String {
        format!(
            "{}{}.{}.{}",
            if self.v_prefix { "v" } else { "" },
            self.major,
            self.minor,
            self.patch
        )
    }

    /// Whether both versions share major, minor and patch
    pub fn same_core(&self, other: &SemanticVersion) -> bool {
        (self.major, self.minor, self.patch) == (other.major, other.minor, other.patch)
    }

    /// Standard semver precedence.
    ///
    /// `semver::Prerelease` orders an empty pre-release above any non-empty one,
    /// so a release sorts above its own pre-releases.
    pub fn cmp_precedence(&self, other: &SemanticVersion) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| self.pre.cmp(&other.pre))
    }

    /// Apply the positional part of a bump.
    ///
    /// `Major`, `Minor` and `Patch` drop any pre-release. `None` keeps the
    /// version as is, pre-release included. A component already at `u64::MAX`
    /// cannot be incremented and is reported as a malformed tag.
    pub fn increment(&self, category: BumpCategory) -> Result<Self> {
        let (major, minor, patch) = match category {
            BumpCategory::Major => (self.bumped("major", self.major)?, 0, 0),
            BumpCategory::Minor => (self.major, self.bumped("minor", self.minor)?, 0),
            BumpCategory::Patch => {
                (self.major, self.minor, self.bumped("patch", self.patch)?)
            }
            BumpCategory::None => return Ok(self.clone()),
        };

        Ok(SemanticVersion {
            major,
            minor,
            patch,
            pre: Prerelease::EMPTY,
            v_prefix: self.v_prefix,
        })
    }

    fn bumped(&self, name: &str, value: u64) -> Result<u64> {
        value.checked_add(1).ok_or_else(|| {
            TagBumpError::malformed(self.to_string(), format!("{} version overflows", name))
        })
    }
}

fn parse_component(tag: &str, name: &str, raw: &str) -> Result<u64> {
    raw.parse::<u64>()
        .map_err(|_| TagBumpError::malformed(tag, format!("invalid {} version '{}'", name, raw)))
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.core())?;
        if let Some(pre) = self.prerelease() {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

impl FromStr for SemanticVersion {
    type Err = TagBumpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Severity of the change a new tag represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpCategory {
    Major,
    Minor,
    Patch,
    /// No positional increment; only the pre-release may change
    None,
}

impl fmt::Display for BumpCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BumpCategory::Major => write!(f, "major"),
            BumpCategory::Minor => write!(f, "minor"),
            BumpCategory::Patch => write!(f, "patch"),
            BumpCategory::None => write!(f, "none"),
        }
    }
}

impl FromStr for BumpCategory {
    type Err = TagBumpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "major" => Ok(BumpCategory::Major),
            "minor" => Ok(BumpCategory::Minor),
            "patch" => Ok(BumpCategory::Patch),
            "none" => Ok(BumpCategory::None),
            _ => Err(TagBumpError::config(format!(
                "Invalid bump category: '{}' (expected major, minor, patch or none)",
                s
            ))),
        }
    }
}
