use crate::domain::{BumpCategory, PreReleaseFormat, RuleSet};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name looked up in the current directory
pub const LOCAL_CONFIG_FILE: &str = "gittagbump.toml";
/// File name looked up in the user configuration directory
pub const USER_CONFIG_FILE: &str = ".gittagbump.toml";

const DEFAULT_MAJOR_REGEX: &str =
    r"^(feat|feature|enh|enhanc|enhancement|fix|bugfix|chore)(\([a-z0-9-]+\))?!/";
const DEFAULT_MINOR_REGEX: &str = r"^(feat|feature)(\([a-z0-9-]+\))?/";
const DEFAULT_PATCH_REGEX: &str = r"^(enh|enhanc|enhancement|fix|bugfix|chore)(\([a-z0-9-]+\))?/";

/// Represents the complete configuration for git-tag-bump.
///
/// Contains the three branch classification rules, pre-release defaults and behavior options.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_major")]
    pub major: Identifier,

    #[serde(default = "default_minor")]
    pub minor: Identifier,

    #[serde(default = "default_patch")]
    pub patch: Identifier,

    #[serde(default)]
    pub prerelease: PreReleaseConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// How a bump category is recognised
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Identifier {
    pub branch: BranchIdentifier,
}

/// Branch based recognition
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BranchIdentifier {
    pub name: RegexIdentifier,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RegexIdentifier {
    pub regex: String,
}

impl Identifier {
    pub fn from_regex(regex: impl Into<String>) -> Self {
        Identifier {
            branch: BranchIdentifier {
                name: RegexIdentifier {
                    regex: regex.into(),
                },
            },
        }
    }

    /// The branch name pattern
    pub fn regex(&self) -> &str {
        &self.branch.name.regex
    }
}

fn default_major() -> Identifier {
    Identifier::from_regex(DEFAULT_MAJOR_REGEX)
}

fn default_minor() -> Identifier {
    Identifier::from_regex(DEFAULT_MINOR_REGEX)
}

fn default_patch() -> Identifier {
    Identifier::from_regex(DEFAULT_PATCH_REGEX)
}

fn default_prefix() -> String {
    "rc".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

/// Defaults for pre-release tags, overridable on the command line.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PreReleaseConfig {
    #[serde(default)]
    pub format: PreReleaseFormat,

    #[serde(default = "default_prefix")]
    pub prefix: String,
}

impl Default for PreReleaseConfig {
    fn default() -> Self {
        PreReleaseConfig {
            format: PreReleaseFormat::default(),
            prefix: default_prefix(),
        }
    }
}

/// Configuration for behavior customization.
///
/// Controls runtime behavior of git-tag-bump without affecting version computation.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BehaviorConfig {
    /// Remote used when pushing tags
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Category used when no branch rule matches; unset makes that an error
    #[serde(default)]
    pub fallback_bump: Option<BumpCategory>,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            remote: default_remote(),
            fallback_bump: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            major: default_major(),
            minor: default_minor(),
            patch: default_patch(),
            prerelease: PreReleaseConfig::default(),
            behavior: BehaviorConfig::default(),
        }
    }
}

impl Config {
    /// Compile the branch rules, failing on the first invalid pattern
    pub fn rule_set(&self) -> Result<RuleSet> {
        RuleSet::new(self.major.regex(), self.minor.regex(), self.patch.regex())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gittagbump.toml` in current directory
/// 3. `.gittagbump.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        fs::read_to_string(LOCAL_CONFIG_FILE)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG_FILE);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
