use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Represents the complete configuration for release-train.
///
/// Contains the changelog framing (product, install commands, compare links)
/// and the commit classification markers.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub changelog: ChangelogConfig,

    #[serde(default)]
    pub commits: CommitsConfig,
}

fn default_product_name() -> String {
    "nWave Framework".to_string()
}

fn default_package() -> String {
    "nwave-ai".to_string()
}

fn default_rc_install() -> String {
    r#"pipx install {package}=={version} --pip-args="--pre""#.to_string()
}

fn default_stable_install() -> String {
    "pipx install {package}".to_string()
}

fn default_compare_url() -> String {
    "https://github.com/{repo}/compare/{from}...{to}".to_string()
}

/// Stage framing used when rendering release notes.
///
/// Install and compare templates accept `{package}`, `{version}`, `{repo}`,
/// `{from}` and `{to}` placeholders.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    #[serde(default = "default_product_name")]
    pub product_name: String,

    #[serde(default = "default_package")]
    pub package: String,

    #[serde(default = "default_rc_install")]
    pub rc_install: String,

    #[serde(default = "default_stable_install")]
    pub stable_install: String,

    #[serde(default = "default_compare_url")]
    pub compare_url: String,
}

impl ChangelogConfig {
    pub fn rc_install_line(&self, version: &str) -> String {
        self.rc_install
            .replace("{package}", &self.package)
            .replace("{version}", version)
    }

    pub fn stable_install_line(&self, version: &str) -> String {
        self.stable_install
            .replace("{package}", &self.package)
            .replace("{version}", version)
    }

    pub fn compare_link(&self, repo: &str, from: &str, to: &str) -> String {
        self.compare_url
            .replace("{repo}", repo)
            .replace("{from}", from)
            .replace("{to}", to)
    }
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            product_name: default_product_name(),
            package: default_package(),
            rc_install: default_rc_install(),
            stable_install: default_stable_install(),
            compare_url: default_compare_url(),
        }
    }
}

fn default_exclude_markers() -> Vec<String> {
    vec!["chore(release):".to_string(), "[skip ci]".to_string()]
}

fn default_breaking_markers() -> Vec<String> {
    vec!["BREAKING CHANGE:".to_string()]
}

/// Markers driving commit classification.
///
/// A subject containing any exclude marker is left out of the release notes;
/// a commit whose body contains a breaking marker is breaking.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CommitsConfig {
    #[serde(default = "default_exclude_markers")]
    pub exclude_markers: Vec<String>,

    #[serde(default = "default_breaking_markers")]
    pub breaking_markers: Vec<String>,
}

impl Default for CommitsConfig {
    fn default() -> Self {
        CommitsConfig {
            exclude_markers: default_exclude_markers(),
            breaking_markers: default_breaking_markers(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasetrain.toml` in current directory
/// 3. `.releasetrain.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./releasetrain.toml").exists() {
        fs::read_to_string("./releasetrain.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".releasetrain.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            debug!("no configuration file found, using defaults");
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
