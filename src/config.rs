//! Configuration file support for posterform
//!
//! Handles `.posterform.toml` configuration file loading and saving.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = ".posterform.toml";

/// Repository that receives poster requests when none is configured
const DEFAULT_REPOSITORY: &str = "originalankur/maptoposter";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Color palette name: "cyberpunk", "nord", "minimal"
    #[serde(default = "default_palette")]
    pub palette: String,

    /// GitHub configuration
    #[serde(default)]
    pub github: GitHubConfig,

    /// Theme index configuration
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Form defaults
    #[serde(default)]
    pub form: FormConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            palette: default_palette(),
            github: GitHubConfig::default(),
            catalog: CatalogConfig::default(),
            form: FormConfig::default(),
        }
    }
}

fn default_palette() -> String {
    "cyberpunk".to_string()
}

/// GitHub-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// Repository receiving requests, in owner/repo format
    #[serde(default = "default_repository")]
    pub repository: String,

    /// Labels pre-applied to the new issue (empty = none)
    #[serde(default)]
    pub labels: Vec<String>,
}

fn default_repository() -> String {
    DEFAULT_REPOSITORY.to_string()
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            repository: default_repository(),
            labels: Vec::new(),
        }
    }
}

/// Theme index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// URL or local path of the theme index JSON.
    /// Derived from the repository's GitHub Pages site when unset.
    #[serde(default)]
    pub index: Option<String>,

    /// Base URL of the preview images.
    /// Derived from the repository's GitHub Pages site when unset.
    #[serde(default)]
    pub previews_base: Option<String>,

    /// Fetch timeout in seconds (0 disables the timeout)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            index: None,
            previews_base: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Form defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// Initial value of the distance field, in meters
    #[serde(default = "default_distance")]
    pub default_distance: String,
}

fn default_distance() -> String {
    "29000".to_string()
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            default_distance: default_distance(),
        }
    }
}

impl Config {
    /// Load configuration file (returns default if not found)
    ///
    /// Searches for `.posterform.toml` in the current directory.
    pub fn load() -> Result<Self> {
        let config_path = PathBuf::from(CONFIG_FILE_NAME);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from specified path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse configuration file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to specified path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize configuration")?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default(path: &Path) -> Result<()> {
        let config = Config::default();
        config.save_to(path)
    }

    /// Reject values that would produce a broken issue URL
    fn validate(&self) -> Result<()> {
        self.owner_and_repo()?;
        Ok(())
    }

    /// Split `github.repository` into (owner, repo)
    pub fn owner_and_repo(&self) -> Result<(&str, &str)> {
        let repository = self.github.repository.trim_matches('/');
        match repository.split_once('/') {
            Some((owner, repo))
                if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') =>
            {
                Ok((owner, repo))
            }
            _ => Err(anyhow!(
                "Invalid repository '{}': expected owner/repo",
                self.github.repository
            )),
        }
    }

    /// GitHub Pages site of the configured repository
    fn pages_base(&self) -> Result<String> {
        let (owner, repo) = self.owner_and_repo()?;
        Ok(format!(
            "https://{}.github.io/{}",
            owner.to_lowercase(),
            repo
        ))
    }

    /// Location of the theme index (explicit or derived)
    pub fn index_location(&self) -> Result<String> {
        match self.catalog.index {
            Some(ref index) => Ok(index.clone()),
            None => Ok(format!("{}/themes/index.json", self.pages_base()?)),
        }
    }

    /// Base URL of the preview images (explicit or derived)
    pub fn previews_base(&self) -> Result<String> {
        match self.catalog.previews_base {
            Some(ref base) => Ok(base.trim_end_matches('/').to_string()),
            None => Ok(format!("{}/assets/theme-previews", self.pages_base()?)),
        }
    }

    /// Fetch timeout, `None` when disabled
    pub fn fetch_timeout(&self) -> Option<Duration> {
        match self.catalog.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.palette, "cyberpunk");
        assert_eq!(config.github.repository, "originalankur/maptoposter");
        assert!(config.github.labels.is_empty());
        assert!(config.catalog.index.is_none());
        assert_eq!(config.catalog.timeout_secs, 30);
        assert_eq!(config.form.default_distance, "29000");
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
palette = "nord"

[github]
repository = "someone/posters"
labels = ["poster-request"]

[catalog]
index = "./site/themes/index.json"
timeout_secs = 5

[form]
default_distance = "12000"
"#
        )
        .unwrap();

        let config = Config::load_from(temp_file.path()).unwrap();

        assert_eq!(config.palette, "nord");
        assert_eq!(config.github.repository, "someone/posters");
        assert_eq!(config.github.labels, vec!["poster-request"]);
        assert_eq!(config.catalog.index.as_deref(), Some("./site/themes/index.json"));
        assert_eq!(config.fetch_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.form.default_distance, "12000");
    }

    #[test]
    fn test_partial_config() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[form]
default_distance = "8000"
"#
        )
        .unwrap();

        let config = Config::load_from(temp_file.path()).unwrap();

        assert_eq!(config.form.default_distance, "8000");
        // Default values
        assert_eq!(config.palette, "cyberpunk");
        assert_eq!(config.github.repository, "originalankur/maptoposter");
        assert_eq!(config.catalog.timeout_secs, 30);
    }

    #[test]
    fn test_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        let mut config = Config::default();
        config.github.repository = "test/repo".to_string();
        config.catalog.previews_base = Some("https://cdn.example.com/previews".to_string());

        config.save_to(path).unwrap();

        let loaded = Config::load_from(path).unwrap();
        assert_eq!(loaded.github.repository, "test/repo");
        assert_eq!(
            loaded.catalog.previews_base.as_deref(),
            Some("https://cdn.example.com/previews")
        );
    }

    #[test]
    fn test_generate_default() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        Config::generate_default(path).unwrap();

        let loaded = Config::load_from(path).unwrap();
        assert_eq!(loaded.palette, "cyberpunk");
        assert_eq!(loaded.form.default_distance, "29000");
    }

    #[test]
    fn test_invalid_repository_rejected() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[github]
repository = "not-a-repo"
"#
        )
        .unwrap();

        let err = Config::load_from(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("owner/repo"));
    }

    #[test]
    fn test_derived_locations() {
        let mut config = Config::default();
        config.github.repository = "SomeOne/posters".to_string();

        assert_eq!(
            config.index_location().unwrap(),
            "https://someone.github.io/posters/themes/index.json"
        );
        assert_eq!(
            config.previews_base().unwrap(),
            "https://someone.github.io/posters/assets/theme-previews"
        );
    }

    #[test]
    fn test_explicit_locations_win() {
        let mut config = Config::default();
        config.catalog.index = Some("themes.json".to_string());
        config.catalog.previews_base = Some("https://cdn.example.com/p/".to_string());

        assert_eq!(config.index_location().unwrap(), "themes.json");
        assert_eq!(config.previews_base().unwrap(), "https://cdn.example.com/p");
    }

    #[test]
    fn test_timeout_disabled() {
        let mut config = Config::default();
        config.catalog.timeout_secs = 0;
        assert!(config.fetch_timeout().is_none());
    }
}
