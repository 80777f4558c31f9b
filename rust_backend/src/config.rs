//! Ingestion configuration file support.
//!
//! An `ingest.toml` names the two source files and how strictly the
//! close-approach metadata is checked:
//!
//! ```toml
//! [sources]
//! neos = "data/neos.csv"
//! approaches = "data/cad.json"
//!
//! [approaches]
//! verify_field_header = true
//! check_count = true
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::parsing::json_parser::ApproachContract;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "ingest.toml";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("No {} found in standard locations", CONFIG_FILE_NAME)]
    NotFound,
}

/// Ingestion configuration from file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestConfig {
    pub sources: SourceSettings,
    #[serde(default)]
    pub approaches: ApproachSettings,
}

/// Paths of the two source files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSettings {
    pub neos: PathBuf,
    pub approaches: PathBuf,
}

/// Close-approach metadata checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproachSettings {
    #[serde(default = "default_true")]
    pub verify_field_header: bool,
    #[serde(default = "default_true")]
    pub check_count: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ApproachSettings {
    fn default() -> Self {
        Self {
            verify_field_header: default_true(),
            check_count: default_true(),
        }
    }
}

impl From<&ApproachSettings> for ApproachContract {
    fn from(settings: &ApproachSettings) -> Self {
        ApproachContract {
            verify_field_header: settings.verify_field_header,
            check_count: settings.check_count,
        }
    }
}

impl FromStr for IngestConfig {
    type Err = ConfigError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(content)?)
    }
}

impl IngestConfig {
    /// Load configuration from a TOML file.
    ///
    /// Relative source paths are resolved against the directory holding the
    /// configuration file.
    ///
    /// # Returns
    /// * `Ok(IngestConfig)` if successful
    /// * `Err(ConfigError)` if file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: IngestConfig = content.parse()?;

        match path.parent() {
            Some(base) => Ok(config.resolved_against(base)),
            None => Ok(config),
        }
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `ingest.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            Path::new("rust_backend").join(CONFIG_FILE_NAME),
            Path::new("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ConfigError::NotFound)
    }

    /// Contract to apply when parsing the close-approach source.
    pub fn approach_contract(&self) -> ApproachContract {
        ApproachContract::from(&self.approaches)
    }

    fn resolved_against(mut self, base: &Path) -> Self {
        if self.sources.neos.is_relative() {
            self.sources.neos = base.join(&self.sources.neos);
        }
        if self.sources.approaches.is_relative() {
            self.sources.approaches = base.join(&self.sources.approaches);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_parse_minimal_config() {
        let config: IngestConfig = r#"
            [sources]
            neos = "neos.csv"
            approaches = "cad.json"
        "#
        .parse()
        .unwrap();

        assert_eq!(config.sources.neos, PathBuf::from("neos.csv"));
        assert_eq!(config.approaches, ApproachSettings::default());
        assert_eq!(config.approach_contract(), ApproachContract::default());
    }

    #[test]
    fn test_parse_lenient_config() {
        let config: IngestConfig = r#"
            [sources]
            neos = "neos.csv"
            approaches = "cad.json"

            [approaches]
            verify_field_header = false
            check_count = false
        "#
        .parse()
        .unwrap();

        assert_eq!(config.approach_contract(), ApproachContract::lenient());
    }

    #[test]
    fn test_missing_sources_is_parse_error() {
        let result = "[approaches]\ncheck_count = false\n".parse::<IngestConfig>();
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_file_resolves_relative_paths() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        let mut file = fs::File::create(&config_path).unwrap();
        writeln!(file, "[sources]\nneos = \"neos.csv\"\napproaches = \"/abs/cad.json\"").unwrap();

        let config = IngestConfig::from_file(&config_path).unwrap();
        assert_eq!(config.sources.neos, dir.path().join("neos.csv"));
        assert_eq!(config.sources.approaches, PathBuf::from("/abs/cad.json"));
    }

    #[test]
    fn test_from_file_missing() {
        let result = IngestConfig::from_file("no/such/ingest.toml");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }
}
