//! Loader configuration

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::data::loader::LoadOptions;
use crate::error::{DataError, Result};

/// Where the data lives and how to draw from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Training CSV (features and label per row)
    pub train_path: PathBuf,
    /// Testing feature CSV
    pub test_path: Option<PathBuf>,
    /// Labels joined to `test_path` by PassengerId
    pub labels_path: Option<PathBuf>,
    /// Samples per batch
    pub batch_size: usize,
    /// Sampler seed; entropy when absent
    pub seed: Option<u64>,
    /// First row of each file is a header
    pub has_headers: bool,
    /// Field delimiter
    pub delimiter: char,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            train_path: PathBuf::from("train.csv"),
            test_path: Some(PathBuf::from("test.csv")),
            labels_path: Some(PathBuf::from("gender_submission.csv")),
            batch_size: 20,
            seed: None,
            has_headers: true,
            delimiter: ',',
        }
    }
}

impl LoaderConfig {
    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(DataError::InvalidArgument("batch_size must be at least 1".into()));
        }
        if !self.delimiter.is_ascii() {
            return Err(DataError::InvalidArgument(format!(
                "delimiter {:?} is not a single-byte character",
                self.delimiter
            )));
        }
        match (&self.test_path, &self.labels_path) {
            (Some(_), None) => Err(DataError::InvalidArgument(
                "test_path is set but labels_path is not".into(),
            )),
            (None, Some(_)) => Err(DataError::InvalidArgument(
                "labels_path is set but test_path is not".into(),
            )),
            _ => Ok(()),
        }
    }

    /// Reader settings for the library loaders.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            has_headers: self.has_headers,
            delimiter: self.delimiter as u8,
            ..LoadOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_default() {
        let config = LoaderConfig::default();
        assert_eq!(config.batch_size, 20);
        assert!(config.validate().is_ok());
        assert_eq!(config.load_options(), LoadOptions::default());
    }

    #[test]
    fn test_config_save_load() {
        let config = LoaderConfig {
            seed: Some(3),
            batch_size: 8,
            ..Default::default()
        };

        let temp_file = NamedTempFile::new().unwrap();
        config.save(temp_file.path()).unwrap();
        let loaded = LoaderConfig::load(temp_file.path()).unwrap();

        assert_eq!(config, loaded);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: LoaderConfig =
            serde_json::from_str(r#"{ "train_path": "data/train.csv", "delimiter": ";" }"#).unwrap();
        assert_eq!(config.train_path, PathBuf::from("data/train.csv"));
        assert_eq!(config.batch_size, 20);
        assert_eq!(config.load_options().delimiter, b';');
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let zero = LoaderConfig {
            batch_size: 0,
            ..Default::default()
        };
        assert!(matches!(zero.validate(), Err(DataError::InvalidArgument(_))));

        let unpaired = LoaderConfig {
            labels_path: None,
            ..Default::default()
        };
        assert!(matches!(unpaired.validate(), Err(DataError::InvalidArgument(_))));

        let wide = LoaderConfig {
            delimiter: '→',
            ..Default::default()
        };
        assert!(wide.validate().is_err());
    }
}
