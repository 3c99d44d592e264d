use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::PhimtraError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub semantic: SemanticConfig,
    pub catalog: CatalogConfig,
    pub logging: LoggingConfig,
}

/// Embedding service used by the keyword fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub model: String,
    pub api_key_env: String,
    pub threshold: f32,
    pub top_k: usize,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub filter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl AppConfig {
    /// Load config: the user file if it exists, otherwise the built-in defaults.
    pub fn load() -> Result<Self, PhimtraError> {
        let user_path = Self::config_path();
        if user_path.exists() {
            Self::load_from(&user_path)
        } else {
            Self::from_toml(DEFAULT_CONFIG)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, PhimtraError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PhimtraError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(content: &str) -> Result<Self, PhimtraError> {
        let config: AppConfig =
            toml::from_str(content).map_err(|e| PhimtraError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save current config to the user config file.
    pub fn save(&self) -> Result<(), PhimtraError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), PhimtraError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, PhimtraError> {
        toml::to_string_pretty(self).map_err(|e| PhimtraError::Config(e.to_string()))
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        Self::project_dirs()
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    pub fn validate(&self) -> Result<(), PhimtraError> {
        self.semantic.endpoint_url()?;

        let s = &self.semantic;
        if !s.threshold.is_finite() || !(-1.0..=1.0).contains(&s.threshold) {
            return Err(PhimtraError::Config(format!(
                "semantic.threshold must be within [-1, 1], got {}",
                s.threshold
            )));
        }
        if s.top_k == 0 {
            return Err(PhimtraError::Config("semantic.top_k must be at least 1".into()));
        }
        if s.timeout_secs == 0 {
            return Err(PhimtraError::Config("semantic.timeout_secs must be at least 1".into()));
        }
        Ok(())
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "phimtra")
    }
}

impl SemanticConfig {
    /// The embeddings endpoint, which must be an absolute http(s) URL.
    pub fn endpoint_url(&self) -> Result<Url, PhimtraError> {
        let url = Url::parse(&self.endpoint).map_err(|e| {
            PhimtraError::Config(format!("semantic.endpoint {:?}: {e}", self.endpoint))
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(PhimtraError::Config(format!(
                "semantic.endpoint must use http or https, got {other}"
            ))),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("built-in default config is valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AppConfig::default();
        assert!(!config.semantic.enabled);
        assert_eq!(config.semantic.threshold, 0.5);
        assert_eq!(config.semantic.top_k, 3);
        assert_eq!(config.semantic.api_key_env, "OPENAI_API_KEY");
        assert!(config.catalog.categories.is_empty());
        assert!(config.logging.file.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_roundtrip() {
        let config = AppConfig::default();
        let serialized = config.to_toml().unwrap();
        let deserialized = AppConfig::from_toml(&serialized).unwrap();
        assert_eq!(deserialized.semantic.endpoint, config.semantic.endpoint);
        assert_eq!(deserialized.logging.filter, config.logging.filter);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.semantic.enabled = true;
        config.catalog.categories = vec!["Hài".into(), "Kinh dị".into()];
        config.logging.file = Some(PathBuf::from("phimtra.log"));
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert!(loaded.semantic.enabled);
        assert_eq!(loaded.catalog.categories, vec!["Hài", "Kinh dị"]);
        assert_eq!(loaded.logging.file, Some(PathBuf::from("phimtra.log")));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, PhimtraError::Config(_)));
    }

    #[test]
    fn test_rejects_bad_endpoint() {
        let mut config = AppConfig::default();
        config.semantic.endpoint = "not a url".into();
        assert!(matches!(config.validate(), Err(PhimtraError::Config(_))));

        config.semantic.endpoint = "ftp://example.com/v1/embeddings".into();
        assert!(matches!(config.validate(), Err(PhimtraError::Config(_))));

        config.semantic.endpoint = "http://localhost:8080/v1/embeddings".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_settings() {
        let mut config = AppConfig::default();
        config.semantic.threshold = 1.5;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.semantic.top_k = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            AppConfig::from_toml("[semantic]\nenabled = \"yes\""),
            Err(PhimtraError::Config(_))
        ));
    }
}
