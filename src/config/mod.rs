//! Configuration management for Pathwise

pub mod session;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Hosted project URL (table store and functions live below it)
    pub store_url: String,

    /// Public project key sent with every store request
    pub anon_key: String,

    /// Base URL of the AI functions, defaults to `<store_url>/functions/v1`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functions_url: Option<String>,

    /// Pause between generation status messages, in milliseconds
    pub generation_pacing_ms: u64,

    /// Request timeout in seconds; unset waits indefinitely
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Column width for wrapped output
    pub text_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_url: String::new(),
            anon_key: String::new(),
            functions_url: None,
            generation_pacing_ms: 800,
            request_timeout_secs: None,
            text_width: 80,
        }
    }
}

impl Config {
    /// Settable keys, as accepted by [`Config::set`]
    pub const KEYS: &'static [&'static str] = &[
        "store-url",
        "anon-key",
        "functions-url",
        "generation-pacing-ms",
        "request-timeout-secs",
        "text-width",
    ];

    /// Load configuration from disk, or create default if not exists,
    /// then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a specific file, creating it with defaults if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Apply `PATHWISE_*` overrides from `lookup`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("PATHWISE_STORE_URL") {
            self.store_url = url;
        }
        if let Some(key) = lookup("PATHWISE_ANON_KEY") {
            self.anon_key = key;
        }
        if let Some(url) = lookup("PATHWISE_FUNCTIONS_URL") {
            self.functions_url = Some(url);
        }
    }

    /// Update one setting by key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "store-url" => self.store_url = value.trim_end_matches('/').to_string(),
            "anon-key" => self.anon_key = value.to_string(),
            "functions-url" => {
                self.functions_url =
                    (!value.is_empty()).then(|| value.trim_end_matches('/').to_string())
            }
            "generation-pacing-ms" => {
                self.generation_pacing_ms = value.parse().context("Expected milliseconds")?
            }
            "request-timeout-secs" => {
                self.request_timeout_secs = match value {
                    "" | "none" | "0" => None,
                    secs => Some(secs.parse().context("Expected seconds")?),
                }
            }
            "text-width" => {
                let width: usize = value.parse().context("Expected a column count")?;
                if width < 20 {
                    bail!("Text width must be at least 20 columns");
                }
                self.text_width = width;
            }
            _ => bail!("Unknown setting '{}'. Options: {}", key, Self::KEYS.join(", ")),
        }
        Ok(())
    }

    /// Base URL of the AI functions, if one can be determined
    pub fn functions_base(&self) -> Option<String> {
        match &self.functions_url {
            Some(url) if !url.is_empty() => Some(url.trim_end_matches('/').to_string()),
            _ if !self.store_url.is_empty() => {
                Some(format!("{}/functions/v1", self.store_url.trim_end_matches('/')))
            }
            _ => None,
        }
    }

    /// Check the store settings needed for any remote call
    pub fn ensure_store(&self) -> Result<()> {
        if self.store_url.is_empty() {
            bail!("Store URL not configured. Run `pathwise config set store-url <url>`");
        }
        if self.anon_key.is_empty() {
            bail!("Anon key not configured. Run `pathwise config set anon-key <key>`");
        }
        Ok(())
    }

    pub fn generation_pacing(&self) -> Duration {
        Duration::from_millis(self.generation_pacing_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "pathwise")
            .context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "pathwise").context("Failed to determine data directory")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config_waits_indefinitely() {
        let config = Config::default();
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.generation_pacing(), Duration::from_millis(800));
    }

    #[test]
    fn functions_base_derives_from_store_url() {
        let mut config =
            Config { store_url: "https://abc.example.co/".into(), ..Default::default() };
        assert_eq!(config.functions_base().as_deref(), Some("https://abc.example.co/functions/v1"));

        config.functions_url = Some("https://edge.example.dev/".into());
        assert_eq!(config.functions_base().as_deref(), Some("https://edge.example.dev"));

        assert_eq!(Config::default().functions_base(), None);
    }

    #[test]
    fn env_overrides_apply() {
        let env: HashMap<&str, &str> = [
            ("PATHWISE_STORE_URL", "https://env.example.co"),
            ("PATHWISE_FUNCTIONS_URL", "https://fn.example.co"),
        ]
        .into_iter()
        .collect();
        let mut config = Config::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.store_url, "https://env.example.co");
        assert_eq!(config.functions_url.as_deref(), Some("https://fn.example.co"));
        assert!(config.anon_key.is_empty());
    }

    #[test]
    fn set_validates_values() {
        let mut config = Config::default();
        config.set("request-timeout-secs", "30").unwrap();
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        config.set("request-timeout-secs", "none").unwrap();
        assert_eq!(config.request_timeout(), None);
        assert!(config.set("text-width", "5").is_err());
        assert!(config.set("colour", "blue").is_err());
    }

    #[test]
    fn ensure_store_requires_url_and_key() {
        let mut config = Config::default();
        assert!(config.ensure_store().is_err());
        config.set("store-url", "https://abc.example.co").unwrap();
        config.set("anon-key", "public-anon").unwrap();
        assert!(config.ensure_store().is_ok());
    }

    #[test]
    fn load_from_creates_defaults_then_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let mut changed = config.clone();
        changed.set("text-width", "100").unwrap();
        changed.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().text_width, 100);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let json = r#"{"store_url":"https://abc.example.co"}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.text_width, 80);
        assert_eq!(config.generation_pacing_ms, 800);
    }
}
