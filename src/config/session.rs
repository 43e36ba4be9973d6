//! Navigation state persistence
//!
//! Remembers the path being worked on and the last step opened in each path
//! so commands can be run without repeating ids.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Config;

/// All session state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Path opened most recently
    pub current_path_id: Option<Uuid>,
    /// Last opened step per path
    #[serde(default)]
    pub last_steps: HashMap<Uuid, Uuid>,
}

impl Session {
    /// Load session from disk
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::session_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read session from {:?}", path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse session.json")
        } else {
            Ok(Self::default())
        }
    }

    /// Save session to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::session_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize session")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write session to {:?}", path))?;

        Ok(())
    }

    /// Get the path to the session file
    fn session_path() -> Result<PathBuf> {
        Ok(Config::data_dir()?.join("session.json"))
    }

    pub fn open_path(&mut self, path_id: Uuid) {
        self.current_path_id = Some(path_id);
    }

    pub fn record_step(&mut self, path_id: Uuid, step_id: Uuid) {
        self.current_path_id = Some(path_id);
        self.last_steps.insert(path_id, step_id);
    }

    pub fn last_step(&self, path_id: Uuid) -> Option<Uuid> {
        self.last_steps.get(&path_id).copied()
    }
}
