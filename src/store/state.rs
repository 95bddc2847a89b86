//! Filesystem layout and lifecycle for one state root directory.

use std::path::{Path, PathBuf};

use crate::config::TrainingConfig;
use crate::store::model::ModelState;
use crate::store::{StoreError, disk};

const SAMPLE_DATASET: &str = "The curious mind observes the world with patience and care.\n\
Practice each day and skill will grow stronger.\n\
Knowledge shared kindly becomes wisdom for everyone.\n";

const FALLBACK_LINE: &str = "Learning thrives when curiosity meets practice.";

/// Owns the files beneath one state root directory.
///
/// Exactly one writer process per root is assumed; no locking is
/// implemented.
#[derive(Debug, Clone)]
pub struct StateManager {
    root: PathBuf,
}

impl StateManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.txt")
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.root.join("dataset.txt")
    }

    pub fn model_state_path(&self) -> PathBuf {
        self.root.join("model_state.txt")
    }

    pub fn log_path(&self) -> PathBuf {
        self.root.join("events.log")
    }

    /// Load the configuration, writing the built-in default file first on
    /// a fresh root.
    pub fn load_or_init_config(&self) -> Result<TrainingConfig, StoreError> {
        let path = self.config_path();
        match disk::try_read(&path)? {
            Some(content) => Ok(TrainingConfig::parse(&content)),
            None => {
                let content = TrainingConfig::default_file_content();
                disk::atomic_write(&path, content.as_bytes())?;
                Ok(TrainingConfig::parse(&content))
            }
        }
    }

    /// Load the dataset lines, writing built-in sample content on a fresh
    /// root. Trailing carriage returns are stripped; an empty dataset falls
    /// back to a single built-in line.
    pub fn load_or_init_dataset(&self) -> Result<Vec<String>, StoreError> {
        let path = self.dataset_path();
        let content = match disk::try_read(&path)? {
            Some(content) => content,
            None => {
                disk::atomic_write(&path, SAMPLE_DATASET.as_bytes())?;
                SAMPLE_DATASET.to_string()
            }
        };

        let mut lines: Vec<String> = content.lines().map(str::to_string).collect();
        if lines.is_empty() {
            lines.push(FALLBACK_LINE.to_string());
        }
        Ok(lines)
    }

    /// Load the persisted model, or write and return a fresh default when
    /// the file does not exist.
    ///
    /// First-run initialization triggers only on a fully absent file; a
    /// present-but-corrupt file is a hard error requiring operator
    /// intervention.
    pub fn load_or_init_model_state(&self) -> Result<ModelState, StoreError> {
        let path = self.model_state_path();
        match disk::try_read(&path)? {
            Some(content) => ModelState::decode(&content),
            None => {
                let state = ModelState::new();
                self.save_model_state(&state)?;
                Ok(state)
            }
        }
    }

    /// Persist the whole state, atomically replacing the previous file.
    pub fn save_model_state(&self, state: &ModelState) -> Result<(), StoreError> {
        disk::atomic_write(&self.model_state_path(), state.encode().as_bytes())
    }
}
