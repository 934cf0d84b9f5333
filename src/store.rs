//! History and favorites persistence
//!
//! The store is loaded once at startup and written back after every
//! mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AliasForgeError, Result};
use crate::types::{GenerationConfig, Mode, Separator, VariationResult};

/// Number of history entries kept
pub const MAX_HISTORY: usize = 50;

/// One past generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    /// Single address or raw batch input
    pub input: String,
    pub mode: Mode,
    /// Only recorded for tag mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<Separator>,
    pub count: usize,
    pub is_batch: bool,
}

impl HistoryItem {
    pub fn new(input: impl Into<String>, config: &GenerationConfig, count: usize, is_batch: bool) -> Self {
        let now = Utc::now();
        let (tags, separator) = match config.mode {
            Mode::Plus => (Some(config.tags.clone()), Some(config.separator)),
            Mode::Dot => (None, None),
        };

        Self {
            id: now.timestamp_millis().to_string(),
            timestamp: now,
            input: input.into(),
            mode: config.mode,
            tags,
            separator,
            count,
            is_batch,
        }
    }

    /// Generation config that reproduces this request
    pub fn restore(&self, base: &GenerationConfig) -> GenerationConfig {
        GenerationConfig {
            mode: self.mode,
            separator: self.separator.unwrap_or(base.separator),
            tags: self.tags.clone().unwrap_or_else(|| base.tags.clone()),
            ..base.clone()
        }
    }
}

/// Persisted state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreState {
    /// Newest first
    #[serde(default)]
    pub history: Vec<HistoryItem>,
    /// Favorite addresses in the order they were added
    #[serde(default)]
    pub favorites: Vec<String>,
}

/// File-backed history/favorites store
#[derive(Debug)]
pub struct VariantStore {
    path: PathBuf,
    state: StoreState,
}

impl VariantStore {
    /// Load the store at `path`; a missing file gives an empty store
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = if path.exists() {
            Self::load(&path)?
        } else {
            StoreState::default()
        };

        tracing::debug!(
            path = %path.display(),
            history = state.history.len(),
            favorites = state.favorites.len(),
            "Store opened"
        );

        Ok(Self { path, state })
    }

    /// Get default store file path
    pub fn default_path() -> PathBuf {
        std::env::var("ALIAS_FORGE_STORE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("output/alias-forge.json"))
    }

    fn load(path: &Path) -> Result<StoreState> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AliasForgeError::io(e.to_string(), Some(path.to_string_lossy().to_string()))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            AliasForgeError::parse(e.to_string(), Some(content))
        })
    }

    /// Save state to file
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                AliasForgeError::io(e.to_string(), Some(parent.to_string_lossy().to_string()))
            })?;
        }

        let content = serde_json::to_string_pretty(&self.state).map_err(|e| {
            AliasForgeError::internal(format!("Failed to serialize store: {}", e))
        })?;

        std::fs::write(&self.path, content).map_err(|e| {
            AliasForgeError::io(e.to_string(), Some(self.path.to_string_lossy().to_string()))
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn history(&self) -> &[HistoryItem] {
        &self.state.history
    }

    pub fn favorites(&self) -> &[String] {
        &self.state.favorites
    }

    /// Add a history entry at the front, keeping the newest [`MAX_HISTORY`]
    pub fn record(&mut self, item: HistoryItem) -> Result<()> {
        self.state.history.insert(0, item);
        self.state.history.truncate(MAX_HISTORY);
        self.save()
    }

    /// Remove one history entry; returns whether it existed
    pub fn delete_history(&mut self, id: &str) -> Result<bool> {
        let before = self.state.history.len();
        self.state.history.retain(|h| h.id != id);
        let removed = self.state.history.len() != before;
        if removed {
            self.save()?;
        }
        Ok(removed)
    }

    pub fn clear_history(&mut self) -> Result<()> {
        self.state.history.clear();
        self.save()
    }

    pub fn is_favorite(&self, email: &str) -> bool {
        self.state.favorites.iter().any(|f| f == email)
    }

    /// Flip favorite status; returns the new status
    pub fn toggle_favorite(&mut self, email: &str) -> Result<bool> {
        let now_favorite = if self.is_favorite(email) {
            self.state.favorites.retain(|f| f != email);
            false
        } else {
            self.state.favorites.push(email.to_string());
            true
        };
        self.save()?;
        Ok(now_favorite)
    }

    pub fn clear_favorites(&mut self) -> Result<()> {
        self.state.favorites.clear();
        self.save()
    }

    /// Mark results whose address is a stored favorite
    pub fn apply_favorites(&self, results: &mut [VariationResult]) {
        for result in results {
            result.is_favorite = self.is_favorite(&result.email);
        }
    }
}
