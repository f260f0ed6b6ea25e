use crate::config::DEFAULT_THEME_KEY;
use crate::storage::{KeyValueStore, StorageError};

/// Persisted dark/light mode flag.
pub struct ThemeStore<S> {
    store: S,
    key: String,
    dark: bool,
}

impl<S: KeyValueStore> ThemeStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_THEME_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            dark: false,
        }
    }

    pub fn is_dark(&self) -> bool {
        self.dark
    }

    /// Read the stored flag. Missing or unreadable values mean light mode.
    pub async fn load(&mut self) -> Result<bool, StorageError> {
        self.dark = match self.store.read(&self.key).await? {
            Some(raw) => serde_json::from_str::<bool>(&raw).unwrap_or_else(|e| {
                log::warn!("[shopmate.theme] Ignoring stored theme {:?}: {}", raw, e);
                false
            }),
            None => false,
        };
        Ok(self.dark)
    }

    /// Flip the flag and persist it. Returns the new value.
    pub async fn toggle(&mut self) -> Result<bool, StorageError> {
        self.set(!self.dark).await
    }

    /// On a failed write the new value stays in memory.
    pub async fn set(&mut self, dark: bool) -> Result<bool, StorageError> {
        self.dark = dark;
        let raw = if dark { "true" } else { "false" };
        if let Err(e) = self.store.write(&self.key, raw).await {
            log::error!("[shopmate.theme] Failed to persist theme: {}", e);
            return Err(e);
        }
        log::debug!("[shopmate.theme] Dark mode {}", if dark { "on" } else { "off" });
        Ok(dark)
    }
}
