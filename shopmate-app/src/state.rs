/// Shared app state handed to every command.
///
/// The repository sits behind an async mutex held across its store write,
/// so commands issued back to back run one after another and each sees the
/// list the previous one left.
use std::sync::Arc;

use tokio::sync::Mutex;

use shopmate_core::{CardError, CardFilter, CardRepository, FileStore, KeyValueStore, ThemeStore};

use crate::config::AppConfig;

pub struct AppState<S = FileStore> {
    pub(crate) cards: Mutex<CardRepository<Arc<S>>>,
    pub(crate) theme: Mutex<ThemeStore<Arc<S>>>,
    pub(crate) filter: Mutex<CardFilter>,
    pub(crate) currency: String,
}

impl AppState<FileStore> {
    /// Open the on-disk store named by `config` and load saved state.
    pub async fn open(config: &AppConfig) -> Result<Self, CardError> {
        let store = FileStore::new(config.data_dir())?;
        Self::with_store(Arc::new(store), config).await
    }
}

impl<S: KeyValueStore> AppState<S> {
    /// Load cards and theme from `store`. Corrupt card data starts an empty list.
    pub async fn with_store(store: Arc<S>, config: &AppConfig) -> Result<Self, CardError> {
        let mut cards = CardRepository::with_key(store.clone(), config.keys.cards_key.clone());
        cards.load_or_empty().await?;

        let mut theme = ThemeStore::with_key(store, config.keys.theme_key.clone());
        theme.load().await?;

        log::info!(
            "[shopmate.app] Loaded {} cards, dark mode {}",
            cards.len(),
            if theme.is_dark() { "on" } else { "off" }
        );
        Ok(Self {
            cards: Mutex::new(cards),
            theme: Mutex::new(theme),
            filter: Mutex::new(CardFilter::default()),
            currency: config.currency.clone(),
        })
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }
}
