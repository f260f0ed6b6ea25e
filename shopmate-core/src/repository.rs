/// Card repository.
///
/// Owns the in-memory card list and writes it through to the injected
/// store after every mutation:
/// - Most-recent-first ordering (new cards are prepended)
/// - Unknown ids are silent no-ops for edit/toggle/delete
/// - Delete-all needs a confirmation token from `request_delete_all`
/// - A failed write is reported but not rolled back; memory stays ahead
///   of storage until the next successful write
use std::collections::HashSet;

use crate::config::DEFAULT_CARDS_KEY;
use crate::storage::{KeyValueStore, StorageError};
use crate::types::{Card, CardDraft, CardUpdate};
use crate::validate::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum CardError {
    #[error("Invalid {field}: {0}", field = .0.field().as_str())]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Corrupt card data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to encode cards: {0}")]
    Encode(serde_json::Error),

    #[error("Delete all was not confirmed or the confirmation expired")]
    ConfirmationRequired,
}

/// Proof that the caller asked for confirmation before clearing the list.
///
/// Single use. Any mutation after `request_delete_all` invalidates it.
#[derive(Debug, PartialEq, Eq)]
pub struct DeleteAllConfirmation {
    id: u64,
}

impl DeleteAllConfirmation {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Rebuild a token handed across a command boundary. The repository
    /// still checks it against its pending request.
    pub fn from_id(id: u64) -> Self {
        Self { id }
    }
}

pub struct CardRepository<S> {
    store: S,
    key: String,
    cards: Vec<Card>,
    pending_delete_all: Option<u64>,
    next_confirmation: u64,
}

impl<S: KeyValueStore> CardRepository<S> {
    /// Repository over the default `@card_data` key. Call `load` before use.
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_CARDS_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            cards: Vec::new(),
            pending_delete_all: None,
            next_confirmation: 0,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn find(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Replace the in-memory list with what the store holds.
    /// On any error the current list is kept.
    pub async fn load(&mut self) -> Result<&[Card], CardError> {
        self.pending_delete_all = None;
        self.cards = self.read_cards().await?;
        Ok(&self.cards)
    }

    /// Like `load`, but corrupt data is logged and treated as an empty list.
    pub async fn load_or_empty(&mut self) -> Result<&[Card], CardError> {
        self.pending_delete_all = None;
        self.cards = match self.read_cards().await {
            Ok(cards) => cards,
            Err(CardError::Parse(e)) => {
                log::warn!("[shopmate.repo] Stored cards under {} are corrupt, starting empty: {}", self.key, e);
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        Ok(&self.cards)
    }

    /// Validate and prepend a new card.
    pub async fn add(&mut self, draft: &CardDraft) -> Result<&[Card], CardError> {
        let fields = draft.validate()?;
        self.pending_delete_all = None;

        let card = Card {
            id: self.next_id(),
            title: fields.title,
            price: fields.price,
            image: fields.image,
            category: fields.category,
            is_completed: false,
        };
        log::info!("[shopmate.repo] Added card {} ({})", card.id, card.title);
        self.cards.insert(0, card);
        self.persist().await?;
        Ok(&self.cards)
    }

    /// Replace fields of an existing card in place. Keeps its position and
    /// completion state.
    pub async fn edit(&mut self, id: &str, update: &CardUpdate) -> Result<&[Card], CardError> {
        let Some(index) = self.position(id) else {
            log::debug!("[shopmate.repo] Edit of unknown card {} ignored", id);
            return Ok(&self.cards);
        };
        if update.is_empty() {
            return Ok(&self.cards);
        }
        let changes = update.validate()?;
        self.pending_delete_all = None;

        changes.apply_to(&mut self.cards[index]);
        self.persist().await?;
        Ok(&self.cards)
    }

    pub async fn toggle_complete(&mut self, id: &str) -> Result<&[Card], CardError> {
        let Some(index) = self.position(id) else {
            log::debug!("[shopmate.repo] Toggle of unknown card {} ignored", id);
            return Ok(&self.cards);
        };
        self.pending_delete_all = None;

        let card = &mut self.cards[index];
        card.is_completed = !card.is_completed;
        self.persist().await?;
        Ok(&self.cards)
    }

    pub async fn delete(&mut self, id: &str) -> Result<&[Card], CardError> {
        let Some(index) = self.position(id) else {
            log::debug!("[shopmate.repo] Delete of unknown card {} ignored", id);
            return Ok(&self.cards);
        };
        self.pending_delete_all = None;

        let removed = self.cards.remove(index);
        log::info!("[shopmate.repo] Deleted card {} ({})", removed.id, removed.title);
        self.persist().await?;
        Ok(&self.cards)
    }

    /// First step of delete-all. Supersedes any earlier request.
    pub fn request_delete_all(&mut self) -> DeleteAllConfirmation {
        self.next_confirmation += 1;
        self.pending_delete_all = Some(self.next_confirmation);
        DeleteAllConfirmation {
            id: self.next_confirmation,
        }
    }

    pub fn cancel_delete_all(&mut self) {
        self.pending_delete_all = None;
    }

    /// Second step of delete-all: clears the list and removes the stored key.
    pub async fn delete_all(
        &mut self,
        confirmation: DeleteAllConfirmation,
    ) -> Result<&[Card], CardError> {
        if self.pending_delete_all != Some(confirmation.id) {
            return Err(CardError::ConfirmationRequired);
        }
        self.pending_delete_all = None;

        let count = self.cards.len();
        self.cards.clear();
        if let Err(e) = self.store.remove(&self.key).await {
            log::error!("[shopmate.repo] Failed to remove {}: {}", self.key, e);
            return Err(e.into());
        }
        log::info!("[shopmate.repo] Deleted all {} cards", count);
        Ok(&self.cards)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }

    fn next_id(&self) -> String {
        unused_id(&self.cards)
    }

    async fn read_cards(&self) -> Result<Vec<Card>, CardError> {
        let Some(raw) = self.store.read(&self.key).await? else {
            log::debug!("[shopmate.repo] No cards stored under {}", self.key);
            return Ok(Vec::new());
        };
        let mut cards: Vec<Card> = serde_json::from_str(&raw)?;
        reassign_duplicate_ids(&mut cards);
        log::info!("[shopmate.repo] Loaded {} cards", cards.len());
        Ok(cards)
    }

    async fn persist(&self) -> Result<(), CardError> {
        let json = serde_json::to_string(&self.cards).map_err(CardError::Encode)?;
        if let Err(e) = self.store.write(&self.key, &json).await {
            log::error!(
                "[shopmate.repo] Failed to persist {} cards, memory is ahead of storage: {}",
                self.cards.len(),
                e
            );
            return Err(e.into());
        }
        Ok(())
    }
}

/// Millisecond timestamp, bumped until no card in `cards` uses it.
fn unused_id(cards: &[Card]) -> String {
    let mut stamp = chrono::Utc::now().timestamp_millis();
    loop {
        let id = stamp.to_string();
        if !cards.iter().any(|c| c.id == id) {
            return id;
        }
        stamp += 1;
    }
}

/// Keeps the first card for each id and gives later repeats a fresh one.
/// The new ids reach storage with the next write.
fn reassign_duplicate_ids(cards: &mut [Card]) {
    let mut seen = HashSet::new();
    for i in 0..cards.len() {
        if seen.insert(cards[i].id.clone()) {
            continue;
        }
        let fresh = unused_id(cards);
        log::warn!(
            "[shopmate.repo] Duplicate card id {} in stored data, reassigned to {}",
            cards[i].id,
            fresh
        );
        seen.insert(fresh.clone());
        cards[i].id = fresh;
    }
}
