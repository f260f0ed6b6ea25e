//! Shopping list state: cards, validation, persistence and derived views.
//!
//! The repository owns the card list and writes it through to a
//! `KeyValueStore` on every change. Filtering and totals are pure functions
//! recomputed from the list.

pub mod config;
pub mod filter;
pub mod repository;
pub mod storage;
pub mod theme;
pub mod total;
pub mod types;
pub mod validate;
pub mod view;

pub use filter::{filter_cards, CardFilter};
pub use repository::{CardError, CardRepository, DeleteAllConfirmation};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use theme::ThemeStore;
pub use total::{format_total, total_price};
pub use types::{Card, CardDraft, CardUpdate, Category};
pub use validate::{FormState, ValidationError};
pub use view::CardsView;
