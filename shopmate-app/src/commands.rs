use serde::Serialize;

use shopmate_core::validate::parse_category;
use shopmate_core::{
    Card, CardDraft, CardFilter, CardUpdate, CardsView, DeleteAllConfirmation, KeyValueStore,
};

use crate::state::AppState;

/// What the delete-all prompt shows; `token` goes back in `confirm_delete_all`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAllPrompt {
    pub token: u64,
    pub card_count: usize,
}

async fn build_view<S: KeyValueStore>(state: &AppState<S>, cards: &[Card]) -> CardsView {
    let filter = state.filter.lock().await;
    CardsView::build(cards, &filter, &state.currency)
}

/// Current view under the active filter.
pub async fn current_view<S: KeyValueStore>(state: &AppState<S>) -> CardsView {
    let repo = state.cards.lock().await;
    build_view(state, repo.cards()).await
}

/// Replace the active filter and return the view under it.
pub async fn list_cards<S: KeyValueStore>(
    state: &AppState<S>,
    search: String,
    category: Option<String>,
) -> Result<CardsView, String> {
    let category = parse_category(category.as_deref().unwrap_or_default()).map_err(|e| e.to_string())?;
    let repo = state.cards.lock().await;
    *state.filter.lock().await = CardFilter::new(search, category);
    Ok(build_view(state, repo.cards()).await)
}

pub async fn add_card<S: KeyValueStore>(
    state: &AppState<S>,
    title: String,
    price: String,
    image: Option<String>,
    category: Option<String>,
) -> Result<CardsView, String> {
    let draft = CardDraft {
        title,
        price,
        image: image.unwrap_or_default(),
        category: category.unwrap_or_default(),
    };
    let mut repo = state.cards.lock().await;
    let cards = repo.add(&draft).await.map_err(|e| e.to_string())?;
    Ok(build_view(state, cards).await)
}

pub async fn edit_card<S: KeyValueStore>(
    state: &AppState<S>,
    id: String,
    title: Option<String>,
    price: Option<String>,
    image: Option<String>,
    category: Option<String>,
) -> Result<CardsView, String> {
    let update = CardUpdate {
        title,
        price,
        image,
        category,
    };
    let mut repo = state.cards.lock().await;
    let cards = repo.edit(&id, &update).await.map_err(|e| e.to_string())?;
    Ok(build_view(state, cards).await)
}

pub async fn toggle_card<S: KeyValueStore>(
    state: &AppState<S>,
    id: String,
) -> Result<CardsView, String> {
    let mut repo = state.cards.lock().await;
    let cards = repo.toggle_complete(&id).await.map_err(|e| e.to_string())?;
    Ok(build_view(state, cards).await)
}

pub async fn delete_card<S: KeyValueStore>(
    state: &AppState<S>,
    id: String,
) -> Result<CardsView, String> {
    let mut repo = state.cards.lock().await;
    let cards = repo.delete(&id).await.map_err(|e| e.to_string())?;
    Ok(build_view(state, cards).await)
}

pub async fn request_delete_all<S: KeyValueStore>(state: &AppState<S>) -> DeleteAllPrompt {
    let mut repo = state.cards.lock().await;
    let confirmation = repo.request_delete_all();
    DeleteAllPrompt {
        token: confirmation.id(),
        card_count: repo.len(),
    }
}

pub async fn confirm_delete_all<S: KeyValueStore>(
    state: &AppState<S>,
    token: u64,
) -> Result<CardsView, String> {
    let mut repo = state.cards.lock().await;
    let cards = repo
        .delete_all(DeleteAllConfirmation::from_id(token))
        .await
        .map_err(|e| e.to_string())?;
    Ok(build_view(state, cards).await)
}

pub async fn cancel_delete_all<S: KeyValueStore>(state: &AppState<S>) {
    state.cards.lock().await.cancel_delete_all();
}

/// Re-read the stored list, e.g. when the list screen regains focus.
pub async fn reload_cards<S: KeyValueStore>(state: &AppState<S>) -> Result<CardsView, String> {
    let mut repo = state.cards.lock().await;
    let cards = repo.load_or_empty().await.map_err(|e| e.to_string())?;
    Ok(build_view(state, cards).await)
}

pub async fn get_theme<S: KeyValueStore>(state: &AppState<S>) -> bool {
    state.theme.lock().await.is_dark()
}

pub async fn toggle_theme<S: KeyValueStore>(state: &AppState<S>) -> Result<bool, String> {
    state
        .theme
        .lock()
        .await
        .toggle()
        .await
        .map_err(|e| e.to_string())
}
