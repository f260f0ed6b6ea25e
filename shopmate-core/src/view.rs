use serde::Serialize;

use crate::filter::{filter_cards, CardFilter};
use crate::total::{format_total, total_price};
use crate::types::Card;

/// Everything the list screen renders, derived from the card list and the
/// active filter after each change.
///
/// `total` covers the full list so the badge does not change while the user
/// types a search; `filtered_total` is there for screens that want the
/// narrower figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardsView {
    pub cards: Vec<Card>,
    pub total: f64,
    pub filtered_total: f64,
    pub total_label: String,
    pub card_count: usize,
    pub filtered: bool,
}

impl CardsView {
    pub fn build(all: &[Card], filter: &CardFilter, currency: &str) -> Self {
        let visible = filter_cards(all, filter);
        let total = total_price(all);
        let filtered_total = total_price(visible.iter().copied());
        Self {
            cards: visible.into_iter().cloned().collect(),
            total,
            filtered_total,
            total_label: format_total(total, currency),
            card_count: all.len(),
            filtered: !filter.is_empty(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.card_count == 0
    }
}
