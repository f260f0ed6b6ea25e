use unicode_normalization::UnicodeNormalization;

use crate::types::{Card, Category};

/// Search text and category selector from the list screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFilter {
    pub search: String,
    pub category: Option<Category>,
}

impl CardFilter {
    pub fn new(search: impl Into<String>, category: Option<Category>) -> Self {
        Self {
            search: search.into(),
            category,
        }
    }

    /// True when every card passes.
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.category.is_none()
    }

    pub fn matches(&self, card: &Card) -> bool {
        self.matches_category(card) && contains_text(&card.title, self.search.trim())
    }

    fn matches_category(&self, card: &Card) -> bool {
        match self.category {
            Some(category) => card.category == Some(category),
            None => true,
        }
    }
}

/// Ordered subsequence of `cards` passing `filter`.
pub fn filter_cards<'a>(cards: &'a [Card], filter: &CardFilter) -> Vec<&'a Card> {
    cards.iter().filter(|card| filter.matches(card)).collect()
}

fn normalize_for_search(value: &str) -> String {
    value.nfkc().collect::<String>().to_lowercase()
}

fn contains_text(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || normalize_for_search(haystack).contains(&normalize_for_search(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, title: &str, category: Option<Category>) -> Card {
        Card {
            id: id.into(),
            title: title.into(),
            price: 10.0,
            image: None,
            category,
            is_completed: false,
        }
    }

    fn sample() -> Vec<Card> {
        vec![
            card("6", "Milk", Some(Category::Food)),
            card("5", "Mint soap", Some(Category::Goods)),
            card("4", "Minced pork", Some(Category::Food)),
            card("3", "Bread", Some(Category::Food)),
            card("2", "Mirror", None),
            card("1", "นมสด", Some(Category::Food)),
        ]
    }

    fn ids(cards: Vec<&Card>) -> Vec<&str> {
        cards.into_iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_matches_all() {
        let cards = sample();
        let filter = CardFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter_cards(&cards, &filter).len(), cards.len());
    }

    #[test]
    fn test_search_and_category() {
        let cards = sample();
        let filter = CardFilter::new("mi", Some(Category::Food));
        assert_eq!(ids(filter_cards(&cards, &filter)), vec!["6", "4"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let cards = sample();
        let filter = CardFilter::new("MI", None);
        assert_eq!(ids(filter_cards(&cards, &filter)), vec!["6", "5", "4", "2"]);
    }

    #[test]
    fn test_category_only() {
        let cards = sample();
        let filter = CardFilter::new("", Some(Category::Goods));
        assert_eq!(ids(filter_cards(&cards, &filter)), vec!["5"]);
    }

    #[test]
    fn test_thai_search() {
        let cards = sample();
        let filter = CardFilter::new("นม", None);
        assert_eq!(ids(filter_cards(&cards, &filter)), vec!["1"]);
    }

    #[test]
    fn test_no_match() {
        let cards = sample();
        let filter = CardFilter::new("cheese", None);
        assert!(filter_cards(&cards, &filter).is_empty());
    }
}
