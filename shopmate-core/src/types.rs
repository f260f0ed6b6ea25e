use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Fixed set of categories a card can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Goods,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Food, Category::Goods];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Goods => "goods",
        }
    }

    /// Case-insensitive lookup. Returns `None` for empty or unknown names.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single shopping list entry.
///
/// Serialized with the field names existing installations already use:
/// the price lives under `content` and completion under `isCompleted`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub title: String,
    #[serde(rename = "content", default, deserialize_with = "lenient_price")]
    pub price: f64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_empty_string"
    )]
    pub image: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_category"
    )]
    pub category: Option<Category>,
    #[serde(default)]
    pub is_completed: bool,
}

/// Raw form input for a new card, exactly as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDraft {
    pub title: String,
    pub price: String,
    pub image: String,
    pub category: String,
}

impl CardDraft {
    pub fn new(title: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price: price.into(),
            ..Self::default()
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// Raw form input for editing a card. `None` leaves the field untouched;
/// an empty `image` or `category` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardUpdate {
    pub title: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
}

impl CardUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.price.is_none() && self.image.is_none() && self.category.is_none()
    }
}

/// Older installations stored the edited price as the raw input string.
fn lenient_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let price = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match price {
        Some(p) if p.is_finite() && p >= 0.0 => Ok(p),
        _ => {
            log::warn!("[shopmate.types] Unreadable price {}, using 0", value);
            Ok(0.0)
        }
    }
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn lenient_category<'de, D>(deserializer: D) -> Result<Option<Category>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(|raw| {
        let category = Category::parse(raw);
        if category.is_none() && !raw.trim().is_empty() {
            log::warn!("[shopmate.types] Unknown category {:?}, treating as uncategorized", raw);
        }
        category
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_card_wire_format() {
        let card = Card {
            id: "1700000000000".into(),
            title: "Milk".into(),
            price: 40.0,
            image: None,
            category: Some(Category::Food),
            is_completed: false,
        };
        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "1700000000000",
                "title": "Milk",
                "content": 40.0,
                "category": "food",
                "isCompleted": false
            })
        );
    }

    #[test]
    fn test_decode_legacy_card() {
        // Written by the first release: no category, no completion flag,
        // price stored as the edited string.
        let raw = r#"[{"id":"1","title":"Eggs","content":"55.5","image":""}]"#;
        let cards: Vec<Card> = serde_json::from_str(raw).unwrap();
        assert_eq!(cards[0].price, 55.5);
        assert_eq!(cards[0].image, None);
        assert_eq!(cards[0].category, None);
        assert!(!cards[0].is_completed);
    }

    #[test]
    fn test_decode_garbage_price_as_zero() {
        let raw = r#"[{"id":"1","title":"Rice","content":"abc"},{"id":"2","title":"Tea","content":null}]"#;
        let cards: Vec<Card> = serde_json::from_str(raw).unwrap();
        assert_eq!(cards[0].price, 0.0);
        assert_eq!(cards[1].price, 0.0);
    }

    #[test]
    fn test_decode_unknown_category() {
        let raw = r#"[{"id":"1","title":"Soap","content":20,"category":"toys"}]"#;
        let cards: Vec<Card> = serde_json::from_str(raw).unwrap();
        assert_eq!(cards[0].category, None);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("Food"), Some(Category::Food));
        assert_eq!(Category::parse(" goods "), Some(Category::Goods));
        assert_eq!(Category::parse(""), None);
        assert_eq!(Category::parse("toys"), None);
    }
}
