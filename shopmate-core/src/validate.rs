/// Input validation for card forms.
///
/// Every check runs before a card reaches the repository's list, so
/// stored prices are always finite and non-negative.
use regex::Regex;
use std::sync::OnceLock;

use crate::types::{Card, CardDraft, CardUpdate, Category};

/// Form field a validation error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Price,
    Image,
    Category,
}

impl Field {
    /// Name of the field in the stored JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Price => "content",
            Field::Image => "image",
            Field::Category => "category",
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Item name is required")]
    EmptyTitle,

    #[error("Price is required")]
    EmptyPrice,

    #[error("Price must be a number: {0:?}")]
    InvalidPrice(String),

    #[error("Price must not be negative: {0}")]
    NegativePrice(f64),

    #[error("Image must be a local file or an image URL: {0:?}")]
    InvalidImage(String),

    #[error("Unknown category: {0:?}")]
    UnknownCategory(String),
}

impl ValidationError {
    pub fn field(&self) -> Field {
        match self {
            ValidationError::EmptyTitle => Field::Title,
            ValidationError::EmptyPrice
            | ValidationError::InvalidPrice(_)
            | ValidationError::NegativePrice(_) => Field::Price,
            ValidationError::InvalidImage(_) => Field::Image,
            ValidationError::UnknownCategory(_) => Field::Category,
        }
    }
}

pub fn validate_title(raw: &str) -> Result<String, ValidationError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(title.to_string())
}

pub fn parse_price(raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyPrice);
    }
    let price = trimmed
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
        .ok_or_else(|| ValidationError::InvalidPrice(trimmed.to_string()))?;
    if price < 0.0 {
        return Err(ValidationError::NegativePrice(price));
    }
    // Normalizes "-0" to 0.
    Ok(price + 0.0)
}

const LOCAL_IMAGE_PREFIXES: [&str; 4] = ["file://", "content://", "ph://", "assets-library://"];

fn image_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^https?://[^\s?#]+\.(?:png|jpe?g|gif|webp|bmp|heic)(?:[?#]\S*)?$")
            .expect("valid image url regex")
    })
}

pub fn is_local_image(reference: &str) -> bool {
    reference.starts_with('/') || LOCAL_IMAGE_PREFIXES.iter().any(|p| reference.starts_with(p))
}

pub fn is_image_url(reference: &str) -> bool {
    image_url_regex().is_match(reference)
}

/// Empty input means "no image".
pub fn validate_image(raw: &str) -> Result<Option<String>, ValidationError> {
    let reference = raw.trim();
    if reference.is_empty() {
        return Ok(None);
    }
    if is_local_image(reference) || is_image_url(reference) {
        Ok(Some(reference.to_string()))
    } else {
        Err(ValidationError::InvalidImage(reference.to_string()))
    }
}

/// Empty input means "uncategorized".
pub fn parse_category(raw: &str) -> Result<Option<Category>, ValidationError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    Category::parse(raw)
        .map(Some)
        .ok_or_else(|| ValidationError::UnknownCategory(raw.trim().to_string()))
}

/// Field values of a draft that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidCard {
    pub title: String,
    pub price: f64,
    pub image: Option<String>,
    pub category: Option<Category>,
}

impl CardDraft {
    /// Checks fields in form order and reports the first failure.
    pub fn validate(&self) -> Result<ValidCard, ValidationError> {
        Ok(ValidCard {
            title: validate_title(&self.title)?,
            price: parse_price(&self.price)?,
            image: validate_image(&self.image)?,
            category: parse_category(&self.category)?,
        })
    }
}

/// Validated subset of an edit. Outer `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidUpdate {
    pub title: Option<String>,
    pub price: Option<f64>,
    pub image: Option<Option<String>>,
    pub category: Option<Option<Category>>,
}

impl ValidUpdate {
    pub fn apply_to(self, card: &mut Card) {
        if let Some(title) = self.title {
            card.title = title;
        }
        if let Some(price) = self.price {
            card.price = price;
        }
        if let Some(image) = self.image {
            card.image = image;
        }
        if let Some(category) = self.category {
            card.category = category;
        }
    }
}

impl CardUpdate {
    pub fn validate(&self) -> Result<ValidUpdate, ValidationError> {
        Ok(ValidUpdate {
            title: self.title.as_deref().map(validate_title).transpose()?,
            price: self.price.as_deref().map(parse_price).transpose()?,
            image: self.image.as_deref().map(validate_image).transpose()?,
            category: self.category.as_deref().map(parse_category).transpose()?,
        })
    }
}

/// Add/edit form input plus the error from the last submit.
///
/// Changing a field clears a pending error on that field right away rather
/// than waiting for the next submit.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    draft: CardDraft,
    error: Option<ValidationError>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefills the edit form from an existing card.
    pub fn from_card(card: &Card) -> Self {
        Self {
            draft: CardDraft {
                title: card.title.clone(),
                price: card.price.to_string(),
                image: card.image.clone().unwrap_or_default(),
                category: card.category.map(|c| c.as_str().to_string()).unwrap_or_default(),
            },
            error: None,
        }
    }

    pub fn draft(&self) -> &CardDraft {
        &self.draft
    }

    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn set_title(&mut self, value: impl Into<String>) {
        self.draft.title = value.into();
        self.clear_error(Field::Title);
    }

    pub fn set_price(&mut self, value: impl Into<String>) {
        self.draft.price = value.into();
        self.clear_error(Field::Price);
    }

    pub fn set_image(&mut self, value: impl Into<String>) {
        self.draft.image = value.into();
        self.clear_error(Field::Image);
    }

    pub fn set_category(&mut self, value: impl Into<String>) {
        self.draft.category = value.into();
        self.clear_error(Field::Category);
    }

    /// Validates the current input. On failure the error is kept for display.
    pub fn submit(&mut self) -> Result<CardDraft, ValidationError> {
        match self.draft.validate() {
            Ok(_) => {
                self.error = None;
                Ok(self.draft.clone())
            }
            Err(e) => {
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn clear_error(&mut self, field: Field) {
        if self.error.as_ref().map(|e| e.field()) == Some(field) {
            self.error = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("40"), Ok(40.0));
        assert_eq!(parse_price(" 12.50 "), Ok(12.5));
        assert_eq!(parse_price("0"), Ok(0.0));
        assert_eq!(parse_price("-0"), Ok(0.0));
        assert_eq!(parse_price(""), Err(ValidationError::EmptyPrice));
        assert_eq!(parse_price("abc"), Err(ValidationError::InvalidPrice("abc".into())));
        assert_eq!(parse_price("NaN"), Err(ValidationError::InvalidPrice("NaN".into())));
        assert_eq!(parse_price("inf"), Err(ValidationError::InvalidPrice("inf".into())));
        assert_eq!(parse_price("-5"), Err(ValidationError::NegativePrice(-5.0)));
    }

    #[test]
    fn test_validate_title() {
        assert_eq!(validate_title("  Milk "), Ok("Milk".to_string()));
        assert_eq!(validate_title("   "), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_validate_image() {
        assert_eq!(validate_image(""), Ok(None));
        assert!(validate_image("https://example.com/milk.JPG").unwrap().is_some());
        assert!(validate_image("https://cdn.example.com/a/b.webp?w=300").unwrap().is_some());
        assert!(validate_image("file:///data/user/0/photo.png").unwrap().is_some());
        assert!(validate_image("content://media/external/images/12").unwrap().is_some());
        assert!(matches!(
            validate_image("https://example.com/page.html"),
            Err(ValidationError::InvalidImage(_))
        ));
        assert!(matches!(validate_image("milk"), Err(ValidationError::InvalidImage(_))));
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category(""), Ok(None));
        assert_eq!(parse_category("food"), Ok(Some(Category::Food)));
        assert_eq!(
            parse_category("toys"),
            Err(ValidationError::UnknownCategory("toys".into()))
        );
    }

    #[test]
    fn test_draft_reports_first_failing_field() {
        let err = CardDraft::new("", "abc").validate().unwrap_err();
        assert_eq!(err.field(), Field::Title);
        let err = CardDraft::new("Milk", "abc").validate().unwrap_err();
        assert_eq!(err.field(), Field::Price);
        assert_eq!(err.field().as_str(), "content");
    }

    #[test]
    fn test_update_leaves_missing_fields() {
        let mut card = Card {
            id: "1".into(),
            title: "Milk".into(),
            price: 40.0,
            image: Some("https://example.com/milk.png".into()),
            category: Some(Category::Food),
            is_completed: true,
        };
        let update = CardUpdate {
            price: Some("42".into()),
            image: Some(String::new()),
            ..CardUpdate::default()
        };
        update.validate().unwrap().apply_to(&mut card);
        assert_eq!(card.title, "Milk");
        assert_eq!(card.price, 42.0);
        assert_eq!(card.image, None);
        assert_eq!(card.category, Some(Category::Food));
        assert!(card.is_completed);
    }

    #[test]
    fn test_form_error_clears_on_field_edit() {
        let mut form = FormState::new();
        form.set_title("Milk");
        form.set_price("abc");
        assert!(form.submit().is_err());
        assert_eq!(form.error().map(|e| e.field()), Some(Field::Price));

        // Editing another field keeps the price error.
        form.set_title("Fresh milk");
        assert!(form.error().is_some());

        form.set_price("40");
        assert!(form.error().is_none());
        assert_eq!(form.submit().unwrap().price, "40");
    }

    #[test]
    fn test_form_prefill_from_card() {
        let card = Card {
            id: "1".into(),
            title: "Bread".into(),
            price: 35.0,
            image: None,
            category: Some(Category::Goods),
            is_completed: false,
        };
        let form = FormState::from_card(&card);
        assert_eq!(form.draft().price, "35");
        assert_eq!(form.draft().category, "goods");
    }

    #[test]
    fn test_form_reset_after_submit() {
        let mut form = FormState::new();
        form.set_title("Milk");
        form.set_price("-3");
        assert!(form.submit().is_err());

        form.reset();
        assert_eq!(form.draft(), &CardDraft::default());
        assert!(form.error().is_none());
    }
}
