/// Shared configuration types: storage keys and display defaults.
use serde::{Deserialize, Serialize};

/// Key holding the JSON array of cards.
pub const DEFAULT_CARDS_KEY: &str = "@card_data";
/// Key holding the dark mode flag as a JSON boolean.
pub const DEFAULT_THEME_KEY: &str = "@dark_mode";
/// Currency label appended to displayed prices.
pub const DEFAULT_CURRENCY: &str = "บาท";

/// Which keys the app's state lives under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreKeys {
    #[serde(default = "default_cards_key")]
    pub cards_key: String,
    #[serde(default = "default_theme_key")]
    pub theme_key: String,
}

fn default_cards_key() -> String {
    DEFAULT_CARDS_KEY.to_string()
}

fn default_theme_key() -> String {
    DEFAULT_THEME_KEY.to_string()
}

impl Default for StoreKeys {
    fn default() -> Self {
        Self {
            cards_key: default_cards_key(),
            theme_key: default_theme_key(),
        }
    }
}
