//! App shell for the shopping list.
//!
//! Loads configuration, opens the on-disk store and exposes the command
//! functions the presentation layer calls. Commands return `Result<_, String>`
//! so errors cross the UI boundary as plain messages.

pub mod commands;
pub mod config;
pub mod logging;
pub mod state;

pub use config::{load_config, AppConfig};
pub use state::AppState;

/// Initialize logging, read `config.json` and open the saved state.
pub async fn setup() -> Result<AppState, String> {
    if let Err(e) = logging::init() {
        eprintln!("[shopmate.app] Logger already initialized: {}", e);
    }

    let config_path = config::default_config_path();
    let config = load_config(&config_path);
    let data_dir = config.data_dir();

    match AppState::open(&config).await {
        Ok(state) => {
            log::info!("[shopmate.app] Ready, data in {}", data_dir.display());
            Ok(state)
        }
        Err(e) => {
            log::error!(
                "[shopmate.app] Failed to open storage at {}: {}",
                data_dir.display(),
                e
            );
            Err(e.to_string())
        }
    }
}
