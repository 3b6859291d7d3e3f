//! tghooks - Telegram webhook handlers for two small chat bots.
//!
//! Each bot runs as an AWS Lambda behind an HTTP trigger:
//! 1. `celebrate-hook` rotates through celebration phrases, editing one message
//!    in place every time an allowed user presses its button
//! 2. `hunt-hook` runs a geofenced hint hunt, replying with nearby hint
//!    locations and keeping a supervisor chat informed
//!
//! # Architecture
//!
//! - `api` parses the trigger event and runs the request pipeline
//! - `dispatch` holds the pure decision logic for both bots
//! - `telegram` issues form-encoded calls to the Bot API
//! - `utils::geo` provides the haversine distance used by the hunt
//!
//! # Example
//!
//! ```no_run
//! use tghooks::api::{Webhook, handle_webhook};
//! use tghooks::core::config::{AppConfig, HuntConfig};
//! use tghooks::dispatch::HuntDispatcher;
//! use tghooks::telegram::TelegramClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     tghooks::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let sender = TelegramClient::new(&config);
//!     let dispatcher = HuntDispatcher::new(HuntConfig::from_env()?);
//!     let webhook = Webhook {
//!         config: &config,
//!         sender: &sender,
//!         dispatcher: &dispatcher,
//!     };
//!
//!     let event = serde_json::json!({
//!         "body": r#"{"update_id":1,"message":{"text":"/start","chat":{"id":42,"username":"antonhulikau"}}}"#
//!     });
//!     let response = handle_webhook(&event, &webhook).await;
//!     println!("{response}");
//!
//!     Ok(())
//! }
//! ```
pub mod api;
pub mod core;
pub mod dispatch;
pub mod errors;
pub mod telegram;
pub mod utils;

pub use errors::BotError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Calling this more
/// than once is harmless; only the first call installs a subscriber.
///
/// # Example
///
/// ```
/// tghooks::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
