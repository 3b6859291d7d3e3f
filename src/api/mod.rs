//! Webhook handler and request processing

pub mod deliver;
pub mod handler;
pub mod helpers;
pub mod parsing;

pub use handler::{Webhook, function_handler, handle_webhook};
