//! All Telegram-specific functionality

pub mod client;

pub use client::{MessageSender, TelegramClient};
