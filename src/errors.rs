use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Failed to decode Telegram update: {0}")]
    Decode(String),

    #[error("Invalid Telegram update: {0}")]
    InvalidUpdate(String),

    #[error("Failed to reach Telegram API: {0}")]
    Transport(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for BotError {
    fn from(error: reqwest::Error) -> Self {
        BotError::Transport(error.without_url().to_string())
    }
}

impl From<serde_json::Error> for BotError {
    fn from(error: serde_json::Error) -> Self {
        BotError::Decode(error.to_string())
    }
}
