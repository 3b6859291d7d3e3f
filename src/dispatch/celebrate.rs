//! Celebration rotation: a single message whose button reveals the next phrase.
//!
//! The current position travels in the button payload, so nothing is stored
//! server-side. Each allowed click edits the message in place.

use tracing::{info, warn};

use super::{Dispatcher, START_COMMAND, decode_index, encode_index, next_index};
use crate::core::config::CelebrationConfig;
use crate::core::models::{Action, InlineKeyboard, Update};

pub const WELCOME_TEXT: &str = "Привет, нажимай на кнопку получить поздравление и кайфуй!";
pub const BUTTON_LABEL: &str = "Получить поздравление";

pub struct CelebrationDispatcher {
    config: CelebrationConfig,
}

impl CelebrationDispatcher {
    #[must_use]
    pub fn new(config: CelebrationConfig) -> Self {
        Self { config }
    }

    fn button(index: usize) -> InlineKeyboard {
        InlineKeyboard::single_button(BUTTON_LABEL, encode_index(index))
    }
}

impl Dispatcher for CelebrationDispatcher {
    fn decide(&self, update: &Update) -> Vec<Action> {
        if let Some(message) = &update.message
            && message.text() == START_COMMAND
        {
            return vec![Action::SendText {
                chat_id: message.chat.id,
                text: WELCOME_TEXT.to_string(),
                reply_markup: Some(Self::button(0)),
            }];
        }

        let Some(callback) = &update.callback_query else {
            return Vec::new();
        };

        if !self
            .config
            .allowed_users
            .contains(callback.from.username.as_deref())
        {
            info!(user_id = callback.from.id, "Ignoring click from user outside allow-list");
            return Vec::new();
        }

        let Some(original) = &callback.message else {
            warn!(callback_id = %callback.id, "Callback has no attached message");
            return Vec::new();
        };

        let len = self.config.phrases.len();
        if len == 0 {
            warn!("No celebration phrases configured");
            return Vec::new();
        }

        let index = decode_index(&callback.data) % len;
        let next = next_index(index, len);

        vec![Action::EditText {
            chat_id: original.chat.id,
            message_id: original.message_id,
            text: self.config.phrases[index].clone(),
            reply_markup: Self::button(next),
        }]
    }
}
