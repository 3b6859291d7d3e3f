use serde::{Deserialize, Serialize};

/// One inbound notification from the Telegram webhook.
///
/// A missing `update_id` decodes as `0`, which the parser treats as a failed decode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Update {
    #[serde(default)]
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

/// A message sent in a chat. Not every update carries one; button clicks arrive
/// as a [`CallbackQuery`] instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub message_id: i64,
    pub text: Option<String>,
    #[serde(default)]
    pub chat: Chat,
    pub location: Option<Location>,
    pub audio: Option<Audio>,
    pub voice: Option<Voice>,
    pub document: Option<Document>,
}

impl Message {
    /// Message text, or an empty string for media-only messages.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// A click on an inline keyboard button.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackQuery {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub from: User,
    #[serde(default)]
    pub data: String,
    pub message: Option<Message>,
    pub inline_message_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: i64,
    pub username: Option<String>,
}

/// The conversation a message belongs to.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Chat {
    #[serde(default)]
    pub id: i64,
    pub username: Option<String>,
}

/// A point on the map, in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Audio {
    #[serde(default)]
    pub file_id: String,
    #[serde(default)]
    pub duration: u32,
}

/// Voice notes carry the same fields we care about as audio.
pub type Voice = Audio;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub file_id: String,
    pub file_name: Option<String>,
}

/// One outbound call to the Telegram API decided by a dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SendText {
        chat_id: i64,
        text: String,
        reply_markup: Option<InlineKeyboard>,
    },
    EditText {
        chat_id: i64,
        message_id: i64,
        text: String,
        reply_markup: InlineKeyboard,
    },
    SendLocation {
        chat_id: i64,
        location: Location,
    },
}

impl Action {
    /// Plain text message without a keyboard.
    pub fn text(chat_id: i64, text: impl Into<String>) -> Self {
        Action::SendText {
            chat_id,
            text: text.into(),
            reply_markup: None,
        }
    }

    #[must_use]
    pub fn chat_id(&self) -> i64 {
        match self {
            Action::SendText { chat_id, .. }
            | Action::EditText { chat_id, .. }
            | Action::SendLocation { chat_id, .. } => *chat_id,
        }
    }
}

/// Inline keyboard reply markup: `{"inline_keyboard": [[{"text", "callback_data"}]]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineKeyboard {
    pub inline_keyboard: Vec<Vec<InlineButton>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineButton {
    pub text: String,
    pub callback_data: String,
}

impl InlineKeyboard {
    /// A keyboard with a single row holding a single button.
    pub fn single_button(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            inline_keyboard: vec![vec![InlineButton {
                text: label.into(),
                callback_data: payload.into(),
            }]],
        }
    }

    /// Serialized form for the `reply_markup` form field.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
