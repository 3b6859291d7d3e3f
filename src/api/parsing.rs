use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;
use tracing::error;

use crate::core::models::Update;
use crate::errors::BotError;

pub const SECRET_TOKEN_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

/// Pulls the raw request body out of an HTTP trigger event, undoing base64
/// transport encoding when the gateway applied it.
///
/// # Errors
///
/// Returns `BotError::Decode` if the body is missing, not a string, or not valid base64/UTF-8.
pub fn extract_body(payload: &Value) -> Result<String, BotError> {
    let body = payload
        .get("body")
        .ok_or_else(|| BotError::Decode("Missing body".to_string()))?
        .as_str()
        .ok_or_else(|| BotError::Decode("Body is not a string".to_string()))?;

    let encoded = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !encoded {
        return Ok(body.to_string());
    }

    let bytes = STANDARD
        .decode(body)
        .map_err(|e| BotError::Decode(format!("Invalid base64 body: {e}")))?;
    String::from_utf8(bytes).map_err(|e| BotError::Decode(format!("Body is not UTF-8: {e}")))
}

/// Decodes a webhook body into an [`Update`].
///
/// # Errors
///
/// Returns `BotError::Decode` for malformed JSON and `BotError::InvalidUpdate`
/// when `update_id` is zero, which is what an empty object decodes to.
pub fn parse_update(body: &str) -> Result<Update, BotError> {
    let update: Update = serde_json::from_str(body).map_err(|e| {
        error!("Could not decode incoming update: {}", e);
        BotError::from(e)
    })?;

    if update.update_id == 0 {
        error!("Invalid update id, got update id = 0");
        return Err(BotError::InvalidUpdate(
            "update id of 0 indicates failure to parse incoming update".to_string(),
        ));
    }

    Ok(update)
}

pub fn get_header_value<'a>(headers: &'a Value, name: &str) -> Option<&'a str> {
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}
