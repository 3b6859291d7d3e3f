//! Webhook handler - verifies, parses and dispatches one Telegram update.
//!
//! The pipeline is:
//! - Secret token check (only when a secret is configured)
//! - Body extraction and update parsing
//! - Dispatch to the variant's decision logic
//! - Sequential execution of the resulting actions

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

use super::{deliver, helpers, parsing};
use crate::core::config::AppConfig;
use crate::dispatch::Dispatcher;
use crate::telegram::MessageSender;

/// Everything a request needs, built once at process start.
pub struct Webhook<'a> {
    pub config: &'a AppConfig,
    pub sender: &'a dyn MessageSender,
    pub dispatcher: &'a dyn Dispatcher,
}

/// Lambda entrypoint shared by both bot binaries.
///
/// # Errors
///
/// Never fails; every problem is reported through the HTTP status in the returned payload.
#[tracing::instrument(level = "info", skip_all, fields(request_id = %event.context.request_id))]
pub async fn function_handler(
    event: LambdaEvent<Value>,
    webhook: &Webhook<'_>,
) -> Result<Value, Error> {
    Ok(handle_webhook(&event.payload, webhook).await)
}

/// Processes one HTTP trigger payload and returns the HTTP response payload.
pub async fn handle_webhook(payload: &Value, webhook: &Webhook<'_>) -> Value {
    if let Err(response) = verify_secret(payload, webhook.config) {
        return response;
    }

    let update = match parsing::extract_body(payload).and_then(|body| parsing::parse_update(&body))
    {
        Ok(update) => update,
        Err(e) => {
            error!("Error parsing update: {}", e);
            return helpers::err_response(400, &format!("Parse Error: {e}"));
        }
    };

    let actions = webhook.dispatcher.decide(&update);
    info!(
        update_id = update.update_id,
        actions = actions.len(),
        "Dispatching update"
    );

    let report = deliver::execute_actions(webhook.sender, &actions).await;
    info!(
        delivered = report.delivered,
        failed = report.failed,
        "Processed update: {:?}",
        update
    );

    helpers::ok_empty()
}

fn verify_secret(payload: &Value, config: &AppConfig) -> Result<(), Value> {
    let Some(expected) = config.webhook_secret.as_deref() else {
        return Ok(());
    };

    let received = payload
        .get("headers")
        .and_then(|headers| parsing::get_header_value(headers, parsing::SECRET_TOKEN_HEADER));

    if received == Some(expected) {
        Ok(())
    } else {
        error!("Telegram secret token verification failed");
        Err(helpers::err_response(401, "Invalid secret token"))
    }
}
