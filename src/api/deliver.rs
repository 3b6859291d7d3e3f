use tracing::{error, info};

use crate::core::models::Action;
use crate::telegram::MessageSender;

/// Outcome counts for one batch of actions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Runs actions one after another. A failed call is logged and does not stop
/// the ones after it.
pub async fn execute_actions(sender: &dyn MessageSender, actions: &[Action]) -> DeliveryReport {
    let mut report = DeliveryReport::default();

    for action in actions {
        let result = match action {
            Action::SendText {
                chat_id,
                text,
                reply_markup,
            } => sender.send_text(*chat_id, text, reply_markup.as_ref()).await,
            Action::EditText {
                chat_id,
                message_id,
                text,
                reply_markup,
            } => {
                sender
                    .edit_text(*chat_id, *message_id, text, reply_markup)
                    .await
            }
            Action::SendLocation { chat_id, location } => {
                sender.send_location(*chat_id, location).await
            }
        };

        match result {
            Ok(_) => {
                report.delivered += 1;
                info!("Successfully distributed to chat id {}", action.chat_id());
            }
            Err(e) => {
                report.failed += 1;
                error!(chat_id = action.chat_id(), "Got error from Telegram: {}", e);
            }
        }
    }

    report
}
