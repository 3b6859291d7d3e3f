use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::Value;
use tghooks::api::{Webhook, function_handler};
use tghooks::core::config::{AppConfig, HuntConfig};
use tghooks::dispatch::HuntDispatcher;
use tghooks::telegram::TelegramClient;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tghooks::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    let hunt = HuntConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    info!(
        candidates = hunt.candidates.len(),
        supervisor_chat_id = hunt.supervisor_chat_id,
        "Starting hunt webhook"
    );

    let sender = TelegramClient::new(&config);
    let dispatcher = HuntDispatcher::new(hunt);
    let webhook = Webhook {
        config: &config,
        sender: &sender,
        dispatcher: &dispatcher,
    };
    let webhook_ref = &webhook;

    run(service_fn(move |event: LambdaEvent<Value>| async move {
        function_handler(event, webhook_ref).await
    }))
    .await
}
