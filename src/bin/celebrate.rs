use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::Value;
use tghooks::api::{Webhook, function_handler};
use tghooks::core::config::{AppConfig, CelebrationConfig};
use tghooks::dispatch::CelebrationDispatcher;
use tghooks::telegram::TelegramClient;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tghooks::setup_logging();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    let celebration = CelebrationConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        Error::from(e)
    })?;
    info!(
        phrases = celebration.phrases.len(),
        allowed_users = celebration.allowed_users.len(),
        "Starting celebration webhook"
    );

    let sender = TelegramClient::new(&config);
    let dispatcher = CelebrationDispatcher::new(celebration);
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
