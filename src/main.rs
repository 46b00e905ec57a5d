use b2_relay::api::handlers::relay::InvocationResponse;
use b2_relay::config::RelayConfig;
use b2_relay::services::relay::RelayService;
use b2_relay::{create_relay, init_tracing};
use dotenvy::dotenv;
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use serde_json::Value;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv().ok();
    init_tracing("b2_relay=info");

    info!("🚀 Starting B2 relay function...");

    // Config and clients are built once per cold start and shared by warm invocations.
    let config = RelayConfig::from_env()?;
    info!(
        "📦 Bucket={}, Endpoint={}, Staging={}",
        config.store.bucket,
        config.store.endpoint,
        config.staging_dir.display()
    );
    let relay = create_relay(&config)?;
    let relay = &relay;

    run(service_fn(move |event: LambdaEvent<Value>| handle(relay, event))).await
}

async fn handle(
    relay: &RelayService,
    event: LambdaEvent<Value>,
) -> Result<InvocationResponse, Error> {
    let LambdaEvent { payload, context } = event;
    Ok(relay.handle(payload, &context.request_id).await)
}
