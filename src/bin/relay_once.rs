use b2_relay::config::RelayConfig;
use b2_relay::{create_relay, init_tracing};
use clap::Parser;
use dotenvy::dotenv;
use serde_json::json;
use tracing::info;

/// Relay a single URL into the configured B2 bucket, outside the function runtime.
#[derive(Parser, Debug)]
#[command(name = "relay_once", version)]
struct Args {
    /// Source URL; its last path segment becomes the object key
    #[arg(long)]
    url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing("relay_once=info,b2_relay=info");

    let args = Args::parse();
    let config = RelayConfig::from_env()?;
    let relay = create_relay(&config)?;

    let invocation_id = uuid::Uuid::new_v4().to_string();
    info!("🔁 Relaying {} (invocation {})", args.url, invocation_id);

    let response = relay
        .handle(json!({ "URL": args.url }), &invocation_id)
        .await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    if !response.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
