mod config;
mod main_lib;

use serde_json::json;

use config::Config;
use herald_core::EventParams;
use main_lib::{build_app, init_tracing};

fn params(value: serde_json::Value) -> EventParams {
    value.as_object().cloned().unwrap_or_default()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.log_format);
    let mut app = build_app(&config)?;

    app.pubsub
        .publish("user_signed_up", params(json!({ "user_id": 1, "email": "ada@example.com" })));
    app.pubsub
        .publish("ORDER_PLACED", params(json!({ "order_id": 42, "total": "19.99" })));
    app.pubsub.publish("nobody_listens", EventParams::new());

    let stats = app.worker.run_until_idle(&mut app.jobs).await;
    tracing::info!(
        "Done: {} job(s) performed, {} failed, {} unknown; {} event(s) retained",
        stats.performed,
        stats.failed,
        stats.unknown,
        app.pubsub.published_events().len()
    );
    Ok(())
}
