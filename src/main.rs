use std::sync::Arc;
use tracing::info;

use maint_predict::config::Config;
use maint_predict::model::ThresholdModel;
use maint_predict::web::server::WebServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "maint_predict=info,tower_http=info".into()),
        )
        .init();

    info!("🛠 maint-predict v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load config (optional path as first argument, PORT overrides the port)
    let config_path = std::env::args().nth(1);
    let config = Arc::new(Config::resolve(config_path.as_deref())?);
    info!("Config resolved, binding {}", config.bind_addr());

    let model = Arc::new(ThresholdModel::new());
    info!(
        "Model v{} ready ({} features)",
        model.version(),
        model.metadata().features.len()
    );

    WebServer::new(model, config).run().await
}
