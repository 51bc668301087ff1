use anyhow::Context;
use mimalloc::MiMalloc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinema_admin::{
    app,
    config::{Config, LogFormat},
    AppState,
};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    let (json_layer, fmt_layer) = match config.app.log_format {
        LogFormat::Json => (Some(tracing_subscriber::fmt::layer().json()), None),
        LogFormat::Pretty => (None, Some(tracing_subscriber::fmt::layer())),
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(json_layer)
        .with(fmt_layer)
        .init();

    info!(
        "Starting Cinema Admin API ({}), upstream {}",
        config.app.environment, config.upstream.base_url
    );
    info!(
        "Seat grid {}x{}, initialization emits {:?}",
        config.layout.rows, config.layout.cols, config.layout.init_emission
    );

    let host = config.app.host.clone();
    let port = config.app.port;
    let state = AppState::new(config).context("Failed to build upstream client")?;

    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", host, port))?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app(state)).await?;
    Ok(())
}
