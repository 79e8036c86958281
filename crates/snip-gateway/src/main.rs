use anyhow::Context;
use clap::Parser;
use snip_gateway::bootstrap::build_shortener;
use snip_gateway::{telemetry, App, AppState, Cli};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.log_format);

    let base_url = cli.base_url();
    info!(
        listen_addr = %cli.listen_addr,
        base_url = %base_url,
        storage = %cli.storage,
        file_storage_path = %cli.file_storage_path.display(),
        "starting snip"
    );

    // the index is fully restored before the listener accepts anything
    let shortener = build_shortener(&cli)?;
    let app = App::router(AppState::new(shortener, base_url));

    let listener = tokio::net::TcpListener::bind(&cli.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cli.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
    }
}
