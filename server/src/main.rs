use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use todo_server::config::{Config, STATIC_DIR};
use todo_server::TodoStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_tracing();

    let store = TodoStore::open(&config.database)
        .await
        .with_context(|| format!("failed to open database {}", config.database.display()))?;

    let addr = config.listen_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, static_dir = STATIC_DIR, "listening");

    todo_server::run(listener, store.clone(), STATIC_DIR)
        .await
        .context("server error")?;

    store.close().await.context("failed to close database")?;
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("todo_server=info,todo_core=info,tower_http=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
