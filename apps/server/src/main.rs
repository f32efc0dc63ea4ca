//! Quick Notes server binary.

use std::net::SocketAddr;

use note_store::{MemoryNoteStore, NoteStore, SqliteNoteStore};
use server::{config::Config, create_app, create_state, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    match &config.database_url {
        Some(url) => {
            tracing::info!(database_url = %url, "Starting Quick Notes server");
            let store = SqliteNoteStore::connect(url).await?;
            serve(config.clone(), store).await
        }
        None => {
            tracing::info!("Starting Quick Notes server with in-memory store");
            serve(config.clone(), MemoryNoteStore::new()).await
        }
    }
}

async fn serve<S: NoteStore + 'static>(config: Config, store: S) -> anyhow::Result<()> {
    let addr: SocketAddr = config.server_addr().parse()?;

    let state = create_state(config, store);
    let app = create_app(state);

    tracing::info!(addr = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
