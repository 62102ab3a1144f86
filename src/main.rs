//! Cat Tycoon Economy Server
//!
//! Binds the HTTP surface over an in-memory record store and serves
//! until interrupted.

use std::sync::Arc;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use cat_tycoon::{
    economy::model::EconomyConfig,
    network::http::{run, ServerConfig},
    service::EconomyService,
    store::memory::MemoryStore,
    ENERGY_PER_SECOND, MAX_ENERGY, VERSION,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Cat Tycoon Economy Server v{}", VERSION);
    info!(
        "Energy cap: {}, regeneration: {}/s",
        MAX_ENERGY, ENERGY_PER_SECOND
    );

    let mut config = ServerConfig::default();
    if config.static_dir.as_ref().is_some_and(|d| !d.is_dir()) {
        warn!("static asset directory not found; serving API only");
        config.static_dir = None;
    }

    let service = Arc::new(EconomyService::new(
        MemoryStore::new(),
        EconomyConfig::default(),
    ));

    run(service, config).await?;
    Ok(())
}
