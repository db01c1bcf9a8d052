use anyhow::{Context, Result};
use passenger_api::{config::Config, fetch, logging, provision, server, QueryEngine};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) configuration & logging ─────────────────────────────────
    let config = Config::from_env()?;
    logging::init(&config.log_level)?;
    info!(
        dataset = %config.dataset_path.display(),
        id_policy = %config.id_policy,
        "startup"
    );

    // ─── 2) make sure the dataset file exists ───────────────────────
    let client = fetch::build_client()?;
    provision::ensure_dataset(&client, &config.source_url, &config.dataset_path)
        .await
        .context("provisioning dataset")?;

    // ─── 3) load once, before accepting requests ────────────────────
    let engine = QueryEngine::load(&config.dataset_path, config.id_policy)?;
    info!(passengers = engine.len(), "dataset loaded");

    // ─── 4) serve ───────────────────────────────────────────────────
    server::serve(config.bind_addr, engine).await
}
