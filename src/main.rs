// src/main.rs
//
// Loads configuration, wires the stores, and prints the browse page as JSON.
// Usage: streamhub [config.toml] [category]

use anyhow::Context;
use std::path::PathBuf;

use streamhub::application::commands::get_browse_page;
use streamhub::application::AppState;
use streamhub::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let category = args.next();

    // 1. CONFIGURATION
    let config = AppConfig::load(config_path.as_deref()).context("Failed to load configuration")?;

    // 2. STATE
    let state = AppState::from_config(config).context("Failed to initialize application state")?;

    // 3. BROWSE PAGE
    let page = get_browse_page(&state, category)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load browse page: {}", e))?;

    log::info!(
        "Loaded {} rows (featured: {})",
        page.sections.len(),
        page.featured.as_ref().map(|f| f.title.as_str()).unwrap_or("none")
    );
    println!("{}", serde_json::to_string_pretty(&page)?);

    Ok(())
}
