use anyhow::Result;
use canteen_orderservice::{
    common::{
        app_state::AppState,
        bootstrap::{self, bootstrap},
        config,
    },
    routes,
};

#[tokio::main]
async fn main() -> Result<()> {
    bootstrap::init_env();
    let config = config::load()?;
    bootstrap::init_tracing(&config);

    tracing::info!("Loading menu and session storage...");
    let state = AppState::from_config(config.clone())?;
    let app = routes::app(state);

    tracing::info!("Bootstrapping...");
    bootstrap("OrderService", app, &config).await?;
    Ok(())
}
