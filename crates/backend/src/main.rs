use anyhow::Context;
use backend::dashboards::d400_superstore::controller::fit_to_dataset;
use backend::shared::config;
use backend::shared::data::SalesDataset;
use backend::{routes, system, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = config::load_config()?;

    let dataset_path = config.dataset_path();
    let dataset = SalesDataset::load(&dataset_path)
        .with_context(|| format!("Failed to load dataset {}", dataset_path.display()))?;
    let defaults = fit_to_dataset(&dataset, config.dashboard.clone().into());
    tracing::info!(
        "Initial selection: {} / {} / {}",
        defaults.state,
        defaults.city.as_deref().unwrap_or("-"),
        defaults.product
    );

    let state = Arc::new(AppState::new(dataset, defaults));
    let app = routes::configure_routes(state, config.static_dir());

    let addr = config.bind_addr()?;

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    addr.port()
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
