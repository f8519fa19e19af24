use std::net::SocketAddr;
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use view_heatmap::{load_data, router, AppState, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    if let Some(parent) = config.data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let data = load_data(&config.data_path).await;
    info!(
        days = data.days.len(),
        path = %config.data_path.display(),
        "loaded view log"
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = AppState::new(config, data);

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
