pub mod config;
pub mod error;
pub mod formatter;
pub mod handler;
pub mod lookup;
pub mod types;

use log::{debug, info};
use tokio::net::TcpListener;

use config::Config;
use error::Result;
use lookup::GoDoc;

/// Serve the interaction webhook until Ctrl-C is received.
pub async fn run() -> Result<()> {
    info!("Initializing godocbot");
    let config = Config::from_env()?;

    debug!("Building router");
    let app = handler::router(GoDoc::from_config(&config));

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!("Listening for interactions on {}", config.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown signal received, shutting down...");
            }
        })
        .await?;

    Ok(())
}
