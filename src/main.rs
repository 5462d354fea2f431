use std::sync::Arc;

use quotehub::{http, Config, SeedFiles, StoreHandle};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    info!(
        general = %config.general_quotes.display(),
        scifi = %config.scifi_quotes.display(),
        "starting quote server"
    );

    let handle = Arc::new(StoreHandle::new(SeedFiles::new(
        config.general_quotes.clone(),
        config.scifi_quotes.clone(),
    )));

    // Connect up front; requests retry the connection if this fails.
    if let Err(e) = handle.get() {
        warn!(error = %e, "quote store not available at startup");
    }

    http::serve(handle, &config.bind_addr()).await?;
    Ok(())
}
