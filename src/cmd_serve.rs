//! `serve` subcommand.

use std::sync::Arc;

use tracing::info;

use mangaview_api::{AppState, RelayServer};
use mangaview_config::Config;

pub(crate) async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::from_config(&config)?);
    let server = RelayServer::new(config.server.clone(), state);

    info!(
        "Starting relay on {} (upstream {})",
        server.addr(),
        config.upstream.api_base
    );
    server.run().await
}
