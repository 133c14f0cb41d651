//! Binary entrypoint for the vox API server.

use vox_api::config::{build_dispatcher, ApiConfig};
use vox_api::{run, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = ApiConfig::from_env();
    let state = AppState::new(build_dispatcher(&config));
    run(&config.addr, state).await
}
