//! CounselHub SPA Host
//!
//! Run with: cargo run --bin counselhub-web
//!
//! Serves the built UI (`trunk build --release` in `counselhub-ui`).
//!
//! # Configuration
//!
//! Read from `config.toml` (see `counselhub config`), overridden by:
//! - `COUNSELHUB_WEB_HOST`: Host to bind to (default: 0.0.0.0)
//! - `COUNSELHUB_WEB_PORT`: Port to listen on (default: 8084)
//! - `COUNSELHUB_WEB_DIST`: Built UI directory (default: counselhub-ui/dist)
//! - `RUST_LOG`: Log filter (default: counselhub=info,tower_http=debug)

use counselhub::config::Config;
use counselhub::web;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();
    config.logging.init(&["tower_http=debug"]);

    tracing::info!("Starting CounselHub web v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Serving {}", config.web.dist_dir);

    web::serve(&config.web).await?;

    Ok(())
}
