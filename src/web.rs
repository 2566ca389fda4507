//! SPA Host
//!
//! Serves the built single-page app. Any path that is not a file under the
//! dist directory gets `index.html`, so client-side routes such as
//! `/client` or `/video-call/a1/42` survive a reload.
//!
//! # Endpoints
//!
//! - `GET /health/live` - Liveness probe
//! - `GET /*` - Static assets, falling back to `index.html`

use axum::{routing::get, Router};
use std::path::Path;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::config::WebConfig;

/// Build the router serving `config.dist_dir`
pub fn build_router(config: &WebConfig) -> Router {
    let dist = Path::new(&config.dist_dir);
    let assets = ServeDir::new(dist).fallback(ServeFile::new(dist.join("index.html")));

    Router::new()
        .route("/health/live", get(liveness))
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn liveness() -> &'static str {
    "OK"
}

/// Start the static host and run until a shutdown signal arrives
pub async fn serve(config: &WebConfig) -> std::io::Result<()> {
    let index = Path::new(&config.dist_dir).join("index.html");
    if !index.exists() {
        tracing::warn!(
            "{:?} not found; build the UI first (trunk build --release in counselhub-ui)",
            index
        );
    }

    let router = build_router(config);
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("CounselHub web listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("CounselHub web shut down gracefully");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tempfile::tempdir;
    use tower::util::ServiceExt;

    const INDEX: &str = "<!DOCTYPE html><html><body>counselhub</body></html>";

    fn create_test_app() -> (Router, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), INDEX).unwrap();
        std::fs::write(dir.path().join("app.js"), "console.log('hi');").unwrap();

        let config = WebConfig {
            dist_dir: dir.path().to_string_lossy().into_owned(),
            ..WebConfig::default()
        };
        (build_router(&config), dir)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[tokio::test]
    async fn test_health_live() {
        let (app, _dir) = create_test_app();
        let (status, body) = get(app, "/health/live").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let (app, _dir) = create_test_app();
        let (status, body) = get(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, INDEX);
    }

    #[tokio::test]
    async fn test_assets_are_served() {
        let (app, _dir) = create_test_app();
        let (status, body) = get(app, "/app.js").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("console.log"));
    }

    #[tokio::test]
    async fn test_client_routes_fall_back_to_index() {
        for uri in ["/client", "/payment/u1/60/c1", "/video-call/a1/42"] {
            let (app, _dir) = create_test_app();
            let (status, body) = get(app, uri).await;

            assert_eq!(status, StatusCode::OK, "{}", uri);
            assert_eq!(body, INDEX, "{}", uri);
        }
    }
}
