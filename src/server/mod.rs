//! HTTP surface.
//!
//! - `GET /` runs an update and reports it
//! - `GET /api/trending` or `/api/trending-movies` (per source) serves the
//!   cached snapshot

mod handlers;

use std::future::Future;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::app::{AppContext, Result};

pub fn create_app(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(handlers::update_handler))
        .route(ctx.source.api_path(), get(handlers::trending_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

/// Serve until `shutdown` resolves.
pub async fn serve<F>(ctx: Arc<AppContext>, bind: &str, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(
        "Serving {} on http://{} (api: {})",
        ctx.source,
        listener.local_addr()?,
        ctx.source.api_path()
    );

    axum::serve(listener, create_app(ctx))
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
