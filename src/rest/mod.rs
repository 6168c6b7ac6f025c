// rest/mod.rs — HTTP surface for the task API.
//
// Endpoints:
//   GET    /            liveness message
//   POST   /tasks       create
//   GET    /tasks       list (createdAt descending)
//   GET    /tasks/{id}  get by id
//   PUT    /tasks/{id}  replace (full overwrite)
//   PATCH  /tasks/{id}  partial update
//   DELETE /tasks/{id}  delete

pub mod routes;

use anyhow::{Context as _, Result};
use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::AppContext;

pub async fn start_rest_server(ctx: Arc<AppContext>) -> Result<()> {
    let addr: SocketAddr = format!("0.0.0.0:{}", ctx.config.port).parse()?;
    let router = build_router(ctx)?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("task API listening on http://{}", addr);
    axum::serve(listener, router).await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Result<Router> {
    Ok(Router::new()
        .route("/", get(routes::health::liveness))
        .route(
            "/tasks",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route(
            "/tasks/{id}",
            get(routes::tasks::get_task)
                .put(routes::tasks::replace_task)
                .patch(routes::tasks::patch_task)
                .delete(routes::tasks::delete_task),
        )
        .layer(cors_layer(&ctx.config.allowed_origin)?)
        .with_state(ctx))
}

/// One configured origin, the six task methods plus preflight, and the two
/// headers clients send. Credentials stay disabled (the layer's default).
fn cors_layer(allowed_origin: &str) -> Result<CorsLayer> {
    let origin: HeaderValue = allowed_origin
        .parse()
        .with_context(|| format!("invalid allowed origin '{allowed_origin}'"))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}
