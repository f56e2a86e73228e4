use crate::prelude::{eprintln, *};
use axum::{
    extract::State,
    response::sse::{Event, Sse},
    routing::{get, post},
    Json, Router,
};
use futures::stream::{self, Stream};
use std::convert::Infallible;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

type SharedGlobal = Arc<crate::Global>;

pub async fn run_sse(options: super::cli::SseOptions, global: crate::Global) -> Result<()> {
    let addr = format!("{}:{}", options.host, options.port);
    let verbose = global.verbose;

    let app_router = router(Arc::new(global));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| eyre!("Failed to bind to {addr}: {e}"))?;

    if verbose {
        eprintln!("docfinder MCP server on http://{addr}");
        eprintln!("  GET  /sse");
        eprintln!("  POST /message");
    }
    log::info!("Listening on {addr}");

    axum::serve(listener, app_router)
        .await
        .map_err(|e| eyre!("Server error: {e}"))?;

    Ok(())
}

fn router(global: SharedGlobal) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/sse", get(sse_handler))
        .route("/message", post(message_handler))
        .layer(cors)
        .with_state(global)
}

async fn sse_handler(
    State(_global): State<SharedGlobal>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    Sse::new(stream::once(async {
        Ok(Event::default().event("endpoint").data("/message"))
    }))
}

async fn message_handler(
    State(global): State<SharedGlobal>,
    Json(request): Json<serde_json::Value>,
) -> Json<serde_json::Value> {
    log::debug!("POST /message {request}");
    let request_str = serde_json::to_string(&request).unwrap_or_default();
    let response = super::handle_request(&request_str, &global).await;
    Json(serde_json::to_value(response).unwrap_or(serde_json::Value::Null))
}
