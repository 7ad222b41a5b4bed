//! Axum server setup, router construction and the conversion endpoint.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{error, info, warn};
use serde::Serialize;
use tower_http::services::ServeDir;

use crate::conversion::{CompletionClient, ConversionRequest};
use crate::errors::ConversionError;

const INDEX_HTML: &str = include_str!("../static/index.html");

/// Shared application state passed to all handlers via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<CompletionClient>,
}

/// Body of every `/convert` response
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ConversionResponse {
    Success {
        converted_text: String,
        status: &'static str,
    },
    Failure {
        error: String,
        status: &'static str,
    },
}

impl ConversionResponse {
    pub fn success(converted_text: String) -> Self {
        Self::Success {
            converted_text,
            status: "success",
        }
    }

    pub fn failure(error: impl ToString) -> Self {
        Self::Failure {
            error: error.to_string(),
            status: "error",
        }
    }
}

impl IntoResponse for ConversionResponse {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Success { .. } => StatusCode::OK,
            Self::Failure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

impl From<ConversionError> for ConversionResponse {
    fn from(error: ConversionError) -> Self {
        match &error {
            ConversionError::Validation(message) => warn!("Rejected conversion: {}", message),
            ConversionError::Transport(e) => error!("Conversion failed: {}", e),
        }
        Self::failure(error)
    }
}

/// GET / — the front-end page.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// POST /convert — Convert text to a voice or style.
///
/// Returns 200 with `converted_text` on success, 500 with `error` when the
/// request is invalid or the completion call fails. The provider is never
/// called for an invalid request.
pub async fn convert(
    State(app): State<AppState>,
    body: Result<Json<ConversionRequest>, JsonRejection>,
) -> ConversionResponse {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return ConversionError::validation(format!("Invalid request body: {}", rejection.body_text()))
                .into();
        }
    };

    let prepared = match request.prepare() {
        Ok(prepared) => prepared,
        Err(e) => return e.into(),
    };

    match prepared.run(&app.client).await {
        Ok(converted) => ConversionResponse::success(converted),
        Err(e) => e.into(),
    }
}

/// Build the full axum router.
///
/// The router serves:
/// - `POST /convert`
/// - the embedded page at `/`, or the files of `static_dir` when given
pub fn build_router(client: Arc<CompletionClient>, static_dir: Option<PathBuf>) -> Router {
    let app_state = AppState { client };

    let router = Router::new()
        .route("/convert", post(convert))
        .with_state(app_state);

    match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router.route("/", get(index)),
    }
}

/// Bind `bind_addr`, serve in a background task and return the bound address.
pub async fn start_server(router: Router, bind_addr: SocketAddr) -> Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            error!("Server stopped: {}", e);
        }
    });

    Ok(addr)
}

/// Bind `bind_addr` and serve until the process ends.
pub async fn run_server(router: Router, bind_addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await.context("Server error")?;
    Ok(())
}
