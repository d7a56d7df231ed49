use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::errors::AppError;
use crate::publish::{GithubPublisher, PublishRecord};
use crate::workflow::GenerationWorkflow;

const INDEX_HTML: &str = include_str!("index.html");

pub struct AppState {
    pub workflow: GenerationWorkflow,
    pub publisher: GithubPublisher,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Llm(_) | AppError::Publish { .. } | AppError::Unexpected(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", axum::routing::get(home))
        .route("/health", axum::routing::get(health))
        .route("/generate", axum::routing::post(generate))
        .route("/rectify", axum::routing::post(rectify))
        .route("/deploy", axum::routing::post(deploy))
        .with_state(state)
}

pub async fn serve(state: Arc<AppState>, host: &str, port: u16) -> anyhow::Result<()> {
    let app = router(state);
    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("pagesmith listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn home() -> Html<&'static str> {
    Html(INDEX_HTML)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok", version: env!("CARGO_PKG_VERSION") })
}

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    description: Option<String>,
}

#[derive(Debug, Serialize)]
struct CodeResponse {
    code: String,
}

async fn generate(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateRequest>,
) -> Result<Json<CodeResponse>, AppError> {
    let description = body.description.unwrap_or_default();
    let code = state.workflow.generate(&description).await?;
    Ok(Json(CodeResponse { code }))
}

#[derive(Debug, Deserialize)]
struct RectifyRequest {
    code: Option<String>,
    feedback: Option<String>,
}

async fn rectify(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RectifyRequest>,
) -> Result<Json<CodeResponse>, AppError> {
    let code = body.code.unwrap_or_default();
    let feedback = body.feedback.unwrap_or_default();
    let code = state.workflow.rectify(&code, &feedback).await?;
    Ok(Json(CodeResponse { code }))
}

#[derive(Debug, Deserialize)]
struct DeployRequest {
    code: Option<String>,
    description: Option<String>,
}

async fn deploy(
    State(state): State<Arc<AppState>>,
    Json(body): Json<DeployRequest>,
) -> Result<Json<PublishRecord>, AppError> {
    let code = match body.code {
        Some(c) if !c.trim().is_empty() => c,
        _ => return Err(AppError::validation("Code is required to deploy")),
    };
    let description = body.description.unwrap_or_else(|| "App".into());
    let record = state.publisher.publish(&code, &description).await?;
    Ok(Json(record))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_client_error() {
        let resp = AppError::validation("Description is required").into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn upstream_failures_map_to_server_error() {
        let resp = AppError::Llm("LLM API error (503): down".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let resp = AppError::Publish { status: 422, body: "bad branch".into() }.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
