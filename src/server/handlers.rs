use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::{Form, Json};
use serde::Deserialize;

use crate::protocol::{ChatRequest, ChatResponse, ErrorResponse, HealthResponse};
use crate::relay::Relay;

use super::page;

/// Shared application state.
pub struct AppState {
    pub relay: Relay,
}

/// Form submission from the web page. An absent field is an empty prompt.
#[derive(Debug, Deserialize)]
pub struct PromptForm {
    #[serde(default)]
    pub prompt: String,
}

/// Serve the page with the prompt form.
pub async fn index() -> Html<String> {
    Html(page::render(None))
}

/// Form submission: relay the prompt, re-render the page with the completion
/// text or the error text. Always HTTP 200 so the page stays usable.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<PromptForm>,
) -> Html<String> {
    let text = match state.relay.generate(&form.prompt).await {
        Ok(text) => text,
        Err(e) => e.to_string(),
    };
    Html(page::render(Some(&text)))
}

/// JSON endpoint: relay the prompt, return the completion or an error payload.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Response {
    match state.relay.generate(&req.prompt).await {
        Ok(response) => Json(ChatResponse { response }).into_response(),
        Err(e) => write_error(StatusCode::BAD_GATEWAY, &e.to_string()),
    }
}

/// Health check handler.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        backend: Some(state.relay.backend_name().to_string()),
    })
}

fn write_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
