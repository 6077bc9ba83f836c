use axum::{
    extract::State,
    response::{Html, IntoResponse},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info};

use brief_core::{validate_input, SummaryRequest, SummaryResponse};
use crate::error::ApiError;
use crate::page::{UiConfig, INDEX_HTML};
use crate::AppState;

pub async fn index() -> impl IntoResponse {
    Html(INDEX_HTML)
}

pub async fn ui_config(State(state): State<Arc<AppState>>) -> Json<UiConfig> {
    Json(UiConfig::for_model(state.summarizer.as_ref()))
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "status": "ok", "model": state.summarizer.name() }))
}

pub async fn summarize(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SummaryRequest>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let text = validate_input(&request.text)?;
    let bounds = request.bounds();
    info!(
        "Processing summary request ({} chars, min_length={}, max_length={})",
        text.chars().count(),
        bounds.min_length(),
        bounds.max_length()
    );

    let summary = state
        .summarizer
        .summarize(text, bounds)
        .await
        .map_err(|e| {
            error!("Summarization error: {}", e);
            e
        })?;

    Ok(Json(SummaryResponse {
        summary,
        model: state.summarizer.name().to_string(),
    }))
}
