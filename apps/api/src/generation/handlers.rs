//! Axum route handlers for the Generation API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::errors::AppError;
use crate::generation::generator::{generate_descriptions, GenerateRequest, GenerateResponse};
use crate::llm_client::Provider;
use crate::state::AppState;

/// POST /api/ai/generate
///
/// Picks the provider from config for this request (OpenAI first, then Gemini)
/// and returns the generated about text plus one description per project.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(request) = payload?;

    let provider = Provider::from_config(&state.config);
    let response = generate_descriptions(&state.llm, &provider, &request).await?;

    Ok(Json(response))
}
