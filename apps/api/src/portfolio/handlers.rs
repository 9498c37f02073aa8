//! Axum route handlers for the Portfolio API.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use chrono::{Local, SubsecRound};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::portfolio::models::{portfolio_id, PortfolioData, StoredPortfolio};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SavePortfolioResponse {
    pub message: String,
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct PortfolioListResponse {
    pub portfolios: Vec<String>,
    pub count: usize,
}

/// POST /api/portfolio
///
/// Stamps the submission with the current local time (microsecond precision)
/// and stores it under `{name}_{YYYYMMDDHHMMSS}`.
pub async fn handle_save_portfolio(
    State(state): State<AppState>,
    payload: Result<Json<PortfolioData>, JsonRejection>,
) -> Result<Json<SavePortfolioResponse>, AppError> {
    let Json(data) = payload?;

    let now = Local::now().naive_local().trunc_subsecs(6);
    let id = portfolio_id(&data.name, now);
    let record = StoredPortfolio {
        data,
        created_at: now,
    };

    state
        .store
        .insert(id.clone(), record)
        .await
        .map_err(|e| AppError::Storage(format!("Error saving portfolio: {e}")))?;

    info!(%id, "Portfolio saved");

    Ok(Json(SavePortfolioResponse {
        message: "Portfolio saved successfully".to_string(),
        id,
    }))
}

/// GET /api/portfolio/:id
pub async fn handle_get_portfolio(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StoredPortfolio>, AppError> {
    let portfolio = state
        .store
        .get(&id)
        .await
        .map_err(|e| AppError::Storage(format!("Error retrieving portfolio: {e}")))?
        .ok_or_else(|| AppError::NotFound("Portfolio not found".to_string()))?;

    Ok(Json(portfolio))
}

/// GET /api/portfolios
pub async fn handle_list_portfolios(
    State(state): State<AppState>,
) -> Result<Json<PortfolioListResponse>, AppError> {
    let portfolios = state
        .store
        .ids()
        .await
        .map_err(|e| AppError::Storage(format!("Error listing portfolios: {e}")))?;

    Ok(Json(PortfolioListResponse {
        count: portfolios.len(),
        portfolios,
    }))
}
