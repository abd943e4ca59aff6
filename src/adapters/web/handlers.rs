//! HTTP request handlers for web adapter.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use std::sync::Arc;

use crate::domain::investor::{Investor, InvestorId, InvestorSummary};

use super::{AppState, WebError};

pub async fn list_investors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<InvestorSummary>>, WebError> {
    let summaries = state.investors.list_summaries()?;
    tracing::debug!(count = summaries.len(), "listing investors");
    Ok(Json(summaries))
}

pub async fn get_investor(
    State(state): State<Arc<AppState>>,
    id: Result<Path<InvestorId>, PathRejection>,
) -> Result<Json<Investor>, WebError> {
    let Path(id) = id.map_err(|e| WebError::unprocessable(e.body_text()))?;

    match state.investors.get_detail(id) {
        Ok(investor) => Ok(Json(investor)),
        Err(err) => {
            tracing::warn!(id, "investor lookup failed: {err}");
            Err(err.into())
        }
    }
}

pub async fn not_found() -> WebError {
    WebError::not_found("Not Found")
}
