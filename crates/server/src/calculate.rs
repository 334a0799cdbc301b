//! One-shot pipeline endpoint: parse, validate, filter and project for both
//! vehicles in a single call.

use api_types::returns::{CalculateRequest, CalculateResponse};
use axum::{Json, extract::State};

use crate::{ServerError, convert, server::ServerState};

pub async fn calculate(
    State(state): State<ServerState>,
    Json(payload): Json<CalculateRequest>,
) -> Result<Json<CalculateResponse>, ServerError> {
    let expenses = convert::expenses(&payload.expenses)?;
    let rules = convert::rules(&payload.q, &payload.p, &payload.k)?;
    let profile = convert::profile(payload.age, payload.wage, payload.inflation);

    let report = state
        .compute(move |engine| engine.calculate(&expenses, &rules, &profile))
        .await?;

    if report.summary.rejected > 0 {
        tracing::warn!(
            rejected = report.summary.rejected,
            parsed = report.summary.parsed,
            "pipeline rejected transactions"
        );
    }

    Ok(Json(convert::calculate_response(&report)))
}
