//! Transactions API endpoints

use api_types::transaction::{
    Expense, FilterRequest, Transaction, ValidationRequest, ValidationResponse,
};
use axum::{Json, extract::State};

use crate::{ServerError, convert, server::ServerState};

/// Derive ceiling and remanent for raw expenses.
pub async fn parse(
    State(state): State<ServerState>,
    Json(payload): Json<Vec<Expense>>,
) -> Result<Json<Vec<Transaction>>, ServerError> {
    let expenses = convert::expenses(&payload)?;
    let transactions = state
        .compute(move |engine| engine.derive_transactions(&expenses))
        .await?;

    tracing::debug!(count = transactions.len(), "expenses parsed");
    Ok(Json(
        transactions.iter().map(convert::transaction_view).collect(),
    ))
}

/// Reject negative, over-limit and duplicate-date transactions.
pub async fn validate(
    State(state): State<ServerState>,
    Json(payload): Json<ValidationRequest>,
) -> Result<Json<ValidationResponse>, ServerError> {
    let transactions = convert::transactions(&payload.transactions)?;
    let outcome = state
        .compute(move |engine| engine.validate(transactions))
        .await?;

    tracing::debug!(
        valid = outcome.valid.len(),
        invalid = outcome.rejected.len(),
        "transactions validated"
    );
    Ok(Json(convert::validation_response(&outcome)))
}

/// Apply the Q and P rules of the request.
pub async fn filter(
    State(state): State<ServerState>,
    Json(payload): Json<FilterRequest>,
) -> Result<Json<ValidationResponse>, ServerError> {
    let transactions = convert::transactions(&payload.transactions)?;
    let rules = convert::rules(&payload.q, &payload.p, &[])?;
    let outcome = state
        .compute(move |engine| engine.apply_temporal_rules(transactions, &rules.q, &rules.p))
        .await?;

    tracing::debug!(
        valid = outcome.valid.len(),
        invalid = outcome.rejected.len(),
        "temporal rules applied"
    );
    Ok(Json(convert::validation_response(&outcome)))
}
