use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use jobs::{DEFAULT_JOB_CAPACITY, InMemoryJobStore, JobRecord, JobStore};
pub use server::{ServerState, router, run_with_listener};

mod calculate;
mod convert;
mod jobs;
mod returns;
mod server;
mod system;
mod transactions;

pub mod types {
    pub mod transaction {
        pub use api_types::transaction::{
            Expense, FilterRequest, InvalidTransaction, Transaction, ValidationRequest,
            ValidationResponse,
        };
    }

    pub mod period {
        pub use api_types::period::{KPeriod, PPeriod, QPeriod};
    }

    pub mod returns {
        pub use api_types::returns::{
            CalculateRequest, CalculateResponse, PipelineStepSummary, ReturnsRequest,
            ReturnsResponse, SavingsByDate,
        };
    }

    pub mod job {
        pub use api_types::job::{JobResponse, JobStatus, JobStatusResponse};
    }

    pub mod system {
        pub use api_types::system::{Health, Performance};
    }
}

/// Errors surfaced by handlers. `Display` is the user-facing message; the
/// detail of [`ServerError::Internal`] is only logged.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("{0}")]
    Generic(String),
    #[error("{0}")]
    NotFound(String),
    #[error("internal server error")]
    Internal(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::InvalidAmount(_) | EngineError::InvalidDate(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            ServerError::Engine(err) => status_for_engine_error(err),
            ServerError::Generic(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Internal(detail) => {
                tracing::error!("internal error: {detail}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let error = self.to_string();
        (status, Json(Error { error })).into_response()
    }
}

impl From<tokio::task::JoinError> for ServerError {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Internal(format!("computation task failed: {value}"))
    }
}
