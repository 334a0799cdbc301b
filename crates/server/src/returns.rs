//! Returns API endpoints, synchronous and as background jobs.

use api_types::{
    job::{JobResponse, JobStatus, JobStatusResponse},
    returns::{ReturnsRequest, ReturnsResponse},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{InvestorProfile, Rules, Transaction, Vehicle};
use uuid::Uuid;

use crate::{JobRecord, ServerError, convert, server::ServerState};

struct ReturnsInput {
    transactions: Vec<Transaction>,
    rules: Rules,
    profile: InvestorProfile,
}

impl TryFrom<ReturnsRequest> for ReturnsInput {
    type Error = ServerError;

    fn try_from(request: ReturnsRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            transactions: convert::transactions(&request.transactions)?,
            rules: convert::rules(&request.q, &request.p, &request.k)?,
            profile: convert::profile(request.age, request.wage, request.inflation),
        })
    }
}

async fn compute_returns(
    state: &ServerState,
    input: ReturnsInput,
    vehicle: Vehicle,
) -> Result<ReturnsResponse, ServerError> {
    let report = state
        .compute(move |engine| {
            engine.returns(input.transactions, &input.rules, &input.profile, vehicle)
        })
        .await?;
    Ok(convert::returns_response(&report))
}

pub async fn nps(
    State(state): State<ServerState>,
    Json(payload): Json<ReturnsRequest>,
) -> Result<Json<ReturnsResponse>, ServerError> {
    let input = ReturnsInput::try_from(payload)?;
    Ok(Json(compute_returns(&state, input, Vehicle::Nps).await?))
}

pub async fn index(
    State(state): State<ServerState>,
    Json(payload): Json<ReturnsRequest>,
) -> Result<Json<ReturnsResponse>, ServerError> {
    let input = ReturnsInput::try_from(payload)?;
    Ok(Json(compute_returns(&state, input, Vehicle::IndexFund).await?))
}

/// Validate the request, record the job as processing and finish it on a
/// background task.
fn spawn_job(
    state: ServerState,
    payload: ReturnsRequest,
    vehicle: Vehicle,
) -> Result<(StatusCode, Json<JobResponse>), ServerError> {
    let input = ReturnsInput::try_from(payload)?;
    let job_id = Uuid::new_v4();
    state.jobs.put(job_id, JobRecord::processing());
    tracing::info!(%job_id, vehicle = vehicle.as_str(), "returns job started");

    tokio::spawn(async move {
        let outcome = compute_returns(&state, input, vehicle).await;
        if let Err(err) = &outcome {
            tracing::error!(%job_id, "returns job failed: {err:?}");
        }
        let record = finished_record(outcome);
        tracing::info!(%job_id, status = ?record.status, "returns job finished");
        state.jobs.put(job_id, record);
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(JobResponse {
            job_id,
            status: JobStatus::Processing,
        }),
    ))
}

/// Final record of a job; failures keep only the user-facing message.
fn finished_record(outcome: Result<ReturnsResponse, ServerError>) -> JobRecord {
    match outcome {
        Ok(result) => JobRecord::completed(result),
        Err(err) => JobRecord::failed(err.to_string()),
    }
}

pub async fn nps_async(
    State(state): State<ServerState>,
    Json(payload): Json<ReturnsRequest>,
) -> Result<(StatusCode, Json<JobResponse>), ServerError> {
    spawn_job(state, payload, Vehicle::Nps)
}

pub async fn index_async(
    State(state): State<ServerState>,
    Json(payload): Json<ReturnsRequest>,
) -> Result<(StatusCode, Json<JobResponse>), ServerError> {
    spawn_job(state, payload, Vehicle::IndexFund)
}

pub async fn job_status(
    State(state): State<ServerState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobStatusResponse>, ServerError> {
    let record = state
        .jobs
        .get(job_id)
        .ok_or_else(|| ServerError::NotFound(format!("job {job_id} not found")))?;
    Ok(Json(record.into_response(job_id)))
}
