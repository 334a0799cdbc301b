//! Health and process statistics.

use std::time::Duration;

use api_types::system::{Health, Performance};
use axum::{Json, extract::State};
use sysinfo::{ProcessesToUpdate, System};

use crate::{ServerError, server::ServerState};

pub async fn health() -> Json<Health> {
    Json(Health {
        status: "healthy".to_string(),
    })
}

pub async fn performance(
    State(state): State<ServerState>,
) -> Result<Json<Performance>, ServerError> {
    let uptime = state.started_at.elapsed();
    let threads = tokio::runtime::Handle::current().metrics().num_workers();
    let rss = tokio::task::spawn_blocking(resident_memory).await??;

    Ok(Json(Performance {
        time: format_uptime(uptime),
        memory: format!("{:.2} MB", rss as f64 / (1024.0 * 1024.0)),
        threads,
    }))
}

/// Resident memory of this process, in bytes.
fn resident_memory() -> Result<u64, ServerError> {
    let pid = sysinfo::get_current_pid().map_err(|err| ServerError::Internal(err.to_string()))?;
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
    Ok(system.process(pid).map_or(0, |process| process.memory()))
}

/// `HH:MM:SS.mmm`; hours are not wrapped.
fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    let (hours, rest) = (secs / 3600, secs % 3600);
    let (minutes, seconds) = (rest / 60, rest % 60);
    format!(
        "{hours:02}:{minutes:02}:{seconds:02}.{:03}",
        uptime.subsec_millis()
    )
}
