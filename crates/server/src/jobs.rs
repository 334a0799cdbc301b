//! Background job bookkeeping.
//!
//! The engine knows nothing about jobs: the server runs a computation on a
//! blocking task and records its outcome through a [`JobStore`]. The store is
//! injected into [`crate::ServerState`], so tests or other deployments can
//! swap it out.

use std::{
    collections::{HashMap, VecDeque},
    sync::{PoisonError, RwLock},
};

use api_types::{
    job::{JobStatus, JobStatusResponse},
    returns::ReturnsResponse,
};
use uuid::Uuid;

/// State of a background job.
#[derive(Clone, Debug, PartialEq)]
pub struct JobRecord {
    pub status: JobStatus,
    pub result: Option<ReturnsResponse>,
    pub error: Option<String>,
}

impl JobRecord {
    pub fn processing() -> Self {
        Self {
            status: JobStatus::Processing,
            result: None,
            error: None,
        }
    }

    pub fn completed(result: ReturnsResponse) -> Self {
        Self {
            status: JobStatus::Completed,
            result: Some(result),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: JobStatus::Failed,
            result: None,
            error: Some(error.into()),
        }
    }

    pub(crate) fn into_response(self, job_id: Uuid) -> JobStatusResponse {
        JobStatusResponse {
            job_id,
            status: self.status,
            result: self.result,
            error: self.error,
        }
    }
}

/// Key-value store of job records.
pub trait JobStore: Send + Sync {
    /// Insert or replace the record of `id`.
    fn put(&self, id: Uuid, record: JobRecord);

    fn get(&self, id: Uuid) -> Option<JobRecord>;
}

/// Records kept by [`InMemoryJobStore::new`].
pub const DEFAULT_JOB_CAPACITY: usize = 10_000;

/// In-memory job store (non-persistent).
///
/// Holds at most `capacity` records. Past that, the oldest finished records
/// are evicted first; jobs still processing are never dropped, so the store
/// can exceed its capacity while that many jobs are in flight.
#[derive(Debug)]
pub struct InMemoryJobStore {
    capacity: usize,
    jobs: RwLock<Jobs>,
}

#[derive(Debug, Default)]
struct Jobs {
    records: HashMap<Uuid, JobRecord>,
    /// Insertion order, oldest first.
    order: VecDeque<Uuid>,
}

impl Jobs {
    fn evict_finished(&mut self, capacity: usize) {
        while self.records.len() > capacity {
            let oldest_finished = self.order.iter().position(|id| {
                self.records
                    .get(id)
                    .is_some_and(|record| record.status != JobStatus::Processing)
            });
            let Some(id) = oldest_finished.and_then(|pos| self.order.remove(pos)) else {
                break;
            };
            self.records.remove(&id);
        }
    }
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_JOB_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            jobs: RwLock::new(Jobs::default()),
        }
    }
}

impl Default for InMemoryJobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl JobStore for InMemoryJobStore {
    fn put(&self, id: Uuid, record: JobRecord) {
        // A panic while holding the lock cannot leave a half-written record.
        let mut jobs = self.jobs.write().unwrap_or_else(PoisonError::into_inner);
        if jobs.records.insert(id, record).is_none() {
            jobs.order.push_back(id);
        }
        jobs.evict_finished(self.capacity);
    }

    fn get(&self, id: Uuid) -> Option<JobRecord> {
        self.jobs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .records
            .get(&id)
            .cloned()
    }
}
