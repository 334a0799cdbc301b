use axum::{
    Router,
    routing::{get, post},
};

use std::{sync::Arc, time::Instant};

use crate::{InMemoryJobStore, JobStore, ServerError, calculate, returns, system, transactions};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub jobs: Arc<dyn JobStore>,
    pub started_at: Instant,
}

impl ServerState {
    /// State with an in-memory job store.
    pub fn new(engine: Engine) -> Self {
        Self::with_job_store(engine, Arc::new(InMemoryJobStore::new()))
    }

    pub fn with_job_store(engine: Engine, jobs: Arc<dyn JobStore>) -> Self {
        Self {
            engine: Arc::new(engine),
            jobs,
            started_at: Instant::now(),
        }
    }

    /// Run an engine computation off the async executor.
    pub(crate) async fn compute<T, F>(&self, f: F) -> Result<T, ServerError>
    where
        T: Send + 'static,
        F: FnOnce(&Engine) -> T + Send + 'static,
    {
        let engine = Arc::clone(&self.engine);
        Ok(tokio::task::spawn_blocking(move || f(&engine)).await?)
    }
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/performance", get(system::performance))
        .route("/transactions/parse", post(transactions::parse))
        .route("/transactions/validator", post(transactions::validate))
        .route("/transactions/filter", post(transactions::filter))
        .route("/returns/nps", post(returns::nps))
        .route("/returns/index", post(returns::index))
        .route("/returns/nps/async", post(returns::nps_async))
        .route("/returns/index/async", post(returns::index_async))
        .route("/jobs/{job_id}", get(returns::job_status))
        .route("/calculate", post(calculate::calculate))
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(ServerState::new(engine))).await
}
