use std::sync::Arc;

use axum::response::Response;
use tracing::error;

use stockflow_infra::ServiceResult;

use crate::app::errors;
use crate::app::services::AppServices;

/// Run a service call on the blocking pool; the services do file IO and hold
/// the ledger write gate.
pub async fn run_blocking<T, F>(services: Arc<AppServices>, f: F) -> Result<T, Response>
where
    T: Send + 'static,
    F: FnOnce(&AppServices) -> ServiceResult<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(move || f(&services)).await {
        Ok(result) => result.map_err(errors::service_error_to_response),
        Err(e) => {
            error!(error = %e, "service task failed");
            Err(errors::internal_error())
        }
    }
}
