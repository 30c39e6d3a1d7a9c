use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use stockflow_core::{AlertId, DomainError};

use crate::app::routes::{common::run_blocking, system::method_not_allowed};
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route(
            "/",
            get(list_alerts)
                .post(regenerate_alerts)
                .fallback(method_not_allowed),
        )
        .route(
            "/:id",
            get(get_alert)
                .put(update_alert)
                .delete(dismiss_alert)
                .fallback(method_not_allowed),
        )
}

fn parse_alert_id(raw: &str) -> Result<AlertId, axum::response::Response> {
    raw.parse::<AlertId>()
        .map_err(|_| errors::domain_error_to_response(DomainError::not_found("Alert not found")))
}

/// GET /api/alerts?status=active&stockStatus=critical&productId=3&regenerate=true
///
/// Serves the persisted snapshot unless `regenerate=true`. Sorted by severity,
/// then by lowest stock.
pub async fn list_alerts(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::AlertListQuery>,
) -> axum::response::Response {
    let regenerate = query.regenerate();
    let filter = query.to_filter();

    let result = run_blocking(services, move |s| match filter {
        Ok(filter) => s.alerts.list(&filter, regenerate),
        // Still refresh the snapshot when asked to, even though nothing matches.
        Err(dto::MatchesNothing) if regenerate => s.alerts.regenerate().map(|_| Vec::new()),
        Err(dto::MatchesNothing) => Ok(Vec::new()),
    })
    .await;

    match result {
        Ok(alerts) => Json(alerts).into_response(),
        Err(resp) => resp,
    }
}

/// POST /api/alerts
///
/// Recompute alerts from current stock and return the full sorted list.
pub async fn regenerate_alerts(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match run_blocking(services, |s| s.alerts.regenerate()).await {
        Ok(alerts) => Json(alerts).into_response(),
        Err(resp) => resp,
    }
}

/// GET /api/alerts/:id
pub async fn get_alert(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_alert_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match run_blocking(services, move |s| s.alerts.get(&id)).await {
        Ok(alert) => Json(alert).into_response(),
        Err(resp) => resp,
    }
}

/// PUT /api/alerts/:id
///
/// Body `{status?, notes?}`. An explicit `"notes": null` clears the notes.
pub async fn update_alert(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::UpdateAlertRequest>, JsonRejection>,
) -> axum::response::Response {
    let id = match parse_alert_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", e.body_text()),
    };
    let patch = match body.into_patch() {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match run_blocking(services, move |s| s.alerts.update(&id, patch)).await {
        Ok(alert) => Json(alert).into_response(),
        Err(resp) => resp,
    }
}

/// DELETE /api/alerts/:id
///
/// Soft delete: the alert is marked dismissed and stays on file.
pub async fn dismiss_alert(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_alert_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match run_blocking(services, move |s| s.alerts.dismiss(&id)).await {
        Ok(alert) => Json(alert).into_response(),
        Err(resp) => resp,
    }
}
