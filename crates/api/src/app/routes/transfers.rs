use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use stockflow_core::{DomainError, TransferId};

use crate::app::routes::{common::run_blocking, system::method_not_allowed};
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route(
            "/",
            get(list_transfers)
                .post(create_transfer)
                .fallback(method_not_allowed),
        )
        .route("/:id", get(get_transfer).fallback(method_not_allowed))
}

/// POST /api/transfers
///
/// Move `quantity` units of a product between two warehouses. Responds 201
/// with the logged transfer and both post-transfer levels.
pub async fn create_transfer(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::CreateTransferRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", e.body_text()),
    };
    let draft = body.into_draft();

    match run_blocking(services, move |s| s.transfers.create(draft)).await {
        Ok(outcome) => (StatusCode::CREATED, Json(outcome)).into_response(),
        Err(resp) => resp,
    }
}

/// GET /api/transfers?warehouseId=1&productId=2&status=completed&limit=50
///
/// Newest first. `limit` defaults to 50 and is capped at 200.
pub async fn list_transfers(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::TransferListQuery>,
) -> axum::response::Response {
    let Ok(filter) = query.to_filter() else {
        return Json(Vec::<serde_json::Value>::new()).into_response();
    };

    match run_blocking(services, move |s| s.transfers.list(&filter)).await {
        Ok(transfers) => Json(transfers).into_response(),
        Err(resp) => resp,
    }
}

/// GET /api/transfers/:id
pub async fn get_transfer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let Ok(id) = id.parse::<TransferId>() else {
        return errors::domain_error_to_response(DomainError::not_found("Transfer not found"));
    };

    match run_blocking(services, move |s| s.transfers.get(&id)).await {
        Ok(transfer) => Json(transfer).into_response(),
        Err(resp) => resp,
    }
}
