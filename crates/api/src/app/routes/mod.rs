use axum::Router;

pub mod alerts;
pub mod common;
pub mod system;
pub mod transfers;

/// Router for everything under `/api`.
pub fn router() -> Router {
    Router::new()
        .nest("/transfers", transfers::router())
        .nest("/alerts", alerts::router())
}
