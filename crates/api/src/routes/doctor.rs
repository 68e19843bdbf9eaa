use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/doctors/:id/available-slots",
            get(handlers::doctor::available_slots),
        )
        .route(
            "/api/doctors/:id/capacity",
            get(handlers::doctor::shift_capacity),
        )
}
