use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/heatmap", get(handlers::get_heatmap).post(handlers::post_heatmap))
        .route("/api/stats/views", get(handlers::get_view_stats))
        .route("/api/levels", get(handlers::get_levels))
        .route("/api/views", post(handlers::record_view))
        .with_state(state)
}
