pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::export::handlers as export_handlers;
use crate::state::AppState;
use crate::store::handlers as store_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume library
        .route(
            "/api/v1/resumes",
            get(store_handlers::handle_list_resumes).post(store_handlers::handle_create_resume),
        )
        .route(
            "/api/v1/resumes/:id",
            patch(store_handlers::handle_update_resume)
                .delete(store_handlers::handle_delete_resume),
        )
        // Profile
        .route(
            "/api/v1/profile",
            get(store_handlers::handle_get_profile).patch(store_handlers::handle_update_profile),
        )
        // Export
        .route("/api/v1/export", post(export_handlers::handle_export))
        .with_state(state)
}
