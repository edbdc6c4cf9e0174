use crate::backend::CHAT_PATH;
use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/profile", get(handlers::get_profile).post(handlers::update_profile))
        .route(CHAT_PATH, post(handlers::chat))
        .with_state(state)
}
