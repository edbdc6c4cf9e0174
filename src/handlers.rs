use crate::coach::reply_for;
use crate::errors::AppError;
use crate::models::{ChatReply, ChatRequest, FitnessProfile};
use crate::state::AppState;
use crate::storage::persist_profile;
use crate::ui::render_plan_page;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Html,
    Json,
};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let profile = state.profile.lock().await;
    Html(render_plan_page(&profile))
}

pub async fn get_profile(State(state): State<AppState>) -> Json<FitnessProfile> {
    let profile = state.profile.lock().await;
    Json(profile.clone())
}

pub async fn update_profile(
    State(state): State<AppState>,
    payload: Result<Json<FitnessProfile>, JsonRejection>,
) -> Result<Json<FitnessProfile>, AppError> {
    let Json(updated) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

    let mut profile = state.profile.lock().await;
    persist_profile(&state.profile_path, &updated).await?;
    *profile = updated;
    info!(fields = profile.user_data.len(), "profile updated");

    Ok(Json(profile.clone()))
}

pub async fn chat(
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let Json(request) = payload.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

    let message = request.message.trim();
    if message.is_empty() {
        return Err(AppError::bad_request("No message provided"));
    }

    info!(
        chars = message.chars().count(),
        page = request.context.as_ref().map(|context| context.current_page.as_str()).unwrap_or(""),
        "chat message received"
    );
    Ok(Json(ChatReply::response(reply_for(message, request.context.as_ref()))))
}
