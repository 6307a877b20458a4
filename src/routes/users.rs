use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::{dto::user_dto::UpdateProfilePayload, error::Result, middleware::auth::Actor, AppState};

#[axum::debug_handler]
pub async fn me(State(state): State<AppState>, actor: Actor) -> Result<impl IntoResponse> {
    let user = state.user_service.get(actor.id).await?;
    Ok(Json(user))
}

#[axum::debug_handler]
pub async fn update_me(
    State(state): State<AppState>,
    actor: Actor,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.user_service.update_profile(actor.id, payload).await?;
    Ok(Json(user))
}
