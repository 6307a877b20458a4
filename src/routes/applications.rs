use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{error::Result, middleware::auth::Actor, models::user::Role, AppState};

#[axum::debug_handler]
pub async fn accept_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
) -> Result<impl IntoResponse> {
    actor.ensure_role(Role::Recruiter)?;
    let application = state.application_service.accept(id, actor.id).await?;
    Ok(Json(application))
}

#[axum::debug_handler]
pub async fn reject_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
) -> Result<impl IntoResponse> {
    actor.ensure_role(Role::Recruiter)?;
    let application = state.application_service.reject(id, actor.id).await?;
    Ok(Json(application))
}

#[axum::debug_handler]
pub async fn withdraw_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
) -> Result<impl IntoResponse> {
    actor.ensure_role(Role::Candidate)?;
    state.application_service.withdraw(id, actor.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
