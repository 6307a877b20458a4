use axum::{
    extract::{Path, State},
    response::{IntoResponse, Json},
};
use serde_json::json;
use uuid::Uuid;

use crate::{error::Result, middleware::auth::Actor, AppState};

#[axum::debug_handler]
pub async fn list_notifications(
    State(state): State<AppState>,
    actor: Actor,
) -> Result<impl IntoResponse> {
    let notifications = state.notification_service.list_for_user(actor.id).await?;
    Ok(Json(notifications))
}

#[axum::debug_handler]
pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
) -> Result<impl IntoResponse> {
    let notification = state.notification_service.mark_read(id, actor.id).await?;
    Ok(Json(notification))
}

#[axum::debug_handler]
pub async fn mark_all_read(
    State(state): State<AppState>,
    actor: Actor,
) -> Result<impl IntoResponse> {
    let updated = state.notification_service.mark_all_read(actor.id).await?;
    Ok(Json(json!({ "updated": updated })))
}
