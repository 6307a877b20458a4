use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    dto::auth_dto::{AuthResponse, LoginPayload, RegisterPayload},
    error::{Error, Result},
    models::user::Role,
    utils::token,
    AppState,
};

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    if Role::parse(&payload.role).is_none() {
        return Err(Error::BadRequest("Invalid role".to_string()));
    }

    let user = state.user_service.register(payload).await?;
    let token = token::issue_token(
        user.id,
        &user.role,
        &crate::config::get_config().jwt_secret,
    )?;

    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let user = state
        .user_service
        .authenticate(&payload.email, &payload.password)
        .await?;
    let token = token::issue_token(
        user.id,
        &user.role,
        &crate::config::get_config().jwt_secret,
    )?;

    Ok(Json(AuthResponse { token, user }))
}
