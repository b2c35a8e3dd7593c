use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::utils::token::issue_token;
use crate::AppState;

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let user = state.user_service.register(req).await?;
    tracing::info!("Registered user {} ({})", user.id, user.email);
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))).into_response())
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let user = state.user_service.authenticate(&req.email, &req.password).await?;
    let token = issue_token(user.id, &crate::config::get_config().jwt_secret)?;
    let response = LoginResponse {
        token,
        user: UserResponse::from(user),
    };
    Ok(Json(response).into_response())
}
