use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Extension,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::test_dto::{
    CreateQuestionRequest, CreateTestTypeRequest, PublicQuestion, SubmitTestRequest,
};
use crate::middleware::auth::Claims;
use crate::AppState;

#[axum::debug_handler]
pub async fn list_test_types(State(state): State<AppState>) -> crate::error::Result<Response> {
    let test_types = state.test_type_service.list_test_types().await?;
    Ok(Json(test_types).into_response())
}

#[axum::debug_handler]
pub async fn create_test_type(
    State(state): State<AppState>,
    Json(req): Json<CreateTestTypeRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let test_type = state.test_type_service.create_test_type(req).await?;
    Ok((StatusCode::CREATED, Json(test_type)).into_response())
}

/// Question bank of a test type, with correct labels withheld.
#[axum::debug_handler]
pub async fn list_questions(
    State(state): State<AppState>,
    Path(test_type_id): Path<Uuid>,
) -> crate::error::Result<Response> {
    state.attempt_service.get_test_type(test_type_id).await?;
    let questions = state.attempt_service.questions_for_type(test_type_id).await?;
    let public: Vec<PublicQuestion> = questions.into_iter().map(PublicQuestion::from).collect();
    Ok(Json(public).into_response())
}

#[axum::debug_handler]
pub async fn create_question(
    State(state): State<AppState>,
    Path(test_type_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateQuestionRequest>,
) -> crate::error::Result<Response> {
    req.validate()?;
    let created_by = claims.user_id()?;
    let question = state
        .test_type_service
        .create_question(test_type_id, created_by, req)
        .await?;
    Ok((StatusCode::CREATED, Json(question)).into_response())
}

#[axum::debug_handler]
pub async fn submit_test(
    State(state): State<AppState>,
    Path(test_type_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SubmitTestRequest>,
) -> crate::error::Result<Response> {
    let user_id = claims.user_id()?;
    let result = state
        .attempt_service
        .submit_test(test_type_id, user_id, req)
        .await?;
    Ok(Json(result).into_response())
}
