use axum::{
    extract::State,
    response::{IntoResponse, Json, Response},
};

use crate::dto::report_dto::ChartDataResponse;
use crate::AppState;

#[axum::debug_handler]
pub async fn get_stats(State(state): State<AppState>) -> crate::error::Result<Response> {
    let stats = state.report_service.dashboard_stats().await?;
    Ok(Json(stats).into_response())
}

#[axum::debug_handler]
pub async fn get_chart_data(State(state): State<AppState>) -> crate::error::Result<Response> {
    let trend = state.report_service.monthly_trend().await?;
    let response = ChartDataResponse {
        labels: trend.months,
        data: trend.scores,
    };
    Ok(Json(response).into_response())
}
