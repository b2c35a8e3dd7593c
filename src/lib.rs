pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::PgPool;

use crate::services::{
    attempt_service::AttemptService, report_service::ReportService,
    test_type_service::TestTypeService, user_service::UserService,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub user_service: UserService,
    pub test_type_service: TestTypeService,
    pub attempt_service: AttemptService,
    pub report_service: ReportService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let user_service = UserService::new(pool.clone());
        let test_type_service = TestTypeService::new(pool.clone());
        let attempt_service = AttemptService::new(pool.clone());
        let report_service = ReportService::new(pool.clone());

        Self {
            pool,
            user_service,
            test_type_service,
            attempt_service,
            report_service,
        }
    }
}

/// Full application router. Everything under /api except auth requires a
/// bearer token.
pub fn build_router(state: AppState) -> Router {
    let public_api = Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login));

    let authed_api = Router::new()
        .route(
            "/api/test-types",
            get(routes::test_types::list_test_types).post(routes::test_types::create_test_type),
        )
        .route(
            "/api/test-types/:id/questions",
            get(routes::test_types::list_questions).post(routes::test_types::create_question),
        )
        .route(
            "/api/test-types/:id/submit",
            post(routes::test_types::submit_test),
        )
        .route("/api/dashboard/stats", get(routes::dashboard::get_stats))
        .route(
            "/api/dashboard/chart-data",
            get(routes::dashboard::get_chart_data),
        )
        .layer(axum::middleware::from_fn(
            middleware::auth::require_bearer_auth,
        ));

    public_api.merge(authed_api).with_state(state)
}
