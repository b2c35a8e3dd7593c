//! End-to-end test against a scratch Postgres database. Run with
//! `cargo test -- --ignored` after pointing DATABASE_URL at a disposable
//! database.

use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use chrono::{Duration, Utc};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;
use uuid::Uuid;

async fn send(
    router: &axum::Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
#[ignore = "requires a running Postgres (DATABASE_URL)"]
async fn full_test_flow_end_to_end() {
    dotenvy::dotenv().ok();
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("JWT_SECRET", "test_secret_key");

    let _ = skilltest_backend::config::init_config();
    let pool = skilltest_backend::database::pool::create_pool()
        .await
        .expect("pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    let state = skilltest_backend::AppState::new(pool.clone());
    let router = skilltest_backend::build_router(state.clone());

    // Authed routes reject requests without a token
    let (status, _) = send(&router, "GET", "/api/dashboard/stats", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Register + login
    let email = format!("student_{}@example.com", Uuid::new_v4());
    let (status, _) = send(
        &router,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "first_name": "Alice",
            "last_name": "Morgan",
            "email": email,
            "phone": "05551234567",
            "password": "correct-horse",
            "confirm_password": "correct-horse",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Mismatched confirmation is rejected up front
    let (status, _) = send(
        &router,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "first_name": "Bob",
            "last_name": "Morgan",
            "email": format!("bob_{}@example.com", Uuid::new_v4()),
            "phone": "05551234567",
            "password": "correct-horse",
            "confirm_password": "wrong-horse",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, login) = send(
        &router,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": "correct-horse" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = login["token"].as_str().expect("token").to_string();

    let (status, _) = send(
        &router,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": "not-the-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Author a test type with a five-question bank
    let (status, test_type) = send(
        &router,
        "POST",
        "/api/test-types",
        Some(&token),
        Some(json!({
            "name": "Python Basics",
            "language": "Python",
            "description": "Introductory questions",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let test_type_id = test_type["id"].as_str().expect("test type id").to_string();

    let correct = ["A", "B", "C", "D", "A"];
    for (i, label) in correct.iter().enumerate() {
        let (status, _) = send(
            &router,
            "POST",
            &format!("/api/test-types/{}/questions", test_type_id),
            Some(&token),
            Some(json!({
                "question": format!("Question {}", i + 1),
                "answer_a": "option a",
                "answer_b": "option b",
                "answer_c": "option c",
                "answer_d": "option d",
                "correct_answer": label,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    // Takers see the bank without correct labels
    let (status, questions) = send(
        &router,
        "GET",
        &format!("/api/test-types/{}/questions", test_type_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let questions = questions.as_array().expect("questions").clone();
    assert_eq!(questions.len(), 5);
    assert!(questions[0].get("correct_answer").is_none());

    let stats_before = send(&router, "GET", "/api/dashboard/stats", Some(&token), None)
        .await
        .1;

    // 4/5 correct -> 80.0, passed
    let given = ["A", "B", "C", "D", "B"];
    let answers: serde_json::Map<String, JsonValue> = questions
        .iter()
        .zip(given)
        .map(|(q, a)| (q["id"].as_str().unwrap().to_string(), json!(a)))
        .collect();
    let (status, result) = send(
        &router,
        "POST",
        &format!("/api/test-types/{}/submit", test_type_id),
        Some(&token),
        Some(json!({ "answers": answers })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["percentage"].as_f64(), Some(80.0));
    assert_eq!(result["passed"].as_bool(), Some(true));

    // Recorded attempt round-trips by id
    let attempt_id: Uuid = result["attempt_id"].as_str().unwrap().parse().unwrap();
    let attempt = state
        .attempt_service
        .get_attempt_by_id(attempt_id)
        .await
        .expect("attempt");
    assert_eq!(attempt.test_type_id.to_string(), test_type_id);
    assert_eq!(attempt.score, 80.0);
    assert!(attempt.passed);

    // 2/5 correct -> 40.0, failed
    let given = ["A", "B", "A", "A", "B"];
    let answers: serde_json::Map<String, JsonValue> = questions
        .iter()
        .zip(given)
        .map(|(q, a)| (q["id"].as_str().unwrap().to_string(), json!(a)))
        .collect();
    let (status, result) = send(
        &router,
        "POST",
        &format!("/api/test-types/{}/submit", test_type_id),
        Some(&token),
        Some(json!({ "answers": answers })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["percentage"].as_f64(), Some(40.0));
    assert_eq!(result["passed"].as_bool(), Some(false));

    // Dashboard counts moved by exactly the two attempts above
    let (status, stats) = send(&router, "GET", "/api/dashboard/stats", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let delta = |key: &str| stats[key].as_i64().unwrap() - stats_before[key].as_i64().unwrap();
    assert_eq!(delta("total_attempts"), 2);
    assert_eq!(delta("passed_attempts"), 1);
    assert_eq!(delta("failed_attempts"), 1);
    assert_eq!(
        stats["total_attempts"].as_i64().unwrap(),
        stats["passed_attempts"].as_i64().unwrap() + stats["failed_attempts"].as_i64().unwrap()
    );

    // Chart data: aligned sequences, current month present
    let (status, chart) = send(
        &router,
        "GET",
        "/api/dashboard/chart-data",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let labels = chart["labels"].as_array().unwrap();
    let data = chart["data"].as_array().unwrap();
    assert_eq!(labels.len(), data.len());
    let this_month = Utc::now().format("%b").to_string();
    assert!(labels
        .iter()
        .any(|l| l.as_str() == Some(this_month.as_str())));

    // On a fresh database the only two attempts are 80.0 and 40.0, so the
    // current month's bucket is their arithmetic mean.
    if stats_before["total_attempts"].as_i64() == Some(0) {
        let idx = labels
            .iter()
            .position(|l| l.as_str() == Some(this_month.as_str()))
            .unwrap();
        assert_eq!(data[idx].as_f64(), Some(60.0));
    }

    // Attempts outside the 180-day window do not change the trend
    sqlx::query(
        r#"INSERT INTO test_attempts (user_id, test_type_id, score, passed, attempt_date)
           VALUES ($1, $2, $3, $4, $5)"#,
    )
    .bind(attempt.user_id)
    .bind(attempt.test_type_id)
    .bind(10.0_f64)
    .bind(false)
    .bind(Utc::now() - Duration::days(200))
    .execute(&pool)
    .await
    .expect("seed old attempt");

    let (_, chart_after) = send(
        &router,
        "GET",
        "/api/dashboard/chart-data",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(chart_after["labels"], chart["labels"]);
    assert_eq!(chart_after["data"], chart["data"]);

    // Empty question bank is rejected before any attempt is recorded
    let (_, empty_type) = send(
        &router,
        "POST",
        "/api/test-types",
        Some(&token),
        Some(json!({ "name": "Empty Bank", "language": "Rust" })),
    )
    .await;
    let (status, _) = send(
        &router,
        "POST",
        &format!("/api/test-types/{}/submit", empty_type["id"].as_str().unwrap()),
        Some(&token),
        Some(json!({ "answers": {} })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown test type -> 404
    let (status, _) = send(
        &router,
        "POST",
        &format!("/api/test-types/{}/submit", Uuid::new_v4()),
        Some(&token),
        Some(json!({ "answers": {} })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
