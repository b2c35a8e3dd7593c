use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Result record of one completed test-taking session. Insert-only: attempts
/// are never updated or deleted by normal operation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TestAttempt {
    pub id: Uuid,
    pub user_id: Uuid,
    pub test_type_id: Uuid,
    pub score: f64,
    pub passed: bool,
    pub attempt_date: DateTime<Utc>,
}
