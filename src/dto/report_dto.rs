use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_users: i64,
    pub new_users: i64,
    pub test_types: i64,
    pub total_attempts: i64,
    pub passed_attempts: i64,
    pub failed_attempts: i64,
}

/// Chart payload: parallel, position-aligned label/score sequences. Months
/// with no attempts produce no entry at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartDataResponse {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}
