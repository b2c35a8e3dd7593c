use crate::dto::report_dto::DashboardStats;
use crate::error::Result;
use chrono::{DateTime, Duration, Utc};
use sqlx::{FromRow, PgPool};

/// Trend window: attempts older than this many days are excluded.
const TREND_WINDOW_DAYS: i64 = 180;

#[derive(Debug, Clone)]
pub struct MonthlyTrend {
    pub months: Vec<String>,
    pub scores: Vec<f64>,
}

#[derive(Debug, FromRow)]
struct TrendRow {
    month: DateTime<Utc>,
    avg_score: f64,
}

#[derive(Clone)]
pub struct ReportService {
    pool: PgPool,
}

impl ReportService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Dashboard counts, recomputed from the store on every call.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let total_users = self.count("SELECT COUNT(*) FROM users").await?;
        let new_users = self
            .count("SELECT COUNT(*) FROM users WHERE is_new = TRUE")
            .await?;
        let test_types = self.count("SELECT COUNT(*) FROM test_types").await?;
        let total_attempts = self.count("SELECT COUNT(*) FROM test_attempts").await?;
        let passed_attempts = self
            .count("SELECT COUNT(*) FROM test_attempts WHERE passed = TRUE")
            .await?;
        let failed_attempts = self
            .count("SELECT COUNT(*) FROM test_attempts WHERE passed = FALSE")
            .await?;

        Ok(DashboardStats {
            total_users,
            new_users,
            test_types,
            total_attempts,
            passed_attempts,
            failed_attempts,
        })
    }

    /// Mean score per calendar month (UTC truncation) over the last 180 days,
    /// ascending by month. Months without attempts produce no row; the two
    /// returned sequences are equal-length and position-aligned.
    pub async fn monthly_trend(&self) -> Result<MonthlyTrend> {
        let since = Utc::now() - Duration::days(TREND_WINDOW_DAYS);

        let rows = sqlx::query_as::<_, TrendRow>(
            r#"
            SELECT date_trunc('month', attempt_date) AS month,
                   AVG(score)::DOUBLE PRECISION AS avg_score
            FROM test_attempts
            WHERE attempt_date >= $1
            GROUP BY month
            ORDER BY month
            "#,
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        let mut months = Vec::with_capacity(rows.len());
        let mut scores = Vec::with_capacity(rows.len());
        for row in rows {
            months.push(month_label(row.month));
            scores.push(row.avg_score);
        }

        Ok(MonthlyTrend { months, scores })
    }

    async fn count(&self, query: &str) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(query).fetch_one(&self.pool).await?;
        Ok(count)
    }
}

/// Abbreviated English month name for a month-truncated timestamp.
fn month_label(month: DateTime<Utc>) -> String {
    month.format("%b").to_string()
}
