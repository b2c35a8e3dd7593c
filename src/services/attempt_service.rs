use crate::dto::test_dto::{SubmitTestRequest, SubmitTestResponse};
use crate::error::{Error, Result};
use crate::models::question::Question;
use crate::models::test_attempt::TestAttempt;
use crate::models::test_type::TestType;
use crate::services::scoring_service::ScoringService;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct AttemptService {
    pool: PgPool,
}

impl AttemptService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_test_type(&self, test_type_id: Uuid) -> Result<TestType> {
        let test_type = sqlx::query_as::<_, TestType>(
            r#"SELECT id, name, language, description, created_at FROM test_types WHERE id = $1"#,
        )
        .bind(test_type_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Test type {} not found", test_type_id)))?;

        Ok(test_type)
    }

    /// Loads the question bank of a test type. Ordered by creation time (then
    /// id) for reproducibility; callers must not rely on any particular order.
    pub async fn questions_for_type(&self, test_type_id: Uuid) -> Result<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, test_type_id, question, question_image,
                   answer_a, answer_b, answer_c, answer_d,
                   correct_answer, created_by, created_at
            FROM questions
            WHERE test_type_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(test_type_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    /// Persists one completed attempt as a single atomic write. The row is
    /// inserted inside an explicit transaction; on failure nothing is written
    /// and the caller keeps the computed score and may retry.
    pub async fn record_attempt(
        &self,
        user_id: Uuid,
        test_type_id: Uuid,
        percentage: f64,
        passed: bool,
    ) -> Result<TestAttempt> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            Error::Internal(format!(
                "Failed to open transaction for attempt (user {}): {}",
                user_id, e
            ))
        })?;

        let attempt = sqlx::query_as::<_, TestAttempt>(
            r#"
            INSERT INTO test_attempts (user_id, test_type_id, score, passed)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, test_type_id, score, passed, attempt_date
            "#,
        )
        .bind(user_id)
        .bind(test_type_id)
        .bind(percentage)
        .bind(passed)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to record attempt for user {} on test type {}: {:?}",
                user_id,
                test_type_id,
                e
            );
            Error::from(e)
        })?;

        tx.commit().await?;
        Ok(attempt)
    }

    /// Full submit pipeline: resolve the question bank, score the submitted
    /// answers, record the attempt. Each invocation creates a fresh attempt
    /// row; retried submissions are not deduplicated.
    pub async fn submit_test(
        &self,
        test_type_id: Uuid,
        user_id: Uuid,
        req: SubmitTestRequest,
    ) -> Result<SubmitTestResponse> {
        self.get_test_type(test_type_id).await?;

        let questions = self.questions_for_type(test_type_id).await?;
        if questions.is_empty() {
            return Err(Error::BadRequest(format!(
                "Test type {} has no questions",
                test_type_id
            )));
        }

        let result = ScoringService::score(&questions, &req.answers);
        let attempt = self
            .record_attempt(user_id, test_type_id, result.percentage, result.passed)
            .await?;

        tracing::info!(
            "User {} scored {:.1}% on test type {} ({})",
            user_id,
            result.percentage,
            test_type_id,
            if result.passed { "passed" } else { "failed" }
        );

        Ok(SubmitTestResponse {
            attempt_id: attempt.id,
            percentage: attempt.score,
            passed: attempt.passed,
            attempt_date: attempt.attempt_date,
        })
    }

    pub async fn get_attempt_by_id(&self, attempt_id: Uuid) -> Result<TestAttempt> {
        let attempt = sqlx::query_as::<_, TestAttempt>(
            r#"SELECT id, user_id, test_type_id, score, passed, attempt_date
               FROM test_attempts WHERE id = $1"#,
        )
        .bind(attempt_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(attempt)
    }
}
