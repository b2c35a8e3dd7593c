use crate::dto::test_dto::{CreateQuestionRequest, CreateTestTypeRequest};
use crate::error::{Error, Result};
use crate::models::question::Question;
use crate::models::test_type::TestType;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct TestTypeService {
    pool: PgPool,
}

impl TestTypeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_test_type(&self, req: CreateTestTypeRequest) -> Result<TestType> {
        let test_type = sqlx::query_as::<_, TestType>(
            r#"
            INSERT INTO test_types (name, language, description)
            VALUES ($1, $2, $3)
            RETURNING id, name, language, description, created_at
            "#,
        )
        .bind(&req.name)
        .bind(&req.language)
        .bind(&req.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(test_type)
    }

    pub async fn list_test_types(&self) -> Result<Vec<TestType>> {
        let test_types = sqlx::query_as::<_, TestType>(
            r#"SELECT id, name, language, description, created_at
               FROM test_types ORDER BY created_at"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(test_types)
    }

    pub async fn create_question(
        &self,
        test_type_id: Uuid,
        created_by: Uuid,
        req: CreateQuestionRequest,
    ) -> Result<Question> {
        // FK would reject the insert anyway; checking first gives a 404
        // instead of a 500.
        let exists: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM test_types WHERE id = $1"#)
            .bind(test_type_id)
            .fetch_one(&self.pool)
            .await?;
        if exists == 0 {
            return Err(Error::NotFound(format!(
                "Test type {} not found",
                test_type_id
            )));
        }

        let question = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (
                test_type_id, question, question_image,
                answer_a, answer_b, answer_c, answer_d,
                correct_answer, created_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, test_type_id, question, question_image,
                      answer_a, answer_b, answer_c, answer_d,
                      correct_answer, created_by, created_at
            "#,
        )
        .bind(test_type_id)
        .bind(&req.question)
        .bind(&req.question_image)
        .bind(&req.answer_a)
        .bind(&req.answer_b)
        .bind(&req.answer_c)
        .bind(&req.answer_d)
        .bind(req.correct_answer.as_str())
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(question)
    }
}
