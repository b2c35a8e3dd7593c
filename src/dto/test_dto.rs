use crate::models::question::{AnswerOption, Question};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTestTypeRequest {
    #[validate(length(min = 2, max = 64))]
    pub name: String,
    #[validate(length(min = 2, max = 64))]
    pub language: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1))]
    pub question: String,
    pub question_image: Option<String>,
    #[validate(length(min = 1))]
    pub answer_a: String,
    #[validate(length(min = 1))]
    pub answer_b: String,
    #[validate(length(min = 1))]
    pub answer_c: String,
    #[validate(length(min = 1))]
    pub answer_d: String,
    pub correct_answer: AnswerOption,
}

/// Question as shown to a test taker: the correct label is withheld.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub id: Uuid,
    pub question: String,
    pub question_image: Option<String>,
    pub answer_a: String,
    pub answer_b: String,
    pub answer_c: String,
    pub answer_d: String,
}

impl From<Question> for PublicQuestion {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            question: q.question,
            question_image: q.question_image,
            answer_a: q.answer_a,
            answer_b: q.answer_b,
            answer_c: q.answer_c,
            answer_d: q.answer_d,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitTestRequest {
    pub answers: HashMap<Uuid, AnswerOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitTestResponse {
    pub attempt_id: Uuid,
    pub percentage: f64,
    pub passed: bool,
    pub attempt_date: DateTime<Utc>,
}
