use crate::models::question::{AnswerOption, Question};
use std::collections::HashMap;
use uuid::Uuid;

/// Fixed pass mark: an attempt passes at 60% or above.
pub const PASS_MARK: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreResult {
    pub percentage: f64,
    pub passed: bool,
}

pub struct ScoringService;

impl ScoringService {
    /// Scores a submission against a question set. Pure function: no I/O, no
    /// side effects.
    ///
    /// Unanswered questions and answers for unknown question ids count as
    /// incorrect. An empty question set scores 0.0 / failed rather than
    /// dividing by zero; callers that consider an empty set invalid must
    /// reject it before scoring.
    pub fn score(questions: &[Question], answers: &HashMap<Uuid, AnswerOption>) -> ScoreResult {
        if questions.is_empty() {
            return ScoreResult {
                percentage: 0.0,
                passed: false,
            };
        }

        let correct = questions
            .iter()
            .filter(|q| {
                answers
                    .get(&q.id)
                    .zip(q.correct_option())
                    .map_or(false, |(given, expected)| *given == expected)
            })
            .count();

        let percentage = (correct as f64 / questions.len() as f64) * 100.0;
        ScoreResult {
            percentage,
            passed: percentage >= PASS_MARK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn question(correct: &str) -> Question {
        Question {
            id: Uuid::new_v4(),
            test_type_id: Uuid::new_v4(),
            question: "?".to_string(),
            question_image: None,
            answer_a: "a".to_string(),
            answer_b: "b".to_string(),
            answer_c: "c".to_string(),
            answer_d: "d".to_string(),
            correct_answer: correct.to_string(),
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    fn bank(correct: &[&str]) -> Vec<Question> {
        correct.iter().map(|c| question(c)).collect()
    }

    fn submit(questions: &[Question], given: &[Option<AnswerOption>]) -> ScoreResult {
        let answers: HashMap<Uuid, AnswerOption> = questions
            .iter()
            .zip(given.iter().copied())
            .filter_map(|(q, a)| a.map(|a| (q.id, a)))
            .collect();
        ScoringService::score(questions, &answers)
    }

    #[test]
    fn four_of_five_correct_passes() {
        use AnswerOption::*;
        let questions = bank(&["A", "B", "C", "D", "A"]);
        let result = submit(
            &questions,
            &[Some(A), Some(B), Some(C), Some(D), Some(B)],
        );
        assert_eq!(result.percentage, 80.0);
        assert!(result.passed);
    }

    #[test]
    fn two_of_five_correct_fails() {
        use AnswerOption::*;
        let questions = bank(&["A", "B", "C", "D", "A"]);
        let result = submit(&questions, &[Some(A), Some(B), Some(A), Some(A), Some(B)]);
        assert_eq!(result.percentage, 40.0);
        assert!(!result.passed);
    }

    #[test]
    fn pass_mark_boundary_is_inclusive() {
        use AnswerOption::*;
        // 3/5 = exactly 60.0
        let questions = bank(&["A", "A", "A", "A", "A"]);
        let result = submit(&questions, &[Some(A), Some(A), Some(A), Some(B), Some(B)]);
        assert_eq!(result.percentage, 60.0);
        assert!(result.passed);

        // 2/5 = 40.0, below the mark
        let result = submit(&questions, &[Some(A), Some(A), Some(B), Some(B), Some(B)]);
        assert!(!result.passed);
    }

    #[test]
    fn unanswered_questions_count_as_incorrect() {
        use AnswerOption::*;
        let questions = bank(&["A", "B"]);
        let result = submit(&questions, &[Some(A), None]);
        assert_eq!(result.percentage, 50.0);
        assert!(!result.passed);
    }

    #[test]
    fn answers_for_unknown_questions_are_ignored() {
        use AnswerOption::*;
        let questions = bank(&["A"]);
        let mut answers = HashMap::new();
        answers.insert(Uuid::new_v4(), A);
        let result = ScoringService::score(&questions, &answers);
        assert_eq!(result.percentage, 0.0);
    }

    #[test]
    fn empty_question_set_scores_zero_without_fault() {
        let result = ScoringService::score(&[], &HashMap::new());
        assert_eq!(result.percentage, 0.0);
        assert!(!result.passed);
    }

    #[test]
    fn all_correct_scores_one_hundred() {
        use AnswerOption::*;
        let questions = bank(&["D", "C"]);
        let result = submit(&questions, &[Some(D), Some(C)]);
        assert_eq!(result.percentage, 100.0);
        assert!(result.passed);
    }
}
