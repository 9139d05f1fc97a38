//! Quiz model and answer scoring.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::Quality;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuizScore {
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
}

impl QuizScore {
    /// Quality implied by the score, for callers that don't supply one
    pub fn quality(&self) -> Quality {
        Quality::from_score_percentage(self.percentage)
    }
}

/// Score submitted answers, keyed by question index ("0", "1", ...).
///
/// An answer counts only on an exact match with the question's correct answer.
pub fn score_answers(questions: &[QuizQuestion], answers: &HashMap<String, String>) -> QuizScore {
    let score = questions
        .iter()
        .enumerate()
        .filter(|(i, q)| answers.get(&i.to_string()) == Some(&q.correct_answer))
        .count();
    let total = questions.len();
    let percentage = if total > 0 {
        score as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    QuizScore {
        score,
        total,
        percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str, correct: &str) -> QuizQuestion {
        QuizQuestion {
            question: text.to_string(),
            options: vec![correct.to_string(), "wrong".to_string()],
            correct_answer: correct.to_string(),
            explanation: String::new(),
        }
    }

    fn answers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_all_correct() {
        let qs = vec![question("a?", "A"), question("b?", "B")];
        let score = score_answers(&qs, &answers(&[("0", "A"), ("1", "B")]));
        assert_eq!(score.score, 2);
        assert_eq!(score.total, 2);
        assert!((score.percentage - 100.0).abs() < f64::EPSILON);
        assert_eq!(score.quality(), Quality::MAX);
    }

    #[test]
    fn test_partial_and_missing_answers() {
        let qs = vec![
            question("a?", "A"),
            question("b?", "B"),
            question("c?", "C"),
            question("d?", "D"),
            question("e?", "E"),
        ];
        // "2" is wrong, "3" and "4" missing
        let score = score_answers(&qs, &answers(&[("0", "A"), ("1", "B"), ("2", "X")]));
        assert_eq!(score.score, 2);
        assert!((score.percentage - 40.0).abs() < 1e-9);
        assert_eq!(score.quality().value(), 2);
    }

    #[test]
    fn test_answers_are_case_sensitive() {
        let qs = vec![question("a?", "Mitochondria")];
        let score = score_answers(&qs, &answers(&[("0", "mitochondria")]));
        assert_eq!(score.score, 0);
        assert_eq!(score.quality(), Quality::MIN);
    }

    #[test]
    fn test_empty_quiz() {
        let score = score_answers(&[], &HashMap::new());
        assert_eq!(score.total, 0);
        assert_eq!(score.percentage, 0.0);
    }

    #[test]
    fn test_question_deserializes_without_explanation() {
        let json = r#"{"question":"q","options":["x","y"],"correct_answer":"x"}"#;
        let q: QuizQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(q.correct_answer, "x");
        assert!(q.explanation.is_empty());
    }
}
