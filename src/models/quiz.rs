// src/models/quiz.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single response: one selected option, or several for multi-select questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Single(String),
    Multiple(Vec<String>),
}

/// Raw quiz responses keyed by question id ("1" to "7").
pub type Answers = BTreeMap<String, Answer>;

/// One entry of the server-held answer key.
#[derive(Debug, Clone, Copy)]
pub struct KeyedQuestion {
    pub id: u32,
    /// Correct option for scored questions, `None` for survey questions.
    pub correct: Option<&'static str>,
}

/// Number of questions shown to the participant, used as the score denominator.
pub const TOTAL_QUESTIONS: usize = 7;

pub const ANSWER_KEY: [KeyedQuestion; TOTAL_QUESTIONS] = [
    KeyedQuestion { id: 1, correct: Some("Aptar VP6 Pump") },
    KeyedQuestion { id: 2, correct: Some("30.5 µm") },
    KeyedQuestion { id: 3, correct: Some("Neotame") },
    KeyedQuestion { id: 4, correct: Some("45°") },
    KeyedQuestion { id: 5, correct: Some("Fluticasone Furoate (FF)") },
    // Survey questions
    KeyedQuestion { id: 6, correct: None },
    KeyedQuestion { id: 7, correct: None },
];

/// Counts single-answer questions whose response exactly equals the correct option.
/// Survey questions and multi-select responses never score.
pub fn score_answers(answers: &Answers) -> i64 {
    ANSWER_KEY
        .iter()
        .filter_map(|q| q.correct.map(|correct| (q.id, correct)))
        .filter(|(id, correct)| {
            matches!(answers.get(&id.to_string()), Some(Answer::Single(given)) if given == correct)
        })
        .count() as i64
}
