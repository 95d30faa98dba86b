// src/models/quiz_item.rs

use serde::{Deserialize, Serialize};
use sqlx::{prelude::FromRow, types::Json};

/// Represents the 'quiz_items' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct QuizItem {
    pub id: i64,

    pub subject_id: i64,

    /// The text content of the question.
    pub question: String,

    /// Ordered answer choices (e.g., ["2", "3", "4", "5"]).
    /// Stored as a JSON array in the database.
    pub options: Json<Vec<String>>,

    /// Index of the correct choice within `options`.
    pub answer: i64,
}

/// DTO for sending a quiz item to an answering client.
/// Excludes the correct-choice index.
#[derive(Debug, Serialize)]
pub struct PublicQuizItem {
    pub id: i64,
    pub question: String,
    pub options: Json<Vec<String>>,
}

impl From<QuizItem> for PublicQuizItem {
    fn from(item: QuizItem) -> Self {
        Self {
            id: item.id,
            question: item.question,
            options: item.options,
        }
    }
}

/// Authoritative answer key for one item, fetched server-side at grading time.
#[derive(Debug, FromRow)]
pub struct AnswerKey {
    pub id: i64,
    pub answer: i64,
    /// Number of choices; used to bounds-check submitted selections.
    pub n_options: i64,
}
