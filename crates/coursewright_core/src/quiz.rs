//! Generated quiz questions and course outlines as returned by the model.

use serde::{Deserialize, Serialize};

/// One multiple-choice question as generated, before it is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Question text
    pub question: String,
    /// Correct answer
    pub answer: String,
    /// First distractor
    pub option1: String,
    /// Second distractor
    pub option2: String,
    /// Third distractor
    pub option3: String,
}

impl QuizQuestion {
    /// The correct answer followed by the three distractors.
    pub fn options(&self) -> Vec<String> {
        vec![
            self.answer.clone(),
            self.option1.clone(),
            self.option2.clone(),
            self.option3.clone(),
        ]
    }
}

/// A chapter proposed by the model for a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedChapter {
    /// Search query for an educational video
    pub youtube_search_query: String,
    /// Chapter title
    pub chapter_title: String,
}

/// A unit proposed by the model, with its chapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedUnit {
    /// Unit title
    pub title: String,
    /// Proposed chapters
    pub chapters: Vec<GeneratedChapter>,
}
