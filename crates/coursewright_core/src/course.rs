//! Course, unit, chapter and question records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generated course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Course {
    /// Course identifier
    id: Uuid,
    /// Course title as requested by the user
    name: String,
    /// Cover image URL
    image: String,
    /// When the course was created
    created_at: DateTime<Utc>,
}

impl Course {
    /// Creates a new course with a fresh identifier.
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            image: image.into(),
            created_at: Utc::now(),
        }
    }
}

/// A unit within a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Unit {
    /// Unit identifier
    id: Uuid,
    /// Owning course
    course_id: Uuid,
    /// Unit title
    name: String,
}

impl Unit {
    /// Creates a new unit with a fresh identifier.
    pub fn new(course_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            course_id,
            name: name.into(),
        }
    }
}

/// A chapter within a unit.
///
/// `video_id` and `summary` stay empty until the chapter is enriched.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct Chapter {
    /// Chapter identifier
    #[builder(default = "Uuid::new_v4()")]
    id: Uuid,
    /// Owning unit
    unit_id: Uuid,
    /// Chapter title
    name: String,
    /// Query used to find an educational video for the chapter
    youtube_search_query: String,
    /// Selected video, once enriched
    #[builder(default)]
    video_id: Option<String>,
    /// Transcript summary, once enriched
    #[builder(default)]
    summary: Option<String>,
}

impl Chapter {
    /// Returns a builder for constructing a Chapter.
    pub fn builder() -> ChapterBuilder {
        ChapterBuilder::default()
    }

    /// Whether the chapter already carries a video and summary.
    pub fn is_enriched(&self) -> bool {
        self.video_id.is_some() && self.summary.is_some()
    }

    /// Records the enrichment results on the chapter.
    pub fn enrich(&mut self, video_id: impl Into<String>, summary: impl Into<String>) {
        self.video_id = Some(video_id.into());
        self.summary = Some(summary.into());
    }
}

/// A stored multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Question {
    /// Question identifier
    id: Uuid,
    /// Owning chapter
    chapter_id: Uuid,
    /// Question text
    question: String,
    /// Correct answer
    answer: String,
    /// All answer options (answer plus distractors), in display order
    options: Vec<String>,
}

impl Question {
    /// Creates a new question with a fresh identifier.
    pub fn new(
        chapter_id: Uuid,
        question: impl Into<String>,
        answer: impl Into<String>,
        options: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            chapter_id,
            question: question.into(),
            answer: answer.into(),
            options,
        }
    }
}

/// A unit together with its chapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitOutline {
    /// The unit record
    pub unit: Unit,
    /// Chapters in creation order
    pub chapters: Vec<Chapter>,
}

/// A course together with its units and chapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseOutline {
    /// The course record
    pub course: Course,
    /// Units in creation order
    pub units: Vec<UnitOutline>,
}

impl CourseOutline {
    /// Iterates over every chapter of the course, unit by unit.
    pub fn chapters(&self) -> impl Iterator<Item = &Chapter> {
        self.units.iter().flat_map(|unit| unit.chapters.iter())
    }
}
