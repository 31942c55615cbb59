//! Course workflows for Coursewright.
//!
//! [`CourseBuilder`] turns a title and unit topics into a stored course
//! outline. [`ChapterEnricher`] fills each chapter with a video, a transcript
//! summary and a multiple-choice question set. Both talk to the outside
//! world only through the traits in `coursewright_interface`.

mod builder;
mod enricher;
mod session;
mod store;

pub use builder::{CourseBuilder, image_term_shape, unit_shape};
pub use enricher::{
    ChapterEnricher, ChapterOutcome, MAX_TRANSCRIPT_WORDS, summary_shape, to_questions,
    truncate_words,
};
pub use session::LocalSession;
pub use store::InMemoryCourseStore;
