//! Coursewright: video-backed courses with quizzes, generated from a title and
//! a list of units.
//!
//! This crate re-exports the workspace crates and adds configuration,
//! logging setup and the wiring used by the `coursewright` binary.
//!
//! - [`StructuredGenerator`] extracts shape-conformant JSON from any chat
//!   completion backend, retrying with error feedback.
//! - [`CourseBuilder`] and [`ChapterEnricher`] implement the course
//!   workflows on top of it.

mod app;
mod config;
mod observability;

pub use app::{Coursewright, Driver, local_session};
pub use config::{
    CoursewrightConfig, OPENAI_API_KEY, OpenAIConfig, Secrets, UNSPLASH_API_KEY, UnsplashConfig,
    UserConfig, YOUTUBE_API_KEY, YouTubeConfig,
};
pub use observability::init_logging;

pub use coursewright_core::*;
pub use coursewright_course::*;
pub use coursewright_error::*;
pub use coursewright_interface::*;
pub use coursewright_models::*;
pub use coursewright_structured::*;
