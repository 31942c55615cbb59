//! Core data types for the Coursewright course generation library.
//!
//! This crate provides the chat message types shared by every text-generation
//! driver, and the course records shared by the workflows and stores.

mod course;
mod message;
mod quiz;
mod request;
mod role;
mod token_usage;
mod user;

pub use course::{Chapter, ChapterBuilder, Course, CourseOutline, Question, Unit, UnitOutline};
pub use message::{Message, MessageBuilder};
pub use quiz::{GeneratedChapter, GeneratedUnit, QuizQuestion};
pub use request::{
    GenerateRequest, GenerateRequestBuilder, GenerateResponse, GenerateResponseBuilder,
};
pub use role::Role;
pub use token_usage::TokenUsageData;
pub use user::User;
