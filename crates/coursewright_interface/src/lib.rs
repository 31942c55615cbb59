//! Trait definitions for the Coursewright course generation library.
//!
//! The structured generator and the course workflows only ever talk to these
//! traits. Concrete HTTP clients live in `coursewright_models`, and the
//! in-memory store lives in `coursewright_course`.

mod driver;
mod lookup;
mod store;

pub use driver::TextGenerationDriver;
pub use lookup::{ImageSearch, TranscriptFetch, VideoSearch};
pub use store::{CourseStore, SessionGate};
