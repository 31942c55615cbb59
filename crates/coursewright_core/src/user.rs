//! User records.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated user with a course-creation credit balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct User {
    /// User identifier
    id: Uuid,
    /// Display name
    name: String,
    /// Remaining course-creation credits
    credits: i64,
}

impl User {
    /// Creates a new user with a fresh identifier.
    pub fn new(name: impl Into<String>, credits: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            credits,
        }
    }

    /// Consumes one credit.
    pub fn decrement_credits(&mut self) {
        self.credits -= 1;
    }
}
