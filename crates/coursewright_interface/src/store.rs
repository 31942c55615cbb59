//! Course persistence and session traits.

use async_trait::async_trait;
use coursewright_core::{Chapter, Course, CourseOutline, Question, Unit, User};
use coursewright_error::CourseResult;
use uuid::Uuid;

/// Persistence for courses and their parts.
///
/// Each call is atomic on its own; workflows do not span transactions.
#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Stores a new course.
    async fn create_course(&self, course: Course) -> CourseResult<Uuid>;

    /// Stores a new unit under an existing course.
    async fn create_unit(&self, unit: Unit) -> CourseResult<Uuid>;

    /// Stores chapters under an existing unit, keeping their order.
    async fn create_chapters(&self, chapters: Vec<Chapter>) -> CourseResult<usize>;

    /// Loads a chapter.
    async fn get_chapter(&self, chapter_id: Uuid) -> CourseResult<Chapter>;

    /// Replaces a stored chapter with the given version.
    async fn update_chapter(&self, chapter: Chapter) -> CourseResult<()>;

    /// Stores questions for chapters.
    async fn create_questions(&self, questions: Vec<Question>) -> CourseResult<usize>;

    /// Lists the questions of a chapter in creation order.
    async fn chapter_questions(&self, chapter_id: Uuid) -> CourseResult<Vec<Question>>;

    /// Loads a course with its units and chapters.
    async fn get_course(&self, course_id: Uuid) -> CourseResult<CourseOutline>;

    /// Loads a user.
    async fn get_user(&self, user_id: Uuid) -> CourseResult<User>;

    /// Consumes one of the user's credits, returning the remaining balance.
    async fn decrement_credits(&self, user_id: Uuid) -> CourseResult<i64>;
}

/// Resolves who is making a request and what they are entitled to.
#[async_trait]
pub trait SessionGate: Send + Sync {
    /// The authenticated user, if any.
    async fn current_user(&self) -> CourseResult<Option<User>>;

    /// Whether the user holds an active subscription.
    async fn is_subscribed(&self, user: &User) -> CourseResult<bool>;
}
