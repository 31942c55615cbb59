//! In-memory course store with JSON snapshots.

use async_trait::async_trait;
use coursewright_core::{Chapter, Course, CourseOutline, Question, Unit, UnitOutline, User};
use coursewright_error::{CourseResult, StorageError, StorageErrorKind};
use coursewright_interface::CourseStore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Everything the store holds. Units, chapters and questions keep creation order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreState {
    users: HashMap<Uuid, User>,
    courses: HashMap<Uuid, Course>,
    units: Vec<Unit>,
    chapters: Vec<Chapter>,
    questions: Vec<Question>,
}

/// In-memory course store.
///
/// Stores records in maps protected by an RwLock for thread-safe access.
/// Clones share the same state. The whole state can be written to and read
/// back from a JSON snapshot file, which is how the CLI persists courses
/// between runs.
///
/// # Example
/// ```no_run
/// use coursewright_course::InMemoryCourseStore;
/// use coursewright_core::User;
///
/// #[tokio::main]
/// async fn main() {
///     let store = InMemoryCourseStore::new();
///     let user_id = store.insert_user(User::new("ada", 3)).await;
///     store.save_to("courses.json").await.expect("snapshot written");
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryCourseStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryCourseStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a user, returning its id.
    pub async fn insert_user(&self, user: User) -> Uuid {
        let id = *user.id();
        self.state.write().await.users.insert(id, user);
        id
    }

    /// Finds a user by display name.
    pub async fn find_user_by_name(&self, name: &str) -> Option<User> {
        self.state
            .read()
            .await
            .users
            .values()
            .find(|user| user.name() == name)
            .cloned()
    }

    /// Ids of every stored course.
    pub async fn course_ids(&self) -> Vec<Uuid> {
        self.state.read().await.courses.keys().copied().collect()
    }

    /// Writes the whole store to `path` as pretty JSON.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn save_to(&self, path: impl AsRef<Path>) -> CourseResult<()> {
        let json = {
            let state = self.state.read().await;
            serde_json::to_string_pretty(&*state)
                .map_err(|e| StorageError::new(StorageErrorKind::Snapshot(e.to_string())))?
        };
        tokio::fs::write(path.as_ref(), json)
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::Io(e.to_string())))?;
        debug!("Snapshot written");
        Ok(())
    }

    /// Reads a store previously written by [`save_to`](Self::save_to).
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub async fn load_from(path: impl AsRef<Path>) -> CourseResult<Self> {
        let json = tokio::fs::read_to_string(path.as_ref())
            .await
            .map_err(|e| StorageError::new(StorageErrorKind::Io(e.to_string())))?;
        let state: StoreState = serde_json::from_str(&json)
            .map_err(|e| StorageError::new(StorageErrorKind::Snapshot(e.to_string())))?;
        debug!(courses = state.courses.len(), chapters = state.chapters.len(), "Snapshot loaded");
        Ok(Self {
            state: Arc::new(RwLock::new(state)),
        })
    }

    /// Loads the snapshot at `path`, or starts empty if there is none yet.
    pub async fn open(path: impl AsRef<Path>) -> CourseResult<Self> {
        if tokio::fs::try_exists(path.as_ref()).await.unwrap_or(false) {
            Self::load_from(path).await
        } else {
            Ok(Self::new())
        }
    }
}

#[async_trait]
impl CourseStore for InMemoryCourseStore {
    async fn create_course(&self, course: Course) -> CourseResult<Uuid> {
        let id = *course.id();
        self.state.write().await.courses.insert(id, course);
        Ok(id)
    }

    async fn create_unit(&self, unit: Unit) -> CourseResult<Uuid> {
        let mut state = self.state.write().await;
        if !state.courses.contains_key(unit.course_id()) {
            return Err(StorageError::not_found("course", unit.course_id()).into());
        }
        let id = *unit.id();
        state.units.push(unit);
        Ok(id)
    }

    async fn create_chapters(&self, chapters: Vec<Chapter>) -> CourseResult<usize> {
        let mut state = self.state.write().await;
        if let Some(orphan) = chapters
            .iter()
            .find(|chapter| !state.units.iter().any(|unit| unit.id() == chapter.unit_id()))
        {
            return Err(StorageError::not_found("unit", orphan.unit_id()).into());
        }
        let count = chapters.len();
        state.chapters.extend(chapters);
        Ok(count)
    }

    async fn get_chapter(&self, chapter_id: Uuid) -> CourseResult<Chapter> {
        self.state
            .read()
            .await
            .chapters
            .iter()
            .find(|chapter| *chapter.id() == chapter_id)
            .cloned()
            .ok_or_else(|| StorageError::not_found("chapter", chapter_id).into())
    }

    async fn update_chapter(&self, chapter: Chapter) -> CourseResult<()> {
        let mut state = self.state.write().await;
        let slot = state
            .chapters
            .iter_mut()
            .find(|existing| existing.id() == chapter.id())
            .ok_or_else(|| StorageError::not_found("chapter", chapter.id()))?;
        *slot = chapter;
        Ok(())
    }

    async fn create_questions(&self, questions: Vec<Question>) -> CourseResult<usize> {
        let mut state = self.state.write().await;
        if let Some(orphan) = questions.iter().find(|question| {
            !state
                .chapters
                .iter()
                .any(|chapter| chapter.id() == question.chapter_id())
        }) {
            return Err(StorageError::not_found("chapter", orphan.chapter_id()).into());
        }
        let count = questions.len();
        state.questions.extend(questions);
        Ok(count)
    }

    async fn chapter_questions(&self, chapter_id: Uuid) -> CourseResult<Vec<Question>> {
        Ok(self
            .state
            .read()
            .await
            .questions
            .iter()
            .filter(|question| *question.chapter_id() == chapter_id)
            .cloned()
            .collect())
    }

    async fn get_course(&self, course_id: Uuid) -> CourseResult<CourseOutline> {
        let state = self.state.read().await;
        let course = state
            .courses
            .get(&course_id)
            .cloned()
            .ok_or_else(|| StorageError::not_found("course", course_id))?;

        let units = state
            .units
            .iter()
            .filter(|unit| *unit.course_id() == course_id)
            .map(|unit| UnitOutline {
                unit: unit.clone(),
                chapters: state
                    .chapters
                    .iter()
                    .filter(|chapter| chapter.unit_id() == unit.id())
                    .cloned()
                    .collect(),
            })
            .collect();

        Ok(CourseOutline { course, units })
    }

    async fn get_user(&self, user_id: Uuid) -> CourseResult<User> {
        self.state
            .read()
            .await
            .users
            .get(&user_id)
            .cloned()
            .ok_or_else(|| StorageError::not_found("user", user_id).into())
    }

    async fn decrement_credits(&self, user_id: Uuid) -> CourseResult<i64> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .get_mut(&user_id)
            .ok_or_else(|| StorageError::not_found("user", user_id))?;
        user.decrement_credits();
        Ok(*user.credits())
    }
}
