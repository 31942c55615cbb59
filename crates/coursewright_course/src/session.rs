//! Single-user session gate for local runs.

use async_trait::async_trait;
use coursewright_core::User;
use coursewright_error::CourseResult;
use coursewright_interface::{CourseStore, SessionGate};
use std::sync::Arc;
use uuid::Uuid;

/// A session fixed at construction: one signed-in user (or none) and a
/// subscription flag.
///
/// The user record is read from the store on every call so credit changes
/// are always visible.
#[derive(Clone)]
pub struct LocalSession {
    store: Arc<dyn CourseStore>,
    user_id: Option<Uuid>,
    subscribed: bool,
}

impl LocalSession {
    /// A session signed in as `user_id`.
    pub fn new(store: Arc<dyn CourseStore>, user_id: Uuid, subscribed: bool) -> Self {
        Self {
            store,
            user_id: Some(user_id),
            subscribed,
        }
    }

    /// A session with nobody signed in.
    pub fn anonymous(store: Arc<dyn CourseStore>) -> Self {
        Self {
            store,
            user_id: None,
            subscribed: false,
        }
    }
}

impl std::fmt::Debug for LocalSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSession")
            .field("user_id", &self.user_id)
            .field("subscribed", &self.subscribed)
            .finish()
    }
}

#[async_trait]
impl SessionGate for LocalSession {
    async fn current_user(&self) -> CourseResult<Option<User>> {
        match self.user_id {
            Some(id) => self.store.get_user(id).await.map(Some),
            None => Ok(None),
        }
    }

    async fn is_subscribed(&self, user: &User) -> CourseResult<bool> {
        Ok(self.subscribed && self.user_id == Some(*user.id()))
    }
}
