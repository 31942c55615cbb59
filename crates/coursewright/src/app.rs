//! Wiring of provider clients into the course workflows.

use crate::{CoursewrightConfig, Secrets};
use coursewright_core::User;
use coursewright_course::{ChapterEnricher, CourseBuilder, InMemoryCourseStore, LocalSession};
use coursewright_error::CourseResult;
use coursewright_interface::{CourseStore, SessionGate};
use coursewright_models::{OpenAICompatibleClient, UnsplashClient, YouTubeClient};
use coursewright_structured::StructuredGenerator;
use std::sync::Arc;
use tracing::{info, instrument};

/// The driver type used by the binary.
pub type Driver = Arc<OpenAICompatibleClient>;

/// Configured provider clients, ready to build workflows.
#[derive(Debug, Clone)]
pub struct Coursewright {
    config: CoursewrightConfig,
    driver: Driver,
    youtube: Arc<YouTubeClient>,
    unsplash: Arc<UnsplashClient>,
}

impl Coursewright {
    /// Builds every client from configuration and secrets.
    #[instrument(skip_all, fields(model = %config.openai().model()))]
    pub fn new(config: CoursewrightConfig, secrets: &Secrets) -> CourseResult<Self> {
        let timeout = config.openai().timeout();

        let driver = OpenAICompatibleClient::new(
            secrets.openai_api_key().clone(),
            config.openai().model().clone(),
            config.openai().base_url().clone(),
            "openai",
        )
        .with_timeout(timeout)?;

        let youtube = YouTubeClient::new(secrets.youtube_api_key().clone())
            .with_api_base(config.youtube().api_base().clone())
            .with_watch_base(config.youtube().watch_base().clone())
            .with_timeout(timeout)?;

        let unsplash = UnsplashClient::new(secrets.unsplash_api_key().clone())
            .with_api_base(config.unsplash().api_base().clone())
            .with_timeout(timeout)?;

        Ok(Self {
            config,
            driver: Arc::new(driver),
            youtube: Arc::new(youtube),
            unsplash: Arc::new(unsplash),
        })
    }

    /// The configuration the clients were built from.
    pub fn config(&self) -> &CoursewrightConfig {
        &self.config
    }

    /// A course builder writing to `store` on behalf of `session`.
    pub fn course_builder(
        &self,
        store: Arc<dyn CourseStore>,
        session: Arc<dyn SessionGate>,
    ) -> CourseBuilder<Driver> {
        CourseBuilder::new(
            StructuredGenerator::new(Arc::clone(&self.driver)),
            self.config.generation().clone(),
            self.unsplash.clone(),
            store,
            session,
        )
    }

    /// A chapter enricher writing to `store`.
    pub fn chapter_enricher(&self, store: Arc<dyn CourseStore>) -> ChapterEnricher<Driver> {
        ChapterEnricher::new(
            StructuredGenerator::new(Arc::clone(&self.driver)),
            self.config.generation().clone(),
            self.youtube.clone(),
            self.youtube.clone(),
            store,
        )
    }
}

/// Signs in as the configured user, creating it in `store` on first use.
pub async fn local_session(config: &CoursewrightConfig, store: &InMemoryCourseStore) -> LocalSession {
    let user = config.user();
    let user_id = match store.find_user_by_name(user.name()).await {
        Some(existing) => *existing.id(),
        None => {
            let id = store
                .insert_user(User::new(user.name().clone(), *user.credits()))
                .await;
            info!(user = %user.name(), credits = user.credits(), "Created local user");
            id
        }
    };
    LocalSession::new(Arc::new(store.clone()), user_id, *user.subscribed())
}
