//! Course creation: outline generation, cover image and persistence.

use coursewright_core::{Chapter, Course, GeneratedUnit, Unit};
use coursewright_error::{
    AccessError, AccessErrorKind, BackendError, CourseResult, ValidationError,
};
use coursewright_interface::{CourseStore, ImageSearch, SessionGate, TextGenerationDriver};
use coursewright_structured::{
    GenerationRequest, GenerationSettings, OutputShape, StructuredGenerator,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

const CURATOR_SYSTEM_PROMPT: &str = "You are an AI capable of curating course content, coming up with relevant chapter titles, \
and finding relevant youtube videos for each chapter";

const IMAGE_SYSTEM_PROMPT: &str = "you are an AI capable of finding the most relevant image for a course";

/// Shape of one generated unit.
pub fn unit_shape() -> OutputShape {
    OutputShape::new()
        .text("title", "title of the unit")
        .text(
            "chapters",
            "an array of chapters, each chapter should have a youtube_search_query and a chapter_title key in the JSON object",
        )
}

/// Shape of the cover image search term.
pub fn image_term_shape() -> OutputShape {
    OutputShape::new().text("image_search_term", "a good term for the title of the course")
}

/// Creates courses from a title and a list of unit topics.
pub struct CourseBuilder<D> {
    generator: StructuredGenerator<D>,
    settings: GenerationSettings,
    images: Arc<dyn ImageSearch>,
    store: Arc<dyn CourseStore>,
    session: Arc<dyn SessionGate>,
}

impl<D: TextGenerationDriver> CourseBuilder<D> {
    /// Creates a course builder over the given collaborators.
    pub fn new(
        generator: StructuredGenerator<D>,
        settings: GenerationSettings,
        images: Arc<dyn ImageSearch>,
        store: Arc<dyn CourseStore>,
        session: Arc<dyn SessionGate>,
    ) -> Self {
        Self {
            generator,
            settings,
            images,
            store,
            session,
        }
    }

    /// Generates, stores and returns the id of a new course.
    ///
    /// The signed-in user must have credits left or a subscription. One
    /// credit is consumed on success.
    #[instrument(skip(self, units), fields(units = units.len()))]
    pub async fn create_course(&self, title: &str, units: &[String]) -> CourseResult<Uuid> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::new("Course title must not be empty").into());
        }
        if units.is_empty() || units.iter().any(|unit| unit.trim().is_empty()) {
            return Err(ValidationError::new("At least one non-empty unit is required").into());
        }

        let user = self
            .session
            .current_user()
            .await?
            .ok_or_else(|| AccessError::new(AccessErrorKind::Unauthorized))?;
        let subscribed = self.session.is_subscribed(&user).await?;
        if *user.credits() <= 0 && !subscribed {
            return Err(AccessError::new(AccessErrorKind::NoCredits).into());
        }
        debug!(user = %user.id(), credits = user.credits(), subscribed, "Access granted");

        let outline = self.generate_units(title, units).await?;
        info!(units = outline.len(), "Generated course outline");

        let term = self.generate_image_term(title).await?;
        let image = self.images.search(&term).await?;
        debug!(term = %term, image = %image, "Found cover image");

        let course_id = self.store.create_course(Course::new(title, image)).await?;
        for generated in outline {
            let unit_id = self
                .store
                .create_unit(Unit::new(course_id, generated.title))
                .await?;
            let chapters = generated
                .chapters
                .into_iter()
                .map(|chapter| {
                    Chapter::builder()
                        .unit_id(unit_id)
                        .name(chapter.chapter_title)
                        .youtube_search_query(chapter.youtube_search_query)
                        .build()
                        .map_err(|e| BackendError::new(format!("Invalid generated chapter: {}", e)))
                })
                .collect::<Result<Vec<_>, _>>()?;
            self.store.create_chapters(chapters).await?;
        }

        let remaining = self.store.decrement_credits(*user.id()).await?;
        info!(course_id = %course_id, remaining_credits = remaining, "Course created");
        Ok(course_id)
    }

    async fn generate_units(&self, title: &str, units: &[String]) -> CourseResult<Vec<GeneratedUnit>> {
        let prompts: Vec<String> = units
            .iter()
            .map(|unit| {
                format!(
                    "It is your job to create a course about {}. The user has requested to create chapters for unit {}. \
                     Then, for each chapter, provide a detailed youtube search query that can be used to find an informative \
                     educational video for each chapter. Each query should give an educational informative course in youtube.",
                    title, unit
                )
            })
            .collect();

        let request = GenerationRequest::builder()
            .system_prompt(CURATOR_SYSTEM_PROMPT)
            .user_prompt(prompts)
            .shape(unit_shape())
            .settings(&self.settings)
            .finish()?;
        self.generator.generate_as(&request).await
    }

    async fn generate_image_term(&self, title: &str) -> CourseResult<String> {
        let request = GenerationRequest::builder()
            .system_prompt(IMAGE_SYSTEM_PROMPT)
            .user_prompt(format!(
                "Please provide a good image search term for the title of a course about {}. \
                 This search term will be fed into the unsplash API, so make sure it is a good search term \
                 that will return good results",
                title
            ))
            .shape(image_term_shape())
            .values_only(true)
            .settings(&self.settings)
            .finish()?;
        self.generator.generate_as(&request).await
    }
}
