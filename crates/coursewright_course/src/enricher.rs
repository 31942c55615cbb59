//! Chapter enrichment: video, transcript summary and quiz questions.

use coursewright_core::{Question, QuizQuestion};
use coursewright_error::CourseResult;
use coursewright_interface::{CourseStore, TextGenerationDriver, TranscriptFetch, VideoSearch};
use coursewright_structured::{
    GenerationRequest, GenerationSettings, OutputShape, QuestionSetGenerator, StructuredGenerator,
};
use futures::stream::{self, StreamExt};
use rand::seq::SliceRandom;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Transcripts are cut to this many words before summarising.
pub const MAX_TRANSCRIPT_WORDS: usize = 500;

const SUMMARY_SYSTEM_PROMPT: &str = "You are an AI capable of summarising a youtube transcript";

const SUMMARY_INSTRUCTION: &str = "summarise in 250 words or less and do not talk of the sponsors or anything \
unrelated to the main topic, also do not introduce what the summary is about.\n";

#[derive(Debug, Deserialize)]
struct Summary {
    summary: String,
}

/// Keeps the first `max_words` whitespace-separated words.
pub fn truncate_words(text: &str, max_words: usize) -> String {
    text.split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shape of the transcript summary.
pub fn summary_shape() -> OutputShape {
    OutputShape::new().text("summary", "summary of the transcript")
}

/// Turns generated questions into stored ones with shuffled options.
pub fn to_questions(chapter_id: Uuid, generated: Vec<QuizQuestion>) -> Vec<Question> {
    let mut rng = rand::thread_rng();
    generated
        .into_iter()
        .map(|quiz| {
            let mut options = quiz.options();
            options.shuffle(&mut rng);
            Question::new(chapter_id, quiz.question, quiz.answer, options)
        })
        .collect()
}

/// How enriching one chapter of a course went.
#[derive(Debug)]
pub struct ChapterOutcome {
    /// The chapter
    pub chapter_id: Uuid,
    /// Success, or why it failed
    pub result: CourseResult<()>,
}

/// Attaches a video, a summary and a question set to chapters.
pub struct ChapterEnricher<D> {
    generator: StructuredGenerator<D>,
    questions: QuestionSetGenerator<D>,
    settings: GenerationSettings,
    videos: Arc<dyn VideoSearch>,
    transcripts: Arc<dyn TranscriptFetch>,
    store: Arc<dyn CourseStore>,
}

impl<D: TextGenerationDriver + Clone> ChapterEnricher<D> {
    /// Creates an enricher over the given collaborators.
    pub fn new(
        generator: StructuredGenerator<D>,
        settings: GenerationSettings,
        videos: Arc<dyn VideoSearch>,
        transcripts: Arc<dyn TranscriptFetch>,
        store: Arc<dyn CourseStore>,
    ) -> Self {
        let questions = QuestionSetGenerator::new(generator.clone(), settings.clone());
        Self {
            generator,
            questions,
            settings,
            videos,
            transcripts,
            store,
        }
    }

    /// Enriches one chapter and stores the results.
    #[instrument(skip(self))]
    pub async fn enrich_chapter(&self, chapter_id: Uuid) -> CourseResult<()> {
        let mut chapter = self.store.get_chapter(chapter_id).await?;

        let video_id = self.videos.search(chapter.youtube_search_query()).await?;
        let transcript = self.transcripts.fetch(&video_id).await?;
        let transcript = truncate_words(&transcript, MAX_TRANSCRIPT_WORDS);
        debug!(video_id = %video_id, words = transcript.split_whitespace().count(), "Fetched transcript");

        let summary = self.summarise(&transcript).await?;
        let generated = self.questions.generate(&summary, chapter.name()).await?;
        let questions = to_questions(chapter_id, generated);
        let stored = self.store.create_questions(questions).await?;

        chapter.enrich(video_id, summary);
        self.store.update_chapter(chapter).await?;
        info!(questions = stored, "Chapter enriched");
        Ok(())
    }

    /// Enriches every chapter of a course that is not enriched yet, with at
    /// most `concurrency` chapters in flight.
    #[instrument(skip(self))]
    pub async fn enrich_course(
        &self,
        course_id: Uuid,
        concurrency: usize,
    ) -> CourseResult<Vec<ChapterOutcome>> {
        let outline = self.store.get_course(course_id).await?;
        let pending: Vec<Uuid> = outline
            .chapters()
            .filter(|chapter| !chapter.is_enriched())
            .map(|chapter| *chapter.id())
            .collect();
        info!(chapters = pending.len(), concurrency, "Enriching course");

        let outcomes: Vec<ChapterOutcome> = stream::iter(pending)
            .map(|chapter_id| async move {
                let result = self.enrich_chapter(chapter_id).await;
                if let Err(e) = &result {
                    warn!(chapter_id = %chapter_id, error = %e, "Chapter enrichment failed");
                }
                ChapterOutcome { chapter_id, result }
            })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;

        Ok(outcomes)
    }

    async fn summarise(&self, transcript: &str) -> CourseResult<String> {
        let request = GenerationRequest::builder()
            .system_prompt(SUMMARY_SYSTEM_PROMPT)
            .user_prompt(format!("{}{}", SUMMARY_INSTRUCTION, transcript))
            .shape(summary_shape())
            .settings(&self.settings)
            .finish()?;
        let summary: Summary = self.generator.generate_as(&request).await?;
        Ok(summary.summary)
    }
}
