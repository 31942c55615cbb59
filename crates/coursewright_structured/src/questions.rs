//! Multiple-choice question sets built on the structured generator.

use crate::{GenerationRequest, GenerationSettings, OutputShape, StructuredGenerator};
use coursewright_core::QuizQuestion;
use coursewright_error::CourseResult;
use coursewright_interface::TextGenerationDriver;
use tracing::instrument;

/// Questions generated per passage.
pub const QUESTIONS_PER_SET: usize = 5;

const QUESTION_SYSTEM_PROMPT: &str = "You are a helpful AI that is able to generate mcq questions and answers, \
the length of each answer should not be more than 15 words";

/// The shape every generated question must match.
pub fn question_shape() -> OutputShape {
    OutputShape::new()
        .text("question", "question")
        .text("answer", "answer with max length of 15 words")
        .text("option1", "option1 with max length of 15 words")
        .text("option2", "option2 with max length of 15 words")
        .text("option3", "option3 with max length of 15 words")
}

/// Generates hard multiple-choice questions about a passage in one batched call.
#[derive(Debug, Clone)]
pub struct QuestionSetGenerator<D> {
    generator: StructuredGenerator<D>,
    settings: GenerationSettings,
}

impl<D: TextGenerationDriver> QuestionSetGenerator<D> {
    /// Creates a question generator with the given model settings.
    pub fn new(generator: StructuredGenerator<D>, settings: GenerationSettings) -> Self {
        Self {
            generator,
            settings,
        }
    }

    /// Builds the batched request for a passage and topic.
    pub fn request(&self, passage: &str, topic: &str) -> CourseResult<GenerationRequest> {
        let prompt = format!(
            "You are to generate a random hard mcq question about {} with context of the following transcript: {}",
            topic, passage
        );
        let request = GenerationRequest::builder()
            .system_prompt(QUESTION_SYSTEM_PROMPT)
            .user_prompt(vec![prompt; QUESTIONS_PER_SET])
            .shape(question_shape())
            .settings(&self.settings)
            .finish()?;
        Ok(request)
    }

    /// Generates [`QUESTIONS_PER_SET`] questions about `topic` grounded in `passage`.
    #[instrument(skip(self, passage), fields(passage_len = passage.len()))]
    pub async fn generate(&self, passage: &str, topic: &str) -> CourseResult<Vec<QuizQuestion>> {
        let request = self.request(passage, topic)?;
        self.generator.generate_as(&request).await
    }
}
