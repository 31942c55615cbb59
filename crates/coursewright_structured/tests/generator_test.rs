use async_trait::async_trait;
use coursewright_core::{GenerateRequest, GenerateResponse, QuizQuestion, Role};
use coursewright_error::{BackendError, CourseErrorKind, CourseResult, GenerationErrorKind, ShapeMismatch};
use coursewright_interface::TextGenerationDriver;
use coursewright_structured::{
    GenerationOutput, GenerationRequest, GenerationSettings, OutputShape, QuestionSetGenerator,
    StructuredGenerator,
};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock driver that replays canned responses in order and records every request.
#[derive(Default)]
struct ScriptedDriver {
    responses: Mutex<VecDeque<Result<Vec<String>, String>>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedDriver {
    fn new<I, S>(responses: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().map(|r| Ok(vec![r.into()])).collect()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Each response carries several completion choices.
    fn with_choices(responses: Vec<Vec<&str>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(
                responses
                    .into_iter()
                    .map(|choices| Ok(choices.into_iter().map(String::from).collect()))
                    .collect(),
            ),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::from([Err(message.to_string())])),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn system_prompt(&self, call: usize) -> String {
        let requests = self.requests.lock().unwrap();
        requests[call]
            .messages()
            .iter()
            .find(|m| *m.role() == Role::System)
            .map(|m| m.content().clone())
            .unwrap_or_default()
    }

    fn user_prompt(&self, call: usize) -> String {
        let requests = self.requests.lock().unwrap();
        requests[call]
            .messages()
            .iter()
            .find(|m| *m.role() == Role::User)
            .map(|m| m.content().clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerationDriver for ScriptedDriver {
    async fn generate(&self, req: &GenerateRequest) -> CourseResult<GenerateResponse> {
        self.requests.lock().unwrap().push(req.clone());
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(outputs)) => Ok(GenerateResponse::builder()
                .outputs(outputs)
                .build()
                .expect("valid response")),
            Some(Err(message)) => Err(BackendError::new(message).into()),
            None => Err(BackendError::new("script exhausted").into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

fn summary_request() -> GenerationRequest {
    GenerationRequest::builder()
        .system_prompt("You are an AI capable of summarising a youtube transcript")
        .user_prompt("summarise this")
        .shape(OutputShape::new().text("summary", "summary of the transcript"))
        .build()
        .expect("valid request")
}

fn sentiment_request(default_category: &str) -> GenerationRequest {
    GenerationRequest::builder()
        .system_prompt("Classify the review")
        .user_prompt("I loved it")
        .shape(OutputShape::new().one_of("sentiment", ["positive", "negative", "neutral"]))
        .default_category(default_category)
        .build()
        .expect("valid request")
}

#[tokio::test]
async fn test_contraction_survives_quote_repair() {
    let driver = ScriptedDriver::new([r#"{"summary": "It's a test."}"#]);
    let generator = StructuredGenerator::new(Arc::clone(&driver));

    let output = generator.generate(&summary_request()).await.expect("generation succeeds");

    assert_eq!(output, GenerationOutput::Single(json!({"summary": "It's a test."})));
    assert_eq!(driver.calls(), 1);
}

#[tokio::test]
async fn test_single_quoted_json_is_repaired() {
    let driver = ScriptedDriver::new([r#"{'summary': 'Ownership is moved.'}"#]);
    let generator = StructuredGenerator::new(Arc::clone(&driver));

    let output = generator.generate(&summary_request()).await.expect("generation succeeds");
    assert_eq!(output.into_single(), json!({"summary": "Ownership is moved."}));
}

#[tokio::test]
async fn test_classification_truncated_at_colon() {
    let driver = ScriptedDriver::new([r#"{"sentiment": "positive: confident"}"#]);
    let generator = StructuredGenerator::new(Arc::clone(&driver));

    let output = generator.generate(&sentiment_request("")).await.expect("generation succeeds");
    assert_eq!(output.into_single(), json!({"sentiment": "positive"}));
}

#[tokio::test]
async fn test_classification_falls_back_to_default() {
    let driver = ScriptedDriver::new([r#"{"sentiment": "ecstatic"}"#]);
    let generator = StructuredGenerator::new(Arc::clone(&driver));

    let output = generator
        .generate(&sentiment_request("neutral"))
        .await
        .expect("generation succeeds");
    assert_eq!(output.into_single(), json!({"sentiment": "neutral"}));
}

#[tokio::test]
async fn test_classification_without_default_keeps_value() {
    let driver = ScriptedDriver::new([r#"{"sentiment": "ecstatic"}"#]);
    let generator = StructuredGenerator::new(Arc::clone(&driver));

    let output = generator.generate(&sentiment_request("")).await.expect("generation succeeds");
    assert_eq!(output.into_single(), json!({"sentiment": "ecstatic"}));
}

#[tokio::test]
async fn test_classification_list_takes_first() {
    let driver = ScriptedDriver::new([r#"{"sentiment": ["negative", "positive"]}"#]);
    let generator = StructuredGenerator::new(Arc::clone(&driver));

    let output = generator.generate(&sentiment_request("")).await.expect("generation succeeds");
    assert_eq!(output.into_single(), json!({"sentiment": "negative"}));
    assert!(driver.system_prompt(0).contains("classify"));
}

#[tokio::test]
async fn test_batch_is_aligned_and_sent_once() {
    let driver = ScriptedDriver::new([r#"[{"title": "Borrowing"}, {"title": "Lifetimes"}]"#]);
    let generator = StructuredGenerator::new(Arc::clone(&driver));
    let request = GenerationRequest::builder()
        .system_prompt("Name the unit")
        .user_prompt(vec!["unit about borrowing", "unit about lifetimes"])
        .shape(OutputShape::new().text("title", "title of the unit"))
        .build()
        .expect("valid request");

    let output = generator.generate(&request).await.expect("generation succeeds");

    assert_eq!(
        output.into_batch(),
        vec![json!({"title": "Borrowing"}), json!({"title": "Lifetimes"})]
    );
    assert_eq!(driver.calls(), 1);
    assert_eq!(
        driver.user_prompt(0),
        r#"["unit about borrowing","unit about lifetimes"]"#
    );
    assert!(driver.system_prompt(0).contains("array of json"));
}

#[tokio::test]
async fn test_batch_length_mismatch_is_retried() {
    let driver = ScriptedDriver::new([
        r#"[{"title": "Borrowing"}]"#,
        r#"[{"title": "Borrowing"}, {"title": "Lifetimes"}]"#,
    ]);
    let generator = StructuredGenerator::new(Arc::clone(&driver));
    let request = GenerationRequest::builder()
        .system_prompt("Name the unit")
        .user_prompt(vec!["borrowing", "lifetimes"])
        .shape(OutputShape::new().text("title", "title of the unit"))
        .build()
        .expect("valid request");

    let trace = generator.generate_traced(&request).await.expect("no backend error");

    assert_eq!(trace.attempts().len(), 2);
    assert_eq!(
        trace.attempts()[0].error(),
        &Some(GenerationErrorKind::ShapeMismatch(ShapeMismatch::BatchLength {
            expected: 2,
            actual: 1
        }))
    );
    assert!(trace.outcome().is_ok());
}

#[tokio::test]
async fn test_batch_requires_array() {
    let driver = ScriptedDriver::new([r#"{"title": "Borrowing"}"#]);
    let generator = StructuredGenerator::new(Arc::clone(&driver));
    let request = GenerationRequest::builder()
        .system_prompt("Name the unit")
        .user_prompt(vec!["borrowing"])
        .shape(OutputShape::new().text("title", "title of the unit"))
        .max_retries(1usize)
        .build()
        .expect("valid request");

    let err = generator.generate(&request).await.unwrap_err();
    match err.generation_kind() {
        Some(GenerationErrorKind::ExhaustedRetries { attempts, last_error }) => {
            assert_eq!(*attempts, 1);
            assert!(last_error.contains("output not in an array"));
        }
        other => panic!("unexpected error kind: {:?}", other),
    }
}

#[tokio::test]
async fn test_garbage_exhausts_exactly_max_retries() {
    let driver = ScriptedDriver::new(["not json", "still not json", "nope", "never sent"]);
    let generator = StructuredGenerator::new(Arc::clone(&driver));

    let err = generator.generate(&summary_request()).await.unwrap_err();

    assert_eq!(driver.calls(), 3);
    assert!(matches!(
        err.generation_kind(),
        Some(GenerationErrorKind::ExhaustedRetries { attempts: 3, .. })
    ));
}

#[tokio::test]
async fn test_zero_retries_makes_no_calls() {
    let driver = ScriptedDriver::new([r#"{"summary": "unused"}"#]);
    let generator = StructuredGenerator::new(Arc::clone(&driver));
    let request = GenerationRequest::builder()
        .system_prompt("sys")
        .user_prompt("user")
        .shape(OutputShape::new().text("summary", "summary"))
        .max_retries(0usize)
        .build()
        .expect("valid request");

    let err = generator.generate(&request).await.unwrap_err();
    assert_eq!(driver.calls(), 0);
    assert!(matches!(
        err.generation_kind(),
        Some(GenerationErrorKind::ExhaustedRetries { attempts: 0, .. })
    ));
}

#[tokio::test]
async fn test_error_context_carries_previous_response() {
    let driver = ScriptedDriver::new([r#"{"title": "wrong key"}"#, r#"{"summary": "fixed"}"#]);
    let generator = StructuredGenerator::new(Arc::clone(&driver));

    let output = generator.generate(&summary_request()).await.expect("second attempt conforms");
    assert_eq!(output.into_single(), json!({"summary": "fixed"}));
    assert_eq!(driver.calls(), 2);

    let first = driver.system_prompt(0);
    let second = driver.system_prompt(1);
    assert!(!first.contains("Result:"));
    assert!(second.contains(r#"Result: {"title": "wrong key"}"#));
    assert!(second.contains("Error message: "));
    assert!(second.contains("summary not in json output"));
}

#[tokio::test]
async fn test_error_context_accumulates() {
    let driver = ScriptedDriver::new(["first failure", "second failure", r#"{"summary": "ok"}"#]);
    let generator = StructuredGenerator::new(Arc::clone(&driver));

    let trace = generator.generate_traced(&summary_request()).await.expect("no backend error");

    assert_eq!(trace.attempts().len(), 3);
    let third = driver.system_prompt(2);
    assert!(third.contains("Result: first failure"));
    assert!(third.contains("Result: second failure"));
    assert!(trace.attempts()[2].error().is_none());
}

#[tokio::test]
async fn test_backend_error_is_not_retried() {
    let driver = ScriptedDriver::failing("connection reset");
    let generator = StructuredGenerator::new(Arc::clone(&driver));

    let err = generator.generate(&summary_request()).await.unwrap_err();

    assert_eq!(driver.calls(), 1);
    assert!(matches!(err.kind(), CourseErrorKind::Backend(_)));
    assert!(err.generation_kind().is_none());
}

#[tokio::test]
async fn test_values_only_unwraps_single_value() {
    let driver = ScriptedDriver::new([r#"{"image_search_term": "rust programming"}"#]);
    let generator = StructuredGenerator::new(Arc::clone(&driver));
    let request = GenerationRequest::builder()
        .system_prompt("you are an AI capable of finding the most relevant image for a course")
        .user_prompt("a course about rust")
        .shape(OutputShape::new().text("image_search_term", "a good term for the title of the course"))
        .values_only(true)
        .build()
        .expect("valid request");

    let output = generator.generate(&request).await.expect("generation succeeds");
    assert_eq!(output.into_single(), json!("rust programming"));
}

#[tokio::test]
async fn test_values_only_keeps_shape_order() {
    let driver = ScriptedDriver::new([r#"{"answer": "4", "question": "2+2?"}"#]);
    let generator = StructuredGenerator::new(Arc::clone(&driver));
    let request = GenerationRequest::builder()
        .system_prompt("quiz")
        .user_prompt("arithmetic")
        .shape(OutputShape::new().text("question", "question").text("answer", "answer"))
        .values_only(true)
        .build()
        .expect("valid request");

    let output = generator.generate(&request).await.expect("generation succeeds");
    assert_eq!(output.into_single(), json!(["2+2?", "4"]));
}

#[tokio::test]
async fn test_placeholder_keys_are_not_required() {
    let driver = ScriptedDriver::new([r#"{"name": "Paris", "river": "the Seine"}"#]);
    let generator = StructuredGenerator::new(Arc::clone(&driver));
    let request = GenerationRequest::builder()
        .system_prompt("Describe a city")
        .user_prompt("Paris")
        .shape(
            OutputShape::new()
                .text("name", "name of the city")
                .text("<landmark>", "description of <landmark>"),
        )
        .build()
        .expect("valid request");

    let output = generator.generate(&request).await.expect("generation succeeds");
    assert_eq!(output.into_single()["river"], "the Seine");
    assert!(driver.system_prompt(0).contains("< and >"));
}

#[tokio::test]
async fn test_nested_shape_is_validated() {
    let driver = ScriptedDriver::new([
        r#"{"title": "Ownership", "meta": {"level": "expert: very"}}"#,
        r#"{"title": "Ownership", "meta": {"level": "hard: very"}}"#,
    ]);
    let generator = StructuredGenerator::new(Arc::clone(&driver));
    let request = GenerationRequest::builder()
        .system_prompt("Describe the chapter")
        .user_prompt("ownership")
        .shape(
            OutputShape::new()
                .text("title", "chapter title")
                .nested("meta", OutputShape::new().one_of("level", ["easy", "hard"])),
        )
        .build()
        .expect("valid request");

    let output = generator.generate(&request).await.expect("generation succeeds");
    assert_eq!(
        output.into_single(),
        json!({"title": "Ownership", "meta": {"level": "expert"}})
    );

    let driver = ScriptedDriver::new([r#"{"title": "Ownership", "meta": {}}"#]);
    let generator = StructuredGenerator::new(Arc::clone(&driver));
    let request = GenerationRequest::builder()
        .system_prompt("Describe the chapter")
        .user_prompt("ownership")
        .shape(
            OutputShape::new()
                .text("title", "chapter title")
                .nested("meta", OutputShape::new().one_of("level", ["easy", "hard"])),
        )
        .max_retries(1usize)
        .build()
        .expect("valid request");

    let trace = generator.generate_traced(&request).await.expect("no backend error");
    assert_eq!(
        trace.attempts()[0].error(),
        &Some(GenerationErrorKind::ShapeMismatch(ShapeMismatch::MissingKey(
            "meta.level".to_string()
        )))
    );
}

#[tokio::test]
async fn test_request_settings_reach_backend() {
    let driver = ScriptedDriver::new([r#"{"summary": "ok"}"#]);
    let generator = StructuredGenerator::new(Arc::clone(&driver));
    let request = GenerationRequest::builder()
        .system_prompt("sys")
        .user_prompt("user")
        .shape(OutputShape::new().text("summary", "summary"))
        .settings(&GenerationSettings::new("gpt-4o-mini", 0.3, 2, false))
        .build()
        .expect("valid request");

    generator.generate(&request).await.expect("generation succeeds");

    let requests = driver.requests.lock().unwrap();
    assert_eq!(requests[0].model().as_deref(), Some("gpt-4o-mini"));
    assert_eq!(*requests[0].temperature(), Some(0.3));
    assert_eq!(requests[0].messages().len(), 2);
}

#[tokio::test]
async fn test_only_first_choice_is_read() {
    let driver = ScriptedDriver::with_choices(vec![vec![
        r#"{"summary": "first"}"#,
        r#"{"summary": "second"}"#,
    ]]);
    let generator = StructuredGenerator::new(Arc::clone(&driver));

    let trace = generator.generate_traced(&summary_request()).await.expect("no backend error");

    assert_eq!(trace.attempts().len(), 1);
    assert_eq!(trace.attempts()[0].raw(), r#"{"summary": "first"}"#);
    assert_eq!(
        trace.into_outcome(),
        Ok(GenerationOutput::Single(json!({"summary": "first"})))
    );
}

#[derive(Debug, serde::Deserialize, PartialEq)]
struct Chapter {
    chapter_title: String,
    youtube_search_query: String,
}

#[derive(Debug, serde::Deserialize, PartialEq)]
struct Unit {
    title: String,
    chapters: Vec<Chapter>,
}

fn unit_request() -> GenerationRequest {
    GenerationRequest::builder()
        .system_prompt("You are an AI capable of curating course content")
        .user_prompt("It is your job to create a course about Ownership")
        .shape(
            OutputShape::new()
                .text("title", "title of the unit")
                .text("chapters", "an array of chapters"),
        )
        .build()
        .expect("valid request")
}

#[tokio::test]
async fn test_generate_as_retries_type_mismatch() {
    let driver = ScriptedDriver::new([
        r#"{"title": "Ownership", "chapters": "an array of chapters"}"#,
        r#"{"title": "Ownership", "chapters": [{"chapter_title": "Moves", "youtube_search_query": "rust move semantics"}]}"#,
    ]);
    let generator = StructuredGenerator::new(Arc::clone(&driver));

    let unit: Unit = generator.generate_as(&unit_request()).await.expect("second attempt deserializes");

    assert_eq!(unit.title, "Ownership");
    assert_eq!(unit.chapters[0].youtube_search_query, "rust move semantics");
    assert_eq!(driver.calls(), 2);
    let retry_prompt = driver.system_prompt(1);
    assert!(retry_prompt.contains(r#""chapters": "an array of chapters""#));
    assert!(retry_prompt.contains("Output does not deserialize into"));
}

#[tokio::test]
async fn test_generate_as_exhausts_on_persistent_type_mismatch() {
    let driver = ScriptedDriver::new([r#"{"summary": "ok"}"#; 3]);
    let generator = StructuredGenerator::new(Arc::clone(&driver));

    let err = generator
        .generate_as::<Vec<QuizQuestion>>(&summary_request())
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), CourseErrorKind::Generation(_)));
    match err.generation_kind() {
        Some(GenerationErrorKind::ExhaustedRetries { attempts, last_error }) => {
            assert_eq!(*attempts, 3);
            assert!(last_error.contains("Output does not deserialize into"));
        }
        other => panic!("expected exhaustion, got {:?}", other),
    }
    assert_eq!(driver.calls(), 3);
}

#[tokio::test]
async fn test_question_set_is_batched() {
    let question = json!({
        "question": "What does the borrow checker enforce?",
        "answer": "Aliasing xor mutability",
        "option1": "Garbage collection",
        "option2": "Dynamic typing",
        "option3": "Reference counting"
    });
    let response = serde_json::to_string(&vec![question; 5]).expect("serializes");
    let driver = ScriptedDriver::new([response]);
    let questions = QuestionSetGenerator::new(
        StructuredGenerator::new(Arc::clone(&driver)),
        GenerationSettings::default(),
    );

    let generated = questions
        .generate("The borrow checker prevents data races.", "Borrowing")
        .await
        .expect("questions generated");

    assert_eq!(generated.len(), 5);
    assert_eq!(generated[0].answer, "Aliasing xor mutability");
    assert_eq!(driver.calls(), 1);

    let user: Vec<String> = serde_json::from_str(&driver.user_prompt(0)).expect("batch is a JSON array");
    assert_eq!(user.len(), 5);
    assert!(user.iter().all(|p| p.contains("hard mcq question about Borrowing")));
    assert!(driver.system_prompt(0).contains("not be more than 15 words"));
}
