//! Coursewright command-line interface.
//!
//! Courses live in a JSON snapshot file between runs. API keys are read from
//! the environment (or a `.env` file).

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use coursewright::{
    Coursewright, CoursewrightConfig, CourseStore, InMemoryCourseStore, Secrets, init_logging,
    local_session,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "coursewright")]
#[command(about = "Generate video-backed courses with quizzes")]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "coursewright.toml")]
    config: PathBuf,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a course outline from a title and unit topics
    Create {
        /// Course title
        #[arg(long)]
        title: String,

        /// Unit topic (repeat for several units)
        #[arg(long = "unit", required = true)]
        units: Vec<String>,

        /// Enrich every chapter after creating the course
        #[arg(long)]
        enrich: bool,

        /// Chapters enriched at the same time
        #[arg(long, default_value_t = 4)]
        concurrency: usize,

        /// Snapshot file holding the courses
        #[arg(long, default_value = "coursewright.json")]
        store: PathBuf,
    },
    /// Attach a video, summary and questions to one chapter
    Enrich {
        /// Snapshot file holding the courses
        #[arg(long, default_value = "coursewright.json")]
        store: PathBuf,

        /// Chapter id
        #[arg(long)]
        chapter: Uuid,
    },
    /// Print a course outline as JSON
    Show {
        /// Snapshot file holding the courses
        #[arg(long, default_value = "coursewright.json")]
        store: PathBuf,

        /// Course id
        #[arg(long)]
        course: Uuid,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.json_logs)?;

    let config = CoursewrightConfig::load_or_default(&cli.config)?;
    info!(config = %cli.config.display(), "Configuration loaded");

    match cli.command {
        Commands::Create {
            title,
            units,
            enrich,
            concurrency,
            store,
        } => create(config, &title, &units, enrich, concurrency, store).await,
        Commands::Enrich { store, chapter } => enrich_chapter(config, store, chapter).await,
        Commands::Show { store, course } => show(store, course).await,
    }
}

async fn create(
    config: CoursewrightConfig,
    title: &str,
    units: &[String],
    enrich: bool,
    concurrency: usize,
    store_path: PathBuf,
) -> Result<()> {
    let app = Coursewright::new(config, &Secrets::from_env()?)?;
    let store = InMemoryCourseStore::open(&store_path).await?;
    let session = local_session(app.config(), &store).await;

    let builder = app.course_builder(Arc::new(store.clone()), Arc::new(session));
    let course_id = match builder.create_course(title, units).await {
        Ok(id) => id,
        Err(e) => {
            error!(error = %e, "Course creation failed");
            return Err(anyhow!("error creating course"));
        }
    };
    store.save_to(&store_path).await?;

    if enrich {
        let outcomes = app
            .chapter_enricher(Arc::new(store.clone()))
            .enrich_course(course_id, concurrency)
            .await?;
        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        for outcome in outcomes.iter().filter(|o| o.result.is_err()) {
            eprintln!("error enriching chapter {}", outcome.chapter_id);
        }
        store.save_to(&store_path).await?;
        info!(chapters = outcomes.len(), failed, "Enrichment finished");
    }

    print_outline(&store, course_id).await
}

async fn enrich_chapter(config: CoursewrightConfig, store_path: PathBuf, chapter: Uuid) -> Result<()> {
    let app = Coursewright::new(config, &Secrets::from_env()?)?;
    let store = InMemoryCourseStore::load_from(&store_path).await?;

    if let Err(e) = app
        .chapter_enricher(Arc::new(store.clone()))
        .enrich_chapter(chapter)
        .await
    {
        error!(error = %e, chapter = %chapter, "Chapter enrichment failed");
        return Err(anyhow!("error enriching chapter"));
    }
    store.save_to(&store_path).await?;

    let enriched = store.get_chapter(chapter).await?;
    let questions = store.chapter_questions(chapter).await?;
    let report = serde_json::json!({ "chapter": enriched, "questions": questions });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn show(store_path: PathBuf, course: Uuid) -> Result<()> {
    let store = InMemoryCourseStore::load_from(&store_path).await?;
    print_outline(&store, course).await
}

async fn print_outline(store: &InMemoryCourseStore, course_id: Uuid) -> Result<()> {
    let outline = store.get_course(course_id).await?;
    println!("{}", serde_json::to_string_pretty(&outline)?);
    Ok(())
}
