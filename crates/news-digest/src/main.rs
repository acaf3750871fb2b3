use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use shared::{
    catalog, Config, FailurePolicy, FeedFetcher, GeminiSummarizer, Pipeline, PipelineOptions,
    TopicOutcome, TOPICS,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "news-digest")]
#[command(about = "Summarize Yonhap News headlines per topic with Gemini and render static pages")]
struct Args {
    /// Directory the latest_<topic>.html pages are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Only process this topic (repeatable)
    #[arg(short, long = "topic", value_name = "ID")]
    topics: Vec<String>,

    /// Keep processing remaining topics after a topic fails
    #[arg(long)]
    keep_going: bool,

    /// Gemini model to use (overrides GEMINI_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Print the topic catalog and exit
    #[arg(long)]
    list_topics: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.list_topics {
        for topic in TOPICS {
            println!("{:<14} {:<8} {}", topic.id, topic.label, topic.feed_url);
        }
        return Ok(());
    }

    if let Some(unknown) = args.topics.iter().find(|id| catalog::find(id).is_none()) {
        anyhow::bail!(
            "Unknown topic: {}. Run with --list-topics to see valid ids",
            unknown
        );
    }

    init_tracing();

    let mut config = Config::from_env()?;
    if let Some(model) = args.model {
        config.gemini.model = model;
    }
    if config.gemini.api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set; summarization will fail");
    }

    let fetcher = FeedFetcher::new()?;
    let summarizer = GeminiSummarizer::new(&config.gemini)?;
    tracing::info!(model = summarizer.model(), "summarizer ready");

    let options = PipelineOptions {
        output_dir: args.output_dir,
        date: Local::now().format("%Y-%m-%d").to_string(),
        failure_policy: if args.keep_going {
            FailurePolicy::Continue
        } else {
            FailurePolicy::FailFast
        },
        topics: args.topics,
    };

    let report = Pipeline::new(fetcher, summarizer, options)
        .run()
        .await
        .context("News digest run aborted")?;

    for (id, outcome) in &report.outcomes {
        match outcome {
            TopicOutcome::Written(path) => println!("✓ {:<14} {}", id, path.display()),
            TopicOutcome::Skipped => println!("- {:<14} skipped (no headlines)", id),
            TopicOutcome::Failed(reason) => println!("✗ {:<14} {}", id, reason),
        }
    }
    println!(
        "\n{} written, {} skipped, {} failed",
        report.written(),
        report.skipped(),
        report.failed()
    );

    if report.has_failures() {
        anyhow::bail!("{} topic(s) failed", report.failed());
    }

    Ok(())
}
