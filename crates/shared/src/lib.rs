// Public modules
pub mod catalog;
pub mod config;
pub mod feed;
pub mod page;
pub mod pipeline;
pub mod summarizer;

// Re-export commonly used types
pub use catalog::{Topic, TOPICS};
pub use config::{Config, GeminiConfig};
pub use feed::{FeedFetcher, Headline, HeadlineSource};
pub use page::{PageContext, PageRenderer};
pub use pipeline::{FailurePolicy, Pipeline, PipelineOptions, RunReport, TopicOutcome};
pub use summarizer::{GeminiSummarizer, Summarize};
