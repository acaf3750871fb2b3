use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::catalog::{Topic, TOPICS};
use crate::feed::HeadlineSource;
use crate::page::{PageContext, PageRenderer};
use crate::summarizer::Summarize;

/// What to do when a topic fails after its feed was fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop the whole run at the first failure
    #[default]
    FailFast,
    /// Record the failure and move on to the next topic
    Continue,
}

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub output_dir: PathBuf,
    /// Shown on every page, e.g. "2026-10-16"
    pub date: String,
    pub failure_policy: FailurePolicy,
    /// Restrict the run to these topic ids. Empty means the whole catalog.
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicOutcome {
    Written(PathBuf),
    Skipped,
    Failed(String),
}

#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<(&'static str, TopicOutcome)>,
}

impl RunReport {
    pub fn written(&self) -> usize {
        self.count(|o| matches!(o, TopicOutcome::Written(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, TopicOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, TopicOutcome::Failed(_)))
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    fn count(&self, pred: impl Fn(&TopicOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

pub struct Pipeline<S, M> {
    source: S,
    summarizer: M,
    options: PipelineOptions,
}

impl<S: HeadlineSource, M: Summarize> Pipeline<S, M> {
    pub fn new(source: S, summarizer: M, options: PipelineOptions) -> Self {
        Self {
            source,
            summarizer,
            options,
        }
    }

    fn selected_topics(&self) -> Vec<&'static Topic> {
        let wanted = &self.options.topics;
        TOPICS
            .iter()
            .filter(|t| wanted.is_empty() || wanted.iter().any(|id| id == t.id))
            .collect()
    }

    pub async fn run(&self) -> Result<RunReport> {
        let mut report = RunReport::default();

        for topic in self.selected_topics() {
            let outcome = match self.process_topic(topic).await {
                Ok(outcome) => outcome,
                Err(e) => match self.options.failure_policy {
                    FailurePolicy::FailFast => return Err(e),
                    FailurePolicy::Continue => {
                        tracing::error!(
                            topic = topic.id,
                            label = topic.label,
                            error = %format!("{:#}", e),
                            "topic failed"
                        );
                        TopicOutcome::Failed(format!("{:#}", e))
                    }
                },
            };
            report.outcomes.push((topic.id, outcome));
        }

        tracing::info!(
            written = report.written(),
            skipped = report.skipped(),
            failed = report.failed(),
            "모든 주제 처리 완료"
        );
        Ok(report)
    }

    async fn process_topic(&self, topic: &'static Topic) -> Result<TopicOutcome> {
        tracing::info!(topic = topic.id, label = topic.label, "뉴스 수집 중");
        let headlines = self.source.fetch_headlines(topic.feed_url).await;
        if headlines.is_empty() {
            tracing::warn!(
                topic = topic.id,
                label = topic.label,
                "뉴스 없음 또는 수집 실패, 건너뜀"
            );
            return Ok(TopicOutcome::Skipped);
        }

        let titles: Vec<String> = headlines.iter().map(|h| h.title.clone()).collect();
        tracing::info!(
            topic = topic.id,
            label = topic.label,
            count = titles.len(),
            "Gemini 요약 중"
        );
        let summary = self
            .summarizer
            .summarize(&titles, topic.label)
            .await
            .with_context(|| format!("Failed to summarize topic '{}'", topic.id))?;

        tracing::info!(topic = topic.id, label = topic.label, "HTML 저장 중");
        let html = PageRenderer::render(&PageContext {
            topic,
            date: &self.options.date,
            headlines: &headlines,
            summary: &summary,
        });
        let path = PageRenderer::save(&html, &self.options.output_dir, topic)
            .with_context(|| format!("Failed to save page for topic '{}'", topic.id))?;

        tracing::info!(
            topic = topic.id,
            label = topic.label,
            path = %path.display(),
            "저장 완료"
        );
        Ok(TopicOutcome::Written(path))
    }
}
