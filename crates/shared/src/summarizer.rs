use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::GeminiConfig;

/// Turns a topic's headline titles into a short prose summary.
#[async_trait]
pub trait Summarize: Send + Sync {
    async fn summarize(&self, titles: &[String], topic_label: &str) -> Result<String>;
}

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

pub fn build_prompt(titles: &[String], topic_label: &str) -> String {
    format!(
        "다음은 오늘 대한민국 {} 주요 뉴스 제목입니다. \
         각 제목을 참고하여 오늘의 이슈를 5문장 이내로 요약해 주세요.\n{}",
        topic_label,
        titles.join("\n")
    )
}

pub struct GeminiSummarizer {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiSummarizer {
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl Summarize for GeminiSummarizer {
    async fn summarize(&self, titles: &[String], topic_label: &str) -> Result<String> {
        let api_key = self.api_key.as_deref().context(
            "GEMINI_API_KEY not found. Set it as an environment variable or create ~/.config/news-digest/.env",
        )?;

        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(titles, topic_label),
                }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read Gemini API response")?;

        if !status.is_success() {
            anyhow::bail!("Gemini API error ({}): {}", status, body);
        }

        extract_text(&body)
    }
}

fn extract_text(body: &str) -> Result<String> {
    let response: GeminiResponse =
        serde_json::from_str(body).context("Failed to parse Gemini API response")?;

    if let Some(error) = response.error {
        anyhow::bail!("Gemini API error: {}", error.message);
    }

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        anyhow::bail!("No content returned from Gemini");
    }

    Ok(text)
}
