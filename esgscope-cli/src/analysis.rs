//! Optional LLM summaries of comparison tables and annual reports.

use std::time::Duration;

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::report::fetch_report_text;

/// Environment variable holding the OpenAI key.
pub const OPENAI_KEY_VAR: &str = "OPENAI_API_KEY";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/";
const DEFAULT_MODEL: &str = "gpt-4";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Chat-completions client that turns a comparison table into ESG risk bullets.
pub struct Analyst {
    client: reqwest::Client,
    base: Url,
    api_key: String,
    model: String,
}

impl Analyst {
    /// Build an analyst against `base` (an OpenAI-compatible API root).
    pub fn new(base: &str, api_key: impl Into<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .context("building http client for analysis")?;
        let base = esgscope_providers::http::base_url(base)?;
        Ok(Self {
            client,
            base,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Analyst for the public API when `OPENAI_API_KEY` is set; `None` otherwise.
    pub fn from_env() -> anyhow::Result<Option<Self>> {
        match std::env::var(OPENAI_KEY_VAR) {
            Ok(key) if !key.trim().is_empty() => Ok(Some(Self::new(DEFAULT_BASE_URL, key.trim())?)),
            _ => Ok(None),
        }
    }

    /// Override the model name.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Ask for a bullet-point ESG risk summary of `comparison`.
    #[tracing::instrument(name = "esgscope_cli::analysis::summarize", skip_all, fields(model = %self.model))]
    pub async fn summarize(&self, comparison: &str) -> anyhow::Result<String> {
        self.complete(format!(
            "Analyze ESG risks across these companies and markets. \
             Return key findings as bullet points:\n\n{comparison}"
        ))
        .await
    }

    /// Download an annual report (PDF or HTML) and ask for its ESG findings.
    ///
    /// Only the first [`REPORT_CHAR_LIMIT`](crate::report::REPORT_CHAR_LIMIT)
    /// characters of the report are sent.
    #[tracing::instrument(name = "esgscope_cli::analysis::analyze_report", skip(self), fields(model = %self.model))]
    pub async fn analyze_report(&self, url: &str) -> anyhow::Result<String> {
        let text = fetch_report_text(&self.client, url).await?;
        self.complete(format!(
            "Analyze this annual report text for ESG factors. \
             Return key findings as bullet points:\n\n{text}"
        ))
        .await
    }

    async fn complete(&self, prompt: String) -> anyhow::Result<String> {
        let url = self.base.join("v1/chat/completions")?;
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };
        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("sending analysis request")?;
        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!("analysis request failed with status {status}"));
        }
        let parsed: ChatResponse = resp.json().await.context("decoding analysis response")?;
        parsed
            .choices
            .into_iter()
            .find_map(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| anyhow!("analysis response contained no text"))
    }
}
