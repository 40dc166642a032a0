use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::models::{AnalysisResult, SchemaViolation};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Any fault from the analysis backend. The controller does not distinguish
/// sub-kinds; the variants exist for logging and tests.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("request to the analysis backend failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("analysis backend returned HTTP {status}: {body}")]
    Service { status: u16, body: String },
    #[error("analysis backend returned no content")]
    EmptyResponse,
    #[error("malformed analysis response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("analysis response violates the dashboard schema: {0}")]
    Schema(#[from] SchemaViolation),
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,
}

/// The seam between the controller and the external analysis capability.
/// `GeminiClient` is the production implementation; tests substitute mocks.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Turn (already row-capped) CSV text into a validated dashboard.
    async fn analyze(&self, csv_text: &str) -> Result<AnalysisResult, AnalysisError>;
}

/// Client for the Gemini `generateContent` REST endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, AnalysisError> {
        Ok(Self {
            http: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()?,
            api_key: api_key.into(),
            model: model.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        })
    }

    /// Build a client from the environment: `GEMINI_API_KEY` (required),
    /// `INSIGHT_MODEL` and `INSIGHT_API_BASE` (optional overrides).
    pub fn from_env() -> Result<Self, AnalysisError> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| AnalysisError::MissingApiKey)?;
        let model =
            std::env::var("INSIGHT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let mut client = Self::new(api_key, model)?;
        if let Ok(base) = std::env::var("INSIGHT_API_BASE") {
            client.api_base = base;
        }
        Ok(client)
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Request body: the CSV plus an instruction to answer with the dashboard
    /// JSON shape, pinned by a response schema so field names come back
    /// exactly as the renderer expects them.
    fn request_body(csv_text: &str) -> serde_json::Value {
        let prompt = format!(
            "You are a senior data analyst. Analyze the following CSV data and \
             produce a dashboard specification.\n\n\
             Provide a concise dashboard title, an executive summary (2-4 short \
             paragraphs separated by blank lines), 3-4 KPIs, 2-4 charts that \
             best tell the data's story, and 3 actionable recommendations.\n\n\
             Every chart data point must include the fields named by that \
             chart's xAxisKey and dataKey, and dataKey values must be numbers.\n\n\
             CSV DATA:\n{csv_text}"
        );
        json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
            }
        })
    }

    /// Parse a raw `generateContent` response body into a validated
    /// [`AnalysisResult`]. Split out from the HTTP call so the decoding path
    /// is testable without a network.
    pub fn extract_result(body: &str) -> Result<AnalysisResult, AnalysisError> {
        let response: GenerateContentResponse = serde_json::from_str(body)?;
        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(AnalysisError::EmptyResponse)?;
        let result: AnalysisResult = serde_json::from_str(strip_code_fence(&text))?;
        result.validate()?;
        Ok(result)
    }
}

#[async_trait]
impl Analyzer for GeminiClient {
    async fn analyze(&self, csv_text: &str) -> Result<AnalysisResult, AnalysisError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.api_base, self.model
        );
        log::debug!("requesting analysis from {} ({} bytes of CSV)", self.model, csv_text.len());
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::request_body(csv_text))
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AnalysisError::Service {
                status: status.as_u16(),
                body,
            });
        }
        Self::extract_result(&body)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

/// Models sometimes wrap JSON output in a markdown fence despite the JSON
/// response mime type. Trim it before parsing.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|t| t.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

/// Structured-output schema mirroring [`AnalysisResult`] field for field.
///
/// Data items are pinned to `{name, value}`, so `dataKey` and `xAxisKey` are
/// pinned to those names too: a response that obeys this schema must also
/// pass [`AnalysisResult::validate`].
pub fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "dashboardTitle": { "type": "STRING" },
            "summary": { "type": "STRING" },
            "kpis": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "label": { "type": "STRING" },
                        "value": { "type": "STRING" },
                        "trend": { "type": "STRING" },
                        "trendColor": {
                            "type": "STRING",
                            "enum": ["positive", "negative", "neutral"]
                        },
                        "icon": {
                            "type": "STRING",
                            "enum": ["dollar", "users", "trend", "activity"]
                        }
                    },
                    "required": ["label", "value"]
                }
            },
            "charts": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "title": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "type": {
                            "type": "STRING",
                            "enum": ["bar", "line", "pie", "area", "scatter"]
                        },
                        "dataKey": { "type": "STRING", "enum": ["value"] },
                        "xAxisKey": { "type": "STRING", "enum": ["name"] },
                        "data": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "name": { "type": "STRING" },
                                    "value": { "type": "NUMBER" }
                                },
                                "required": ["name", "value"]
                            }
                        },
                        "color": { "type": "STRING" }
                    },
                    "required": ["id", "title", "description", "type", "dataKey", "xAxisKey", "data"]
                }
            },
            "recommendations": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "required": ["dashboardTitle", "summary", "kpis", "charts", "recommendations"]
    })
}
