use std::fmt;

use async_trait::async_trait;
use lens_core::{GroundedModel, GroundedResponse, GroundingChunk, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    tools: Vec<Tool>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Serialize)]
struct GoogleSearch {}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

/// Flatten the first candidate into answer text plus ordered citations.
/// A response with no candidates or no grounding metadata yields an empty
/// result, not an error.
fn parse_response(response: GenerateContentResponse) -> GroundedResponse {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return GroundedResponse::default();
    };

    let text = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default();

    let chunks = candidate
        .grounding_metadata
        .map(|meta| meta.grounding_chunks)
        .unwrap_or_default();

    GroundedResponse { text, chunks }
}

/// Client for the hosted Gemini `generateContent` endpoint with the
/// web-search grounding tool enabled.
pub struct GeminiModel {
    client: Client,
    api_key: String,
    model_name: String,
    base_url: String,
}

impl fmt::Debug for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiModel")
            .field("api_key", &"<redacted>")
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GeminiModel {
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let api_key = api_key
            .filter(|key| !key.is_empty())
            .ok_or_else(|| lens_core::Error::Inference("Gemini API key is required".to_string()))?;

        Ok(Self {
            client: Client::new(),
            api_key,
            model_name: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_model(mut self, model_name: &str) -> Self {
        self.model_name = model_name.to_string();
        self
    }
}

#[async_trait]
impl GroundedModel for GeminiModel {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn generate_grounded(&self, prompt: &str) -> Result<GroundedResponse> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            tools: vec![Tool {
                google_search: GoogleSearch {},
            }],
        };

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model_name
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<GenerateContentResponse>()
            .await?;

        Ok(parse_response(response))
    }
}
