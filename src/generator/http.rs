//! HTTP adapter for the generative content provider
//!
//! Speaks the `models/{model}:generateContent` request shape.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::data::FormSpec;
use crate::generator::prompt::{build_prompt, strip_code_fences};
use crate::generator::{ContentGenerator, GeneratorError};

/// Content generator reached over HTTP
pub struct HttpContentGenerator {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

impl HttpContentGenerator {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl ContentGenerator for HttpContentGenerator {
    async fn generate_page(&self, spec: &FormSpec) -> Result<String, GeneratorError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(spec),
                }],
                role: Some("user".to_string()),
            }],
        };

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| GeneratorError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GeneratorError::Api(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::Api(e.to_string()))?;

        let text: String = body
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let html = strip_code_fences(&text);
        if html.trim().is_empty() {
            return Err(GeneratorError::EmptyResponse);
        }
        Ok(html)
    }
}
