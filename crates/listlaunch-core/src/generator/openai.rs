//! OpenAI Responses API client.
//!
//! Sends one `POST {base_url}/responses` per call with the system
//! instruction and user prompt as input messages. No retries and no timeout
//! override: the transport defaults apply.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{GenerationRequest, GeneratorError, TextGenerator};

const PROVIDER: &str = "openai";

/// Settings for the OpenAI generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// API credential. Without it no generator can be built.
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl GeneratorConfig {
    pub const DEFAULT_MODEL: &str = "gpt-5-mini-2025-08-07";
    pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

    /// Build a config from the environment.
    ///
    /// Reads `OPENAI_API_KEY`, `LISTLAUNCH_MODEL`, and `OPENAI_BASE_URL`,
    /// falling back to the defaults for the latter two.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            model: std::env::var("LISTLAUNCH_MODEL")
                .unwrap_or_else(|_| Self::DEFAULT_MODEL.to_owned()),
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_owned()),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: Self::DEFAULT_MODEL.to_owned(),
            base_url: Self::DEFAULT_BASE_URL.to_owned(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    input: [InputMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct InputMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResponsesBody {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl ResponsesBody {
    /// The aggregated output text: `output_text` when the server provides
    /// it, otherwise every `output_text` content part joined in order.
    fn into_text(self) -> String {
        if let Some(text) = self.output_text {
            return text;
        }
        self.output
            .into_iter()
            .flat_map(|item| item.content)
            .filter(|part| part.kind == "output_text")
            .filter_map(|part| part.text)
            .collect()
    }
}

/// [`TextGenerator`] backed by the OpenAI Responses API.
#[derive(Debug, Clone)]
pub struct OpenAiGenerator {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiGenerator {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    /// Build a generator from config. `None` when no API key is configured.
    pub fn from_config(config: &GeneratorConfig) -> Option<Self> {
        let api_key = config.api_key.as_deref()?;
        Some(Self::new(api_key, &config.model, &config.base_url))
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, GeneratorError> {
        let url = format!("{}/responses", self.base_url.trim_end_matches('/'));
        let body = ResponsesRequest {
            model: &self.model,
            input: [
                InputMessage {
                    role: "system",
                    content: &request.system,
                },
                InputMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
        };

        tracing::debug!(model = %self.model, %url, "sending generation request");

        let transport = |source| GeneratorError::Transport {
            provider: PROVIDER.to_string(),
            source,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Status {
                provider: PROVIDER.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ResponsesBody = response.json().await.map_err(transport)?;
        let text = parsed.into_text();
        if text.trim().is_empty() {
            return Err(GeneratorError::EmptyOutput {
                provider: PROVIDER.to_string(),
            });
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_text_prefers_output_text() {
        let body: ResponsesBody = serde_json::from_value(serde_json::json!({
            "output_text": "direct",
            "output": [{"content": [{"type": "output_text", "text": "ignored"}]}]
        }))
        .unwrap();
        assert_eq!(body.into_text(), "direct");
    }

    #[test]
    fn into_text_joins_output_parts() {
        let body: ResponsesBody = serde_json::from_value(serde_json::json!({
            "output": [
                {"type": "reasoning", "summary": []},
                {"type": "message", "content": [
                    {"type": "output_text", "text": "{\"title\":"},
                    {"type": "refusal", "refusal": "no"},
                    {"type": "output_text", "text": "\"X\"}"}
                ]}
            ]
        }))
        .unwrap();
        assert_eq!(body.into_text(), "{\"title\":\"X\"}");
    }

    #[test]
    fn from_config_requires_api_key() {
        let config = GeneratorConfig::default();
        assert!(OpenAiGenerator::from_config(&config).is_none());

        let config = GeneratorConfig {
            api_key: Some("sk-test".to_string()),
            ..GeneratorConfig::default()
        };
        let generator = OpenAiGenerator::from_config(&config).expect("key is set");
        assert_eq!(generator.model(), GeneratorConfig::DEFAULT_MODEL);
    }
}
