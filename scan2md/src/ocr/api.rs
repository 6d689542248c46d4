use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::OcrConfig;
use crate::error::{AppError, Result};

use super::provider::OcrEngine;

const DEFAULT_BASE_URL: &str = "https://api.together.xyz/v1";

const CONVERSION_PROMPT: &str = "Convert the provided image into Markdown format. \
Return only the Markdown content without any explanations, introductions, or code fences. \
Preserve headings, lists, and tables.";

/// Vision-model OCR over the Together AI chat completions API.
///
/// The per-request credential goes out as a Bearer token and never appears
/// in error messages.
#[derive(Clone, Debug)]
pub struct TogetherOcrClient {
    client: Client,
    base_url: String,
    model: String,
    timeout_ms: u64,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: String,
}

impl TogetherOcrClient {
    pub fn new(config: &OcrConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AppError::Provider(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            model: config.model.clone(),
            timeout_ms: config.timeout_ms,
        })
    }

    /// The language hint is advisory only; it rides along in the prompt.
    fn prompt(language: &str) -> String {
        format!("{CONVERSION_PROMPT} The document language is likely \"{language}\".")
    }
}

#[async_trait]
impl OcrEngine for TogetherOcrClient {
    async fn recognize(&self, path: &Path, credential: &str, language: &str) -> Result<String> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::Provider(format!("failed to read image: {e}")))?;

        let mime = mime_guess::from_path(path).first_or_octet_stream();
        let data_url = format!("data:{mime};base64,{}", STANDARD.encode(&bytes));

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    ContentPart::Text {
                        text: Self::prompt(language),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: data_url },
                    },
                ],
            }],
            max_tokens: 4096,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {credential}"))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::ProviderTimeout(self.timeout_ms)
                } else {
                    // reqwest error strings carry no credential material
                    AppError::Provider(format!("request failed: {e}"))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Provider(format!(
                "API request failed: {status} - {body}"
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::Provider(format!("failed to parse response: {e}")))?;

        chat.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AppError::Provider("no choices in response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> OcrConfig {
        OcrConfig {
            api_key: None,
            base_url: None,
            model: "meta-llama/Llama-3.2-90B-Vision-Instruct-Turbo".to_string(),
            language: "eng".to_string(),
            timeout_ms: 30_000,
        }
    }

    #[test]
    fn defaults_to_together_base_url() {
        let client = TogetherOcrClient::new(&test_config()).unwrap();
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn custom_base_url_is_respected() {
        let mut config = test_config();
        config.base_url = Some("http://localhost:9999/v1".to_string());
        let client = TogetherOcrClient::new(&config).unwrap();
        assert_eq!(client.base_url, "http://localhost:9999/v1");
    }

    #[test]
    fn prompt_includes_language_hint() {
        let prompt = TogetherOcrClient::prompt("fra");
        assert!(prompt.contains("Markdown"));
        assert!(prompt.contains("\"fra\""));
    }

    #[test]
    fn chat_request_serializes_vision_payload() {
        let request = ChatRequest {
            model: "m".to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    ContentPart::Text {
                        text: "hi".to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: "data:image/png;base64,AA==".to_string(),
                        },
                    },
                ],
            }],
            max_tokens: 4096,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["content"][0]["type"], "text");
        assert_eq!(json["messages"][0]["content"][1]["type"], "image_url");
        assert_eq!(
            json["messages"][0]["content"][1]["image_url"]["url"],
            "data:image/png;base64,AA=="
        );
    }
}
