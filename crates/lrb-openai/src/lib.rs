//! OpenAI adapter (chat completions).
//!
//! Implements the `lrb-core` CompletionClient port over the
//! `/chat/completions` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use lrb_core::completion::{is_supported_model, CompletionClient, CompletionError};

#[derive(Clone, Debug)]
pub struct OpenAiClient {
    api_key: String,
    api_base: String,
    http: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, api_base: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client build");
        Self {
            api_key: api_key.into(),
            api_base: api_base.into(),
            http,
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(
        &self,
        model: &str,
        prompt: &str,
    ) -> std::result::Result<String, CompletionError> {
        if !is_supported_model(model) {
            return Err(CompletionError::UnsupportedModel {
                model: model.to_string(),
            });
        }

        // A single user-role message carrying the raw prompt; no system
        // prompt, no history, no sampling overrides.
        let body = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let resp = self
            .http
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            let body = resp.text().await.unwrap_or_default();
            return Err(CompletionError::Auth(snippet(&body)));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message: snippet(&body),
            });
        }

        let parsed: ChatResponse = resp
            .json()
            .await
            .map_err(|e| CompletionError::Transport(format!("invalid response body: {e}")))?;

        let Some(choice) = parsed.choices.into_iter().next() else {
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message: "no choices in response".to_string(),
            });
        };

        Ok(choice.message.content)
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unsupported_model_is_rejected_before_any_request() {
        // Unroutable base URL: a network attempt would fail as Transport.
        let client = OpenAiClient::new("key", "http://127.0.0.1:9", Duration::from_secs(1));
        let err = client.complete("llama-3", "hello").await.unwrap_err();
        assert!(matches!(
            err,
            CompletionError::UnsupportedModel { model } if model == "llama-3"
        ));
    }

    #[test]
    fn request_body_carries_a_single_user_message() {
        let body = ChatRequest {
            model: "gpt-4",
            messages: vec![ChatMessage {
                role: "user",
                content: "hello",
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4");
        assert_eq!(json["messages"].as_array().unwrap().len(), 1);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
    }

    #[test]
    fn response_content_is_extracted_from_the_first_choice() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"hi there"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content, "hi there");
    }

    #[test]
    fn error_snippet_is_bounded() {
        let body = "x".repeat(1000);
        assert_eq!(snippet(&body).len(), 200);
    }
}
