use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::engine::ChatCompletion;
use crate::prompt::ChatMessage;

/// Chat-completions client for OpenAI-compatible APIs.
///
/// Sends the conversation with a fixed model id and no sampling overrides.
/// No retries and no explicit timeout; connection handling is left to the
/// underlying client.
pub struct OpenAiClient {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(api_base: String, api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl ChatCompletion for OpenAiClient {
    #[tracing::instrument(skip(self, messages), fields(model = %self.model))]
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let url = format!("{}/chat/completions", self.api_base.trim_end_matches('/'));
        let request = CompletionRequest {
            model: self.model.clone(),
            messages,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("chat-completion request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("chat-completion API returned {status}: {body}");
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .context("failed to decode chat-completion response")?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .context("chat-completion response contained no message content")?;

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::build_messages;

    #[test]
    fn request_body_carries_model_and_messages() {
        let request = CompletionRequest {
            model: "gpt-3.5-turbo".to_string(),
            messages: build_messages("스타벅스", &["아메리카노".into()]),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["messages"].as_array().unwrap().len(), 2);
        assert_eq!(body["messages"][0]["role"], "system");
        // no sampling overrides
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn response_content_is_extracted_from_first_choice() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"식비"}}]}"#;
        let parsed: CompletionResponse = serde_json::from_str(raw).unwrap();
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap();
        assert_eq!(content, "식비");
    }
}
