//! OpenAI session.
//!
//! A session is a model plus an optional system prompt. Every
//! [`LlmSession::send`] is a single stateless completion request; no
//! conversation history is kept between calls.

use crate::openai::error::{OpenAiError, Result};
use crate::openai::gateway::Connection;
use crate::openai::protocol::{
    ApiErrorBody, ChatCompletionRequest, ChatCompletionResponse, Message, ResponseFormat,
};
use async_trait::async_trait;
use canvas_application::ports::llm_gateway::{GatewayError, LlmSession};
use canvas_domain::Model;
use std::sync::Arc;
use tracing::{debug, info};

pub struct OpenAiSession {
    connection: Arc<Connection>,
    model: Model,
    system_prompt: Option<String>,
}

impl OpenAiSession {
    pub(crate) fn new(
        connection: Arc<Connection>,
        model: Model,
        system_prompt: Option<String>,
    ) -> Self {
        Self {
            connection,
            model,
            system_prompt,
        }
    }

    /// Sends a prompt and returns the raw text of the first choice.
    pub async fn complete(&self, content: &str) -> Result<String> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system_prompt {
            messages.push(Message::system(system.as_str()));
        }
        messages.push(Message::user(content));

        let request = ChatCompletionRequest {
            model: self.model.as_str(),
            messages: &messages,
            temperature: self.connection.temperature,
            response_format: self
                .model
                .supports_json_mode()
                .then(ResponseFormat::json_object),
        };

        info!("Requesting completion from {}", self.model);
        debug!("Prompt is {} bytes", content.len());

        let response = self
            .connection
            .client
            .post(&self.connection.endpoint)
            .bearer_auth(self.connection.api_key.expose())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(OpenAiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        if let Some(usage) = completion.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Completion usage"
            );
        }

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or(OpenAiError::EmptyChoices)?;
        choice.message.content.ok_or_else(|| {
            OpenAiError::NoContent(choice.finish_reason.unwrap_or_else(|| "unknown".to_string()))
        })
    }
}

#[async_trait]
impl LlmSession for OpenAiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> std::result::Result<String, GatewayError> {
        self.complete(content).await.map_err(GatewayError::from)
    }
}

#[cfg(test)]
mod tests {
    use crate::openai::gateway::{ApiKey, OpenAiConfig, OpenAiGateway};
    use canvas_application::ports::llm_gateway::{GatewayError, LlmGateway};
    use canvas_domain::Model;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned HTTP response and hand back the raw request.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/v1", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|l| {
                            let (name, value) = l.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())?
                        })
                        .unwrap_or(0);
                    if request.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&request).to_string()
        });
        (base_url, handle)
    }

    fn gateway(base_url: &str) -> OpenAiGateway {
        OpenAiGateway::new(OpenAiConfig::new(base_url, ApiKey::new("sk-test").unwrap())).unwrap()
    }

    #[tokio::test]
    async fn test_send_returns_raw_reply() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"choices":[{"message":{"role":"assistant","content":"```json\n{}\n```"},"finish_reason":"stop"}]}"#,
        )
        .await;

        let session = gateway(&base_url)
            .create_session_with_system_prompt(&Model::Gpt4o, "You are terse.")
            .await
            .unwrap();
        let reply = session.send("hello").await.unwrap();
        assert_eq!(reply, "```json\n{}\n```");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /v1/chat/completions"));
        assert!(request.to_lowercase().contains("authorization: bearer sk-test"));
        assert!(request.contains("\"response_format\":{\"type\":\"json_object\"}"));
        assert!(request.contains("You are terse."));
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let (base_url, server) = serve_once(
            "401 Unauthorized",
            r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#,
        )
        .await;

        let session = gateway(&base_url).create_session(&Model::Gpt4).await.unwrap();
        let err = session.send("hello").await.unwrap_err();
        assert!(matches!(err, GatewayError::AuthenticationFailed(m) if m == "Incorrect API key provided"));

        let request = server.await.unwrap();
        assert!(!request.contains("response_format"));
    }

    #[tokio::test]
    async fn test_empty_choices() {
        let (base_url, _server) = serve_once("200 OK", r#"{"choices":[]}"#).await;
        let session = gateway(&base_url).create_session(&Model::Gpt4o).await.unwrap();
        let err = session.send("hello").await.unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }
}
