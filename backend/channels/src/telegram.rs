//! Telegram Bot API binding.
//!
//! Outbound-only `sendMessage` client used as the stock `ChatClient`
//! implementation behind the formatting wrapper. Inbound updates,
//! retries, and backoff are deliberately out of scope; the wrapper
//! propagates whatever this client returns.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::{ChatClient, SendOptions};

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

/// Errors surfaced by the Telegram binding.
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("telegram request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("telegram API rejected the call: {0}")]
    Api(String),
}

// ---------------------------------------------------------------------------
// Wire types (minimal subset)
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SendMessageBody<'a> {
    chat_id: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'a str>,
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    ok: bool,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    description: Option<String>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct TelegramClient {
    http: Client,
    base_url: String,
    token: String,
}

impl TelegramClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            token: token.into(),
        }
    }

    /// Point the client at a different API host (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.base_url.trim_end_matches('/'),
            self.token,
            method
        )
    }

    async fn call<B: Serialize>(&self, method: &str, body: &B) -> Result<Value, TelegramError> {
        let response = self
            .http
            .post(self.method_url(method))
            .json(body)
            .send()
            .await?;
        let envelope: ApiEnvelope = response.json().await?;
        if !envelope.ok {
            return Err(TelegramError::Api(
                envelope
                    .description
                    .unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        Ok(envelope.result.unwrap_or(Value::Null))
    }
}

#[async_trait]
impl ChatClient for TelegramClient {
    type Response = Value;

    async fn send_message(
        &self,
        recipient: &str,
        text: &str,
        options: SendOptions,
    ) -> anyhow::Result<Value> {
        let body = SendMessageBody {
            chat_id: recipient,
            text,
            parse_mode: options.parse_mode.as_deref(),
            extra: &options.extra,
        };
        debug!(recipient, chars = text.chars().count(), "Sending Telegram message");
        Ok(self.call("sendMessage", &body).await?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn send_body_serializes_options_and_extras() {
        let mut extra = Map::new();
        extra.insert("disableNotification".to_string(), json!(true));
        let body = SendMessageBody {
            chat_id: "42",
            text: "hello",
            parse_mode: Some("HTML"),
            extra: &extra,
        };
        let value = serde_json::to_value(&body).expect("serializes");
        assert_eq!(
            value,
            json!({
                "chat_id": "42",
                "text": "hello",
                "parse_mode": "HTML",
                "disableNotification": true,
            })
        );
    }

    #[test]
    fn send_body_omits_unset_parse_mode() {
        let extra = Map::new();
        let body = SendMessageBody {
            chat_id: "42",
            text: "hello",
            parse_mode: None,
            extra: &extra,
        };
        let value = serde_json::to_value(&body).expect("serializes");
        assert!(value.get("parse_mode").is_none());
    }

    #[test]
    fn envelope_decodes_success_and_failure() {
        let ok: ApiEnvelope =
            serde_json::from_value(json!({"ok": true, "result": {"message_id": 7}}))
                .expect("decodes");
        assert!(ok.ok);
        assert_eq!(ok.result.expect("result")["message_id"], 7);

        let err: ApiEnvelope =
            serde_json::from_value(json!({"ok": false, "description": "chat not found"}))
                .expect("decodes");
        assert!(!err.ok);
        assert_eq!(err.description.as_deref(), Some("chat not found"));
    }

    #[test]
    fn method_url_embeds_token_and_method() {
        let client = TelegramClient::new("TOKEN").with_base_url("https://example.test/");
        assert_eq!(
            client.method_url("sendMessage"),
            "https://example.test/botTOKEN/sendMessage"
        );
    }
}
