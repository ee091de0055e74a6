//! Chat client capability surface and the formatting wrapper.
//!
//! The chat client itself is a black box: anything exposing a
//! `send_message` capability can sit behind the wrapper, which runs
//! outgoing text through the `chatforge-format` pipeline and dispatches
//! the resulting chunks in order.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod telegram;
pub mod wrapper;

pub use telegram::{TelegramClient, TelegramError};
pub use wrapper::{FormattedClient, WrapperConfig};

/// Per-message options forwarded to the underlying client.
///
/// `parse_mode` is the render-mode hint chat APIs understand; every
/// other option passes through untouched in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// The one capability every chat client must expose.
#[async_trait]
pub trait ChatClient: Send + Sync {
    type Response: Send;

    async fn send_message(
        &self,
        recipient: &str,
        text: &str,
        options: SendOptions,
    ) -> anyhow::Result<Self::Response>;
}
