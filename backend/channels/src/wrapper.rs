//! Formatting wrapper around an arbitrary chat client.
//!
//! `FormattedClient` owns the underlying client and reformats every
//! outgoing message through the pipeline before dispatch. Everything
//! the inner client exposes beyond `send_message` stays reachable
//! through `Deref`, with the same arguments and the same binding.

use std::ops::Deref;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use chatforge_format::{PipelineOptions, RenderMode, Style, process};

use crate::{ChatClient, SendOptions};

/// Wrapper behavior knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WrapperConfig {
    pub style: Style,
    /// Maximum chunk length in characters.
    pub max_chunk_length: usize,
    /// When false, messages go out as a single chunk regardless of length.
    pub split: bool,
    /// Pause between successive chunk sends, for client rate limits.
    pub chunk_delay_ms: u64,
    /// When false, the pipeline is bypassed entirely and the original
    /// text goes out in exactly one call.
    pub enabled: bool,
}

impl Default for WrapperConfig {
    fn default() -> Self {
        Self {
            style: Style::Plain,
            max_chunk_length: 4096,
            split: true,
            chunk_delay_ms: 300,
            enabled: true,
        }
    }
}

/// A chat client whose outgoing messages are reformatted for display.
pub struct FormattedClient<C: ChatClient> {
    inner: C,
    config: WrapperConfig,
}

impl<C: ChatClient> FormattedClient<C> {
    pub fn new(inner: C, config: WrapperConfig) -> Self {
        Self { inner, config }
    }

    pub fn config(&self) -> &WrapperConfig {
        &self.config
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    /// Reformat `text` and send the resulting chunks strictly in order,
    /// one at a time, returning the underlying responses in the same
    /// order.
    ///
    /// Failures from the inner client propagate as-is; chunks already
    /// sent stay sent. Retry is the client's business, not ours.
    pub async fn send_message(
        &self,
        recipient: &str,
        text: &str,
        options: SendOptions,
    ) -> anyhow::Result<Vec<C::Response>> {
        if !self.config.enabled {
            let response = self.inner.send_message(recipient, text, options).await?;
            return Ok(vec![response]);
        }

        let result = process(text, &PipelineOptions {
            style: self.config.style,
            max_chunk_length: self.config.max_chunk_length,
            split: self.config.split,
        });
        debug!(
            recipient,
            chunks = result.chunks.len(),
            delay_ms = self.config.chunk_delay_ms,
            "Dispatching formatted message"
        );

        let mut responses = Vec::with_capacity(result.chunks.len());
        for (index, chunk) in result.chunks.iter().enumerate() {
            if index > 0 && self.config.chunk_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.config.chunk_delay_ms)).await;
            }
            let mut chunk_options = options.clone();
            // Inject the render-mode hint unless the caller set one.
            if result.render_mode == Some(RenderMode::Html)
                && chunk_options.parse_mode.is_none()
            {
                chunk_options.parse_mode = Some("HTML".to_string());
            }
            responses.push(
                self.inner
                    .send_message(recipient, chunk, chunk_options)
                    .await?,
            );
        }
        Ok(responses)
    }
}

impl<C: ChatClient> Deref for FormattedClient<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.inner
    }
}
