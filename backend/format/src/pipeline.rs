//! Pipeline orchestrator: fence guard → table rewriting → whitespace
//! normalization → fence restore → chunking → optional HTML render.

use serde::{Deserialize, Serialize};

use crate::{chunk, fence, html, normalize};

/// Output style of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Style {
    #[default]
    #[serde(rename = "plainStyle")]
    Plain,
    #[serde(rename = "htmlStyle")]
    Html,
}

/// Display hint the receiving chat client needs for the chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderMode {
    #[serde(rename = "HTML")]
    Html,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PipelineOptions {
    pub style: Style,
    /// Maximum chunk length in characters (soft; see the chunker).
    pub max_chunk_length: usize,
    /// When false, chunking is disabled and the processed text comes
    /// back as exactly one chunk regardless of length.
    pub split: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            style: Style::Plain,
            max_chunk_length: 4096,
            split: true,
        }
    }
}

/// Ordered chunks plus the render mode to pass along to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    pub chunks: Vec<String>,
    pub render_mode: Option<RenderMode>,
}

/// Run the full transformation pipeline over `text`.
///
/// Every stage is a pure function of its input; the pipeline holds no
/// state and is safe to call concurrently from any number of call
/// sites.
pub fn process(text: &str, options: &PipelineOptions) -> PipelineResult {
    let (guarded, blocks) = fence::extract(text);
    let normalized = normalize::normalize(&guarded);
    let restored = fence::restore(&normalized, &blocks, false);

    let chunks = if options.split {
        chunk::split(&restored, options.max_chunk_length)
    } else {
        vec![restored]
    };

    match options.style {
        Style::Plain => PipelineResult {
            chunks,
            render_mode: None,
        },
        Style::Html => PipelineResult {
            chunks: chunks.iter().map(|chunk| html::render(chunk)).collect(),
            render_mode: Some(RenderMode::Html),
        },
    }
}
