//! Chat-ready reformatting for LLM output
//!
//! Rewrites markdown tables into bullet lists, normalizes whitespace,
//! splits long text into length-bounded chunks without corrupting HTML
//! entities or tags, and optionally renders a conservative HTML subset
//! for chat clients that support one.

pub mod chunk;
pub mod fence;
pub mod html;
pub mod normalize;
pub mod pipeline;
pub mod table;

pub use chunk::split;
pub use fence::{FenceBlock, FenceKind};
pub use pipeline::{PipelineOptions, PipelineResult, RenderMode, Style, process};
