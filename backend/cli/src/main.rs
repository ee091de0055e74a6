mod config;

use std::io::{IsTerminal, Read};

use anyhow::Result;
use clap::Parser;

use chatforge_format::{PipelineOptions, Style, process};

use config::Config;

/// Divider printed between chunks in plain output mode.
const CHUNK_DIVIDER: &str = "----------";

#[derive(Parser)]
#[command(name = "chatforge")]
#[command(about = "ChatForge — chat-ready reformatting for agent output")]
#[command(version)]
struct Cli {
    /// Text to reformat; falls back to stdin when piped
    #[arg(long)]
    text: Option<String>,

    /// Render the restricted HTML subset instead of plain text
    #[arg(long)]
    html: bool,

    /// Emit the result as JSON ({"chunks": [...], "renderMode": ...})
    #[arg(long)]
    json: bool,

    /// Maximum chunk length in characters
    #[arg(long)]
    max_length: Option<usize>,
}

fn main() -> Result<()> {
    let config = Config::from_env();

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let cli = Cli::parse();

    let text = match cli.text {
        Some(text) => text,
        None => read_piped_stdin()?,
    };

    let options = PipelineOptions {
        style: if cli.html { Style::Html } else { Style::Plain },
        max_chunk_length: cli.max_length.unwrap_or(config.max_chunk_length),
        split: true,
    };
    let result = process(&text, &options);

    // Empty result: print nothing, exit 0.
    if result.chunks.is_empty() {
        return Ok(());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.chunks.join(&format!("\n{CHUNK_DIVIDER}\n")));
    }
    Ok(())
}

/// Read stdin only when something is actually piped in; an interactive
/// terminal yields empty input instead of blocking.
fn read_piped_stdin() -> Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }
    let mut buffer = String::new();
    stdin.read_to_string(&mut buffer)?;
    Ok(buffer)
}
