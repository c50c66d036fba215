//! Resource request loading

use anyhow::{Context, Result};
use manifest_lib::ResourceInput;
use std::io::Read;
use std::path::Path;

/// How to decode an input document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputFormat {
    Json,
    /// YAML, which also accepts JSON
    Yaml,
}

fn format_for(path: &str) -> InputFormat {
    match Path::new(path).extension().and_then(|e| e.to_str()) {
        Some("json") => InputFormat::Json,
        _ => InputFormat::Yaml,
    }
}

/// Parse a request document in the given format
fn parse(content: &str, format: InputFormat) -> Result<ResourceInput> {
    match format {
        InputFormat::Json => serde_json::from_str(content).context("Failed to parse JSON request"),
        InputFormat::Yaml => serde_yaml::from_str(content).context("Failed to parse YAML request"),
    }
}

/// Load a request from a file path, or stdin when the path is `-`
pub fn load_input(path: &str) -> Result<ResourceInput> {
    let content = if path == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read request from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?
    };

    parse(&content, format_for(path))
}
