//! `mgen generate`

use anyhow::{bail, Context, Result};
use manifest_lib::{advisory, render, validate, ManifestGenerator};
use serde_json::json;
use std::path::PathBuf;

use super::input::load_input;
use crate::output::{print_error, print_json, print_success, print_warning, OutputFormat};

/// Build the YAML stream for a request and print or write it
pub fn run(
    input_path: &str,
    output: Option<PathBuf>,
    include_namespace: bool,
    format: OutputFormat,
) -> Result<()> {
    let mut input = load_input(input_path)?;
    input.include_namespace |= include_namespace;

    let report = validate(&input.resource);
    if !report.valid {
        for error in &report.errors {
            print_error(error);
        }
        bail!(
            "{} input \"{}\" is invalid ({} errors)",
            input.kind(),
            input.resource.name(),
            report.errors.len()
        );
    }

    let documents = ManifestGenerator::new().build_documents(&input);
    let manifest = render::to_yaml_stream(&documents)?;
    let warnings = advisory::warnings(&input.resource);

    if let Some(path) = &output {
        std::fs::write(path, &manifest)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    match format {
        OutputFormat::Json => print_json(&json!({
            "manifest": manifest,
            "documents": documents.len(),
            "warnings": warnings,
        }))?,
        OutputFormat::Table => {
            for warning in &warnings {
                print_warning(warning);
            }
            match &output {
                Some(path) => print_success(&format!(
                    "Wrote {} document(s) to {}",
                    documents.len(),
                    path.display()
                )),
                None => print!("{manifest}"),
            }
        }
    }

    Ok(())
}
