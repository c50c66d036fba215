//! `mgen validate`

use anyhow::{bail, Result};
use colored::Colorize;
use manifest_lib::validate;
use serde_json::json;

use super::input::load_input;
use crate::output::{color_valid, print_error, print_json, print_success, OutputFormat};

/// Validate a request; fails (non-zero exit) when the input is invalid
pub fn run(input_path: &str, format: OutputFormat) -> Result<()> {
    let input = load_input(input_path)?;
    let report = validate(&input.resource);

    match format {
        OutputFormat::Json => print_json(&json!({
            "kind": input.kind(),
            "name": input.resource.name(),
            "valid": report.valid,
            "errors": report.errors,
        }))?,
        OutputFormat::Table => {
            println!(
                "{} {} is {}",
                input.kind().to_string().cyan(),
                input.resource.name().bold(),
                color_valid(report.valid)
            );
            if report.valid {
                print_success("No validation errors");
            }
            for error in &report.errors {
                print_error(error);
            }
        }
    }

    if !report.valid {
        bail!("validation failed with {} error(s)", report.errors.len());
    }
    Ok(())
}
