//! `mgen analyze`

use anyhow::Result;
use colored::Colorize;
use manifest_lib::{analyze, AdvisoryResult};
use tabled::Tabled;

use super::input::load_input;
use crate::output::{
    color_required, print_heading, print_info, print_json, print_table, OutputFormat,
};

/// Row for the dependencies table
#[derive(Tabled)]
struct DependencyRow {
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Required")]
    required: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

/// Row for the related resources table
#[derive(Tabled)]
struct RelatedRow {
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Reason")]
    reason: String,
}

/// Row for the commands table
#[derive(Tabled)]
struct CommandRow {
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Command")]
    command: String,
}

/// Print the advisory result for a request
pub fn run(input_path: &str, format: OutputFormat) -> Result<()> {
    let input = load_input(input_path)?;
    let result = analyze(&input);

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Table => {
            println!(
                "{} {} {}",
                "Analysis of".bold(),
                input.kind().to_string().cyan(),
                input.resource.name().bold()
            );
            print_tables(&result);
        }
    }

    Ok(())
}

fn print_tables(result: &AdvisoryResult) {
    print_heading("Warnings");
    if result.warnings.is_empty() {
        println!("{}", "No warnings".green());
    }
    for warning in &result.warnings {
        println!("{} {}", "⚠".yellow().bold(), warning);
    }

    print_heading("Suggestions");
    for suggestion in &result.suggestions {
        println!("  • {}", suggestion);
    }

    print_heading("Dependencies");
    let rows: Vec<DependencyRow> = result
        .dependencies
        .iter()
        .map(|d| DependencyRow {
            kind: d.resource_kind.clone(),
            required: color_required(d.required),
            reason: d.reason.clone(),
        })
        .collect();
    print_table(&rows, "No dependencies");

    print_heading("Related Resources");
    let rows: Vec<RelatedRow> = result
        .related_resources
        .iter()
        .map(|r| RelatedRow {
            kind: r.resource_kind.clone(),
            reason: r.reason.clone(),
        })
        .collect();
    print_table(&rows, "No related resources");

    print_heading("Commands");
    let rows: Vec<CommandRow> = result
        .deployment_commands
        .iter()
        .map(|c| CommandRow {
            description: c.description.clone(),
            command: c.command.clone(),
        })
        .collect();
    print_table(&rows, "No commands");

    println!();
    print_info("Run `mgen order` for the recommended apply order across kinds");
}
