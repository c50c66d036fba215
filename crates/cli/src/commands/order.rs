//! `mgen order`

use anyhow::Result;
use manifest_lib::advisory::deployment_order;
use tabled::Tabled;

use crate::output::{print_json, print_table, OutputFormat};

/// Row for the deployment order table
#[derive(Tabled)]
struct StepRow {
    #[tabled(rename = "Step")]
    step: u32,
    #[tabled(rename = "Resource Kinds")]
    kinds: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Print the recommended apply order across resource kinds
pub fn run(format: OutputFormat) -> Result<()> {
    let order = deployment_order();

    match format {
        OutputFormat::Json => print_json(&order)?,
        OutputFormat::Table => {
            let rows: Vec<StepRow> = order
                .into_iter()
                .map(|s| StepRow {
                    step: s.step,
                    kinds: s.resource_kinds.join(", "),
                    description: s.description,
                })
                .collect();
            print_table(&rows, "No steps");
        }
    }

    Ok(())
}
