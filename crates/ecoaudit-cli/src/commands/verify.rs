//! Verify command implementation.

use std::path::PathBuf;

use ecoaudit_core::{verify, EcosystemConfig, ReferenceSnapshot};
use serde_json::json;

use crate::output;

pub fn run(
    config: PathBuf,
    references: PathBuf,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = EcosystemConfig::from_file(&config)
        .map_err(|e| format!("Failed to load config: {}", e))?;
    let registry = config.registry()?;
    let sets = ReferenceSnapshot::from_file(&references)
        .and_then(|snapshot| snapshot.to_reference_sets())
        .map_err(|e| format!("Failed to load references: {}", e))?;

    let report = verify(&registry, &sets);

    if json_output {
        let out = json!({
            "consistent": report.is_consistent(),
            "discrepancies": report.discrepancies(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if report.is_consistent() {
        println!("OK: all 8 components reference the registry addresses");
    } else {
        output::print_discrepancy_header();
        for d in report.discrepancies() {
            println!("{}", output::format_discrepancy_row(d));
        }
    }

    report.into_result()?;
    Ok(())
}
