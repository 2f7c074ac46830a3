//! Status command implementation.

use std::path::PathBuf;

use ecoaudit_core::{DaylightObserver, EcosystemConfig};
use serde_json::json;

pub fn run(config: PathBuf, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = EcosystemConfig::from_file(&config)
        .map_err(|e| format!("Failed to load config: {}", e))?;
    let state = config.load_state()?;

    if json_output {
        let out = json!({
            "season": state.season(),
            "is_winter_time": state.is_winter_time(),
            "daylight_saving_scheduled": state.daylight_saving_scheduled(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("season:    {}", state.season());
        println!("scheduled: {}", state.daylight_saving_scheduled());
    }
    Ok(())
}
