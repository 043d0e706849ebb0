//! Defaults command implementation
//!
//! Prints the default scenario as a starting point for scenario files, or
//! the catalogue of fields accepted by `--set`.

use clap::ValueEnum;

use pitch_core::format::format_number;
use pitch_core::types::{AllocationBucket, ScenarioField, ScenarioState};

use crate::output::{to_json, Table};
use crate::Result;

/// Encoding for the default scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ScenarioFormat {
    /// Scenario file format
    #[default]
    Toml,
    /// JSON
    Json,
}

/// Renders the default scenario.
pub fn render_scenario(format: ScenarioFormat) -> Result<String> {
    let state = ScenarioState::default();
    match format {
        ScenarioFormat::Toml => Ok(toml::to_string_pretty(&state)?),
        ScenarioFormat::Json => to_json(&state),
    }
}

fn bound(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_else(|| "-".to_string())
}

/// Renders the field catalogue with bounds and default values.
pub fn render_fields() -> String {
    let defaults = ScenarioState::default();
    let mut table =
        Table::new(["Field", "Label", "Group", "Min", "Max", "Default"]).right_align_from(3);
    for field in ScenarioField::ALL {
        let bounds = field.bounds();
        table.push([
            field.key().to_string(),
            field.label().to_string(),
            field.group().label().to_string(),
            bound(Some(bounds.min)),
            bound(bounds.max),
            defaults.get(field).to_string(),
        ]);
    }
    for bucket in AllocationBucket::ALL {
        table.push([
            bucket.key().to_string(),
            bucket.label().to_string(),
            "Allocation".to_string(),
            "0".to_string(),
            "100".to_string(),
            defaults.allocation.get(bucket).to_string(),
        ]);
    }
    table.render()
}

/// Run the defaults command
pub fn run(format: ScenarioFormat, fields: bool) -> Result<()> {
    let output = if fields {
        render_fields()
    } else {
        render_scenario(format)?
    };
    super::emit(&output);
    Ok(())
}
