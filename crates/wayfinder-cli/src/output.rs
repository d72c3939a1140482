//! Output formatting for routes and building listings.

use std::fmt::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;

use wayfinder_lib::{render_plan, BuildingProfile, RoutePlan, RouteRenderMode};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Header plus one numbered line per waypoint.
    #[default]
    Text,
    /// Waypoint names on one line.
    Compact,
    /// Pretty-printed JSON.
    Json,
}

pub fn format_plan(plan: &RoutePlan, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_plan(plan, RouteRenderMode::PlainText)
            .trim_end()
            .to_string()),
        OutputFormat::Compact => Ok(render_plan(plan, RouteRenderMode::Compact)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(plan).context("failed to serialize route as JSON")
        }
    }
}

fn join_ids<T: ToString>(ids: &[T]) -> String {
    if ids.is_empty() {
        return "-".to_string();
    }
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn format_buildings(buildings: &[BuildingProfile], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(buildings)
            .map(|json| json + "\n")
            .context("failed to serialize buildings as JSON"),
        OutputFormat::Compact => Ok(buildings
            .iter()
            .map(|b| format!("{}\n", b.id))
            .collect()),
        OutputFormat::Text => {
            let mut out = String::new();
            for building in buildings {
                let _ = writeln!(out, "{} ({})", building.name, building.id);
                let _ = writeln!(out, "  floors: {}", join_ids(&building.floors));
                let _ = writeln!(out, "  exits: {}", join_ids(&building.exits));
                let _ = writeln!(out, "  lifts: {}", join_ids(&building.transfers));
                for poi in &building.pois {
                    let _ = writeln!(out, "  - {} ({})", poi.name, poi.id);
                }
            }
            Ok(out)
        }
    }
}
