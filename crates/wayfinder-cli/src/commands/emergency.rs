//! Emergency command handler.

use anyhow::Result;

use wayfinder_lib::RouteRequest;

use super::{navigator, SiteArgs};
use crate::output::{format_plan, OutputFormat};

/// Route from `from` to the nearest exit of its building and print it.
pub fn handle_emergency_command(site: &SiteArgs<'_>, from: &str, format: OutputFormat) -> Result<()> {
    let navigator = navigator(site)?;
    let plan = navigator.plan(&RouteRequest::emergency(from))?;
    if let Some(exit) = &plan.exit {
        tracing::debug!(exit = %exit, "nearest exit selected");
    }
    println!("{}", format_plan(&plan, format)?);
    Ok(())
}
