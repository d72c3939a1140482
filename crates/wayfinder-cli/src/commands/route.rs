//! Route command handler.

use anyhow::Result;

use wayfinder_lib::RouteRequest;

use super::{navigator, SiteArgs};
use crate::output::{format_plan, OutputFormat};

#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    pub from: String,
    pub to: String,
    /// Only return the leg on this floor.
    pub floor: Option<String>,
}

impl RouteCommandArgs {
    pub fn to_request(&self) -> RouteRequest {
        let request = RouteRequest::normal(&self.from, &self.to);
        match &self.floor {
            Some(floor) => request.on_floor(floor),
            None => request,
        }
    }
}

/// Plan a route between two nodes and print it.
pub fn handle_route_command(
    site: &SiteArgs<'_>,
    args: &RouteCommandArgs,
    format: OutputFormat,
) -> Result<()> {
    let navigator = navigator(site)?;
    let plan = navigator.plan(&args.to_request())?;
    tracing::debug!(waypoints = plan.waypoints.len(), "route planned");
    println!("{}", format_plan(&plan, format)?);
    Ok(())
}
