//! Buildings command handler.

use anyhow::Result;

use super::{load, SiteArgs};
use crate::output::{format_buildings, OutputFormat};

/// List the loaded buildings with their exits, lifts and points of interest.
pub fn handle_buildings_command(site: &SiteArgs<'_>, format: OutputFormat) -> Result<()> {
    let site = load(site)?;
    print!("{}", format_buildings(site.buildings(), format)?);
    Ok(())
}
