//! Print the resolved configuration

use anyhow::Result;

use crate::Site;

/// Resolved configuration as pretty JSON, theme colors included
pub fn render(site: &Site) -> Result<String> {
    let mut value = serde_json::to_value(&site.config)?;
    value["resolved_theme"] = serde_json::to_value(site.config.theme.resolve()?)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

pub fn run(site: &Site) -> Result<()> {
    println!("{}", render(site)?);
    Ok(())
}
