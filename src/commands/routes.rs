//! List the routes the sitemap will publish

use anyhow::Result;

use crate::routes::Enumeration;
use crate::sitemap::absolute_url;
use crate::Site;

/// One line per route; absolute URLs when `absolute` is set
pub fn format(site: &Site, enumeration: &Enumeration, absolute: bool) -> Vec<String> {
    enumeration
        .routes
        .iter()
        .map(|route| {
            if absolute {
                absolute_url(site.config.hostname(), route)
            } else {
                route.to_string()
            }
        })
        .collect()
}

/// Print the routes of the site's content
pub fn run(site: &Site, absolute: bool) -> Result<()> {
    let enumeration = site.enumerate()?;

    println!("Routes ({}):", enumeration.routes.len());
    for line in format(site, &enumeration, absolute) {
        println!("  {}", line);
    }

    if !enumeration.skipped.is_empty() {
        println!("Skipped ({}):", enumeration.skipped.len());
        for malformed in &enumeration.skipped {
            println!("  {} ({})", malformed.source_file, malformed.reason);
        }
    }

    Ok(())
}
