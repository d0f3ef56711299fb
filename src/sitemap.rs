//! Sitemap generation.
//!
//! Generates a sitemap.xml listing every route for search engine indexing.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://woetflow.com/</loc>
//!     <lastmod>2021-03-14</lastmod>
//!   </url>
//! </urlset>
//! ```

use anyhow::{Context, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

use crate::routes::{Enumeration, RouteList};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Characters escaped in URL paths (non-ASCII is always escaped)
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Join the hostname and a route into an absolute URL
pub fn absolute_url(hostname: &str, path: &str) -> String {
    let path = utf8_percent_encode(path, PATH).to_string();
    format!(
        "{}/{}",
        hostname.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlEntry {
    pub loc: String,
    pub lastmod: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Sitemap {
    urls: Vec<UrlEntry>,
}

impl Sitemap {
    /// Sitemap of bare routes
    pub fn from_routes(hostname: &str, routes: &RouteList) -> Self {
        let urls = routes
            .iter()
            .map(|path| UrlEntry {
                loc: absolute_url(hostname, path),
                lastmod: None,
            })
            .collect();
        Self { urls }
    }

    /// Sitemap of an enumeration, with `lastmod` taken from each entry
    pub fn from_enumeration(hostname: &str, enumeration: &Enumeration) -> Self {
        let urls = enumeration
            .pages()
            .map(|(path, entry)| UrlEntry {
                loc: absolute_url(hostname, path),
                lastmod: entry
                    .last_modified()
                    .map(|d| d.format("%Y-%m-%d").to_string()),
            })
            .collect();
        Self { urls }
    }

    pub fn urls(&self) -> &[UrlEntry] {
        &self.urls
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(4096);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for entry in &self.urls {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape_xml(&entry.loc));
            xml.push_str("</loc>\n");
            if let Some(lastmod) = &entry.lastmod {
                xml.push_str("    <lastmod>");
                xml.push_str(lastmod);
                xml.push_str("</lastmod>\n");
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_xml())
            .with_context(|| format!("Failed to write sitemap to {}", path.display()))?;
        tracing::info!("Generated {} ({} urls)", path.display(), self.urls.len());
        Ok(())
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}
