//! Built-in page layout using the Tera template engine
//!
//! The layout is embedded in the binary; pages only provide the context.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::content::TocEntry;

const LAYOUT: &str = "layout.html";

/// Template renderer with the embedded layout
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with the layout loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Context values are pre-rendered HTML or escaped by the caller
        tera.autoescape_on(vec![]);

        tera.add_raw_template(LAYOUT, include_str!("layout.html"))?;
        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a full page
    pub fn render_page(&self, page: &PageContext) -> Result<String> {
        let context = Context::from_serialize(page)?;
        Ok(self.tera.render(LAYOUT, &context)?)
    }
}

/// Values available to the layout
#[derive(Debug, Clone, Serialize)]
pub struct PageContext {
    pub lang: String,
    pub dark: bool,
    /// Rendered `<head>` tags
    pub head: String,
    pub site_name: String,
    /// Escaped page title
    pub title: String,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    pub toc: Vec<TocEntry>,
    /// Rendered markdown
    pub content: String,
}

/// Tera filter: format a `YYYY-MM-DD` date
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "YYYY-MM-DD".to_string(),
    };

    // "LL" is the long form, e.g. "March 14, 2021"
    if format == "LL" {
        if let Ok(date) = chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
            return Ok(tera::Value::String(date.format("%B %-d, %Y").to_string()));
        }
    }

    Ok(tera::Value::String(s))
}
