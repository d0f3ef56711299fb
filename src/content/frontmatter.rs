//! Front-matter parsing

use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Front-matter data from a content document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub date: Option<String>,
    pub updated: Option<String>,
    /// Explicit route, overriding the one derived from the file path
    pub path: Option<String>,
    pub draft: bool,

    /// Additional custom fields, passed through untouched
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let content = content.trim_start_matches('\u{feff}');
        let trimmed = content.trim_start();

        if trimmed.starts_with("---") {
            return Self::parse_yaml(trimmed);
        }

        if trimmed.starts_with(";;;") {
            return Self::parse_json(trimmed);
        }

        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml(content: &str) -> Result<(Self, &str)> {
        let rest = content[3..].trim_start_matches([' ', '\t']);
        let Some(rest) = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
        else {
            // A `----` horizontal rule, not a front-matter fence
            return Ok((FrontMatter::default(), content));
        };

        // Empty block: the closing fence comes right away
        if let Some(after) = rest.strip_prefix("---") {
            return Ok((FrontMatter::default(), after.trim_start_matches(['\n', '\r'])));
        }

        let Some(end_pos) = rest.find("\n---") else {
            return Ok((FrontMatter::default(), content));
        };

        let yaml_content = &rest[..end_pos];
        let remaining = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml_content)
            .map_err(|e| anyhow!("Failed to parse YAML front-matter: {}", e))?;
        Ok((fm, remaining))
    }

    fn parse_json(content: &str) -> Result<(Self, &str)> {
        let rest = &content[3..];
        let end_pos = rest
            .find(";;;")
            .ok_or_else(|| anyhow!("Unterminated JSON front-matter"))?;

        let json_content = &rest[..end_pos];
        let remaining = rest[end_pos + 3..].trim_start_matches(['\n', '\r']);

        let fm: FrontMatter = serde_json::from_str(json_content)
            .map_err(|e| anyhow!("Failed to parse JSON front-matter: {}", e))?;

        Ok((fm, remaining))
    }

    /// Parse the date string into a DateTime
    pub fn parse_date(&self) -> Option<DateTime<Local>> {
        self.date.as_deref().and_then(parse_date_string)
    }

    /// Parse the updated date string into a DateTime
    pub fn parse_updated(&self) -> Option<DateTime<Local>> {
        self.updated.as_deref().and_then(parse_date_string)
    }
}

/// Parse a date string in the formats commonly found in front-matter
fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Local.from_local_datetime(&dt).earliest();
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Local.from_local_datetime(&d.and_hms_opt(0, 0, 0)?).earliest();
        }
    }

    None
}
