//! Content entry model

use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;

use super::FrontMatter;

/// A single published document
#[derive(Debug, Clone, Serialize)]
pub struct ContentEntry {
    /// Source file path, relative to the content directory
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,

    /// Site path the entry is published under, if one could be derived
    pub path: Option<String>,

    /// Parsed front-matter
    pub front_matter: FrontMatter,

    /// Markdown body without front-matter
    pub body: String,

    /// Last modification time of the source file
    pub modified: Option<DateTime<Local>>,
}

impl ContentEntry {
    /// Create an entry with only a source and a path
    pub fn new(source: impl Into<String>, path: Option<&str>) -> Self {
        let source = source.into();
        Self {
            full_source: PathBuf::from(&source),
            source,
            path: path.map(str::to_string),
            front_matter: FrontMatter::default(),
            body: String::new(),
            modified: None,
        }
    }

    /// Title from front-matter, falling back to the file stem
    pub fn title(&self) -> String {
        self.front_matter.title.clone().unwrap_or_else(|| {
            self.full_source
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Untitled")
                .to_string()
        })
    }

    /// Date used as the sitemap `lastmod`: updated, then date, then mtime
    pub fn last_modified(&self) -> Option<DateTime<Local>> {
        self.front_matter
            .parse_updated()
            .or_else(|| self.front_matter.parse_date())
            .or(self.modified)
    }

    /// Top-level content directory, used as the content-type filter
    pub fn content_type(&self) -> Option<&str> {
        let (dir, _) = self.source.split_once('/')?;
        Some(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_fallback() {
        let mut entry = ContentEntry::new("articles/hello-world.md", Some("/articles/hello-world"));
        assert_eq!(entry.title(), "hello-world");

        entry.front_matter.title = Some("Hello World".to_string());
        assert_eq!(entry.title(), "Hello World");
    }

    #[test]
    fn test_last_modified_prefers_updated() {
        let mut entry = ContentEntry::new("a.md", Some("/a"));
        assert!(entry.last_modified().is_none());

        entry.front_matter.date = Some("2021-01-01".to_string());
        entry.front_matter.updated = Some("2021-06-01".to_string());
        let lastmod = entry.last_modified().unwrap();
        assert_eq!(lastmod.format("%Y-%m-%d").to_string(), "2021-06-01");
    }

    #[test]
    fn test_content_type() {
        assert_eq!(ContentEntry::new("articles/a.md", None).content_type(), Some("articles"));
        assert_eq!(ContentEntry::new("index.md", None).content_type(), None);
    }
}
