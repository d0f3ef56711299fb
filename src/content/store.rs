//! Content store - the query capability the route enumerator reads from

use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use super::{ContentEntry, FrontMatter};
use crate::config::SiteConfig;

/// The content source could not be enumerated
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("content directory {0:?} does not exist")]
    MissingDir(PathBuf),

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid ignore pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Anything that can list the content entries available at build time
pub trait ContentStore {
    /// Return every entry, optionally restricted to one top-level directory
    fn query(&self, filter: Option<&str>) -> Result<Vec<ContentEntry>, StoreError>;
}

/// In-memory store, mostly useful for tests and programmatic builds
impl ContentStore for Vec<ContentEntry> {
    fn query(&self, filter: Option<&str>) -> Result<Vec<ContentEntry>, StoreError> {
        Ok(self
            .iter()
            .filter(|e| filter.map_or(true, |f| e.content_type() == Some(f)))
            .cloned()
            .collect())
    }
}

/// Loads markdown documents from a content directory
pub struct FsContentStore {
    root: PathBuf,
    include_drafts: bool,
    ignore: Vec<glob::Pattern>,
}

impl FsContentStore {
    /// Create a store rooted at `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            include_drafts: false,
            ignore: Vec::new(),
        }
    }

    /// Create a store using the content section of the site config
    pub fn from_config<P: AsRef<Path>>(root: P, config: &SiteConfig) -> Result<Self, StoreError> {
        let ignore = config
            .content
            .ignore
            .iter()
            .map(|pattern| {
                glob::Pattern::new(pattern).map_err(|source| StoreError::Pattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            root: root.as_ref().to_path_buf(),
            include_drafts: config.content.include_drafts,
            ignore,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_ignored(&self, relative: &str) -> bool {
        self.ignore.iter().any(|p| p.matches(relative))
    }

    /// Load a single document
    fn load_entry(&self, path: &Path, relative: String) -> Result<ContentEntry, StoreError> {
        let io_err = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        let content = fs::read_to_string(path).map_err(io_err)?;
        let modified = fs::metadata(path)
            .map_err(io_err)?
            .modified()
            .ok()
            .map(DateTime::<Local>::from);

        let (front_matter, body) = match FrontMatter::parse(&content) {
            Ok((fm, body)) => (fm, body.to_string()),
            Err(e) => {
                tracing::warn!("Ignoring front-matter of {:?}: {}", path, e);
                (FrontMatter::default(), content.clone())
            }
        };

        let derived = front_matter
            .path
            .clone()
            .unwrap_or_else(|| default_path(&relative));

        Ok(ContentEntry {
            full_source: path.to_path_buf(),
            source: relative,
            path: Some(derived),
            front_matter,
            body,
            modified,
        })
    }
}

impl ContentStore for FsContentStore {
    fn query(&self, filter: Option<&str>) -> Result<Vec<ContentEntry>, StoreError> {
        if !self.root.is_dir() {
            return Err(StoreError::MissingDir(self.root.clone()));
        }

        let mut entries = Vec::new();

        for item in WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
        {
            let item = item.map_err(|e| StoreError::Io {
                path: e.path().unwrap_or(self.root.as_path()).to_path_buf(),
                source: e.into(),
            })?;

            let path = item.path();
            if !item.file_type().is_file() || !is_markdown_file(path) {
                continue;
            }

            let relative = relative_source(&self.root, path);
            if self.is_ignored(&relative) {
                tracing::debug!("Ignoring {}", relative);
                continue;
            }

            if let Some(filter) = filter {
                if relative.split_once('/').map(|(dir, _)| dir) != Some(filter) {
                    continue;
                }
            }

            let entry = self.load_entry(path, relative)?;
            if entry.front_matter.draft && !self.include_drafts {
                tracing::debug!("Skipping draft {}", entry.source);
                continue;
            }

            entries.push(entry);
        }

        tracing::debug!("Found {} content entries in {:?}", entries.len(), self.root);
        Ok(entries)
    }
}

/// Relative path with `/` separators on every platform
fn relative_source(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// `articles/hello.md` -> `/articles/hello`
fn default_path(relative: &str) -> String {
    let without_ext = relative
        .strip_suffix(".md")
        .or_else(|| relative.strip_suffix(".markdown"))
        .unwrap_or(relative);
    format!("/{}", without_ext)
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn paths(entries: &[ContentEntry]) -> Vec<&str> {
        entries.iter().filter_map(|e| e.path.as_deref()).collect()
    }

    #[test]
    fn test_query_sorted_by_file_name() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "index.md", "# Home");
        write(dir.path(), "articles/b.md", "---\ntitle: B\n---\nb");
        write(dir.path(), "articles/a.md", "a");
        write(dir.path(), "notes.txt", "not content");

        let entries = FsContentStore::new(dir.path()).query(None).unwrap();
        assert_eq!(paths(&entries), vec!["/articles/a", "/articles/b", "/index"]);
        assert_eq!(entries[1].front_matter.title.as_deref(), Some("B"));
        assert_eq!(entries[1].body, "b");
        assert_eq!(entries[0].source, "articles/a.md");
    }

    #[test]
    fn test_front_matter_path_overrides() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "about.md", "---\npath: /about-me\n---\n");

        let entries = FsContentStore::new(dir.path()).query(None).unwrap();
        assert_eq!(paths(&entries), vec!["/about-me"]);
    }

    #[test]
    fn test_query_filter() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "articles/a.md", "a");
        write(dir.path(), "projects/p.md", "p");

        let entries = FsContentStore::new(dir.path())
            .query(Some("projects"))
            .unwrap();
        assert_eq!(paths(&entries), vec!["/projects/p"]);
    }

    #[test]
    fn test_drafts_and_ignore() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.md", "---\ndraft: true\n---\n");
        write(dir.path(), "b.md", "b");
        write(dir.path(), "wip/c.md", "c");

        let mut config = SiteConfig::default();
        config.content.ignore = vec!["wip/**".to_string()];
        let store = FsContentStore::from_config(dir.path(), &config).unwrap();
        assert_eq!(paths(&store.query(None).unwrap()), vec!["/b"]);

        config.content.include_drafts = true;
        let store = FsContentStore::from_config(dir.path(), &config).unwrap();
        assert_eq!(paths(&store.query(None).unwrap()), vec!["/a", "/b"]);
    }

    #[test]
    fn test_broken_front_matter_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.md", "---\ntitle: [oops\n---\nbody");

        let entries = FsContentStore::new(dir.path()).query(None).unwrap();
        assert_eq!(paths(&entries), vec!["/a"]);
        assert_eq!(entries[0].front_matter.title, None);
    }

    #[test]
    fn test_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = FsContentStore::new(dir.path().join("nope"))
            .query(None)
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingDir(_)));
    }

    #[test]
    fn test_unreadable_file_fails_query() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.md", "a");
        fs::write(dir.path().join("b.md"), [0xff, 0xfe, 0xfd]).unwrap();

        match FsContentStore::new(dir.path()).query(None).unwrap_err() {
            StoreError::Io { path, .. } => assert_eq!(path, dir.path().join("b.md")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_link_fails_query() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.md", "a");
        std::os::unix::fs::symlink(dir.path().join("gone.md"), dir.path().join("b.md")).unwrap();

        let err = FsContentStore::new(dir.path()).query(None).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn test_site_enumerate_reports_unreadable_content() {
        let dir = tempfile::tempdir().unwrap();
        let site = crate::Site::with_config(dir.path(), SiteConfig::default());
        fs::create_dir_all(&site.content_dir).unwrap();
        fs::write(site.content_dir.join("index.md"), [0xc3, 0x28]).unwrap();

        let err = site.enumerate().unwrap_err();
        assert!(matches!(
            err,
            crate::routes::RouteError::ContentUnavailable(StoreError::Io { .. })
        ));
    }

    #[test]
    fn test_vec_store() {
        let store = vec![
            ContentEntry::new("articles/a.md", Some("/articles/a")),
            ContentEntry::new("b.md", Some("/b")),
        ];
        assert_eq!(store.query(None).unwrap().len(), 2);
        assert_eq!(paths(&store.query(Some("articles")).unwrap()), vec!["/articles/a"]);
    }
}
