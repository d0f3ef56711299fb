//! Route enumeration
//!
//! Turns the content store's entries into the ordered, duplicate-free list of
//! site paths that the sitemap publishes. Entries without a derivable path are
//! skipped with a warning; a store that cannot be queried fails the whole
//! enumeration so that an incomplete sitemap is never written.

use indexmap::IndexSet;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

use crate::content::{ContentEntry, ContentStore, StoreError};

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("content unavailable: {0}")]
    ContentUnavailable(#[from] StoreError),

    #[error("duplicate route {path} (from {first} and {second})")]
    DuplicatePath {
        path: String,
        first: String,
        second: String,
    },
}

/// A content entry whose path could not be turned into a route
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed entry {source_file}: {reason}")]
pub struct MalformedEntry {
    pub source_file: String,
    pub reason: String,
}

/// Ordered set of site paths, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RouteList(IndexSet<String>);

impl RouteList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a path; returns false if it was already present
    fn insert(&mut self, path: String) -> bool {
        self.0.insert(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<'a> IntoIterator for &'a RouteList {
    type Item = &'a String;
    type IntoIter = indexmap::set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Result of a successful enumeration
#[derive(Debug, Clone, Default)]
pub struct Enumeration {
    pub routes: RouteList,
    /// Accepted entries, in the same order as `routes`
    pub entries: Vec<ContentEntry>,
    /// Entries that were skipped because no route could be derived
    pub skipped: Vec<MalformedEntry>,
}

impl Enumeration {
    /// Routes paired with the entries they were derived from
    pub fn pages(&self) -> impl Iterator<Item = (&str, &ContentEntry)> {
        self.routes.iter().zip(self.entries.iter())
    }
}

/// Enumerate the routes of every entry in the store
pub fn enumerate<S: ContentStore + ?Sized>(store: &S) -> Result<Enumeration, RouteError> {
    enumerate_filtered(store, None)
}

/// Enumerate the routes of the entries in one top-level content directory
pub fn enumerate_filtered<S: ContentStore + ?Sized>(
    store: &S,
    filter: Option<&str>,
) -> Result<Enumeration, RouteError> {
    let entries = store.query(filter)?;
    let mut result = Enumeration::default();
    let mut seen: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let route = match derive_route(&entry) {
            Ok(route) => route,
            Err(malformed) => {
                tracing::warn!("Skipping {}", malformed);
                result.skipped.push(malformed);
                continue;
            }
        };

        // `/a` and `/a/` are written to the same page
        if let Some(&index) = seen.get(output_key(&route)) {
            return Err(RouteError::DuplicatePath {
                path: route,
                first: result.entries[index].source.clone(),
                second: entry.source,
            });
        }

        seen.insert(output_key(&route).to_string(), result.entries.len());
        result.routes.insert(route);
        result.entries.push(entry);
    }

    tracing::debug!(
        "Enumerated {} routes ({} skipped)",
        result.routes.len(),
        result.skipped.len()
    );

    Ok(result)
}

/// Routes that differ only by a trailing slash share one output page
fn output_key(route: &str) -> &str {
    match route.strip_suffix('/') {
        Some(key) if !key.is_empty() => key,
        _ => route,
    }
}

/// Derive the published route of an entry
///
/// `/index` maps to `/` and `/dir/index` to `/dir/`.
pub fn derive_route(entry: &ContentEntry) -> Result<String, MalformedEntry> {
    let malformed = |reason: &str| MalformedEntry {
        source_file: entry.source.clone(),
        reason: reason.to_string(),
    };

    let path = entry
        .path
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| malformed("no path"))?;

    if !path.starts_with('/') {
        return Err(malformed("path must start with '/'"));
    }
    if path.chars().any(|c| c.is_control()) {
        return Err(malformed("path contains control characters"));
    }
    if path.contains(['?', '#']) {
        return Err(malformed("path contains a query or fragment"));
    }

    let segments: Vec<&str> = path[1..].split('/').collect();
    let last = segments.len() - 1;
    for (i, segment) in segments.iter().enumerate() {
        // A trailing slash leaves one empty final segment, which is fine
        if segment.is_empty() && i != last {
            return Err(malformed("path contains an empty segment"));
        }
        if *segment == "." || *segment == ".." {
            return Err(malformed("path contains a relative segment"));
        }
    }

    if path == "/index" {
        return Ok("/".to_string());
    }
    if let Some(dir) = path.strip_suffix("/index") {
        return Ok(format!("{}/", dir));
    }

    Ok(path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(source: &str, path: Option<&str>) -> ContentEntry {
        ContentEntry::new(source, path)
    }

    struct FailingStore;

    impl ContentStore for FailingStore {
        fn query(&self, _filter: Option<&str>) -> Result<Vec<ContentEntry>, StoreError> {
            Err(StoreError::Io {
                path: PathBuf::from("content"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            })
        }
    }

    #[test]
    fn test_routes_in_discovery_order() {
        let store = vec![
            entry("a.md", Some("/a")),
            entry("b.md", Some("/b")),
            entry("c.md", Some("/c")),
        ];
        let result = enumerate(&store).unwrap();
        assert_eq!(result.routes.to_vec(), vec!["/a", "/b", "/c"]);
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_empty_store() {
        let store: Vec<ContentEntry> = Vec::new();
        let result = enumerate(&store).unwrap();
        assert!(result.routes.is_empty());
        assert!(result.entries.is_empty());
    }

    #[test]
    fn test_entry_without_path_is_skipped() {
        let store = vec![
            entry("a.md", Some("/a")),
            entry("broken.md", None),
            entry("c.md", Some("/c")),
        ];
        let result = enumerate(&store).unwrap();
        assert_eq!(result.routes.len(), store.len() - 1);
        assert_eq!(result.routes.to_vec(), vec!["/a", "/c"]);
        assert_eq!(result.skipped.len(), 1);
        assert_eq!(result.skipped[0].source_file, "broken.md");
    }

    #[test]
    fn test_length_matches_derivable_entries() {
        let store = vec![
            entry("1.md", Some("/one")),
            entry("2.md", Some("")),
            entry("3.md", Some("relative")),
            entry("4.md", Some("/a/../b")),
            entry("5.md", Some("/a//b")),
            entry("6.md", Some("/posts/six/")),
            entry("7.md", Some("/search?q=1")),
        ];
        let derivable = store.iter().filter(|e| derive_route(e).is_ok()).count();
        let result = enumerate(&store).unwrap();

        assert_eq!(derivable, 2);
        assert_eq!(result.routes.len(), derivable);
        assert_eq!(result.skipped.len(), store.len() - derivable);
    }

    #[test]
    fn test_query_failure_is_content_unavailable() {
        let err = enumerate(&FailingStore).unwrap_err();
        assert!(matches!(err, RouteError::ContentUnavailable(_)));
    }

    #[test]
    fn test_index_maps_to_directory() {
        assert_eq!(derive_route(&entry("index.md", Some("/index"))).unwrap(), "/");
        assert_eq!(
            derive_route(&entry("articles/index.md", Some("/articles/index"))).unwrap(),
            "/articles/"
        );
        assert_eq!(
            derive_route(&entry("articles/indexing.md", Some("/articles/indexing"))).unwrap(),
            "/articles/indexing"
        );
    }

    #[test]
    fn test_duplicate_paths_fail() {
        let store = vec![
            entry("a.md", Some("/same")),
            entry("b.md", Some("/other")),
            entry("c.md", Some("/same")),
        ];
        match enumerate(&store).unwrap_err() {
            RouteError::DuplicatePath {
                path,
                first,
                second,
            } => {
                assert_eq!(path, "/same");
                assert_eq!(first, "a.md");
                assert_eq!(second, "c.md");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_trailing_slash_duplicates_fail() {
        let store = vec![
            entry("articles/index.md", Some("/articles/index")),
            entry("articles.md", Some("/articles")),
        ];
        match enumerate(&store).unwrap_err() {
            RouteError::DuplicatePath {
                path,
                first,
                second,
            } => {
                assert_eq!(path, "/articles");
                assert_eq!(first, "articles/index.md");
                assert_eq!(second, "articles.md");
            }
            other => panic!("unexpected error: {other}"),
        }

        let store = vec![entry("a.md", Some("/a/")), entry("b.md", Some("/a"))];
        assert!(matches!(
            enumerate(&store),
            Err(RouteError::DuplicatePath { .. })
        ));
    }

    #[test]
    fn test_root_is_not_confused_with_children() {
        let store = vec![entry("index.md", Some("/index")), entry("a.md", Some("/a"))];
        let result = enumerate(&store).unwrap();
        assert_eq!(result.routes.to_vec(), vec!["/", "/a"]);
    }

    #[test]
    fn test_routes_are_unique() {
        let store: Vec<ContentEntry> = (0..50)
            .map(|i| entry(&format!("{i}.md"), Some(format!("/posts/{i}").as_str())))
            .collect();
        let result = enumerate(&store).unwrap();
        let unique: std::collections::HashSet<_> = result.routes.iter().collect();
        assert_eq!(unique.len(), result.routes.len());
        assert_eq!(result.routes.len(), 50);
    }

    #[test]
    fn test_pages_pair_routes_with_entries() {
        let store = vec![entry("index.md", Some("/index")), entry("x.md", None)];
        let result = enumerate(&store).unwrap();
        let pages: Vec<_> = result.pages().map(|(r, e)| (r, e.source.as_str())).collect();
        assert_eq!(pages, vec![("/", "index.md")]);
    }

    #[test]
    fn test_filtered_enumeration() {
        let store = vec![
            entry("articles/a.md", Some("/articles/a")),
            entry("projects/p.md", Some("/projects/p")),
        ];
        let result = enumerate_filtered(&store, Some("articles")).unwrap();
        assert_eq!(result.routes.to_vec(), vec!["/articles/a"]);
    }
}
