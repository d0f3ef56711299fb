//! Generate static files

use anyhow::Result;
use notify::Watcher;
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::time::{Duration, Instant};

use crate::generator::Generator;
use crate::Site;

/// Minimum time between two rebuilds in watch mode
const DEBOUNCE: Duration = Duration::from_millis(500);

/// Generate the static site
pub fn run(site: &Site) -> Result<()> {
    let start = Instant::now();

    // Enumerate first: a content failure must abort before anything is written
    let enumeration = site.enumerate()?;
    tracing::info!(
        "Found {} routes ({} skipped)",
        enumeration.routes.len(),
        enumeration.skipped.len()
    );

    let generator = Generator::new(site)?;
    generator.generate(&enumeration)?;

    tracing::info!("Generated in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

/// Watch for file changes and regenerate
pub fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    watcher.watch(&site.content_dir, notify::RecursiveMode::Recursive)?;
    if site.static_dir.exists() {
        watcher.watch(&site.static_dir, notify::RecursiveMode::Recursive)?;
    }
    let config_path = site.config_path();
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_rebuild = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                if last_rebuild.elapsed() > DEBOUNCE {
                    tracing::info!("File changed, regenerating...");
                    // Config edits need a fresh site
                    let result = Site::new(&site.base_dir).and_then(|fresh| run(&fresh));
                    if let Err(e) = result {
                        tracing::error!("Generation failed: {:#}", e);
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::routes::RouteError;
    use std::fs;

    #[test]
    fn test_run_generates_site() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());
        fs::create_dir_all(site.content_dir.join("articles")).unwrap();
        fs::write(site.content_dir.join("index.md"), "# Welcome").unwrap();
        fs::write(
            site.content_dir.join("articles/sitemap.md"),
            "---\ntitle: Adding a sitemap\n---\nText",
        )
        .unwrap();

        run(&site).unwrap();

        assert!(site.public_dir.join("index.html").exists());
        assert!(site.public_dir.join("articles/sitemap/index.html").exists());
        let sitemap = fs::read_to_string(site.public_dir.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>http://localhost:8080/articles/sitemap</loc>"));
    }

    #[test]
    fn test_missing_content_aborts_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());

        let err = run(&site).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RouteError>(),
            Some(RouteError::ContentUnavailable(_))
        ));
        assert!(!site.public_dir.exists());
    }

    #[test]
    fn test_list_page_and_directory_index_collide() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());
        fs::create_dir_all(site.content_dir.join("articles")).unwrap();
        fs::write(site.content_dir.join("articles.md"), "List page").unwrap();
        fs::write(site.content_dir.join("articles/index.md"), "Index page").unwrap();

        let err = run(&site).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RouteError>(),
            Some(RouteError::DuplicatePath { .. })
        ));
        assert!(!site.public_dir.exists());
    }
}
