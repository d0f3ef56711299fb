//! woetflow: static site builder for the Woet Flow blog
//!
//! Reads markdown documents from the content directory, enumerates the routes
//! they publish, and writes the rendered pages, sitemap, web app manifest and
//! theme stylesheet into the public directory.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod head;
pub mod pwa;
pub mod routes;
pub mod server;
pub mod sitemap;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Name of the optional config file in the site directory
pub const CONFIG_FILE: &str = "site.yml";

/// A site on disk together with its resolved configuration
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration, resolved once
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content (markdown) directory
    pub content_dir: PathBuf,
    /// Static files copied verbatim
    pub static_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Site {
    /// Open a site directory, reading `site.yml` if present and applying
    /// environment overrides
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let mut config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} found, using defaults", CONFIG_FILE);
            config::SiteConfig::default()
        };
        config.apply_env();

        Ok(Self::with_config(base_dir, config))
    }

    /// Build a site from an already resolved config
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let static_dir = base_dir.join(&config.static_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            content_dir,
            static_dir,
            public_dir,
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.base_dir.join(CONFIG_FILE)
    }

    /// The filesystem content store for this site
    pub fn content_store(&self) -> Result<content::FsContentStore, content::StoreError> {
        content::FsContentStore::from_config(&self.content_dir, &self.config)
    }

    /// Enumerate the routes of the site's content
    pub fn enumerate(&self) -> Result<routes::Enumeration, routes::RouteError> {
        let store = self.content_store()?;
        routes::enumerate(&store)
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
