//! Site configuration (site.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::theme::ThemeConfig;
use crate::head::MetaTag;
use crate::pwa::ManifestIcon;

/// Base URL used when neither the config file nor `BASE_URL` provide one
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Environment variable overriding the public base URL
pub const BASE_URL_ENV: &str = "BASE_URL";

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub title_template: String,
    pub site_name: String,
    pub description: String,
    pub image: Option<String>,

    // URL
    pub base_url: String,
    pub canonical: Option<String>,

    // Directory
    pub content_dir: String,
    pub static_dir: String,
    pub public_dir: String,

    // Sections
    #[serde(default)]
    pub head: HeadConfig,
    #[serde(default)]
    pub pwa: PwaConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub sitemap: SitemapConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Posts".to_string(),
            title_template: "%s | Woet Flow".to_string(),
            site_name: "Woet Flow".to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            image: None,

            base_url: DEFAULT_BASE_URL.to_string(),
            canonical: None,

            content_dir: "content".to_string(),
            static_dir: "static".to_string(),
            public_dir: "dist".to_string(),

            head: HeadConfig::default(),
            pwa: PwaConfig::default(),
            content: ContentConfig::default(),
            theme: ThemeConfig::default(),
            server: ServerConfig::default(),
            sitemap: SitemapConfig::default(),
            extra: HashMap::new(),
        }
    }
}

const DEFAULT_DESCRIPTION: &str = "I write about web development in Vue.js and Ruby on Rails, \
agile, side projects or anything else that pops into my head.";

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;

        // Unknown color tokens should fail here, not halfway through a build
        config.theme.resolve()?;
        config.content.ignore_patterns()?;

        Ok(config)
    }

    /// Apply overrides taken from the process environment
    pub fn apply_env(&mut self) {
        self.apply_base_url_override(std::env::var(BASE_URL_ENV).ok());
    }

    /// Replace the base URL when an override is present and non-empty
    pub fn apply_base_url_override(&mut self, value: Option<String>) {
        if let Some(url) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            tracing::debug!("Using {} from environment: {}", BASE_URL_ENV, url);
            self.base_url = url;
        }
    }

    /// Hostname used for sitemap URLs, without trailing slash
    pub fn hostname(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Canonical link target; falls back to the base URL
    pub fn canonical_url(&self) -> &str {
        self.canonical.as_deref().unwrap_or(&self.base_url)
    }

    /// Apply the title template to a page title
    pub fn page_title(&self, title: Option<&str>) -> String {
        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.title);

        if self.title_template.contains("%s") {
            self.title_template.replace("%s", title)
        } else {
            title.to_string()
        }
    }
}

/// Global `<head>` settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadConfig {
    pub charset: String,
    pub viewport: String,
    pub icon: String,
    pub icon_type: String,
    /// Extra meta tags appended after the generated ones
    #[serde(default)]
    pub meta: Vec<MetaTag>,
}

impl Default for HeadConfig {
    fn default() -> Self {
        Self {
            charset: "utf-8".to_string(),
            viewport: "width=device-width, initial-scale=1".to_string(),
            icon: "/favicon.ico".to_string(),
            icon_type: "image/x-icon".to_string(),
            meta: Vec::new(),
        }
    }
}

/// Progressive web app settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PwaConfig {
    #[serde(default)]
    pub meta: PwaMetaConfig,
    #[serde(default)]
    pub manifest: PwaManifestConfig,
}

/// Meta tags contributed by the PWA layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PwaMetaConfig {
    pub name: String,
    pub og_site_name: String,
    pub description: String,
    pub theme_color: String,
    pub mobile_app: bool,
}

impl Default for PwaMetaConfig {
    fn default() -> Self {
        Self {
            name: "Woet Flow".to_string(),
            og_site_name: "Woet Flow".to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            theme_color: "#CC3F14".to_string(),
            mobile_app: true,
        }
    }
}

/// Fields written to manifest.json
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PwaManifestConfig {
    pub name: String,
    pub short_name: String,
    pub lang: String,
    pub start_url: String,
    pub display: String,
    pub background_color: String,
    #[serde(default)]
    pub icons: Vec<ManifestIcon>,
}

impl Default for PwaManifestConfig {
    fn default() -> Self {
        Self {
            name: "Woet Flow".to_string(),
            short_name: "Woet Flow".to_string(),
            lang: "en".to_string(),
            start_url: "/?standalone=true".to_string(),
            display: "standalone".to_string(),
            background_color: "#ffffff".to_string(),
            icons: Vec::new(),
        }
    }
}

/// Content discovery and markdown settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    #[serde(default)]
    pub markdown: MarkdownConfig,
    pub include_drafts: bool,
    /// Glob patterns, relative to the content directory
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl ContentConfig {
    /// Compile the `ignore` globs
    pub fn ignore_patterns(&self) -> Result<Vec<glob::Pattern>> {
        self.ignore
            .iter()
            .map(|pattern| {
                glob::Pattern::new(pattern)
                    .with_context(|| format!("Invalid content.ignore pattern {:?}", pattern))
            })
            .collect()
    }
}

/// Markdown rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    #[serde(default)]
    pub prism: PrismConfig,
    pub line_numbers: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            prism: PrismConfig::default(),
            line_numbers: false,
        }
    }
}

/// Code highlighting theme selector
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrismConfig {
    pub theme: String,
}

impl Default for PrismConfig {
    fn default() -> Self {
        Self {
            theme: "prism-themes/themes/prism-material-oceanic.css".to_string(),
        }
    }
}

/// Preview server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8080,
        }
    }
}

/// Sitemap output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    pub enable: bool,
    pub path: String,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "sitemap.xml".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title_template, "%s | Woet Flow");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.pwa.manifest.lang, "en");
        assert_eq!(config.pwa.meta.theme_color, "#CC3F14");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Articles
base_url: https://woetflow.com
server:
  port: 3000
content:
  ignore:
    - "drafts/**"
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Articles");
        assert_eq!(config.base_url, "https://woetflow.com");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "localhost");
        assert_eq!(config.content.ignore, vec!["drafts/**"]);
        assert_eq!(config.site_name, "Woet Flow");
    }

    #[test]
    fn test_base_url_override() {
        let mut config = SiteConfig::default();
        config.apply_base_url_override(None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        config.apply_base_url_override(Some("  ".to_string()));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        config.apply_base_url_override(Some("https://woetflow.com/".to_string()));
        assert_eq!(config.base_url, "https://woetflow.com/");
        assert_eq!(config.hostname(), "https://woetflow.com");
    }

    #[test]
    fn test_canonical_follows_base_url() {
        let mut config = SiteConfig::default();
        config.apply_base_url_override(Some("https://woetflow.com".to_string()));
        assert_eq!(config.canonical_url(), "https://woetflow.com");

        config.canonical = Some("https://example.org".to_string());
        assert_eq!(config.canonical_url(), "https://example.org");
    }

    #[test]
    fn test_page_title() {
        let config = SiteConfig::default();
        assert_eq!(config.page_title(Some("Hello")), "Hello | Woet Flow");
        assert_eq!(config.page_title(None), "Posts | Woet Flow");
        assert_eq!(config.page_title(Some("")), "Posts | Woet Flow");
    }

    #[test]
    fn test_load_rejects_unknown_color_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.yml");
        fs::write(&path, "theme:\n  dark:\n    primary: blue.darken9\n").unwrap();
        assert!(SiteConfig::load(&path).is_err());
    }

    #[test]
    fn test_load_rejects_bad_ignore_glob() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.yml");
        fs::write(&path, "content:\n  ignore:\n    - \"drafts/[\"\n").unwrap();
        let err = SiteConfig::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("drafts/["));

        fs::write(&path, "content:\n  ignore:\n    - \"drafts/**\"\n").unwrap();
        assert!(SiteConfig::load(&path).is_ok());
    }
}
