//! Initialize a new site

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const CONFIG_TEMPLATE: &str = r##"# Site
title: Posts
title_template: "%s | Woet Flow"
site_name: Woet Flow
description: I write about web development in Vue.js and Ruby on Rails, agile, side projects or anything else that pops into my head.

# URL (BASE_URL in the environment takes precedence)
base_url: http://localhost:8080
canonical: https://woetflow.com

# Directory
content_dir: content
static_dir: static
public_dir: dist

head:
  icon: /favicon.ico
  icon_type: image/x-icon

pwa:
  meta:
    name: Woet Flow
    og_site_name: Woet Flow
    theme_color: "#CC3F14"
  manifest:
    name: Woet Flow
    short_name: Woet Flow
    lang: en

content:
  markdown:
    prism:
      theme: prism-themes/themes/prism-material-oceanic.css

theme:
  light:
    primary: "#CC3F14"
    secondary: "#44318D"
    accentLight: "#E98074"
    accentGrey: "#A4B3B6"
    accentStrong: "#2A1B3D"
    baseText: "#FFF"
    contentBg: "#FFF"
    error: red.lighten1
  dark:
    primary: blue.darken2
    accent: grey.darken3
    secondary: amber.darken3
    info: teal.lighten1
    warning: amber.base
    error: deepOrange.accent4
    success: green.accent3

server:
  port: 8080

sitemap:
  enable: true
"##;

const INDEX_TEMPLATE: &str = r#"---
title: Posts
description: Latest articles
---

Welcome to the blog.
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        bail!("{} already exists in {:?}", CONFIG_FILE, target_dir);
    }

    fs::create_dir_all(target_dir.join("content/articles"))?;
    fs::create_dir_all(target_dir.join("static"))?;

    fs::write(&config_path, CONFIG_TEMPLATE)?;

    let index = target_dir.join("content/index.md");
    if !index.exists() {
        fs::write(index, INDEX_TEMPLATE)?;
    }

    let now = chrono::Local::now();
    let sample = target_dir.join("content/articles/hello-world.md");
    if !sample.exists() {
        fs::write(
            sample,
            format!(
                "---\ntitle: Hello World\ndate: {}\n---\n\n## First post\n\nWritten in markdown.\n",
                now.format("%Y-%m-%d")
            ),
        )?;
    }

    tracing::info!("Initialized site in {:?}", target_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::Site;

    #[test]
    fn test_init_site_is_loadable() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let config = SiteConfig::load(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config.title_template, "%s | Woet Flow");
        assert_eq!(config.canonical.as_deref(), Some("https://woetflow.com"));

        let site = Site::with_config(dir.path(), config);
        let enumeration = site.enumerate().unwrap();
        assert_eq!(
            enumeration.routes.to_vec(),
            vec!["/articles/hello-world", "/"]
        );
    }

    #[test]
    fn test_init_refuses_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
