//! Generator module - writes the static site into the public directory

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use walkdir::WalkDir;

use crate::config::ResolvedTheme;
use crate::content::{html_escape, ContentEntry, MarkdownRenderer};
use crate::head::{Head, PageMeta, SiteMeta};
use crate::pwa::WebManifest;
use crate::routes::Enumeration;
use crate::sitemap::{absolute_url, Sitemap};
use crate::templates::{PageContext, TemplateRenderer};
use crate::Site;

/// Static site generator
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
    site_meta: SiteMeta,
    theme: ResolvedTheme,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        let markdown_config = &site.config.content.markdown;
        let markdown = MarkdownRenderer::for_prism_theme(
            &markdown_config.prism.theme,
            markdown_config.line_numbers,
        );

        Ok(Self {
            site: site.clone(),
            renderer: TemplateRenderer::new()?,
            markdown,
            site_meta: SiteMeta::for_site(&site.config),
            theme: site.config.theme.resolve()?,
        })
    }

    /// Generate the entire site from an enumeration
    pub fn generate(&self, enumeration: &Enumeration) -> Result<()> {
        fs::create_dir_all(&self.site.public_dir).with_context(|| {
            format!("Failed to create {}", self.site.public_dir.display())
        })?;

        self.copy_static_files()?;

        for (route, entry) in enumeration.pages() {
            self.generate_page(route, entry)
                .with_context(|| format!("Failed to generate {} from {}", route, entry.source))?;
        }
        tracing::info!("Generated {} pages", enumeration.routes.len());

        if self.site.config.sitemap.enable {
            let sitemap = Sitemap::from_enumeration(self.site.config.hostname(), enumeration);
            sitemap.write(&self.site.public_dir.join(&self.site.config.sitemap.path))?;
        }

        WebManifest::from_config(&self.site.config)
            .write(&self.site.public_dir.join("manifest.json"))?;

        let theme_path = self.site.public_dir.join("theme.css");
        fs::write(&theme_path, self.theme.to_css())
            .with_context(|| format!("Failed to write {}", theme_path.display()))?;
        tracing::debug!("Generated theme.css");

        Ok(())
    }

    /// Render and write one page
    fn generate_page(&self, route: &str, entry: &ContentEntry) -> Result<()> {
        let rendered = self.markdown.render(&entry.body)?;
        let fm = &entry.front_matter;
        let title = entry.title();

        let page_meta = PageMeta {
            title: Some(title.clone()),
            description: fm.description.clone(),
            image: fm.image.clone(),
            url: Some(absolute_url(self.site.config.hostname(), route)),
        };
        let head = Head::new(&self.site.config, &self.site_meta, &page_meta);

        let toc = rendered
            .toc
            .into_iter()
            .map(|mut item| {
                item.text = html_escape(&item.text);
                item
            })
            .collect();

        let context = PageContext {
            lang: self.site.config.pwa.manifest.lang.clone(),
            dark: self.theme.dark_default,
            head: head.to_html(),
            site_name: html_escape(&self.site.config.site_name),
            title: html_escape(&title),
            date: fm.parse_date().map(|d| d.format("%Y-%m-%d").to_string()),
            toc,
            content: rendered.html,
        };

        let html = self.renderer.render_page(&context)?;
        let output_path = self.output_path(route);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, html)?;
        tracing::debug!("Generated {} -> {}", route, output_path.display());

        Ok(())
    }

    /// `/` -> `index.html`, `/a/b` and `/a/b/` -> `a/b/index.html`
    fn output_path(&self, route: &str) -> PathBuf {
        let mut path = self.site.public_dir.clone();
        for segment in route.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.join("index.html")
    }

    /// Copy the static directory verbatim
    fn copy_static_files(&self) -> Result<()> {
        let static_dir = &self.site.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping static file: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.site.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)
                .with_context(|| format!("Failed to copy {}", path.display()))?;
            copied += 1;
        }

        tracing::debug!("Copied {} static files", copied);
        Ok(())
    }
}
