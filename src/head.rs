//! HTML head metadata
//!
//! [`SiteMeta`] is the site-wide list of `<meta>` tags, built once from the
//! config. Pages derive their own list with [`SiteMeta::with_page`]; tags are
//! keyed by `hid` (or name/property/charset) and the page's value wins.

use serde::{Deserialize, Serialize};

use crate::config::SiteConfig;
use crate::content::html_escape;

/// A single `<meta>` tag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetaTag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl MetaTag {
    pub fn charset(value: &str) -> Self {
        Self {
            charset: Some(value.to_string()),
            ..Default::default()
        }
    }

    /// `<meta name=.. content=..>` with the name doubling as hid
    pub fn name(name: &str, content: &str) -> Self {
        Self {
            hid: Some(name.to_string()),
            name: Some(name.to_string()),
            content: Some(content.to_string()),
            ..Default::default()
        }
    }

    /// `<meta property=.. content=..>` with the property doubling as hid
    pub fn property(property: &str, content: &str) -> Self {
        Self {
            hid: Some(property.to_string()),
            property: Some(property.to_string()),
            content: Some(content.to_string()),
            ..Default::default()
        }
    }

    /// Identity used for de-duplication
    pub fn key(&self) -> Option<&str> {
        if self.charset.is_some() {
            return Some("charset");
        }
        self.hid
            .as_deref()
            .or(self.name.as_deref())
            .or(self.property.as_deref())
    }

    pub fn to_html(&self) -> String {
        let mut html = String::from("<meta");
        if let Some(hid) = &self.hid {
            html.push_str(&format!(r#" data-hid="{}""#, html_escape(hid)));
        }
        for (attr, value) in [
            ("charset", &self.charset),
            ("name", &self.name),
            ("property", &self.property),
            ("content", &self.content),
        ] {
            if let Some(value) = value {
                html.push_str(&format!(r#" {}="{}""#, attr, html_escape(value)));
            }
        }
        html.push('>');
        html
    }
}

/// A `<link>` tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkTag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hid: Option<String>,
    pub rel: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    pub href: String,
}

impl LinkTag {
    pub fn to_html(&self) -> String {
        let mut html = String::from("<link");
        if let Some(hid) = &self.hid {
            html.push_str(&format!(r#" data-hid="{}""#, html_escape(hid)));
        }
        html.push_str(&format!(r#" rel="{}""#, html_escape(&self.rel)));
        if let Some(t) = &self.link_type {
            html.push_str(&format!(r#" type="{}""#, html_escape(t)));
        }
        html.push_str(&format!(r#" href="{}">"#, html_escape(&self.href)));
        html
    }
}

/// Per-page values layered over the site meta
#[derive(Debug, Clone, Default)]
pub struct PageMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    /// Absolute URL of the page
    pub url: Option<String>,
}

/// Immutable list of head meta tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SiteMeta {
    tags: Vec<MetaTag>,
}

impl SiteMeta {
    /// Build the site-wide meta list from the config
    pub fn for_site(config: &SiteConfig) -> Self {
        let mut meta = Self::default();
        let description = config.description.as_str();
        let image = config.image.as_deref();

        meta.push(MetaTag::name("description", description));
        meta.push(MetaTag::property("og:type", "website"));
        meta.push(MetaTag::property("og:url", &config.base_url));
        meta.push(MetaTag::property("og:title", &config.site_name));
        meta.push(MetaTag::property("og:description", description));
        if let Some(image) = image {
            meta.push(MetaTag::property("og:image", image));
        }
        meta.push(MetaTag::name("twitter:card", "summary_large_image"));
        meta.push(MetaTag::name("twitter:url", &config.base_url));
        meta.push(MetaTag::name("twitter:title", &config.site_name));
        meta.push(MetaTag::name("twitter:description", description));
        if let Some(image) = image {
            meta.push(MetaTag::name("twitter:image", image));
        }

        meta.push(MetaTag::charset(&config.head.charset));
        meta.push(MetaTag::name("viewport", &config.head.viewport));
        meta.push(MetaTag::property("og:site_name", &config.site_name));

        for tag in &config.head.meta {
            meta.push(tag.clone());
        }

        // PWA tags only fill gaps
        let pwa = &config.pwa.meta;
        if pwa.mobile_app {
            meta.push_missing(MetaTag::name("mobile-web-app-capable", "yes"));
            meta.push_missing(MetaTag::name("apple-mobile-web-app-title", &pwa.name));
        }
        meta.push_missing(MetaTag::name("theme-color", &pwa.theme_color));
        meta.push_missing(MetaTag::name("description", &pwa.description));
        meta.push_missing(MetaTag::property("og:site_name", &pwa.og_site_name));

        meta
    }

    /// Derive the meta list of a single page
    pub fn with_page(&self, page: &PageMeta) -> Self {
        let mut meta = self.clone();

        if let Some(title) = &page.title {
            meta.push(MetaTag::property("og:title", title));
            meta.push(MetaTag::name("twitter:title", title));
        }
        if let Some(description) = &page.description {
            meta.push(MetaTag::name("description", description));
            meta.push(MetaTag::property("og:description", description));
            meta.push(MetaTag::name("twitter:description", description));
        }
        if let Some(image) = &page.image {
            meta.push(MetaTag::property("og:image", image));
            meta.push(MetaTag::name("twitter:image", image));
        }
        if let Some(url) = &page.url {
            meta.push(MetaTag::property("og:url", url));
            meta.push(MetaTag::name("twitter:url", url));
        }

        meta
    }

    /// Insert a tag, replacing an existing one with the same key in place
    fn push(&mut self, tag: MetaTag) {
        let existing = tag
            .key()
            .and_then(|key| self.tags.iter().position(|t| t.key() == Some(key)));
        match existing {
            Some(index) => self.tags[index] = tag,
            None => self.tags.push(tag),
        }
    }

    /// Insert a tag only if no tag with the same key exists
    fn push_missing(&mut self, tag: MetaTag) {
        if !self.tags.iter().any(|t| t.key().is_some() && t.key() == tag.key()) {
            self.tags.push(tag);
        }
    }

    pub fn get(&self, key: &str) -> Option<&MetaTag> {
        self.tags.iter().find(|t| t.key() == Some(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetaTag> {
        self.tags.iter()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Everything that goes into a page's `<head>`
#[derive(Debug, Clone, Serialize)]
pub struct Head {
    pub title: String,
    pub meta: SiteMeta,
    pub links: Vec<LinkTag>,
}

impl Head {
    pub fn new(config: &SiteConfig, site_meta: &SiteMeta, page: &PageMeta) -> Self {
        Self {
            title: config.page_title(page.title.as_deref()),
            meta: site_meta.with_page(page),
            links: site_links(config),
        }
    }

    pub fn to_html(&self) -> String {
        let mut html = format!("<title>{}</title>\n", html_escape(&self.title));
        for tag in self.meta.iter() {
            html.push_str(&tag.to_html());
            html.push('\n');
        }
        for link in &self.links {
            html.push_str(&link.to_html());
            html.push('\n');
        }
        html
    }
}

/// Icon, canonical and manifest links
pub fn site_links(config: &SiteConfig) -> Vec<LinkTag> {
    vec![
        LinkTag {
            hid: None,
            rel: "icon".to_string(),
            link_type: Some(config.head.icon_type.clone()),
            href: config.head.icon.clone(),
        },
        LinkTag {
            hid: Some("canonical".to_string()),
            rel: "canonical".to_string(),
            link_type: None,
            href: config.canonical_url().to_string(),
        },
        LinkTag {
            hid: Some("manifest".to_string()),
            rel: "manifest".to_string(),
            link_type: None,
            href: "/manifest.json".to_string(),
        },
    ]
}
