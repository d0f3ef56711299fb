//! Configuration module

mod colors;
mod site;
pub mod theme;

pub use site::{
    ContentConfig, HeadConfig, MarkdownConfig, PrismConfig, PwaConfig, PwaManifestConfig,
    PwaMetaConfig, ServerConfig, SiteConfig, SitemapConfig, DEFAULT_BASE_URL,
};
pub use theme::{ColorValue, Palette, ResolvedTheme, ThemeConfig, ThemeError};
