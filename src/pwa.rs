//! Web app manifest (manifest.json)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;

/// An entry of the manifest's `icons` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebManifest {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub lang: String,
    pub start_url: String,
    pub display: String,
    pub background_color: String,
    pub theme_color: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub icons: Vec<ManifestIcon>,
}

impl WebManifest {
    pub fn from_config(config: &SiteConfig) -> Self {
        let manifest = &config.pwa.manifest;
        let meta = &config.pwa.meta;

        Self {
            name: manifest.name.clone(),
            short_name: manifest.short_name.clone(),
            description: meta.description.clone(),
            lang: manifest.lang.clone(),
            start_url: manifest.start_url.clone(),
            display: manifest.display.clone(),
            background_color: manifest.background_color.clone(),
            theme_color: meta.theme_color.clone(),
            icons: manifest.icons.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write manifest to {}", path.display()))?;
        tracing::info!("Generated {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_from_default_config() {
        let manifest = WebManifest::from_config(&SiteConfig::default());
        assert_eq!(manifest.name, "Woet Flow");
        assert_eq!(manifest.short_name, "Woet Flow");
        assert_eq!(manifest.lang, "en");
        assert_eq!(manifest.theme_color, "#CC3F14");
        assert_eq!(manifest.display, "standalone");
    }

    #[test]
    fn test_manifest_json() {
        let mut config = SiteConfig::default();
        config.pwa.manifest.icons.push(ManifestIcon {
            src: "/icon.png".to_string(),
            sizes: "512x512".to_string(),
            mime_type: "image/png".to_string(),
        });
        let json = WebManifest::from_config(&config).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["start_url"], "/?standalone=true");
        assert_eq!(value["icons"][0]["type"], "image/png");
        // Field order follows the struct
        assert!(json.find("\"name\"").unwrap() < json.find("\"lang\"").unwrap());
    }

    #[test]
    fn test_manifest_without_icons_omits_list() {
        let json = WebManifest::from_config(&SiteConfig::default())
            .to_json()
            .unwrap();
        assert!(!json.contains("icons"));
    }
}
