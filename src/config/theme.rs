//! Theme palettes
//!
//! A palette maps token names (`primary`, `accentLight`, ...) to colors. Each
//! color is either a hex literal or a Material Design token such as
//! `blue.darken2`; both resolve to an uppercase `#RRGGBB` string.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::colors;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    #[error("Invalid hex color: {0}")]
    InvalidHex(String),

    #[error("Unknown color token: {0}")]
    UnknownToken(String),

    #[error("Invalid color value: {0:?}")]
    InvalidValue(String),
}

/// A single palette color as written in the config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColorValue {
    Hex(String),
    Token { family: String, shade: String },
}

impl ColorValue {
    pub fn hex(value: &str) -> Self {
        ColorValue::Hex(value.to_string())
    }

    pub fn token(family: &str, shade: &str) -> Self {
        ColorValue::Token {
            family: family.to_string(),
            shade: shade.to_string(),
        }
    }

    /// Resolve to an uppercase `#RRGGBB` string
    pub fn resolve(&self) -> Result<String, ThemeError> {
        match self {
            ColorValue::Hex(hex) => normalize_hex(hex),
            ColorValue::Token { family, shade } => colors::lookup(family, shade)
                .map(str::to_string)
                .ok_or_else(|| ThemeError::UnknownToken(format!("{family}.{shade}"))),
        }
    }
}

impl FromStr for ColorValue {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('#') {
            normalize_hex(s)?;
            return Ok(ColorValue::Hex(s.to_string()));
        }

        match s.split_once('.') {
            Some((family, shade))
                if !family.is_empty()
                    && !shade.is_empty()
                    && family.chars().all(|c| c.is_ascii_alphabetic())
                    && shade.chars().all(|c| c.is_ascii_alphanumeric()) =>
            {
                Ok(ColorValue::token(family, shade))
            }
            _ => Err(ThemeError::InvalidValue(s.to_string())),
        }
    }
}

impl TryFrom<String> for ColorValue {
    type Error = ThemeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColorValue> for String {
    fn from(value: ColorValue) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorValue::Hex(hex) => f.write_str(hex),
            ColorValue::Token { family, shade } => write!(f, "{family}.{shade}"),
        }
    }
}

/// Expand `#RGB` and uppercase `#RRGGBB`
fn normalize_hex(value: &str) -> Result<String, ThemeError> {
    let digits = value
        .strip_prefix('#')
        .filter(|d| d.chars().all(|c| c.is_ascii_hexdigit()))
        .ok_or_else(|| ThemeError::InvalidHex(value.to_string()))?;

    let expanded = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
        6 => digits.to_string(),
        _ => return Err(ThemeError::InvalidHex(value.to_string())),
    };

    Ok(format!("#{}", expanded.to_ascii_uppercase()))
}

/// Ordered token name to color mapping
pub type Palette = IndexMap<String, ColorValue>;

/// Light and dark palettes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub dark_default: bool,
    pub light: Palette,
    pub dark: Palette,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        let light = [
            ("primary", ColorValue::hex("#CC3F14")),
            ("secondary", ColorValue::hex("#44318D")),
            ("accentLight", ColorValue::hex("#E98074")),
            ("accentGrey", ColorValue::hex("#A4B3B6")),
            ("accentStrong", ColorValue::hex("#2A1B3D")),
            ("baseText", ColorValue::hex("#FFF")),
            ("contentBg", ColorValue::hex("#FFF")),
            ("error", ColorValue::token("red", "lighten1")),
        ];
        let dark = [
            ("primary", ColorValue::token("blue", "darken2")),
            ("accent", ColorValue::token("grey", "darken3")),
            ("secondary", ColorValue::token("amber", "darken3")),
            ("info", ColorValue::token("teal", "lighten1")),
            ("warning", ColorValue::token("amber", "base")),
            ("error", ColorValue::token("deepOrange", "accent4")),
            ("success", ColorValue::token("green", "accent3")),
        ];

        Self {
            dark_default: false,
            light: light.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
            dark: dark.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        }
    }
}

impl ThemeConfig {
    /// Resolve every color of both palettes
    pub fn resolve(&self) -> Result<ResolvedTheme, ThemeError> {
        Ok(ResolvedTheme {
            dark_default: self.dark_default,
            light: resolve_palette(&self.light)?,
            dark: resolve_palette(&self.dark)?,
        })
    }
}

fn resolve_palette(palette: &Palette) -> Result<IndexMap<String, String>, ThemeError> {
    palette
        .iter()
        .map(|(name, color)| Ok((name.clone(), color.resolve()?)))
        .collect()
}

/// Palettes with every color resolved to hex
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTheme {
    pub dark_default: bool,
    pub light: IndexMap<String, String>,
    pub dark: IndexMap<String, String>,
}

impl ResolvedTheme {
    /// Render as CSS custom properties (`--v-accent-light: #E98074;`)
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        push_block(&mut css, ":root", &self.light);
        css.push('\n');
        push_block(&mut css, "[data-theme=\"dark\"]", &self.dark);
        css
    }
}

fn push_block(css: &mut String, selector: &str, palette: &IndexMap<String, String>) {
    css.push_str(selector);
    css.push_str(" {\n");
    for (name, hex) in palette {
        css.push_str(&format!("  --v-{}: {};\n", kebab_case(name), hex));
    }
    css.push_str("}\n");
}

fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
