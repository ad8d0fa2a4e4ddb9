//! Theme data consumed by renderer constant providers.
//!
//! Themes are plain data: block-style colour strings, an optional font
//! style and optional component colours. They are serde-derived so hosts
//! can load them from JSON or TOML. Validation and colour derivation happen
//! in the renderer's constant provider, not here, because the derivation
//! rules differ per renderer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Colours for one named block style. Secondary and tertiary colours are
/// optional; the renderer derives missing ones from the primary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockStyle {
    pub colour_primary: String,
    #[serde(default)]
    pub colour_secondary: Option<String>,
    #[serde(default)]
    pub colour_tertiary: Option<String>,
    /// "cap" requests a hat on blocks using this style.
    #[serde(default)]
    pub hat: Option<String>,
}

impl BlockStyle {
    pub fn from_primary(colour: impl Into<String>) -> Self {
        Self {
            colour_primary: colour.into(),
            colour_secondary: None,
            colour_tertiary: None,
            hat: None,
        }
    }
}

/// Font settings for field text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FontStyle {
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub size: Option<f32>,
}

/// Colours for workspace components drawn relative to blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentStyles {
    #[serde(default)]
    pub cursor_colour: Option<String>,
    #[serde(default)]
    pub marker_colour: Option<String>,
    #[serde(default)]
    pub insertion_marker_colour: Option<String>,
    #[serde(default)]
    pub insertion_marker_opacity: Option<f32>,
}

/// A complete theme.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub block_styles: HashMap<String, BlockStyle>,
    #[serde(default)]
    pub font_style: Option<FontStyle>,
    #[serde(default)]
    pub component_styles: ComponentStyles,
    /// When set, overrides the renderer's default start-hat policy.
    #[serde(default)]
    pub start_hats: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_deserializes_with_defaults() {
        let json = r##"{
            "name": "midnight",
            "block_styles": {
                "logic_blocks": {"colour_primary": "#4286f4"}
            },
            "start_hats": true
        }"##;
        let theme: Theme = serde_json::from_str(json).unwrap();
        assert_eq!(theme.name, "midnight");
        assert_eq!(theme.start_hats, Some(true));
        let style = &theme.block_styles["logic_blocks"];
        assert_eq!(style.colour_primary, "#4286f4");
        assert!(style.colour_secondary.is_none());
        assert!(theme.font_style.is_none());
    }

    #[test]
    fn test_block_style_from_primary() {
        let style = BlockStyle::from_primary("#cc0a0a");
        assert_eq!(style.colour_primary, "#cc0a0a");
        assert!(style.hat.is_none());
    }
}
