// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Maps style categories to renderable text formats.
//!
//! The registry ships a fixed dark-theme default table and supports
//! runtime recoloring for a theming/preferences surface. Mutation is
//! theme-wide and takes effect on the next render pass; the registry does
//! not itself trigger re-rendering.

use crate::syntax::types::StyleId;

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Color> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color::rgb(r, g, b))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// A renderable character format: foreground color plus weight and slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextFormat {
    pub color: Color,
    pub bold: bool,
    pub italic: bool,
}

impl TextFormat {
    pub const fn new(color: Color, bold: bool, italic: bool) -> Self {
        Self { color, bold, italic }
    }
}

/// Default dark-theme formats, in `StyleId` table order.
const DEFAULT_FORMATS: [TextFormat; 12] = [
    TextFormat::new(Color::rgb(0xD4, 0xD4, 0xD4), false, false), // plain
    TextFormat::new(Color::rgb(0x56, 0x9C, 0xD6), true, false),  // keyword
    TextFormat::new(Color::rgb(0xCE, 0x91, 0x78), false, false), // string
    TextFormat::new(Color::rgb(0x6A, 0x99, 0x55), false, true),  // comment
    TextFormat::new(Color::rgb(0xB5, 0xCE, 0xA8), false, false), // number
    TextFormat::new(Color::rgb(0xD4, 0xD4, 0xD4), false, false), // operator
    TextFormat::new(Color::rgb(0x56, 0x9C, 0xD6), true, false),  // tag
    TextFormat::new(Color::rgb(0x9C, 0xDC, 0xFE), false, false), // attr-name
    TextFormat::new(Color::rgb(0xCE, 0x91, 0x78), false, false), // attr-value
    TextFormat::new(Color::rgb(0xD4, 0xD4, 0xD4), false, false), // punctuation
    TextFormat::new(Color::rgb(0xDC, 0xDC, 0xAA), false, false), // identifier
    TextFormat::new(Color::rgb(0xC5, 0x86, 0xC0), false, false), // embedded
];

/// Registry of per-style text formats, mutable at runtime for theming.
#[derive(Debug, Clone)]
pub struct StyleRegistry {
    formats: [TextFormat; 12],
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self { formats: DEFAULT_FORMATS }
    }

    /// The format for a style. Every valid `StyleId` maps; there is no
    /// failure path.
    pub fn get_format(&self, style: StyleId) -> TextFormat {
        self.formats[style.index()]
    }

    /// The current foreground color for a style.
    pub fn get_color(&self, style: StyleId) -> Color {
        self.formats[style.index()].color
    }

    /// Overrides the foreground color for a style, keeping weight and
    /// slant.
    pub fn set_color(&mut self, style: StyleId, color: Color) {
        self.formats[style.index()].color = color;
    }

    /// Restores the default dark-theme table.
    pub fn reset_colors(&mut self) {
        self.formats = DEFAULT_FORMATS;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_formats() {
        let registry = StyleRegistry::new();

        let keyword = registry.get_format(StyleId::Keyword);
        assert_eq!(keyword.color.to_hex(), "#569CD6");
        assert!(keyword.bold);
        assert!(!keyword.italic);

        let comment = registry.get_format(StyleId::Comment);
        assert_eq!(comment.color.to_hex(), "#6A9955");
        assert!(comment.italic);

        assert_eq!(registry.get_color(StyleId::Embedded).to_hex(), "#C586C0");
    }

    #[test]
    fn test_every_style_maps() {
        let registry = StyleRegistry::new();
        for style in StyleId::ALL {
            let _ = registry.get_format(style);
        }
    }

    #[test]
    fn test_set_and_reset_colors() {
        let mut registry = StyleRegistry::new();
        let red = Color::rgb(0xFF, 0x00, 0x00);

        registry.set_color(StyleId::String, red);
        assert_eq!(registry.get_color(StyleId::String), red);
        // Weight and slant are untouched by recoloring.
        assert!(registry.get_format(StyleId::Keyword).bold);

        registry.reset_colors();
        assert_eq!(registry.get_color(StyleId::String).to_hex(), "#CE9178");
    }

    #[test]
    fn test_color_hex_round_trip() {
        assert_eq!(Color::from_hex("#569CD6"), Some(Color::rgb(0x56, 0x9C, 0xD6)));
        assert_eq!(Color::from_hex("569cd6"), Some(Color::rgb(0x56, 0x9C, 0xD6)));
        assert_eq!(Color::from_hex("#56"), None);
        assert_eq!(Color::from_hex("#56 CD6"), None);
        assert_eq!(Color::rgb(0x0A, 0xBB, 0xCC).to_hex(), "#0ABBCC");
    }
}
