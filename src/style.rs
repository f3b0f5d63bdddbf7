//! Shared visual theme applied by every chart constructor.
//!
//! Design:
//! - `StyleConfig` is an explicit value passed to each constructor; there is
//!   no process-wide style state, so per-call overrides never leak.
//! - Colors are stored as `#RRGGBB` hex strings (the serialized form) and
//!   parsed to [`plotters::style::RGBColor`] on use.
//! - The palette is consumed cyclically: series `i` gets `palette[i % len]`.
//!
//! The whole config round-trips through JSON, so a theme can be shipped as a
//! file and loaded with [`StyleConfig::from_json`].

use anyhow::{Context, Result, anyhow};
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Named colors plus the ordered series palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colors {
    pub primary: String,
    pub secondary: String,
    pub tertiary: String,
    pub success: String,
    pub warning: String,
    pub info: String,
    /// Ordered list cycled across series that have no caller-supplied color.
    pub palette: Vec<String>,
}

/// Font sizes in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fonts {
    pub title: u32,
    pub label: u32,
    pub tick: u32,
}

/// Stroke widths and marker sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lines {
    pub width: f64,
    pub marker_size: f64,
}

/// Default canvas geometry and background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub width: u32,
    pub height: u32,
    pub face_color: String,
}

/// Plot-area background, axis strokes, and grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axes {
    pub face_color: String,
    pub edge_color: String,
    pub line_width: u32,
    pub grid_color: String,
    pub grid_alpha: f64,
}

/// The complete theme. Construct with [`Default`] and adjust fields, or load
/// a saved theme with [`StyleConfig::from_json`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    pub colors: Colors,
    pub fonts: Fonts,
    pub lines: Lines,
    pub figure: Figure,
    pub axes: Axes,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            colors: Colors {
                primary: "#2E86AB".into(),
                secondary: "#A23B72".into(),
                tertiary: "#F18F01".into(),
                success: "#06A77D".into(),
                warning: "#D81159".into(),
                info: "#73D2DE".into(),
                palette: vec![
                    "#2E86AB".into(),
                    "#A23B72".into(),
                    "#F18F01".into(),
                    "#06A77D".into(),
                    "#D81159".into(),
                    "#73D2DE".into(),
                ],
            },
            fonts: Fonts {
                title: 16,
                label: 12,
                tick: 10,
            },
            lines: Lines {
                width: 2.5,
                marker_size: 8.0,
            },
            figure: Figure {
                width: 1000,
                height: 600,
                face_color: "#F8F9FA".into(),
            },
            axes: Axes {
                face_color: "#FFFFFF".into(),
                edge_color: "#CCCCCC".into(),
                line_width: 1,
                grid_color: "#DDDDDD".into(),
                grid_alpha: 0.3,
            },
        }
    }
}

impl StyleConfig {
    /// Palette color for series `idx`, cycling when series outnumber the
    /// palette. Falls back to `primary` on an empty palette.
    pub fn palette_color(&self, idx: usize) -> RGBColor {
        if self.colors.palette.is_empty() {
            return parse_hex(&self.colors.primary).unwrap_or(RGBColor(0, 0, 0));
        }
        let hex = &self.colors.palette[idx % self.colors.palette.len()];
        parse_hex(hex).unwrap_or(RGBColor(0, 0, 0))
    }

    /// Parsed `colors.primary`.
    pub fn primary(&self) -> RGBColor {
        parse_hex(&self.colors.primary).unwrap_or(RGBColor(0, 0, 0))
    }

    /// Parsed `colors.secondary`.
    pub fn secondary(&self) -> RGBColor {
        parse_hex(&self.colors.secondary).unwrap_or(RGBColor(0, 0, 0))
    }

    /// Parsed `colors.warning` (used for box-chart medians).
    pub fn warning(&self) -> RGBColor {
        parse_hex(&self.colors.warning).unwrap_or(RGBColor(0, 0, 0))
    }

    /// Load a theme from a JSON file.
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())
            .with_context(|| format!("reading style config {}", path.as_ref().display()))?;
        let cfg: StyleConfig = serde_json::from_str(&raw).context("parsing style config JSON")?;
        Ok(cfg)
    }

    /// Save the theme as pretty-printed JSON.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), raw)
            .with_context(|| format!("writing style config {}", path.as_ref().display()))?;
        Ok(())
    }
}

/// Parse `#RRGGBB` (leading `#` optional, case-insensitive).
pub fn parse_hex(hex: &str) -> Result<RGBColor> {
    let s = hex.trim().trim_start_matches('#');
    if s.len() != 6 {
        return Err(anyhow!("invalid hex color: {hex:?}"));
    }
    let r = u8::from_str_radix(&s[0..2], 16).map_err(|_| anyhow!("invalid hex color: {hex:?}"))?;
    let g = u8::from_str_radix(&s[2..4], 16).map_err(|_| anyhow!("invalid hex color: {hex:?}"))?;
    let b = u8::from_str_radix(&s[4..6], 16).map_err(|_| anyhow!("invalid hex color: {hex:?}"))?;
    Ok(RGBColor(r, g, b))
}

/// Format a color back to `#RRGGBB`.
pub fn to_hex(color: RGBColor) -> String {
    format!("#{:02X}{:02X}{:02X}", color.0, color.1, color.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_accepts_common_forms() {
        assert_eq!(parse_hex("#2E86AB").unwrap(), RGBColor(0x2E, 0x86, 0xAB));
        assert_eq!(parse_hex("2e86ab").unwrap(), RGBColor(0x2E, 0x86, 0xAB));
        assert!(parse_hex("#123").is_err());
        assert!(parse_hex("#GGGGGG").is_err());
    }

    #[test]
    fn hex_round_trip() {
        let c = RGBColor(6, 167, 125);
        assert_eq!(parse_hex(&to_hex(c)).unwrap(), c);
    }

    #[test]
    fn palette_cycles_modulo_length() {
        let style = StyleConfig::default();
        let p = style.colors.palette.len();
        assert_eq!(style.palette_color(0), style.palette_color(p));
        assert_eq!(style.palette_color(2), style.palette_color(p + 2));
    }

    #[test]
    fn default_palette_matches_named_colors() {
        let style = StyleConfig::default();
        assert_eq!(style.colors.palette[0], style.colors.primary);
        assert_eq!(style.colors.palette[1], style.colors.secondary);
        assert_eq!(style.palette_color(0), style.primary());
    }
}
