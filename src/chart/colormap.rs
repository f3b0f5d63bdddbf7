//! Named colormaps for the heatmap: ColorBrewer-style anchor tables with
//! linear interpolation between stops.

use anyhow::{Result, anyhow};
use plotters::style::RGBColor;

use crate::style::parse_hex;

/// ColorBrewer RdYlBu, low to high.
const RD_YL_BU: &[&str] = &[
    "#A50026", "#D73027", "#F46D43", "#FDAE61", "#FEE090", "#FFFFBF", "#E0F3F8", "#ABD9E9",
    "#74ADD1", "#4575B4", "#313695",
];

/// ColorBrewer RdBu, low to high.
const RD_BU: &[&str] = &[
    "#67001F", "#B2182B", "#D6604D", "#F4A582", "#FDDBC7", "#F7F7F7", "#D1E5F0", "#92C5DE",
    "#4393C3", "#2166AC", "#053061",
];

/// Viridis anchor stops, low to high.
const VIRIDIS: &[&str] = &[
    "#440154", "#482878", "#3E4989", "#31688E", "#26828E", "#1F9E89", "#35B779", "#6DCD59",
    "#B4DE2C", "#FDE725",
];

/// An interpolating colormap sampled on `[0, 1]`.
#[derive(Debug, Clone)]
pub struct Colormap {
    anchors: Vec<RGBColor>,
}

impl Colormap {
    /// Look up a colormap by name. A trailing `_r` reverses the map
    /// (`"RdYlBu_r"` runs blue-to-red). Unknown names are an error that
    /// propagates to the caller.
    pub fn from_name(name: &str) -> Result<Self> {
        let (base, reversed) = match name.strip_suffix("_r") {
            Some(b) => (b, true),
            None => (name, false),
        };
        let table = match base.to_ascii_lowercase().as_str() {
            "rdylbu" => RD_YL_BU,
            "rdbu" => RD_BU,
            "viridis" => VIRIDIS,
            _ => return Err(anyhow!("unknown colormap: {name:?}")),
        };
        let mut anchors: Vec<RGBColor> = table
            .iter()
            .map(|hex| parse_hex(hex))
            .collect::<Result<_>>()?;
        if reversed {
            anchors.reverse();
        }
        Ok(Self { anchors })
    }

    /// Sample at `t` in `[0, 1]` (clamped), interpolating linearly between
    /// the two nearest anchors.
    pub fn sample(&self, t: f64) -> RGBColor {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let last = self.anchors.len() - 1;
        let pos = t * last as f64;
        let lo = pos.floor() as usize;
        let hi = pos.ceil() as usize;
        let frac = pos - lo as f64;
        let a = self.anchors[lo];
        let b = self.anchors[hi];
        RGBColor(
            lerp_u8(a.0, b.0, frac),
            lerp_u8(a.1, b.1, frac),
            lerp_u8(a.2, b.2, frac),
        )
    }
}

fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}

/// Relative luminance in `[0, 1]`; used to pick readable annotation ink on
/// top of a cell color.
pub fn relative_luminance(c: RGBColor) -> f64 {
    (0.2126 * c.0 as f64 + 0.7152 * c.1 as f64 + 0.0722 * c.2 as f64) / 255.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive_and_supports_reversal() {
        let fwd = Colormap::from_name("RdYlBu").unwrap();
        let rev = Colormap::from_name("rdylbu_r").unwrap();
        assert_eq!(fwd.sample(0.0), rev.sample(1.0));
        assert_eq!(fwd.sample(1.0), rev.sample(0.0));
    }

    #[test]
    fn unknown_name_is_an_error() {
        assert!(Colormap::from_name("plasma").is_err());
    }

    #[test]
    fn endpoints_hit_the_anchor_colors() {
        let cm = Colormap::from_name("Viridis").unwrap();
        assert_eq!(cm.sample(0.0), parse_hex("#440154").unwrap());
        assert_eq!(cm.sample(1.0), parse_hex("#FDE725").unwrap());
    }

    #[test]
    fn sample_clamps_out_of_range() {
        let cm = Colormap::from_name("RdBu").unwrap();
        assert_eq!(cm.sample(-3.0), cm.sample(0.0));
        assert_eq!(cm.sample(7.0), cm.sample(1.0));
    }

    #[test]
    fn luminance_orders_dark_before_light() {
        assert!(relative_luminance(RGBColor(0, 0, 0)) < relative_luminance(RGBColor(255, 255, 255)));
        assert!(relative_luminance(RGBColor(49, 54, 149)) < 0.5);
    }
}
