//! Public types for the chart module: series data, orientation, and the
//! per-kind option structs.

use plotters::style::RGBColor;

/// Values for one chart call: either a single series or an ordered list of
/// series drawn together.
///
/// The single/multiple decision is made here, at the call boundary, by the
/// caller's choice of variant. A `Multi` holding exactly one inner vector is
/// one series; there is no runtime shape sniffing.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesData {
    /// One series.
    Single(Vec<f64>),
    /// Several series, drawn in order.
    Multi(Vec<Vec<f64>>),
}

impl SeriesData {
    /// Number of series this request will draw.
    pub fn series_count(&self) -> usize {
        match self {
            SeriesData::Single(_) => 1,
            SeriesData::Multi(m) => m.len(),
        }
    }

    /// True when no series or only empty series are present.
    pub fn is_empty(&self) -> bool {
        match self {
            SeriesData::Single(v) => v.is_empty(),
            SeriesData::Multi(m) => m.is_empty() || m.iter().all(|v| v.is_empty()),
        }
    }
}

impl From<Vec<f64>> for SeriesData {
    fn from(v: Vec<f64>) -> Self {
        SeriesData::Single(v)
    }
}

impl From<Vec<Vec<f64>>> for SeriesData {
    fn from(m: Vec<Vec<f64>>) -> Self {
        SeriesData::Multi(m)
    }
}

impl From<&[f64]> for SeriesData {
    fn from(v: &[f64]) -> Self {
        SeriesData::Single(v.to_vec())
    }
}

/// Bar and box chart orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// Options for [`crate::chart::line`].
#[derive(Debug, Clone, Default)]
pub struct LineOptions {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// Per-series legend labels, positional.
    pub labels: Option<Vec<String>>,
    /// Per-series colors, cycled when fewer than series.
    pub colors: Option<Vec<RGBColor>>,
    /// Canvas size override (width, height) in pixels.
    pub size: Option<(u32, u32)>,
    /// Locale tag for value-axis tick labels (e.g. "en", "de").
    pub locale: Option<String>,
}

/// Options for [`crate::chart::scatter`].
#[derive(Debug, Clone, Default)]
pub struct ScatterOptions {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub label: Option<String>,
    pub color: Option<RGBColor>,
    /// Marker radius in pixels; defaults from the style's marker size.
    pub point_size: Option<u32>,
    pub size: Option<(u32, u32)>,
}

/// Options for [`crate::chart::bar`].
#[derive(Debug, Clone, Default)]
pub struct BarOptions {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// Per-group legend labels, positional (grouped bars).
    pub labels: Option<Vec<String>>,
    pub colors: Option<Vec<RGBColor>>,
    pub orientation: Orientation,
    pub size: Option<(u32, u32)>,
    pub locale: Option<String>,
}

/// Options for [`crate::chart::histogram`].
#[derive(Debug, Clone)]
pub struct HistogramOptions {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub color: Option<RGBColor>,
    /// Number of equal-width bins.
    pub bins: usize,
    /// Overlay a Gaussian kernel density curve and normalize bars to densities.
    pub kde: bool,
    pub size: Option<(u32, u32)>,
}

impl Default for HistogramOptions {
    fn default() -> Self {
        Self {
            title: None,
            x_label: None,
            y_label: None,
            color: None,
            bins: 30,
            kde: true,
            size: None,
        }
    }
}

/// Options for [`crate::chart::heatmap`].
#[derive(Debug, Clone)]
pub struct HeatmapOptions {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// Column labels, left to right.
    pub x_tick_labels: Option<Vec<String>>,
    /// Row labels, top to bottom.
    pub y_tick_labels: Option<Vec<String>>,
    /// Colormap name, see [`crate::chart::colormap::Colormap::from_name`].
    pub cmap: Option<String>,
    /// Write the cell value inside each cell.
    pub annotate: bool,
    /// Decimal places for cell annotations.
    pub annot_precision: usize,
    pub size: Option<(u32, u32)>,
}

impl Default for HeatmapOptions {
    fn default() -> Self {
        Self {
            title: None,
            x_label: None,
            y_label: None,
            x_tick_labels: None,
            y_tick_labels: None,
            cmap: None,
            annotate: true,
            annot_precision: 2,
            size: None,
        }
    }
}

/// Options for [`crate::chart::boxplot`].
#[derive(Debug, Clone, Default)]
pub struct BoxOptions {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// Per-box tick labels, positional.
    pub labels: Option<Vec<String>>,
    pub colors: Option<Vec<RGBColor>>,
    pub orientation: Orientation,
    pub size: Option<(u32, u32)>,
}
