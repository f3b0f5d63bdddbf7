//! vizstyle
//!
//! A small charting library with a consistent, modern visual theme. Six chart
//! kinds share one palette, font set, and axis styling, and render to SVG or
//! PNG through [plotters](https://crates.io/crates/plotters).
//!
//! ### Chart kinds
//! - [`chart::line`] — one or several lines with markers
//! - [`chart::scatter`] — point cloud with white-rimmed markers
//! - [`chart::bar`] — single or grouped bars, vertical or horizontal
//! - [`chart::histogram`] — binned distribution, optional KDE overlay
//! - [`chart::heatmap`] — annotated matrix with a color bar
//! - [`chart::boxplot`] — quartile boxes with whiskers and outliers
//!
//! ### Example
//! ```no_run
//! use vizstyle::chart::{self, LineOptions};
//! use vizstyle::style::StyleConfig;
//!
//! let style = StyleConfig::default();
//! let x: Vec<f64> = (0..100).map(|i| i as f64 * 0.1).collect();
//! let sin: Vec<f64> = x.iter().map(|v| v.sin()).collect();
//! let cos: Vec<f64> = x.iter().map(|v| v.cos()).collect();
//! let opts = LineOptions {
//!     title: Some("Trigonometric functions".into()),
//!     labels: Some(vec!["sin(x)".into(), "cos(x)".into()]),
//!     ..Default::default()
//! };
//! chart::line(&x, vec![sin, cos], "trig.svg", &opts, &style)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod chart;
pub mod style;

pub use chart::{SeriesData, SeriesSpec};
pub use style::StyleConfig;
