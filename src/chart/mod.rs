//! Styled chart constructors: render line, scatter, bar, histogram, heatmap,
//! and box charts to **SVG** or **PNG** with one shared visual theme.
//!
//! - Series colors come from the theme palette, cycled positionally
//! - Single vs. multiple series is decided by the [`SeriesData`] variant,
//!   never by shape sniffing
//! - Output format follows the file extension (`.svg`, anything else bitmap)
//! - Each file-path entry point has a `draw_*` twin that is generic over the
//!   Plotters backend, for callers that own their drawing area

pub mod colormap;
pub mod kde;
pub mod normalize;
pub mod types;
pub mod util;

pub use normalize::{SeriesSpec, normalize_series};
pub use types::{
    BarOptions, BoxOptions, HeatmapOptions, HistogramOptions, LineOptions, Orientation,
    ScatterOptions, SeriesData,
};

use anyhow::{Result, anyhow};
use log::debug;

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::{AreaSeries, LineSeries, PointSeries};
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;
use std::sync::Once;

use crate::style::{StyleConfig, parse_hex};
use colormap::{Colormap, relative_luminance};
use normalize::wrap_groups;
use util::{box_stats, fmt_axis_value, histogram_bins, map_locale, pad_range, value_extent};

/// One-time registration for a fallback "sans-serif" font when using the
/// `ab_glyph` text path. Required because `ab_glyph` doesn't discover OS
/// fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    // Safe to call many times; only runs once.
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

const MARGIN: u32 = 16;
// Ink shades for title, axis descriptions, and tick labels.
const TITLE_INK: RGBColor = RGBColor(0x33, 0x33, 0x33);
const LABEL_INK: RGBColor = RGBColor(0x55, 0x55, 0x55);
const TICK_INK: RGBColor = RGBColor(0x66, 0x66, 0x66);

fn canvas_size(over: Option<(u32, u32)>, style: &StyleConfig) -> (u32, u32) {
    over.unwrap_or((style.figure.width, style.figure.height))
}

fn err<E: std::fmt::Debug>(e: E) -> anyhow::Error {
    anyhow!("{:?}", e)
}

/// Category tick formatter: shows `names[i]` at integer positions, nothing
/// between them.
fn category_label(x: f64, names: &[String]) -> String {
    let i = x.round();
    if (x - i).abs() > 0.3 || i < 0.0 {
        return String::new();
    }
    names.get(i as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------
// Line
// ---------------------------------------------------------------

/// Render a styled line chart to `out_path`. `y` is one series
/// (`Vec<f64>`) or several (`Vec<Vec<f64>>`) sharing the same `x`.
pub fn line<P: AsRef<Path>>(
    x: &[f64],
    y: impl Into<SeriesData>,
    out_path: P,
    opts: &LineOptions,
    style: &StyleConfig,
) -> Result<()> {
    let y = y.into();
    if x.is_empty() || y.is_empty() {
        return Err(anyhow!("no data to plot"));
    }
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let (w, h) = canvas_size(opts.size, style);
    debug!(
        "line chart: {} series -> {}",
        y.series_count(),
        out_path.display()
    );

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (w, h)).into_drawing_area();
        draw_line(root, x, &y, opts, style)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (w, h)).into_drawing_area();
        draw_line(root, x, &y, opts, style)?;
    }
    Ok(())
}

/// Draw a line chart onto any Plotters drawing area.
pub fn draw_line<DB>(
    root: DrawingArea<DB, Shift>,
    x: &[f64],
    y: &SeriesData,
    opts: &LineOptions,
    style: &StyleConfig,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let series = normalize_series(
        y,
        opts.labels.as_deref(),
        opts.colors.as_deref(),
        "Series",
        style,
    );

    let (x_min, x_max) = pad_range(
        x.iter().cloned().fold(f64::INFINITY, f64::min),
        x.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
    );
    let all_y: Vec<f64> = series.iter().flat_map(|s| s.values.iter().copied()).collect();
    let (y_min, y_max) = value_extent(&all_y)
        .map(|(a, b)| pad_range(a, b))
        .ok_or_else(|| anyhow!("no numeric values to plot"))?;

    root.fill(&parse_hex(&style.figure.face_color)?).map_err(err)?;

    let mut builder = ChartBuilder::on(&root);
    builder
        .margin(MARGIN)
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 48);
    if let Some(title) = &opts.title {
        builder.caption(
            title,
            (FontFamily::SansSerif, style.fonts.title)
                .into_font()
                .color(&TITLE_INK),
        );
    }
    let mut chart = builder
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(err)?;

    chart
        .plotting_area()
        .fill(&parse_hex(&style.axes.face_color)?)
        .map_err(err)?;

    let locale = map_locale(opts.locale.as_deref().unwrap_or("en"));
    let grid = parse_hex(&style.axes.grid_color)?.mix(style.axes.grid_alpha);
    let edge = parse_hex(&style.axes.edge_color)?;
    let y_fmt = |v: &f64| fmt_axis_value(*v, locale);
    let mut mesh = chart.configure_mesh();
    mesh.bold_line_style(grid)
        .light_line_style(TRANSPARENT)
        .axis_style(ShapeStyle::from(&edge).stroke_width(style.axes.line_width))
        .label_style(
            (FontFamily::SansSerif, style.fonts.tick)
                .into_font()
                .color(&TICK_INK),
        )
        .axis_desc_style(
            (FontFamily::SansSerif, style.fonts.label)
                .into_font()
                .color(&LABEL_INK),
        )
        .y_label_formatter(&y_fmt);
    if let Some(xl) = &opts.x_label {
        mesh.x_desc(xl.as_str());
    }
    if let Some(yl) = &opts.y_label {
        mesh.y_desc(yl.as_str());
    }
    mesh.draw().map_err(err)?;

    let stroke = style.lines.width.round() as u32;
    let marker = (style.lines.marker_size * 0.35).round().max(2.0) as i32;
    let mut has_labels = false;

    for spec in &series {
        let color = spec.color.mix(0.9);
        let pts: Vec<(f64, f64)> = x
            .iter()
            .zip(spec.values.iter())
            .map(|(a, b)| (*a, *b))
            .collect();
        let line_style = ShapeStyle {
            color,
            filled: false,
            stroke_width: stroke,
        };
        let elem = chart
            .draw_series(LineSeries::new(pts.clone(), line_style))
            .map_err(err)?;
        if let Some(label) = &spec.label {
            has_labels = true;
            let glyph_color = color;
            elem.label(label.clone()).legend(move |(lx, ly)| {
                PathElement::new(vec![(lx, ly), (lx + 24, ly)], glyph_color.stroke_width(2))
            });
        }
        chart
            .draw_series(
                pts.iter()
                    .map(|(a, b)| Circle::new((*a, *b), marker, color.filled())),
            )
            .map_err(err)?;
    }

    if has_labels {
        chart
            .configure_series_labels()
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.85))
            .label_font((FontFamily::SansSerif, style.fonts.tick))
            .draw()
            .map_err(err)?;
    }

    root.present().map_err(err)?;
    Ok(())
}

// ---------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------

/// Render a styled scatter chart to `out_path`.
pub fn scatter<P: AsRef<Path>>(
    x: &[f64],
    y: &[f64],
    out_path: P,
    opts: &ScatterOptions,
    style: &StyleConfig,
) -> Result<()> {
    if x.is_empty() || y.is_empty() {
        return Err(anyhow!("no data to plot"));
    }
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let (w, h) = canvas_size(opts.size, style);
    debug!("scatter chart: {} points -> {}", x.len(), out_path.display());

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (w, h)).into_drawing_area();
        draw_scatter(root, x, y, opts, style)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (w, h)).into_drawing_area();
        draw_scatter(root, x, y, opts, style)?;
    }
    Ok(())
}

/// Draw a scatter chart onto any Plotters drawing area.
pub fn draw_scatter<DB>(
    root: DrawingArea<DB, Shift>,
    x: &[f64],
    y: &[f64],
    opts: &ScatterOptions,
    style: &StyleConfig,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let (x_min, x_max) = value_extent(x)
        .map(|(a, b)| pad_range(a, b))
        .ok_or_else(|| anyhow!("no numeric values to plot"))?;
    let (y_min, y_max) = value_extent(y)
        .map(|(a, b)| pad_range(a, b))
        .ok_or_else(|| anyhow!("no numeric values to plot"))?;

    root.fill(&parse_hex(&style.figure.face_color)?).map_err(err)?;

    let mut builder = ChartBuilder::on(&root);
    builder
        .margin(MARGIN)
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 48);
    if let Some(title) = &opts.title {
        builder.caption(
            title,
            (FontFamily::SansSerif, style.fonts.title)
                .into_font()
                .color(&TITLE_INK),
        );
    }
    let mut chart = builder
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(err)?;

    chart
        .plotting_area()
        .fill(&parse_hex(&style.axes.face_color)?)
        .map_err(err)?;

    let grid = parse_hex(&style.axes.grid_color)?.mix(style.axes.grid_alpha);
    let edge = parse_hex(&style.axes.edge_color)?;
    let mut mesh = chart.configure_mesh();
    mesh.bold_line_style(grid)
        .light_line_style(TRANSPARENT)
        .axis_style(ShapeStyle::from(&edge).stroke_width(style.axes.line_width))
        .label_style(
            (FontFamily::SansSerif, style.fonts.tick)
                .into_font()
                .color(&TICK_INK),
        )
        .axis_desc_style(
            (FontFamily::SansSerif, style.fonts.label)
                .into_font()
                .color(&LABEL_INK),
        );
    if let Some(xl) = &opts.x_label {
        mesh.x_desc(xl.as_str());
    }
    if let Some(yl) = &opts.y_label {
        mesh.y_desc(yl.as_str());
    }
    mesh.draw().map_err(err)?;

    let color = opts.color.unwrap_or_else(|| style.primary());
    let radius = opts
        .point_size
        .unwrap_or((style.lines.marker_size * 0.6).round() as u32) as i32;

    let elem = chart
        .draw_series(PointSeries::of_element(
            x.iter().zip(y.iter()).map(|(a, b)| (*a, *b)),
            radius,
            color.mix(0.7).filled(),
            &|coord, size, st| {
                EmptyElement::at(coord)
                    + Circle::new((0, 0), size, st)
                    + Circle::new((0, 0), size, WHITE.stroke_width(1))
            },
        ))
        .map_err(err)?;

    if let Some(label) = &opts.label {
        let glyph = color.mix(0.7);
        elem.label(label.clone()).legend(move |(lx, ly)| {
            EmptyElement::at((lx, ly)) + Circle::new((8, 0), 4, glyph.filled())
        });
        chart
            .configure_series_labels()
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.85))
            .label_font((FontFamily::SansSerif, style.fonts.tick))
            .draw()
            .map_err(err)?;
    }

    root.present().map_err(err)?;
    Ok(())
}

// ---------------------------------------------------------------
// Bar
// ---------------------------------------------------------------

/// Render a styled bar chart to `out_path`. `y` is one value per category
/// (`Vec<f64>`) or one vector per group (`Vec<Vec<f64>>`) for grouped bars.
pub fn bar<P: AsRef<Path>>(
    categories: &[String],
    y: impl Into<SeriesData>,
    out_path: P,
    opts: &BarOptions,
    style: &StyleConfig,
) -> Result<()> {
    let y = y.into();
    if categories.is_empty() || y.is_empty() {
        return Err(anyhow!("no data to plot"));
    }
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let (w, h) = canvas_size(opts.size, style);
    debug!(
        "bar chart: {} categories, {} group(s) -> {}",
        categories.len(),
        y.series_count(),
        out_path.display()
    );

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (w, h)).into_drawing_area();
        draw_bar(root, categories, &y, opts, style)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (w, h)).into_drawing_area();
        draw_bar(root, categories, &y, opts, style)?;
    }
    Ok(())
}

/// Draw a bar chart onto any Plotters drawing area.
pub fn draw_bar<DB>(
    root: DrawingArea<DB, Shift>,
    categories: &[String],
    y: &SeriesData,
    opts: &BarOptions,
    style: &StyleConfig,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let groups = normalize_series(
        y,
        opts.labels.as_deref(),
        opts.colors.as_deref(),
        "Group",
        style,
    );
    let n_cat = categories.len();
    let n_groups = groups.len().max(1);
    let group_width = 0.8f64;
    let bar_w = group_width / n_groups as f64;

    let all_y: Vec<f64> = groups.iter().flat_map(|g| g.values.iter().copied()).collect();
    let (raw_min, raw_max) =
        value_extent(&all_y).ok_or_else(|| anyhow!("no numeric values to plot"))?;
    // Bars grow from a zero baseline.
    let (v_min, v_max) = pad_range(raw_min.min(0.0), raw_max.max(0.0));

    root.fill(&parse_hex(&style.figure.face_color)?).map_err(err)?;

    let cat_min = -0.5f64;
    let cat_max = n_cat as f64 - 0.5;
    let horizontal = opts.orientation == Orientation::Horizontal;

    let mut builder = ChartBuilder::on(&root);
    builder
        .margin(MARGIN)
        .set_label_area_size(LabelAreaPosition::Left, if horizontal { 90 } else { 70 })
        .set_label_area_size(LabelAreaPosition::Bottom, 48);
    if let Some(title) = &opts.title {
        builder.caption(
            title,
            (FontFamily::SansSerif, style.fonts.title)
                .into_font()
                .color(&TITLE_INK),
        );
    }
    // Category axis is X when vertical, Y when horizontal.
    let mut chart = if horizontal {
        builder
            .build_cartesian_2d(v_min..v_max, cat_min..cat_max)
            .map_err(err)?
    } else {
        builder
            .build_cartesian_2d(cat_min..cat_max, v_min..v_max)
            .map_err(err)?
    };

    chart
        .plotting_area()
        .fill(&parse_hex(&style.axes.face_color)?)
        .map_err(err)?;

    let locale = map_locale(opts.locale.as_deref().unwrap_or("en"));
    let grid = parse_hex(&style.axes.grid_color)?.mix(style.axes.grid_alpha);
    let edge = parse_hex(&style.axes.edge_color)?;
    let cat_fmt = |v: &f64| category_label(*v, categories);
    let val_fmt = |v: &f64| fmt_axis_value(*v, locale);
    let mut mesh = chart.configure_mesh();
    mesh.bold_line_style(grid)
        .light_line_style(TRANSPARENT)
        .axis_style(ShapeStyle::from(&edge).stroke_width(style.axes.line_width))
        .label_style(
            (FontFamily::SansSerif, style.fonts.tick)
                .into_font()
                .color(&TICK_INK),
        )
        .axis_desc_style(
            (FontFamily::SansSerif, style.fonts.label)
                .into_font()
                .color(&LABEL_INK),
        );
    if horizontal {
        mesh.y_labels(n_cat.min(24))
            .y_label_formatter(&cat_fmt)
            .x_label_formatter(&val_fmt);
    } else {
        mesh.x_labels(n_cat.min(24))
            .x_label_formatter(&cat_fmt)
            .y_label_formatter(&val_fmt);
    }
    if let Some(xl) = &opts.x_label {
        mesh.x_desc(xl.as_str());
    }
    if let Some(yl) = &opts.y_label {
        mesh.y_desc(yl.as_str());
    }
    mesh.draw().map_err(err)?;

    let multi = matches!(y, SeriesData::Multi(_));
    let mut has_labels = false;

    for (gi, group) in groups.iter().enumerate() {
        let color = group.color.mix(0.8);

        for (ci, v) in group.values.iter().enumerate().take(n_cat) {
            // Bars of one category are offset symmetrically around its
            // center tick.
            let c0 = ci as f64 - group_width / 2.0 + gi as f64 * bar_w;
            let c1 = c0 + bar_w;
            let v0 = 0.0f64.min(*v);
            let v1 = 0.0f64.max(*v);
            let (corner_a, corner_b) = if horizontal {
                ((v0, c0), (v1, c1))
            } else {
                ((c0, v0), (c1, v1))
            };
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [corner_a, corner_b],
                    color.filled(),
                )))
                .map_err(err)?;
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [corner_a, corner_b],
                    WHITE.stroke_width(1),
                )))
                .map_err(err)?;
        }

        // Legend entries: always for grouped bars, single bars only when the
        // caller labeled them.
        if let Some(label) = group.label.as_ref().filter(|_| multi || opts.labels.is_some()) {
            has_labels = true;
            let glyph = color;
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    [(cat_min, v_min), (cat_min, v_min)],
                    TRANSPARENT,
                )))
                .map_err(err)?
                .label(label.clone())
                .legend(move |(lx, ly)| {
                    Rectangle::new([(lx, ly - 5), (lx + 12, ly + 5)], glyph.filled())
                });
        }
    }

    if has_labels {
        chart
            .configure_series_labels()
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.85))
            .label_font((FontFamily::SansSerif, style.fonts.tick))
            .draw()
            .map_err(err)?;
    }

    root.present().map_err(err)?;
    Ok(())
}

// ---------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------

/// Render a styled histogram to `out_path`, optionally overlaid with a
/// Gaussian kernel density curve.
pub fn histogram<P: AsRef<Path>>(
    data: &[f64],
    out_path: P,
    opts: &HistogramOptions,
    style: &StyleConfig,
) -> Result<()> {
    if data.is_empty() {
        return Err(anyhow!("no data to plot"));
    }
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let (w, h) = canvas_size(opts.size, style);
    debug!(
        "histogram: {} values, {} bins -> {}",
        data.len(),
        opts.bins,
        out_path.display()
    );

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (w, h)).into_drawing_area();
        draw_histogram(root, data, opts, style)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (w, h)).into_drawing_area();
        draw_histogram(root, data, opts, style)?;
    }
    Ok(())
}

/// Draw a histogram onto any Plotters drawing area.
pub fn draw_histogram<DB>(
    root: DrawingArea<DB, Shift>,
    data: &[f64],
    opts: &HistogramOptions,
    style: &StyleConfig,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let (d_min, d_max) = value_extent(data)
        .map(|(a, b)| pad_range(a, b))
        .ok_or_else(|| anyhow!("no numeric values to plot"))?;
    let (edges, counts) = histogram_bins(data, opts.bins, d_min, d_max);
    let bin_width = edges[1] - edges[0];
    let n = data.iter().filter(|v| v.is_finite()).count().max(1);

    // With the density overlay the bars are normalized so both share a scale.
    let heights: Vec<f64> = if opts.kde {
        counts
            .iter()
            .map(|c| *c as f64 / (n as f64 * bin_width))
            .collect()
    } else {
        counts.iter().map(|c| *c as f64).collect()
    };
    let curve = if opts.kde {
        kde::gaussian_kde(data, 200)
    } else {
        Vec::new()
    };

    let bar_top = heights.iter().cloned().fold(0.0f64, f64::max);
    let curve_top = curve.iter().map(|(_, d)| *d).fold(0.0f64, f64::max);
    let y_max = (bar_top.max(curve_top)) * 1.05;
    let y_max = if y_max > 0.0 { y_max } else { 1.0 };

    root.fill(&parse_hex(&style.figure.face_color)?).map_err(err)?;

    let mut builder = ChartBuilder::on(&root);
    builder
        .margin(MARGIN)
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 48);
    if let Some(title) = &opts.title {
        builder.caption(
            title,
            (FontFamily::SansSerif, style.fonts.title)
                .into_font()
                .color(&TITLE_INK),
        );
    }
    let mut chart = builder
        .build_cartesian_2d(d_min..d_max, 0.0..y_max)
        .map_err(err)?;

    chart
        .plotting_area()
        .fill(&parse_hex(&style.axes.face_color)?)
        .map_err(err)?;

    let grid = parse_hex(&style.axes.grid_color)?.mix(style.axes.grid_alpha);
    let edge = parse_hex(&style.axes.edge_color)?;
    let y_desc = opts
        .y_label
        .clone()
        .unwrap_or_else(|| if opts.kde { "Density" } else { "Frequency" }.to_string());
    let mut mesh = chart.configure_mesh();
    mesh.bold_line_style(grid)
        .light_line_style(TRANSPARENT)
        .axis_style(ShapeStyle::from(&edge).stroke_width(style.axes.line_width))
        .label_style(
            (FontFamily::SansSerif, style.fonts.tick)
                .into_font()
                .color(&TICK_INK),
        )
        .axis_desc_style(
            (FontFamily::SansSerif, style.fonts.label)
                .into_font()
                .color(&LABEL_INK),
        )
        .y_desc(y_desc);
    if let Some(xl) = &opts.x_label {
        mesh.x_desc(xl.as_str());
    }
    mesh.draw().map_err(err)?;

    let color = opts.color.unwrap_or_else(|| style.primary()).mix(0.7);
    for (i, h) in heights.iter().enumerate() {
        if *h <= 0.0 {
            continue;
        }
        let corners = [(edges[i], 0.0), (edges[i + 1], *h)];
        chart
            .draw_series(std::iter::once(Rectangle::new(corners, color.filled())))
            .map_err(err)?;
        chart
            .draw_series(std::iter::once(Rectangle::new(
                corners,
                WHITE.stroke_width(1),
            )))
            .map_err(err)?;
    }

    if !curve.is_empty() {
        let kde_color = style.secondary();
        let stroke = style.lines.width.round() as u32;
        let fill = kde_color.mix(0.15).filled();
        let border = kde_color.stroke_width(stroke);
        chart
            .draw_series(AreaSeries::new(curve.clone(), 0.0, fill).border_style(border))
            .map_err(err)?
            .label("Density (KDE)")
            .legend(move |(lx, ly)| {
                PathElement::new(vec![(lx, ly), (lx + 24, ly)], kde_color.stroke_width(2))
            });
        chart
            .configure_series_labels()
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.85))
            .label_font((FontFamily::SansSerif, style.fonts.tick))
            .draw()
            .map_err(err)?;
    }

    root.present().map_err(err)?;
    Ok(())
}

// ---------------------------------------------------------------
// Heatmap
// ---------------------------------------------------------------

/// Render an annotated heatmap of a row-major matrix to `out_path`.
pub fn heatmap<P: AsRef<Path>>(
    matrix: &[Vec<f64>],
    out_path: P,
    opts: &HeatmapOptions,
    style: &StyleConfig,
) -> Result<()> {
    if matrix.is_empty() || matrix.iter().all(|r| r.is_empty()) {
        return Err(anyhow!("no data to plot"));
    }
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    // Heatmaps default to a squarer canvas than the other kinds.
    let (w, h) = opts
        .size
        .unwrap_or((style.figure.width, style.figure.width * 4 / 5));
    debug!(
        "heatmap: {}x{} cells -> {}",
        matrix.len(),
        matrix.first().map(|r| r.len()).unwrap_or(0),
        out_path.display()
    );

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (w, h)).into_drawing_area();
        draw_heatmap(root, matrix, opts, style)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (w, h)).into_drawing_area();
        draw_heatmap(root, matrix, opts, style)?;
    }
    Ok(())
}

/// Draw an annotated heatmap onto any Plotters drawing area.
pub fn draw_heatmap<DB>(
    root: DrawingArea<DB, Shift>,
    matrix: &[Vec<f64>],
    opts: &HeatmapOptions,
    style: &StyleConfig,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let n_rows = matrix.len();
    let n_cols = matrix.iter().map(|r| r.len()).max().unwrap_or(0);
    if n_rows == 0 || n_cols == 0 {
        return Err(anyhow!("no data to plot"));
    }

    let cells: Vec<f64> = matrix
        .iter()
        .flat_map(|r| r.iter().copied())
        .filter(|v| v.is_finite())
        .collect();
    let (raw_min, raw_max) =
        value_extent(&cells).ok_or_else(|| anyhow!("no numeric values to plot"))?;
    let (v_min, v_max) = pad_range(raw_min, raw_max);
    let span = v_max - v_min;

    let cmap = Colormap::from_name(opts.cmap.as_deref().unwrap_or("RdYlBu_r"))?;

    root.fill(&parse_hex(&style.figure.face_color)?).map_err(err)?;

    // Cell grid on the left, color bar in a narrow panel on the right.
    let (plot_area, bar_area) = root.split_horizontally((88).percent_width());

    let mut builder = ChartBuilder::on(&plot_area);
    builder
        .margin(MARGIN)
        .set_label_area_size(LabelAreaPosition::Left, 80)
        .set_label_area_size(LabelAreaPosition::Bottom, 48);
    if let Some(title) = &opts.title {
        builder.caption(
            title,
            (FontFamily::SansSerif, style.fonts.title)
                .into_font()
                .color(&TITLE_INK),
        );
    }
    let mut chart = builder
        .build_cartesian_2d(-0.5..(n_cols as f64 - 0.5), -0.5..(n_rows as f64 - 0.5))
        .map_err(err)?;

    let default_x: Vec<String> = (0..n_cols).map(|i| i.to_string()).collect();
    let default_y: Vec<String> = (0..n_rows).map(|i| i.to_string()).collect();
    let col_names = opts.x_tick_labels.as_deref().unwrap_or(&default_x);
    let row_names = opts.y_tick_labels.as_deref().unwrap_or(&default_y);

    // Row 0 is drawn at the top; flip the y index for labels and cells alike.
    let x_fmt = |v: &f64| category_label(*v, col_names);
    let y_fmt = |v: &f64| {
        let i = v.round();
        if (v - i).abs() > 0.3 || i < 0.0 {
            return String::new();
        }
        let flipped = n_rows as f64 - 1.0 - i;
        if flipped < 0.0 {
            return String::new();
        }
        row_names.get(flipped as usize).cloned().unwrap_or_default()
    };

    let edge = parse_hex(&style.axes.edge_color)?;
    let mut mesh = chart.configure_mesh();
    // No grid on heatmaps; the white cell gaps do that job.
    mesh.disable_x_mesh()
        .disable_y_mesh()
        .axis_style(ShapeStyle::from(&edge).stroke_width(style.axes.line_width))
        .x_labels(n_cols.min(24))
        .y_labels(n_rows.min(24))
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&y_fmt)
        .label_style(
            (FontFamily::SansSerif, style.fonts.tick)
                .into_font()
                .color(&TICK_INK),
        )
        .axis_desc_style(
            (FontFamily::SansSerif, style.fonts.label)
                .into_font()
                .color(&LABEL_INK),
        );
    if let Some(xl) = &opts.x_label {
        mesh.x_desc(xl.as_str());
    }
    if let Some(yl) = &opts.y_label {
        mesh.y_desc(yl.as_str());
    }
    mesh.draw().map_err(err)?;

    let annot_font = (FontFamily::SansSerif, style.fonts.tick).into_font();
    let center = Pos::new(HPos::Center, VPos::Center);

    for (r, row) in matrix.iter().enumerate() {
        let yc = n_rows as f64 - 1.0 - r as f64;
        for (c, v) in row.iter().enumerate() {
            if !v.is_finite() {
                continue;
            }
            let t = if span > 0.0 { (v - v_min) / span } else { 0.5 };
            let fill = cmap.sample(t);
            let corners = [(c as f64 - 0.5, yc - 0.5), (c as f64 + 0.5, yc + 0.5)];
            chart
                .draw_series(std::iter::once(Rectangle::new(corners, fill.filled())))
                .map_err(err)?;
            chart
                .draw_series(std::iter::once(Rectangle::new(
                    corners,
                    WHITE.stroke_width(1),
                )))
                .map_err(err)?;

            if opts.annotate {
                let ink = if relative_luminance(fill) < 0.5 {
                    WHITE.to_rgba()
                } else {
                    TITLE_INK.to_rgba()
                };
                let text = format!("{:.*}", opts.annot_precision, v);
                chart
                    .draw_series(std::iter::once(Text::new(
                        text,
                        (c as f64, yc),
                        annot_font.clone().color(&ink).pos(center),
                    )))
                    .map_err(err)?;
            }
        }
    }

    draw_colorbar(&bar_area, &cmap, v_min, v_max, style)?;

    plot_area.present().map_err(err)?;
    bar_area.present().map_err(err)?;
    Ok(())
}

/// Vertical gradient strip with value labels, drawn next to a heatmap.
fn draw_colorbar<DB>(
    area: &DrawingArea<DB, Shift>,
    cmap: &Colormap,
    v_min: f64,
    v_max: f64,
    style: &StyleConfig,
) -> Result<()>
where
    DB: DrawingBackend,
{
    let mut chart = ChartBuilder::on(area)
        .margin(MARGIN)
        .margin_top(MARGIN + 24)
        .margin_bottom(MARGIN + 24)
        .set_label_area_size(LabelAreaPosition::Right, 44)
        .build_cartesian_2d(0.0..1.0, v_min..v_max)
        .map_err(err)?;

    let locale = map_locale("en");
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(0)
        .y_labels(6)
        .y_label_formatter(&|v| fmt_axis_value(*v, locale))
        .label_style(
            (FontFamily::SansSerif, style.fonts.tick)
                .into_font()
                .color(&TICK_INK),
        )
        .draw()
        .map_err(err)?;

    const STEPS: usize = 64;
    let step = (v_max - v_min) / STEPS as f64;
    for i in 0..STEPS {
        let lo = v_min + step * i as f64;
        let color = cmap.sample((i as f64 + 0.5) / STEPS as f64);
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(0.0, lo), (1.0, lo + step)],
                color.filled(),
            )))
            .map_err(err)?;
    }
    Ok(())
}

// ---------------------------------------------------------------
// Box
// ---------------------------------------------------------------

/// Render a styled box chart to `out_path`. A flat `Vec<f64>` draws one box;
/// a `Vec<Vec<f64>>` draws one box per inner vector.
pub fn boxplot<P: AsRef<Path>>(
    data: impl Into<SeriesData>,
    out_path: P,
    opts: &BoxOptions,
    style: &StyleConfig,
) -> Result<()> {
    let data = data.into();
    if data.is_empty() {
        return Err(anyhow!("no data to plot"));
    }
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let (w, h) = canvas_size(opts.size, style);
    debug!(
        "box chart: {} group(s) -> {}",
        data.series_count(),
        out_path.display()
    );

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (w, h)).into_drawing_area();
        draw_boxplot(root, &data, opts, style)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (w, h)).into_drawing_area();
        draw_boxplot(root, &data, opts, style)?;
    }
    Ok(())
}

/// Draw a box chart onto any Plotters drawing area.
pub fn draw_boxplot<DB>(
    root: DrawingArea<DB, Shift>,
    data: &SeriesData,
    opts: &BoxOptions,
    style: &StyleConfig,
) -> Result<()>
where
    DB: DrawingBackend,
{
    // A flat request becomes a one-element group list; downstream code is
    // uniform over groups.
    let groups = SeriesData::Multi(wrap_groups(data));
    let specs = normalize_series(
        &groups,
        opts.labels.as_deref(),
        opts.colors.as_deref(),
        "Group",
        style,
    );
    let n = specs.len();

    let all: Vec<f64> = specs.iter().flat_map(|s| s.values.iter().copied()).collect();
    let (raw_min, raw_max) =
        value_extent(&all).ok_or_else(|| anyhow!("no numeric values to plot"))?;
    let (mut v_min, mut v_max) = pad_range(raw_min, raw_max);
    let headroom = (v_max - v_min) * 0.05;
    v_min -= headroom;
    v_max += headroom;

    root.fill(&parse_hex(&style.figure.face_color)?).map_err(err)?;

    let cat_min = -0.5f64;
    let cat_max = n as f64 - 0.5;
    let horizontal = opts.orientation == Orientation::Horizontal;

    let mut builder = ChartBuilder::on(&root);
    builder
        .margin(MARGIN)
        .set_label_area_size(LabelAreaPosition::Left, if horizontal { 90 } else { 70 })
        .set_label_area_size(LabelAreaPosition::Bottom, 48);
    if let Some(title) = &opts.title {
        builder.caption(
            title,
            (FontFamily::SansSerif, style.fonts.title)
                .into_font()
                .color(&TITLE_INK),
        );
    }
    let mut chart = if horizontal {
        builder
            .build_cartesian_2d(v_min..v_max, cat_min..cat_max)
            .map_err(err)?
    } else {
        builder
            .build_cartesian_2d(cat_min..cat_max, v_min..v_max)
            .map_err(err)?
    };

    chart
        .plotting_area()
        .fill(&parse_hex(&style.axes.face_color)?)
        .map_err(err)?;

    let names: Vec<String> = specs
        .iter()
        .enumerate()
        .map(|(i, s)| s.label.clone().unwrap_or_else(|| (i + 1).to_string()))
        .collect();
    let locale = map_locale("en");
    let cat_fmt = |v: &f64| category_label(*v, &names);
    let val_fmt = |v: &f64| fmt_axis_value(*v, locale);

    let grid = parse_hex(&style.axes.grid_color)?.mix(style.axes.grid_alpha);
    let edge = parse_hex(&style.axes.edge_color)?;
    let mut mesh = chart.configure_mesh();
    mesh.bold_line_style(grid)
        .light_line_style(TRANSPARENT)
        .axis_style(ShapeStyle::from(&edge).stroke_width(style.axes.line_width))
        .label_style(
            (FontFamily::SansSerif, style.fonts.tick)
                .into_font()
                .color(&TICK_INK),
        )
        .axis_desc_style(
            (FontFamily::SansSerif, style.fonts.label)
                .into_font()
                .color(&LABEL_INK),
        );
    if horizontal {
        mesh.y_labels(n.min(24))
            .y_label_formatter(&cat_fmt)
            .x_label_formatter(&val_fmt);
    } else {
        mesh.x_labels(n.min(24))
            .x_label_formatter(&cat_fmt)
            .y_label_formatter(&val_fmt);
    }
    if let Some(xl) = &opts.x_label {
        mesh.x_desc(xl.as_str());
    }
    if let Some(yl) = &opts.y_label {
        mesh.y_desc(yl.as_str());
    }
    mesh.draw().map_err(err)?;

    const HALF_BOX: f64 = 0.3;
    const HALF_CAP: f64 = 0.15;
    let median_color = style.warning();
    let median_stroke = style.lines.width.round() as u32;

    // Orientation-aware point: category coordinate first when vertical.
    let pt = |cat: f64, val: f64| if horizontal { (val, cat) } else { (cat, val) };

    for (i, spec) in specs.iter().enumerate() {
        let Some(stats) = box_stats(&spec.values) else {
            continue;
        };
        let c = i as f64;
        let fill = spec.color.mix(0.7);

        // Whiskers first so the box overdraws their join.
        for (from, to) in [
            (stats.q1, stats.whisker_low),
            (stats.q3, stats.whisker_high),
        ] {
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![pt(c, from), pt(c, to)],
                    BLACK.stroke_width(1),
                )))
                .map_err(err)?;
        }
        for w in [stats.whisker_low, stats.whisker_high] {
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![pt(c - HALF_CAP, w), pt(c + HALF_CAP, w)],
                    BLACK.stroke_width(1),
                )))
                .map_err(err)?;
        }

        let corners = [pt(c - HALF_BOX, stats.q1), pt(c + HALF_BOX, stats.q3)];
        chart
            .draw_series(std::iter::once(Rectangle::new(corners, fill.filled())))
            .map_err(err)?;
        chart
            .draw_series(std::iter::once(Rectangle::new(
                corners,
                spec.color.stroke_width(1),
            )))
            .map_err(err)?;

        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![pt(c - HALF_BOX, stats.median), pt(c + HALF_BOX, stats.median)],
                median_color.stroke_width(median_stroke),
            )))
            .map_err(err)?;

        chart
            .draw_series(
                stats
                    .outliers
                    .iter()
                    .map(|o| Circle::new(pt(c, *o), 3, spec.color.mix(0.5).filled())),
            )
            .map_err(err)?;
    }

    root.present().map_err(err)?;
    Ok(())
}
