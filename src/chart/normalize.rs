//! Chart request normalization: classify a request as one or many series and
//! backfill colors and labels from the style configuration.
//!
//! Every constructor funnels its data through [`normalize_series`] so the
//! drawing code only ever sees an ordered list of `(values, color, label)`
//! triples. The function is pure: same request and style, same output.

use plotters::style::RGBColor;

use super::types::SeriesData;
use crate::style::StyleConfig;

/// One drawable series with its resolved color and optional legend label.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    pub values: Vec<f64>,
    pub color: RGBColor,
    pub label: Option<String>,
}

/// Modulo-indexed color lookup, so a short caller-supplied color list covers
/// any number of series without truncation.
pub fn color_at(colors: &[RGBColor], idx: usize) -> RGBColor {
    colors[idx % colors.len()]
}

/// Build the normalized series list for a request.
///
/// - `Single` input yields exactly one entry. Its label is the caller's first
///   label if any; no default is generated, so single unlabeled series draw
///   without a legend.
/// - `Multi` input yields one entry per inner vector, in order. The i-th
///   entry gets the caller color at `i % len`, else `palette[i % P]`, and the
///   caller label at position `i`, else `"{prefix} {i+1}"`.
pub fn normalize_series(
    data: &SeriesData,
    labels: Option<&[String]>,
    colors: Option<&[RGBColor]>,
    label_prefix: &str,
    style: &StyleConfig,
) -> Vec<SeriesSpec> {
    match data {
        SeriesData::Single(values) => {
            let color = match colors {
                Some(cs) if !cs.is_empty() => color_at(cs, 0),
                _ => style.primary(),
            };
            let label = labels.and_then(|ls| ls.first().cloned());
            vec![SeriesSpec {
                values: values.clone(),
                color,
                label,
            }]
        }
        SeriesData::Multi(series) => series
            .iter()
            .enumerate()
            .map(|(i, values)| {
                let color = match colors {
                    Some(cs) if !cs.is_empty() => color_at(cs, i),
                    _ => style.palette_color(i),
                };
                let label = labels
                    .and_then(|ls| ls.get(i).cloned())
                    .unwrap_or_else(|| format!("{} {}", label_prefix, i + 1));
                SeriesSpec {
                    values: values.clone(),
                    color,
                    label: Some(label),
                }
            })
            .collect(),
    }
}

/// Box charts always draw a list of groups: a flat request is wrapped into a
/// one-element list. Wrapping an already-wrapped one-element request yields
/// the same single box.
pub fn wrap_groups(data: &SeriesData) -> Vec<Vec<f64>> {
    match data {
        SeriesData::Single(values) => vec![values.clone()],
        SeriesData::Multi(series) => series.clone(),
    }
}
