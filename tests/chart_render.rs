use std::fs;
use std::path::PathBuf;
use vizstyle::StyleConfig;
use vizstyle::chart::{
    self, BarOptions, BoxOptions, HeatmapOptions, HistogramOptions, LineOptions, Orientation,
    ScatterOptions,
};
use plotters::style::RGBColor;

fn write_and_check<F: Fn(&PathBuf)>(maker: F, name: &str, ext: &str) {
    let tmp = std::env::temp_dir();
    let path: PathBuf = tmp.join(format!("vizstyle_{}.{}", name, ext));
    maker(&path);
    let meta = fs::metadata(&path).expect("file created");
    assert!(meta.len() > 0, "output has content");
    fs::remove_file(&path).ok();
}

fn sample_x() -> Vec<f64> {
    (0..50).map(|i| i as f64 * 0.2).collect()
}

#[test]
fn line_single_series_produces_file() {
    let style = StyleConfig::default();
    let x = sample_x();
    let y: Vec<f64> = x.iter().map(|v| v.sin()).collect();
    write_and_check(
        |p| {
            chart::line(&x, y.clone(), p, &LineOptions::default(), &style).unwrap();
        },
        "line_single",
        "svg",
    );
}

#[test]
fn line_multi_series_with_legend_produces_file() {
    let style = StyleConfig::default();
    let x = sample_x();
    let y = vec![
        x.iter().map(|v| v.sin()).collect::<Vec<_>>(),
        x.iter().map(|v| v.cos()).collect(),
    ];
    let opts = LineOptions {
        title: Some("Trig".into()),
        x_label: Some("x".into()),
        y_label: Some("y".into()),
        labels: Some(vec!["sin".into(), "cos".into()]),
        ..Default::default()
    };
    write_and_check(
        |p| {
            chart::line(&x, y.clone(), p, &opts, &style).unwrap();
        },
        "line_multi",
        "svg",
    );
}

#[test]
fn scatter_produces_file() {
    let style = StyleConfig::default();
    let x = sample_x();
    let y: Vec<f64> = x.iter().map(|v| 2.0 * v + (v * 17.0).sin()).collect();
    let opts = ScatterOptions {
        title: Some("Cloud".into()),
        label: Some("samples".into()),
        ..Default::default()
    };
    write_and_check(
        |p| {
            chart::scatter(&x, &y, p, &opts, &style).unwrap();
        },
        "scatter",
        "svg",
    );
}

#[test]
fn grouped_bar_produces_file_both_orientations() {
    let style = StyleConfig::default();
    let cats: Vec<String> = ["A", "B", "C", "D", "E"].iter().map(|s| s.to_string()).collect();
    let groups = vec![
        vec![234.0, 456.0, 389.0, 512.0, 298.0],
        vec![256.0, 478.0, 412.0, 495.0, 321.0],
        vec![289.0, 501.0, 445.0, 534.0, 356.0],
    ];
    for (i, orientation) in [Orientation::Vertical, Orientation::Horizontal]
        .into_iter()
        .enumerate()
    {
        let opts = BarOptions {
            title: Some("Sales".into()),
            orientation,
            ..Default::default()
        };
        write_and_check(
            |p| {
                chart::bar(&cats, groups.clone(), p, &opts, &style).unwrap();
            },
            &format!("bar_grouped{}", i),
            "svg",
        );
    }
}

#[test]
fn histogram_with_and_without_kde() {
    let style = StyleConfig::default();
    let data: Vec<f64> = (0..500).map(|i| ((i * 37) % 97) as f64).collect();
    for (name, kde) in [("hist_kde", true), ("hist_plain", false)] {
        let opts = HistogramOptions {
            bins: 20,
            kde,
            ..Default::default()
        };
        write_and_check(
            |p| {
                chart::histogram(&data, p, &opts, &style).unwrap();
            },
            name,
            "svg",
        );
    }
}

#[test]
fn heatmap_with_labels_produces_file() {
    let style = StyleConfig::default();
    let matrix: Vec<Vec<f64>> = (0..4)
        .map(|r| (0..4).map(|c| ((r * 4 + c) as f64 / 15.0) * 2.0 - 1.0).collect())
        .collect();
    let names: Vec<String> = (1..=4).map(|i| format!("Var{i}")).collect();
    let opts = HeatmapOptions {
        title: Some("Correlation".into()),
        x_tick_labels: Some(names.clone()),
        y_tick_labels: Some(names),
        cmap: Some("RdBu_r".into()),
        ..Default::default()
    };
    write_and_check(
        |p| {
            chart::heatmap(&matrix, p, &opts, &style).unwrap();
        },
        "heatmap",
        "svg",
    );
}

#[test]
fn boxplot_cycles_short_color_list() {
    let style = StyleConfig::default();
    // 5 groups, 2 caller colors: cycling must cover every box.
    let groups: Vec<Vec<f64>> = (0..5)
        .map(|g| (0..100).map(|i| (g * 10) as f64 + ((i * 13) % 23) as f64).collect())
        .collect();
    let opts = BoxOptions {
        colors: Some(vec![RGBColor(46, 134, 171), RGBColor(162, 59, 114)]),
        ..Default::default()
    };
    write_and_check(
        |p| {
            chart::boxplot(groups.clone(), p, &opts, &style).unwrap();
        },
        "box_cycled",
        "svg",
    );
}

#[test]
fn boxplot_single_flat_sequence_draws_one_box() {
    let style = StyleConfig::default();
    let flat: Vec<f64> = (0..100).map(|i| (i % 31) as f64).collect();
    let opts = BoxOptions {
        orientation: Orientation::Horizontal,
        ..Default::default()
    };
    write_and_check(
        |p| {
            chart::boxplot(flat.clone(), p, &opts, &style).unwrap();
        },
        "box_single",
        "svg",
    );
}

#[test]
fn png_output_works_for_every_kind() {
    let style = StyleConfig::default();
    let x = sample_x();
    let y: Vec<f64> = x.iter().map(|v| v.cos()).collect();
    let cats: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
    let matrix = vec![vec![0.0, 0.5], vec![0.5, 1.0]];

    write_and_check(
        |p| chart::line(&x, y.clone(), p, &LineOptions::default(), &style).unwrap(),
        "png_line",
        "png",
    );
    write_and_check(
        |p| chart::scatter(&x, &y, p, &ScatterOptions::default(), &style).unwrap(),
        "png_scatter",
        "png",
    );
    write_and_check(
        |p| {
            chart::bar(
                &cats,
                vec![10.0, 20.0, 15.0],
                p,
                &BarOptions::default(),
                &style,
            )
            .unwrap()
        },
        "png_bar",
        "png",
    );
    write_and_check(
        |p| chart::histogram(&y, p, &HistogramOptions::default(), &style).unwrap(),
        "png_hist",
        "png",
    );
    write_and_check(
        |p| chart::heatmap(&matrix, p, &HeatmapOptions::default(), &style).unwrap(),
        "png_heatmap",
        "png",
    );
    write_and_check(
        |p| chart::boxplot(y.clone(), p, &BoxOptions::default(), &style).unwrap(),
        "png_box",
        "png",
    );
}

#[test]
fn empty_data_is_error() {
    let style = StyleConfig::default();
    let tmp = std::env::temp_dir().join("vizstyle_empty.svg");
    assert!(chart::line(&[], Vec::<f64>::new(), &tmp, &LineOptions::default(), &style).is_err());
    assert!(chart::scatter(&[], &[], &tmp, &ScatterOptions::default(), &style).is_err());
    assert!(
        chart::bar(&[], Vec::<f64>::new(), &tmp, &BarOptions::default(), &style).is_err()
    );
    assert!(chart::histogram(&[], &tmp, &HistogramOptions::default(), &style).is_err());
    assert!(
        chart::heatmap(&Vec::<Vec<f64>>::new(), &tmp, &HeatmapOptions::default(), &style).is_err()
    );
    assert!(chart::boxplot(Vec::<f64>::new(), &tmp, &BoxOptions::default(), &style).is_err());
}

#[test]
fn unknown_colormap_is_error() {
    let style = StyleConfig::default();
    let tmp = std::env::temp_dir().join("vizstyle_badcmap.svg");
    let opts = HeatmapOptions {
        cmap: Some("plasma".into()),
        ..Default::default()
    };
    let matrix = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
    assert!(chart::heatmap(&matrix, &tmp, &opts, &style).is_err());
    fs::remove_file(&tmp).ok();
}
