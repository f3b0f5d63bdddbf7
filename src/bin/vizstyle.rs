use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use vizstyle::StyleConfig;
use vizstyle::chart::{
    self, BarOptions, BoxOptions, HeatmapOptions, HistogramOptions, LineOptions, ScatterOptions,
};

#[derive(Parser, Debug)]
#[command(
    name = "vizstyle",
    version,
    about = "Render demonstration charts with the vizstyle theme"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the six demonstration charts into a directory.
    Demo(DemoArgs),
    /// Write the default style configuration as JSON.
    InitStyle(InitStyleArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Svg,
    Png,
}

impl Format {
    fn ext(self) -> &'static str {
        match self {
            Format::Svg => "svg",
            Format::Png => "png",
        }
    }
}

#[derive(Args, Debug)]
struct DemoArgs {
    /// Output directory (created if missing).
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Svg)]
    format: Format,
    /// Optional style configuration JSON (defaults to the built-in theme).
    #[arg(long)]
    style: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InitStyleArgs {
    /// Where to write the JSON (e.g. style.json).
    out: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Demo(args) => cmd_demo(args),
        Command::InitStyle(args) => cmd_init_style(args),
    }
}

fn cmd_init_style(args: InitStyleArgs) -> Result<()> {
    StyleConfig::default().save_json(&args.out)?;
    eprintln!("Wrote default style to {}", args.out.display());
    Ok(())
}

fn cmd_demo(args: DemoArgs) -> Result<()> {
    let style = match &args.style {
        Some(path) => StyleConfig::from_json(path)?,
        None => StyleConfig::default(),
    };
    std::fs::create_dir_all(&args.out_dir)?;
    let ext = args.format.ext();
    let dest = |name: &str| args.out_dir.join(format!("{name}.{ext}"));

    // 1) Multi-series line chart
    let x: Vec<f64> = (0..100).map(|i| i as f64 * 0.1).collect();
    let y = vec![
        x.iter().map(|v| v.sin()).collect::<Vec<_>>(),
        x.iter().map(|v| v.cos()).collect(),
        x.iter().map(|v| v.sin() * (-v / 10.0).exp()).collect(),
    ];
    chart::line(
        &x,
        y,
        dest("demo_01_line"),
        &LineOptions {
            title: Some("Trigonometric functions".into()),
            x_label: Some("x".into()),
            y_label: Some("y".into()),
            labels: Some(vec![
                "sin(x)".into(),
                "cos(x)".into(),
                "sin(x)·exp(-x/10)".into(),
            ]),
            ..Default::default()
        },
        &style,
    )?;
    eprintln!("Wrote {}", dest("demo_01_line").display());

    // 2) Correlated scatter cloud
    let mut rng = Lcg::new(42);
    let xs: Vec<f64> = (0..200).map(|_| rng.normal()).collect();
    let ys: Vec<f64> = xs.iter().map(|v| 2.0 * v + rng.normal() * 0.7).collect();
    chart::scatter(
        &xs,
        &ys,
        dest("demo_02_scatter"),
        &ScatterOptions {
            title: Some("Correlated point cloud".into()),
            x_label: Some("Variable X".into()),
            y_label: Some("Variable Y".into()),
            ..Default::default()
        },
        &style,
    )?;
    eprintln!("Wrote {}", dest("demo_02_scatter").display());

    // 3) Grouped bars: quarterly sales per product
    let products: Vec<String> = ["Product A", "Product B", "Product C", "Product D", "Product E"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let quarters = vec![
        vec![234.0, 456.0, 389.0, 512.0, 298.0],
        vec![256.0, 478.0, 412.0, 495.0, 321.0],
        vec![289.0, 501.0, 445.0, 534.0, 356.0],
    ];
    chart::bar(
        &products,
        quarters,
        dest("demo_03_bar"),
        &BarOptions {
            title: Some("Quarterly sales by product".into()),
            x_label: Some("Products".into()),
            y_label: Some("Sales (units)".into()),
            labels: Some(vec!["Q1 2024".into(), "Q2 2024".into(), "Q3 2024".into()]),
            ..Default::default()
        },
        &style,
    )?;
    eprintln!("Wrote {}", dest("demo_03_bar").display());

    // 4) Bimodal histogram with KDE
    let mut scores = Vec::with_capacity(1000);
    for _ in 0..500 {
        scores.push(60.0 + rng.normal() * 8.0);
        scores.push(120.0 + rng.normal() * 10.0);
    }
    chart::histogram(
        &scores,
        dest("demo_04_histogram"),
        &HistogramOptions {
            title: Some("Bimodal score distribution".into()),
            x_label: Some("Score".into()),
            bins: 40,
            ..Default::default()
        },
        &style,
    )?;
    eprintln!("Wrote {}", dest("demo_04_histogram").display());

    // 5) Correlation-matrix heatmap
    let n_vars = 8;
    let columns: Vec<Vec<f64>> = sample_columns(&mut rng, n_vars, 100);
    let corr: Vec<Vec<f64>> = (0..n_vars)
        .map(|i| (0..n_vars).map(|j| pearson(&columns[i], &columns[j])).collect())
        .collect();
    let var_names: Vec<String> = (1..=n_vars).map(|i| format!("Var{i}")).collect();
    chart::heatmap(
        &corr,
        dest("demo_05_heatmap"),
        &HeatmapOptions {
            title: Some("Correlation matrix".into()),
            x_tick_labels: Some(var_names.clone()),
            y_tick_labels: Some(var_names),
            cmap: Some("RdBu_r".into()),
            ..Default::default()
        },
        &style,
    )?;
    eprintln!("Wrote {}", dest("demo_05_heatmap").display());

    // 6) Box chart over four groups
    let groups: Vec<Vec<f64>> = [(100.0, 15.0), (110.0, 20.0), (95.0, 12.0), (105.0, 18.0)]
        .iter()
        .map(|(mean, sd)| (0..200).map(|_| mean + rng.normal() * sd).collect())
        .collect();
    chart::boxplot(
        groups,
        dest("demo_06_box"),
        &BoxOptions {
            title: Some("Performance by group".into()),
            y_label: Some("Score".into()),
            labels: Some(vec![
                "Group A".into(),
                "Group B".into(),
                "Group C".into(),
                "Group D".into(),
            ]),
            ..Default::default()
        },
        &style,
    )?;
    eprintln!("Wrote {}", dest("demo_06_box").display());

    Ok(())
}

/// Small deterministic generator so demo output is reproducible: a 64-bit
/// LCG with an Irwin-Hall shaping step for approximately normal samples.
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407))
    }

    fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Approximately standard normal (sum of 12 uniforms minus 6).
    fn normal(&mut self) -> f64 {
        (0..12).map(|_| self.next_f64()).sum::<f64>() - 6.0
    }
}

/// First two columns correlated with their neighbors, the rest independent.
fn sample_columns(rng: &mut Lcg, n_vars: usize, rows: usize) -> Vec<Vec<f64>> {
    let mut cols: Vec<Vec<f64>> = (0..n_vars)
        .map(|_| (0..rows).map(|_| rng.normal()).collect())
        .collect();
    for r in 0..rows {
        if n_vars >= 2 {
            cols[1][r] = cols[0][r] * 0.8 + cols[1][r] * 0.2;
        }
        if n_vars >= 4 {
            cols[3][r] = cols[2][r] * 0.6 + cols[3][r] * 0.4;
        }
    }
    cols
}

fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len()) as f64;
    let ma = a.iter().sum::<f64>() / n;
    let mb = b.iter().sum::<f64>() / n;
    let mut cov = 0.0;
    let mut va = 0.0;
    let mut vb = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        cov += (x - ma) * (y - mb);
        va += (x - ma).powi(2);
        vb += (y - mb).powi(2);
    }
    if va == 0.0 || vb == 0.0 {
        return 0.0;
    }
    cov / (va.sqrt() * vb.sqrt())
}
