use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use gdp_chart::api::{DEFAULT_BASE_URL, DEFAULT_COUNTRY, DEFAULT_INDICATOR};
use gdp_chart::tooltip::tooltip_html;
use gdp_chart::{ChartLayout, ChartView, Client, NullPolicy, PlotPoint, SourceConfig};
use gdp_chart::{export, stats, storage};
use num_format::{Locale, ToFormattedString};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "gdp-chart",
    version,
    about = "Fetch a GDP series from the World Bank and chart it"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the series once (and optionally plot, save, list, and print stats).
    Get(GetArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Nulls {
    /// Leave years without a value out
    Skip,
    /// Draw years without a value as zero
    Zero,
    /// Fail if any year has no value
    Reject,
}

impl From<Nulls> for NullPolicy {
    fn from(n: Nulls) -> Self {
        match n {
            Nulls::Skip => NullPolicy::Skip,
            Nulls::Zero => NullPolicy::Zero,
            Nulls::Reject => NullPolicy::Reject,
        }
    }
}

#[derive(Args, Debug)]
struct GetArgs {
    /// Country code (ISO2/ISO3 or aggregate, e.g. US, DEU, EUU)
    #[arg(short, long, default_value = DEFAULT_COUNTRY)]
    country: String,
    /// Indicator code
    #[arg(short, long, default_value = DEFAULT_INDICATOR)]
    indicator: String,
    /// API base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Rows per page requested from the API (API default is 50).
    #[arg(long)]
    per_page: Option<u32>,
    /// Give up on the request after this many seconds (default: wait indefinitely).
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// What to do with years that have no value.
    #[arg(long, value_enum, default_value_t = Nulls::Skip)]
    nulls: Nulls,
    /// Create a chart at the given path (.svg or .png).
    #[arg(long)]
    plot: Option<PathBuf>,
    /// Chart title drawn above the bars.
    #[arg(long, default_value = "United States GDP")]
    title: String,
    /// Width of the plot (default 800, 300..=3000).
    #[arg(long, default_value_t = 800)]
    width: u32,
    /// Height of the plot (default 500, 300..=3000).
    #[arg(long, default_value_t = 500)]
    height: u32,
    /// Save plot points to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Print one line per year with the tooltip text.
    #[arg(long, default_value_t = false)]
    list: bool,
    /// Print series statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
    /// Locale for thousands separators in --list output (en, de, fr, es, it, pt, nl).
    #[arg(long, default_value = "en")]
    locale: String,
}

/// Map a user-provided locale tag to a num-format Locale.
fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en,
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

const MAX_PLOT_PX: u32 = 3000;

/// The layout padding is taken off both sides of each axis; keep at least that much
/// plotting room in between.
fn check_plot_size(layout: &ChartLayout) -> Result<()> {
    let min = 3 * layout.padding;
    if layout.width < min || layout.width > MAX_PLOT_PX {
        anyhow::bail!("Plot width must be between {} and {} pixels", min, MAX_PLOT_PX);
    }
    if layout.height < min || layout.height > MAX_PLOT_PX {
        anyhow::bail!("Plot height must be between {} and {} pixels", min, MAX_PLOT_PX);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Get(args) => cmd_get(args),
    }
}

fn cmd_get(args: GetArgs) -> Result<()> {
    let config = SourceConfig {
        base_url: args.base_url.clone(),
        country: args.country.clone(),
        indicator: args.indicator.clone(),
        per_page: args.per_page,
        timeout: args.timeout_secs.map(Duration::from_secs),
    };
    let layout = ChartLayout {
        width: args.width,
        height: args.height,
        ..ChartLayout::default()
    };
    check_plot_size(&layout)?;
    let client = Client::new(config).context("build http client")?;

    let mut view = ChartView::new(layout, NullPolicy::from(args.nulls));
    view.activate(&client);
    if let Some(msg) = view.error() {
        anyhow::bail!("{}", msg);
    }

    let points = PlotPoint::from_records(view.records(), view.policy())?;

    if args.list {
        let locale = map_locale(&args.locale);
        for p in &points {
            println!(
                "{}\t${}\t{}",
                p.year,
                (p.value.round() as i64).to_formatted_string(locale),
                tooltip_html(p).replace("<br>", " | ")
            );
        }
    }

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&points, path)?,
            "json" => storage::save_json(&points, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", points.len(), path.display());
    }

    if let Some(plot_path) = args.plot.as_ref() {
        let scene = view
            .scene()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("no data to plot"))?;
        export::write_chart(scene, plot_path, Some(&args.title))
            .with_context(|| format!("write {}", plot_path.display()))?;
        eprintln!("Wrote plot to {}", plot_path.display());
    }

    if args.stats {
        let s = stats::summarize(view.records());
        println!(
            "{} • {}  years={}..{}  count={} missing={}  min={} max={} mean={} median={}",
            args.country,
            args.indicator,
            s.first_year.map_or("NA".into(), |y| y.to_string()),
            s.last_year.map_or("NA".into(), |y| y.to_string()),
            s.count,
            s.missing,
            fmt_opt(s.min),
            fmt_opt(s.max),
            fmt_opt(s.mean),
            fmt_opt(s.median)
        );
    }

    Ok(())
}
