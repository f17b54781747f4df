use crate::config::{Config, load_config};
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use crate::loader::{load_dataset, parse_dataset};
use crate::model::{Dataset, Phase};
use crate::render::{render_svg, write_output_svg};
use crate::state::InteractionState;
use crate::text_metrics::SystemMetrics;
use crate::theme::Theme;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[cfg(feature = "png")]
use crate::render::write_output_png;

#[derive(Parser, Debug)]
#[command(name = "tlr", version, about = "Project timeline (Gantt) renderer in Rust")]
pub struct Args {
    /// Input data file (JSON or JSON5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, themeVariables, layout, render)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Narrow the view to one calendar year
    #[arg(long = "year")]
    pub year: Option<i32>,

    /// Highlight a single phase
    #[arg(long = "phase", value_parser = parse_phase)]
    pub phase: Option<Phase>,

    /// Built-in theme (classic, modern); replaces the config file's theme
    #[arg(long = "theme")]
    pub theme: Option<String>,

    /// Write the computed layout as JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,

    /// Use heuristic text widths instead of system fonts
    #[arg(long = "fastText")]
    pub fast_text: bool,

    /// Debug logging on stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

fn parse_phase(value: &str) -> Result<Phase, String> {
    Phase::from_name(value).ok_or_else(|| {
        let names: Vec<&str> = Phase::ALL.iter().map(|p| p.name()).collect();
        format!("unknown phase '{value}', expected one of {}", names.join(", "))
    })
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A second init (tests, embedding) keeps the existing subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    apply_args(&mut config, &args)?;

    let dataset = read_dataset(args.input.as_deref())?;
    let state = InteractionState::new()
        .with_year(args.year)
        .with_phase(args.phase);

    let measurer = SystemMetrics::new(config.layout.fast_text_metrics);
    let layout = compute_layout(&dataset, &state, &config.theme, &config.layout, &measurer);
    if let Some(path) = &args.dump_layout {
        write_layout_dump(path, &layout)?;
    }
    let svg = render_svg(&layout, &config.theme);

    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_png(&svg, &output, &config)?;
        }
    }

    tracing::info!(
        tasks = dataset.task_count(),
        rows = layout.tasks().count(),
        width = layout.width,
        height = layout.height,
        "timeline rendered"
    );
    Ok(())
}

fn apply_args(config: &mut Config, args: &Args) -> Result<()> {
    if let Some(name) = args.theme.as_deref() {
        config.theme = Theme::by_name(name)
            .ok_or_else(|| anyhow::anyhow!("Unknown theme '{}'", name))?;
        config.render.background = config.theme.background.clone();
    }
    if args.fast_text {
        config.layout.fast_text_metrics = true;
    }
    Ok(())
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, config: &Config) -> Result<()> {
    write_output_png(svg, output, &config.render, &config.theme)
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _config: &Config) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the 'png' feature"))
}

fn read_dataset(path: Option<&Path>) -> Result<Dataset> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(load_dataset(path)?);
        }
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(parse_dataset(&buf)?)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!(
        "Output path required for {} output",
        ext
    ))
}
