//! Command-line front end: read an embedding set, transform or plot it.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tracing::info;
use vecplot_core::plot::{svg, Aspect, Canvas, PlotKind, PlotOptions};
use vecplot_core::{AxisSpec, EmbeddingSet};

use crate::adapter::{Reducer, DEFAULT_COMPONENTS};
use crate::backend::{Pca, ReductionBackend};
use crate::error::Result;
use crate::options::TransformOptions;

#[derive(Parser, Debug)]
#[command(name = "vecplot")]
#[command(about = "Reduce and plot embedding sets")]
#[command(version)]
pub struct Cli {
    /// Log level (debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Reduce an embedding set and print the result as JSON
    Transform(TransformArgs),
    /// Plot an embedding set (or one member) and print the canvas as JSON
    Plot(PlotArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Pca,
    Ivis,
    Umap,
}

#[derive(Args, Debug)]
pub struct TransformArgs {
    /// Embedding set JSON file
    #[arg(short, long)]
    pub input: PathBuf,

    #[arg(short, long, value_enum, default_value = "pca")]
    pub method: Method,

    #[arg(short, long, default_value_t = DEFAULT_COMPONENTS)]
    pub n_components: usize,

    /// Backend option as key=value; value is parsed as JSON, else kept as a string
    #[arg(short = 'o', long = "option", value_parser = parse_option)]
    pub options: Vec<(String, Value)>,
}

#[derive(Args, Debug)]
pub struct PlotArgs {
    /// Embedding set JSON file
    #[arg(short, long)]
    pub input: PathBuf,

    /// scatter, arrow or text
    #[arg(short, long, default_value = "scatter")]
    pub kind: PlotKind,

    /// Dimension index or member name
    #[arg(short = 'x', long)]
    pub x_axis: Option<String>,

    /// Dimension index or member name
    #[arg(short = 'y', long)]
    pub y_axis: Option<String>,

    #[arg(long)]
    pub x_label: Option<String>,

    #[arg(long)]
    pub y_label: Option<String>,

    #[arg(long, default_value = "")]
    pub title: String,

    #[arg(long)]
    pub color: Option<String>,

    /// Do not annotate points and arrows with names
    #[arg(long)]
    pub no_annot: bool,

    /// auto, equal or a numeric ratio
    #[arg(long, default_value = "auto")]
    pub aspect: Aspect,

    /// Plot a single member instead of the whole set
    #[arg(long)]
    pub name: Option<String>,

    /// Write an SVG file instead of printing canvas JSON
    #[arg(long)]
    pub svg: Option<PathBuf>,

    #[arg(long, default_value_t = 640)]
    pub width: u32,

    #[arg(long, default_value_t = 480)]
    pub height: u32,
}

/// Parse `key=value`, reading the value as JSON when possible.
pub fn parse_option(raw: &str) -> std::result::Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty option key in '{}'", raw));
    }
    let value =
        serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// An axis argument: integers are dimension indices, anything else names a
/// member of `set`.
pub fn parse_axis(set: &EmbeddingSet, raw: &str) -> Result<AxisSpec> {
    match raw.parse::<usize>() {
        Ok(index) => Ok(AxisSpec::Dimension(index)),
        Err(_) => Ok(set.axis(raw)?),
    }
}

pub fn load_set(path: &Path) -> Result<EmbeddingSet> {
    let text = fs::read_to_string(path)?;
    let set: EmbeddingSet = serde_json::from_str(&text)?;
    info!(
        "loaded '{}' with {} embeddings of dimension {}",
        set.display_name(),
        set.len(),
        set.dim()
    );
    Ok(set)
}

fn reduce_with<B: ReductionBackend>(
    backend: B,
    set: &EmbeddingSet,
    args: &TransformArgs,
) -> Result<EmbeddingSet> {
    let mut options = TransformOptions::new();
    for (key, value) in &args.options {
        options.set(key.clone(), value.clone());
    }
    let mut reducer = Reducer::new(backend, args.n_components).with_options(options);
    set.transform(&mut reducer)
}

#[cfg(feature = "python")]
fn reduce_python(set: &EmbeddingSet, args: &TransformArgs) -> Result<EmbeddingSet> {
    use crate::backend::PythonEstimator;

    let backend = match args.method {
        Method::Ivis => PythonEstimator::ivis(),
        _ => PythonEstimator::umap(),
    };
    reduce_with(backend, set, args)
}

#[cfg(not(feature = "python"))]
fn reduce_python(_set: &EmbeddingSet, args: &TransformArgs) -> Result<EmbeddingSet> {
    Err(crate::error::ReduceError::Config(format!(
        "method {:?} needs a build with the `python` feature",
        args.method
    )))
}

/// Run `transform`, returning the reduced set.
pub fn run_transform(args: &TransformArgs) -> Result<EmbeddingSet> {
    let set = load_set(&args.input)?;
    match args.method {
        Method::Pca => reduce_with(Pca::new(), &set, args),
        Method::Ivis | Method::Umap => reduce_python(&set, args),
    }
}

/// Run `plot`, returning the drawn canvas.
pub fn run_plot(args: &PlotArgs) -> Result<Canvas> {
    let set = load_set(&args.input)?;

    let mut options = PlotOptions::new(args.kind)
        .title(args.title.clone())
        .annotate(!args.no_annot)
        .aspect(args.aspect);
    if let Some(raw) = &args.x_axis {
        options = options.x_axis(parse_axis(&set, raw)?);
    }
    if let Some(raw) = &args.y_axis {
        options = options.y_axis(parse_axis(&set, raw)?);
    }
    options.x_label = args.x_label.clone();
    options.y_label = args.y_label.clone();
    options.color = args.color.clone();

    let mut canvas = Canvas::new();
    match &args.name {
        Some(name) => set.require(name)?.plot(&mut canvas, &options)?,
        None => set.plot(&mut canvas, &options)?,
    }
    Ok(canvas)
}

/// Execute a parsed command, writing its output to stdout or a file.
pub fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Transform(args) => {
            let out = run_transform(args)?;
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Command::Plot(args) => {
            let canvas = run_plot(args)?;
            match &args.svg {
                Some(path) => {
                    fs::write(path, svg::render(&canvas, args.width, args.height))?;
                    info!("wrote {}", path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&canvas)?),
            }
        }
    }
    Ok(())
}
