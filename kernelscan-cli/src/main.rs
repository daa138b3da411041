use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use kernelscan::{Grid, ReductionKind, ScanConfig, ScanOutput};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "kernelscan", version)]
struct Cli {
    /// Log pipeline stages at debug level (overridden by RUST_LOG).
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the animation timeline plus normalized source/result grids as JSON.
    Timeline(TimelineArgs),
    /// Write the reduced grid as a PNG (or JSON when the output ends in `.json`).
    Reduce(ReduceArgs),
}

#[derive(Args, Debug)]
struct ScanArgs {
    /// Input grid: JSON nested arrays (`null` = missing sample) or a raster image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Scan config JSON; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Kernel width/height (odd).
    #[arg(long)]
    kernel_size: Option<usize>,

    /// Speed decay constant.
    #[arg(long)]
    decay: Option<f64>,

    /// Reduction operator: median, min, max, mean.
    #[arg(long)]
    operator: Option<String>,

    /// Reduce positions on a rayon pool.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Args, Debug)]
struct TimelineArgs {
    #[command(flatten)]
    scan: ScanArgs,

    /// Output JSON path.
    #[arg(long)]
    out: PathBuf,

    /// Pretty-print the JSON output.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Args, Debug)]
struct ReduceArgs {
    #[command(flatten)]
    scan: ScanArgs,

    /// Output PNG or JSON path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Timeline(args) => cmd_timeline(args),
        Command::Reduce(args) => cmd_reduce(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let out = scan(&args.scan)?;
    let json = if args.pretty {
        serde_json::to_vec_pretty(&out)
    } else {
        serde_json::to_vec(&out)
    }
    .context("serialize scan output")?;

    ensure_parent_dir(&args.out)?;
    std::fs::write(&args.out, json)
        .with_context(|| format!("write timeline '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} steps, {:.2}s)",
        args.out.display(),
        out.timeline.len(),
        out.timeline.total_duration()
    );
    Ok(())
}

fn cmd_reduce(args: ReduceArgs) -> anyhow::Result<()> {
    let out = scan(&args.scan)?;
    ensure_parent_dir(&args.out)?;

    if has_extension(&args.out, "json") {
        let json = serde_json::to_vec(&out.result).context("serialize result grid")?;
        std::fs::write(&args.out, json)
            .with_context(|| format!("write result grid '{}'", args.out.display()))?;
    } else {
        let dims = out.result.dims();
        let width = u32::try_from(dims.cols()).context("grid too wide for an image")?;
        let height = u32::try_from(dims.rows()).context("grid too tall for an image")?;
        image::save_buffer_with_format(
            &args.out,
            &out.result.to_rgba8(),
            width,
            height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", args.out.display()))?;
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn scan(args: &ScanArgs) -> anyhow::Result<ScanOutput> {
    let config = resolve_config(args)?;
    let grid = load_grid(&args.in_path)?;
    tracing::info!(
        path = %args.in_path.display(),
        rows = grid.rows(),
        cols = grid.cols(),
        "loaded grid"
    );
    Ok(kernelscan::run_scan(&grid, &config)?)
}

fn resolve_config(args: &ScanArgs) -> anyhow::Result<ScanConfig> {
    let mut config = match &args.config {
        Some(path) => ScanConfig::from_path(path)?,
        None => ScanConfig::default(),
    };
    if let Some(k) = args.kernel_size {
        config.kernel_size = k;
    }
    if let Some(d) = args.decay {
        config.decay_constant = d;
    }
    if let Some(op) = &args.operator {
        config.operator = op.parse::<ReductionKind>()?;
    }
    if args.parallel {
        config.threading.parallel = true;
    }
    if args.threads.is_some() {
        config.threading.threads = args.threads;
    }
    config.validate()?;
    Ok(config)
}

fn load_grid(path: &Path) -> anyhow::Result<Grid> {
    if has_extension(path, "json") {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read grid '{}'", path.display()))?;
        let rows: Vec<Vec<Option<f64>>> = serde_json::from_str(&s)
            .with_context(|| format!("parse grid json '{}'", path.display()))?;
        return Ok(Grid::from_nested_options(rows)?);
    }

    let img = image::open(path)
        .with_context(|| format!("decode image '{}'", path.display()))?
        .to_luma16();
    let (width, height) = img.dimensions();
    let values = img.into_raw().into_iter().map(f64::from).collect();
    Ok(Grid::new(height as usize, width as usize, values)?)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
