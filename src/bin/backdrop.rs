use std::path::PathBuf;

use anyhow::Context as _;
use backdrop::{
    BackgroundSpec, Color, ColorScheme, Compass, ExportConfig, ExportJob, ExportSession,
    GradientDirection, OutputFormat, PRESETS, RenderRequest, find_preset,
};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "backdrop", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one background image.
    Render(RenderArgs),
    /// Render every job in a JSON array of export jobs.
    Batch(BatchArgs),
    /// List the named device sizes.
    Presets(PresetsArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Named device size (see `backdrop presets`).
    #[arg(long, conflicts_with_all = ["width", "height"])]
    preset: Option<String>,

    /// Width in pixels.
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Height in pixels.
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Exchange width and height.
    #[arg(long)]
    swap: bool,

    /// Color scheme (light or dark).
    #[arg(long, default_value = "light")]
    scheme: ColorScheme,

    /// Background style.
    #[arg(long, value_enum, default_value_t = Mode::Perceptual)]
    mode: Mode,

    /// Base color for the perceptual style, as `#rrggbb` or `#rrggbbaa`.
    #[arg(long)]
    base_color: Option<Color>,

    /// Comma-separated gradient stop colors (at least two).
    #[arg(long, value_delimiter = ',')]
    stops: Vec<Color>,

    /// Gradient direction preset, e.g. `topLeading` or `bottom`.
    #[arg(long, conflicts_with = "angle")]
    direction: Option<Compass>,

    /// Gradient angle in degrees (0 points right, 90 points down).
    #[arg(long)]
    angle: Option<f64>,

    /// Skip the frosted material overlay.
    #[arg(long)]
    no_overlay: bool,

    /// Output format (png, jpeg or heic).
    #[arg(long, default_value = "png")]
    format: OutputFormat,

    /// Lossy quality in (0, 1].
    #[arg(long)]
    quality: Option<f64>,

    /// Output file, or an existing directory.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Input jobs JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct PresetsArgs {
    /// Print as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Perceptual,
    Gradient,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Batch(args) => cmd_batch(args),
        Command::Presets(args) => cmd_presets(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn make_session() -> anyhow::Result<ExportSession> {
    ExportSession::new(ExportConfig::from_env()).context("create export session")
}

fn build_request(args: &RenderArgs) -> anyhow::Result<RenderRequest> {
    let defaults = RenderRequest::default();
    let (width, height) = match (&args.preset, args.width, args.height) {
        (Some(name), _, _) => {
            let p = find_preset(name).with_context(|| format!("unknown preset '{name}'"))?;
            (p.width, p.height)
        }
        (None, Some(w), Some(h)) => (w, h),
        _ => (defaults.width, defaults.height),
    };

    let background = match args.mode {
        Mode::Perceptual => match args.base_color {
            Some(base_color) => BackgroundSpec::Perceptual { base_color },
            None => BackgroundSpec::default(),
        },
        Mode::Gradient => {
            let BackgroundSpec::LinearGradient {
                stops: default_stops,
                direction: default_direction,
            } = BackgroundSpec::default_gradient()
            else {
                anyhow::bail!("default gradient is not a linear gradient");
            };
            let stops = if args.stops.is_empty() {
                default_stops
            } else {
                args.stops.clone()
            };
            let direction = match (args.direction, args.angle) {
                (_, Some(deg)) => GradientDirection::Angle(deg),
                (Some(c), None) => GradientDirection::Preset(c),
                (None, None) => default_direction,
            };
            BackgroundSpec::LinearGradient { stops, direction }
        }
    };

    let request = RenderRequest {
        width,
        height,
        color_scheme: args.scheme,
        background,
        add_material_overlay: !args.no_overlay,
    };
    Ok(if args.swap { request.swapped() } else { request })
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let request = build_request(&args)?;
    let mut session = make_session()?;
    let quality = args.quality.unwrap_or(session.config().quality);

    let out = session
        .export_with_quality(&request, args.format, quality, &args.out)
        .map_err(|e| anyhow::anyhow!("{}", e.user_message()))
        .with_context(|| format!("export to '{}'", args.out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let jobs = ExportJob::list_from_path(&args.in_path)?;
    let mut session = make_session()?;

    let mut failed = 0usize;
    for (i, job) in jobs.iter().enumerate() {
        match session.export_job(job) {
            Ok(out) => eprintln!("[{i}] wrote {}", out.display()),
            Err(e) => {
                failed += 1;
                eprintln!("[{i}] {}: {}", job.out.display(), e.user_message());
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {} jobs failed", jobs.len());
    }
    Ok(())
}

fn cmd_presets(args: PresetsArgs) -> anyhow::Result<()> {
    if args.json {
        let s = serde_json::to_string_pretty(&PRESETS).context("serialize presets")?;
        println!("{s}");
        return Ok(());
    }
    for p in PRESETS {
        println!("{:<16} {:>5} x {:<5} {}", p.slug, p.width, p.height, p.label);
    }
    Ok(())
}
