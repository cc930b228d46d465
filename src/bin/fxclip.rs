use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use fxclip::{Animator, AnimatorConfig, CATALOG, Effect, Fps};

#[derive(Parser, Debug)]
#[command(name = "fxclip", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one effect to a transparent WebM (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render a single frame of an effect as a PNG.
    Frame(FrameArgs),
    /// Print the effect catalog as JSON.
    Catalog,
    /// Render every catalog entry with its recommended duration into `<name>.webm`.
    RenderAll(RenderAllArgs),
}

#[derive(Args, Debug)]
struct Common {
    /// Source image (any format the `image` crate decodes).
    #[arg(long)]
    image: PathBuf,

    /// JSON config file with `AnimatorConfig` fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the shake jitter.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    common: Common,

    /// Effect name, e.g. `fade_in` or `slide_in_right`.
    #[arg(long)]
    effect: String,

    /// Effect parameters as JSON, e.g. `{"intensity": 8}`.
    #[arg(long)]
    params: Option<String>,

    /// Output file name, relative to the output directory.
    #[arg(long)]
    out: String,

    /// Output directory (overrides the config).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Clip length in seconds (defaults to the config's default duration).
    #[arg(long)]
    duration: Option<f64>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    common: Common,

    /// Effect name.
    #[arg(long)]
    effect: String,

    /// Effect parameters as JSON.
    #[arg(long)]
    params: Option<String>,

    /// Sample time in seconds.
    #[arg(long)]
    time: f64,

    /// Clip length in seconds.
    #[arg(long)]
    duration: Option<f64>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RenderAllArgs {
    #[command(flatten)]
    common: Common,

    /// Output directory (overrides the config).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Frames per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Command::Render(args) => {
            let cfg = load_config(&args.common, args.out_dir)?;
            let mut animator = Animator::new(cfg)?;
            let effect = parse_effect(&args.effect, args.params.as_deref())?;
            animator.select(effect, &args.common.image, args.duration)?;
            let out = animator.render(&args.out, Fps::integer(args.fps)?)?;
            eprintln!("wrote {}", out.display());
        }
        Command::Frame(args) => {
            let cfg = load_config(&args.common, None)?;
            let mut animator = Animator::new(cfg)?;
            let effect = parse_effect(&args.effect, args.params.as_deref())?;
            animator.select(effect, &args.common.image, args.duration)?;
            let frame = animator.frame_at(args.time)?;
            fxclip::ensure_parent_dir(&args.out)?;
            image::save_buffer_with_format(
                &args.out,
                &frame.to_straight_rgba(),
                frame.width,
                frame.height,
                image::ColorType::Rgba8,
                image::ImageFormat::Png,
            )
            .with_context(|| format!("write png '{}'", args.out.display()))?;
            eprintln!("wrote {}", args.out.display());
        }
        Command::Catalog => {
            println!("{}", serde_json::to_string_pretty(&CATALOG)?);
        }
        Command::RenderAll(args) => {
            let cfg = load_config(&args.common, args.out_dir)?;
            let mut animator = Animator::new(cfg)?;
            let fps = Fps::integer(args.fps)?;
            for row in &CATALOG {
                animator.select(row.effect()?, &args.common.image, Some(row.duration_secs))?;
                let out = animator.render(&format!("{}.webm", row.animation), fps)?;
                eprintln!("wrote {} (sfx: {})", out.display(), row.sfx);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(common: &Common, out_dir: Option<PathBuf>) -> anyhow::Result<AnimatorConfig> {
    let mut cfg = match &common.config {
        Some(path) => AnimatorConfig::from_json_file(path)?,
        None => AnimatorConfig::default(),
    };
    if let Some(dir) = out_dir {
        cfg.output_dir = dir;
    }
    if common.seed.is_some() {
        cfg.seed = common.seed;
    }
    Ok(cfg)
}

/// `--params` JSON is merged under the effect name, so `{"intensity": 8}` with `--effect shake`
/// becomes `{"effect": "shake", "intensity": 8}`.
fn parse_effect(name: &str, params: Option<&str>) -> anyhow::Result<Effect> {
    let base = Effect::from_name(name)?;
    let Some(params) = params else {
        return Ok(base);
    };
    let mut obj = match serde_json::from_str::<serde_json::Value>(params)
        .context("parse --params as JSON")?
    {
        serde_json::Value::Object(obj) => obj,
        other => anyhow::bail!("--params must be a JSON object, got {other}"),
    };
    // Aliases like `slide_in_right` carry their own defaults; start from those.
    let serde_json::Value::Object(defaults) = serde_json::to_value(base)? else {
        anyhow::bail!("effect '{name}' does not serialize as an object");
    };
    if let Some(unknown) = obj.keys().find(|k| !defaults.contains_key(k.as_str())) {
        return Err(fxclip::FxError::invalid_input(format!(
            "unknown parameter '{unknown}' for effect '{}'",
            base.name()
        ))
        .into());
    }
    for (k, v) in defaults {
        obj.entry(k).or_insert(v);
    }
    obj.insert(
        "effect".to_string(),
        serde_json::Value::String(base.name().to_string()),
    );
    Ok(Effect::from_json(&serde_json::Value::Object(obj).to_string())?)
}
