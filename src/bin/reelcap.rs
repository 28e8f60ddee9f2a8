use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "reelcap")]
#[command(about = "Plan karaoke captions for narrated vertical shorts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan the whole short and write it as JSON.
    Plan(PlanArgs),
    /// Stream caption frames as JSON lines (config header first).
    Frames(PlanArgs),
    /// Fit the post title into the title box and print its layout.
    Title(CommonArgs),
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Input post JSON (`{"title": ..., "body": ...}`).
    #[arg(long)]
    post: PathBuf,

    /// Pipeline configuration JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Font file used for measurement. Falls back to a fixed-advance estimate when omitted.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Output path. Writes to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Lay out sentences on a rayon pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,

    /// Length of the background clip in seconds. Enables background planning.
    #[arg(long)]
    background_secs: Option<f64>,

    /// Seed for the background cut position.
    #[arg(long)]
    seed: Option<u64>,
}

type Runner = reelcap::Pipeline<Box<dyn reelcap::TextMeasurer>, reelcap::NoSpeech>;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Title(args) => cmd_title(args),
    }
}

fn load_config(args: &CommonArgs) -> anyhow::Result<reelcap::PipelineConfig> {
    match &args.config {
        Some(path) => Ok(reelcap::PipelineConfig::from_path(path)?),
        None => Ok(reelcap::PipelineConfig::default()),
    }
}

fn make_measurer(font: Option<&Path>) -> anyhow::Result<Box<dyn reelcap::TextMeasurer>> {
    match font {
        Some(path) => {
            let m = reelcap::ParleyMeasurer::from_font_path(path)?;
            tracing::info!(family = m.family_name(), "loaded font");
            Ok(Box::new(m))
        }
        None => {
            tracing::warn!("no --font given, using approximate glyph metrics");
            Ok(Box::new(reelcap::ApproxMeasurer::default()))
        }
    }
}

fn make_pipeline(args: &CommonArgs, cfg: reelcap::PipelineConfig) -> anyhow::Result<Runner> {
    let measurer = make_measurer(args.font.as_deref())?;
    Ok(reelcap::Pipeline::new(cfg, measurer, reelcap::NoSpeech)?)
}

fn open_output(out: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    let Some(path) = out else {
        return Ok(Box::new(BufWriter::new(std::io::stdout().lock())));
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    Ok(Box::new(BufWriter::new(f)))
}

fn run_plan(args: &PlanArgs) -> anyhow::Result<reelcap::ShortPlan> {
    let mut cfg = load_config(&args.common)?;
    if args.parallel {
        cfg.render.parallel = true;
    }
    if args.threads.is_some() {
        cfg.render.threads = args.threads;
    }

    let post = reelcap::Post::from_path(&args.common.post)?;
    let background = args.background_secs.map(|duration_secs| {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        reelcap::BackgroundSource {
            duration_secs,
            unit: rng.gen_range(0.0..=1.0),
        }
    });

    let mut pipeline = make_pipeline(&args.common, cfg)?;
    Ok(pipeline.run(&post, background)?.plan)
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let plan = run_plan(&args)?;
    let mut out = open_output(args.common.out.as_deref())?;
    serde_json::to_writer_pretty(&mut out, &plan).context("write plan JSON")?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn cmd_frames(args: PlanArgs) -> anyhow::Result<()> {
    let plan = run_plan(&args)?;
    let out = open_output(args.common.out.as_deref())?;
    let mut sink = reelcap::JsonLinesSink::new(out);
    reelcap::stream_track(&plan.captions, plan.canvas, plan.fps, &mut sink)?;
    Ok(())
}

fn cmd_title(args: CommonArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args)?;
    let post = reelcap::Post::from_path(&args.post)?;
    let mut pipeline = make_pipeline(&args, cfg)?;

    let Some(card) = pipeline.fit_title(&post.title)? else {
        anyhow::bail!("post '{}' has an empty title", args.post.display());
    };
    if !card.fits {
        tracing::warn!(font_size = card.font_size, "title overflows the title box");
    }

    let mut out = open_output(args.out.as_deref())?;
    serde_json::to_writer_pretty(&mut out, &card).context("write title JSON")?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
