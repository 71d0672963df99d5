use std::{
    io::{BufWriter, Write as _},
    path::PathBuf,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use scene_timeline::{
    EvalThreading, FrameIndex, FrameRange, Scene, SceneConfig, ScriptTimeline, presets,
    settle_frames,
};

#[derive(Parser, Debug)]
#[command(name = "scene-timeline", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the state of one frame as JSON.
    Frame(FrameArgs),
    /// Print the state of every frame in a range, one JSON object per line.
    Range(RangeArgs),
    /// Validate a scene (and script) and print a summary.
    Validate(SceneArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Scene config JSON, or `preset:<name>`.
    #[arg(long)]
    scene: String,

    /// Caption script JSON.
    #[arg(long)]
    script: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Frame index (0-based).
    #[arg(long, allow_negative_numbers = true)]
    frame: i64,
}

#[derive(Args, Debug)]
struct RangeArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// End frame (exclusive); defaults to the scene length.
    #[arg(long)]
    end: Option<u64>,

    /// Evaluate on a thread pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads (with `--parallel`).
    #[arg(long)]
    threads: Option<usize>,

    /// Frames per parallel chunk.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Range(args) => cmd_range(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn load_scene(args: &SceneArgs) -> anyhow::Result<Scene> {
    let config = match args.scene.strip_prefix("preset:") {
        Some(name) => presets::by_name(name)?,
        None => SceneConfig::from_path(&args.scene)
            .with_context(|| format!("load scene '{}'", args.scene))?,
    };
    let mut scene = Scene::new(config).context("compile scene")?;

    if let Some(path) = &args.script {
        let script = ScriptTimeline::from_path(path)
            .with_context(|| format!("load script '{}'", path.display()))?;
        scene = scene.with_script(&script).context("attach script")?;
    }
    Ok(scene)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.scene)?;
    let state = scene.eval_frame(args.frame)?;
    let json = serde_json::to_string_pretty(&state).context("serialize frame state")?;
    println!("{json}");
    Ok(())
}

fn cmd_range(args: RangeArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.scene)?;
    let end = args.end.unwrap_or_else(|| scene.total_frames());
    let range = FrameRange::new(FrameIndex(args.start), FrameIndex(end))?;
    let threading = EvalThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };
    let states = scene_timeline::eval_range(&scene, range, &threading)?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for state in &states {
        serde_json::to_writer(&mut out, state).context("serialize frame state")?;
        writeln!(out).context("write stdout")?;
    }
    out.flush().context("flush stdout")?;
    Ok(())
}

fn cmd_validate(args: SceneArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args)?;
    let config = scene.config();

    println!(
        "scene '{}': {} elements, {} frames at {}/{} fps",
        scene.id(),
        config.elements.len(),
        scene.total_frames(),
        config.fps.num,
        config.fps.den
    );
    for phase in scene.timeline().phases() {
        println!(
            "  phase {:<12} {:>6}..{:<6}",
            phase.id, phase.range.start.0, phase.range.end.0
        );
    }
    println!("  focus segments: {}", scene.focus_track().segments().len());

    let settle = settle_frames(config.fps, &config.camera_spring, 0.01)?;
    println!("  camera spring settles within 1% after {settle} frames");
    let shortest = scene
        .focus_track()
        .segments()
        .iter()
        .filter(|s| s.focus.is_some())
        .map(|s| s.range.len_frames())
        .min();
    if let Some(shortest) = shortest
        && shortest < settle
    {
        tracing::warn!(
            shortest,
            settle,
            "some focus segments end before the camera settles"
        );
    }
    Ok(())
}
