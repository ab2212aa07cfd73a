use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use ananim::{Backend, Engine, EngineConfig, JsonLinesBackend, NullBackend, RunStats, Script};
use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ananim", version)]
struct Cli {
    /// Log at debug level (`RUST_LOG` takes precedence).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a script to completion.
    Run(RunArgs),
    /// Parse a script and build its scene without running it.
    Check(CheckArgs),
    /// Print the default engine configuration as JSON.
    Config,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Input script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Engine configuration JSON; defaults are used for missing fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured frame rate.
    #[arg(long)]
    fps: Option<f64>,

    /// Write one JSON line per frame (time and display list) to this path.
    #[arg(long)]
    dump: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input script JSON.
    #[arg(long)]
    script: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "debug" } else { "info" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Check(args) => cmd_check(args),
        Command::Config => cmd_config(),
    }
}

fn read_script(path: &Path) -> anyhow::Result<Script> {
    Script::from_path(path).with_context(|| format!("load script '{}'", path.display()))
}

fn read_config(path: Option<&Path>, fps: Option<f64>) -> anyhow::Result<EngineConfig> {
    let mut config = match path {
        Some(p) => EngineConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(fps) = fps {
        config.frame_rate = fps;
    }
    config.validate()?;
    Ok(config)
}

fn play<B: Backend>(config: EngineConfig, script: &Script, backend: B) -> anyhow::Result<RunStats> {
    let mut engine = Engine::with_backend(config, backend)?;
    let timeline = script
        .build(engine.scene_mut())
        .context("build scene from script")?;
    Ok(engine.run(timeline)?)
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let script = read_script(&args.script)?;
    let config = read_config(args.config.as_deref(), args.fps)?;
    let (w, h) = config.pixel_size();
    tracing::info!(
        objects = script.object_count(),
        steps = script.step_count(),
        fps = config.frame_rate,
        "running {}x{} px",
        w,
        h
    );

    let stats = match &args.dump {
        Some(path) => {
            let f = File::create(path)
                .with_context(|| format!("create dump file '{}'", path.display()))?;
            play(config, &script, JsonLinesBackend::new(BufWriter::new(f)))?
        }
        None => play(config, &script, NullBackend::default())?,
    };

    if stats.truncated {
        tracing::warn!(frames = stats.frames, "run stopped at the frame limit");
    }
    println!(
        "{} frames, {:.3}s of animation{}",
        stats.frames,
        stats.elapsed,
        if stats.truncated { " (truncated)" } else { "" }
    );
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let script = read_script(&args.script)?;
    let mut scene = EngineConfig::default().scene();
    script.build(&mut scene).context("build scene from script")?;
    println!(
        "ok: {} objects, {} steps",
        script.object_count(),
        script.step_count()
    );
    Ok(())
}

fn cmd_config() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&EngineConfig::default())?;
    println!("{json}");
    Ok(())
}
