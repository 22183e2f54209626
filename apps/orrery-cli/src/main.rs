mod demo;
mod headless;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use orrery_common::EngineConfig;
use orrery_kernel::{Clock, EngineContext, LoopSummary, ManualClock, Scheduler, SystemClock};
use orrery_render::{Command, RecordingBackend, UniformValue, uniforms};
use tracing_subscriber::EnvFilter;

use demo::DemoGame;
use headless::{HeadlessWindow, ScriptedInput};

type HeadlessContext = EngineContext<HeadlessWindow, ScriptedInput, RecordingBackend>;

#[derive(Parser)]
#[command(name = "orrery-cli", about = "Headless driver for the orrery engine")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Engine config file (JSON). Defaults are used when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and crate info
    Info,
    /// Run the spinning-spheres demo headless and print loop statistics
    Run {
        /// Frames presented before the window asks to close. The closing iteration still renders.
        #[arg(short, long, default_value = "120")]
        frames: usize,
        /// Drive the loop with a scripted clock advancing this many ms per reading
        #[arg(long)]
        step_ms: Option<u64>,
    },
    /// Render one frame of the demo scene and print each sphere's matrices
    Scene,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Info => {
            println!("orrery-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", orrery_common::crate_info());
            println!("math: {}", orrery_math::crate_info());
            println!("scene: {}", orrery_scene::crate_info());
            println!("input: {}", orrery_input::crate_info());
            println!("render: {}", orrery_render::crate_info());
            println!("kernel: {}", orrery_kernel::crate_info());
            println!(
                "timing: {} ticks/s, stack depth {}",
                config.timing.ticks_per_second, config.render.stack_depth
            );
        }
        Commands::Run { frames, step_ms } => {
            let (summary, ctx, game) = match step_ms {
                Some(ms) => {
                    let steps = std::iter::repeat_n(Duration::from_millis(ms), frames + 1);
                    run_demo(&config, ManualClock::new(steps), frames)?
                }
                None => run_demo(&config, SystemClock::new(), frames)?,
            };
            print_summary(&summary);
            println!("draws: {}", game.draws());
            println!("polls: {}", ctx.input.device().polls());
            let pos = ctx.camera.pos();
            println!("camera: ({:.3}, {:.3}, {:.3})", pos.x, pos.y, pos.z);
            println!("spin: {:.2} deg", game.spin());
            let light = game.light_dir();
            println!(
                "light: ({:.3}, {:.3}, {:.3}){}",
                light.x,
                light.y,
                light.z,
                if game.light_follows_camera() { " following camera" } else { "" }
            );
            println!(
                "window: {} frames presented, disposed={}",
                ctx.window.presented(),
                ctx.window.is_disposed()
            );
        }
        Commands::Scene => {
            let mut ctx = headless_context(&config, 1);
            let mut game = DemoGame::setup(&mut ctx)?;
            ctx.backend.clear();
            orrery_kernel::Game::render(&mut game, &mut ctx)?;
            for (i, leaf) in leaf_matrices(ctx.backend.commands()).iter().enumerate() {
                println!("leaf {i} ({}):", leaf.pass);
                println!("  model:");
                print_rows(&leaf.model);
                println!("  normal:");
                print_rows(&leaf.normal);
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let config = match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn headless_context(config: &EngineConfig, frames: usize) -> HeadlessContext {
    EngineContext::new(
        config,
        HeadlessWindow::new(config.window.width, config.window.height, frames),
        ScriptedInput::demo(),
        RecordingBackend::new(),
    )
}

fn run_demo<C: Clock>(
    config: &EngineConfig,
    clock: C,
    frames: usize,
) -> anyhow::Result<(LoopSummary, HeadlessContext, DemoGame)> {
    let mut ctx = headless_context(config, frames);
    let mut game = DemoGame::setup(&mut ctx)?;
    let mut scheduler = Scheduler::new(clock, &config.timing);
    let summary = scheduler.run(&mut ctx, &mut game)?;
    Ok((summary, ctx, game))
}

fn print_summary(summary: &LoopSummary) {
    println!("ticks: {}", summary.ticks);
    println!("renders: {}", summary.renders);
    println!("elapsed: {:?}", summary.elapsed);
    println!("average render: {:?}", summary.average_render);
    match summary.rates {
        Some(rates) => println!(
            "rates: {} ticks/s, {} renders/s",
            rates.ticks_per_second, rates.renders_per_second
        ),
        None => println!("rates: run shorter than one second"),
    }
}

#[derive(Debug, Clone, PartialEq)]
struct LeafMatrices {
    pass: String,
    model: [f32; 16],
    normal: [f32; 16],
}

/// Pair the model and normal matrices uploaded before each draw with the program in use.
fn leaf_matrices(commands: &[Command]) -> Vec<LeafMatrices> {
    let mut out = Vec::new();
    let mut pass = String::new();
    let mut model = [0.0; 16];
    let mut normal = [0.0; 16];
    for command in commands {
        match command {
            Command::UseProgram(Some(program)) => pass = format!("program {}", program.0),
            Command::Uniform { name, value, .. } => {
                if let UniformValue::Mat4(m) = value {
                    match name.as_str() {
                        uniforms::MODEL_MATRIX => model = *m,
                        uniforms::NORMAL_MATRIX => normal = *m,
                        _ => {}
                    }
                }
            }
            Command::Draw(_) => out.push(LeafMatrices {
                pass: pass.clone(),
                model,
                normal,
            }),
            _ => {}
        }
    }
    out
}

fn print_rows(m: &[f32; 16]) {
    for row in m.chunks(4) {
        println!(
            "    [{:>8.3} {:>8.3} {:>8.3} {:>8.3}]",
            row[0], row[1], row[2], row[3]
        );
    }
}
