use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use steadytick_config::SteadytickConfig;
use steadytick_core::commands::Command;
use steadytick_core::state::SystemState;
use steadytick_core::time::MonotonicClock;
use steadytick_engine::{ConsoleSink, FrameSink, HostLoop, NullSink};
use steadytick_simulator::replay::{replay_scenario, verify_digest};
use steadytick_simulator::{RandomStall, RunSummary, Simulator};
use steadytick_telemetry::logging::EventLogger;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the real-time loop on the monotonic clock until Ctrl-C
    Run(RunArgs),
    /// Run a deterministic virtual-clock simulation and print its digest
    Simulate(SimulateArgs),
    /// Replay a scenario file and verify its digest
    Replay(ReplayArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Stop after this many iterations instead of waiting for Ctrl-C
    #[arg(long)]
    pub iterations: Option<u64>,
    /// Configuration file; defaults to config/steadytick.yaml plus environment
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Do not print display frames
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Number of real-time iterations to simulate
    #[arg(long, default_value_t = 1000)]
    pub frames: u64,
    /// Nominal delta between iterations, in milliseconds
    #[arg(long, default_value_t = 16)]
    pub delta_ms: i64,
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
    /// Upper bound of the random stall added to each delta (0 disables stalls)
    #[arg(long, default_value_t = 0)]
    pub max_stall_ms: u64,
    #[arg(long)]
    pub validate_hash: Option<String>,
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// Scenario YAML file
    pub scenario: PathBuf,
    /// Expected digest; overrides the one pinned in the scenario
    #[arg(long)]
    pub validate_hash: Option<String>,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<SteadytickConfig> {
    let config = match path {
        Some(path) => SteadytickConfig::load_from_path(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => SteadytickConfig::load().context("loading configuration")?,
    };
    Ok(config)
}

fn init_logging(config: &SteadytickConfig) -> anyhow::Result<()> {
    EventLogger::init(&config.telemetry.log_level, config.telemetry.ansi)
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))
}

pub async fn run(args: RunArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_ref())?;
    init_logging(&config)?;

    let sink: Box<dyn FrameSink> = if args.quiet {
        Box::new(NullSink)
    } else {
        Box::new(ConsoleSink::stdout())
    };
    let mut host = HostLoop::from_config(&config, MonotonicClock::new(), sink)?;

    let shutdown = Arc::new(AtomicBool::new(false));
    let signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl-C received, stopping");
                signal.store(true, Ordering::Release);
            }
            Err(e) => warn!("Failed to listen for Ctrl-C: {e}"),
        }
    });

    let summary = host.run(shutdown, args.iterations).await?;
    println!(
        "iterations={} steps={} overloads={} rejected={} invalidations={}",
        summary.iterations,
        summary.fixed_steps,
        summary.overload_frames,
        summary.commands_rejected,
        summary.invalidations
    );
    tracing::debug!(metrics = %host.render_metrics()?, "Final metrics");
    Ok(())
}

pub fn simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_ref())?;
    init_logging(&config)?;

    let host = &config.host;
    let mut sim = Simulator::new(
        config.timestep,
        config.queue.capacity,
        SystemState::new(host.initial_position, host.initial_velocity),
    )?;
    if args.max_stall_ms > 0 {
        sim.set_stall_model(Box::new(RandomStall::new(args.max_stall_ms, args.seed)));
    }

    // Same per-iteration order as the host loop: step, then the input burst.
    let burst = Command::accelerate(host.burst_magnitude);
    for _ in 0..args.frames {
        sim.step(args.delta_ms);
        for _ in 0..host.burst_size {
            sim.enqueue(burst);
        }
    }
    let summary = sim.summary();
    print_summary(&summary);

    if let Some(expected) = args.validate_hash.as_deref() {
        verify_digest(expected, &summary.digest)?;
        println!("Digest verified");
    }
    Ok(())
}

pub fn replay(args: ReplayArgs) -> anyhow::Result<()> {
    let config = load_config(None)?;
    init_logging(&config)?;

    let summary = replay_scenario(&args.scenario, args.validate_hash.as_deref())
        .with_context(|| format!("replaying {}", args.scenario.display()))?;
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!(
        "frames={} steps={} overloads={} drained={} rejected={}",
        summary.frames,
        summary.fixed_steps,
        summary.overload_frames,
        summary.commands_drained,
        summary.commands_rejected
    );
    println!(
        "final pos={} vel={} valid={}",
        summary.final_state.position, summary.final_state.velocity, summary.final_state.valid
    );
    println!("digest={}", summary.digest);
}
