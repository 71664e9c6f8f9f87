// steadytick-simulator/src/lib.rs

/*!
# Steadytick Simulator

Deterministic simulation and replay for the fixed-timestep core. A virtual
clock replaces wall time, stall models emulate irregular host deltas, and
every frame is folded into a BLAKE3 digest so that two runs can be compared
by a single hex string.

## Key Components:
- **Virtual Clock:** Simulated millisecond time that moves only when driven.
- **Stall Models:** None, seeded random and periodic delta spikes.
- **Scenarios:** YAML scripts of frame deltas and command injections.
- **Replay Engine:** Plays a scenario and checks its pinned digest.
*/

use blake3::Hasher;
use tracing::{debug, info};

use steadytick_config::TimestepConfig;
use steadytick_core::commands::{Command, CommandQueue};
use steadytick_core::sim::{FrameOutput, SimulationCore};
use steadytick_core::state::SystemState;
use steadytick_core::time::Clock;

pub mod error;
pub mod replay;
pub mod scenario;
pub mod stall;
pub mod virtual_clock;

pub use error::SimulatorError;
pub use scenario::{Scenario, ScenarioFrame};
pub use stall::{NoStall, PeriodicStall, RandomStall, StallModel, StallSpec};
pub use virtual_clock::VirtualClock;

/// Aggregate of a simulated run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub fixed_steps: u64,
    pub overload_frames: u64,
    pub commands_drained: u64,
    pub commands_rejected: u64,
    pub final_state: SystemState,
    /// Hex-encoded BLAKE3 digest over every frame so far.
    pub digest: String,
}

#[derive(Debug, Default, Clone, Copy)]
struct Counters {
    frames: u64,
    fixed_steps: u64,
    overload_frames: u64,
    commands_drained: u64,
    commands_rejected: u64,
}

/// Drives a [`SimulationCore`] from a [`VirtualClock`].
///
/// # Fields
/// - `clock`: virtual time source sampled once per frame.
/// - `core`: the temporal core under test.
/// - `producer`: handle to the core's command queue.
/// - `stall`: model applied to each nominal frame delta.
/// - `state_hasher`: BLAKE3 hasher over the frame history.
pub struct Simulator {
    clock: VirtualClock,
    core: SimulationCore,
    producer: CommandQueue,
    stall: Box<dyn StallModel>,
    state_hasher: Hasher,
    counters: Counters,
}

impl Simulator {
    /// Creates a simulator whose virtual clock starts at zero.
    ///
    /// * `config` - timestep parameters for the core.
    /// * `capacity` - command queue bound.
    /// * `initial` - starting state.
    pub fn new(
        config: TimestepConfig,
        capacity: usize,
        initial: SystemState,
    ) -> Result<Self, SimulatorError> {
        let clock = VirtualClock::new(0);
        let queue = CommandQueue::with_capacity(capacity).map_err(steadytick_core::CoreError::from)?;
        let producer = queue.share();
        let core = SimulationCore::new(config, queue, initial, clock.now())?;
        Ok(Self {
            clock,
            core,
            producer,
            stall: Box::new(NoStall),
            state_hasher: Hasher::new(),
            counters: Counters::default(),
        })
    }

    /// Builds a simulator configured as the scenario describes.
    pub fn from_scenario(scenario: &Scenario) -> Result<Self, SimulatorError> {
        let mut simulator = Self::new(
            scenario.timestep,
            scenario.queue.capacity,
            scenario.initial_state,
        )?;
        simulator.set_stall_model(scenario.stall.build());
        Ok(simulator)
    }

    /// Replaces the stall model applied to subsequent frames.
    pub fn set_stall_model(&mut self, model: Box<dyn StallModel>) {
        self.stall = model;
    }

    /// Offers a command to the core's queue. Returns `false` when full.
    pub fn enqueue(&mut self, command: Command) -> bool {
        let accepted = self.producer.enqueue(command);
        if !accepted {
            self.counters.commands_rejected += 1;
            self.state_hasher.update(b"REJECTED");
        }
        accepted
    }

    /// Advances virtual time by one stalled `delta_ms` and runs one iteration.
    pub fn step(&mut self, delta_ms: i64) -> FrameOutput {
        let observed = self.stall.apply_stall(delta_ms);
        self.clock.advance(observed);
        let out = self.core.advance(self.clock.now());

        self.counters.frames += 1;
        self.counters.fixed_steps += u64::from(out.report.steps);
        self.counters.commands_drained += u64::from(out.report.commands_drained);
        if out.report.overloaded {
            self.counters.overload_frames += 1;
            debug!(
                timestamp = out.timestamp,
                discarded_seconds = out.report.discarded_seconds,
                "Simulated frame hit the step cap"
            );
        }
        self.hash_frame(&out);
        out
    }

    /// Runs `frames` iterations of the same nominal delta.
    pub fn run(&mut self, frames: u64, delta_ms: i64) -> RunSummary {
        for _ in 0..frames {
            self.step(delta_ms);
        }
        self.summary()
    }

    /// Plays every frame of a scenario.
    pub fn play(&mut self, scenario: &Scenario) -> RunSummary {
        for frame in &scenario.frames {
            for command in &frame.commands {
                self.enqueue(*command);
            }
            for _ in 0..frame.repeat {
                self.step(frame.delta_ms);
            }
        }
        let summary = self.summary();
        info!(
            frames = summary.frames,
            fixed_steps = summary.fixed_steps,
            overload_frames = summary.overload_frames,
            digest = %summary.digest,
            "Scenario playback complete"
        );
        summary
    }

    /// Hex digest of everything simulated so far.
    pub fn digest(&self) -> String {
        hex::encode(self.state_hasher.finalize().as_bytes())
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            frames: self.counters.frames,
            fixed_steps: self.counters.fixed_steps,
            overload_frames: self.counters.overload_frames,
            commands_drained: self.counters.commands_drained,
            commands_rejected: self.counters.commands_rejected,
            final_state: *self.core.state(),
            digest: self.digest(),
        }
    }

    #[inline]
    pub fn core(&self) -> &SimulationCore {
        &self.core
    }

    #[inline]
    pub fn clock(&self) -> &VirtualClock {
        &self.clock
    }

    fn hash_frame(&mut self, out: &FrameOutput) {
        let state = self.core.state();
        let h = &mut self.state_hasher;
        h.update(&out.timestamp.to_le_bytes());
        h.update(&out.dt_ms.to_le_bytes());
        h.update(&out.report.steps.to_le_bytes());
        h.update(&[u8::from(out.report.overloaded), u8::from(state.valid)]);
        h.update(&state.position.to_bits().to_le_bytes());
        h.update(&state.velocity.to_bits().to_le_bytes());
        h.update(&out.display.position.to_bits().to_le_bytes());
        h.update(&out.display.velocity.to_bits().to_le_bytes());
    }
}
