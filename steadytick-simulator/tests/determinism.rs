use proptest::prelude::*;

use steadytick_config::TimestepConfig;
use steadytick_core::commands::Command;
use steadytick_core::state::SystemState;
use steadytick_simulator::{RandomStall, Simulator};

fn run(seed: u64, frames: u64, accel: &[f64]) -> String {
    let mut sim =
        Simulator::new(TimestepConfig::default(), 32, SystemState::new(5.0, 0.5)).unwrap();
    sim.set_stall_model(Box::new(RandomStall::new(80, seed)));
    for value in accel {
        sim.enqueue(Command::accelerate(*value));
    }
    sim.run(frames, 16).digest
}

#[test]
fn same_seed_same_digest() {
    assert_eq!(run(7, 500, &[0.2, -0.1]), run(7, 500, &[0.2, -0.1]));
}

#[test]
fn different_seed_different_digest() {
    assert_ne!(run(7, 500, &[]), run(8, 500, &[]));
}

#[test]
fn different_commands_different_digest() {
    assert_ne!(run(7, 100, &[0.2]), run(7, 100, &[0.3]));
}

#[test]
fn overload_does_not_compound() {
    let mut sim =
        Simulator::new(TimestepConfig::default(), 32, SystemState::new(0.0, 1.0)).unwrap();
    sim.set_stall_model(Box::new(RandomStall::new(1_000, 3)));
    for _ in 0..1_000 {
        let out = sim.step(16);
        assert!(out.report.steps <= 5);
        assert!(sim.core().accumulator() < 0.01);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn digest_is_a_function_of_inputs(seed in any::<u64>(), frames in 1u64..200) {
        prop_assert_eq!(run(seed, frames, &[0.1]), run(seed, frames, &[0.1]));
    }
}
