use proptest::prelude::*;

use steadytick_core::prelude::*;
use steadytick_core::TimestepConfig;

fn fresh_core(initial: SystemState, capacity: usize) -> SimulationCore {
    let queue = CommandQueue::with_capacity(capacity).unwrap();
    SimulationCore::new(TimestepConfig::default(), queue, initial, 0).unwrap()
}

#[test]
fn spiral_of_death_is_cut_at_five_steps() {
    let mut core = fresh_core(SystemState::new(0.0, 1.0), 32);
    let out = core.advance(200);

    assert_eq!(out.report.steps, 5);
    assert!(out.report.overloaded);
    assert_eq!(core.accumulator(), 0.0);

    // Next normal frame does not pay for the dropped 150 ms.
    let out = core.advance(216);
    assert_eq!(out.report.steps, 1);
}

#[test]
fn thirty_third_command_is_rejected() {
    let queue = CommandQueue::with_capacity(32).unwrap();
    for _ in 0..32 {
        assert!(queue.enqueue(Command::accelerate(0.1)));
    }
    assert!(!queue.enqueue(Command::accelerate(0.1)));
    assert_eq!(queue.len(), 32);
}

#[test]
fn burst_backlog_is_bounded_by_capacity() {
    // Mirrors the host loop: ten commands per 16 ms iteration against a
    // drain rate of at most four per 10 ms step.
    let mut core = fresh_core(SystemState::new(0.0, 1.0), 32);
    let producer = core.queue().share();
    let mut now = 0;
    for _ in 0..200 {
        now += 16;
        core.advance(now);
        for _ in 0..10 {
            producer.enqueue(Command::accelerate(0.1));
        }
        assert!(producer.len() <= 32);
    }
}

#[test]
fn extreme_commands_through_the_queue_freeze_the_state() {
    let mut core = fresh_core(SystemState::new(1.0, 0.0), 32);
    let producer = core.queue().share();
    for value in [f64::MAX, f64::MAX] {
        producer.enqueue(Command::accelerate(value));
    }
    producer.enqueue(Command::stop());
    for value in [-f64::MAX, -f64::MAX] {
        producer.enqueue(Command::accelerate(value));
    }

    let mut now = 0;
    for _ in 0..10 {
        now += 16;
        core.advance(now);
        let state = core.state();
        assert!(!state.valid || (state.position.is_finite() && state.position >= 0.0));
    }
    assert!(!core.state().valid);
    assert_eq!(core.state().position, 0.0);
}

proptest! {
    #[test]
    fn step_count_and_accumulator_stay_bounded(
        deltas in proptest::collection::vec(0i64..500, 1..200),
    ) {
        let mut core = fresh_core(SystemState::new(0.0, 1.0), 32);
        let fixed_dt = core.config().fixed_dt_seconds;
        let max_steps = core.config().max_steps_per_frame;
        let mut now = 0;

        for delta in deltas {
            now += delta;
            let out = core.advance(now);
            prop_assert!(out.report.steps <= max_steps);
            if out.report.steps == max_steps {
                prop_assert_eq!(core.accumulator(), 0.0);
            } else {
                prop_assert!(core.accumulator() >= 0.0);
                prop_assert!(core.accumulator() < fixed_dt);
            }
        }
    }

    #[test]
    fn every_step_advances_by_exactly_fixed_dt(
        deltas in proptest::collection::vec(0i64..120, 1..100),
    ) {
        // With constant velocity 1, each step moves the body by exactly
        // the same increment as a standalone evolve(fixed_dt) would.
        let mut core = fresh_core(SystemState::new(0.0, 1.0), 4);
        let fixed_dt = core.config().fixed_dt_seconds;
        let mut now = 0;

        for delta in deltas {
            now += delta;
            let before = *core.state();
            let out = core.advance(now);
            let mut expected = before;
            for _ in 0..out.report.steps {
                expected.evolve(fixed_dt);
            }
            prop_assert_eq!(*core.state(), expected);
        }
    }

    #[test]
    fn identical_inputs_replay_identically(
        deltas in proptest::collection::vec(0i64..80, 1..100),
        commands in proptest::collection::vec(-1.0f64..1.0, 0..64),
    ) {
        let run = || {
            let mut core = fresh_core(SystemState::new(1.0, 0.5), 32);
            let producer = core.queue().share();
            let mut outputs = Vec::new();
            let mut now = 0;
            for (i, delta) in deltas.iter().enumerate() {
                if let Some(value) = commands.get(i) {
                    producer.enqueue(Command::accelerate(*value));
                }
                now += delta;
                outputs.push(core.advance(now));
            }
            outputs
        };
        prop_assert_eq!(run(), run());
    }

    #[test]
    fn display_alpha_stays_in_unit_interval(
        deltas in proptest::collection::vec(0i64..100, 1..100),
    ) {
        let mut core = fresh_core(SystemState::new(0.0, 2.0), 32);
        let mut now = 0;
        for delta in deltas {
            now += delta;
            let out = core.advance(now);
            let low = core.previous().position.min(core.state().position);
            let high = core.previous().position.max(core.state().position);
            prop_assert!(out.display.position >= low - 1e-12);
            prop_assert!(out.display.position <= high + 1e-12);
        }
    }
}
