use std::path::PathBuf;

use steadytick_simulator::replay::replay_scenario;

fn scenario(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../scenarios")
        .join(name)
}

#[test]
fn debugger_stall_is_absorbed() {
    let summary = replay_scenario(scenario("debugger_stall.yaml"), None).unwrap();
    assert_eq!(summary.frames, 200);
    assert_eq!(summary.overload_frames, 4);
    // Each stall contributes at most max_dt of simulated time.
    assert!(summary.final_state.position < 200.0 * 0.016 + 4.0 * 0.05 + 1e-9);
}

#[test]
fn crash_freezes_state() {
    let summary = replay_scenario(scenario("crash_into_origin.yaml"), None).unwrap();
    assert!(!summary.final_state.valid);
    assert_eq!(summary.final_state.position, 0.0);
    assert_eq!(summary.final_state.velocity, 0.0);
}
