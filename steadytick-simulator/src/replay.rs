//! Replay module.
//!
//! Plays a recorded scenario on a fresh simulator and compares the resulting
//! digest with the one pinned in the file or supplied by the caller.

use std::path::Path;

use tracing::{info, warn};

use crate::error::SimulatorError;
use crate::scenario::Scenario;
use crate::{RunSummary, Simulator};

/// Replays the scenario at `path`.
///
/// `expected` overrides the scenario's own `expected_hash`. When neither is
/// present the run is reported without verification.
pub fn replay_scenario<P: AsRef<Path>>(
    path: P,
    expected: Option<&str>,
) -> Result<RunSummary, SimulatorError> {
    let path = path.as_ref();
    info!(scenario = %path.display(), "Replaying scenario");
    let scenario = Scenario::load(path)?;
    replay(&scenario, expected)
}

/// Replays an already parsed scenario.
pub fn replay(scenario: &Scenario, expected: Option<&str>) -> Result<RunSummary, SimulatorError> {
    let mut simulator = Simulator::from_scenario(scenario)?;
    let summary = simulator.play(scenario);

    let pinned = expected.or(scenario.expected_hash.as_deref());
    if let Some(expected) = pinned {
        verify_digest(expected, &summary.digest)?;
    }
    Ok(summary)
}

/// Compares two hex digests, ignoring case and surrounding whitespace.
pub fn verify_digest(expected: &str, actual: &str) -> Result<(), SimulatorError> {
    let expected = expected.trim();
    if expected.eq_ignore_ascii_case(actual) {
        Ok(())
    } else {
        warn!(expected, actual, "Replay digest mismatch");
        Err(SimulatorError::HashMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"
initial_state: { position: 0.0, velocity: 1.0 }
stall: { model: periodic, every: 4, stall_ms: 120 }
frames:
  - delta_ms: 16
    repeat: 20
  - delta_ms: 16
    commands:
      - { kind: accelerate, value: 0.5 }
"#;

    #[test]
    fn test_replay_is_stable() {
        let scenario = Scenario::parse(SCENARIO).unwrap();
        let first = replay(&scenario, None).unwrap();
        let second = replay(&scenario, Some(&first.digest)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.frames, 21);
        assert_eq!(first.overload_frames, 5);
    }

    #[test]
    fn test_replay_detects_mismatch() {
        let scenario = Scenario::parse(SCENARIO).unwrap();
        let err = replay(&scenario, Some("00")).unwrap_err();
        assert!(matches!(err, SimulatorError::HashMismatch { .. }));
    }

    #[test]
    fn test_pinned_hash_in_file_is_checked() {
        let mut scenario = Scenario::parse(SCENARIO).unwrap();
        let digest = replay(&scenario, None).unwrap().digest;
        scenario.expected_hash = Some(digest.to_uppercase());
        assert!(replay(&scenario, None).is_ok());

        scenario.expected_hash = Some("deadbeef".into());
        assert!(replay(&scenario, None).is_err());
    }

    #[test]
    fn test_replay_from_file() {
        let dir = std::env::temp_dir().join(format!("steadytick-replay-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("scenario.yaml");
        std::fs::write(&path, SCENARIO).unwrap();

        let summary = replay_scenario(&path, None).unwrap();
        assert_eq!(summary.frames, 21);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
