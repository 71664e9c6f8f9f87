//! Display-only blending between the last two fixed-step states.

use crate::state::SystemState;

/// Linear blend of `previous` towards `current` by `alpha`.
///
/// `valid` is taken from `current`. `alpha` is clamped into `[0, 1]`.
#[inline]
pub fn blend(previous: &SystemState, current: &SystemState, alpha: f64) -> SystemState {
    let alpha = if alpha.is_nan() {
        0.0
    } else {
        alpha.clamp(0.0, 1.0)
    };
    SystemState {
        // prev + (curr - prev) * alpha is exact when prev == curr.
        position: lerp(previous.position, current.position, alpha),
        velocity: lerp(previous.velocity, current.velocity, alpha),
        valid: current.valid,
    }
}

#[inline]
fn lerp(from: f64, to: f64, alpha: f64) -> f64 {
    from + (to - from) * alpha
}
