//! Indeterminate circular spinner
//!
//! The spinner has no progress value; its arc rotates at a constant rate
//! while the sweep grows and shrinks, so it reads as "busy" at any moment.

use crate::easing::Easing;
use crate::keyframe::KeyframeTrack;
use crate::tween::Tween;

/// Time for one full rotation of the arc
pub const ROTATION_MS: u32 = 1332;
/// Time for the sweep to grow from its minimum to its maximum
pub const SWEEP_MS: u32 = ROTATION_MS / 2;
pub const MIN_SWEEP_DEG: f32 = 10.0;
pub const MAX_SWEEP_DEG: f32 = 290.0;
/// Arcs start at twelve o'clock
const START_ANGLE_OFFSET_DEG: f32 = -90.0;

/// Geometry of the arc at one instant
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpinnerFrame {
    /// Rotation of the whole indicator in degrees (0..360)
    pub rotation: f32,
    /// Arc start angle in degrees, relative to the rotation
    pub start_angle: f32,
    /// Arc length in degrees
    pub sweep: f32,
}

/// A continuously animating circular indicator
#[derive(Clone, Debug)]
pub struct IndeterminateSpinner {
    pub diameter: f32,
    pub stroke_width: f32,
    sweep: KeyframeTrack,
}

impl IndeterminateSpinner {
    pub fn new(diameter: f32, stroke_width: f32) -> Self {
        Self {
            diameter,
            stroke_width,
            sweep: KeyframeTrack::new(
                Tween::new(MIN_SWEEP_DEG, MAX_SWEEP_DEG, SWEEP_MS).easing(Easing::FastOutSlowIn),
            ),
        }
    }

    /// Arc geometry `elapsed_ms` after the spinner appeared
    pub fn frame(&self, elapsed_ms: f32) -> SpinnerFrame {
        let turns = elapsed_ms / ROTATION_MS as f32;
        let sweep = self.sweep.value_at(elapsed_ms);
        // Shrinking the arc from its head would look like reversing, so the
        // tail chases the head instead: advance the start by what was lost.
        let shrink_phase = ((elapsed_ms / SWEEP_MS as f32).floor() as u64) % 2 == 1;
        let start_angle = if shrink_phase {
            START_ANGLE_OFFSET_DEG + (MAX_SWEEP_DEG - sweep)
        } else {
            START_ANGLE_OFFSET_DEG
        };

        SpinnerFrame {
            rotation: turns.fract() * 360.0,
            start_angle,
            sweep,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_frame() {
        let spinner = IndeterminateSpinner::new(18.0, 3.0);
        let frame = spinner.frame(0.0);
        assert_eq!(frame.rotation, 0.0);
        assert_eq!(frame.sweep, MIN_SWEEP_DEG);
        assert_eq!(frame.start_angle, -90.0);
    }

    #[test]
    fn test_rotation_wraps_each_turn() {
        let spinner = IndeterminateSpinner::new(18.0, 3.0);
        let quarter = spinner.frame(ROTATION_MS as f32 / 4.0).rotation;
        assert!((quarter - 90.0).abs() < 0.01);
        let wrapped = spinner.frame(ROTATION_MS as f32 * 1.25).rotation;
        assert!((wrapped - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_sweep_stays_in_bounds() {
        let spinner = IndeterminateSpinner::new(18.0, 3.0);
        for step in 0..400 {
            let frame = spinner.frame(step as f32 * 16.0);
            assert!(frame.sweep >= MIN_SWEEP_DEG - 1e-3);
            assert!(frame.sweep <= MAX_SWEEP_DEG + 1e-3);
        }
    }
}
