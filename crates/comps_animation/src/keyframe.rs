//! Looping keyframe tracks
//!
//! A [`KeyframeTrack`] repeats one [`Tween`] forever in ping-pong fashion:
//! forward on even cycles, reversed on odd ones. An optional start offset
//! holds the track at its first value before the first cycle begins, which
//! is how a row of indicators gets its staggered wave.
//!
//! ```rust
//! use comps_animation::{Easing, KeyframeTrack, Tween};
//!
//! let mut track = KeyframeTrack::new(Tween::new(1.0, 0.2, 600).easing(Easing::Linear))
//!     .start_offset(200);
//! track.start();
//!
//! track.tick(200.0); // offset elapsed, cycle 0 begins
//! track.tick(600.0); // end of cycle 0
//! assert!((track.value() - 0.2).abs() < 1e-6);
//! track.tick(300.0); // halfway back
//! assert!((track.value() - 0.6).abs() < 1e-6);
//! ```

use crate::tween::Tween;

/// Infinite ping-pong loop of a tween with a start offset
#[derive(Clone, Debug)]
pub struct KeyframeTrack {
    tween: Tween,
    start_offset_ms: u32,
    elapsed_ms: f32,
    playing: bool,
}

impl KeyframeTrack {
    pub fn new(tween: Tween) -> Self {
        Self {
            tween,
            start_offset_ms: 0,
            elapsed_ms: 0.0,
            playing: false,
        }
    }

    /// Delay before the first cycle starts
    pub fn start_offset(mut self, offset_ms: u32) -> Self {
        self.start_offset_ms = offset_ms;
        self
    }

    pub fn start_offset_ms(&self) -> u32 {
        self.start_offset_ms
    }

    pub fn tween(&self) -> &Tween {
        &self.tween
    }

    /// Start (or restart) from the beginning of the offset
    pub fn start(&mut self) {
        self.elapsed_ms = 0.0;
        self.playing = true;
    }

    /// Stop and rewind to the first value
    pub fn stop(&mut self) {
        self.elapsed_ms = 0.0;
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn tick(&mut self, dt_ms: f32) {
        if self.playing {
            self.elapsed_ms += dt_ms;
        }
    }

    /// Current value
    pub fn value(&self) -> f32 {
        self.value_at(self.elapsed_ms)
    }

    /// Value `elapsed_ms` after start, independent of the track's own clock
    pub fn value_at(&self, elapsed_ms: f32) -> f32 {
        let local = elapsed_ms - self.start_offset_ms as f32;
        let duration = self.tween.duration_ms as f32;
        if local <= 0.0 || duration <= 0.0 {
            return self.tween.from;
        }

        let cycle = (local / duration).floor();
        let phase = (local - cycle * duration) / duration;
        // A cycle boundary lands on phase 0 of the next cycle; map it to the
        // end of the one just finished so the turnaround value is exact.
        let (cycle, phase) = if phase == 0.0 {
            (cycle - 1.0, 1.0)
        } else {
            (cycle, phase)
        };

        let forward = (cycle as u64) % 2 == 0;
        let progress = if forward { phase } else { 1.0 - phase };
        self.tween.at_progress(progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;

    fn linear(from: f32, to: f32, duration_ms: u32) -> KeyframeTrack {
        KeyframeTrack::new(Tween::new(from, to, duration_ms).easing(Easing::Linear))
    }

    #[test]
    fn test_holds_first_value_during_offset() {
        let mut track = linear(1.5, -1.5, 300).start_offset(100);
        track.start();
        track.tick(99.0);
        assert_eq!(track.value(), 1.5);
    }

    #[test]
    fn test_ping_pong() {
        let track = linear(0.0, 10.0, 100);
        assert_eq!(track.value_at(50.0), 5.0);
        assert_eq!(track.value_at(100.0), 10.0);
        assert_eq!(track.value_at(150.0), 5.0);
        assert_eq!(track.value_at(200.0), 0.0);
        assert_eq!(track.value_at(250.0), 5.0);
    }

    #[test]
    fn test_stop_rewinds() {
        let mut track = linear(0.0, 1.0, 100);
        track.start();
        track.tick(50.0);
        track.stop();
        assert!(!track.is_playing());
        assert_eq!(track.value(), 0.0);

        // Ticks while stopped are ignored
        track.tick(50.0);
        assert_eq!(track.value(), 0.0);
    }

    #[test]
    fn test_zero_duration_holds_first_value() {
        let mut track = linear(0.0, 1.0, 0);
        track.start();
        track.tick(1000.0);
        assert_eq!(track.value(), 0.0);
    }
}
