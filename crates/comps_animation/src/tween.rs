//! Tweens and target-following values

use crate::easing::Easing;

/// A fixed interpolation from one value to another
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub duration_ms: u32,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration_ms: u32) -> Self {
        Self {
            from,
            to,
            duration_ms,
            easing: Easing::default(),
        }
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Linear progress (0.0 to 1.0) after `elapsed_ms`
    pub fn progress(&self, elapsed_ms: f32) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (elapsed_ms / self.duration_ms as f32).clamp(0.0, 1.0)
    }

    /// Value after `elapsed_ms`. A zero-duration tween is already at `to`.
    pub fn sample(&self, elapsed_ms: f32) -> f32 {
        self.at_progress(self.progress(elapsed_ms))
    }

    /// Value at a linear progress, with easing applied
    pub fn at_progress(&self, progress: f32) -> f32 {
        let eased = self.easing.apply(progress);
        self.from + (self.to - self.from) * eased
    }
}

/// A value that animates toward whatever target it was last given.
///
/// Retargeting mid-flight starts a new tween from the current value, so
/// flipping a flag back and forth never jumps.
#[derive(Clone, Debug)]
pub struct AnimatedValue {
    tween: Tween,
    elapsed_ms: f32,
}

impl AnimatedValue {
    pub fn new(initial: f32, duration_ms: u32) -> Self {
        Self {
            tween: Tween::new(initial, initial, duration_ms),
            elapsed_ms: duration_ms as f32,
        }
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.tween.easing = easing;
        self
    }

    pub fn value(&self) -> f32 {
        self.tween.sample(self.elapsed_ms)
    }

    pub fn target(&self) -> f32 {
        self.tween.to
    }

    pub fn is_settled(&self) -> bool {
        self.tween.progress(self.elapsed_ms) >= 1.0
    }

    /// Start animating toward `target`. No-op if already heading there.
    pub fn set_target(&mut self, target: f32) {
        if (self.tween.to - target).abs() < f32::EPSILON {
            return;
        }
        self.tween.from = self.value();
        self.tween.to = target;
        self.elapsed_ms = 0.0;
    }

    /// Jump to `value` without animating
    pub fn snap_to(&mut self, value: f32) {
        self.tween.from = value;
        self.tween.to = value;
        self.elapsed_ms = self.tween.duration_ms as f32;
    }

    /// Advance by `dt_ms`. Returns true while still moving.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if self.is_settled() {
            return false;
        }
        self.elapsed_ms += dt_ms;
        !self.is_settled()
    }
}
