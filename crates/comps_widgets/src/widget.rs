//! Base widget trait and types

use comps_core::Event;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::view::View;

/// Unique identifier for a mounted widget instance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Allocate a fresh id
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Base trait for all widgets
pub trait Widget {
    /// Get the widget's unique ID
    fn id(&self) -> WidgetId;

    /// Advance timers and animations by `dt_ms` of host frame time
    fn tick(&mut self, dt_ms: f32);

    /// Build the view tree for the current state
    fn render(&self) -> View;

    /// Handle a host event
    fn handle_event(&mut self, event: &Event);

    /// False once the widget has been unmounted
    fn is_mounted(&self) -> bool;
}

/// Longest frame a widget will catch up on in one tick
pub const MAX_FRAME_MS: f32 = 3_600_000.0;

/// Clamp a host frame time to `0..=MAX_FRAME_MS`; NaN and infinities count
/// as an empty frame.
pub(crate) fn sanitize_frame_ms(dt_ms: f32) -> f32 {
    if dt_ms.is_finite() {
        dt_ms.clamp(0.0, MAX_FRAME_MS)
    } else {
        0.0
    }
}

/// Converts fractional frame times into whole timer milliseconds without
/// losing the remainder between frames.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct FrameCarry {
    remainder_ms: f32,
}

impl FrameCarry {
    pub(crate) fn whole_ms(&mut self, dt_ms: f32) -> u64 {
        let total = self.remainder_ms + sanitize_frame_ms(dt_ms);
        let whole = total.floor();
        self.remainder_ms = total - whole;
        whole as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_ids_are_unique() {
        assert_ne!(WidgetId::next(), WidgetId::next());
    }

    #[test]
    fn test_frame_carry_accumulates_fractions() {
        let mut carry = FrameCarry::default();
        let total: u64 = (0..60).map(|_| carry.whole_ms(16.5)).sum();
        assert_eq!(total, 990);
    }

    #[test]
    fn test_frame_carry_ignores_non_finite_frames() {
        let mut carry = FrameCarry::default();
        carry.whole_ms(0.5);
        assert_eq!(carry.whole_ms(f32::INFINITY), 0);
        assert_eq!(carry.whole_ms(f32::NAN), 0);
        assert_eq!(carry.whole_ms(-5.0), 0);
        // The earlier remainder survives
        assert_eq!(carry.whole_ms(0.5), 1);
    }

    #[test]
    fn test_huge_frames_are_capped() {
        assert_eq!(sanitize_frame_ms(f32::MAX), MAX_FRAME_MS);
        assert_eq!(sanitize_frame_ms(16.0), 16.0);
    }
}
