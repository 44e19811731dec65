//! Six-digit `HH:MM:SS` timer display
//!
//! The display ticks once a second on its own virtual timer, reformats the
//! current value and hands each changed digit to its [`DigitCell`], which
//! plays the configured enter/exit transition between the old and new digit.
//!
//! - [`format`]: seconds to `HH:MM:SS` and the six digit characters
//! - [`digit`]: one animated digit cell
//! - [`display`]: the [`TimerDisplay`] widget and its tick loop

pub mod digit;
pub mod display;
pub mod format;

use comps_animation::{AnimationPreset, ContentTransition};
use serde::{Deserialize, Serialize};

pub use digit::DigitCell;
pub use display::{FinishCallback, TimerConfig, TimerDisplay, TimerState};
pub use format::{format_time, split_digits};

/// How the displayed seconds value evolves
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeMode {
    /// Wall-clock time of day from Unix epoch seconds
    #[default]
    Now,
    /// Elapsed duration, incrementing
    CountUp,
    /// Remaining duration, decrementing until it runs out
    CountDown,
}

/// Transition played by a digit cell when its digit changes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeAnimationKind {
    /// New digit drops in from above, old one leaves below
    #[default]
    SlideTop,
    /// New digit rises from below, old one leaves above
    SlideBottom,
    /// Both digits move through the top edge
    BounceTop,
    /// Both digits move through the bottom edge
    BounceBottom,
    /// Swap without animation
    None,
}

impl TimeAnimationKind {
    /// Enter/exit pair for this kind. Offsets are in units of cell height.
    pub fn transition(&self, duration_ms: u32) -> ContentTransition {
        let (enter_from, exit_to) = match self {
            TimeAnimationKind::SlideTop => (-1.0, 1.0),
            TimeAnimationKind::SlideBottom => (1.0, -1.0),
            TimeAnimationKind::BounceTop => (-1.0, -1.0),
            TimeAnimationKind::BounceBottom => (1.0, 1.0),
            TimeAnimationKind::None => return ContentTransition::instant(),
        };
        AnimationPreset::slide_fade(duration_ms, enter_from, exit_to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_directions() {
        let cases = [
            (TimeAnimationKind::SlideTop, -1.0, 1.0),
            (TimeAnimationKind::SlideBottom, 1.0, -1.0),
            (TimeAnimationKind::BounceTop, -1.0, -1.0),
            (TimeAnimationKind::BounceBottom, 1.0, 1.0),
        ];
        for (kind, enter, exit) in cases {
            let transition = kind.transition(500);
            assert_eq!(transition.enter_from, enter, "{kind:?}");
            assert_eq!(transition.exit_to, exit, "{kind:?}");
            assert!(transition.fade);
            assert_eq!(transition.duration_ms, 500);
        }
    }

    #[test]
    fn test_none_is_instant() {
        assert!(TimeAnimationKind::None.transition(500).is_instant());
    }
}
