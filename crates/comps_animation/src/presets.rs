//! Content transition presets
//!
//! When a piece of content is replaced, the outgoing copy plays an exit and
//! the incoming copy plays an enter, both over the same duration. Vertical
//! offsets are fractions of the content's own height so hosts can scale them
//! after layout (`-1.0` is one full height above the resting position).

use crate::easing::Easing;
use crate::tween::Tween;

/// Properties a transition animates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerProps {
    pub opacity: f32,
    /// Vertical offset in units of content height
    pub translate_y: f32,
}

impl LayerProps {
    pub const RESTING: LayerProps = LayerProps {
        opacity: 1.0,
        translate_y: 0.0,
    };
}

/// An enter/exit pair for replacing content
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentTransition {
    pub duration_ms: u32,
    /// Where the incoming content starts
    pub enter_from: f32,
    /// Where the outgoing content ends
    pub exit_to: f32,
    pub fade: bool,
    pub easing: Easing,
}

/// Snapshot of both layers at one instant of a transition
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionFrame {
    pub incoming: LayerProps,
    /// `None` once the outgoing layer has finished
    pub outgoing: Option<LayerProps>,
}

impl ContentTransition {
    /// Swap content immediately
    pub fn instant() -> Self {
        Self {
            duration_ms: 0,
            enter_from: 0.0,
            exit_to: 0.0,
            fade: false,
            easing: Easing::Linear,
        }
    }

    pub fn is_instant(&self) -> bool {
        self.duration_ms == 0
    }

    /// Layer properties `elapsed_ms` into the transition
    pub fn frame(&self, elapsed_ms: f32) -> TransitionFrame {
        let enter = Tween::new(self.enter_from, 0.0, self.duration_ms).easing(self.easing);
        let exit = Tween::new(0.0, self.exit_to, self.duration_ms).easing(self.easing);
        let progress = enter.progress(elapsed_ms);

        let (fade_in, fade_out) = if self.fade {
            (
                Tween::new(0.0, 1.0, self.duration_ms).easing(self.easing).sample(elapsed_ms),
                Tween::new(1.0, 0.0, self.duration_ms).easing(self.easing).sample(elapsed_ms),
            )
        } else {
            (1.0, 1.0)
        };

        TransitionFrame {
            incoming: LayerProps {
                opacity: fade_in,
                translate_y: enter.sample(elapsed_ms),
            },
            outgoing: (progress < 1.0).then_some(LayerProps {
                opacity: fade_out,
                translate_y: exit.sample(elapsed_ms),
            }),
        }
    }
}

/// Pre-built transitions for common patterns
pub struct AnimationPreset;

impl AnimationPreset {
    /// Vertical slide combined with a cross-fade.
    ///
    /// `enter_from` and `exit_to` are in units of content height.
    pub fn slide_fade(duration_ms: u32, enter_from: f32, exit_to: f32) -> ContentTransition {
        ContentTransition {
            duration_ms,
            enter_from,
            exit_to,
            fade: true,
            easing: Easing::FastOutSlowIn,
        }
    }

    /// Cross-fade without movement
    pub fn fade(duration_ms: u32) -> ContentTransition {
        Self::slide_fade(duration_ms, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_fade_start_and_end() {
        let transition = AnimationPreset::slide_fade(500, -1.0, 1.0);

        let start = transition.frame(0.0);
        assert_eq!(start.incoming.translate_y, -1.0);
        assert_eq!(start.incoming.opacity, 0.0);
        let outgoing = start.outgoing.expect("outgoing visible at start");
        assert_eq!(outgoing.translate_y, 0.0);
        assert_eq!(outgoing.opacity, 1.0);

        let end = transition.frame(500.0);
        assert_eq!(end.incoming, LayerProps::RESTING);
        assert!(end.outgoing.is_none());
    }

    #[test]
    fn test_exit_moves_toward_target() {
        let transition = AnimationPreset::slide_fade(500, 1.0, -1.0);
        let mid = transition.frame(250.0);
        let outgoing = mid.outgoing.unwrap();
        assert!(outgoing.translate_y < 0.0 && outgoing.translate_y > -1.0);
        assert!(mid.incoming.translate_y > 0.0 && mid.incoming.translate_y < 1.0);
    }

    #[test]
    fn test_instant_has_no_outgoing_layer() {
        let frame = ContentTransition::instant().frame(0.0);
        assert_eq!(frame.incoming, LayerProps::RESTING);
        assert!(frame.outgoing.is_none());
    }

    #[test]
    fn test_fade_keeps_position() {
        let frame = AnimationPreset::fade(200).frame(100.0);
        assert_eq!(frame.incoming.translate_y, 0.0);
        assert!(frame.incoming.opacity > 0.0 && frame.incoming.opacity < 1.0);
    }
}
