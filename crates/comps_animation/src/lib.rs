//! Comps Animation System
//!
//! Frame-driven animation primitives. Nothing here owns a clock: every type
//! advances by the `dt_ms` its widget hands it, or is sampled at an elapsed
//! time directly.
//!
//! # Features
//!
//! - **Tweens**: eased interpolation between two values
//! - **Animated values**: retargetable tweens for cross-fades
//! - **Keyframe tracks**: infinite ping-pong loops with staggered start offsets
//! - **Content transitions**: slide/fade enter-exit pairs for swapped content
//! - **Spinner**: indeterminate circular indicator geometry

pub mod easing;
pub mod keyframe;
pub mod presets;
pub mod spinner;
pub mod tween;

pub use easing::Easing;
pub use keyframe::KeyframeTrack;
pub use presets::{AnimationPreset, ContentTransition, LayerProps, TransitionFrame};
pub use spinner::{IndeterminateSpinner, SpinnerFrame};
pub use tween::{AnimatedValue, Tween};
