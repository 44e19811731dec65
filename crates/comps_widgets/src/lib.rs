//! Comps Widgets
//!
//! Two self-contained animated widgets for hosts that own layout and painting:
//!
//! - [`LoadingButton`]: shows a bounce, fade or spinner indicator for a fixed
//!   countdown after it is activated
//! - [`TimerDisplay`]: a six-digit `HH:MM:SS` display that counts wall-clock
//!   time, up or down, animating each digit as it changes
//!
//! Widgets are plain state machines. A host calls [`Widget::tick`] once per
//! frame, draws the [`View`] returned by [`Widget::render`], and forwards
//! [`Event`]s. Hosts without a frame clock can use [`driver::FrameLoop`].
//!
//! # Example
//!
//! ```rust
//! use comps_widgets::prelude::*;
//!
//! let mut timer = TimerDisplay::mount(TimerConfig::new(5, TimeMode::CountDown), None);
//! timer.tick(2000.0);
//! assert_eq!(timer.formatted(), "00:00:03");
//! ```

pub mod button;
pub mod config;
pub mod driver;
pub mod error;
pub mod timer;
pub mod view;
pub mod widget;

pub use button::{AnimationKind, ButtonConfig, ButtonState, IndicatorStyle, LoadingButton};
pub use comps_core::Event;
pub use config::CompsConfig;
pub use error::{CompsError, Result};
pub use timer::{TimeAnimationKind, TimeMode, TimerConfig, TimerDisplay, TimerState};
pub use view::{Background, View};
pub use widget::{Widget, WidgetId};

/// Everything a host usually needs
pub mod prelude {
    pub use crate::button::{AnimationKind, ButtonConfig, ButtonState, LoadingButton};
    pub use crate::timer::{TimeAnimationKind, TimeMode, TimerConfig, TimerDisplay, TimerState};
    pub use crate::view::{Background, View};
    pub use crate::widget::Widget;
    pub use comps_core::{Color, Event};
}
