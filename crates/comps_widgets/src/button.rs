//! Loading button widget
//!
//! A gradient button that, once activated, hides its label and shows an
//! indicator animation until a fixed countdown runs out:
//! - FSM-driven lifecycle: `Idle --Activate--> Loading --Finished--> Idle`
//! - Activation while loading is ignored, so one countdown runs per activation
//! - Bounce and fade indicators are rows of dots on staggered ping-pong tracks;
//!   the circular indicator is a single indeterminate spinner
//!
//! ```rust
//! use comps_widgets::button::{AnimationKind, ButtonConfig, LoadingButton};
//! use comps_widgets::Widget;
//!
//! let mut button = LoadingButton::new(
//!     ButtonConfig::new("Submit").animation(AnimationKind::fade()),
//! );
//! assert!(button.activate());
//! assert!(!button.activate()); // already loading
//!
//! button.tick(3000.0);
//! assert!(!button.state().is_loading);
//! ```

use comps_animation::{AnimatedValue, Easing, IndeterminateSpinner, KeyframeTrack, Tween};
use comps_core::{Color, Event, Notifier, StateMachine, SubscriptionId, TimerQueue};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::CompsError;
use crate::view::{Background, View};
use crate::widget::{sanitize_frame_ms, FrameCarry, Widget, WidgetId};

/// Geometry and timing shared by every indicator kind
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorStyle {
    /// Bounce amplitude; dots travel between `+size/2` and `-size/2`
    pub size: f32,
    /// Dot diameter, or the spinner's base width
    pub width: u32,
    /// Number of dots
    pub count: u32,
    /// One forward pass of a dot's animation
    pub duration_ms: u32,
}

impl IndicatorStyle {
    fn with_duration(duration_ms: u32) -> Self {
        Self {
            size: 3.0,
            width: 6,
            count: 3,
            duration_ms,
        }
    }
}

/// Which indicator plays while loading
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "IndicatorSpec", into = "IndicatorSpec")]
pub enum AnimationKind {
    Bounce(IndicatorStyle),
    Fade(IndicatorStyle),
    Circular(IndicatorStyle),
}

impl AnimationKind {
    pub const BOUNCE_DURATION_MS: u32 = 300;
    pub const FADE_DURATION_MS: u32 = 600;

    pub fn bounce() -> Self {
        AnimationKind::Bounce(IndicatorStyle::with_duration(Self::BOUNCE_DURATION_MS))
    }

    pub fn fade() -> Self {
        AnimationKind::Fade(IndicatorStyle::with_duration(Self::FADE_DURATION_MS))
    }

    pub fn circular() -> Self {
        AnimationKind::Circular(IndicatorStyle::with_duration(0))
    }

    pub fn style(&self) -> &IndicatorStyle {
        match self {
            AnimationKind::Bounce(style)
            | AnimationKind::Fade(style)
            | AnimationKind::Circular(style) => style,
        }
    }

    pub fn style_mut(&mut self) -> &mut IndicatorStyle {
        match self {
            AnimationKind::Bounce(style)
            | AnimationKind::Fade(style)
            | AnimationKind::Circular(style) => style,
        }
    }

    pub fn duration_ms(&self) -> u32 {
        self.style().duration_ms
    }

    /// Phase delay between neighbouring dots
    pub fn delay_ms(&self) -> u32 {
        let style = self.style();
        style.duration_ms / style.count.max(1)
    }

    /// Value every dot starts from
    pub fn initial_value(&self) -> f32 {
        match self {
            AnimationKind::Bounce(style) => style.size / 2.0,
            AnimationKind::Fade(_) => 1.0,
            AnimationKind::Circular(_) => 0.0,
        }
    }

    /// Value every dot travels to before reversing
    pub fn target_value(&self) -> f32 {
        match self {
            AnimationKind::Bounce(style) => -style.size / 2.0,
            AnimationKind::Fade(_) => 0.2,
            AnimationKind::Circular(_) => 0.0,
        }
    }
}

impl Default for AnimationKind {
    fn default() -> Self {
        Self::circular()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum IndicatorKind {
    Bounce,
    Fade,
    Circular,
}

/// Flat config form of [`AnimationKind`]; omitted fields take the kind's defaults
#[derive(Clone, Debug, Serialize, Deserialize)]
struct IndicatorSpec {
    kind: IndicatorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    duration_ms: Option<u32>,
}

impl TryFrom<IndicatorSpec> for AnimationKind {
    type Error = CompsError;

    fn try_from(spec: IndicatorSpec) -> Result<Self, Self::Error> {
        let mut kind = match spec.kind {
            IndicatorKind::Bounce => AnimationKind::bounce(),
            IndicatorKind::Fade => AnimationKind::fade(),
            IndicatorKind::Circular => AnimationKind::circular(),
        };
        let style = kind.style_mut();
        style.size = spec.size.unwrap_or(style.size);
        style.width = spec.width.unwrap_or(style.width);
        style.count = spec.count.unwrap_or(style.count);
        style.duration_ms = spec.duration_ms.unwrap_or(style.duration_ms);

        if style.count == 0 {
            return Err(CompsError::InvalidConfig(
                "indicator count must be at least 1".to_string(),
            ));
        }
        if style.width == 0 || style.size <= 0.0 {
            return Err(CompsError::InvalidConfig(
                "indicator size and width must be positive".to_string(),
            ));
        }
        Ok(kind)
    }
}

impl From<AnimationKind> for IndicatorSpec {
    fn from(kind: AnimationKind) -> Self {
        let style = *kind.style();
        let kind = match kind {
            AnimationKind::Bounce(_) => IndicatorKind::Bounce,
            AnimationKind::Fade(_) => IndicatorKind::Fade,
            AnimationKind::Circular(_) => IndicatorKind::Circular,
        };
        Self {
            kind,
            size: Some(style.size),
            width: Some(style.width),
            count: Some(style.count),
            duration_ms: Some(style.duration_ms),
        }
    }
}

/// Button configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    pub label: String,
    pub text_color: Color,
    pub background: Background,
    /// Disabled buttons ignore activation
    pub enabled: bool,
    pub animation: AnimationKind,
    /// Horizontal gap around each indicator dot
    pub indicator_spacing: f32,
    /// (horizontal, vertical)
    pub padding: (f32, f32),
    /// Duration of the label/indicator cross-fade
    pub fade_ms: u32,
    /// Number of countdown decrements before loading ends
    pub countdown_steps: u32,
    /// Time between decrements
    pub step_ms: u64,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            text_color: Color::WHITE,
            background: Background::vertical_gradient(
                Color::from_hex(0x4FA3F7),
                Color::from_hex(0x1E6FD9),
            ),
            enabled: true,
            animation: AnimationKind::default(),
            indicator_spacing: 5.0,
            padding: (16.0, 9.0),
            fade_ms: 300,
            countdown_steps: 3,
            step_ms: 1000,
        }
    }
}

impl ButtonConfig {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn animation(mut self, animation: AnimationKind) -> Self {
        self.animation = animation;
        self
    }

    pub fn indicator_spacing(mut self, spacing: f32) -> Self {
        self.indicator_spacing = spacing;
        self
    }

    /// Total countdown length
    pub fn countdown_ms(&self) -> u64 {
        self.step_ms * self.countdown_steps as u64
    }
}

/// Observable button state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub is_loading: bool,
    pub remaining_ms: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Phase {
    Idle,
    Loading,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Input {
    Activate,
    CountdownFinished,
}

/// Payload of the countdown timer
#[derive(Clone, Copy, Debug)]
struct CountdownStep;

enum Indicator {
    Dots(Vec<KeyframeTrack>),
    Spinner {
        spinner: IndeterminateSpinner,
        elapsed_ms: f32,
    },
}

impl Indicator {
    fn for_kind(kind: &AnimationKind) -> Self {
        match kind {
            AnimationKind::Bounce(style) | AnimationKind::Fade(style) => {
                let tween = Tween::new(kind.initial_value(), kind.target_value(), style.duration_ms)
                    .easing(Easing::FastOutSlowIn);
                let delay = kind.delay_ms();
                let tracks = (0..style.count)
                    .map(|index| KeyframeTrack::new(tween).start_offset(delay * index))
                    .collect();
                Indicator::Dots(tracks)
            }
            AnimationKind::Circular(style) => Indicator::Spinner {
                spinner: IndeterminateSpinner::new(style.width as f32 * 3.0, style.width as f32 / 2.0),
                elapsed_ms: 0.0,
            },
        }
    }

    fn start(&mut self) {
        match self {
            Indicator::Dots(tracks) => tracks.iter_mut().for_each(KeyframeTrack::start),
            Indicator::Spinner { elapsed_ms, .. } => *elapsed_ms = 0.0,
        }
    }

    fn stop(&mut self) {
        if let Indicator::Dots(tracks) = self {
            tracks.iter_mut().for_each(KeyframeTrack::stop);
        }
    }

    fn tick(&mut self, dt_ms: f32) {
        match self {
            Indicator::Dots(tracks) => tracks.iter_mut().for_each(|track| track.tick(dt_ms)),
            Indicator::Spinner { elapsed_ms, .. } => *elapsed_ms += dt_ms,
        }
    }
}

/// Button that shows a loading indicator for a fixed countdown after activation
pub struct LoadingButton {
    id: WidgetId,
    config: ButtonConfig,
    fsm: StateMachine<Phase, Input>,
    state: ButtonState,
    timers: TimerQueue<CountdownStep>,
    carry: FrameCarry,
    content_alpha: AnimatedValue,
    loading_alpha: AnimatedValue,
    indicator: Indicator,
    on_activate: Option<Box<dyn FnMut() + Send>>,
    subscribers: Notifier<ButtonState>,
    mounted: bool,
}

impl LoadingButton {
    pub fn new(config: ButtonConfig) -> Self {
        debug_assert!(config.animation.style().count >= 1, "indicator count must be positive");

        let fsm = StateMachine::builder(Phase::Idle)
            .on(Phase::Idle, Input::Activate, Phase::Loading)
            .on(Phase::Loading, Input::CountdownFinished, Phase::Idle)
            .build();

        let id = WidgetId::next();
        debug!(?id, label = %config.label, "loading button mounted");

        Self {
            id,
            indicator: Indicator::for_kind(&config.animation),
            content_alpha: AnimatedValue::new(1.0, config.fade_ms),
            loading_alpha: AnimatedValue::new(0.0, config.fade_ms),
            config,
            fsm,
            state: ButtonState::default(),
            timers: TimerQueue::new(),
            carry: FrameCarry::default(),
            on_activate: None,
            subscribers: Notifier::new(),
            mounted: true,
        }
    }

    /// Set the activation callback, called once per accepted activation
    pub fn on_activate<F: FnMut() + Send + 'static>(mut self, callback: F) -> Self {
        self.on_activate = Some(Box::new(callback));
        self
    }

    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Register a callback for every state mutation
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ButtonState) + Send + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Start loading. Returns false (and does nothing) when already loading,
    /// disabled or unmounted.
    pub fn activate(&mut self) -> bool {
        if !self.mounted || !self.config.enabled {
            return false;
        }
        if self.fsm.send(Input::Activate).is_none() {
            trace!(id = ?self.id, "activation ignored while loading");
            return false;
        }

        self.state.is_loading = true;
        if let Some(callback) = self.on_activate.as_mut() {
            callback();
        }

        self.state.remaining_ms = self.config.countdown_ms();
        if self.config.countdown_steps == 0 {
            self.finish_loading();
        } else {
            self.timers.schedule(self.config.step_ms, CountdownStep);
            self.indicator.start();
            self.content_alpha.set_target(0.0);
            self.loading_alpha.set_target(1.0);
            debug!(id = ?self.id, remaining_ms = self.state.remaining_ms, "loading started");
            self.publish();
        }
        true
    }

    fn on_countdown_step(&mut self) {
        self.state.remaining_ms = self.state.remaining_ms.saturating_sub(self.config.step_ms);
        trace!(id = ?self.id, remaining_ms = self.state.remaining_ms, "countdown step");

        if self.state.remaining_ms == 0 {
            self.finish_loading();
        } else {
            self.timers.schedule(self.config.step_ms, CountdownStep);
            self.publish();
        }
    }

    fn finish_loading(&mut self) {
        self.fsm.send(Input::CountdownFinished);
        self.state.is_loading = false;
        self.state.remaining_ms = 0;
        self.indicator.stop();
        self.content_alpha.set_target(1.0);
        self.loading_alpha.set_target(0.0);
        debug!(id = ?self.id, "loading finished");
        self.publish();
    }

    fn publish(&mut self) {
        let state = self.state;
        self.subscribers.notify(&state);
    }

    /// Tear down: cancel the countdown, stop animations and drop callbacks.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.timers.clear();
        self.indicator.stop();
        self.subscribers.clear();
        self.on_activate = None;
        debug!(id = ?self.id, "loading button unmounted");
    }

    fn render_indicator(&self) -> View {
        let color = self.config.text_color;
        let kind = &self.config.animation;
        let children = match &self.indicator {
            Indicator::Dots(tracks) => {
                let diameter = kind.style().width as f32;
                tracks
                    .iter()
                    .map(|track| {
                        let value = track.value();
                        let (opacity, translate_y) = match kind {
                            AnimationKind::Bounce(_) => (1.0, value),
                            AnimationKind::Fade(_) => (value, 0.0),
                            AnimationKind::Circular(_) => (1.0, 0.0),
                        };
                        View::Dot {
                            diameter,
                            color,
                            opacity,
                            translate_y,
                        }
                    })
                    .collect()
            }
            Indicator::Spinner {
                spinner,
                elapsed_ms,
            } => vec![View::Spinner {
                diameter: spinner.diameter,
                stroke_width: spinner.stroke_width,
                frame: spinner.frame(*elapsed_ms),
                color,
            }],
        };

        View::Row {
            children,
            spacing: self.config.indicator_spacing * 2.0,
            opacity: self.loading_alpha.value(),
        }
    }
}

impl Widget for LoadingButton {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn tick(&mut self, dt_ms: f32) {
        if !self.mounted {
            return;
        }
        let dt_ms = sanitize_frame_ms(dt_ms);

        let target = self.timers.now_ms() + self.carry.whole_ms(dt_ms);
        while let Some((_, CountdownStep)) = self.timers.pop_due(target) {
            self.on_countdown_step();
        }
        self.timers.advance_to(target);

        self.indicator.tick(dt_ms);
        self.content_alpha.tick(dt_ms);
        self.loading_alpha.tick(dt_ms);
    }

    fn render(&self) -> View {
        let label = View::Text {
            content: self.config.label.clone(),
            color: self.config.text_color,
            opacity: self.content_alpha.value(),
            translate_y: 0.0,
        };

        View::Surface {
            background: self.config.background,
            padding: self.config.padding,
            corner_radius: 0.0,
            elevation: 0.0,
            child: Box::new(View::stack(vec![self.render_indicator(), label])),
        }
    }

    fn handle_event(&mut self, event: &Event) {
        match event {
            Event::Click => {
                self.activate();
            }
            Event::Unmount => self.unmount(),
        }
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn dots(view: &View) -> Vec<View> {
        view.descendants()
            .into_iter()
            .filter(|v| matches!(v, View::Dot { .. }))
            .cloned()
            .collect()
    }

    #[test]
    fn test_default_styles() {
        assert_eq!(AnimationKind::bounce().duration_ms(), 300);
        assert_eq!(AnimationKind::fade().duration_ms(), 600);
        assert_eq!(AnimationKind::circular().duration_ms(), 0);

        let style = *AnimationKind::bounce().style();
        assert_eq!((style.size, style.width, style.count), (3.0, 6, 3));
    }

    #[test]
    fn test_phase_delay_is_duration_over_count() {
        for (duration, count) in [(300, 3), (600, 4), (900, 5), (0, 3)] {
            let mut kind = AnimationKind::fade();
            kind.style_mut().duration_ms = duration;
            kind.style_mut().count = count;
            assert_eq!(kind.delay_ms(), duration / count);
        }
    }

    #[test]
    fn test_initial_state() {
        let button = LoadingButton::new(ButtonConfig::new("Go"));
        assert_eq!(button.state(), ButtonState::default());
        assert_eq!(button.render().text_content(), "Go");
    }

    #[test]
    fn test_activation_invokes_callback_once() {
        let calls = Arc::new(Mutex::new(0));
        let calls_clone = calls.clone();
        let mut button = LoadingButton::new(ButtonConfig::new("Go"))
            .on_activate(move || *calls_clone.lock().unwrap() += 1);

        assert!(button.activate());
        assert!(!button.activate());
        assert_eq!(*calls.lock().unwrap(), 1);
        assert_eq!(
            button.state(),
            ButtonState {
                is_loading: true,
                remaining_ms: 3000
            }
        );
    }

    #[test]
    fn test_countdown_decrements_each_second() {
        let mut button = LoadingButton::new(ButtonConfig::new("Go"));
        button.activate();

        button.tick(999.0);
        assert_eq!(button.state().remaining_ms, 3000);
        button.tick(1.0);
        assert_eq!(button.state().remaining_ms, 2000);
        button.tick(1000.0);
        assert_eq!(button.state().remaining_ms, 1000);
        assert!(button.state().is_loading);
        button.tick(1000.0);
        assert_eq!(button.state(), ButtonState::default());
    }

    #[test]
    fn test_disabled_button_ignores_activation() {
        let mut button = LoadingButton::new(ButtonConfig::new("Off").enabled(false));
        assert!(!button.activate());
        assert!(!button.state().is_loading);
    }

    #[test]
    fn test_click_event_activates() {
        let mut button = LoadingButton::new(ButtonConfig::new("Go"));
        button.handle_event(&Event::Click);
        assert!(button.state().is_loading);
    }

    #[test]
    fn test_bounce_dots_share_amplitude_and_stagger() {
        let kind = AnimationKind::bounce();
        let mut button = LoadingButton::new(ButtonConfig::new("Go").animation(kind));
        button.activate();

        let rendered = dots(&button.render());
        assert_eq!(rendered.len(), 3);

        // 50ms in: only the first dot has left its start position
        button.tick(50.0);
        let offsets: Vec<f32> = dots(&button.render())
            .iter()
            .map(|d| match d {
                View::Dot { translate_y, .. } => *translate_y,
                _ => unreachable!(),
            })
            .collect();
        assert!(offsets[0] < 1.5);
        assert_eq!(offsets[1], 1.5);
        assert_eq!(offsets[2], 1.5);

        // Every dot stays within +/- size/2
        for _ in 0..100 {
            button.tick(7.0);
            for dot in dots(&button.render()) {
                if let View::Dot { translate_y, opacity, .. } = dot {
                    assert!((-1.5..=1.5).contains(&translate_y));
                    assert_eq!(opacity, 1.0);
                }
            }
        }
    }

    #[test]
    fn test_fade_dots_oscillate_opacity() {
        let mut button = LoadingButton::new(ButtonConfig::new("Go").animation(AnimationKind::fade()));
        button.activate();
        button.tick(600.0);

        let first = dots(&button.render()).remove(0);
        match first {
            View::Dot { opacity, translate_y, .. } => {
                assert!((opacity - 0.2).abs() < 1e-4);
                assert_eq!(translate_y, 0.0);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_circular_renders_single_spinner() {
        let mut button = LoadingButton::new(ButtonConfig::new("Go").animation(AnimationKind::circular()));
        button.activate();
        button.tick(100.0);

        let view = button.render();
        let spinners: Vec<&View> = view
            .descendants()
            .into_iter()
            .filter(|v| matches!(v, View::Spinner { .. }))
            .collect();
        assert_eq!(spinners.len(), 1);
        assert!(dots(&view).is_empty());
        if let View::Spinner { diameter, stroke_width, .. } = spinners[0] {
            assert_eq!(*diameter, 18.0);
            assert_eq!(*stroke_width, 3.0);
        }
    }

    #[test]
    fn test_label_fades_out_while_loading() {
        let mut button = LoadingButton::new(ButtonConfig::new("Go"));
        button.activate();
        button.tick(300.0);
        assert_eq!(button.render().text_content(), "");

        button.tick(2700.0);
        button.tick(300.0);
        assert_eq!(button.render().text_content(), "Go");
    }

    #[test]
    fn test_unmount_cancels_countdown() {
        let updates = Arc::new(Mutex::new(0));
        let updates_clone = updates.clone();
        let mut button = LoadingButton::new(ButtonConfig::new("Go"));
        button.subscribe(move |_| *updates_clone.lock().unwrap() += 1);
        button.activate();
        assert_eq!(*updates.lock().unwrap(), 1);

        button.handle_event(&Event::Unmount);
        button.tick(5000.0);

        assert!(!button.is_mounted());
        assert_eq!(*updates.lock().unwrap(), 1);
        assert!(button.state().is_loading);
        assert!(!button.activate());
    }

    #[test]
    fn test_indicator_spec_defaults_per_kind() {
        #[derive(Deserialize)]
        struct Holder {
            animation: AnimationKind,
        }

        let holder: Holder = toml::from_str("animation = { kind = \"bounce\", size = 4.0 }").unwrap();
        let style = *holder.animation.style();
        assert!(matches!(holder.animation, AnimationKind::Bounce(_)));
        assert_eq!(style.size, 4.0);
        assert_eq!(style.duration_ms, 300);

        let zero = toml::from_str::<Holder>("animation = { kind = \"fade\", count = 0 }");
        assert!(zero.is_err());
    }
}
