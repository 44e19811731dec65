//! Timer display widget
//!
//! The tick loop publishes the starting value at mount, then once per second
//! steps the value (up for `Now`/`CountUp`, down for `CountDown`) and
//! publishes again. A countdown that would go below zero stops the loop and
//! reports completion through the finish callback, exactly once.

use comps_core::{Color, Event, Notifier, SubscriptionId, TimerQueue, WallClock};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::digit::DigitCell;
use super::format::{format_time, split_digits};
use super::{TimeAnimationKind, TimeMode};
use crate::view::{Background, View};
use crate::widget::{sanitize_frame_ms, FrameCarry, Widget, WidgetId};

/// Interval between ticks
pub const TICK_MS: u64 = 1000;

/// Called with `true` when a countdown runs out
pub type FinishCallback = Box<dyn FnMut(bool) + Send>;

/// Timer display configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Starting value: epoch seconds for `Now`, a duration otherwise
    pub start_epoch_seconds: i64,
    pub mode: TimeMode,
    pub animation: TimeAnimationKind,
    pub slide_duration_ms: u32,
    /// Drawn between the hour, minute and second pairs
    pub separator: String,
    pub text_color: Color,
    pub background: Color,
    pub background_padding: f32,
    pub corner_radius: f32,
    pub elevation: f32,
    /// Host-resolved icon drawn before the digits
    pub icon: Option<String>,
    /// Icon tint; the text color when unset
    pub icon_tint: Option<Color>,
    /// Offset from UTC applied in `Now` mode
    pub utc_offset_seconds: i32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            start_epoch_seconds: 0,
            mode: TimeMode::Now,
            animation: TimeAnimationKind::SlideTop,
            slide_duration_ms: 500,
            separator: " : ".to_string(),
            text_color: Color::BLACK,
            background: Color::WHITE,
            background_padding: 0.0,
            corner_radius: 16.0,
            elevation: 4.0,
            icon: None,
            icon_tint: None,
            utc_offset_seconds: 0,
        }
    }
}

impl TimerConfig {
    pub fn new(start_epoch_seconds: i64, mode: TimeMode) -> Self {
        Self {
            start_epoch_seconds,
            mode,
            ..Default::default()
        }
    }

    pub fn animation(mut self, animation: TimeAnimationKind) -> Self {
        self.animation = animation;
        self
    }

    pub fn slide_duration_ms(mut self, duration_ms: u32) -> Self {
        self.slide_duration_ms = duration_ms;
        self
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn icon(mut self, name: impl Into<String>) -> Self {
        self.icon = Some(name.into());
        self
    }

    pub fn utc_offset_seconds(mut self, offset: i32) -> Self {
        self.utc_offset_seconds = offset;
        self
    }
}

/// Observable timer state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerState {
    /// Displayed value, never below zero
    pub current_seconds: u64,
    /// `[h, h, m, m, s, s]`
    pub digits: [char; 6],
}

/// Payload of the per-second timer
#[derive(Clone, Copy, Debug)]
struct Tick;

/// Six animated digit cells fed by a once-per-second tick loop
pub struct TimerDisplay {
    id: WidgetId,
    config: TimerConfig,
    seconds: i64,
    state: TimerState,
    cells: [DigitCell; 6],
    timers: TimerQueue<Tick>,
    carry: FrameCarry,
    finish: Option<FinishCallback>,
    subscribers: Notifier<TimerState>,
    running: bool,
    mounted: bool,
}

impl TimerDisplay {
    /// Mount the display and start its tick loop.
    ///
    /// A negative start value ends the loop before it begins and reports
    /// completion immediately.
    pub fn mount(config: TimerConfig, finish: Option<FinishCallback>) -> Self {
        let id = WidgetId::next();
        let seconds = config.start_epoch_seconds;
        let digits = split_digits(&format_time(seconds, config.mode, config.utc_offset_seconds));
        let transition = config.animation.transition(config.slide_duration_ms);

        let mut timer = Self {
            id,
            seconds,
            state: TimerState {
                current_seconds: seconds.max(0) as u64,
                digits,
            },
            cells: digits.map(|digit| DigitCell::new(digit, transition)),
            timers: TimerQueue::new(),
            carry: FrameCarry::default(),
            finish,
            subscribers: Notifier::new(),
            running: true,
            mounted: true,
            config,
        };
        debug!(?id, mode = ?timer.config.mode, start = seconds, "timer display mounted");

        if seconds < 0 {
            timer.complete();
        } else {
            timer.timers.schedule(TICK_MS, Tick);
        }
        timer
    }

    /// Mount in the current mode starting from the host's wall clock
    pub fn mount_now(
        config: TimerConfig,
        clock: &impl WallClock,
        finish: Option<FinishCallback>,
    ) -> Self {
        Self::mount(
            TimerConfig {
                start_epoch_seconds: clock.now_epoch_seconds(),
                ..config
            },
            finish,
        )
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Digits as `HH:MM:SS`
    pub fn formatted(&self) -> String {
        format_time(self.seconds, self.config.mode, self.config.utc_offset_seconds)
    }

    /// True until the countdown finishes or the display is unmounted
    pub fn is_running(&self) -> bool {
        self.running && self.mounted
    }

    /// Register a callback for every published tick
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&TimerState) + Send + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    fn on_tick(&mut self) {
        self.seconds = match self.config.mode {
            TimeMode::Now | TimeMode::CountUp => self.seconds.saturating_add(1),
            TimeMode::CountDown => self.seconds - 1,
        };

        if self.seconds < 0 {
            self.complete();
            return;
        }

        self.timers.schedule(TICK_MS, Tick);
        self.publish();
    }

    fn publish(&mut self) {
        let digits = split_digits(&format_time(
            self.seconds,
            self.config.mode,
            self.config.utc_offset_seconds,
        ));
        for (cell, digit) in self.cells.iter_mut().zip(digits) {
            cell.set(digit);
        }
        self.state = TimerState {
            current_seconds: self.seconds.max(0) as u64,
            digits,
        };
        trace!(id = ?self.id, seconds = self.seconds, "timer tick");

        let state = self.state;
        self.subscribers.notify(&state);
    }

    fn complete(&mut self) {
        self.running = false;
        self.timers.clear();
        debug!(id = ?self.id, "timer finished");
        if let Some(mut finish) = self.finish.take() {
            finish(true);
        }
    }

    /// Stop the tick loop and drop every callback; nothing fires afterwards
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.timers.clear();
        self.subscribers.clear();
        self.finish = None;
        debug!(id = ?self.id, "timer display unmounted");
    }

    fn render_digits(&self, digits: &[View]) -> Vec<View> {
        let color = self.config.text_color;
        let mut children = Vec::with_capacity(8);
        for (index, pair) in digits.chunks(2).enumerate() {
            if index > 0 {
                children.push(View::text(self.config.separator.clone(), color));
            }
            children.extend(pair.iter().cloned());
        }
        children
    }
}

impl Widget for TimerDisplay {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn tick(&mut self, dt_ms: f32) {
        if !self.mounted {
            return;
        }
        let dt_ms = sanitize_frame_ms(dt_ms);

        // Cells first so a digit changed by this tick starts from zero
        for cell in &mut self.cells {
            cell.tick(dt_ms);
        }

        let target = self.timers.now_ms() + self.carry.whole_ms(dt_ms);
        while let Some((_, Tick)) = self.timers.pop_due(target) {
            self.on_tick();
        }
        self.timers.advance_to(target);
    }

    fn render(&self) -> View {
        let color = self.config.text_color;
        let cells: Vec<View> = self.cells.iter().map(|cell| cell.render(color)).collect();

        // Invisible widest-case text that fixes the display's size while
        // digits slide through their cells
        let sep = &self.config.separator;
        let measure = View::Row {
            children: vec![View::text(format!("00{sep}00{sep}00"), color)],
            spacing: 0.0,
            opacity: 0.0,
        };
        let digits = View::row(self.render_digits(&cells));

        let mut content = Vec::with_capacity(2);
        if let Some(name) = &self.config.icon {
            content.push(View::Icon {
                name: name.clone(),
                tint: self.config.icon_tint.unwrap_or(color),
            });
        }
        content.push(View::stack(vec![measure, digits]));

        let padding = self.config.background_padding;
        View::Surface {
            background: Background::solid(self.config.background),
            padding: (padding + 8.0, padding),
            corner_radius: self.config.corner_radius,
            elevation: self.config.elevation,
            child: Box::new(View::Row {
                children: content,
                spacing: 8.0,
                opacity: 1.0,
            }),
        }
    }

    fn handle_event(&mut self, event: &Event) {
        if event.is_teardown() {
            self.unmount();
        }
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }
}
