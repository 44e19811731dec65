//! Async frame driver
//!
//! Hosts without their own frame clock can hand a widget to a [`FrameLoop`],
//! which ticks it on a tokio interval with the measured time since the last
//! frame. The loop ends once the widget is unmounted, and dropping the handle
//! aborts it, so no timer outlives its owner.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::widget::Widget;

/// Default frame interval (60 Hz)
pub const DEFAULT_FRAME: Duration = Duration::from_micros(16_667);

/// Handle to a running frame loop
pub struct FrameLoop {
    handle: JoinHandle<()>,
}

impl FrameLoop {
    /// Tick `widget` every `frame` until it is unmounted.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<W>(widget: Arc<Mutex<W>>, frame: Duration) -> Self
    where
        W: Widget + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = interval(frame);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            ticker.tick().await;
            let mut last = Instant::now();

            loop {
                ticker.tick().await;
                let now = Instant::now();
                let dt_ms = now.duration_since(last).as_secs_f32() * 1000.0;
                last = now;

                let Ok(mut guard) = widget.lock() else {
                    warn!("widget lock poisoned, stopping frame loop");
                    break;
                };
                if !guard.is_mounted() {
                    debug!(id = ?guard.id(), "widget unmounted, stopping frame loop");
                    break;
                }
                guard.tick(dt_ms);
            }
        });

        Self { handle }
    }

    /// True once the loop has stopped on its own or been aborted
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop ticking
    pub fn abort(&self) {
        self.handle.abort();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::button::{ButtonConfig, LoadingButton};
    use crate::timer::{TimeMode, TimerConfig, TimerDisplay};

    #[tokio::test(start_paused = true)]
    async fn test_drives_button_countdown() {
        let button = Arc::new(Mutex::new(LoadingButton::new(ButtonConfig::new("Go"))));
        assert!(button.lock().unwrap().activate());

        let _frames = FrameLoop::spawn(button.clone(), DEFAULT_FRAME);
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(button.lock().unwrap().state().remaining_ms, 2000);

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert!(!button.lock().unwrap().state().is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_after_unmount() {
        let timer = Arc::new(Mutex::new(TimerDisplay::mount(
            TimerConfig::new(0, TimeMode::CountUp),
            None,
        )));
        let frames = FrameLoop::spawn(timer.clone(), DEFAULT_FRAME);

        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(timer.lock().unwrap().state().current_seconds, 2);

        timer.lock().unwrap().unmount();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(frames.is_finished());
        assert_eq!(timer.lock().unwrap().state().current_seconds, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_loop() {
        let timer = Arc::new(Mutex::new(TimerDisplay::mount(
            TimerConfig::new(0, TimeMode::CountUp),
            None,
        )));
        let frames = FrameLoop::spawn(timer.clone(), DEFAULT_FRAME);
        tokio::time::sleep(Duration::from_millis(1100)).await;
        drop(frames);

        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert_eq!(timer.lock().unwrap().state().current_seconds, 1);
    }
}
