//! Headless Widget Demo
//!
//! Drives a loading button and a countdown timer on tokio frame loops and
//! prints every state change to the terminal:
//! - The button is activated once and reports its countdown
//! - The timer counts down and reports completion, or stops after `--run-for`
//!   seconds when it counts up or shows the time of day
//!
//! Run with: cargo run -p comps_widgets --example headless_demo -- --seconds 5

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use comps_widgets::driver::{FrameLoop, DEFAULT_FRAME};
use comps_widgets::prelude::*;
use comps_widgets::CompsConfig;
use tokio::sync::oneshot;
use tracing_subscriber::EnvFilter;

/// Run the comps widgets without a window
#[derive(Parser, Debug)]
#[command(name = "headless-demo")]
#[command(version)]
struct Args {
    /// TOML config with `[button]` and `[timer]` tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Countdown length; overrides the config's timer start
    #[arg(short, long)]
    seconds: Option<i64>,

    /// Stop after this many seconds if the timer has not finished
    #[arg(long, default_value = "10")]
    run_for: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => CompsConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => CompsConfig {
            button: ButtonConfig::new("Submit").animation(AnimationKind::bounce()),
            timer: TimerConfig::new(5, TimeMode::CountDown),
        },
    };
    if let Some(seconds) = args.seconds {
        config.timer.start_epoch_seconds = seconds;
        config.timer.mode = TimeMode::CountDown;
    }

    let mut button = LoadingButton::new(config.button)
        .on_activate(|| tracing::info!("button activated"));
    button.subscribe(|state| {
        println!(
            "button  loading={:<5} remaining={}ms",
            state.is_loading, state.remaining_ms
        )
    });
    button.handle_event(&Event::Click);
    let button = Arc::new(Mutex::new(button));

    let (done_tx, done_rx) = oneshot::channel();
    let mut done_tx = Some(done_tx);
    let mut timer = TimerDisplay::mount(
        config.timer,
        Some(Box::new(move |finished| {
            if let Some(tx) = done_tx.take() {
                let _ = tx.send(finished);
            }
        })),
    );
    println!("timer   {}", timer.formatted());
    timer.subscribe(|state| {
        let [h1, h2, m1, m2, s1, s2] = state.digits;
        println!("timer   {h1}{h2}:{m1}{m2}:{s1}{s2}");
    });
    let timer = Arc::new(Mutex::new(timer));

    let _button_frames = FrameLoop::spawn(button.clone(), DEFAULT_FRAME);
    let timer_frames = FrameLoop::spawn(timer.clone(), DEFAULT_FRAME);

    // Count-up and wall-clock timers never finish on their own
    tokio::select! {
        finished = done_rx => {
            let finished = finished.context("timer dropped before finishing")?;
            println!("timer   finished={finished}");
        }
        _ = tokio::time::sleep(Duration::from_secs(args.run_for)) => {
            println!("timer   stopped after {}s", args.run_for);
        }
    }

    // Let the button finish its own countdown if the timer was shorter
    while button
        .lock()
        .map(|button| button.state().is_loading)
        .unwrap_or(false)
    {
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    drop(timer_frames);
    Ok(())
}
