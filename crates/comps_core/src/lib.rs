//! Comps Core Runtime
//!
//! Presentation-independent primitives shared by the comps widgets:
//!
//! - **State Machines**: enum-typed flat state machines for widget lifecycles
//! - **Notifiers**: observer lists that replace implicit re-render passes
//! - **Timers**: one-shot timers on a virtual clock, advanced by frame ticks
//! - **Events**: the few host events a widget reacts to
//!
//! # Example
//!
//! ```rust
//! use comps_core::fsm::StateMachine;
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum Phase { Idle, Busy }
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum Input { Go }
//!
//! let mut fsm = StateMachine::builder(Phase::Idle)
//!     .on(Phase::Idle, Input::Go, Phase::Busy)
//!     .build();
//!
//! assert_eq!(fsm.send(Input::Go), Some(Phase::Busy));
//! assert_eq!(fsm.send(Input::Go), None);
//! ```

pub mod clock;
pub mod color;
pub mod events;
pub mod fsm;
pub mod notify;
pub mod timer;

pub use clock::{FixedClock, SystemClock, WallClock};
pub use color::{Color, ColorParseError};
pub use events::Event;
pub use fsm::{StateMachine, StateMachineBuilder};
pub use notify::{Notifier, SubscriptionId};
pub use timer::{TimerId, TimerQueue};
