//! Host-to-widget events
//!
//! Hosts translate their platform input and lifecycle callbacks into these
//! events and hand them to widgets; widgets never talk to the platform.

/// A UI event delivered to a single widget
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// A completed press (pointer down then up inside the widget)
    Click,
    /// The widget was removed from the host tree
    Unmount,
}

impl Event {
    /// Whether the event ends the widget's lifetime
    pub fn is_teardown(&self) -> bool {
        matches!(self, Event::Unmount)
    }
}
