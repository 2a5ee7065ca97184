use std::{
    collections::HashSet,
    fmt::{Display, Formatter},
};

use crate::prelude::*;

/// Calculator interaction events.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Event {
    CalculatorStarted,
    CalculatorChanged,
    ModeChanged,
}

impl Display for Event {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CalculatorStarted => write!(f, "calculator_started"),
            Self::CalculatorChanged => write!(f, "calculator_changed"),
            Self::ModeChanged => write!(f, "mode_changed"),
        }
    }
}

/// Session-scoped event sink. Events go to the log;
/// analytics integrations would hook in here.
#[derive(Default)]
pub struct Tracker {
    fired: HashSet<Event>,
}

impl Tracker {
    pub fn has_fired(&self, event: Event) -> bool {
        self.fired.contains(&event)
    }

    pub fn mark_fired(&mut self, event: Event) {
        self.fired.insert(event);
    }

    pub fn track(&self, event: Event) {
        info!(%event, "tracked");
    }

    /// Track the event at most once per session.
    pub fn track_once(&mut self, event: Event) {
        if self.has_fired(event) {
            return;
        }
        self.mark_fired(event);
        self.track(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_fired() {
        let mut tracker = Tracker::default();
        assert!(!tracker.has_fired(Event::CalculatorStarted));

        tracker.mark_fired(Event::CalculatorStarted);

        assert!(tracker.has_fired(Event::CalculatorStarted));
        assert!(!tracker.has_fired(Event::CalculatorChanged));
    }

    #[test]
    fn test_track_once_deduplicates() {
        let mut tracker = Tracker::default();
        tracker.track_once(Event::ModeChanged);
        tracker.track_once(Event::ModeChanged);

        assert!(tracker.has_fired(Event::ModeChanged));
    }
}
