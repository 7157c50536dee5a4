/// Minimal navigation event record for traceability.
///
/// Structured text for now; if the rendering boundary grows a replay or
/// analytics need this can become a stable, serializable event enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEvent {
    /// Navigation generation the event was emitted under.
    pub generation: u64,
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<NavEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, generation: u64, kind: &'static str, message: impl Into<String>) {
        self.events.push(NavEvent {
            generation,
            kind,
            message: message.into(),
        });
    }

    pub fn events(&self) -> &[NavEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<NavEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::EventLog;

    #[test]
    fn records_events_with_generation() {
        let mut log = EventLog::new();
        log.emit(3, "select", "baghdad");
        assert_eq!(log.events().len(), 1);
        assert_eq!(log.events()[0].generation, 3);
        assert_eq!(log.events()[0].kind, "select");
    }

    #[test]
    fn drain_clears_events() {
        let mut log = EventLog::new();
        log.emit(0, "back", "iraq");
        let drained = log.drain();
        assert_eq!(drained.len(), 1);
        assert!(log.events().is_empty());
    }
}
