use gazetteer::Level;

/// Top-level UI mode shown by the navbar and the panel toggle row.
///
/// `Projects` exists in the UI contract but is never derived from a
/// navigation transition; the toggle row renders it locked. Kept until
/// product decides whether it becomes a manual mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ViewMode {
    National,
    Province,
    Projects,
}

impl ViewMode {
    /// Mode derived from the active location's level.
    pub fn for_level(level: Level) -> ViewMode {
        if level.is_country() {
            ViewMode::National
        } else {
            ViewMode::Province
        }
    }
}

/// The active location id plus a back-navigable history stack.
///
/// Purely structural: level lookups and derived view state live in
/// [`view`](crate::view). Both operations are total; unknown ids are the
/// caller's problem (the command surface validates before calling in).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    active_id: String,
    history: Vec<String>,
}

impl NavigationState {
    pub fn new(root_id: impl Into<String>) -> Self {
        Self {
            active_id: root_id.into(),
            history: Vec::new(),
        }
    }

    pub fn active_id(&self) -> &str {
        &self.active_id
    }

    /// Most-recent-last stack of previously active ids.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// The id `back()` would land on, if any.
    pub fn back_id(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    /// Navigate forward. Self-navigation is suppressed: it pushes no
    /// duplicate history entry and reports no change.
    ///
    /// Returns `true` when the active id changed.
    pub fn select(&mut self, target_id: &str) -> bool {
        if target_id == self.active_id {
            return false;
        }
        let prev = std::mem::replace(&mut self.active_id, target_id.to_string());
        self.history.push(prev);
        true
    }

    /// Pop the history stack. A no-op on an empty stack; the id being
    /// navigated away from is not re-pushed.
    ///
    /// Returns `true` when the active id changed.
    pub fn back(&mut self) -> bool {
        let Some(prev) = self.history.pop() else {
            return false;
        };
        self.active_id = prev;
        true
    }
}
