use foundation::time::Time;
use gazetteer::{Gazetteer, Level, Location, MapCoords};

use crate::event_log::{EventLog, NavEvent};
use crate::focus::FocusModal;
use crate::navigation::{NavigationState, ViewMode};
use crate::transition::{Phase, TransitionConfig, TransitionController};
use crate::view;

/// One navigation surface: the dataset plus the navigation, transition and
/// focus state it drives.
///
/// Explicitly constructed and owned by whatever owns the rendering
/// boundary; multiple independent instances coexist fine. All commands are
/// synchronous; the only asynchronous element is the transition deadline,
/// which the owner advances through [`NavContext::tick`].
#[derive(Debug)]
pub struct NavContext {
    tree: Gazetteer,
    nav: NavigationState,
    transitions: TransitionController,
    focus: FocusModal,
    log: EventLog,
    // Bumped once per navigation that changes the active id.
    generation: u64,
}

impl NavContext {
    pub fn new(tree: Gazetteer, config: TransitionConfig) -> Self {
        let nav = NavigationState::new(tree.root_id());
        Self {
            tree,
            nav,
            transitions: TransitionController::new(config),
            focus: FocusModal::new(),
            log: EventLog::new(),
            generation: 0,
        }
    }

    pub fn tree(&self) -> &Gazetteer {
        &self.tree
    }

    fn active(&self) -> &Location {
        self.tree
            .get(self.nav.active_id())
            .expect("active id is validated on every navigation")
    }

    /// Navigate to `id` (a panel-row selection: navigation only).
    ///
    /// Unknown ids are refused: the active id must never point at a
    /// non-existent node. Selecting the already-active id is suppressed
    /// upstream of the transition machine.
    ///
    /// Returns `true` when the active id changed.
    pub fn select(&mut self, id: &str, now: Time) -> bool {
        let Some(to_level) = self.tree.get(id).map(|l| l.level) else {
            self.log
                .emit(self.generation, "select", format!("refused unknown id {id:?}"));
            return false;
        };
        let from_level = self.active().level;
        if !self.nav.select(id) {
            return false;
        }
        self.generation += 1;
        self.transitions.on_navigate(from_level, to_level, now);
        self.log.emit(self.generation, "select", id.to_string());
        true
    }

    /// Select via a map pin. Navigation and modal-open are independent
    /// effects of the same click: a region pin that owns display assets
    /// opens the focus modal even when the navigation itself is a
    /// suppressed self-selection.
    pub fn select_pin(&mut self, id: &str, now: Time) -> bool {
        if let Some(target) = self.tree.get(id)
            && view::opens_focus(target)
        {
            self.focus.open(target);
            self.log.emit(self.generation, "focus", format!("open {id:?}"));
        }
        self.select(id, now)
    }

    /// Pop the history stack. A no-op on an empty stack.
    ///
    /// Returns `true` when the active id changed.
    pub fn back(&mut self, now: Time) -> bool {
        let from_level = self.active().level;
        if !self.nav.back() {
            return false;
        }
        self.generation += 1;
        let to_level = self.active().level;
        self.transitions.on_navigate(from_level, to_level, now);
        self.log
            .emit(self.generation, "back", self.nav.active_id().to_string());
        true
    }

    /// Advance the transition clock. Call with a monotonically
    /// non-decreasing `now`; fires the pending cross-fade deadline at most
    /// once.
    pub fn tick(&mut self, now: Time) {
        if self.transitions.tick(now) {
            self.log.emit(self.generation, "transition", "embed active");
        }
    }

    pub fn close_focus(&mut self) {
        if self.focus.is_open() {
            self.focus.close();
            self.log.emit(self.generation, "focus", "close");
        }
    }

    pub fn next_asset(&mut self) {
        self.focus.next_asset();
    }

    pub fn prev_asset(&mut self) {
        self.focus.prev_asset();
    }

    // --- read-only surface for the rendering boundary ---

    pub fn active_id(&self) -> &str {
        self.nav.active_id()
    }

    pub fn active_location(&self) -> &Location {
        self.active()
    }

    pub fn history(&self) -> &[String] {
        self.nav.history()
    }

    pub fn view_mode(&self) -> ViewMode {
        view::view_mode(&self.tree, &self.nav)
    }

    pub fn phase(&self) -> Phase {
        self.transitions.phase()
    }

    pub fn visible_pins(&self) -> Vec<view::Pin<'_>> {
        view::visible_pins(&self.tree, &self.nav, self.transitions.phase())
    }

    pub fn panel_items(&self) -> Vec<&Location> {
        view::panel_items(&self.tree, &self.nav)
    }

    pub fn nearest_embed(&self) -> Option<&str> {
        view::nearest_embed(&self.tree, &self.nav)
    }

    pub fn back_label(&self) -> Option<&str> {
        view::back_label(&self.tree, &self.nav)
    }

    pub fn camera(&self) -> MapCoords {
        view::camera(&self.tree, &self.nav)
    }

    pub fn focus(&self) -> &FocusModal {
        &self.focus
    }

    pub fn events(&self) -> &[NavEvent] {
        self.log.events()
    }

    pub fn drain_events(&mut self) -> Vec<NavEvent> {
        self.log.drain()
    }

    /// Level of the active location, for rendering-side layer choices.
    pub fn active_level(&self) -> Level {
        self.active().level
    }
}
