use foundation::time::Time;
use gazetteer::Level;

/// Fixed zoom-in cross-fade window, in seconds.
///
/// The embedded map's load time is unobservable across origins, so "embed
/// ready" is approximated by this delay; a readiness signal, if one ever
/// becomes available, would still want this as the fallback.
pub const ZOOM_IN_DELAY_S: f64 = 1.5;

/// Which visual layer is authoritative.
///
/// `Idle`: terrain and embed reflect the current location directly.
/// `ZoomingIn`: terrain is fading out, the embed is not yet authorized.
/// `EmbedActive`: the embed is the source of truth, terrain fully hidden.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    ZoomingIn,
    EmbedActive,
}

/// Tunables for the terrain/embed cross-fade.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TransitionConfig {
    pub zoom_in_delay_s: f64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            zoom_in_delay_s: ZOOM_IN_DELAY_S,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct PendingZoom {
    deadline: Time,
}

/// Timed state machine coordinating the terrain layer against the embed
/// layer across navigation events.
///
/// At most one deadline is outstanding; replacing or taking the slot is the
/// cancellation mechanism, so a cancelled deadline can never fire.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TransitionController {
    config: TransitionConfig,
    phase: Phase,
    pending: Option<PendingZoom>,
}

impl TransitionController {
    pub fn new(config: TransitionConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            pending: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_zoom_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Observe a completed navigation between levels.
    ///
    /// Self-navigation never reaches this machine; the navigation state
    /// suppresses it upstream.
    pub fn on_navigate(&mut self, from: Level, to: Level, now: Time) {
        if from.is_country() && !to.is_country() {
            // Zoom-in: restart the fade window. A stale deadline is dropped
            // rather than stacked.
            self.phase = Phase::ZoomingIn;
            self.pending = Some(PendingZoom {
                deadline: now.after_secs(self.config.zoom_in_delay_s),
            });
        } else if to.is_country() {
            // Zoom-out is instantaneous, asymmetric with zoom-in.
            self.pending = None;
            self.phase = Phase::Idle;
        } else if self.pending.is_none() {
            // Lateral move: both endpoints already show an embed, no
            // re-fade. A lateral move arriving mid zoom-in leaves the
            // running window untouched.
            self.phase = Phase::EmbedActive;
        }
    }

    /// Advance the clock. Fires the pending deadline at most once.
    ///
    /// Returns `true` when the phase flipped to `EmbedActive`.
    pub fn tick(&mut self, now: Time) -> bool {
        match self.pending {
            Some(p) if now >= p.deadline => {
                self.pending = None;
                self.phase = Phase::EmbedActive;
                true
            }
            _ => false,
        }
    }
}

impl Default for TransitionController {
    fn default() -> Self {
        Self::new(TransitionConfig::default())
    }
}
