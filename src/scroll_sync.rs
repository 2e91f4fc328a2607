/*!
 * Scroll synchronization between the original and translated lyrics panels.
 *
 * The two panels generally hold texts of different lengths, so they are kept
 * aligned by relative scroll position rather than pixel offset. Setting the
 * other panel's position fires a scroll event on it; the controller swallows
 * that mirrored event until the next animation frame releases the guard.
 */

/// Scroll geometry of one panel
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_top: f64, scroll_height: f64, client_height: f64) -> Self {
        Self { scroll_top, scroll_height, client_height }
    }

    /// Maximum scroll offset; zero or less means the content fits
    pub fn scroll_range(&self) -> f64 {
        self.scroll_height - self.client_height
    }

    /// Relative position in `[0, 1]`, 0 when the panel cannot scroll
    pub fn percentage(&self) -> f64 {
        let range = self.scroll_range();
        if range <= 0.0 {
            return 0.0;
        }
        (self.scroll_top / range).clamp(0.0, 1.0)
    }

    /// Offset matching `percentage` in this panel
    pub fn offset_for(&self, percentage: f64) -> f64 {
        percentage * self.scroll_range().max(0.0)
    }
}

/// Which of the two panels an event came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Original,
    Translated,
}

impl Panel {
    pub fn other(self) -> Self {
        match self {
            Panel::Original => Panel::Translated,
            Panel::Translated => Panel::Original,
        }
    }
}

/// Keeps two panels in lockstep; owns its re-entrancy guard
#[derive(Debug, Default)]
pub struct ScrollSync {
    syncing: bool,
}

impl ScrollSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether mirrored events are currently being suppressed
    pub fn is_syncing(&self) -> bool {
        self.syncing
    }

    /// Handle a scroll event on `source` and return the new top for `target`
    ///
    /// Returns `None` when the event is the echo of our own assignment.
    pub fn on_scroll(&mut self, source: &ScrollMetrics, target: &ScrollMetrics) -> Option<f64> {
        if self.syncing {
            return None;
        }

        self.syncing = true;
        Some(target.offset_for(source.percentage()))
    }

    /// Like `on_scroll`, applying the new position to `target` in place
    pub fn sync(&mut self, source: &ScrollMetrics, target: &mut ScrollMetrics) -> bool {
        match self.on_scroll(source, target) {
            Some(top) => {
                target.scroll_top = top;
                true
            }
            None => false,
        }
    }

    /// Release the guard; call once per animation frame
    pub fn on_animation_frame(&mut self) {
        self.syncing = false;
    }
}
