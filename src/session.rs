//! Cross-stage session state
//!
//! Lives persist across stage instances, so they live here rather than on
//! [`crate::Stage`]. The game shell owns one `SessionContext` for the whole
//! run and lends it to the stage methods that need it.

/// Default lives at the start of a run
pub const DEFAULT_LIVES: u32 = 3;

/// Run-wide progress counters
#[derive(Debug, Clone)]
pub struct SessionContext {
    lives: u32,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(DEFAULT_LIVES)
    }
}

impl SessionContext {
    pub fn new(lives: u32) -> Self {
        Self { lives }
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Remove one life; saturates at zero
    pub fn decrement_lives(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        log::debug!("Lives remaining: {}", self.lives);
    }

    pub fn add_lives(&mut self, n: u32) {
        self.lives += n;
    }
}
