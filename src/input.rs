//! Per-tick input snapshot
//!
//! The platform layer decodes raw events into the buttons that went down this
//! tick; the stage treats the snapshot as read-only. Held buttons are not
//! reported - the stage core only reacts to fresh presses.

/// Buttons newly pressed during one tick
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    /// Start / pause button
    pub start: bool,
    /// Confirm / action button
    pub confirm: bool,
    pub up: bool,
    pub down: bool,
}

impl InputSnapshot {
    /// Snapshot with no presses (demo stages, tests)
    pub const IDLE: Self = Self {
        start: false,
        confirm: false,
        up: false,
        down: false,
    };
}
