//! Fade and shake requests, and the event queue the stage emits
//!
//! The fade scheduler outside this crate runs one fade at a time and reports
//! completion. Instead of handing it a closure, the stage attaches a
//! [`FadeDone`] token to every request; on completion the shell either acts
//! on the token itself (stage replacement, quit) or hands it back to
//! [`crate::Stage::fade_done`]. Multi-step sequences such as the next-stage
//! flash are therefore an explicit step counter on the stage, not a chain of
//! callbacks.

use crate::audio::{MusicTrack, SoundEffect};

/// Palette darkness level targeted by a fade. 0 is the normal palette,
/// 6 is fully dark.
pub type FadeLevel = u8;

pub const FADE_LEVEL_NORMAL: FadeLevel = 0;
pub const FADE_LEVEL_HALF: FadeLevel = 3;
pub const FADE_LEVEL_DARK: FadeLevel = 6;

/// Ticks per fade step at the default rate
pub const FADE_STEP_TICKS_DEFAULT: u32 = 5;
/// Ticks per fade step for the slower stage-complete flashes
pub const FADE_STEP_TICKS_SLOW: u32 = 10;

/// What should happen once a fade finishes.
///
/// `NextStageFlash` is routed back into the originating stage; the rest are
/// resolved by the shell (the stage object may no longer exist by then).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDone {
    /// Rebuild the current stage after a death
    RestartStage,
    /// Advance the stage-complete flash sequence by one step
    NextStageFlash,
    /// Replace the stage with the next one
    NextStage,
    /// Replace the stage with the game-complete scenery screen
    GameComplete,
    /// Tear down the stage and return to the main menu
    QuitToMenu,
    /// Rotate to the next palette (pause menu option)
    CyclePalette,
}

/// Side effects emitted by the stage, drained once per tick by the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageEvent {
    PlayMusic {
        track: MusicTrack,
        restart: bool,
    },
    PlaySound(SoundEffect),
    /// Submit a fade to the scheduler
    Fade {
        step_ticks: u32,
        level: FadeLevel,
        then: FadeDone,
    },
    /// Request a screen shake; `queue: false` replaces any pending shake
    Shake {
        duration: u32,
        magnitude: i32,
        queue: bool,
    },
}
