//! Music track and sound effect identifiers
//!
//! The stage only selects cues; playback happens in the shell, which drains
//! [`crate::fx::StageEvent`] values and forwards them to the audio backend.

/// Music tracks the stage can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    /// Stage intro jingle
    Start,
    /// In-game loop
    InGame,
    /// Death sting
    Death,
    /// Stage cleared fanfare
    StageComplete,
    /// Game over sting
    GameOver,
}

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player fired their weapon
    WeaponUsed,
    /// Ball bounced off a solid rect
    WallHit,
}
