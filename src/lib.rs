//! Megaball - stage engine for a single-screen arcade ball game
//!
//! Core modules:
//! - `stage`: Deterministic stage core (tile geometry, slope collision,
//!   spawn sectors, lifecycle state machine)
//! - `audio`: Music track and sound effect identifiers
//! - `input`: Per-tick input snapshot
//! - `session`: Cross-stage session state (lives)
//! - `fx`: Fade/shake requests and the event queue drained by the shell
//!
//! Rendering, tilemap storage, audio playback and the fade scheduler live
//! outside this crate; the stage talks to them through the
//! [`stage::TileSource`] trait and [`fx::StageEvent`] values.

pub mod audio;
pub mod fx;
pub mod input;
pub mod session;
pub mod stage;

pub use input::InputSnapshot;
pub use session::SessionContext;
pub use stage::{Stage, StageState};

/// Playfield layout constants
pub mod consts {
    /// Tile edge length in pixels
    pub const TILE_SIZE: i32 = 8;

    /// Stage window size in tiles
    pub const WIDTH_TILES: i32 = 18;
    pub const HEIGHT_TILES: i32 = 15;

    /// Top-left pixel of the playing field (the HUD occupies the strip above)
    pub const FIELD_X: i32 = 8;
    pub const FIELD_Y: i32 = 16;

    /// Screen dimensions in pixels
    pub const SCREEN_WIDTH: i32 = 160;
    pub const SCREEN_HEIGHT: i32 = 144;

    /// Highest playable stage number; stage `MAX_STAGE_NUM + 1` is the
    /// game-complete scenery screen
    pub const MAX_STAGE_NUM: u32 = 15;

    /// Each stage occupies a 16-row band of the shared tilemap
    pub const STAGE_BAND_TILES: i32 = 16;

    /// Ticks the game-over screen stays up before quitting on its own
    pub const GAME_OVER_TICKS: u32 = 300;
    /// Ticks before the game-complete screen accepts a confirm press
    pub const GAME_COMPLETE_TICKS: u32 = 300;
}

/// Floor division of a pixel coordinate into a tile coordinate.
///
/// `f32::floor` keeps coordinates left of the origin in the correct tile
/// (integer division would round toward zero).
#[inline]
pub fn pixel_to_tile(px: f32) -> i32 {
    (px / consts::TILE_SIZE as f32).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_to_tile_negative() {
        assert_eq!(pixel_to_tile(0.0), 0);
        assert_eq!(pixel_to_tile(7.9), 0);
        assert_eq!(pixel_to_tile(8.0), 1);
        assert_eq!(pixel_to_tile(-0.1), -1);
        assert_eq!(pixel_to_tile(-8.0), -1);
    }
}
