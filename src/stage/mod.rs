//! Deterministic stage core
//!
//! All playfield logic lives here. This module must stay pure and
//! deterministic:
//! - Geometry is derived once at construction and never mutated afterwards
//!   (lights excepted)
//! - Seeded RNG only
//! - No rendering, audio or platform calls; side effects leave as
//!   [`crate::fx::StageEvent`] values

pub mod collision;
pub mod data;
pub mod geometry;
pub mod spawn;
pub mod state;
pub mod tiles;

pub use collision::CollisionResolver;
pub use data::{Difficulty, StageTable};
pub use geometry::{Light, Rect, SpawnSector, StageGeometry, TileLayer, TileSource};
pub use spawn::SpawnAllocator;
pub use state::{PauseMenu, Stage, StageState};
pub use tiles::{Corner, CornerMask, SlopeDescriptor, TileId, slope_for};
