//! Static stage geometry, extracted once from the tile window
//!
//! A stage is an 18x15 tile window into a larger shared tilemap. At
//! construction the window is scanned a single time and turned into
//! screen-space collision data: border walls and post rects, slope tile
//! positions, corner-pocket zones, light targets and the four enemy spawn
//! sectors. Everything here is read-only afterwards except [`Light::is_hit`].

use glam::IVec2;

use super::tiles::{
    self, LIGHT_TILE, POCKET_TILE_NE, POCKET_TILE_NW, POCKET_TILE_SE, POCKET_TILE_SW, POST_TILE,
    TileId,
};
use crate::consts::*;

/// Tilemap layer index within the shared tile bank
pub type TileLayer = u8;

/// Read-only tile lookup, addressed in absolute tile coordinates.
/// Implemented by the asset layer outside this crate.
pub trait TileSource {
    fn tile_at(&self, layer: TileLayer, x: i32, y: i32) -> TileId;
}

/// Axis-aligned rectangle in screen-pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Whether a pixel point lies inside the rect
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x as f32
            && px < (self.x + self.w) as f32
            && py >= self.y as f32
            && py < (self.y + self.h) as f32
    }
}

/// A stage-completion target. Struck by the ball (externally); the stage is
/// complete once every light is hit.
#[derive(Debug, Clone)]
pub struct Light {
    pub pos: IVec2,
    pub is_hit: bool,
}

impl Light {
    fn new(pos: IVec2) -> Self {
        Self { pos, is_hit: false }
    }
}

/// Screen quadrant an enemy may spawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnSector {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    /// Pick one of the four sectors first, then a location within it
    Any,
}

/// Everything derived from one scan of the tile window
#[derive(Debug, Clone, Default)]
pub struct StageGeometry {
    /// Border walls plus one rect per post tile
    pub solid_rects: Vec<Rect>,
    /// Pixel positions of slope tiles; angles resolve on demand via the
    /// catalog (cheap lookup, and the diagonal tiles need the sub-pixel test
    /// anyway)
    pub slopes: Vec<IVec2>,
    /// 16x16 corner-pocket zones
    pub pockets: Vec<Rect>,
    pub lights: Vec<Light>,
    /// Spawn candidates per quadrant: top-left, top-right, bottom-left,
    /// bottom-right
    pub spawn_locs: [Vec<IVec2>; 4],
}

/// Screen-pixel origin of the tile at window cell (xc, yc)
#[inline]
fn cell_origin(xc: i32, yc: i32) -> IVec2 {
    IVec2::new(xc * TILE_SIZE + FIELD_X, yc * TILE_SIZE + FIELD_Y)
}

/// Spawn-band test: interior tiles in the four corner regions of the window.
/// The central band is excluded in both axes so enemies never appear on top
/// of the player start.
fn in_spawn_band(xc: i32, yc: i32) -> bool {
    xc > 0
        && xc < WIDTH_TILES - 1
        && yc > 0
        && yc < HEIGHT_TILES - 1
        && (xc < 5 || xc > WIDTH_TILES - 6)
        && (yc < 5 || yc > HEIGHT_TILES - 6)
}

/// Quadrant list index for a qualifying window cell
fn sector_index(xc: i32, yc: i32) -> usize {
    match (xc < 9, yc < 7) {
        (true, true) => 0,
        (false, true) => 1,
        (true, false) => 2,
        (false, false) => 3,
    }
}

impl StageGeometry {
    /// Border walls only. The game-complete scenery stage skips extraction
    /// and keeps just these.
    pub fn walls_only() -> Self {
        Self {
            solid_rects: vec![
                Rect::new(0, 0, SCREEN_WIDTH, FIELD_Y),
                Rect::new(0, FIELD_Y, FIELD_X, SCREEN_HEIGHT - FIELD_Y),
                Rect::new(SCREEN_WIDTH - FIELD_X, FIELD_Y, FIELD_X, SCREEN_HEIGHT - FIELD_Y),
                Rect::new(0, SCREEN_HEIGHT - TILE_SIZE, SCREEN_WIDTH, TILE_SIZE),
            ],
            ..Self::default()
        }
    }

    /// Scan the 18x15 window at tile origin (u, v) on `layer` and build the
    /// stage's collision data.
    pub fn extract(tiles_src: &impl TileSource, layer: TileLayer, origin: IVec2) -> Self {
        let mut geo = Self::walls_only();

        for yc in 0..HEIGHT_TILES {
            let y = origin.y + yc;
            for xc in 0..WIDTH_TILES {
                let x = origin.x + xc;
                let tile = tiles_src.tile_at(layer, x, y);
                let px = cell_origin(xc, yc);

                if tile == POST_TILE {
                    geo.solid_rects.push(Rect::new(px.x, px.y, TILE_SIZE, TILE_SIZE));
                } else if tiles::is_slope(tile) {
                    geo.slopes.push(px);
                } else if tile == LIGHT_TILE {
                    geo.lights.push(Light::new(px));
                }

                // Pocket quartet, anchored at its north-west corner
                if tile == POCKET_TILE_NW
                    && xc < WIDTH_TILES - 1
                    && yc < HEIGHT_TILES - 1
                    && tiles_src.tile_at(layer, x + 1, y) == POCKET_TILE_NE
                    && tiles_src.tile_at(layer, x + 1, y + 1) == POCKET_TILE_SE
                    && tiles_src.tile_at(layer, x, y + 1) == POCKET_TILE_SW
                {
                    geo.pockets.push(Rect::new(px.x, px.y, TILE_SIZE * 2, TILE_SIZE * 2));
                }

                if tile != POST_TILE && in_spawn_band(xc, yc) {
                    let center = px + IVec2::splat(TILE_SIZE / 2);
                    geo.spawn_locs[sector_index(xc, yc)].push(center);
                }
            }
        }

        log::debug!(
            "Stage geometry: {} solids, {} slopes, {} pockets, {} lights",
            geo.solid_rects.len(),
            geo.slopes.len(),
            geo.pockets.len(),
            geo.lights.len()
        );

        geo
    }

    /// Spawn candidates for a concrete (non-`Any`) sector
    pub fn sector_locs(&self, sector: SpawnSector) -> &[IVec2] {
        match sector {
            SpawnSector::TopLeft => &self.spawn_locs[0],
            SpawnSector::TopRight => &self.spawn_locs[1],
            SpawnSector::BottomLeft => &self.spawn_locs[2],
            SpawnSector::BottomRight => &self.spawn_locs[3],
            SpawnSector::Any => &[],
        }
    }

    /// True once every light has been struck. Pure query; the stage state
    /// machine layers the completion side effects on top.
    pub fn all_lights_hit(&self) -> bool {
        self.lights.iter().all(|l| l.is_hit)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::stage::tiles::BLANK_TILE;
    use proptest::prelude::*;
    use std::collections::HashMap;

    /// Grid-backed tile source for tests; unset cells read as blank
    pub(crate) struct GridSource {
        pub tiles: HashMap<(i32, i32), TileId>,
    }

    impl GridSource {
        pub fn empty() -> Self {
            Self {
                tiles: HashMap::new(),
            }
        }

        pub fn set(&mut self, x: i32, y: i32, tile: TileId) {
            self.tiles.insert((x, y), tile);
        }
    }

    impl TileSource for GridSource {
        fn tile_at(&self, _layer: TileLayer, x: i32, y: i32) -> TileId {
            self.tiles.get(&(x, y)).copied().unwrap_or(BLANK_TILE)
        }
    }

    #[test]
    fn test_border_walls_always_present() {
        let geo = StageGeometry::extract(&GridSource::empty(), 0, IVec2::ZERO);
        assert_eq!(geo.solid_rects[0], Rect::new(0, 0, 160, 16));
        assert_eq!(geo.solid_rects[1], Rect::new(0, 16, 8, 128));
        assert_eq!(geo.solid_rects[2], Rect::new(152, 16, 8, 128));
        assert_eq!(geo.solid_rects[3], Rect::new(0, 136, 160, 8));
    }

    #[test]
    fn test_post_rect_position() {
        // Post at window cell (3, 2) -> rect at {3*8+8, 2*8+16, 8, 8}
        let mut src = GridSource::empty();
        src.set(3, 2, POST_TILE);
        let geo = StageGeometry::extract(&src, 0, IVec2::ZERO);
        assert_eq!(geo.solid_rects.len(), 5);
        assert_eq!(geo.solid_rects[4], Rect::new(32, 32, 8, 8));
    }

    #[test]
    fn test_post_respects_window_origin() {
        // Same window cell, different tilemap origin: same screen rect
        let mut src = GridSource::empty();
        src.set(3, 50, POST_TILE);
        let geo = StageGeometry::extract(&src, 0, IVec2::new(0, 48));
        assert_eq!(geo.solid_rects[4], Rect::new(32, 32, 8, 8));
    }

    #[test]
    fn test_light_extraction() {
        let mut src = GridSource::empty();
        src.set(10, 7, LIGHT_TILE);
        src.set(2, 2, LIGHT_TILE);
        let geo = StageGeometry::extract(&src, 0, IVec2::ZERO);
        assert_eq!(geo.lights.len(), 2);
        assert!(geo.lights.iter().all(|l| !l.is_hit));
        assert!(geo.lights.iter().any(|l| l.pos == IVec2::new(88, 72)));
    }

    #[test]
    fn test_pocket_requires_full_quartet() {
        let mut src = GridSource::empty();
        src.set(6, 6, POCKET_TILE_NW);
        src.set(7, 6, POCKET_TILE_NE);
        src.set(7, 7, POCKET_TILE_SE);
        let geo = StageGeometry::extract(&src, 0, IVec2::ZERO);
        assert!(geo.pockets.is_empty());

        src.set(6, 7, POCKET_TILE_SW);
        let geo = StageGeometry::extract(&src, 0, IVec2::ZERO);
        assert_eq!(geo.pockets, vec![Rect::new(56, 64, 16, 16)]);
    }

    #[test]
    fn test_pocket_corner_tiles_count_as_slopes() {
        let mut src = GridSource::empty();
        src.set(6, 6, POCKET_TILE_NW);
        src.set(7, 6, POCKET_TILE_NE);
        src.set(7, 7, POCKET_TILE_SE);
        src.set(6, 7, POCKET_TILE_SW);
        let geo = StageGeometry::extract(&src, 0, IVec2::ZERO);
        assert_eq!(geo.slopes.len(), 4);
    }

    #[test]
    fn test_pocket_nw_at_window_edge_ignored() {
        // NW corner in the last column: the NE tile would fall outside the
        // window, so no pocket forms
        let mut src = GridSource::empty();
        src.set(17, 6, POCKET_TILE_NW);
        src.set(18, 6, POCKET_TILE_NE);
        src.set(18, 7, POCKET_TILE_SE);
        src.set(17, 7, POCKET_TILE_SW);
        let geo = StageGeometry::extract(&src, 0, IVec2::ZERO);
        assert!(geo.pockets.is_empty());
    }

    #[test]
    fn test_spawn_lists_exclude_posts_and_center() {
        let mut src = GridSource::empty();
        src.set(2, 2, POST_TILE);
        let geo = StageGeometry::extract(&src, 0, IVec2::ZERO);

        let all: Vec<_> = geo.spawn_locs.iter().flatten().collect();
        // Post cell contributes nothing
        assert!(!all.contains(&&IVec2::new(28, 36)));
        // Center-band cell (8, 7) contributes nothing
        assert!(!all.contains(&&IVec2::new(76, 76)));
        // Corner-band cell (2, 3) lands in the top-left list
        assert!(geo.spawn_locs[0].contains(&IVec2::new(28, 44)));
    }

    #[test]
    fn test_spawn_sector_counts_on_empty_window() {
        // Empty window: each corner region is 4x4 interior band tiles
        let geo = StageGeometry::extract(&GridSource::empty(), 0, IVec2::ZERO);
        for list in &geo.spawn_locs {
            assert_eq!(list.len(), 16);
        }
    }

    proptest! {
        /// Every interior, non-post, corner-band cell lands in exactly one
        /// sector list; everything else in none.
        #[test]
        fn prop_spawn_lists_partition_band(xc in 0i32..WIDTH_TILES, yc in 0i32..HEIGHT_TILES) {
            let geo = StageGeometry::extract(&GridSource::empty(), 0, IVec2::ZERO);
            let center = cell_origin(xc, yc) + IVec2::splat(TILE_SIZE / 2);
            let hits = geo
                .spawn_locs
                .iter()
                .filter(|list| list.contains(&center))
                .count();
            prop_assert_eq!(hits, usize::from(in_spawn_band(xc, yc)));
        }
    }
}
