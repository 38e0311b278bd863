//! Slope-angle resolution at sub-tile precision
//!
//! Entities ask "what angle, if any, does this pixel collide at". The answer
//! comes straight from the slope catalog: edge slopes are solid across their
//! whole tile, diagonal tiles only in the triangular half nearer the slope
//! face, which the 8x8 corner mask encodes cell by cell.

use glam::IVec2;

use super::geometry::{TileLayer, TileSource};
use super::tiles::slope_for;
use crate::consts::*;
use crate::pixel_to_tile;

/// Resolves screen pixels against the slope tiles of one stage window
#[derive(Debug, Clone, Copy)]
pub struct CollisionResolver {
    layer: TileLayer,
    /// Window origin in absolute tile coordinates
    origin: IVec2,
}

impl CollisionResolver {
    pub fn new(layer: TileLayer, origin: IVec2) -> Self {
        Self { layer, origin }
    }

    /// Bounce angle in degrees at screen pixel (x, y), or `None` when the
    /// pixel is not on solid slope surface.
    ///
    /// Queries outside the stage window are a caller bug; release builds
    /// degrade to `None` so the caller simply skips the collision this tick.
    pub fn angle_at(&self, tiles: &impl TileSource, x: f32, y: f32) -> Option<u16> {
        let txc = pixel_to_tile(x - FIELD_X as f32);
        let tyc = pixel_to_tile(y - FIELD_Y as f32);

        if txc < 0 || txc >= WIDTH_TILES || tyc < 0 || tyc >= HEIGHT_TILES {
            debug_assert!(
                false,
                "collision query outside stage window: ({x}, {y}) -> tile ({txc}, {tyc})"
            );
            return None;
        }

        let tile = tiles.tile_at(self.layer, self.origin.x + txc, self.origin.y + tyc);
        let desc = slope_for(tile)?;

        match desc.mask {
            None => Some(desc.angle),
            Some(mask) => {
                // Pixel offset within its tile. The field inset is a multiple
                // of the tile size, so screen-space modulo lands on the same
                // cell as window-space.
                let tx = (x - (x / 8.0).floor() * 8.0).abs().floor() as u32;
                let ty = (y - (y / 8.0).floor() * 8.0).abs().floor() as u32;
                mask.solid(tx, ty).then_some(desc.angle)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::geometry::tests::GridSource;
    use crate::stage::tiles::{POCKET_TILE_NW, TileId};

    const SLOPE_TOP: TileId = TileId::at_cell(8, 4);
    const SLOPE_BOTTOM_RIGHT: TileId = TileId::at_cell(9, 6);

    fn resolver() -> CollisionResolver {
        CollisionResolver::new(0, IVec2::ZERO)
    }

    #[test]
    fn test_edge_slope_covers_whole_tile() {
        // Top-edge slope at window cell (4, 4): pixels (40..48, 48..56)
        let mut src = GridSource::empty();
        src.set(4, 4, SLOPE_TOP);
        let r = resolver();
        for py in 48..56 {
            for px in 40..48 {
                assert_eq!(r.angle_at(&src, px as f32, py as f32), Some(270));
            }
        }
    }

    #[test]
    fn test_background_tile_has_no_angle() {
        let src = GridSource::empty();
        assert_eq!(resolver().angle_at(&src, 44.0, 52.0), None);
    }

    #[test]
    fn test_corner_slope_matches_mask_exactly() {
        // Bottom-right slope (45 degrees, solid where tx + ty <= 7) at
        // window cell (4, 4)
        let mut src = GridSource::empty();
        src.set(4, 4, SLOPE_BOTTOM_RIGHT);
        let r = resolver();
        for ty in 0..8u32 {
            for tx in 0..8u32 {
                let px = 40.0 + tx as f32;
                let py = 48.0 + ty as f32;
                let expected = (tx + ty <= 7).then_some(45);
                assert_eq!(r.angle_at(&src, px, py), expected, "sub-cell ({tx}, {ty})");
            }
        }
    }

    #[test]
    fn test_pocket_corner_uses_its_mask() {
        // NW pocket corner (45 degrees, solid where tx + ty >= 7)
        let mut src = GridSource::empty();
        src.set(6, 6, POCKET_TILE_NW);
        let r = resolver();
        // Open half of the pocket mouth
        assert_eq!(r.angle_at(&src, 56.0, 64.0), None);
        // Solid half
        assert_eq!(r.angle_at(&src, 63.0, 71.0), Some(45));
    }

    #[test]
    fn test_window_origin_offset() {
        // Same screen pixel resolves through a shifted tilemap band
        let mut src = GridSource::empty();
        src.set(4, 52, SLOPE_TOP);
        let r = CollisionResolver::new(0, IVec2::new(0, 48));
        assert_eq!(r.angle_at(&src, 44.0, 52.0), Some(270));
    }

    #[test]
    fn test_fractional_pixels_hit_same_cell() {
        let mut src = GridSource::empty();
        src.set(4, 4, SLOPE_BOTTOM_RIGHT);
        let r = resolver();
        assert_eq!(r.angle_at(&src, 40.9, 48.9), Some(45));
        assert_eq!(r.angle_at(&src, 47.9, 55.9), None);
    }
}
