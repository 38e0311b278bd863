//! Tile geometry catalog
//!
//! Every stage is authored from one shared tileset, so which tiles are solid,
//! sloped or special is fixed at compile time. This module maps tile
//! identifiers to their collision behavior: posts become solid rects, twelve
//! slope tiles carry a 45-degree-step bounce angle, and the four diagonal
//! orientations additionally carry an 8x8 corner mask marking the solid
//! triangular half of the tile.

/// Tileset atlas width in cells (256 px bank / 8 px tiles)
const ATLAS_COLS: u16 = 32;

/// Opaque tile identifier.
///
/// Equality-comparable lookup key only; the numeric value is the cell's
/// row-major index in the tileset atlas and carries no meaning beyond
/// identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId(u16);

impl TileId {
    /// Identifier for the tile at atlas cell (col, row)
    pub const fn at_cell(col: u16, row: u16) -> Self {
        Self(row * ATLAS_COLS + col)
    }
}

pub const POST_TILE: TileId = TileId::at_cell(5, 4);
pub const LIGHT_TILE: TileId = TileId::at_cell(20, 0);
pub const BLANK_TILE: TileId = TileId::at_cell(4, 3);

// Corner-pocket quartet. These four tiles double as corner-masked slopes:
// the pocket mouth is the open triangular half of each.
pub const POCKET_TILE_NW: TileId = TileId::at_cell(10, 5);
pub const POCKET_TILE_NE: TileId = TileId::at_cell(11, 4);
pub const POCKET_TILE_SE: TileId = TileId::at_cell(10, 4);
pub const POCKET_TILE_SW: TileId = TileId::at_cell(11, 5);

// Edge and diagonal slope tiles
const SLOPE_TOP_LEFT: TileId = TileId::at_cell(7, 4);
const SLOPE_TOP: TileId = TileId::at_cell(8, 4);
const SLOPE_TOP_RIGHT: TileId = TileId::at_cell(9, 4);
const SLOPE_LEFT: TileId = TileId::at_cell(7, 5);
const SLOPE_RIGHT: TileId = TileId::at_cell(9, 5);
const SLOPE_BOTTOM_LEFT: TileId = TileId::at_cell(7, 6);
const SLOPE_BOTTOM: TileId = TileId::at_cell(8, 6);
const SLOPE_BOTTOM_RIGHT: TileId = TileId::at_cell(9, 6);

/// Which triangular half of a diagonal tile is solid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// 8x8 sub-tile solidity grid for a diagonal tile, one bit per cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerMask {
    rows: [u8; 8],
}

impl CornerMask {
    /// Build the mask for one triangle orientation. Cells on the diagonal
    /// itself are solid in every orientation.
    pub const fn for_corner(corner: Corner) -> Self {
        let mut rows = [0u8; 8];
        let mut ty = 0;
        while ty < 8 {
            let mut tx = 0;
            while tx < 8 {
                let solid = match corner {
                    Corner::TopLeft => tx + ty <= 7,
                    Corner::BottomRight => tx + ty >= 7,
                    Corner::TopRight => tx >= ty,
                    Corner::BottomLeft => tx <= ty,
                };
                if solid {
                    rows[ty] |= 1 << tx;
                }
                tx += 1;
            }
            ty += 1;
        }
        Self { rows }
    }

    /// Whether sub-tile cell (tx, ty) is inside the solid triangle.
    /// Out-of-range cells read as empty.
    pub fn solid(&self, tx: u32, ty: u32) -> bool {
        if tx >= 8 || ty >= 8 {
            return false;
        }
        self.rows[ty as usize] & (1 << tx) != 0
    }
}

const MASK_TOP_LEFT: CornerMask = CornerMask::for_corner(Corner::TopLeft);
const MASK_TOP_RIGHT: CornerMask = CornerMask::for_corner(Corner::TopRight);
const MASK_BOTTOM_LEFT: CornerMask = CornerMask::for_corner(Corner::BottomLeft);
const MASK_BOTTOM_RIGHT: CornerMask = CornerMask::for_corner(Corner::BottomRight);

/// Collision behavior of one slope tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlopeDescriptor {
    /// Bounce angle in degrees, one of {0, 45, 90, 135, 180, 225, 270, 315}
    pub angle: u16,
    /// Present only on diagonal tiles; edge slopes are solid across the
    /// whole tile
    pub mask: Option<CornerMask>,
}

impl SlopeDescriptor {
    const fn edge(angle: u16) -> Self {
        Self { angle, mask: None }
    }

    const fn diagonal(angle: u16, mask: CornerMask) -> Self {
        Self {
            angle,
            mask: Some(mask),
        }
    }
}

/// Slope catalog lookup. Unknown identifiers are plain background: `None`,
/// never an error.
pub fn slope_for(tile: TileId) -> Option<SlopeDescriptor> {
    match tile {
        SLOPE_TOP_LEFT => Some(SlopeDescriptor::diagonal(225, MASK_BOTTOM_RIGHT)),
        SLOPE_TOP => Some(SlopeDescriptor::edge(270)),
        SLOPE_TOP_RIGHT => Some(SlopeDescriptor::diagonal(315, MASK_BOTTOM_LEFT)),
        SLOPE_LEFT => Some(SlopeDescriptor::edge(180)),
        SLOPE_RIGHT => Some(SlopeDescriptor::edge(0)),
        SLOPE_BOTTOM_LEFT => Some(SlopeDescriptor::diagonal(135, MASK_TOP_RIGHT)),
        SLOPE_BOTTOM => Some(SlopeDescriptor::edge(90)),
        SLOPE_BOTTOM_RIGHT => Some(SlopeDescriptor::diagonal(45, MASK_TOP_LEFT)),
        POCKET_TILE_SE => Some(SlopeDescriptor::diagonal(225, MASK_TOP_LEFT)),
        POCKET_TILE_NE => Some(SlopeDescriptor::diagonal(135, MASK_BOTTOM_LEFT)),
        POCKET_TILE_NW => Some(SlopeDescriptor::diagonal(45, MASK_BOTTOM_RIGHT)),
        POCKET_TILE_SW => Some(SlopeDescriptor::diagonal(315, MASK_TOP_RIGHT)),
        _ => None,
    }
}

/// Whether the identifier is in the slope catalog at all
pub fn is_slope(tile: TileId) -> bool {
    slope_for(tile).is_some()
}
