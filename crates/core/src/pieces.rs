//! Pieces module - the seven shapes and their pivot rotation
//!
//! Every piece is a plain record: shape id, four local cells, a pivot and the
//! number of distinct orientations. Rotation turns each cell a quarter around
//! the pivot on the integer grid and always returns a new snapshot; the caller
//! decides whether to commit it.

use crate::rng::SimpleRng;
use crate::types::{ShapeId, PIECE_CELLS};

/// Offset of a single cell in the piece's local grid
pub type CellOffset = (i16, i16);

/// The four cells of a piece
pub type PieceCells = [CellOffset; PIECE_CELLS];

/// A falling piece in local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub shape: ShapeId,
    /// Number of distinct orientations (1, 2 or 4)
    pub rotations: u8,
    pub pivot: CellOffset,
    /// Current orientation, in `0..rotations`
    pub rotation: u8,
    pub cells: PieceCells,
}

/// Tight bounding box over a piece's cells (inclusive on both ends)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i16,
    pub y: i16,
    pub x2: i16,
    pub y2: i16,
}

impl Rect {
    /// Middle column, rounded toward the lower column
    pub fn center_x(&self) -> i16 {
        (self.x + self.x2).div_euclid(2)
    }

    pub fn width(&self) -> i16 {
        self.x2 - self.x + 1
    }

    pub fn height(&self) -> i16 {
        self.y2 - self.y + 1
    }
}

/// Spawn geometry of a shape
pub fn catalog(shape: ShapeId) -> Piece {
    let (rotations, pivot, cells) = match shape {
        ShapeId::I => (2, (1, 1), [(1, 0), (1, 1), (1, 2), (1, 3)]),
        ShapeId::J => (4, (1, 2), [(0, 2), (1, 2), (2, 2), (2, 3)]),
        ShapeId::S => (2, (1, 2), [(1, 2), (2, 2), (0, 3), (1, 3)]),
        ShapeId::O => (1, (1, 2), [(1, 2), (2, 2), (1, 3), (2, 3)]),
        ShapeId::L => (4, (1, 2), [(0, 2), (1, 2), (2, 2), (0, 3)]),
        ShapeId::Z => (2, (1, 2), [(0, 2), (1, 2), (1, 3), (2, 3)]),
        ShapeId::T => (4, (1, 2), [(0, 2), (1, 2), (2, 2), (1, 3)]),
    };
    Piece {
        shape,
        rotations,
        pivot,
        rotation: 0,
        cells,
    }
}

impl Piece {
    /// Spawn geometry of a shape
    pub fn new(shape: ShapeId) -> Self {
        catalog(shape)
    }

    /// Draw one of the seven shapes uniformly
    pub fn random(rng: &mut SimpleRng) -> Self {
        let index = rng.next_range(ShapeId::ALL.len() as u32) as usize;
        catalog(ShapeId::ALL[index])
    }

    /// Return this piece turned a quarter around its pivot.
    ///
    /// The square never turns. Two-orientation pieces ignore `clockwise`:
    /// orientation 0 always turns counter-clockwise and orientation 1 turns
    /// back, so they flip between the same two silhouettes.
    pub fn rotated(&self, clockwise: bool) -> Piece {
        let clockwise = match self.rotations {
            1 => return *self,
            2 => self.rotation != 0,
            _ => clockwise,
        };
        let dir: i16 = if clockwise { 1 } else { -1 };
        let (ax, ay) = self.pivot;

        let mut next = *self;
        next.rotation = if clockwise {
            (self.rotation + 1) % self.rotations
        } else {
            (self.rotation + self.rotations - 1) % self.rotations
        };
        for (out, &(px, py)) in next.cells.iter_mut().zip(self.cells.iter()) {
            *out = (ax + (ay - py) * dir, ay + (ax - px) * -dir);
        }
        next
    }

    pub fn bounding_rect(&self) -> Rect {
        let (x0, y0) = self.cells[0];
        self.cells.iter().skip(1).fold(
            Rect {
                x: x0,
                y: y0,
                x2: x0,
                y2: y0,
            },
            |r, &(x, y)| Rect {
                x: r.x.min(x),
                y: r.y.min(y),
                x2: r.x2.max(x),
                y2: r.y2.max(y),
            },
        )
    }

    /// Cells translated to board coordinates
    pub fn cells_at(&self, x: i16, y: i16) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.cells.iter().map(move |&(dx, dy)| (x + dx, y + dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_four_distinct_cells() {
        for shape in ShapeId::ALL {
            let piece = catalog(shape);
            for i in 0..PIECE_CELLS {
                for j in (i + 1)..PIECE_CELLS {
                    assert_ne!(piece.cells[i], piece.cells[j], "{:?}", shape);
                }
            }
        }
    }

    #[test]
    fn test_spawn_geometry_fits_three_by_four() {
        for shape in ShapeId::ALL {
            let rect = catalog(shape).bounding_rect();
            assert!(rect.x >= 0 && rect.x2 <= 2, "{:?}", shape);
            assert!(rect.y >= 0 && rect.y2 <= 3, "{:?}", shape);
        }
    }

    #[test]
    fn test_t_rotates_clockwise_about_pivot() {
        let t = catalog(ShapeId::T);
        let r = t.rotated(true);
        assert_eq!(r.rotation, 1);
        // Row of three with a stem below becomes a column of three with a stem on the left.
        assert_eq!(r.cells, [(1, 1), (1, 2), (1, 3), (0, 2)]);
    }

    #[test]
    fn test_counter_clockwise_undoes_clockwise() {
        for shape in [ShapeId::J, ShapeId::L, ShapeId::T] {
            let piece = catalog(shape);
            assert_eq!(piece.rotated(true).rotated(false), piece);
            assert_eq!(piece.rotated(false).rotated(true), piece);
        }
    }

    #[test]
    fn test_counter_clockwise_steps_index_backwards() {
        let t = catalog(ShapeId::T);
        assert_eq!(t.rotated(false).rotation, 3);
    }

    #[test]
    fn test_two_state_ignores_requested_direction() {
        let s = catalog(ShapeId::S);
        assert_eq!(s.rotated(true), s.rotated(false));

        let flipped = s.rotated(false);
        assert_eq!(flipped.rotation, 1);
        assert_eq!(flipped.rotated(false), s);
        assert_eq!(flipped.rotated(true), s);
    }

    #[test]
    fn test_i_lies_flat_after_one_turn() {
        let i = catalog(ShapeId::I).rotated(true);
        assert_eq!(i.cells, [(0, 1), (1, 1), (2, 1), (3, 1)]);
        let rect = i.bounding_rect();
        assert_eq!((rect.x, rect.x2), (0, 3));
        assert_eq!((rect.width(), rect.height()), (4, 1));
        assert_eq!(rect.y, 1);
    }

    #[test]
    fn test_two_state_pieces_stay_in_local_columns() {
        let s = catalog(ShapeId::S).rotated(true);
        assert_eq!(s.cells, [(1, 2), (1, 1), (2, 3), (2, 2)]);
        let z = catalog(ShapeId::Z).rotated(true);
        assert_eq!(z.cells, [(1, 3), (1, 2), (2, 2), (2, 1)]);
        for piece in [s, z] {
            let rect = piece.bounding_rect();
            assert!(rect.x >= 0 && rect.x2 <= 3);
        }
    }

    #[test]
    fn test_center_x_rounds_down() {
        let rect = Rect {
            x: 0,
            y: 0,
            x2: 1,
            y2: 0,
        };
        assert_eq!(rect.center_x(), 0);
        let rect = Rect {
            x: -1,
            y: 0,
            x2: 0,
            y2: 0,
        };
        assert_eq!(rect.center_x(), -1);
    }

    #[test]
    fn test_random_covers_catalog() {
        let mut rng = SimpleRng::new(7);
        let mut seen = [false; 7];
        for _ in 0..500 {
            let piece = Piece::random(&mut rng);
            let idx = ShapeId::ALL.iter().position(|&s| s == piece.shape).unwrap();
            seen[idx] = true;
            assert_eq!(piece.rotation, 0);
        }
        assert!(seen.iter().all(|&s| s));
    }
}
