//! Pieces module - the shape catalog
//!
//! Seven immutable shape templates, each four (column, row) offsets in their
//! canonical orientation plus a display color. Spawning hands out copies, so
//! rotating an active piece never touches the catalog.

use crate::rng::RandomSource;
use crate::types::{PieceKind, Rgb};

/// Offset of a single cell relative to the piece anchor
pub type CellOffset = (i8, i8);

/// Shape of a piece - 4 cell offsets from the piece anchor
pub type PieceShape = [CellOffset; 4];

/// One catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceTemplate {
    pub kind: PieceKind,
    pub shape: PieceShape,
    pub color: Rgb,
}

/// The catalog, in [`PieceKind::ALL`] order
pub const CATALOG: [PieceTemplate; 7] = [
    PieceTemplate {
        kind: PieceKind::I,
        shape: [(0, 0), (1, 0), (2, 0), (3, 0)],
        color: Rgb::new(0xff, 0x00, 0x00),
    },
    PieceTemplate {
        kind: PieceKind::O,
        shape: [(0, 0), (1, 0), (0, 1), (1, 1)],
        color: Rgb::new(0x00, 0xff, 0x00),
    },
    PieceTemplate {
        kind: PieceKind::T,
        shape: [(0, 0), (1, 0), (2, 0), (1, 1)],
        color: Rgb::new(0x00, 0x00, 0xff),
    },
    PieceTemplate {
        kind: PieceKind::L,
        shape: [(0, 0), (1, 0), (2, 0), (2, 1)],
        color: Rgb::new(0xff, 0xff, 0x00),
    },
    PieceTemplate {
        kind: PieceKind::J,
        shape: [(0, 0), (1, 0), (2, 0), (0, 1)],
        color: Rgb::new(0xff, 0x00, 0xff),
    },
    PieceTemplate {
        kind: PieceKind::S,
        shape: [(0, 0), (1, 0), (1, 1), (2, 1)],
        color: Rgb::new(0x00, 0xff, 0xff),
    },
    PieceTemplate {
        kind: PieceKind::Z,
        shape: [(1, 0), (2, 0), (0, 1), (1, 1)],
        color: Rgb::new(0xff, 0x7f, 0x00),
    },
];

/// Get the catalog entry for a piece kind
pub fn template(kind: PieceKind) -> &'static PieceTemplate {
    &CATALOG[kind.index()]
}

/// Get the canonical shape for a piece kind
pub fn get_shape(kind: PieceKind) -> PieceShape {
    template(kind).shape
}

/// Get the display color for a piece kind
pub fn color_of(kind: PieceKind) -> Rgb {
    template(kind).color
}

/// Pick a catalog entry uniformly at random and return a copy of it
pub fn random_piece(rng: &mut impl RandomSource) -> PieceTemplate {
    let idx = rng.next_range(CATALOG.len() as u32) as usize;
    CATALOG[idx]
}

/// Swap the column and row of every offset.
///
/// This is a reflection across the main diagonal rather than a true quarter
/// turn; there is no pivot table and it applies to every shape alike.
pub fn transpose(shape: PieceShape) -> PieceShape {
    shape.map(|(x, y)| (y, x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;

    #[test]
    fn test_catalog_order_matches_kinds() {
        for (entry, kind) in CATALOG.iter().zip(PieceKind::ALL) {
            assert_eq!(entry.kind, kind);
            assert_eq!(template(kind), entry);
        }
    }

    #[test]
    fn test_every_shape_has_four_distinct_cells() {
        for entry in CATALOG.iter() {
            for i in 0..4 {
                for j in (i + 1)..4 {
                    assert_ne!(entry.shape[i], entry.shape[j], "{:?}", entry.kind);
                }
            }
        }
    }

    #[test]
    fn test_colors_are_distinct() {
        for i in 0..CATALOG.len() {
            for j in (i + 1)..CATALOG.len() {
                assert_ne!(CATALOG[i].color, CATALOG[j].color);
            }
        }
    }

    #[test]
    fn test_transpose_twice_is_identity() {
        for entry in CATALOG.iter() {
            assert_eq!(transpose(transpose(entry.shape)), entry.shape);
        }
        assert_eq!(
            transpose(get_shape(PieceKind::I)),
            [(0, 0), (0, 1), (0, 2), (0, 3)]
        );
    }

    #[test]
    fn test_random_piece_returns_copy() {
        let mut rng = SimpleRng::new(7);
        let mut piece = random_piece(&mut rng);
        let kind = piece.kind;

        piece.shape = transpose(piece.shape);
        piece.shape[0] = (9, 9);

        assert_ne!(template(kind).shape[0], (9, 9));
    }

    #[test]
    fn test_random_piece_covers_catalog() {
        let mut rng = SimpleRng::new(12345);
        let mut seen = [false; 7];
        for _ in 0..200 {
            seen[random_piece(&mut rng).kind.index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
