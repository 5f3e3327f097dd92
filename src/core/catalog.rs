//! Movement descriptors for each piece kind.
//!
//! A kind's geometry is data, not behavior: a [`Descriptor`] carries the
//! non-capturing step vectors, the capturing step vectors, the special-move
//! vectors, and a melee-or-ranged tag. Generation is two walks parameterized
//! by these sets; no piece kind has generation code of its own. The
//! descriptors are assembled once, on first use, from the composed
//! direction tables in [`vector`](super::vector).

use super::masks::PIECE_TYPE_CNT;
use super::vector::{Vector, BISHOP_LINES, KNIGHT_ELLS, QUEEN_LINES, ROOK_LINES};
use super::PieceType;

/// How a piece covers its vectors: a single step each, or a repeated walk
/// along each line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MotionKind {
    /// One step per vector.
    Melee,
    /// Walk each vector over empty squares, then one capture test.
    Ranged,
}

/// One piece kind's movement geometry, in Black's forward terms.
#[derive(Clone, Debug)]
pub struct Descriptor {
    /// Melee or ranged coverage.
    pub motion: MotionKind,
    /// Non-capturing steps. For ranged kinds these are the lines.
    pub moves: Vec<Vector>,
    /// Capturing steps. Identical to `moves` for every kind but the pawn.
    pub captures: Vec<Vector>,
    /// Special transitions: the pawn's rush, the king's castle hops.
    pub specials: Vec<Vector>,
}

lazy_static! {
    static ref CATALOG: [Descriptor; PIECE_TYPE_CNT] = [
        // Pawn: forward step, diagonal captures, initial rush.
        Descriptor {
            motion: MotionKind::Melee,
            moves: vec![Vector::S],
            captures: vec![Vector::SE, Vector::SW],
            specials: vec![Vector::S2],
        },
        // Knight
        Descriptor {
            motion: MotionKind::Melee,
            moves: KNIGHT_ELLS.clone(),
            captures: KNIGHT_ELLS.clone(),
            specials: Vec::new(),
        },
        // Bishop
        Descriptor {
            motion: MotionKind::Ranged,
            moves: BISHOP_LINES.clone(),
            captures: BISHOP_LINES.clone(),
            specials: Vec::new(),
        },
        // Rook
        Descriptor {
            motion: MotionKind::Ranged,
            moves: ROOK_LINES.clone(),
            captures: ROOK_LINES.clone(),
            specials: Vec::new(),
        },
        // Queen
        Descriptor {
            motion: MotionKind::Ranged,
            moves: QUEEN_LINES.clone(),
            captures: QUEEN_LINES.clone(),
            specials: Vec::new(),
        },
        // King: the queen's ring, a step at a time, plus the castle hops.
        Descriptor {
            motion: MotionKind::Melee,
            moves: QUEEN_LINES.clone(),
            captures: QUEEN_LINES.clone(),
            specials: vec![Vector::E2, Vector::W2],
        },
    ];
}

/// Returns the movement descriptor of a piece kind.
#[inline]
pub fn descriptor(kind: PieceType) -> &'static Descriptor {
    &CATALOG[kind.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pawn_overrides_captures() {
        let pawn = descriptor(PieceType::P);
        assert_eq!(pawn.motion, MotionKind::Melee);
        assert_eq!(pawn.moves, vec![Vector::S]);
        assert_eq!(pawn.captures, vec![Vector::SE, Vector::SW]);
        assert_eq!(pawn.specials, vec![Vector::S2]);
    }

    #[test]
    fn officers_capture_where_they_move() {
        for &kind in &[PieceType::N, PieceType::B, PieceType::R, PieceType::Q, PieceType::K] {
            let desc = descriptor(kind);
            assert_eq!(desc.moves, desc.captures);
        }
    }

    #[test]
    fn ranged_kinds() {
        assert_eq!(descriptor(PieceType::B).motion, MotionKind::Ranged);
        assert_eq!(descriptor(PieceType::R).motion, MotionKind::Ranged);
        assert_eq!(descriptor(PieceType::Q).motion, MotionKind::Ranged);
        assert_eq!(descriptor(PieceType::N).motion, MotionKind::Melee);
        assert_eq!(descriptor(PieceType::K).motion, MotionKind::Melee);
        assert_eq!(descriptor(PieceType::Q).moves.len(), 8);
    }
}
