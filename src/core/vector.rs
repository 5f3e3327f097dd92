//! Signed file/rank offsets between squares, and the composed per-kind
//! direction tables built from them.
//!
//! The compass constants are written in *Black's forward* terms: `S` points
//! one rank toward White's home rank, which is the direction a Black pawn
//! advances. [`Vector::mirror`] flips a vector for the other player, so
//! pawn geometry is written once.
//!
//! Directions compose. The knight's moves are the sums of one diagonal and
//! one orthogonal step, minus the sums that collapse back onto an
//! orthogonal; the queen's lines are the rook's and bishop's together.
//! These tables are built once, on first use.

use super::Player;

use std::fmt;
use std::ops::{Add, Mul, Neg};

/// A signed (file, rank) offset between two squares.
///
/// # Examples
///
/// ```rust
/// use caissa::Vector;
///
/// assert_eq!(Vector::N + Vector::E, Vector::NE);
/// assert_eq!(-Vector::N, Vector::S);
/// assert_eq!(Vector::S * 2, Vector::S2);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vector {
    /// Offset along the files, positive toward file h.
    pub file: i8,
    /// Offset along the ranks, positive toward White's home rank.
    pub rank: i8,
}

impl Vector {
    /// Creates a vector from its file and rank offsets.
    #[inline(always)]
    pub const fn new(file: i8, rank: i8) -> Vector {
        Vector { file, rank }
    }

    /// Points the vector in the given player's forward direction. The
    /// compass constants are in Black's terms, so Black's mirror is the
    /// identity and White's is the negation.
    #[inline(always)]
    pub const fn mirror(self, player: Player) -> Vector {
        Vector {
            file: self.file * player.sign(),
            rank: self.rank * player.sign(),
        }
    }
}

impl Add for Vector {
    type Output = Vector;

    #[inline]
    fn add(self, other: Vector) -> Vector {
        Vector::new(self.file + other.file, self.rank + other.rank)
    }
}

impl Neg for Vector {
    type Output = Vector;

    #[inline]
    fn neg(self) -> Vector {
        Vector::new(-self.file, -self.rank)
    }
}

impl Mul<i8> for Vector {
    type Output = Vector;

    #[inline]
    fn mul(self, scale: i8) -> Vector {
        Vector::new(self.file * scale, self.rank * scale)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({:+},{:+})", self.file, self.rank)
    }
}

// compass constants
impl Vector {
    /// One rank toward Black's home rank.
    pub const N: Vector = Vector::new(0, -1);
    /// One file toward file h.
    pub const E: Vector = Vector::new(1, 0);
    /// One rank toward White's home rank: a Black pawn's forward step.
    pub const S: Vector = Vector::new(0, 1);
    /// One file toward file a.
    pub const W: Vector = Vector::new(-1, 0);

    #[doc(hidden)]
    pub const NE: Vector = Vector::new(1, -1);
    #[doc(hidden)]
    pub const SE: Vector = Vector::new(1, 1);
    #[doc(hidden)]
    pub const SW: Vector = Vector::new(-1, 1);
    #[doc(hidden)]
    pub const NW: Vector = Vector::new(-1, -1);

    /// A Black pawn's initial two-square rush.
    pub const S2: Vector = Vector::new(0, 2);
    /// The king's castling hop toward the h-file rook.
    pub const E2: Vector = Vector::new(2, 0);
    /// The king's castling hop toward the a-file rook.
    pub const W2: Vector = Vector::new(-2, 0);
}

lazy_static! {
    /// The rook's four lines.
    pub static ref ROOK_LINES: Vec<Vector> =
        vec![Vector::N, Vector::E, Vector::S, Vector::W];

    /// The bishop's four lines.
    pub static ref BISHOP_LINES: Vec<Vector> =
        vec![Vector::NE, Vector::SE, Vector::SW, Vector::NW];

    /// The queen's eight lines: rook and bishop lines together. Also the
    /// king's single-step ring.
    pub static ref QUEEN_LINES: Vec<Vector> = {
        let mut lines = ROOK_LINES.clone();
        lines.extend(BISHOP_LINES.iter().copied());
        lines
    };

    /// The knight's eight ells: every diagonal-plus-orthogonal sum that does
    /// not collapse onto a file or rank.
    pub static ref KNIGHT_ELLS: Vec<Vector> = {
        let mut ells = Vec::with_capacity(8);
        for &diagonal in BISHOP_LINES.iter() {
            for &orthogonal in ROOK_LINES.iter() {
                let sum = diagonal + orthogonal;
                if sum.file != 0 && sum.rank != 0 {
                    ells.push(sum);
                }
            }
        }
        ells
    };
}
