//! Contains the representation of a chessboard's square.
//!
//! Internally, a `SQ` is just a u8. The number of a `SQ` maps to the following
//! squares of a chessboard, scanning the same way a position notation string
//! does, from Black's home rank down to White's:
//!
//! ```md,ignore
//! 8 | 0  1  2  3  4  5  6  7
//! 7 | 8  9  10 11 12 13 14 15
//! 6 | 16 17 18 19 20 21 22 23
//! 5 | 24 25 26 27 28 29 30 31
//! 4 | 32 33 34 35 36 37 38 39
//! 3 | 40 41 42 43 44 45 46 47
//! 2 | 48 49 50 51 52 53 54 55
//! 1 | 56 57 58 59 60 61 62 63
//!   -------------------------
//!      a  b  c  d  e  f  g  h
//! ```
//!
//! # Examples
//!
//! ```rust
//! use caissa::core::sq::SQ;
//!
//! let e2 = SQ::E2;
//! assert_eq!(e2.to_string(), "e2");
//! assert_eq!(SQ::from_notation("e2").unwrap(), e2);
//! ```
//!
//! Adding a `Vector` to a `SQ` is checked: stepping over any edge of the
//! board is an [`OutOfBounds`] error, which move generation suppresses
//! per-candidate.
//!
//! ```rust
//! use caissa::core::sq::SQ;
//! use caissa::Vector;
//!
//! assert_eq!(SQ::E2.checked_add(Vector::N).unwrap(), SQ::E3);
//! assert!(SQ::A1.checked_add(Vector::W).is_err());
//! ```

use super::masks::*;
use super::vector::Vector;
use super::{File, Player, Rank, ALL_FILES, ALL_RANKS};

use std::fmt;
use std::ops::Sub;

use thiserror::Error;

/// Error for square arithmetic that leaves the 8x8 grid. Expected during
/// move generation, where it excludes the candidate and nothing else.
#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
#[error("square arithmetic left the board")]
pub struct OutOfBounds;

/// Error for a malformed square token such as `"e9"` or `"x4"`.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("malformed square notation: {notation}")]
pub struct BadNotation {
    /// The offending token.
    pub notation: String,
}

/// Represents a singular square of a chessboard.
#[derive(Copy, Clone, Default, Hash, PartialEq, PartialOrd, Ord, Eq, Debug)]
#[repr(transparent)]
pub struct SQ(pub u8);

impl SQ {
    /// Returns if a `SQ` is within the legal bounds of a square,
    /// which is inclusively between 0 - 63.
    #[inline(always)]
    pub const fn is_okay(self) -> bool {
        self.0 < 64
    }

    /// Returns the index of the square, ranging from 0 (a8) to 63 (h1).
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the rank index of a `SQ`, 0 for rank 8 down to 7 for rank 1.
    #[inline(always)]
    pub const fn rank_idx(self) -> u8 {
        self.0 >> 3
    }

    /// Returns the file index of a `SQ`, 0 for file a up to 7 for file h.
    #[inline(always)]
    pub const fn file_idx(self) -> u8 {
        self.0 & 0b0000_0111
    }

    /// Returns the `Rank` that a `SQ` lies on.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use caissa::{Rank, SQ};
    ///
    /// assert_eq!(SQ::F2.rank(), Rank::R2);
    /// ```
    #[inline(always)]
    pub fn rank(self) -> Rank {
        ALL_RANKS[self.rank_idx() as usize]
    }

    /// Returns the `File` that a `SQ` lies on.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use caissa::{File, SQ};
    ///
    /// assert_eq!(SQ::F2.file(), File::F);
    /// ```
    #[inline(always)]
    pub fn file(self) -> File {
        ALL_FILES[self.file_idx() as usize]
    }

    /// Creates a `SQ` from the designated File and Rank.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use caissa::{File, Rank, SQ};
    ///
    /// assert_eq!(SQ::make(File::F, Rank::R2), SQ::F2);
    /// ```
    #[inline(always)]
    pub fn make(file: File, rank: Rank) -> SQ {
        SQ(((rank as u8) << 3) + file as u8)
    }

    /// Offsets the square by a `Vector`, failing with [`OutOfBounds`] if
    /// either coordinate would leave the board.
    #[inline]
    pub fn checked_add(self, vector: Vector) -> Result<SQ, OutOfBounds> {
        let file = self.file_idx() as i8 + vector.file;
        let rank = self.rank_idx() as i8 + vector.rank;
        if (0..FILE_CNT as i8).contains(&file) && (0..RANK_CNT as i8).contains(&rank) {
            Ok(SQ((rank as u8) << 3 | file as u8))
        } else {
            Err(OutOfBounds)
        }
    }

    /// Offsets the square against a `Vector`. The inverse of
    /// [`SQ::checked_add`]: whenever `s.checked_add(v)` lands in bounds,
    /// subtracting `v` from it yields `s` again.
    #[inline]
    pub fn checked_sub(self, vector: Vector) -> Result<SQ, OutOfBounds> {
        self.checked_add(-vector)
    }

    /// Flips the square's rank, so `SQ::A1` -> `SQ::A8`. Used to view a
    /// square from the other player's perspective.
    #[inline(always)]
    pub const fn flip(self) -> SQ {
        SQ(self.0 ^ 0b111000)
    }

    /// Returns if the `SQ` is a dark square.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use caissa::SQ;
    ///
    /// assert!(SQ::A1.is_dark());
    /// assert!(!SQ::H1.is_dark());
    /// ```
    #[inline(always)]
    pub const fn is_dark(self) -> bool {
        (self.rank_idx() + self.file_idx()) & 1 == 1
    }

    /// Returns whether the square lies on the rank a pawn of the given
    /// player promotes on.
    #[inline]
    pub fn on_final_rank(self, player: Player) -> bool {
        self.rank().is_final(player)
    }

    /// Parses a square from its two-character notation, file letter first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use caissa::SQ;
    ///
    /// assert_eq!(SQ::from_notation("a8").unwrap(), SQ::A8);
    /// assert!(SQ::from_notation("i9").is_err());
    /// ```
    pub fn from_notation(notation: &str) -> Result<SQ, BadNotation> {
        let bad = || BadNotation {
            notation: notation.to_string(),
        };
        let mut chars = notation.chars();
        let file = chars.next().ok_or_else(bad)?;
        let rank = chars.next().ok_or_else(bad)?;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(bad());
        }
        let file_idx = file as u8 - b'a';
        let rank_idx = b'8' - rank as u8;
        Ok(SQ(rank_idx << 3 | file_idx))
    }
}

impl Sub for SQ {
    type Output = Vector;

    /// The `Vector` leading from `other` to `self`.
    #[inline]
    fn sub(self, other: SQ) -> Vector {
        Vector::new(
            self.file_idx() as i8 - other.file_idx() as i8,
            self.rank_idx() as i8 - other.rank_idx() as i8,
        )
    }
}

impl fmt::Display for SQ {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", SQ_DISPLAY[self.0 as usize])
    }
}

// constants
impl SQ {
    #[doc(hidden)]
    pub const A8: SQ = SQ(0);
    #[doc(hidden)]
    pub const B8: SQ = SQ(1);
    #[doc(hidden)]
    pub const C8: SQ = SQ(2);
    #[doc(hidden)]
    pub const D8: SQ = SQ(3);
    #[doc(hidden)]
    pub const E8: SQ = SQ(4);
    #[doc(hidden)]
    pub const F8: SQ = SQ(5);
    #[doc(hidden)]
    pub const G8: SQ = SQ(6);
    #[doc(hidden)]
    pub const H8: SQ = SQ(7);
    #[doc(hidden)]
    pub const A7: SQ = SQ(8);
    #[doc(hidden)]
    pub const B7: SQ = SQ(9);
    #[doc(hidden)]
    pub const C7: SQ = SQ(10);
    #[doc(hidden)]
    pub const D7: SQ = SQ(11);
    #[doc(hidden)]
    pub const E7: SQ = SQ(12);
    #[doc(hidden)]
    pub const F7: SQ = SQ(13);
    #[doc(hidden)]
    pub const G7: SQ = SQ(14);
    #[doc(hidden)]
    pub const H7: SQ = SQ(15);
    #[doc(hidden)]
    pub const A6: SQ = SQ(16);
    #[doc(hidden)]
    pub const B6: SQ = SQ(17);
    #[doc(hidden)]
    pub const C6: SQ = SQ(18);
    #[doc(hidden)]
    pub const D6: SQ = SQ(19);
    #[doc(hidden)]
    pub const E6: SQ = SQ(20);
    #[doc(hidden)]
    pub const F6: SQ = SQ(21);
    #[doc(hidden)]
    pub const G6: SQ = SQ(22);
    #[doc(hidden)]
    pub const H6: SQ = SQ(23);
    #[doc(hidden)]
    pub const A5: SQ = SQ(24);
    #[doc(hidden)]
    pub const B5: SQ = SQ(25);
    #[doc(hidden)]
    pub const C5: SQ = SQ(26);
    #[doc(hidden)]
    pub const D5: SQ = SQ(27);
    #[doc(hidden)]
    pub const E5: SQ = SQ(28);
    #[doc(hidden)]
    pub const F5: SQ = SQ(29);
    #[doc(hidden)]
    pub const G5: SQ = SQ(30);
    #[doc(hidden)]
    pub const H5: SQ = SQ(31);
    #[doc(hidden)]
    pub const A4: SQ = SQ(32);
    #[doc(hidden)]
    pub const B4: SQ = SQ(33);
    #[doc(hidden)]
    pub const C4: SQ = SQ(34);
    #[doc(hidden)]
    pub const D4: SQ = SQ(35);
    #[doc(hidden)]
    pub const E4: SQ = SQ(36);
    #[doc(hidden)]
    pub const F4: SQ = SQ(37);
    #[doc(hidden)]
    pub const G4: SQ = SQ(38);
    #[doc(hidden)]
    pub const H4: SQ = SQ(39);
    #[doc(hidden)]
    pub const A3: SQ = SQ(40);
    #[doc(hidden)]
    pub const B3: SQ = SQ(41);
    #[doc(hidden)]
    pub const C3: SQ = SQ(42);
    #[doc(hidden)]
    pub const D3: SQ = SQ(43);
    #[doc(hidden)]
    pub const E3: SQ = SQ(44);
    #[doc(hidden)]
    pub const F3: SQ = SQ(45);
    #[doc(hidden)]
    pub const G3: SQ = SQ(46);
    #[doc(hidden)]
    pub const H3: SQ = SQ(47);
    #[doc(hidden)]
    pub const A2: SQ = SQ(48);
    #[doc(hidden)]
    pub const B2: SQ = SQ(49);
    #[doc(hidden)]
    pub const C2: SQ = SQ(50);
    #[doc(hidden)]
    pub const D2: SQ = SQ(51);
    #[doc(hidden)]
    pub const E2: SQ = SQ(52);
    #[doc(hidden)]
    pub const F2: SQ = SQ(53);
    #[doc(hidden)]
    pub const G2: SQ = SQ(54);
    #[doc(hidden)]
    pub const H2: SQ = SQ(55);
    #[doc(hidden)]
    pub const A1: SQ = SQ(56);
    #[doc(hidden)]
    pub const B1: SQ = SQ(57);
    #[doc(hidden)]
    pub const C1: SQ = SQ(58);
    #[doc(hidden)]
    pub const D1: SQ = SQ(59);
    #[doc(hidden)]
    pub const E1: SQ = SQ(60);
    #[doc(hidden)]
    pub const F1: SQ = SQ(61);
    #[doc(hidden)]
    pub const G1: SQ = SQ(62);
    #[doc(hidden)]
    pub const H1: SQ = SQ(63);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vector::Vector;

    #[test]
    fn add_then_sub_is_identity() {
        let vectors = [
            Vector::N,
            Vector::E,
            Vector::S,
            Vector::W,
            Vector::NE,
            Vector::SW,
            Vector::new(1, -2),
            Vector::new(-2, 1),
        ];
        for idx in 0..64 {
            let sq = SQ(idx);
            for &v in vectors.iter() {
                if let Ok(stepped) = sq.checked_add(v) {
                    assert_eq!(stepped.checked_sub(v).unwrap(), sq);
                    assert_eq!(stepped - sq, v);
                }
            }
        }
    }

    #[test]
    fn notation_round_trip() {
        for idx in 0..64 {
            let sq = SQ(idx);
            assert_eq!(SQ::from_notation(&sq.to_string()).unwrap(), sq);
        }
        assert!(SQ::from_notation("").is_err());
        assert!(SQ::from_notation("e").is_err());
        assert!(SQ::from_notation("e44").is_err());
        assert!(SQ::from_notation("j4").is_err());
        assert!(SQ::from_notation("e0").is_err());
    }

    #[test]
    fn final_ranks() {
        assert!(SQ::E8.on_final_rank(Player::White));
        assert!(SQ::E1.on_final_rank(Player::Black));
        assert!(!SQ::E8.on_final_rank(Player::Black));
        assert!(!SQ::E4.on_final_rank(Player::White));
    }

    #[test]
    fn square_colors() {
        assert!(!SQ::A8.is_dark());
        assert!(SQ::B8.is_dark());
        assert!(SQ::A1.is_dark());
        assert_eq!(SQ::C4.flip(), SQ::C5);
        assert_eq!(SQ::A1.flip(), SQ::A8);
        assert_eq!(SQ::H8.flip().flip(), SQ::H8);
    }
}
