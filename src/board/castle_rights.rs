//! Module for the `Castling` structure, a u8 of flags naming which castle
//! possibilities a position still carries.
//!
//! The board itself derives castling from the king and rook identities and
//! their moved-flags; `Castling` exists at the notation boundary, where the
//! rights travel as the `KQkq` field. Decoding parses the field into flags
//! that gate which rook identities each side retains; encoding collects the
//! live rights back into flags and prints them.

use crate::core::{CastleType, Player};

use std::fmt;

bitflags! {
    /// The four castle possibilities of a position, as named by the third
    /// field of position notation.
    pub struct Castling: u8 {
        const WHITE_K   = 0b0001;
        const WHITE_Q   = 0b0010;
        const BLACK_K   = 0b0100;
        const BLACK_Q   = 0b1000;
        const WHITE_ALL = Self::WHITE_K.bits | Self::WHITE_Q.bits;
        const BLACK_ALL = Self::BLACK_K.bits | Self::BLACK_Q.bits;
    }
}

impl Castling {
    fn flag(player: Player, wing: CastleType) -> Castling {
        match (player, wing) {
            (Player::White, CastleType::KingSide) => Castling::WHITE_K,
            (Player::White, CastleType::QueenSide) => Castling::WHITE_Q,
            (Player::Black, CastleType::KingSide) => Castling::BLACK_K,
            (Player::Black, CastleType::QueenSide) => Castling::BLACK_Q,
        }
    }

    /// Returns whether the given player retains the given castle.
    #[inline]
    pub fn allows(self, player: Player, wing: CastleType) -> bool {
        self.contains(Castling::flag(player, wing))
    }

    /// Grants the given player the given castle.
    #[inline]
    pub fn grant(&mut self, player: Player, wing: CastleType) {
        self.insert(Castling::flag(player, wing));
    }

    /// Adds the right named by a notation letter.
    ///
    /// ```md
    /// `K` -> White king side    `Q` -> White queen side
    /// `k` -> Black king side    `q` -> Black queen side
    /// ```
    ///
    /// Returns `false` for any other character, leaving the flags untouched.
    pub fn add_letter(&mut self, c: char) -> bool {
        let flag = match c {
            'K' => Castling::WHITE_K,
            'Q' => Castling::WHITE_Q,
            'k' => Castling::BLACK_K,
            'q' => Castling::BLACK_Q,
            _ => return false,
        };
        self.insert(flag);
        true
    }

    /// Renders the flags as the notation field: `KQkq` order, or `-` when
    /// no castle remains.
    pub fn fen_string(self) -> String {
        if self.is_empty() {
            return "-".to_owned();
        }
        let mut s = String::new();
        if self.contains(Castling::WHITE_K) {
            s.push('K');
        }
        if self.contains(Castling::WHITE_Q) {
            s.push('Q');
        }
        if self.contains(Castling::BLACK_K) {
            s.push('k');
        }
        if self.contains(Castling::BLACK_Q) {
            s.push('q');
        }
        s
    }
}

impl fmt::Display for Castling {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.fen_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_round_trip() {
        let mut rights = Castling::empty();
        for c in "KQkq".chars() {
            assert!(rights.add_letter(c));
        }
        assert_eq!(rights, Castling::all());
        assert_eq!(rights.fen_string(), "KQkq");
        assert!(!rights.add_letter('x'));
    }

    #[test]
    fn partial_rights() {
        let mut rights = Castling::empty();
        rights.grant(Player::White, CastleType::KingSide);
        rights.grant(Player::Black, CastleType::QueenSide);
        assert_eq!(rights.fen_string(), "Kq");
        assert!(rights.allows(Player::White, CastleType::KingSide));
        assert!(!rights.allows(Player::White, CastleType::QueenSide));
        assert_eq!(Castling::empty().fen_string(), "-");
    }
}
