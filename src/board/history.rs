//! The record of applied moves, and what the rest of the engine derives
//! from it: whose turn it is (parity), the half-move clock (distance back
//! to the last capture or pawn move), and the full-move number.
//!
//! A position loaded from notation has no real moves behind it, so the
//! decoder seeds the history with synthetic entries: enough of them that
//! parity and the clocks come out at the loaded values. Nothing else is
//! ever stored for the clocks.

use crate::core::sq::SQ;
use crate::core::{PieceType, Player};

/// The durable record of one applied move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Played {
    /// The mover's kind at the time of the move. A promotion records the
    /// pawn, not the officer it became.
    pub piece: PieceType,
    /// Whose move it was.
    pub player: Player,
    /// Where the mover stood.
    pub from: SQ,
    /// Where it went.
    pub to: SQ,
    /// Whether a piece was removed, en passant included.
    pub capture: bool,
}

/// One history entry: a real move, or a synthetic seed standing in for a
/// move played before the position was loaded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    /// An applied move.
    Played(Played),
    /// A placeholder from a notation load. `zeroing` marks whether it
    /// counts as a capture-or-pawn move for the half-move clock.
    Seed { zeroing: bool },
}

impl Entry {
    /// Whether this entry resets the half-move clock.
    #[inline]
    pub fn zeroing(&self) -> bool {
        match *self {
            Entry::Played(played) => played.capture || played.piece == PieceType::P,
            Entry::Seed { zeroing } => zeroing,
        }
    }
}

/// The ordered sequence of applied moves.
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Vec<Entry>,
}

impl History {
    /// An empty history: White to move, move one.
    pub fn new() -> History {
        History::default()
    }

    /// Number of plies played (seeds included).
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no ply has been played.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }

    /// The player to move: White when an even number of plies has been
    /// played.
    #[inline]
    pub fn turn(&self) -> Player {
        if self.entries.len() & 1 == 0 {
            Player::White
        } else {
            Player::Black
        }
    }

    /// Plies since the last capture or pawn move.
    pub fn half_clock(&self) -> u16 {
        let mut count = 0;
        for entry in self.entries.iter().rev() {
            if entry.zeroing() {
                break;
            }
            count += 1;
        }
        count
    }

    /// The full-move number, starting at 1 and advancing after each of
    /// Black's moves.
    #[inline]
    pub fn full_clock(&self) -> u16 {
        (self.entries.len() / 2) as u16 + 1
    }

    /// Appends an applied move.
    pub(crate) fn record(&mut self, played: Played) {
        self.entries.push(Entry::Played(played));
    }

    /// Seeds the history for a loaded position: `plies` synthetic entries,
    /// the trailing `half_clock` of them quiet so the clock derivation
    /// reproduces the loaded value. A half clock exceeding the ply count is
    /// clamped; no sequence of moves can produce such a pair.
    pub(crate) fn seed(&mut self, plies: usize, half_clock: u16) {
        debug_assert!(self.entries.is_empty());
        let quiet = (half_clock as usize).min(plies);
        for _ in 0..plies - quiet {
            self.entries.push(Entry::Seed { zeroing: true });
        }
        for _ in 0..quiet {
            self.entries.push(Entry::Seed { zeroing: false });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_knight(player: Player) -> Played {
        Played {
            piece: PieceType::N,
            player,
            from: SQ::B1,
            to: SQ::C3,
            capture: false,
        }
    }

    #[test]
    fn parity_and_full_clock() {
        let mut history = History::new();
        assert_eq!(history.turn(), Player::White);
        assert_eq!(history.full_clock(), 1);

        history.record(quiet_knight(Player::White));
        assert_eq!(history.turn(), Player::Black);
        assert_eq!(history.full_clock(), 1);

        history.record(quiet_knight(Player::Black));
        assert_eq!(history.turn(), Player::White);
        assert_eq!(history.full_clock(), 2);
    }

    #[test]
    fn half_clock_counts_back_to_zeroing() {
        let mut history = History::new();
        history.record(Played {
            piece: PieceType::P,
            player: Player::White,
            from: SQ::E2,
            to: SQ::E4,
            capture: false,
        });
        assert_eq!(history.half_clock(), 0);

        history.record(quiet_knight(Player::Black));
        history.record(quiet_knight(Player::White));
        assert_eq!(history.half_clock(), 2);

        history.record(Played {
            piece: PieceType::N,
            player: Player::Black,
            from: SQ::C3,
            to: SQ::E4,
            capture: true,
        });
        assert_eq!(history.half_clock(), 0);
    }

    #[test]
    fn seeding_reproduces_loaded_clocks() {
        let mut history = History::new();
        // "b - - 3 10": nineteen plies behind the position, three of them
        // since the last zeroing move.
        history.seed(19, 3);
        assert_eq!(history.turn(), Player::Black);
        assert_eq!(history.full_clock(), 10);
        assert_eq!(history.half_clock(), 3);
    }

    #[test]
    fn seeding_clamps_impossible_half_clock() {
        let mut history = History::new();
        history.seed(2, 40);
        assert_eq!(history.half_clock(), 2);
    }
}
