//! Contains [`Game`], the orchestrator tying the board, the sides, and the
//! history together. Collaborators drive the whole engine through it: ask a
//! square for its legal transitions, apply one of them, and read or write
//! the position as notation. The game derives whose turn it is from the
//! history and expires en-passant ghosts as turns begin; it holds no other
//! state of its own.

use crate::board::fen::{self, FenBuildError};
use crate::board::history::History;
use crate::board::movegen;
use crate::board::rules::Rule;
use crate::board::Board;
use crate::core::sq::SQ;
use crate::core::Player;

use std::fmt;

use thiserror::Error;

/// Error for an apply request whose rule is not in the current legal set.
/// This is a contract violation by the caller, not a position that can
/// arise in play; nothing is changed when it is reported.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("illegal move: {from} to {to} is not in the current legal set")]
pub struct IllegalMove {
    /// The offending rule's source square.
    pub from: SQ,
    /// The offending rule's target square.
    pub to: SQ,
}

/// A game of chess: the authoritative position plus the record of how it
/// was reached.
///
/// # Examples
///
/// ```rust
/// use caissa::{Game, RuleKind, SQ};
///
/// let mut game = Game::default();
/// let moves = game.legal_moves(SQ::E2);
/// assert_eq!(moves.len(), 2);
/// assert!(moves.iter().all(|m| m.kind() == RuleKind::Plain));
///
/// let rush = moves.iter().find(|m| m.target() == SQ::E4).unwrap().clone();
/// game.apply(&rush).unwrap();
/// assert_eq!(game.fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    history: History,
}

impl Game {
    /// Starts a game from the standard starting position.
    pub fn new() -> Game {
        fen::decode(fen::START_FEN).expect("the starting position parses")
    }

    /// Builds a game from position notation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use caissa::Game;
    ///
    /// let game = Game::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 7 30").unwrap();
    /// assert_eq!(game.fen(), "4k3/8/8/8/8/8/4P3/4K3 w - - 7 30");
    /// assert!(Game::from_fen("not a position").is_err());
    /// ```
    pub fn from_fen(notation: &str) -> Result<Game, FenBuildError> {
        fen::decode(notation)
    }

    /// Renders the position as notation.
    pub fn fen(&self) -> String {
        fen::encode(self)
    }

    pub(crate) fn assemble(board: Board, history: History) -> Game {
        Game { board, history }
    }

    /// The authoritative board.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The record of applied moves.
    #[inline]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The player to move.
    #[inline]
    pub fn turn(&self) -> Player {
        self.history.turn()
    }

    /// The legal transitions of the piece standing on a square: its
    /// geometric candidates, minus any that would leave its own king
    /// attacked. Empty for an empty square. Any piece answers, whether or
    /// not its side is on turn; [`Game::apply`] is where the turn is
    /// enforced. Recomputed per query; the position is exactly as it was
    /// when this returns.
    pub fn legal_moves(&mut self, sq: SQ) -> Vec<Rule> {
        match self.board.id_at(sq) {
            Some(id) => movegen::legal(&mut self.board, id),
            None => Vec::new(),
        }
    }

    /// Applies one of the current legal transitions. The rule must come
    /// from [`Game::legal_moves`] on this position; anything else is
    /// reported as [`IllegalMove`] and changes nothing. A promotion may
    /// have had its officer cycled in between.
    pub fn apply(&mut self, rule: &Rule) -> Result<(), IllegalMove> {
        let illegal = || IllegalMove {
            from: rule.source(),
            to: rule.target(),
        };

        let mover = self
            .board
            .piece(rule.piece_id())
            .map(|piece| (piece.player, piece.sq));
        match mover {
            Some((player, sq)) if player == self.turn() && sq == rule.source() => {}
            _ => return Err(illegal()),
        }
        let sanctioned = movegen::legal(&mut self.board, rule.piece_id())
            .iter()
            .any(|candidate| candidate.same_transition(rule));
        if !sanctioned {
            return Err(illegal());
        }

        let played = rule.record(&self.board);
        rule.apply(&mut self.board);
        self.history.record(played);

        // The side now to move had one turn to take its opponent's ghost;
        // it expires here.
        let next = self.turn();
        self.board.clear_ghost(next);

        Ok(())
    }
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}
