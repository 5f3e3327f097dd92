//! This module contains [`Board`], the object owning the authoritative
//! state of the position: the piece arena, the 64-slot grid of occupants,
//! and the two per-player [`Side`] aggregates.
//!
//! All durable modification goes through the placement operations
//! ([`Board::place`], [`Board::remove`] and the crate-internal relocation),
//! which keep three things in lockstep: the grid slot, the piece's square
//! back-reference, and the owning side's membership. The one sanctioned
//! exception is [`Speculation`], the guard the legality filter uses to try
//! a move out: it mutates the grid and arena directly, skips the side
//! hooks, and restores the exact prior state when dropped, on every exit
//! path. That bypass is safe because sides hold stable arena ids, not
//! recomputed indices.
//!
//! [`Side`]: side/struct.Side.html

pub mod castle_rights;
pub mod fen;
pub mod history;
pub mod rules;
pub mod side;

pub(crate) mod movegen;

use crate::core::masks::{PLAYER_CNT, SQ_CNT};
use crate::core::piece::{Piece, PieceId};
use crate::core::sq::SQ;
use crate::core::square_set::SquareSet;
use crate::core::{PieceType, Player};

use self::side::{Ghost, Side};

use std::fmt;

/// The 64 squares of the game and every piece standing on them.
#[derive(Clone, Debug)]
pub struct Board {
    /// Owner of every live piece. A captured piece's slot is emptied; slots
    /// are never reissued within a game.
    arena: Vec<Option<Piece>>,
    /// Which piece, if any, stands on each square.
    grid: [Option<PieceId>; SQ_CNT],
    /// Per-player aggregates, synced by the placement hooks.
    sides: [Side; PLAYER_CNT],
}

impl Board {
    /// Creates a board with no pieces on it.
    pub fn empty() -> Board {
        Board {
            arena: Vec::with_capacity(32),
            grid: [None; SQ_CNT],
            sides: [Side::new(Player::White), Side::new(Player::Black)],
        }
    }

    /// The piece standing on a square.
    #[inline]
    pub fn piece_at(&self, sq: SQ) -> Option<&Piece> {
        self.grid[sq.index()].and_then(move |id| self.piece(id))
    }

    /// The id of the piece standing on a square.
    #[inline]
    pub fn id_at(&self, sq: SQ) -> Option<PieceId> {
        self.grid[sq.index()]
    }

    /// Resolves an id to its piece, while the piece is alive.
    #[inline]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.arena[id.index()].as_ref()
    }

    /// One player's side aggregate.
    #[inline]
    pub fn side(&self, player: Player) -> &Side {
        &self.sides[player.index()]
    }

    /// The square of a player's king, while one is on the board.
    pub fn king_sq(&self, player: Player) -> Option<SQ> {
        self.side(player)
            .king()
            .and_then(|id| self.piece(id))
            .map(|king| king.sq)
    }

    /// Whether a square holds a piece.
    #[inline]
    pub fn occupied(&self, sq: SQ) -> bool {
        self.grid[sq.index()].is_some()
    }

    /// The number of a player's live pieces of one kind.
    pub fn count_piece(&self, player: Player, kind: PieceType) -> usize {
        self.side(player).members(kind).len()
    }

    /// The number of live pieces on the board.
    pub fn count_all_pieces(&self) -> usize {
        self.sides.iter().map(|side| side.ids().count()).sum()
    }

    /// The union of squares the given player's pieces attack: every square
    /// one of them could capture on, occupied or not. Recomputed on demand,
    /// never cached.
    pub fn attacked_by(&self, player: Player) -> SquareSet {
        movegen::attacks(self, player)
    }

    /// Whether the given player's king currently stands attacked.
    pub fn in_check(&self, player: Player) -> bool {
        match self.king_sq(player) {
            Some(king_sq) => self.attacked_by(player.other_player()).contains(king_sq),
            None => false,
        }
    }

    /// Places a piece on its square, evicting any displaced occupant before
    /// the newcomer's back-reference is set. Returns the piece's id.
    pub fn place(&mut self, piece: Piece) -> PieceId {
        let sq = piece.sq;
        debug_assert!(sq.is_okay());
        if self.grid[sq.index()].is_some() {
            self.remove(sq);
        }
        let id = PieceId(self.arena.len() as u8);
        self.sides[piece.player.index()].enlist(id, &piece);
        self.arena.push(Some(piece));
        self.grid[sq.index()] = Some(id);
        id
    }

    /// Removes and returns the piece standing on a square, dropping its
    /// ownership and discharging it from its side.
    pub fn remove(&mut self, sq: SQ) -> Option<Piece> {
        let id = self.grid[sq.index()].take()?;
        let piece = self.arena[id.index()].take().unwrap();
        self.sides[piece.player.index()].discharge(id, &piece);
        Some(piece)
    }

    /// Moves a live piece to a square, evicting any occupant there first.
    pub(crate) fn relocate(&mut self, id: PieceId, to: SQ) {
        if self.grid[to.index()].is_some() {
            self.remove(to);
        }
        let from = self.arena[id.index()].as_ref().unwrap().sq;
        self.grid[from.index()] = None;
        self.grid[to.index()] = Some(id);
        if let Some(piece) = self.arena[id.index()].as_mut() {
            piece.sq = to;
        }
    }

    /// Rewrites a live piece's kind in place, repartitioning its side's
    /// membership. Identity, square and moved-flag are untouched.
    pub(crate) fn transmute(&mut self, id: PieceId, kind: PieceType) {
        if let Some(piece) = self.arena[id.index()].as_mut() {
            let old = piece.kind;
            let player = piece.player;
            piece.kind = kind;
            self.sides[player.index()].repartition(id, old, kind);
        }
    }

    /// Sets a live piece's moved-flag.
    pub(crate) fn mark_moved(&mut self, id: PieceId) {
        if let Some(piece) = self.arena[id.index()].as_mut() {
            piece.moved = true;
        }
    }

    pub(crate) fn set_ghost(&mut self, player: Player, ghost: Ghost) {
        self.sides[player.index()].set_ghost(ghost);
    }

    pub(crate) fn clear_ghost(&mut self, player: Player) {
        self.sides[player.index()].clear_ghost();
    }

    pub(crate) fn void_castling_rook(&mut self, player: Player, wing: crate::core::CastleType) {
        self.sides[player.index()].void_castling_rook(wing);
    }
}

impl fmt::Display for Board {
    /// An 8x8 diagram with piece letters, from Black's home rank down.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank_idx in 0..8u8 {
            write!(f, "{} | ", (b'8' - rank_idx) as char)?;
            for file_idx in 0..8u8 {
                let sq = SQ(rank_idx << 3 | file_idx);
                let symbol = self.piece_at(sq).map_or('-', |piece| piece.character());
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  -----------------")?;
        writeln!(f, "    a b c d e f g h")
    }
}

/// The board mutation one rule performs, described square-by-square so the
/// legality filter can try it and take it back. At most two pieces move
/// (castling), at most one square is emptied (the prey's).
#[derive(Clone, Debug, Default)]
pub(crate) struct Effect {
    /// Relocations, in apply order: `(piece, from, to)`.
    pub moves: [Option<(PieceId, SQ, SQ)>; 2],
    /// The square whose occupant is removed, before any relocation.
    pub removal: Option<SQ>,
}

/// Scoped speculative application of an [`Effect`].
///
/// Construction performs the raw board mutation, side hooks bypassed. The
/// guard restores the exact prior state when dropped, whatever the exit
/// path, so a query interrupted mid-check cannot leak a half-applied move
/// into the authoritative position.
pub(crate) struct Speculation<'a> {
    board: &'a mut Board,
    moves: [Option<(PieceId, SQ, SQ)>; 2],
    removed: Option<(SQ, PieceId, Piece)>,
}

impl<'a> Speculation<'a> {
    pub(crate) fn new(board: &'a mut Board, effect: &Effect) -> Speculation<'a> {
        let removed = effect.removal.map(|sq| {
            let id = board.grid[sq.index()].take().unwrap();
            let piece = board.arena[id.index()].take().unwrap();
            (sq, id, piece)
        });
        for &(id, from, to) in effect.moves.iter().flatten() {
            board.grid[from.index()] = None;
            board.grid[to.index()] = Some(id);
            if let Some(piece) = board.arena[id.index()].as_mut() {
                piece.sq = to;
            }
        }
        Speculation {
            board,
            moves: effect.moves,
            removed,
        }
    }

    /// The board with the effect speculatively in force.
    pub(crate) fn board(&self) -> &Board {
        self.board
    }
}

impl<'a> Drop for Speculation<'a> {
    fn drop(&mut self) {
        for &(id, from, to) in self.moves.iter().rev().flatten() {
            self.board.grid[to.index()] = None;
            self.board.grid[from.index()] = Some(id);
            if let Some(piece) = self.board.arena[id.index()].as_mut() {
                piece.sq = from;
            }
        }
        if let Some((sq, id, piece)) = self.removed.take() {
            self.board.arena[id.index()] = Some(piece);
            self.board.grid[sq.index()] = Some(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PieceType;

    #[test]
    fn place_keeps_back_references() {
        let mut board = Board::empty();
        let id = board.place(Piece::new(PieceType::R, Player::White, SQ::A1));
        assert_eq!(board.piece(id).unwrap().sq, SQ::A1);
        assert_eq!(board.id_at(SQ::A1), Some(id));
        assert_eq!(board.count_piece(Player::White, PieceType::R), 1);
    }

    #[test]
    fn place_evicts_displaced_occupant() {
        let mut board = Board::empty();
        let victim = board.place(Piece::new(PieceType::N, Player::Black, SQ::C3));
        let usurper = board.place(Piece::new(PieceType::Q, Player::White, SQ::C3));
        assert!(board.piece(victim).is_none());
        assert_eq!(board.id_at(SQ::C3), Some(usurper));
        assert_eq!(board.count_piece(Player::Black, PieceType::N), 0);
        assert_eq!(board.count_all_pieces(), 1);
    }

    #[test]
    fn remove_discharges_identities() {
        let mut board = Board::empty();
        board.place(Piece::new(PieceType::R, Player::White, SQ::H1));
        assert!(board
            .side(Player::White)
            .castling_rook(crate::core::CastleType::KingSide)
            .is_some());
        board.remove(SQ::H1);
        assert!(board
            .side(Player::White)
            .castling_rook(crate::core::CastleType::KingSide)
            .is_none());
    }

    #[test]
    fn speculation_restores_exactly() {
        let mut board = Board::empty();
        let rook = board.place(Piece::new(PieceType::R, Player::White, SQ::A1));
        let pawn = board.place(Piece::new(PieceType::P, Player::Black, SQ::A7));

        let effect = Effect {
            moves: [Some((rook, SQ::A1, SQ::A7)), None],
            removal: Some(SQ::A7),
        };
        {
            let guard = Speculation::new(&mut board, &effect);
            assert_eq!(guard.board().id_at(SQ::A7), Some(rook));
            assert!(guard.board().piece(pawn).is_none());
            assert!(guard.board().id_at(SQ::A1).is_none());
        }
        assert_eq!(board.id_at(SQ::A1), Some(rook));
        assert_eq!(board.id_at(SQ::A7), Some(pawn));
        assert_eq!(board.piece(rook).unwrap().sq, SQ::A1);
        assert_eq!(board.piece(pawn).unwrap().sq, SQ::A7);
        // Side bookkeeping was bypassed and must still agree.
        assert_eq!(board.count_piece(Player::Black, PieceType::P), 1);
    }
}
