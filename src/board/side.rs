//! Per-player aggregate state: which pieces are alive, partitioned by kind,
//! plus the distinguished identities the rules care about: the king, the
//! two home-corner rooks (castling rights), and the ghost marker left by a
//! pawn rush (en-passant eligibility).
//!
//! A `Side` owns nothing. It holds [`PieceId`]s into the board's arena and
//! is kept in sync by the enlist/discharge hooks the board fires on every
//! authoritative placement and removal. It is never recomputed during play;
//! a full rebuild only happens when a position is loaded from notation.

use crate::core::masks::PIECE_TYPE_CNT;
use crate::core::piece::{Piece, PieceId};
use crate::core::sq::SQ;
use crate::core::{CastleType, PieceType, Player};

/// The transient marker a pawn rush leaves on the square it vacated in the
/// middle. Capturable en passant by enemy pawns for one ply; `pawn` is the
/// rushed pawn that an en-passant capture actually removes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Ghost {
    /// The en-passant target square.
    pub sq: SQ,
    /// The pawn that rushed past it.
    pub pawn: PieceId,
}

/// One player's live pieces and derived castling/en-passant state.
#[derive(Clone, Debug)]
pub struct Side {
    player: Player,
    members: [Vec<PieceId>; PIECE_TYPE_CNT],
    king: Option<PieceId>,
    east_rook: Option<PieceId>,
    west_rook: Option<PieceId>,
    ghost: Option<Ghost>,
}

impl Side {
    pub(crate) fn new(player: Player) -> Side {
        Side {
            player,
            members: Default::default(),
            king: None,
            east_rook: None,
            west_rook: None,
            ghost: None,
        }
    }

    /// The player this side belongs to.
    #[inline]
    pub fn player(&self) -> Player {
        self.player
    }

    /// The side's king, while one is on the board.
    #[inline]
    pub fn king(&self) -> Option<PieceId> {
        self.king
    }

    /// The rook this side may still castle with on the given wing. `None`
    /// once that rook has been captured or its identity dropped by a
    /// notation load without the matching rights letter.
    #[inline]
    pub fn castling_rook(&self, wing: CastleType) -> Option<PieceId> {
        match wing {
            CastleType::KingSide => self.east_rook,
            CastleType::QueenSide => self.west_rook,
        }
    }

    /// The side's current en-passant marker, if its last move was a rush.
    #[inline]
    pub fn ghost(&self) -> Option<Ghost> {
        self.ghost
    }

    /// The side's live pieces of one kind.
    #[inline]
    pub fn members(&self, kind: PieceType) -> &[PieceId] {
        &self.members[kind.index()]
    }

    /// Iterates all the side's live pieces.
    pub fn ids(&self) -> impl Iterator<Item = PieceId> + '_ {
        self.members.iter().flatten().copied()
    }

    /// Sum of the material values of the side's live pieces.
    pub fn material(&self) -> i32 {
        crate::core::ALL_PIECE_TYPES
            .iter()
            .map(|&kind| self.members[kind.index()].len() as i32 * kind.value())
            .sum()
    }

    pub(crate) fn set_ghost(&mut self, ghost: Ghost) {
        self.ghost = Some(ghost);
    }

    pub(crate) fn clear_ghost(&mut self) {
        self.ghost = None;
    }

    pub(crate) fn void_castling_rook(&mut self, wing: CastleType) {
        match wing {
            CastleType::KingSide => self.east_rook = None,
            CastleType::QueenSide => self.west_rook = None,
        }
    }

    /// Placement hook. Registers the piece and syncs the distinguished
    /// identities: a king is always adopted; a rook only when standing on
    /// one of this player's home corners.
    pub(crate) fn enlist(&mut self, id: PieceId, piece: &Piece) {
        debug_assert_eq!(piece.player, self.player);
        self.members[piece.kind.index()].push(id);

        match piece.kind {
            PieceType::K => self.king = Some(id),
            PieceType::R => {
                // Corner detection from Black's perspective; White's corners
                // flip onto Black's.
                let home = match self.player {
                    Player::Black => piece.sq,
                    Player::White => piece.sq.flip(),
                };
                if home == SQ::A8 {
                    self.west_rook = Some(id);
                } else if home == SQ::H8 {
                    self.east_rook = Some(id);
                }
            }
            _ => {}
        }
    }

    /// Removal hook. Forgets the piece and any distinguished identity or
    /// ghost that pointed at it.
    pub(crate) fn discharge(&mut self, id: PieceId, piece: &Piece) {
        debug_assert_eq!(piece.player, self.player);
        self.members[piece.kind.index()].retain(|&member| member != id);

        if self.king == Some(id) {
            self.king = None;
        }
        if self.east_rook == Some(id) {
            self.east_rook = None;
        }
        if self.west_rook == Some(id) {
            self.west_rook = None;
        }
        if self.ghost.map(|g| g.pawn) == Some(id) {
            self.ghost = None;
        }
    }

    /// Promotion hook: moves the id between kind partitions.
    pub(crate) fn repartition(&mut self, id: PieceId, from: PieceType, to: PieceType) {
        self.members[from.index()].retain(|&member| member != id);
        self.members[to.index()].push(id);
    }
}
