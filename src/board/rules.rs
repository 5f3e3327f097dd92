//! The typed candidate transitions of the game.
//!
//! A [`Rule`] is a short-lived value built during generation to test and
//! apply exactly one transition: a plain step, a capture, a pawn rush, an
//! en-passant capture, a promotion wrapping one of the former, or a castle.
//! Each carries the acting piece, its squares, and whatever extra state the
//! transition needs (the rush's vacated middle square, the en-passant
//! prey's actual square, the promotion's chosen officer, the castle's
//! paired rook). Once applied, a rule's outcome lives on in the history and
//! the board; the value itself is discarded.

use crate::core::piece::PieceId;
use crate::core::sq::SQ;
use crate::core::vector::Vector;
use crate::core::{Officer, PieceType};

use super::history::Played;
use super::{Board, Effect};

/// The overall classification of a rule, as collaborators see it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RuleKind {
    /// A non-capturing step, the pawn rush included.
    Plain,
    /// A capture, en passant excluded.
    Capture,
    /// Either castle.
    Castle,
    /// The en-passant capture.
    EnPassant,
    /// A move onto the final rank, officer choice pending until applied.
    Promotion,
}

/// The pieces and squares of one castle: the king hops two toward the rook,
/// the rook lands on the square the king skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Castle {
    pub king: PieceId,
    pub rook: PieceId,
    pub king_from: SQ,
    pub king_to: SQ,
    pub rook_from: SQ,
    pub rook_to: SQ,
}

/// One candidate transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rule {
    /// A non-capturing step onto an empty square.
    Move {
        piece: PieceId,
        from: SQ,
        to: SQ,
    },
    /// A capture of the piece standing on the target square.
    Capture {
        piece: PieceId,
        from: SQ,
        to: SQ,
        prey: PieceId,
    },
    /// A pawn's initial two-square advance over the vacated `middle`.
    Rush {
        piece: PieceId,
        from: SQ,
        middle: SQ,
        to: SQ,
    },
    /// A pawn capture onto the enemy ghost square; the prey pawn stands one
    /// rank beyond, on `prey_sq`.
    EnPassant {
        piece: PieceId,
        from: SQ,
        to: SQ,
        prey: PieceId,
        prey_sq: SQ,
    },
    /// A pawn move or capture onto the final rank. Applying rewrites the
    /// pawn into the chosen officer; reselection cycles the choice.
    Promotion {
        base: Box<Rule>,
        officer: Officer,
    },
    /// Castling with the h-file rook.
    CastleKingside(Castle),
    /// Castling with the a-file rook.
    CastleQueenside(Castle),
}

impl Rule {
    /// The acting piece. For a castle, the king.
    pub fn piece_id(&self) -> PieceId {
        match *self {
            Rule::Move { piece, .. }
            | Rule::Capture { piece, .. }
            | Rule::Rush { piece, .. }
            | Rule::EnPassant { piece, .. } => piece,
            Rule::Promotion { ref base, .. } => base.piece_id(),
            Rule::CastleKingside(ref parts) | Rule::CastleQueenside(ref parts) => parts.king,
        }
    }

    /// The square the acting piece stands on.
    pub fn source(&self) -> SQ {
        match *self {
            Rule::Move { from, .. }
            | Rule::Capture { from, .. }
            | Rule::Rush { from, .. }
            | Rule::EnPassant { from, .. } => from,
            Rule::Promotion { ref base, .. } => base.source(),
            Rule::CastleKingside(ref parts) | Rule::CastleQueenside(ref parts) => parts.king_from,
        }
    }

    /// The square the acting piece lands on.
    pub fn target(&self) -> SQ {
        match *self {
            Rule::Move { to, .. }
            | Rule::Capture { to, .. }
            | Rule::Rush { to, .. }
            | Rule::EnPassant { to, .. } => to,
            Rule::Promotion { ref base, .. } => base.target(),
            Rule::CastleKingside(ref parts) | Rule::CastleQueenside(ref parts) => parts.king_to,
        }
    }

    /// The classification collaborators dispatch on.
    pub fn kind(&self) -> RuleKind {
        match *self {
            Rule::Move { .. } | Rule::Rush { .. } => RuleKind::Plain,
            Rule::Capture { .. } => RuleKind::Capture,
            Rule::EnPassant { .. } => RuleKind::EnPassant,
            Rule::Promotion { .. } => RuleKind::Promotion,
            Rule::CastleKingside(_) | Rule::CastleQueenside(_) => RuleKind::Castle,
        }
    }

    /// Whether applying removes an enemy piece.
    pub fn is_capture(&self) -> bool {
        match *self {
            Rule::Capture { .. } | Rule::EnPassant { .. } => true,
            Rule::Promotion { ref base, .. } => base.is_capture(),
            _ => false,
        }
    }

    /// The promotion's currently chosen officer.
    pub fn officer(&self) -> Option<Officer> {
        match *self {
            Rule::Promotion { officer, .. } => Some(officer),
            _ => None,
        }
    }

    /// Advances a promotion's officer to the next in the cycle. Anything
    /// but a promotion is left untouched.
    pub fn cycle_officer(&mut self) {
        if let Rule::Promotion { officer, .. } = self {
            *officer = officer.next();
        }
    }

    /// Whether two rules describe the same transition. The officer chosen
    /// for a promotion does not distinguish it: reselection refines one
    /// candidate, it does not create another.
    pub fn same_transition(&self, other: &Rule) -> bool {
        match (self, other) {
            (Rule::Promotion { base: a, .. }, Rule::Promotion { base: b, .. }) => {
                a.same_transition(b)
            }
            _ => self == other,
        }
    }

    /// The validity predicate: whether the transition's preconditions hold
    /// on the given board. King safety is not this rule's concern; the
    /// legality filter layers that on top.
    pub(crate) fn permitted(&self, board: &Board) -> bool {
        match *self {
            Rule::Move { piece, from, to } => {
                standing(board, piece, from) && !board.occupied(to)
            }
            Rule::Capture {
                piece,
                from,
                to,
                prey,
            } => {
                standing(board, piece, from)
                    && standing(board, prey, to)
                    && hostile(board, piece, prey)
            }
            Rule::Rush {
                piece,
                from,
                middle,
                to,
            } => {
                standing(board, piece, from)
                    && board.piece(piece).map_or(false, |p| !p.moved)
                    && !board.occupied(middle)
                    && !board.occupied(to)
            }
            Rule::EnPassant {
                piece,
                from,
                to,
                prey,
                ..
            } => {
                standing(board, piece, from)
                    && board.piece(piece).map_or(false, |p| {
                        board
                            .side(p.player.other_player())
                            .ghost()
                            .map_or(false, |ghost| ghost.sq == to && ghost.pawn == prey)
                    })
            }
            Rule::Promotion { ref base, .. } => {
                base.permitted(board)
                    && board.piece(base.piece_id()).map_or(false, |p| {
                        p.kind == PieceType::P && base.target().on_final_rank(p.player)
                    })
            }
            Rule::CastleKingside(ref parts) | Rule::CastleQueenside(ref parts) => {
                castle_permitted(board, parts)
            }
        }
    }

    /// The board mutation the rule performs, in a form the legality filter
    /// can speculatively apply and revert.
    pub(crate) fn effect(&self) -> Effect {
        match *self {
            Rule::Move { piece, from, to } | Rule::Rush {
                piece, from, to, ..
            } => Effect {
                moves: [Some((piece, from, to)), None],
                removal: None,
            },
            Rule::Capture {
                piece, from, to, ..
            } => Effect {
                moves: [Some((piece, from, to)), None],
                removal: Some(to),
            },
            Rule::EnPassant {
                piece,
                from,
                to,
                prey_sq,
                ..
            } => Effect {
                moves: [Some((piece, from, to)), None],
                removal: Some(prey_sq),
            },
            Rule::Promotion { ref base, .. } => base.effect(),
            Rule::CastleKingside(ref parts) | Rule::CastleQueenside(ref parts) => Effect {
                moves: [
                    Some((parts.king, parts.king_from, parts.king_to)),
                    Some((parts.rook, parts.rook_from, parts.rook_to)),
                ],
                removal: None,
            },
        }
    }

    /// The history record of the transition. Read before applying, while
    /// the mover still has its pre-move kind.
    pub(crate) fn record(&self, board: &Board) -> Played {
        let piece = board.piece(self.piece_id()).unwrap();
        Played {
            piece: piece.kind,
            player: piece.player,
            from: self.source(),
            to: self.target(),
            capture: self.is_capture(),
        }
    }

    /// Applies the transition to the authoritative board, side hooks live.
    pub(crate) fn apply(&self, board: &mut Board) {
        match *self {
            Rule::Move { piece, to, .. } | Rule::Capture { piece, to, .. } => {
                board.relocate(piece, to);
                board.mark_moved(piece);
            }
            Rule::Rush {
                piece, middle, to, ..
            } => {
                let player = board.piece(piece).unwrap().player;
                board.relocate(piece, to);
                board.mark_moved(piece);
                board.set_ghost(
                    player,
                    super::side::Ghost {
                        sq: middle,
                        pawn: piece,
                    },
                );
            }
            Rule::EnPassant {
                piece, to, prey_sq, ..
            } => {
                board.remove(prey_sq);
                board.relocate(piece, to);
                board.mark_moved(piece);
            }
            Rule::Promotion { ref base, officer } => {
                base.apply(board);
                board.transmute(base.piece_id(), officer.piece_type());
            }
            Rule::CastleKingside(ref parts) | Rule::CastleQueenside(ref parts) => {
                board.relocate(parts.king, parts.king_to);
                board.relocate(parts.rook, parts.rook_to);
                board.mark_moved(parts.king);
                board.mark_moved(parts.rook);
            }
        }
    }
}

/// Whether the id is alive and standing where the rule believes it stands.
fn standing(board: &Board, id: PieceId, sq: SQ) -> bool {
    board.piece(id).map_or(false, |piece| piece.sq == sq)
}

/// Whether `prey` belongs to the other player than `piece`.
fn hostile(board: &Board, piece: PieceId, prey: PieceId) -> bool {
    match (board.piece(piece), board.piece(prey)) {
        (Some(a), Some(b)) => a.player != b.player,
        _ => false,
    }
}

fn castle_permitted(board: &Board, parts: &Castle) -> bool {
    let king = match board.piece(parts.king) {
        Some(piece) => piece,
        None => return false,
    };
    let rook = match board.piece(parts.rook) {
        Some(piece) => piece,
        None => return false,
    };
    if king.moved
        || rook.moved
        || king.sq != parts.king_from
        || rook.sq != parts.rook_from
        || parts.king_from.rank_idx() != parts.rook_from.rank_idx()
    {
        return false;
    }

    let towards = (parts.rook_from.file_idx() as i8 - parts.king_from.file_idx() as i8).signum();
    if towards == 0 {
        return false;
    }
    let step = Vector::new(towards, 0);

    // Every square strictly between king and rook must be empty.
    let mut walk = parts.king_from;
    loop {
        walk = match walk.checked_add(step) {
            Ok(sq) => sq,
            Err(_) => return false,
        };
        if walk == parts.rook_from {
            break;
        }
        if board.occupied(walk) {
            return false;
        }
    }

    // The king may not castle out of, through, or into attack.
    let foes = board.attacked_by(king.player.other_player());
    let mut crossing = parts.king_from;
    loop {
        if foes.contains(crossing) {
            return false;
        }
        if crossing == parts.king_to {
            break;
        }
        crossing = match crossing.checked_add(step) {
            Ok(sq) => sq,
            Err(_) => return false,
        };
    }

    true
}
