//! Geometric candidate generation and the king-safety filter.
//!
//! Generation is two walks parameterized by a kind's movement descriptor:
//! melee kinds test one step per vector, ranged kinds walk each line over
//! empty squares and then test one capture. Pawns and kings add their
//! special transitions on top. The output is the raw candidate set; callers
//! wanting *legal* moves go through [`legal`], which speculatively applies
//! each candidate and keeps it only if the mover's king ends up outside the
//! opponent's attack union. The speculation is reverted before the next
//! candidate is looked at, whatever happens in between.

use crate::core::catalog::{descriptor, MotionKind};
use crate::core::piece::PieceId;
use crate::core::sq::SQ;
use crate::core::square_set::SquareSet;
use crate::core::vector::Vector;
use crate::core::{CastleType, Officer, PieceType, Player};

use super::rules::{Castle, Rule};
use super::{Board, Speculation};

/// Every geometrically possible transition of the piece, unfiltered for
/// king safety. Off-board steps are suppressed candidate-locally; they
/// exclude the candidate and nothing else.
pub(crate) fn candidates(board: &Board, id: PieceId) -> Vec<Rule> {
    let (sq, player, kind) = match board.piece(id) {
        Some(piece) => (piece.sq, piece.player, piece.kind),
        None => return Vec::new(),
    };
    let desc = descriptor(kind);
    let mut found: Vec<Rule> = Vec::new();

    // A pawn step onto its final rank is re-specialized into a promotion,
    // wrapping the underlying transition.
    let finalize = |rule: Rule, to: SQ| -> Rule {
        if kind == PieceType::P && to.on_final_rank(player) {
            Rule::Promotion {
                base: Box::new(rule),
                officer: Officer::Q,
            }
        } else {
            rule
        }
    };

    match desc.motion {
        MotionKind::Melee => {
            for &v in desc.moves.iter() {
                if let Ok(to) = sq.checked_add(v.mirror(player)) {
                    if !board.occupied(to) {
                        found.push(finalize(
                            Rule::Move {
                                piece: id,
                                from: sq,
                                to,
                            },
                            to,
                        ));
                    }
                }
            }
            for &v in desc.captures.iter() {
                if let Ok(to) = sq.checked_add(v.mirror(player)) {
                    if let Some(prey) = board.id_at(to) {
                        if board.piece(prey).map_or(false, |p| p.player != player) {
                            found.push(finalize(
                                Rule::Capture {
                                    piece: id,
                                    from: sq,
                                    to,
                                    prey,
                                },
                                to,
                            ));
                        }
                    } else if kind == PieceType::P {
                        // An empty diagonal may still hold the enemy ghost.
                        if let Some(ghost) = board.side(player.other_player()).ghost() {
                            if ghost.sq == to {
                                if let Some(prey) = board.piece(ghost.pawn) {
                                    found.push(Rule::EnPassant {
                                        piece: id,
                                        from: sq,
                                        to,
                                        prey: ghost.pawn,
                                        prey_sq: prey.sq,
                                    });
                                }
                            }
                        }
                    }
                }
            }
        }
        MotionKind::Ranged => {
            for &line in desc.moves.iter() {
                let dir = line.mirror(player);
                let mut walk = sq;
                loop {
                    walk = match walk.checked_add(dir) {
                        Ok(next) => next,
                        Err(_) => break,
                    };
                    match board.id_at(walk) {
                        None => found.push(Rule::Move {
                            piece: id,
                            from: sq,
                            to: walk,
                        }),
                        Some(prey) => {
                            if board.piece(prey).map_or(false, |p| p.player != player) {
                                found.push(Rule::Capture {
                                    piece: id,
                                    from: sq,
                                    to: walk,
                                    prey,
                                });
                            }
                            break;
                        }
                    }
                }
            }
        }
    }

    match kind {
        PieceType::P => {
            // The rush leaps its special vector, vacating the single step
            // in the middle.
            for &special in desc.specials.iter() {
                let leap = special.mirror(player);
                let step = Vector::new(leap.file.signum(), leap.rank.signum());
                if let (Ok(middle), Ok(to)) = (sq.checked_add(step), sq.checked_add(leap)) {
                    found.push(Rule::Rush {
                        piece: id,
                        from: sq,
                        middle,
                        to,
                    });
                }
            }
        }
        PieceType::K => {
            // Each castle hop pairs with the side's retained rook on that
            // wing; no rook identity, no candidate.
            for &hop in desc.specials.iter() {
                let wing = if hop.file > 0 {
                    CastleType::KingSide
                } else {
                    CastleType::QueenSide
                };
                let rook = match board.side(player).castling_rook(wing) {
                    Some(rook) => rook,
                    None => continue,
                };
                let rook_from = match board.piece(rook) {
                    Some(piece) => piece.sq,
                    None => continue,
                };
                let dir = Vector::new(hop.file.signum(), 0);
                if let (Ok(rook_to), Ok(king_to)) = (sq.checked_add(dir), sq.checked_add(hop)) {
                    let parts = Castle {
                        king: id,
                        rook,
                        king_from: sq,
                        king_to,
                        rook_from,
                        rook_to,
                    };
                    found.push(match wing {
                        CastleType::KingSide => Rule::CastleKingside(parts),
                        CastleType::QueenSide => Rule::CastleQueenside(parts),
                    });
                }
            }
        }
        _ => {}
    }

    found.retain(|rule| rule.permitted(board));
    found
}

/// The union of squares the player's pieces bear on: each square they could
/// capture toward, whether or not anything stands there. Defended friendly
/// squares are included; a king may not step onto one.
pub(crate) fn attacks(board: &Board, player: Player) -> SquareSet {
    let mut set = SquareSet::EMPTY;
    for id in board.side(player).ids() {
        // A speculatively removed piece keeps its membership but has no
        // arena slot; it attacks nothing.
        let (sq, kind) = match board.piece(id) {
            Some(piece) => (piece.sq, piece.kind),
            None => continue,
        };
        let desc = descriptor(kind);
        match desc.motion {
            MotionKind::Melee => {
                for &v in desc.captures.iter() {
                    if let Ok(to) = sq.checked_add(v.mirror(player)) {
                        set.insert(to);
                    }
                }
            }
            MotionKind::Ranged => {
                for &line in desc.captures.iter() {
                    let dir = line.mirror(player);
                    let mut walk = sq;
                    loop {
                        walk = match walk.checked_add(dir) {
                            Ok(next) => next,
                            Err(_) => break,
                        };
                        set.insert(walk);
                        if board.occupied(walk) {
                            break;
                        }
                    }
                }
            }
        }
    }
    set
}

/// The piece's legal transitions: its candidates, minus any that would
/// leave its own king attacked.
pub(crate) fn legal(board: &mut Board, id: PieceId) -> Vec<Rule> {
    let found = candidates(board, id);
    let mut kept = Vec::with_capacity(found.len());
    for rule in found {
        if king_safe_after(board, &rule) {
            kept.push(rule);
        }
    }
    kept
}

/// Tries the rule out and reports whether the mover's king survives it
/// unattacked. The board is returned to its exact prior state before this
/// function returns, on every path.
fn king_safe_after(board: &mut Board, rule: &Rule) -> bool {
    let us = match board.piece(rule.piece_id()) {
        Some(piece) => piece.player,
        None => return false,
    };
    let them = us.other_player();
    let effect = rule.effect();

    let guard = Speculation::new(board, &effect);
    match guard.board().king_sq(us) {
        Some(king_sq) => !attacks(guard.board(), them).contains(king_sq),
        None => true,
    }
}
