//! The position notation codec.
//!
//! A position travels as the standard six space-separated fields: board
//! layout, active color, castling rights, en-passant target, half-move
//! clock, full-move number. Decoding rebuilds a whole [`Game`]: board,
//! side aggregates, ghost marker, and a seeded history that makes the turn
//! and clocks come out right. Encoding is the exact inverse, with the
//! castling letters derived live from the king and rook identities and
//! their moved-flags rather than stored anywhere.
//!
//! Decoding validates the grammar, not the chess: a position with two
//! kings of one color parses fine.
//!
//! [`Game`]: ../../game/struct.Game.html

use crate::core::piece::Piece;
use crate::core::sq::SQ;
use crate::core::vector::Vector;
use crate::core::{CastleType, PieceType, Player, ALL_PLAYERS};
use crate::game::Game;

use super::castle_rights::Castling;
use super::history::History;
use super::side::Ghost;
use super::Board;

use std::num;

use thiserror::Error;

/// The standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A spread of positions every one of which must survive a decode/encode
/// round trip unchanged.
pub static ALL_FENS: [&str; 10] = [
    START_FEN,
    "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
    "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2",
    "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
    "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
    "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1",
    "r3k2r/8/8/8/8/8/8/R3K2R w Kq - 4 3",
    "8/2Q1pk2/nbpppppp/8/8/2K4N/PPPPPPPP/BBB2BBB w - - 0 10",
    "4k3/8/8/8/8/8/4P3/4K3 w - - 7 30",
    "8/5P2/8/8/8/3k4/8/4K3 w - - 0 60",
];

/// Represents possible errors encountered while building a `Game` from a
/// fen string.
#[derive(Error, Debug)]
pub enum FenBuildError {
    #[error("invalid number of fen sections: {sections}, expected 6")]
    NotEnoughSections { sections: usize },
    #[error("invalid number of ranks: {ranks}, expected 8")]
    IncorrectRankAmounts { ranks: usize },
    #[error("rank {rank} spans more than 8 files")]
    OverfilledRank { rank: usize },
    #[error("rank {rank} spans fewer than 8 files")]
    UnderfilledRank { rank: usize },
    #[error("invalid turn: {turn}, expected 'w' or 'b'")]
    UnrecognizedTurn { turn: String },
    #[error("unrecognized castling letter: {letter}")]
    UnrecognizedCastle { letter: char },
    #[error("unreadable en-passant square: {ep}")]
    EPSquareUnreadable { ep: String },
    #[error("unrecognized piece: {piece}")]
    UnrecognizedPiece { piece: char },
    #[error("unreadable clock field")]
    UnreadableClock(#[from] num::ParseIntError),
}

/// Builds a game from the six fields of position notation.
pub(crate) fn decode(fen: &str) -> Result<Game, FenBuildError> {
    let sections: Vec<&str> = fen.split_whitespace().collect();
    if sections.len() != 6 {
        return Err(FenBuildError::NotEnoughSections {
            sections: sections.len(),
        });
    }

    let rows: Vec<&str> = sections[0].split('/').collect();
    if rows.len() != 8 {
        return Err(FenBuildError::IncorrectRankAmounts { ranks: rows.len() });
    }

    // Board layout: the notation scans ranks the same way square indices
    // run, so placement is a single linear pass.
    let mut board = Board::empty();
    for (rank_idx, row) in rows.iter().enumerate() {
        let mut file_idx: usize = 0;
        for symbol in row.chars() {
            if let Some(step) = symbol.to_digit(10) {
                file_idx += step as usize;
                continue;
            }
            if file_idx >= 8 {
                return Err(FenBuildError::OverfilledRank { rank: rank_idx });
            }
            let kind = PieceType::from_char_lower(symbol.to_ascii_lowercase())
                .ok_or(FenBuildError::UnrecognizedPiece { piece: symbol })?;
            let player = if symbol.is_ascii_uppercase() {
                Player::White
            } else {
                Player::Black
            };
            let sq = SQ((rank_idx as u8) << 3 | file_idx as u8);
            let mut piece = Piece::new(kind, player, sq);
            // Nothing in the notation records moved-flags, but a pawn off
            // its home rank has necessarily advanced; a fresh flag would
            // wrongly re-arm its rush.
            if kind == PieceType::P {
                let home = match player {
                    Player::White => 6,
                    Player::Black => 1,
                };
                piece.moved = sq.rank_idx() != home;
            }
            board.place(piece);
            file_idx += 1;
        }
        if file_idx > 8 {
            return Err(FenBuildError::OverfilledRank { rank: rank_idx });
        }
        if file_idx < 8 {
            return Err(FenBuildError::UnderfilledRank { rank: rank_idx });
        }
    }

    // Active color.
    let turn = match sections[1] {
        "w" => Player::White,
        "b" => Player::Black,
        other => {
            return Err(FenBuildError::UnrecognizedTurn {
                turn: other.to_string(),
            });
        }
    };

    // Castling rights gate which rook identities survive the load; an
    // absent letter permanently disables that castle.
    let mut rights = Castling::empty();
    if sections[2] != "-" {
        for letter in sections[2].chars() {
            if !rights.add_letter(letter) {
                return Err(FenBuildError::UnrecognizedCastle { letter });
            }
        }
    }
    for &player in ALL_PLAYERS.iter() {
        for &wing in &[CastleType::KingSide, CastleType::QueenSide] {
            if !rights.allows(player, wing) {
                board.void_castling_rook(player, wing);
            }
        }
    }

    // En-passant target: the ghost belongs to the side that just moved.
    if sections[3] != "-" {
        let ghost_sq = SQ::from_notation(sections[3]).map_err(|_| {
            FenBuildError::EPSquareUnreadable {
                ep: sections[3].to_string(),
            }
        })?;
        let owner = turn.other_player();
        if let Ok(pawn_sq) = ghost_sq.checked_add(Vector::S.mirror(owner)) {
            if let Some(pawn) = board.id_at(pawn_sq) {
                let is_owned_pawn = board
                    .piece(pawn)
                    .map_or(false, |p| p.kind == PieceType::P && p.player == owner);
                if is_owned_pawn {
                    board.set_ghost(
                        owner,
                        Ghost {
                            sq: ghost_sq,
                            pawn,
                        },
                    );
                }
            }
        }
    }

    // Clocks seed the history's synthetic length; they are stored nowhere
    // else.
    let half: u16 = sections[4].parse()?;
    let full: u16 = sections[5].parse()?;
    let plies = full.saturating_sub(1) as usize * 2 + (turn == Player::Black) as usize;
    let mut history = History::new();
    history.seed(plies, half);

    Ok(Game::assemble(board, history))
}

/// Renders a game back into position notation.
pub(crate) fn encode(game: &Game) -> String {
    let board = game.board();

    let mut layout = String::new();
    let mut blanks: u32 = 0;
    for idx in 0..64u8 {
        if idx != 0 && idx % 8 == 0 {
            flush_blanks(&mut layout, &mut blanks);
            layout.push('/');
        }
        match board.piece_at(SQ(idx)) {
            Some(piece) => {
                flush_blanks(&mut layout, &mut blanks);
                layout.push(piece.character());
            }
            None => blanks += 1,
        }
    }
    flush_blanks(&mut layout, &mut blanks);

    let turn = game.turn();

    let mut rights = Castling::empty();
    for &player in ALL_PLAYERS.iter() {
        let side = board.side(player);
        let king_unmoved = side
            .king()
            .and_then(|id| board.piece(id))
            .map_or(false, |king| !king.moved);
        if !king_unmoved {
            continue;
        }
        for &wing in &[CastleType::KingSide, CastleType::QueenSide] {
            let rook_unmoved = side
                .castling_rook(wing)
                .and_then(|id| board.piece(id))
                .map_or(false, |rook| !rook.moved);
            if rook_unmoved {
                rights.grant(player, wing);
            }
        }
    }

    let en_passant = board
        .side(turn.other_player())
        .ghost()
        .map_or_else(|| "-".to_owned(), |ghost| ghost.sq.to_string());

    format!(
        "{} {} {} {} {} {}",
        layout,
        if turn == Player::White { "w" } else { "b" },
        rights.fen_string(),
        en_passant,
        game.history().half_clock(),
        game.history().full_clock(),
    )
}

fn flush_blanks(layout: &mut String, blanks: &mut u32) {
    if *blanks > 0 {
        layout.push(std::char::from_digit(*blanks, 10).unwrap());
        *blanks = 0;
    }
}
