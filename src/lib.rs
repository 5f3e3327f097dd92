//! A chess rules engine.
//!
//! This crate owns the authoritative state of a game of chess: it generates
//! every geometrically possible move for a piece, filters those down to the
//! legal ones (no move may leave the mover's own king attacked), applies
//! moves including the special rules (castling, en passant, promotion, the
//! pawn's initial rush), and reads and writes whole positions as standard
//! six-field notation. It renders nothing and decides nothing: a front end
//! feeds it activated squares and promotion choices, and consumes legal-move
//! sets, board contents, and notation strings.
//!
//! # Usage
//!
//! A [`Game`] starts from the standard position and is driven square by
//! square:
//!
//! ```rust
//! use caissa::{Game, SQ};
//!
//! let mut game = Game::default();
//!
//! let openings = game.legal_moves(SQ::E2);
//! assert_eq!(openings.len(), 2);
//!
//! game.apply(&openings[0]).unwrap();
//! ```
//!
//! Every reachable position survives a notation round trip:
//!
//! ```rust
//! use caissa::{Game, START_FEN};
//!
//! let game = Game::from_fen(START_FEN).unwrap();
//! assert_eq!(game.fen(), START_FEN);
//! ```
//!
//! Each legal move is a [`Rule`]: a typed transition tagged as a plain
//! step, capture, castle, en-passant capture, or pending promotion, which
//! is how a front end knows what to highlight and when to offer the
//! officer choice.
//!
//! # Shape of the engine
//!
//! The [`Board`] owns every piece in an arena and maps each square to at
//! most one of them; per-player [`Side`] aggregates track the live pieces
//! by kind along with the identities castling and en passant depend on.
//! Movement geometry is data ([`core::catalog`]); generation is two walks
//! parameterized by it. Legality is decided by speculatively applying a
//! candidate under a scope guard that always restores the position. The
//! engine is single-threaded, synchronous, and deterministic throughout.
//!
//! [`Side`]: board/side/struct.Side.html

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;

pub mod board;
pub mod core;
pub mod game;

pub use crate::board::fen::{FenBuildError, ALL_FENS, START_FEN};
pub use crate::board::history::History;
pub use crate::board::rules::{Rule, RuleKind};
pub use crate::board::side::Side;
pub use crate::board::Board;
pub use crate::core::piece::{Piece, PieceId};
pub use crate::core::sq::{BadNotation, OutOfBounds, SQ};
pub use crate::core::square_set::SquareSet;
pub use crate::core::vector::Vector;
pub use crate::core::{CastleType, File, Officer, PieceType, Player, Rank};
pub use crate::game::{Game, IllegalMove};
