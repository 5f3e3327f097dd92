extern crate caissa;

use caissa::{CastleType, Game, PieceType, Player, SQ};

#[test]
fn start_position_layout() {
    let game = Game::default();
    let board = game.board();

    assert_eq!(board.count_all_pieces(), 32);
    for &player in &[Player::White, Player::Black] {
        assert_eq!(board.count_piece(player, PieceType::P), 8);
        assert_eq!(board.count_piece(player, PieceType::N), 2);
        assert_eq!(board.count_piece(player, PieceType::B), 2);
        assert_eq!(board.count_piece(player, PieceType::R), 2);
        assert_eq!(board.count_piece(player, PieceType::Q), 1);
        assert_eq!(board.count_piece(player, PieceType::K), 1);
    }

    assert_eq!(board.piece_at(SQ::E1).unwrap().kind, PieceType::K);
    assert_eq!(board.piece_at(SQ::D8).unwrap().kind, PieceType::Q);
    assert_eq!(board.piece_at(SQ::E8).unwrap().player, Player::Black);
    assert!(board.piece_at(SQ::E4).is_none());
}

#[test]
fn back_references_agree_everywhere() {
    let game = Game::default();
    let board = game.board();
    for idx in 0..64u8 {
        let sq = SQ(idx);
        if let Some(piece) = board.piece_at(sq) {
            assert_eq!(piece.sq, sq);
        }
    }
}

#[test]
fn side_identities_synced_on_setup() {
    let game = Game::default();
    let board = game.board();

    assert_eq!(board.king_sq(Player::White), Some(SQ::E1));
    assert_eq!(board.king_sq(Player::Black), Some(SQ::E8));

    let white_east = board
        .side(Player::White)
        .castling_rook(CastleType::KingSide)
        .unwrap();
    let white_west = board
        .side(Player::White)
        .castling_rook(CastleType::QueenSide)
        .unwrap();
    assert_eq!(board.piece(white_east).unwrap().sq, SQ::H1);
    assert_eq!(board.piece(white_west).unwrap().sq, SQ::A1);

    let black_east = board
        .side(Player::Black)
        .castling_rook(CastleType::KingSide)
        .unwrap();
    assert_eq!(board.piece(black_east).unwrap().sq, SQ::H8);

    assert!(board.side(Player::White).ghost().is_none());
    assert!(board.side(Player::Black).ghost().is_none());
}

#[test]
fn material_accounting() {
    let game = Game::default();
    assert_eq!(game.board().side(Player::White).material(), 39);
    assert_eq!(game.board().side(Player::Black).material(), 39);

    let game = Game::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
    assert_eq!(game.board().side(Player::White).material(), 1);
    assert_eq!(game.board().side(Player::Black).material(), 0);
}

#[test]
fn display_diagram() {
    let game = Game::default();
    let shown = game.to_string();
    assert!(shown.contains("8 | r n b q k b n r"));
    assert!(shown.contains("1 | R N B Q K B N R"));
    assert!(shown.contains("a b c d e f g h"));
}

#[test]
fn nobody_starts_in_check() {
    let game = Game::default();
    assert!(!game.board().in_check(Player::White));
    assert!(!game.board().in_check(Player::Black));

    let game = Game::from_fen("4k3/8/8/8/4r3/8/8/4K3 w - - 0 1").unwrap();
    assert!(game.board().in_check(Player::White));
    assert!(!game.board().in_check(Player::Black));
}
