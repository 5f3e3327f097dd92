extern crate caissa;
extern crate rand;

use caissa::board::history::Entry;
use caissa::{Game, PieceType, Player, Rule, RuleKind, SQ};

fn play(game: &mut Game, from: SQ, to: SQ) {
    let rule = game
        .legal_moves(from)
        .into_iter()
        .find(|rule| rule.target() == to)
        .unwrap_or_else(|| panic!("no move {} to {}", from, to));
    game.apply(&rule).unwrap();
}

#[test]
fn applying_a_rush_updates_everything() {
    let mut game = Game::default();
    play(&mut game, SQ::E2, SQ::E4);

    assert!(game.board().piece_at(SQ::E2).is_none());
    assert_eq!(game.board().piece_at(SQ::E4).unwrap().kind, PieceType::P);
    assert!(game.board().piece_at(SQ::E4).unwrap().moved);
    assert_eq!(game.turn(), Player::Black);
    assert_eq!(game.history().len(), 1);
    assert_eq!(
        game.fen(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
    );
}

#[test]
fn apply_rejects_stale_and_off_turn_rules() {
    let mut game = Game::default();
    let rush = game
        .legal_moves(SQ::E2)
        .into_iter()
        .find(|rule| rule.target() == SQ::E4)
        .unwrap();

    // A Black rule while White is on turn.
    let black_reply = game.legal_moves(SQ::E7).into_iter().next().unwrap();
    assert!(game.apply(&black_reply).is_err());

    game.apply(&rush).unwrap();

    // The same rule again, now stale: the pawn is no longer on e2.
    let stale = game.apply(&rush);
    assert!(stale.is_err());
    assert_eq!(
        game.fen(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
    );
}

#[test]
fn en_passant_removes_the_rushed_pawn() {
    // 1.e4 a6 2.e5 d5 3.exd6: the d5 pawn disappears from d5, not d6.
    let mut game = Game::default();
    play(&mut game, SQ::E2, SQ::E4);
    play(&mut game, SQ::A7, SQ::A6);
    play(&mut game, SQ::E4, SQ::E5);
    play(&mut game, SQ::D7, SQ::D5);

    let en_passant = game
        .legal_moves(SQ::E5)
        .into_iter()
        .find(|rule| rule.kind() == RuleKind::EnPassant)
        .unwrap();
    game.apply(&en_passant).unwrap();

    assert!(game.board().piece_at(SQ::D5).is_none());
    assert_eq!(game.board().piece_at(SQ::D6).unwrap().player, Player::White);
    assert_eq!(game.board().count_piece(Player::Black, PieceType::P), 7);

    match game.history().last().unwrap() {
        Entry::Played(played) => {
            assert!(played.capture);
            assert_eq!(played.to, SQ::D6);
        }
        other => panic!("expected a played entry, got {:?}", other),
    }
}

#[test]
fn kingside_castle_moves_king_and_rook_together() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let castle = game
        .legal_moves(SQ::E1)
        .into_iter()
        .find(|rule| matches!(rule, Rule::CastleKingside(_)))
        .unwrap();
    game.apply(&castle).unwrap();

    assert_eq!(game.board().piece_at(SQ::G1).unwrap().kind, PieceType::K);
    assert_eq!(game.board().piece_at(SQ::F1).unwrap().kind, PieceType::R);
    assert!(game.board().piece_at(SQ::E1).is_none());
    assert!(game.board().piece_at(SQ::H1).is_none());
    assert_eq!(game.fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 1 1");
}

#[test]
fn queenside_castle_moves_king_and_rook_together() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();
    let castle = game
        .legal_moves(SQ::E8)
        .into_iter()
        .find(|rule| matches!(rule, Rule::CastleQueenside(_)))
        .unwrap();
    game.apply(&castle).unwrap();

    assert_eq!(game.board().piece_at(SQ::C8).unwrap().kind, PieceType::K);
    assert_eq!(game.board().piece_at(SQ::D8).unwrap().kind, PieceType::R);
    assert_eq!(game.fen(), "2kr3r/8/8/8/8/8/8/R3K2R w KQ - 1 2");
}

#[test]
fn promotion_rewrites_the_pawn_in_place() {
    let mut game = Game::from_fen("8/5P2/8/8/8/3k4/8/4K3 w - - 0 60").unwrap();
    let promotion = game
        .legal_moves(SQ::F7)
        .into_iter()
        .find(|rule| rule.kind() == RuleKind::Promotion)
        .unwrap();
    game.apply(&promotion).unwrap();

    let officer = game.board().piece_at(SQ::F8).unwrap();
    assert_eq!(officer.kind, PieceType::Q);
    assert_eq!(officer.player, Player::White);
    assert_eq!(game.board().count_piece(Player::White, PieceType::P), 0);
    assert_eq!(game.fen(), "5Q2/8/8/8/8/3k4/8/4K3 b - - 0 60");
}

#[test]
fn promotion_honors_the_cycled_officer() {
    let mut game = Game::from_fen("8/5P2/8/8/8/3k4/8/4K3 w - - 0 60").unwrap();
    let mut promotion = game
        .legal_moves(SQ::F7)
        .into_iter()
        .find(|rule| rule.kind() == RuleKind::Promotion)
        .unwrap();
    promotion.cycle_officer();
    game.apply(&promotion).unwrap();

    assert_eq!(game.board().piece_at(SQ::F8).unwrap().kind, PieceType::R);
    assert_eq!(game.board().count_piece(Player::White, PieceType::R), 1);
}

#[test]
fn capturing_promotion_takes_and_transforms() {
    let mut game = Game::from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let promotions: Vec<Rule> = game
        .legal_moves(SQ::A7)
        .into_iter()
        .filter(|rule| rule.kind() == RuleKind::Promotion)
        .collect();
    assert_eq!(promotions.len(), 2);

    let taking = promotions
        .into_iter()
        .find(|rule| rule.target() == SQ::B8)
        .unwrap();
    assert!(taking.is_capture());
    game.apply(&taking).unwrap();

    assert_eq!(game.board().piece_at(SQ::B8).unwrap().kind, PieceType::Q);
    assert_eq!(game.board().count_piece(Player::Black, PieceType::N), 0);
}

/// Collect every legal move of the side on turn.
fn all_moves(game: &mut Game) -> Vec<Rule> {
    let mut moves = Vec::new();
    for idx in 0..64u8 {
        let sq = SQ(idx);
        let on_turn = game
            .board()
            .piece_at(sq)
            .map_or(false, |piece| piece.player == game.turn());
        if on_turn {
            moves.extend(game.legal_moves(sq));
        }
    }
    moves
}

#[test]
fn random_playout_leaves_no_residue() {
    for _trial in 0..3 {
        let mut game = Game::default();
        for _ply in 0..60 {
            let moves = all_moves(&mut game);
            if moves.is_empty() {
                break;
            }
            let pick = &moves[rand::random::<usize>() % moves.len()];
            game.apply(pick).unwrap();

            // The position must survive a notation round trip at every ply:
            // the legality filter's speculations may leave nothing behind.
            let fen = game.fen();
            assert_eq!(Game::from_fen(&fen).unwrap().fen(), fen);
        }
    }
}
