//! Compares the legal moves and the check/checkmate flags against shakmaty
//! after every ply of a few game lines.

use chessmate::chess::core::Position;
use chessmate::chess::service::{GameStatus, MoveService};
use itertools::Itertools;
use pretty_assertions::assert_eq;
use shakmaty::{CastlingMode, Chess, Position as ShakmatyPosition};

fn get_moves(game: &mut MoveService) -> Vec<String> {
    game.legal_moves()
        .unwrap()
        .iter()
        .map(|(from, to)| format!("{from}{to}"))
        .sorted()
        .collect()
}

/// Castling is not supported and promotions only produce queens, so only the
/// source and target squares are compared.
fn reference_moves(position: &Chess) -> Vec<String> {
    position
        .legal_moves()
        .iter()
        .filter(|m| !m.is_castle())
        .map(|m| m.to_uci(CastlingMode::Standard).to_string()[..4].to_string())
        .sorted()
        .dedup()
        .collect()
}

fn compare(game: &mut MoveService, position: &Chess) {
    assert_eq!(get_moves(game), reference_moves(position));
    assert_eq!(game.is_check(), position.is_check());
    assert_eq!(game.is_checkmate(), position.is_checkmate());
    assert_eq!(
        game.status().unwrap() == GameStatus::Stalemate,
        position.is_stalemate()
    );
}

fn check_line(moves: &str) {
    let mut game = MoveService::new();
    let mut position = Chess::default();
    compare(&mut game, &position);
    for notation in moves.split_whitespace() {
        let (from, to) = notation.split_at(2);
        let from = Position::try_from(from).unwrap();
        let to = Position::try_from(to).unwrap();
        assert!(game.try_move(from, to).unwrap(), "{notation} should be legal");

        let reference = position
            .legal_moves()
            .iter()
            .find(|m| {
                let uci = m.to_uci(CastlingMode::Standard).to_string();
                uci == notation || uci == format!("{notation}q")
            })
            .cloned()
            .unwrap_or_else(|| panic!("{notation} is not legal for shakmaty"));
        position.play_unchecked(&reference);

        compare(&mut game, &position);
    }
}

#[test]
fn scholars_mate() {
    check_line("e2e4 e7e5 f1c4 b8c6 d1h5 g8f6 h5f7");
}

#[test]
fn fools_mate() {
    check_line("f2f3 e7e5 g2g4 d8h4");
}

#[test]
fn en_passant() {
    check_line("e2e4 a7a6 e4e5 d7d5 e5d6 c7d6");
}

#[test]
fn promotion() {
    check_line("a2a4 b7b5 a4b5 a7a6 b5a6 c8b7 a6b7 b8c6 b7a8");
}

#[test]
fn check_and_block() {
    check_line("e2e4 d7d5 f1b5 c7c6 b5c6 b7c6");
}

#[test]
fn pins_and_discovered_attacks() {
    check_line("e2e4 e7e5 g1f3 d7d6 f1b5 c7c6 d2d4 c8g4 b5c6 b8c6 d4d5 g4f3 d1f3 c6d4 f3d1");
}

#[test]
fn king_walk() {
    check_line("e2e4 e7e5 e1e2 e8e7 e2d3 d7d5 d3c3 d5e4 c3c4 d8d4 c4b5 c8d7");
}
