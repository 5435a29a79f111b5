use chessmate::chess::context::GameContext;
use chessmate::chess::core::{Piece, PieceKind, Player, Position};
use chessmate::chess::evaluator;
use chessmate::chess::service::{GameStatus, MoveService};
use chessmate::chess::state::EnPassant;
use pretty_assertions::assert_eq;

fn square(notation: &str) -> Position {
    Position::try_from(notation)
        .unwrap_or_else(|_| panic!("we are parsing valid squares: {notation}"))
}

fn setup(pieces: &[(Player, PieceKind, &str)], side_to_move: Player) -> GameContext {
    let pieces: Vec<_> = pieces
        .iter()
        .map(|&(owner, kind, at)| (Piece::new(owner, kind, square(at)), square(at)))
        .collect();
    GameContext::custom(&pieces, side_to_move).expect("valid custom layout")
}

fn try_move(game: &mut MoveService, notation: &str) -> bool {
    let (from, to) = notation.split_at(2);
    game.try_move(square(from), square(to)).unwrap()
}

fn play(game: &mut MoveService, moves: &str) {
    for notation in moves.split_whitespace() {
        assert!(try_move(game, notation), "{notation} should be legal");
    }
}

#[test]
fn notation_round_trip() {
    for position in Position::all() {
        assert_eq!(
            Position::try_from(position.to_string().as_str()).unwrap(),
            position
        );
    }
    assert_eq!(square("e2"), Position::new(6, 4).unwrap());
    assert_eq!(square("a8"), Position::new(0, 0).unwrap());
    assert_eq!(square("h1"), Position::new(7, 7).unwrap());
    assert_eq!(Position::new(4, 4).unwrap().to_string(), "e4");
}

#[test]
fn malformed_notation() {
    for notation in ["", "e", "e22", "i1", "a9", "a0", "E2", "22"] {
        assert!(
            Position::try_from(notation).is_err(),
            "{notation} should be rejected"
        );
    }
    assert!(Position::new(8, 0).is_err());
    assert!(Position::try_from((-1, 3)).is_err());
    assert!(Position::try_from((3, 8)).is_err());
}

#[test]
fn king_pawn_opening() {
    let mut game = MoveService::new();
    assert!(game.try_move(Position::new(6, 4).unwrap(), Position::new(4, 4).unwrap()).unwrap());
    assert_eq!(game.get_piece_at(Position::new(6, 4).unwrap()), None);
    let pawn = game.get_piece_at(Position::new(4, 4).unwrap()).unwrap();
    assert_eq!((pawn.owner, pawn.kind), (Player::White, PieceKind::Pawn));
    assert_eq!(game.current_player(), Player::Black);
    assert_eq!(game.current_player().to_string(), "Black");
    assert_eq!(game.move_log(), &["White Pawn from e2 to e4".to_string()]);
}

#[test]
fn no_double_step_after_first_move() {
    let mut game = MoveService::new();
    play(&mut game, "a2a3 h7h6");
    assert!(!try_move(&mut game, "a3a5"));
    play(&mut game, "a3a4");
    assert!(!try_move(&mut game, "h6h4"));
    play(&mut game, "h6h5");
}

#[test]
fn rook_check_on_single_king_board() {
    let context = setup(
        &[
            (Player::White, PieceKind::King, "e4"),
            (Player::Black, PieceKind::Rook, "e8"),
        ],
        Player::White,
    );
    assert!(evaluator::is_king_in_check(&context, Player::White).unwrap());
    let king = context.board.get(square("e4")).unwrap();
    // Both directions along the file stay in the attack map.
    assert!(!king.is_valid_move(square("e5"), &context));
    assert!(!king.is_valid_move(square("e3"), &context));
    assert!(king.is_valid_move(square("d4"), &context));
    assert!(king.is_valid_move(square("f3"), &context));
}

#[test]
fn back_rank_mate() {
    let mut game = MoveService::from_context(setup(
        &[
            (Player::White, PieceKind::King, "g1"),
            (Player::White, PieceKind::Rook, "a1"),
            (Player::Black, PieceKind::King, "g8"),
            (Player::Black, PieceKind::Pawn, "f7"),
            (Player::Black, PieceKind::Pawn, "g7"),
            (Player::Black, PieceKind::Pawn, "h7"),
        ],
        Player::White,
    ));
    play(&mut game, "a1a8");
    assert!(game.is_check());
    assert!(game.is_checkmate());
    assert_eq!(game.current_player(), Player::Black);
    assert_eq!(game.status().unwrap(), GameStatus::Checkmate);
    assert!(game.legal_moves().unwrap().is_empty());
    // Nothing can be played after the mate.
    assert!(!try_move(&mut game, "g8h8"));
    assert!(!try_move(&mut game, "h7h6"));
}

#[test]
fn loaded_position_reports_checkmate() {
    let mut game = MoveService::from_context(setup(
        &[
            (Player::White, PieceKind::King, "g1"),
            (Player::White, PieceKind::Rook, "a8"),
            (Player::Black, PieceKind::King, "g8"),
            (Player::Black, PieceKind::Pawn, "f7"),
            (Player::Black, PieceKind::Pawn, "g7"),
            (Player::Black, PieceKind::Pawn, "h7"),
        ],
        Player::Black,
    ));
    assert_eq!(game.current_player(), Player::Black);
    assert!(game.is_check());
    assert!(game.is_checkmate());
    assert_eq!(game.status().unwrap(), GameStatus::Checkmate);
}

#[test]
fn edited_context_reports_check() {
    let mut context = GameContext::starting();
    let _ = context.board.remove(square("f2"));
    let _ = context.board.set(
        square("h4"),
        Piece::new(Player::Black, PieceKind::Queen, square("h4")),
    );
    let game = MoveService::from_context(context);
    assert!(game.is_check());
    assert!(!game.is_checkmate());
}

#[test]
fn stalemate_is_not_checkmate() {
    let mut game = MoveService::from_context(setup(
        &[
            (Player::White, PieceKind::King, "h1"),
            (Player::White, PieceKind::Queen, "b1"),
            (Player::Black, PieceKind::King, "a8"),
        ],
        Player::White,
    ));
    play(&mut game, "b1b6");
    assert!(!game.is_check());
    assert!(!game.is_checkmate());
    assert_eq!(game.status().unwrap(), GameStatus::Stalemate);
}

#[test]
fn en_passant_target_lifetime() {
    let mut game = MoveService::new();
    play(&mut game, "e2e4");
    assert_eq!(
        game.context().state.en_passant(),
        Some(EnPassant {
            target: square("e3"),
            pawn: square("e4"),
        })
    );
    play(&mut game, "g8f6");
    assert_eq!(game.context().state.en_passant(), None);
    play(&mut game, "e4e5 d7d5");
    assert_eq!(
        game.context().state.en_passant().map(|en_passant| en_passant.target),
        Some(square("d6"))
    );
    play(&mut game, "e5d6");
    assert_eq!(game.get_piece_at(square("d5")), None);
    assert_eq!(
        game.get_piece_at(square("d6")).map(|pawn| pawn.owner),
        Some(Player::White)
    );
    assert_eq!(game.context().state.en_passant(), None);
}

#[test]
fn en_passant_expires_after_one_move() {
    let mut game = MoveService::new();
    play(&mut game, "e2e4 a7a6 e4e5 d7d5 h2h3 h7h6");
    assert!(!try_move(&mut game, "e5d6"));
}

#[test]
fn rejected_moves_are_atomic() {
    let mut game = MoveService::new();
    play(&mut game, "e2e4 e7e5 d1h5 b8c6 f1c4");
    let before = game.clone();
    for notation in [
        // Empty square.
        "d4d5",
        // White's piece.
        "h5f7",
        // Blocked rook.
        "a8a5",
        // Knight pattern for a bishop.
        "f8e6",
        // Capturing own piece.
        "d8d7",
        // Pawn capturing nothing.
        "f7e6",
        // Castling.
        "e8g8",
    ] {
        assert!(!try_move(&mut game, notation), "{notation} should be rejected");
        assert_eq!(game, before);
    }
}

#[test]
fn validation_is_deterministic() {
    let context = GameContext::starting();
    let before = context.clone();
    for piece in context.board.all_pieces() {
        for target in Position::all() {
            assert_eq!(
                piece.is_valid_move(target, &context),
                piece.is_valid_move(target, &context)
            );
        }
    }
    assert_eq!(context, before);
}

#[test]
fn blocked_bishop_diagonal() {
    for far_square in [None, Some(Player::White), Some(Player::Black)] {
        let mut pieces = vec![
            (Player::White, PieceKind::Bishop, "c1"),
            (Player::White, PieceKind::Pawn, "d2"),
        ];
        if let Some(owner) = far_square {
            pieces.push((owner, PieceKind::Knight, "e3"));
        }
        let context = setup(&pieces, Player::White);
        let bishop = context.board.get(square("c1")).unwrap();
        assert!(!bishop.is_valid_move(square("e3"), &context));
    }
}

#[test]
fn promotion_to_queen() {
    let mut game = MoveService::new();
    play(
        &mut game,
        "a2a4 b7b5 a4b5 a7a6 b5a6 c8b7 a6b7 b8c6 b7a8",
    );
    let queen = game.get_piece_at(square("a8")).unwrap();
    assert_eq!((queen.owner, queen.kind), (Player::White, PieceKind::Queen));
    assert_eq!(
        game.move_log().last().map(String::as_str),
        Some("White Pawn from b7 to a8")
    );
    assert_eq!(game.move_log().len(), 9);
}

#[test]
fn missing_king_is_an_error() {
    let mut game = MoveService::from_context(setup(
        &[
            (Player::White, PieceKind::King, "e1"),
            (Player::White, PieceKind::Pawn, "e2"),
        ],
        Player::White,
    ));
    let before = game.clone();
    assert!(game.try_move(square("e2"), square("e4")).is_err());
    assert_eq!(game, before);
}
