//! [`GameContext`] bundles the [`Board`] with the [`GameState`] of one game.

use anyhow::bail;

use crate::chess::board::Board;
use crate::chess::core::{CastleRights, Piece, PieceKind, Player, Position, BOARD_WIDTH};
use crate::chess::evaluator;
use crate::chess::state::GameState;

/// One game session: the board and its state. Pieces borrow the context for
/// the duration of a single validation call, the evaluator and
/// [`crate::chess::service::MoveService`] borrow it mutably.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameContext {
    #[allow(missing_docs)]
    pub board: Board,
    #[allow(missing_docs)]
    pub state: GameState,
}

impl GameContext {
    /// Starting position with White to move and attack maps computed.
    #[must_use]
    pub fn starting() -> Self {
        let mut context = Self {
            board: Board::starting(),
            state: GameState::new(),
        };
        context.state.update_attack_maps(&context.board);
        context
    }

    /// Builds a context from a custom layout, see [`GameContext::load_custom`].
    ///
    /// # Errors
    ///
    /// If the layout is rejected.
    pub fn custom(pieces: &[(Piece, Position)], side_to_move: Player) -> anyhow::Result<Self> {
        let mut context = Self {
            board: Board::empty(),
            state: GameState::new(),
        };
        context.load_custom(pieces, side_to_move)?;
        Ok(context)
    }

    /// Returns the game to the starting position and a fresh state.
    pub fn reset(&mut self) {
        self.board.reset_to_standard_layout();
        self.state.reset();
        self.state.update_attack_maps(&self.board);
    }

    /// Replaces the board with given pieces, resets the state and sets the
    /// player to move. Castling rights are kept only where the king and the
    /// rook stand on their original squares.
    ///
    /// When both kings are on the board the check and checkmate flags of
    /// `side_to_move` are computed. Positions without a king are accepted
    /// (useful for testing a single piece) and keep both flags cleared, any
    /// operation that needs the missing king will fail.
    ///
    /// # Errors
    ///
    /// If a square is listed twice, a player has more than one king or a pawn
    /// stands on the first or last rank.
    pub fn load_custom(
        &mut self,
        pieces: &[(Piece, Position)],
        side_to_move: Player,
    ) -> anyhow::Result<()> {
        let mut board = Board::empty();
        board.load_custom(pieces)?;
        for player in [Player::White, Player::Black] {
            let kings = board
                .pieces(player)
                .filter(|piece| piece.kind == PieceKind::King)
                .count();
            if kings > 1 {
                bail!("expected at most 1 {player} king, got {kings}");
            }
        }
        if let Some(pawn) = board.all_pieces().find(|piece| {
            piece.kind == PieceKind::Pawn
                && (piece.position().row() == Player::White.backrank()
                    || piece.position().row() == Player::Black.backrank())
        }) {
            bail!("pawns can not be placed on backranks, got one on {}", pawn.position());
        }
        self.board = board;
        self.state.reset();
        self.state.set_player(side_to_move);
        for player in [Player::White, Player::Black] {
            let king_home = self
                .board
                .get(Position::from_index(player.backrank() * BOARD_WIDTH + 4));
            if !king_home.is_some_and(|king| king.kind == PieceKind::King && king.owner == player)
            {
                self.state.revoke_castling(CastleRights::both(player));
            }
        }
        for position in Position::all() {
            let rights = CastleRights::for_rook_square(position);
            if rights.is_empty() {
                continue;
            }
            let home_rook = self.board.get(position).is_some_and(|rook| {
                rook.kind == PieceKind::Rook
                    && CastleRights::both(rook.owner).contains(rights)
            });
            if !home_rook {
                self.state.revoke_castling(rights);
            }
        }
        self.state.update_attack_maps(&self.board);
        self.update_check_flags()
    }

    /// Recomputes the check and checkmate flags of the player to move. Both
    /// flags are cleared unless each player has exactly one king.
    pub(super) fn update_check_flags(&mut self) -> anyhow::Result<()> {
        if self.board.find_king(Player::White).is_err()
            || self.board.find_king(Player::Black).is_err()
        {
            self.state.set_check_flags(false, false);
            return Ok(());
        }
        let player = self.state.current_player();
        let check = evaluator::is_king_in_check(self, player)?;
        let checkmate = check && !evaluator::has_legal_moves(self, player)?;
        self.state.set_check_flags(check, checkmate);
        Ok(())
    }
}

impl Default for GameContext {
    fn default() -> Self {
        Self::starting()
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn square(notation: &str) -> Position {
        Position::try_from(notation).unwrap()
    }

    fn piece(owner: Player, kind: PieceKind, at: &str) -> (Piece, Position) {
        (Piece::new(owner, kind, square(at)), square(at))
    }

    #[test]
    fn starting_context() {
        let context = GameContext::starting();
        assert_eq!(context.state.current_player(), Player::White);
        assert!(context.state.attacks(Player::White).contains(square("f3")));
        assert!(context.state.attacks(Player::Black).contains(square("f6")));
    }

    #[test]
    fn reset() {
        let mut context = GameContext::custom(
            &[
                piece(Player::White, PieceKind::King, "e1"),
                piece(Player::Black, PieceKind::King, "e8"),
            ],
            Player::Black,
        )
        .unwrap();
        context.reset();
        assert_eq!(context, GameContext::starting());
    }

    #[test]
    fn custom_castling_rights() {
        let context = GameContext::custom(
            &[
                piece(Player::White, PieceKind::King, "e1"),
                piece(Player::White, PieceKind::Rook, "h1"),
                piece(Player::White, PieceKind::Rook, "b1"),
                piece(Player::Black, PieceKind::King, "d8"),
                piece(Player::Black, PieceKind::Rook, "a8"),
            ],
            Player::White,
        )
        .unwrap();
        assert_eq!(context.state.castling(), CastleRights::WHITE_SHORT);
        assert_eq!(context.state.current_player(), Player::White);
    }

    #[test]
    #[should_panic(expected = "expected at most 1 White king, got 2")]
    fn two_kings() {
        let _ = GameContext::custom(
            &[
                piece(Player::White, PieceKind::King, "e1"),
                piece(Player::White, PieceKind::King, "e2"),
            ],
            Player::White,
        )
        .unwrap();
    }

    #[test]
    #[should_panic(expected = "pawns can not be placed on backranks, got one on c8")]
    fn pawn_on_backrank() {
        let _ = GameContext::custom(
            &[
                piece(Player::White, PieceKind::King, "e1"),
                piece(Player::White, PieceKind::Pawn, "c8"),
            ],
            Player::White,
        )
        .unwrap();
    }

    #[test]
    fn custom_matches_loading_over_a_game() {
        let pieces = [
            piece(Player::White, PieceKind::King, "e1"),
            piece(Player::White, PieceKind::Rook, "a1"),
            piece(Player::Black, PieceKind::King, "e8"),
            piece(Player::Black, PieceKind::Knight, "g8"),
        ];
        let mut loaded = GameContext::starting();
        loaded.load_custom(&pieces, Player::Black).unwrap();
        assert_eq!(GameContext::custom(&pieces, Player::Black).unwrap(), loaded);
    }

    #[test]
    fn loaded_checkmate_sets_flags() {
        let context = GameContext::custom(
            &[
                piece(Player::White, PieceKind::King, "g1"),
                piece(Player::White, PieceKind::Rook, "a8"),
                piece(Player::Black, PieceKind::King, "g8"),
                piece(Player::Black, PieceKind::Pawn, "f7"),
                piece(Player::Black, PieceKind::Pawn, "g7"),
                piece(Player::Black, PieceKind::Pawn, "h7"),
            ],
            Player::Black,
        )
        .unwrap();
        assert!(context.state.is_check());
        assert!(context.state.is_checkmate());
    }

    #[test]
    fn loaded_check_sets_flags() {
        let mut context = GameContext::custom(
            &[
                piece(Player::White, PieceKind::King, "g1"),
                piece(Player::White, PieceKind::Rook, "a8"),
                piece(Player::Black, PieceKind::King, "g8"),
                piece(Player::Black, PieceKind::Pawn, "g7"),
            ],
            Player::Black,
        )
        .unwrap();
        assert!(context.state.is_check());
        assert!(!context.state.is_checkmate());

        // Same layout with White to move: Black's check is not White's.
        context
            .load_custom(
                &[
                    piece(Player::White, PieceKind::King, "g1"),
                    piece(Player::White, PieceKind::Rook, "a8"),
                    piece(Player::Black, PieceKind::King, "g8"),
                    piece(Player::Black, PieceKind::Pawn, "g7"),
                ],
                Player::White,
            )
            .unwrap();
        assert!(!context.state.is_check());
        assert!(!context.state.is_checkmate());
    }

    #[test]
    fn single_king_layout_keeps_flags_cleared() {
        let context = GameContext::custom(
            &[
                piece(Player::White, PieceKind::King, "e4"),
                piece(Player::Black, PieceKind::Rook, "e8"),
            ],
            Player::White,
        )
        .unwrap();
        assert!(!context.state.is_check());
        assert!(!context.state.is_checkmate());
    }

    #[test]
    fn rejected_layout_keeps_the_game() {
        let mut context = GameContext::starting();
        assert!(context
            .load_custom(
                &[
                    piece(Player::White, PieceKind::Pawn, "a1"),
                    piece(Player::White, PieceKind::King, "e1"),
                ],
                Player::Black,
            )
            .is_err());
        assert_eq!(context, GameContext::starting());
    }
}
