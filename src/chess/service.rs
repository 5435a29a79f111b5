//! [`MoveService`] is the single mutating entry point of a game: it takes a
//! requested move through validation, the self-check test, the board update
//! and the recomputation of everything derived from the board.

use std::fmt;

use crate::chess::context::GameContext;
use crate::chess::core::{Piece, PieceKind, Player, Position};
use crate::chess::evaluator;

/// Situation of the player to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    #[allow(missing_docs)]
    Ongoing,
    /// The king is attacked but there is a move out of it.
    Check,
    #[allow(missing_docs)]
    Checkmate,
    /// Not in check and no legal move.
    Stalemate,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ongoing => "ongoing",
            Self::Check => "check",
            Self::Checkmate => "checkmate",
            Self::Stalemate => "stalemate",
        })
    }
}

/// Owns one game session and applies moves to it.
///
/// ```
/// use chessmate::chess::core::{Player, Position};
/// use chessmate::chess::service::MoveService;
///
/// let mut game = MoveService::new();
/// let e2 = Position::try_from("e2").unwrap();
/// let e4 = Position::try_from("e4").unwrap();
/// assert!(game.try_move(e2, e4).unwrap());
/// assert_eq!(game.current_player(), Player::Black);
/// // Not Black's pawn.
/// assert!(!game.try_move(e4, Position::try_from("e5").unwrap()).unwrap());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveService {
    context: GameContext,
}

impl MoveService {
    /// A new game from the starting position.
    #[must_use]
    pub fn new() -> Self {
        Self::from_context(GameContext::starting())
    }

    /// Continues a game from an arbitrary context (e.g. a puzzle set up with
    /// [`GameContext::custom`]). The attack maps and the check and checkmate
    /// flags of the side to move are recomputed, so edits made through the
    /// public fields of the context are picked up.
    #[must_use]
    pub fn from_context(mut context: GameContext) -> Self {
        context.state.update_attack_maps(&context.board);
        if let Err(error) = context.update_check_flags() {
            log::warn!("check flags of the loaded position are not set: {error:#}");
        }
        Self { context }
    }

    /// Tries to play the move from `from` to `to` for the player to move.
    ///
    /// Returns `Ok(true)` if the move was applied and `Ok(false)` if it is
    /// illegal, in which case nothing changes.
    ///
    /// # Errors
    ///
    /// If the board does not have exactly one king of each color. The game is
    /// left untouched.
    pub fn try_move(&mut self, from: Position, to: Position) -> anyhow::Result<bool> {
        for player in [Player::White, Player::Black] {
            let _ = self.context.board.find_king(player)?;
        }
        let Some(piece) = self.context.board.get(from) else {
            log::debug!("rejected {from}{to}: no piece on {from}");
            return Ok(false);
        };
        let player = self.context.state.current_player();
        if piece.owner != player {
            log::debug!("rejected {from}{to}: it is {player}'s turn, not {}'s", piece.owner);
            return Ok(false);
        }
        if !piece.is_valid_move(to, &self.context) {
            log::debug!("rejected {from}{to}: {} {} can not move there", piece.owner, piece.kind);
            return Ok(false);
        }
        if let Some(target) = self
            .context
            .board
            .get(to)
            .filter(|target| target.kind == PieceKind::King)
        {
            log::debug!("rejected {from}{to}: {} king can not be captured", target.owner);
            return Ok(false);
        }
        if evaluator::would_move_cause_self_check(&mut self.context, from, to)? {
            log::debug!("rejected {from}{to}: {player} king would be in check");
            return Ok(false);
        }

        let captured = self.commit(piece, from, to);
        self.finalize(piece, from, to, captured)?;
        Ok(true)
    }

    fn commit(&mut self, piece: Piece, from: Position, to: Position) -> Option<Piece> {
        let board = &mut self.context.board;
        let _ = board.remove(from);
        let captured = board.set(to, piece.moved());
        if let Some(moved) = self.context.board.get(to) {
            moved.on_moved(from, captured, &mut self.context);
        }
        captured
    }

    fn finalize(
        &mut self,
        piece: Piece,
        from: Position,
        to: Position,
        captured: Option<Piece>,
    ) -> anyhow::Result<()> {
        let state = &mut self.context.state;
        state.log_move(&piece, from, to);
        state.update_attack_maps(&self.context.board);
        state.switch_player();
        let player = state.current_player();
        match captured {
            Some(captured) => log::info!(
                "{} {} {from}{to} captures {} {}",
                piece.owner,
                piece.kind,
                captured.owner,
                captured.kind
            ),
            None => log::info!("{} {} {from}{to}", piece.owner, piece.kind),
        }

        self.context.update_check_flags()?;
        if self.is_checkmate() {
            log::info!("{player} is checkmated");
        } else if self.is_check() {
            log::info!("{player} is in check");
        }
        Ok(())
    }

    /// The player to move.
    #[must_use]
    pub const fn current_player(&self) -> Player {
        self.context.state.current_player()
    }

    /// Whether the player to move is in check.
    #[must_use]
    pub const fn is_check(&self) -> bool {
        self.context.state.is_check()
    }

    /// Whether the player to move is checkmated.
    #[must_use]
    pub const fn is_checkmate(&self) -> bool {
        self.context.state.is_checkmate()
    }

    /// Committed moves in the "White Pawn from e2 to e4" format, oldest first.
    #[must_use]
    pub fn move_log(&self) -> &[String] {
        self.context.state.move_log()
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn get_piece_at(&self, position: Position) -> Option<Piece> {
        self.context.board.get(position)
    }

    /// Read-only view of the board and the game state.
    #[must_use]
    pub const fn context(&self) -> &GameContext {
        &self.context
    }

    /// Every legal move of the player to move.
    ///
    /// # Errors
    ///
    /// If the player to move has no king.
    pub fn legal_moves(&mut self) -> anyhow::Result<Vec<(Position, Position)>> {
        let player = self.current_player();
        evaluator::legal_moves(&mut self.context, player)
    }

    /// Evaluates the situation of the player to move. Unlike check and
    /// checkmate, stalemate is not stored and is computed on every call.
    ///
    /// # Errors
    ///
    /// If the player to move has no king.
    pub fn status(&mut self) -> anyhow::Result<GameStatus> {
        let player = self.current_player();
        let check = evaluator::is_king_in_check(&self.context, player)?;
        let status = match (check, evaluator::has_legal_moves(&mut self.context, player)?) {
            (true, true) => GameStatus::Check,
            (true, false) => GameStatus::Checkmate,
            (false, true) => GameStatus::Ongoing,
            (false, false) => GameStatus::Stalemate,
        };
        if status == GameStatus::Stalemate {
            log::info!("{player} is stalemated");
        }
        Ok(status)
    }

    /// Starts a new game from the standard layout.
    pub fn reset(&mut self) {
        self.context.reset();
        log::info!("new game");
    }
}
