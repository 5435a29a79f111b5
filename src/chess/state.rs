//! Everything about the game that is not the placement of pieces: side to move,
//! check flags, en passant, castling rights, the move log and the attack maps.

use crate::chess::attacks;
use crate::chess::bitboard::Bitboard;
use crate::chess::board::Board;
use crate::chess::core::{CastleRights, Piece, PieceKind, Player, Position};

/// A square that can be captured into [en passant] during the next move only,
/// tagged with the pawn that would be captured.
///
/// [en passant]: https://en.wikipedia.org/wiki/En_passant
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnPassant {
    /// The square the pawn skipped over.
    pub target: Position,
    /// The square of the pawn that made the double push.
    pub pawn: Position,
}

/// Turn tracking and derived state of a game.
///
/// Attack maps are a cache over the [`Board`]: they are rebuilt from scratch
/// by [`GameState::update_attack_maps`] and never patched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    side_to_move: Player,
    check: bool,
    checkmate: bool,
    en_passant: Option<EnPassant>,
    castling: CastleRights,
    move_log: Vec<String>,
    white_attacks: Bitboard,
    black_attacks: Bitboard,
}

impl GameState {
    /// State of a fresh game: White to move, all castling rights, empty log and
    /// attack maps.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            side_to_move: Player::White,
            check: false,
            checkmate: false,
            en_passant: None,
            castling: CastleRights::ALL,
            move_log: Vec::new(),
            white_attacks: Bitboard::empty(),
            black_attacks: Bitboard::empty(),
        }
    }

    /// Resets every field to the values of [`GameState::new`].
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The player to move.
    #[must_use]
    pub const fn current_player(&self) -> Player {
        self.side_to_move
    }

    /// Passes the turn to the opponent.
    pub fn switch_player(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
    }

    /// Sets the player to move explicitly (puzzles, tests).
    pub fn set_player(&mut self, player: Player) {
        self.side_to_move = player;
    }

    /// Whether the player to move is in check.
    #[must_use]
    pub const fn is_check(&self) -> bool {
        self.check
    }

    /// Whether the player to move is checkmated.
    #[must_use]
    pub const fn is_checkmate(&self) -> bool {
        self.checkmate
    }

    pub(super) fn set_check_flags(&mut self, check: bool, checkmate: bool) {
        debug_assert!(check || !checkmate);
        self.check = check;
        self.checkmate = checkmate;
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn en_passant(&self) -> Option<EnPassant> {
        self.en_passant
    }

    /// Records the en passant target after a double push of `pawn`. Any other
    /// piece kind is ignored.
    pub fn set_en_passant_target(&mut self, target: Position, pawn: &Piece) {
        if pawn.kind == PieceKind::Pawn {
            self.en_passant = Some(EnPassant {
                target,
                pawn: pawn.position(),
            });
        }
    }

    #[allow(missing_docs)]
    pub fn clear_en_passant(&mut self) {
        self.en_passant = None;
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn castling(&self) -> CastleRights {
        self.castling
    }

    /// Drops castling rights (e.g. after the king or a rook moved).
    pub fn revoke_castling(&mut self, rights: CastleRights) {
        self.castling.remove(rights);
    }

    /// Human-readable log of committed moves, oldest first.
    #[must_use]
    pub fn move_log(&self) -> &[String] {
        &self.move_log
    }

    /// Appends "<Color> <PieceKind> from <square> to <square>" to the log.
    pub fn log_move(&mut self, piece: &Piece, from: Position, to: Position) {
        self.move_log
            .push(format!("{} {} from {from} to {to}", piece.owner, piece.kind));
    }

    /// Squares threatened by the pieces of `player`.
    #[must_use]
    pub const fn attacks(&self, player: Player) -> Bitboard {
        match player {
            Player::White => self.white_attacks,
            Player::Black => self.black_attacks,
        }
    }

    /// Rebuilds both attack maps from the board.
    pub fn update_attack_maps(&mut self, board: &Board) {
        self.white_attacks = attacks::attack_map(board, Player::White);
        self.black_attacks = attacks::attack_map(board, Player::Black);
        log::trace!(
            "attack maps rebuilt: white covers {}, black covers {} squares",
            self.white_attacks.count(),
            self.black_attacks.count()
        );
    }

    pub(super) const fn attack_maps(&self) -> (Bitboard, Bitboard) {
        (self.white_attacks, self.black_attacks)
    }

    pub(super) fn restore_attack_maps(&mut self, (white, black): (Bitboard, Bitboard)) {
        self.white_attacks = white;
        self.black_attacks = black;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
