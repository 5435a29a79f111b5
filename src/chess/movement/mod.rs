//! Movement rules of the six piece kinds and the side effects of a committed
//! move (en passant bookkeeping, promotion, castling rights).
//!
//! Validation is pure: [`Piece::is_valid_move`] only reads the
//! [`GameContext`]. It does not check whether the move leaves the mover's own
//! king in check, that is the job of
//! [`crate::chess::evaluator::would_move_cause_self_check`].

mod bishop;
mod king;
mod knight;
mod pawn;
mod queen;
mod rook;

use crate::chess::board::Board;
use crate::chess::context::GameContext;
use crate::chess::core::{CastleRights, Piece, PieceKind, Position};

impl Piece {
    /// Checks whether the piece may move to `target` according to its own
    /// movement rules and the current occupancy, en passant target and
    /// attack maps of the context.
    #[must_use]
    pub fn is_valid_move(&self, target: Position, context: &GameContext) -> bool {
        if target == self.position() {
            return false;
        }
        match self.kind {
            PieceKind::Pawn => pawn::is_valid_move(self, target, context),
            PieceKind::Knight => knight::is_valid_move(self, target, &context.board),
            PieceKind::Bishop => bishop::is_valid_move(self, target, &context.board),
            PieceKind::Rook => rook::is_valid_move(self, target, &context.board),
            PieceKind::Queen => queen::is_valid_move(self, target, &context.board),
            PieceKind::King => king::is_valid_move(self, target, context),
        }
    }

    /// Post-move hook. Called once the piece already stands on its new square
    /// (`self.position()`); `captured` is whatever occupied that square
    /// before.
    pub fn on_moved(self, from: Position, captured: Option<Piece>, context: &mut GameContext) {
        match self.kind {
            PieceKind::Pawn => pawn::on_moved(self, from, captured, context),
            _ => context.state.clear_en_passant(),
        }
        update_castling_rights(self, from, captured, context);
    }
}

/// Returns the square of the pawn that would be captured en passant if
/// `piece` moved to `to` on the current board.
#[must_use]
pub(super) fn en_passant_victim(
    piece: &Piece,
    to: Position,
    context: &GameContext,
) -> Option<Position> {
    if piece.kind != PieceKind::Pawn || piece.position().col() == to.col() {
        return None;
    }
    pawn::en_passant_capture(piece, to, context)
}

/// Walks from `from` towards `to` in unit steps and checks that every square
/// strictly between them is empty. The two squares have to share a row, a
/// column or a diagonal.
#[must_use]
pub fn is_path_clear(board: &Board, from: Position, to: Position) -> bool {
    let (rows, cols) = from.delta(to);
    debug_assert!(rows == 0 || cols == 0 || rows.abs() == cols.abs());
    let (row_step, col_step) = (rows.signum(), cols.signum());
    let mut current = from;
    while let Some(next) = current.offset(row_step, col_step) {
        if next == to {
            return true;
        }
        if !board.is_empty(next) {
            return false;
        }
        current = next;
    }
    // Only reachable if `to` is not on a line with `from`.
    false
}

/// The target square is either empty or holds a piece of the opponent.
fn is_empty_or_enemy(board: &Board, piece: &Piece, target: Position) -> bool {
    board
        .get(target)
        .map_or(true, |occupant| occupant.owner != piece.owner)
}

fn is_enemy(board: &Board, piece: &Piece, target: Position) -> bool {
    board
        .get(target)
        .is_some_and(|occupant| occupant.owner != piece.owner)
}

fn update_castling_rights(
    moved: Piece,
    from: Position,
    captured: Option<Piece>,
    context: &mut GameContext,
) {
    let mut lost = CastleRights::NONE;
    match moved.kind {
        PieceKind::King => lost |= CastleRights::both(moved.owner),
        PieceKind::Rook => {
            lost |= CastleRights::for_rook_square(from) & CastleRights::both(moved.owner);
        },
        _ => {},
    }
    if let Some(captured) = captured.filter(|captured| captured.kind == PieceKind::Rook) {
        lost |= CastleRights::for_rook_square(moved.position())
            & CastleRights::both(captured.owner);
    }
    if context.state.castling().intersects(lost) {
        log::debug!("{} loses castling rights {lost}", moved.owner);
        context.state.revoke_castling(lost);
    }
}
