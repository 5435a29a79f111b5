//! Kings step one square in any direction but never onto a square the
//! opponent threatens. Castling is recognized and rejected.

use crate::chess::context::GameContext;
use crate::chess::core::{Piece, Position};
use crate::chess::movement::is_empty_or_enemy;

pub(super) fn is_valid_move(king: &Piece, target: Position, context: &GameContext) -> bool {
    let (rows, cols) = king.position().delta(target);
    if rows == 0 && cols.abs() == 2 {
        log::debug!(
            "{} king attempted to castle from {} to {target}, castling is not supported",
            king.owner,
            king.position()
        );
        return false;
    }
    rows.abs() <= 1
        && cols.abs() <= 1
        && is_empty_or_enemy(&context.board, king, target)
        && !context.state.attacks(king.owner.opponent()).contains(target)
}
