//! Bishops slide diagonally through empty squares.

use crate::chess::board::Board;
use crate::chess::core::{Piece, Position};
use crate::chess::movement::{is_empty_or_enemy, is_path_clear};

pub(super) fn is_valid_move(bishop: &Piece, target: Position, board: &Board) -> bool {
    let (rows, cols) = bishop.position().delta(target);
    rows.abs() == cols.abs()
        && is_path_clear(board, bishop.position(), target)
        && is_empty_or_enemy(board, bishop, target)
}
