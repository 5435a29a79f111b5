//! Rooks slide along rows and columns through empty squares.

use crate::chess::board::Board;
use crate::chess::core::{Piece, Position};
use crate::chess::movement::{is_empty_or_enemy, is_path_clear};

pub(super) fn is_valid_move(rook: &Piece, target: Position, board: &Board) -> bool {
    let (rows, cols) = rook.position().delta(target);
    (rows == 0 || cols == 0)
        && is_path_clear(board, rook.position(), target)
        && is_empty_or_enemy(board, rook, target)
}
