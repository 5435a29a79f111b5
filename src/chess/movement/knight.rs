//! Knights jump in an L shape, ignoring pieces in between.

use crate::chess::board::Board;
use crate::chess::core::{Piece, Position};
use crate::chess::movement::is_empty_or_enemy;

pub(super) fn is_valid_move(knight: &Piece, target: Position, board: &Board) -> bool {
    let (rows, cols) = knight.position().delta(target);
    matches!((rows.abs(), cols.abs()), (1, 2) | (2, 1)) && is_empty_or_enemy(board, knight, target)
}
