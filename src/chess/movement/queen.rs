//! Queens move like a rook or a bishop.

use crate::chess::board::Board;
use crate::chess::core::{Piece, Position};
use crate::chess::movement::{bishop, rook};

pub(super) fn is_valid_move(queen: &Piece, target: Position, board: &Board) -> bool {
    rook::is_valid_move(queen, target, board) || bishop::is_valid_move(queen, target, board)
}
