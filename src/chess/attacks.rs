//! Squares threatened by each piece and the per-player attack maps built from
//! them.
//!
//! Threat coverage differs from the set of moves a piece can make: pawns
//! threaten diagonally but push forward, and every piece also covers squares
//! occupied by its own side (a defended piece can not be captured by the
//! king). Sliding rays of a player also continue through the opponent's king,
//! so the king can not step backwards along the line it is being checked on.

use crate::chess::bitboard::Bitboard;
use crate::chess::board::Board;
use crate::chess::core::{Piece, PieceKind, Player, Position};

pub(super) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub(super) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub(super) const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];
pub(super) const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Calculates the attack map of `player`: every square at least one of its
/// pieces threatens.
#[must_use]
pub fn attack_map(board: &Board, player: Player) -> Bitboard {
    let transparent = board
        .pieces(player.opponent())
        .find(|piece| piece.kind == PieceKind::King)
        .map(|king| king.position());
    board
        .pieces(player)
        .fold(Bitboard::empty(), |attacks, piece| {
            attacks | piece_attacks(board, piece, transparent)
        })
}

/// Squares threatened by a single piece. `transparent` square does not stop
/// sliding rays.
#[must_use]
pub fn piece_attacks(board: &Board, piece: Piece, transparent: Option<Position>) -> Bitboard {
    let from = piece.position();
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(from, piece.owner),
        PieceKind::Knight => steps(from, &KNIGHT_JUMPS),
        PieceKind::King => steps(from, &KING_STEPS),
        PieceKind::Bishop => rays(board, from, &BISHOP_DIRECTIONS, transparent),
        PieceKind::Rook => rays(board, from, &ROOK_DIRECTIONS, transparent),
        PieceKind::Queen => {
            rays(board, from, &BISHOP_DIRECTIONS, transparent)
                | rays(board, from, &ROOK_DIRECTIONS, transparent)
        },
    }
}

/// Two squares diagonally in front of the pawn.
#[must_use]
pub fn pawn_attacks(from: Position, owner: Player) -> Bitboard {
    [-1, 1]
        .into_iter()
        .filter_map(|cols| from.offset(owner.forward(), cols))
        .collect()
}

fn steps(from: Position, deltas: &[(i8, i8)]) -> Bitboard {
    deltas
        .iter()
        .filter_map(|&(rows, cols)| from.offset(rows, cols))
        .collect()
}

fn rays(
    board: &Board,
    from: Position,
    directions: &[(i8, i8)],
    transparent: Option<Position>,
) -> Bitboard {
    let mut result = Bitboard::empty();
    for &(rows, cols) in directions {
        let mut current = from;
        while let Some(next) = current.offset(rows, cols) {
            result.insert(next);
            if !board.is_empty(next) && Some(next) != transparent {
                break;
            }
            current = next;
        }
    }
    result
}
