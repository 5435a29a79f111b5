//! Questions about the game that need to look one move ahead: is a king in
//! check, would a move expose the mover's own king, does a player have any
//! legal move left.
//!
//! Looking ahead is done by playing the move on the real board inside a
//! [`SimulatedMove`] guard, which puts every touched square and both attack
//! maps back when it goes out of scope. None of the functions below leave an
//! observable change in the [`GameContext`].

use std::ops::Deref;

use anyhow::bail;
use arrayvec::ArrayVec;

use crate::chess::bitboard::Bitboard;
use crate::chess::context::GameContext;
use crate::chess::core::{Piece, Player, Position};
use crate::chess::movement;

/// Checks whether the king of `player` stands on a square threatened by the
/// opponent.
///
/// # Errors
///
/// If the board does not have exactly one king of `player`.
pub fn is_king_in_check(context: &GameContext, player: Player) -> anyhow::Result<bool> {
    let king = context.board.find_king(player)?;
    Ok(context.state.attacks(player.opponent()).contains(king))
}

/// Plays the move from `from` to `to` on the board, recomputes the attack
/// maps and checks whether the mover's king ends up attacked. The board and
/// the attack maps are restored before returning, including when an error is
/// returned.
///
/// The move itself is not validated: callers check
/// [`Piece::is_valid_move`] first.
///
/// # Errors
///
/// If `from` is empty or the mover has no king (or more than one).
pub fn would_move_cause_self_check(
    context: &mut GameContext,
    from: Position,
    to: Position,
) -> anyhow::Result<bool> {
    let Some(piece) = context.board.get(from) else {
        bail!("no piece on {from}");
    };
    let simulation = SimulatedMove::new(context, piece, to);
    is_king_in_check(&simulation, piece.owner)
}

/// Returns true if at least one piece of `player` has a move that passes its
/// movement rules and does not leave the king in check.
///
/// # Errors
///
/// If `player` has no king (or more than one).
pub fn has_legal_moves(context: &mut GameContext, player: Player) -> anyhow::Result<bool> {
    for piece in player_pieces(context, player) {
        for target in Position::all() {
            if is_legal(context, piece, target)? {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Lists every legal `(from, to)` pair of `player`, ordered by the source
/// square and then by the target square (a8 first, h1 last).
///
/// # Errors
///
/// If `player` has no king (or more than one).
pub fn legal_moves(
    context: &mut GameContext,
    player: Player,
) -> anyhow::Result<Vec<(Position, Position)>> {
    let mut moves = Vec::new();
    for piece in player_pieces(context, player) {
        for target in Position::all() {
            if is_legal(context, piece, target)? {
                moves.push((piece.position(), target));
            }
        }
    }
    Ok(moves)
}

fn player_pieces(context: &GameContext, player: Player) -> Vec<Piece> {
    context.board.pieces(player).collect()
}

fn is_legal(context: &mut GameContext, piece: Piece, target: Position) -> anyhow::Result<bool> {
    Ok(piece.is_valid_move(target, context)
        && !would_move_cause_self_check(context, piece.position(), target)?)
}

/// At most three squares change during a move: the source, the destination
/// and the square of a pawn captured en passant.
const TOUCHED_SQUARES: usize = 3;

/// A move played on the board for inspection only. Dropping the guard puts the
/// touched squares (with the pieces' cached positions) and the attack maps back
/// exactly as they were.
#[must_use]
struct SimulatedMove<'a> {
    context: &'a mut GameContext,
    squares: ArrayVec<(Position, Option<Piece>), TOUCHED_SQUARES>,
    attack_maps: (Bitboard, Bitboard),
}

impl<'a> SimulatedMove<'a> {
    fn new(context: &'a mut GameContext, piece: Piece, to: Position) -> Self {
        let from = piece.position();
        let victim = movement::en_passant_victim(&piece, to, context);
        let mut squares = ArrayVec::new();
        for position in [Some(from), Some(to), victim].into_iter().flatten() {
            squares.push((position, context.board.get(position)));
        }
        let attack_maps = context.state.attack_maps();

        let _ = context.board.remove(from);
        if let Some(victim) = victim {
            let _ = context.board.remove(victim);
        }
        let _ = context.board.set(to, piece);
        context.state.update_attack_maps(&context.board);

        Self {
            context,
            squares,
            attack_maps,
        }
    }
}

impl Deref for SimulatedMove<'_> {
    type Target = GameContext;

    fn deref(&self) -> &Self::Target {
        self.context
    }
}

impl Drop for SimulatedMove<'_> {
    fn drop(&mut self) {
        for &(position, occupant) in &self.squares {
            self.context.board.restore(position, occupant);
        }
        self.context.state.restore_attack_maps(self.attack_maps);
    }
}
