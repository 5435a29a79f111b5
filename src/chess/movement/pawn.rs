//! Pawns push forward, double-push from the starting rank, capture diagonally
//! (including en passant) and are promoted to a queen on the last rank.

use crate::chess::context::GameContext;
use crate::chess::core::{Piece, PieceKind, Position};
use crate::chess::movement::is_enemy;

pub(super) fn is_valid_move(pawn: &Piece, target: Position, context: &GameContext) -> bool {
    let board = &context.board;
    let from = pawn.position();
    let forward = pawn.owner.forward();
    match from.delta(target) {
        (rows, 0) if rows == forward => board.is_empty(target),
        (rows, 0) if rows == 2 * forward => {
            !pawn.has_moved()
                && from.row() == pawn.owner.pawns_starting()
                && from
                    .offset(forward, 0)
                    .is_some_and(|skipped| board.is_empty(skipped))
                && board.is_empty(target)
        },
        (rows, -1 | 1) if rows == forward => {
            is_enemy(board, pawn, target) || en_passant_capture(pawn, target, context).is_some()
        },
        _ => false,
    }
}

/// If moving diagonally to `target` is an en passant capture, returns the
/// square of the captured pawn. The caller checks the diagonal step.
pub(super) fn en_passant_capture(
    pawn: &Piece,
    target: Position,
    context: &GameContext,
) -> Option<Position> {
    let en_passant = context.state.en_passant()?;
    if en_passant.target != target || !context.board.is_empty(target) {
        return None;
    }
    if en_passant.pawn.row() != pawn.position().row() {
        return None;
    }
    context
        .board
        .get(en_passant.pawn)
        .filter(|victim| victim.kind == PieceKind::Pawn && victim.owner != pawn.owner)
        .map(|victim| victim.position())
}

pub(super) fn on_moved(
    pawn: Piece,
    from: Position,
    captured: Option<Piece>,
    context: &mut GameContext,
) {
    let to = pawn.position();
    // A diagonal step onto an empty square can only be an en passant capture.
    if from.col() != to.col() && captured.is_none() {
        if let Some(en_passant) = context.state.en_passant().filter(|ep| ep.target == to) {
            if let Some(victim) = context.board.remove(en_passant.pawn) {
                log::info!("{} pawn captured en passant on {}", victim.owner, victim.position());
            }
        }
    }
    let (rows, _) = from.delta(to);
    if rows.abs() == 2 {
        let skipped = from.offset(pawn.owner.forward(), 0);
        match skipped {
            Some(skipped) => context.state.set_en_passant_target(skipped, &pawn),
            None => context.state.clear_en_passant(),
        }
    } else {
        context.state.clear_en_passant();
    }
    if to.row() == pawn.owner.promotion_rank() {
        let queen = Piece {
            kind: PieceKind::Queen,
            ..pawn
        };
        let _ = context.board.set(to, queen);
        log::info!("{} pawn promoted to a queen on {to}", pawn.owner);
    }
}
