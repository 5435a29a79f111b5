//! Implementation of the chess rules: board storage, piece movement, game
//! state and the move pipeline built on top of them.
//!
//! [`service::MoveService`] is the entry point for playing a game, the rest of
//! the modules are the building blocks it is made of.

pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod context;
pub mod core;
pub mod evaluator;
pub mod movement;
pub mod service;
pub mod state;
