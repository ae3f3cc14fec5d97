//! Errors raised when a caller breaks an engine contract.
//!
//! Ordinary rule violations (an illegal destination, a move that exposes the
//! king) are not errors; they come back as a [`MoveStatus`](crate::MoveStatus).

use chess_core::Side;
use thiserror::Error;

/// Contract violations detected while building or transforming a position.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid board: {0} has no king")]
    MissingKing(Side),

    #[error("invalid board: {side} has {count} kings")]
    MultipleKings { side: Side, count: usize },

    #[error("cannot execute the null move")]
    NullMove,
}
