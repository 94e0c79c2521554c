//! Error types for table operations.

use thiserror::Error;

use crate::game::{Action, RoundState};

/// Why a bet was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Bet amount is zero.
    #[error("bet amount is zero")]
    ZeroBet,
    /// The bet would exceed the bankroll.
    #[error("insufficient funds")]
    InsufficientFunds,
    /// The bet is locked for the running round.
    #[error("bet is locked for the current round")]
    Locked,
    /// No bet has been placed.
    #[error("no bet has been placed")]
    NoBet,
    /// The bet would exceed the table limit.
    #[error("bet exceeds the table limit")]
    AboveLimit,
}

/// Why an action is not legal right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    /// The action is not a legal transition from the current round state.
    #[error("cannot {action} while {state}")]
    WrongState {
        /// The rejected action.
        action: Action,
        /// The state the round was in.
        state: RoundState,
    },
    /// The bet is locked and cannot be changed.
    #[error("bet is locked")]
    BetLocked,
    /// Settlement requires a locked bet.
    #[error("no locked bet to settle")]
    BetNotLocked,
    /// Another operation is still running (for example waiting on a draw).
    #[error("another operation is in progress")]
    OperationInFlight,
}

/// Why the card source could not deliver cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The transport to the deck service failed.
    #[error("deck service request failed")]
    Transport,
    /// The deck service answered but reported failure.
    #[error("deck service rejected the request")]
    Rejected,
    /// Fewer cards were returned than requested.
    #[error("requested {requested} cards but received {received}")]
    ShortDraw {
        /// Number of cards asked for.
        requested: usize,
        /// Number of cards delivered.
        received: usize,
    },
    /// The response or one of its cards could not be decoded.
    #[error("malformed deck service response")]
    Malformed,
    /// No shoe has been prepared.
    #[error("no shoe has been prepared")]
    NoDeck,
}

/// Errors returned by round operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// The bet is invalid.
    #[error("invalid bet: {0}")]
    InvalidBet(#[from] BetError),
    /// The action is not legal in the current state.
    #[error("illegal state: {0}")]
    IllegalState(#[from] StateError),
    /// The card source failed to deliver cards.
    #[error("card source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),
}

/// Errors that can occur while saving or loading a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PersistError {
    /// Reading or writing the backing file failed.
    #[cfg(feature = "std")]
    #[error("snapshot i/o failed: {0}")]
    Io(std::io::ErrorKind),
    /// The snapshot could not be encoded.
    #[error("snapshot could not be encoded")]
    Encode,
    /// A snapshot cannot be restored while a round is running.
    #[error("cannot restore a snapshot while a bet is locked")]
    Locked,
}

#[cfg(feature = "std")]
impl From<std::io::Error> for PersistError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.kind())
    }
}
