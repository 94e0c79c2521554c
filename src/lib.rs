//! A single-player blackjack table with optional `no_std` support.
//!
//! The crate provides a [`Game`] type that runs one player against the
//! dealer: betting, the initial deal, hit and stand, dealer play and
//! settlement against a persistent bankroll. Cards come from a pluggable
//! [`CardSource`], either a seeded in-memory [`LocalShoe`] or, with the
//! `json` feature, a [`RemoteSource`] backed by a deck service.
//!
//! A presentation layer drives the table with [`Intent`]s and renders the
//! [`TableView`] handed to its [`Observer`] after every change.
//!
//! # Example
//!
//! ```
//! use bjtable::{Game, GameOptions, RoundState};
//!
//! let game = Game::with_seed(GameOptions::default(), 42);
//! game.place_bet(100).unwrap();
//! game.deal().unwrap();
//! if game.state() == RoundState::PlayerTurn {
//!     game.stand().unwrap();
//! }
//! assert_eq!(game.state(), RoundState::Settled);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod error;
pub mod event;
pub mod game;
pub mod hand;
pub mod ledger;
pub mod options;
pub mod persist;
pub mod result;
pub mod source;
mod sync;

// Re-export main types
pub use card::{Card, DECK_SIZE, Rank, Suit};
pub use error::{BetError, GameError, PersistError, SourceError, StateError};
pub use event::{Intent, Message, MessageKind, Observer, TableView};
pub use game::{Action, Game, RoundState};
pub use hand::{BLACKJACK, DealerHand, Hand, is_blackjack, score};
pub use ledger::{Ledger, MAX_BET, Stats};
pub use options::{GameOptions, MIN_RESHUFFLE_THRESHOLD, RoundingMode};
#[cfg(all(feature = "std", feature = "json"))]
pub use persist::JsonFileStore;
pub use persist::{Snapshot, SnapshotStore};
pub use result::{Outcome, Settlement, payout, resolve};
#[cfg(feature = "remote")]
pub use source::HttpTransport;
pub use source::{CardSource, LocalShoe};
#[cfg(feature = "json")]
pub use source::{RemoteSource, Transport};
