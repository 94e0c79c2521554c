//! Card sources feeding the table.
//!
//! The game never shuffles or tracks a deck itself; it asks a [`CardSource`]
//! for cards. [`LocalShoe`] keeps a seeded in-memory shoe, and with the
//! `json` feature [`RemoteSource`] draws from a deck service.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::card::Card;
use crate::error::SourceError;

mod local;
#[cfg(feature = "json")]
pub mod remote;

pub use local::LocalShoe;
#[cfg(feature = "remote")]
pub use remote::HttpTransport;
#[cfg(feature = "json")]
pub use remote::{RemoteSource, Transport};

/// Supplies shuffled cards on demand.
///
/// Implementations must never hand out the same card twice within one
/// shuffled population and must return exactly the requested number of
/// cards or fail.
pub trait CardSource {
    /// Prepares a fresh, fully shuffled population.
    ///
    /// # Errors
    ///
    /// Returns an error if the population cannot be prepared.
    fn new_shoe(&mut self) -> Result<(), SourceError>;

    /// Called right before the initial deal of every round.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot get ready for a round.
    fn begin_round(&mut self) -> Result<(), SourceError> {
        Ok(())
    }

    /// Draws exactly `count` cards.
    ///
    /// # Errors
    ///
    /// Returns an error if the cards cannot be delivered. Nothing is retried.
    fn draw(&mut self, count: usize) -> Result<Vec<Card>, SourceError>;

    /// Returns the number of cards left in the current population, if known.
    fn remaining(&self) -> Option<usize> {
        None
    }
}

impl<S: CardSource + ?Sized> CardSource for Box<S> {
    fn new_shoe(&mut self) -> Result<(), SourceError> {
        (**self).new_shoe()
    }

    fn begin_round(&mut self) -> Result<(), SourceError> {
        (**self).begin_round()
    }

    fn draw(&mut self, count: usize) -> Result<Vec<Card>, SourceError> {
        (**self).draw(count)
    }

    fn remaining(&self) -> Option<usize> {
        (**self).remaining()
    }
}
