use alloc::vec::Vec;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, DECK_SIZE, deck};
use crate::error::SourceError;
use crate::options::{GameOptions, MIN_RESHUFFLE_THRESHOLD};

use super::CardSource;

/// An in-memory shoe shuffled with a seeded generator.
///
/// At the start of a round the shoe is replaced once fewer than
/// `reshuffle_threshold` cards remain. A draw asking for more cards than are
/// left also triggers a fresh shoe, so the shoe is never drawn empty. That
/// mid-round shoe leaves out the cards already dealt this round.
#[derive(Debug, Clone)]
pub struct LocalShoe {
    cards: Vec<Card>,
    in_play: Vec<Card>,
    decks: u8,
    reshuffle_threshold: usize,
    rng: ChaCha8Rng,
    shuffles: usize,
}

impl LocalShoe {
    /// Creates and shuffles a shoe with the given number of decks.
    ///
    /// `reshuffle_threshold` is raised to at least [`MIN_RESHUFFLE_THRESHOLD`].
    #[must_use]
    pub fn new(decks: u8, reshuffle_threshold: usize, seed: u64) -> Self {
        let mut shoe = Self {
            cards: Vec::new(),
            in_play: Vec::new(),
            decks: decks.max(1),
            reshuffle_threshold: reshuffle_threshold.max(MIN_RESHUFFLE_THRESHOLD),
            rng: ChaCha8Rng::seed_from_u64(seed),
            shuffles: 0,
        };
        shoe.reshuffle();
        shoe
    }

    /// Creates a shoe from the table options.
    #[must_use]
    pub fn from_options(options: &GameOptions, seed: u64) -> Self {
        Self::new(options.decks, options.reshuffle_threshold, seed)
    }

    /// Total number of cards in a full shoe.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.decks as usize * DECK_SIZE
    }

    /// Number of times the shoe has been shuffled, the initial shuffle included.
    #[must_use]
    pub const fn shuffles(&self) -> usize {
        self.shuffles
    }

    /// Returns whether the next round should start from a fresh shoe.
    #[must_use]
    pub fn needs_reshuffle(&self) -> bool {
        self.cards.len() < self.reshuffle_threshold
    }

    /// Puts `draws` on top of the shoe so they come out in the given order.
    ///
    /// Meant for replays and tests; the cards are not removed from the rest
    /// of the shoe.
    pub fn stack(&mut self, draws: &[Card]) {
        self.cards.extend(draws.iter().rev());
    }

    /// Number of cards dealt since the round began.
    #[must_use]
    pub fn in_play(&self) -> usize {
        self.in_play.len()
    }

    /// Refills the shoe with every card not currently on the table.
    fn reshuffle(&mut self) {
        let mut cards = Vec::with_capacity(self.capacity());
        for _ in 0..self.decks {
            cards.extend(deck());
        }
        for dealt in &self.in_play {
            if let Some(index) = cards.iter().position(|card| card == dealt) {
                cards.swap_remove(index);
            }
        }
        cards.shuffle(&mut self.rng);
        self.cards = cards;
        self.shuffles += 1;
        tracing::debug!(cards = self.cards.len(), "shoe shuffled");
    }
}

impl CardSource for LocalShoe {
    fn new_shoe(&mut self) -> Result<(), SourceError> {
        self.in_play.clear();
        self.reshuffle();
        Ok(())
    }

    fn begin_round(&mut self) -> Result<(), SourceError> {
        self.in_play.clear();
        if self.needs_reshuffle() {
            self.reshuffle();
        }
        Ok(())
    }

    fn draw(&mut self, count: usize) -> Result<Vec<Card>, SourceError> {
        if self.cards.len() < count {
            if count > self.capacity().saturating_sub(self.in_play.len()) {
                return Err(SourceError::ShortDraw {
                    requested: count,
                    received: 0,
                });
            }
            tracing::debug!(in_play = self.in_play.len(), "shoe ran short mid-round");
            self.reshuffle();
        }

        let split = self.cards.len() - count;
        let mut drawn = self.cards.split_off(split);
        drawn.reverse();
        self.in_play.extend_from_slice(&drawn);
        Ok(drawn)
    }

    fn remaining(&self) -> Option<usize> {
        Some(self.cards.len())
    }
}
