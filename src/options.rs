//! Table configuration options.

/// Rounding mode for payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest.
    Nearest,
}

/// Smallest reshuffle threshold: the cards needed for the initial deal.
pub const MIN_RESHUFFLE_THRESHOLD: usize = 4;

/// Configuration options for a blackjack table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjtable::GameOptions;
///
/// let options = GameOptions::default()
///     .with_decks(6)
///     .with_blackjack_pays(1.5)
///     .with_starting_bankroll(500);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameOptions {
    /// Number of decks in the local shoe.
    pub decks: u8,
    /// Bankroll for a fresh player (also the fallback for invalid snapshots).
    pub starting_bankroll: usize,
    /// Blackjack payout ratio on top of the returned bet (typically 1.5).
    pub blackjack_pays: f64,
    /// Rounding mode for blackjack payouts.
    pub rounding_blackjack: RoundingMode,
    /// The dealer draws while the hand is below this total.
    pub dealer_stands_on: u8,
    /// Whether the dealer stands on a soft total equal to `dealer_stands_on`.
    pub stand_on_soft_17: bool,
    /// The local shoe is replaced once fewer cards than this remain.
    /// Never below [`MIN_RESHUFFLE_THRESHOLD`].
    pub reshuffle_threshold: usize,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            decks: 1,
            starting_bankroll: 1000,
            blackjack_pays: 1.5,
            rounding_blackjack: RoundingMode::Down,
            dealer_stands_on: 17,
            stand_on_soft_17: true,
            reshuffle_threshold: 15,
        }
    }
}

impl GameOptions {
    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_decks(6);
    /// assert_eq!(options.decks, 6);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the starting bankroll.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_starting_bankroll(250);
    /// assert_eq!(options.starting_bankroll, 250);
    /// ```
    #[must_use]
    pub const fn with_starting_bankroll(mut self, bankroll: usize) -> Self {
        self.starting_bankroll = bankroll;
        self
    }

    /// Sets the blackjack payout ratio.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_blackjack_pays(1.0);
    /// assert_eq!(options.blackjack_pays, 1.0);
    /// ```
    #[must_use]
    pub const fn with_blackjack_pays(mut self, ratio: f64) -> Self {
        self.blackjack_pays = ratio;
        self
    }

    /// Sets the rounding mode for blackjack payouts.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{GameOptions, RoundingMode};
    ///
    /// let options = GameOptions::default().with_rounding_blackjack(RoundingMode::Up);
    /// assert_eq!(options.rounding_blackjack, RoundingMode::Up);
    /// ```
    #[must_use]
    pub const fn with_rounding_blackjack(mut self, mode: RoundingMode) -> Self {
        self.rounding_blackjack = mode;
        self
    }

    /// Sets the total the dealer stands on.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_dealer_stands_on(16);
    /// assert_eq!(options.dealer_stands_on, 16);
    /// ```
    #[must_use]
    pub const fn with_dealer_stands_on(mut self, total: u8) -> Self {
        self.dealer_stands_on = total;
        self
    }

    /// Sets whether the dealer stands on soft 17.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_stand_on_soft_17(false);
    /// assert_eq!(options.stand_on_soft_17, false);
    /// ```
    #[must_use]
    pub const fn with_stand_on_soft_17(mut self, stand: bool) -> Self {
        self.stand_on_soft_17 = stand;
        self
    }

    /// Sets the reshuffle threshold of the local shoe, raised to at least
    /// [`MIN_RESHUFFLE_THRESHOLD`].
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{GameOptions, MIN_RESHUFFLE_THRESHOLD};
    ///
    /// let options = GameOptions::default().with_reshuffle_threshold(20);
    /// assert_eq!(options.reshuffle_threshold, 20);
    ///
    /// let options = GameOptions::default().with_reshuffle_threshold(0);
    /// assert_eq!(options.reshuffle_threshold, MIN_RESHUFFLE_THRESHOLD);
    /// ```
    #[must_use]
    pub const fn with_reshuffle_threshold(mut self, cards: usize) -> Self {
        self.reshuffle_threshold = if cards < MIN_RESHUFFLE_THRESHOLD {
            MIN_RESHUFFLE_THRESHOLD
        } else {
            cards
        };
        self
    }
}
