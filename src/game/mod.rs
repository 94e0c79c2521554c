//! Round state machine and table session.

use core::sync::atomic::{AtomicBool, Ordering};

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::sync::Mutex;

use crate::card::Card;
use crate::error::{GameError, PersistError, SourceError, StateError};
use crate::event::{Intent, Message, Observer, TableView};
use crate::hand::{DealerHand, Hand};
use crate::ledger::{Ledger, Stats};
use crate::options::GameOptions;
use crate::persist::{Snapshot, SnapshotStore};
use crate::result::Settlement;
use crate::source::{CardSource, LocalShoe};

mod actions;
mod bet;
mod dealer;
pub mod state;

pub use state::{Action, RoundState};

/// Marks a mutating operation as running; cleared on drop.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// A single-player blackjack table.
///
/// The game owns the bankroll, the round's hands and the round state, and
/// draws every card from its [`CardSource`]. Operations take `&self`, so a
/// game can be shared between a UI thread and workers; only one mutating
/// operation runs at a time and any other attempt is rejected with
/// [`StateError::OperationInFlight`].
pub struct Game<S> {
    /// Where cards come from.
    pub source: Mutex<S>,
    /// Table options.
    pub options: GameOptions,
    state: Mutex<RoundState>,
    ledger: Mutex<Ledger>,
    player_hand: Mutex<Hand>,
    dealer_hand: Mutex<DealerHand>,
    message: Mutex<Option<Message>>,
    last_settlement: Mutex<Option<Settlement>>,
    in_flight: AtomicBool,
    observer: Option<Box<dyn Observer + Send + Sync>>,
}

impl Game<LocalShoe> {
    /// Creates a game on a local shoe shuffled from `seed`.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{Game, GameOptions};
    ///
    /// let game = Game::with_seed(GameOptions::default(), 42);
    /// assert_eq!(game.bankroll(), 1000);
    /// ```
    #[must_use]
    pub fn with_seed(options: GameOptions, seed: u64) -> Self {
        let shoe = LocalShoe::from_options(&options, seed);
        Self::new(options, shoe)
    }
}

impl<S: CardSource> Game<S> {
    /// Creates a game drawing from `source` with the starting bankroll from
    /// `options`.
    #[must_use]
    pub fn new(options: GameOptions, source: S) -> Self {
        let ledger = Ledger::new(options.starting_bankroll);
        Self {
            source: Mutex::new(source),
            options,
            state: Mutex::new(RoundState::NotStarted),
            ledger: Mutex::new(ledger),
            player_hand: Mutex::new(Hand::new()),
            dealer_hand: Mutex::new(DealerHand::new()),
            message: Mutex::new(Some(Message::info("Place a bet to begin."))),
            last_settlement: Mutex::new(None),
            in_flight: AtomicBool::new(false),
            observer: None,
        }
    }

    /// Attaches an observer that receives a [`TableView`] after every change.
    #[must_use]
    pub fn with_observer(mut self, observer: impl Observer + Send + Sync + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Consumes the game and returns its card source.
    pub fn into_source(self) -> S {
        self.source.into_inner()
    }

    /// Performs an intent from the presentation layer.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying operation.
    pub fn apply(&self, intent: Intent) -> Result<(), GameError> {
        match intent {
            Intent::PlaceBet(amount) => self.place_bet(amount).map(|_| ()),
            Intent::ClearBet => self.clear_bet(),
            Intent::Deal => self.deal(),
            Intent::Hit => self.hit().map(|_| ()),
            Intent::Stand => self.stand().map(|_| ()),
            Intent::NewRound => self.new_round(),
            Intent::ResetStats => self.reset_stats(),
        }
    }

    /// Returns the current round state.
    pub fn state(&self) -> RoundState {
        *self.state.lock()
    }

    /// Returns the chip balance.
    pub fn bankroll(&self) -> usize {
        self.ledger.lock().bankroll()
    }

    /// Returns the pending or locked bet.
    pub fn current_bet(&self) -> usize {
        self.ledger.lock().current_bet()
    }

    /// Returns the round counters.
    pub fn stats(&self) -> Stats {
        self.ledger.lock().stats()
    }

    /// Returns a clone of the player's hand.
    pub fn player_hand(&self) -> Hand {
        self.player_hand.lock().clone()
    }

    /// Returns a clone of the dealer's hand, hole card included.
    ///
    /// Use [`Game::view`] for what may be shown to the player.
    pub fn dealer_hand(&self) -> DealerHand {
        self.dealer_hand.lock().clone()
    }

    /// Returns the latest message.
    pub fn message(&self) -> Option<Message> {
        self.message.lock().clone()
    }

    /// Returns the settlement of the most recent round.
    pub fn last_settlement(&self) -> Option<Settlement> {
        *self.last_settlement.lock()
    }

    /// Returns whether a mutating operation is running.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Returns the number of cards left in the source, if known.
    pub fn cards_remaining(&self) -> Option<usize> {
        self.source.lock().remaining()
    }

    /// Builds the presentation view.
    ///
    /// The hole card is concealed while the round state requires it, see
    /// [`RoundState::conceals_hole_card`].
    pub fn view(&self) -> TableView {
        let state = *self.state.lock();

        let player = self.player_hand.lock();
        let player_cards = player.cards().to_vec();
        let player_score = player.value();
        drop(player);

        let conceal_hole = state.conceals_hole_card();
        let dealer = self.dealer_hand.lock();
        let dealer_cards: Vec<Option<Card>> = dealer.visible_cards(conceal_hole).collect();
        let dealer_score = dealer.visible_value(conceal_hole);
        drop(dealer);

        let ledger = self.ledger.lock().clone();

        TableView {
            state,
            player_cards,
            dealer_cards,
            player_score,
            dealer_score,
            bankroll: ledger.bankroll(),
            bet: ledger.current_bet(),
            bet_locked: ledger.is_locked(),
            stats: ledger.stats(),
            message: self.message(),
        }
    }

    /// Captures bankroll and counters for persistence.
    pub fn snapshot(&self) -> Snapshot {
        self.ledger.lock().snapshot()
    }

    /// Replaces bankroll and counters with `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::IllegalState`] while a round is running or
    /// another operation is in progress.
    pub fn restore(&self, snapshot: &Snapshot) -> Result<(), GameError> {
        let _guard = self.begin()?;
        self.ledger.lock().restore(snapshot)?;
        tracing::debug!(bankroll = snapshot.bankroll, "snapshot restored");
        self.notify();
        Ok(())
    }

    /// Saves bankroll and counters to `store`.
    ///
    /// # Errors
    ///
    /// Returns the store's error.
    pub fn save_to(&self, store: &impl SnapshotStore) -> Result<(), PersistError> {
        store.save(&self.snapshot())
    }

    /// Loads bankroll and counters from `store`.
    ///
    /// Returns `false` when the store holds no snapshot yet.
    ///
    /// # Errors
    ///
    /// Returns the store's error, or [`PersistError::Locked`] if the game
    /// cannot be restored right now.
    pub fn load_from(&self, store: &impl SnapshotStore) -> Result<bool, PersistError> {
        let Some(snapshot) = store.load(self.options.starting_bankroll)? else {
            return Ok(false);
        };
        self.restore(&snapshot).map_err(|_| PersistError::Locked)?;
        Ok(true)
    }

    fn begin(&self) -> Result<InFlight<'_>, GameError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| StateError::OperationInFlight)?;
        Ok(InFlight(&self.in_flight))
    }

    fn expect_state(&self, action: Action, allowed: &[RoundState]) -> Result<RoundState, GameError> {
        let state = *self.state.lock();
        if allowed.contains(&state) {
            Ok(state)
        } else {
            Err(StateError::WrongState { action, state }.into())
        }
    }

    fn set_state(&self, state: RoundState) {
        let mut current = self.state.lock();
        let previous = *current;
        *current = state;
        drop(current);
        tracing::debug!(from = %previous, to = %state, "round state changed");
    }

    fn set_message(&self, message: Message) {
        *self.message.lock() = Some(message);
    }

    fn notify(&self) {
        if let Some(observer) = &self.observer {
            observer.on_update(&self.view());
        }
    }

    /// Draws cards from the source.
    fn draw(&self, count: usize) -> Result<Vec<Card>, GameError> {
        let drawn = self.source.lock().draw(count);
        match drawn {
            Ok(cards) => {
                tracing::debug!(count, "cards drawn");
                Ok(cards)
            }
            Err(err) => {
                tracing::warn!(%err, count, "card source failed");
                Err(err.into())
            }
        }
    }

    fn draw_one(&self) -> Result<Card, GameError> {
        let mut cards = self.draw(1)?;
        cards.pop().ok_or_else(|| {
            GameError::from(SourceError::ShortDraw {
                requested: 1,
                received: 0,
            })
        })
    }
}
