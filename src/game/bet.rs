use alloc::format;

use crate::error::{BetError, GameError};
use crate::event::Message;
use crate::hand::{DealerHand, Hand};
use crate::source::CardSource;

use super::{Action, Game, RoundState};

/// Cards needed for the initial deal: two for the player, two for the dealer.
const INITIAL_CARDS: usize = 4;

impl<S: CardSource> Game<S> {
    /// Adds chips to the pending bet.
    ///
    /// Bets accumulate until the round is dealt. The bankroll is not debited
    /// yet. Returns the new total bet.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidBet`] for a zero amount, a total above the
    /// bankroll or while the bet is locked for a running round, and
    /// [`GameError::IllegalState`] once the round is settled.
    pub fn place_bet(&self, amount: usize) -> Result<usize, GameError> {
        let _guard = self.begin()?;
        if self.ledger.lock().is_locked() {
            return Err(BetError::Locked.into());
        }
        self.expect_state(
            Action::PlaceBet,
            &[RoundState::NotStarted, RoundState::AwaitingBet],
        )?;

        let total = self.ledger.lock().place_bet(amount)?;
        self.set_state(RoundState::AwaitingBet);
        self.set_message(Message::info(format!(
            "Bet placed: {total}. Deal when ready."
        )));
        self.notify();

        Ok(total)
    }

    /// Clears the pending bet.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::IllegalState`] outside of betting.
    pub fn clear_bet(&self) -> Result<(), GameError> {
        let _guard = self.begin()?;
        self.expect_state(
            Action::ClearBet,
            &[RoundState::NotStarted, RoundState::AwaitingBet],
        )?;

        self.ledger.lock().clear_bet()?;
        self.set_message(Message::info("Bet cleared. Place a bet to start."));
        self.notify();

        Ok(())
    }

    /// Locks the bet and deals two cards each to the player and the dealer.
    ///
    /// The first two cards drawn go to the player, the next two to the
    /// dealer. Cards are drawn before the bankroll is debited, so a failing
    /// source leaves the table untouched. If either hand is a natural the
    /// round settles at once.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::IllegalState`] outside of betting,
    /// [`GameError::InvalidBet`] if nothing is bet and
    /// [`GameError::SourceUnavailable`] if the cards cannot be drawn.
    pub fn deal(&self) -> Result<(), GameError> {
        let _guard = self.begin()?;
        self.expect_state(Action::Deal, &[RoundState::AwaitingBet])?;

        let ledger = self.ledger.lock();
        if ledger.current_bet() == 0 {
            return Err(BetError::NoBet.into());
        }
        if ledger.current_bet() > ledger.bankroll() {
            return Err(BetError::InsufficientFunds.into());
        }
        drop(ledger);

        let begun = self.source.lock().begin_round();
        if let Err(err) = begun {
            tracing::warn!(%err, "card source could not start a round");
            return Err(err.into());
        }

        let mut player_cards = self.draw(INITIAL_CARDS)?;
        let dealer_cards = player_cards.split_off(2);

        let bet = self.ledger.lock().lock_and_debit()?;

        let player = Hand::from(player_cards);
        let mut dealer = DealerHand::new();
        for card in dealer_cards {
            dealer.add_card(card);
        }
        let natural = player.is_blackjack() || dealer.is_blackjack();

        *self.player_hand.lock() = player;
        *self.dealer_hand.lock() = dealer;
        *self.last_settlement.lock() = None;
        tracing::info!(bet, "round dealt");

        if natural {
            self.dealer_hand.lock().reveal_hole();
            self.settle()?;
            return Ok(());
        }

        self.set_state(RoundState::PlayerTurn);
        self.set_message(Message::info("Round started. Hit or Stand."));
        self.notify();

        Ok(())
    }
}
