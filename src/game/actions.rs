use crate::card::Card;
use crate::error::GameError;
use crate::event::Message;
use crate::hand::{BLACKJACK, DealerHand, Hand};
use crate::result::Settlement;
use crate::source::CardSource;

use super::{Action, Game, RoundState};

impl<S: CardSource> Game<S> {
    /// Player action: Hit (draw a card).
    ///
    /// A bust reveals the dealer's hand and settles the round as a loss
    /// without further dealer draws. Reaching 21 hands the turn to the dealer
    /// automatically.
    ///
    /// Once the card is in the hand the hit has succeeded. If the dealer's
    /// draws then fail after a 21, the round stays in the dealer's turn with
    /// an info message and [`Game::stand`] resumes it.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::IllegalState`] outside of the player's turn and
    /// [`GameError::SourceUnavailable`] if no card can be drawn, in which
    /// case the hand is unchanged.
    pub fn hit(&self) -> Result<Card, GameError> {
        let _guard = self.begin()?;
        self.expect_state(Action::Hit, &[RoundState::PlayerTurn])?;

        let card = self.draw_one()?;
        let mut hand = self.player_hand.lock();
        hand.add_card(card);
        let value = hand.value();
        drop(hand);
        tracing::debug!(%card, value, "player hits");

        if value > BLACKJACK {
            self.dealer_hand.lock().reveal_hole();
            self.set_state(RoundState::DealerTurn);
            self.settle()?;
        } else if value == BLACKJACK {
            self.notify();
            if let Err(err) = self.play_dealer() {
                tracing::warn!(%err, "dealer turn interrupted after hit");
                self.set_message(Message::info("Dealer's turn interrupted. Stand to resume."));
                self.notify();
            }
        } else {
            self.notify();
        }

        Ok(card)
    }

    /// Player action: Stand.
    ///
    /// Ends the player's turn and plays out the dealer. Standing again while
    /// the dealer's turn is still open resumes the dealer after a failed
    /// draw.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::IllegalState`] unless the player or the dealer
    /// is to act, and [`GameError::SourceUnavailable`] if the dealer cannot
    /// draw.
    pub fn stand(&self) -> Result<Settlement, GameError> {
        let _guard = self.begin()?;
        let state = self.expect_state(
            Action::Stand,
            &[RoundState::PlayerTurn, RoundState::DealerTurn],
        )?;
        if state == RoundState::DealerTurn {
            tracing::info!("resuming dealer turn");
        }

        self.play_dealer()
    }

    /// Clears the settled round and accepts bets again.
    ///
    /// Bankroll and statistics carry over.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::IllegalState`] unless the round is settled.
    pub fn new_round(&self) -> Result<(), GameError> {
        let _guard = self.begin()?;
        self.expect_state(Action::NewRound, &[RoundState::Settled])?;

        *self.player_hand.lock() = Hand::new();
        *self.dealer_hand.lock() = DealerHand::new();
        self.set_state(RoundState::AwaitingBet);

        let message = if self.ledger.lock().bankroll() == 0 {
            tracing::info!("bankroll exhausted");
            Message::info("You're out of chips.")
        } else {
            Message::info("Place a bet to start the next round.")
        };
        self.set_message(message);
        self.notify();

        Ok(())
    }

    /// Zeroes the round counters. Allowed in any state.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::IllegalState`] while another operation runs.
    pub fn reset_stats(&self) -> Result<(), GameError> {
        let _guard = self.begin()?;
        self.ledger.lock().reset_stats();
        tracing::debug!("stats reset");
        self.notify();
        Ok(())
    }
}
