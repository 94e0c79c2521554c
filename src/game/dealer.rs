use alloc::format;

use crate::error::GameError;
use crate::event::Message;
use crate::hand::{DealerHand, Hand};
use crate::result::{Outcome, Settlement, resolve};
use crate::source::CardSource;

use super::{Game, RoundState};

impl<S: CardSource> Game<S> {
    /// Returns whether the dealer must take another card.
    fn dealer_must_draw(&self) -> bool {
        let dealer = self.dealer_hand.lock();
        let value = dealer.value();
        let soft = dealer.is_soft();
        drop(dealer);

        let stands_on = self.options.dealer_stands_on;
        value < stands_on || (value == stands_on && soft && !self.options.stand_on_soft_17)
    }

    /// Dealer reveals the hole card and draws until reaching the stand total.
    ///
    /// Observers are notified after the reveal and after every card. If the
    /// source fails part way, the round stays in [`RoundState::DealerTurn`]
    /// with the cards drawn so far, and a later stand resumes from there.
    pub(super) fn play_dealer(&self) -> Result<Settlement, GameError> {
        let revealing = !self.dealer_hand.lock().is_hole_revealed();
        if revealing {
            self.dealer_hand.lock().reveal_hole();
        }
        self.set_state(RoundState::DealerTurn);
        self.set_message(Message::info("Dealer's turn..."));
        self.notify();

        while self.dealer_must_draw() {
            let card = self.draw_one()?;
            self.dealer_hand.lock().add_card(card);
            tracing::debug!(%card, "dealer draws");
            self.notify();
        }

        self.settle()
    }

    /// Resolves the round, pays the ledger and moves to [`RoundState::Settled`].
    pub(super) fn settle(&self) -> Result<Settlement, GameError> {
        let player = self.player_hand.lock().clone();
        let dealer = self.dealer_hand.lock().clone();
        let outcome = resolve(&player, &dealer);

        let mut ledger = self.ledger.lock();
        let settlement = ledger.settle(outcome, player.value(), dealer.value(), &self.options)?;
        let bankroll = ledger.bankroll();
        drop(ledger);

        *self.last_settlement.lock() = Some(settlement);
        self.set_state(RoundState::Settled);
        tracing::info!(
            %outcome,
            bet = settlement.bet,
            payout = settlement.payout,
            player = settlement.player_value,
            dealer = settlement.dealer_value,
            bankroll,
            "round settled"
        );

        let headline = headline(outcome, &player, &dealer);
        self.set_message(Message::new(
            outcome.into(),
            format!("{headline} (Bet: {} | Chips: {bankroll})", settlement.bet),
        ));
        self.notify();

        Ok(settlement)
    }
}

fn headline(outcome: Outcome, player: &Hand, dealer: &DealerHand) -> &'static str {
    match outcome {
        Outcome::Lose if player.is_bust() => "Player busts! Dealer wins.",
        Outcome::Lose => "Dealer wins!",
        Outcome::Win if dealer.is_bust() => "Dealer busts! Player wins!",
        Outcome::Win => "Player wins!",
        Outcome::Blackjack => "Blackjack! Player wins!",
        Outcome::Push if player.is_blackjack() => "Both have Blackjack. Push.",
        Outcome::Push => "Push (tie).",
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::card::{Card, Rank, Suit};

    fn player(ranks: &[Rank]) -> Hand {
        Hand::from(ranks.iter().map(|&rank| Card::new(rank, Suit::Clubs)).collect::<Vec<_>>())
    }

    fn dealer(ranks: &[Rank]) -> DealerHand {
        let mut dealer = DealerHand::new();
        for &rank in ranks {
            dealer.add_card(Card::new(rank, Suit::Diamonds));
        }
        dealer
    }

    #[test]
    fn headlines_follow_the_cause() {
        let bust = player(&[Rank::King, Rank::Six, Rank::Nine]);
        let natural = player(&[Rank::Ace, Rank::King]);
        let twenty = player(&[Rank::King, Rank::Queen]);
        let dealer_bust = dealer(&[Rank::King, Rank::Six, Rank::Ten]);
        let dealer_natural = dealer(&[Rank::Ace, Rank::Jack]);
        let dealer_twenty = dealer(&[Rank::Ten, Rank::Jack]);

        assert_eq!(
            headline(Outcome::Lose, &bust, &dealer_twenty),
            "Player busts! Dealer wins."
        );
        assert_eq!(
            headline(Outcome::Win, &twenty, &dealer_bust),
            "Dealer busts! Player wins!"
        );
        assert_eq!(
            headline(Outcome::Push, &natural, &dealer_natural),
            "Both have Blackjack. Push."
        );
        assert_eq!(headline(Outcome::Push, &twenty, &dealer_twenty), "Push (tie).");
        assert_eq!(headline(Outcome::Lose, &twenty, &dealer_natural), "Dealer wins!");
    }
}
