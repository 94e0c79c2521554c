//! Round outcome classification and payouts.

use core::fmt;

use crate::hand::{DealerHand, Hand};
use crate::options::{GameOptions, RoundingMode};

/// Result of a settled round from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// Player wins even money (dealer busts or player has higher value).
    Win,
    /// Player loses the bet (player busts or dealer has higher value).
    Lose,
    /// Push (tie), the bet is returned.
    Push,
    /// Player has a natural and the dealer does not.
    Blackjack,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Win => "win",
            Self::Lose => "lose",
            Self::Push => "push",
            Self::Blackjack => "blackjack-win",
        })
    }
}

/// Chip movement produced by settling a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settlement {
    /// The outcome of the round.
    pub outcome: Outcome,
    /// The locked bet, already debited when the round started.
    pub bet: usize,
    /// Chips credited back to the bankroll.
    pub payout: usize,
    /// Net result for the round (positive = profit, negative = loss).
    pub net: isize,
    /// The player's final hand value.
    pub player_value: u8,
    /// The dealer's final hand value.
    pub dealer_value: u8,
}

/// Classifies a finished round.
///
/// Checks run in a fixed order: a player bust loses before anything else is
/// considered, naturals are compared before totals, and only then do busts
/// and totals decide. A two-card 21 beats a drawn 21.
#[must_use]
pub fn resolve(player: &Hand, dealer: &DealerHand) -> Outcome {
    let player_blackjack = player.is_blackjack();
    let dealer_blackjack = dealer.is_blackjack();

    if player.is_bust() {
        Outcome::Lose
    } else if player_blackjack && dealer_blackjack {
        Outcome::Push
    } else if player_blackjack {
        Outcome::Blackjack
    } else if dealer_blackjack {
        Outcome::Lose
    } else if dealer.is_bust() {
        Outcome::Win
    } else {
        match player.value().cmp(&dealer.value()) {
            core::cmp::Ordering::Greater => Outcome::Win,
            core::cmp::Ordering::Less => Outcome::Lose,
            core::cmp::Ordering::Equal => Outcome::Push,
        }
    }
}

#[cfg(feature = "std")]
fn round_amount(amount: f64, mode: RoundingMode) -> usize {
    match mode {
        RoundingMode::Up => amount.ceil() as usize,
        RoundingMode::Down => amount.floor() as usize,
        RoundingMode::Nearest => amount.round() as usize,
    }
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
fn round_amount(amount: f64, mode: RoundingMode) -> usize {
    match mode {
        RoundingMode::Up => libm::ceil(amount) as usize,
        RoundingMode::Down => libm::floor(amount) as usize,
        RoundingMode::Nearest => libm::round(amount) as usize,
    }
}

/// Chips credited for an outcome on a bet that was already debited.
///
/// A loss pays nothing, a push returns the bet, a win pays double and a
/// blackjack returns the bet plus the rounded blackjack bonus.
#[must_use]
pub fn payout(outcome: Outcome, bet: usize, options: &GameOptions) -> usize {
    match outcome {
        Outcome::Lose => 0,
        Outcome::Push => bet,
        Outcome::Win => bet.saturating_mul(2),
        Outcome::Blackjack => {
            #[expect(
                clippy::cast_precision_loss,
                reason = "f64 has sufficient precision for monetary values"
            )]
            let bonus = (bet as f64) * options.blackjack_pays;
            bet.saturating_add(round_amount(bonus, options.rounding_blackjack))
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use super::*;
    use crate::card::{Card, Rank, Suit};

    fn hand(ranks: &[Rank]) -> Hand {
        let mut hand = Hand::new();
        for &rank in ranks {
            hand.add_card(Card::new(rank, Suit::Spades));
        }
        hand
    }

    fn dealer(ranks: &[Rank]) -> DealerHand {
        let mut dealer = DealerHand::new();
        for &rank in ranks {
            dealer.add_card(Card::new(rank, Suit::Hearts));
        }
        dealer
    }

    #[test]
    fn player_bust_loses_even_when_dealer_busts() {
        let outcome = resolve(
            &hand(&[Rank::Ten, Rank::Six, Rank::King]),
            &dealer(&[Rank::Ten, Rank::Six, Rank::Queen]),
        );
        assert_eq!(outcome, Outcome::Lose);
    }

    #[test]
    fn naturals_take_precedence_over_totals() {
        let natural = hand(&[Rank::Ace, Rank::King]);
        assert_eq!(resolve(&natural, &dealer(&[Rank::Ace, Rank::Queen])), Outcome::Push);
        assert_eq!(resolve(&natural, &dealer(&[Rank::Nine, Rank::Seven])), Outcome::Blackjack);
        assert_eq!(
            resolve(&natural, &dealer(&[Rank::Five, Rank::Six, Rank::Ten])),
            Outcome::Blackjack
        );

        let drawn_21 = hand(&[Rank::Seven, Rank::Seven, Rank::Seven]);
        assert_eq!(resolve(&drawn_21, &dealer(&[Rank::Ace, Rank::Jack])), Outcome::Lose);
    }

    #[test]
    fn totals_decide_the_rest() {
        let nineteen = hand(&[Rank::Ten, Rank::Nine]);
        assert_eq!(resolve(&nineteen, &dealer(&[Rank::Seven, Rank::Eight, Rank::Five])), Outcome::Lose);
        assert_eq!(resolve(&nineteen, &dealer(&[Rank::Ten, Rank::Eight])), Outcome::Win);
        assert_eq!(resolve(&nineteen, &dealer(&[Rank::Ten, Rank::Nine])), Outcome::Push);
        assert_eq!(
            resolve(&nineteen, &dealer(&[Rank::Ten, Rank::Six, Rank::Nine])),
            Outcome::Win
        );
    }

    #[test]
    fn payouts_follow_table_rules() {
        let options = GameOptions::default();
        assert_eq!(payout(Outcome::Lose, 10, &options), 0);
        assert_eq!(payout(Outcome::Push, 10, &options), 10);
        assert_eq!(payout(Outcome::Win, 10, &options), 20);
        assert_eq!(payout(Outcome::Blackjack, 10, &options), 25);
        // floor(1.5 * 5) = 7
        assert_eq!(payout(Outcome::Blackjack, 5, &options), 12);

        let even_money = GameOptions::default().with_blackjack_pays(1.0);
        assert_eq!(payout(Outcome::Blackjack, 5, &even_money), 10);

        let round_up = GameOptions::default().with_rounding_blackjack(RoundingMode::Up);
        assert_eq!(payout(Outcome::Blackjack, 5, &round_up), 13);
    }

    #[test]
    fn outcome_labels() {
        let labels = vec![
            Outcome::Win.to_string(),
            Outcome::Lose.to_string(),
            Outcome::Push.to_string(),
            Outcome::Blackjack.to_string(),
        ];
        assert_eq!(labels, ["win", "lose", "push", "blackjack-win"]);
    }
}
