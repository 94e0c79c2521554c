//! Round state types.

use core::fmt;

/// Round state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundState {
    /// No bet has been placed yet this session.
    #[default]
    NotStarted,
    /// Accepting bets for the next round.
    AwaitingBet,
    /// Waiting for player actions.
    PlayerTurn,
    /// Dealer plays out their hand.
    DealerTurn,
    /// Round has ended and has been paid out.
    Settled,
}

impl RoundState {
    /// Returns whether the dealer's hole card must stay concealed.
    #[must_use]
    pub const fn conceals_hole_card(self) -> bool {
        matches!(self, Self::AwaitingBet | Self::PlayerTurn)
    }
}

impl fmt::Display for RoundState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotStarted => "not started",
            Self::AwaitingBet => "awaiting a bet",
            Self::PlayerTurn => "in the player's turn",
            Self::DealerTurn => "in the dealer's turn",
            Self::Settled => "settled",
        })
    }
}

/// An operation on the table, used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Place a bet.
    PlaceBet,
    /// Clear the bet.
    ClearBet,
    /// Deal the initial cards.
    Deal,
    /// Hit.
    Hit,
    /// Stand.
    Stand,
    /// Start a new round.
    NewRound,
    /// Reset the statistics.
    ResetStats,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::PlaceBet => "place a bet",
            Self::ClearBet => "clear the bet",
            Self::Deal => "deal",
            Self::Hit => "hit",
            Self::Stand => "stand",
            Self::NewRound => "start a new round",
            Self::ResetStats => "reset stats",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hole_card_hidden_only_before_dealer_plays() {
        assert!(RoundState::AwaitingBet.conceals_hole_card());
        assert!(RoundState::PlayerTurn.conceals_hole_card());
        assert!(!RoundState::NotStarted.conceals_hole_card());
        assert!(!RoundState::DealerTurn.conceals_hole_card());
        assert!(!RoundState::Settled.conceals_hole_card());
    }
}
