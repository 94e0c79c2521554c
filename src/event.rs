//! Presentation-facing types: intents in, table views out.

use alloc::string::String;
use alloc::vec::Vec;

use crate::card::Card;
use crate::game::{Action, RoundState};
use crate::ledger::Stats;
use crate::result::Outcome;

/// A user intent forwarded by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Add chips to the pending bet.
    PlaceBet(usize),
    /// Remove the pending bet.
    ClearBet,
    /// Lock the bet and deal the initial cards.
    Deal,
    /// Draw one card for the player.
    Hit,
    /// End the player's turn (or resume an interrupted dealer turn).
    Stand,
    /// Discard the settled round and accept bets again.
    NewRound,
    /// Zero the round counters.
    ResetStats,
}

impl Intent {
    /// The action this intent performs.
    #[must_use]
    pub const fn action(&self) -> Action {
        match self {
            Self::PlaceBet(_) => Action::PlaceBet,
            Self::ClearBet => Action::ClearBet,
            Self::Deal => Action::Deal,
            Self::Hit => Action::Hit,
            Self::Stand => Action::Stand,
            Self::NewRound => Action::NewRound,
            Self::ResetStats => Action::ResetStats,
        }
    }
}

/// Tag of a table message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum MessageKind {
    /// The player won even money.
    Win,
    /// The player lost.
    Lose,
    /// The round was a push.
    Push,
    /// The player won with a natural.
    BlackjackWin,
    /// Progress or guidance, not a result.
    Info,
}

impl From<Outcome> for MessageKind {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Win => Self::Win,
            Outcome::Lose => Self::Lose,
            Outcome::Push => Self::Push,
            Outcome::Blackjack => Self::BlackjackWin,
        }
    }
}

/// A human-readable message for the player.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    /// What the message reports.
    pub kind: MessageKind,
    /// Text to show.
    pub text: String,
}

impl Message {
    /// Creates an informational message.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Info,
            text: text.into(),
        }
    }

    /// Creates a message tagged with `kind`.
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Everything the presentation layer may render after a change.
///
/// Concealed dealer cards appear as `None` and are left out of
/// `dealer_score`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableView {
    /// Current round state.
    pub state: RoundState,
    /// The player's cards.
    pub player_cards: Vec<Card>,
    /// The dealer's cards; `None` marks the concealed hole card.
    pub dealer_cards: Vec<Option<Card>>,
    /// The player's score.
    pub player_score: u8,
    /// The dealer's score over the revealed cards only.
    pub dealer_score: u8,
    /// Chip balance (the locked bet is already deducted).
    pub bankroll: usize,
    /// Pending or locked bet.
    pub bet: usize,
    /// Whether the bet is locked for a running round.
    pub bet_locked: bool,
    /// Round counters.
    pub stats: Stats,
    /// The latest message, if any.
    pub message: Option<Message>,
}

impl TableView {
    /// Intents that are legal in this view's state.
    ///
    /// Presentation layers can use this to enable or disable controls.
    #[must_use]
    pub fn allowed(&self) -> Vec<Action> {
        let mut actions = Vec::new();
        match self.state {
            RoundState::NotStarted => actions.push(Action::PlaceBet),
            RoundState::AwaitingBet => {
                actions.extend([Action::PlaceBet, Action::ClearBet]);
                if self.bet > 0 {
                    actions.push(Action::Deal);
                }
            }
            RoundState::PlayerTurn => actions.extend([Action::Hit, Action::Stand]),
            RoundState::DealerTurn => actions.push(Action::Stand),
            RoundState::Settled => actions.push(Action::NewRound),
        }
        actions.push(Action::ResetStats);
        actions
    }
}

/// Receives a [`TableView`] after every change to the table.
///
/// The game holds no locks while calling the observer, so an observer may
/// query the game again.
pub trait Observer {
    /// Called after each mutation, including each card drawn.
    fn on_update(&self, view: &TableView);
}

impl<F: Fn(&TableView)> Observer for F {
    fn on_update(&self, view: &TableView) {
        self(view);
    }
}
