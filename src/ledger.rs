//! Bankroll, pending bet and round statistics.

use crate::error::{BetError, GameError, StateError};
use crate::options::GameOptions;
use crate::persist::Snapshot;
use crate::result::{Outcome, Settlement, payout};

/// Largest bet the table accepts.
///
/// Keeps every payout and net result exact: a win pays at most
/// `usize::MAX / 2`, which also fits in an `isize`.
pub const MAX_BET: usize = usize::MAX / 4;

/// Per-player round counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    /// Rounds settled.
    pub hands_played: usize,
    /// Rounds won (blackjacks included).
    pub wins: usize,
    /// Rounds lost.
    pub losses: usize,
    /// Rounds pushed.
    pub pushes: usize,
    /// Rounds won with a natural.
    pub blackjacks: usize,
}

impl Stats {
    fn record(&mut self, outcome: Outcome) {
        self.hands_played += 1;
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Blackjack => {
                self.wins += 1;
                self.blackjacks += 1;
            }
            Outcome::Lose => self.losses += 1,
            Outcome::Push => self.pushes += 1,
        }
    }
}

/// Tracks the bankroll and the bet riding on the current round.
///
/// The bankroll is only debited when a round starts ([`Ledger::lock_and_debit`])
/// and only credited when it settles ([`Ledger::settle`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ledger {
    bankroll: usize,
    current_bet: usize,
    locked: bool,
    stats: Stats,
}

impl Ledger {
    /// Creates a ledger with the given bankroll and no bet.
    #[must_use]
    pub const fn new(bankroll: usize) -> Self {
        Self {
            bankroll,
            current_bet: 0,
            locked: false,
            stats: Stats {
                hands_played: 0,
                wins: 0,
                losses: 0,
                pushes: 0,
                blackjacks: 0,
            },
        }
    }

    /// Returns the chip balance.
    #[must_use]
    pub const fn bankroll(&self) -> usize {
        self.bankroll
    }

    /// Returns the pending or locked bet.
    #[must_use]
    pub const fn current_bet(&self) -> usize {
        self.current_bet
    }

    /// Returns whether the bet is locked for a running round.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Returns the round counters.
    #[must_use]
    pub const fn stats(&self) -> Stats {
        self.stats
    }

    /// Adds chips to the pending bet.
    ///
    /// Repeated calls accumulate, so a bet can be built chip by chip up to
    /// the bankroll. The bankroll itself is untouched until the round starts.
    ///
    /// # Errors
    ///
    /// Returns [`BetError::ZeroBet`] for a zero amount, [`BetError::Locked`]
    /// while a round is running, [`BetError::AboveLimit`] above [`MAX_BET`]
    /// and [`BetError::InsufficientFunds`] when the total would exceed the
    /// bankroll.
    pub const fn place_bet(&mut self, amount: usize) -> Result<usize, BetError> {
        if amount == 0 {
            return Err(BetError::ZeroBet);
        }
        if self.locked {
            return Err(BetError::Locked);
        }
        let Some(total) = self.current_bet.checked_add(amount) else {
            return Err(BetError::AboveLimit);
        };
        if total > MAX_BET {
            return Err(BetError::AboveLimit);
        }
        if total > self.bankroll {
            return Err(BetError::InsufficientFunds);
        }

        self.current_bet = total;
        Ok(total)
    }

    /// Locks the pending bet and takes it out of the bankroll.
    ///
    /// # Errors
    ///
    /// Returns [`BetError::NoBet`] if nothing is bet, [`BetError::Locked`] if
    /// already locked, or [`BetError::InsufficientFunds`] if the bankroll no
    /// longer covers the bet.
    pub const fn lock_and_debit(&mut self) -> Result<usize, BetError> {
        if self.locked {
            return Err(BetError::Locked);
        }
        if self.current_bet == 0 {
            return Err(BetError::NoBet);
        }
        if self.current_bet > self.bankroll {
            return Err(BetError::InsufficientFunds);
        }

        self.bankroll -= self.current_bet;
        self.locked = true;
        Ok(self.current_bet)
    }

    /// Clears the pending bet.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::BetLocked`] while a round is running.
    pub const fn clear_bet(&mut self) -> Result<(), StateError> {
        if self.locked {
            return Err(StateError::BetLocked);
        }
        self.current_bet = 0;
        Ok(())
    }

    /// Pays out a finished round and unlocks the ledger.
    ///
    /// Credits the payout for `outcome`, clears the bet and records the
    /// outcome in the stats exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::BetNotLocked`] when no round is running.
    pub fn settle(
        &mut self,
        outcome: Outcome,
        player_value: u8,
        dealer_value: u8,
        options: &GameOptions,
    ) -> Result<Settlement, GameError> {
        if !self.locked {
            return Err(StateError::BetNotLocked.into());
        }

        let bet = self.current_bet;
        let credited = payout(outcome, bet, options);
        self.bankroll = self.bankroll.saturating_add(credited);
        self.current_bet = 0;
        self.locked = false;
        self.stats.record(outcome);

        let net = if credited >= bet {
            isize::try_from(credited - bet).unwrap_or(isize::MAX)
        } else {
            isize::try_from(bet - credited).map_or(isize::MIN, |loss| -loss)
        };

        Ok(Settlement {
            outcome,
            bet,
            payout: credited,
            net,
            player_value,
            dealer_value,
        })
    }

    /// Zeroes the round counters.
    pub const fn reset_stats(&mut self) {
        self.stats = Stats {
            hands_played: 0,
            wins: 0,
            losses: 0,
            pushes: 0,
            blackjacks: 0,
        };
    }

    /// Captures the persistent part of the ledger.
    #[must_use]
    pub const fn snapshot(&self) -> Snapshot {
        Snapshot {
            bankroll: self.bankroll,
            hands_played: self.stats.hands_played,
            wins: self.stats.wins,
            losses: self.stats.losses,
            pushes: self.stats.pushes,
            blackjacks: self.stats.blackjacks,
        }
    }

    /// Replaces bankroll and counters with a loaded snapshot.
    ///
    /// The pending bet is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::BetLocked`] while a round is running.
    pub const fn restore(&mut self, snapshot: &Snapshot) -> Result<(), StateError> {
        if self.locked {
            return Err(StateError::BetLocked);
        }
        self.bankroll = snapshot.bankroll;
        self.current_bet = 0;
        self.stats = Stats {
            hands_played: snapshot.hands_played,
            wins: snapshot.wins,
            losses: snapshot.losses,
            pushes: snapshot.pushes,
            blackjacks: snapshot.blackjacks,
        };
        Ok(())
    }
}
