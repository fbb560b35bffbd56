use thiserror::Error;

use crate::Money;

/// Errors reported by the engine. None of them changes game state: the
/// operation that failed left the shoe, the round and the balances untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Bad shoe or table parameters.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Bet not positive or larger than what the player has.
    #[error("invalid bet {amount}: available balance is {balance}")]
    InvalidBet { amount: Money, balance: Money },

    /// Action invoked in the wrong phase or without meeting its preconditions.
    #[error("{action} is not allowed: {reason}")]
    IllegalAction {
        action: &'static str,
        reason: String,
    },
}
