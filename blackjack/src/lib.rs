pub mod card;
mod error;
mod money;
pub mod session;
pub mod strategy;
pub mod table;
pub mod view;

use serde::{Deserialize, Serialize};

pub use card::{Card, Rank, Suit};
pub use error::GameError;
pub use money::Money;
pub use session::{Session, SessionPhase};
pub use table::{
    hand::Hand,
    outcome::{Outcome, PushKind, Resolution},
    shoe::Shoe,
    Round, RoundPhase,
};
pub use view::{GamePhase, TableView};

/// Table rules and starting bankrolls for a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub number_of_decks: u8,
    /// Fraction of the full shoe at or below which the shoe is rebuilt.
    pub reshuffle_threshold: f64,
    pub player_starting_balance: Money,
    pub dealer_starting_balance: Money,
}

impl Default for Rule {
    fn default() -> Self {
        Rule {
            number_of_decks: 4,
            reshuffle_threshold: 0.25,
            player_starting_balance: Money::dollars(500),
            dealer_starting_balance: Money::dollars(5_000_000),
        }
    }
}

impl Rule {
    /// One deck, rebuilt only once it runs out.
    pub fn single_deck() -> Self {
        Rule {
            number_of_decks: 1,
            reshuffle_threshold: 0.0,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.number_of_decks < 1 {
            return Err(GameError::InvalidConfig(String::from(
                "number_of_decks must be at least 1",
            )));
        }
        if !(0.0..1.0).contains(&self.reshuffle_threshold) {
            return Err(GameError::InvalidConfig(format!(
                "reshuffle_threshold must be in [0, 1), got {}",
                self.reshuffle_threshold
            )));
        }
        for (field, balance) in [
            ("player_starting_balance", self.player_starting_balance),
            ("dealer_starting_balance", self.dealer_starting_balance),
        ] {
            if !balance.is_positive() {
                return Err(GameError::InvalidConfig(format!("{field} must be positive")));
            }
            if balance > Money::MAX_BALANCE {
                return Err(GameError::InvalidConfig(format!(
                    "{field} must be at most {}, got {balance}",
                    Money::MAX_BALANCE
                )));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Hit,
    Stand,
    Double,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rule_is_valid() {
        assert!(Rule::default().validate().is_ok());
        assert!(Rule::single_deck().validate().is_ok());
    }

    #[test]
    fn bad_rules_are_rejected() {
        let mut rule = Rule::default();
        rule.number_of_decks = 0;
        assert!(matches!(rule.validate(), Err(GameError::InvalidConfig(_))));

        let mut rule = Rule::default();
        rule.reshuffle_threshold = 1.0;
        assert!(rule.validate().is_err());

        let mut rule = Rule::default();
        rule.player_starting_balance = Money::ZERO;
        assert!(rule.validate().is_err());
    }

    #[test]
    fn oversized_balances_are_rejected() {
        let mut rule = Rule::default();
        rule.player_starting_balance = Money::MAX_BALANCE;
        assert!(rule.validate().is_ok());

        rule.player_starting_balance = Money::MAX_BALANCE + Money::from_cents(1);
        assert!(matches!(rule.validate(), Err(GameError::InvalidConfig(_))));

        let mut rule = Rule::default();
        rule.dealer_starting_balance = Money::from_cents(i64::MAX);
        assert!(rule.validate().is_err());
    }
}
