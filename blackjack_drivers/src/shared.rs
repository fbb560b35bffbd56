use std::{fs, path::Path};

use blackjack::{strategy::StrategyKind, Money};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub rule: ConfigRule,
    pub blackjack_simulator: ConfigBlackjackSimulator,
}

/// Table rules as written in the config file. Balances are in dollars.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigRule {
    pub number_of_decks: u8,
    pub reshuffle_threshold: f64,
    pub player_starting_balance: f64,
    pub dealer_starting_balance: f64,
}

impl TryInto<blackjack::Rule> for ConfigRule {
    type Error = ConfigError;

    fn try_into(self) -> Result<blackjack::Rule, Self::Error> {
        let blackjack_rule = blackjack::Rule {
            number_of_decks: self.number_of_decks,
            reshuffle_threshold: self.reshuffle_threshold,
            player_starting_balance: dollars(
                "player_starting_balance",
                self.player_starting_balance,
            )?,
            dealer_starting_balance: dollars(
                "dealer_starting_balance",
                self.dealer_starting_balance,
            )?,
        };
        blackjack_rule.validate()?;

        Ok(blackjack_rule)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigBlackjackSimulator {
    pub rounds: u64,
    /// Flat bet per round, in dollars.
    pub bet: f64,
    pub strategy: String,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl ConfigBlackjackSimulator {
    pub fn strategy_kind(&self) -> Result<StrategyKind, ConfigError> {
        self.strategy
            .parse()
            .map_err(|_| ConfigError::UnknownStrategy(self.strategy.clone()))
    }

    pub fn bet_amount(&self) -> Result<Money, ConfigError> {
        let bet = dollars("bet", self.bet)?;
        if !bet.is_positive() {
            return Err(ConfigError::InvalidAmount {
                field: "bet",
                value: self.bet,
            });
        }
        Ok(bet)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{field} is not a valid dollar amount: {value}")]
    InvalidAmount { field: &'static str, value: f64 },
    #[error("unknown strategy {0:?}")]
    UnknownStrategy(String),
    #[error(transparent)]
    Rule(#[from] blackjack::GameError),
}

fn dollars(field: &'static str, value: f64) -> Result<Money, ConfigError> {
    Money::from_dollars_f64(value).ok_or(ConfigError::InvalidAmount { field, value })
}

/// Reads the content of a given config file and parses it to a Config.
pub fn parse_config_from_file(filename: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let file_content = fs::read_to_string(filename)?;
    parse_config(&file_content)
}

pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(serde_yaml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TYPICAL_CONFIG: &str = "
rule:
  number_of_decks: 4
  reshuffle_threshold: 0.25
  player_starting_balance: 500.0
  dealer_starting_balance: 5000000.0
blackjack_simulator:
  rounds: 1000
  bet: 10.0
  strategy: Simple
  seed: 42
";

    fn get_typical_config_rule() -> ConfigRule {
        ConfigRule {
            number_of_decks: 6,
            reshuffle_threshold: 0.5,
            player_starting_balance: 250.5,
            dealer_starting_balance: 10000.0,
        }
    }

    #[test]
    fn can_convert_rule() {
        let config_rule = get_typical_config_rule();
        let converted_rule: blackjack::Rule = config_rule.try_into().unwrap();
        assert_eq!(converted_rule.number_of_decks, 6);
        assert_eq!(converted_rule.reshuffle_threshold, 0.5);
        assert_eq!(converted_rule.player_starting_balance, Money::from_cents(25050));
        assert_eq!(converted_rule.dealer_starting_balance, Money::dollars(10000));
    }

    #[test]
    fn should_return_error_when_converting_rule() {
        let mut config_rule = get_typical_config_rule();
        config_rule.number_of_decks = 0;
        let convert_result: Result<blackjack::Rule, ConfigError> = config_rule.try_into();
        assert!(matches!(convert_result, Err(ConfigError::Rule(_))));

        let mut config_rule = get_typical_config_rule();
        config_rule.player_starting_balance = f64::NAN;
        let convert_result: Result<blackjack::Rule, ConfigError> = config_rule.try_into();
        assert!(matches!(
            convert_result,
            Err(ConfigError::InvalidAmount {
                field: "player_starting_balance",
                ..
            })
        ));
    }

    #[test]
    fn can_parse_typical_config() {
        let config = parse_config(TYPICAL_CONFIG).unwrap();
        assert_eq!(config.blackjack_simulator.rounds, 1000);
        assert_eq!(config.blackjack_simulator.seed, Some(42));
        assert_eq!(
            config.blackjack_simulator.strategy_kind().unwrap(),
            StrategyKind::Simple
        );
        assert_eq!(
            config.blackjack_simulator.bet_amount().unwrap(),
            Money::dollars(10)
        );
        let rule: blackjack::Rule = config.rule.try_into().unwrap();
        assert_eq!(rule, blackjack::Rule::default());
    }

    #[test]
    fn seed_is_optional() {
        let content = TYPICAL_CONFIG.replace("  seed: 42\n", "");
        let config = parse_config(&content).unwrap();
        assert_eq!(config.blackjack_simulator.seed, None);
    }

    #[test]
    fn unknown_strategy_is_reported() {
        let content = TYPICAL_CONFIG.replace("Simple", "Martingale");
        let config = parse_config(&content).unwrap();
        assert!(matches!(
            config.blackjack_simulator.strategy_kind(),
            Err(ConfigError::UnknownStrategy(name)) if name == "Martingale"
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = parse_config_from_file("/definitely/not/here/.blackjack.yml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
