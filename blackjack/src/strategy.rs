use serde_enum_str::{Deserialize_enum_str, Serialize_enum_str};

use crate::table::dealer;
use crate::{Decision, Hand};

pub trait Strategy {
    /// `dealer_up_value` is the base value of the dealer's face-up card (2..=11).
    fn decide(&mut self, player: &Hand, dealer_up_value: u8, can_double: bool) -> Decision;
}

/// Plays the player's hand by the dealer's own drawing rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct MimicDealer;

impl Strategy for MimicDealer {
    fn decide(&mut self, player: &Hand, _: u8, _: bool) -> Decision {
        if dealer::should_hit(player) {
            Decision::Hit
        } else {
            Decision::Stand
        }
    }
}

/// A small subset of basic strategy, without splits or surrender.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simple;

impl Strategy for Simple {
    fn decide(&mut self, player: &Hand, dealer_up_value: u8, can_double: bool) -> Decision {
        let value = player.value();

        if player.is_soft() {
            return if value < 18 {
                Decision::Hit
            } else {
                Decision::Stand
            };
        }

        match value {
            10 | 11 if can_double => Decision::Double,
            12..=16 if (2..=6).contains(&dealer_up_value) => Decision::Stand,
            v if v < 17 => Decision::Hit,
            _ => Decision::Stand,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_enum_str, Deserialize_enum_str)]
pub enum StrategyKind {
    MimicDealer,
    Simple,
}

impl StrategyKind {
    pub fn build(&self) -> Box<dyn Strategy> {
        match self {
            StrategyKind::MimicDealer => Box::new(MimicDealer),
            StrategyKind::Simple => Box::new(Simple),
        }
    }
}
