use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use super::hand::Hand;
use crate::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum PushKind {
    BothBlackjack,
    Tie,
}

/// How a round ended, from the player's side of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    PlayerBust,
    DealerBust,
    Push(PushKind),
    PlayerBlackjack,
    DealerBlackjack,
    PlayerWin,
    DealerWin,
}

impl Outcome {
    pub fn is_player_win(&self) -> bool {
        matches!(
            self,
            Outcome::DealerBust | Outcome::PlayerBlackjack | Outcome::PlayerWin
        )
    }

    pub fn is_push(&self) -> bool {
        matches!(self, Outcome::Push(_))
    }

    /// Player delta for a given bet. The dealer delta is its negation.
    pub fn player_delta(&self, bet: Money) -> Money {
        match self {
            Outcome::PlayerBlackjack => bet.three_halves(),
            Outcome::DealerBust | Outcome::PlayerWin => bet,
            Outcome::Push(_) => Money::ZERO,
            Outcome::PlayerBust | Outcome::DealerBlackjack | Outcome::DealerWin => -bet,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::PlayerBust => write!(f, "PlayerBust"),
            Outcome::DealerBust => write!(f, "DealerBust"),
            Outcome::Push(kind) => write!(f, "Push({kind})"),
            Outcome::PlayerBlackjack => write!(f, "PlayerBlackjack"),
            Outcome::DealerBlackjack => write!(f, "DealerBlackjack"),
            Outcome::PlayerWin => write!(f, "PlayerWin"),
            Outcome::DealerWin => write!(f, "DealerWin"),
        }
    }
}

/// The settled result of a round: outcome, final values and balance deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub outcome: Outcome,
    pub bet: Money,
    pub player_value: u8,
    pub dealer_value: u8,
    pub player_delta: Money,
    pub dealer_delta: Money,
}

/// Decides a round from its final hands. The blackjack flags are the ones
/// computed on the initial deal. First match wins: player bust, dealer bust,
/// both blackjack, player blackjack, dealer blackjack, then higher value.
pub fn resolve(
    player: &Hand,
    dealer: &Hand,
    player_blackjack: bool,
    dealer_blackjack: bool,
    bet: Money,
) -> Resolution {
    let player_value = player.value();
    let dealer_value = dealer.value();

    let outcome = if player.is_bust() {
        Outcome::PlayerBust
    } else if dealer.is_bust() {
        Outcome::DealerBust
    } else if player_blackjack && dealer_blackjack {
        Outcome::Push(PushKind::BothBlackjack)
    } else if player_blackjack {
        Outcome::PlayerBlackjack
    } else if dealer_blackjack {
        Outcome::DealerBlackjack
    } else if player_value > dealer_value {
        Outcome::PlayerWin
    } else if dealer_value > player_value {
        Outcome::DealerWin
    } else {
        Outcome::Push(PushKind::Tie)
    };

    let player_delta = outcome.player_delta(bet);
    Resolution {
        outcome,
        bet,
        player_value,
        dealer_value,
        player_delta,
        dealer_delta: -player_delta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Card;

    fn hand(cards: &[&str]) -> Hand {
        let cards: Vec<Card> = cards.iter().map(|c| c.parse().unwrap()).collect();
        Hand::from_cards(&cards)
    }

    fn resolve_hands(player: &[&str], dealer: &[&str], bet: Money) -> Resolution {
        let player = hand(player);
        let dealer = hand(dealer);
        resolve(
            &player,
            &dealer,
            player.is_blackjack(),
            dealer.is_blackjack(),
            bet,
        )
    }

    #[test]
    fn dealer_wins_on_higher_value() {
        let bet = Money::dollars(10);
        let r = resolve_hands(&["Th", "7s"], &["9h", "9s"], bet);
        assert_eq!(r.outcome, Outcome::DealerWin);
        assert_eq!((r.player_delta, r.dealer_delta), (-bet, bet));
        assert_eq!((r.player_value, r.dealer_value), (17, 18));
    }

    #[test]
    fn player_blackjack_pays_three_to_two() {
        let bet = Money::dollars(10);
        let r = resolve_hands(&["Ah", "Ks"], &["9h", "8s"], bet);
        assert_eq!(r.outcome, Outcome::PlayerBlackjack);
        assert_eq!(r.player_delta, Money::dollars(15));
        assert_eq!(r.dealer_delta, Money::dollars(-15));
    }

    #[test]
    fn both_blackjack_push() {
        let r = resolve_hands(&["Ah", "Qs"], &["Ad", "Jc"], Money::dollars(10));
        assert_eq!(r.outcome, Outcome::Push(PushKind::BothBlackjack));
        assert_eq!((r.player_delta, r.dealer_delta), (Money::ZERO, Money::ZERO));
    }

    #[test]
    fn dealer_blackjack_beats_three_card_twenty_one() {
        let player = hand(&["7h", "7s", "7c"]);
        let dealer = hand(&["Ad", "Jc"]);
        let r = resolve(&player, &dealer, false, true, Money::dollars(5));
        assert_eq!(r.outcome, Outcome::DealerBlackjack);
        assert_eq!(r.player_delta, Money::dollars(-5));
    }

    #[test]
    fn player_bust_wins_over_dealer_bust() {
        let r = resolve_hands(&["Th", "5s", "Tc"], &["Td", "6c", "Kh"], Money::dollars(10));
        assert_eq!(r.outcome, Outcome::PlayerBust);
        assert_eq!(r.player_delta, Money::dollars(-10));
    }

    #[test]
    fn dealer_bust_pays_even_money_even_against_blackjack() {
        let player = hand(&["Ah", "Ks"]);
        let dealer = hand(&["Td", "6c", "Kh"]);
        let r = resolve(&player, &dealer, true, false, Money::dollars(10));
        assert_eq!(r.outcome, Outcome::DealerBust);
        assert_eq!(r.player_delta, Money::dollars(10));
    }

    #[test]
    fn tie_is_push() {
        let r = resolve_hands(&["Th", "8s"], &["9h", "9s"], Money::dollars(10));
        assert_eq!(r.outcome, Outcome::Push(PushKind::Tie));
        assert!(r.outcome.is_push());
        assert_eq!(r.player_delta, Money::ZERO);
    }

    #[test]
    fn resolve_is_pure() {
        let player = hand(&["Th", "9s"]);
        let dealer = hand(&["8h", "Ts"]);
        let first = resolve(&player, &dealer, false, false, Money::from_cents(1234));
        let second = resolve(&player, &dealer, false, false, Money::from_cents(1234));
        assert_eq!(first, second);
        assert_eq!(first.outcome, Outcome::PlayerWin);
        assert!(first.outcome.is_player_win());
    }

    #[test]
    fn outcome_display() {
        assert_eq!(Outcome::PlayerBlackjack.to_string(), "PlayerBlackjack");
        assert_eq!(
            Outcome::Push(PushKind::BothBlackjack).to_string(),
            "Push(BothBlackjack)"
        );
    }
}
