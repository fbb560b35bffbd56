use serde::{Deserialize, Serialize};

use crate::card::Card;

pub const BLACKJACK: u8 = 21;

/// Cards of one hand, in the order they were dealt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Hand {
        Hand {
            cards: Vec::with_capacity(3),
        }
    }

    pub fn from_cards(cards: &[Card]) -> Hand {
        Hand {
            cards: cards.to_vec(),
        }
    }

    /// The hand receives a given card.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Best total: Aces count 11 until that would bust, then 1 each.
    pub fn value(&self) -> u8 {
        self.value_and_soft_aces().0
    }

    /// Whether an Ace is still being counted as 11.
    pub fn is_soft(&self) -> bool {
        self.value_and_soft_aces().1 > 0
    }

    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.value() == BLACKJACK
    }

    pub fn is_bust(&self) -> bool {
        self.value() > BLACKJACK
    }

    /// Base value of the first card, or 0 for an empty hand.
    pub fn up_card_value(&self) -> u8 {
        self.cards.first().map_or(0, Card::base_value)
    }

    fn value_and_soft_aces(&self) -> (u8, u8) {
        let mut total: u32 = 0;
        let mut soft_aces: u8 = 0;
        for card in &self.cards {
            total += card.base_value() as u32;
            if card.is_ace() {
                soft_aces += 1;
            }
        }
        while total > BLACKJACK as u32 && soft_aces > 0 {
            total -= 10;
            soft_aces -= 1;
        }
        (total.min(u8::MAX as u32) as u8, soft_aces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(cards: &[&str]) -> Hand {
        let cards: Vec<Card> = cards.iter().map(|c| c.parse().unwrap()).collect();
        Hand::from_cards(&cards)
    }

    #[test]
    fn empty_hand_is_zero() {
        let hand = Hand::new();
        assert_eq!(hand.value(), 0);
        assert!(!hand.is_blackjack());
        assert!(!hand.is_bust());
        assert_eq!(hand.up_card_value(), 0);
    }

    #[test]
    fn face_cards_count_ten() {
        assert_eq!(hand(&["Kh", "Qs"]).value(), 20);
        assert_eq!(hand(&["2h", "3s"]).value(), 5);
    }

    #[test]
    fn soft_and_hard_aces() {
        let soft = hand(&["Ah", "6s"]);
        assert_eq!(soft.value(), 17);
        assert!(soft.is_soft());

        let hard = hand(&["Ah", "6s", "9c"]);
        assert_eq!(hard.value(), 16);
        assert!(!hard.is_soft());
    }

    #[test]
    fn two_aces_and_nine_is_twenty_one() {
        let hand = hand(&["Ah", "As", "9c"]);
        assert_eq!(hand.value(), 21);
        assert!(hand.is_soft());
        assert!(!hand.is_blackjack());
    }

    #[test]
    fn many_aces_never_double_count() {
        assert_eq!(hand(&["Ah", "As", "Ad", "Ac"]).value(), 14);
        assert_eq!(hand(&["Ah", "As", "Kd"]).value(), 12);
        assert_eq!(hand(&["Ah", "As"]).value(), 12);
    }

    #[test]
    fn blackjack_needs_exactly_two_cards() {
        assert!(hand(&["Ah", "Ks"]).is_blackjack());
        assert!(hand(&["Th", "As"]).is_blackjack());
        assert!(!hand(&["7h", "7s", "7c"]).is_blackjack());
        assert_eq!(hand(&["7h", "7s", "7c"]).value(), 21);
        assert!(!hand(&["Kh", "Qs"]).is_blackjack());
    }

    #[test]
    fn bust() {
        assert!(hand(&["Kh", "Qs", "5c"]).is_bust());
        assert_eq!(hand(&["Kh", "Qs", "5c"]).value(), 25);
        assert!(!hand(&["Kh", "Qs", "Ac"]).is_bust());
    }

    #[test]
    fn value_is_recomputed_not_stored() {
        let mut h = hand(&["Ah", "5s"]);
        assert_eq!(h.value(), 16);
        h.add_card("Kc".parse().unwrap());
        assert_eq!(h.value(), 16);
        h.add_card("Kd".parse().unwrap());
        assert_eq!(h.value(), 26);
    }

    #[test]
    fn up_card_value_uses_first_card() {
        assert_eq!(hand(&["Ah", "5s"]).up_card_value(), 11);
        assert_eq!(hand(&["Qh", "5s"]).up_card_value(), 10);
    }
}
