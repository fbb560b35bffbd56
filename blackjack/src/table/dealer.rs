use super::hand::Hand;

/// The dealer stands on every 17, soft or hard.
pub const DEALER_STANDS_ON: u8 = 17;

/// Whether the dealer must draw another card.
pub fn should_hit(hand: &Hand) -> bool {
    hand.value() < DEALER_STANDS_ON
}
