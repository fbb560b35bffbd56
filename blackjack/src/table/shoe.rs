use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use strum::IntoEnumIterator;

use crate::card::{Card, Rank, Suit};
use crate::GameError;

pub const CARDS_PER_DECK: usize = 52;

/// Represents a shoe in the real world. Cards are dealt from the end of the
/// vector, so the last card is the top of the shoe.
#[derive(Debug, Clone)]
pub struct Shoe {
    number_of_decks: u8,
    reshuffle_point: usize,
    cards: Vec<Card>,
    reshuffle_count: u64,
    rng: StdRng,
}

impl Shoe {
    /// Creates a new shuffled shoe seeded from system entropy.
    pub fn new(number_of_decks: u8, reshuffle_threshold: f64) -> Result<Shoe, GameError> {
        Self::with_rng(number_of_decks, reshuffle_threshold, StdRng::from_entropy())
    }

    /// Creates a new shuffled shoe whose shuffles are fully determined by `seed`.
    pub fn with_seed(
        number_of_decks: u8,
        reshuffle_threshold: f64,
        seed: u64,
    ) -> Result<Shoe, GameError> {
        Self::with_rng(number_of_decks, reshuffle_threshold, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        number_of_decks: u8,
        reshuffle_threshold: f64,
        rng: StdRng,
    ) -> Result<Shoe, GameError> {
        if number_of_decks < 1 {
            return Err(GameError::InvalidConfig(String::from(
                "number_of_decks must be at least 1",
            )));
        }
        if !(0.0..1.0).contains(&reshuffle_threshold) {
            return Err(GameError::InvalidConfig(format!(
                "reshuffle_threshold must be in [0, 1), got {reshuffle_threshold}"
            )));
        }
        let full_size = number_of_decks as usize * CARDS_PER_DECK;
        let mut shoe = Shoe {
            number_of_decks,
            reshuffle_point: (full_size as f64 * reshuffle_threshold).floor() as usize,
            cards: Vec::with_capacity(full_size),
            reshuffle_count: 0,
            rng,
        };
        shoe.fill_and_shuffle();
        Ok(shoe)
    }

    /// Returns every dealt card to the shoe and shuffles.
    pub fn rebuild(&mut self) {
        self.fill_and_shuffle();
        self.reshuffle_count += 1;
        debug!(
            "shoe rebuilt: {} cards, reshuffle #{}",
            self.cards.len(),
            self.reshuffle_count
        );
    }

    fn fill_and_shuffle(&mut self) {
        self.cards.clear();
        for _ in 0..self.number_of_decks {
            for suit in Suit::iter() {
                for rank in Rank::iter() {
                    self.cards.push(Card::new(rank, suit));
                }
            }
        }
        self.cards.shuffle(&mut self.rng);
    }

    /// Deals the top card. Rebuilds the shoe first if it is at or below the
    /// reshuffle point, so this never runs dry.
    pub fn deal(&mut self) -> Card {
        if self.needs_reshuffle() {
            self.rebuild();
        }
        self.cards
            .pop()
            .expect("a rebuilt shoe is always above its reshuffle point")
    }

    /// Checks if the reshuffle point has been reached.
    pub fn needs_reshuffle(&self) -> bool {
        self.cards.len() <= self.reshuffle_point
    }

    /// Moves the given cards to the top of the shoe so that they are dealt next,
    /// in the given order. The composition of the shoe does not change, so every
    /// card must still be in the shoe, counting repeats.
    pub fn stack(&mut self, firsts: &[Card]) -> Result<(), GameError> {
        let mut cards = self.cards.clone();
        let mut placed = 0;
        for card in firsts.iter().rev() {
            let searchable = cards.len() - placed;
            let index = cards[..searchable]
                .iter()
                .position(|c| c == card)
                .ok_or_else(|| {
                    GameError::InvalidConfig(format!("{card} is not available in the shoe"))
                })?;
            let card = cards.remove(index);
            cards.push(card);
            placed += 1;
        }
        self.cards = cards;
        Ok(())
    }

    pub fn size(&self) -> usize {
        self.cards.len()
    }

    pub fn full_size(&self) -> usize {
        self.number_of_decks as usize * CARDS_PER_DECK
    }

    pub fn number_of_decks(&self) -> u8 {
        self.number_of_decks
    }

    pub fn reshuffle_point(&self) -> usize {
        self.reshuffle_point
    }

    /// How many times the shoe has been rebuilt since it was created.
    pub fn reshuffle_count(&self) -> u64 {
        self.reshuffle_count
    }

    /// Previews the next few cards without dealing them, top card first.
    pub fn preview_next_few_cards(&self, number: usize) -> Vec<Card> {
        self.cards.iter().rev().take(number).copied().collect()
    }
}
