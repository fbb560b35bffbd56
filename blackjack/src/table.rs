pub mod dealer;
pub mod hand;
pub mod outcome;
pub mod shoe;

use blackjack_macros::allowed_phase;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::{Card, GameError, Money};

use self::{
    hand::Hand,
    outcome::{resolve, Resolution},
    shoe::Shoe,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum RoundPhase {
    Betting,
    PlayerTurn,
    DealerTurn,
    Showdown,
    Resolved,
}

/// One round of blackjack between the player and the dealer. The round deals
/// from a shoe it borrows for each step, and reports money as deltas instead of
/// touching balances itself.
#[derive(Debug, Clone)]
pub struct Round {
    phase: RoundPhase,
    bet: Money,
    /// Extra stake taken from the player's balance when doubling down.
    escrow: Money,
    player_hand: Hand,
    dealer_hand: Hand,
    player_blackjack: bool,
    dealer_blackjack: bool,
    doubled_down: bool,
    reshuffled: bool,
    resolution: Option<Resolution>,
}

impl Round {
    pub fn new() -> Self {
        Self {
            phase: RoundPhase::Betting,
            bet: Money::ZERO,
            escrow: Money::ZERO,
            player_hand: Hand::new(),
            dealer_hand: Hand::new(),
            player_blackjack: false,
            dealer_blackjack: false,
            doubled_down: false,
            reshuffled: false,
            resolution: None,
        }
    }

    /// Can be called at Betting phase.
    /// Deals player, dealer, player, dealer. If either side has a natural the
    /// player gets no turn and the round goes straight to the dealer.
    #[allowed_phase(RoundPhase::Betting)]
    pub fn place_bet(
        &mut self,
        amount: Money,
        player_balance: Money,
        shoe: &mut Shoe,
    ) -> Result<(), GameError> {
        if !amount.is_positive() || amount > player_balance {
            return Err(GameError::InvalidBet {
                amount,
                balance: player_balance,
            });
        }
        self.bet = amount;

        for _ in 0..2 {
            let card = self.deal_from(shoe);
            self.player_hand.add_card(card);
            let card = self.deal_from(shoe);
            self.dealer_hand.add_card(card);
        }
        self.player_blackjack = self.player_hand.is_blackjack();
        self.dealer_blackjack = self.dealer_hand.is_blackjack();

        if self.player_blackjack || self.dealer_blackjack {
            self.move_to(RoundPhase::DealerTurn);
        } else {
            self.move_to(RoundPhase::PlayerTurn);
        }
        Ok(())
    }

    /// Can be called at PlayerTurn phase.
    /// A bust ends the player's turn and skips the dealer entirely.
    #[allowed_phase(RoundPhase::PlayerTurn)]
    pub fn hit(&mut self, shoe: &mut Shoe) -> Result<(), GameError> {
        let card = self.deal_from(shoe);
        self.player_hand.add_card(card);
        if self.player_hand.is_bust() {
            self.move_to(RoundPhase::Showdown);
        }
        Ok(())
    }

    /// Can be called at PlayerTurn phase.
    #[allowed_phase(RoundPhase::PlayerTurn)]
    pub fn stand(&mut self) -> Result<(), GameError> {
        self.move_to(RoundPhase::DealerTurn);
        Ok(())
    }

    /// Can be called at PlayerTurn phase, on the initial two cards only, and
    /// only if the player can cover the bet again.
    /// Returns the extra stake, which the caller must take from the player's
    /// balance right away. Exactly one card is dealt.
    #[allowed_phase(RoundPhase::PlayerTurn)]
    pub fn double_down(
        &mut self,
        player_balance: Money,
        shoe: &mut Shoe,
    ) -> Result<Money, GameError> {
        if self.player_hand.len() != 2 {
            return Err(GameError::IllegalAction {
                action: "double_down",
                reason: String::from("only allowed on the initial two cards"),
            });
        }
        if player_balance < self.bet {
            return Err(GameError::IllegalAction {
                action: "double_down",
                reason: format!(
                    "balance {} cannot cover another {}",
                    player_balance, self.bet
                ),
            });
        }

        let extra = self.bet;
        self.escrow += extra;
        self.bet += extra;
        self.doubled_down = true;

        let card = self.deal_from(shoe);
        self.player_hand.add_card(card);
        if self.player_hand.is_bust() {
            self.move_to(RoundPhase::Showdown);
        } else {
            self.move_to(RoundPhase::DealerTurn);
        }
        Ok(extra)
    }

    /// Can be called at DealerTurn phase.
    /// Reveals the hole card and draws until the dealer policy says stand. A
    /// busted player leaves the dealer hand as dealt.
    #[allowed_phase(RoundPhase::DealerTurn)]
    pub fn play_dealer(&mut self, shoe: &mut Shoe) -> Result<(), GameError> {
        if !self.player_hand.is_bust() {
            while dealer::should_hit(&self.dealer_hand) {
                let card = self.deal_from(shoe);
                self.dealer_hand.add_card(card);
            }
        }
        self.move_to(RoundPhase::Showdown);
        Ok(())
    }

    /// Can be called at Showdown phase.
    #[allowed_phase(RoundPhase::Showdown)]
    pub fn resolve(&mut self) -> Result<Resolution, GameError> {
        let resolution = resolve(
            &self.player_hand,
            &self.dealer_hand,
            self.player_blackjack,
            self.dealer_blackjack,
            self.bet,
        );
        info!(
            "round resolved: {} (player {} vs dealer {}), player {}, dealer {}",
            resolution.outcome,
            resolution.player_value,
            resolution.dealer_value,
            resolution.player_delta,
            resolution.dealer_delta
        );
        self.resolution = Some(resolution);
        self.move_to(RoundPhase::Resolved);
        Ok(resolution)
    }

    /// Runs the automatic steps (dealer play, showdown) that the current phase
    /// allows. Returns the resolution once the round is resolved, None while the
    /// round still waits for a bet or a player action.
    pub fn advance(&mut self, shoe: &mut Shoe) -> Result<Option<Resolution>, GameError> {
        loop {
            match self.phase {
                RoundPhase::Betting | RoundPhase::PlayerTurn => return Ok(None),
                RoundPhase::DealerTurn => self.play_dealer(shoe)?,
                RoundPhase::Showdown => {
                    self.resolve()?;
                }
                RoundPhase::Resolved => return Ok(self.resolution),
            }
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn bet(&self) -> Money {
        self.bet
    }

    pub fn escrow(&self) -> Money {
        self.escrow
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player_hand
    }

    pub fn dealer_hand(&self) -> &Hand {
        &self.dealer_hand
    }

    pub fn player_blackjack(&self) -> bool {
        self.player_blackjack
    }

    pub fn dealer_blackjack(&self) -> bool {
        self.dealer_blackjack
    }

    pub fn is_doubled_down(&self) -> bool {
        self.doubled_down
    }

    /// Whether the shoe was rebuilt while dealing this round.
    pub fn reshuffled(&self) -> bool {
        self.reshuffled
    }

    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    /// The dealer's hole card is face up from the dealer's turn on.
    pub fn revealed(&self) -> bool {
        matches!(
            self.phase,
            RoundPhase::DealerTurn | RoundPhase::Showdown | RoundPhase::Resolved
        )
    }

    pub fn can_double_down(&self, player_balance: Money) -> bool {
        self.phase == RoundPhase::PlayerTurn
            && self.player_hand.len() == 2
            && player_balance >= self.bet
    }

    fn deal_from(&mut self, shoe: &mut Shoe) -> Card {
        let reshuffles = shoe.reshuffle_count();
        let card = shoe.deal();
        if shoe.reshuffle_count() != reshuffles {
            self.reshuffled = true;
        }
        card
    }

    fn move_to(&mut self, phase: RoundPhase) {
        debug!("round phase {} -> {}", self.phase, phase);
        self.phase = phase;
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::new()
    }
}
