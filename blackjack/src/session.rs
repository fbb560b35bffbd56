use blackjack_macros::allowed_phase;
use log::info;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::table::{outcome::Resolution, shoe::Shoe, Round};
use crate::view::{build_table_view, TableView};
use crate::{Decision, GameError, Money, Rule};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum SessionPhase {
    Home,
    Betting,
    InRound,
    RoundOver,
    GameOver,
}

/// Everything that lives across rounds: bankrolls, the shoe and the round in
/// play. A host keeps one of these per player and drives it through commands;
/// the engine has no other state.
#[derive(Debug, Clone)]
pub struct Session {
    rule: Rule,
    phase: SessionPhase,
    player_balance: Money,
    dealer_balance: Money,
    shoe: Shoe,
    round: Option<Round>,
    history: Vec<Resolution>,
}

impl Session {
    pub fn new(rule: Rule) -> Result<Self, GameError> {
        rule.validate()?;
        let shoe = Shoe::new(rule.number_of_decks, rule.reshuffle_threshold)?;
        Ok(Self::with_shoe(rule, shoe))
    }

    /// A session whose shuffles are reproducible from `seed`.
    pub fn with_seed(rule: Rule, seed: u64) -> Result<Self, GameError> {
        rule.validate()?;
        let shoe = Shoe::with_seed(rule.number_of_decks, rule.reshuffle_threshold, seed)?;
        Ok(Self::with_shoe(rule, shoe))
    }

    fn with_shoe(rule: Rule, shoe: Shoe) -> Self {
        Self {
            rule,
            phase: SessionPhase::Home,
            player_balance: rule.player_starting_balance,
            dealer_balance: rule.dealer_starting_balance,
            shoe,
            round: None,
            history: Vec::new(),
        }
    }

    /// Can be called at Home phase. Starts from freshly shuffled decks.
    #[allowed_phase(SessionPhase::Home)]
    pub fn start_game(&mut self) -> Result<(), GameError> {
        self.shoe.rebuild();
        self.enter_betting();
        Ok(())
    }

    /// Can be called at Betting phase.
    /// On a natural the round is played out and settled before returning.
    #[allowed_phase(SessionPhase::Betting)]
    pub fn place_bet(&mut self, amount: Money) -> Result<(), GameError> {
        let mut round = Round::new();
        round.place_bet(amount, self.player_balance, &mut self.shoe)?;
        self.round = Some(round);
        self.phase = SessionPhase::InRound;
        self.advance_round()
    }

    /// Can be called at InRound phase.
    #[allowed_phase(SessionPhase::InRound)]
    pub fn hit(&mut self) -> Result<(), GameError> {
        let round = self.round.as_mut().ok_or_else(|| no_round("hit"))?;
        round.hit(&mut self.shoe)?;
        self.advance_round()
    }

    /// Can be called at InRound phase.
    #[allowed_phase(SessionPhase::InRound)]
    pub fn stand(&mut self) -> Result<(), GameError> {
        let round = self.round.as_mut().ok_or_else(|| no_round("stand"))?;
        round.stand()?;
        self.advance_round()
    }

    /// Can be called at InRound phase.
    /// The extra stake leaves the player's balance immediately and comes back
    /// at settlement, before the round's delta is applied.
    /// Only the extra stake has to be covered, so a player who bet everything
    /// and doubles can finish the round with a negative balance.
    #[allowed_phase(SessionPhase::InRound)]
    pub fn double_down(&mut self) -> Result<(), GameError> {
        let round = self.round.as_mut().ok_or_else(|| no_round("double_down"))?;
        let extra = round.double_down(self.player_balance, &mut self.shoe)?;
        self.player_balance -= extra;
        self.advance_round()
    }

    /// Applies a player decision. Same as calling `hit`, `stand` or `double_down`.
    pub fn act(&mut self, decision: Decision) -> Result<(), GameError> {
        match decision {
            Decision::Hit => self.hit(),
            Decision::Stand => self.stand(),
            Decision::Double => self.double_down(),
        }
    }

    /// Can be called at RoundOver phase. Clears the table and takes the next bet
    /// from the same shoe and balances.
    #[allowed_phase(SessionPhase::RoundOver)]
    pub fn start_new_round(&mut self) -> Result<(), GameError> {
        self.round = None;
        self.enter_betting();
        Ok(())
    }

    /// Back to the home screen with starting balances and fresh decks. Allowed
    /// in every phase.
    pub fn reset_session(&mut self) {
        info!("session reset");
        self.player_balance = self.rule.player_starting_balance;
        self.dealer_balance = self.rule.dealer_starting_balance;
        self.shoe.rebuild();
        self.round = None;
        self.history.clear();
        self.phase = SessionPhase::Home;
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == SessionPhase::GameOver
    }

    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn player_balance(&self) -> Money {
        self.player_balance
    }

    pub fn dealer_balance(&self) -> Money {
        self.dealer_balance
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    /// Resolutions of the rounds finished since the session started or was reset.
    pub fn history(&self) -> &[Resolution] {
        &self.history
    }

    pub fn rounds_played(&self) -> usize {
        self.history.len()
    }

    /// Read-only snapshot for a presentation layer.
    pub fn view(&self) -> TableView {
        build_table_view(self)
    }

    #[cfg(test)]
    pub(crate) fn shoe_mut(&mut self) -> &mut Shoe {
        &mut self.shoe
    }

    fn enter_betting(&mut self) {
        if self.player_balance.is_positive() {
            self.phase = SessionPhase::Betting;
        } else {
            self.phase = SessionPhase::GameOver;
        }
    }

    fn advance_round(&mut self) -> Result<(), GameError> {
        let Some(round) = self.round.as_mut() else {
            return Ok(());
        };
        if let Some(resolution) = round.advance(&mut self.shoe)? {
            let escrow = round.escrow();
            self.settle(escrow, resolution);
        }
        Ok(())
    }

    fn settle(&mut self, escrow: Money, resolution: Resolution) {
        self.player_balance += escrow + resolution.player_delta;
        self.dealer_balance += resolution.dealer_delta;
        self.history.push(resolution);

        if !self.player_balance.is_positive() {
            info!("game over: player is out of money");
            self.phase = SessionPhase::GameOver;
        } else if !self.dealer_balance.is_positive() {
            info!("game over: the house is broke");
            self.phase = SessionPhase::GameOver;
        } else {
            self.phase = SessionPhase::RoundOver;
        }
    }
}

fn no_round(action: &'static str) -> GameError {
    GameError::IllegalAction {
        action,
        reason: String::from("no round in progress"),
    }
}
