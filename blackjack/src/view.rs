use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::table::{outcome::Resolution, RoundPhase};
use crate::{Card, Money, Session, SessionPhase};

/// Where the game stands, as a presentation layer would show it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum GamePhase {
    Home,
    Betting,
    PlayerTurn,
    DealerTurn,
    Showdown,
    Resolved,
    GameOver,
}

/// Snapshot of a session. The dealer's hole card is `None` until it is revealed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableView {
    pub phase: GamePhase,
    pub player_cards: Vec<Card>,
    pub dealer_cards: Vec<Option<Card>>,
    pub player_value: u8,
    /// Only the up card's value while the hole card is hidden.
    pub dealer_value: u8,
    pub dealer_revealed: bool,
    pub bet: Money,
    pub doubled_down: bool,
    pub can_double_down: bool,
    pub player_balance: Money,
    pub dealer_balance: Money,
    pub last_resolution: Option<Resolution>,
    /// The shoe was rebuilt while dealing the current round.
    pub reshuffled: bool,
    pub needs_reshuffle: bool,
    pub rounds_played: usize,
}

pub fn build_table_view(session: &Session) -> TableView {
    let round = session.round();

    let phase = match session.phase() {
        SessionPhase::Home => GamePhase::Home,
        SessionPhase::Betting => GamePhase::Betting,
        SessionPhase::RoundOver => GamePhase::Resolved,
        SessionPhase::GameOver => GamePhase::GameOver,
        SessionPhase::InRound => match round.map(|r| r.phase()) {
            Some(RoundPhase::PlayerTurn) => GamePhase::PlayerTurn,
            Some(RoundPhase::DealerTurn) => GamePhase::DealerTurn,
            Some(RoundPhase::Showdown) => GamePhase::Showdown,
            Some(RoundPhase::Resolved) => GamePhase::Resolved,
            Some(RoundPhase::Betting) | None => GamePhase::Betting,
        },
    };

    let mut view = TableView {
        phase,
        player_cards: Vec::new(),
        dealer_cards: Vec::new(),
        player_value: 0,
        dealer_value: 0,
        dealer_revealed: false,
        bet: Money::ZERO,
        doubled_down: false,
        can_double_down: false,
        player_balance: session.player_balance(),
        dealer_balance: session.dealer_balance(),
        last_resolution: session.history().last().copied(),
        reshuffled: false,
        needs_reshuffle: session.shoe().needs_reshuffle(),
        rounds_played: session.rounds_played(),
    };

    if let Some(round) = round {
        let dealer = round.dealer_hand();
        let revealed = round.revealed();
        view.player_cards = round.player_hand().cards().to_vec();
        view.player_value = round.player_hand().value();
        view.dealer_revealed = revealed;
        if revealed {
            view.dealer_cards = dealer.cards().iter().copied().map(Some).collect();
            view.dealer_value = dealer.value();
        } else {
            view.dealer_cards = dealer
                .cards()
                .iter()
                .enumerate()
                .map(|(i, card)| if i == 0 { Some(*card) } else { None })
                .collect();
            view.dealer_value = dealer.up_card_value();
        }
        view.bet = round.bet();
        view.doubled_down = round.is_doubled_down();
        view.can_double_down = round.can_double_down(session.player_balance());
        view.reshuffled = round.reshuffled();
    }

    view
}
