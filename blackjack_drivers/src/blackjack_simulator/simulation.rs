use std::fmt;

use blackjack::{strategy::Strategy, Money, Session, SessionPhase};
use blackjack_drivers::ConfigBlackjackSimulator;
use log::{debug, info};

use self::private::Statistics;

mod private {
    use blackjack::{Money, Outcome, Resolution};

    #[derive(Debug, Clone, Copy, Default)]
    pub struct Statistics {
        rounds: u64,
        wins: u64,
        pushes: u64,
        losses: u64,
        blackjacks: u64,
        doubles: u64,

        total_bet: Money,
        net: Money,
        min_net: Money,
    }

    impl Statistics {
        pub fn record(&mut self, resolution: &Resolution, doubled: bool) {
            self.rounds += 1;
            if resolution.outcome.is_player_win() {
                self.wins += 1;
            } else if resolution.outcome.is_push() {
                self.pushes += 1;
            } else {
                self.losses += 1;
            }
            if resolution.outcome == Outcome::PlayerBlackjack {
                self.blackjacks += 1;
            }
            if doubled {
                self.doubles += 1;
            }

            self.total_bet += resolution.bet;
            self.net += resolution.player_delta;
            if self.min_net > self.net {
                self.min_net = self.net;
            }
        }

        pub fn get_rounds(&self) -> u64 {
            self.rounds
        }

        pub fn get_counts(&self) -> (u64, u64, u64) {
            (self.wins, self.pushes, self.losses)
        }

        pub fn get_blackjacks(&self) -> u64 {
            self.blackjacks
        }

        pub fn get_doubles(&self) -> u64 {
            self.doubles
        }

        pub fn get_total_bet(&self) -> Money {
            self.total_bet
        }

        pub fn get_net(&self) -> Money {
            self.net
        }

        pub fn get_min_net(&self) -> Money {
            self.min_net
        }

        pub fn get_rate(&self) -> f64 {
            if self.total_bet == Money::ZERO {
                return 0.0;
            }
            self.net.cents() as f64 / self.total_bet.cents() as f64
        }
    }
}

/// What a simulation run ended with.
#[derive(Debug, Clone)]
pub struct Summary {
    stats: Statistics,
    final_balance: Money,
    reshuffles: u64,
    game_over: bool,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = &self.stats;
        let (wins, pushes, losses) = stats.get_counts();
        writeln!(f, "Rounds played: {}", stats.get_rounds())?;
        writeln!(
            f,
            "Wins: {}. Pushes: {}. Losses: {}. Blackjacks: {}. Doubles: {}.",
            wins,
            pushes,
            losses,
            stats.get_blackjacks(),
            stats.get_doubles()
        )?;
        writeln!(
            f,
            "Net: {}. Total bet: {}. Rate: {:.2}%. Lowest net: {}.",
            stats.get_net(),
            stats.get_total_bet(),
            stats.get_rate() * 100.0,
            stats.get_min_net()
        )?;
        write!(
            f,
            "Final balance: {}. Reshuffles: {}.",
            self.final_balance, self.reshuffles
        )?;
        if self.game_over {
            write!(f, " Game over.")?;
        }
        Ok(())
    }
}

/// Plays up to `rounds` flat-bet rounds with the configured strategy. Stops
/// early on game over or when the balance cannot cover the bet.
pub fn simulate_rounds(
    rule: blackjack::Rule,
    simulator_config: &ConfigBlackjackSimulator,
) -> anyhow::Result<Summary> {
    let bet = simulator_config.bet_amount()?;
    let mut strategy = simulator_config.strategy_kind()?.build();
    let mut session = match simulator_config.seed {
        Some(seed) => Session::with_seed(rule, seed)?,
        None => Session::new(rule)?,
    };
    session.start_game()?;

    let mut stats = Statistics::default();
    for round_index in 0..simulator_config.rounds {
        if session.player_balance() < bet {
            info!(
                "stopping after {} rounds: balance {} cannot cover bet {}",
                round_index,
                session.player_balance(),
                bet
            );
            break;
        }
        play_round(&mut session, strategy.as_mut(), bet)?;

        let round = session
            .round()
            .ok_or_else(|| anyhow::anyhow!("round vanished before settlement"))?;
        if let Some(resolution) = round.resolution() {
            debug!(
                "round {}: {} vs {} -> {}",
                round_index + 1,
                round.player_hand().value(),
                round.dealer_hand().value(),
                resolution.outcome
            );
            stats.record(&resolution, round.is_doubled_down());
        }

        if session.phase() == SessionPhase::GameOver {
            break;
        }
        session.start_new_round()?;
    }

    Ok(Summary {
        stats,
        final_balance: session.player_balance(),
        reshuffles: session.shoe().reshuffle_count(),
        game_over: session.is_game_over(),
    })
}

fn play_round(session: &mut Session, strategy: &mut dyn Strategy, bet: Money) -> anyhow::Result<()> {
    session.place_bet(bet)?;
    while session.phase() == SessionPhase::InRound {
        let view = session.view();
        let round = session
            .round()
            .ok_or_else(|| anyhow::anyhow!("no round in progress"))?;
        let decision = strategy.decide(round.player_hand(), view.dealer_value, view.can_double_down);
        session.act(decision)?;
    }
    Ok(())
}
