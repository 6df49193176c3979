use crate::card::Deck;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::message::{GameMessage, InputSource, OutputSink, REPLAY_PROMPT};
use crate::state::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{error, info, warn};

// --- Turns ---

/// Runs the player's turn on `deck`.
///
/// The player is asked before every card. The turn ends on a stand or as
/// soon as the score passes 21. The returned agent carries the final score:
/// 0 means the player stood without drawing.
pub fn play_player_turn(
    deck: &mut Deck,
    input: &mut dyn InputSource,
    sink: &mut dyn OutputSink,
) -> Result<TurnAgent, GameError> {
    let mut player = TurnAgent::player();
    while player.is_active() {
        let decision = player.decide(DecisionSource::Interactive(&mut *input))?;
        player.apply_decision(deck, sink)?;
        if decision == Decision::Draw {
            player.report_score(sink);
        }
        if player.score() == 0 || player.is_bust() {
            break;
        }
    }
    Ok(player)
}

/// Runs the dealer's turn against a player who stood on `player_score`.
///
/// The dealer draws while behind the player and under 21, pausing per
/// `pacing` before each decision. Stops early on a bust.
pub fn play_dealer_turn(
    deck: &mut Deck,
    player_score: u32,
    sink: &mut dyn OutputSink,
    pacing: Pacing,
) -> Result<TurnAgent, GameError> {
    let mut dealer = TurnAgent::dealer();
    while dealer.is_active() {
        let decision = dealer.decide(DecisionSource::Automated {
            opponent_score: player_score,
            pacing,
        })?;
        dealer.apply_decision(deck, sink)?;
        if decision == Decision::Draw {
            dealer.report_score(sink);
        }
        if dealer.is_bust() {
            break;
        }
    }
    Ok(dealer)
}

// --- Round ---

/// Plays one round on a fresh `deck`: the player's whole turn, then the
/// dealer's, then the comparison. Ties go to the dealer.
///
/// An `EmptyDeck` error means the round was aborted with no winner.
pub fn play_round(
    mut deck: Deck,
    input: &mut dyn InputSource,
    sink: &mut dyn OutputSink,
    pacing: Pacing,
) -> Result<RoundResult, GameError> {
    let player = play_player_turn(&mut deck, input, sink)?;
    let player_score = player.score();

    let result = if player_score == 0 {
        RoundResult { outcome: RoundOutcome::NoResult, player_score, dealer_score: None }
    } else if player.is_bust() {
        RoundResult { outcome: RoundOutcome::PlayerBust, player_score, dealer_score: None }
    } else {
        sink.emit(&GameMessage::DealerTurn);
        pacing.pause();

        let dealer = play_dealer_turn(&mut deck, player_score, sink, pacing)?;
        let dealer_score = dealer.score();
        let outcome = if dealer.is_bust() {
            RoundOutcome::DealerBust
        } else if player_score > dealer_score {
            RoundOutcome::PlayerWins
        } else {
            RoundOutcome::DealerWins
        };
        RoundResult { outcome, player_score, dealer_score: Some(dealer_score) }
    };

    if let Some(message) = result.outcome.message() {
        sink.emit(&message);
    }
    info!(
        outcome = ?result.outcome,
        player_score = result.player_score,
        dealer_score = ?result.dealer_score,
        cards_left = deck.len(),
        "round over"
    );
    Ok(result)
}

// --- Session ---

fn new_deck(seeds: &mut Option<StdRng>) -> Deck {
    match seeds {
        Some(rng) => Deck::seeded(rng.random()),
        None => Deck::new(),
    }
}

/// Plays rounds until the replay prompt is answered with "exit" (any case)
/// or input runs out, then reports the tally and says goodbye.
///
/// A round that runs the deck dry is abandoned and counted as no result.
/// Other errors end the session.
pub fn run_session(
    config: &GameConfig,
    input: &mut dyn InputSource,
    sink: &mut dyn OutputSink,
) -> Result<Scoreboard, GameError> {
    let mut board = Scoreboard::default();
    let mut seeds = config.seed.map(StdRng::seed_from_u64);

    loop {
        let answer = match input.read_line(REPLAY_PROMPT) {
            Ok(answer) => answer,
            Err(GameError::InputClosed) => {
                warn!("input closed at the replay prompt");
                break;
            }
            Err(e) => return Err(e),
        };
        if answer.eq_ignore_ascii_case("exit") {
            break;
        }

        info!(round = board.rounds() + 1, "round started");
        match play_round(new_deck(&mut seeds), input, sink, config.pacing) {
            Ok(result) => board.record(result.outcome),
            Err(GameError::EmptyDeck) => {
                error!("deck ran out mid-round, round aborted");
                board.record(RoundOutcome::NoResult);
            }
            Err(GameError::InputClosed) => {
                warn!("input closed mid-round, round abandoned");
                break;
            }
            Err(e) => return Err(e),
        }
    }

    sink.emit(&GameMessage::SessionSummary(board));
    sink.emit(&GameMessage::Farewell);
    Ok(board)
}

// --- Tests ---
