use crate::card::{score_of, Card, Deck};
use crate::error::GameError;
use crate::message::{GameMessage, InputSource, OutputSink, DRAW_PROMPT};
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;
use tracing::debug;

/// The score both sides try to reach without going over.
pub const TARGET_SCORE: u32 = 21;

/// Dealer "thinking" pause used when nothing else is configured.
pub const DEFAULT_DEALER_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    Player,
    Dealer,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Decision {
    Draw,  // take another card
    Stand, // stop for the rest of the round
}

/// Cosmetic pause before each automated decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    Off,
    Fixed(Duration),
}

impl Pacing {
    pub fn pause(&self) {
        if let Pacing::Fixed(delay) = *self {
            thread::sleep(delay);
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing::Fixed(DEFAULT_DEALER_DELAY)
    }
}

/// Where a [`TurnAgent`] gets its next decision from.
pub enum DecisionSource<'a> {
    /// Ask the person at the table.
    Interactive(&'a mut dyn InputSource),
    /// Dealer policy: keep drawing while behind `opponent_score`.
    Automated { opponent_score: u32, pacing: Pacing },
}

// --- Turn agent ---

/// One side of the table: a running score and whether it still draws.
///
/// Player and dealer are both `TurnAgent`s; only the [`DecisionSource`]
/// passed to [`TurnAgent::decide`] differs. Each round creates fresh agents.
#[derive(Debug, Clone)]
pub struct TurnAgent {
    role: Role,
    score: u32,
    active: bool,
    last_decision: Option<Decision>,
}

impl TurnAgent {
    pub fn new(role: Role) -> Self {
        TurnAgent { role, score: 0, active: true, last_decision: None }
    }

    pub fn player() -> Self {
        TurnAgent::new(Role::Player)
    }

    pub fn dealer() -> Self {
        TurnAgent::new(Role::Dealer)
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_bust(&self) -> bool {
        self.score > TARGET_SCORE
    }

    pub fn last_decision(&self) -> Option<Decision> {
        self.last_decision
    }

    /// Chooses whether to draw another card.
    ///
    /// At exactly 21 the agent stands without consulting `source`.
    pub fn decide(&mut self, source: DecisionSource<'_>) -> Result<Decision, GameError> {
        let decision = if self.score == TARGET_SCORE {
            Decision::Stand
        } else {
            match source {
                DecisionSource::Automated { opponent_score, pacing } => {
                    pacing.pause();
                    if self.score < TARGET_SCORE && self.score < opponent_score {
                        Decision::Draw
                    } else {
                        Decision::Stand
                    }
                }
                DecisionSource::Interactive(input) => {
                    let answer = input.read_line(DRAW_PROMPT)?;
                    match answer.to_lowercase().as_str() {
                        "y" | "yes" | "" => Decision::Draw,
                        _ => Decision::Stand,
                    }
                }
            }
        };
        debug!(role = ?self.role, score = self.score, ?decision, "decided");
        self.last_decision = Some(decision);
        Ok(decision)
    }

    /// Carries out the last decision.
    ///
    /// A draw takes a card from `deck`, reports it to `sink` and adds its
    /// points (scored against the total before the card). A stand stops the
    /// agent for good. Busting is left to the caller to detect.
    pub fn apply_decision(
        &mut self,
        deck: &mut Deck,
        sink: &mut dyn OutputSink,
    ) -> Result<Option<Card>, GameError> {
        if !self.active {
            return Ok(None);
        }
        match self.last_decision {
            Some(Decision::Draw) => {
                let card = deck.draw_random()?;
                sink.emit(&GameMessage::CardDrawn(card));
                self.score += score_of(card.rank, self.score);
                Ok(Some(card))
            }
            Some(Decision::Stand) => {
                self.active = false;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    pub fn report_score(&self, sink: &mut dyn OutputSink) {
        sink.emit(&GameMessage::Score { role: self.role, score: self.score });
    }
}

// --- Round results ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The player stood before drawing anything.
    NoResult,
    PlayerBust,
    DealerBust,
    PlayerWins,
    /// Dealer ahead or tied.
    DealerWins,
}

impl RoundOutcome {
    pub fn player_won(self) -> bool {
        matches!(self, RoundOutcome::DealerBust | RoundOutcome::PlayerWins)
    }

    pub fn player_lost(self) -> bool {
        matches!(self, RoundOutcome::PlayerBust | RoundOutcome::DealerWins)
    }

    /// The announcement for this outcome. `NoResult` is silent.
    pub fn message(self) -> Option<GameMessage> {
        match self {
            RoundOutcome::NoResult => None,
            RoundOutcome::PlayerBust => Some(GameMessage::PlayerBust),
            RoundOutcome::DealerBust => Some(GameMessage::DealerBust),
            RoundOutcome::PlayerWins => Some(GameMessage::PlayerWins),
            RoundOutcome::DealerWins => Some(GameMessage::DealerWins),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundResult {
    pub outcome: RoundOutcome,
    pub player_score: u32,
    /// `None` when the dealer never played.
    pub dealer_score: Option<u32>,
}

/// Outcomes tallied over one session.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Scoreboard {
    pub wins: u32,
    pub losses: u32,
    pub no_results: u32,
}

impl Scoreboard {
    pub fn record(&mut self, outcome: RoundOutcome) {
        if outcome.player_won() {
            self.wins += 1;
        } else if outcome.player_lost() {
            self.losses += 1;
        } else {
            self.no_results += 1;
        }
    }

    pub fn rounds(&self) -> u32 {
        self.wins + self.losses + self.no_results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Rank, Suit};
    use std::collections::VecDeque;

    fn agent_with_score(role: Role, score: u32) -> TurnAgent {
        TurnAgent { role, score, active: true, last_decision: None }
    }

    fn answers(lines: &[&str]) -> VecDeque<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    fn automated(opponent_score: u32) -> DecisionSource<'static> {
        DecisionSource::Automated { opponent_score, pacing: Pacing::Off }
    }

    #[test]
    fn test_new_agent_is_active_at_zero() {
        let agent = TurnAgent::player();
        assert_eq!(agent.score(), 0);
        assert!(agent.is_active());
        assert_eq!(agent.last_decision(), None);
        assert_eq!(agent.role(), Role::Player);
    }

    #[test]
    fn test_dealer_policy() {
        let decide = |score, opponent| {
            agent_with_score(Role::Dealer, score).decide(automated(opponent)).unwrap()
        };
        assert_eq!(decide(15, 18), Decision::Draw);
        assert_eq!(decide(19, 18), Decision::Stand);
        assert_eq!(decide(18, 18), Decision::Stand);
        assert_eq!(decide(0, 2), Decision::Draw);
    }

    #[test]
    fn test_twenty_one_always_stands() {
        let mut dealer = agent_with_score(Role::Dealer, 21);
        assert_eq!(dealer.decide(automated(30)).unwrap(), Decision::Stand);

        // The prompt is never shown: the scripted "y" stays unread.
        let mut input = answers(&["y"]);
        let mut player = agent_with_score(Role::Player, 21);
        let decision = player.decide(DecisionSource::Interactive(&mut input)).unwrap();
        assert_eq!(decision, Decision::Stand);
        assert_eq!(input.len(), 1);
    }

    #[test]
    fn test_interactive_answers() {
        let mut input =
            answers(&["y", "YES", "", "n", "no", "maybe", "yess", "  Yes ", "   ", " y"]);
        let expected = [
            Decision::Draw,
            Decision::Draw,
            Decision::Draw,
            Decision::Stand,
            Decision::Stand,
            Decision::Stand,
            Decision::Stand,
            // Answers are not trimmed: padded or blank lines stand.
            Decision::Stand,
            Decision::Stand,
            Decision::Stand,
        ];
        for want in expected {
            let mut agent = TurnAgent::player();
            assert_eq!(agent.decide(DecisionSource::Interactive(&mut input)).unwrap(), want);
            assert_eq!(agent.last_decision(), Some(want));
        }
    }

    #[test]
    fn test_interactive_closed_input_is_an_error() {
        let mut input = VecDeque::new();
        let mut agent = TurnAgent::player();
        let result = agent.decide(DecisionSource::Interactive(&mut input));
        assert!(matches!(result, Err(GameError::InputClosed)));
    }

    #[test]
    fn test_draw_scores_ace_against_previous_total() {
        let aces = Vec::from(crate::card::ALL_SUITS.map(|suit| Card::new(Rank::Ace, suit)));
        let mut deck = Deck::from_cards(aces, 3);
        let mut sink = Vec::new();
        let mut agent = TurnAgent::player();

        agent.decide(automated(100)).unwrap();
        let first = agent.apply_decision(&mut deck, &mut sink).unwrap();
        assert_eq!(first.map(|c| c.rank), Some(Rank::Ace));
        assert_eq!(agent.score(), 14);

        agent.decide(automated(100)).unwrap();
        agent.apply_decision(&mut deck, &mut sink).unwrap();
        assert_eq!(agent.score(), 15);
        assert_eq!(deck.len(), 2);
        assert!(matches!(sink.as_slice(), [GameMessage::CardDrawn(_), GameMessage::CardDrawn(_)]));
    }

    #[test]
    fn test_stand_stops_for_good() {
        let mut deck = Deck::seeded(1);
        let mut sink = Vec::new();
        let mut input = answers(&["n"]);
        let mut agent = TurnAgent::player();

        agent.decide(DecisionSource::Interactive(&mut input)).unwrap();
        assert_eq!(agent.apply_decision(&mut deck, &mut sink).unwrap(), None);
        assert!(!agent.is_active());

        // A stopped agent never draws again.
        agent.last_decision = Some(Decision::Draw);
        assert_eq!(agent.apply_decision(&mut deck, &mut sink).unwrap(), None);
        assert_eq!(deck.len(), 52);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_draw_from_empty_deck_fails() {
        let mut deck = Deck::from_cards(vec![], 0);
        let mut sink = Vec::new();
        let mut agent = TurnAgent::dealer();
        agent.decide(automated(10)).unwrap();
        assert!(matches!(agent.apply_decision(&mut deck, &mut sink), Err(GameError::EmptyDeck)));
        assert_eq!(agent.score(), 0);
    }

    #[test]
    fn test_bust_detection() {
        let mut deck = Deck::from_cards(vec![Card::new(Rank::King, Suit::Clubs)], 0);
        let mut sink = Vec::new();
        let mut agent = agent_with_score(Role::Player, 10);
        agent.last_decision = Some(Decision::Draw);
        agent.apply_decision(&mut deck, &mut sink).unwrap();
        assert_eq!(agent.score(), 23);
        assert!(agent.is_bust());
        assert!(agent.is_active());
    }

    #[test]
    fn test_report_score_uses_role() {
        let mut sink = Vec::new();
        agent_with_score(Role::Dealer, 12).report_score(&mut sink);
        agent_with_score(Role::Player, 4).report_score(&mut sink);
        assert_eq!(
            sink,
            vec![
                GameMessage::Score { role: Role::Dealer, score: 12 },
                GameMessage::Score { role: Role::Player, score: 4 },
            ]
        );
    }

    #[test]
    fn test_scoreboard_tally() {
        let mut board = Scoreboard::default();
        for outcome in [
            RoundOutcome::PlayerWins,
            RoundOutcome::DealerBust,
            RoundOutcome::PlayerBust,
            RoundOutcome::DealerWins,
            RoundOutcome::DealerWins,
            RoundOutcome::NoResult,
        ] {
            board.record(outcome);
        }
        assert_eq!(board, Scoreboard { wins: 2, losses: 3, no_results: 1 });
        assert_eq!(board.rounds(), 6);
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(RoundOutcome::NoResult.message(), None);
        assert_eq!(RoundOutcome::DealerWins.message(), Some(GameMessage::DealerWins));
        assert!(RoundOutcome::DealerBust.player_won());
        assert!(!RoundOutcome::NoResult.player_lost());
    }
}
