use crate::card::Card;
use crate::error::GameError;
use crate::state::{Role, Scoreboard};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

// --- Prompts ---

pub const DRAW_PROMPT: &str = "Do you want a card? (Y/N) ";
pub const REPLAY_PROMPT: &str = "Press Enter to play or type EXIT ";

// --- Game -> output sink ---
// Everything a round or session tells the person at the table.

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum GameMessage {
    /// A card left the deck.
    CardDrawn(Card),
    /// Running score after a draw.
    Score { role: Role, score: u32 },
    /// The player is done and the dealer starts drawing.
    DealerTurn,
    /// The player went over 21. The dealer does not play.
    PlayerBust,
    /// The dealer went over 21.
    DealerBust,
    /// Both stood and the player is ahead.
    PlayerWins,
    /// Both stood and the dealer is ahead or tied.
    DealerWins,
    /// Tally printed when the session ends.
    SessionSummary(Scoreboard),
    Farewell,
}

impl fmt::Display for GameMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameMessage::CardDrawn(card) => write!(f, "<<< {card} >>>"),
            GameMessage::Score { role: Role::Player, score } => write!(f, "Your score is: {score}"),
            GameMessage::Score { role: Role::Dealer, score } => {
                write!(f, "Dealer's score is: {score}")
            }
            GameMessage::DealerTurn => write!(f, "It's dealer's turn."),
            GameMessage::PlayerBust => write!(f, "You went over 21, you lost :("),
            GameMessage::DealerBust => write!(f, "You win, dealer got over 21!!"),
            GameMessage::PlayerWins => write!(f, "You won the game yaaay!!"),
            GameMessage::DealerWins => write!(f, "You lost! :("),
            GameMessage::SessionSummary(board) => write!(
                f,
                "Rounds won: {}, lost: {}, no result: {}",
                board.wins, board.losses, board.no_results
            ),
            GameMessage::Farewell => write!(f, "See you again!"),
        }
    }
}

// --- Collaborators ---

/// Line-oriented source of answers typed at the table.
pub trait InputSource {
    /// Shows `prompt` and returns the next line without its line terminator.
    ///
    /// Returns [`GameError::InputClosed`] once no more input will arrive.
    fn read_line(&mut self, prompt: &str) -> Result<String, GameError>;
}

/// Receives every message a round produces, in order.
pub trait OutputSink {
    fn emit(&mut self, message: &GameMessage);
}

/// Pre-recorded answers, consumed front to back.
impl InputSource for VecDeque<String> {
    fn read_line(&mut self, _prompt: &str) -> Result<String, GameError> {
        self.pop_front().ok_or(GameError::InputClosed)
    }
}

/// Records the transcript.
impl OutputSink for Vec<GameMessage> {
    fn emit(&mut self, message: &GameMessage) {
        self.push(message.clone());
    }
}
