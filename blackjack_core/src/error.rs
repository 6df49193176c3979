use std::error::Error;
use std::fmt;
use std::io;

/// Errors that abort a round or a session.
///
/// Unrecognized answers at the draw prompt are not errors: they mean "stand".
#[derive(Debug)]
pub enum GameError {
    /// A draw was attempted on a deck with no cards left.
    EmptyDeck,
    /// Text that does not name a rank.
    InvalidRank(String),
    /// Text that does not name a suit.
    InvalidSuit(String),
    /// The input collaborator reached end of input.
    InputClosed,
    Io(io::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::EmptyDeck => write!(f, "the deck is empty"),
            GameError::InvalidRank(s) => write!(f, "invalid rank: {s:?}"),
            GameError::InvalidSuit(s) => write!(f, "invalid suit: {s:?}"),
            GameError::InputClosed => write!(f, "input closed"),
            GameError::Io(e) => write!(f, "i/o error: {e}"),
        }
    }
}

impl Error for GameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GameError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for GameError {
    fn from(e: io::Error) -> Self {
        GameError::Io(e)
    }
}
