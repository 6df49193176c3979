use crate::error::GameError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

// --- Core types ---

/// Suit
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Suit {
    Hearts,   // ♥
    Diamonds, // ♦
    Clubs,    // ♣
    Spades,   // ♠
}

/// Rank
///
/// Point values are not carried by the rank itself: the Ace scores
/// differently depending on the score it is added to, see [`score_of`].
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

/// A single playing card.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }
}

pub const ALL_SUITS: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

pub const ALL_RANKS: [Rank; 13] = [
    Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven,
    Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace,
];

impl Suit {
    pub fn glyph(self) -> &'static str {
        match self {
            Suit::Hearts => "\u{2665}",
            Suit::Diamonds => "\u{2666}",
            Suit::Clubs => "\u{2663}",
            Suit::Spades => "\u{2660}",
        }
    }

    pub fn is_red(self) -> bool {
        matches!(self, Suit::Hearts | Suit::Diamonds)
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Ace => "Ace",
        })
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.rank, self.suit)
    }
}

impl FromStr for Rank {
    type Err = GameError;

    /// Accepts the names printed by `Display` ("2".."10", "Jack", ...), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rank = match s.trim().to_ascii_lowercase().as_str() {
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" => Rank::Ten,
            "jack" => Rank::Jack,
            "queen" => Rank::Queen,
            "king" => Rank::King,
            "ace" => Rank::Ace,
            _ => return Err(GameError::InvalidRank(s.to_string())),
        };
        Ok(rank)
    }
}

impl FromStr for Suit {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hearts" | "\u{2665}" => Ok(Suit::Hearts),
            "diamonds" | "\u{2666}" => Ok(Suit::Diamonds),
            "clubs" | "\u{2663}" => Ok(Suit::Clubs),
            "spades" | "\u{2660}" => Ok(Suit::Spades),
            _ => Err(GameError::InvalidSuit(s.to_string())),
        }
    }
}

// --- Scoring ---

/// Score threshold above which an Ace counts 1 instead of 14.
const ACE_LOW_ABOVE: u32 = 7;

/// Points a card of `rank` adds to a hand currently worth `current_score`.
///
/// Numbers count their face value, Jack/Queen/King count 11/12/13.
/// An Ace counts 14 while the running score is at most 7 and 1 once it is
/// higher, so the value depends on when the Ace is drawn.
pub fn score_of(rank: Rank, current_score: u32) -> u32 {
    match rank {
        Rank::Two => 2,
        Rank::Three => 3,
        Rank::Four => 4,
        Rank::Five => 5,
        Rank::Six => 6,
        Rank::Seven => 7,
        Rank::Eight => 8,
        Rank::Nine => 9,
        Rank::Ten => 10,
        Rank::Jack => 11,
        Rank::Queen => 12,
        Rank::King => 13,
        Rank::Ace => {
            if current_score > ACE_LOW_ABOVE { 1 } else { 14 }
        }
    }
}

// --- Deck ---

/// Builds one card of every suit and rank.
fn create_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(ALL_SUITS.len() * ALL_RANKS.len());
    for &suit in &ALL_SUITS {
        for &rank in &ALL_RANKS {
            deck.push(Card { rank, suit });
        }
    }
    deck
}

/// The cards left to draw in a round.
///
/// Cards are never shuffled up front: each draw picks uniformly among the
/// cards still present and removes the pick.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    rng: StdRng,
}

impl Deck {
    /// A full 52-card deck with an OS-seeded generator.
    pub fn new() -> Deck {
        Deck { cards: create_deck(), rng: StdRng::from_os_rng() }
    }

    /// A full 52-card deck whose draws are reproducible for a given `seed`.
    pub fn seeded(seed: u64) -> Deck {
        Deck { cards: create_deck(), rng: StdRng::seed_from_u64(seed) }
    }

    /// A deck holding exactly `cards`.
    pub fn from_cards(cards: Vec<Card>, seed: u64) -> Deck {
        Deck { cards, rng: StdRng::seed_from_u64(seed) }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn remaining(&self) -> &[Card] {
        &self.cards
    }

    /// Removes and returns a card chosen uniformly among the remaining ones.
    pub fn draw_random(&mut self) -> Result<Card, GameError> {
        if self.cards.is_empty() {
            return Err(GameError::EmptyDeck);
        }
        let idx = self.rng.random_range(0..self.cards.len());
        let card = self.cards.swap_remove(idx);
        debug!(%card, remaining = self.cards.len(), "card drawn");
        Ok(card)
    }
}

impl Default for Deck {
    fn default() -> Self {
        Deck::new()
    }
}

// --- Tests ---
