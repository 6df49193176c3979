//! # Blackjack core
//!
//! Rules and round orchestration for a single-player card game against an
//! automated dealer. Scores run toward 21 with face cards worth 11-13 and an
//! Ace worth 14 or 1 depending on when it is drawn.
//!
//! Nothing here touches a terminal: input arrives through [`InputSource`]
//! and every announcement leaves through [`OutputSink`], so a client (or a
//! test) decides how a round is actually shown.

mod card;
mod config;
mod error;
mod logic;
mod message;
mod state;

pub use card::*;

pub use config::GameConfig;

pub use error::GameError;

pub use logic::*;

pub use message::*;

pub use state::*;
