//! Session configuration.
//!
//! Built by the client from command-line flags; tests build it directly
//! with pacing off and a fixed seed.

use crate::state::Pacing;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameConfig {
    /// Pause before each dealer decision.
    pub pacing: Pacing,
    /// Seed for the per-round decks. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Shorthand for `Pacing::Fixed`, with a zero delay meaning `Pacing::Off`.
    #[must_use]
    pub fn with_dealer_delay(self, delay: Duration) -> Self {
        if delay.is_zero() {
            self.with_pacing(Pacing::Off)
        } else {
            self.with_pacing(Pacing::Fixed(delay))
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::DEFAULT_DEALER_DELAY;

    #[test]
    fn test_default_config() {
        let config = GameConfig::new();
        assert_eq!(config.pacing, Pacing::Fixed(DEFAULT_DEALER_DELAY));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new()
            .with_dealer_delay(Duration::from_millis(50))
            .with_seed(9);
        assert_eq!(config.pacing, Pacing::Fixed(Duration::from_millis(50)));
        assert_eq!(config.seed, Some(9));

        let instant = GameConfig::new().with_dealer_delay(Duration::ZERO);
        assert_eq!(instant.pacing, Pacing::Off);
    }
}
