//! Session configuration.

use crate::types::{DEFAULT_FALL_DELAY_DECREMENT_MS, DEFAULT_FALL_DELAY_MS, DEFAULT_MAX_LEVEL};

/// Environment variable holding a fixed shape seed.
pub const SEED_VAR: &str = "BLOCKFALL_SEED";

/// Read a numeric environment variable. None when unset or not a `u32`.
pub fn env_u32(key: &str) -> Option<u32> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

/// Tunables for a game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Reaching this level ends the session with a victory.
    pub max_level: u32,
    /// Fall delay on level 1.
    pub fall_delay_ms: u32,
    /// Fall delay reduction on every level advance.
    pub fall_delay_decrement_ms: u32,
    /// Key under which the session's record is stored.
    pub username: String,
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            fall_delay_ms: DEFAULT_FALL_DELAY_MS,
            fall_delay_decrement_ms: DEFAULT_FALL_DELAY_DECREMENT_MS,
            username: "player".to_string(),
            seed: 1,
        }
    }
}

impl GameConfig {
    /// Create from environment variables, falling back to defaults for
    /// anything missing or unparsable.
    pub fn from_env() -> Self {
        use std::env;

        fn parsed(key: &str, default: u32) -> u32 {
            env_u32(key).unwrap_or(default)
        }

        let defaults = Self::default();
        let username = env::var("BLOCKFALL_USERNAME")
            .or_else(|_| env::var("USER"))
            .ok()
            .and_then(|raw| crate::records::sanitize_username(&raw))
            .unwrap_or(defaults.username);

        Self {
            max_level: parsed("BLOCKFALL_MAX_LEVEL", defaults.max_level),
            fall_delay_ms: parsed("BLOCKFALL_FALL_DELAY_MS", defaults.fall_delay_ms),
            fall_delay_decrement_ms: parsed(
                "BLOCKFALL_FALL_DELAY_STEP_MS",
                defaults.fall_delay_decrement_ms,
            ),
            username,
            seed: parsed(SEED_VAR, defaults.seed),
        }
        .normalized()
    }

    /// Clamp values so every level up to `max_level` has a fall delay of at least 1ms.
    pub fn normalized(mut self) -> Self {
        self.max_level = self.max_level.max(2);
        self.fall_delay_ms = self.fall_delay_ms.max(1);
        let steps = self.max_level - 1;
        let max_decrement = (self.fall_delay_ms - 1) / steps;
        self.fall_delay_decrement_ms = self.fall_delay_decrement_ms.min(max_decrement);
        self
    }

    /// Fall delay in effect on `level` (1-based).
    pub fn fall_delay_at(&self, level: u32) -> u32 {
        let steps = level.saturating_sub(1);
        self.fall_delay_ms
            .saturating_sub(steps.saturating_mul(self.fall_delay_decrement_ms))
            .max(1)
    }
}
