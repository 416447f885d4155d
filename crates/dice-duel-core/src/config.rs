//! Duel configuration.

use crate::crypto::MIN_KEY_LEN;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Fewest dice a duel can be played with.
pub const MIN_DICE: usize = 3;

/// Parameters fixed for the whole duel
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuelConfig {
    /// Faces per die (F); also the modulus of every roll
    pub faces: usize,
    /// Fewest dice accepted; values below [`MIN_DICE`] are raised to it
    pub min_dice: usize,
    /// Length in bytes of every commitment key
    pub key_len: usize,
}

impl Default for DuelConfig {
    fn default() -> Self {
        Self {
            faces: 6,
            min_dice: MIN_DICE,
            key_len: 32,
        }
    }
}

impl DuelConfig {
    /// Effective minimum number of dice
    pub fn min_dice(&self) -> usize {
        self.min_dice.max(MIN_DICE)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.faces == 0 || u32::try_from(self.faces).is_err() {
            return Err(ConfigError::Faces(self.faces));
        }
        if self.key_len < MIN_KEY_LEN {
            return Err(ConfigError::KeyTooShort {
                min: MIN_KEY_LEN,
                found: self.key_len,
            });
        }
        Ok(())
    }

    /// Roll modulus
    pub(crate) fn roll_modulus(&self) -> u32 {
        self.faces as u32
    }
}
