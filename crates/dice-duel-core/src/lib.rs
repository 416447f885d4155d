//! Dice Duel Core Library
//!
//! This crate provides the fairness protocol, dice definitions, and the duel
//! state machine for a two-party dice duel where neither side trusts the
//! other's randomness.

pub mod config;
pub mod crypto;
pub mod dice;
pub mod duel;
pub mod error;
pub mod protocol;

pub use config::DuelConfig;
pub use crypto::{combine, CommitmentDigest, Entropy, SecretCommitment, SecretKey, SystemEntropy};
pub use dice::{DiceSet, Die, Face, ProbabilityTable};
pub use duel::{DuelEngine, InputRequest, InputSource, Phase, PlayerInput, Reporter};
pub use error::{ConfigError, DiceError, DieProblem, DuelError};
pub use protocol::{Disclosure, DuelEvent, DuelId, DuelResult, Outcome, Party, RandomStep, Transcript};
