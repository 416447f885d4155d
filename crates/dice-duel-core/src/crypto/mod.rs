//! Cryptographic primitives for the dice duel.
//!
//! This module provides:
//! - SecretCommitment and CommitmentDigest for the commit-reveal rounds
//! - combine for folding a committed value with the counterparty's value
//! - Entropy, the seam every random draw goes through

mod combine;
mod commitment;
mod entropy;

pub use combine::combine;
pub use commitment::{
    verify, CommitmentDigest, RevealedSecret, SecretCommitment, SecretKey, MIN_KEY_LEN,
};
pub use entropy::{Entropy, SystemEntropy};
