//! Structured events handed to the reporter.

use crate::crypto::{CommitmentDigest, SecretKey};
use crate::dice::{Die, Face};
use crate::duel::Phase;
use crate::protocol::{Outcome, Party, RandomStep};
use serde::{Deserialize, Serialize};

/// Everything a reporter is shown, in the order it happens
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DuelEvent {
    /// Digest of a fresh commitment, before the counterparty answers
    CommitmentPublished {
        step: RandomStep,
        modulus: u32,
        digest: CommitmentDigest,
    },
    /// Counterparty's value, accepted and fixed
    InputLocked { step: RandomStep, value: u32 },
    /// Key and value of a resolved commitment
    SecretDisclosed {
        step: RandomStep,
        key: SecretKey,
        value: u32,
        counterparty: u32,
        result: u32,
    },
    FirstMover { party: Party },
    DieChosen {
        party: Party,
        index: usize,
        die: Die,
    },
    RollResolved {
        party: Party,
        face_index: usize,
        face: Face,
    },
    Finished { outcome: Outcome },
    Aborted { phase: Phase },
}
