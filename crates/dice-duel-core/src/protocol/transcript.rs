//! Record of every disclosed commitment of a duel.

use crate::crypto::{combine, CommitmentDigest, SecretKey};
use crate::protocol::{DuelId, RandomStep};
use serde::{Deserialize, Serialize};

/// One resolved commit-reveal round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disclosure {
    pub step: RandomStep,
    pub modulus: u32,
    pub digest: CommitmentDigest,
    pub key: SecretKey,
    pub value: u32,
    pub counterparty: u32,
    pub result: u32,
}

impl Disclosure {
    /// Check the digest against the disclosed key and value, and the fold
    pub fn verify(&self) -> bool {
        self.modulus > 0
            && self.value < self.modulus
            && self.digest.verify(&self.key, self.value)
            && combine(self.value, self.counterparty, self.modulus) == self.result
    }
}

/// Disclosures of a duel, complete or aborted
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub duel_id: DuelId,
    pub disclosures: Vec<Disclosure>,
}

impl Transcript {
    pub fn new(duel_id: DuelId) -> Self {
        Self {
            duel_id,
            disclosures: Vec::new(),
        }
    }

    pub fn push(&mut self, disclosure: Disclosure) {
        self.disclosures.push(disclosure);
    }

    /// Disclosure for `step`, if that round resolved
    pub fn get(&self, step: RandomStep) -> Option<&Disclosure> {
        self.disclosures.iter().find(|d| d.step == step)
    }

    /// Whether every recorded disclosure checks out
    pub fn verify_all(&self) -> bool {
        self.disclosures.iter().all(Disclosure::verify)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
