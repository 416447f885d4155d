//! Protocol types.

use crate::dice::Face;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique duel identifier
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DuelId(Uuid);

impl DuelId {
    /// Create a new random duel ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DuelId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for DuelId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl fmt::Debug for DuelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DuelId({})", self.0)
    }
}

impl fmt::Display for DuelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One side of the duel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Party {
    System,
    User,
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::System => write!(f, "System"),
            Party::User => write!(f, "User"),
        }
    }
}

/// Randomized step a commitment belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RandomStep {
    FirstMove,
    SystemRoll,
    UserRoll,
}

impl RandomStep {
    /// Party whose die the step rolls, if it is a roll
    pub fn roller(&self) -> Option<Party> {
        match self {
            RandomStep::FirstMove => None,
            RandomStep::SystemRoll => Some(Party::System),
            RandomStep::UserRoll => Some(Party::User),
        }
    }
}

impl fmt::Display for RandomStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RandomStep::FirstMove => write!(f, "first move"),
            RandomStep::SystemRoll => write!(f, "system roll"),
            RandomStep::UserRoll => write!(f, "user roll"),
        }
    }
}

/// Duel result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DuelResult {
    UserWins,
    SystemWins,
    Tie,
}

impl DuelResult {
    /// Higher face wins, equal faces tie
    pub fn judge(user_face: Face, system_face: Face) -> Self {
        match user_face.cmp(&system_face) {
            std::cmp::Ordering::Greater => DuelResult::UserWins,
            std::cmp::Ordering::Less => DuelResult::SystemWins,
            std::cmp::Ordering::Equal => DuelResult::Tie,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DuelResult::UserWins => "User wins",
            DuelResult::SystemWins => "System wins",
            DuelResult::Tie => "Tie",
        }
    }

    /// Winning party, if any
    pub fn winner(&self) -> Option<Party> {
        match self {
            DuelResult::UserWins => Some(Party::User),
            DuelResult::SystemWins => Some(Party::System),
            DuelResult::Tie => None,
        }
    }
}

impl fmt::Display for DuelResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Faces rolled by both parties and who won
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub user_face: Face,
    pub system_face: Face,
    pub result: DuelResult,
}

impl Outcome {
    pub fn new(user_face: Face, system_face: Face) -> Self {
        Self {
            user_face,
            system_face,
            result: DuelResult::judge(user_face, system_face),
        }
    }
}
