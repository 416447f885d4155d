//! Duel phases.

use crate::protocol::RandomStep;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the duel stands.
///
/// `Complete` and `Aborted` are terminal; every other phase may abort.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Init,
    FirstMoveCommitted,
    FirstMoveResolved,
    DiceSelected,
    SystemRollCommitted,
    SystemRollResolved,
    UserRollCommitted,
    UserRollResolved,
    Complete,
    Aborted,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Complete | Phase::Aborted)
    }

    /// Phase entered once the commitment for `step` is published
    pub fn committed(step: RandomStep) -> Self {
        match step {
            RandomStep::FirstMove => Phase::FirstMoveCommitted,
            RandomStep::SystemRoll => Phase::SystemRollCommitted,
            RandomStep::UserRoll => Phase::UserRollCommitted,
        }
    }

    /// Phase entered once `step` is resolved
    pub fn resolved(step: RandomStep) -> Self {
        match step {
            RandomStep::FirstMove => Phase::FirstMoveResolved,
            RandomStep::SystemRoll => Phase::SystemRollResolved,
            RandomStep::UserRoll => Phase::UserRollResolved,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Init => "init",
            Phase::FirstMoveCommitted => "first-move-committed",
            Phase::FirstMoveResolved => "first-move-resolved",
            Phase::DiceSelected => "dice-selected",
            Phase::SystemRollCommitted => "system-roll-committed",
            Phase::SystemRollResolved => "system-roll-resolved",
            Phase::UserRollCommitted => "user-roll-committed",
            Phase::UserRollResolved => "user-roll-resolved",
            Phase::Complete => "complete",
            Phase::Aborted => "aborted",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
