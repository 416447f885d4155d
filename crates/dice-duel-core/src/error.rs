//! Error types.

use crate::duel::{InputRequest, Phase};
use thiserror::Error;

/// What is wrong with a single die spec
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DieProblem {
    #[error("expected {expected} faces, found {found}")]
    WrongArity { expected: usize, found: usize },

    #[error("face {face:?} is not an integer")]
    NonNumeric { face: String },
}

/// Dice validation and lookup errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("at least {required} dice are required, got {found}")]
    InsufficientDice { required: usize, found: usize },

    #[error("die {index} ({input:?}) is malformed: {problem}")]
    MalformedDie {
        index: usize,
        input: String,
        problem: DieProblem,
    },

    #[error("die index {index} is out of range (0..{len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Invalid duel configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("face count must be positive and fit in 32 bits, got {0}")]
    Faces(usize),

    #[error("commitment keys must be at least {min} bytes, got {found}")]
    KeyTooShort { min: usize, found: usize },

    #[error("configured for {config} faces, but the dice have {dice}")]
    FaceMismatch { config: usize, dice: usize },
}

/// Errors that end a duel
#[derive(Debug, Error)]
pub enum DuelError {
    #[error("invalid input {got:?} during {phase}: expected {request}")]
    InvalidInput {
        phase: Phase,
        request: InputRequest,
        got: String,
    },

    #[error("duel cancelled during {phase}")]
    Cancelled { phase: Phase },

    #[error("secure randomness unavailable: {0}")]
    Entropy(#[from] rand::Error),

    #[error(transparent)]
    Dice(#[from] DiceError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("duel already finished ({phase})")]
    Finished { phase: Phase },
}

impl DuelError {
    /// Phase the duel was in, for errors raised at a suspension point
    pub fn phase(&self) -> Option<Phase> {
        match self {
            DuelError::InvalidInput { phase, .. }
            | DuelError::Cancelled { phase }
            | DuelError::Finished { phase } => Some(*phase),
            _ => None,
        }
    }

    /// Whether the duel ended because of the counterparty's input
    pub fn is_abort(&self) -> bool {
        matches!(
            self,
            DuelError::InvalidInput { .. } | DuelError::Cancelled { .. }
        )
    }
}
