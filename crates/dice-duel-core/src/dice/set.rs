//! Validated set of dice and the selection queries over it.

use super::die::Die;
use crate::config::DuelConfig;
use crate::error::DiceError;
use serde::Serialize;

/// At least `min_dice` dice, all with the same number of faces.
///
/// Dice are identified by index, never by content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiceSet {
    dice: Vec<Die>,
    faces: usize,
}

impl DiceSet {
    /// Parse and validate raw dice specs, one comma-separated token per die
    pub fn validate<S: AsRef<str>>(raw: &[S], config: &DuelConfig) -> Result<Self, DiceError> {
        let min_dice = config.min_dice();
        if raw.len() < min_dice {
            return Err(DiceError::InsufficientDice {
                required: min_dice,
                found: raw.len(),
            });
        }

        let dice = raw
            .iter()
            .enumerate()
            .map(|(index, spec)| Die::parse(index, spec.as_ref(), config.faces))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            dice,
            faces: config.faces,
        })
    }

    /// Validate dice that are already built
    pub fn new(dice: Vec<Die>, config: &DuelConfig) -> Result<Self, DiceError> {
        let min_dice = config.min_dice();
        if dice.len() < min_dice {
            return Err(DiceError::InsufficientDice {
                required: min_dice,
                found: dice.len(),
            });
        }
        for (index, die) in dice.iter().enumerate() {
            if die.len() != config.faces {
                return Err(DiceError::MalformedDie {
                    index,
                    input: die.to_string(),
                    problem: crate::error::DieProblem::WrongArity {
                        expected: config.faces,
                        found: die.len(),
                    },
                });
            }
        }
        Ok(Self {
            dice,
            faces: config.faces,
        })
    }

    pub fn len(&self) -> usize {
        self.dice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Number of faces on every die
    pub fn faces(&self) -> usize {
        self.faces
    }

    pub fn iter(&self) -> impl Iterator<Item = &Die> {
        self.dice.iter()
    }

    /// Die at `index`
    pub fn get(&self, index: usize) -> Result<&Die, DiceError> {
        self.dice.get(index).ok_or(DiceError::IndexOutOfRange {
            index,
            len: self.dice.len(),
        })
    }

    /// Indices other than `excluded`
    pub fn remaining(&self, excluded: usize) -> impl Iterator<Item = usize> {
        (0..self.dice.len()).filter(move |i| *i != excluded)
    }

    /// The lowest index different from `chosen`
    pub fn opposing(&self, chosen: usize) -> Result<usize, DiceError> {
        self.get(chosen)?;
        self.remaining(chosen)
            .next()
            .ok_or(DiceError::IndexOutOfRange {
                index: chosen,
                len: self.dice.len(),
            })
    }
}
