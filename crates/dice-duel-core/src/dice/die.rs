//! A single die: a fixed-length list of face values.

use crate::error::{DiceError, DieProblem};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Face value of a die
pub type Face = i64;

/// Ordered face values, duplicates allowed
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Die(Vec<Face>);

impl Die {
    /// Parse a comma-separated list of exactly `faces` integers.
    ///
    /// `index` is the position of the token in the dice list, used for errors.
    pub fn parse(index: usize, input: &str, faces: usize) -> Result<Self, DiceError> {
        let malformed = |problem| DiceError::MalformedDie {
            index,
            input: input.to_string(),
            problem,
        };

        let values = input
            .split(',')
            .map(|token| {
                let token = token.trim();
                token.parse::<Face>().map_err(|_| {
                    malformed(DieProblem::NonNumeric {
                        face: token.to_string(),
                    })
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if values.len() != faces {
            return Err(malformed(DieProblem::WrongArity {
                expected: faces,
                found: values.len(),
            }));
        }
        Ok(Self(values))
    }

    /// Build a die from face values without arity checks
    pub fn from_faces(faces: impl Into<Vec<Face>>) -> Self {
        Self(faces.into())
    }

    pub fn faces(&self) -> &[Face] {
        &self.0
    }

    /// Face at `index`, if any
    pub fn face(&self, index: usize) -> Option<Face> {
        self.0.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, face) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", face)?;
        }
        Ok(())
    }
}
