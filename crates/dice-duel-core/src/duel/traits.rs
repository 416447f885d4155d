//! Collaborator traits: where input comes from and where events go.

use crate::protocol::{DuelEvent, RandomStep};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// What the engine is waiting for
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputRequest {
    /// Guess for the first-move commitment: 0 or 1
    FirstMoveGuess,
    /// Index of the user's die, one of `available`
    DieChoice { available: Vec<usize> },
    /// Contribution to a roll, in `[0, modulus)`
    RollContribution { step: RandomStep, modulus: u32 },
}

impl InputRequest {
    /// Whether `value` lies in the domain of this request
    pub fn accepts(&self, value: i64) -> bool {
        match self {
            InputRequest::FirstMoveGuess => (0..=1).contains(&value),
            InputRequest::DieChoice { available } => {
                usize::try_from(value).map_or(false, |v| available.contains(&v))
            }
            InputRequest::RollContribution { modulus, .. } => {
                (0..i64::from(*modulus)).contains(&value)
            }
        }
    }

    /// Every accepted value, in ascending order
    pub fn options(&self) -> Vec<i64> {
        match self {
            InputRequest::FirstMoveGuess => vec![0, 1],
            InputRequest::DieChoice { available } => {
                available.iter().map(|i| *i as i64).collect()
            }
            InputRequest::RollContribution { modulus, .. } => (0..i64::from(*modulus)).collect(),
        }
    }
}

impl fmt::Display for InputRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputRequest::FirstMoveGuess => write!(f, "a guess of 0 or 1"),
            InputRequest::DieChoice { available } => {
                write!(f, "a die index in {:?}", available)
            }
            InputRequest::RollContribution { modulus, .. } => {
                write!(f, "a number in 0..{}", modulus)
            }
        }
    }
}

/// Answer from the input collaborator
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerInput {
    Number(i64),
    /// Token that is not an integer
    Unparsed(String),
    Cancel,
}

impl PlayerInput {
    /// Interpret one token typed by a player; `x` cancels
    pub fn from_token(token: &str) -> Self {
        let token = token.trim();
        if token.eq_ignore_ascii_case("x") {
            return PlayerInput::Cancel;
        }
        match token.parse::<i64>() {
            Ok(n) => PlayerInput::Number(n),
            Err(_) => PlayerInput::Unparsed(token.to_string()),
        }
    }
}

/// Supplies the counterparty's choices.
///
/// Range checks are the engine's job; sources only parse.
#[async_trait]
pub trait InputSource: Send {
    async fn request(&mut self, request: &InputRequest) -> PlayerInput;
}

/// Receives duel events in order
pub trait Reporter: Send {
    fn report(&mut self, event: &DuelEvent);
}

/// Reporter that writes events to the tracing log
#[derive(Clone, Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, event: &DuelEvent) {
        match event {
            DuelEvent::CommitmentPublished {
                step,
                modulus,
                digest,
            } => info!(%step, modulus, %digest, "commitment published"),
            DuelEvent::InputLocked { step, value } => info!(%step, value, "input locked"),
            DuelEvent::SecretDisclosed {
                step,
                key,
                value,
                counterparty,
                result,
            } => info!(
                %step,
                key = %key.to_hex(),
                value,
                counterparty,
                result,
                "secret disclosed"
            ),
            DuelEvent::FirstMover { party } => info!(%party, "first mover decided"),
            DuelEvent::DieChosen { party, index, die } => {
                info!(%party, index, %die, "die chosen")
            }
            DuelEvent::RollResolved {
                party,
                face_index,
                face,
            } => info!(%party, face_index, face, "roll resolved"),
            DuelEvent::Finished { outcome } => info!(
                user_face = outcome.user_face,
                system_face = outcome.system_face,
                result = %outcome.result,
                "duel finished"
            ),
            DuelEvent::Aborted { phase } => info!(%phase, "duel aborted"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token() {
        assert_eq!(PlayerInput::from_token(" 3 "), PlayerInput::Number(3));
        assert_eq!(PlayerInput::from_token("-1"), PlayerInput::Number(-1));
        assert_eq!(PlayerInput::from_token("X"), PlayerInput::Cancel);
        assert_eq!(PlayerInput::from_token("x"), PlayerInput::Cancel);
        assert_eq!(
            PlayerInput::from_token("two"),
            PlayerInput::Unparsed("two".to_string())
        );
    }

    #[test]
    fn test_accepts_first_move() {
        let request = InputRequest::FirstMoveGuess;
        assert!(request.accepts(0));
        assert!(request.accepts(1));
        assert!(!request.accepts(2));
        assert!(!request.accepts(-1));
    }

    #[test]
    fn test_accepts_die_choice() {
        let request = InputRequest::DieChoice {
            available: vec![0, 2],
        };
        assert!(request.accepts(0));
        assert!(!request.accepts(1));
        assert!(request.accepts(2));
        assert!(!request.accepts(-2));
        assert_eq!(request.options(), vec![0, 2]);
    }

    #[test]
    fn test_accepts_roll() {
        let request = InputRequest::RollContribution {
            step: RandomStep::UserRoll,
            modulus: 6,
        };
        assert!(request.accepts(5));
        assert!(!request.accepts(6));
        assert_eq!(request.options().len(), 6);
        assert_eq!(request.to_string(), "a number in 0..6");
    }
}
