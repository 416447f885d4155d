//! Scripted collaborators for tests and replays.

use super::traits::{InputRequest, InputSource, PlayerInput, Reporter};
use crate::crypto::Entropy;
use crate::protocol::DuelEvent;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Entropy that hands out preset values.
///
/// Key bytes come from a running counter; `below` pops the next scripted value.
#[derive(Clone, Debug, Default)]
pub struct ScriptedEntropy {
    values: VecDeque<u32>,
    counter: u8,
    fail: bool,
}

impl ScriptedEntropy {
    /// Values returned by successive `below` calls
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            counter: 0,
            fail: false,
        }
    }

    /// Entropy that is never available
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl Entropy for ScriptedEntropy {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        if self.fail {
            return Err(rand::Error::new("entropy source unavailable"));
        }
        for byte in dest.iter_mut() {
            *byte = self.counter;
            self.counter = self.counter.wrapping_add(1);
        }
        Ok(())
    }

    fn below(&mut self, modulus: u32) -> Result<u32, rand::Error> {
        if self.fail {
            return Err(rand::Error::new("entropy source unavailable"));
        }
        match self.values.pop_front() {
            Some(value) if value < modulus => Ok(value),
            Some(value) => Err(rand::Error::new(format!(
                "scripted value {} is not below {}",
                value, modulus
            ))),
            None => Err(rand::Error::new("scripted entropy exhausted")),
        }
    }
}

/// Input source that answers from a queue, then cancels
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    answers: VecDeque<PlayerInput>,
    requests: Vec<InputRequest>,
}

impl ScriptedInput {
    pub fn new(answers: impl IntoIterator<Item = PlayerInput>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            requests: Vec::new(),
        }
    }

    /// Answer every request with the given numbers in order
    pub fn numbers(values: impl IntoIterator<Item = i64>) -> Self {
        Self::new(values.into_iter().map(PlayerInput::Number))
    }

    /// Requests received so far
    pub fn requests(&self) -> &[InputRequest] {
        &self.requests
    }
}

#[async_trait]
impl InputSource for ScriptedInput {
    async fn request(&mut self, request: &InputRequest) -> PlayerInput {
        self.requests.push(request.clone());
        self.answers.pop_front().unwrap_or(PlayerInput::Cancel)
    }
}

/// Reporter that keeps every event; clones share the same log
#[derive(Clone, Debug, Default)]
pub struct RecordingReporter {
    events: Arc<Mutex<Vec<DuelEvent>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events reported so far
    pub fn events(&self) -> Vec<DuelEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, event: &DuelEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_entropy_values() {
        let mut entropy = ScriptedEntropy::new([3, 1]);
        assert_eq!(entropy.below(6).unwrap(), 3);
        assert!(entropy.below(1).is_err());
        assert!(entropy.below(6).is_err());
    }

    #[test]
    fn test_scripted_entropy_keys_differ() {
        let mut entropy = ScriptedEntropy::default();
        let mut a = [0u8; 16];
        let mut b = [0u8; 16];
        entropy.fill_bytes(&mut a).unwrap();
        entropy.fill_bytes(&mut b).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_failing_entropy() {
        let mut entropy = ScriptedEntropy::failing();
        assert!(entropy.fill_bytes(&mut [0u8; 4]).is_err());
        assert!(entropy.below(2).is_err());
    }

    #[tokio::test]
    async fn test_scripted_input_cancels_when_exhausted() {
        let mut input = ScriptedInput::numbers([1]);
        let request = InputRequest::FirstMoveGuess;
        assert_eq!(input.request(&request).await, PlayerInput::Number(1));
        assert_eq!(input.request(&request).await, PlayerInput::Cancel);
        assert_eq!(input.requests().len(), 2);
    }

    #[test]
    fn test_recording_reporter_shares_log() {
        let reporter = RecordingReporter::new();
        let mut handle = reporter.clone();
        handle.report(&DuelEvent::FirstMover {
            party: crate::protocol::Party::User,
        });
        assert_eq!(reporter.len(), 1);
    }
}
