//! The duel state machine and its collaborators.

mod engine;
mod mock;
mod phase;
mod traits;

pub use engine::{DuelEngine, DuelState};
pub use mock::{RecordingReporter, ScriptedEntropy, ScriptedInput};
pub use phase::Phase;
pub use traits::{InputRequest, InputSource, PlayerInput, Reporter, TracingReporter};
