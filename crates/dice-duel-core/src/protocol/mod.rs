//! Protocol types, events, and transcripts.

mod events;
mod transcript;
mod types;

pub use events::DuelEvent;
pub use transcript::{Disclosure, Transcript};
pub use types::{DuelId, DuelResult, Outcome, Party, RandomStep};
