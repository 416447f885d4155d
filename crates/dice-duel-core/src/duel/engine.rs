//! Duel state machine.
//!
//! Init -> FirstMoveCommitted -> FirstMoveResolved -> DiceSelected
//!      -> SystemRollCommitted -> SystemRollResolved
//!      -> UserRollCommitted -> UserRollResolved -> Complete
//!
//! Any non-terminal phase may move to Aborted. A commitment's digest is always
//! reported before the matching input is requested, and its key is disclosed
//! only once that input has been accepted.

use super::phase::Phase;
use super::traits::{InputRequest, InputSource, PlayerInput, Reporter};
use crate::config::DuelConfig;
use crate::crypto::{combine, Entropy, SecretCommitment, SystemEntropy};
use crate::dice::{DiceSet, Face};
use crate::error::{ConfigError, DiceError, DuelError};
use crate::protocol::{
    Disclosure, DuelEvent, DuelId, Outcome, Party, RandomStep, Transcript,
};
use tracing::{debug, info, warn};

/// Mutable state of a single duel
#[derive(Debug)]
pub struct DuelState {
    pub phase: Phase,
    pub first_mover: Option<Party>,
    pub system_die: Option<usize>,
    pub user_die: Option<usize>,
    pending: Option<SecretCommitment>,
    aborted_at: Option<Phase>,
    outcome: Option<Outcome>,
}

impl DuelState {
    fn new() -> Self {
        Self {
            phase: Phase::Init,
            first_mover: None,
            system_die: None,
            user_die: None,
            pending: None,
            aborted_at: None,
            outcome: None,
        }
    }

    /// Whether a commitment is published but not yet resolved
    pub fn has_pending_commitment(&self) -> bool {
        self.pending.is_some()
    }

    /// Phase the duel was in when it aborted
    pub fn aborted_at(&self) -> Option<Phase> {
        self.aborted_at
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }
}

/// Runs one duel between the system and the user.
///
/// Independent duels need independent engines; nothing is shared.
pub struct DuelEngine<E: Entropy = SystemEntropy> {
    id: DuelId,
    config: DuelConfig,
    dice: DiceSet,
    entropy: E,
    state: DuelState,
    transcript: Transcript,
}

impl DuelEngine<SystemEntropy> {
    /// Engine drawing its randomness from the operating system
    pub fn new(dice: DiceSet, config: DuelConfig) -> Result<Self, DuelError> {
        Self::with_entropy(dice, config, SystemEntropy::os())
    }
}

impl<E: Entropy> DuelEngine<E> {
    pub fn with_entropy(dice: DiceSet, config: DuelConfig, entropy: E) -> Result<Self, DuelError> {
        config.validate()?;
        if dice.faces() != config.faces {
            return Err(ConfigError::FaceMismatch {
                config: config.faces,
                dice: dice.faces(),
            }
            .into());
        }
        if dice.len() < config.min_dice() {
            return Err(DiceError::InsufficientDice {
                required: config.min_dice(),
                found: dice.len(),
            }
            .into());
        }

        let id = DuelId::new();
        Ok(Self {
            id,
            config,
            dice,
            entropy,
            state: DuelState::new(),
            transcript: Transcript::new(id),
        })
    }

    pub fn id(&self) -> DuelId {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn state(&self) -> &DuelState {
        &self.state
    }

    pub fn dice(&self) -> &DiceSet {
        &self.dice
    }

    pub fn config(&self) -> &DuelConfig {
        &self.config
    }

    /// Disclosures made so far, for complete and aborted duels alike
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Play the duel to completion.
    ///
    /// On any error the engine ends in [`Phase::Aborted`] and the pending
    /// commitment, if any, is dropped without disclosure.
    pub async fn run<I, R>(&mut self, input: &mut I, reporter: &mut R) -> Result<Outcome, DuelError>
    where
        I: InputSource + ?Sized,
        R: Reporter + ?Sized,
    {
        if self.state.phase != Phase::Init {
            return Err(DuelError::Finished {
                phase: self.state.phase,
            });
        }

        info!(duel_id = %self.id, dice = self.dice.len(), faces = self.config.faces, "duel started");
        match self.play(input, reporter).await {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                self.abort(reporter, &err);
                Err(err)
            }
        }
    }

    async fn play<I, R>(&mut self, input: &mut I, reporter: &mut R) -> Result<Outcome, DuelError>
    where
        I: InputSource + ?Sized,
        R: Reporter + ?Sized,
    {
        // First move: even sum -> system, odd sum -> user
        self.commit(RandomStep::FirstMove, 2, reporter)?;
        let guess = self.ask(input, InputRequest::FirstMoveGuess).await?;
        let parity = self.resolve(RandomStep::FirstMove, guess, reporter);
        let first_mover = if parity == 0 {
            Party::System
        } else {
            Party::User
        };
        self.state.first_mover = Some(first_mover);
        reporter.report(&DuelEvent::FirstMover { party: first_mover });
        info!(duel_id = %self.id, %first_mover, "first mover decided");

        self.select_dice(first_mover, input, reporter).await?;

        let system_face = self.roll(RandomStep::SystemRoll, input, reporter).await?;
        let user_face = self.roll(RandomStep::UserRoll, input, reporter).await?;

        let outcome = Outcome::new(user_face, system_face);
        self.state.outcome = Some(outcome);
        self.state.phase = Phase::Complete;
        reporter.report(&DuelEvent::Finished { outcome });
        info!(
            duel_id = %self.id,
            user_face,
            system_face,
            result = %outcome.result,
            "duel complete"
        );
        Ok(outcome)
    }

    /// Die selection: the first mover picks freely, the second among the rest
    async fn select_dice<I, R>(
        &mut self,
        first_mover: Party,
        input: &mut I,
        reporter: &mut R,
    ) -> Result<(), DuelError>
    where
        I: InputSource + ?Sized,
        R: Reporter + ?Sized,
    {
        let (system_die, user_die) = match first_mover {
            Party::System => {
                let system_die = self.entropy.below(self.dice.len() as u32)? as usize;
                self.announce_die(Party::System, system_die, reporter)?;
                let available = self.dice.remaining(system_die).collect();
                let user_die = self.ask(input, InputRequest::DieChoice { available }).await? as usize;
                self.announce_die(Party::User, user_die, reporter)?;
                (system_die, user_die)
            }
            Party::User => {
                let available = (0..self.dice.len()).collect();
                let user_die = self.ask(input, InputRequest::DieChoice { available }).await? as usize;
                self.announce_die(Party::User, user_die, reporter)?;
                let system_die = self.dice.opposing(user_die)?;
                self.announce_die(Party::System, system_die, reporter)?;
                (system_die, user_die)
            }
        };

        self.state.system_die = Some(system_die);
        self.state.user_die = Some(user_die);
        self.state.phase = Phase::DiceSelected;
        Ok(())
    }

    fn announce_die<R>(&self, party: Party, index: usize, reporter: &mut R) -> Result<(), DuelError>
    where
        R: Reporter + ?Sized,
    {
        let die = self.dice.get(index)?.clone();
        debug!(duel_id = %self.id, %party, index, "die chosen");
        reporter.report(&DuelEvent::DieChosen { party, index, die });
        Ok(())
    }

    /// One fair roll of the die belonging to `step`'s roller
    async fn roll<I, R>(
        &mut self,
        step: RandomStep,
        input: &mut I,
        reporter: &mut R,
    ) -> Result<Face, DuelError>
    where
        I: InputSource + ?Sized,
        R: Reporter + ?Sized,
    {
        let party = step.roller().ok_or(DuelError::Finished {
            phase: self.state.phase,
        })?;
        let die_index = match party {
            Party::System => self.state.system_die,
            Party::User => self.state.user_die,
        }
        .ok_or(DuelError::Finished {
            phase: self.state.phase,
        })?;

        let modulus = self.config.roll_modulus();
        self.commit(step, modulus, reporter)?;
        let contribution = self
            .ask(input, InputRequest::RollContribution { step, modulus })
            .await?;
        let face_index = self.resolve(step, contribution, reporter) as usize;

        let die = self.dice.get(die_index)?;
        let face = die.face(face_index).ok_or(DiceError::IndexOutOfRange {
            index: face_index,
            len: die.len(),
        })?;
        reporter.report(&DuelEvent::RollResolved {
            party,
            face_index,
            face,
        });
        debug!(duel_id = %self.id, %party, face_index, face, "roll resolved");
        Ok(face)
    }

    /// Create the commitment for `step` and publish its digest
    fn commit<R>(&mut self, step: RandomStep, modulus: u32, reporter: &mut R) -> Result<(), DuelError>
    where
        R: Reporter + ?Sized,
    {
        let commitment = SecretCommitment::generate(&mut self.entropy, modulus, self.config.key_len)?;
        let digest = commitment.digest();
        self.state.pending = Some(commitment);
        self.state.phase = Phase::committed(step);

        debug!(duel_id = %self.id, %step, %digest, "commitment published");
        reporter.report(&DuelEvent::CommitmentPublished {
            step,
            modulus,
            digest,
        });
        Ok(())
    }

    /// Wait for input and check it against the request's domain
    async fn ask<I>(&self, input: &mut I, request: InputRequest) -> Result<u32, DuelError>
    where
        I: InputSource + ?Sized,
    {
        let phase = self.state.phase;
        match input.request(&request).await {
            PlayerInput::Number(value) if request.accepts(value) => Ok(value as u32),
            PlayerInput::Number(value) => Err(DuelError::InvalidInput {
                phase,
                request,
                got: value.to_string(),
            }),
            PlayerInput::Unparsed(raw) => Err(DuelError::InvalidInput {
                phase,
                request,
                got: raw,
            }),
            PlayerInput::Cancel => Err(DuelError::Cancelled { phase }),
        }
    }

    /// Lock the counterparty's value, then disclose and fold the commitment
    fn resolve<R>(&mut self, step: RandomStep, counterparty: u32, reporter: &mut R) -> u32
    where
        R: Reporter + ?Sized,
    {
        reporter.report(&DuelEvent::InputLocked {
            step,
            value: counterparty,
        });

        let Some(commitment) = self.state.pending.take() else {
            unreachable!("resolve without a pending commitment");
        };
        let modulus = commitment.modulus();
        let digest = commitment.digest();
        let revealed = commitment.reveal();
        let result = combine(revealed.value, counterparty, modulus);

        reporter.report(&DuelEvent::SecretDisclosed {
            step,
            key: revealed.key.clone(),
            value: revealed.value,
            counterparty,
            result,
        });
        self.transcript.push(Disclosure {
            step,
            modulus,
            digest,
            key: revealed.key,
            value: revealed.value,
            counterparty,
            result,
        });
        self.state.phase = Phase::resolved(step);
        debug!(duel_id = %self.id, %step, value = revealed.value, counterparty, result, "commitment resolved");
        result
    }

    fn abort<R>(&mut self, reporter: &mut R, err: &DuelError)
    where
        R: Reporter + ?Sized,
    {
        let phase = self.state.phase;
        // The undisclosed secret goes out of scope here.
        self.state.pending = None;
        self.state.aborted_at = Some(phase);
        self.state.phase = Phase::Aborted;
        warn!(duel_id = %self.id, %phase, error = %err, "duel aborted");
        reporter.report(&DuelEvent::Aborted { phase });
    }
}
