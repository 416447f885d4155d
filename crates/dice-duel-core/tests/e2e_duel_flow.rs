//! End-to-end duel flows driven by scripted collaborators.

use async_trait::async_trait;
use dice_duel_core::duel::{RecordingReporter, ScriptedEntropy, ScriptedInput};
use dice_duel_core::{
    DiceSet, DuelConfig, DuelEngine, DuelError, DuelEvent, DuelResult, InputRequest, InputSource,
    Party, Phase, PlayerInput, RandomStep,
};

fn dice() -> DiceSet {
    DiceSet::validate(
        &["1,1,4,4,7,7", "2,2,5,5,8,8", "3,3,6,6,9,9"],
        &DuelConfig::default(),
    )
    .unwrap()
}

fn disclosed_steps(events: &[DuelEvent]) -> Vec<RandomStep> {
    events
        .iter()
        .filter_map(|e| match e {
            DuelEvent::SecretDisclosed { step, .. } => Some(*step),
            _ => None,
        })
        .collect()
}

/// Input source that checks the reporter log before answering
struct OrderCheckingInput {
    inner: ScriptedInput,
    log: RecordingReporter,
    violations: Vec<String>,
}

#[async_trait]
impl InputSource for OrderCheckingInput {
    async fn request(&mut self, request: &InputRequest) -> PlayerInput {
        let events = self.log.events();
        match request {
            InputRequest::FirstMoveGuess | InputRequest::RollContribution { .. } => {
                if !matches!(events.last(), Some(DuelEvent::CommitmentPublished { .. })) {
                    self.violations
                        .push(format!("{:?} requested before its digest", request));
                }
            }
            InputRequest::DieChoice { .. } => {}
        }
        self.inner.request(request).await
    }
}

/// Scenario: first move 0 + 1 -> user first, user takes die 2,
/// system roll 4 + 1 -> index 5, user roll 1 + 2 -> index 3.
#[tokio::test]
async fn test_full_duel_user_moves_first() {
    let mut engine =
        DuelEngine::with_entropy(dice(), DuelConfig::default(), ScriptedEntropy::new([0, 4, 1]))
            .unwrap();
    let mut input = ScriptedInput::numbers([1, 2, 1, 2]);
    let reporter = RecordingReporter::new();
    let mut sink = reporter.clone();

    let outcome = engine.run(&mut input, &mut sink).await.unwrap();

    let system_die = engine.state().system_die.unwrap();
    assert!(system_die == 0 || system_die == 1);
    assert_eq!(outcome.user_face, 6);
    assert_eq!(
        outcome.system_face,
        dice().get(system_die).unwrap().face(5).unwrap()
    );
    assert_eq!(
        outcome.result,
        DuelResult::judge(outcome.user_face, outcome.system_face)
    );

    let events = reporter.events();
    assert!(matches!(
        events.first(),
        Some(DuelEvent::CommitmentPublished {
            step: RandomStep::FirstMove,
            modulus: 2,
            ..
        })
    ));
    assert!(events.contains(&DuelEvent::FirstMover { party: Party::User }));
    assert!(matches!(events.last(), Some(DuelEvent::Finished { .. })));
    assert_eq!(
        disclosed_steps(&events),
        vec![
            RandomStep::FirstMove,
            RandomStep::SystemRoll,
            RandomStep::UserRoll
        ]
    );

    let transcript = engine.transcript();
    assert_eq!(transcript.duel_id, engine.id());
    assert_eq!(transcript.disclosures.len(), 3);
    assert!(transcript.verify_all());
    assert_eq!(transcript.get(RandomStep::UserRoll).unwrap().result, 3);
    assert_eq!(transcript.get(RandomStep::SystemRoll).unwrap().result, 5);
}

#[tokio::test]
async fn test_digest_precedes_every_request() {
    let reporter = RecordingReporter::new();
    let mut sink = reporter.clone();
    let mut input = OrderCheckingInput {
        inner: ScriptedInput::numbers([1, 2, 1, 2]),
        log: reporter.clone(),
        violations: Vec::new(),
    };
    let mut engine =
        DuelEngine::with_entropy(dice(), DuelConfig::default(), ScriptedEntropy::new([0, 4, 1]))
            .unwrap();

    engine.run(&mut input, &mut sink).await.unwrap();

    assert!(input.violations.is_empty(), "{:?}", input.violations);
}

#[tokio::test]
async fn test_input_locked_before_disclosure() {
    let reporter = RecordingReporter::new();
    let mut sink = reporter.clone();
    let mut engine =
        DuelEngine::with_entropy(dice(), DuelConfig::default(), ScriptedEntropy::new([0, 4, 1]))
            .unwrap();

    engine
        .run(&mut ScriptedInput::numbers([1, 2, 1, 2]), &mut sink)
        .await
        .unwrap();

    let events = reporter.events();
    for (i, event) in events.iter().enumerate() {
        if let DuelEvent::SecretDisclosed { step, counterparty, .. } = event {
            assert_eq!(
                events[i - 1],
                DuelEvent::InputLocked {
                    step: *step,
                    value: *counterparty
                }
            );
        }
    }
}

/// Cancel at each suspension point in turn.
#[tokio::test]
async fn test_cancellation_at_every_suspension_point() {
    let answers: [i64; 4] = [1, 2, 1, 2];
    let expected_phases = [
        Phase::FirstMoveCommitted,
        Phase::FirstMoveResolved,
        Phase::SystemRollCommitted,
        Phase::UserRollCommitted,
    ];

    for (cancel_at, expected_phase) in expected_phases.iter().enumerate() {
        let reporter = RecordingReporter::new();
        let mut sink = reporter.clone();
        let mut engine = DuelEngine::with_entropy(
            dice(),
            DuelConfig::default(),
            ScriptedEntropy::new([0, 4, 1]),
        )
        .unwrap();
        let mut input = ScriptedInput::new(
            answers[..cancel_at]
                .iter()
                .map(|n| PlayerInput::Number(*n))
                .chain(std::iter::once(PlayerInput::Cancel)),
        );

        let err = engine.run(&mut input, &mut sink).await.unwrap_err();

        assert!(matches!(err, DuelError::Cancelled { phase } if phase == *expected_phase));
        assert_eq!(engine.phase(), Phase::Aborted);
        assert!(engine.state().outcome().is_none());
        assert!(!engine.state().has_pending_commitment());

        let events = reporter.events();
        assert_eq!(
            events.last(),
            Some(&DuelEvent::Aborted {
                phase: *expected_phase
            })
        );
        assert!(!events
            .iter()
            .any(|e| matches!(e, DuelEvent::Finished { .. })));

        // Only rounds resolved before the cancellation are disclosed
        let disclosed = disclosed_steps(&events);
        let published = events
            .iter()
            .filter(|e| matches!(e, DuelEvent::CommitmentPublished { .. }))
            .count();
        let pending_at_cancel = expected_phase != &Phase::FirstMoveResolved;
        assert_eq!(
            disclosed.len() + usize::from(pending_at_cancel),
            published
        );
        assert_eq!(engine.transcript().disclosures.len(), disclosed.len());
        assert!(engine.transcript().verify_all());
    }
}

#[tokio::test]
async fn test_out_of_range_roll_aborts_without_disclosure() {
    let reporter = RecordingReporter::new();
    let mut sink = reporter.clone();
    let mut engine =
        DuelEngine::with_entropy(dice(), DuelConfig::default(), ScriptedEntropy::new([0, 4, 1]))
            .unwrap();

    let err = engine
        .run(&mut ScriptedInput::numbers([1, 2, 6]), &mut sink)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DuelError::InvalidInput {
            phase: Phase::SystemRollCommitted,
            ..
        }
    ));
    assert_eq!(
        disclosed_steps(&reporter.events()),
        vec![RandomStep::FirstMove]
    );
}

#[tokio::test]
async fn test_custom_face_count() {
    let config = DuelConfig {
        faces: 4,
        key_len: 16,
        ..DuelConfig::default()
    };
    let dice = DiceSet::validate(&["1,2,3,4", "4,4,0,0", "2,2,2,2", "9,0,0,0"], &config).unwrap();
    // first move 1 + 0 -> user; user die 3; system gets 0
    let mut engine =
        DuelEngine::with_entropy(dice, config, ScriptedEntropy::new([1, 3, 2])).unwrap();

    let outcome = engine
        .run(
            &mut ScriptedInput::numbers([0, 3, 0, 2]),
            &mut RecordingReporter::new(),
        )
        .await
        .unwrap();

    // system roll 3 + 0 -> die 0 face 3 = 4; user roll 2 + 2 = 0 -> die 3 face 0 = 9
    assert_eq!(outcome.system_face, 4);
    assert_eq!(outcome.user_face, 9);
    assert_eq!(outcome.result, DuelResult::UserWins);
    assert!(engine
        .transcript()
        .disclosures
        .iter()
        .all(|d| d.key.as_bytes().len() == 16));
}

#[tokio::test]
async fn test_os_entropy_duels_verify() {
    for round in 0..20i64 {
        let mut engine = DuelEngine::new(dice(), DuelConfig::default()).unwrap();
        let reporter = RecordingReporter::new();
        let mut sink = reporter.clone();
        let mut input = FirstOption { round };

        let outcome = engine.run(&mut input, &mut sink).await.unwrap();

        assert_eq!(engine.phase(), Phase::Complete);
        assert!(engine.transcript().verify_all());
        assert!([1, 4, 7, 2, 5, 8, 3, 6, 9].contains(&outcome.user_face));
    }
}

/// Answers every request with its smallest accepted value, offset by `round`
struct FirstOption {
    round: i64,
}

#[async_trait]
impl InputSource for FirstOption {
    async fn request(&mut self, request: &InputRequest) -> PlayerInput {
        let options = request.options();
        let pick = options[(self.round as usize) % options.len()];
        PlayerInput::Number(pick)
    }
}

#[tokio::test]
async fn test_independent_duels_in_parallel() {
    let handles: Vec<_> = (0..8)
        .map(|round| {
            tokio::spawn(async move {
                let mut engine = DuelEngine::new(dice(), DuelConfig::default()).unwrap();
                let outcome = engine
                    .run(&mut FirstOption { round }, &mut RecordingReporter::new())
                    .await
                    .unwrap();
                (engine.id(), outcome)
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        let (id, _) = handle.await.unwrap();
        ids.push(id);
    }
    ids.sort_by_key(|id| *id.as_uuid());
    ids.dedup();
    assert_eq!(ids.len(), 8);
}
