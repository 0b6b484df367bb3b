use assert_matches::assert_matches;
use mathdrill::clock::{ClockTick, ManualTime};
use mathdrill::grading::{grade, Grade};
use mathdrill::problem::{generate, OperationKind, RngSource, ScriptedRandom};
use mathdrill::quiz::{QuizEngine, QuizPhase, Score};
use mathdrill::session::SessionConfig;
use mathdrill::DrillError;

fn scripted(choices: Vec<usize>) -> (QuizEngine, ManualTime) {
    let time = ManualTime::new();
    let engine = QuizEngine::with_sources(
        Box::new(ScriptedRandom::new(choices)),
        Box::new(time.clone()),
    );
    (engine, time)
}

#[test]
fn start_session_with_sevens() {
    let mut engine = QuizEngine::with_sources(
        Box::new(RngSource::seeded(1)),
        Box::new(ManualTime::new()),
    );
    engine
        .start_session(SessionConfig::new(60, [7], [OperationKind::Multiplication]))
        .unwrap();

    assert_eq!(engine.phase(), QuizPhase::AwaitingAnswer);
    let problem = engine.current_problem().unwrap();
    assert_eq!(problem.operand_a, 7);
    assert!((1..=12).contains(&problem.operand_b));
}

#[test]
fn correct_then_invalid_then_wrong() {
    let (mut engine, time) = scripted(vec![0, 0, 7]);
    engine
        .start_session(SessionConfig::new(60, [7], [OperationKind::Multiplication]))
        .unwrap();

    time.advance_secs(1.5);
    assert!(engine.submit_answer("56").unwrap().is_correct);
    assert_eq!(engine.score(), Score { correct: 1, total: 1 });
    assert_eq!(engine.phase(), QuizPhase::ShowingFeedback);
    engine.advance().unwrap();

    assert_matches!(engine.submit_answer("abc"), Err(DrillError::InvalidInput(_)));
    assert_eq!(engine.score(), Score { correct: 1, total: 1 });
    assert_eq!(engine.phase(), QuizPhase::AwaitingAnswer);

    time.advance_secs(3.0);
    let feedback = engine.submit_answer("63").unwrap();
    assert!(!feedback.is_correct);
    assert_eq!(feedback.correct_answer, 56);

    let history = engine.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].submitted_answer, 56);
    assert!((history[0].elapsed_secs - 1.5).abs() < 1e-9);
    assert_eq!(history[1].submitted_answer, 63);
    assert!((history[1].elapsed_secs - 3.0).abs() < 1e-9);
}

#[test]
fn twenty_ticks_on_ten_second_session() {
    let (mut engine, _) = scripted(vec![0, 0, 7]);
    engine
        .start_session(SessionConfig::new(10, [7], [OperationKind::Multiplication]))
        .unwrap();

    let ticks: Vec<ClockTick> = (0..20).map(|_| engine.tick()).collect();
    assert_eq!(ticks.iter().filter(|t| **t == ClockTick::Expired).count(), 1);
    assert_eq!(ticks[9], ClockTick::Expired);
    assert_eq!(engine.remaining_secs(), 0);
    assert_eq!(engine.phase(), QuizPhase::Complete);
    assert!(engine.history().is_empty());
}

#[test]
fn answer_submitted_before_expiry_is_kept() {
    let (mut engine, _) = scripted(vec![0, 0, 7]);
    engine
        .start_session(SessionConfig::new(1, [7], [OperationKind::Multiplication]))
        .unwrap();
    engine.submit_answer("56").unwrap();
    engine.tick();

    assert_eq!(engine.phase(), QuizPhase::Complete);
    assert_eq!(engine.history().len(), 1);
    assert_matches!(engine.advance(), Err(DrillError::UnexpectedPhase { .. }));
}

#[test]
fn squares_only_needs_no_numbers() {
    let (mut engine, _) = scripted(vec![0, 5]);
    engine
        .start_session(SessionConfig::new(60, [], [OperationKind::Squares]))
        .unwrap();
    let problem = engine.current_problem().unwrap();
    assert_eq!(problem.display_text, "6²");
    assert_eq!(problem.correct_answer, 36);
}

#[test]
fn generated_problems_hold_their_properties() {
    let mut rng = RngSource::seeded(2024);
    let config = SessionConfig::new(60, [2, 5, 9, 12], OperationKind::ALL);
    for _ in 0..1000 {
        let p = generate(&config, &mut rng).unwrap();
        match p.kind {
            OperationKind::Multiplication => {
                assert_eq!(p.correct_answer, i64::from(p.operand_a * p.operand_b));
                assert!(config.eligible_operands.contains(&p.operand_a));
                assert!((1..=12).contains(&p.operand_b));
            }
            OperationKind::Division => {
                assert_eq!(p.operand_a % p.operand_b, 0);
                assert_eq!(p.correct_answer, i64::from(p.operand_a / p.operand_b));
            }
            OperationKind::Squares => {
                assert_eq!(p.operand_a, p.operand_b);
                assert_eq!(p.correct_answer, i64::from(p.operand_a * p.operand_a));
            }
        }
    }
}

#[test]
fn grading_boundaries() {
    assert_eq!(grade(97, 9.0).label(), "A+");
    assert_eq!(grade(96, 9.0).label(), "A");
    assert_eq!(grade(100, 4.0), Grade::APlus);
    assert_eq!(grade(50, 15.0), Grade::F);
}

#[test]
fn summary_after_full_session() {
    let (mut engine, time) = scripted(vec![0, 0, 7]);
    engine
        .start_session(SessionConfig::new(30, [7], [OperationKind::Multiplication]))
        .unwrap();

    for (secs, answer) in [(1.0, "56"), (4.0, "56"), (2.0, "55"), (6.0, "56")] {
        time.advance_secs(secs);
        engine.submit_answer(answer).unwrap();
        engine.advance().unwrap();
    }
    while engine.phase() != QuizPhase::Complete {
        engine.tick();
    }

    let summary = engine.summary();
    assert_eq!(summary.total, 4);
    assert_eq!(summary.correct, 3);
    assert_eq!(summary.accuracy_percent, 75);
    assert_eq!(summary.average_secs, Some(3.25));
    // 75 + 5
    assert_eq!(summary.grade, Some(Grade::BMinus));
    let fastest: Vec<f64> = summary.fastest.iter().map(|a| a.elapsed_secs).collect();
    assert_eq!(fastest, vec![1.0, 2.0, 4.0]);
    let slowest: Vec<f64> = summary.slowest.iter().map(|a| a.elapsed_secs).collect();
    assert_eq!(slowest, vec![6.0, 4.0, 2.0]);
}
