use std::time::Duration;

use super::review::MSA;
use crate::{
    CheckpointDecision, PauseCheckpoint, ReviewConfig, ReviewInput, ReviewOrchestrator,
    ReviewState, StageKind,
};

fn review(config: ReviewConfig) -> crate::AnalysisContext {
    ReviewOrchestrator::new(config)
        .unwrap()
        .review(ReviewInput::text(MSA))
        .unwrap()
}

fn processed(checkpoints: &[PauseCheckpoint]) -> Vec<usize> {
    checkpoints.iter().map(|c| c.processed_clauses).collect()
}

#[test]
fn checkpoints_follow_clause_interval() {
    let context = review(ReviewConfig::default());
    assert_eq!(processed(context.checkpoints()), vec![3, 6]);

    let first = &context.checkpoints()[0];
    assert_eq!(first.stage, StageKind::ClauseAnalysis);
    assert_eq!(first.stage_index, 2);
    assert_eq!(first.total_clauses, 7);
    assert_eq!(first.summary.total_clauses, 3);
    assert!(first.summary_line().starts_with("Checkpoint at 3/7 clauses: "));
    assert!((first.progress_percent() - 300.0 / 7.0).abs() < 1e-9);

    let context = review(ReviewConfig::default().with_clause_interval(2));
    assert_eq!(processed(context.checkpoints()), vec![2, 4, 6]);
}

#[test]
fn last_clause_checkpoint_is_taken_at_stage_end() {
    let context = review(ReviewConfig::default().with_clause_interval(7));
    assert_eq!(processed(context.checkpoints()), vec![7]);
    assert_eq!(context.checkpoints()[0].stage, StageKind::ClauseAnalysis);
}

#[test]
fn token_threshold_checkpoints_every_new_clause() {
    let context = review(ReviewConfig::default().with_token_threshold(1));
    assert_eq!(processed(context.checkpoints()), vec![1, 2, 3, 4, 5, 6, 7]);
    assert!(context
        .checkpoints()
        .windows(2)
        .all(|w| w[0].token_count < w[1].token_count));
}

#[test]
fn disabled_checkpoints_are_never_taken() {
    let context = review(ReviewConfig::default().with_checkpoints(false));
    assert!(context.checkpoints().is_empty());
}

#[test]
fn halting_then_resuming_matches_uninterrupted_run() {
    let uninterrupted = review(ReviewConfig::default());

    let mut run = ReviewOrchestrator::default()
        .start(ReviewInput::text(MSA))
        .unwrap();
    assert_eq!(run.state(), &ReviewState::Idle);

    let state = run.advance(|_| CheckpointDecision::Halt).unwrap();
    assert_eq!(state, ReviewState::Paused { stage_index: 2 });
    assert_eq!(run.context().clause_analyses().len(), 3);
    assert_eq!(run.context().checkpoints().len(), 1);

    let mut seen = Vec::new();
    let state = run
        .advance(|checkpoint| {
            seen.push(checkpoint.processed_clauses);
            CheckpointDecision::Continue
        })
        .unwrap();
    assert_eq!(state, ReviewState::Completed);
    assert_eq!(seen, vec![6]);

    let resumed = run.into_context();
    assert_eq!(resumed.clause_analyses(), uninterrupted.clause_analyses());
    assert_eq!(resumed.recommendations(), uninterrupted.recommendations());
    assert_eq!(processed(resumed.checkpoints()), vec![3, 6]);
}

#[test]
fn checkpoint_summaries_carry_elapsed_time() {
    let context = review(ReviewConfig::default());
    let times: Vec<_> = context
        .checkpoints()
        .iter()
        .map(|c| c.summary.processing_time)
        .collect();

    assert_eq!(times.len(), 2);
    assert!(times[0] > Duration::ZERO);
    assert!(times[0] <= times[1]);
    assert!(times[1] <= context.processing_time());
}

#[test]
fn checkpoint_round_trips_through_ron() {
    let context = review(ReviewConfig::default());
    let checkpoint = &context.checkpoints()[1];
    let ron = checkpoint.to_ron_string().unwrap();
    assert!(ron.contains("ClauseAnalysis"));
    assert_eq!(&PauseCheckpoint::from_ron_string(&ron).unwrap(), checkpoint);
}
