use layered_clauses::RiskLevel;
use layered_document::{Clause, ContractDocument, Tag};
use layered_negotiation::Priority;

use crate::{
    ReviewConfig, ReviewError, ReviewInput, ReviewOrchestrator, ReviewPipeline, ReviewState,
    StageKind, SummaryStatus,
};

pub(super) const MSA: &str = "MASTER SERVICES AGREEMENT

This Agreement is made between Acme Analytics Ltd and Northwind Retail Inc.

1. Scope of Services
Provider shall deliver the platform described in Annex A.

2. Payment Terms
Payment shall be made within 30 days of invoice receipt.
Late payments incur 2% monthly penalty.

3. Indemnification
Service Provider shall indemnify and hold harmless Client from all claims and shall be solely responsible for unlimited damages arising from any breach.

4. Notices
Notices shall be sent via email.

5. Confidentiality
Each party shall keep the other party's information confidential.

6. Governing Law
This Agreement is governed by the laws of England.

7. Assignment
Neither party may assign this Agreement without consent.
";

fn orchestrator(config: ReviewConfig) -> ReviewOrchestrator {
    ReviewOrchestrator::new(config).unwrap()
}

#[test]
fn standard_review_runs_every_stage() {
    let context = ReviewOrchestrator::default()
        .review(ReviewInput::text(MSA))
        .unwrap();

    assert!(context.errors().is_empty(), "{:?}", context.errors());
    assert!(context.warnings().is_empty());
    assert_eq!(context.document().unwrap().title(), "MASTER SERVICES AGREEMENT");
    assert_eq!(context.clause_signals().len(), 7);

    let numbers: Vec<_> = context.clause_analyses().iter().map(|a| a.clause_number()).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 7]);

    let indemnity = &context.clause_analyses()[2];
    assert_eq!(indemnity.risk_level(), RiskLevel::Critical);
    assert_eq!(context.clause_analyses()[1].tags(), &[Tag::Fin]);
    assert_eq!(context.clause_analyses()[3].risk_level(), RiskLevel::Procedural);

    let overview = context.risk_overview().unwrap();
    assert!(overview.high_risk_clauses.contains(&3));
    assert_eq!(overview.level_distribution.values().sum::<usize>(), 7);

    let recs = context.recommendations();
    assert_eq!(recs.len(), 3);
    assert_eq!(recs[0].priority, Priority::Critical);
    assert_eq!(recs[0].clause_number, 3);
    assert!(recs.windows(2).all(|w| w[0].priority.rank() <= w[1].priority.rank()));

    let summary = context.get_summary();
    assert_eq!(summary.status, SummaryStatus::Completed);
    assert_eq!(summary.total_clauses, 7);
    assert_eq!(
        summary.critical_issues + summary.material_issues + summary.procedural_issues,
        7
    );
    assert!(summary.critical_issues >= 1);
    assert_eq!(summary.negotiation_items, 3);

    let report = context.report().unwrap();
    assert_eq!(report.document_title, "MASTER SERVICES AGREEMENT");
    assert_eq!(report.negotiation_summary.total, 3);
    assert_eq!(report.negotiation_summary.critical, 1);
    assert_eq!(report.checkpoint_count, 2);
}

#[test]
fn report_lists_opportunities_per_clause() {
    let context = ReviewOrchestrator::default()
        .review(ReviewInput::text(MSA))
        .unwrap();
    let opportunities = &context.report().unwrap().clause_opportunities;

    assert_eq!(opportunities.len(), 7);
    assert_eq!(opportunities, &context.clause_opportunities().to_vec());

    let indemnity = &opportunities[2];
    assert_eq!(indemnity.clause_number, 3);
    insta::assert_snapshot!(
        indemnity.from_rules,
        @"Critical financial risk requires immediate attention and likely redlining One-sided indemnification should be made mutual Add cure period before termination or penalty application"
    );
    assert_eq!(indemnity.general, "Push for mutual indemnification to balance liability.");

    let notices = &opportunities[3];
    assert_eq!(notices.from_rules, layered_negotiation::NO_OPPORTUNITIES);
    assert_eq!(notices.general, layered_negotiation::STANDARD_PROTECTIONS);

    let value = context.to_json_value().unwrap();
    assert_eq!(
        value["report"]["clause_opportunities"][1]["clause_title"],
        "Payment Terms"
    );
}

#[test]
fn context_exports_as_json() {
    let context = ReviewOrchestrator::default()
        .review(ReviewInput::text(MSA))
        .unwrap();
    let value = context.to_json_value().unwrap();
    assert_eq!(value["clause_analyses"].as_array().map(Vec::len), Some(7));
    assert_eq!(value["errors"].as_array().map(Vec::len), Some(0));
    assert!(context.to_json_string().unwrap().contains("\"Indemnification\""));
}

#[test]
fn document_input_skips_text_parsing() {
    let document = ContractDocument::new(
        "SERVICE AGREEMENT",
        vec![
            Clause::new(1, "Notices", "Notices shall be sent via email."),
            Clause::new(2, "Payment Terms", "Payment is due within 30 days of invoice."),
        ],
    );
    let context = ReviewOrchestrator::default()
        .review(ReviewInput::Document(document))
        .unwrap();
    assert_eq!(context.clause_analyses().len(), 2);
    assert!(context.checkpoints().is_empty());
}

#[test]
fn document_numbering_does_not_need_to_ascend() {
    let document = ContractDocument::new(
        "SERVICE AGREEMENT",
        vec![
            Clause::new(2, "Payment Terms", "Payment is due within 30 days of invoice."),
            Clause::new(1, "Notices", "Notices shall be sent via email."),
            Clause::new(1, "Notices", "Notices may also be sent by post."),
        ],
    );
    let mut run = ReviewOrchestrator::default()
        .start(ReviewInput::Document(document))
        .unwrap();
    let state = run.advance(|_| crate::CheckpointDecision::Continue).unwrap();

    assert_eq!(state, ReviewState::Completed);
    let context = run.context();
    assert!(context.errors().is_empty(), "{:?}", context.errors());
    let numbers: Vec<_> = context.clause_analyses().iter().map(|a| a.clause_number()).collect();
    assert_eq!(numbers, vec![2, 1, 1]);
}

#[test]
fn empty_input_is_rejected_before_any_stage() {
    assert!(matches!(
        ReviewOrchestrator::default().start(ReviewInput::text("  \n ")),
        Err(ReviewError::Input(_))
    ));
    assert!(matches!(
        ReviewOrchestrator::default().start(ReviewInput::Document(ContractDocument::new("Empty", vec![]))),
        Err(ReviewError::Input(_))
    ));
}

#[test]
fn parse_failure_aborts_with_partial_context() {
    let mut run = ReviewOrchestrator::default()
        .start(ReviewInput::text("Just a paragraph.\nAnother line."))
        .unwrap();
    let state = run.advance(|_| crate::CheckpointDecision::Continue).unwrap();

    assert!(matches!(state, ReviewState::Aborted { .. }));
    let context = run.context();
    assert_eq!(context.errors().len(), 1);
    assert!(context.errors()[0].starts_with("Parsing stage failed: parse error"));
    assert!(context.document().is_none());
    assert!(context.clause_analyses().is_empty());
    assert!(!context.should_continue_processing());
}

#[test]
fn clause_analysis_failure_is_fatal() {
    let document = ContractDocument::new(
        "SERVICE AGREEMENT",
        vec![Clause::new(1, "Notices", "Notices shall be sent via email.")],
    );
    let mut run = ReviewOrchestrator::default()
        .with_pipeline(ReviewPipeline::with_stages(vec![
            StageKind::ClauseAnalysis,
            StageKind::RiskAssessment,
        ]))
        .start(ReviewInput::Document(document))
        .unwrap();

    let err = run.advance(|_| crate::CheckpointDecision::Continue).unwrap_err();
    assert!(matches!(
        err,
        ReviewError::StageFailed { stage: StageKind::ClauseAnalysis, .. }
    ));
    assert!(matches!(run.state(), ReviewState::Aborted { .. }));
    assert_eq!(
        run.context().errors(),
        &["Clause Analysis stage failed: missing input: no contract document".to_string()]
    );
    assert!(run.context().risk_overview().is_none());

    assert!(matches!(
        run.advance(|_| crate::CheckpointDecision::Continue),
        Err(ReviewError::InvalidState(_))
    ));
}

#[test]
fn non_fatal_failures_are_recorded_and_skipped() {
    let context = ReviewOrchestrator::default()
        .with_pipeline(ReviewPipeline::with_stages(vec![
            StageKind::Parsing,
            StageKind::Negotiation,
            StageKind::Reporting,
        ]))
        .review(ReviewInput::text(MSA))
        .unwrap();

    assert_eq!(
        context.errors(),
        &["Negotiation stage failed: validation failed: no clause analyses available".to_string()]
    );
    assert!(context.report().is_some());
    assert!(context.get_summary().has_errors);
}

#[test]
fn analysis_only_preset_stops_after_risk() {
    let context = ReviewOrchestrator::default()
        .with_pipeline(ReviewPipeline::analysis_only())
        .review(ReviewInput::text(MSA))
        .unwrap();
    assert!(context.risk_overview().is_some());
    assert!(context.recommendations().is_empty());
    assert!(context.negotiation_summary().is_none());
    assert!(context.report().is_none());
}

#[test]
fn malformed_rules_fall_back_with_one_warning() {
    let context = ReviewOrchestrator::default()
        .with_negotiation_rules("negotiation_rules = [ not toml")
        .review(ReviewInput::text(MSA))
        .unwrap();
    assert_eq!(context.warnings().len(), 1);
    assert!(context.warnings()[0].starts_with("Invalid negotiation rules, using defaults"));
    assert!(context.errors().is_empty());
    assert_eq!(context.recommendations().len(), 3);
}

#[test]
fn external_rules_replace_defaults() {
    let rules = r#"
[[negotiation_rules]]
name = "Assignment Consent"
priority = "Low"

[negotiation_rules.conditions]
content_contains = ["assign"]

[negotiation_rules.recommendation]
type = "clarification"
suggested_change = "State that consent to assignment may not be unreasonably withheld"
"#;
    let context = ReviewOrchestrator::default()
        .with_negotiation_rules(rules)
        .review(ReviewInput::text(MSA))
        .unwrap();
    assert!(context.warnings().is_empty());
    let recs = context.recommendations();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].rule_name, "Assignment Consent");
    assert_eq!(recs[0].clause_number, 7);
}

#[test]
fn clause_limit_and_tag_filter() {
    let limited = orchestrator(ReviewConfig::default().with_clause_limit(2))
        .review(ReviewInput::text(MSA))
        .unwrap();
    let numbers: Vec<_> = limited.clause_analyses().iter().map(|a| a.clause_number()).collect();
    assert_eq!(numbers, vec![1, 2]);

    let filtered = orchestrator(ReviewConfig::default().with_filter_tags(vec![Tag::Fin]))
        .review(ReviewInput::text(MSA))
        .unwrap();
    let numbers: Vec<_> = filtered.clause_analyses().iter().map(|a| a.clause_number()).collect();
    assert_eq!(numbers, vec![2, 3]);
    assert_eq!(filtered.session().processed_clauses(), 7);
}

#[test]
fn custom_floors_change_levels() {
    let context = orchestrator(ReviewConfig::default().with_score_floors(9.0, 8.0))
        .review(ReviewInput::text(MSA))
        .unwrap();
    assert_eq!(context.clause_analyses()[2].risk_level(), RiskLevel::Material);
    // the critical financial rule no longer fires
    assert!(context
        .recommendations()
        .iter()
        .all(|r| r.rule_name != "High Financial Risk"));
}

#[test]
fn invalid_config_is_rejected() {
    assert!(matches!(
        ReviewOrchestrator::new(ReviewConfig::default().with_clause_interval(0)),
        Err(ReviewError::Config(_))
    ));
}
