use layered_document::{Clause, Tag};

use crate::{AnalysisSession, ClauseAnalyzer, RiskLevel, RiskThresholds, TagTable, GENERIC_OPPORTUNITY};

fn indemnity() -> Clause {
    Clause::new(
        7,
        "Indemnification",
        "Service Provider shall indemnify and hold harmless Client from all claims \
         and shall be solely responsible for unlimited damages arising from any breach.",
    )
}

fn payment() -> Clause {
    Clause::new(
        2,
        "Payment Terms",
        "Payment shall be made within 30 days of invoice receipt. \
         Late payments incur 2% monthly penalty.",
    )
}

fn notices() -> Clause {
    Clause::new(9, "Notices", "Notices shall be sent via email.")
}

#[test]
fn indemnity_clause_is_critical() {
    let mut session = AnalysisSession::new();
    let analysis = ClauseAnalyzer::new().analyze(&indemnity(), &mut session);

    assert_eq!(analysis.clause_number(), 7);
    assert_eq!(analysis.tags(), &[Tag::Leg, Tag::Fin, Tag::Trm]);
    assert!(analysis.risk_score() >= 8.0);
    assert_eq!(analysis.risk_level(), RiskLevel::Critical);
    assert_eq!(analysis.risk_factors().len(), 4);
    assert!(analysis.vulnerabilities().contains("Unlimited liability: unlimited damages"));

    assert_eq!(
        analysis.exposure(),
        "Potential vulnerabilities include: Asymmetric terms: solely responsible; \
         Unlimited liability: unlimited damages. Category-specific concerns: \
         legal liability and enforcement challenges; financial liability and payment disputes; \
         unfavorable termination conditions."
    );
    assert!(analysis.interpretation().starts_with(
        "This clause defines legal obligations and protective mechanisms, \
         governs financial terms and payment obligations, \
         sets termination, default and notice conditions. "
    ));
    assert_eq!(analysis.opportunity(), GENERIC_OPPORTUNITY);
    assert_eq!(
        analysis.investigatory_question(),
        "Are the payment terms clearly defined with adequate protection against non-payment?"
    );
    assert!(analysis.business_risk().starts_with(
        "Critical risk level. Key concerns: Financial: Explicitly uncapped damages exposure; "
    ));
    assert!(analysis
        .business_risk()
        .ends_with("Business impact: potential for significant financial or operational disruption."));
}

#[test]
fn notices_clause_is_procedural() {
    let mut session = AnalysisSession::new();
    let analysis = ClauseAnalyzer::new().analyze(&notices(), &mut session);

    assert_eq!(analysis.tags(), &[Tag::Trm]);
    assert_eq!(analysis.risk_score(), 1.0);
    assert_eq!(analysis.risk_level(), RiskLevel::Procedural);
    assert!(analysis.risk_factors().is_empty());
    insta::assert_snapshot!(
        analysis.interpretation(),
        @"This clause sets termination, default and notice conditions through email. Appears to define obligations. Additional analysis may be needed for clarity."
    );
    assert_eq!(analysis.exposure(), "No significant vulnerabilities identified in this clause.");
    assert_eq!(
        analysis.business_risk(),
        "Procedural risk level. No specific risk factors identified."
    );
    assert_eq!(
        analysis.investigatory_question(),
        "Are the termination conditions balanced and do they provide adequate exit protection?"
    );
}

#[test]
fn payment_clause_flags_uncapped_penalty() {
    let mut session = AnalysisSession::new();
    let analysis = ClauseAnalyzer::new().analyze(&payment(), &mut session);

    assert_eq!(analysis.tags(), &[Tag::Fin]);
    assert_eq!(analysis.risk_level(), RiskLevel::Procedural);
    assert!(analysis.key_terms().contains(&"2%".to_string()));
    assert!(analysis.vulnerabilities().contains("Financial: Uncapped penalty exposure"));
    assert_eq!(analysis.opportunity(), "Consider negotiating penalty caps");
    assert!(analysis.exposure().ends_with(
        "Category-specific concerns: financial liability and payment disputes."
    ));
}

#[test]
fn level_always_matches_thresholds() {
    let thresholds = RiskThresholds::default();
    let analyzer = ClauseAnalyzer::new();
    let mut session = AnalysisSession::new();
    for clause in [indemnity(), payment(), notices()] {
        let analysis = analyzer.analyze(&clause, &mut session);
        assert_eq!(analysis.risk_level(), thresholds.level_for(analysis.risk_score()));
        assert!((0.0..=10.0).contains(&analysis.risk_score()));
        assert!(!analysis.tags().is_empty());
    }
}

#[test]
fn thresholds_are_configurable() {
    let analyzer = ClauseAnalyzer::new().with_thresholds(RiskThresholds {
        critical: 9.0,
        material: 1.05,
    });
    let mut session = AnalysisSession::new();
    assert_eq!(analyzer.analyze(&indemnity(), &mut session).risk_level(), RiskLevel::Material);
    assert_eq!(analyzer.analyze(&payment(), &mut session).risk_level(), RiskLevel::Material);
    assert_eq!(analyzer.analyze(&notices(), &mut session).risk_level(), RiskLevel::Procedural);
}

#[test]
fn session_counters_accumulate() {
    let analyzer = ClauseAnalyzer::new();
    let mut session = AnalysisSession::new();
    let mut tokens = 0;
    let mut previous = 0;
    for clause in [indemnity(), payment(), notices()] {
        let analysis = analyzer.analyze(&clause, &mut session);
        tokens += analysis.token_count();
        assert_eq!(analysis.token_count(), clause.token_estimate());
        assert!(session.token_estimate() > previous);
        previous = session.token_estimate();
    }
    assert_eq!(session.processed_clauses(), 3);
    assert_eq!(session.token_estimate(), tokens);
    assert_eq!(session.level_tally().critical, 1);
    assert_eq!(session.level_tally().procedural, 2);
    assert_eq!(session.level_tally().issues(), 1);
    assert_eq!(session.level_tally().total(), 3);
}

#[test]
fn analysis_is_deterministic() {
    let analyzer = ClauseAnalyzer::new();
    let first = analyzer.analyze(&indemnity(), &mut AnalysisSession::new());
    let second = analyzer.analyze(&indemnity(), &mut AnalysisSession::new());
    assert_eq!(first, second);
}

#[test]
fn substituted_tag_table_drives_classification() {
    let table = TagTable::from_ron_str(r#"(rules: [(tag: EXE, keywords: ["email"])])"#).unwrap();
    let analyzer = ClauseAnalyzer::new().with_tag_table(table);
    let analysis = analyzer.analyze(&notices(), &mut AnalysisSession::new());
    assert_eq!(analysis.tags(), &[Tag::Exe]);
    assert_eq!(
        analysis.investigatory_question(),
        "Does this clause adequately protect our interests while maintaining commercial viability?"
    );
}
