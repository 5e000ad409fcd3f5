use layered_document::Tag;

use crate::{aggregate_score, RiskAssessor, RiskCategory, RiskFactor, MAX_SCORE};

const INDEMNITY: &str = "Service Provider shall indemnify and hold harmless Client from all claims \
and shall be solely responsible for unlimited damages arising from any breach.";

const PAYMENT: &str = "Payment shall be made within 30 days of invoice receipt. \
Late payments incur 2% monthly penalty.";

fn factor(category: RiskCategory, severity: f64, likelihood: f64) -> RiskFactor {
    RiskFactor {
        category,
        description: "test".to_string(),
        severity,
        likelihood,
        impact: String::new(),
        mitigation: String::new(),
    }
}

#[test]
fn indemnity_clause_is_critical_territory() {
    let assessment = RiskAssessor::new().assess_full(INDEMNITY, &[Tag::Leg, Tag::Fin]);

    // rms of 11.4, 2.145, 8.91, 8.415
    assert!(assessment.overall_score >= 8.0);
    assert!((assessment.overall_score - 8.4374).abs() < 1e-3);
    assert_eq!(
        assessment.factor_descriptions(),
        vec![
            "Financial: Explicitly uncapped damages exposure",
            "Legal: Blanket hold-harmless obligation covering all claims",
            "Legal: Sole responsibility allocated to one party",
            "Legal: One-sided indemnification obligations",
        ]
    );
    let vulnerabilities: Vec<_> = assessment.vulnerabilities.iter().cloned().collect();
    insta::assert_snapshot!(
        vulnerabilities.join("; "),
        @"Asymmetric terms: solely responsible; Unlimited liability: unlimited damages"
    );
}

#[test]
fn indemnity_clause_distribution_and_recommendations() {
    let assessment = RiskAssessor::new().assess_full(INDEMNITY, &[Tag::Leg, Tag::Fin]);

    assert_eq!(assessment.distribution.len(), 6);
    assert!((assessment.distribution[&RiskCategory::Financial] - 9.5).abs() < 1e-9);
    assert!((assessment.distribution[&RiskCategory::Legal] - 5.9).abs() < 1e-9);
    assert_eq!(assessment.distribution[&RiskCategory::Operational], 0.0);

    assert_eq!(
        assessment.recommendations,
        vec![
            "Financial: Insert an aggregate liability cap tied to contract value",
            "Legal: Limit indemnity to third-party claims caused by the indemnifying party",
            "Legal: Allocate responsibility in proportion to fault",
            "Financial: Consider adding payment security mechanisms",
            "Legal: Review indemnification and liability provisions",
        ]
    );
}

#[test]
fn unremarkable_clause_scores_baseline() {
    let (score, factors) = RiskAssessor::new().assess("Notices shall be sent via email.", &[]);
    assert_eq!(score, 1.0);
    assert!(factors.is_empty());
}

#[test]
fn payment_clause_is_low_risk() {
    let (score, factors) = RiskAssessor::new().assess(PAYMENT, &[Tag::Fin]);
    // rms of 2.16 and 1.1
    assert!(score < 5.0);
    assert!((score - 1.714).abs() < 1e-3);
    assert_eq!(
        factors,
        vec![
            "Financial: Payment terms lack penalty provisions for late payment",
            "Compliance: Financial operations without AML/CTF compliance measures",
        ]
    );
}

#[test]
fn rms_aggregation_keeps_severe_factors_dominant() {
    let single = aggregate_score(&[factor(RiskCategory::Compliance, 6.0, 0.5)]);
    let double = aggregate_score(&[
        factor(RiskCategory::Compliance, 6.0, 0.5),
        factor(RiskCategory::Compliance, 6.0, 0.5),
    ]);
    let diluted = aggregate_score(&[
        factor(RiskCategory::Compliance, 9.0, 1.0),
        factor(RiskCategory::Compliance, 1.0, 0.1),
    ]);
    assert!((single - 3.0).abs() < 1e-9);
    assert!((double - 3.0).abs() < 1e-9);
    // rms keeps the severe factor dominant: sqrt((81 + 0.01) / 2)
    assert!(diluted > 6.3);
}

#[test]
fn score_is_clamped() {
    let score = aggregate_score(&[factor(RiskCategory::Financial, 10.0, 1.0)]);
    assert_eq!(score, MAX_SCORE);
}

#[test]
fn assessment_is_deterministic() {
    let assessor = RiskAssessor::new();
    assert_eq!(
        assessor.assess_full(INDEMNITY, &[Tag::Leg]),
        assessor.assess_full(INDEMNITY, &[Tag::Leg])
    );
}
