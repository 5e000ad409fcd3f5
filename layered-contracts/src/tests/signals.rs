use layered_document::{Clause, Tag};

use crate::{
    ConditionKind, FunctionKind, ObligatedParty, ObligationKind, TemporalKind, TermExtractor,
};

#[test]
fn delivery_clause_signals() {
    let clause = Clause::new(
        4,
        "Delivery",
        "The Provider shall deliver all deliverables within 30 days of contract execution. \
         If the Provider fails to meet the deadline, a penalty of 2% per month shall apply.",
    );
    let signals = TermExtractor::new().extract(&clause, &[Tag::Tec, Tag::Fin]);

    assert_eq!(signals.clause_number, 4);
    // "within" and "deadline" outvote the single "shall"
    assert_eq!(signals.function.value.primary, FunctionKind::EstablishTimelines);
    assert!((signals.function.confidence - 2.0 / 3.0).abs() < 1e-9);

    assert_eq!(signals.obligations.len(), 1);
    assert_eq!(signals.obligations[0].kind, ObligationKind::Delivery);
    assert_eq!(signals.obligations[0].party, ObligatedParty::Provider);
    assert_eq!(signals.obligations[0].action, "deliver");

    assert_eq!(signals.conditions.len(), 1);
    assert_eq!(signals.conditions[0].kind, ConditionKind::Conditional);
    assert_eq!(signals.conditions[0].trigger, "the Provider fails to meet the deadline");
    assert_eq!(signals.conditions[0].consequence, "a penalty of 2% per month shall apply");

    assert!(signals
        .temporal
        .iter()
        .any(|t| t.kind == TemporalKind::Duration && t.value == "30 days"));
    assert!(signals.financial_terms.contains(&"2%".to_string()));
    assert!(signals.key_terms.len() <= 10);
}

#[test]
fn extraction_is_deterministic() {
    let clause = Clause::new(
        1,
        "Liability",
        "Supplier shall be liable for any breach of warranty unless caused by Customer.",
    );
    let extractor = TermExtractor::new();
    assert_eq!(
        extractor.extract(&clause, &[Tag::Leg]),
        extractor.extract(&clause, &[Tag::Leg])
    );
}
