//! Clause function classification by indicator voting.
//!
//! Each of eight functions owns a short indicator list; every indicator
//! found (as a whole word or phrase) casts one vote. The function with the
//! most votes wins, earlier functions winning ties. Confidence is
//! `votes / 3`, capped at 1.0.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::Scored;

/// Confidence above which a function is reported as the primary function.
pub const CONFIDENT_FUNCTION: f64 = 0.7;

/// What a clause is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FunctionKind {
    DefineObligations,
    EstablishRights,
    SetConditions,
    SpecifyProcedures,
    AllocateRisks,
    DefineTerms,
    EstablishTimelines,
    GovernPayments,
    /// No indicator fired
    EstablishContractualTerms,
}

impl FunctionKind {
    /// The eight voting functions, in tie-break order.
    pub const VOTING: [FunctionKind; 8] = [
        FunctionKind::DefineObligations,
        FunctionKind::EstablishRights,
        FunctionKind::SetConditions,
        FunctionKind::SpecifyProcedures,
        FunctionKind::AllocateRisks,
        FunctionKind::DefineTerms,
        FunctionKind::EstablishTimelines,
        FunctionKind::GovernPayments,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FunctionKind::DefineObligations => "define obligations",
            FunctionKind::EstablishRights => "establish rights",
            FunctionKind::SetConditions => "set conditions",
            FunctionKind::SpecifyProcedures => "specify procedures",
            FunctionKind::AllocateRisks => "allocate risks",
            FunctionKind::DefineTerms => "define terms",
            FunctionKind::EstablishTimelines => "establish timelines",
            FunctionKind::GovernPayments => "govern payments",
            FunctionKind::EstablishContractualTerms => "establish contractual terms",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FunctionKind::DefineObligations => {
                "This clause creates binding duties and responsibilities for the parties."
            }
            FunctionKind::EstablishRights => {
                "This clause grants specific rights and permissions to the parties."
            }
            FunctionKind::SetConditions => {
                "This clause establishes conditional requirements that must be met."
            }
            FunctionKind::SpecifyProcedures => {
                "This clause outlines the specific processes and methods to be followed."
            }
            FunctionKind::AllocateRisks => {
                "This clause determines how risks and liabilities are distributed."
            }
            FunctionKind::DefineTerms => {
                "This clause provides definitions and interpretations of key terms."
            }
            FunctionKind::EstablishTimelines => {
                "This clause sets important deadlines and scheduling requirements."
            }
            FunctionKind::GovernPayments => {
                "This clause controls financial obligations and payment procedures."
            }
            FunctionKind::EstablishContractualTerms => {
                "This clause establishes contractual provisions."
            }
        }
    }

    fn indicators(&self) -> &'static [&'static str] {
        match self {
            FunctionKind::DefineObligations => &["shall", "must", "agrees to", "undertakes to"],
            FunctionKind::EstablishRights => &["entitled to", "right to", "may", "permitted to"],
            FunctionKind::SetConditions => &["if", "unless", "provided that", "subject to"],
            FunctionKind::SpecifyProcedures => &["procedure", "process", "method", "manner"],
            FunctionKind::AllocateRisks => &["liable", "responsible", "assumes", "bears"],
            FunctionKind::DefineTerms => &["means", "defined as", "refers to", "includes"],
            FunctionKind::EstablishTimelines => &["within", "by", "deadline", "schedule"],
            FunctionKind::GovernPayments => &["payment", "invoice", "fee", "cost", "penalty"],
            FunctionKind::EstablishContractualTerms => &[],
        }
    }
}

static INDICATORS: Lazy<Vec<(FunctionKind, Vec<(&'static str, Regex)>)>> = Lazy::new(|| {
    FunctionKind::VOTING
        .iter()
        .map(|kind| {
            let patterns = kind
                .indicators()
                .iter()
                .map(|ind| {
                    let re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(ind)))
                        .expect("Invalid function indicator regex");
                    (*ind, re)
                })
                .collect();
            (*kind, patterns)
        })
        .collect()
});

/// Result of function classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClauseFunction {
    pub primary: FunctionKind,
    /// Other functions with at least one vote, in tie-break order
    pub secondary: Vec<FunctionKind>,
    /// Every indicator that voted
    pub indicators: Vec<String>,
}

/// Classify the clause function.
pub fn classify_function(text: &str) -> Scored<ClauseFunction> {
    let mut votes: Vec<(FunctionKind, usize)> = Vec::new();
    let mut indicators = Vec::new();

    for (kind, patterns) in INDICATORS.iter() {
        let mut count = 0;
        for (indicator, re) in patterns {
            if re.is_match(text) {
                count += 1;
                indicators.push(indicator.to_string());
            }
        }
        votes.push((*kind, count));
    }

    let best = votes.iter().map(|(_, v)| *v).max().unwrap_or(0);
    if best == 0 {
        return Scored::fallback(
            ClauseFunction {
                primary: FunctionKind::EstablishContractualTerms,
                secondary: Vec::new(),
                indicators,
            },
            0.3,
            "no function indicators",
        );
    }

    let primary = votes
        .iter()
        .find(|(_, v)| *v == best)
        .map(|(kind, _)| *kind)
        .unwrap_or(FunctionKind::EstablishContractualTerms);
    let secondary = votes
        .iter()
        .filter(|(kind, v)| *kind != primary && *v > 0)
        .map(|(kind, _)| *kind)
        .collect();

    Scored::rule_based(
        ClauseFunction {
            primary,
            secondary,
            indicators,
        },
        (best as f64 / 3.0).min(1.0),
        "function_indicator_vote",
    )
}

/// One-sentence rendering used in clause interpretations.
pub fn describe_function(function: &Scored<ClauseFunction>) -> String {
    let kind = function.value.primary;
    if function.is_confident(CONFIDENT_FUNCTION) {
        format!("Primary function: {}. {}", kind.label(), kind.description())
    } else {
        format!(
            "Appears to {}. Additional analysis may be needed for clarity.",
            kind.label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_indicators_falls_back() {
        let function = classify_function("Notices to the address above.");
        assert_eq!(function.value.primary, FunctionKind::EstablishContractualTerms);
        assert_eq!(function.confidence, 0.3);
        assert_eq!(
            describe_function(&function),
            "Appears to establish contractual terms. Additional analysis may be needed for clarity."
        );
    }

    #[test]
    fn payment_clause_votes_for_payments() {
        let function = classify_function(
            "Payment of each invoice fee is due monthly; a late penalty applies.",
        );
        assert_eq!(function.value.primary, FunctionKind::GovernPayments);
        assert_eq!(function.confidence, 1.0);
        insta::assert_snapshot!(
            describe_function(&function),
            @"Primary function: govern payments. This clause controls financial obligations and payment procedures."
        );
    }

    #[test]
    fn ties_go_to_earlier_function() {
        // one obligation vote ("shall"), one timeline vote ("within")
        let function = classify_function("Supplier shall respond within a day.");
        assert_eq!(function.value.primary, FunctionKind::DefineObligations);
        assert_eq!(function.value.secondary, vec![FunctionKind::EstablishTimelines]);
        assert!((function.confidence - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn indicators_match_whole_words_only() {
        // "notify" and "bypass" must not count as "if" / "by"
        let function = classify_function("Notify the team to bypass.");
        assert_eq!(function.value.primary, FunctionKind::EstablishContractualTerms);
    }
}
