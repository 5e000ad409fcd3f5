//! Per-clause negotiation opportunities.
//!
//! Two views are kept side by side: the opportunity lines of every rule that
//! matches the clause, and a tag-driven checklist of common leverage points
//! that applies whether or not any rule fired.

use layered_clauses::ClauseAnalysis;
use layered_document::Tag;
use serde::Serialize;

pub const STANDARD_PROTECTIONS: &str =
    "Consider standard commercial protections and balanced risk allocation.";

/// Opportunities found for one analyzed clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClauseOpportunity {
    pub clause_number: usize,
    pub clause_title: String,
    /// Joined opportunity lines of the matching rules
    pub from_rules: String,
    /// Tag checklist result, see [`general_opportunities`]
    pub general: String,
}

struct Hook {
    tag: Tag,
    present: &'static str,
    absent: Option<&'static str>,
    text: &'static str,
}

const HOOKS: &[Hook] = &[
    Hook { tag: Tag::Fin, present: "penalty", absent: Some("cap"), text: "Consider negotiating penalty caps to limit financial exposure" },
    Hook { tag: Tag::Fin, present: "payment", absent: Some("escrow"), text: "Explore escrow arrangements for payment security" },
    Hook { tag: Tag::Fin, present: "late", absent: Some("cure"), text: "Request cure period before late payment penalties apply" },
    Hook { tag: Tag::Leg, present: "indemnif", absent: Some("mutual"), text: "Push for mutual indemnification to balance liability" },
    Hook { tag: Tag::Leg, present: "liability", absent: Some("limit"), text: "Negotiate liability limitations and caps" },
    Hook { tag: Tag::Leg, present: "jurisdiction", absent: None, text: "Evaluate jurisdiction for favorability and convenience" },
    Hook { tag: Tag::Tec, present: "deliverable", absent: Some("acceptance"), text: "Define clear acceptance criteria for deliverables" },
    Hook { tag: Tag::Tec, present: "sla", absent: Some("remedy"), text: "Include specific remedies for SLA breaches" },
    Hook { tag: Tag::Trm, present: "terminat", absent: Some("cure"), text: "Negotiate cure periods before termination rights activate" },
    Hook { tag: Tag::Trm, present: "convenience", absent: None, text: "Seek reciprocal termination rights or notice periods" },
];

/// Leverage points suggested by the clause's tags and wording.
///
/// Returns the matching hooks joined by `"; "` and closed with a period, or
/// [`STANDARD_PROTECTIONS`] when none apply.
pub fn general_opportunities(content: &str, tags: &[Tag]) -> String {
    let lower = content.to_lowercase();
    let found: Vec<&str> = HOOKS
        .iter()
        .filter(|hook| tags.contains(&hook.tag))
        .filter(|hook| lower.contains(hook.present))
        .filter(|hook| hook.absent.map_or(true, |absent| !lower.contains(absent)))
        .map(|hook| hook.text)
        .collect();

    if found.is_empty() {
        STANDARD_PROTECTIONS.to_string()
    } else {
        format!("{}.", found.join("; "))
    }
}

impl ClauseOpportunity {
    pub(crate) fn new(analysis: &ClauseAnalysis, from_rules: String) -> Self {
        let clause = analysis.clause();
        Self {
            clause_number: clause.number(),
            clause_title: clause.title().to_string(),
            from_rules,
            general: general_opportunities(clause.content(), analysis.tags()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_hooks_stack() {
        insta::assert_snapshot!(
            general_opportunities(
                "Payment shall be made within 30 days. Late payments incur 2% monthly penalty.",
                &[Tag::Fin],
            ),
            @"Consider negotiating penalty caps to limit financial exposure; Explore escrow arrangements for payment security; Request cure period before late payment penalties apply."
        );
    }

    #[test]
    fn hooks_need_their_tag() {
        let text = "Either party may terminate for convenience.";
        assert_eq!(general_opportunities(text, &[Tag::Doc]), STANDARD_PROTECTIONS);
        assert_eq!(
            general_opportunities(text, &[Tag::Trm]),
            "Negotiate cure periods before termination rights activate; \
             Seek reciprocal termination rights or notice periods."
        );
    }
}
