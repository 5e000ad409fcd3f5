//! Condition extraction: if / unless / provided that / subject to.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::obligation::is_stop;

/// Fallback consequence text.
pub const UNSPECIFIED_CONSEQUENCE: &str = "consequence not clearly specified";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConditionKind {
    /// "if ... then"
    Conditional,
    /// "unless ..."
    NegativeConditional,
    /// "provided that ..."
    Proviso,
    /// "subject to ..."
    SubjectTo,
}

/// A trigger paired with a best-effort consequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Condition {
    pub kind: ConditionKind,
    pub trigger: String,
    pub consequence: String,
}

static CONDITION_PATTERNS: Lazy<Vec<(ConditionKind, Regex)>> = Lazy::new(|| {
    [
        (ConditionKind::Conditional, r"(?i)\bif\b(.+?)(?:\bthen\b|[,;.])"),
        (ConditionKind::NegativeConditional, r"(?i)\bunless\b(.+?)[,;.]"),
        (ConditionKind::Proviso, r"(?i)\bprovided that\b(.+?)[,;.]"),
        (ConditionKind::SubjectTo, r"(?i)\bsubject to\b(.+?)[,;.]"),
    ]
    .into_iter()
    .map(|(kind, p)| (kind, Regex::new(p).expect("Invalid condition regex")))
    .collect()
});

/// Extract conditions in pattern order, then text order.
///
/// The consequence is the rest of the sentence after the condition; when the
/// condition closes its sentence, the text before it in that sentence is used.
pub fn extract_conditions(text: &str) -> Vec<Condition> {
    let mut conditions = Vec::new();
    for (kind, re) in CONDITION_PATTERNS.iter() {
        for caps in re.captures_iter(text) {
            let (whole, trigger) = match (caps.get(0), caps.get(1)) {
                (Some(w), Some(t)) => (w, t),
                _ => continue,
            };
            conditions.push(Condition {
                kind: *kind,
                trigger: trigger.as_str().trim().to_string(),
                consequence: consequence(text, whole.start(), whole.end()),
            });
        }
    }
    conditions
}

fn consequence(text: &str, start: usize, end: usize) -> String {
    let closes_sentence = text[..end].ends_with(is_stop);
    if !closes_sentence {
        let rest = &text[end..];
        let after = rest.find(is_stop).map(|i| &rest[..i]).unwrap_or(rest).trim();
        if !after.is_empty() {
            return after.to_string();
        }
    }

    let head = &text[..start];
    let before = head
        .rfind(is_stop)
        .map(|i| &head[i + 1..])
        .unwrap_or(head)
        .trim()
        .trim_end_matches(',')
        .trim();
    if before.is_empty() {
        UNSPECIFIED_CONSEQUENCE.to_string()
    } else {
        before.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn if_then_reads_consequence_after() {
        let conditions =
            extract_conditions("If Client fails to pay, Provider may suspend the services.");
        assert_eq!(conditions.len(), 1);
        assert_eq!(conditions[0].kind, ConditionKind::Conditional);
        assert_eq!(conditions[0].trigger, "Client fails to pay");
        assert_eq!(conditions[0].consequence, "Provider may suspend the services");
    }

    #[test]
    fn trailing_unless_reads_consequence_before() {
        let conditions = extract_conditions(
            "Fees are non-refundable unless the services are never delivered.",
        );
        assert_eq!(conditions[0].kind, ConditionKind::NegativeConditional);
        assert_eq!(conditions[0].trigger, "the services are never delivered");
        assert_eq!(conditions[0].consequence, "Fees are non-refundable");
    }

    #[test]
    fn lone_condition_has_unspecified_consequence() {
        let conditions = extract_conditions("Subject to Section 9.");
        assert_eq!(conditions[0].kind, ConditionKind::SubjectTo);
        assert_eq!(conditions[0].consequence, UNSPECIFIED_CONSEQUENCE);
    }
}
