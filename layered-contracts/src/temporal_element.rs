//! Temporal element extraction: deadlines, durations, frequencies, immediacy.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TemporalKind {
    /// "by the Effective Date", "no later than March 1"
    Deadline,
    /// "30 days", "2 years"
    Duration,
    /// "monthly", "quarterly"
    Frequency,
    /// "immediately", "without delay"
    Immediacy,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemporalElement {
    pub kind: TemporalKind,
    /// Matched text
    pub text: String,
    /// `"<n> <plural unit>"` when a number and unit were found, else the text
    pub value: String,
    /// The sentence the element appears in
    pub context: String,
}

static TEMPORAL_PATTERNS: Lazy<Vec<(TemporalKind, Regex)>> = Lazy::new(|| {
    [
        (TemporalKind::Deadline, r"(?i)\b(?:by|before|no later than)\s+[^,.]+"),
        (TemporalKind::Duration, r"(?i)\b\d+\s*(?:day|week|month|year)s?\b"),
        (TemporalKind::Frequency, r"(?i)\b(?:daily|weekly|monthly|annually|quarterly)\b"),
        (TemporalKind::Immediacy, r"(?i)\b(?:immediately|promptly|forthwith|without delay)\b"),
    ]
    .into_iter()
    .map(|(kind, p)| (kind, Regex::new(p).expect("Invalid temporal regex")))
    .collect()
});

static NUMBER_UNIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*(\w+)").expect("Invalid number/unit regex"));

/// Extract temporal elements in pattern order, then text order.
pub fn extract_temporal_elements(text: &str) -> Vec<TemporalElement> {
    let mut elements = Vec::new();
    for (kind, re) in TEMPORAL_PATTERNS.iter() {
        for m in re.find_iter(text) {
            let matched = m.as_str().trim();
            elements.push(TemporalElement {
                kind: *kind,
                text: matched.to_string(),
                value: normalize_value(matched),
                context: sentence_context(text, matched),
            });
        }
    }
    elements
}

fn normalize_value(text: &str) -> String {
    let caps = match NUMBER_UNIT.captures(text) {
        Some(caps) => caps,
        None => return text.to_string(),
    };
    let number = &caps[1];
    let unit = caps[2].to_lowercase();
    let unit = match unit.as_str() {
        "day" | "days" => "days",
        "week" | "weeks" => "weeks",
        "month" | "months" => "months",
        "year" | "years" => "years",
        other => other,
    };
    format!("{} {}", number, unit)
}

fn sentence_context(text: &str, needle: &str) -> String {
    text.split('.')
        .find(|s| s.contains(needle))
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "context not found".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_clause_elements() {
        let elements = extract_temporal_elements(
            "Payment shall be made within 30 days of invoice receipt. Late payments incur 2% monthly penalty.",
        );
        let summary: Vec<_> = elements
            .iter()
            .map(|e| (e.kind, e.value.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (TemporalKind::Duration, "30 days"),
                (TemporalKind::Frequency, "monthly"),
            ]
        );
        assert_eq!(
            elements[0].context,
            "Payment shall be made within 30 days of invoice receipt"
        );
    }

    #[test]
    fn units_normalise_to_plural_form() {
        let elements = extract_temporal_elements("The term is 1 year.");
        assert_eq!(elements[0].value, "1 years");
    }

    #[test]
    fn deadline_runs_to_clause_break() {
        let elements =
            extract_temporal_elements("Reports are due no later than the fifth business day, each month.");
        assert_eq!(elements[0].kind, TemporalKind::Deadline);
        assert_eq!(elements[0].text, "no later than the fifth business day");
        assert_eq!(elements[0].value, "no later than the fifth business day");
    }
}
