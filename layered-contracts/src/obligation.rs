//! Obligation extraction: who must do what.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Kind of obligation detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObligationKind {
    Payment,
    Delivery,
    Performance,
    Notice,
}

impl ObligationKind {
    pub fn description(&self) -> &'static str {
        match self {
            ObligationKind::Payment => "payment obligation",
            ObligationKind::Delivery => "delivery obligation",
            ObligationKind::Performance => "performance obligation",
            ObligationKind::Notice => "notice obligation",
        }
    }
}

/// The party an obligation falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObligatedParty {
    Provider,
    Client,
    Both,
    Unspecified,
}

impl ObligatedParty {
    /// First party whose indicator appears in `text` (Provider, then Client, then Both).
    fn detect(text: &str) -> Self {
        let lower = text.to_lowercase();
        let candidates: [(ObligatedParty, &[&str]); 3] = [
            (ObligatedParty::Provider, &["provider", "contractor", "vendor", "supplier"]),
            (ObligatedParty::Client, &["client", "customer", "buyer", "purchaser"]),
            (ObligatedParty::Both, &["parties", "each party", "both"]),
        ];
        candidates
            .iter()
            .find(|(_, indicators)| indicators.iter().any(|i| lower.contains(i)))
            .map(|(party, _)| *party)
            .unwrap_or(ObligatedParty::Unspecified)
    }
}

/// A detected obligation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Obligation {
    pub kind: ObligationKind,
    /// Matched text
    pub text: String,
    pub party: ObligatedParty,
    /// Verb following the modal, or "perform"
    pub action: String,
}

static OBLIGATION_PATTERNS: Lazy<Vec<(ObligationKind, Regex)>> = Lazy::new(|| {
    [
        (ObligationKind::Payment, r"(?i)\b(?:shall pay|must pay|payment.{0,20}due)\b"),
        (ObligationKind::Delivery, r"(?i)\b(?:shall deliver|must provide|delivery.{0,20}required)\b"),
        (ObligationKind::Performance, r"(?i)\b(?:shall perform|must complete|performance.{0,20}required)\b"),
        (ObligationKind::Notice, r"(?i)\b(?:shall notify|must inform|notice.{0,20}required)\b"),
    ]
    .into_iter()
    .map(|(kind, p)| (kind, Regex::new(p).expect("Invalid obligation regex")))
    .collect()
});

static ACTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:shall|must|will|agrees? to|undertakes? to)\s+(\w+)")
        .expect("Invalid obligation action regex")
});

/// Extract obligations in pattern order, then text order.
///
/// The party is read from the matched text first and, failing that, from
/// the sentence the match sits in.
pub fn extract_obligations(text: &str) -> Vec<Obligation> {
    let mut obligations = Vec::new();
    for (kind, re) in OBLIGATION_PATTERNS.iter() {
        for m in re.find_iter(text) {
            let matched = m.as_str();
            let party = match ObligatedParty::detect(matched) {
                ObligatedParty::Unspecified => {
                    ObligatedParty::detect(enclosing_sentence(text, m.start(), m.end()))
                }
                party => party,
            };
            let action = ACTION
                .captures(matched)
                .and_then(|c| c.get(1))
                .map(|a| a.as_str().to_string())
                .unwrap_or_else(|| "perform".to_string());
            obligations.push(Obligation {
                kind: *kind,
                text: matched.to_string(),
                party,
                action,
            });
        }
    }
    obligations
}

/// The `.`/`;`-delimited sentence containing `start..end`.
pub(crate) fn enclosing_sentence(text: &str, start: usize, end: usize) -> &str {
    let begin = text[..start].rfind(is_stop).map(|i| i + 1).unwrap_or(0);
    let finish = text[end..].find(is_stop).map(|i| end + i).unwrap_or(text.len());
    text[begin..finish].trim()
}

pub(crate) fn is_stop(c: char) -> bool {
    c == '.' || c == ';'
}
