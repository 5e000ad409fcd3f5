//! Vulnerability scan, independent of the scoring rules.
//!
//! Indicator families flag wording that weakens a party's position; tag
//! checks flag gaps that only matter for clauses of a given subject.

use std::collections::BTreeSet;

use layered_document::Tag;
use regex::Regex;

/// A family of indicator phrases reported under one label.
#[derive(Debug, Clone)]
pub struct IndicatorFamily {
    pub label: String,
    indicators: Vec<(String, Regex)>,
}

impl IndicatorFamily {
    /// Phrases match as case-insensitive substrings.
    pub fn phrases(label: &str, phrases: &[&str]) -> Self {
        let indicators = phrases
            .iter()
            .map(|p| {
                let re = Regex::new(&format!("(?i){}", regex::escape(p)))
                    .expect("Invalid vulnerability phrase regex");
                (p.to_string(), re)
            })
            .collect();
        Self {
            label: label.to_string(),
            indicators,
        }
    }

    /// Add a phrase that must match on word boundaries.
    pub fn with_word(mut self, word: &str) -> Self {
        let re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word)))
            .expect("Invalid vulnerability word regex");
        self.indicators.push((word.to_string(), re));
        self
    }

    fn scan<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        self.indicators
            .iter()
            .filter(move |(_, re)| re.is_match(text))
            .map(move |(name, _)| format!("{}: {}", self.label, name))
    }
}

/// Tag-gated gap: `tag` present, `present` in text, `absent` not in text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCheck {
    pub tag: Tag,
    pub present: &'static str,
    pub absent: &'static str,
    pub message: &'static str,
}

const TAG_CHECKS: [TagCheck; 5] = [
    TagCheck {
        tag: Tag::Fin,
        present: "payment",
        absent: "escrow",
        message: "Financial: No escrow protection for payments",
    },
    TagCheck {
        tag: Tag::Fin,
        present: "penalty",
        absent: "cap",
        message: "Financial: Uncapped penalty exposure",
    },
    TagCheck {
        tag: Tag::Tec,
        present: "sla",
        absent: "remedy",
        message: "Technical: SLA without enforcement remedies",
    },
    TagCheck {
        tag: Tag::Tec,
        present: "deliverable",
        absent: "acceptance",
        message: "Technical: No formal acceptance criteria",
    },
    TagCheck {
        tag: Tag::Leg,
        present: "liability",
        absent: "insurance",
        message: "Legal: Liability exposure without insurance requirements",
    },
];

/// Indicator families plus tag checks.
#[derive(Debug, Clone)]
pub struct VulnerabilityScanner {
    families: Vec<IndicatorFamily>,
    tag_checks: Vec<TagCheck>,
}

impl VulnerabilityScanner {
    pub fn new(families: Vec<IndicatorFamily>, tag_checks: Vec<TagCheck>) -> Self {
        Self {
            families,
            tag_checks,
        }
    }

    /// Deduplicated, sorted vulnerability descriptions.
    pub fn scan(&self, text: &str, tags: &[Tag]) -> BTreeSet<String> {
        let mut found: BTreeSet<String> = self
            .families
            .iter()
            .flat_map(|family| family.scan(text))
            .collect();

        let lower = text.to_lowercase();
        for check in &self.tag_checks {
            if tags.contains(&check.tag) && lower.contains(check.present) && !lower.contains(check.absent) {
                found.insert(check.message.to_string());
            }
        }
        found
    }
}

impl Default for VulnerabilityScanner {
    fn default() -> Self {
        Self::new(
            vec![
                IndicatorFamily::phrases(
                    "Asymmetric terms",
                    &[
                        "solely responsible",
                        "exclusively liable",
                        "bears all costs",
                        "at own expense",
                        "at its own expense",
                        "without recourse",
                    ],
                ),
                IndicatorFamily::phrases(
                    "Vague language",
                    &[
                        "reasonable efforts",
                        "best efforts",
                        "commercially reasonable",
                        "appropriate measures",
                        "satisfactory performance",
                    ],
                ),
                IndicatorFamily::phrases(
                    "Missing protections",
                    &[
                        "without warranty",
                        "no guarantee",
                        "disclaim all liability",
                        "exclude all warranties",
                    ],
                )
                .with_word("as is"),
                IndicatorFamily::phrases(
                    "Unlimited liability",
                    &[
                        "unlimited damages",
                        "unlimited liability",
                        "uncapped",
                        "without limitation",
                    ],
                ),
            ],
            TAG_CHECKS.to_vec(),
        )
    }
}
