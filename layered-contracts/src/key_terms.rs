//! Key term extraction and ranking.
//!
//! Candidates come from four independent extractors, in this order:
//!
//! - **Legal vocabulary**: curated multi-word phrases, then single words
//! - **Technical**: SLA percentages, hour/day figures, uptime wording (only when the clause is tagged TEC)
//! - **Financial**: currency amounts, percentages, payment keywords, payment windows
//! - **Temporal**: durations, immediacy adverbs, `upon X`, `within N units`
//!
//! Each distinct candidate is scored once; ties keep first-encounter order.

use std::cmp::Ordering;

use layered_document::Tag;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Number of terms returned by [`KeyTermExtractor::extract_key_terms`].
pub const KEY_TERM_LIMIT: usize = 10;

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("Invalid term extraction regex"))
        .collect()
}

static TECHNICAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)\b\d+(?:\.\d+)?%",
        r"(?i)\b\d+\s*hours?\b",
        r"(?i)\b\d+\s*days?\b",
        r"(?i)\buptime\b",
        r"(?i)\bperformance\b",
        r"(?i)\bdeliverables?\b",
    ])
});

static FINANCIAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"\$[\d,]+(?:\.\d{2})?",
        r"\b\d+(?:\.\d+)?%",
        r"(?i)\b(?:payment|fee|cost|penalty|refund)\b",
        r"(?i)\b\d+\s*days?\s*(?:after|before|from)\b",
    ])
});

static TEMPORAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    compile(&[
        r"(?i)\b\d+\s*(?:day|week|month|year)s?\b",
        r"(?i)\bimmediately\b",
        r"(?i)\bpromptly\b",
        r"(?i)\bupon\s+\w+",
        r"(?i)\bwithin\s+\d+\s*\w+",
        r"(?i)\bno\s+later\s+than\b",
    ])
});

/// Curated legal vocabulary driving the legal extractor and the high-value bonus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalVocabulary {
    /// Single words, matched against whitespace-separated tokens
    pub words: Vec<String>,
    /// Multi-word phrases, matched as case-insensitive substrings
    pub phrases: Vec<String>,
    /// Terms that earn the high-value bonus
    pub high_value: Vec<String>,
}

impl Default for LegalVocabulary {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            words: owned(&[
                "liability",
                "indemnification",
                "breach",
                "default",
                "termination",
                "jurisdiction",
                "governing",
                "arbitration",
                "mediation",
                "damages",
                "warranty",
                "representation",
                "covenant",
                "obligation",
                "remedy",
            ]),
            phrases: owned(&[
                "governing law",
                "dispute resolution",
                "force majeure",
                "intellectual property",
                "confidential information",
                "trade secrets",
                "limitation of liability",
                "liquidated damages",
                "specific performance",
                "injunctive relief",
            ]),
            high_value: owned(&[
                "indemnification",
                "limitation of liability",
                "intellectual property",
                "termination",
                "breach",
                "governing law",
                "dispute resolution",
            ]),
        }
    }
}

/// Keyword families a context tag boosts.
fn tag_family(tag: Tag) -> &'static [&'static str] {
    match tag {
        Tag::Fin => &["payment", "fee", "cost"],
        Tag::Leg => &["liability", "breach", "law"],
        Tag::Tec => &["deliverable", "performance", "uptime"],
        Tag::Ipx => &["intellectual property", "copyright", "license"],
        Tag::Trm => &["termination", "breach", "notice"],
        Tag::Com | Tag::Dis | Tag::Doc | Tag::Exe | Tag::Ext => &[],
    }
}

/// A ranked candidate term.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyTerm {
    pub term: String,
    pub score: f64,
}

/// Extracts and ranks candidate terms from clause text.
#[derive(Debug, Clone, Default)]
pub struct KeyTermExtractor {
    vocabulary: LegalVocabulary,
}

impl KeyTermExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vocabulary(vocabulary: LegalVocabulary) -> Self {
        Self { vocabulary }
    }

    /// The ten highest-scoring terms, best first.
    pub fn extract_key_terms(&self, text: &str, tags: &[Tag]) -> Vec<String> {
        self.rank_terms(text, tags)
            .into_iter()
            .take(KEY_TERM_LIMIT)
            .map(|t| t.term)
            .collect()
    }

    /// Every distinct candidate with its score, sorted descending.
    ///
    /// The sort is stable, so equal scores keep the order in which the
    /// extractors first produced them.
    pub fn rank_terms(&self, text: &str, tags: &[Tag]) -> Vec<KeyTerm> {
        let clean = clean_text(text);
        let lower = clean.to_lowercase();

        let mut candidates: Vec<String> = Vec::new();
        candidates.extend(self.legal_terms(&clean));
        if tags.contains(&Tag::Tec) {
            candidates.extend(find_all(&TECHNICAL_PATTERNS, &clean));
        }
        candidates.extend(find_all(&FINANCIAL_PATTERNS, &clean));
        candidates.extend(find_all(&TEMPORAL_PATTERNS, &clean));

        let mut ranked: Vec<KeyTerm> = Vec::new();
        for candidate in candidates {
            if ranked.iter().any(|t| t.term == candidate) {
                continue;
            }
            let score = self.score_term(&candidate, &lower, tags);
            ranked.push(KeyTerm {
                term: candidate,
                score,
            });
        }

        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        ranked
    }

    /// Currency amounts, percentages, financial keywords and payment windows.
    pub fn extract_financial_terms(&self, text: &str) -> Vec<String> {
        find_all(&FINANCIAL_PATTERNS, &clean_text(text))
    }

    /// Durations, immediacy adverbs and deadline phrasing.
    pub fn extract_temporal_terms(&self, text: &str) -> Vec<String> {
        find_all(&TEMPORAL_PATTERNS, &clean_text(text))
    }

    fn legal_terms(&self, clean: &str) -> Vec<String> {
        let lower = clean.to_lowercase();
        let mut terms: Vec<String> = self
            .vocabulary
            .phrases
            .iter()
            .filter(|p| lower.contains(&p.to_lowercase()))
            .cloned()
            .collect();

        for word in lower.split_whitespace() {
            let word = word.trim_matches(|c: char| !c.is_alphanumeric());
            if self.vocabulary.words.iter().any(|w| w == word) {
                terms.push(word.to_string());
            }
        }
        terms
    }

    fn score_term(&self, term: &str, lower_text: &str, tags: &[Tag]) -> f64 {
        let lower_term = term.to_lowercase();
        let mut score = 1.0;

        score += lower_text.matches(lower_term.as_str()).count() as f64 * 0.5;
        if term.chars().count() > 5 {
            score += 0.3;
        }
        if self.vocabulary.high_value.iter().any(|v| *v == lower_term) {
            score += 1.0;
        }
        for tag in tags {
            if tag_family(*tag).iter().any(|k| lower_term.contains(k)) {
                score += 0.5;
            }
        }
        score
    }
}

fn find_all(patterns: &[Regex], text: &str) -> Vec<String> {
    patterns
        .iter()
        .flat_map(|re| re.find_iter(text).map(|m| m.as_str().to_string()))
        .collect()
}

/// Collapse whitespace and normalise typographic quotes.
pub(crate) fn clean_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace(['\u{201c}', '\u{201d}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'")
}
