//! Declarative tag classification table.
//!
//! Each tag owns plain keywords (hit = 1) and regex patterns (hit = 2),
//! matched against `"<title> <content>"` in lowercase. A tag is assigned
//! when its score reaches [`TAG_THRESHOLD`]. When nothing qualifies a single
//! fallback tag is chosen from coarse keywords, so classification never
//! returns an empty set.

use layered_document::{Clause, Tag};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum cumulative score for a tag to be assigned.
pub const TAG_THRESHOLD: u32 = 1;

const KEYWORD_HIT: u32 = 1;
const PATTERN_HIT: u32 = 2;

/// Errors building a [`TagTable`].
#[derive(Debug, Error)]
pub enum TableError {
    #[error("tag table syntax error: {0}")]
    Syntax(String),

    #[error("invalid pattern {pattern:?} for tag {tag}: {message}")]
    Pattern {
        tag: Tag,
        pattern: String,
        message: String,
    },
}

/// Keywords and patterns for one tag, as written in a table file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagRule {
    pub tag: Tag,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl TagRule {
    fn new(tag: Tag, keywords: &[&str], patterns: &[&str]) -> Self {
        Self {
            tag,
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            patterns: patterns.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TagTableFile {
    rules: Vec<TagRule>,
}

#[derive(Debug, Clone)]
struct CompiledRule {
    tag: Tag,
    keywords: Vec<String>,
    patterns: Vec<Regex>,
}

/// Compiled tag table.
#[derive(Debug, Clone)]
pub struct TagTable {
    rules: Vec<CompiledRule>,
}

impl TagTable {
    pub fn new(rules: Vec<TagRule>) -> Result<Self, TableError> {
        let rules = rules
            .into_iter()
            .map(|rule| {
                let patterns = rule
                    .patterns
                    .iter()
                    .map(|p| {
                        Regex::new(&format!("(?i){}", p)).map_err(|e| TableError::Pattern {
                            tag: rule.tag,
                            pattern: p.clone(),
                            message: e.to_string(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(CompiledRule {
                    tag: rule.tag,
                    keywords: rule.keywords.iter().map(|k| k.to_lowercase()).collect(),
                    patterns,
                })
            })
            .collect::<Result<Vec<_>, TableError>>()?;
        Ok(Self { rules })
    }

    /// Load a table written in RON:
    ///
    /// ```ron
    /// (rules: [(tag: FIN, keywords: ["payment"], patterns: [r"\bnet \d+\b"])])
    /// ```
    pub fn from_ron_str(source: &str) -> Result<Self, TableError> {
        let file: TagTableFile =
            ron::from_str(source).map_err(|e| TableError::Syntax(e.to_string()))?;
        Self::new(file.rules)
    }

    /// Score of every tag with at least one hit, in table order.
    pub fn scores(&self, text: &str) -> Vec<(Tag, u32)> {
        let lower = text.to_lowercase();
        self.rules
            .iter()
            .filter_map(|rule| {
                let keyword_score: u32 = rule
                    .keywords
                    .iter()
                    .filter(|k| lower.contains(k.as_str()))
                    .map(|_| KEYWORD_HIT)
                    .sum();
                let pattern_score: u32 = rule
                    .patterns
                    .iter()
                    .filter(|re| re.is_match(&lower))
                    .map(|_| PATTERN_HIT)
                    .sum();
                let score = keyword_score + pattern_score;
                (score > 0).then(|| (rule.tag, score))
            })
            .collect()
    }

    /// Tags for a clause; never empty.
    pub fn classify(&self, clause: &Clause) -> Vec<Tag> {
        let combined = format!("{} {}", clause.title(), clause.content()).to_lowercase();
        let mut tags: Vec<Tag> = Vec::new();
        for (tag, score) in self.scores(&combined) {
            if score >= TAG_THRESHOLD && !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        if tags.is_empty() {
            tags.push(fallback_tag(&combined));
        }
        tags
    }
}

fn fallback_tag(lower: &str) -> Tag {
    let has_any = |words: &[&str]| words.iter().any(|w| lower.contains(w));
    if has_any(&["payment", "fee", "cost"]) {
        Tag::Fin
    } else if has_any(&["termination", "breach"]) {
        Tag::Trm
    } else if has_any(&["legal", "jurisdiction", "law"]) {
        Tag::Leg
    } else {
        Tag::Doc
    }
}

impl Default for TagTable {
    fn default() -> Self {
        let rules = vec![
            TagRule::new(
                Tag::Tec,
                &["deliverable", "milestone", "service level", "uptime", "performance"],
                &[r"\bsla\b"],
            ),
            TagRule::new(
                Tag::Leg,
                &["jurisdiction", "governing law", "indemnif", "liability", "breach", "warranty"],
                &[],
            ),
            TagRule::new(
                Tag::Fin,
                &[
                    "payment",
                    "invoice",
                    "fee",
                    "cost",
                    "penalty",
                    "refund",
                    "currency",
                    // Beyond the base FIN vocabulary: damages and compensation
                    // language puts liability clauses under FIN as well.
                    "damages",
                    "compensation",
                ],
                &[],
            ),
            TagRule::new(
                Tag::Com,
                &["compliance", "regulation", "license", "gdpr", "privacy"],
                &[r"\baml\b"],
            ),
            TagRule::new(
                Tag::Ipx,
                &["intellectual property", "copyright", "license", "ownership", "exclusive"],
                &[],
            ),
            TagRule::new(
                Tag::Trm,
                &["termination", "breach", "default", "cure period", "notice"],
                &[],
            ),
            TagRule::new(
                Tag::Dis,
                &["dispute", "arbitration", "mediation", "jurisdiction", "venue"],
                &[],
            ),
            TagRule::new(
                Tag::Doc,
                &["document", "annex", "amendment", "modification", "version"],
                &[],
            ),
            TagRule::new(
                Tag::Exe,
                &["signature", "execution", "authority", "effective date"],
                &[],
            ),
            TagRule::new(
                Tag::Ext,
                &["external", "third party", "vendor", "dependency"],
                &[],
            ),
        ];
        Self::new(rules).expect("Invalid built-in tag table")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(title: &str, content: &str) -> Vec<Tag> {
        TagTable::default().classify(&Clause::new(1, title, content))
    }

    #[test]
    fn keywords_and_patterns_assign_tags() {
        assert_eq!(
            classify("Service Levels", "The SLA guarantees 99.9% uptime."),
            vec![Tag::Tec]
        );
        assert_eq!(
            classify("Payment Terms", "Late payments incur a penalty."),
            vec![Tag::Fin]
        );
    }

    #[test]
    fn damages_language_is_financial() {
        assert_eq!(classify("Remedies", "Compensation is owed for proven losses."), vec![Tag::Fin]);
        assert_eq!(classify("Remedies", "The Supplier pays damages."), vec![Tag::Fin]);
    }

    #[test]
    fn sla_pattern_needs_word_boundary() {
        // "translation" contains "sla"
        assert_eq!(classify("Translation", "Texts are translated."), vec![Tag::Doc]);
    }

    #[test]
    fn fallback_covers_unmatched_clauses() {
        assert_eq!(classify("Governing Rules", "This is governed by the law of Ohio."), vec![Tag::Leg]);
        assert_eq!(classify("Miscellaneous", "Headings are for convenience."), vec![Tag::Doc]);
    }

    #[test]
    fn table_loads_from_ron() {
        let table = TagTable::from_ron_str(
            r#"(rules: [(tag: FIN, keywords: ["net 30"]), (tag: EXT, patterns: [r"\bsubcontract\w*"])])"#,
        )
        .unwrap();
        let tags = table.classify(&Clause::new(1, "Terms", "Net 30 terms apply to subcontractors."));
        assert_eq!(tags, vec![Tag::Fin, Tag::Ext]);
        assert_eq!(table.scores("net 30 and subcontracting"), vec![(Tag::Fin, 1), (Tag::Ext, 2)]);
    }

    #[test]
    fn bad_patterns_are_reported() {
        let err = TagTable::from_ron_str(r#"(rules: [(tag: TEC, patterns: ["(unclosed"])])"#).unwrap_err();
        assert!(matches!(err, TableError::Pattern { tag: Tag::Tec, .. }));
        assert!(matches!(
            TagTable::from_ron_str("not ron at all").unwrap_err(),
            TableError::Syntax(_)
        ));
    }
}
