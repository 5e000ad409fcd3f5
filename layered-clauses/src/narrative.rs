//! Interpretation, exposure and opportunity text plus the business-risk
//! paragraph and investigatory question.

use std::collections::BTreeSet;

use layered_document::Tag;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::rating::RiskRating;

/// Maximum mechanism phrases quoted in an interpretation.
pub const MECHANISM_LIMIT: usize = 3;

pub const NO_VULNERABILITIES: &str = "No significant vulnerabilities identified in this clause.";
pub const GENERIC_OPPORTUNITY: &str = "Standard commercial review recommended";
pub const GENERIC_QUESTION: &str =
    "Does this clause adequately protect our interests while maintaining commercial viability?";

static MECHANISM_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\bby means of ([^,.]+)",
        r"(?i)\bthrough ([^,.]+)",
        r"(?i)\bvia ([^,.]+)",
        r"(?i)\busing ([^,.]+)",
        r"(?i)\bpursuant to ([^,.]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid mechanism regex"))
    .collect()
});

fn interpretation_phrase(tag: Tag) -> &'static str {
    match tag {
        Tag::Tec => "establishes technical requirements and deliverable specifications",
        Tag::Leg => "defines legal obligations and protective mechanisms",
        Tag::Fin => "governs financial terms and payment obligations",
        Tag::Com => "sets compliance and regulatory duties",
        Tag::Ipx => "controls intellectual property rights and ownership",
        Tag::Trm => "sets termination, default and notice conditions",
        Tag::Dis => "channels disputes to a resolution forum",
        Tag::Doc => "provides contractual terms and conditions",
        Tag::Exe => "governs execution and signing authority",
        Tag::Ext => "allocates responsibility for external parties",
    }
}

fn exposure_concern(tag: Tag) -> Option<&'static str> {
    match tag {
        Tag::Fin => Some("financial liability and payment disputes"),
        Tag::Leg => Some("legal liability and enforcement challenges"),
        Tag::Tec => Some("scope creep and delivery failures"),
        Tag::Ipx => Some("intellectual property loss or disputes"),
        Tag::Trm => Some("unfavorable termination conditions"),
        Tag::Com => Some("compliance violations and regulatory risks"),
        _ => None,
    }
}

/// Method phrases following "by means of", "through", "via", "using" and
/// "pursuant to", grouped by pattern.
pub fn mechanisms(content: &str) -> Vec<String> {
    MECHANISM_PATTERNS
        .iter()
        .flat_map(|re| re.captures_iter(content))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|m| !m.is_empty())
        .take(MECHANISM_LIMIT)
        .collect()
}

pub fn interpretation(tags: &[Tag], content: &str, function_sentence: &str) -> String {
    let mut phrases: Vec<&str> = Vec::new();
    for tag in tags {
        let phrase = interpretation_phrase(*tag);
        if !phrases.contains(&phrase) {
            phrases.push(phrase);
        }
    }
    if phrases.is_empty() {
        phrases.push(interpretation_phrase(Tag::Doc));
    }

    let mechanisms = mechanisms(content);
    let through = if mechanisms.is_empty() {
        String::new()
    } else {
        format!(" through {}", mechanisms.join(", "))
    };

    format!("This clause {}{}. {}", phrases.join(", "), through, function_sentence)
}

pub fn exposure(vulnerabilities: &BTreeSet<String>, tags: &[Tag]) -> String {
    if vulnerabilities.is_empty() {
        return NO_VULNERABILITIES.to_string();
    }
    let listed: Vec<&str> = vulnerabilities.iter().map(String::as_str).collect();
    let concerns: Vec<&str> = tags.iter().filter_map(|t| exposure_concern(*t)).collect();

    let mut text = format!("Potential vulnerabilities include: {}", listed.join("; "));
    if concerns.is_empty() {
        text.push('.');
    } else {
        text.push_str(&format!(". Category-specific concerns: {}.", concerns.join("; ")));
    }
    text
}

pub fn opportunity(content: &str, tags: &[Tag]) -> String {
    let lower = content.to_lowercase();
    let has = |tag: Tag| tags.contains(&tag);

    let mut found = Vec::new();
    if has(Tag::Fin) && lower.contains("penalty") && !lower.contains("cap") {
        found.push("Consider negotiating penalty caps");
    }
    if has(Tag::Leg) && lower.contains("liability") && !lower.contains("limit") {
        found.push("Negotiate liability limitations");
    }
    if has(Tag::Tec) && lower.contains("deliverable") && !lower.contains("acceptance") {
        found.push("Define clear acceptance criteria");
    }

    if found.is_empty() {
        GENERIC_OPPORTUNITY.to_string()
    } else {
        found.join("; ")
    }
}

pub fn business_risk(rating: &RiskRating, factors: &[String]) -> String {
    let level = rating.level().label();
    if factors.is_empty() {
        return format!("{} risk level. No specific risk factors identified.", level);
    }
    format!(
        "{} risk level. Key concerns: {}. Business impact: {}.",
        level,
        factors.join("; "),
        rating.business_impact()
    )
}

const QUESTION_PRECEDENCE: [(Tag, &str); 6] = [
    (
        Tag::Fin,
        "Are the payment terms clearly defined with adequate protection against non-payment?",
    ),
    (
        Tag::Leg,
        "Do the legal protections adequately safeguard our interests and limit liability exposure?",
    ),
    (
        Tag::Tec,
        "Are the technical requirements and deliverables specific enough to prevent scope disputes?",
    ),
    (
        Tag::Ipx,
        "Do we retain appropriate intellectual property rights and protections?",
    ),
    (
        Tag::Trm,
        "Are the termination conditions balanced and do they provide adequate exit protection?",
    ),
    (
        Tag::Com,
        "Do the compliance requirements align with applicable regulations and industry standards?",
    ),
];

/// Question for the first tag in precedence order, regardless of the order
/// of `tags`.
pub fn investigatory_question(tags: &[Tag]) -> &'static str {
    QUESTION_PRECEDENCE
        .iter()
        .find(|(tag, _)| tags.contains(tag))
        .map(|(_, question)| *question)
        .unwrap_or(GENERIC_QUESTION)
}
