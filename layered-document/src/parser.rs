//! Plain-text clause segmentation.
//!
//! Recognised clause headers, one per line:
//!
//! - `1. Payment Terms`
//! - `Section 4: Termination` / `Section 4 Termination`
//! - `Article 2: Confidentiality`
//! - `a. Service Levels`
//! - `(b) Reporting`
//!
//! Lines after a header up to the next header form the clause body. Text
//! before the first header is treated as preamble (title and parties).

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::{Clause, ContractDocument, DocumentMetadata, ParseError, SourceDescriptor, SourceSpan};

static HEADER_PATTERNS: Lazy<Vec<(HeaderStyle, Regex)>> = Lazy::new(|| {
    vec![
        (HeaderStyle::Numbered, r"^(\d+)\.\s+(.+)$"),
        (HeaderStyle::Section, r"^(?i:section)\s+(\d+(?:\.\d+)*):?\s*(.*)$"),
        (HeaderStyle::Article, r"^(?i:article)\s+(\d+|[IVXLC]+):?\s*(.*)$"),
        (HeaderStyle::Lettered, r"^([a-zA-Z])\.\s+(.+)$"),
        (HeaderStyle::Parenthesized, r"^\(([a-zA-Z0-9]+)\)\s+(.*)$"),
    ]
    .into_iter()
    .map(|(style, pattern)| (style, Regex::new(pattern).expect("Invalid clause header regex")))
    .collect()
});

static BETWEEN_PARTIES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bbetween\s+(.+?)\s+and\s+(.+?)(?:\.|,|\n|$)")
        .expect("Invalid party regex")
});

static LABELLED_PARTY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^\s*party\s+[ab]\s*:\s*(.+?)\s*$").expect("Invalid labelled party regex")
});

const TITLE_MARKERS: [&str; 3] = ["AGREEMENT", "CONTRACT", "SERVICE"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderStyle {
    Numbered,
    Section,
    Article,
    Lettered,
    Parenthesized,
}

struct Header {
    label: String,
    title: String,
}

impl HeaderStyle {
    fn label(&self, marker: &str) -> String {
        match self {
            HeaderStyle::Numbered | HeaderStyle::Lettered => marker.to_string(),
            HeaderStyle::Section => format!("Section {}", marker),
            HeaderStyle::Article => format!("Article {}", marker),
            HeaderStyle::Parenthesized => format!("({})", marker),
        }
    }
}

struct PendingClause {
    header: Header,
    start_line: usize,
    end_line: usize,
    body: Vec<String>,
}

/// Splits plain contract text into a [`ContractDocument`].
#[derive(Debug, Clone, Default)]
pub struct ClauseParser {
    _private: (),
}

impl ClauseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text` into clauses numbered 1..n in document order.
    ///
    /// Headers with no body are dropped. Fails with [`ParseError::EmptyInput`]
    /// on blank text and [`ParseError::NoClauses`] when nothing was segmented.
    pub fn parse(&self, text: &str, source: SourceDescriptor) -> Result<ContractDocument, ParseError> {
        if text.trim().is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let lines: Vec<&str> = text.lines().collect();
        let mut clauses = Vec::new();
        let mut current: Option<PendingClause> = None;

        for (idx, raw) in lines.iter().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(header) = match_header(line) {
                if let Some(done) = current.take() {
                    push_clause(&mut clauses, done);
                }
                current = Some(PendingClause {
                    header,
                    start_line: line_no,
                    end_line: line_no,
                    body: Vec::new(),
                });
            } else if let Some(pending) = current.as_mut() {
                pending.body.push(line.to_string());
                pending.end_line = line_no;
            }
        }
        if let Some(done) = current.take() {
            push_clause(&mut clauses, done);
        }

        if clauses.is_empty() {
            return Err(ParseError::NoClauses { lines: lines.len() });
        }

        let title = detect_title(&lines, &source);
        let metadata = DocumentMetadata {
            parties: detect_parties(text),
            source,
            ..DocumentMetadata::default()
        };
        debug!(clauses = clauses.len(), title = %title, "segmented contract text");

        Ok(ContractDocument::new(title, clauses).with_metadata(metadata))
    }
}

fn match_header(line: &str) -> Option<Header> {
    HEADER_PATTERNS.iter().find_map(|(style, re)| {
        let caps = re.captures(line)?;
        let marker = caps.get(1)?.as_str();
        let label = style.label(marker);
        let title = caps
            .get(2)
            .map(|m| m.as_str().trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| label.clone());
        Some(Header { label, title })
    })
}

fn push_clause(clauses: &mut Vec<Clause>, pending: PendingClause) {
    let content = pending.body.join(" ");
    if content.trim().is_empty() {
        return;
    }
    let number = clauses.len() + 1;
    clauses.push(
        Clause::new(number, pending.header.title, content)
            .with_section(pending.header.label)
            .with_position(SourceSpan::new(pending.start_line, pending.end_line)),
    );
}

fn detect_title(lines: &[&str], source: &SourceDescriptor) -> String {
    lines
        .iter()
        .take(10)
        .map(|l| l.trim())
        .find(|l| {
            let len = l.chars().count();
            len > 10 && len < 200 && {
                let upper = l.to_uppercase();
                TITLE_MARKERS.iter().any(|m| upper.contains(m))
            }
        })
        .map(str::to_string)
        .or_else(|| source.name().map(str::to_string))
        .unwrap_or_else(|| "Untitled Contract".to_string())
}

fn detect_parties(text: &str) -> Vec<String> {
    let mut parties: Vec<String> = Vec::new();
    let mut push = |name: &str| {
        let name = name.trim().trim_matches('"').trim();
        if !name.is_empty() && !parties.iter().any(|p| p == name) {
            parties.push(name.to_string());
        }
    };

    if let Some(caps) = BETWEEN_PARTIES.captures(text) {
        for idx in 1..=2 {
            if let Some(m) = caps.get(idx) {
                push(m.as_str());
            }
        }
    }
    for caps in LABELLED_PARTY.captures_iter(text) {
        if let Some(m) = caps.get(1) {
            push(m.as_str());
        }
    }

    parties
}
