use serde::{Deserialize, Serialize};

/// Line range a clause occupied in its source text (1-based, inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSpan {
    pub start_line: usize,
    pub end_line: usize,
}

impl SourceSpan {
    pub fn new(start_line: usize, end_line: usize) -> Self {
        Self {
            start_line,
            end_line: end_line.max(start_line),
        }
    }

    /// Number of source lines covered.
    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }
}

/// One numbered unit of contract text.
///
/// Title and content are trimmed at construction. There are no setters:
/// a clause is built once (by [`crate::ClauseParser`] or a caller) and then
/// only read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    number: usize,
    title: String,
    content: String,
    section: Option<String>,
    position: Option<SourceSpan>,
}

impl Clause {
    pub fn new(number: usize, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into().trim().to_string(),
            content: content.into().trim().to_string(),
            section: None,
            position: None,
        }
    }

    /// Attach the section label the clause was found under.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Attach the source line span.
    pub fn with_position(mut self, position: SourceSpan) -> Self {
        self.position = Some(position);
        self
    }

    /// Sequence number within the document (1-based).
    pub fn number(&self) -> usize {
        self.number
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    pub fn position(&self) -> Option<SourceSpan> {
        self.position
    }

    /// Rough token estimate of the clause body, see [`estimate_tokens`].
    pub fn token_estimate(&self) -> usize {
        estimate_tokens(&self.content)
    }
}

/// Token estimate used for checkpoint cadence: `word_count + char_count / 4`.
pub fn estimate_tokens(text: &str) -> usize {
    text.split_whitespace().count() + text.chars().count() / 4
}
