use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Clause;

/// Where the contract text came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceDescriptor {
    /// Text handed over directly by the caller
    Inline,
    /// Text extracted from a file by an ingestion collaborator
    File { path: String },
    /// Text from some other named source (upload id, URL, ...)
    Named { name: String },
}

impl SourceDescriptor {
    pub fn file(path: impl Into<String>) -> Self {
        SourceDescriptor::File { path: path.into() }
    }

    /// Short display name: the file stem for files, the name for named sources.
    pub fn name(&self) -> Option<&str> {
        match self {
            SourceDescriptor::Inline => None,
            SourceDescriptor::File { path } => Path::new(path).file_stem().and_then(|s| s.to_str()),
            SourceDescriptor::Named { name } => Some(name.as_str()),
        }
    }
}

impl Default for SourceDescriptor {
    fn default() -> Self {
        SourceDescriptor::Inline
    }
}

/// Document-level facts gathered alongside the clauses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Detected contracting parties, in order of appearance
    pub parties: Vec<String>,
    /// Origin of the text
    pub source: SourceDescriptor,
    /// Free-form attributes supplied by ingestion (page count, format, ...)
    pub attributes: BTreeMap<String, String>,
}

/// An ordered sequence of clauses plus metadata.
///
/// Read-only once constructed; the review pipeline only ever borrows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractDocument {
    title: String,
    clauses: Vec<Clause>,
    metadata: DocumentMetadata,
}

impl ContractDocument {
    pub fn new(title: impl Into<String>, clauses: Vec<Clause>) -> Self {
        Self {
            title: title.into(),
            clauses,
            metadata: DocumentMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: DocumentMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Clauses in document order.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    /// Look up a clause by its sequence number.
    pub fn clause(&self, number: usize) -> Option<&Clause> {
        self.clauses.iter().find(|c| c.number() == number)
    }

    pub fn total_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Sum of clause content lengths in characters.
    pub fn total_content_length(&self) -> usize {
        self.clauses.iter().map(|c| c.content().chars().count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_names() {
        assert_eq!(SourceDescriptor::Inline.name(), None);
        assert_eq!(
            SourceDescriptor::file("/tmp/contracts/msa-2024.txt").name(),
            Some("msa-2024")
        );
        assert_eq!(
            SourceDescriptor::Named {
                name: "upload-7".to_string()
            }
            .name(),
            Some("upload-7")
        );
    }

    #[test]
    fn clause_lookup_by_number() {
        let doc = ContractDocument::new(
            "Test",
            vec![Clause::new(1, "A", "alpha"), Clause::new(2, "B", "beta")],
        );
        assert_eq!(doc.clause(2).map(|c| c.title()), Some("B"));
        assert!(doc.clause(3).is_none());
        assert_eq!(doc.total_content_length(), 9);
    }
}
