//! Document model for contract review.
//!
//! This crate holds the read-only inputs every later analysis layer consumes:
//!
//! - [`Clause`] - one numbered unit of contract text, immutable once built
//! - [`ContractDocument`] - ordered clauses plus [`DocumentMetadata`]
//! - [`Tag`] - the ten-code clause taxonomy (TEC, LEG, FIN, ...)
//! - [`ClauseParser`] - segments plain contract text into clauses
//!
//! ## Example
//!
//! ```
//! use layered_document::{ClauseParser, SourceDescriptor};
//!
//! let text = "SERVICE AGREEMENT\n\n1. Payment Terms\nClient shall pay all invoices.\n\n2. Notices\nNotices shall be sent via email.";
//! let doc = ClauseParser::new().parse(text, SourceDescriptor::Inline).unwrap();
//! assert_eq!(doc.title(), "SERVICE AGREEMENT");
//! assert_eq!(doc.total_clauses(), 2);
//! assert_eq!(doc.clauses()[1].title(), "Notices");
//! ```

mod clause;
mod document;
mod errors;
mod parser;
mod tag;

pub use clause::{estimate_tokens, Clause, SourceSpan};
pub use document::{ContractDocument, DocumentMetadata, SourceDescriptor};
pub use errors::{ParseError, UnknownTag};
pub use parser::ClauseParser;
pub use tag::Tag;

#[cfg(test)]
mod tests {
    mod parser;
}
