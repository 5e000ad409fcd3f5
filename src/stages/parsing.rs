use layered_document::{ClauseParser, ContractDocument, SourceDescriptor};
use tracing::info;

use crate::context::AnalysisContext;
use crate::error::StageError;
use crate::stage::{ProcessingStage, StageKind, StageStep};

/// What a review starts from.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewInput {
    /// Plain contract text, segmented by the parsing stage
    Text { text: String, source: SourceDescriptor },
    /// A document segmented elsewhere
    Document(ContractDocument),
}

impl ReviewInput {
    pub fn text(text: impl Into<String>) -> Self {
        ReviewInput::Text {
            text: text.into(),
            source: SourceDescriptor::Inline,
        }
    }

    pub fn with_source(text: impl Into<String>, source: SourceDescriptor) -> Self {
        ReviewInput::Text {
            text: text.into(),
            source,
        }
    }

    pub fn source(&self) -> SourceDescriptor {
        match self {
            ReviewInput::Text { source, .. } => source.clone(),
            ReviewInput::Document(document) => document.metadata().source.clone(),
        }
    }

    /// Reason the input cannot start a review, if any.
    pub(crate) fn rejection(&self) -> Option<&'static str> {
        match self {
            ReviewInput::Text { text, .. } if text.trim().is_empty() => Some("contract text is empty"),
            ReviewInput::Document(document) if document.is_empty() => {
                Some("contract document has no clauses")
            }
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct ParsingStage {
    parser: ClauseParser,
    input: Option<ReviewInput>,
}

impl ParsingStage {
    pub fn new(input: Option<ReviewInput>) -> Self {
        Self {
            parser: ClauseParser::new(),
            input,
        }
    }
}

impl ProcessingStage for ParsingStage {
    fn kind(&self) -> StageKind {
        StageKind::Parsing
    }

    fn validate(&self, _context: &AnalysisContext) -> Result<(), StageError> {
        match self.input {
            Some(_) => Ok(()),
            None => Err(StageError::MissingInput("no contract input".to_string())),
        }
    }

    fn step(&mut self, context: &mut AnalysisContext) -> Result<StageStep, StageError> {
        let input = self
            .input
            .take()
            .ok_or_else(|| StageError::MissingInput("no contract input".to_string()))?;
        let document = match input {
            ReviewInput::Text { text, source } => self.parser.parse(&text, source)?,
            ReviewInput::Document(document) => document,
        };
        info!(
            title = document.title(),
            clauses = document.total_clauses(),
            "contract parsed"
        );
        context.set_document(document)?;
        Ok(StageStep::Complete)
    }
}
