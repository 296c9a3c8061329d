//! Domain types shared across the retrieval pipeline and the API boundary.

use serde::{Deserialize, Serialize};

use crate::error::{QuillError, Result};

/// A validated retrieval request: the query text plus how many snippets
/// to retrieve as grounding context.
///
/// Construction enforces the boundary invariants (non-empty text,
/// top_k >= 1), so a `RetrievalQuery` in hand is always safe to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalQuery {
    text: String,
    top_k: usize,
}

/// Default number of snippets retrieved when the caller does not specify.
pub const DEFAULT_TOP_K: usize = 3;

impl RetrievalQuery {
    /// Validate and build a query.
    ///
    /// Fails with `QuillError::InvalidQuery` if `text` is empty (or only
    /// whitespace) or `top_k` is zero.
    pub fn new(text: impl Into<String>, top_k: usize) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuillError::InvalidQuery(
                "query text must not be empty".to_string(),
            ));
        }
        if top_k == 0 {
            return Err(QuillError::InvalidQuery(
                "top_k must be at least 1".to_string(),
            ));
        }
        Ok(Self { text, top_k })
    }

    /// Build a query with the default top_k of 3.
    pub fn with_default_top_k(text: impl Into<String>) -> Result<Self> {
        Self::new(text, DEFAULT_TOP_K)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }
}

/// The output of one pipeline invocation: the generated answer plus the
/// snippet contents that were fed to the generation backend, in ranked
/// order. Index `i` of `context_used` is the i-th ranked snippet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    /// Text produced by the generation backend.
    pub answer: String,
    /// Snippet contents used as grounding context, highest-ranked first.
    pub context_used: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_valid() {
        let q = RetrievalQuery::new("How long for a refund?", 5).unwrap();
        assert_eq!(q.text(), "How long for a refund?");
        assert_eq!(q.top_k(), 5);
    }

    #[test]
    fn test_query_default_top_k() {
        let q = RetrievalQuery::with_default_top_k("hello").unwrap();
        assert_eq!(q.top_k(), DEFAULT_TOP_K);
    }

    #[test]
    fn test_query_rejects_empty_text() {
        let err = RetrievalQuery::new("", 3).unwrap_err();
        assert!(matches!(err, QuillError::InvalidQuery(_)));
    }

    #[test]
    fn test_query_rejects_whitespace_text() {
        let err = RetrievalQuery::new("   \n\t", 3).unwrap_err();
        assert!(matches!(err, QuillError::InvalidQuery(_)));
    }

    #[test]
    fn test_query_rejects_zero_top_k() {
        let err = RetrievalQuery::new("valid text", 0).unwrap_err();
        assert!(matches!(err, QuillError::InvalidQuery(_)));
        assert!(err.to_string().contains("top_k"));
    }

    #[test]
    fn test_pipeline_result_serialization() {
        let result = PipelineResult {
            answer: "30 days.".to_string(),
            context_used: vec!["Refund policy: 30 days".to_string()],
        };
        let json = serde_json::to_string(&result).unwrap();
        let back: PipelineResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }
}
