//! Per-document compile error index.
//!
//! Each validation run replaces the entry of its document wholesale; entries are never
//! merged, so overlapping or repeated runs converge on the latest report.

use crate::document::DocumentId;
use eclim_client::{Problem, ProblemKind};
use std::collections::{BTreeMap, HashMap};

/// A single error message attached to a 1-based line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line.
    pub line: u32,
    /// Error message.
    pub message: String,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(line: u32, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Line-keyed messages of one document, in report order within each line.
pub type LineMessages = BTreeMap<u32, Vec<String>>;

/// Mapping from document to its line-keyed error messages.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticIndex {
    documents: HashMap<DocumentId, LineMessages>,
}

impl DiagnosticIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything known about `document` with `diagnostics`.
    pub fn replace(
        &mut self,
        document: DocumentId,
        diagnostics: impl IntoIterator<Item = Diagnostic>,
    ) {
        let mut lines = LineMessages::new();
        for diag in diagnostics {
            lines.entry(diag.line).or_default().push(diag.message);
        }
        self.documents.insert(document, lines);
    }

    /// Replace the entry of `document` with the errors among `problems` (warnings are ignored).
    pub fn replace_with_errors(&mut self, document: DocumentId, problems: &[Problem]) {
        self.replace(
            document,
            problems
                .iter()
                .filter(|p| p.kind == ProblemKind::Error)
                .map(|p| Diagnostic::new(p.line, p.message.clone())),
        );
    }

    /// Messages of `document` at 1-based `line`.
    pub fn messages(&self, document: DocumentId, line: u32) -> Option<&[String]> {
        self.documents
            .get(&document)?
            .get(&line)
            .map(Vec::as_slice)
    }

    /// Lines of `document` that carry at least one message, ascending.
    pub fn lines(&self, document: DocumentId) -> Vec<u32> {
        self.documents
            .get(&document)
            .map(|lines| lines.keys().copied().collect())
            .unwrap_or_default()
    }

    /// The full entry of `document`, if it was ever validated.
    pub fn document(&self, document: DocumentId) -> Option<&LineMessages> {
        self.documents.get(&document)
    }

    /// Forget `document` (e.g. when it is closed).
    pub fn remove(&mut self, document: DocumentId) -> Option<LineMessages> {
        self.documents.remove(&document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_keep_report_order_per_line() {
        let mut index = DiagnosticIndex::new();
        let doc = DocumentId(7);
        index.replace(
            doc,
            vec![
                Diagnostic::new(4, "second"),
                Diagnostic::new(2, "first"),
                Diagnostic::new(4, "third"),
            ],
        );

        assert_eq!(index.lines(doc), vec![2, 4]);
        assert_eq!(
            index.messages(doc, 4),
            Some(&["second".to_string(), "third".to_string()][..])
        );
        assert_eq!(index.messages(doc, 3), None);
        assert_eq!(index.messages(DocumentId(8), 4), None);
    }
}
