//! Editor lifecycle events.
//!
//! Hosts translate their callbacks into [`EditorEvent`]s and hand them to
//! [`JavaTools::dispatch`]. Documents without the Java syntax are ignored.

use crate::document::Document;
use crate::schedule::{DeferredTask, REVALIDATE_DELAY};
use crate::tools::JavaTools;
use crate::ui::EditorUi;
use eclim_client::{Completions, Invoker};

/// A lifecycle event of an open document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// The document was loaded from disk.
    Loaded,
    /// The document was written to disk.
    PostSave,
    /// The selection changed.
    SelectionModified,
    /// The editor asks for completions at the given caret offsets.
    QueryCompletions {
        /// Character offsets of the carets; only the first one is used.
        locations: Vec<usize>,
    },
}

/// What [`JavaTools::dispatch`] did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// The document is not Java source.
    Ignored,
    /// The document was validated.
    Validated,
    /// Validation was attempted but eclim could not be queried.
    ValidationFailed,
    /// The line messages of the cursor line were refreshed.
    LineMessages,
    /// Completion proposals.
    Completions(Completions),
}

impl<I: Invoker> JavaTools<I> {
    /// Handle `event` for `doc`.
    pub fn dispatch<D: Document + ?Sized>(
        &mut self,
        event: EditorEvent,
        doc: &mut D,
        ui: &mut dyn EditorUi,
    ) -> EventOutcome {
        if !doc.is_java() {
            return EventOutcome::Ignored;
        }

        match event {
            EditorEvent::Loaded => validated(self.validate(&*doc, ui)),
            EditorEvent::PostSave => {
                let ok = self.validate(&*doc, ui);
                // Eclipse may still be building right after the save; check again later.
                self.schedule(
                    REVALIDATE_DELAY,
                    DeferredTask::Revalidate { document: doc.id() },
                );
                validated(ok)
            }
            EditorEvent::SelectionModified => {
                self.show_line_messages(&*doc, ui);
                EventOutcome::LineMessages
            }
            EditorEvent::QueryCompletions { locations } => {
                EventOutcome::Completions(self.query_completions(doc, ui, &locations))
            }
        }
    }
}

fn validated(ok: bool) -> EventOutcome {
    if ok {
        EventOutcome::Validated
    } else {
        EventOutcome::ValidationFailed
    }
}
