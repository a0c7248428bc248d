//! The Java tools façade.
//!
//! Every user-facing action follows the same sequence: check preconditions, sync the
//! source with eclim, run one command, decode the reply and render it through [`EditorUi`].
//! Nothing is retried. Failures either become a transient status message or an empty result.

use crate::diagnostics::DiagnosticIndex;
use crate::document::{Document, DocumentId, JAVA_SOURCE_SELECTOR, TextRange};
use crate::imports::import_edit;
use crate::schedule::{DeferredTask, ERROR_STATUS_TIMEOUT, TaskQueue};
use crate::settings::{Settings, SettingsError, expand_tool_path};
use crate::source::qualified_class_name;
use crate::ui::{
    ERROR_PREFIX, ERROR_REGIONS_KEY, ERROR_STATUS_KEY, EditorUi, LINE_MESSAGES_STATUS_KEY,
};
use eclim_client::{
    Completions, EclimClient, Invoker, ProcessInvoker, ProjectContext, SourceLocation,
};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Message shown when no eclim executable is configured.
pub const NOT_CONFIGURED_MESSAGE: &str =
    "Eclim executable path not set, call the set-tool-path command!";
/// Message shown when an import search finds nothing.
pub const NO_IMPORT_CANDIDATES_MESSAGE: &str = "No suitable class found!";
const UNSAVED_DOCUMENT_MESSAGE: &str = "Document has no file name, save it first!";

/// An import search that is waiting for the user to pick a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingImport {
    /// Document the import will be added to.
    pub document: DocumentId,
    /// Fully qualified class names offered in the quick panel, in eclim's order.
    pub candidates: Vec<String>,
}

/// Result of [`JavaTools::import_class_under_cursor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportFlow {
    /// Preconditions failed or eclim could not be queried; an error may have been shown.
    Aborted,
    /// The search returned nothing.
    NoCandidates,
    /// Exactly one candidate: its import was inserted.
    Imported(String),
    /// Several candidates: the quick panel is showing, finish with [`JavaTools::finish_import`].
    Prompted(PendingImport),
}

/// Owned state of the Java integration: the eclim client, per-document diagnostics and
/// deferred tasks.
pub struct JavaTools<I> {
    client: Option<EclimClient<I>>,
    diagnostics: DiagnosticIndex,
    tasks: TaskQueue,
}

impl<I: Invoker> JavaTools<I> {
    /// Create tools backed by `client`.
    pub fn new(client: EclimClient<I>) -> Self {
        Self {
            client: Some(client),
            diagnostics: DiagnosticIndex::new(),
            tasks: TaskQueue::new(),
        }
    }

    /// Create tools with no eclim executable configured. Every operation reports
    /// [`NOT_CONFIGURED_MESSAGE`] until a client is set.
    pub fn unconfigured() -> Self {
        Self {
            client: None,
            diagnostics: DiagnosticIndex::new(),
            tasks: TaskQueue::new(),
        }
    }

    /// Replace the eclim client.
    pub fn set_client(&mut self, client: EclimClient<I>) {
        self.client = Some(client);
    }

    /// The eclim client, if configured.
    pub fn client(&self) -> Option<&EclimClient<I>> {
        self.client.as_ref()
    }

    /// Returns `true` if an eclim client is configured.
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Per-document compile errors.
    pub fn diagnostics(&self) -> &DiagnosticIndex {
        &self.diagnostics
    }

    /// Pending deferred tasks.
    pub fn tasks(&self) -> &TaskQueue {
        &self.tasks
    }

    /// Show `message` as a transient error in the status bar of `document`.
    pub fn display_error(&mut self, document: DocumentId, ui: &mut dyn EditorUi, message: &str) {
        show_error(&mut self.tasks, ui, document, message);
    }

    fn prepare<D: Document + ?Sized>(
        &mut self,
        doc: &D,
        ui: &mut dyn EditorUi,
    ) -> Option<(&mut EclimClient<I>, ProjectContext)> {
        let Some(client) = self.client.as_mut() else {
            show_error(&mut self.tasks, ui, doc.id(), NOT_CONFIGURED_MESSAGE);
            return None;
        };
        let Some(path) = doc.file_name() else {
            show_error(&mut self.tasks, ui, doc.id(), UNSAVED_DOCUMENT_MESSAGE);
            return None;
        };
        match ProjectContext::resolve(path) {
            Ok(ctx) => Some((client, ctx)),
            Err(err) => {
                show_error(&mut self.tasks, ui, doc.id(), &err.to_string());
                None
            }
        }
    }

    /// Jump to the definition of the word under the first selection.
    ///
    /// Navigates only when eclim reports exactly one location in a Java file.
    pub fn goto_definition<D: Document + ?Sized>(
        &mut self,
        doc: &D,
        ui: &mut dyn EditorUi,
    ) -> Option<SourceLocation> {
        let selection = primary_selection(doc)?;
        let word = doc.word_at(selection.start);
        let token = doc.substr(word);
        let (client, ctx) = self.prepare(doc, ui)?;

        let locations = if word.is_empty() {
            Vec::new()
        } else {
            client
                .sync_source(&ctx)
                .and_then(|_| client.find_definition(&ctx, word.start, word.len()))
                .unwrap_or_else(|err| {
                    warn!(error = %err, token = %token, "definition search failed");
                    Vec::new()
                })
        };

        match locations.as_slice() {
            [location] if location.file.to_string_lossy().ends_with("java") => {
                ui.open_location(location);
                Some(location.clone())
            }
            _ => {
                debug!(count = locations.len(), token = %token, "no unique definition");
                let message = format!("Could not find definition of {}", token);
                self.display_error(doc.id(), ui, &message);
                None
            }
        }
    }

    /// Run the document's class as a Java program and print its output.
    pub fn run_class<D: Document + ?Sized>(
        &mut self,
        doc: &D,
        ui: &mut dyn EditorUi,
    ) -> Option<String> {
        let (client, ctx) = self.prepare(doc, ui)?;
        let class_name = qualified_class_name(doc.file_name()?, &doc.text())?;

        let result = client
            .sync_source(&ctx)
            .and_then(|_| client.run_class(&ctx, &class_name));
        match result {
            Ok(output) => {
                ui.print_output(&output);
                Some(output)
            }
            Err(err) => {
                warn!(error = %err, class = %class_name, "running class failed");
                None
            }
        }
    }

    /// Completion proposals at `locations[0]`.
    ///
    /// Saves the document first so eclim completes against the current text. Returns an
    /// empty result outside Java source or when eclim fails.
    pub fn query_completions<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        ui: &mut dyn EditorUi,
        locations: &[usize],
    ) -> Completions {
        let Some(&offset) = locations.first() else {
            return Completions::default();
        };
        if !doc.match_selector(offset, JAVA_SOURCE_SELECTOR) {
            return Completions::default();
        }
        let Some((client, ctx)) = self.prepare(&*doc, ui) else {
            return Completions::default();
        };
        if let Err(err) = doc.save() {
            warn!(error = %err, "saving before completion failed");
            return Completions::default();
        }

        client
            .sync_source(&ctx)
            .and_then(|_| client.complete(&ctx, offset))
            .unwrap_or_else(|err| {
                warn!(error = %err, offset, "completion failed");
                Completions::default()
            })
    }

    /// Validate the document and redraw its error regions.
    ///
    /// Returns `false` if eclim could not be queried; the diagnostics are then left as they were.
    pub fn validate<D: Document + ?Sized>(&mut self, doc: &D, ui: &mut dyn EditorUi) -> bool {
        let Some((client, ctx)) = self.prepare(doc, ui) else {
            return false;
        };
        let problems = match client.validate(&ctx) {
            Ok(problems) => problems,
            Err(err) => {
                warn!(error = %err, file = %ctx.file, "validation failed");
                return false;
            }
        };

        let id = doc.id();
        self.diagnostics.replace_with_errors(id, &problems);
        let lines = self.diagnostics.lines(id);
        ui.erase_regions(id, ERROR_REGIONS_KEY);
        ui.add_line_regions(id, ERROR_REGIONS_KEY, &lines);
        true
    }

    /// Show the error messages of the line holding the first selection's end.
    pub fn show_line_messages<D: Document + ?Sized>(&self, doc: &D, ui: &mut dyn EditorUi) {
        let Some(selection) = primary_selection(doc) else {
            return;
        };
        let line = u32::try_from(doc.line_of_offset(selection.end) + 1).unwrap_or(u32::MAX);
        match self.diagnostics.messages(doc.id(), line) {
            Some(messages) if !messages.is_empty() => {
                ui.set_status(doc.id(), LINE_MESSAGES_STATUS_KEY, &messages.join("; "));
            }
            _ => ui.erase_status(doc.id(), LINE_MESSAGES_STATUS_KEY),
        }
    }

    /// Search classes matching the word under the cursor and import one.
    pub fn import_class_under_cursor<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        ui: &mut dyn EditorUi,
    ) -> ImportFlow {
        let Some(selection) = primary_selection(&*doc) else {
            return ImportFlow::Aborted;
        };
        let identifier = doc.substr(doc.word_at(selection.start));
        let Some((client, ctx)) = self.prepare(&*doc, ui) else {
            return ImportFlow::Aborted;
        };
        if identifier.is_empty() {
            self.display_error(doc.id(), ui, NO_IMPORT_CANDIDATES_MESSAGE);
            return ImportFlow::NoCandidates;
        }
        if let Err(err) = doc.save() {
            warn!(error = %err, "saving before import search failed");
            return ImportFlow::Aborted;
        }

        let result = client
            .sync_source(&ctx)
            .and_then(|_| client.import_candidates(&ctx, &identifier));
        let mut candidates = match result {
            Ok(candidates) => candidates,
            Err(err) => {
                warn!(error = %err, identifier = %identifier, "import search failed");
                self.display_error(doc.id(), ui, &err.to_string());
                return ImportFlow::Aborted;
            }
        };

        match candidates.len() {
            0 => {
                self.display_error(doc.id(), ui, NO_IMPORT_CANDIDATES_MESSAGE);
                ImportFlow::NoCandidates
            }
            1 => {
                let class_name = candidates.remove(0);
                add_import(doc, &class_name);
                ImportFlow::Imported(class_name)
            }
            _ => {
                ui.show_quick_panel(doc.id(), &candidates);
                ImportFlow::Prompted(PendingImport {
                    document: doc.id(),
                    candidates,
                })
            }
        }
    }

    /// Complete a prompted import with the user's choice. `None` (or an index out of
    /// range) cancels without touching the document.
    pub fn finish_import<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        pending: PendingImport,
        choice: Option<usize>,
    ) -> Option<String> {
        if pending.document != doc.id() {
            warn!(expected = ?pending.document, got = ?doc.id(), "import finished on another document");
            return None;
        }
        let class_name = pending.candidates.into_iter().nth(choice?)?;
        add_import(doc, &class_name);
        Some(class_name)
    }

    /// Schedule `task` after `delay`.
    pub fn schedule(&mut self, delay: Duration, task: DeferredTask) {
        self.tasks.schedule_in(delay, task);
    }

    /// Run every deferred task due at `now` against its document in `documents`.
    ///
    /// Tasks for documents that are no longer open are dropped. Returns the number of tasks run.
    pub fn run_due<D: Document>(
        &mut self,
        now: Instant,
        documents: &mut [D],
        ui: &mut dyn EditorUi,
    ) -> usize {
        let mut ran = 0;
        for task in self.tasks.take_due(now) {
            let id = task.document();
            let Some(doc) = documents.iter_mut().find(|doc| doc.id() == id) else {
                debug!(document = ?id, "dropping task for closed document");
                continue;
            };
            match task {
                DeferredTask::EraseStatus { key, .. } => ui.erase_status(id, key),
                DeferredTask::Revalidate { .. } => {
                    self.validate(&*doc, ui);
                }
            }
            ran += 1;
        }
        ran
    }
}

impl JavaTools<ProcessInvoker> {
    /// Create tools from persisted settings.
    pub fn from_settings(settings: &Settings) -> Self {
        match settings.eclim_executable() {
            Some(path) => Self::new(EclimClient::new(ProcessInvoker::new(path))),
            None => Self::unconfigured(),
        }
    }

    /// Store a new eclim executable location and use it from now on.
    ///
    /// `input` may start with `~`; relative paths are made absolute.
    pub fn set_tool_path(
        &mut self,
        settings: &mut Settings,
        settings_path: &Path,
        input: &str,
    ) -> Result<PathBuf, SettingsError> {
        let path = expand_tool_path(input)?;
        settings.eclim_executable_location = Some(path.clone());
        settings.save(settings_path)?;
        debug!(path = %path.display(), "eclim executable set");
        self.set_client(EclimClient::new(ProcessInvoker::new(&path)));
        Ok(path)
    }
}

/// Insert an `import` of `class_name` into `doc`.
pub fn add_import<D: Document + ?Sized>(doc: &mut D, class_name: &str) {
    let edit = import_edit(&doc.text(), class_name);
    doc.insert(edit.offset, &edit.text);
}

fn primary_selection<D: Document + ?Sized>(doc: &D) -> Option<TextRange> {
    doc.selections().first().copied()
}

fn show_error(
    tasks: &mut TaskQueue,
    ui: &mut dyn EditorUi,
    document: DocumentId,
    message: &str,
) {
    ui.set_status(
        document,
        ERROR_STATUS_KEY,
        &format!("{}{}", ERROR_PREFIX, message),
    );
    tasks.schedule_in(
        ERROR_STATUS_TIMEOUT,
        DeferredTask::EraseStatus {
            document,
            key: ERROR_STATUS_KEY,
        },
    );
}
