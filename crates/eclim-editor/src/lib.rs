#![warn(missing_docs)]
//! `eclim-editor` - editor-side Java tooling on top of [`eclim_client`].
//!
//! The crate is host-agnostic: an editor implements [`Document`] for its buffers and
//! [`EditorUi`] for its status bar, regions, quick panel and console, then forwards its
//! lifecycle callbacks to [`JavaTools::dispatch`] and calls [`JavaTools::run_due`] from its
//! event loop.
//!
//! # Overview
//!
//! - [`JavaTools`]: go to definition, run class, completion, validation and auto-import.
//! - [`DiagnosticIndex`]: compile errors per document, replaced on every validation.
//! - [`TaskQueue`]: one-shot deferred work (status erasure, re-validation after save).
//! - [`Settings`]: the persisted eclim executable location.

pub mod diagnostics;
pub mod document;
pub mod events;
pub mod imports;
pub mod schedule;
pub mod settings;
pub mod source;
pub mod tools;
pub mod ui;

pub use diagnostics::{Diagnostic, DiagnosticIndex, LineMessages};
pub use document::{
    Buffer, Document, DocumentId, JAVA_SOURCE_SELECTOR, JAVA_SYNTAX, TextRange,
};
pub use events::{EditorEvent, EventOutcome};
pub use imports::{ImportEdit, import_edit, insert_import};
pub use schedule::{DeferredTask, ERROR_STATUS_TIMEOUT, REVALIDATE_DELAY, TaskQueue};
pub use settings::{Settings, SettingsError, expand_tool_path};
pub use source::{find_package_name, qualified_class_name};
pub use tools::{
    ImportFlow, JavaTools, NO_IMPORT_CANDIDATES_MESSAGE, NOT_CONFIGURED_MESSAGE, PendingImport,
    add_import,
};
pub use ui::{
    ERROR_PREFIX, ERROR_REGIONS_KEY, ERROR_STATUS_KEY, EditorUi, LINE_MESSAGES_STATUS_KEY,
};
