//! Editor UI sink.
//!
//! Everything user-visible produced by the Java tools goes through [`EditorUi`]: status bar
//! entries, line regions, the quick panel, file navigation and console output.

use crate::document::DocumentId;
use eclim_client::SourceLocation;

/// Status key for `"; "`-joined diagnostics of the cursor line.
pub const LINE_MESSAGES_STATUS_KEY: &str = "eclim";
/// Status key for transient error messages.
pub const ERROR_STATUS_KEY: &str = "eclim_error";
/// Region key for lines with compile errors.
pub const ERROR_REGIONS_KEY: &str = "eclim-errors";
/// Prefix of transient error messages.
pub const ERROR_PREFIX: &str = "ECLIM ERROR: ";

/// Host editor rendering operations.
pub trait EditorUi {
    /// Set the status bar entry `key` of `document`.
    fn set_status(&mut self, document: DocumentId, key: &str, text: &str);

    /// Remove the status bar entry `key` of `document`.
    fn erase_status(&mut self, document: DocumentId, key: &str);

    /// Highlight whole lines (1-based) of `document` under region key `key`.
    fn add_line_regions(&mut self, document: DocumentId, key: &str, lines: &[u32]);

    /// Remove all regions stored under `key`.
    fn erase_regions(&mut self, document: DocumentId, key: &str);

    /// Open `location` and move the caret there.
    fn open_location(&mut self, location: &SourceLocation);

    /// Show a single-choice list. The answer is fed back through
    /// [`JavaTools::finish_import`](crate::JavaTools::finish_import).
    fn show_quick_panel(&mut self, document: DocumentId, items: &[String]);

    /// Append program output to the console.
    fn print_output(&mut self, text: &str);
}
