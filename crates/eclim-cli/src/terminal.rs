//! [`EditorUi`] for a terminal: results on stdout, status and prompts on stderr.

use eclim_client::SourceLocation;
use eclim_editor::{DocumentId, ERROR_STATUS_KEY, EditorUi};
use std::fmt;
use std::io::{self, BufRead, Write};
use tracing::warn;

pub(crate) struct TerminalUi<O, E> {
    out: O,
    err: E,
    errors: usize,
}

impl TerminalUi<io::Stdout, io::Stderr> {
    pub(crate) fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> TerminalUi<O, E> {
    pub(crate) fn new(out: O, err: E) -> Self {
        Self {
            out,
            err,
            errors: 0,
        }
    }

    /// Number of error messages shown so far.
    pub(crate) fn errors(&self) -> usize {
        self.errors
    }

    pub(crate) fn println(&mut self, args: fmt::Arguments<'_>) {
        emit(&mut self.out, args);
    }

    #[cfg(test)]
    fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }
}

fn emit(writer: &mut impl Write, args: fmt::Arguments<'_>) {
    if let Err(err) = writer.write_fmt(args).and_then(|_| writer.write_all(b"\n")) {
        warn!(error = %err, "terminal write failed");
    }
}

impl<O: Write, E: Write> EditorUi for TerminalUi<O, E> {
    fn set_status(&mut self, _document: DocumentId, key: &str, text: &str) {
        if key == ERROR_STATUS_KEY {
            self.errors += 1;
        }
        emit(&mut self.err, format_args!("{}", text));
    }

    fn erase_status(&mut self, _document: DocumentId, _key: &str) {}

    fn add_line_regions(&mut self, _document: DocumentId, _key: &str, lines: &[u32]) {
        if lines.is_empty() {
            return;
        }
        let lines = lines
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        emit(&mut self.err, format_args!("errors on lines {}", lines));
    }

    fn erase_regions(&mut self, _document: DocumentId, _key: &str) {}

    fn open_location(&mut self, location: &SourceLocation) {
        emit(&mut self.out, format_args!("{}", location.encoded_position()));
    }

    fn show_quick_panel(&mut self, _document: DocumentId, items: &[String]) {
        for (idx, item) in items.iter().enumerate() {
            emit(&mut self.err, format_args!("{:>3}  {}", idx, item));
        }
    }

    fn print_output(&mut self, text: &str) {
        if let Err(err) = self.out.write_all(text.as_bytes()) {
            warn!(error = %err, "terminal write failed");
        }
    }
}

/// Read a 0-based choice from `input`. An empty line cancels.
pub(crate) fn read_choice(input: &mut impl BufRead) -> io::Result<Option<usize>> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    line.parse()
        .map(Some)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, format!("not a number: {}", line)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eclim_editor::LINE_MESSAGES_STATUS_KEY;
    use std::path::PathBuf;

    #[test]
    fn test_streams_and_error_count() {
        let mut ui = TerminalUi::new(Vec::new(), Vec::new());
        let doc = DocumentId(1);

        ui.set_status(doc, LINE_MESSAGES_STATUS_KEY, "missing semicolon");
        ui.set_status(doc, ERROR_STATUS_KEY, "ECLIM ERROR: No suitable class found!");
        ui.open_location(&SourceLocation {
            file: PathBuf::from("/w/Item.java"),
            line: 3,
            column: 14,
        });
        ui.show_quick_panel(doc, &["a.List".to_string(), "b.List".to_string()]);
        assert_eq!(ui.errors(), 1);

        let (out, err) = ui.into_parts();
        assert_eq!(String::from_utf8(out).unwrap(), "/w/Item.java:3:14\n");
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "missing semicolon\nECLIM ERROR: No suitable class found!\n  0  a.List\n  1  b.List\n"
        );
    }

    #[test]
    fn test_read_choice() {
        assert_eq!(read_choice(&mut &b"2\n"[..]).unwrap(), Some(2));
        assert_eq!(read_choice(&mut &b"\n"[..]).unwrap(), None);
        assert_eq!(read_choice(&mut &b""[..]).unwrap(), None);
        assert!(read_choice(&mut &b"two\n"[..]).is_err());
    }
}
