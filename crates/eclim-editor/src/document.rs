//! The editor-side view of an open document.
//!
//! The façade only needs a handful of queries and two mutations (insert, save) from the host
//! editor. [`Document`] captures them; [`Buffer`] is a rope-backed implementation used by the
//! command-line driver and the tests.

use ropey::Rope;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Syntax name marker identifying Java documents.
pub const JAVA_SYNTAX_MARKER: &str = "Java.tmLanguage";
/// Syntax assigned to `.java` files by [`Buffer::open`].
pub const JAVA_SYNTAX: &str = "Packages/Java/Java.tmLanguage";
/// Scope selector for Java source code.
pub const JAVA_SOURCE_SELECTOR: &str = "source.java";

/// Identity of an open document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(pub u64);

/// A half-open character-offset range (`start..end`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRange {
    /// Range start offset (inclusive), in `char`s from the start of the document.
    pub start: usize,
    /// Range end offset (exclusive), in `char`s from the start of the document.
    pub end: usize,
}

impl TextRange {
    /// Create a new range; `start` and `end` are reordered if needed.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// An empty range (caret) at `offset`.
    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the range is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Editor document operations used by the Java tools.
pub trait Document {
    /// Stable identity of the document.
    fn id(&self) -> DocumentId;

    /// File backing the document, if it has been saved at least once.
    fn file_name(&self) -> Option<&Path>;

    /// Full document text.
    fn text(&self) -> String;

    /// Syntax definition name (e.g. `Packages/Java/Java.tmLanguage`).
    fn syntax(&self) -> &str;

    /// Current selections. The first one is the primary selection.
    fn selections(&self) -> &[TextRange];

    /// Range of the word touching `offset` (empty if there is none).
    fn word_at(&self, offset: usize) -> TextRange;

    /// Text within `range`.
    fn substr(&self, range: TextRange) -> String;

    /// 0-based line containing `offset`.
    fn line_of_offset(&self, offset: usize) -> usize;

    /// Returns `true` if the scope at `offset` matches `selector` (e.g. `source.java`).
    fn match_selector(&self, offset: usize, selector: &str) -> bool;

    /// Insert `text` at character `offset`.
    fn insert(&mut self, offset: usize, text: &str);

    /// Write the document to its file.
    fn save(&mut self) -> io::Result<()>;

    /// Returns `true` if the document uses the Java syntax.
    fn is_java(&self) -> bool {
        self.syntax().contains(JAVA_SYNTAX_MARKER)
    }
}

fn is_word_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// A rope-backed [`Document`].
#[derive(Debug, Clone)]
pub struct Buffer {
    id: DocumentId,
    path: Option<PathBuf>,
    rope: Rope,
    syntax: String,
    selections: Vec<TextRange>,
    dirty: bool,
}

impl Buffer {
    /// Create an unsaved buffer with plain-text syntax and a caret at offset 0.
    pub fn new(id: DocumentId, text: &str) -> Self {
        Self {
            id,
            path: None,
            rope: Rope::from_str(text),
            syntax: "Packages/Text/Plain text.tmLanguage".to_string(),
            selections: vec![TextRange::caret(0)],
            dirty: false,
        }
    }

    /// Load `path` from disk. `.java` files get the Java syntax.
    pub fn open(id: DocumentId, path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let text = fs::read_to_string(&path)?;
        let buffer = Self::new(id, &text);
        Ok(buffer.with_path(path))
    }

    /// Attach a file path; `.java` files switch to the Java syntax.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.extension().is_some_and(|ext| ext == "java") {
            self.syntax = JAVA_SYNTAX.to_string();
        }
        self.path = Some(path);
        self
    }

    /// Override the syntax name.
    pub fn with_syntax(mut self, syntax: impl Into<String>) -> Self {
        self.syntax = syntax.into();
        self
    }

    /// Replace all selections with a single range.
    pub fn set_selection(&mut self, range: TextRange) {
        let len = self.rope.len_chars();
        self.selections = vec![TextRange::new(range.start.min(len), range.end.min(len))];
    }

    /// Replace all selections.
    pub fn set_selections(&mut self, ranges: Vec<TextRange>) {
        self.selections = ranges;
    }

    /// Character offset of `(line, column)` (both 0-based), clamped to the document.
    pub fn offset_of(&self, line: usize, column: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        let start = self.rope.line_to_char(line);
        let line_len = self.rope.line(line).len_chars();
        start + column.min(line_len)
    }

    /// Returns `true` if the buffer changed since it was loaded or last saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of characters in the buffer.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }
}

impl Document for Buffer {
    fn id(&self) -> DocumentId {
        self.id
    }

    fn file_name(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn text(&self) -> String {
        self.rope.to_string()
    }

    fn syntax(&self) -> &str {
        &self.syntax
    }

    fn selections(&self) -> &[TextRange] {
        &self.selections
    }

    fn word_at(&self, offset: usize) -> TextRange {
        let len = self.rope.len_chars();
        let offset = offset.min(len);

        let mut start = offset;
        while start > 0 && is_word_char(self.rope.char(start - 1)) {
            start -= 1;
        }
        let mut end = offset;
        while end < len && is_word_char(self.rope.char(end)) {
            end += 1;
        }
        TextRange::new(start, end)
    }

    fn substr(&self, range: TextRange) -> String {
        let len = self.rope.len_chars();
        self.rope
            .slice(range.start.min(len)..range.end.min(len))
            .to_string()
    }

    fn line_of_offset(&self, offset: usize) -> usize {
        self.rope.char_to_line(offset.min(self.rope.len_chars()))
    }

    fn match_selector(&self, offset: usize, selector: &str) -> bool {
        // Whole-document scope only: Java buffers are `source.java` everywhere.
        let scope = if self.is_java() {
            JAVA_SOURCE_SELECTOR
        } else {
            "text.plain"
        };
        offset <= self.rope.len_chars() && scope.starts_with(selector)
    }

    fn insert(&mut self, offset: usize, text: &str) {
        let offset = offset.min(self.rope.len_chars());
        self.rope.insert(offset, text);
        self.dirty = true;

        // Keep carets after the insertion point anchored to the same text.
        let inserted = text.chars().count();
        for sel in &mut self.selections {
            if sel.start >= offset {
                sel.start += inserted;
            }
            if sel.end >= offset {
                sel.end += inserted;
            }
        }
    }

    fn save(&mut self) -> io::Result<()> {
        let Some(path) = self.path.as_ref() else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "buffer has no file name",
            ));
        };
        let mut writer = BufWriter::new(fs::File::create(path)?);
        self.rope.write_to(&mut writer)?;
        writer.flush()?;
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_at_expands_identifier() {
        let buf = Buffer::new(DocumentId(1), "List<String> items = new ArrayList<>();");
        let word = buf.word_at(2);
        assert_eq!(word, TextRange::new(0, 4));
        assert_eq!(buf.substr(word), "List");

        // Caret right after a word still touches it.
        assert_eq!(buf.substr(buf.word_at(4)), "List");
        // Between `>` and a space: no word.
        assert!(buf.word_at(12).is_empty());
    }

    #[test]
    fn test_java_syntax_from_extension() {
        let buf = Buffer::new(DocumentId(1), "class A {}").with_path("/tmp/A.java");
        assert!(buf.is_java());
        assert!(buf.match_selector(3, JAVA_SOURCE_SELECTOR));

        let txt = Buffer::new(DocumentId(2), "notes").with_path("/tmp/notes.txt");
        assert!(!txt.is_java());
        assert!(!txt.match_selector(0, JAVA_SOURCE_SELECTOR));
    }

    #[test]
    fn test_insert_shifts_following_selection() {
        let mut buf = Buffer::new(DocumentId(1), "ab\ncd\n");
        buf.set_selection(TextRange::caret(4));
        buf.insert(3, "xx\n");
        assert_eq!(buf.text(), "ab\nxx\ncd\n");
        assert_eq!(buf.selections()[0], TextRange::caret(7));
        assert_eq!(buf.line_of_offset(7), 2);
        assert!(buf.is_dirty());
    }

    #[test]
    fn test_offset_of_clamps() {
        let buf = Buffer::new(DocumentId(1), "ab\ncd");
        assert_eq!(buf.offset_of(1, 1), 4);
        assert_eq!(buf.offset_of(1, 99), 5);
        assert_eq!(buf.offset_of(9, 0), 5);
    }
}
