//! Placement of new `import` statements.
//!
//! Lines are scanned from the top until the first one containing `{`. The new import goes
//! right after the last line containing `import`; without one it goes after the line
//! containing `package`, separated from it by a blank line.
//!
//! Matching is by substring, so the words `import`/`package` inside comments or strings
//! before the class body also count.

/// A text insertion at a character offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEdit {
    /// Character offset of the insertion.
    pub offset: usize,
    /// Inserted text.
    pub text: String,
}

#[derive(Debug, Clone, Copy)]
struct LineSpan {
    /// Offset just past the line, including its terminator.
    next: usize,
    terminated: bool,
}

/// Compute where and what to insert to import `class_name` into `text`.
pub fn import_edit(text: &str, class_name: &str) -> ImportEdit {
    let mut offset = 0usize;
    let mut last_import: Option<LineSpan> = None;
    let mut package: Option<LineSpan> = None;

    for raw in text.split_inclusive('\n') {
        let content = raw.strip_suffix('\n').unwrap_or(raw);
        offset += raw.chars().count();
        let span = LineSpan {
            next: offset,
            terminated: raw.ends_with('\n'),
        };

        if content.contains('{') {
            break;
        }
        if content.contains("package") {
            package = Some(span);
        }
        if content.contains("import") {
            last_import = Some(span);
        }
    }

    let mut insert = format!("import {};\n", class_name);
    let anchor = match last_import {
        Some(span) => Some(span),
        None => {
            insert.insert(0, '\n');
            package
        }
    };

    match anchor {
        Some(span) => {
            if !span.terminated {
                insert.insert(0, '\n');
            }
            ImportEdit {
                offset: span.next,
                text: insert,
            }
        }
        None => ImportEdit {
            offset: 0,
            text: insert,
        },
    }
}

/// Apply [`import_edit`] to a string (convenience for hosts that work on plain text).
pub fn insert_import(text: &str, class_name: &str) -> String {
    let edit = import_edit(text, class_name);
    let byte = text
        .char_indices()
        .nth(edit.offset)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());

    let mut out = String::with_capacity(text.len() + edit.text.len());
    out.push_str(&text[..byte]);
    out.push_str(&edit.text);
    out.push_str(&text[byte..]);
    out
}
