//! Decoders for eclim's line-oriented replies.
//!
//! Replies are newline-separated records whose fields are separated by `|`. The decoders are
//! tolerant: blank input yields an empty result and malformed records are skipped without
//! failing the rest of the batch.

use std::path::PathBuf;
use tracing::debug;

const FIELD_SEPARATOR: char = '|';
const POSITION_SEPARATOR: &str = " col ";
const VARIANT_SEPARATOR: &str = "<br/>";
const PARAMETER_SEPARATOR: &str = ", ";

fn records(reply: &str) -> impl Iterator<Item = &str> {
    reply
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
}

/// Parse a `"<line> col <column>"` field. Both numbers are 1-based.
fn parse_position(field: &str) -> Option<(u32, u32)> {
    let (line, column) = field.split_once(POSITION_SEPARATOR)?;
    let line = line.trim().parse::<u32>().ok().filter(|v| *v > 0)?;
    let column = column.trim().parse::<u32>().ok().filter(|v| *v > 0)?;
    Some((line, column))
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A position in a source file (1-based line and column).
pub struct SourceLocation {
    /// Absolute or project-relative path as reported by eclim.
    pub file: PathBuf,
    /// 1-based line.
    pub line: u32,
    /// 1-based column.
    pub column: u32,
}

impl SourceLocation {
    /// Editor "encoded position" form: `file:line:column`.
    pub fn encoded_position(&self) -> String {
        format!("{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// Decode a `java_search` reply (`file|<line> col <col>|...` per record).
pub fn decode_locations(reply: &str) -> Vec<SourceLocation> {
    let mut out = Vec::new();
    for record in records(reply) {
        let mut fields = record.split(FIELD_SEPARATOR);
        let file = fields.next().unwrap_or("").trim();
        let position = fields.next().and_then(parse_position);

        match position {
            Some((line, column)) if !file.is_empty() => out.push(SourceLocation {
                file: PathBuf::from(file),
                line,
                column,
            }),
            _ => debug!(record, "skipping malformed location record"),
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How a completion proposal is meant to be inserted.
pub enum CompletionKind {
    /// Insert the text verbatim.
    Plain,
    /// A method overload whose insert text is a sequence of `${n:name}` placeholders.
    MethodWithParams,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single completion proposal.
pub struct CompletionProposal {
    /// Text shown in the completion list.
    pub display_text: String,
    /// Text inserted when the proposal is accepted.
    pub insert_text: String,
    /// Proposal kind.
    pub kind: CompletionKind,
}

impl CompletionProposal {
    /// A plain proposal: display and insert text are both `name`.
    pub fn plain(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            display_text: name.clone(),
            insert_text: name,
            kind: CompletionKind::Plain,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// The decoded completion batch.
pub struct Completions {
    /// Proposals in reply order.
    pub proposals: Vec<CompletionProposal>,
    /// `true` if any proposal is a placeholder template.
    pub with_snippets: bool,
}

impl Completions {
    /// `(display, insert)` pairs, the shape editors usually accept.
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.proposals
            .iter()
            .map(|p| (p.display_text.clone(), p.insert_text.clone()))
            .collect()
    }
}

/// Build `${1:a}, ${2:b}, ...` from a method signature such as `foo(int a, String b)`.
///
/// Returns `None` if the variant has no parenthesized parameter list.
fn placeholder_template(variant: &str) -> Option<String> {
    let open = variant.find('(')?;
    let close = variant.rfind(')')?;
    if close < open {
        return None;
    }

    let params = &variant[open + 1..close];
    if params.trim().is_empty() {
        return Some(String::new());
    }

    let template = params
        .split(PARAMETER_SEPARATOR)
        .map(|param| param.split_whitespace().next_back().unwrap_or(param))
        .enumerate()
        .map(|(idx, name)| format!("${{{}:{}}}", idx + 1, name))
        .collect::<Vec<_>>()
        .join(PARAMETER_SEPARATOR);
    Some(template)
}

/// Decode a compact-format `java_complete` reply.
///
/// Field 1 holds a plain proposal name. When it is empty, field 3 holds one or more method
/// signatures separated by `<br/>`, each of which becomes a placeholder proposal.
pub fn decode_completions(reply: &str) -> Completions {
    let mut out = Completions::default();

    for record in records(reply) {
        let fields: Vec<&str> = record.split(FIELD_SEPARATOR).collect();
        let Some(name) = fields.get(1) else {
            debug!(record, "skipping malformed completion record");
            continue;
        };

        if !name.is_empty() {
            out.proposals.push(CompletionProposal::plain(*name));
            continue;
        }

        let Some(signatures) = fields.get(3) else {
            debug!(record, "completion record has neither name nor signatures");
            continue;
        };

        for variant in signatures.split(VARIANT_SEPARATOR) {
            let Some(insert_text) = placeholder_template(variant) else {
                debug!(variant, "skipping signature without parameter list");
                continue;
            };
            out.proposals.push(CompletionProposal {
                display_text: variant.to_string(),
                insert_text,
                kind: CompletionKind::MethodWithParams,
            });
            out.with_snippets = true;
        }
    }

    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Problem severity as reported by eclim.
pub enum ProblemKind {
    /// Compile error (`e`).
    Error,
    /// Warning (`w`).
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single problem from a `java_src_update -v` report.
pub struct Problem {
    /// File the problem belongs to.
    pub file: PathBuf,
    /// 1-based line.
    pub line: u32,
    /// 1-based column.
    pub column: u32,
    /// Problem message.
    pub message: String,
    /// Severity.
    pub kind: ProblemKind,
}

/// Decode a validation report (`file|<line> col <col>|message|e` per record).
///
/// Records without a severity field are treated as errors.
pub fn decode_problems(reply: &str) -> Vec<Problem> {
    let mut out = Vec::new();
    for record in records(reply) {
        let fields: Vec<&str> = record.split(FIELD_SEPARATOR).collect();
        let (Some(file), Some(position), Some(message)) =
            (fields.first(), fields.get(1), fields.get(2))
        else {
            debug!(record, "skipping malformed problem record");
            continue;
        };
        let Some((line, column)) = parse_position(position) else {
            debug!(record, "skipping problem record without position");
            continue;
        };

        let kind = match fields.get(3).map(|k| k.trim()) {
            Some("w") => ProblemKind::Warning,
            _ => ProblemKind::Error,
        };

        out.push(Problem {
            file: PathBuf::from(file.trim()),
            line,
            column,
            message: message.to_string(),
            kind,
        });
    }
    out
}

/// Decode a `java_import` reply: one fully qualified class name per line.
pub fn decode_import_candidates(reply: &str) -> Vec<String> {
    records(reply).map(|line| line.trim().to_string()).collect()
}
