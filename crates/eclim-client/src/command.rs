//! Eclim command-line builder.
//!
//! Every request sent to eclim is a flat list of flag-prefixed arguments, for example:
//!
//! ```text
//! -command java_search -n <project> -f <file> -o <offset> -e utf-8 -l <length>
//! ```
//!
//! The flag names and their order must match what the eclim server expects, so they are
//! spelled out here exactly once. Building a command never talks to the process.

use crate::error::ClientError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A validated eclim argument list.
///
/// `Display` joins the arguments with single spaces, which is the argument string eclim
/// receives on its command line.
pub struct CommandLine {
    args: Vec<String>,
}

impl CommandLine {
    fn new(command: &str) -> Self {
        Self {
            args: vec!["-command".to_string(), command.to_string()],
        }
    }

    fn flag(mut self, name: &str, value: impl ToString) -> Self {
        self.args.push(name.to_string());
        self.args.push(value.to_string());
        self
    }

    fn with_switch(mut self, name: &str) -> Self {
        self.args.push(name.to_string());
        self
    }

    /// The eclim command name (the value following `-command`).
    pub fn command_name(&self) -> &str {
        &self.args[1]
    }

    /// The individual arguments, in order.
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.args.join(" "))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A request to the eclim server, before validation.
pub enum EclimCommand {
    /// Refresh eclim's view of a source file and validate it (`java_src_update`).
    ///
    /// Eclipse does not see unsaved buffer contents otherwise, so this is issued before
    /// every query that depends on the current file.
    SourceUpdate {
        /// Eclipse project name.
        project: String,
        /// Project-relative file path.
        file: String,
    },
    /// Look up the definition of the token at `offset..offset + length` (`java_search`).
    FindDefinition {
        /// Eclipse project name.
        project: String,
        /// Project-relative file path.
        file: String,
        /// Character offset of the token start.
        offset: usize,
        /// Token length in characters.
        length: usize,
    },
    /// Run a class as a Java program (`java`).
    RunClass {
        /// Eclipse project name.
        project: String,
        /// Fully qualified class name.
        class_name: String,
    },
    /// Request compact-format completions at `offset` (`java_complete`).
    Complete {
        /// Eclipse project name.
        project: String,
        /// Project-relative file path.
        file: String,
        /// Character offset of the cursor.
        offset: usize,
    },
    /// Search importable classes matching an identifier (`java_import`).
    ImportSearch {
        /// Eclipse project name.
        project: String,
        /// Simple class name to resolve.
        identifier: String,
    },
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ClientError> {
    if value.trim().is_empty() {
        Err(ClientError::InvalidRequest { field })
    } else {
        Ok(value)
    }
}

impl EclimCommand {
    /// Validate the request and produce its eclim argument list.
    pub fn build(&self) -> Result<CommandLine, ClientError> {
        let line = match self {
            Self::SourceUpdate { project, file } => CommandLine::new("java_src_update")
                .flag("-p", required("project", project)?)
                .flag("-f", required("file", file)?)
                .with_switch("-v"),
            Self::FindDefinition {
                project,
                file,
                offset,
                length,
            } => {
                if *length == 0 {
                    return Err(ClientError::InvalidRequest { field: "length" });
                }
                CommandLine::new("java_search")
                    .flag("-n", required("project", project)?)
                    .flag("-f", required("file", file)?)
                    .flag("-o", offset)
                    .flag("-e", "utf-8")
                    .flag("-l", length)
            }
            Self::RunClass {
                project,
                class_name,
            } => CommandLine::new("java")
                .flag("-p", required("project", project)?)
                .flag("-c", required("class_name", class_name)?),
            Self::Complete {
                project,
                file,
                offset,
            } => CommandLine::new("java_complete")
                .flag("-p", required("project", project)?)
                .flag("-f", required("file", file)?)
                .flag("-o", offset)
                .flag("-e", "utf-8")
                .flag("-l", "compact"),
            Self::ImportSearch {
                project,
                identifier,
            } => CommandLine::new("java_import")
                .flag("-n", required("project", project)?)
                .flag("-p", required("identifier", identifier)?),
        };
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_definition_argument_order() {
        let line = EclimCommand::FindDefinition {
            project: "demo".to_string(),
            file: "src/a/Main.java".to_string(),
            offset: 120,
            length: 6,
        }
        .build()
        .unwrap();

        assert_eq!(
            line.to_string(),
            "-command java_search -n demo -f src/a/Main.java -o 120 -e utf-8 -l 6"
        );
        assert_eq!(line.command_name(), "java_search");
    }

    #[test]
    fn test_zero_length_definition_is_rejected() {
        let err = EclimCommand::FindDefinition {
            project: "demo".to_string(),
            file: "Main.java".to_string(),
            offset: 0,
            length: 0,
        }
        .build()
        .unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest { field: "length" }));
    }

    #[test]
    fn test_blank_identifier_is_rejected() {
        let err = EclimCommand::ImportSearch {
            project: "demo".to_string(),
            identifier: "  ".to_string(),
        }
        .build()
        .unwrap_err();
        assert!(matches!(
            err,
            ClientError::InvalidRequest {
                field: "identifier"
            }
        ));
    }
}
