#![warn(missing_docs)]
//! `eclim-client` - a small client for the eclim Java tooling bridge.
//!
//! Eclim exposes a running Eclipse instance through a command-line executable. This crate
//! builds the exact argument strings eclim expects, runs the executable synchronously and
//! decodes its pipe-delimited replies into typed results:
//!
//! ```text
//! EclimCommand ──build──▶ CommandLine ──Invoker──▶ raw reply ──decode_*──▶ typed result
//! ```
//!
//! Decoders never fail: blank or malformed replies produce empty results.

pub mod client;
pub mod command;
pub mod decode;
pub mod error;
pub mod invoker;
pub mod project;

pub use client::EclimClient;
pub use command::{CommandLine, EclimCommand};
pub use decode::{
    CompletionKind, CompletionProposal, Completions, Problem, ProblemKind, SourceLocation,
    decode_completions, decode_import_candidates, decode_locations, decode_problems,
};
pub use error::{ClientError, ProcessError};
pub use invoker::{Invoker, ProcessInvoker};
pub use project::{PROJECT_DESCRIPTOR, ProjectContext, find_project_root};
