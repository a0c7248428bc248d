//! Typed eclim operations.
//!
//! [`EclimClient`] composes the command builder, an [`Invoker`] and the reply decoders. The
//! query operations do not sync on their own; callers issue [`EclimClient::sync_source`]
//! right before them so Eclipse sees the current file contents.

use crate::command::EclimCommand;
use crate::decode::{
    Completions, Problem, SourceLocation, decode_completions, decode_import_candidates,
    decode_locations, decode_problems,
};
use crate::error::ClientError;
use crate::invoker::Invoker;
use crate::project::ProjectContext;
use tracing::debug;

/// A synchronous eclim client.
pub struct EclimClient<I> {
    invoker: I,
}

impl<I: Invoker> EclimClient<I> {
    /// Create a client that runs commands through `invoker`.
    pub fn new(invoker: I) -> Self {
        Self { invoker }
    }

    /// Get a reference to the underlying invoker.
    pub fn invoker(&self) -> &I {
        &self.invoker
    }

    /// Get a mutable reference to the underlying invoker.
    pub fn invoker_mut(&mut self) -> &mut I {
        &mut self.invoker
    }

    fn run(&mut self, command: EclimCommand) -> Result<String, ClientError> {
        let line = command.build()?;
        debug!(command = %line, "eclim request");
        let reply = self.invoker.invoke(&line)?;
        Ok(reply)
    }

    /// Refresh eclim's view of `ctx.file`, returning the raw validation report.
    pub fn sync_source(&mut self, ctx: &ProjectContext) -> Result<String, ClientError> {
        self.run(EclimCommand::SourceUpdate {
            project: ctx.project.clone(),
            file: ctx.file.clone(),
        })
    }

    /// Refresh eclim's view of `ctx.file` and decode the resulting problem report.
    pub fn validate(&mut self, ctx: &ProjectContext) -> Result<Vec<Problem>, ClientError> {
        let reply = self.sync_source(ctx)?;
        let problems = decode_problems(&reply);
        debug!(file = %ctx.file, count = problems.len(), "decoded problems");
        Ok(problems)
    }

    /// Find definitions of the token at `offset..offset + length`.
    pub fn find_definition(
        &mut self,
        ctx: &ProjectContext,
        offset: usize,
        length: usize,
    ) -> Result<Vec<SourceLocation>, ClientError> {
        let reply = self.run(EclimCommand::FindDefinition {
            project: ctx.project.clone(),
            file: ctx.file.clone(),
            offset,
            length,
        })?;
        Ok(decode_locations(&reply))
    }

    /// Run `class_name` as a Java program and return its stdout.
    pub fn run_class(
        &mut self,
        ctx: &ProjectContext,
        class_name: &str,
    ) -> Result<String, ClientError> {
        self.run(EclimCommand::RunClass {
            project: ctx.project.clone(),
            class_name: class_name.to_string(),
        })
    }

    /// Request completions at `offset`.
    pub fn complete(
        &mut self,
        ctx: &ProjectContext,
        offset: usize,
    ) -> Result<Completions, ClientError> {
        let reply = self.run(EclimCommand::Complete {
            project: ctx.project.clone(),
            file: ctx.file.clone(),
            offset,
        })?;
        let completions = decode_completions(&reply);
        debug!(count = completions.proposals.len(), "decoded completions");
        Ok(completions)
    }

    /// Search fully qualified class names that `identifier` could refer to.
    pub fn import_candidates(
        &mut self,
        ctx: &ProjectContext,
        identifier: &str,
    ) -> Result<Vec<String>, ClientError> {
        let reply = self.run(EclimCommand::ImportSearch {
            project: ctx.project.clone(),
            identifier: identifier.to_string(),
        })?;
        Ok(decode_import_candidates(&reply))
    }
}
