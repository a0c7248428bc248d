//! `eclim-java`: drive the eclim Java integration from a terminal.
//!
//! ```bash
//! eclim-java set-tool-path ~/eclipse/eclim
//! eclim-java validate src/shop/Cart.java --recheck
//! eclim-java import src/shop/Cart.java --offset 41
//! ```
//!
//! The executable stored with `set-tool-path` can be overridden with the `ECLIM_EXECUTABLE`
//! environment variable. Logging goes to stderr and is controlled by `RUST_LOG`.

mod cli;
mod terminal;

use clap::Parser;
use cli::{Cli, Commands};
use eclim_client::ProcessInvoker;
use eclim_editor::{
    Buffer, DeferredTask, Document, DocumentId, EditorEvent, EventOutcome, ImportFlow,
    JavaTools, Settings, SettingsError, TextRange,
};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;
use std::time::Instant;
use terminal::{TerminalUi, read_choice};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const ECLIM_EXECUTABLE_ENV: &str = "ECLIM_EXECUTABLE";
const DOCUMENT: DocumentId = DocumentId(1);

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("cannot open '{path}': {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("cannot save '{path}': {source}")]
    Save { path: PathBuf, source: io::Error },

    #[error("invalid choice: {0}")]
    Choice(io::Error),
}

type Ui = TerminalUi<io::Stdout, io::Stderr>;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let settings_path = match cli.settings {
        Some(path) => path,
        None => Settings::default_path()?,
    };
    let mut settings = Settings::load(&settings_path)?;
    let mut ui = TerminalUi::stdio();

    if let Commands::SetToolPath { path } = &cli.command {
        let mut tools = JavaTools::<ProcessInvoker>::unconfigured();
        let stored = tools.set_tool_path(&mut settings, &settings_path, path)?;
        ui.println(format_args!("eclim executable set to {}", stored.display()));
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(executable) = std::env::var_os(ECLIM_EXECUTABLE_ENV) {
        debug!(executable = ?executable, "using eclim from environment");
        settings.eclim_executable_location = Some(PathBuf::from(executable));
    }
    let mut tools = JavaTools::from_settings(&settings);

    match cli.command {
        Commands::SetToolPath { .. } => {}
        Commands::Definition { file, offset } => {
            let buf = open_at(&file, offset)?;
            tools.goto_definition(&buf, &mut ui);
        }
        Commands::Run { file } => {
            let buf = open_at(&file, 0)?;
            tools.run_class(&buf, &mut ui);
        }
        Commands::Complete { file, offset } => {
            let mut buf = open_at(&file, offset)?;
            let event = EditorEvent::QueryCompletions {
                locations: vec![offset],
            };
            if let EventOutcome::Completions(completions) =
                tools.dispatch(event, &mut buf, &mut ui)
            {
                for (display, insert) in completions.pairs() {
                    ui.println(format_args!("{}\t{}", display, insert));
                }
            }
        }
        Commands::Validate { file, recheck } => {
            validate(&mut tools, &mut ui, &file, recheck)?;
        }
        Commands::Import { file, offset, pick } => {
            let mut buf = open_at(&file, offset)?;
            let imported = match tools.import_class_under_cursor(&mut buf, &mut ui) {
                ImportFlow::Imported(class_name) => Some(class_name),
                ImportFlow::Prompted(pending) => {
                    let choice = match pick {
                        Some(idx) => Some(idx),
                        None => read_choice(&mut io::stdin().lock()).map_err(CliError::Choice)?,
                    };
                    tools.finish_import(&mut buf, pending, choice)
                }
                ImportFlow::NoCandidates | ImportFlow::Aborted => None,
            };
            if let Some(class_name) = imported {
                buf.save().map_err(|source| CliError::Save {
                    path: file.clone(),
                    source,
                })?;
                ui.println(format_args!("import {};", class_name));
            }
        }
    }

    Ok(if ui.errors() > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn open_at(file: &Path, offset: usize) -> Result<Buffer, CliError> {
    let mut buf = Buffer::open(DOCUMENT, file).map_err(|source| CliError::Open {
        path: file.to_path_buf(),
        source,
    })?;
    buf.set_selection(TextRange::caret(offset));
    Ok(buf)
}

fn validate(
    tools: &mut JavaTools<ProcessInvoker>,
    ui: &mut Ui,
    file: &Path,
    recheck: bool,
) -> Result<(), CliError> {
    let buf = open_at(file, 0)?;
    let event = if recheck {
        EditorEvent::PostSave
    } else {
        EditorEvent::Loaded
    };
    let mut docs = [buf];
    tools.dispatch(event, &mut docs[0], ui);

    let recheck_due = tools
        .tasks()
        .iter()
        .filter(|(_, task)| matches!(task, DeferredTask::Revalidate { .. }))
        .map(|(due, _)| due)
        .max();
    if let Some(due) = recheck_due {
        let now = Instant::now();
        if due > now {
            thread::sleep(due - now);
        }
        tools.run_due(due, &mut docs, ui);
    }

    let display = docs[0].file_name().unwrap_or(file).display().to_string();
    if let Some(lines) = tools.diagnostics().document(DOCUMENT) {
        for (line, messages) in lines {
            for message in messages {
                ui.println(format_args!("{}:{}: {}", display, line, message));
            }
        }
    }
    Ok(())
}
