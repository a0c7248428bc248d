//! Shared fixtures: a scripted eclim, a recording UI and an on-disk Eclipse project.

#![allow(dead_code)]

use eclim_client::{CommandLine, EclimClient, Invoker, ProcessError, SourceLocation};
use eclim_editor::{Buffer, DocumentId, EditorUi, JavaTools};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use tempfile::TempDir;

#[derive(Default)]
pub struct Script {
    replies: HashMap<String, Result<String, String>>,
    pub calls: Vec<String>,
}

impl Script {
    /// Reply to every `command` with `reply`.
    pub fn reply(&mut self, command: &str, reply: &str) {
        self.replies
            .insert(command.to_string(), Ok(reply.to_string()));
    }

    /// Make every `command` fail as if the executable could not be started.
    pub fn fail(&mut self, command: &str) {
        self.replies
            .insert(command.to_string(), Err(format!("{} is broken", command)));
    }

    /// Names of the issued commands, in order.
    pub fn command_names(&self) -> Vec<String> {
        self.calls
            .iter()
            .map(|call| call.split(' ').nth(1).unwrap_or("").to_string())
            .collect()
    }
}

#[derive(Clone, Default)]
pub struct ScriptedInvoker(pub Rc<RefCell<Script>>);

impl Invoker for ScriptedInvoker {
    fn invoke(&mut self, command: &CommandLine) -> Result<String, ProcessError> {
        let mut script = self.0.borrow_mut();
        script.calls.push(command.to_string());
        match script.replies.get(command.command_name()) {
            Some(Ok(reply)) => Ok(reply.clone()),
            Some(Err(message)) => Err(ProcessError::Spawn {
                program: PathBuf::from("eclim"),
                source: io::Error::other(message.clone()),
            }),
            None => Ok(String::new()),
        }
    }
}

#[derive(Default)]
pub struct RecordingUi {
    pub statuses: HashMap<(DocumentId, String), String>,
    pub regions: HashMap<(DocumentId, String), Vec<u32>>,
    pub region_log: Vec<String>,
    pub opened: Vec<SourceLocation>,
    pub panels: Vec<Vec<String>>,
    pub output: Vec<String>,
}

impl RecordingUi {
    pub fn status(&self, document: DocumentId, key: &str) -> Option<&str> {
        self.statuses
            .get(&(document, key.to_string()))
            .map(String::as_str)
    }

    pub fn regions(&self, document: DocumentId, key: &str) -> Vec<u32> {
        self.regions
            .get(&(document, key.to_string()))
            .cloned()
            .unwrap_or_default()
    }
}

impl EditorUi for RecordingUi {
    fn set_status(&mut self, document: DocumentId, key: &str, text: &str) {
        self.statuses
            .insert((document, key.to_string()), text.to_string());
    }

    fn erase_status(&mut self, document: DocumentId, key: &str) {
        self.statuses.remove(&(document, key.to_string()));
    }

    fn add_line_regions(&mut self, document: DocumentId, key: &str, lines: &[u32]) {
        self.region_log.push(format!("add {}", key));
        self.regions
            .entry((document, key.to_string()))
            .or_default()
            .extend_from_slice(lines);
    }

    fn erase_regions(&mut self, document: DocumentId, key: &str) {
        self.region_log.push(format!("erase {}", key));
        self.regions.remove(&(document, key.to_string()));
    }

    fn open_location(&mut self, location: &SourceLocation) {
        self.opened.push(location.clone());
    }

    fn show_quick_panel(&mut self, _document: DocumentId, items: &[String]) {
        self.panels.push(items.to_vec());
    }

    fn print_output(&mut self, text: &str) {
        self.output.push(text.to_string());
    }
}

pub const CART: &str = "package shop;\n\npublic class Cart {\n    Item item;\n}\n";

const DESCRIPTOR: &str = "<projectDescription>\n  <name>shop</name>\n</projectDescription>\n";

/// A `shop` project on disk holding `src/shop/Cart.java`.
pub struct Project {
    pub dir: TempDir,
    pub cart: PathBuf,
}

impl Project {
    pub fn new() -> Self {
        Self::with_source(CART)
    }

    pub fn with_source(text: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("shop");
        let src = root.join("src").join("shop");
        fs::create_dir_all(&src).unwrap();
        fs::write(root.join(".project"), DESCRIPTOR).unwrap();
        let cart = src.join("Cart.java");
        fs::write(&cart, text).unwrap();
        Self { dir, cart }
    }

    pub fn open_cart(&self) -> Buffer {
        Buffer::open(DocumentId(1), &self.cart).unwrap()
    }
}

pub fn scripted_tools() -> (JavaTools<ScriptedInvoker>, Rc<RefCell<Script>>) {
    let invoker = ScriptedInvoker::default();
    let script = Rc::clone(&invoker.0);
    (JavaTools::new(EclimClient::new(invoker)), script)
}
