//! Mapping an edited file to its Eclipse project.
//!
//! Eclim addresses files by `(project name, project-relative path)`. The project is the
//! nearest ancestor directory holding a `.project` descriptor.

use crate::error::ClientError;
use regex::Regex;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

/// File name of the Eclipse project descriptor.
pub const PROJECT_DESCRIPTOR: &str = ".project";

static PROJECT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<name>\s*([^<]*?)\s*</name>").expect("valid project name regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
/// The eclim addressing context of a source file.
pub struct ProjectContext {
    /// Eclipse project name.
    pub project: String,
    /// File path relative to the project root, using `/` separators.
    pub file: String,
    /// Directory holding the `.project` descriptor.
    pub root: PathBuf,
}

impl ProjectContext {
    /// Resolve the project context of `path` by searching upwards for a `.project` file.
    ///
    /// Relative paths are taken relative to the current directory.
    pub fn resolve(path: &Path) -> Result<Self, ClientError> {
        let path = &std::path::absolute(path)?;
        let root = find_project_root(path).ok_or_else(|| ClientError::NoProject(path.into()))?;
        let descriptor = fs::read_to_string(root.join(PROJECT_DESCRIPTOR))?;

        let project = match project_name_from_descriptor(&descriptor) {
            Some(name) => name,
            None => root
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| ClientError::NoProject(path.into()))?,
        };

        let relative = path
            .strip_prefix(&root)
            .map_err(|_| ClientError::NoProject(path.into()))?;
        let file = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/");

        Ok(Self {
            project,
            file,
            root,
        })
    }
}

/// Find the closest ancestor directory of `path` that contains a `.project` descriptor.
pub fn find_project_root(path: &Path) -> Option<PathBuf> {
    let mut dir = if path.is_dir() {
        path.to_path_buf()
    } else {
        path.parent()?.to_path_buf()
    };

    loop {
        if dir.join(PROJECT_DESCRIPTOR).is_file() {
            return Some(dir);
        }
        if !dir.pop() {
            return None;
        }
    }
}

/// Extract the first `<name>` element of a `.project` descriptor.
pub fn project_name_from_descriptor(descriptor: &str) -> Option<String> {
    PROJECT_NAME
        .captures(descriptor)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|name| !name.is_empty())
}
