//! Java source text helpers.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static PACKAGE_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"package ([^;]*);").expect("valid package regex"));

/// Find the package declared in `text`, scanning line by line; the first match wins.
pub fn find_package_name(text: &str) -> Option<String> {
    text.lines().find_map(|line| {
        PACKAGE_DECLARATION
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}

/// The class to run for `file`: `<package>.<file stem>`, or just the stem without a package.
pub fn qualified_class_name(file: &Path, text: &str) -> Option<String> {
    let stem = file.file_stem()?.to_string_lossy();
    if stem.is_empty() {
        return None;
    }
    Some(match find_package_name(text) {
        Some(package) => format!("{}.{}", package, stem),
        None => stem.into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_package_declaration_wins() {
        let text = "/* header */\npackage com.example.shop;\npackage ignored;\n";
        assert_eq!(find_package_name(text).as_deref(), Some("com.example.shop"));
    }

    #[test]
    fn test_qualified_class_name() {
        let file = Path::new("/w/shop/src/com/example/Main.java");
        assert_eq!(
            qualified_class_name(file, "package com.example;\nclass Main {}").as_deref(),
            Some("com.example.Main")
        );
        assert_eq!(
            qualified_class_name(file, "class Main {}").as_deref(),
            Some("Main")
        );
    }
}
