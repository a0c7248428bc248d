use eclim_client::{ClientError, ProjectContext, find_project_root};
use pretty_assertions::assert_eq;
use std::fs;

const DESCRIPTOR: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<projectDescription>
	<name>shop</name>
	<comment></comment>
</projectDescription>
"#;

#[test]
fn test_resolve_nearest_project() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("shop");
    let src = root.join("src").join("shop");
    fs::create_dir_all(&src).unwrap();
    fs::write(root.join(".project"), DESCRIPTOR).unwrap();
    let file = src.join("Cart.java");
    fs::write(&file, "package shop;\n").unwrap();

    let ctx = ProjectContext::resolve(&file).unwrap();
    assert_eq!(ctx.project, "shop");
    assert_eq!(ctx.file, "src/shop/Cart.java");
    assert_eq!(ctx.root, root);
    assert_eq!(find_project_root(&file), Some(root));
}

#[test]
fn test_descriptor_without_name_falls_back_to_directory() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("billing");
    fs::create_dir_all(&root).unwrap();
    fs::write(root.join(".project"), "<projectDescription/>").unwrap();
    let file = root.join("Invoice.java");
    fs::write(&file, "").unwrap();

    let ctx = ProjectContext::resolve(&file).unwrap();
    assert_eq!(ctx.project, "billing");
    assert_eq!(ctx.file, "Invoice.java");
}

#[test]
fn test_no_project_descriptor() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("Loose.java");
    fs::write(&file, "").unwrap();

    // Only fails if no ancestor of the temp dir has a `.project`, which holds on CI machines.
    if find_project_root(&file).is_none() {
        let err = ProjectContext::resolve(&file).unwrap_err();
        assert!(matches!(err, ClientError::NoProject(_)));
    }
}

#[test]
fn test_resolve_relative_path_from_project_subdirectory() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("shop");
    let src = root.join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(root.join(".project"), DESCRIPTOR).unwrap();
    fs::write(src.join("Cart.java"), "package shop;\n").unwrap();

    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(&src).unwrap();
    let resolved = ProjectContext::resolve(std::path::Path::new("Cart.java"));
    std::env::set_current_dir(previous).unwrap();

    let ctx = resolved.unwrap();
    assert_eq!(ctx.project, "shop");
    assert_eq!(ctx.file, "src/Cart.java");
}
