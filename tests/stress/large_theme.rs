use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tempfile::TempDir;
use themekit::core::OperationContext;
use themekit::store::FsStore;
use themekit::theme::Theme;

const PARTIALS: usize = 400;
const DEPTH: usize = 25;

#[test]
fn test_wide_dependency_graph_from_disk() {
    let temp = TempDir::new().unwrap();
    let theme_dir = temp.path().join("wide");
    std::fs::create_dir_all(theme_dir.join("partials")).unwrap();

    let mut page = String::new();
    for i in 0..PARTIALS {
        std::fs::write(theme_dir.join(format!("partials/p{i}")), format!("{i},")).unwrap();
        page.push_str(&format!("{{% include \"partials/p{i}\" %}}"));
    }
    std::fs::write(theme_dir.join("page"), &page).unwrap();

    let theme = Theme::new("wide", Arc::new(FsStore::new(temp.path())));
    let ctx = OperationContext::new();

    let start = Instant::now();
    let deps = theme.dependencies(&ctx, "page").unwrap();
    println!("Resolved {} templates in {:?}", deps.len(), start.elapsed());
    assert_eq!(deps.len(), PARTIALS + 1);

    let start = Instant::now();
    let mut out = Vec::new();
    theme.write(&ctx, &mut out, "page", &json!({})).unwrap();
    println!("Compiled and rendered in {:?}", start.elapsed());

    let expected: String = (0..PARTIALS).map(|i| format!("{i},")).collect();
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[test]
fn test_deep_parent_chain() {
    let store = Arc::new(themekit::store::MemoryStore::new());
    store.add("t0", "leaf", "found at the root");

    let mut parent: Option<Arc<Theme>> = None;
    for level in 0..DEPTH {
        let theme = Arc::new(Theme::new(format!("t{level}"), store.clone()));
        theme.set_parent(parent.take()).unwrap();
        parent = Some(theme);
    }
    let top = parent.unwrap();

    let mut out = Vec::new();
    top.write(&OperationContext::new(), &mut out, "leaf", &()).unwrap();
    assert_eq!(out, b"found at the root");

    let err = top.find(&OperationContext::new(), "missing").unwrap_err();
    assert_eq!(err.report().lines().count(), 2 * DEPTH);
}
