use serde_json::json;
use std::sync::Arc;
use themekit::core::{OperationContext, ThemeError};
use themekit::store::{FsStore, MemoryStore, Store, StoreChain};
use themekit::theme::Theme;

use crate::helpers::{ThemeDir, render};

#[test]
fn test_theme_over_directory_tree() {
    let dir = ThemeDir::new();
    dir.template("base", "layouts/default.html", "<main>{% include \"content\" %}</main>")
        .template("site", "index.html", "<!-- layouts/default.html -->\n{% define \"content\" %}{{ msg }}{% enddefine %}");

    let store = Arc::new(FsStore::new(dir.path()));
    let base = Arc::new(Theme::new("base", store.clone()));
    let site = Theme::new("site", store);
    site.set_parent(Some(base)).unwrap();

    assert_eq!(render(&site, "index.html", json!({"msg": "hello"})).unwrap(), "<main>hello</main>");
}

#[test]
fn test_directory_edits_visible_in_debug_mode_only() {
    let dir = ThemeDir::new();
    dir.template("t", "home", "one");
    let theme = Theme::new("t", Arc::new(FsStore::new(dir.path())));

    assert_eq!(render(&theme, "home", json!({})).unwrap(), "one");
    dir.template("t", "home", "two");
    assert_eq!(render(&theme, "home", json!({})).unwrap(), "one");

    theme.set_debug(true);
    assert_eq!(render(&theme, "home", json!({})).unwrap(), "two");
}

#[test]
fn test_escaping_name_is_hard_failure() {
    let dir = ThemeDir::new();
    dir.file("secret.txt", "top secret");
    dir.template("t", "home", "{% include \"../secret.txt\" %}");
    let theme = Theme::new("t", Arc::new(FsStore::new(dir.path())));

    let err = render(&theme, "home", json!({})).unwrap_err();
    assert!(matches!(err, ThemeError::Store { .. }));
}

#[test]
fn test_memory_overrides_directory_in_chain() {
    let dir = ThemeDir::new();
    dir.template("t", "header", "disk header").template("t", "page", "[{% include \"header\" %}]");

    let overrides = MemoryStore::new();
    overrides.add("t", "header", "memory header");
    let chain = StoreChain::new()
        .with(Arc::new(overrides))
        .with(Arc::new(FsStore::new(dir.path())));
    let theme = Theme::new("t", Arc::new(chain));

    assert_eq!(render(&theme, "page", json!({})).unwrap(), "[memory header]");
}

#[test]
fn test_list_templates_across_themes() {
    let dir = ThemeDir::new();
    dir.template("base", "a.html", "")
        .template("base", "nested/b.html", "")
        .template("site", "c.html", "");
    let store = Arc::new(FsStore::new(dir.path()));
    let ctx = OperationContext::new();

    assert_eq!(store.list(&ctx, "base").unwrap(), vec!["a.html", "nested/b.html"]);

    let base = Arc::new(Theme::new("base", store.clone()));
    let site = Theme::new("site", store);
    site.set_parent(Some(base)).unwrap();
    assert_eq!(site.template_names(&ctx).unwrap(), vec!["a.html", "c.html", "nested/b.html"]);
}
