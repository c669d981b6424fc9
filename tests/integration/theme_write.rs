use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use themekit::core::{OperationContext, ThemeError};
use themekit::templating::{FuncMap, builtin_functions, function};
use themekit::test_utils::{CountingStore, init_test_logging};
use themekit::theme::Theme;

use crate::helpers::{memory_store, render};

fn counting(entries: &[(&str, &str, &str)]) -> Arc<CountingStore> {
    Arc::new(CountingStore::new(memory_store(entries)))
}

#[test]
fn test_render_title() {
    init_test_logging(None);
    let theme = Theme::new("t", memory_store(&[("t", "home", "<h1>{{Title}}</h1>")]));

    assert_eq!(render(&theme, "home", json!({"Title": "Hi"})).unwrap(), "<h1>Hi</h1>");
}

#[test]
fn test_render_struct_data() {
    #[derive(Serialize)]
    struct Page<'a> {
        title: &'a str,
        tags: Vec<&'a str>,
    }

    let theme = Theme::new(
        "t",
        memory_store(&[("t", "page", "{{ title }}:{% for t in tags %}[{{ t }}]{% endfor %}")]),
    );
    let mut out = Vec::new();
    theme
        .write(
            &OperationContext::new(),
            &mut out,
            "page",
            &Page {
                title: "Post",
                tags: vec!["a", "b"],
            },
        )
        .unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "Post:[a][b]");
}

#[test]
fn test_layout_skeleton_compiled_under_child_name() {
    let store = counting(&[
        ("t", "child", "<!-- base -->\nBODY"),
        ("t", "base", "<!-- base -->\nSKELETON {% include \"slot\" ignore missing %}"),
    ]);
    let theme = Theme::new("t", store.clone());

    let deps = theme.dependencies(&OperationContext::new(), "child").unwrap();
    assert_eq!(deps.get("child").unwrap().path(), "base");
    assert_eq!(deps.get("base").unwrap().path(), "base");

    assert_eq!(render(&theme, "child", json!({})).unwrap(), "\nSKELETON ");
}

#[test]
fn test_page_fills_layout_slots() {
    let theme = Theme::new(
        "t",
        memory_store(&[
            (
                "t",
                "layouts/main.html",
                "<title>{% include \"title\" %}</title>\n<body>{% include \"body\" %}</body>",
            ),
            ("t", "partials/footer.html", "<footer>{{ company }}</footer>"),
            (
                "t",
                "about.html",
                "<!-- layouts/main.html -->\n\
                 {% define \"title\" %}About {{ company }}{% enddefine %}\n\
                 {% define \"body\" %}{% for name in team %}<div>{{ name }}</div>{% endfor %}{% include \"partials/footer.html\" %}{% enddefine %}",
            ),
        ]),
    );

    let out = render(&theme, "about.html", json!({"company": "ACME", "team": ["Ann", "Bo"]})).unwrap();
    assert_eq!(
        out,
        "<title>About ACME</title>\n<body><div>Ann</div><div>Bo</div><footer>ACME</footer></body>"
    );
}

#[test]
fn test_repeated_write_is_cache_hit() {
    let store = counting(&[
        ("t", "page", "<!-- layout -->\n{% define \"body\" %}{{ n }}{% enddefine %}"),
        ("t", "layout", "<{% include \"body\" %}>"),
    ]);
    let theme = Theme::new("t", store.clone());

    let first = render(&theme, "page", json!({"n": 7})).unwrap();
    let calls_after_first = store.calls();
    let second = render(&theme, "page", json!({"n": 7})).unwrap();

    assert_eq!(first, "<7>");
    assert_eq!(first, second);
    assert_eq!(store.calls(), calls_after_first);
}

#[test]
fn test_debug_mode_reloads_templates() {
    let memory = memory_store(&[("t", "home", "v1")]);
    let store = Arc::new(CountingStore::new(memory.clone()));
    let theme = Theme::new("t", store.clone());
    theme.set_debug(true);

    assert_eq!(render(&theme, "home", json!({})).unwrap(), "v1");
    memory.add("t", "home", "v2");
    assert_eq!(render(&theme, "home", json!({})).unwrap(), "v2");
    assert_eq!(store.calls_for("t", "home"), 2);
}

#[test]
fn test_cached_unit_survives_store_edits_until_clear() {
    let memory = memory_store(&[("t", "home", "v1")]);
    let theme = Theme::new("t", memory.clone());

    assert_eq!(render(&theme, "home", json!({})).unwrap(), "v1");
    memory.add("t", "home", "v2");
    assert_eq!(render(&theme, "home", json!({})).unwrap(), "v1");

    theme.clear();
    assert_eq!(render(&theme, "home", json!({})).unwrap(), "v2");
}

#[test]
fn test_missing_template_names_theme() {
    let theme = Theme::new("site", memory_store(&[]));
    let err = render(&theme, "nope.html", json!({})).unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "template site/nope.html not found");
}

#[test]
fn test_missing_layout_fails_resolution() {
    let theme = Theme::new("t", memory_store(&[("t", "page", "<!-- layouts/gone -->\nx")]));
    let err = render(&theme, "page", json!({})).unwrap_err();

    assert!(err.is_not_found());
    assert!(err.to_string().contains("layouts/gone"));
    assert_eq!(theme.cached_len(), 0);
}

#[test]
fn test_missing_partial_fails_only_when_executed() {
    let theme = Theme::new(
        "t",
        memory_store(&[("t", "page", "{% if show %}{% include \"absent\" %}{% endif %}ok")]),
    );

    assert_eq!(render(&theme, "page", json!({"show": false})).unwrap(), "ok");
    let err = render(&theme, "page", json!({"show": true})).unwrap_err();
    assert!(matches!(err, ThemeError::Execute { .. }));
}

#[test]
fn test_parse_error_reports_fragment() {
    let theme = Theme::new(
        "t",
        memory_store(&[("t", "page", "{% include \"bad\" %}"), ("t", "bad", "{% for %}")]),
    );
    let err = render(&theme, "page", json!({})).unwrap_err();

    match err {
        ThemeError::Parse {
            template,
            ..
        } => assert_eq!(template, "bad"),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_execution_error_on_missing_field() {
    let theme = Theme::new("t", memory_store(&[("t", "page", "before {{ missing.field }} after")]));
    let err = render(&theme, "page", json!({})).unwrap_err();

    assert!(matches!(err, ThemeError::Execute { ref template, .. } if template == "page"));
}

#[test]
fn test_custom_and_builtin_functions() {
    let theme = Theme::new(
        "t",
        memory_store(&[(
            "t",
            "home",
            "{{ shout(text=name) }} {{ ternary(cond=vip, yes=\"VIP\", no=\"guest\") }}",
        )]),
    );

    let mut funcs: FuncMap = builtin_functions();
    funcs.insert(
        "shout".to_string(),
        function(|args: &HashMap<String, tera::Value>| -> tera::Result<tera::Value> {
            let text = args.get("text").and_then(tera::Value::as_str).unwrap_or_default();
            Ok(tera::Value::from(format!("{}!", text.to_uppercase())))
        }),
    );
    theme.set_func_map(funcs);

    assert_eq!(render(&theme, "home", json!({"name": "ann", "vip": true})).unwrap(), "ANN! VIP");
}

#[test]
fn test_reference_cycle_renders() {
    let theme = Theme::new(
        "t",
        memory_store(&[
            ("t", "a", "A{% if depth > 0 %}{% include \"b\" %}{% endif %}"),
            ("t", "b", "B{% if depth > 1 %}{% include \"a\" %}{% endif %}"),
        ]),
    );

    let deps = theme.dependencies(&OperationContext::new(), "a").unwrap();
    assert_eq!(deps.names().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(render(&theme, "a", json!({"depth": 1})).unwrap(), "AB");
}

#[test]
fn test_layout_cycle_is_reported() {
    let theme = Theme::new(
        "t",
        memory_store(&[("t", "a", "<!-- b -->\nA"), ("t", "b", "<!-- a -->\nB")]),
    );
    let err = render(&theme, "a", json!({})).unwrap_err();

    assert!(matches!(err, ThemeError::LayoutCycle { .. }));
}
