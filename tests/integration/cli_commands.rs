use predicates::prelude::*;

use crate::helpers::ThemeDir;

fn site() -> ThemeDir {
    let dir = ThemeDir::new();
    dir.template("base", "layout.html", "<html>{% include \"body\" ignore missing %}</html>")
        .template("base", "partials/nav.html", "<nav>{{ site }}</nav>")
        .template(
            "blog",
            "post.html",
            "<!-- layout.html -->\n{% define \"body\" %}{% include \"partials/nav.html\" %}<h1>{{ title }}</h1>{% enddefine %}",
        );
    dir.file("themekit.toml", "[[theme]]\nname = \"base\"\n\n[[theme]]\nname = \"blog\"\nparent = \"base\"\n");
    dir.file("post.json", r#"{"site": "Notes", "title": "First"}"#);
    dir
}

#[test]
fn test_render_uses_config_in_working_directory() {
    let dir = site();

    dir.themekit()
        .args(["render", "post.html", "--root", ".", "--theme", "blog", "--data", "post.json"])
        .assert()
        .success()
        .stdout("<html><nav>Notes</nav><h1>First</h1></html>");
}

#[test]
fn test_render_data_from_stdin() {
    let dir = site();

    dir.themekit()
        .args(["render", "post.html", "-r", ".", "-t", "blog", "-d", "-"])
        .write_stdin(r#"{"site": "S", "title": "T"}"#)
        .assert()
        .success()
        .stdout("<html><nav>S</nav><h1>T</h1></html>");
}

#[test]
fn test_config_from_environment() {
    let dir = site();
    let config = dir.file("elsewhere/themes.toml", "[[theme]]\nname = \"base\"\n[[theme]]\nname = \"blog\"\nparent = \"base\"\n");
    std::fs::remove_file(dir.path().join("themekit.toml")).unwrap();

    dir.themekit()
        .env("THEMEKIT_CONFIG", &config)
        .args(["deps", "post.html", "--root", ".", "--theme", "blog"])
        .assert()
        .success()
        .stdout(predicate::str::contains("layout.html -> layout.html (base)"));
}

#[test]
fn test_deps_lists_sources() {
    let dir = site();

    dir.themekit()
        .args(["deps", "post.html", "--root", ".", "--theme", "blog"])
        .assert()
        .success()
        .stdout(
            "layout.html -> layout.html (base)\n\
             partials/nav.html -> partials/nav.html (base)\n\
             post.html -> layout.html (blog)\n",
        );
}

#[test]
fn test_list() {
    let dir = site();

    dir.themekit()
        .args(["list", "--root", ".", "--theme", "blog"])
        .assert()
        .success()
        .stdout("layout.html\npartials/nav.html\npost.html\n");
}

#[test]
fn test_missing_template_suggests_names() {
    let dir = site();

    dir.themekit()
        .args(["render", "post.htm", "--root", ".", "--theme", "blog"])
        .assert()
        .failure()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("template blog/post.htm not found"))
        .stderr(predicate::str::contains("post.html"));
}

#[test]
fn test_without_config_single_theme() {
    let dir = ThemeDir::new();
    dir.template("default", "hello.txt", "hello {{ who | default(value=\"world\") }}");

    dir.themekit()
        .args(["render", "hello.txt", "--root", "."])
        .assert()
        .success()
        .stdout("hello world");
}

#[test]
fn test_execution_error_exit_code() {
    let dir = site();

    dir.themekit()
        .args(["render", "post.html", "--root", ".", "--theme", "blog"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to execute template 'post.html'"));
}

#[test]
fn test_unknown_theme_in_config() {
    let dir = site();

    dir.themekit()
        .args(["list", "--root", ".", "--theme", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Theme 'nope' is not configured"));
}
