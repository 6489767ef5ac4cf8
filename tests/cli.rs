//! End-to-end tests that drive the built binary.
//!
//! Each test gets its own temp directory for config and output, and reads
//! the JSON:API fixture under `fixtures/` (25 items, one without a body).
//!
//! Run with: cargo test --test cli

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/articles.json")
}

fn pager(config_dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_decoupled-pager"));
    cmd.arg("--config").arg(config_dir);
    cmd.env_remove("RUST_LOG");
    cmd
}

fn stdout(out: &Output) -> String {
    assert!(
        out.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).into_owned()
}

/// Write a flat dataset of `n` titled items and return its path.
fn flat_dataset(dir: &Path, n: usize) -> PathBuf {
    let items: Vec<serde_json::Value> = (1..=n)
        .map(|i| serde_json::json!({ "id": i.to_string(), "title": format!("Entry {i}") }))
        .collect();
    let path = dir.join("items.json");
    fs::write(&path, serde_json::to_string(&items).unwrap()).unwrap();
    path
}

#[test]
fn gen_config_prints_stock_file() {
    let tmp = TempDir::new().unwrap();
    let out = pager(tmp.path()).arg("gen-config").output().unwrap();
    let text = stdout(&out);
    assert!(text.contains("[pagination]"));
    assert!(text.contains("items_per_page = 10"));
}

#[test]
fn check_reports_dataset() {
    let tmp = TempDir::new().unwrap();
    let out = pager(tmp.path())
        .args(["check", "--data"])
        .arg(fixture())
        .output()
        .unwrap();
    let text = stdout(&out);
    assert!(text.contains("    Items: 25"));
    assert!(text.contains("    Pages: 3"));
    assert!(text.contains("    Without body: 1"));
    assert!(text.contains("==> Dataset is valid"));
}

#[test]
fn check_rejects_missing_file() {
    let tmp = TempDir::new().unwrap();
    let out = pager(tmp.path())
        .args(["check", "--data"])
        .arg(tmp.path().join("missing.json"))
        .output()
        .unwrap();
    assert!(!out.status.success());
}

#[test]
fn generate_writes_every_page() {
    let tmp = TempDir::new().unwrap();
    let dist = tmp.path().join("dist");
    let out = pager(tmp.path())
        .args(["generate", "--data"])
        .arg(fixture())
        .arg("--output")
        .arg(&dist)
        .output()
        .unwrap();
    let text = stdout(&out);
    assert!(text.contains("Generated 3 pages for 25 items at /examples/pagination"));

    let route = dist.join("examples/pagination");
    assert!(route.join("index.html").exists());
    for page in 1..=3 {
        assert!(route.join(format!("{page}/index.html")).exists());
    }
    assert!(!route.join("4/index.html").exists());

    let last = fs::read_to_string(route.join("3/index.html")).unwrap();
    assert!(last.contains("Page 3/3"));
    assert!(last.contains("Article 21"));
}

#[test]
fn generate_uses_configured_route() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        "[site]\nroute = \"/recipes/[...page]\"\n\n[pagination]\nitems_per_page = 20\n",
    )
    .unwrap();
    let dist = tmp.path().join("dist");
    let out = pager(tmp.path())
        .args(["generate", "--data"])
        .arg(fixture())
        .arg("--output")
        .arg(&dist)
        .output()
        .unwrap();
    stdout(&out);
    assert!(dist.join("recipes/2/index.html").exists());
    assert!(!dist.join("recipes/3/index.html").exists());
}

#[test]
fn show_starts_on_requested_page() {
    let tmp = TempDir::new().unwrap();
    let out = pager(tmp.path())
        .args(["show", "--page", "2", "--data"])
        .arg(fixture())
        .output()
        .unwrap();
    let text = stdout(&out);
    assert!(text.starts_with("Page 2/3\n"));
    assert!(text.contains("011 Page 11\n"));
    assert!(text.contains("< 1 [2] 3 >"));
    // no navigation yet
    assert!(!text.contains("URL:"));
}

#[test]
fn show_clamps_out_of_range_page() {
    let tmp = TempDir::new().unwrap();
    let out = pager(tmp.path())
        .args(["show", "--page", "99", "--data"])
        .arg(fixture())
        .output()
        .unwrap();
    assert!(stdout(&out).starts_with("Page 3/3\n"));
}

#[test]
fn show_replays_events_and_routes() {
    let tmp = TempDir::new().unwrap();
    let out = pager(tmp.path())
        .args(["show", "--events", "next,next,next,back", "--data"])
        .arg(fixture())
        .output()
        .unwrap();
    let text = stdout(&out);
    assert!(text.contains("page 1 \u{2192} 2\npage 2 \u{2192} 3\npage 3 \u{2192} 2\n"));
    assert!(text.contains("Page 2/3"));
    assert!(text.contains("URL: /examples/pagination/2"));
}

#[test]
fn show_without_routing_has_no_url() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("config.toml"),
        "[pagination]\nitems_per_page = 5\nrouting = false\n",
    )
    .unwrap();
    let out = pager(tmp.path())
        .args(["show", "--page", "4", "--events", "next", "--data"])
        .arg(fixture())
        .output()
        .unwrap();
    let text = stdout(&out);
    assert!(text.contains("page 4 \u{2192} 5"));
    assert!(text.contains("Page 5/5"));
    assert!(!text.contains("URL:"));
}

#[test]
fn show_expander_on_long_listing() {
    let tmp = TempDir::new().unwrap();
    let data = flat_dataset(tmp.path(), 200);

    let out = pager(tmp.path())
        .arg("show")
        .arg("--data")
        .arg(&data)
        .output()
        .unwrap();
    let text = stdout(&out);
    assert!(text.contains("(<) [1] 2 3 4 5 6 \u{2026} 12 13 14 15 16 17 18 19 20 >"));

    let out = pager(tmp.path())
        .args(["show", "--events", "expand", "--data"])
        .arg(&data)
        .output()
        .unwrap();
    let text = stdout(&out);
    assert!(text.contains("expanded, pages through 12 shown"));
    assert!(text.contains("(<) [1] 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 >"));
}

#[test]
fn show_narrow_viewport_lists_every_page() {
    let tmp = TempDir::new().unwrap();
    let data = flat_dataset(tmp.path(), 200);
    let out = pager(tmp.path())
        .args(["show", "--width", "500", "--data"])
        .arg(&data)
        .output()
        .unwrap();
    let text = stdout(&out);
    assert!(text.contains("(<) [1] 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 >"));
    assert!(!text.contains('\u{2026}'));
}

#[test]
fn show_rejects_unknown_event() {
    let tmp = TempDir::new().unwrap();
    let out = pager(tmp.path())
        .args(["show", "--events", "sideways", "--data"])
        .arg(fixture())
        .output()
        .unwrap();
    assert!(!out.status.success());
}

#[test]
fn preview_grants_known_slug() {
    let tmp = TempDir::new().unwrap();
    let out = pager(tmp.path())
        .env("PREVIEW_SECRET", "s3cret")
        .args([
            "preview",
            "--slug",
            "/articles/article-3",
            "--secret",
            "s3cret",
            "--resource-version-id",
            "id:42",
            "--data",
        ])
        .arg(fixture())
        .output()
        .unwrap();
    let text = stdout(&out);
    assert!(text.contains("Preview enabled for node--article 0003-article"));
    assert!(text.contains(r#"Data: {"resourceVersionId":"id:42"}"#));
    assert!(text.contains("Redirect: /articles/article-3"));
}

#[test]
fn preview_rejects_wrong_secret() {
    let tmp = TempDir::new().unwrap();
    let out = pager(tmp.path())
        .env("PREVIEW_SECRET", "s3cret")
        .args([
            "preview",
            "--slug",
            "/articles/article-3",
            "--secret",
            "guess",
            "--data",
        ])
        .arg(fixture())
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("InvalidToken"));
}

#[test]
fn preview_disabled_without_server_secret() {
    let tmp = TempDir::new().unwrap();
    let out = pager(tmp.path())
        .env_remove("PREVIEW_SECRET")
        .args(["preview", "--slug", "/articles/article-3", "--secret", "", "--data"])
        .arg(fixture())
        .output()
        .unwrap();
    assert!(!out.status.success());
}
