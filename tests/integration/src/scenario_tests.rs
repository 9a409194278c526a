//! Scenario tests
//!
//! Each test writes a plugin list to disk, loads it the way the binary does
//! and runs the coordinator against a sandboxed plugin root. Downloads go
//! through `file://` URLs so no network is needed.

use plug_core::{Coordinator, LocalSource, RunOptions, RunReport};
use plug_meta::load_config;
use plug_test_utils::TestRoot;
use pretty_assertions::assert_eq;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn run(sandbox: &TestRoot) -> plug_core::Result<RunReport> {
    run_with(sandbox, RunOptions::default())
}

fn run_with(sandbox: &TestRoot, options: RunOptions) -> plug_core::Result<RunReport> {
    let config = load_config(&sandbox.sources().join("plugins.toml")).unwrap();
    let options = RunOptions {
        root: Some(sandbox.plugin_root()),
        local: Some(LocalSource::new(sandbox.sources().join("local"))),
        ..options
    };
    Coordinator::with_http(None).unwrap().run(&config, &options)
}

/// A plugin list with a zip in `bundle`, a plain file in `bundle` and a
/// flattened zip in `colors`.
fn write_standard_config(sandbox: &TestRoot) {
    let taglist = sandbox.zip_source(
        "vim.org/7701",
        &[
            ("plugin/taglist.vim", "\" taglist v2"),
            ("doc/taglist.txt", "*taglist.txt*"),
        ],
    );
    let base = taglist.trim_end_matches("/7701").to_string();
    sandbox.write_source("vim.org/9999", "\" matchit");
    sandbox.zip_source("vim.org/1234", &[("colors/", ""), ("colors/desert256.vim", "\" desert")]);

    sandbox.write_config(&format!(
        r#"
new_dir_pfx = "-new"
old_dir_pfx = "-old"

[[plugins]]
name = "taglist"
type = "archive"
ext = "zip"
dest = "bundle"
get_type = "vim.org"
url = "7701"
extract = ""

[[plugins]]
name = "matchit"
type = "plugin"
ext = "vim"
dest = "bundle"
get_type = "vim.org"
url = "9999"

[[plugins]]
name = "desert256"
ext = "zip"
dest = "colors-pack"
get_type = "vim.org"
url = "1234"
extract = ""
no_sub_dirs = true

[[gets]]
type = "vim.org"
url = "{base}/{{0}}"
"#
    ));
}

// =============================================================================
// Full runs
// =============================================================================

#[test]
fn test_run_populates_every_destination() {
    let sandbox = TestRoot::new();
    write_standard_config(&sandbox);

    let report = run(&sandbox).unwrap();

    assert_eq!(report.installed, vec!["taglist", "matchit", "desert256"]);
    assert_eq!(report.swapped, vec!["bundle", "colors-pack"]);
    sandbox.assert_file_contains("bundle/taglist/plugin/taglist.vim", "taglist v2");
    sandbox.assert_exists("bundle/taglist/doc/taglist.txt");
    sandbox.assert_exists("bundle/taglist/archive/taglist.zip");
    sandbox.assert_file_contains("bundle/matchit/plugin/matchit.vim", "matchit");
    sandbox.assert_exists("colors-pack/colors/desert256.vim");
    sandbox.assert_exists("colors-pack/desert256.zip");
    sandbox.assert_no_transaction_dirs();
}

#[test]
fn test_second_run_succeeds_again() {
    let sandbox = TestRoot::new();
    write_standard_config(&sandbox);

    run(&sandbox).unwrap();
    let second = run(&sandbox).unwrap();

    assert_eq!(second.swapped, vec!["bundle", "colors-pack"]);
    sandbox.assert_no_transaction_dirs();
}

#[test]
fn test_swap_leaves_only_new_content() {
    let sandbox = TestRoot::new();
    write_standard_config(&sandbox);
    sandbox.write_installed("bundle/removed-plugin/plugin/removed.vim", "gone");
    sandbox.write_installed("bundle/taglist/plugin/taglist.vim", "\" taglist v1");
    sandbox.write_installed("bundle-old/ancient.vim", "older");

    run(&sandbox).unwrap();

    sandbox.assert_not_exists("bundle/removed-plugin");
    sandbox.assert_file_contains("bundle/taglist/plugin/taglist.vim", "taglist v2");
    sandbox.assert_not_exists("bundle-old");
}

#[test]
fn test_untouched_destinations_survive() {
    let sandbox = TestRoot::new();
    write_standard_config(&sandbox);
    sandbox.write_installed("autoload/pathogen.vim", "\" pathogen");

    run(&sandbox).unwrap();

    sandbox.assert_file_contains("autoload/pathogen.vim", "pathogen");
}

#[test]
fn test_local_plugins_are_swapped_in() {
    let sandbox = TestRoot::new();
    write_standard_config(&sandbox);
    sandbox.write_source("local/my-settings/plugin/settings.vim", "set nu");

    let report = run(&sandbox).unwrap();

    assert_eq!(report.imported, vec!["my-settings"]);
    sandbox.assert_file_contains("bundle/my-settings/plugin/settings.vim", "set nu");
    sandbox.assert_exists("bundle/taglist");
}

// =============================================================================
// Fatal errors
// =============================================================================

#[test]
fn test_leftover_staging_dir_stops_the_run() {
    let sandbox = TestRoot::new();
    write_standard_config(&sandbox);
    sandbox.write_installed("bundle/live.vim", "live");
    sandbox.write_installed("colors-pack-new/partial.vim", "partial");

    let error = run(&sandbox).unwrap_err();

    assert_eq!(error.exit_code(), 2);
    sandbox.assert_file_contains("bundle/live.vim", "live");
    sandbox.assert_not_exists("colors-pack");
}

#[test]
fn test_unknown_fetch_type_creates_nothing() {
    let sandbox = TestRoot::new();
    sandbox.write_config(
        r#"
[[plugins]]
name = "known"
dest = "bundle"
get_type = "http"
url = "1"

[[plugins]]
name = "unknown"
dest = "other"
get_type = "hg"
url = "https://example.com/unknown"

[[gets]]
type = "http"
url = "https://example.com/{0}"
"#,
    );

    let error = run(&sandbox).unwrap_err();

    assert_eq!(error.exit_code(), 3);
    assert!(sandbox.root_entries().is_empty());
}

#[test]
fn test_unparseable_command_name_spawns_nothing() {
    let sandbox = TestRoot::new();
    let marker = sandbox.sources().join("spawned");
    sandbox.write_config(&format!(
        r#"
[[plugins]]
name = "broken"
dest = "bundle"
get_type = "git"
url = "https://example.com/repo/"

[[gets]]
type = "git"
run = "touch {}"
"#,
        marker.display()
    ));

    let error = run(&sandbox).unwrap_err();

    assert_eq!(error.exit_code(), 4);
    assert!(!marker.exists());
    assert!(sandbox.root_entries().is_empty());
}

#[test]
fn test_download_failure_keeps_live_dirs() {
    let sandbox = TestRoot::new();
    write_standard_config(&sandbox);
    std::fs::remove_file(sandbox.sources().join("vim.org/1234")).unwrap();
    sandbox.write_installed("colors-pack/old.vim", "old");

    let error = run(&sandbox).unwrap_err();

    assert_eq!(error.exit_code(), 5);
    sandbox.assert_file_contains("colors-pack/old.vim", "old");
    sandbox.assert_exists("colors-pack-new");
}

#[cfg(unix)]
#[test]
fn test_failing_command_keeps_live_dirs() {
    let sandbox = TestRoot::new();
    sandbox.write_installed("bundle/live.vim", "live");
    sandbox.write_config(
        r#"
[[plugins]]
name = "fugitive"
dest = "bundle"
get_type = "git"
url = "https://example.com/vim-fugitive.git"

[[gets]]
type = "git"
run = "false {0} {1}"
"#,
    );

    let error = run(&sandbox).unwrap_err();

    assert_eq!(error.exit_code(), 5);
    sandbox.assert_file_contains("bundle/live.vim", "live");
}

// =============================================================================
// Recoverable problems
// =============================================================================

#[test]
fn test_hostile_archive_is_refused() {
    let sandbox = TestRoot::new();
    let url = sandbox.zip_source(
        "evil.zip",
        &[("plugin/fine.vim", "ok"), ("../../../escaped.vim", "gotcha")],
    );
    sandbox.write_config(&format!(
        r#"
[[plugins]]
name = "evil"
type = "archive"
ext = "zip"
dest = "bundle"
get_type = "direct"
url = "{url}"
extract = ""

[[gets]]
type = "direct"
url = "{{0}}"
"#
    ));

    let report = run(&sandbox).unwrap();

    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("../../../escaped.vim"));
    sandbox.assert_not_exists("bundle/evil/plugin/fine.vim");
    sandbox.assert_exists("bundle/evil/archive/evil.zip");
    assert!(!sandbox.plugin_root().join("../escaped.vim").exists());
    assert!(!sandbox.sources().join("escaped.vim").exists());
}

#[test]
fn test_not_a_zip_is_a_warning() {
    let sandbox = TestRoot::new();
    sandbox.write_source("page.html", "<html>404</html>");
    let url = plug_test_utils::file_url(&sandbox.sources().join("page.html"));
    sandbox.write_config(&format!(
        r#"
[[plugins]]
name = "moved"
type = "archive"
ext = "zip"
dest = "bundle"
get_type = "direct"
url = "{url}"
extract = ""

[[gets]]
type = "direct"
url = "{{0}}"
"#
    ));

    let report = run(&sandbox).unwrap();

    assert!(report.warnings[0].ends_with("is not valid zip file!"));
    sandbox.assert_exists("bundle/moved/archive/moved.zip");
    sandbox.assert_no_transaction_dirs();
}
