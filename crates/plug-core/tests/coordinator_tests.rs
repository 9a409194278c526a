//! Coordinator tests over a sandboxed plugin root

use plug_core::{Coordinator, LocalSource, RunOptions};
use plug_meta::{FetchMode, FetcherSpec, PluginSpec, RunConfig};
use plug_test_utils::TestRoot;
use pretty_assertions::assert_eq;
use std::fs;

fn coordinator() -> Coordinator {
    Coordinator::with_http(None).unwrap()
}

fn options(sandbox: &TestRoot) -> RunOptions {
    RunOptions {
        root: Some(sandbox.plugin_root()),
        ..RunOptions::default()
    }
}

/// Plugin fetched verbatim from `url` (the fetch template is just `{0}`).
fn zip_plugin(name: &str, destination: &str, url: String) -> PluginSpec {
    let mut plugin = PluginSpec::new(name, destination, "direct", url);
    plugin.kind = Some("archive".into());
    plugin.ext = Some("zip".into());
    plugin.extract = Some(String::new());
    plugin
}

fn sample_config(sandbox: &TestRoot) -> RunConfig {
    let taglist = sandbox.zip_source(
        "taglist.zip",
        &[("plugin/taglist.vim", "\" taglist"), ("doc/taglist.txt", "doc")],
    );
    let desert = sandbox.zip_source("desert.zip", &[("desert256.vim", "\" colors")]);
    let mut colors = zip_plugin("desert", "colors", desert);
    colors.no_sub_dirs = true;

    RunConfig {
        plugins: vec![zip_plugin("taglist", "bundle", taglist), colors],
        fetchers: vec![FetcherSpec::download("direct", "{0}")],
        ..RunConfig::default()
    }
}

#[test]
fn test_full_run_populates_destinations() {
    let sandbox = TestRoot::new();
    let config = sample_config(&sandbox);

    let report = coordinator().run(&config, &options(&sandbox)).unwrap();

    assert_eq!(report.installed, vec!["taglist", "desert"]);
    assert_eq!(report.swapped, vec!["bundle", "colors"]);
    assert!(report.is_clean());
    sandbox.assert_file_contains("bundle/taglist/plugin/taglist.vim", "taglist");
    sandbox.assert_exists("colors/desert256.vim");
    sandbox.assert_no_transaction_dirs();
    assert_eq!(sandbox.root_entries(), vec!["bundle", "colors"]);
}

#[test]
fn test_second_run_restages() {
    let sandbox = TestRoot::new();
    let config = sample_config(&sandbox);

    coordinator().run(&config, &options(&sandbox)).unwrap();
    let report = coordinator().run(&config, &options(&sandbox)).unwrap();

    assert_eq!(report.swapped, vec!["bundle", "colors"]);
    sandbox.assert_exists("bundle/taglist/plugin/taglist.vim");
    sandbox.assert_no_transaction_dirs();
}

#[test]
fn test_swap_replaces_live_content() {
    let sandbox = TestRoot::new();
    sandbox.write_installed("bundle/obsolete/plugin/obsolete.vim", "old");
    let config = sample_config(&sandbox);

    coordinator().run(&config, &options(&sandbox)).unwrap();

    sandbox.assert_not_exists("bundle/obsolete");
    sandbox.assert_exists("bundle/taglist");
    sandbox.assert_not_exists("bundle-old");
}

#[test]
fn test_keep_old_preserves_backup() {
    let sandbox = TestRoot::new();
    sandbox.write_installed("bundle/obsolete/obsolete.vim", "old");
    let config = sample_config(&sandbox);
    let options = RunOptions {
        keep_old: true,
        ..options(&sandbox)
    };

    coordinator().run(&config, &options).unwrap();

    sandbox.assert_exists("bundle-old/obsolete/obsolete.vim");
    sandbox.assert_not_exists("bundle/obsolete");
}

#[test]
fn test_shared_destination_has_one_staging_dir() {
    let sandbox = TestRoot::new();
    let a = sandbox.zip_source("a.zip", &[("plugin/a.vim", "a")]);
    let b = sandbox.zip_source("b.zip", &[("plugin/b.vim", "b")]);
    let config = RunConfig {
        plugins: vec![zip_plugin("a", "bundle", a), zip_plugin("b", "bundle", b)],
        fetchers: vec![FetcherSpec::download("direct", "{0}")],
        ..RunConfig::default()
    };

    let report = coordinator().run(&config, &options(&sandbox)).unwrap();

    assert_eq!(report.swapped, vec!["bundle"]);
    sandbox.assert_exists("bundle/a/plugin/a.vim");
    sandbox.assert_exists("bundle/b/plugin/b.vim");
}

#[test]
fn test_leftover_staging_dir_is_a_conflict() {
    let sandbox = TestRoot::new();
    sandbox.write_installed("bundle/keep.vim", "live");
    sandbox.write_installed("bundle-new/partial.vim", "partial");
    let config = sample_config(&sandbox);

    let error = coordinator().run(&config, &options(&sandbox)).unwrap_err();

    assert_eq!(error.exit_code(), 2);
    sandbox.assert_file_contains("bundle/keep.vim", "live");
    sandbox.assert_exists("bundle-new/partial.vim");
}

#[test]
fn test_unknown_type_creates_nothing() {
    let sandbox = TestRoot::new();
    let mut config = sample_config(&sandbox);
    config
        .plugins
        .push(PluginSpec::new("vcs", "bundle", "svn", "https://x/vcs"));

    let error = coordinator().run(&config, &options(&sandbox)).unwrap_err();

    assert_eq!(error.exit_code(), 3);
    assert_eq!(sandbox.root_entries(), Vec::<String>::new());
}

#[test]
fn test_unparseable_name_creates_nothing() {
    let sandbox = TestRoot::new();
    let marker = sandbox.sources().join("spawned");
    let config = RunConfig {
        plugins: vec![PluginSpec::new("bad", "bundle", "git", "https://x/repo/")],
        fetchers: vec![FetcherSpec::command(
            "git",
            format!("touch {}", marker.display()),
        )],
        ..RunConfig::default()
    };

    let error = coordinator().run(&config, &options(&sandbox)).unwrap_err();

    assert_eq!(error.exit_code(), 4);
    assert!(!marker.exists());
    assert_eq!(sandbox.root_entries(), Vec::<String>::new());
}

#[test]
fn test_unsupported_mode_is_skipped() {
    let sandbox = TestRoot::new();
    let mut config = sample_config(&sandbox);
    config.plugins.push(PluginSpec::new("legacy", "bundle", "legacy", "x"));
    config.fetchers.push(FetcherSpec {
        fetch_type: "legacy".into(),
        mode: FetchMode::Unsupported,
        remove_dir: None,
    });

    let report = coordinator().run(&config, &options(&sandbox)).unwrap();

    assert_eq!(report.skipped, vec!["legacy"]);
    assert_eq!(report.warnings, vec!["Unknown getter type: legacy"]);
    sandbox.assert_exists("bundle/taglist");
    sandbox.assert_not_exists("bundle/legacy");
}

#[test]
fn test_local_plugins_join_bundle() {
    let sandbox = TestRoot::new();
    sandbox.write_source("local/mine/plugin/mine.vim", "\" mine");
    let config = sample_config(&sandbox);
    let options = RunOptions {
        local: Some(LocalSource::new(sandbox.sources().join("local"))),
        ..options(&sandbox)
    };

    let report = coordinator().run(&config, &options).unwrap();

    assert_eq!(report.imported, vec!["mine"]);
    sandbox.assert_exists("bundle/mine/plugin/mine.vim");
    sandbox.assert_exists("bundle/taglist");
}

#[test]
fn test_local_plugins_alone_stage_bundle() {
    let sandbox = TestRoot::new();
    sandbox.write_source("local/mine/plugin/mine.vim", "\" mine");
    let options = RunOptions {
        local: Some(LocalSource::new(sandbox.sources().join("local"))),
        ..options(&sandbox)
    };

    let report = coordinator().run(&RunConfig::default(), &options).unwrap();

    assert_eq!(report.swapped, vec!["bundle"]);
    sandbox.assert_exists("bundle/mine/plugin/mine.vim");
    sandbox.assert_no_transaction_dirs();
}

#[test]
fn test_dry_run_touches_nothing() {
    let sandbox = TestRoot::new();
    let config = sample_config(&sandbox);
    let options = RunOptions {
        dry_run: true,
        ..options(&sandbox)
    };

    let report = coordinator().run(&config, &options).unwrap();

    assert!(report.dry_run);
    assert!(report.actions.iter().all(|a| a.starts_with("[dry-run] Would ")));
    assert!(report.actions.iter().any(|a| a.contains("fetch taglist")));
    assert_eq!(sandbox.root_entries(), Vec::<String>::new());
}

#[test]
fn test_suffixes_are_configurable() {
    let sandbox = TestRoot::new();
    sandbox.write_installed("bundle.staged/left.vim", "left");
    let config = RunConfig {
        new_suffix: ".staged".into(),
        old_suffix: ".retired".into(),
        ..sample_config(&sandbox)
    };

    let error = coordinator().run(&config, &options(&sandbox)).unwrap_err();

    assert_eq!(error.exit_code(), 2);
    assert!(fs::read_dir(sandbox.plugin_root()).unwrap().count() == 1);
}

#[cfg(unix)]
#[test]
fn test_failing_command_leaves_live_dir() {
    let sandbox = TestRoot::new();
    sandbox.write_installed("bundle/keep.vim", "live");
    let config = RunConfig {
        plugins: vec![PluginSpec::new("p", "bundle", "git", "https://x/p.git")],
        fetchers: vec![FetcherSpec::command("git", "false {0} {1}")],
        ..RunConfig::default()
    };

    let error = coordinator().run(&config, &options(&sandbox)).unwrap_err();

    assert_eq!(error.exit_code(), 5);
    sandbox.assert_file_contains("bundle/keep.vim", "live");
    sandbox.assert_exists("bundle-new");
}

#[test]
fn test_nested_destination_is_staged_and_swapped() {
    let sandbox = TestRoot::new();
    sandbox.write_installed("after/plugin/stale.vim", "stale");
    sandbox.write_installed("after/ftplugin/kept.vim", "kept");
    let url = sandbox.zip_source("after.zip", &[("tweaks.vim", "\" tweaks")]);
    let mut plugin = zip_plugin("tweaks", "after/plugin", url);
    plugin.no_sub_dirs = true;
    let config = RunConfig {
        plugins: vec![plugin],
        fetchers: vec![FetcherSpec::download("direct", "{0}")],
        ..RunConfig::default()
    };

    let report = coordinator().run(&config, &options(&sandbox)).unwrap();

    assert_eq!(report.swapped, vec!["after/plugin"]);
    sandbox.assert_file_contains("after/plugin/tweaks.vim", "tweaks");
    sandbox.assert_not_exists("after/plugin/stale.vim");
    sandbox.assert_exists("after/ftplugin/kept.vim");
    sandbox.assert_not_exists("after/plugin-new");
    sandbox.assert_not_exists("after/plugin-old");
}

#[test]
fn test_traversing_name_never_leaves_staging() {
    let sandbox = TestRoot::new();
    let url = sandbox.zip_source("escaped.zip", &[("x.vim", "x")]);
    let mut plugin = PluginSpec::new("../escaped", "bundle", "direct", url);
    plugin.ext = Some("vim".into());
    plugin.no_sub_dirs = true;
    let config = RunConfig {
        plugins: vec![plugin],
        fetchers: vec![FetcherSpec::download("direct", "{0}")],
        ..RunConfig::default()
    };

    let error = coordinator().run(&config, &options(&sandbox)).unwrap_err();

    assert_eq!(error.exit_code(), 1);
    assert_eq!(sandbox.root_entries(), Vec::<String>::new());
    sandbox.assert_not_exists("escaped.vim");
}
