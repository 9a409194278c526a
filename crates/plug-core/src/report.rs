//! Run report

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Outcome of a run that did not abort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Plugin root the run worked in
    pub root: PathBuf,
    /// Plugins fetched into a staging directory
    pub installed: Vec<String>,
    /// Plugins whose fetcher mode is unsupported
    pub skipped: Vec<String>,
    /// Local plugins copied into the bundle staging directory
    pub imported: Vec<String>,
    /// Destinations promoted to their live path
    pub swapped: Vec<String>,
    /// Recoverable problems, one line each
    pub warnings: Vec<String>,
    /// Intended actions of a dry run
    pub actions: Vec<String>,
    pub dry_run: bool,
}

impl RunReport {
    pub fn new(root: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            root: root.into(),
            dry_run,
            ..Self::default()
        }
    }

    /// Record an action; dry runs prefix it with "[dry-run] Would".
    pub fn push_action(&mut self, action: String) {
        if self.dry_run {
            self.actions.push(format!("[dry-run] Would {action}"));
        } else {
            self.actions.push(action);
        }
    }

    /// Whether the run finished without warnings.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.skipped.is_empty()
    }

    /// One-line summary for the terminal.
    pub fn summary(&self) -> String {
        if self.dry_run {
            return format!(
                "{} planned actions for {}",
                self.actions.len(),
                self.root.display()
            );
        }
        format!(
            "{} plugins installed, {} local plugins imported, {} destinations swapped, {} skipped, {} warnings",
            self.installed.len(),
            self.imported.len(),
            self.swapped.len(),
            self.skipped.len(),
            self.warnings.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dry_run_actions_are_prefixed() {
        let mut report = RunReport::new("/vim", true);
        report.push_action("stage bundle".to_string());

        assert_eq!(report.actions, vec!["[dry-run] Would stage bundle"]);
        assert_eq!(report.summary(), "1 planned actions for /vim");
    }

    #[test]
    fn test_summary_counts() {
        let mut report = RunReport::new("/vim", false);
        report.installed.push("taglist".into());
        report.swapped.push("bundle".into());
        report.warnings.push("x is not valid zip file!".into());

        assert!(!report.is_clean());
        assert_eq!(
            report.summary(),
            "1 plugins installed, 0 local plugins imported, 1 destinations swapped, 0 skipped, 1 warnings"
        );
    }

    #[test]
    fn test_report_serializes() {
        let report = RunReport::new("/vim", false);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["root"], "/vim");
        assert_eq!(json["dry_run"], false);
    }
}
