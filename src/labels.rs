use crate::config::types::LabelConfig;

/// Fully resolved display strings: every slot has a concrete value (either
/// a user override from `[labels]` or the English default).
///
/// Taiga installations rename things ("types" instead of "issue types",
/// translated UIs); keeping every user-visible string in one overridable
/// table mirrors that without shipping a translation layer.
#[derive(Debug, Clone)]
pub struct ResolvedLabels {
    // Filter dimensions (6)
    pub project: String,
    pub status: String,
    pub assignee: String,
    pub priority: String,
    pub severity: String,
    pub issue_type: String,
    // Filter bar
    pub multiple: String,
    pub add_filter: String,
    pub exclude_marker: String,
    // Table
    pub col_subject: String,
    pub col_project: String,
    pub col_status: String,
    pub col_priority_severity: String,
    pub col_type: String,
    pub col_assignee: String,
    pub col_modified: String,
    pub unassigned: String,
    pub placeholder: String,
    pub no_issues: String,
    pub loading: String,
}

impl ResolvedLabels {
    fn english() -> Self {
        Self {
            project: "Project".to_owned(),
            status: "Status".to_owned(),
            assignee: "Assignee".to_owned(),
            priority: "Priority".to_owned(),
            severity: "Severity".to_owned(),
            issue_type: "Type".to_owned(),
            multiple: "Multiple".to_owned(),
            add_filter: "+ Filter".to_owned(),
            exclude_marker: "not".to_owned(),
            col_subject: "Subject".to_owned(),
            col_project: "Project".to_owned(),
            col_status: "Status".to_owned(),
            col_priority_severity: "Prio/Sev".to_owned(),
            col_type: "Type".to_owned(),
            col_assignee: "Assignee".to_owned(),
            col_modified: "Updated".to_owned(),
            unassigned: "Unassigned".to_owned(),
            placeholder: "\u{2014}".to_owned(), // —
            no_issues: "No issues found".to_owned(),
            loading: "Loading\u{2026}".to_owned(),
        }
    }

    /// Apply per-label user overrides on top of the defaults.
    pub fn resolve(config: &LabelConfig) -> Self {
        let mut labels = Self::english();

        let apply = |target: &mut String, value: &Option<String>| {
            if let Some(v) = value {
                target.clone_from(v);
            }
        };

        apply(&mut labels.project, &config.project);
        apply(&mut labels.status, &config.status);
        apply(&mut labels.assignee, &config.assignee);
        apply(&mut labels.priority, &config.priority);
        apply(&mut labels.severity, &config.severity);
        apply(&mut labels.issue_type, &config.issue_type);
        apply(&mut labels.multiple, &config.multiple);
        apply(&mut labels.add_filter, &config.add_filter);
        apply(&mut labels.exclude_marker, &config.exclude_marker);
        apply(&mut labels.col_subject, &config.col_subject);
        apply(&mut labels.col_project, &config.col_project);
        apply(&mut labels.col_status, &config.col_status);
        apply(
            &mut labels.col_priority_severity,
            &config.col_priority_severity,
        );
        apply(&mut labels.col_type, &config.col_type);
        apply(&mut labels.col_assignee, &config.col_assignee);
        apply(&mut labels.col_modified, &config.col_modified);
        apply(&mut labels.unassigned, &config.unassigned);
        apply(&mut labels.placeholder, &config.placeholder);
        apply(&mut labels.no_issues, &config.no_issues);
        apply(&mut labels.loading, &config.loading);

        labels
    }
}

impl Default for ResolvedLabels {
    fn default() -> Self {
        Self::english()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_overrides() {
        let labels = ResolvedLabels::resolve(&LabelConfig::default());
        assert_eq!(labels.multiple, "Multiple");
        assert_eq!(labels.placeholder, "\u{2014}");
    }

    #[test]
    fn override_replaces_single_slot() {
        let config = LabelConfig {
            multiple: Some("Mehrere".to_owned()),
            ..LabelConfig::default()
        };
        let labels = ResolvedLabels::resolve(&config);
        assert_eq!(labels.multiple, "Mehrere");
        assert_eq!(labels.priority, "Priority");
    }
}
