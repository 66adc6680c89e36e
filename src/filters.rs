use serde::{Deserialize, Serialize};

use crate::labels::ResolvedLabels;

// ---------------------------------------------------------------------------
// Filter dimensions
// ---------------------------------------------------------------------------

/// The six dimensions an issue list can be narrowed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Project,
    Status,
    Assignee,
    Priority,
    Severity,
    Type,
}

impl Dimension {
    /// All dimensions, in filter-bar display order.
    pub const ALL: [Dimension; 6] = [
        Dimension::Project,
        Dimension::Status,
        Dimension::Assignee,
        Dimension::Priority,
        Dimension::Severity,
        Dimension::Type,
    ];

    /// The user-facing chip/menu label for this dimension.
    pub fn label(self, labels: &ResolvedLabels) -> &str {
        match self {
            Self::Project => &labels.project,
            Self::Status => &labels.status,
            Self::Assignee => &labels.assignee,
            Self::Priority => &labels.priority,
            Self::Severity => &labels.severity,
            Self::Type => &labels.issue_type,
        }
    }
}

// ---------------------------------------------------------------------------
// Filter state
// ---------------------------------------------------------------------------

/// The canonical filter object.
///
/// Per dimension: an optional id-list (`None` = dimension inactive) and an
/// exclude flag (match issues NOT in the list instead of IN it).
///
/// Invariant: an inactive dimension never carries a true exclude flag —
/// [`Filters::apply`] and [`Filters::remove`] always clear both together.
/// The owner replaces the whole value on every change; nothing mutates a
/// `Filters` in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "is_false")]
    pub project_exclude: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "is_false")]
    pub status_exclude: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "is_false")]
    pub assignee_exclude: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "is_false")]
    pub priority_exclude: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "is_false")]
    pub severity_exclude: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "is_false")]
    pub type_exclude: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(b: &bool) -> bool {
    !*b
}

impl Filters {
    /// The id-list for a dimension, if present.
    pub fn ids(&self, dimension: Dimension) -> Option<&[i64]> {
        match dimension {
            Dimension::Project => self.project_ids.as_deref(),
            Dimension::Status => self.status_ids.as_deref(),
            Dimension::Assignee => self.assignee_ids.as_deref(),
            Dimension::Priority => self.priority_ids.as_deref(),
            Dimension::Severity => self.severity_ids.as_deref(),
            Dimension::Type => self.type_ids.as_deref(),
        }
    }

    /// The exclude flag for a dimension.
    pub fn exclude(&self, dimension: Dimension) -> bool {
        match dimension {
            Dimension::Project => self.project_exclude,
            Dimension::Status => self.status_exclude,
            Dimension::Assignee => self.assignee_exclude,
            Dimension::Priority => self.priority_exclude,
            Dimension::Severity => self.severity_exclude,
            Dimension::Type => self.type_exclude,
        }
    }

    /// A dimension is active iff its id-list is present and non-empty.
    pub fn has_filter(&self, dimension: Dimension) -> bool {
        self.ids(dimension).is_some_and(|ids| !ids.is_empty())
    }

    /// Number of active dimensions. Always equals the number of chips the
    /// filter bar renders.
    pub fn active_filter_count(&self) -> usize {
        Dimension::ALL
            .iter()
            .filter(|&&d| self.has_filter(d))
            .count()
    }

    /// Active dimensions in display order.
    pub fn active_dimensions(&self) -> Vec<Dimension> {
        Dimension::ALL
            .iter()
            .copied()
            .filter(|&d| self.has_filter(d))
            .collect()
    }

    /// Replace one dimension's selection, returning a new `Filters`.
    ///
    /// An empty id-list deactivates the dimension; the exclude flag is
    /// forced to false in that case so the result is identical to
    /// [`Filters::remove`].
    #[must_use]
    pub fn apply(&self, dimension: Dimension, ids: Vec<i64>, exclude: bool) -> Self {
        let mut next = self.clone();
        let (slot_ids, slot_exclude) = next.slots(dimension);
        if ids.is_empty() {
            *slot_ids = None;
            *slot_exclude = false;
        } else {
            *slot_ids = Some(ids);
            *slot_exclude = exclude;
        }
        next
    }

    /// Clear one dimension entirely, returning a new `Filters`.
    #[must_use]
    pub fn remove(&self, dimension: Dimension) -> Self {
        self.apply(dimension, Vec::new(), false)
    }

    /// The normal form used for change detection and as the engine's fetch
    /// cache key: id-lists sorted and deduplicated, empty lists dropped,
    /// exclude flags cleared on inactive dimensions.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut next = Self::default();
        for dimension in Dimension::ALL {
            let ids = self.ids(dimension).map_or_else(Vec::new, |ids| {
                let mut sorted = ids.to_vec();
                sorted.sort_unstable();
                sorted.dedup();
                sorted
            });
            let exclude = self.exclude(dimension);
            next = next.apply(dimension, ids, exclude);
        }
        next
    }

    /// Whether two filter objects describe the same query.
    pub fn same_query(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }

    fn slots(&mut self, dimension: Dimension) -> (&mut Option<Vec<i64>>, &mut bool) {
        match dimension {
            Dimension::Project => (&mut self.project_ids, &mut self.project_exclude),
            Dimension::Status => (&mut self.status_ids, &mut self.status_exclude),
            Dimension::Assignee => (&mut self.assignee_ids, &mut self.assignee_exclude),
            Dimension::Priority => (&mut self.priority_ids, &mut self.priority_exclude),
            Dimension::Severity => (&mut self.severity_ids, &mut self.severity_exclude),
            Dimension::Type => (&mut self.type_ids, &mut self.type_exclude),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_active_filters() {
        let filters = Filters::default();
        assert_eq!(filters.active_filter_count(), 0);
        for dimension in Dimension::ALL {
            assert!(!filters.has_filter(dimension));
        }
    }

    #[test]
    fn apply_activates_dimension() {
        let filters = Filters::default().apply(Dimension::Priority, vec![5], false);
        assert!(filters.has_filter(Dimension::Priority));
        assert_eq!(filters.priority_ids.as_deref(), Some(&[5][..]));
        assert!(!filters.priority_exclude);
        assert_eq!(filters.active_filter_count(), 1);
    }

    #[test]
    fn apply_does_not_mutate_original() {
        let original = Filters::default();
        let _ = original.apply(Dimension::Status, vec![1, 2], true);
        assert!(!original.has_filter(Dimension::Status));
    }

    #[test]
    fn count_matches_active_dimensions() {
        let filters = Filters::default()
            .apply(Dimension::Project, vec![1], false)
            .apply(Dimension::Severity, vec![2, 3], true)
            .apply(Dimension::Type, vec![9], false);
        assert_eq!(filters.active_filter_count(), 3);
        assert_eq!(
            filters.active_dimensions(),
            vec![Dimension::Project, Dimension::Severity, Dimension::Type]
        );
    }

    #[test]
    fn remove_clears_ids_and_exclude() {
        let filters = Filters::default()
            .apply(Dimension::Assignee, vec![7], true)
            .remove(Dimension::Assignee);
        assert!(!filters.has_filter(Dimension::Assignee));
        assert_eq!(filters.assignee_ids, None);
        assert!(!filters.assignee_exclude);
    }

    #[test]
    fn apply_empty_ids_equals_remove_regardless_of_exclude() {
        let base = Filters::default().apply(Dimension::Priority, vec![5, 6], true);
        let via_apply = base.apply(Dimension::Priority, Vec::new(), true);
        let via_remove = base.remove(Dimension::Priority);
        assert_eq!(via_apply, via_remove);
        assert!(!via_apply.priority_exclude);
    }

    #[test]
    fn normalized_sorts_and_dedups() {
        let filters = Filters::default().apply(Dimension::Status, vec![3, 1, 3, 2], false);
        let norm = filters.normalized();
        assert_eq!(norm.status_ids.as_deref(), Some(&[1, 2, 3][..]));
    }

    #[test]
    fn normalized_drops_exclude_without_ids() {
        let filters = Filters {
            type_exclude: true,
            ..Filters::default()
        };
        let norm = filters.normalized();
        assert!(!norm.type_exclude);
        assert_eq!(norm, Filters::default());
    }

    #[test]
    fn same_query_ignores_id_order() {
        let a = Filters::default().apply(Dimension::Priority, vec![6, 5], true);
        let b = Filters::default().apply(Dimension::Priority, vec![5, 6], true);
        assert!(a.same_query(&b));
        assert!(!a.same_query(&Filters::default()));
    }

    #[test]
    fn normalized_serializes_without_inactive_fields() {
        let filters = Filters::default().apply(Dimension::Project, vec![2, 1], false);
        let json = serde_json::to_string(&filters.normalized()).expect("serializable");
        assert_eq!(json, r#"{"project_ids":[1,2]}"#);
    }
}
