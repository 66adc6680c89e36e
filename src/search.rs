use crate::components::table::Row;

/// Filter rows by case-insensitive substring match on any cell's text.
/// Returns indices of matching rows.
pub(crate) fn filter_rows(rows: &[Row], query: &str) -> Vec<usize> {
    if query.is_empty() {
        return (0..rows.len()).collect();
    }
    let lower = query.to_lowercase();
    rows.iter()
        .enumerate()
        .filter(|(_, row)| {
            row.values()
                .any(|cell| cell.text().to_lowercase().contains(&lower))
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::table::Cell;

    fn make_row(cells: &[(&str, &str)]) -> Row {
        cells
            .iter()
            .map(|(k, v)| ((*k).to_owned(), Cell::plain(*v)))
            .collect()
    }

    #[test]
    fn empty_query_returns_all() {
        let rows = vec![
            make_row(&[("subject", "Fix login"), ("assignee", "alice")]),
            make_row(&[("subject", "Add export"), ("assignee", "bob")]),
        ];
        let result = filter_rows(&rows, "");
        assert_eq!(result, vec![0, 1]);
    }

    #[test]
    fn matches_subject() {
        let rows = vec![
            make_row(&[("subject", "Fix login"), ("assignee", "alice")]),
            make_row(&[("subject", "Add export"), ("assignee", "bob")]),
        ];
        let result = filter_rows(&rows, "fix");
        assert_eq!(result, vec![0]);
    }

    #[test]
    fn matches_any_column_case_insensitive() {
        let rows = vec![make_row(&[("subject", "Fix login"), ("assignee", "Alice")])];
        let result = filter_rows(&rows, "ALICE");
        assert_eq!(result, vec![0]);
    }

    #[test]
    fn no_match_returns_empty() {
        let rows = vec![make_row(&[("subject", "Fix login")])];
        assert!(filter_rows(&rows, "xyz").is_empty());
    }
}
