//! Header grid construction.
//!
//! Walks the grouped column tree depth-first and drops each column's header
//! cell into the row bucket for its depth. Spans are taken from the column
//! only when it declares them; nothing here infers spans.

use crate::types::{ColumnNode, HeaderCell, HeaderRow};

/// Build the header rows for a grouped column tree.
///
/// Cells appear in input order within each row. Columns with `colSpan: 0`
/// produce no cell, and rows left without cells are dropped.
pub fn build_header_rows(columns: &[ColumnNode]) -> Vec<HeaderRow> {
    let mut rows: Vec<HeaderRow> = Vec::new();
    collect_header_rows(columns, 0, &mut rows);
    rows.retain(|row| !row.is_empty());
    rows
}

fn collect_header_rows(columns: &[ColumnNode], current_row: usize, rows: &mut Vec<HeaderRow>) {
    if rows.len() <= current_row {
        rows.resize_with(current_row + 1, Vec::new);
    }

    for column in columns {
        // A declared rowSpan raises the row count before this cell lands
        if let Some(row_span) = column.row_span {
            let row_span = usize::try_from(row_span).unwrap_or(0);
            while rows.len() < row_span {
                rows.push(Vec::new());
            }
        }

        let cell = HeaderCell {
            key: column.key.clone(),
            class_name: column.class_name.clone().unwrap_or_default(),
            children: column.title.clone(),
            col_span: column.col_span,
            row_span: column.row_span,
        };

        if let Some(children) = &column.children {
            collect_header_rows(children, current_row + 1, rows);
        }

        if cell.col_span != Some(0) {
            if let Some(bucket) = rows.get_mut(current_row) {
                bucket.push(cell);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn row_keys(rows: &[HeaderRow]) -> Vec<Vec<&str>> {
        rows.iter()
            .map(|row| row.iter().map(|c| c.key.as_str()).collect())
            .collect()
    }

    #[test]
    fn test_flat_columns_single_row() {
        let rows = build_header_rows(&[ColumnNode::leaf("a", "A"), ColumnNode::leaf("b", "B")]);
        assert_eq!(row_keys(&rows), vec![vec!["a", "b"]]);
        assert_eq!(rows[0][0].children, "A");
        assert_eq!(rows[0][0].col_span, None);
        assert_eq!(rows[0][0].row_span, None);
    }

    #[test]
    fn test_grouped_columns() {
        let rows = build_header_rows(&[
            ColumnNode::leaf("a", "A"),
            ColumnNode::group(
                "b",
                "B",
                vec![ColumnNode::leaf("b1", "B1"), ColumnNode::leaf("b2", "B2")],
            ),
        ]);
        assert_eq!(row_keys(&rows), vec![vec!["a", "b"], vec!["b1", "b2"]]);
    }

    #[test]
    fn test_explicit_spans_carried() {
        let rows = build_header_rows(&[
            ColumnNode::leaf("a", "A").with_row_span(2),
            ColumnNode::group(
                "b",
                "B",
                vec![ColumnNode::leaf("b1", "B1"), ColumnNode::leaf("b2", "B2")],
            )
            .with_col_span(2),
        ]);
        assert_eq!(rows[0][0].row_span, Some(2));
        assert_eq!(rows[0][1].col_span, Some(2));
        assert_eq!(rows[1].len(), 2);
    }

    #[test]
    fn test_zero_col_span_suppressed() {
        let rows = build_header_rows(&[
            ColumnNode::leaf("a", "A").with_col_span(2),
            ColumnNode::leaf("hidden", "Hidden").with_col_span(0),
            ColumnNode::leaf("c", "C"),
        ]);
        assert_eq!(row_keys(&rows), vec![vec!["a", "c"]]);
    }

    #[test]
    fn test_zero_col_span_group_still_fills_children() {
        let rows = build_header_rows(&[
            ColumnNode::leaf("a", "A"),
            ColumnNode::group("g", "G", vec![ColumnNode::leaf("g1", "G1")]).with_col_span(0),
        ]);
        assert_eq!(row_keys(&rows), vec![vec!["a"], vec!["g1"]]);
    }

    #[test]
    fn test_empty_rows_dropped() {
        // A lone deep rowSpan adds buckets that nothing fills
        let rows = build_header_rows(&[ColumnNode::leaf("a", "A").with_row_span(3)]);
        assert_eq!(rows.len(), 1);
        assert!(rows.iter().all(|row| !row.is_empty()));
    }

    #[test]
    fn test_class_name_defaults_to_empty() {
        let rows = build_header_rows(&[
            ColumnNode::leaf("a", "A").with_class_name("num"),
            ColumnNode::leaf("b", "B"),
        ]);
        assert_eq!(rows[0][0].class_name, "num");
        assert_eq!(rows[0][1].class_name, "");
    }

    #[test]
    fn test_no_columns() {
        assert!(build_header_rows(&[]).is_empty());
    }
}
