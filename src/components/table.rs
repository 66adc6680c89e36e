use std::collections::HashMap;

use iocraft::prelude::*;

use crate::color::{Color as AppColor, ColorDepth};

// ---------------------------------------------------------------------------
// Column definition
// ---------------------------------------------------------------------------

/// Defines a column in the table.
#[derive(Debug, Clone)]
pub struct Column {
    /// Unique identifier (e.g., "subject", "status", "priority_severity").
    pub id: String,
    /// Display header text.
    pub header: String,
    /// Default width as a fraction of the flexible width (0.0..1.0).
    pub default_width_pct: f32,
    /// Text alignment for this column.
    pub align: TextAlign,
    /// Exact character width; takes the column out of the flexible pool.
    pub fixed_width: Option<u16>,
}

// ---------------------------------------------------------------------------
// Cell content
// ---------------------------------------------------------------------------

/// A styled fragment of a cell line.
#[derive(Debug, Clone)]
pub struct Span {
    pub text: String,
    pub color: Option<AppColor>,
    /// Background tint, used for badge chrome.
    pub bg: Option<AppColor>,
    pub bold: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
            bg: None,
            bold: false,
        }
    }

    pub fn colored(text: impl Into<String>, color: AppColor) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
            bg: None,
            bold: false,
        }
    }

    /// Solid foreground over a tinted background.
    pub fn badge(text: impl Into<String>, color: AppColor, bg: AppColor) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
            bg: Some(bg),
            bold: false,
        }
    }
}

/// A single cell: one primary line of spans, and optionally a second line so
/// two mini-rows can stack inside one table row.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    pub primary: Vec<Span>,
    pub secondary: Option<Vec<Span>>,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            primary: vec![Span::plain(text)],
            secondary: None,
        }
    }

    pub fn colored(text: impl Into<String>, color: AppColor) -> Self {
        Self {
            primary: vec![Span::colored(text, color)],
            secondary: None,
        }
    }

    pub fn from_spans(spans: Vec<Span>) -> Self {
        Self {
            primary: spans,
            secondary: None,
        }
    }

    /// Stack a second line of spans under the primary line.
    #[must_use]
    pub fn with_secondary(mut self, spans: Vec<Span>) -> Self {
        self.secondary = Some(spans);
        self
    }

    /// All text of the cell, both lines joined — used by the row search.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for span in self
            .primary
            .iter()
            .chain(self.secondary.iter().flatten())
        {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&span.text);
        }
        out
    }
}

/// A complete row of cells indexed by column id.
pub type Row = HashMap<String, Cell>;

// ---------------------------------------------------------------------------
// Pre-rendered table data (all owned)
// ---------------------------------------------------------------------------

/// Pre-render table data into fully owned structures that can be passed
/// into the `element!` macro without lifetime issues.
pub struct RenderedTable {
    pub header_cells: Vec<HeaderCell>,
    pub body_rows: Vec<RenderedRow>,
    pub total_width: u32,
    pub show_separator: bool,
    pub header_fg: Color,
    pub border_fg: Color,
    /// Message to display when there are no rows.
    pub empty_message: Option<String>,
}

pub struct HeaderCell {
    pub text: String,
    pub width: u32,
    pub align: TextAlign,
}

pub struct RenderedRow {
    pub key: usize,
    pub bg: Option<Color>,
    pub cells: Vec<RenderedCell>,
}

pub struct RenderedCell {
    /// One or two lines of styled spans; every cell of a row has the same
    /// line count so the row stays rectangular.
    pub lines: Vec<Vec<RenderedSpan>>,
    pub width: u32,
    pub align: TextAlign,
}

pub struct RenderedSpan {
    pub text: String,
    pub fg: Color,
    pub bg: Option<Color>,
    pub weight: Weight,
}

/// Configuration for building a `RenderedTable`.
pub struct TableBuildConfig<'a> {
    pub columns: &'a [Column],
    pub rows: &'a [Row],
    pub cursor: usize,
    pub scroll_offset: usize,
    pub visible_rows: usize,
    pub total_width: u16,
    pub depth: ColorDepth,
    pub selected_bg: Option<AppColor>,
    pub header_color: Option<AppColor>,
    pub border_color: Option<AppColor>,
    pub show_separator: bool,
    /// Message to show when rows are empty.
    pub empty_message: Option<&'a str>,
}

impl RenderedTable {
    /// Build a `RenderedTable` from a configuration.
    pub fn build(cfg: &TableBuildConfig<'_>) -> Self {
        let columns = cfg.columns;
        let rows = cfg.rows;
        let depth = cfg.depth;

        let col_widths = compute_column_widths(columns, cfg.total_width);

        let header_fg = cfg
            .header_color
            .map_or(Color::White, |c| c.to_crossterm_color(depth));
        let border_fg = cfg
            .border_color
            .map_or(Color::DarkGrey, |c| c.to_crossterm_color(depth));
        let selected_bg_color = cfg.selected_bg.map(|c| c.to_crossterm_color(depth));

        let header_cells: Vec<HeaderCell> = columns
            .iter()
            .zip(col_widths.iter())
            .map(|(col, &w)| HeaderCell {
                text: col.header.clone(),
                width: u32::from(w),
                align: col.align,
            })
            .collect();

        // Slice the visible window.
        let end = (cfg.scroll_offset + cfg.visible_rows).min(rows.len());
        let visible_slice = if cfg.scroll_offset < rows.len() {
            &rows[cfg.scroll_offset..end]
        } else {
            &[]
        };

        let body_rows: Vec<RenderedRow> = visible_slice
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let absolute_idx = cfg.scroll_offset + i;
                let is_selected = absolute_idx == cfg.cursor;
                let bg = if is_selected { selected_bg_color } else { None };

                let line_count = if columns
                    .iter()
                    .any(|col| row.get(&col.id).is_some_and(|c| c.secondary.is_some()))
                {
                    2
                } else {
                    1
                };

                let cells: Vec<RenderedCell> = columns
                    .iter()
                    .zip(col_widths.iter())
                    .map(|(col, &w)| {
                        let cell = row.get(&col.id);
                        let mut lines = Vec::with_capacity(line_count);
                        lines.push(render_spans(
                            cell.map_or(&[][..], |c| c.primary.as_slice()),
                            depth,
                        ));
                        if line_count == 2 {
                            lines.push(render_spans(
                                cell.and_then(|c| c.secondary.as_deref()).unwrap_or(&[]),
                                depth,
                            ));
                        }
                        RenderedCell {
                            lines,
                            width: u32::from(w),
                            align: col.align,
                        }
                    })
                    .collect();

                RenderedRow {
                    key: absolute_idx,
                    bg,
                    cells,
                }
            })
            .collect();

        let empty_message = if rows.is_empty() {
            cfg.empty_message.map(String::from)
        } else {
            None
        };

        Self {
            header_cells,
            body_rows,
            total_width: u32::from(cfg.total_width),
            show_separator: cfg.show_separator,
            header_fg,
            border_fg,
            empty_message,
        }
    }
}

fn render_spans(spans: &[Span], depth: ColorDepth) -> Vec<RenderedSpan> {
    spans
        .iter()
        .map(|span| RenderedSpan {
            text: span.text.clone(),
            fg: span
                .color
                .map_or(Color::Reset, |c| c.to_crossterm_color(depth)),
            bg: span.bg.map(|c| c.to_crossterm_color(depth)),
            weight: if span.bold {
                Weight::Bold
            } else {
                Weight::Normal
            },
        })
        .collect()
}

// ---------------------------------------------------------------------------
// ScrollableTable component
// ---------------------------------------------------------------------------

#[derive(Default, Props)]
pub struct ScrollableTableProps {
    /// Pre-rendered table data.
    pub table: Option<RenderedTable>,
}

#[component]
pub fn ScrollableTable(props: &mut ScrollableTableProps) -> impl Into<AnyElement<'static>> {
    let Some(table) = props.table.take() else {
        return element! { View }.into_any();
    };

    element! {
        View(flex_direction: FlexDirection::Column, width: table.total_width) {
            // Header row
            View(
                border_style: if table.show_separator { BorderStyle::Single } else { BorderStyle::None },
                border_edges: Edges::Bottom,
                border_color: table.border_fg,
            ) {
                #(table.header_cells.into_iter().enumerate().map(|(i, hc)| {
                    element! {
                        View(key: i, width: hc.width) {
                            Text(
                                content: hc.text,
                                weight: Weight::Bold,
                                color: table.header_fg,
                                wrap: TextWrap::NoWrap,
                                align: hc.align,
                            )
                        }
                    }
                }))
            }

            // Empty-state message or body rows
            #(table.empty_message.into_iter().map(|msg| {
                element! {
                    View(padding_top: 1, padding_left: 2) {
                        Text(
                            content: msg,
                            color: Color::DarkGrey,
                        )
                    }
                }
            }))
            #(table.body_rows.into_iter().map(|row| {
                element! {
                    View(key: row.key, background_color: row.bg) {
                        #(row.cells.into_iter().enumerate().map(|(ci, cell)| {
                            element! {
                                View(
                                    key: ci,
                                    width: cell.width,
                                    flex_direction: FlexDirection::Column,
                                    overflow: Overflow::Hidden,
                                ) {
                                    #(cell.lines.into_iter().enumerate().map(|(li, spans)| {
                                        element! {
                                            View(key: li) {
                                                #(spans.into_iter().enumerate().map(|(si, span)| {
                                                    element! {
                                                        View(key: si, background_color: span.bg.unwrap_or(Color::Reset)) {
                                                            Text(
                                                                content: span.text,
                                                                color: span.fg,
                                                                weight: span.weight,
                                                                wrap: TextWrap::NoWrap,
                                                            )
                                                        }
                                                    }
                                                }))
                                            }
                                        }
                                    }))
                                }
                            }
                        }))
                    }
                }
            }))
        }
    }
    .into_any()
}

// ---------------------------------------------------------------------------
// Column width computation
// ---------------------------------------------------------------------------

fn compute_column_widths(columns: &[Column], total: u16) -> Vec<u16> {
    let fixed_total: u16 = columns.iter().filter_map(|c| c.fixed_width).sum();
    let remaining = total.saturating_sub(fixed_total);

    let flexible_pct_sum: f32 = columns
        .iter()
        .filter(|c| c.fixed_width.is_none())
        .map(|c| c.default_width_pct)
        .sum();

    columns
        .iter()
        .map(|col| {
            if let Some(w) = col.fixed_width {
                return w;
            }
            let ratio = if flexible_pct_sum > 0.0 {
                col.default_width_pct / flexible_pct_sum
            } else {
                #[allow(clippy::cast_precision_loss)]
                {
                    1.0 / columns.len() as f32
                }
            };
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let w = (f32::from(remaining) * ratio).round() as u16;
            w.max(1)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_columns() -> Vec<Column> {
        vec![
            Column {
                id: "status".to_owned(),
                header: "Status".to_owned(),
                default_width_pct: 0.0,
                align: TextAlign::Left,
                fixed_width: Some(14),
            },
            Column {
                id: "subject".to_owned(),
                header: "Subject".to_owned(),
                default_width_pct: 0.60,
                align: TextAlign::Left,
                fixed_width: None,
            },
            Column {
                id: "assignee".to_owned(),
                header: "Assignee".to_owned(),
                default_width_pct: 0.40,
                align: TextAlign::Left,
                fixed_width: None,
            },
        ]
    }

    #[test]
    fn fixed_columns_keep_their_width() {
        let widths = compute_column_widths(&make_columns(), 100);
        assert_eq!(widths[0], 14);
        let flexible: u16 = widths[1..].iter().sum();
        assert!(
            (85..=87).contains(&flexible),
            "flexible columns should fill ~86 chars, got {flexible}"
        );
        assert!(widths[1] > widths[2], "subject should be wider");
    }

    #[test]
    fn narrow_terminal_never_yields_zero_width() {
        let widths = compute_column_widths(&make_columns(), 10);
        assert!(widths.iter().all(|&w| w >= 1));
    }

    #[test]
    fn rows_with_secondary_lines_render_two_lines() {
        let columns = make_columns();
        let mut row = Row::new();
        row.insert(
            "status".to_owned(),
            Cell::plain("open").with_secondary(vec![Span::plain("sub")]),
        );
        row.insert("subject".to_owned(), Cell::plain("Fix it"));
        let rows = vec![row];

        let rendered = RenderedTable::build(&TableBuildConfig {
            columns: &columns,
            rows: &rows,
            cursor: 0,
            scroll_offset: 0,
            visible_rows: 10,
            total_width: 80,
            depth: ColorDepth::TrueColor,
            selected_bg: None,
            header_color: None,
            border_color: None,
            show_separator: true,
            empty_message: None,
        });

        let row = &rendered.body_rows[0];
        // Every cell gets two lines once any cell stacks.
        assert!(row.cells.iter().all(|c| c.lines.len() == 2));
    }

    #[test]
    fn empty_rows_produce_empty_message() {
        let columns = make_columns();
        let rendered = RenderedTable::build(&TableBuildConfig {
            columns: &columns,
            rows: &[],
            cursor: 0,
            scroll_offset: 0,
            visible_rows: 10,
            total_width: 80,
            depth: ColorDepth::TrueColor,
            selected_bg: None,
            header_color: None,
            border_color: None,
            show_separator: true,
            empty_message: Some("No issues found"),
        });
        assert_eq!(rendered.empty_message.as_deref(), Some("No issues found"));
        assert!(rendered.body_rows.is_empty());
    }

    #[test]
    fn cell_text_joins_both_lines() {
        let cell = Cell::plain("High").with_secondary(vec![Span::plain("Minor")]);
        assert_eq!(cell.text(), "High Minor");
    }
}
