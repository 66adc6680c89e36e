use iocraft::prelude::*;
use unicode_width::UnicodeWidthStr;

use crate::color::ColorDepth;
use crate::filters::{Dimension, Filters};
use crate::labels::ResolvedLabels;
use crate::metadata;
use crate::theme::ResolvedTheme;
use crate::types::{MetadataMap, Project};

// ---------------------------------------------------------------------------
// Dropdown bookkeeping
// ---------------------------------------------------------------------------

/// Open/closed state of the six per-dimension dropdowns.
///
/// Mutual exclusion is deliberately NOT an invariant here: more than one
/// dropdown could in principle be open, so [`DropdownSet::all_closed`]
/// checks every flag instead of assuming at most one is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropdownSet {
    project: bool,
    status: bool,
    assignee: bool,
    priority: bool,
    severity: bool,
    issue_type: bool,
}

impl DropdownSet {
    pub fn open(&mut self, dimension: Dimension) {
        *self.slot(dimension) = true;
    }

    pub fn close(&mut self, dimension: Dimension) {
        *self.slot(dimension) = false;
    }

    pub fn is_open(self, dimension: Dimension) -> bool {
        match dimension {
            Dimension::Project => self.project,
            Dimension::Status => self.status,
            Dimension::Assignee => self.assignee,
            Dimension::Priority => self.priority,
            Dimension::Severity => self.severity,
            Dimension::Type => self.issue_type,
        }
    }

    /// True when every per-dimension dropdown is closed.
    pub fn all_closed(self) -> bool {
        Dimension::ALL.iter().all(|&d| !self.is_open(d))
    }

    /// The first open dropdown in display order, if any.
    pub fn first_open(self) -> Option<Dimension> {
        Dimension::ALL.iter().copied().find(|&d| self.is_open(d))
    }

    fn slot(&mut self, dimension: Dimension) -> &mut bool {
        match dimension {
            Dimension::Project => &mut self.project,
            Dimension::Status => &mut self.status,
            Dimension::Assignee => &mut self.assignee,
            Dimension::Priority => &mut self.priority,
            Dimension::Severity => &mut self.severity,
            Dimension::Type => &mut self.issue_type,
        }
    }
}

// ---------------------------------------------------------------------------
// Anchor rule
// ---------------------------------------------------------------------------

/// Where an opening dropdown should visually attach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorTarget {
    /// The dimension's own chip.
    Chip,
    /// The add-filter button — used when the dimension has no chip yet and
    /// its dropdown was opened from the add-filter menu.
    AddButton,
}

/// A dimension without an active filter renders no chip, so a dropdown
/// opened for it from the add-filter menu has nothing of its own to anchor
/// to and attaches to the add-filter button instead. Once the dimension is
/// active, subsequent opens anchor to its chip.
pub fn anchor_target(
    dimension: Dimension,
    has_filter: bool,
    opened_from_add_filter: Option<Dimension>,
) -> AnchorTarget {
    if !has_filter && opened_from_add_filter == Some(dimension) {
        AnchorTarget::AddButton
    } else {
        AnchorTarget::Chip
    }
}

// ---------------------------------------------------------------------------
// Chips
// ---------------------------------------------------------------------------

/// One rendered filter: dimension label, summarized value, exclude marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    pub dimension: Dimension,
    pub label: String,
    pub value: String,
    pub exclude: bool,
}

/// Build the chip list for the current filter state, in display order.
///
/// Always yields exactly `filters.active_filter_count()` chips.
pub fn build_chips(
    filters: &Filters,
    metadata: &MetadataMap,
    projects: &[Project],
    labels: &ResolvedLabels,
) -> Vec<Chip> {
    filters
        .active_dimensions()
        .into_iter()
        .map(|dimension| {
            let ids = filters.ids(dimension).unwrap_or(&[]);
            let value = match dimension {
                Dimension::Project => metadata::summarize_projects(ids, projects, labels),
                _ => metadata::summarize(dimension, ids, metadata, labels),
            };
            Chip {
                dimension,
                label: dimension.label(labels).to_owned(),
                value,
                exclude: filters.exclude(dimension),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Pre-rendered filter bar (owned)
// ---------------------------------------------------------------------------

pub struct RenderedChip {
    pub text: String,
    pub fg: Color,
    pub bg: Color,
    /// Leading column of this chip within the bar.
    pub x: u16,
}

pub struct RenderedFilterBar {
    pub chips: Vec<RenderedChip>,
    pub add_button: String,
    pub add_button_x: u16,
    pub add_fg: Color,
    pub counter: String,
    pub counter_fg: Color,
    pub border_fg: Color,
}

/// Configuration for building the filter bar line.
pub struct FilterBarBuildConfig<'a> {
    pub chips: &'a [Chip],
    /// Chip under the bar cursor, highlighted for edit/remove.
    pub focused: Option<usize>,
    pub active_filter_count: usize,
    pub show_filter_count: bool,
    pub labels: &'a ResolvedLabels,
    pub theme: &'a ResolvedTheme,
    pub depth: ColorDepth,
}

impl RenderedFilterBar {
    /// Build the bar, tracking each chip's column so dropdown overlays can
    /// anchor to their chip (or to the add-filter button).
    pub fn build(cfg: &FilterBarBuildConfig<'_>) -> Self {
        let depth = cfg.depth;
        let theme = cfg.theme;
        let chip_fg = theme.text_primary.to_crossterm_color(depth);
        let chip_bg = theme.bg_chip.to_crossterm_color(depth);
        let focus_bg = theme.bg_selected.to_crossterm_color(depth);

        // padding_left of the bar view.
        let mut x: u16 = 1;
        let chips: Vec<RenderedChip> = cfg
            .chips
            .iter()
            .enumerate()
            .map(|(i, chip)| {
                let marker = if chip.exclude {
                    format!("{} ", cfg.labels.exclude_marker)
                } else {
                    String::new()
                };
                let text = format!(" {}: {marker}{} \u{00d7} ", chip.label, chip.value);
                let chip_x = x;
                #[allow(clippy::cast_possible_truncation)]
                {
                    x = x.saturating_add(text.width() as u16 + 1);
                }
                RenderedChip {
                    text,
                    fg: chip_fg,
                    bg: if cfg.focused == Some(i) { focus_bg } else { chip_bg },
                    x: chip_x,
                }
            })
            .collect();

        let counter = if cfg.show_filter_count && cfg.active_filter_count > 0 {
            format!("({})", cfg.active_filter_count)
        } else {
            String::new()
        };

        Self {
            chips,
            add_button: format!(" {} ", cfg.labels.add_filter),
            add_button_x: x,
            add_fg: theme.text_secondary.to_crossterm_color(depth),
            counter,
            counter_fg: theme.text_faint.to_crossterm_color(depth),
            border_fg: theme.border_faint.to_crossterm_color(depth),
        }
    }

    /// Anchor column for a dropdown opening on `dimension`.
    pub fn anchor_x(&self, chips: &[Chip], dimension: Dimension, target: AnchorTarget) -> u16 {
        match target {
            AnchorTarget::AddButton => self.add_button_x,
            AnchorTarget::Chip => chips
                .iter()
                .position(|c| c.dimension == dimension)
                .and_then(|i| self.chips.get(i))
                .map_or(self.add_button_x, |c| c.x),
        }
    }
}

// ---------------------------------------------------------------------------
// FilterBar component
// ---------------------------------------------------------------------------

#[derive(Default, Props)]
pub struct FilterBarProps {
    pub bar: Option<RenderedFilterBar>,
}

#[component]
pub fn FilterBar(props: &mut FilterBarProps) -> impl Into<AnyElement<'static>> {
    let Some(bar) = props.bar.take() else {
        return element! { View }.into_any();
    };

    element! {
        View(
            border_style: BorderStyle::Single,
            border_edges: Edges::Bottom,
            border_color: bar.border_fg,
            padding_left: 1,
        ) {
            #(bar.chips.into_iter().enumerate().map(|(i, chip)| {
                element! {
                    View(key: i, margin_right: 1, background_color: chip.bg) {
                        Text(content: chip.text, color: chip.fg, wrap: TextWrap::NoWrap)
                    }
                }
            }))
            Text(content: bar.add_button, color: bar.add_fg, wrap: TextWrap::NoWrap)
            #(Some(bar.counter).filter(|c| !c.is_empty()).into_iter().map(|counter| {
                element! {
                    Text(content: counter, color: bar.counter_fg, wrap: TextWrap::NoWrap)
                }
            }))
        }
    }
    .into_any()
}

// ---------------------------------------------------------------------------
// Add-filter menu
// ---------------------------------------------------------------------------

/// Dimensions the add-filter menu offers: only those without an active
/// filter.
pub fn available_dimensions(filters: &Filters) -> Vec<Dimension> {
    Dimension::ALL
        .iter()
        .copied()
        .filter(|&d| !filters.has_filter(d))
        .collect()
}

pub struct RenderedAddFilterMenu {
    pub items: Vec<String>,
    pub cursor: usize,
    pub anchor_x: u16,
    pub item_fg: Color,
    pub cursor_fg: Color,
    pub cursor_bg: Color,
    pub border_fg: Color,
}

impl RenderedAddFilterMenu {
    pub fn build(
        dimensions: &[Dimension],
        cursor: usize,
        anchor_x: u16,
        labels: &ResolvedLabels,
        theme: &ResolvedTheme,
        depth: ColorDepth,
    ) -> Self {
        Self {
            items: dimensions
                .iter()
                .map(|d| d.label(labels).to_owned())
                .collect(),
            cursor,
            anchor_x,
            item_fg: theme.text_secondary.to_crossterm_color(depth),
            cursor_fg: theme.text_primary.to_crossterm_color(depth),
            cursor_bg: theme.bg_selected.to_crossterm_color(depth),
            border_fg: theme.border_primary.to_crossterm_color(depth),
        }
    }
}

#[derive(Default, Props)]
pub struct AddFilterMenuProps {
    pub menu: Option<RenderedAddFilterMenu>,
    pub width: u16,
    pub height: u16,
}

#[component]
pub fn AddFilterMenu(props: &mut AddFilterMenuProps) -> impl Into<AnyElement<'static>> {
    let Some(menu) = props.menu.take() else {
        return element! { View }.into_any();
    };

    let term_width = u32::from(props.width);
    let term_height = u32::from(props.height);
    #[allow(clippy::cast_possible_truncation)]
    let height = (menu.items.len() as u32 + 2).min(term_height.saturating_sub(3));
    let width: u32 = 18;
    let pad_left = u32::from(menu.anchor_x).min(term_width.saturating_sub(width));

    element! {
        View(
            width: term_width,
            height: term_height,
            position: Position::Absolute,
        ) {
            View(
                margin_left: pad_left,
                margin_top: 1,
                width,
                height,
                flex_direction: FlexDirection::Column,
                border_style: BorderStyle::Round,
                border_color: menu.border_fg,
                background_color: Color::Reset,
                overflow: Overflow::Hidden,
            ) {
                #(menu.items.into_iter().enumerate().map(|(i, label)| {
                    let is_cursor = i == menu.cursor;
                    let fg = if is_cursor { menu.cursor_fg } else { menu.item_fg };
                    let bg = if is_cursor { menu.cursor_bg } else { Color::Reset };
                    let marker = if is_cursor { "\u{25b6} " } else { "  " };
                    element! {
                        View(key: i, background_color: bg, padding_left: 1) {
                            Text(content: format!("{marker}{label}"), color: fg, wrap: TextWrap::NoWrap)
                        }
                    }
                }))
            }
        }
    }
    .into_any()
}
