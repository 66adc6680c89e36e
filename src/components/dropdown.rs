use iocraft::prelude::*;

use crate::color::{Color as AppColor, ColorDepth};
use crate::metadata::FilterOption;

// ---------------------------------------------------------------------------
// Multi-select list state
// ---------------------------------------------------------------------------

/// Editing state of an open filter dropdown: a cursor over the option list,
/// the checked ids, and the include/exclude mode.
///
/// Nothing here touches the canonical `Filters` — the owner commits the
/// checked set on apply and throws this state away on cancel.
#[derive(Debug, Clone, Default)]
pub struct DropdownListState {
    pub cursor: usize,
    pub checked: Vec<i64>,
    pub exclude: bool,
}

impl DropdownListState {
    /// Seed the editing state from the dimension's current selection.
    pub fn new(selected: &[i64], exclude: bool) -> Self {
        Self {
            cursor: 0,
            checked: selected.to_vec(),
            exclude,
        }
    }

    pub fn move_down(&mut self, len: usize) {
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    pub fn move_up(&mut self, len: usize) {
        if len > 0 {
            self.cursor = if self.cursor == 0 {
                len - 1
            } else {
                self.cursor - 1
            };
        }
    }

    /// Toggle the checkbox under the cursor.
    pub fn toggle_current(&mut self, options: &[FilterOption]) {
        let Some(option) = options.get(self.cursor) else {
            return;
        };
        if let Some(pos) = self.checked.iter().position(|&id| id == option.id) {
            self.checked.remove(pos);
        } else {
            self.checked.push(option.id);
        }
    }

    pub fn toggle_exclude(&mut self) {
        self.exclude = !self.exclude;
    }

    pub fn is_checked(&self, id: i64) -> bool {
        self.checked.contains(&id)
    }
}

// ---------------------------------------------------------------------------
// Pre-rendered dropdown (owned, 'static-safe)
// ---------------------------------------------------------------------------

pub struct RenderedDropdownItem {
    pub checkbox: String,
    pub label: String,
    pub dot: Option<Color>,
    pub is_cursor: bool,
}

pub struct RenderedFilterDropdown {
    pub title: String,
    pub mode_text: String,
    pub items: Vec<RenderedDropdownItem>,
    /// Column the overlay anchors to: the dimension's chip, or the
    /// add-filter button when the dimension has no chip yet.
    pub anchor_x: u16,
    pub width: u32,
    pub title_fg: Color,
    pub mode_fg: Color,
    pub item_fg: Color,
    pub cursor_fg: Color,
    pub cursor_bg: Color,
    pub border_fg: Color,
    pub hint_fg: Color,
}

/// Configuration for building a filter dropdown overlay.
pub struct DropdownBuildConfig<'a> {
    pub title: String,
    pub options: &'a [FilterOption],
    pub state: &'a DropdownListState,
    pub anchor_x: u16,
    pub depth: ColorDepth,
    pub title_color: Option<AppColor>,
    pub item_color: Option<AppColor>,
    pub cursor_color: Option<AppColor>,
    pub selected_bg: Option<AppColor>,
    pub border_color: Option<AppColor>,
    pub hint_color: Option<AppColor>,
    pub exclude_color: Option<AppColor>,
}

impl RenderedFilterDropdown {
    /// Build a dropdown overlay with themed colors.
    pub fn build(cfg: &DropdownBuildConfig<'_>) -> Self {
        let depth = cfg.depth;
        let state = cfg.state;

        let items: Vec<RenderedDropdownItem> = cfg
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| RenderedDropdownItem {
                checkbox: if state.is_checked(option.id) {
                    "[x]".to_owned()
                } else {
                    "[ ]".to_owned()
                },
                label: option.name.clone(),
                dot: option
                    .color
                    .as_deref()
                    .and_then(AppColor::parse_catalog)
                    .map(|c| c.to_crossterm_color(depth)),
                is_cursor: i == state.cursor,
            })
            .collect();

        let longest_label = cfg
            .options
            .iter()
            .map(|o| o.name.chars().count())
            .max()
            .unwrap_or(0);
        #[allow(clippy::cast_possible_truncation)]
        let width = (longest_label as u32 + 10).clamp(26, 44);

        let mode_text = if state.exclude {
            "exclude".to_owned()
        } else {
            "include".to_owned()
        };
        let mode_fg = if state.exclude {
            cfg.exclude_color
                .map_or(Color::Yellow, |c| c.to_crossterm_color(depth))
        } else {
            cfg.hint_color
                .map_or(Color::Grey, |c| c.to_crossterm_color(depth))
        };

        Self {
            title: cfg.title.clone(),
            mode_text,
            items,
            anchor_x: cfg.anchor_x,
            width,
            title_fg: cfg
                .title_color
                .map_or(Color::White, |c| c.to_crossterm_color(depth)),
            mode_fg,
            item_fg: cfg
                .item_color
                .map_or(Color::Grey, |c| c.to_crossterm_color(depth)),
            cursor_fg: cfg
                .cursor_color
                .map_or(Color::White, |c| c.to_crossterm_color(depth)),
            cursor_bg: cfg
                .selected_bg
                .map_or(Color::DarkGrey, |c| c.to_crossterm_color(depth)),
            border_fg: cfg
                .border_color
                .map_or(Color::DarkGrey, |c| c.to_crossterm_color(depth)),
            hint_fg: cfg
                .hint_color
                .map_or(Color::Grey, |c| c.to_crossterm_color(depth)),
        }
    }
}

// ---------------------------------------------------------------------------
// FilterDropdown component
// ---------------------------------------------------------------------------

#[derive(Default, Props)]
pub struct FilterDropdownProps {
    pub dropdown: Option<RenderedFilterDropdown>,
    pub width: u16,
    pub height: u16,
}

#[component]
pub fn FilterDropdown(props: &mut FilterDropdownProps) -> impl Into<AnyElement<'static>> {
    let Some(dd) = props.dropdown.take() else {
        return element! { View }.into_any();
    };

    let term_width = u32::from(props.width);
    let term_height = u32::from(props.height);

    #[allow(clippy::cast_possible_truncation)]
    let content_height = (dd.items.len() as u32 + 4).min(term_height.saturating_sub(3));
    let overlay_width = dd.width.min(term_width.saturating_sub(2));
    // Clamp so the overlay never runs off the right edge.
    let pad_left = u32::from(dd.anchor_x).min(term_width.saturating_sub(overlay_width));

    element! {
        View(
            width: term_width,
            height: term_height,
            position: Position::Absolute,
        ) {
            View(
                margin_left: pad_left,
                margin_top: 1,
                width: overlay_width,
                height: content_height,
                flex_direction: FlexDirection::Column,
                border_style: BorderStyle::Round,
                border_color: dd.border_fg,
                background_color: Color::Reset,
                overflow: Overflow::Hidden,
            ) {
                // Title row
                View(
                    border_style: BorderStyle::Single,
                    border_edges: Edges::Bottom,
                    border_color: dd.border_fg,
                    padding_left: 1,
                    padding_right: 1,
                ) {
                    Text(
                        content: dd.title,
                        color: dd.title_fg,
                        weight: Weight::Bold,
                        wrap: TextWrap::NoWrap,
                    )
                    Text(content: " \u{00b7} ", color: dd.hint_fg, wrap: TextWrap::NoWrap)
                    Text(content: dd.mode_text, color: dd.mode_fg, wrap: TextWrap::NoWrap)
                    View(flex_grow: 1.0)
                    Text(
                        content: "\u{2423} x Enter Esc",
                        color: dd.hint_fg,
                        wrap: TextWrap::NoWrap,
                    )
                }

                // Options
                View(
                    flex_grow: 1.0,
                    flex_direction: FlexDirection::Column,
                    padding_left: 1,
                    padding_right: 1,
                    overflow: Overflow::Hidden,
                ) {
                    #(dd.items.into_iter().enumerate().map(|(i, item)| {
                        let fg = if item.is_cursor { dd.cursor_fg } else { dd.item_fg };
                        let bg = if item.is_cursor { dd.cursor_bg } else { Color::Reset };
                        let marker = if item.is_cursor { "\u{25b6} " } else { "  " };
                        element! {
                            View(key: i, background_color: bg) {
                                Text(
                                    content: format!("{marker}{} ", item.checkbox),
                                    color: fg,
                                    wrap: TextWrap::NoWrap,
                                )
                                #(item.dot.into_iter().map(|dot_fg| {
                                    element! {
                                        Text(
                                            content: "\u{25cf} ",
                                            color: dot_fg,
                                            wrap: TextWrap::NoWrap,
                                        )
                                    }
                                }))
                                Text(content: item.label, color: fg, wrap: TextWrap::NoWrap)
                            }
                        }.into_any()
                    }))
                }
            }
        }
    }
    .into_any()
}
