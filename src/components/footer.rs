use iocraft::prelude::*;

use crate::color::{Color as AppColor, ColorDepth};

// ---------------------------------------------------------------------------
// Footer component — status bar under the table
// ---------------------------------------------------------------------------

pub struct RenderedFooter {
    pub counts_text: String,
    pub status_text: String,
    pub status_is_error: bool,
    pub help_hint: String,
    pub text_fg: Color,
    pub error_fg: Color,
    pub border_fg: Color,
}

impl RenderedFooter {
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        counts_text: String,
        status_text: String,
        status_is_error: bool,
        depth: ColorDepth,
        text_color: Option<AppColor>,
        error_color: Option<AppColor>,
        border_color: Option<AppColor>,
    ) -> Self {
        Self {
            counts_text,
            status_text,
            status_is_error,
            help_hint: "f filter  / search  r refresh  q quit".to_owned(),
            text_fg: text_color.map_or(Color::DarkGrey, |c| c.to_crossterm_color(depth)),
            error_fg: error_color.map_or(Color::Red, |c| c.to_crossterm_color(depth)),
            border_fg: border_color.map_or(Color::DarkGrey, |c| c.to_crossterm_color(depth)),
        }
    }
}

/// Format the "N issues · M filters" summary.
pub fn format_counts(issue_count: usize, active_filter_count: usize) -> String {
    let issues = if issue_count == 1 {
        "1 issue".to_owned()
    } else {
        format!("{issue_count} issues")
    };
    if active_filter_count == 0 {
        issues
    } else {
        format!("{issues}  \u{2022}  {active_filter_count} active")
    }
}

#[derive(Default, Props)]
pub struct FooterProps {
    pub footer: Option<RenderedFooter>,
}

#[component]
pub fn Footer(props: &mut FooterProps) -> impl Into<AnyElement<'static>> {
    let Some(f) = props.footer.take() else {
        return element! { View }.into_any();
    };

    let status_fg = if f.status_is_error { f.error_fg } else { f.text_fg };

    element! {
        View(
            border_style: BorderStyle::Single,
            border_edges: Edges::Top,
            border_color: f.border_fg,
            padding_left: 1,
            padding_right: 1,
        ) {
            Text(content: f.counts_text, color: f.text_fg, wrap: TextWrap::NoWrap)
            Text(content: " \u{2502} ", color: f.text_fg, wrap: TextWrap::NoWrap)
            // Status message fills the middle.
            View(flex_grow: 1.0) {
                Text(content: f.status_text, color: status_fg, wrap: TextWrap::NoWrap)
            }
            Text(content: f.help_hint, color: f.text_fg, wrap: TextWrap::NoWrap)
        }
    }
    .into_any()
}
