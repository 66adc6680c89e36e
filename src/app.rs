use iocraft::prelude::*;

use crate::color::ColorDepth;
use crate::config::types::AppConfig;
use crate::engine::EngineHandle;
use crate::labels::ResolvedLabels;
use crate::theme::{Background, ResolvedTheme};
use crate::views::issues::IssuesView;

// ---------------------------------------------------------------------------
// Root App component
// ---------------------------------------------------------------------------

#[derive(Default, Props)]
pub struct AppProps<'a> {
    pub config: Option<&'a AppConfig>,
    pub engine: Option<&'a EngineHandle>,
    pub theme: Option<&'a ResolvedTheme>,
    pub labels: Option<&'a ResolvedLabels>,
    pub color_depth: ColorDepth,
    pub background: Option<Background>,
}

#[component]
pub fn App<'a>(props: &AppProps<'a>, mut hooks: Hooks) -> impl Into<AnyElement<'a>> {
    let (width, height) = hooks.use_terminal_size();
    let mut system = hooks.use_context_mut::<SystemContext>();
    let should_exit = hooks.use_state(|| false);

    // Row-activation passthrough: the issues view reports the selected
    // issue id; opening a detail surface is up to a future consumer.
    let mut selected_issue = hooks.use_state(|| Option::<i64>::None);
    if let Some(issue_id) = selected_issue.get() {
        tracing::debug!(issue_id, "issue selected");
        selected_issue.set(None);
    }

    if should_exit.get() {
        system.exit();
    }

    let config = props.config;
    let show_filter_count = config.is_none_or(|c| c.defaults.show_filter_count);
    let show_separator = config.is_none_or(|c| c.defaults.show_separator);
    let date_format = config.map(|c| c.defaults.date_format.as_str());
    let background = props.background.unwrap_or(Background::Dark);

    element! {
        View(width: u32::from(width), height: u32::from(height), flex_direction: FlexDirection::Column) {
            IssuesView(
                engine: props.engine,
                theme: props.theme,
                labels: props.labels,
                color_depth: props.color_depth,
                background,
                width,
                height,
                date_format,
                show_filter_count,
                show_separator,
                should_exit,
                on_issue_select: selected_issue,
            )
        }
    }
}
