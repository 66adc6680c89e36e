use iocraft::prelude::*;

use crate::color::{Color as AppColor, ColorDepth};
use crate::components::dropdown::{
    DropdownBuildConfig, DropdownListState, FilterDropdown, RenderedFilterDropdown,
};
use crate::components::filter_bar::{
    AddFilterMenu, DropdownSet, FilterBar, FilterBarBuildConfig, RenderedAddFilterMenu,
    RenderedFilterBar, anchor_target, available_dimensions, build_chips,
};
use crate::components::footer::{Footer, RenderedFooter, format_counts};
use crate::components::table::{
    Cell, Column, RenderedTable, Row, ScrollableTable, Span, TableBuildConfig,
};
use crate::engine::{EngineHandle, Event, Request};
use crate::filters::{Dimension, Filters};
use crate::labels::ResolvedLabels;
use crate::metadata;
use crate::search;
use crate::theme::{Background, ResolvedTheme};
use crate::types::{Issue, MetadataMap, Project};

// ---------------------------------------------------------------------------
// Column definitions
// ---------------------------------------------------------------------------

fn issue_columns(labels: &ResolvedLabels) -> Vec<Column> {
    vec![
        Column {
            id: "subject".to_owned(),
            header: labels.col_subject.clone(),
            default_width_pct: 0.34,
            align: TextAlign::Left,
            fixed_width: None,
        },
        Column {
            id: "project".to_owned(),
            header: labels.col_project.clone(),
            default_width_pct: 0.12,
            align: TextAlign::Left,
            fixed_width: None,
        },
        Column {
            id: "status".to_owned(),
            header: labels.col_status.clone(),
            default_width_pct: 0.14,
            align: TextAlign::Left,
            fixed_width: None,
        },
        Column {
            id: "priority_severity".to_owned(),
            header: labels.col_priority_severity.clone(),
            default_width_pct: 0.14,
            align: TextAlign::Left,
            fixed_width: None,
        },
        Column {
            id: "type".to_owned(),
            header: labels.col_type.clone(),
            default_width_pct: 0.12,
            align: TextAlign::Left,
            fixed_width: None,
        },
        Column {
            id: "assignee".to_owned(),
            header: labels.col_assignee.clone(),
            default_width_pct: 0.14,
            align: TextAlign::Left,
            fixed_width: None,
        },
        Column {
            id: "modified".to_owned(),
            header: labels.col_modified.clone(),
            default_width_pct: 0.0,
            align: TextAlign::Right,
            fixed_width: Some(8),
        },
    ]
}

/// Convert an `Issue` into a table `Row`.
///
/// Priority, severity and type are resolved once here, at row scope, and the
/// results feed every cell of the row — cells never re-scan the catalogs.
#[allow(clippy::too_many_arguments)]
fn issue_to_row(
    issue: &Issue,
    metadata: &MetadataMap,
    projects: &[Project],
    theme: &ResolvedTheme,
    labels: &ResolvedLabels,
    background: Background,
    date_format: &str,
) -> Row {
    let priority = metadata::resolve(issue, Dimension::Priority, metadata);
    let severity = metadata::resolve(issue, Dimension::Severity, metadata);
    let issue_type = metadata::resolve(issue, Dimension::Type, metadata);

    let mut row = Row::new();

    // Subject: "#id Subject"
    row.insert(
        "subject".to_owned(),
        Cell::from_spans(vec![
            Span::colored(format!("#{} ", issue.id), theme.text_faint),
            Span::colored(issue.subject.clone(), theme.text_primary),
        ]),
    );

    row.insert(
        "project".to_owned(),
        Cell::colored(
            metadata::project_name(projects, issue.project),
            theme.text_secondary,
        ),
    );

    // Status badge straight from the denormalized fields — no catalog lookup.
    let status_color = issue
        .status_color
        .as_deref()
        .and_then(AppColor::parse_catalog)
        .unwrap_or(theme.text_secondary);
    let status_name = issue
        .status_name
        .clone()
        .unwrap_or_else(|| issue.status.to_string());
    row.insert(
        "status".to_owned(),
        Cell::from_spans(vec![Span::badge(
            format!(" \u{25cf} {status_name} "),
            status_color,
            status_color.tint(background),
        )]),
    );

    // Priority over severity, stacked inside one cell.
    let mini_row = |entry: Option<&crate::types::CatalogEntry>| -> Vec<Span> {
        match entry {
            Some(e) => {
                let color = AppColor::parse_catalog(&e.color).unwrap_or(theme.text_secondary);
                vec![
                    Span::colored("\u{25cf} ".to_owned(), color),
                    Span::colored(e.name.clone(), theme.text_secondary),
                ]
            }
            None => vec![Span::colored(labels.placeholder.clone(), theme.text_faint)],
        }
    };
    row.insert(
        "priority_severity".to_owned(),
        Cell::from_spans(mini_row(priority)).with_secondary(mini_row(severity)),
    );

    let type_cell = match issue_type {
        Some(e) => {
            let color = AppColor::parse_catalog(&e.color).unwrap_or(theme.text_secondary);
            Cell::from_spans(vec![Span::badge(
                format!(" \u{25cf} {} ", e.name),
                color,
                color.tint(background),
            )])
        }
        None => Cell::colored(labels.placeholder.clone(), theme.text_faint),
    };
    row.insert("type".to_owned(), type_cell);

    let assignee_cell = match &issue.assigned_to_name {
        Some(name) => Cell::colored(name.clone(), theme.text_actor),
        None => Cell::colored(labels.unassigned.clone(), theme.text_faint),
    };
    row.insert("assignee".to_owned(), assignee_cell);

    let modified = issue
        .modified_date
        .as_ref()
        .map_or_else(String::new, |dt| crate::util::format_date(dt, date_format));
    row.insert(
        "modified".to_owned(),
        Cell::colored(modified, theme.text_faint),
    );

    row
}

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

/// Data pushed up by the engine.
#[derive(Debug, Clone)]
struct DashboardData {
    issues: Vec<Issue>,
    projects: Vec<Project>,
    metadata: MetadataMap,
    loading: bool,
    error: Option<String>,
}

impl Default for DashboardData {
    fn default() -> Self {
        Self {
            issues: Vec::new(),
            projects: Vec::new(),
            metadata: MetadataMap::new(),
            loading: true,
            error: None,
        }
    }
}

/// Editing state of the one dropdown currently receiving keys.
#[derive(Debug, Clone)]
struct DropdownEdit {
    dimension: Dimension,
    list: DropdownListState,
}

// ---------------------------------------------------------------------------
// IssuesView component
// ---------------------------------------------------------------------------

#[derive(Default, Props)]
pub struct IssuesViewProps<'a> {
    /// Engine handle.
    pub engine: Option<&'a EngineHandle>,
    pub theme: Option<&'a ResolvedTheme>,
    pub labels: Option<&'a ResolvedLabels>,
    pub color_depth: ColorDepth,
    pub background: Option<Background>,
    pub width: u16,
    pub height: u16,
    pub date_format: Option<&'a str>,
    pub show_filter_count: bool,
    pub show_separator: bool,
    pub should_exit: Option<State<bool>>,
    /// Set to the issue id when the user activates a row.
    pub on_issue_select: Option<State<Option<i64>>>,
}

#[component]
#[allow(clippy::too_many_lines)]
pub fn IssuesView<'a>(props: &IssuesViewProps<'a>, mut hooks: Hooks) -> impl Into<AnyElement<'a>> {
    let theme = props.theme.cloned().unwrap_or_else(default_theme);
    let labels = props.labels.cloned().unwrap_or_default();
    let depth = props.color_depth;
    let background = props.background.unwrap_or(Background::Dark);
    let should_exit = props.should_exit;
    let on_issue_select = props.on_issue_select;

    // The canonical filter object, fully replaced on every apply/remove.
    let mut filters = hooks.use_state(Filters::default);

    // Filter bar state.
    let mut dropdowns = hooks.use_state(DropdownSet::default);
    let mut opened_from_add_filter = hooks.use_state(|| Option::<Dimension>::None);
    let mut dropdown_edit = hooks.use_state(|| Option::<DropdownEdit>::None);
    let mut add_menu_open = hooks.use_state(|| false);
    let mut add_menu_cursor = hooks.use_state(|| 0usize);
    let mut chip_cursor = hooks.use_state(|| 0usize);

    // Table state.
    let mut cursor = hooks.use_state(|| 0usize);
    let mut scroll_offset = hooks.use_state(|| 0usize);

    // Search state.
    let mut search_active = hooks.use_state(|| false);
    let mut search_query = hooks.use_state(String::new);

    // Status line (selection feedback or fetch errors).
    let mut status_line = hooks.use_state(|| Option::<String>::None);

    // Engine data and fetch tracking.
    let mut data = hooks.use_state(DashboardData::default);
    let mut in_flight = hooks.use_state(|| false);
    let mut force_refresh = hooks.use_state(|| false);
    let mut last_query = hooks.use_state(|| Option::<Filters>::None);
    let mut projects_requested = hooks.use_state(|| false);

    // Event channel: engine pushes events back to the UI.
    let event_channel = hooks.use_state(|| {
        let (tx, rx) = std::sync::mpsc::channel::<Event>();
        (tx, std::sync::Arc::new(std::sync::Mutex::new(rx)))
    });
    let (event_tx, event_rx_arc) = event_channel.read().clone();
    let engine: Option<EngineHandle> = props.engine.cloned();

    // Auto-clear: once every per-dimension dropdown is closed, the stale
    // add-filter anchor target must not leak into the next open.
    if opened_from_add_filter.read().is_some() && dropdowns.get().all_closed() {
        opened_from_add_filter.set(None);
    }

    // Initial project/metadata fetch.
    if !projects_requested.get()
        && let Some(ref eng) = engine
    {
        eng.send(Request::FetchProjects {
            reply_tx: event_tx.clone(),
        });
        projects_requested.set(true);
    }

    // Issue fetch: triggered whenever the normalized filters differ from the
    // last requested query (initial load included).
    let current_query = filters.read().normalized();
    let query_changed = last_query.read().as_ref() != Some(&current_query);
    if (query_changed || force_refresh.get())
        && !in_flight.get()
        && let Some(ref eng) = engine
    {
        let force = force_refresh.get();
        if force {
            force_refresh.set(false);
        }
        eng.send(Request::FetchIssues {
            filters: filters.read().clone(),
            force,
            reply_tx: event_tx.clone(),
        });
        last_query.set(Some(current_query));
        in_flight.set(true);
    }

    // Event polling: drain events from the engine reply channel.
    {
        let rx_for_poll = event_rx_arc.clone();
        hooks.use_future(async move {
            loop {
                smol::Timer::after(std::time::Duration::from_millis(100)).await;
                let events: Vec<Event> = {
                    let rx = rx_for_poll.lock().unwrap();
                    let mut evts = Vec::new();
                    while let Ok(evt) = rx.try_recv() {
                        evts.push(evt);
                    }
                    evts
                };
                for evt in events {
                    match evt {
                        Event::ProjectsFetched { projects, metadata } => {
                            let mut snapshot = data.read().clone();
                            snapshot.projects = projects;
                            snapshot.metadata = metadata;
                            data.set(snapshot);
                        }
                        Event::IssuesFetched { issues } => {
                            let mut snapshot = data.read().clone();
                            snapshot.issues = issues;
                            snapshot.loading = false;
                            snapshot.error = None;
                            data.set(snapshot);
                            in_flight.set(false);
                        }
                        Event::FetchError { context, message } => {
                            let mut snapshot = data.read().clone();
                            snapshot.loading = false;
                            snapshot.error = Some(format!("{context}: {message}"));
                            data.set(snapshot);
                            if context == "issues" {
                                in_flight.set(false);
                            }
                        }
                    }
                }
            }
        });
    }

    // Keyboard handling.
    hooks.use_terminal_events({
        move |event| match event {
            TerminalEvent::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) if kind != KeyEventKind::Release => {
                // Search input swallows everything first.
                if search_active.get() {
                    match code {
                        KeyCode::Esc => {
                            search_active.set(false);
                            search_query.set(String::new());
                        }
                        KeyCode::Enter => {
                            search_active.set(false);
                        }
                        KeyCode::Backspace => {
                            let mut q = search_query.read().clone();
                            q.pop();
                            search_query.set(q);
                            cursor.set(0);
                            scroll_offset.set(0);
                        }
                        KeyCode::Char(ch) if !modifiers.contains(KeyModifiers::CONTROL) => {
                            let mut q = search_query.read().clone();
                            q.push(ch);
                            search_query.set(q);
                            cursor.set(0);
                            scroll_offset.set(0);
                        }
                        _ => {}
                    }
                    return;
                }

                // An open dropdown receives keys next.
                if let Some(edit) = dropdown_edit.read().clone() {
                    handle_dropdown_input(
                        code,
                        edit,
                        &data,
                        dropdown_edit,
                        dropdowns,
                        filters,
                        chip_cursor,
                        status_line,
                    );
                    return;
                }

                // Then the add-filter menu.
                if add_menu_open.get() {
                    let available = available_dimensions(&filters.read());
                    match code {
                        KeyCode::Esc => add_menu_open.set(false),
                        KeyCode::Char('j') | KeyCode::Down => {
                            if !available.is_empty() {
                                add_menu_cursor.set((add_menu_cursor.get() + 1) % available.len());
                            }
                        }
                        KeyCode::Char('k') | KeyCode::Up => {
                            if !available.is_empty() {
                                let cur = add_menu_cursor.get();
                                add_menu_cursor.set(if cur == 0 {
                                    available.len() - 1
                                } else {
                                    cur - 1
                                });
                            }
                        }
                        KeyCode::Enter => {
                            if let Some(&dimension) =
                                available.get(add_menu_cursor.get().min(available.len().saturating_sub(1)))
                            {
                                // The add-filter flow: close the menu, record
                                // the origin, open the dimension's dropdown.
                                add_menu_open.set(false);
                                opened_from_add_filter.set(Some(dimension));
                                open_dropdown(dimension, &filters, dropdowns, dropdown_edit);
                            }
                        }
                        _ => {}
                    }
                    return;
                }

                // Normal mode.
                match code {
                    KeyCode::Char('q') => {
                        if let Some(mut exit) = should_exit {
                            exit.set(true);
                        }
                    }
                    KeyCode::Char('j') | KeyCode::Down => {
                        cursor.set(cursor.get() + 1);
                    }
                    KeyCode::Char('k') | KeyCode::Up => {
                        cursor.set(cursor.get().saturating_sub(1));
                    }
                    KeyCode::Char('g') => {
                        cursor.set(0);
                        scroll_offset.set(0);
                    }
                    KeyCode::Char('r') => {
                        force_refresh.set(true);
                        status_line.set(None);
                    }
                    KeyCode::Char('/') => {
                        search_active.set(true);
                        search_query.set(String::new());
                        status_line.set(None);
                    }
                    KeyCode::Char('f') => {
                        if !available_dimensions(&filters.read()).is_empty() {
                            add_menu_cursor.set(0);
                            add_menu_open.set(true);
                        }
                    }
                    KeyCode::Char('h') | KeyCode::Left => {
                        chip_cursor.set(chip_cursor.get().saturating_sub(1));
                    }
                    KeyCode::Char('l') | KeyCode::Right => {
                        chip_cursor.set(chip_cursor.get() + 1);
                    }
                    KeyCode::Char('e') => {
                        let active = filters.read().active_dimensions();
                        if let Some(&dimension) =
                            active.get(chip_cursor.get().min(active.len().saturating_sub(1)))
                        {
                            // Opened from its own chip: the add-filter origin
                            // stays unset and the dropdown anchors to the chip.
                            open_dropdown(dimension, &filters, dropdowns, dropdown_edit);
                        }
                    }
                    KeyCode::Char('x') | KeyCode::Backspace => {
                        let active = filters.read().active_dimensions();
                        if let Some(&dimension) =
                            active.get(chip_cursor.get().min(active.len().saturating_sub(1)))
                        {
                            let next = filters.read().remove(dimension);
                            filters.set(next);
                            chip_cursor.set(chip_cursor.get().saturating_sub(1));
                        }
                    }
                    KeyCode::Enter => {
                        let snapshot = data.read();
                        if let Some(issue) = snapshot.issues.get(cursor.get()) {
                            status_line
                                .set(Some(format!("Selected #{} {}", issue.id, issue.subject)));
                            if let Some(mut select) = on_issue_select {
                                select.set(Some(issue.id));
                            }
                        }
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    });

    // ------------------------------------------------------------------
    // Render
    // ------------------------------------------------------------------

    let snapshot = data.read().clone();
    let filters_snapshot = filters.read().clone();

    let chips = build_chips(
        &filters_snapshot,
        &snapshot.metadata,
        &snapshot.projects,
        &labels,
    );
    let focused_chip = if chips.is_empty() {
        None
    } else {
        Some(chip_cursor.get().min(chips.len() - 1))
    };

    let bar = RenderedFilterBar::build(&FilterBarBuildConfig {
        chips: &chips,
        focused: focused_chip,
        active_filter_count: filters_snapshot.active_filter_count(),
        show_filter_count: props.show_filter_count,
        labels: &labels,
        theme: &theme,
        depth,
    });

    // Rows: resolve each issue once, then apply the substring search.
    let date_format = props.date_format.unwrap_or("relative");
    let all_rows: Vec<Row> = snapshot
        .issues
        .iter()
        .map(|issue| {
            issue_to_row(
                issue,
                &snapshot.metadata,
                &snapshot.projects,
                &theme,
                &labels,
                background,
                date_format,
            )
        })
        .collect();
    let search_q = search_query.read().clone();
    let filtered_indices = search::filter_rows(&all_rows, &search_q);
    let filtered_rows: Vec<Row> = filtered_indices
        .iter()
        .filter_map(|&i| all_rows.get(i).cloned())
        .collect();

    // Clamp cursor and scroll to the filtered row count; rows are two lines.
    let visible_rows = (usize::from(props.height.saturating_sub(6)) / 2).max(1);
    let max_cursor = filtered_rows.len().saturating_sub(1);
    if cursor.get() > max_cursor {
        cursor.set(max_cursor);
    }
    if cursor.get() < scroll_offset.get() {
        scroll_offset.set(cursor.get());
    } else if cursor.get() >= scroll_offset.get() + visible_rows {
        scroll_offset.set(cursor.get() + 1 - visible_rows);
    }

    let empty_message = if snapshot.loading {
        labels.loading.clone()
    } else {
        labels.no_issues.clone()
    };
    let rendered_table = RenderedTable::build(&TableBuildConfig {
        columns: &issue_columns(&labels),
        rows: &filtered_rows,
        cursor: cursor.get(),
        scroll_offset: scroll_offset.get(),
        visible_rows,
        total_width: props.width,
        depth,
        selected_bg: Some(theme.bg_selected),
        header_color: Some(theme.text_secondary),
        border_color: Some(theme.border_faint),
        show_separator: props.show_separator,
        empty_message: Some(&empty_message),
    });

    let status_text = if search_active.get() {
        format!("/{search_q}")
    } else if let Some(error) = &snapshot.error {
        error.clone()
    } else {
        status_line.read().clone().unwrap_or_default()
    };
    let status_is_error = !search_active.get() && snapshot.error.is_some();
    let rendered_footer = RenderedFooter::build(
        format_counts(filtered_rows.len(), filters_snapshot.active_filter_count()),
        status_text,
        status_is_error,
        depth,
        Some(theme.text_faint),
        Some(theme.text_error),
        Some(theme.border_faint),
    );

    // Dropdown overlay for the dimension currently being edited.
    let rendered_dropdown = dropdown_edit.read().as_ref().map(|edit| {
        let options = metadata::options(edit.dimension, &snapshot.metadata, &snapshot.projects);
        let target = anchor_target(
            edit.dimension,
            filters_snapshot.has_filter(edit.dimension),
            opened_from_add_filter.get(),
        );
        RenderedFilterDropdown::build(&DropdownBuildConfig {
            title: edit.dimension.label(&labels).to_owned(),
            options: &options,
            state: &edit.list,
            anchor_x: bar.anchor_x(&chips, edit.dimension, target),
            depth,
            title_color: Some(theme.text_primary),
            item_color: Some(theme.text_secondary),
            cursor_color: Some(theme.text_primary),
            selected_bg: Some(theme.bg_selected),
            border_color: Some(theme.border_primary),
            hint_color: Some(theme.text_faint),
            exclude_color: Some(theme.text_warning),
        })
    });

    let rendered_menu = if add_menu_open.get() {
        let available = available_dimensions(&filters_snapshot);
        Some(RenderedAddFilterMenu::build(
            &available,
            add_menu_cursor.get().min(available.len().saturating_sub(1)),
            bar.add_button_x,
            &labels,
            &theme,
            depth,
        ))
    } else {
        None
    };

    let bar_for_render = bar;

    element! {
        View(flex_direction: FlexDirection::Column, width: u32::from(props.width), height: u32::from(props.height)) {
            FilterBar(bar: bar_for_render)
            View(flex_grow: 1.0, flex_direction: FlexDirection::Column) {
                ScrollableTable(table: rendered_table)
            }
            Footer(footer: rendered_footer)
            FilterDropdown(dropdown: rendered_dropdown, width: props.width, height: props.height)
            AddFilterMenu(menu: rendered_menu, width: props.width, height: props.height)
        }
    }
    .into_any()
}

// ---------------------------------------------------------------------------
// Dropdown plumbing
// ---------------------------------------------------------------------------

/// Open a dimension's dropdown and seed its editing state from the current
/// selection.
fn open_dropdown(
    dimension: Dimension,
    filters: &State<Filters>,
    mut dropdowns: State<DropdownSet>,
    mut dropdown_edit: State<Option<DropdownEdit>>,
) {
    let current = filters.read();
    let list = DropdownListState::new(
        current.ids(dimension).unwrap_or(&[]),
        current.exclude(dimension),
    );
    let mut set = dropdowns.get();
    set.open(dimension);
    dropdowns.set(set);
    dropdown_edit.set(Some(DropdownEdit { dimension, list }));
}

/// Keys routed to the open dropdown: navigate, toggle, flip exclude, apply
/// or cancel. Apply closes the dropdown and commits a fully-replaced
/// `Filters`; cancel discards the edit.
#[allow(clippy::too_many_arguments)]
fn handle_dropdown_input(
    code: KeyCode,
    mut edit: DropdownEdit,
    data: &State<DashboardData>,
    mut dropdown_edit: State<Option<DropdownEdit>>,
    mut dropdowns: State<DropdownSet>,
    mut filters: State<Filters>,
    mut chip_cursor: State<usize>,
    mut status_line: State<Option<String>>,
) {
    let snapshot = data.read();
    let options = metadata::options(edit.dimension, &snapshot.metadata, &snapshot.projects);
    drop(snapshot);

    match code {
        KeyCode::Char('j') | KeyCode::Down => {
            edit.list.move_down(options.len());
            dropdown_edit.set(Some(edit));
        }
        KeyCode::Char('k') | KeyCode::Up => {
            edit.list.move_up(options.len());
            dropdown_edit.set(Some(edit));
        }
        KeyCode::Char(' ') => {
            edit.list.toggle_current(&options);
            dropdown_edit.set(Some(edit));
        }
        KeyCode::Char('x') => {
            edit.list.toggle_exclude();
            dropdown_edit.set(Some(edit));
        }
        KeyCode::Enter => {
            let dimension = edit.dimension;
            let next = filters
                .read()
                .apply(dimension, edit.list.checked.clone(), edit.list.exclude);
            let mut set = dropdowns.get();
            set.close(dimension);
            dropdowns.set(set);
            dropdown_edit.set(None);
            // Keep the bar cursor on the edited chip when it still exists.
            let chip_count = next.active_filter_count();
            if chip_cursor.get() >= chip_count {
                chip_cursor.set(chip_count.saturating_sub(1));
            }
            filters.set(next);
            status_line.set(None);
        }
        KeyCode::Esc => {
            let mut set = dropdowns.get();
            set.close(edit.dimension);
            dropdowns.set(set);
            dropdown_edit.set(None);
        }
        _ => {}
    }
}

fn default_theme() -> ResolvedTheme {
    use crate::config::types::Theme;
    ResolvedTheme::resolve(&Theme::default(), Background::Dark)
}
