use crate::app_state::{App, FocusArea, InputMode, ViewMode};
use crate::model::{Alumni, Event, News};
use crate::query::Selection;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

const NO_VALUE: &str = "-";

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Min(8),
        ])
        .split(f.size());

    render_top_bar(f, chunks[0]);

    let middle_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(22), Constraint::Min(0)])
        .split(chunks[1]);

    render_left_menu(f, middle_chunks[0], app);
    render_main_view(f, middle_chunks[1], app);
    render_bottom_bar(f, chunks[2], app);
}

fn render_top_bar(f: &mut Frame, area: Rect) {
    let title = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Cyan));

    let title_text = Line::from(vec![
        Span::styled(
            " Alumni Admin ",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" - alumni, events and news"),
    ]);

    let paragraph = Paragraph::new(title_text)
        .block(title)
        .alignment(ratatui::layout::Alignment::Center);

    f.render_widget(paragraph, area);
}

fn render_left_menu(f: &mut Frame, area: Rect, app: &App) {
    let menu_items: Vec<ListItem> = ViewMode::MENU
        .iter()
        .enumerate()
        .map(|(i, view)| {
            let is_selected = i == app.menu_selected_index;
            let is_active = *view == app.view_mode;

            let style = if is_selected {
                if app.focus_area == FocusArea::Menu {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Magenta)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD)
                }
            } else if is_active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };

            let prefix = if is_active { "● " } else { "○ " };
            ListItem::new(format!("{}{}", prefix, view.title())).style(style)
        })
        .collect();

    let title = if app.focus_area == FocusArea::Menu {
        "Menu (Enter)"
    } else {
        "Menu (← focus)"
    };

    let menu = List::new(menu_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .style(focus_style(app.focus_area == FocusArea::Menu)),
    );

    f.render_widget(menu, area);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    }
}

fn highlight() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::White)
        .add_modifier(Modifier::BOLD)
}

fn opt(v: &Option<String>) -> &str {
    v.as_deref().unwrap_or(NO_VALUE)
}

fn yes_no(v: Option<bool>) -> &'static str {
    match v {
        Some(true) => "yes",
        Some(false) => "no",
        None => NO_VALUE,
    }
}

fn filter_label(name: &str, sel: &Selection<String>) -> String {
    match sel {
        Selection::Any => format!("{}: all", name),
        Selection::Only(v) => format!("{}: {}", name, v),
    }
}

fn render_main_view(f: &mut Frame, area: Rect, app: &mut App) {
    let focused = app.focus_area == FocusArea::MainView;
    if app.is_loading() {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(app.view_mode.title())
            .style(focus_style(focused));
        f.render_widget(Paragraph::new("Loading...").block(block), area);
        return;
    }

    match app.view_mode {
        ViewMode::Dashboard => render_dashboard(f, area, app, focused),
        ViewMode::Alumni => {
            let items: Vec<ListItem> = app.alumni_list.iter().map(alumni_row).collect();
            let flt = &app.alumni_filter;
            let title = format!(
                "Alumni {}/{} [{} | {} | {} | {}] (y/i/l cycle, x clear)",
                app.alumni_list.len(),
                app.alumni.records().len(),
                filter_label("search", &flt.search),
                filter_label("year", &flt.graduation_year),
                filter_label("industry", &flt.industry),
                filter_label("location", &flt.location),
            );
            render_list(f, area, app, items, title, "No alumni match the current filters");
        }
        ViewMode::Events => {
            let items: Vec<ListItem> = app.event_list.iter().map(event_row).collect();
            let flt = &app.event_filter;
            let title = format!(
                "Events {}/{} [{} | type: {} | registration: {}] (t/e/r cycle, x clear)",
                app.event_list.len(),
                app.events.records().len(),
                flt.window.label(),
                match &flt.event_type {
                    Selection::Any => "all",
                    Selection::Only(t) => t.label(),
                },
                flt.registration_required.label(),
            );
            render_list(f, area, app, items, title, "No events in this view");
        }
        ViewMode::News => {
            let items: Vec<ListItem> = app.news_list.iter().map(news_row).collect();
            let flt = &app.news_filter;
            let title = format!(
                "News {}/{} [{} | {} | category: {} | published: {}] (t/g/p cycle, x clear)",
                app.news_list.len(),
                app.news.records().len(),
                flt.tab.label(),
                filter_label("search", &flt.search),
                match &flt.category {
                    Selection::Any => "all",
                    Selection::Only(c) => c.label(),
                },
                flt.published.label(),
            );
            render_list(f, area, app, items, title, "No articles match the current filters");
        }
    }
}

fn render_list(
    f: &mut Frame,
    area: Rect,
    app: &mut App,
    items: Vec<ListItem>,
    title: String,
    empty: &str,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .style(focus_style(app.focus_area == FocusArea::MainView));
    if items.is_empty() {
        f.render_widget(Paragraph::new(empty.to_string()).block(block), area);
        return;
    }
    let list = List::new(items)
        .block(block)
        .highlight_style(highlight())
        .highlight_symbol(">> ");
    app.list_state.select(Some(app.selected_index));
    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn alumni_row(a: &Alumni) -> ListItem<'static> {
    let p = &a.data;
    let (mark, color) = if p.is_active.counts_as_active() {
        ("●", Color::Green)
    } else {
        ("○", Color::DarkGray)
    };
    let year = p
        .graduation_year
        .map(|y| y.to_string())
        .unwrap_or_else(|| NO_VALUE.to_string());
    let mut spans = vec![
        Span::styled(format!("{} ", mark), Style::default().fg(color)),
        Span::styled(
            format!("{:<24}", p.display_name()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{:<6}", year), Style::default().fg(Color::Cyan)),
        Span::raw(format!(
            "{} @ {} | ",
            opt(&p.current_position),
            opt(&p.current_company)
        )),
        Span::styled(opt(&p.industry).to_string(), Style::default().fg(Color::Yellow)),
        Span::raw(format!(" | {}", opt(&p.location))),
    ];
    if !p.tags.is_empty() {
        spans.push(Span::styled(
            format!("  #{}", p.tags.join(" #")),
            Style::default().fg(Color::Magenta),
        ));
    }
    spans.push(Span::styled(
        format!("  [{}]", a.id),
        Style::default().fg(Color::DarkGray),
    ));
    ListItem::new(Line::from(spans))
}

fn event_row(e: &Event) -> ListItem<'static> {
    let d = &e.data;
    let kind = d.event_type.map(|t| t.label()).unwrap_or(NO_VALUE);
    let star = if d.is_featured == Some(true) { "★ " } else { "  " };
    let capacity = d
        .max_attendees
        .map(|n| format!(" | cap {}", n))
        .unwrap_or_default();
    ListItem::new(Line::from(vec![
        Span::styled(star, Style::default().fg(Color::Yellow)),
        Span::styled(
            format!("{:<11}", opt(&d.event_date)),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{:<12}", kind),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(
            opt(&d.title).to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " | {} | registration {}{}",
            opt(&d.location),
            yes_no(d.registration_required),
            capacity
        )),
        Span::styled(format!("  [{}]", e.id), Style::default().fg(Color::DarkGray)),
    ]))
}

fn news_row(n: &News) -> ListItem<'static> {
    let a = &n.data;
    let (mark, color) = match a.is_published {
        Some(true) => ("✓", Color::Green),
        _ => ("…", Color::DarkGray),
    };
    let star = if a.is_featured == Some(true) { "★" } else { " " };
    let category = a.category.map(|c| c.label()).unwrap_or(NO_VALUE);
    ListItem::new(Line::from(vec![
        Span::styled(format!("{}{} ", mark, star), Style::default().fg(color)),
        Span::styled(
            format!("{:<11}", opt(&a.publish_date)),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{:<20}", category),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(
            opt(&a.title).to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" by {}", opt(&a.author))),
        Span::styled(format!("  [{}]", n.id), Style::default().fg(Color::DarkGray)),
    ]))
}

fn render_dashboard(f: &mut Frame, area: Rect, app: &mut App, focused: bool) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let stats = &app.dashboard.stats;
    let summary = Line::from(vec![
        Span::raw("Total alumni "),
        Span::styled(
            stats.total_alumni.to_string(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Active "),
        Span::styled(
            stats.active_alumni.to_string(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Upcoming events "),
        Span::styled(
            stats.upcoming_events.to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Industries "),
        Span::styled(
            stats.industries.total_categorized.to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(
        Paragraph::new(summary).block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Dashboard [{}]", app.ctx.today_iso()))
                .style(focus_style(focused)),
        ),
        rows[0],
    );

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[1]);

    let industry_items: Vec<ListItem> = stats
        .industries
        .shares
        .iter()
        .map(|s| {
            let bar = "█".repeat((s.percent / 5) as usize);
            ListItem::new(Line::from(vec![
                Span::raw(format!("{:<22}", s.industry)),
                Span::styled(format!("{:<20}", bar), Style::default().fg(Color::Yellow)),
                Span::raw(format!(" {:>3}% ({})", s.percent, s.count)),
            ]))
        })
        .collect();
    let industry_title = if focused {
        "Top industries (Enter opens directory)"
    } else {
        "Top industries"
    };
    render_list(
        f,
        cols[0],
        app,
        industry_items,
        industry_title.to_string(),
        "No industry data yet",
    );

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(cols[1]);

    let snapshot = &app.dashboard;
    let recent: Vec<ListItem> = snapshot.recent_alumni.iter().map(alumni_row).collect();
    let upcoming: Vec<ListItem> = snapshot.upcoming_events.iter().map(event_row).collect();
    let news: Vec<ListItem> = snapshot.recent_news.iter().map(news_row).collect();
    for (items, title, rect) in [
        (recent, "Recent alumni", side[0]),
        (upcoming, "Upcoming events", side[1]),
        (news, "Latest news", side[2]),
    ] {
        let block = Block::default().borders(Borders::ALL).title(title);
        if items.is_empty() {
            f.render_widget(Paragraph::new(NO_VALUE).block(block), rect);
        } else {
            f.render_widget(List::new(items).block(block), rect);
        }
    }
}

fn render_bottom_bar(f: &mut Frame, area: Rect, app: &App) {
    let bottom_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let command_prompt = if app.input_mode == InputMode::Command {
        let mut spans = vec![Span::styled(
            "> ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )];
        let cur = app.command_cursor.min(app.command_input.len());
        let (left, right) = app.command_input.split_at(cur);
        spans.push(Span::raw(left));
        spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(right));

        if let Some(hint) = app.get_completion_hint() {
            spans.push(Span::styled(hint, Style::default().fg(Color::DarkGray)));
        }

        vec![
            Line::from(spans),
            Line::from("Enter run  Esc cancel  Tab complete  ←→ cursor  ↑↓ history"),
        ]
    } else {
        vec![
            Line::from(vec![
                Span::styled("> ", Style::default().fg(Color::Yellow)),
                Span::raw("(press / for a command, `help` lists them)"),
            ]),
            Line::from("←→ focus  ↑↓ move  Enter open  x clear filters  R reload  q quit"),
        ]
    };
    let command_paragraph = Paragraph::new(command_prompt).block(
        Block::default()
            .borders(Borders::ALL)
            .title(if app.input_mode == InputMode::Command {
                "Command"
            } else {
                "Command (/)"
            })
            .style(if app.input_mode == InputMode::Command {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            }),
    );
    f.render_widget(command_paragraph, bottom_chunks[0]);

    let log_items: Vec<ListItem> = app
        .log_messages
        .iter()
        .rev()
        .take(20)
        .map(|msg| {
            let style = if msg.starts_with("error") {
                Style::default().fg(Color::Red)
            } else if msg.starts_with("created")
                || msg.starts_with("updated")
                || msg.starts_with("deleted")
                || msg.starts_with("set ")
            {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(msg.as_str()).style(style)
        })
        .collect();

    let log = List::new(log_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Log ({})", app.log_messages.len()))
            .style(Style::default().fg(Color::White)),
    );
    f.render_widget(log, bottom_chunks[1]);
}
