use crate::app_service::ServiceRequest;
use crate::collection_view::{CollectionView, LoadState};
use crate::commands::{AppCommand, EntityTarget, HELP_TEXT};
use crate::model::{
    Alumni, AlumniProfile, Editable, Event, EventDetails, EventType, FieldEdit, News, NewsArticle,
    NewsCategory,
};
use crate::query::options::{graduation_year_options, industry_options, location_options};
use crate::query::{
    filter_records, AlumniFilter, DashboardSnapshot, EventFilter, NewsFilter, QueryContext,
    Selection,
};
use crossterm::event::KeyCode;
use log::warn;
use ratatui::widgets::ListState;
use std::path::PathBuf;
use std::str::FromStr;
use tokio::sync::mpsc;

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum ViewMode {
    Dashboard,
    Alumni,
    Events,
    News,
}

impl ViewMode {
    pub const MENU: [ViewMode; 4] = [
        ViewMode::Dashboard,
        ViewMode::Alumni,
        ViewMode::Events,
        ViewMode::News,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ViewMode::Dashboard => "Dashboard",
            ViewMode::Alumni => "Alumni Directory",
            ViewMode::Events => "Events",
            ViewMode::News => "News",
        }
    }
}

#[derive(PartialEq, Debug, Clone)]
pub enum InputMode {
    Normal,
    Command,
}

#[derive(PartialEq, Debug, Clone)]
pub enum FocusArea {
    Menu,
    MainView,
}

#[derive(Debug)]
pub enum AppEvent {
    Log(String),
    Message(String),
    Error(String),
    Dashboard(Result<DashboardSnapshot, String>),
    AlumniLoaded(Result<Vec<Alumni>, String>),
    EventsLoaded(Result<Vec<Event>, String>),
    NewsLoaded(Result<Vec<News>, String>),
    MutationDone { target: EntityTarget, message: String },
    MutationFailed { target: EntityTarget, error: String },
}

/// Option lists for the cycling filter keys, rebuilt on every alumni load.
#[derive(Debug, Clone, Default)]
pub struct AlumniOptions {
    pub years: Vec<String>,
    pub industries: Vec<String>,
    pub locations: Vec<String>,
}

pub struct App {
    pub view_mode: ViewMode,
    pub input_mode: InputMode,
    pub focus_area: FocusArea,
    pub menu_selected_index: usize,
    pub ctx: QueryContext,

    pub dashboard: DashboardSnapshot,
    pub dashboard_state: LoadState,

    pub alumni: CollectionView<AlumniProfile>,
    pub alumni_filter: AlumniFilter,
    pub alumni_options: AlumniOptions,
    pub alumni_list: Vec<Alumni>,

    pub events: CollectionView<EventDetails>,
    pub event_filter: EventFilter,
    pub event_list: Vec<Event>,

    pub news: CollectionView<NewsArticle>,
    pub news_filter: NewsFilter,
    pub news_list: Vec<News>,

    pub selected_index: usize,
    pub list_state: ListState,
    pub command_input: String,
    pub command_cursor: usize,
    pub command_history: Vec<String>,
    pub command_history_index: Option<usize>,
    /// Command text of the mutation in flight, put back on failure.
    pub pending_command: Option<String>,
    pub log_messages: Vec<String>,
    pub req_tx: mpsc::UnboundedSender<ServiceRequest>,
    pub evt_rx: Option<mpsc::UnboundedReceiver<AppEvent>>,
}

impl App {
    pub fn new(
        session_info: Vec<String>,
        ctx: QueryContext,
        req_tx: mpsc::UnboundedSender<ServiceRequest>,
        evt_rx: mpsc::UnboundedReceiver<AppEvent>,
    ) -> App {
        let mut log_messages = vec!["alumni admin started".to_string()];
        log_messages.extend(session_info);

        App {
            view_mode: ViewMode::Dashboard,
            input_mode: InputMode::Normal,
            focus_area: FocusArea::Menu,
            menu_selected_index: 0,
            ctx,
            dashboard: DashboardSnapshot::default(),
            dashboard_state: LoadState::Loading,
            alumni: CollectionView::new(),
            alumni_filter: AlumniFilter::default(),
            alumni_options: AlumniOptions::default(),
            alumni_list: Vec::new(),
            events: CollectionView::new(),
            event_filter: EventFilter::default(),
            event_list: Vec::new(),
            news: CollectionView::new(),
            news_filter: NewsFilter::default(),
            news_list: Vec::new(),
            selected_index: 0,
            list_state: {
                let mut s = ListState::default();
                s.select(Some(0));
                s
            },
            command_input: String::new(),
            command_cursor: 0,
            command_history: Vec::new(),
            command_history_index: None,
            pending_command: None,
            log_messages,
            req_tx,
            evt_rx: Some(evt_rx),
        }
    }

    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    fn send(&mut self, req: ServiceRequest) -> bool {
        if self.req_tx.send(req).is_err() {
            warn!("gateway task is gone; request dropped");
            self.add_log("gateway task stopped; restart the app".to_string());
            return false;
        }
        true
    }

    /// Enters `Loading` for `view` and asks the gateway task for fresh data.
    pub fn reload(&mut self, view: ViewMode) {
        match view {
            ViewMode::Dashboard => {
                self.dashboard_state = LoadState::Loading;
                self.send(ServiceRequest::LoadDashboard);
            }
            ViewMode::Alumni => {
                self.alumni.begin_load();
                self.send(ServiceRequest::LoadAlumni);
            }
            ViewMode::Events => {
                self.events.begin_load();
                self.send(ServiceRequest::LoadEvents);
            }
            ViewMode::News => {
                self.news.begin_load();
                self.send(ServiceRequest::LoadNews);
            }
        }
    }

    pub fn open_view(&mut self, view: ViewMode) {
        self.view_mode = view;
        self.menu_selected_index = ViewMode::MENU
            .iter()
            .position(|v| *v == view)
            .unwrap_or(0);
        self.selected_index = 0;
        self.reload(view);
        self.clamp_selection();
    }

    pub fn is_loading(&self) -> bool {
        match self.view_mode {
            ViewMode::Dashboard => self.dashboard_state == LoadState::Loading,
            ViewMode::Alumni => self.alumni.is_loading(),
            ViewMode::Events => self.events.is_loading(),
            ViewMode::News => self.news.is_loading(),
        }
    }

    /// Recomputes every derived list from the loaded collections and the
    /// current predicates.
    pub fn apply_filters(&mut self) {
        self.alumni_list = filter_records(self.alumni.records(), &self.alumni_filter, &self.ctx)
            .into_iter()
            .cloned()
            .collect();
        self.event_list = filter_records(self.events.records(), &self.event_filter, &self.ctx)
            .into_iter()
            .cloned()
            .collect();
        self.news_list = filter_records(self.news.records(), &self.news_filter, &self.ctx)
            .into_iter()
            .cloned()
            .collect();
        self.clamp_selection();
    }

    fn visible_len(&self) -> usize {
        match self.view_mode {
            ViewMode::Dashboard => self.dashboard.stats.industries.shares.len(),
            ViewMode::Alumni => self.alumni_list.len(),
            ViewMode::Events => self.event_list.len(),
            ViewMode::News => self.news_list.len(),
        }
    }

    pub fn clamp_selection(&mut self) {
        let len = self.visible_len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
        self.list_state.select(Some(self.selected_index));
    }

    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Log(msg) | AppEvent::Message(msg) => self.add_log(msg),
            AppEvent::Error(msg) => self.add_log(format!("error: {}", msg)),
            AppEvent::Dashboard(res) => {
                match res {
                    Ok(snapshot) => self.dashboard = snapshot,
                    Err(e) => self.add_log(format!("error: dashboard load failed: {}", e)),
                }
                self.dashboard_state = LoadState::Loaded;
                self.clamp_selection();
            }
            AppEvent::AlumniLoaded(res) => {
                self.note_load_error("alumni", &res);
                self.alumni.finish_load(res);
                let rows = self.alumni.records();
                self.alumni_options = AlumniOptions {
                    years: graduation_year_options(rows),
                    industries: industry_options(rows),
                    locations: location_options(rows),
                };
                self.apply_filters();
            }
            AppEvent::EventsLoaded(res) => {
                self.note_load_error("events", &res);
                self.events.finish_load(res);
                self.apply_filters();
            }
            AppEvent::NewsLoaded(res) => {
                self.note_load_error("news", &res);
                self.news.finish_load(res);
                self.apply_filters();
            }
            AppEvent::MutationDone { target, message } => {
                self.pending_command = None;
                self.add_log(message);
                let view = match target {
                    EntityTarget::Alumni => ViewMode::Alumni,
                    EntityTarget::Event => ViewMode::Events,
                    EntityTarget::News => ViewMode::News,
                };
                self.reload(view);
                if self.view_mode == ViewMode::Dashboard {
                    self.reload(ViewMode::Dashboard);
                }
            }
            AppEvent::MutationFailed { error, .. } => {
                self.add_log(format!("error: {}", error));
                self.restore_pending_command();
            }
        }
    }

    fn note_load_error<T>(&mut self, what: &str, res: &Result<T, String>) {
        if let Err(e) = res {
            self.add_log(format!("error: loading {} failed: {}", what, e));
        }
    }

    fn restore_pending_command(&mut self) {
        if let Some(cmd) = self.pending_command.take() {
            self.return_to_command_line(cmd);
        }
    }

    fn return_to_command_line(&mut self, cmd: String) {
        self.command_cursor = cmd.len();
        self.command_input = cmd;
        self.input_mode = InputMode::Command;
    }

    fn set_search(&mut self, term: &str) {
        let search = Selection::from_input(term);
        match self.view_mode {
            ViewMode::Alumni => self.alumni_filter.search = search,
            ViewMode::News => self.news_filter.search = search,
            ViewMode::Events | ViewMode::Dashboard => {
                self.add_log("search applies to the alumni and news views".to_string());
                return;
            }
        }
        self.apply_filters();
    }

    pub fn clear_filters(&mut self) {
        match self.view_mode {
            ViewMode::Alumni => self.alumni_filter = AlumniFilter::default(),
            ViewMode::Events => self.event_filter = EventFilter::default(),
            ViewMode::News => self.news_filter = NewsFilter::default(),
            ViewMode::Dashboard => return,
        }
        self.apply_filters();
    }

    fn build_create(
        &self,
        target: EntityTarget,
        edits: &[FieldEdit],
    ) -> Result<ServiceRequest, String> {
        Ok(match target {
            EntityTarget::Alumni => {
                let mut data = AlumniProfile::new_profile();
                data.apply_edits(edits).map_err(|e| e.to_string())?;
                ServiceRequest::CreateAlumni(data)
            }
            EntityTarget::Event => {
                let mut data = EventDetails::new_event();
                data.apply_edits(edits).map_err(|e| e.to_string())?;
                ServiceRequest::CreateEvent(data)
            }
            EntityTarget::News => {
                let mut data = NewsArticle::new_article(self.ctx.today);
                data.apply_edits(edits).map_err(|e| e.to_string())?;
                ServiceRequest::CreateNews(data)
            }
        })
    }

    fn build_edit(
        &self,
        target: EntityTarget,
        id: &str,
        edits: &[FieldEdit],
    ) -> Result<ServiceRequest, String> {
        let not_loaded = || format!("no loaded {:?} record with id {}", target, id);
        let id = id.to_string();
        Ok(match target {
            EntityTarget::Alumni => {
                let mut data = self.alumni.find(&id).ok_or_else(not_loaded)?.data.clone();
                data.apply_edits(edits).map_err(|e| e.to_string())?;
                ServiceRequest::UpdateAlumni { id, data }
            }
            EntityTarget::Event => {
                let mut data = self.events.find(&id).ok_or_else(not_loaded)?.data.clone();
                data.apply_edits(edits).map_err(|e| e.to_string())?;
                ServiceRequest::UpdateEvent { id, data }
            }
            EntityTarget::News => {
                let mut data = self.news.find(&id).ok_or_else(not_loaded)?.data.clone();
                data.apply_edits(edits).map_err(|e| e.to_string())?;
                ServiceRequest::UpdateNews { id, data }
            }
        })
    }

    /// Runs a parsed command. Returns `true` when the app should exit.
    pub fn execute(&mut self, cmd: AppCommand, raw: &str) -> bool {
        let request = match cmd {
            AppCommand::Quit => return true,
            AppCommand::Help => {
                self.add_log(HELP_TEXT.to_string());
                return false;
            }
            AppCommand::Reload => {
                self.reload(self.view_mode);
                return false;
            }
            AppCommand::Search(term) => {
                self.set_search(&term);
                return false;
            }
            AppCommand::ClearFilters => {
                self.clear_filters();
                return false;
            }
            AppCommand::Unknown(msg) => {
                if !msg.is_empty() {
                    self.add_log(format!("error: {}", msg));
                }
                return false;
            }
            AppCommand::Create { target, edits } => self.build_create(target, &edits),
            AppCommand::Edit { target, id, edits } => self.build_edit(target, &id, &edits),
            AppCommand::DeleteEvent { id } => Ok(ServiceRequest::DeleteEvent { id }),
            AppCommand::EventImage { id, path } => match self.events.find(&id) {
                Some(rec) => Ok(ServiceRequest::UploadEventImage {
                    id,
                    path: PathBuf::from(path),
                    data: rec.data.clone(),
                }),
                None => Err(format!("no loaded event with id {}", id)),
            },
        };

        // at most one mutation in flight
        match request {
            Ok(_) if self.pending_command.is_some() => {
                self.add_log("error: previous change is still saving; submit again".to_string());
                self.return_to_command_line(raw.to_string());
            }
            Ok(req) => {
                self.pending_command = Some(raw.to_string());
                if !self.send(req) {
                    self.restore_pending_command();
                }
            }
            Err(e) => {
                self.add_log(format!("error: {}", e));
                self.return_to_command_line(raw.to_string());
            }
        }
        false
    }

    /// Completion for the first two words of a command.
    pub fn get_completion_hint(&self) -> Option<String> {
        let commands = [
            "alumni", "event", "news", "search", "clear", "reload", "help", "quit",
        ];
        let input = self.command_input.trim_start();
        if input.is_empty() {
            return None;
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        let ends_with_space = input.ends_with(' ');
        if parts.len() == 1 && !ends_with_space {
            return commands
                .iter()
                .find(|c| c.starts_with(parts[0]) && **c != parts[0])
                .map(|c| c[parts[0].len()..].to_string());
        }

        let subs: &[&str] = match parts[0] {
            "alumni" | "news" => &["add", "edit"],
            "event" => &["add", "edit", "delete", "image"],
            _ => return None,
        };
        let cur = if parts.len() >= 2 { parts[1] } else { "" };
        if parts.len() > 2 || (parts.len() == 2 && ends_with_space) {
            return None;
        }
        subs.iter()
            .find(|s| s.starts_with(cur) && **s != cur)
            .map(|s| s[cur.len()..].to_string())
    }

    fn open_selected_industry(&mut self) {
        let Some(share) = self
            .dashboard
            .stats
            .industries
            .shares
            .get(self.selected_index)
        else {
            return;
        };
        self.alumni_filter = AlumniFilter {
            industry: Selection::Only(share.industry.clone()),
            ..AlumniFilter::default()
        };
        self.focus_area = FocusArea::MainView;
        self.open_view(ViewMode::Alumni);
    }

    fn cycle_filter(&mut self, c: char) -> bool {
        match (self.view_mode, c) {
            (ViewMode::Alumni, 'y') => {
                self.alumni_filter.graduation_year =
                    self.alumni_filter.graduation_year.cycle(&self.alumni_options.years)
            }
            (ViewMode::Alumni, 'i') => {
                self.alumni_filter.industry =
                    self.alumni_filter.industry.cycle(&self.alumni_options.industries)
            }
            (ViewMode::Alumni, 'l') => {
                self.alumni_filter.location =
                    self.alumni_filter.location.cycle(&self.alumni_options.locations)
            }
            (ViewMode::Events, 't') => self.event_filter.window = self.event_filter.window.next(),
            (ViewMode::Events, 'e') => {
                self.event_filter.event_type = self.event_filter.event_type.cycle(&EventType::ALL)
            }
            (ViewMode::Events, 'r') => {
                self.event_filter.registration_required =
                    self.event_filter.registration_required.cycle_flag()
            }
            (ViewMode::News, 't') => self.news_filter.tab = self.news_filter.tab.next(),
            (ViewMode::News, 'g') => {
                self.news_filter.category = self.news_filter.category.cycle(&NewsCategory::ALL)
            }
            (ViewMode::News, 'p') => {
                self.news_filter.published = self.news_filter.published.cycle_flag()
            }
            _ => return false,
        }
        self.apply_filters();
        true
    }

    fn submit_command(&mut self) -> bool {
        let cmd_owned = self.command_input.trim().to_string();
        self.command_input.clear();
        self.command_cursor = 0;
        self.input_mode = InputMode::Normal;
        if cmd_owned.is_empty() {
            return false;
        }

        self.command_history.push(cmd_owned.clone());
        self.command_history_index = None;
        match AppCommand::from_str(&cmd_owned) {
            Ok(cmd) => self.execute(cmd, &cmd_owned),
            Err(()) => {
                self.add_log(format!("error: could not parse {}", cmd_owned));
                false
            }
        }
    }

    fn handle_command_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Enter => return self.submit_command(),
            KeyCode::Esc => {
                self.command_input.clear();
                self.command_cursor = 0;
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Tab => {
                if let Some(hint) = self.get_completion_hint() {
                    let insert = format!("{} ", hint);
                    self.command_input.insert_str(self.command_cursor, &insert);
                    self.command_cursor += insert.len();
                }
            }
            KeyCode::Up => {
                if self.command_history.is_empty() {
                    return false;
                }
                let next = match self.command_history_index {
                    None => self.command_history.len().saturating_sub(1),
                    Some(i) => i.saturating_sub(1),
                };
                self.command_history_index = Some(next);
                if let Some(cmd) = self.command_history.get(next) {
                    self.command_input = cmd.clone();
                    self.command_cursor = self.command_input.len();
                }
            }
            KeyCode::Down => {
                let Some(i) = self.command_history_index else {
                    return false;
                };
                let n = i + 1;
                if n >= self.command_history.len() {
                    self.command_history_index = None;
                    self.command_input.clear();
                    self.command_cursor = 0;
                    return false;
                }
                self.command_history_index = Some(n);
                self.command_input = self.command_history[n].clone();
                self.command_cursor = self.command_input.len();
            }
            KeyCode::Backspace => {
                if self.command_cursor > 0 {
                    let idx = prev_boundary(&self.command_input, self.command_cursor);
                    self.command_input.remove(idx);
                    self.command_cursor = idx;
                }
            }
            KeyCode::Delete => {
                if self.command_cursor < self.command_input.len() {
                    self.command_input.remove(self.command_cursor);
                }
            }
            KeyCode::Left => {
                if self.command_cursor > 0 {
                    self.command_cursor = prev_boundary(&self.command_input, self.command_cursor);
                }
            }
            KeyCode::Right => {
                if let Some(c) = self.command_input[self.command_cursor..].chars().next() {
                    self.command_cursor += c.len_utf8();
                }
            }
            KeyCode::Home => self.command_cursor = 0,
            KeyCode::End => self.command_cursor = self.command_input.len(),
            KeyCode::Char(c) => {
                self.command_input.insert(self.command_cursor, c);
                self.command_cursor += c.len_utf8();
            }
            _ => {}
        }
        false
    }

    /// Returns `true` when the app should exit.
    pub fn handle_key_event(&mut self, key: KeyCode) -> bool {
        if self.input_mode == InputMode::Command {
            return self.handle_command_key(key);
        }

        match key {
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Command;
                self.command_input.clear();
                self.command_cursor = 0;
            }
            KeyCode::Char('q') => return true,
            KeyCode::Left => self.focus_area = FocusArea::Menu,
            KeyCode::Right => self.focus_area = FocusArea::MainView,
            KeyCode::Up => {
                if self.focus_area == FocusArea::Menu {
                    self.menu_selected_index = self.menu_selected_index.saturating_sub(1);
                } else if self.selected_index > 0 {
                    self.selected_index -= 1;
                    self.list_state.select(Some(self.selected_index));
                }
            }
            KeyCode::Down => {
                if self.focus_area == FocusArea::Menu {
                    if self.menu_selected_index < ViewMode::MENU.len() - 1 {
                        self.menu_selected_index += 1;
                    }
                } else if self.selected_index + 1 < self.visible_len() {
                    self.selected_index += 1;
                    self.list_state.select(Some(self.selected_index));
                }
            }
            KeyCode::Enter => {
                if self.focus_area == FocusArea::Menu {
                    let view = ViewMode::MENU[self.menu_selected_index];
                    self.open_view(view);
                    self.focus_area = FocusArea::MainView;
                } else if self.view_mode == ViewMode::Dashboard {
                    self.open_selected_industry();
                }
            }
            KeyCode::Char('x') => self.clear_filters(),
            KeyCode::Char('R') => self.reload(self.view_mode),
            KeyCode::Char(c) => {
                if self.focus_area == FocusArea::MainView {
                    self.cycle_filter(c);
                }
            }
            _ => {}
        }
        false
    }
}

fn prev_boundary(s: &str, idx: usize) -> usize {
    s[..idx]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Industry, Record};
    use crate::query::{IndustryBreakdown, TimeWindow};
    use chrono::NaiveDate;

    fn app() -> (App, mpsc::UnboundedReceiver<ServiceRequest>) {
        let (req_tx, req_rx) = mpsc::unbounded_channel();
        let (_evt_tx, evt_rx) = mpsc::unbounded_channel();
        let ctx = QueryContext::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        (App::new(vec![], ctx, req_tx, evt_rx), req_rx)
    }

    fn alum(id: &str, industry: &str, year: i32) -> Alumni {
        Record::new(
            id,
            AlumniProfile {
                first_name: Some("A".into()),
                last_name: Some(id.into()),
                industry: Some(industry.into()),
                graduation_year: Some(year),
                ..AlumniProfile::default()
            },
        )
    }

    fn type_command(app: &mut App, text: &str) -> bool {
        app.handle_key_event(KeyCode::Char('/'));
        for c in text.chars() {
            app.handle_key_event(KeyCode::Char(c));
        }
        app.handle_key_event(KeyCode::Enter)
    }

    #[test]
    fn opening_a_view_enters_loading_and_requests_data() {
        let (mut app, mut rx) = app();
        app.open_view(ViewMode::Events);
        assert!(app.is_loading());
        assert!(matches!(rx.try_recv(), Ok(ServiceRequest::LoadEvents)));

        app.apply_event(AppEvent::EventsLoaded(Err("boom".into())));
        assert!(!app.is_loading());
        assert!(app.log_messages.iter().any(|m| m.contains("boom")));
    }

    #[test]
    fn filter_keys_recompute_without_reloading() {
        let (mut app, mut rx) = app();
        app.open_view(ViewMode::Alumni);
        let _ = rx.try_recv();
        app.apply_event(AppEvent::AlumniLoaded(Ok(vec![
            alum("a", "Finance", 2020),
            alum("b", "Technology", 2019),
        ])));
        assert_eq!(app.alumni_list.len(), 2);
        assert_eq!(app.alumni_options.years, vec!["2020", "2019"]);

        app.focus_area = FocusArea::MainView;
        app.handle_key_event(KeyCode::Char('y'));
        assert_eq!(app.alumni_filter.graduation_year, Selection::Only("2020".into()));
        assert_eq!(app.alumni_list.len(), 1);
        assert!(rx.try_recv().is_err());
        assert_eq!(app.alumni.state(), LoadState::Loaded);

        app.handle_key_event(KeyCode::Char('x'));
        assert_eq!(app.alumni_list.len(), 2);
    }

    #[test]
    fn industry_row_opens_filtered_directory() {
        let (mut app, mut rx) = app();
        let rows = vec![alum("a", "Finance", 2020), alum("b", "Finance", 2021)];
        app.dashboard.stats.industries = IndustryBreakdown::compute(&rows, 6);
        app.apply_event(AppEvent::Dashboard(Ok(app.dashboard.clone())));
        app.focus_area = FocusArea::MainView;
        app.handle_key_event(KeyCode::Enter);

        assert_eq!(app.view_mode, ViewMode::Alumni);
        assert_eq!(
            app.alumni_filter.industry,
            Selection::Only(Industry::Finance.label().to_string())
        );
        assert!(matches!(rx.try_recv(), Ok(ServiceRequest::LoadAlumni)));
    }

    #[test]
    fn invalid_create_is_reported_and_kept_for_retry() {
        let (mut app, mut rx) = app();
        type_command(&mut app, "event add title=Gala");
        assert!(rx.try_recv().is_err());
        assert_eq!(app.input_mode, InputMode::Command);
        assert_eq!(app.command_input, "event add title=Gala");
        assert!(app
            .log_messages
            .iter()
            .any(|m| m.contains("missing required field")));
    }

    #[test]
    fn failed_mutation_restores_the_command() {
        let (mut app, mut rx) = app();
        let cmd = "news add title=T summary=S content=C category=Research author=Me";
        type_command(&mut app, cmd);
        match rx.try_recv() {
            Ok(ServiceRequest::CreateNews(a)) => {
                assert_eq!(a.publish_date.as_deref(), Some("2025-01-01"));
                assert_eq!(a.is_published, Some(true));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(app.input_mode, InputMode::Normal);

        app.apply_event(AppEvent::MutationFailed {
            target: EntityTarget::News,
            error: "status 500".into(),
        });
        assert_eq!(app.input_mode, InputMode::Command);
        assert_eq!(app.command_input, cmd);
    }

    #[test]
    fn second_mutation_waits_for_the_first() {
        let (mut app, mut rx) = app();
        type_command(&mut app, "event delete e1");
        assert!(matches!(rx.try_recv(), Ok(ServiceRequest::DeleteEvent { .. })));

        type_command(&mut app, "event delete e2");
        assert!(rx.try_recv().is_err());
        assert_eq!(app.command_input, "event delete e2");
        assert!(app.log_messages.iter().any(|m| m.contains("still saving")));

        app.handle_key_event(KeyCode::Esc);
        app.apply_event(AppEvent::MutationFailed {
            target: EntityTarget::Event,
            error: "status 500".into(),
        });
        assert_eq!(app.command_input, "event delete e1");
        assert!(app.pending_command.is_none());

        app.handle_key_event(KeyCode::Enter);
        assert!(matches!(rx.try_recv(), Ok(ServiceRequest::DeleteEvent { id }) if id == "e1"));
    }

    #[test]
    fn successful_mutation_reloads_its_collection() {
        let (mut app, mut rx) = app();
        app.pending_command = Some("event delete e1".into());
        app.apply_event(AppEvent::MutationDone {
            target: EntityTarget::Event,
            message: "deleted event [e1]".into(),
        });
        assert!(app.pending_command.is_none());
        assert!(app.events.is_loading());
        assert!(matches!(rx.try_recv(), Ok(ServiceRequest::LoadEvents)));
        // the dashboard is on screen, so it refreshes too
        assert!(matches!(rx.try_recv(), Ok(ServiceRequest::LoadDashboard)));
    }

    #[test]
    fn edit_uses_the_loaded_record() {
        let (mut app, mut rx) = app();
        app.apply_event(AppEvent::EventsLoaded(Ok(vec![Record::new(
            "e1",
            EventDetails {
                title: Some("Old".into()),
                description: Some("d".into()),
                event_date: Some("2025-03-01".into()),
                location: Some("Hall".into()),
                event_type: Some(EventType::Social),
                ..EventDetails::new_event()
            },
        )])));
        type_command(&mut app, r#"event edit e1 title="New title""#);
        match rx.try_recv() {
            Ok(ServiceRequest::UpdateEvent { id, data }) => {
                assert_eq!(id, "e1");
                assert_eq!(data.title.as_deref(), Some("New title"));
                assert_eq!(data.location.as_deref(), Some("Hall"));
            }
            other => panic!("unexpected {:?}", other),
        }

        type_command(&mut app, "event edit nope title=x");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn event_window_key_cycles() {
        let (mut app, _rx) = app();
        app.view_mode = ViewMode::Events;
        app.focus_area = FocusArea::MainView;
        app.handle_key_event(KeyCode::Char('t'));
        assert_eq!(app.event_filter.window, TimeWindow::Past);
    }

    #[test]
    fn completion_suggests_commands_and_subcommands() {
        let (mut app, _rx) = app();
        app.command_input = "al".into();
        assert_eq!(app.get_completion_hint().as_deref(), Some("umni"));
        app.command_input = "event de".into();
        assert_eq!(app.get_completion_hint().as_deref(), Some("lete"));
        app.command_input = "event delete x".into();
        assert_eq!(app.get_completion_hint(), None);
    }
}
