use alumni_admin::app_service::{handle_request, ServiceRequest};
use alumni_admin::app_state::{App, AppEvent, ViewMode};
use alumni_admin::config::{AppConfig, GatewayMode};
use alumni_admin::gateway::Gateway;
use alumni_admin::query::QueryContext;
use alumni_admin::session::ApiSession;
use alumni_admin::storage::{establish_connection, LocalStore};
use alumni_admin::ui::draw;
use anyhow::Context;
use chrono::Local;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let mut session_info = Vec::new();
    match dotenv::dotenv() {
        Ok(path) => session_info.push(format!("loaded {}", path.display())),
        Err(_) => session_info.push("no .env file, using process environment".to_string()),
    }

    let config = AppConfig::from_env().context("invalid configuration")?;

    let ts = Local::now().format("%Y%m%d-%H%M%S").to_string();
    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("creating {}", config.log_dir.display()))?;
    let log_file = std::fs::File::create(config.log_dir.join(format!("app-{}.log", ts)))?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter_level(log::LevelFilter::Warn)
        .filter_module("alumni_admin", log::LevelFilter::Info)
        .filter_module("sqlx", log::LevelFilter::Error)
        .filter_module("sea_orm", log::LevelFilter::Error)
        .init();

    let gateway = connect_gateway(&config).await?;
    info!("using {}", gateway.describe());
    session_info.push(format!("gateway: {}", gateway.describe()));

    let ctx = QueryContext::utc();
    let (req_tx, mut req_rx) = mpsc::unbounded_channel::<ServiceRequest>();
    let (evt_tx, evt_rx) = mpsc::unbounded_channel::<AppEvent>();

    // Single background task owning the gateway; requests run in order.
    tokio::spawn(async move {
        while let Some(req) = req_rx.recv().await {
            handle_request(gateway.as_ref(), req, &ctx, &evt_tx).await;
        }
    });

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session_info, ctx, req_tx, evt_rx);
    app.open_view(ViewMode::Dashboard);

    let res = match app.evt_rx.take() {
        Some(rx) => run_app_loop(&mut terminal, &mut app, rx).await,
        None => Ok(()),
    };

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &res {
        error!("ui loop failed: {}", e);
    }
    res.map_err(Into::into)
}

async fn connect_gateway(config: &AppConfig) -> anyhow::Result<Arc<dyn Gateway>> {
    match (&config.mode, &config.http) {
        (GatewayMode::Remote, Some(http)) => {
            let session = ApiSession::new(http).context("building http client")?;
            Ok(Arc::new(session))
        }
        _ => {
            let db = establish_connection(&config.database_url)
                .await
                .with_context(|| format!("opening {}", config.database_url))?;
            Ok(Arc::new(LocalStore::new(Arc::new(db), &config.upload_dir)))
        }
    }
}

async fn run_app_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    mut evt_rx: mpsc::UnboundedReceiver<AppEvent>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        while let Ok(event) = evt_rx.try_recv() {
            app.apply_event(event);
        }

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key_event(key.code) {
                    return Ok(());
                }
            }
        }
    }
}
