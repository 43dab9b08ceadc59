// src/cli/tui/mod.rs
//! Interactive new-tab page in the terminal.
pub mod app;
pub mod ui;

use crate::application::services::bookmark_service::BookmarkService;
use crate::cli::error::CliResult;
use crate::domain::drag::DragGesture;
use crate::domain::services::notification::{Notification, Notifier};
use crate::infrastructure::confirmation::ConfirmationGate;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::notification::ToastQueue;
use app::{App, AppAction};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Poll interval of the event loop; also bounds the drag-delay resolution
const POLL: Duration = Duration::from_millis(50);

fn setup_terminal() -> CliResult<Term> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Term) -> CliResult<()> {
    terminal::disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

#[instrument(skip(services))]
pub fn run(services: &ServiceContainer) -> CliResult<()> {
    let gate = Arc::new(ConfirmationGate::default());
    let toasts = Arc::new(ToastQueue::default());
    let notifier: Arc<dyn Notifier> = toasts.clone();
    let service = services.bookmark_service(gate.clone(), notifier);

    let mut app = App::new(
        service,
        gate,
        toasts.clone(),
        services.clock_poller.clone(),
        DragGesture::new(services.drag_delay),
    );

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app, &toasts, services.clock_poller.tick());
    let restored = restore_terminal(&mut terminal);
    result.and(restored)
}

fn event_loop<S: BookmarkService>(
    terminal: &mut Term,
    app: &mut App<S>,
    toasts: &ToastQueue,
    clock_tick: Duration,
) -> CliResult<()> {
    let mut last_clock = Instant::now();

    loop {
        if app.take_redraw() {
            terminal.draw(|frame| ui::draw(frame, app))?;
        }

        if event::poll(POLL)? {
            let action = match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse, Instant::now()),
                Event::FocusLost | Event::Resize(_, _) => {
                    app.cancel_drag();
                    None
                }
                _ => None,
            };
            app.request_redraw();

            match action {
                Some(AppAction::Quit) => {
                    debug!("leaving tui");
                    return Ok(());
                }
                Some(AppAction::Open(url)) => {
                    if let Err(e) = open::that(&url) {
                        toasts.notify(Notification::error(format!("cannot open {}: {}", url, e)));
                    }
                }
                None => {}
            }
        }

        let now = Instant::now();
        app.drag.tick(now);
        if now.duration_since(last_clock) >= clock_tick {
            app.on_tick(now);
            app.request_redraw();
            last_clock = now;
        }
    }
}
