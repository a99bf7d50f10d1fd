use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use quiz_terminal::{logger, spawn_store_worker, ui, App, Config, HttpQuestionStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

/// Upper bound on how long the loop waits for input before ticking timers.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> io::Result<()> {
    let config = Config::from_env();
    if let Err(e) = logger::init(&config.log_file) {
        eprintln!("Could not open log file {}: {}", config.log_file.display(), e);
    }
    logger::log(&format!("Starting with question store at {}", config.store_url));

    let store = HttpQuestionStore::new(&config.store_url, config.http_timeout)
        .map_err(|e| io::Error::other(e.to_string()))?;
    let (request_tx, request_rx) = crossbeam_channel::unbounded();
    let (response_tx, response_rx) = crossbeam_channel::unbounded();
    let worker = spawn_store_worker(store, request_rx, response_tx)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(request_tx, Instant::now());
    let result = run(&mut terminal, &mut app, &response_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Dropping the app closes the request channel and lets the worker exit.
    drop(app);
    if worker.join().is_err() {
        logger::log("Store worker panicked");
    }
    logger::log("Exiting");

    result
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    responses: &crossbeam_channel::Receiver<quiz_terminal::StoreResponse>,
) -> io::Result<()> {
    loop {
        let now = Instant::now();
        while let Ok(response) = responses.try_recv() {
            app.apply_store_response(response, now);
        }
        app.tick(now);

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key, Instant::now());
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
