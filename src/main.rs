use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Instant,
};

use chrono::Datelike;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use folio::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    content::Portfolio,
    links::{BrowserOpener, LinkOpener},
    page::{Flow, Page},
    runtime::{CrosstermEventSource, FixedTicker, PageEvent, PageEventSource, Runner, Ticker},
    spy::SectionId,
    ui,
};

/// a single-page personal portfolio for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A single-page personal portfolio for the terminal. The navigation bar follows whichever section you scroll through, and buttons answer clicks with a ripple."
)]
pub struct Cli {
    /// section to open the page at
    #[clap(short = 's', long, value_enum, default_value_t = SectionId::Home)]
    section: SectionId,

    /// config file to load (defaults to the platform config dir)
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// milliseconds between animation ticks, overriding the config
    #[clap(long)]
    tick_rate_ms: Option<u64>,

    /// leave the mouse alone; navigate with the keyboard only
    #[clap(long)]
    no_mouse: bool,

    /// write the effective config to the config file and exit
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// Loaded config with command line overrides applied.
    fn effective_config(&self, store: &impl ConfigStore) -> Config {
        let mut config = store.load();
        if let Some(ms) = self.tick_rate_ms {
            config.tick_rate_ms = ms;
        }
        config
    }
}

/// Restore terminal state - called on panic or unexpected exit
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

fn init_logging() {
    let Some(log_dir) = AppDirs::log_dir() else {
        return;
    };
    if std::fs::create_dir_all(&log_dir).is_err() {
        return;
    }
    let Ok(log_file) = std::fs::File::create(log_dir.join("folio.log")) else {
        return;
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging();

    let store = cli.config_store();
    let config = cli.effective_config(&store);
    tracing::info!(path = %store.path().display(), ?config, "config loaded");

    if cli.save_config {
        store.save(&config)?;
        println!("{}", store.path().display());
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let portfolio = Portfolio::embedded()?;
    let year = chrono::Local::now().year();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if !cli.no_mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::new(config.tick_rate()));
    let mut page = Page::mount(portfolio, config, cli.section, year);
    let result = start_tui(&mut terminal, &mut page, &runner, &mut BrowserOpener);

    restore_terminal();
    terminal.show_cursor()?;
    tracing::info!("exiting");

    result
}

fn start_tui<B: Backend, E: PageEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    page: &mut Page,
    runner: &Runner<E, T>,
    opener: &mut dyn LinkOpener,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui::draw(page, Instant::now(), f))?;

    loop {
        let now = Instant::now();
        let redraw = match runner.step() {
            PageEvent::Key(key) => {
                if page.handle_key(key, now, opener) == Flow::Quit {
                    return Ok(());
                }
                true
            }
            PageEvent::Mouse(mouse) => {
                page.handle_mouse(mouse, now, opener);
                true
            }
            PageEvent::Resize => true,
            PageEvent::Tick => page.on_tick(now),
            PageEvent::Closed => {
                tracing::warn!("terminal input closed");
                return Ok(());
            }
        };
        if redraw {
            terminal.draw(|f| ui::draw(page, now, f))?;
        }
    }
}
