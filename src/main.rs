mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

use taja::config::{Config, ConfigStore, FileConfigStore};
use taja::drill::Drill;
use taja::pool::{CategoryPool, PracticeLanguage};
use taja::report::CsvReporter;
use taja::runtime::{signal_for_key, CrosstermEventSource, FixedTicker, PracticeEvent, Runner};
use taja::session::SessionConfig;
use taja::TICK_RATE_MS;

/// staged typing practice with jamo-level precision
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Staged typing practice: a character position drill followed by a word drill, with phonetic-unit precision for Korean, pause-aware timing, and an accuracy-damped speed score."
)]
pub struct Cli {
    /// language to practice
    #[clap(short = 'l', long, value_enum)]
    language: Option<PracticeLanguage>,

    /// drill category (see --list-categories)
    #[clap(short = 'c', long)]
    category: Option<String>,

    /// number of items in the position stage
    #[clap(short = 'p', long)]
    position_items: Option<usize>,

    /// number of items in the word stage
    #[clap(short = 'w', long)]
    word_items: Option<usize>,

    /// run a standalone word drill, skipping the position stage
    #[clap(long)]
    words_only: bool,

    /// list available categories per language and exit
    #[clap(long)]
    list_categories: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Typing,
    Results,
}

pub struct App {
    pub drill: Drill,
    pub state: AppState,
}

impl App {
    pub fn new(config: SessionConfig, pool: CategoryPool) -> Self {
        let mut drill = Drill::new(config, pool);
        if let Some(reporter) = CsvReporter::new() {
            drill = drill.with_reporter(Box::new(reporter));
        }
        Self {
            drill,
            state: AppState::Typing,
        }
    }

    pub fn reset(&mut self) {
        self.drill.restart();
        self.state = AppState::Typing;
    }
}

fn language_from_name(name: &str) -> PracticeLanguage {
    match name {
        "english" => PracticeLanguage::English,
        _ => PracticeLanguage::Korean,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.list_categories {
        for lang in [PracticeLanguage::Korean, PracticeLanguage::English] {
            println!(
                "{}: {}",
                lang.to_string().to_lowercase(),
                lang.pools().category_names()
            );
        }
        return Ok(());
    }

    let store = FileConfigStore::new();
    let stored = store.load();

    let language = cli
        .language
        .unwrap_or_else(|| language_from_name(&stored.language));

    let pool = match &cli.category {
        Some(name) => language.category(Some(name.as_str())).unwrap_or_else(|| {
            let mut cmd = Cli::command();
            cmd.error(
                ErrorKind::InvalidValue,
                format!(
                    "unknown category '{name}' for {language}; available: {}",
                    language.pools().category_names()
                ),
            )
            .exit()
        }),
        // Stored category may belong to the other language; fall back to
        // the language's first category
        None => language
            .category(Some(stored.category.as_str()))
            .or_else(|| language.category(None))
            .expect("embedded pools have at least one category"),
    };

    let session_config = SessionConfig {
        language,
        category: pool.name.clone(),
        position_items: cli.position_items.unwrap_or(stored.position_items).max(1),
        word_items: cli.word_items.unwrap_or(stored.word_items).max(1),
        words_only: cli.words_only,
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let _ = store.save(&Config {
        language: language.to_string().to_lowercase(),
        category: session_config.category.clone(),
        position_items: session_config.position_items,
        word_items: session_config.word_items,
        words_only: session_config.words_only,
    });

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session_config, pool);
    start_tui(&mut terminal, &mut app)?;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    Ok(())
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            PracticeEvent::Tick => {
                if app.state == AppState::Typing {
                    app.drill.on_tick();
                }
            }
            PracticeEvent::Resize => {}
            PracticeEvent::Key(key) => {
                // ctrl+c to quit from any state
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c')
                {
                    break;
                }

                match app.state {
                    AppState::Typing => match key.code {
                        KeyCode::Esc => {
                            break;
                        }
                        _ => {
                            if let Some(signal) = signal_for_key(&key) {
                                app.drill.apply(signal);
                                if app.drill.has_finished() {
                                    app.state = AppState::Results;
                                }
                            }
                        }
                    },
                    AppState::Results => match key.code {
                        KeyCode::Esc | KeyCode::Char('q') => {
                            break;
                        }
                        KeyCode::Char('r') => {
                            app.reset();
                        }
                        _ => {}
                    },
                }
            }
        }
    }

    Ok(())
}
