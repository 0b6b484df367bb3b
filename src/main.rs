use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use mathdrill::{
    app::{App, AppAction, Mode},
    catalog::Catalog,
    config::{Config, ConfigStore, FileConfigStore},
    problem::OperationKind,
    runtime::{CrosstermEventSource, DrillEvent, FixedTicker, Runner},
    session::DurationPreset,
    setup::PracticeSetup,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin, Write},
    path::PathBuf,
    time::Duration,
};

const POLL_INTERVAL_MS: u64 = 250;

/// arithmetic drills and bite-sized lessons in the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Timed practice for times tables, division and perfect squares, graded on accuracy and speed, plus short lessons with worked examples and practice questions."
)]
pub struct Cli {
    /// session length in seconds: 30, 60, 120, 300, 600, 900 or 1200
    #[clap(short = 's', long, value_parser = parse_preset_secs)]
    secs: Option<u32>,

    /// times-table numbers to practice, e.g. 7,8
    #[clap(
        short = 'n',
        long,
        value_delimiter = ',',
        value_parser = clap::value_parser!(u32).range(1..=12)
    )]
    numbers: Vec<u32>,

    /// operations to practice
    #[clap(short = 'o', long, value_enum, value_delimiter = ',')]
    ops: Vec<OperationKind>,

    /// open a lesson by id (see --list-lessons)
    #[clap(short = 'l', long)]
    lesson: Option<String>,

    /// skip the menu and start the timed practice
    #[clap(long, conflicts_with = "lesson")]
    quiz: bool,

    /// preferences file to read instead of the default location
    #[clap(long)]
    config: Option<PathBuf>,

    /// print the available lessons and exit
    #[clap(long)]
    list_lessons: bool,
}

fn parse_preset_secs(raw: &str) -> Result<u32, String> {
    let secs: u32 = raw.parse().map_err(|e| format!("{e}"))?;
    DurationPreset::from_secs(secs)
        .map(|p| p.secs())
        .ok_or_else(|| {
            let presets: Vec<String> = DurationPreset::ALL
                .iter()
                .map(|p| p.secs().to_string())
                .collect();
            format!("must be one of {}", presets.join(", "))
        })
}

impl Cli {
    /// Command line flags take precedence over the preferences file.
    fn apply_to(&self, mut config: Config) -> Config {
        if let Some(secs) = self.secs {
            config.duration_secs = secs;
        }
        if !self.numbers.is_empty() {
            config.numbers = self.numbers.clone();
        }
        if !self.ops.is_empty() {
            config.operations = self.ops.clone();
        }
        config
    }
}

fn print_lessons<W: Write>(catalog: &Catalog, out: &mut W) -> io::Result<()> {
    for category in catalog.categories() {
        writeln!(out, "{} {}", category.icon, category.title)?;
        for lesson in &category.lessons {
            writeln!(out, "  {:<22} {}", lesson.id, lesson.title)?;
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let catalog = Catalog::builtin()?;

    if cli.list_lessons {
        print_lessons(&catalog, &mut io::stdout().lock())?;
        return Ok(());
    }

    if let Some(id) = &cli.lesson {
        if let Err(e) = catalog.lesson(id) {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::InvalidValue, e.to_string()).exit();
        }
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = match &cli.config {
        Some(path) => FileConfigStore::with_path(path),
        None => FileConfigStore::new(),
    };
    let config = cli.apply_to(store.load());
    let mut app = App::new(catalog, PracticeSetup::from(&config));

    if let Some(id) = &cli.lesson {
        app.open_lesson(id)?;
    } else if cli.quiz {
        app.mode = Mode::PracticeSetup;
        if let Err(e) = app.start_quiz() {
            app.message = Some(e.to_string());
        }
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(FixedTicker::seconds()),
        Duration::from_millis(POLL_INTERVAL_MS),
    );

    terminal.draw(|f| ui(app, f))?;

    loop {
        let redraw = match runner.step() {
            None => false,
            Some(DrillEvent::Tick) => app.on_tick(),
            Some(DrillEvent::Resize) => true,
            Some(DrillEvent::Key(key)) => {
                if app.on_key(key) == AppAction::Quit {
                    break;
                }
                true
            }
            Some(DrillEvent::Closed) => break,
        };

        if redraw {
            terminal.draw(|f| ui(app, f))?;
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
