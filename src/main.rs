mod ui;

use skeptik::catalog::Variant;
use skeptik::celebration::CelebrationAnimation;
use skeptik::quiz::{QuizSession, Stage};
use skeptik::record::{FileResultSink, ResultSink, SessionRecord};
use skeptik::runtime::{CrosstermEventSource, FixedTicker, QuizEvent, Runner};
use skeptik::session::{Choice, Tier};

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

const TICK_RATE_MS: u64 = 100;

/// misinformation quiz tui: real headlines or fake ones?
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A short terminal quiz in the spirit of the Misinformation Susceptibility Test: label a randomized batch of news headlines as real or fake and see how resistant you are."
)]
pub struct Cli {
    /// path to an ascii-art banner shown above the intro (a missing file renders nothing)
    #[clap(short, long, default_value = "logo.txt")]
    logo: PathBuf,
}

#[derive(Debug)]
pub struct App {
    pub cli: Option<Cli>,
    pub session: QuizSession,
    pub cursor: usize,
    pub logo: Option<String>,
    pub celebration: CelebrationAnimation,
}

impl App {
    pub fn new(cli: Cli) -> Self {
        let logo = std::fs::read_to_string(&cli.logo).ok();

        Self {
            session: QuizSession::new(),
            cursor: 0,
            logo,
            celebration: CelebrationAnimation::new(),
            cli: Some(cli),
        }
    }

    /// Start over with a fresh session; the banner is kept.
    pub fn reset(&mut self) {
        self.session = QuizSession::new();
        self.cursor = 0;
        self.celebration = CelebrationAnimation::new();
    }

    /// Label the highlighted headline with the first or second displayed
    /// option and move on to the next one.
    pub fn pick_label(&mut self, slot: usize) {
        if self.session.stage() != Stage::Quiz {
            return;
        }
        let label = self.session.label_order()[slot];
        self.session.answer(self.cursor, label);

        let last = self.session.item_count().saturating_sub(1);
        self.cursor = (self.cursor + 1).min(last);
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_down(&mut self) {
        let last = self.session.item_count().saturating_sub(1);
        self.cursor = (self.cursor + 1).min(last);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(cli);
    start_tui(&mut terminal, &mut app)?;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    Ok(())
}

#[derive(Debug)]
enum ExitType {
    Restart,
    Quit,
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let sink = FileResultSink::new();
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    loop {
        let mut exit_type = ExitType::Quit;
        terminal.draw(|f| ui(app, f))?;

        loop {
            match runner.step() {
                QuizEvent::Tick => {
                    // Only the celebration animates; skip redraws otherwise
                    if app.celebration.is_active {
                        app.celebration.update();
                        terminal.draw(|f| ui(app, f))?;
                    }
                }
                QuizEvent::Resize => {
                    terminal.draw(|f| ui(app, f))?;
                }
                QuizEvent::Key(key) => {
                    match key.code {
                        KeyCode::Esc => break,
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            break;
                        }
                        _ => match app.session.stage() {
                            Stage::Consent => match key.code {
                                KeyCode::Char('y') => app.session.set_consent(Choice::Yes),
                                KeyCode::Char('n') => app.session.set_consent(Choice::No),
                                _ => {}
                            },
                            Stage::Age => match key.code {
                                KeyCode::Char('y') => app.session.set_age_confirmed(Choice::Yes),
                                KeyCode::Char('n') => app.session.set_age_confirmed(Choice::No),
                                _ => {}
                            },
                            Stage::Rejected => {
                                if key.code == KeyCode::Char('r') {
                                    exit_type = ExitType::Restart;
                                    break;
                                }
                            }
                            Stage::VariantSelect => match key.code {
                                KeyCode::Char('1') => app.session.choose_variant(Variant::Mist20),
                                KeyCode::Char('2') => app.session.choose_variant(Variant::Mist16),
                                _ => {}
                            },
                            Stage::Quiz => match key.code {
                                KeyCode::Up => app.move_cursor_up(),
                                KeyCode::Down => app.move_cursor_down(),
                                KeyCode::Char('1') | KeyCode::Left => app.pick_label(0),
                                KeyCode::Char('2') | KeyCode::Right => app.pick_label(1),
                                KeyCode::Enter => {
                                    // Incomplete submits fall through silently
                                    if let Some(card) = app.session.submit() {
                                        if let (Some(id), Some(variant)) =
                                            (app.session.session_id(), app.session.variant())
                                        {
                                            let record = SessionRecord::new(id, variant, &card);
                                            let _ = sink.record(&record);
                                        }

                                        if card.tier == Tier::Excellent {
                                            let size = terminal.size().unwrap_or_default();
                                            app.celebration.start(size.width, size.height);
                                        }
                                    }
                                }
                                _ => {}
                            },
                            Stage::Scored => {
                                if key.code == KeyCode::Char('r') {
                                    exit_type = ExitType::Restart;
                                    break;
                                }
                            }
                        },
                    }
                    terminal.draw(|f| ui(app, f))?;
                }
            }
        }

        match exit_type {
            ExitType::Restart => {
                app.reset();
            }
            ExitType::Quit => {
                break;
            }
        }
    }

    Ok(())
}

fn ui(app: &mut App, f: &mut Frame) {
    f.render_widget(&*app, f.area());
}
