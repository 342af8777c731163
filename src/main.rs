use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use indoc::indoc;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};
use thiserror::Error;
use tracing::Level;

use popup_wm::content::{ContentContext, ContentHost, WindowContent};
use popup_wm::input::pointer_event_from_mouse;
use popup_wm::tracing_sub::{self, LogTarget};
use popup_wm::ui::render_workspace;
use popup_wm::window::decorator::DefaultDecorator;
use popup_wm::{
    Bounds, ConfigError, Position, Size, WindowId, WindowKind, WindowManager, WmConfig, WmEvent,
};

const MAX_STARTUP_PERSONAS: usize = 16;

const SEGMENT_FORM: &str = indoc! {"
    Create segment

    Name      ______________
    Source    web events
    Rule      visits > 3
"};

const PERSONAS: [&str; 5] = [
    "Weekend shopper",
    "Bargain hunter",
    "Loyal subscriber",
    "First-time visitor",
    "Lapsed customer",
];

#[derive(Parser, Debug)]
#[command(
    name = "popup-wm",
    version = env!("CARGO_PKG_VERSION"),
    about = "Segment and Persona popup windows in the terminal"
)]
struct Cli {
    /// JSON file with window manager overrides (cell units).
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Append logs to this file. Without it, logs are discarded while the UI runs.
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[arg(long = "log-level", value_name = "LEVEL", default_value_t = Level::DEBUG)]
    log_level: Level,

    /// Persona windows to open at startup.
    #[arg(short = 'p', long = "personas", value_name = "COUNT", default_value_t = 0)]
    personas: usize,

    /// Diagonal step between successive Persona windows, in cells.
    #[arg(long = "cascade-step", value_name = "CELLS")]
    cascade_step: Option<f64>,
}

#[derive(Debug, Error)]
enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot open log file: {0}")]
    LogFile(#[from] io::Error),
    #[error("at most {max} startup personas, got {0}", max = MAX_STARTUP_PERSONAS)]
    TooManyPersonas(usize),
}

struct DemoConfig {
    wm: WmConfig,
    log_target: LogTarget,
    log_level: Level,
    personas: usize,
}

impl TryFrom<&Cli> for DemoConfig {
    type Error = SetupError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        let mut wm = match &cli.config {
            Some(path) => WmConfig::load_overrides(WmConfig::terminal(), path)?,
            None => WmConfig::terminal(),
        };
        if let Some(step) = cli.cascade_step {
            wm.cascade_step = step;
        }
        wm.validate()?;
        if cli.personas > MAX_STARTUP_PERSONAS {
            return Err(SetupError::TooManyPersonas(cli.personas));
        }
        let log_target = match &cli.log_file {
            Some(path) => LogTarget::file(path)?,
            None => LogTarget::Discard,
        };
        Ok(Self {
            wm,
            log_target,
            log_level: cli.log_level,
            personas: cli.personas,
        })
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let config = DemoConfig::try_from(&cli).map_err(io::Error::other)?;
    tracing_sub::init(config.log_target, config.log_level);

    let mut app = App::new(config.wm);
    let (width, height) = terminal::size()?;
    app.measure(width, height);
    for _ in 0..config.personas {
        app.wm.open_new_persona();
    }
    app.sync();

    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ControlFlow {
    Continue,
    Quit,
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| app.draw(frame))?;
        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        // Drain bursts (drags) before redrawing so rendering keeps up.
        loop {
            let evt = event::read()?;
            if app.handle_event(evt) == ControlFlow::Quit {
                return Ok(());
            }
            if !event::poll(Duration::from_millis(0))? {
                break;
            }
        }
    }
}

struct App {
    wm: WindowManager,
    contents: ContentHost,
    decorator: DefaultDecorator,
    status: String,
}

impl App {
    fn new(config: WmConfig) -> Self {
        Self {
            wm: WindowManager::new(config),
            contents: ContentHost::new(|id| match id.kind() {
                WindowKind::Segment => Box::new(SegmentView) as Box<dyn WindowContent>,
                WindowKind::Persona => Box::new(PersonaListView::default()),
            }),
            decorator: DefaultDecorator,
            status: String::new(),
        }
    }

    /// Row 0 is the status bar; the canvas is everything below it and the
    /// dock floats over the canvas' bottom rows.
    fn measure(&mut self, width: u16, height: u16) {
        let (w, h) = (f64::from(width), f64::from(height));
        self.wm.set_viewport(Size::new(w, h));
        self.wm.set_canvas(Bounds::new(
            Position::new(0.0, 1.0),
            Size::new(w, (h - 1.0).max(0.0)),
        ));
    }

    fn handle_event(&mut self, evt: Event) -> ControlFlow {
        let flow = match evt {
            Event::Mouse(mouse) => {
                if let Some(pointer) = pointer_event_from_mouse(&mouse) {
                    self.wm.handle_pointer(pointer);
                }
                ControlFlow::Continue
            }
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(&key),
            Event::Resize(width, height) => {
                self.measure(width, height);
                ControlFlow::Continue
            }
            Event::Paste(payload) => {
                if !self.wm.on_backdrop_drop(&payload) {
                    self.status = "drop ignored".to_string();
                }
                ControlFlow::Continue
            }
            _ => ControlFlow::Continue,
        };
        self.sync();
        flow
    }

    fn handle_key(&mut self, key: &KeyEvent) -> ControlFlow {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return ControlFlow::Quit;
        }
        if let Some(id) = self.wm.topmost()
            && self.contents.handle_key(&mut self.wm, id, key)
        {
            return ControlFlow::Continue;
        }
        match key.code {
            KeyCode::Char('q') => return ControlFlow::Quit,
            KeyCode::Char('s') => {
                self.wm.open_segment();
            }
            KeyCode::Char('p') => {
                self.wm.open_new_persona();
            }
            KeyCode::Char('m') => {
                if let Some(id) = self.open_topmost() {
                    self.wm.minimize(id);
                }
            }
            KeyCode::Char('r') => {
                for id in self.wm.registry().minimized_ids() {
                    self.wm.restore(id);
                }
            }
            KeyCode::Char('x') => {
                if let Some(id) = self.open_topmost() {
                    self.wm.close_window(id);
                }
            }
            _ => {}
        }
        ControlFlow::Continue
    }

    fn open_topmost(&self) -> Option<WindowId> {
        self.wm
            .z_order()
            .iter()
            .find(|id| self.wm.is_paintable(*id))
    }

    fn sync(&mut self) {
        let events = self.wm.take_events();
        self.contents.sync(&events);
        for event in events {
            if let WmEvent::ItemDeleted(item) = event {
                self.status = format!("deleted {item}");
            }
        }
        if let Some(enabled) = self.wm.take_text_selection_change() {
            tracing::debug!(enabled, "text selection");
        }
    }

    fn draw(&mut self, frame: &mut Frame<'_>) {
        let area = frame.area();
        let bar = Rect {
            height: area.height.min(1),
            ..area
        };
        let line = format!(
            " s segment  p persona  m minimize  r restore  x close  q quit  {}",
            self.status
        );
        frame.render_widget(
            Paragraph::new(line).style(Style::default().bg(Color::Blue).fg(Color::White)),
            bar,
        );
        render_workspace(frame, &self.wm, &self.decorator, &mut self.contents);
    }
}

struct SegmentView;

impl WindowContent for SegmentView {
    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, _ctx: &ContentContext) {
        frame.render_widget(Paragraph::new(SEGMENT_FORM), area);
    }
}

#[derive(Default)]
struct PersonaListView {
    selected: usize,
}

impl WindowContent for PersonaListView {
    fn render(&mut self, frame: &mut Frame<'_>, area: Rect, ctx: &ContentContext) {
        let mut lines = vec![format!("Personas ({})", ctx.id()), String::new()];
        for (idx, name) in PERSONAS.iter().enumerate() {
            let marker = if idx == self.selected { '>' } else { ' ' };
            lines.push(format!("{marker} {name}"));
        }
        lines.push(String::new());
        lines.push("enter/n: open in new window".to_string());
        let style = if ctx.focused() {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        frame.render_widget(Paragraph::new(lines.join("\n")).style(style), area);
    }

    fn handle_key(&mut self, key: &KeyEvent, ctx: &mut ContentContext) -> bool {
        match key.code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                true
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1).min(PERSONAS.len() - 1);
                true
            }
            KeyCode::Enter | KeyCode::Char('n') => {
                ctx.open_new_persona();
                true
            }
            _ => false,
        }
    }
}
