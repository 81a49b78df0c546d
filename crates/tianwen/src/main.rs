mod dashboard;
mod glyphs;
mod logging;
mod palette;
mod panel;
mod sky;
mod snapshot;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::Stylize,
    text::Line,
    widgets::Paragraph,
};
use tianwen_astro::{AnalyticEphemeris, AngleStrategy};
use tianwen_calendar::CalendarStrategy;
use tianwen_config::Config;
use tianwen_core::{Clock, SystemClock};

use crate::dashboard::Dashboard;
use crate::panel::{PanelStatus, info_lines};
use crate::snapshot::Snapshot;

/// Width of the info panel in cells.
const PANEL_WIDTH: u16 = 34;

#[derive(Debug, Parser)]
#[command(name = "tianwen", version, about = "Sun, moon, planets and the Chinese calendar in your terminal")]
struct Cli {
    /// Print a JSON snapshot of the current sky and calendar, then exit
    #[arg(long)]
    once: bool,

    /// Read settings from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if let Err(e) = logging::init() {
        eprintln!("logging disabled: {e}");
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if cli.once {
        let snapshot = Snapshot::capture(
            &AngleStrategy::from_kind(config.angle_model),
            &CalendarStrategy::from_kind(config.calendar_model),
            &AnalyticEphemeris,
            SystemClock.wall(),
            &config.observer(),
        );
        println!("{}", snapshot.to_json()?);
        return Ok(());
    }

    let terminal = ratatui::init();
    let result = App::new(config).run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
pub struct App {
    /// Is the application running?
    running: bool,
    dashboard: Dashboard,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        Self {
            running: false,
            dashboard: Dashboard::new(config, SystemClock),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            self.dashboard.tick();
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        self.dashboard.shutdown();
        Ok(())
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame) {
        let accent = self.dashboard.accent();
        let config = self.dashboard.config();

        let [main, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        let [sky_area, info_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(PANEL_WIDTH)]).areas(main);

        sky::render(frame, sky_area, &self.dashboard.scene());

        let status = PanelStatus {
            angle_model: config.angle_model,
            calendar_model: config.calendar_model,
            speed: config.animation_speed,
            paused: self.dashboard.is_paused(),
        };
        let info = Paragraph::new(info_lines(&self.dashboard.info(), status, accent));
        frame.render_widget(info, info_area);

        let help = Line::from(vec![
            "q".bold().fg(accent),
            " quit  ".dark_gray(),
            "m".bold().fg(accent),
            " angles  ".dark_gray(),
            "c".bold().fg(accent),
            " calendar  ".dark_gray(),
            "space".bold().fg(accent),
            " pause  ".dark_gray(),
            "+/-".bold().fg(accent),
            " speed  ".dark_gray(),
            "r".bold().fg(accent),
            " reset  ".dark_gray(),
            "t".bold().fg(accent),
            " color".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, help_area);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls with a short timeout so animations keep moving.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(_) => {}
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('m')) => self.dashboard.toggle_angle_model(),
            (_, KeyCode::Char('c')) => self.dashboard.toggle_calendar_model(),
            (_, KeyCode::Char(' ')) => self.dashboard.toggle_pause(),
            (_, KeyCode::Char('+') | KeyCode::Char('=')) => self.dashboard.faster(),
            (_, KeyCode::Char('-')) => self.dashboard.slower(),
            (_, KeyCode::Char('r')) => self.dashboard.reset(),
            (_, KeyCode::Char('t')) => self.dashboard.cycle_color_theme(),
            _ => {}
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
