use std::collections::HashMap;
use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Points};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph};

use shotchart_terminal::config::AppConfig;
use shotchart_terminal::court::{self, Orientation};
use shotchart_terminal::loader::ShotLoader;
use shotchart_terminal::palette::{self, hex_to_rgb};
use shotchart_terminal::players;
use shotchart_terminal::state::{self, AppState, LoaderCommand, ViewStatus, apply_delta};
use shotchart_terminal::worker;
use shotchart_terminal::zones::ZoneCounts;

const CANVAS_W: f64 = 500.0;
const CANVAS_H: f64 = 470.0;

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<LoaderCommand>>,
}

impl App {
    fn new(state: AppState, cmd_tx: Option<mpsc::Sender<LoaderCommand>>) -> Self {
        Self {
            state,
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Enter => self.request_selected(),
            KeyCode::Char(' ') => self.state.toggle_playback(Instant::now()),
            KeyCode::Char('n') | KeyCode::Right => self.state.step_forward(),
            KeyCode::Char('p') | KeyCode::Left => self.state.step_back(),
            KeyCode::Char(']') => self.state.move_season_cursor(true),
            KeyCode::Char('[') => self.state.move_season_cursor(false),
            KeyCode::Char('s') => {
                if self.state.show_cursor_season().is_none() {
                    self.state.push_log("[INFO] No season card selected");
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.state.reset(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }

    fn request_selected(&mut self) {
        let Some(player) = self.state.selected_player().map(str::to_string) else {
            self.state.push_log("[INFO] No player selected");
            return;
        };
        self.request_load(&player);
    }

    fn request_load(&mut self, player: &str) {
        let request = self.state.begin_load(player);
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log("[INFO] Loader unavailable");
            return;
        };
        if tx.send(LoaderCommand::Load(request)).is_err() {
            self.state.push_log("[WARN] Load request failed");
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let cfg = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("config error: {err:#}");
            AppConfig::default()
        }
    };

    let loader = ShotLoader::from_config(&cfg);
    let mut state = AppState::new(loader.manifest().players(), cfg.playback_interval);
    for root in &cfg.data_roots {
        state.push_log(format!("[INFO] Data root: {}", root.describe()));
    }

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    worker::spawn_loader(loader, tx, cmd_rx);

    let mut app = App::new(state, Some(cmd_tx));
    if let Some(player) = cfg.initial_player.as_deref() {
        if let Some(idx) = app.state.players.iter().position(|p| p == player) {
            app.state.selected = idx;
        }
        app.request_load(player);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<state::Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }
        app.state.tick(Instant::now());

        terminal.draw(|f| ui(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(22),
            Constraint::Min(30),
            Constraint::Length(40),
        ])
        .split(chunks[1]);

    let roster = Paragraph::new(player_list_text(&app.state))
        .block(Block::default().title("Players").borders(Borders::ALL));
    frame.render_widget(roster, columns[0]);

    render_court(frame, columns[1], &app.state);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(5)])
        .split(columns[2]);

    let timeline = Paragraph::new(timeline_text(&app.state))
        .block(Block::default().title("Seasons").borders(Borders::ALL));
    frame.render_widget(timeline, right[0]);

    render_shot_mix(frame, right[1], app.state.displayed_zone_counts());

    let console = Paragraph::new(console_text(&app.state, chunks[2].height.saturating_sub(2)))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(
        "j/k/↑/↓ Player | Enter Load | Space Play/Pause | n/p Step | [/] s Season | r Reset | ? Help | q Quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let player = state
        .current_player
        .as_deref()
        .map(players::display_name)
        .unwrap_or_else(|| "-".to_string());
    let status = match &state.status {
        ViewStatus::Idle => "Idle".to_string(),
        ViewStatus::Loading { .. } => "Loading…".to_string(),
        ViewStatus::Ready => {
            let playing = if state.is_playing() { "playing" } else { "paused" };
            match state.displayed_bucket() {
                Some(b) => format!("{} ({playing})", b.season),
                None => playing.to_string(),
            }
        }
        ViewStatus::NoData { .. } => "No data".to_string(),
        ViewStatus::Failed { .. } => "Load failed".to_string(),
    };
    let line1 = format!("  SHOT CHART | {player} | {status}");
    let line2 = match state.load_stats {
        Some(stats) => format!(
            "  files {} | rows {} | dropped {}",
            stats.files_loaded, stats.rows_read, stats.rows_dropped
        ),
        None => String::new(),
    };
    format!("{line1}\n{line2}")
}

fn player_list_text(state: &AppState) -> String {
    if state.players.is_empty() {
        return "No players configured".to_string();
    }
    state
        .players
        .iter()
        .enumerate()
        .map(|(idx, id)| {
            let cursor = if idx == state.selected { "> " } else { "  " };
            let active = if state.current_player.as_deref() == Some(id.as_str()) {
                " *"
            } else {
                ""
            };
            format!("{cursor}{}{active}", players::display_name(id))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_court(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title("Court").borders(Borders::ALL);

    let message = match &state.status {
        ViewStatus::Idle => Some("Select a player and press Enter".to_string()),
        ViewStatus::Loading { player } => {
            Some(format!("Loading {}…", players::display_name(player)))
        }
        ViewStatus::NoData { message } | ViewStatus::Failed { message } => Some(message.clone()),
        ViewStatus::Ready => None,
    };
    if let Some(message) = message {
        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let mut court_frame = court::draw_court(CANVAS_W, CANVAS_H, Orientation::CartesianUp);
    let player = state.current_player.clone().unwrap_or_default();
    if let Some(bucket) = state.displayed_bucket() {
        court_frame.plot(bucket.shots.iter(), |shot| {
            palette::palette_for(shot, &player)
                .color_for(shot.made)
                .to_string()
        });
    }

    // Misses first so makes draw on top.
    let mut by_color: Vec<(bool, String, Vec<(f64, f64)>)> = Vec::new();
    let mut slots: HashMap<(bool, String), usize> = HashMap::new();
    for mark in court_frame.layer.marks() {
        let key = (mark.made, mark.color.clone());
        let idx = *slots.entry(key).or_insert_with(|| {
            by_color.push((mark.made, mark.color.clone(), Vec::new()));
            by_color.len() - 1
        });
        by_color[idx].2.push((mark.px, mark.py));
    }
    by_color.sort_by_key(|(made, _, _)| *made);

    let scales = court_frame.scales;
    let outline = court::court_outline();
    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([0.0, CANVAS_W])
        .y_bounds([0.0, CANVAS_H])
        .paint(move |ctx| {
            for line in &outline {
                let (x1, y1) = scales.to_px(line.x1, line.y1);
                let (x2, y2) = scales.to_px(line.x2, line.y2);
                ctx.draw(&CanvasLine {
                    x1,
                    y1,
                    x2,
                    y2,
                    color: Color::Rgb(208, 185, 144),
                });
            }
            ctx.layer();
            for (_, hex, coords) in &by_color {
                ctx.draw(&Points {
                    coords,
                    color: to_color(hex),
                });
            }
        });
    frame.render_widget(canvas, area);
}

fn timeline_text(state: &AppState) -> String {
    let summaries = state.revealed_summaries();
    if summaries.is_empty() {
        return "Season cards appear during playback".to_string();
    }
    let displayed = state.displayed_index();
    let picked = state.season_cursor();
    let mut lines: Vec<String> = summaries
        .iter()
        .enumerate()
        .map(|(idx, s)| {
            let shown = if Some(idx) == displayed { ">" } else { " " };
            let pick = if Some(idx) == picked { "*" } else { " " };
            let cursor = format!("{shown}{pick}");
            format!(
                "{cursor}{} {:<3} {:>3}% FG {:>4}/{:<4} {}",
                s.season,
                s.team,
                s.fg_pct,
                s.made,
                s.total,
                s.trophies()
            )
        })
        .collect();

    let highlight = state
        .displayed_bucket()
        .and_then(|b| b.shots.iter().find(|s| s.has_highlight));
    if let Some(shot) = highlight {
        lines.push(String::new());
        lines.push("Highlight:".to_string());
        lines.extend(shot.tooltip_lines());
    }
    lines.join("\n")
}

fn render_shot_mix(frame: &mut Frame, area: Rect, counts: Option<ZoneCounts>) {
    let block = Block::default().title("Shot Mix").borders(Borders::ALL);
    let Some(counts) = counts else {
        let hint = Paragraph::new("Shot mix will appear here.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let bars: Vec<Bar> = counts
        .shares()
        .iter()
        .map(|share| {
            Bar::default()
                .value(share.percent.round() as u64)
                .label(Line::from(share.zone.key()))
                .text_value(format!("{} shots", share.count))
                .style(Style::default().fg(to_color(share.zone.color())))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .group_gap(0)
        .max(100);
    frame.render_widget(chart, area);
}

fn console_text(state: &AppState, lines: u16) -> String {
    let skip = state.logs.len().saturating_sub(lines as usize);
    state
        .logs
        .iter()
        .skip(skip)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let width = 52.min(area.width);
    let height = 14.min(area.height);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };
    let text = [
        "j / k, ↑ / ↓   move player cursor",
        "Enter         load selected player",
        "Space         play / pause season playback",
        "n / →         next season",
        "p / ←         previous season",
        "[ / ]         move season card cursor",
        "s             show season under card cursor",
        "r             reset view",
        "?             toggle this help",
        "q             quit",
    ]
    .join("\n");
    frame.render_widget(Clear, popup);
    let help = Paragraph::new(text)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().title("Help").borders(Borders::ALL));
    frame.render_widget(help, popup);
}

fn to_color(hex: &str) -> Color {
    match hex_to_rgb(hex) {
        Some((r, g, b)) => Color::Rgb(r, g, b),
        None => Color::White,
    }
}
