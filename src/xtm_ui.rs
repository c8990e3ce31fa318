// Terminal UI: rendering and input for the menu, game, name prompt and score table
// Screen changes go through xtm_screen::transition; this module performs their side effects

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Span, Spans, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::{Frame, Terminal};
use std::error::Error;
use std::io;
use std::mem;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};
use unicode_width::UnicodeWidthStr;

use crate::xtm_audio::{self, AudioSink, Cue};
use crate::xtm_color::Palette;
use crate::xtm_config::{self, Config, save_config};
use crate::xtm_lang::Lang;
use crate::xtm_layout::{self, BoardGeometry, MARGIN, MIN_CELL_W, bottom_centered_block, center_rect};
use crate::xtm_score::{MAX_NAME_LEN, MAX_SCORES, ScoreEntry, ScoreStore};
use crate::xtm_screen::{MenuItem, NamePrompt, Nav, Screen, transition};
use crate::xtm_session::{GameSession, Outcome, RevealOutcome};

const TICK_RATE: Duration = Duration::from_millis(200);
const LOSS_PAUSE: Duration = Duration::from_secs(2);  // mines stay on screen before the prompt
const PRESS_FLASH: Duration = Duration::from_millis(200);
const PANEL_W: u16 = 22;   // info panel and game buttons
const BUTTON_W: u16 = 28;  // menu buttons
const MIN_W: u16 = 60;
const MIN_H: u16 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Button {
    Menu(MenuItem),
    Restart,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ButtonState {
    Normal,
    Hover,
    Pressed,
}

struct Glyphs {
    hidden: &'static str,
    mine: &'static str,
    flag: &'static str,
}

impl Glyphs {
    fn new(ascii: bool) -> Self {
        Glyphs {
            hidden: if ascii { "#" } else { "■" },
            mine: if ascii { "*" } else { "☼" },
            flag: if ascii { "F" } else { "⚑" },
        }
    }
}

// Everything the loop needs between frames
struct App<'a> {
    lang: &'a Lang,
    palette: Palette,
    glyphs: Glyphs,
    audio: Box<dyn AudioSink>,
    store: Option<ScoreStore>,       // None when no data directory exists
    scores: Vec<ScoreEntry>,         // last table read or written
    screen: Screen,
    session: Option<GameSession>,    // alive while Playing and during the name prompt
    cursor: (usize, usize),          // keyboard cursor (row, col)
    menu_selected: MenuItem,
    hover: Option<Button>,
    pressed: Option<(Button, Instant)>,
    buttons: Vec<(Button, Rect)>,    // hit areas from the last frame
    geometry: Option<BoardGeometry>, // board placement from the last frame
    loss_pending: bool,              // pause then prompt on the next pass
    cfg: &'a mut Config,
}

impl<'a> App<'a> {
    fn new(cfg: &'a mut Config, lang: &'a Lang) -> Self {
        let store = match xtm_config::scores_path(cfg) {
            Ok(path) => {
                let store = ScoreStore::new(path);
                info!(path = %store.path().display(), "score table");
                Some(store)
            }
            Err(e) => {
                error!(error = %e, "score table unavailable");
                None
            }
        };
        App {
            lang,
            palette: Palette::detect(),
            glyphs: Glyphs::new(cfg.ascii_icons),
            audio: xtm_audio::sink_for(cfg.sound),
            store,
            scores: Vec::new(),
            screen: Screen::Menu,
            session: None,
            cursor: (0, 0),
            menu_selected: MenuItem::Play,
            hover: None,
            pressed: None,
            buttons: Vec::new(),
            geometry: None,
            loss_pending: false,
            cfg,
        }
    }

    /// Run the side effects of `nav`, then move to the next screen
    fn navigate(&mut self, nav: Nav) {
        if matches!(
            (&self.screen, &nav),
            (Screen::Menu, Nav::Play) | (Screen::Playing, Nav::Restart)
        ) {
            self.start_game();
        }
        if matches!((&self.screen, &nav), (Screen::Menu, Nav::OpenScores)) {
            self.reload_scores();
        }
        let submitted = match (&self.screen, &nav) {
            (Screen::NameEntry(prompt), Nav::SubmitName) => Some(prompt.clone()),
            _ => None,
        };
        if let Some(prompt) = submitted {
            self.submit_score(&prompt);
        }

        let before = mem::discriminant(&self.screen);
        let screen = mem::replace(&mut self.screen, Screen::Menu);
        self.screen = transition(screen, nav);
        if before != mem::discriminant(&self.screen) {
            debug!(screen = ?self.screen, "screen changed");
            self.hover = None;
        }
        if matches!(self.screen, Screen::Menu | Screen::Exit) {
            self.session = None;
            self.geometry = None;
            self.loss_pending = false;
        }
    }

    fn start_game(&mut self) {
        let session = GameSession::new(self.cfg.difficulty);
        self.cursor = (session.rows / 2, session.cols / 2);
        self.session = Some(session);
        self.loss_pending = false;
    }

    fn reload_scores(&mut self) {
        self.scores = match &self.store {
            Some(store) => store.load_scores().unwrap_or_else(|e| {
                error!(error = %e, "failed to read scores");
                Vec::new()
            }),
            None => Vec::new(),
        };
    }

    fn submit_score(&mut self, prompt: &NamePrompt) {
        let name = prompt.name.trim();
        if name.is_empty() {
            info!(score = prompt.score, "no name given, score not saved");
            return;
        }
        let Some(store) = &self.store else { return };
        match store.save_score(ScoreEntry::new(name, prompt.score, prompt.elapsed_secs)) {
            Ok(table) => self.scores = table,
            Err(e) => error!(error = %e, "failed to save score"),
        }
    }

    fn cycle_difficulty(&mut self) {
        self.cfg.difficulty = self.cfg.difficulty.next();
        info!(difficulty = self.cfg.difficulty.name(), "difficulty selected");
        save_config(self.cfg);
    }

    fn finish_game(&mut self) {
        let Some(session) = &self.session else { return };
        let nav = Nav::Finished {
            victory: session.outcome() == Outcome::Won,
            score: session.score(),
            elapsed_secs: session.elapsed_secs(),
        };
        self.navigate(nav);
    }

    fn play_events(&mut self) {
        let Some(session) = self.session.as_mut() else { return };
        for ev in session.drain_events() {
            if let Some(cue) = xtm_audio::cue_for(ev) {
                self.audio.play(cue);
            }
        }
    }

    fn reveal_at(&mut self, row: usize, col: usize) {
        let Some(session) = self.session.as_mut() else { return };
        let outcome = session.reveal_cell(row, col);
        self.play_events();
        match outcome {
            RevealOutcome::Exploded => self.loss_pending = true,
            RevealOutcome::Won => self.finish_game(),
            RevealOutcome::Revealed(_) | RevealOutcome::Ignored => {}
        }
    }

    fn flag_at(&mut self, row: usize, col: usize) {
        let Some(session) = self.session.as_mut() else { return };
        if session.toggle_flag(row, col) {
            self.play_events();
        }
    }

    fn move_cursor(&mut self, dr: isize, dc: isize) {
        let Some(session) = &self.session else { return };
        let row = self.cursor.0.saturating_add_signed(dr).min(session.rows.saturating_sub(1));
        let col = self.cursor.1.saturating_add_signed(dc).min(session.cols.saturating_sub(1));
        self.cursor = (row, col);
    }

    fn activate(&mut self, button: Button) {
        self.pressed = Some((button, Instant::now()));
        self.audio.play(Cue::Click);
        match button {
            Button::Menu(MenuItem::Play) => self.navigate(Nav::Play),
            Button::Menu(MenuItem::Difficulty) => self.cycle_difficulty(),
            Button::Menu(MenuItem::Scores) => self.navigate(Nav::OpenScores),
            Button::Menu(MenuItem::Exit) => self.navigate(Nav::Quit),
            Button::Restart => self.navigate(Nav::Restart),
            Button::Back => self.navigate(Nav::Back),
        }
    }

    fn on_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
            self.navigate(Nav::Quit);
            return;
        }
        match self.screen {
            Screen::Menu => match code {
                KeyCode::Up | KeyCode::BackTab => self.menu_selected = self.menu_selected.prev(),
                KeyCode::Down | KeyCode::Tab => self.menu_selected = self.menu_selected.next(),
                KeyCode::Enter | KeyCode::Char(' ') => self.activate(Button::Menu(self.menu_selected)),
                KeyCode::Esc => self.navigate(Nav::Quit),
                _ => {}
            },
            Screen::Playing => match code {
                KeyCode::Up => self.move_cursor(-1, 0),
                KeyCode::Down => self.move_cursor(1, 0),
                KeyCode::Left => self.move_cursor(0, -1),
                KeyCode::Right => self.move_cursor(0, 1),
                KeyCode::Char(' ') | KeyCode::Enter => self.reveal_at(self.cursor.0, self.cursor.1),
                KeyCode::Char('f') | KeyCode::Char('F') => self.flag_at(self.cursor.0, self.cursor.1),
                KeyCode::Char('r') | KeyCode::Char('R') => self.activate(Button::Restart),
                KeyCode::Esc => self.activate(Button::Back),
                _ => {}
            },
            Screen::NameEntry(_) => match code {
                KeyCode::Enter => self.navigate(Nav::SubmitName),
                KeyCode::Esc => self.navigate(Nav::Back),
                KeyCode::Backspace => self.navigate(Nav::Backspace),
                KeyCode::Char(ch) => self.navigate(Nav::TypeChar(ch)),
                _ => {}
            },
            Screen::Scores => match code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => self.activate(Button::Back),
                _ => {}
            },
            Screen::Exit => {}
        }
    }

    fn on_mouse(&mut self, me: MouseEvent) {
        let (x, y) = (me.column, me.row);
        let button = self
            .buttons
            .iter()
            .find(|(_, r)| xtm_layout::contains(*r, x, y))
            .map(|(b, _)| *b);
        let cell = if self.screen == Screen::Playing {
            self.geometry.and_then(|g| g.cell_at(x, y))
        } else {
            None
        };

        match me.kind {
            MouseEventKind::Moved => {
                self.hover = button;
                if let Some(Button::Menu(item)) = button {
                    self.menu_selected = item;
                }
                if let Some(pos) = cell {
                    self.cursor = pos;
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(b) = button {
                    self.activate(b);
                } else if let Some((r, c)) = cell {
                    self.cursor = (r, c);
                    self.reveal_at(r, c);
                }
            }
            MouseEventKind::Down(MouseButton::Right) => {
                if let Some((r, c)) = cell {
                    self.cursor = (r, c);
                    self.flag_at(r, c);
                }
            }
            _ => {}
        }
    }

    fn button_state(&self, button: Button) -> ButtonState {
        if matches!(self.pressed, Some((b, _)) if b == button) {
            return ButtonState::Pressed;
        }
        let hovered = match button {
            Button::Menu(item) => item == self.menu_selected,
            _ => self.hover == Some(button),
        };
        if hovered { ButtonState::Hover } else { ButtonState::Normal }
    }

    /// Smallest terminal the current screen can be drawn in
    fn min_size(&self) -> (u16, u16) {
        match (&self.screen, &self.session) {
            (Screen::Playing | Screen::NameEntry(_), Some(s)) => {
                let w = s.cols as u16 * MIN_CELL_W + 2 + 2 * MARGIN + PANEL_W;
                let h = s.rows as u16 + 2 + 2 * MARGIN + 4;
                (w.max(MIN_W), h.max(MIN_H))
            }
            _ => (MIN_W, MIN_H),
        }
    }

    fn draw<B: Backend>(&mut self, f: &mut Frame<B>) {
        let size = f.size();
        self.buttons.clear();
        let (min_w, min_h) = self.min_size();
        if size.width < min_w || size.height < min_h {
            self.geometry = None;
            draw_too_small(f, size, min_w, min_h, self.lang);
            return;
        }
        match self.screen {
            Screen::Menu => self.draw_menu(f, size),
            Screen::Playing => self.draw_game(f, size),
            Screen::NameEntry(_) => {
                self.draw_game(f, size);
                // the prompt owns the input
                self.buttons.clear();
                self.draw_prompt(f, size);
            }
            Screen::Scores => self.draw_scores(f, size),
            Screen::Exit => {}
        }
    }

    fn draw_menu<B: Backend>(&mut self, f: &mut Frame<B>, size: Rect) {
        let lang = self.lang;
        let a = &lang.assets;
        let p = self.palette;
        let area = center_rect(BUTTON_W, 4 + MenuItem::ALL.len() as u16 * 3, size);

        let title = Paragraph::new(Span::styled(a.title, Style::default().fg(p.accent()).add_modifier(Modifier::BOLD)))
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(title, Rect::new(area.x, area.y, area.width, 3));

        for (i, item) in MenuItem::ALL.iter().enumerate() {
            let rect = Rect::new(area.x, area.y + 4 + i as u16 * 3, area.width, 3);
            let label = match item {
                MenuItem::Play => a.menu_play.to_string(),
                MenuItem::Difficulty => format!("{}: {}", a.menu_difficulty, lang.diff_name(self.cfg.difficulty.to_index())),
                MenuItem::Scores => a.menu_scores.to_string(),
                MenuItem::Exit => a.menu_exit.to_string(),
            };
            let button = Button::Menu(*item);
            f.render_widget(button_widget(label, self.button_state(button), &p), rect);
            self.buttons.push((button, rect));
        }

        draw_hint(f, a.menu_hint, size, &p);
    }

    fn draw_game<B: Backend>(&mut self, f: &mut Frame<B>, size: Rect) {
        let lang = self.lang;
        let a = &lang.assets;
        let p = self.palette;
        let Some(session) = self.session.as_ref() else { return };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(6), Constraint::Length(1)].as_ref())
            .split(size);

        let title = format!("{} {}", a.level_label, lang.diff_name(session.difficulty.to_index()));
        let title = Paragraph::new(Span::styled(title, Style::default().fg(p.accent()).add_modifier(Modifier::BOLD)))
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(PANEL_W)].as_ref())
            .split(chunks[1]);

        // board
        let geometry = BoardGeometry::fit(body[0], session.rows, session.cols);
        let border = match session.outcome() {
            Outcome::Won => p.win_bg(),
            Outcome::Lost => p.loss_bg(),
            Outcome::Ongoing => p.text(),
        };
        f.render_widget(
            Block::default().borders(Borders::ALL).border_style(Style::default().fg(border)),
            geometry.outer(),
        );
        let mut lines = Vec::with_capacity(session.rows);
        for r in 0..session.rows {
            let mut spans = Vec::with_capacity(session.cols);
            for c in 0..session.cols {
                let (glyph, mut style) = cell_look(session, r, c, &self.glyphs, &p);
                if (r, c) == self.cursor && !session.is_over() {
                    style = style.bg(p.cursor());
                }
                spans.push(Span::styled(format!("{:^w$}", glyph, w = geometry.cell_w as usize), style));
            }
            lines.push(Spans::from(spans));
        }
        f.render_widget(Paragraph::new(Text::from(lines)), geometry.inner());
        self.geometry = Some(geometry);

        // info panel and buttons
        let panel = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)].as_ref())
            .split(body[1]);
        let secs = session.elapsed_secs();
        let clock = if session.timer_running() {
            Style::default().fg(p.accent()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(p.text())
        };
        let info = vec![
            Spans::from(Span::styled(format!(" {}: {:02}:{:02}", a.info_time, secs / 60, secs % 60), clock)),
            Spans::from(format!(" {}: {}", a.info_flags, session.flags_placed)),
            Spans::from(format!(" {}: {}", a.info_mines, session.remaining_mines())),
        ];
        f.render_widget(
            Paragraph::new(Text::from(info)).style(Style::default().fg(p.text())).block(Block::default().borders(Borders::ALL)),
            panel[0],
        );
        for (button, label, rect) in [(Button::Restart, a.btn_restart, panel[1]), (Button::Back, a.btn_back, panel[2])] {
            f.render_widget(button_widget(label.to_string(), self.button_state(button), &p), rect);
            self.buttons.push((button, rect));
        }

        draw_hint(f, a.game_hint, chunks[2], &p);
    }

    fn draw_prompt<B: Backend>(&self, f: &mut Frame<B>, size: Rect) {
        let Screen::NameEntry(prompt) = &self.screen else { return };
        let a = &self.lang.assets;
        let p = self.palette;
        let (bg, message) = if prompt.victory {
            (p.win_bg(), a.win_message)
        } else {
            (p.loss_bg(), a.loss_message)
        };

        let area = center_rect(40, 8, size);
        let lines = vec![
            Spans::from(Span::styled(message, Style::default().add_modifier(Modifier::BOLD))),
            Spans::from(""),
            Spans::from(format!("{}: {} ({} s)", a.prompt_score, prompt.score, prompt.elapsed_secs)),
            Spans::from(format!("{}: {}_", a.prompt_name, prompt.name)),
            Spans::from(""),
            Spans::from(a.prompt_hint),
        ];
        f.render_widget(Clear, area);
        f.render_widget(
            Paragraph::new(Text::from(lines))
                .style(Style::default().bg(bg).fg(p.ink()))
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            area,
        );
    }

    fn draw_scores<B: Backend>(&mut self, f: &mut Frame<B>, size: Rect) {
        let a = &self.lang.assets;
        let p = self.palette;
        let table_h = MAX_SCORES as u16 + 3; // header plus borders
        let area = center_rect(40, table_h + 4, size);

        let mut lines = Vec::with_capacity(self.scores.len() + 1);
        if self.scores.is_empty() {
            lines.push(Spans::from(Span::styled(a.scores_empty, Style::default().fg(p.text()))));
        } else {
            lines.push(Spans::from(Span::styled(
                format!(" #  {}  {:>6}  {:>5}", pad_display(a.prompt_name, MAX_NAME_LEN), a.scores_points, a.info_time),
                Style::default().fg(p.accent()).add_modifier(Modifier::BOLD),
            )));
            for (i, entry) in self.scores.iter().enumerate() {
                let place = i + 1;
                let style = match p.podium(place) {
                    Some(color) => Style::default().fg(color).add_modifier(Modifier::BOLD),
                    None => Style::default().fg(p.text()),
                };
                let secs = entry.elapsed_secs;
                lines.push(Spans::from(Span::styled(
                    format!(
                        "{:>2}. {}  {:>6}  {:02}:{:02}",
                        place,
                        pad_display(&entry.name, MAX_NAME_LEN),
                        entry.score,
                        secs / 60,
                        secs % 60
                    ),
                    style,
                )));
            }
        }
        f.render_widget(
            Paragraph::new(Text::from(lines))
                .block(Block::default().borders(Borders::ALL).title(a.scores_title))
                .alignment(Alignment::Center),
            Rect::new(area.x, area.y, area.width, table_h),
        );

        let back = center_rect(20, 3, Rect::new(area.x, area.y + table_h + 1, area.width, 3));
        f.render_widget(button_widget(a.btn_back.to_string(), self.button_state(Button::Back), &p), back);
        self.buttons.push((Button::Back, back));
    }
}

/// What a cell shows: glyph and style before cursor highlighting
fn cell_look(session: &GameSession, r: usize, c: usize, glyphs: &Glyphs, p: &Palette) -> (String, Style) {
    let revealed = session.revealed.get(r, c) == Some(&true);
    let mine = session.mines.get(r, c) == Some(&true);
    let flagged = session.flags.get(r, c) == Some(&true);
    let bold = Modifier::BOLD;

    if mine && (revealed || session.show_all_mines()) {
        let bg = if revealed { p.loss_bg() } else { p.board_bg() };
        return (glyphs.mine.to_string(), Style::default().fg(p.mine()).bg(bg).add_modifier(bold));
    }
    if flagged {
        return (glyphs.flag.to_string(), Style::default().fg(p.flag()).bg(p.board_bg()).add_modifier(bold));
    }
    if !revealed {
        return (glyphs.hidden.to_string(), Style::default().fg(p.hidden()).bg(p.board_bg()));
    }
    match session.adjacency.get(r, c).and_then(|adj| adj.count()) {
        Some(n) if n > 0 => (n.to_string(), Style::default().fg(p.number(n)).add_modifier(bold)),
        _ => (" ".to_string(), Style::default()),
    }
}

fn button_widget(label: String, state: ButtonState, p: &Palette) -> Paragraph<'static> {
    let style = match state {
        ButtonState::Pressed => Style::default().bg(p.pressed()).fg(p.ink()).add_modifier(Modifier::BOLD),
        ButtonState::Hover => Style::default().bg(p.cursor()).fg(p.ink()).add_modifier(Modifier::BOLD),
        ButtonState::Normal => Style::default().fg(p.accent()).add_modifier(Modifier::BOLD),
    };
    Paragraph::new(Span::styled(label, style))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
}

fn draw_hint<B: Backend>(f: &mut Frame<B>, hint: &str, area: Rect, p: &Palette) {
    let rect = bottom_centered_block(hint.width() as u16, 1, area);
    f.render_widget(Paragraph::new(Span::styled(hint, Style::default().fg(p.text()))), rect);
}

fn draw_too_small<B: Backend>(f: &mut Frame<B>, size: Rect, min_w: u16, min_h: u16, lang: &Lang) {
    let a = &lang.assets;
    let lines = vec![
        Spans::from(a.tsmsg_line1),
        Spans::from(format!("{} {} x {}", a.tsmsg_line2, min_w, min_h)),
    ];
    let warn = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(a.tsmsg_title))
        .alignment(Alignment::Center);
    f.render_widget(Clear, size);
    let w = 40u16.min(size.width.saturating_sub(2));
    let h = 4u16.min(size.height.saturating_sub(2));
    f.render_widget(warn, center_rect(w, h, size));
}

// Pad to a display width; names may hold wide characters
fn pad_display(s: &str, width: usize) -> String {
    let w = s.width();
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - w))
    }
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, mut app: App<'_>) -> Result<(), Box<dyn Error>> {
    let mut last_tick = Instant::now();

    while app.screen != Screen::Exit {
        terminal.draw(|f| app.draw(f))?;

        if app.loss_pending {
            app.loss_pending = false;
            thread::sleep(LOSS_PAUSE);
            // input given during the pause is dropped
            while event::poll(Duration::ZERO)? {
                event::read()?;
            }
            app.finish_game();
            continue;
        }

        let timeout = TICK_RATE.checked_sub(last_tick.elapsed()).unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(KeyEvent { code, modifiers, kind: KeyEventKind::Press, .. }) => app.on_key(code, modifiers),
                Event::Mouse(me) => app.on_mouse(me),
                _ => {}
            }
        }

        // clear click feedback after a short flash
        if let Some((_, t0)) = app.pressed {
            if t0.elapsed() > PRESS_FLASH {
                app.pressed = None;
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            last_tick = Instant::now();
        }
    }

    save_config(app.cfg);
    Ok(())
}

pub fn run(cfg: &mut Config, lang: &Lang) -> Result<(), Box<dyn Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnableMouseCapture, terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!(difficulty = cfg.difficulty.name(), lang = %lang.current_lang, "ui started");
    let result = event_loop(&mut terminal, App::new(cfg, lang));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_counts_display_width() {
        assert_eq!(pad_display("ana", 5), "ana  ");
        assert_eq!(pad_display("日本", 5), "日本 ");
        assert_eq!(pad_display("abcdef", 3), "abcdef");
    }

    #[test]
    fn ascii_glyphs_are_single_width() {
        let g = Glyphs::new(true);
        for glyph in [g.hidden, g.mine, g.flag] {
            assert_eq!(glyph.width(), 1);
        }
    }

    #[test]
    fn hints_fit_the_narrowest_terminal() {
        for lang in [Lang::new("en"), Lang::new("es")] {
            let a = &lang.assets;
            for hint in [a.menu_hint, a.game_hint, a.prompt_hint] {
                assert!(hint.width() <= MIN_W as usize, "{:?} is wider than {}", hint, MIN_W);
            }
        }
    }
}
