//! TUI (Terminal User Interface) module for Factle
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Architecture
//! - `TuiInterface`: Core UI component handling rendering and input
//!
//! # State Machine
//! The UI follows these state transitions:
//! - `Picking` → (submit) → back to `Picking` until the round is decided
//! - `Finished` ⇄ `Sharing`

use crate::game::{GameInterface, UserAction};
use crate::questions::Question;
use crate::round::{Attempt, MAX_ATTEMPTS, Round};
use crate::scoring::{ANSWER_SLOTS, Tile};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::collections::HashMap;
use std::io;
use std::thread;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const REVEAL_DELAY_MS: u64 = 220;
const OPTION_COLUMNS: usize = 2;
const OPTION_CELL_WIDTH: usize = 28;
const TILE_LABEL_WIDTH: usize = 12;
const ROW_SPACING: u16 = 2;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

/// Tile colors as (background, foreground), matching the share symbols.
fn tile_colors(tile: Option<Tile>) -> (Color, Color) {
    match tile {
        Some(Tile::Correct) => (Color::Green, Color::Black),
        Some(Tile::Present) => (Color::Yellow, Color::Black),
        Some(Tile::Absent) => (Color::Gray, Color::White),
        None => (Color::DarkGray, Color::White),
    }
}

fn option_style(tile: Option<Tile>) -> Style {
    match tile {
        Some(Tile::Correct) => Style::new().fg(Color::Green),
        Some(Tile::Present) => Style::new().fg(Color::Yellow),
        Some(Tile::Absent) => Style::new().fg(Color::DarkGray),
        None => Style::new().fg(Color::White),
    }
}

#[derive(Debug)]
enum TuiState {
    Picking,
    /// Round decided (won or lost) - result stored in interface.message
    Finished,
    Sharing,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    prompt: &'a str,
    board: &'a [Attempt],
    reveal: Option<usize>,
    selection: &'a [String],
    options: &'a [String],
    statuses: &'a HashMap<String, Tile>,
    cursor: usize,
    state: &'a TuiState,
    answers: &'a [String],
    source: Option<&'a str>,
    share_text: &'a str,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display. The
/// round itself lives in the game loop; this mirrors just enough of it to
/// draw the board, the option grid, and the per-option feedback colors.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    prompt: String,
    options: Vec<String>,
    board: Vec<Attempt>,
    reveal: Option<usize>,
    selection: Vec<String>,
    statuses: HashMap<String, Tile>,
    cursor: usize,
    state: TuiState,
    answers: Vec<String>,
    source: Option<String>,
    share_text: String,
    message: String,
    error_message: String,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        info_log!("Raw mode enabled");
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        info_log!("Terminal setup complete: alternate screen, cursor hidden");
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal backend created");

        Ok(Self {
            terminal,
            prompt: String::new(),
            options: Vec::new(),
            board: Vec::new(),
            reveal: None,
            selection: Vec::new(),
            statuses: HashMap::new(),
            cursor: 0,
            state: TuiState::Picking,
            answers: Vec::new(),
            source: None,
            share_text: String::new(),
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    /// Draw the current UI state to the terminal.
    ///
    /// Returns an error if rendering fails.
    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            prompt: &self.prompt,
            board: &self.board,
            reveal: self.reveal,
            selection: &self.selection,
            options: &self.options,
            statuses: &self.statuses,
            cursor: self.cursor,
            state: &self.state,
            answers: &self.answers,
            source: self.source.as_deref(),
            share_text: &self.share_text,
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Render the complete UI layout using the provided context.
    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),  // Title + prompt
                Constraint::Length(14), // Game board (5 attempts + current pick)
                Constraint::Min(8),     // Options / results / share panel
                Constraint::Length(3),  // Status line
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        Self::render_header(f, chunks[0], ctx.prompt);
        Self::render_board(f, chunks[1], ctx);
        Self::render_panel(f, chunks[2], ctx);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_header(f: &mut Frame, area: Rect, prompt: &str) {
        let lines = vec![
            Line::from(Span::styled("FACTLE", HEADER_STYLE)),
            Line::from(prompt.to_string()),
        ];
        let header = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(header, area);
    }

    fn render_board(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let block = Block::default()
            .title("Attempts")
            .borders(Borders::ALL)
            .style(Style::default());

        let inner = block.inner(area);
        f.render_widget(block, area);

        let last_row = ctx.board.len().saturating_sub(1);
        for (row_index, attempt) in ctx.board.iter().enumerate() {
            // While revealing, the newest row only shows its first N tiles
            let shown = match ctx.reveal {
                Some(n) if row_index == last_row => n,
                _ => ANSWER_SLOTS,
            };
            Self::render_attempt_row(f, inner, row_index, attempt, shown);
        }

        if matches!(ctx.state, TuiState::Picking) && ctx.board.len() < MAX_ATTEMPTS {
            Self::render_selection_row(f, inner, ctx.board.len(), ctx.selection);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_attempt_row(
        f: &mut Frame,
        area: Rect,
        row_index: usize,
        attempt: &Attempt,
        shown: usize,
    ) {
        let y = area.y + (row_index as u16 * ROW_SPACING);
        if y >= area.y + area.height {
            return;
        }

        let mut spans = vec![Span::raw("  ")];
        for i in 0..ANSWER_SLOTS {
            let tile = (i < shown).then(|| attempt.tiles[i]);
            let (bg_color, fg_color) = tile_colors(tile);
            let label = if i < shown { attempt.labels[i].as_str() } else { "" };

            spans.push(Span::styled(
                format!(" {label:<w$.w$} ", w = TILE_LABEL_WIDTH),
                Style::default().fg(fg_color).bg(bg_color),
            ));
            spans.push(Span::raw(" "));
        }

        Self::render_line(f, area, y, spans);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_selection_row(f: &mut Frame, area: Rect, row_index: usize, selection: &[String]) {
        let y = area.y + (row_index as u16 * ROW_SPACING);
        if y >= area.y + area.height {
            return;
        }

        let mut spans = vec![Span::raw("  ")];
        for i in 0..ANSWER_SLOTS {
            let label = selection.get(i).map_or("", String::as_str);
            spans.push(Span::styled(
                format!(" {label:<w$.w$} ", w = TILE_LABEL_WIDTH),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            ));
            spans.push(Span::raw(" "));
        }

        Self::render_line(f, area, y, spans);
    }

    fn render_line(f: &mut Frame, area: Rect, y: u16, spans: Vec<Span>) {
        let line = Line::from(spans);
        let paragraph = Paragraph::new(line);
        f.render_widget(
            paragraph,
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            },
        );
    }

    /// Middle panel: the option grid while picking, the result once the
    /// round is decided, and the share text while sharing.
    fn render_panel(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if !ctx.message.is_empty() {
            lines.push(Line::from(Span::styled(ctx.message, MESSAGE_STYLE)));
        }
        if !ctx.error_message.is_empty() {
            lines.push(Line::from(Span::styled(ctx.error_message, ERROR_STYLE)));
        }
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }

        match ctx.state {
            TuiState::Picking => Self::push_option_grid(&mut lines, ctx),
            TuiState::Finished => Self::push_result(&mut lines, ctx),
            TuiState::Sharing => {
                for row in ctx.share_text.lines() {
                    lines.push(Line::from(Span::styled(
                        row.to_string(),
                        SUCCESS_STYLE,
                    )));
                }
                lines.push(Line::from(""));
                lines.push(Line::from("Copy the text above to share your result."));
            }
        }

        let title = match ctx.state {
            TuiState::Picking => "Options",
            TuiState::Finished => "Result",
            TuiState::Sharing => "Share",
        };
        let paragraph = Paragraph::new(lines)
            .block(Block::default().title(title).borders(Borders::ALL))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn push_option_grid(lines: &mut Vec<Line>, ctx: &RenderContext) {
        let rows = ctx.options.len().div_ceil(OPTION_COLUMNS);
        for row in 0..rows {
            let mut spans = Vec::new();
            for col in 0..OPTION_COLUMNS {
                let index = row * OPTION_COLUMNS + col;
                let Some(option) = ctx.options.get(index) else {
                    continue;
                };

                let marker = if index == ctx.cursor { "> " } else { "  " };
                spans.push(Span::raw(marker.to_string()));

                // A picked option shows its slot number in the current guess
                let text = match ctx.selection.iter().position(|l| l == option) {
                    Some(slot) => format!("[{}] {option}", slot + 1),
                    None => option.clone(),
                };
                let mut style = option_style(ctx.statuses.get(option).copied());
                if index == ctx.cursor {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                spans.push(Span::styled(
                    format!("{text:<w$.w$}", w = OPTION_CELL_WIDTH),
                    style,
                ));
            }
            lines.push(Line::from(spans));
        }
    }

    fn push_result(lines: &mut Vec<Line>, ctx: &RenderContext) {
        if !ctx.answers.is_empty() {
            lines.push(Line::from(Span::styled("The top 5 in order:", INFO_STYLE)));
            for (i, answer) in ctx.answers.iter().enumerate() {
                lines.push(Line::from(format!("  {}. {}", i + 1, answer)));
            }
            lines.push(Line::from(""));
        }
        if let Some(source) = ctx.source {
            lines.push(Line::from(format!("Source: {source}")));
            lines.push(Line::from(""));
        }
        lines.push(Line::from("Press S to share your result."));
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: &TuiState) {
        let text = match state {
            TuiState::Picking => {
                "ARROWS: Move | SPACE: Pick | BACKSPACE: Undo | ENTER: Submit | ESC: Quit"
            }
            TuiState::Finished => "S: Share result | ESC: Quit",
            TuiState::Sharing => "Any key: Back | ESC: Quit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        // Poll with a timeout to check if events are available
        let poll_result = event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))?;

        if !poll_result {
            // No event available, return None to continue the loop
            return Ok(None);
        }

        let event = event::read()?;
        debug_log!("handle_input() - Event received: {:?}", event);

        // Filter out non-key events (mouse, focus, etc.)
        match event {
            Event::Mouse(_) => {
                debug_log!("handle_input() - Ignoring mouse event");
                Ok(None)
            }
            Event::FocusGained | Event::FocusLost => {
                debug_log!("handle_input() - Ignoring focus event");
                Ok(None)
            }
            Event::Paste(_) => {
                debug_log!("handle_input() - Ignoring paste event");
                Ok(None)
            }
            Event::Resize(_, _) => {
                debug_log!("handle_input() - Ignoring resize event");
                Ok(None)
            }
            Event::Key(key) => {
                // Only process Press events, ignore Release and Repeat to avoid double input
                if key.kind != event::KeyEventKind::Press {
                    debug_log!(
                        "handle_input() - Ignoring non-Press key event: {:?}",
                        key.kind
                    );
                    return Ok(None);
                }

                // Filter out invalid characters that come from terminal focus events (alt-tab)
                if let KeyCode::Char(c) = key.code
                    && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
                {
                    debug_log!(
                        "handle_input() - Ignoring invalid character from escape sequence: {:?}",
                        c
                    );
                    return Ok(None);
                }

                // Ignore inputs with Alt or Control modifiers to prevent alt-tab issues
                if Self::has_modifier_keys(&key) {
                    debug_log!(
                        "handle_input() - Ignoring input with modifier: {:?}",
                        key.modifiers
                    );
                    return Ok(None);
                }

                debug_log!(
                    "handle_input() - Key event received: code={:?}, modifiers={:?}",
                    key.code,
                    key.modifiers
                );
                match &self.state {
                    TuiState::Picking => Ok(self.handle_picking_input(key)),
                    TuiState::Finished => Ok(Self::handle_finished_input(key)),
                    TuiState::Sharing => Ok(self.handle_sharing_input(key)),
                }
            }
        }
    }

    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(event::KeyModifiers::ALT)
            || key.modifiers.contains(event::KeyModifiers::CONTROL)
    }

    fn handle_picking_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        self.error_message.clear();

        match key.code {
            KeyCode::Esc => {
                info_log!("handle_picking_input() - ESC pressed, returning Exit");
                Some(UserAction::Exit)
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                if self.cursor + 1 < self.options.len() {
                    self.cursor += 1;
                }
                None
            }
            KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(OPTION_COLUMNS);
                None
            }
            KeyCode::Down => {
                if self.cursor + OPTION_COLUMNS < self.options.len() {
                    self.cursor += OPTION_COLUMNS;
                }
                None
            }
            KeyCode::Char(' ') => {
                let label = self.options.get(self.cursor)?.clone();
                info_log!("handle_picking_input() - Picked '{}'", label);
                Some(UserAction::Select(label))
            }
            KeyCode::Backspace => Some(UserAction::Backspace),
            KeyCode::Enter => {
                info_log!("handle_picking_input() - Enter pressed, submitting");
                Some(UserAction::Submit)
            }
            _ => {
                debug_log!("handle_picking_input() - Ignoring key: {:?}", key.code);
                None
            }
        }
    }

    fn handle_finished_input(key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Char('s' | 'S') => Some(UserAction::Share),
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(UserAction::Exit),
            _ => None,
        }
    }

    fn handle_sharing_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Esc => Some(UserAction::Exit),
            _ => {
                self.state = TuiState::Finished;
                None
            }
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_question(&mut self, question: &Question) {
        self.prompt.clone_from(&question.prompt);
        self.options.clone_from(&question.options);
        self.source.clone_from(&question.source);
        self.cursor = 0;
        self.status = format!("Pick your top 5 in ranked order - {MAX_ATTEMPTS} attempts");
        self.draw_or_log();
    }

    fn display_selection(&mut self, round: &Round) {
        self.selection = round.selection().to_vec();
        self.draw_or_log();
    }

    fn display_attempt(&mut self, round: &Round, attempt: &Attempt) {
        self.selection.clear();
        self.error_message.clear();
        self.board.push(attempt.clone());
        self.status = format!(
            "Attempt {} of {MAX_ATTEMPTS} scored",
            round.attempts_used()
        );

        // Flip tiles one at a time
        for shown in 0..=ANSWER_SLOTS {
            self.reveal = Some(shown);
            self.draw_or_log();
            thread::sleep(Duration::from_millis(REVEAL_DELAY_MS));
        }
        self.reveal = None;

        // Option colors update only after the full row is shown
        for label in &attempt.labels {
            if let Some(tile) = round.option_status(label) {
                self.statuses.insert(label.clone(), tile);
            }
        }
        self.draw_or_log();
    }

    fn display_incomplete_selection(&mut self, selected: usize) {
        self.error_message =
            format!("Pick exactly 5 options before submitting ({selected} selected).");
        self.draw_or_log();
    }

    fn display_win(&mut self, round: &Round) {
        self.state = TuiState::Finished;
        self.answers.clear();
        self.message = format!("✓ Solved in {}!", round.score_indicator());
        self.status = "Game over - you got the top 5".to_string();
        self.draw_or_log();
    }

    fn display_loss(&mut self, round: &Round) {
        self.state = TuiState::Finished;
        self.answers = round.answers().to_vec();
        self.message = "Out of attempts.".to_string();
        self.status = format!("Game over - {}", round.score_indicator());
        self.draw_or_log();
    }

    fn display_share(&mut self, digest: &str) {
        self.state = TuiState::Sharing;
        self.share_text = digest.to_string();
        self.status = "Share your result".to_string();
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<UserAction> {
        info_log!("read_action() - Starting input loop");
        loop {
            // Draw the current state
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }

            // Handle input - this will block until an event is available
            match self.handle_input() {
                Ok(Some(action)) => {
                    info_log!("read_action() - Action received: {:?}", action);
                    return Some(action);
                }
                Ok(None) => {
                    // No action yet, continue the loop (cursor moved or input ignored)
                }
                Err(_e) => {
                    info_log!("read_action() - Error handling input, returning Exit");
                    return Some(UserAction::Exit);
                }
            }
        }
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
