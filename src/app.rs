use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::BTreeSet;
use tui_input::{Input, InputRequest};

use crate::command::{self, Command, CommandState};
use crate::models::Model;
use crate::player::{MediaPlayer, Playback};
use crate::ui;
use crate::ui::Theme;

/// Active input mode; Play owns the running player
pub enum Mode {
    /// Navigation, marking and `:` commands
    Normal,
    /// A clip is playing; only space (stop) is honoured
    Play {
        stem: String,
        playback: Box<dyn Playback>,
    },
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Normal => ModeKind::Normal,
            Mode::Play { .. } => ModeKind::Play,
        }
    }
}

/// Data-free mirror of `Mode` for rendering
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    #[default]
    Normal,
    Play,
}

impl ModeKind {
    pub fn name(self) -> &'static str {
        match self {
            ModeKind::Normal => "NORMAL",
            ModeKind::Play => "PLAY",
        }
    }
}

/// Non-printable keys passed to the active mode alongside the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Delete,
}

/// Screen regions that need repainting on the next frame
///
/// Every frame is drawn in full into ratatui's back buffer, and only cells
/// that differ from the previous frame reach the terminal, so `Lines` costs no
/// more than the rows it names. `Full` makes the session clear the terminal
/// before drawing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redraw {
    Clean,
    /// Clip indices whose rows changed
    Lines(BTreeSet<usize>),
    Full,
}

/// Review session state
pub struct App {
    /// Clips under review
    pub model: Model,

    /// External player used for previews
    player: Box<dyn MediaPlayer>,

    theme: Theme,

    mode: Mode,

    /// Index of the selected clip
    cursor: usize,

    /// Index of the first clip shown in the list area
    top: usize,

    /// Rows available to the list (updated each frame)
    visible_rows: usize,

    /// Characters typed since the last consumed command
    input: Input,

    /// Last key received, for the diagnostics field
    last_key: Option<KeyCode>,

    /// Transient message shown while the buffer is empty
    status: Option<String>,

    redraw: Redraw,

    /// Flag to request session exit
    pub should_quit: bool,
}

impl App {
    pub fn new(model: Model, player: Box<dyn MediaPlayer>, theme: Theme) -> Self {
        App {
            model,
            player,
            theme,
            mode: Mode::Normal,
            cursor: 0,
            top: 0,
            visible_rows: 20, // Default, will be updated each frame
            input: Input::default(),
            last_key: None,
            status: None,
            redraw: Redraw::Full,
            should_quit: false,
        }
    }

    pub fn mode(&self) -> ModeKind {
        self.mode.kind()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn top(&self) -> usize {
        self.top
    }

    pub fn buffer(&self) -> &str {
        self.input.value()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn set_status(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::debug!("Status: {}", message);
        self.status = Some(message);
    }

    /// Take the pending redraw request, leaving the screen marked clean
    pub fn take_redraw(&mut self) -> Redraw {
        std::mem::replace(&mut self.redraw, Redraw::Clean)
    }

    fn mark_line_dirty(&mut self, index: usize) {
        match &mut self.redraw {
            Redraw::Full => {}
            Redraw::Lines(lines) => {
                lines.insert(index);
            }
            Redraw::Clean => self.redraw = Redraw::Lines(BTreeSet::from([index])),
        }
    }

    fn mark_full_redraw(&mut self) {
        self.redraw = Redraw::Full;
    }

    /// Terminal was resized; everything is rebuilt on the next frame
    pub fn handle_resize(&mut self) {
        log::debug!("Terminal resized");
        self.mark_full_redraw();
    }

    /// Update the number of list rows and keep the cursor in view
    pub fn set_viewport_rows(&mut self, rows: usize) {
        if rows != self.visible_rows {
            self.visible_rows = rows;
            // Don't leave empty rows below the last clip after growing
            self.top = self.top.min(self.model.len().saturating_sub(rows.max(1)));
            self.mark_full_redraw();
        }
        self.scroll_to_cursor();
    }

    /// Move the viewport the minimum distance needed to show the cursor
    fn scroll_to_cursor(&mut self) {
        let rows = self.visible_rows.max(1);
        let old_top = self.top;

        if self.cursor < self.top {
            self.top = self.cursor;
        } else if self.cursor >= self.top + rows {
            self.top = self.cursor + 1 - rows;
        }

        if self.top != old_top {
            self.mark_full_redraw();
        }
    }

    fn move_cursor_to(&mut self, target: usize) {
        if self.model.is_empty() {
            return;
        }
        let target = target.min(self.model.len() - 1);
        if target != self.cursor {
            self.mark_line_dirty(self.cursor);
            self.mark_line_dirty(target);
            self.cursor = target;
        }
        self.scroll_to_cursor();
    }

    pub fn move_down(&mut self, n: usize) {
        self.move_cursor_to(self.cursor.saturating_add(n));
    }

    pub fn move_up(&mut self, n: usize) {
        self.move_cursor_to(self.cursor.saturating_sub(n));
    }

    pub fn jump_to_top(&mut self) {
        self.move_cursor_to(0);
    }

    pub fn jump_to_bottom(&mut self) {
        self.move_cursor_to(self.model.len().saturating_sub(1));
    }

    /// Rows moved by one page: one row of overlap is kept
    fn page_size(&self) -> usize {
        self.visible_rows.saturating_sub(1).max(1)
    }

    /// Restore cursor and viewport invariants after the list shrank
    fn clamp_after_commit(&mut self) {
        let len = self.model.len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
        let max_top = len.saturating_sub(self.visible_rows.max(1));
        self.top = self.top.min(max_top).min(self.cursor);
        self.scroll_to_cursor();
        self.mark_full_redraw();
    }

    /// Translate a key press into buffer edits and dispatch to the active mode
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.last_key = Some(key.code);

        if self.input.value().is_empty() {
            self.status = None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let mut enter = false;
        let mut nav = None;
        match key.code {
            KeyCode::Char('f') if ctrl => nav = Some(NavKey::PageDown),
            KeyCode::Char('b') if ctrl => nav = Some(NavKey::PageUp),
            KeyCode::Char(c) if !ctrl => {
                self.input.handle(InputRequest::InsertChar(c));
            }
            KeyCode::Enter => enter = true,
            KeyCode::Backspace => {
                self.input.handle(InputRequest::DeletePrevChar);
            }
            KeyCode::Esc => {
                self.input.reset();
                return;
            }
            KeyCode::Up => nav = Some(NavKey::Up),
            KeyCode::Down => nav = Some(NavKey::Down),
            KeyCode::PageUp => nav = Some(NavKey::PageUp),
            KeyCode::PageDown => nav = Some(NavKey::PageDown),
            KeyCode::Home => nav = Some(NavKey::Home),
            KeyCode::End => nav = Some(NavKey::End),
            KeyCode::Delete => nav = Some(NavKey::Delete),
            _ => return,
        }

        let text = self.input.value().to_string();
        if self.handle_input(&text, enter, nav) {
            self.input.reset();
        }
    }

    /// Interpret the buffered text in the active mode
    ///
    /// Returns true when the buffer was consumed and should be cleared, false
    /// when more characters are expected.
    pub fn handle_input(&mut self, text: &str, enter: bool, nav: Option<NavKey>) -> bool {
        match self.mode.kind() {
            ModeKind::Normal => self.handle_normal_input(text, enter, nav),
            ModeKind::Play => self.handle_play_input(text),
        }
    }

    /// Idle tick: poll the running player without blocking
    pub fn update(&mut self) {
        let Mode::Play { stem, playback } = &mut self.mode else {
            return;
        };

        match playback.try_finished() {
            Ok(false) => {}
            Ok(true) => {
                let message = format!("Finished {}", stem);
                self.leave_play_mode(message);
            }
            Err(e) => {
                log::warn!("Lost track of player for {}: {:#}", stem, e);
                let message = format!("Player error: {:#}", e);
                self.leave_play_mode(message);
            }
        }
    }

    fn handle_normal_input(&mut self, text: &str, enter: bool, nav: Option<NavKey>) -> bool {
        let command_line = command::is_command_line(text);
        // Special keys don't apply to a half-typed command; keep the text
        if command_line && nav.is_some() {
            return false;
        }

        if let Some(nav) = nav {
            match nav {
                NavKey::Up => self.move_up(1),
                NavKey::Down => self.move_down(1),
                NavKey::PageUp => self.move_up(self.page_size()),
                NavKey::PageDown => self.move_down(self.page_size()),
                NavKey::Home => self.jump_to_top(),
                NavKey::End => self.jump_to_bottom(),
                NavKey::Delete => self.toggle_mark(),
            }
            return true;
        }

        if command_line {
            return self.handle_command_line(text, enter);
        }

        match text {
            "j" => self.move_down(1),
            "k" => self.move_up(1),
            "g" => self.jump_to_top(),
            "G" => self.jump_to_bottom(),
            " " => self.start_playback(),
            "d" => self.toggle_mark(),
            // Unknown keys and a bare Enter do nothing
            _ => {}
        }
        true
    }

    fn handle_command_line(&mut self, text: &str, enter: bool) -> bool {
        match command::parse(text, enter) {
            CommandState::Pending(_) => false,
            CommandState::Ready(cmd) => {
                self.execute(cmd);
                true
            }
            CommandState::Unknown(body) => {
                self.set_status(format!("Not a command: {}", body));
                true
            }
        }
    }

    fn handle_play_input(&mut self, text: &str) -> bool {
        if text == " " {
            self.stop_playback();
        }
        // Everything else is dropped while playing
        true
    }

    fn execute(&mut self, cmd: Command) {
        log::info!("Command {:?}", cmd);
        match cmd {
            Command::Write => {
                self.write();
            }
            Command::WriteQuit => {
                if self.write() {
                    self.should_quit = true;
                }
            }
            Command::Quit => {
                if self.model.has_pending_deletions() {
                    self.set_status(format!(
                        "{} clip(s) marked for deletion (:w to delete, :q! to discard)",
                        self.model.marked_count()
                    ));
                } else {
                    self.should_quit = true;
                }
            }
            Command::ForceQuit => {
                let marked = self.model.marked_count();
                if marked > 0 {
                    log::info!("Discarding {} deletion mark(s)", marked);
                }
                self.should_quit = true;
            }
        }
    }

    /// Commit pending deletions; returns true if every marked clip was removed
    fn write(&mut self) -> bool {
        if self.model.is_read_only() {
            self.set_status("Read-only session: nothing to write");
            return true;
        }

        let report = self.model.commit_deletions();
        for failure in &report.failures {
            log::error!("Commit failed for {}: {}", failure.stem, failure.error);
        }
        self.clamp_after_commit();
        self.set_status(report.summary());
        report.is_clean()
    }

    fn toggle_mark(&mut self) {
        if self.model.is_read_only() {
            self.set_status("Read-only session: deletion marks are disabled");
            return;
        }
        if self.model.toggle_deletion_mark(self.cursor).is_some() {
            self.mark_line_dirty(self.cursor);
        }
    }

    fn start_playback(&mut self) {
        let Some(clip) = self.model.get(self.cursor) else {
            self.set_status("No clip to play");
            return;
        };
        let stem = clip.stem.clone();

        match self.player.play(&clip.preview_path) {
            Ok(playback) => {
                log::info!("Playing {} with {}", stem, self.player.name());
                self.model.mark_played(self.cursor);
                self.set_status(format!("Playing {} (space to stop)", stem));
                self.mode = Mode::Play { stem, playback };
                self.mark_full_redraw();
            }
            Err(e) => {
                log::warn!("Could not play {}: {:#}", stem, e);
                self.set_status(format!("Could not start player: {:#}", e));
            }
        }
    }

    fn stop_playback(&mut self) {
        let Mode::Play { stem, playback } = &mut self.mode else {
            return;
        };

        let message = match playback.stop() {
            Ok(()) => format!("Stopped {}", stem),
            Err(e) => {
                log::warn!("Failed to stop player for {}: {:#}", stem, e);
                format!("Player error: {:#}", e)
            }
        };
        self.leave_play_mode(message);
    }

    fn leave_play_mode(&mut self, message: String) {
        self.mode = Mode::Normal;
        self.set_status(message);
        self.mark_full_redraw();
    }

    /// Text for the status bar: live buffer, else the transient message
    fn status_text(&self) -> String {
        let buffer = self.input.value();
        if buffer.is_empty() {
            return self.status.clone().unwrap_or_default();
        }
        if !command::is_command_line(buffer) {
            return buffer.to_string();
        }
        match command::parse(buffer, false) {
            CommandState::Pending(candidates) if !candidates.is_empty() => {
                format!("{}   ({})", buffer, candidates.join(" "))
            }
            _ => buffer.to_string(),
        }
    }

    fn last_key_label(&self) -> String {
        match self.last_key {
            Some(KeyCode::Char(c)) => (c as u32).to_string(),
            Some(code) => format!("{:?}", code),
            None => "-".to_string(),
        }
    }

    /// Render the review screen
    pub fn draw(&mut self, frame: &mut Frame) {
        let [title_area, list_area, status_area] = ui::create_main_layout(frame.area());

        // Viewport height must be known before picking which rows to draw
        self.set_viewport_rows(list_area.height as usize);

        ui::render_title_bar(frame, title_area, &self.model, &self.theme);

        ui::render_clip_list(
            frame,
            list_area,
            self.model.clips(),
            ui::ClipListRenderContext {
                cursor: self.cursor,
                top: self.top,
                mode: self.mode.kind(),
                theme: &self.theme,
            },
        );

        let text = self.status_text();
        let last_key = self.last_key_label();
        ui::render_status_bar(
            frame,
            status_area,
            ui::StatusBarContext {
                mode: self.mode.kind(),
                text: &text,
                last_key: &last_key,
                theme: &self.theme,
            },
        );
    }
}
