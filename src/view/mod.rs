//! Interactive terminal preview of a page fixture.
//!
//! Keys and mouse input are translated into `PageEvent`s and dispatched to
//! the bound page; each frame shows the header state, the pinned-track
//! progress, every slider, the drawer when open, and the writes so far.

pub mod actions;
pub mod constants;
pub mod layout;
pub mod styles;

pub use actions::{events_for_action, next_slider, ActionContext};
pub use layout::{calculate_areas, render_layout, PreviewAreas, PreviewModel};
pub use styles::{ColorConfig, PreviewStyles};

use crate::config::KeyBindings;
use crate::dom::GeometrySource;
use crate::model::{KeyAction, PageEvent, PointerInput, Viewport};
use crate::page::Page;
use constants::{MOUSE_POINTER_ID, WRITE_HISTORY};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::collections::VecDeque;
use std::io::{self, Stdout};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while running the preview.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// Terminal I/O failed.
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// The preview application.
///
/// Generic over backend so tests can drive it with `TestBackend`.
pub struct PreviewApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    page: Page,
    key_bindings: KeyBindings,
    styles: PreviewStyles,
    base_viewport: Viewport,
    narrow: bool,
    focused_slider: Option<usize>,
    writes: VecDeque<String>,
    status: String,
    /// Slider rows from the last frame, for mouse hit-testing.
    last_areas: PreviewAreas,
    /// Viewport selector of the slider a mouse drag started on.
    drag_target: Option<String>,
}

impl PreviewApp<CrosstermBackend<Stdout>> {
    /// Put the terminal in raw mode on the alternate screen with mouse
    /// capture, and wrap the page.
    pub fn new(page: Page) -> Result<Self, PreviewError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self::with_terminal(terminal, page))
    }

    /// Run the event loop until the user quits.
    pub fn run(&mut self) -> Result<(), PreviewError> {
        self.draw()?;
        loop {
            let quit = match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Mouse(mouse) => {
                    self.handle_mouse(mouse);
                    false
                }
                Event::Resize(..) => false,
                _ => continue,
            };
            if quit {
                return Ok(());
            }
            self.draw()?;
        }
    }
}

impl<B> PreviewApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Wrap an already set-up terminal.
    pub fn with_terminal(terminal: Terminal<B>, mut page: Page) -> Self {
        let base_viewport = page.document().viewport();
        let mut writes = VecDeque::with_capacity(WRITE_HISTORY);
        for write in page.document_mut().take_writes() {
            push_bounded(&mut writes, serialize(&write));
        }
        Self {
            terminal,
            page,
            key_bindings: KeyBindings::default(),
            styles: PreviewStyles::default(),
            base_viewport,
            narrow: false,
            focused_slider: None,
            writes,
            status: "q quits, j/k scroll, s picks a slider, h/l slides, m menu".to_string(),
            last_areas: PreviewAreas::default(),
            drag_target: None,
        }
    }

    /// The page being previewed.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Serialized writes, oldest first.
    pub fn writes(&self) -> &VecDeque<String> {
        &self.writes
    }

    /// Status bar text.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Slider receiving slide keys.
    pub fn focused_slider(&self) -> Option<usize> {
        self.focused_slider
    }

    /// Handle one key. Returns true when the preview should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        let Some(action) = self.key_bindings.get(key) else {
            debug!(?key, "unbound key");
            return false;
        };
        match action {
            KeyAction::Quit => return true,
            KeyAction::CycleSlider => {
                self.focused_slider = next_slider(self.focused_slider, self.page.sliders().len());
                if let Some(root) = self
                    .focused_slider
                    .and_then(|i| self.page.sliders().get(i))
                    .map(|s| s.root())
                {
                    self.page.focus(root);
                }
            }
            _ => {}
        }

        let cx = ActionContext {
            focused_slider: self.focused_slider,
            narrow: self.narrow,
            base_viewport: self.base_viewport,
        };
        let events = events_for_action(action, &self.page, &cx);
        for event in &events {
            self.apply(event);
        }
        if action == KeyAction::ToggleNarrow && !events.is_empty() {
            self.narrow = !self.narrow;
        }
        self.collect_writes();
        false
    }

    /// Translate a mouse event over a slider row into pointer events.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let event = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(target) = self.viewport_selector_at(mouse.column, mouse.row) else {
                    return;
                };
                self.drag_target = Some(target.clone());
                PageEvent::PointerDown(self.pointer(target, mouse.column))
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let Some(target) = self.drag_target.clone() else {
                    return;
                };
                PageEvent::PointerMove(self.pointer(target, mouse.column))
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(target) = self.drag_target.take() else {
                    return;
                };
                PageEvent::PointerUp(self.pointer(target, mouse.column))
            }
            _ => return,
        };
        self.apply(&event);
        self.collect_writes();
    }

    fn viewport_selector_at(&self, column: u16, row: u16) -> Option<String> {
        let index = self
            .last_areas
            .sliders
            .iter()
            .position(|area| contains(*area, column, row))?;
        let slider = self.page.sliders().get(index)?;
        let doc = self.page.document();
        let viewport = doc.find_first_by_class(slider.root(), "slider-viewport")?;
        Some(doc.label(viewport))
    }

    /// Map a terminal column to a page x coordinate across the slider row.
    fn pointer(&self, target: String, column: u16) -> PointerInput {
        let row = self.last_areas.sliders.first().copied().unwrap_or_default();
        let width = f64::from(row.width.max(1));
        let offset = f64::from(column.saturating_sub(row.x));
        PointerInput {
            target,
            pointer_id: MOUSE_POINTER_ID,
            x: offset / width * self.page.document().viewport().width,
        }
    }

    /// Dispatch one event, noting the outcome in the status bar.
    fn apply(&mut self, event: &PageEvent) {
        match self.page.dispatch(event) {
            Ok(outcome) => {
                debug!(?event, handled_by = ?outcome.handled_by, "preview event");
                self.status = format!("{} -> {}", describe(event), outcome.handled_by.join(", "));
            }
            Err(err) => {
                debug!(?event, %err, "preview event skipped");
                self.status = format!("{}: {err}", describe(event));
            }
        }
    }

    fn collect_writes(&mut self) {
        for write in self.page.document_mut().take_writes() {
            push_bounded(&mut self.writes, serialize(&write));
        }
    }

    /// Render the current frame.
    pub fn draw(&mut self) -> Result<(), PreviewError> {
        let size = self.terminal.size()?;
        let area = Rect::new(0, 0, size.width.max(1), size.height);
        self.last_areas = calculate_areas(area, self.page.sliders().len());

        let model = PreviewModel {
            page: &self.page,
            focused_slider: self.focused_slider,
            writes: &self.writes,
            status: &self.status,
            styles: self.styles,
        };
        let areas = &self.last_areas;
        self.terminal.draw(|frame| render_layout(frame, &model, areas))?;
        Ok(())
    }

    /// The terminal, for inspecting a test backend.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

fn push_bounded(writes: &mut VecDeque<String>, line: String) {
    if writes.len() == WRITE_HISTORY {
        writes.pop_front();
    }
    writes.push_back(line);
}

fn serialize(write: &crate::dom::DomWrite) -> String {
    serde_json::to_string(write).unwrap_or_else(|e| format!("<unserializable write: {e}>"))
}

fn describe(event: &PageEvent) -> String {
    match event {
        PageEvent::Scroll { y } => format!("scroll {y:.0}"),
        PageEvent::Resize { width, height } => format!("resize {width:.0}x{height:.0}"),
        PageEvent::Key { key, shift, .. } => {
            format!("{}{key:?}", if *shift { "shift+" } else { "" })
        }
        other => match other.target() {
            Some(target) => format!("{:?} {target}", other.kind()),
            None => format!("{:?}", other.kind()),
        },
    }
}

/// Run the preview on the real terminal, restoring it afterwards even when
/// the loop fails.
///
/// Logging must be initialized by the caller; tracing never writes to the
/// terminal.
pub fn run_preview(page: Page) -> Result<(), PreviewError> {
    info!(sliders = page.sliders().len(), "starting preview");
    let mut app = PreviewApp::new(page)?;
    let result = app.run();
    restore_terminal()?;
    result
}

/// Disable raw mode and mouse capture, leave the alternate screen.
fn restore_terminal() -> Result<(), PreviewError> {
    disable_raw_mode()?;
    io::stdout().execute(event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "preview_tests.rs"]
mod tests;
