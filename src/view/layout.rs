//! Preview layout rendering.
//!
//! Pure: reads the page and the preview's own state, draws one frame. Areas
//! are computed separately so the app can hit-test mouse events against the
//! slider rows it last drew.

use super::constants::{
    DRAWER_HEIGHT_PERCENT, DRAWER_WIDTH_PERCENT, PANEL_HEIGHT, SLIDER_ROW_HEIGHT,
    STATUS_BAR_HEIGHT, TITLE_BAR_HEIGHT,
};
use super::styles::PreviewStyles;
use crate::dom::{Document, GeometrySource};
use crate::page::{Page, Slider};
use crate::state::scroll_progress;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph},
    Frame,
};
use std::collections::VecDeque;

/// Everything a frame draws from.
#[derive(Debug, Clone, Copy)]
pub struct PreviewModel<'a> {
    /// The page.
    pub page: &'a Page,
    /// Slider receiving slide keys.
    pub focused_slider: Option<usize>,
    /// Serialized writes, oldest first.
    pub writes: &'a VecDeque<String>,
    /// Status bar message.
    pub status: &'a str,
    /// Panel styles.
    pub styles: PreviewStyles,
}

/// Screen regions of one frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreviewAreas {
    /// Title bar.
    pub title: Rect,
    /// Header state panel.
    pub header: Rect,
    /// Pinned-track panel.
    pub track: Rect,
    /// One row per slider, in page order.
    pub sliders: Vec<Rect>,
    /// Write history.
    pub writes: Rect,
    /// Status bar.
    pub status: Rect,
}

/// Split the frame for `slider_count` slider rows.
pub fn calculate_areas(area: Rect, slider_count: usize) -> PreviewAreas {
    let mut constraints = vec![
        Constraint::Length(TITLE_BAR_HEIGHT),
        Constraint::Length(PANEL_HEIGHT),
        Constraint::Length(PANEL_HEIGHT),
    ];
    constraints.extend(std::iter::repeat_n(
        Constraint::Length(SLIDER_ROW_HEIGHT),
        slider_count,
    ));
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(STATUS_BAR_HEIGHT));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let n = chunks.len();
    PreviewAreas {
        title: chunks[0],
        header: chunks[1],
        track: chunks[2],
        sliders: chunks[3..3 + slider_count].to_vec(),
        writes: chunks[n - 2],
        status: chunks[n - 1],
    }
}

/// Draw one frame.
pub fn render_layout(frame: &mut Frame, model: &PreviewModel<'_>, areas: &PreviewAreas) {
    let doc = model.page.document();
    render_title(frame, areas.title, doc);
    render_header(frame, areas.header, model);
    render_track(frame, areas.track, model);
    for (i, (slider, area)) in model.page.sliders().iter().zip(&areas.sliders).enumerate() {
        render_slider(frame, *area, doc, slider, model.focused_slider == Some(i), model.styles);
    }
    render_writes(frame, areas.writes, model);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(model.status, model.styles.muted))),
        areas.status,
    );
    if model.page.menu().is_some_and(|m| m.is_open()) {
        render_drawer(frame, model);
    }
}

fn render_title(frame: &mut Frame, area: Rect, doc: &Document) {
    let viewport = doc.viewport();
    let text = format!(
        " sitemotion | scroll {:.0}/{:.0} | viewport {:.0}x{:.0}",
        doc.scroll_y(),
        doc.max_scroll_y(),
        viewport.width,
        viewport.height
    );
    frame.render_widget(Paragraph::new(text), area);
}

fn render_header(frame: &mut Frame, area: Rect, model: &PreviewModel<'_>) {
    let (text, style) = match model.page.header() {
        Some(header) if header.is_hidden() => ("hidden", model.styles.active),
        Some(_) => ("visible", ratatui::style::Style::default()),
        None => ("absent", model.styles.muted),
    };
    let menu = match model.page.menu() {
        Some(menu) if menu.is_open() => "menu open",
        Some(_) => "menu closed",
        None => "no menu",
    };
    let line = Line::from(vec![
        Span::raw("header "),
        Span::styled(text, style),
        Span::styled(format!("  |  {menu}"), model.styles.muted),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(" Header ")),
        area,
    );
}

fn render_track(frame: &mut Frame, area: Rect, model: &PreviewModel<'_>) {
    let block = Block::default().borders(Borders::ALL).title(" Pinned track ");
    let doc = model.page.document();
    let Some(pinned) = model.page.pinned() else {
        frame.render_widget(
            Paragraph::new(Span::styled("no pinned section", model.styles.muted)).block(block),
            area,
        );
        return;
    };
    match pinned.offset(doc) {
        Some(offset) => {
            let sample = doc.sample(pinned.pin(), pinned.track());
            let progress = scroll_progress::progress(&sample);
            let label = format!("{:.0}%  offset {:.0}px", progress.get() * 100.0, offset);
            frame.render_widget(
                Gauge::default()
                    .block(block)
                    .gauge_style(model.styles.gauge)
                    .ratio(progress.get())
                    .label(label),
                area,
            );
        }
        None => {
            let transform = doc.style(pinned.track(), "transform").unwrap_or("none");
            let text = format!("narrow viewport: unpinned (transform {transform})");
            frame.render_widget(
                Paragraph::new(Span::styled(text, model.styles.muted)).block(block),
                area,
            );
        }
    }
}

fn render_slider(
    frame: &mut Frame,
    area: Rect,
    doc: &Document,
    slider: &Slider,
    focused: bool,
    styles: PreviewStyles,
) {
    let state = slider.state();
    let slide = state.frame();
    let mut spans: Vec<Span<'_>> = (0..state.slide_count())
        .map(|i| {
            if slide.active_dot == Some(i) {
                Span::styled("● ", styles.active)
            } else {
                Span::styled("○ ", styles.muted)
            }
        })
        .collect();
    spans.push(Span::raw(format!(" {}", slide.counter)));
    if slider.is_dragging() {
        spans.push(Span::styled("  dragging", styles.active));
    }

    let mode = format!("{:?}", state.mode()).to_lowercase();
    let title = format!(" {} ({mode}) ", doc.label(slider.root()));
    let mut block = Block::default().borders(Borders::ALL).title(title);
    if focused {
        block = block.border_style(styles.focused);
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_writes(frame: &mut Frame, area: Rect, model: &PreviewModel<'_>) {
    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem<'_>> = model
        .writes
        .iter()
        .skip(model.writes.len().saturating_sub(visible))
        .map(|w| ListItem::new(w.as_str()))
        .collect();
    frame.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title(" Writes ")),
        area,
    );
}

fn render_drawer(frame: &mut Frame, model: &PreviewModel<'_>) {
    let Some(menu) = model.page.menu() else {
        return;
    };
    let doc = model.page.document();
    let area = centered_rect(DRAWER_WIDTH_PERCENT, DRAWER_HEIGHT_PERCENT, frame.area());
    frame.render_widget(Clear, area);

    let focused = doc.focused();
    let items: Vec<ListItem<'_>> = doc
        .focusables(menu.overlay())
        .into_iter()
        .map(|node| {
            let text = match doc.text(node) {
                "" => doc.label(node),
                t => t.to_string(),
            };
            if focused == Some(node) {
                ListItem::new(format!("> {text}")).style(model.styles.active)
            } else {
                ListItem::new(format!("  {text}"))
            }
        })
        .collect();
    frame.render_widget(
        List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(model.styles.focused)
                .title(" Menu (Esc closes) "),
        ),
        area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}
