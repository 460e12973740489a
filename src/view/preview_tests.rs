//! Preview app tests on a `TestBackend`.

use super::*;
use crate::dom::PageFixture;
use crate::page::PageOptions;
use ratatui::backend::TestBackend;

const FIXTURE: &str = r#"
document_height = 6000
header = true

[viewport]
width = 1280
height = 800

[menu]
links = ["Home", "Archive"]

[pinned]
top = 900
height = 3000
cards = 6
card_width = 380

[[sliders]]
id = "photos"
slides = 3
dots = true
"#;

fn create_test_app() -> PreviewApp<TestBackend> {
    let fixture: PageFixture = toml::from_str(FIXTURE).unwrap();
    let page = Page::bind(fixture.build(), &PageOptions::default());
    let terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
    PreviewApp::with_terminal(terminal, page)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

fn screen(app: &PreviewApp<TestBackend>) -> String {
    let buffer = app.terminal().backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

#[test]
fn preview_error_from_io_error() {
    let err: PreviewError = io::Error::other("gone").into();
    assert!(matches!(err, PreviewError::Io(_)));
}

#[test]
fn bind_writes_are_shown_from_the_start() {
    let app = create_test_app();
    assert!(app
        .writes()
        .iter()
        .any(|w| w.contains("translate3d(0px,0,0)")));
}

#[test]
fn q_and_ctrl_c_quit() {
    let mut app = create_test_app();
    assert!(app.handle_key(key(KeyCode::Char('q'))));
    assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    assert!(!app.handle_key(key(KeyCode::Char('x'))));
}

#[test]
fn j_scrolls_the_page() {
    let mut app = create_test_app();
    app.handle_key(key(KeyCode::Char('j')));
    app.handle_key(key(KeyCode::Char('j')));
    assert_eq!(app.page().document().scroll_y(), 160.0);
    assert!(app.status().starts_with("scroll 160"));
}

#[test]
fn page_down_past_hide_threshold_hides_header() {
    let mut app = create_test_app();
    app.handle_key(key(KeyCode::PageDown));
    assert!(app.page().header().unwrap().is_hidden());
    assert!(app.writes().iter().any(|w| w.contains("is-hidden")));
}

#[test]
fn slide_keys_do_nothing_until_a_slider_is_picked() {
    let mut app = create_test_app();
    app.handle_key(key(KeyCode::Char('l')));
    assert_eq!(app.page().sliders()[0].state().index(), 0);

    app.handle_key(key(KeyCode::Char('s')));
    assert_eq!(app.focused_slider(), Some(0));
    app.handle_key(key(KeyCode::Char('l')));
    assert_eq!(app.page().sliders()[0].state().index(), 1);
    app.handle_key(key(KeyCode::Char('h')));
    assert_eq!(app.page().sliders()[0].state().index(), 0);
}

#[test]
fn m_opens_drawer_and_escape_closes_it() {
    let mut app = create_test_app();
    app.handle_key(key(KeyCode::Char('m')));
    assert!(app.page().menu().unwrap().is_open());
    app.draw().unwrap();
    assert!(screen(&app).contains("Menu (Esc closes)"));

    app.handle_key(key(KeyCode::Esc));
    assert!(!app.page().menu().unwrap().is_open());
    app.draw().unwrap();
    assert!(!screen(&app).contains("Menu (Esc closes)"));
}

#[test]
fn narrow_toggle_unpins_and_restores() {
    let mut app = create_test_app();
    app.handle_key(key(KeyCode::Char('n')));
    assert_eq!(app.page().document().viewport().width, 390.0);
    app.draw().unwrap();
    assert!(screen(&app).contains("narrow viewport"));

    app.handle_key(key(KeyCode::Char('n')));
    assert_eq!(app.page().document().viewport().width, 1280.0);
}

#[test]
fn draw_shows_every_panel() {
    let mut app = create_test_app();
    app.draw().unwrap();
    let text = screen(&app);
    assert!(text.contains("header visible"));
    assert!(text.contains("#photos (bounded)"));
    assert!(text.contains("1 of 3"));
    assert!(text.contains("Writes"));
}

#[test]
fn mouse_drag_on_slider_row_advances() {
    let mut app = create_test_app();
    app.draw().unwrap();
    // slider row sits below title, header and track panels
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 60, 8));
    assert!(app.page().sliders()[0].is_dragging());
    app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 30, 8));
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 10, 8));
    assert!(!app.page().sliders()[0].is_dragging());
    assert_eq!(app.page().sliders()[0].state().index(), 1);
}

#[test]
fn mouse_outside_sliders_is_ignored() {
    let mut app = create_test_app();
    app.draw().unwrap();
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 2));
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 70, 2));
    assert_eq!(app.page().sliders()[0].state().index(), 0);
}
