//! Tests for the slider controller.

use super::*;
use crate::dom::fixture::SliderFixture;
use crate::dom::{DomWrite, PageFixture};
use crate::model::{PointerInput, Viewport};
use crate::state::DragThreshold;

fn fixture(slides: usize, mode: Option<TransitionMode>) -> PageFixture {
    PageFixture {
        viewport: Viewport {
            width: 1000.0,
            height: 800.0,
        },
        document_height: 3000.0,
        header: false,
        menu: None,
        footer_year: false,
        pinned: None,
        sliders: vec![SliderFixture {
            id: "photos".to_string(),
            slides,
            mode,
            dots: true,
            buttons: true,
            counter: true,
            top: 200.0,
            width: None,
        }],
        galleries: Vec::new(),
    }
}

fn bound(slides: usize, mode: TransitionMode) -> (Document, Slider) {
    let mut doc = fixture(slides, Some(mode)).build();
    let root = doc.by_id("photos").unwrap();
    let slider = Slider::bind(&mut doc, root, 0, mode, DragThreshold::default()).unwrap();
    (doc, slider)
}

fn press(doc: &mut Document, slider: &mut Slider, selector: &str) -> Handled {
    let target = doc.resolve(selector).unwrap();
    let event = PageEvent::Click {
        target: selector.to_string(),
    };
    slider.handle(
        doc,
        &EventContext {
            event: &event,
            target: Some(target),
        },
    )
}

fn pointer(doc: &mut Document, slider: &mut Slider, event: PageEvent) {
    let target = doc.resolve(event.target().unwrap()).unwrap();
    slider.handle(
        doc,
        &EventContext {
            event: &event,
            target: Some(target),
        },
    );
}

fn input(x: f64) -> PointerInput {
    PointerInput {
        target: "#photos .slider-viewport".to_string(),
        pointer_id: 1,
        x,
    }
}

fn track_transform(doc: &Document) -> String {
    let track = doc.resolve("#photos .slider-track").unwrap();
    doc.style(track, "transform").unwrap_or_default().to_string()
}

#[test]
fn bind_renders_first_frame() {
    let (doc, slider) = bound(3, TransitionMode::Bounded);
    assert_eq!(slider.state().index(), 0);
    assert_eq!(track_transform(&doc), "translateX(0%)");
    let counter = doc.resolve("#photos .slider-counter").unwrap();
    assert_eq!(doc.text(counter), "1 of 3");
    let prev = doc.resolve("#photos .slider-prev").unwrap();
    assert_eq!(doc.attribute(prev, "aria-disabled"), Some("true"));
    assert!(doc.attribute(prev, "disabled").is_some());
    let dot = doc.resolve("#photos .dot").unwrap();
    assert!(doc.has_class(dot, "active"));
    assert_eq!(doc.attribute(dot, "aria-current"), Some("true"));
}

#[test]
fn next_clicks_stop_at_last_slide_when_bounded() {
    let (mut doc, mut slider) = bound(3, TransitionMode::Bounded);
    for _ in 0..5 {
        press(&mut doc, &mut slider, "#photos .slider-next");
    }
    assert_eq!(slider.state().index(), 2);
    assert_eq!(track_transform(&doc), "translateX(-200%)");
    let next = doc.resolve("#photos .slider-next").unwrap();
    assert_eq!(doc.attribute(next, "aria-disabled"), Some("true"));
}

#[test]
fn wrapping_slider_cycles_and_leaves_controls_enabled() {
    let (mut doc, mut slider) = bound(3, TransitionMode::Wrapping);
    press(&mut doc, &mut slider, "#photos .slider-prev");
    assert_eq!(slider.state().index(), 2);
    let prev = doc.resolve("#photos .slider-prev").unwrap();
    assert!(doc.attribute(prev, "disabled").is_none());
    press(&mut doc, &mut slider, "#photos .slider-next");
    assert_eq!(slider.state().index(), 0);
}

#[test]
fn dot_click_selects_slide_and_moves_active_marker() {
    let (mut doc, mut slider) = bound(4, TransitionMode::Bounded);
    doc.take_writes();
    press(&mut doc, &mut slider, "#photos .dot[2]");
    assert_eq!(slider.state().index(), 2);
    let dots = doc.query_all("#photos .dot").unwrap();
    let active: Vec<bool> = dots.iter().map(|d| doc.has_class(*d, "active")).collect();
    assert_eq!(active, vec![false, false, true, false]);
    let writes = doc.take_writes();
    assert!(writes.contains(&DomWrite::Text {
        node: "#photos .slider-counter[0]".to_string(),
        text: "3 of 4".to_string(),
    }));
}

#[test]
fn arrow_keys_step_and_prevent_default() {
    let (mut doc, mut slider) = bound(3, TransitionMode::Bounded);
    let root = slider.root();
    let event = PageEvent::Key {
        key: Key::ArrowRight,
        shift: false,
        target: None,
    };
    let handled = slider.handle(
        &mut doc,
        &EventContext {
            event: &event,
            target: Some(root),
        },
    );
    assert_eq!(handled, Handled::PreventDefault);
    assert_eq!(slider.state().index(), 1);

    let enter = PageEvent::Key {
        key: Key::Enter,
        shift: false,
        target: None,
    };
    let handled = slider.handle(
        &mut doc,
        &EventContext {
            event: &enter,
            target: Some(root),
        },
    );
    assert_eq!(handled, Handled::Continue);
    assert_eq!(slider.state().index(), 1);
}

#[test]
fn drag_past_threshold_advances() {
    let (mut doc, mut slider) = bound(3, TransitionMode::Bounded);
    pointer(&mut doc, &mut slider, PageEvent::PointerDown(input(600.0)));
    assert!(slider.is_dragging());
    let track = doc.resolve("#photos .slider-track").unwrap();
    assert_eq!(doc.style(track, "transition"), Some("none"));
    let viewport = doc.resolve("#photos .slider-viewport").unwrap();
    assert_eq!(doc.capture_target(1), Some(viewport));

    pointer(&mut doc, &mut slider, PageEvent::PointerMove(input(500.0)));
    assert_eq!(track_transform(&doc), "translateX(-10%)");

    // threshold is max(40, 0.12 * 1000) = 120
    pointer(&mut doc, &mut slider, PageEvent::PointerUp(input(450.0)));
    assert!(!slider.is_dragging());
    assert_eq!(slider.state().index(), 1);
    assert_eq!(doc.style(track, "transition"), None);
    assert_eq!(doc.capture_target(1), None);
    assert_eq!(track_transform(&doc), "translateX(-100%)");
}

#[test]
fn short_drag_snaps_back() {
    let (mut doc, mut slider) = bound(3, TransitionMode::Bounded);
    pointer(&mut doc, &mut slider, PageEvent::PointerDown(input(600.0)));
    pointer(&mut doc, &mut slider, PageEvent::PointerUp(input(520.0)));
    assert_eq!(slider.state().index(), 0);
    assert_eq!(track_transform(&doc), "translateX(0%)");
}

#[test]
fn cancel_uses_last_move_delta() {
    let (mut doc, mut slider) = bound(3, TransitionMode::Bounded);
    pointer(&mut doc, &mut slider, PageEvent::PointerDown(input(100.0)));
    pointer(&mut doc, &mut slider, PageEvent::PointerMove(input(400.0)));
    pointer(&mut doc, &mut slider, PageEvent::PointerCancel(input(0.0)));
    // dragged right by 300 at index 0: retreat clamps to 0
    assert_eq!(slider.state().index(), 0);
    assert!(!slider.is_dragging());
}

#[test]
fn release_after_lost_capture_still_commits() {
    let (mut doc, mut slider) = bound(3, TransitionMode::Bounded);
    pointer(&mut doc, &mut slider, PageEvent::PointerDown(input(600.0)));
    doc.lose_pointer_capture(1);
    pointer(&mut doc, &mut slider, PageEvent::PointerUp(input(300.0)));
    assert_eq!(slider.state().index(), 1);
}

#[test]
fn empty_slider_is_inert() {
    let (mut doc, mut slider) = bound(0, TransitionMode::Bounded);
    assert!(slider.state().is_inert());
    assert_eq!(track_transform(&doc), "translateX(0%)");
    press(&mut doc, &mut slider, "#photos .slider-next");
    assert_eq!(slider.state().index(), 0);
    pointer(&mut doc, &mut slider, PageEvent::PointerDown(input(600.0)));
    assert!(!slider.is_dragging());
}

#[test]
fn bind_without_track_registers_nothing() {
    let mut doc = Document::new(Viewport::default(), 2000.0);
    let root = doc.root();
    let slider_root = doc.append(root, "div");
    doc.set_attribute(slider_root, "data-slider", "");
    doc.append(slider_root, "div");
    let before = doc.listener_count();
    let bound = Slider::bind(
        &mut doc,
        slider_root,
        0,
        TransitionMode::Bounded,
        DragThreshold::default(),
    );
    assert!(bound.is_none());
    assert_eq!(doc.listener_count(), before);
}
