//! Page fixtures: TOML descriptions of a page's markup and layout.
//!
//! A fixture names which page features exist and assigns the layout values
//! the geometry sampler will read. Building one produces the same element
//! structure the site's markup uses, so controllers bind to it exactly as
//! they would to the real page.
//!
//! ```toml
//! document_height = 6000
//! header = true
//! footer_year = true
//!
//! [viewport]
//! width = 1280
//! height = 800
//!
//! [menu]
//! links = ["Home", "Archive", "Contact"]
//!
//! [pinned]
//! top = 900
//! height = 3000
//! cards = 6
//!
//! [[sliders]]
//! id = "photoSlider"
//! slides = 5
//! mode = "wrapping"
//! dots = true
//! ```

use super::document::Document;
use super::node::NodeId;
use crate::model::{FixtureError, Viewport};
use crate::state::scroll_progress::CARD_GAP_PX;
use crate::state::TransitionMode;
use serde::Deserialize;
use std::path::Path;

/// Whole-page fixture.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PageFixture {
    /// Window size.
    #[serde(default)]
    pub viewport: Viewport,

    /// Total scrollable height.
    #[serde(default = "default_document_height")]
    pub document_height: f64,

    /// Whether the page has a `.site-header`.
    #[serde(default)]
    pub header: bool,

    /// Mobile menu drawer.
    #[serde(default)]
    pub menu: Option<MenuFixture>,

    /// Whether the footer has a `#year` slot.
    #[serde(default)]
    pub footer_year: bool,

    /// Pinned horizontal card track.
    #[serde(default)]
    pub pinned: Option<PinnedFixture>,

    /// Sliders in document order.
    #[serde(default)]
    pub sliders: Vec<SliderFixture>,

    /// Image galleries.
    #[serde(default)]
    pub galleries: Vec<GalleryFixture>,
}

/// Menu drawer contents.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MenuFixture {
    /// Link labels inside the drawer.
    #[serde(default = "default_links")]
    pub links: Vec<String>,

    /// Whether the header carries the `#openMenu` button.
    #[serde(default = "default_true")]
    pub opener: bool,
}

/// Pinned section layout.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PinnedFixture {
    /// Document offset of the pin.
    pub top: f64,
    /// Height of the pin (scroll distance plus one viewport).
    pub height: f64,
    /// Number of `.jcard` cards.
    #[serde(default)]
    pub cards: usize,
    /// Card width.
    #[serde(default = "default_card_width")]
    pub card_width: f64,
    /// Gap between cards.
    #[serde(default = "default_card_gap")]
    pub gap: f64,
    /// Visible track width; the viewport width when absent.
    #[serde(default)]
    pub client_width: Option<f64>,
    /// Whether `#prevCard` / `#nextCard` exist.
    #[serde(default = "default_true")]
    pub buttons: bool,
}

/// One slider.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SliderFixture {
    /// Root element id.
    pub id: String,
    /// Number of `.slide` elements.
    pub slides: usize,
    /// Value of `data-slider-mode`; omitted when absent.
    #[serde(default)]
    pub mode: Option<TransitionMode>,
    /// Whether to render dot indicators.
    #[serde(default)]
    pub dots: bool,
    /// Whether prev/next buttons exist.
    #[serde(default = "default_true")]
    pub buttons: bool,
    /// Whether a counter element exists.
    #[serde(default = "default_true")]
    pub counter: bool,
    /// Document offset of the slider.
    #[serde(default)]
    pub top: f64,
    /// Viewport element width; the window width when absent.
    #[serde(default)]
    pub width: Option<f64>,
}

/// One gallery.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GalleryFixture {
    /// Optional element id.
    #[serde(default)]
    pub id: Option<String>,
    /// Value of `data-gallery`.
    #[serde(default)]
    pub group: Option<String>,
    /// Images in order.
    #[serde(default)]
    pub images: Vec<ImageFixture>,
}

/// One gallery image.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ImageFixture {
    /// `src` attribute.
    #[serde(default)]
    pub src: Option<String>,
    /// `data-lightbox-src` attribute.
    #[serde(default)]
    pub lightbox_src: Option<String>,
    /// `alt` attribute.
    #[serde(default)]
    pub alt: Option<String>,
    /// Whether the image is already wrapped in a link.
    #[serde(default)]
    pub linked: bool,
}

fn default_document_height() -> f64 {
    5000.0
}

fn default_true() -> bool {
    true
}

fn default_links() -> Vec<String> {
    vec!["Home".to_string(), "Archive".to_string(), "Contact".to_string()]
}

fn default_card_width() -> f64 {
    380.0
}

fn default_card_gap() -> f64 {
    CARD_GAP_PX
}

impl PageFixture {
    /// Load a fixture from a TOML file.
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        if !path.exists() {
            return Err(FixtureError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let contents = std::fs::read_to_string(path).map_err(|source| FixtureError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|e| FixtureError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Build the document the fixture describes. The write log starts empty.
    pub fn build(&self) -> Document {
        let mut doc = Document::new(self.viewport, self.document_height);
        let body = doc.root();

        if self.header {
            self.build_header(&mut doc, body);
        }
        if let Some(menu) = &self.menu {
            build_menu(&mut doc, body, menu);
        }
        if let Some(pinned) = &self.pinned {
            build_pinned(&mut doc, body, pinned, self.viewport.width);
        }
        for slider in &self.sliders {
            build_slider(&mut doc, body, slider, self.viewport.width);
        }
        for gallery in &self.galleries {
            build_gallery(&mut doc, body, gallery);
        }
        if self.footer_year {
            let footer = doc.append(body, "footer");
            let year = doc.append(footer, "span");
            doc.set_id(year, "year");
        }

        doc.take_writes();
        doc
    }

    fn build_header(&self, doc: &mut Document, body: NodeId) {
        let header = doc.append(body, "header");
        doc.add_class(header, "site-header");
        doc.layout_mut(header).height = 72.0;
        doc.layout_mut(header).width = self.viewport.width;
        let logo = doc.append(header, "a");
        doc.add_class(logo, "logo");
        doc.set_attribute(logo, "href", "/");
        let wants_opener = self.menu.as_ref().is_some_and(|m| m.opener);
        if wants_opener {
            let opener = doc.append(header, "button");
            doc.set_id(opener, "openMenu");
            doc.set_attribute(opener, "aria-controls", "mobileOverlay");
            doc.set_attribute(opener, "aria-expanded", "false");
        }
    }
}

fn build_menu(doc: &mut Document, body: NodeId, menu: &MenuFixture) {
    let overlay = doc.append(body, "div");
    doc.set_id(overlay, "mobileOverlay");
    doc.add_class(overlay, "mobile-overlay");
    doc.set_attribute(overlay, "aria-hidden", "true");
    let drawer = doc.append(overlay, "nav");
    doc.add_class(drawer, "drawer");
    let close = doc.append(drawer, "button");
    doc.set_id(close, "closeMenu");
    for label in &menu.links {
        let link = doc.append(drawer, "a");
        doc.set_attribute(link, "href", &format!("#{}", label.to_lowercase()));
        doc.set_text(link, label);
    }
}

fn build_pinned(doc: &mut Document, body: NodeId, pinned: &PinnedFixture, viewport_width: f64) {
    let section = doc.append(body, "section");
    doc.add_class(section, "jubilee");
    let pin = doc.append(section, "div");
    doc.add_class(pin, "jubilee-pin");
    {
        let layout = doc.layout_mut(pin);
        layout.offset_top = pinned.top;
        layout.height = pinned.height;
        layout.width = viewport_width;
    }

    let client_width = pinned.client_width.unwrap_or(viewport_width);
    let scroll_width = if pinned.cards == 0 {
        client_width
    } else {
        let n = pinned.cards as f64;
        n * pinned.card_width + (n - 1.0) * pinned.gap
    };
    let track = doc.append(pin, "div");
    doc.set_id(track, "jubileeTrack");
    doc.add_class(track, "jubilee-track");
    {
        let layout = doc.layout_mut(track);
        layout.offset_top = pinned.top;
        layout.width = client_width;
        layout.client_width = client_width;
        layout.scroll_width = scroll_width.max(client_width);
    }
    for i in 0..pinned.cards {
        let card = doc.append(track, "article");
        doc.add_class(card, "jcard");
        doc.set_text(card, &format!("Card {}", i + 1));
        let layout = doc.layout_mut(card);
        layout.offset_top = pinned.top;
        layout.offset_left = i as f64 * (pinned.card_width + pinned.gap);
        layout.width = pinned.card_width;
    }
    if pinned.buttons {
        let prev = doc.append(section, "button");
        doc.set_id(prev, "prevCard");
        let next = doc.append(section, "button");
        doc.set_id(next, "nextCard");
    }
}

fn build_slider(doc: &mut Document, body: NodeId, slider: &SliderFixture, viewport_width: f64) {
    let root = doc.append(body, "div");
    doc.set_id(root, &slider.id);
    doc.add_class(root, "slider");
    doc.set_attribute(root, "data-slider", "");
    doc.set_attribute(root, "tabindex", "0");
    if let Some(mode) = slider.mode {
        let value = match mode {
            TransitionMode::Bounded => "bounded",
            TransitionMode::Wrapping => "wrapping",
        };
        doc.set_attribute(root, "data-slider-mode", value);
    }
    let width = slider.width.unwrap_or(viewport_width);
    doc.layout_mut(root).offset_top = slider.top;
    doc.layout_mut(root).width = width;

    let view = doc.append(root, "div");
    doc.add_class(view, "slider-viewport");
    {
        let layout = doc.layout_mut(view);
        layout.offset_top = slider.top;
        layout.width = width;
        layout.client_width = width;
    }
    let track = doc.append(view, "div");
    doc.add_class(track, "slider-track");
    doc.layout_mut(track).scroll_width = width * slider.slides.max(1) as f64;
    for i in 0..slider.slides {
        let slide = doc.append(track, "div");
        doc.add_class(slide, "slide");
        doc.set_text(slide, &format!("Slide {}", i + 1));
        doc.layout_mut(slide).width = width;
    }
    if slider.buttons {
        let prev = doc.append(root, "button");
        doc.add_class(prev, "slider-prev");
        let next = doc.append(root, "button");
        doc.add_class(next, "slider-next");
    }
    if slider.dots {
        let dots = doc.append(root, "div");
        doc.add_class(dots, "slider-dots");
        for i in 0..slider.slides {
            let dot = doc.append(dots, "button");
            doc.add_class(dot, "dot");
            doc.set_attribute(dot, "aria-label", &format!("Slide {}", i + 1));
        }
    }
    if slider.counter {
        let counter = doc.append(root, "p");
        doc.add_class(counter, "slider-counter");
        doc.set_attribute(counter, "aria-live", "polite");
    }
}

fn build_gallery(doc: &mut Document, body: NodeId, gallery: &GalleryFixture) {
    let root = doc.append(body, "div");
    doc.add_class(root, "gallery");
    if let Some(id) = &gallery.id {
        doc.set_id(root, id);
    }
    if let Some(group) = &gallery.group {
        doc.set_attribute(root, "data-gallery", group);
    }
    for image in &gallery.images {
        let parent = if image.linked {
            let link = doc.append(root, "a");
            if let Some(href) = image.lightbox_src.as_ref().or(image.src.as_ref()) {
                doc.set_attribute(link, "href", href);
            }
            link
        } else {
            root
        };
        let img = doc.append(parent, "img");
        if let Some(src) = &image.src {
            doc.set_attribute(img, "src", src);
        }
        if let Some(large) = &image.lightbox_src {
            doc.set_attribute(img, "data-lightbox-src", large);
        }
        if let Some(alt) = &image.alt {
            doc.set_attribute(img, "alt", alt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::GeometrySource;

    const FULL: &str = r#"
document_height = 6000
header = true
footer_year = true

[viewport]
width = 1280
height = 800

[menu]

[pinned]
top = 900
height = 3000
cards = 6

[[sliders]]
id = "photoSlider"
slides = 5
mode = "wrapping"
dots = true

[[galleries]]
group = "archive"
images = [{ src = "img/a-480.jpg", lightbox_src = "img/a-1200.jpg", alt = "Hall" }]
"#;

    fn parse(s: &str) -> PageFixture {
        toml::from_str(s).unwrap()
    }

    #[test]
    fn full_fixture_parses() {
        let fixture = parse(FULL);
        assert!(fixture.header);
        assert_eq!(fixture.menu.as_ref().unwrap().links.len(), 3);
        assert_eq!(fixture.sliders[0].mode, Some(TransitionMode::Wrapping));
        assert_eq!(fixture.pinned.as_ref().unwrap().gap, CARD_GAP_PX);
    }

    #[test]
    fn empty_fixture_uses_defaults() {
        let fixture = parse("");
        assert_eq!(fixture.viewport, Viewport::default());
        assert_eq!(fixture.document_height, 5000.0);
        assert!(fixture.sliders.is_empty());
        let doc = fixture.build();
        assert!(doc.is_empty());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<PageFixture, _> = toml::from_str("sidebar = true");
        assert!(result.is_err());
    }

    #[test]
    fn build_produces_site_markup() {
        let doc = parse(FULL).build();
        assert!(doc.by_id("mobileOverlay").is_some());
        assert!(doc.by_id("openMenu").is_some());
        assert!(doc.by_id("jubileeTrack").is_some());
        assert!(doc.by_id("year").is_some());
        assert_eq!(doc.query_all("#photoSlider .dot").unwrap().len(), 5);
        assert_eq!(doc.query_all(".jcard").unwrap().len(), 6);
        assert!(doc.writes().is_empty());
    }

    #[test]
    fn track_scroll_width_spans_cards_and_gaps() {
        let doc = parse(FULL).build();
        let track = doc.by_id("jubileeTrack").unwrap();
        // 6 * 380 + 5 * 18
        assert_eq!(doc.scroll_width(track), 2370.0);
        assert_eq!(doc.client_width(track), 1280.0);
    }

    #[test]
    fn slider_mode_attribute_is_written_when_given() {
        let doc = parse(FULL).build();
        let root = doc.by_id("photoSlider").unwrap();
        assert_eq!(doc.attribute(root, "data-slider-mode"), Some("wrapping"));
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let result = PageFixture::load(Path::new("/nonexistent/page.toml"));
        assert!(matches!(result, Err(FixtureError::FileNotFound { .. })));
    }
}
