//! Gallery images rewritten into lightbox triggers.
//!
//! Runs once at bind time. Each eligible `img` is moved inside a new
//! `a.glightbox` carrying the link target and grouping attributes the lightbox
//! library reads, then the library hand-off is recorded.

use crate::dom::{Document, NodeId};
use crate::model::DomError;
use tracing::{debug, info};

/// Selector the lightbox library binds to.
pub const TRIGGER_SELECTOR: &str = ".glightbox";

/// Default `data-gallery` group for images outside a named gallery.
pub const DEFAULT_GROUP: &str = "gallery";

/// Summary of one binding pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LightboxReport {
    /// Images wrapped in a new trigger.
    pub wrapped: usize,
    /// Images without any source.
    pub skipped: usize,
}

/// Lightbox trigger preparation.
#[derive(Debug, Clone, Copy, Default)]
pub struct LightboxBinder;

impl LightboxBinder {
    /// Wrap every eligible image and record the library init.
    ///
    /// Fails only on a structural problem (an image detached mid-pass); the
    /// caller logs that and carries on.
    pub fn bind(doc: &mut Document) -> Result<LightboxReport, DomError> {
        let mut report = LightboxReport::default();
        for img in candidates(doc) {
            let Some(href) = doc
                .attribute(img, "data-lightbox-src")
                .or_else(|| doc.attribute(img, "src"))
                .map(str::to_string)
            else {
                debug!(node = %doc.label(img), "image has no source; skipping");
                report.skipped += 1;
                continue;
            };
            let group = doc
                .closest_with_class(img, "gallery")
                .and_then(|g| doc.attribute(g, "data-gallery"))
                .unwrap_or(DEFAULT_GROUP)
                .to_string();
            let description = doc.attribute(img, "alt").map(str::to_string);

            let anchor = doc.create_element("a");
            doc.add_class(anchor, "glightbox");
            doc.set_attribute(anchor, "href", &href);
            doc.set_attribute(anchor, "data-gallery", &group);
            if let Some(text) = description {
                doc.set_attribute(anchor, "data-description", &text);
            }
            doc.wrap(img, anchor)?;
            report.wrapped += 1;
        }
        let triggers = doc.find_all_by_class(doc.root(), "glightbox").len();
        doc.record_lightbox_init(TRIGGER_SELECTOR, triggers);
        info!(
            wrapped = report.wrapped,
            skipped = report.skipped,
            "lightbox triggers prepared"
        );
        Ok(report)
    }
}

/// Images in a `.gallery` or carrying `data-lightbox-src`, not already inside
/// an anchor.
fn candidates(doc: &Document) -> Vec<NodeId> {
    doc.find_all_by_tag(doc.root(), "img")
        .into_iter()
        .filter(|img| {
            doc.closest_with_class(*img, "gallery").is_some()
                || doc.attribute(*img, "data-lightbox-src").is_some()
        })
        .filter(|img| {
            !doc
                .ancestors(*img)
                .iter()
                .any(|a| doc.node(*a).tag() == "a")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::fixture::{GalleryFixture, ImageFixture};
    use crate::dom::{DomWrite, PageFixture};
    use crate::model::Viewport;

    fn image(src: Option<&str>, large: Option<&str>, alt: Option<&str>) -> ImageFixture {
        ImageFixture {
            src: src.map(str::to_string),
            lightbox_src: large.map(str::to_string),
            alt: alt.map(str::to_string),
            linked: false,
        }
    }

    fn page(images: Vec<ImageFixture>, group: Option<&str>) -> Document {
        PageFixture {
            viewport: Viewport::default(),
            document_height: 3000.0,
            header: false,
            menu: None,
            footer_year: false,
            pinned: None,
            sliders: Vec::new(),
            galleries: vec![GalleryFixture {
                id: Some("press".to_string()),
                group: group.map(str::to_string),
                images,
            }],
        }
        .build()
    }

    #[test]
    fn wraps_images_with_group_and_description() {
        let mut doc = page(
            vec![
                image(Some("a-480.jpg"), Some("a-1600.jpg"), Some("Opening night")),
                image(Some("b.jpg"), None, None),
            ],
            Some("press"),
        );
        let report = LightboxBinder::bind(&mut doc).unwrap();
        assert_eq!(report.wrapped, 2);

        let anchors = doc.query_all(".glightbox").unwrap();
        assert_eq!(anchors.len(), 2);
        assert_eq!(doc.attribute(anchors[0], "href"), Some("a-1600.jpg"));
        assert_eq!(doc.attribute(anchors[0], "data-gallery"), Some("press"));
        assert_eq!(
            doc.attribute(anchors[0], "data-description"),
            Some("Opening night")
        );
        assert_eq!(doc.attribute(anchors[1], "href"), Some("b.jpg"));
        assert_eq!(doc.attribute(anchors[1], "data-description"), None);
        assert_eq!(
            doc.writes().last(),
            Some(&DomWrite::LightboxInit {
                selector: ".glightbox".to_string(),
                count: 2,
            })
        );
    }

    #[test]
    fn ungrouped_gallery_uses_default_group() {
        let mut doc = page(vec![image(Some("a.jpg"), None, None)], None);
        LightboxBinder::bind(&mut doc).unwrap();
        let anchor = doc.resolve(".glightbox").unwrap();
        assert_eq!(doc.attribute(anchor, "data-gallery"), Some(DEFAULT_GROUP));
    }

    #[test]
    fn sourceless_and_linked_images_are_left_alone() {
        let mut linked = image(Some("c.jpg"), None, None);
        linked.linked = true;
        let mut doc = page(vec![image(None, None, Some("blank")), linked], None);
        let report = LightboxBinder::bind(&mut doc).unwrap();
        assert_eq!(report, LightboxReport { wrapped: 0, skipped: 1 });
        assert!(doc.query_all(".glightbox").unwrap().is_empty());
    }

    #[test]
    fn running_twice_wraps_nothing_new() {
        let mut doc = page(vec![image(Some("a.jpg"), None, None)], None);
        LightboxBinder::bind(&mut doc).unwrap();
        let second = LightboxBinder::bind(&mut doc).unwrap();
        assert_eq!(second.wrapped, 0);
    }
}
