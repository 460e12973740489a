//! Footer copyright year.

use crate::dom::{Document, NodeId};
use chrono::{Datelike, Local};

/// Writes the calendar year into `#year`.
#[derive(Debug, Clone, Copy)]
pub struct FooterYear {
    slot: NodeId,
}

impl FooterYear {
    /// Bind and write the year. `year` overrides the local clock; `None` on
    /// pages without a `#year` slot.
    pub fn bind(doc: &mut Document, year: Option<i32>) -> Option<Self> {
        let slot = doc.by_id("year")?;
        let year = year.unwrap_or_else(|| Local::now().year());
        doc.set_text(slot, &year.to_string());
        Some(Self { slot })
    }

    /// The `#year` element.
    pub fn slot(&self) -> NodeId {
        self.slot
    }
}
