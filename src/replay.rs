//! Scripted replay of events against a bound page.
//!
//! Produces one [`StepRecord`] per event with the writes it caused. Step 0
//! records the writes made while binding.

use crate::dom::DomWrite;
use crate::model::PageEvent;
use crate::page::Page;
use serde::Serialize;
use std::io::Write;
use tracing::{debug, warn};

/// What a step applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StepEvent {
    /// Initial binding pass; serializes as `"bind"`.
    Bind(&'static str),
    /// A scripted event.
    Event(PageEvent),
}

/// One line of replay output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    /// 0 for binding, then 1-based script position.
    pub step: usize,
    /// Applied event.
    pub event: StepEvent,
    /// Writes caused, in order.
    pub writes: Vec<DomWrite>,
    /// Why the event was skipped, if it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<String>,
}

/// Replay driver.
#[derive(Debug)]
pub struct Replay {
    page: Page,
    step: usize,
}

impl Replay {
    /// Start from a freshly bound page. Returns the step-0 record.
    pub fn new(mut page: Page) -> (Self, StepRecord) {
        let writes = page.document_mut().take_writes();
        let record = StepRecord {
            step: 0,
            event: StepEvent::Bind("bind"),
            writes,
            skipped: None,
        };
        (Self { page, step: 0 }, record)
    }

    /// Apply one event. An unresolvable target skips the event with a
    /// diagnostic instead of failing the replay.
    pub fn apply(&mut self, event: &PageEvent) -> StepRecord {
        self.step += 1;
        let skipped = match self.page.dispatch(event) {
            Ok(outcome) => {
                debug!(step = self.step, handled_by = ?outcome.handled_by, "event applied");
                None
            }
            Err(err) => {
                warn!(step = self.step, %err, "event skipped");
                Some(err.to_string())
            }
        };
        StepRecord {
            step: self.step,
            event: StepEvent::Event(event.clone()),
            writes: self.page.document_mut().take_writes(),
            skipped,
        }
    }

    /// The page being driven.
    pub fn page(&self) -> &Page {
        &self.page
    }
}

/// Bind-then-apply every event.
pub fn run(page: Page, events: &[PageEvent]) -> (Page, Vec<StepRecord>) {
    let (mut replay, bind) = Replay::new(page);
    let mut records = Vec::with_capacity(events.len() + 1);
    records.push(bind);
    for event in events {
        records.push(replay.apply(event));
    }
    (replay.page, records)
}

/// Write records as JSON lines.
///
/// # Errors
///
/// Returns the underlying I/O error; serialization of these types cannot fail.
pub fn write_jsonl<W: Write>(records: &[StepRecord], mut out: W) -> std::io::Result<()> {
    for record in records {
        serde_json::to_writer(&mut out, record)?;
        out.write_all(b"\n")?;
    }
    out.flush()
}
