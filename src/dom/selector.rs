//! Minimal selectors for event targets.
//!
//! Grammar: whitespace-separated parts, each `#id`, `.class` or a bare tag
//! name, optionally suffixed `[n]` to keep only the n-th match of that step.
//! Each step searches the descendants of the previous step's matches.

use crate::model::DomError;

/// What a step matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// `#id`
    Id(String),
    /// `.class`
    Class(String),
    /// `tag`
    Tag(String),
}

/// One descendant step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Element matcher.
    pub matcher: Matcher,
    /// Optional n-th match.
    pub nth: Option<usize>,
}

/// Parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    steps: Vec<Step>,
}

impl Selector {
    /// Parse a selector string.
    pub fn parse(input: &str) -> Result<Self, DomError> {
        let invalid = || DomError::InvalidSelector(input.to_string());
        let steps = input
            .split_whitespace()
            .map(|part| parse_step(part).ok_or_else(invalid))
            .collect::<Result<Vec<_>, _>>()?;
        if steps.is_empty() {
            return Err(invalid());
        }
        Ok(Self { steps })
    }

    /// Steps in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

fn parse_step(part: &str) -> Option<Step> {
    let (head, nth) = match part.find('[') {
        Some(open) => {
            let inner = part[open..].strip_prefix('[')?.strip_suffix(']')?;
            (&part[..open], Some(inner.parse::<usize>().ok()?))
        }
        None => (part, None),
    };
    let matcher = if let Some(id) = head.strip_prefix('#') {
        Matcher::Id(valid_name(id)?.to_string())
    } else if let Some(class) = head.strip_prefix('.') {
        Matcher::Class(valid_name(class)?.to_string())
    } else {
        Matcher::Tag(valid_name(head)?.to_ascii_lowercase())
    };
    Some(Step { matcher, nth })
}

fn valid_name(name: &str) -> Option<&str> {
    let ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    ok.then_some(name)
}
