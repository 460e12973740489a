//! Focus cycling inside a modal region.

/// Where focus goes when Tab is pressed inside a trapped region.
///
/// `focusables` is the region's focusable elements in document order and
/// `current` the position of the focused one, if it is inside the region.
/// Returns `None` when the browser's default move should happen: forward Tab
/// on anything but the last element, or backward Tab on anything but the
/// first. Focus outside the region is pulled back in.
pub fn next_focus(focusables: usize, current: Option<usize>, backwards: bool) -> Option<usize> {
    if focusables == 0 {
        return None;
    }
    let last = focusables - 1;
    match (current, backwards) {
        (None, false) => Some(0),
        (None, true) => Some(last),
        (Some(i), false) if i >= last => Some(0),
        (Some(0), true) => Some(last),
        _ => None,
    }
}
