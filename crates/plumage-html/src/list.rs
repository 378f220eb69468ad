//! Nested list tracking for the transducer.
//!
//! One [`ListFrame`] per open `ol`/`ul`, holding the list type, the 1-based
//! indent level, and a running item count. The count only increments on
//! `li` starts and never resets until the frame is popped, so item numbers
//! stay sequential across nested sublists.

/// One open `ol`/`ul` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListFrame {
    /// `true` for `ol`, `false` for `ul`.
    pub ordered: bool,
    /// 1-based nesting level: parent level + 1, or 1 for a top-level list.
    pub level: usize,
    /// Items started so far in this list.
    pub count: usize,
}

/// Position of a just-started list item, used to render its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemStart {
    /// Whether the enclosing list is ordered.
    pub ordered: bool,
    /// Indent level of the enclosing list.
    pub level: usize,
    /// 1-based index of this item within the enclosing list.
    pub index: usize,
}

/// Stack of open lists.
///
/// Invariant: levels are ≥ 1 and strictly increase with stack depth.
#[derive(Debug, Default)]
pub struct ListTracker {
    frames: Vec<ListFrame>,
}

impl ListTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a list and return its indent level.
    pub fn open(&mut self, ordered: bool) -> usize {
        let level = self.frames.last().map_or(1, |top| top.level + 1);
        self.frames.push(ListFrame {
            ordered,
            level,
            count: 0,
        });
        level
    }

    /// Close the innermost list, returning its frame, or `None` on
    /// underflow. Type mismatches are the caller's diagnostic to record;
    /// exactly one frame is popped either way.
    pub fn close(&mut self) -> Option<ListFrame> {
        self.frames.pop()
    }

    /// Start an item in the innermost list: increments its count and
    /// returns the item's position, or `None` when no list is open.
    pub fn start_item(&mut self) -> Option<ItemStart> {
        let top = self.frames.last_mut()?;
        top.count += 1;
        Some(ItemStart {
            ordered: top.ordered,
            level: top.level,
            index: top.count,
        })
    }

    /// Number of open lists.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_increase_with_nesting() {
        let mut tracker = ListTracker::new();
        assert_eq!(tracker.open(true), 1);
        assert_eq!(tracker.open(false), 2);
        assert_eq!(tracker.open(true), 3);
        assert_eq!(tracker.close().unwrap().level, 3);
        assert_eq!(tracker.open(false), 3);
    }

    #[test]
    fn counts_are_per_list_and_survive_sublists() {
        let mut tracker = ListTracker::new();
        let _ = tracker.open(true);
        assert_eq!(tracker.start_item().unwrap().index, 1);
        assert_eq!(tracker.start_item().unwrap().index, 2);

        // A nested list numbers independently...
        let _ = tracker.open(true);
        assert_eq!(tracker.start_item().unwrap().index, 1);
        assert!(tracker.close().is_some());

        // ...and the outer count resumes where it left off.
        assert_eq!(tracker.start_item().unwrap().index, 3);
    }

    #[test]
    fn close_on_empty_is_none() {
        let mut tracker = ListTracker::new();
        assert!(tracker.close().is_none());
        assert!(tracker.start_item().is_none());
        assert_eq!(tracker.depth(), 0);
    }
}
