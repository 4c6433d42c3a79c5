//! Linear snapshot history for undo/redo.

use crate::document::Document;

/// Ordered list of whole-document snapshots with a cursor.
///
/// The snapshot at the cursor always equals the live document. Recording a
/// new snapshot drops everything after the cursor, so history never
/// branches.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Document>,
    cursor: usize,
    /// Maximum number of snapshots kept (`None` = unlimited).
    limit: Option<usize>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(Document::new())
    }
}

impl History {
    /// Start a history whose only entry is `initial`.
    pub fn new(initial: Document) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
            limit: None,
        }
    }

    /// Cap the number of kept snapshots. Values below 1 are treated as 1.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit.map(|l| l.max(1));
        self.enforce_limit();
        self
    }

    /// Record a new snapshot after the cursor, discarding any redo future.
    pub fn record(&mut self, snapshot: Document) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(snapshot);
        self.cursor = self.snapshots.len() - 1;
        self.enforce_limit();
    }

    /// Drop all entries and restart from `initial`.
    pub fn reset(&mut self, initial: Document) {
        self.snapshots.clear();
        self.snapshots.push(initial);
        self.cursor = 0;
    }

    /// Step back. Returns the snapshot now under the cursor.
    pub fn undo(&mut self) -> Option<&Document> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.snapshots.get(self.cursor)
    }

    /// Step forward. Returns the snapshot now under the cursor.
    pub fn redo(&mut self) -> Option<&Document> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        self.snapshots.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// The snapshot under the cursor.
    pub fn current(&self) -> &Document {
        &self.snapshots[self.cursor]
    }

    /// Cursor position.
    pub fn index(&self) -> usize {
        self.cursor
    }

    /// Number of snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    fn enforce_limit(&mut self) {
        let Some(limit) = self.limit else { return };
        if self.snapshots.len() > limit {
            let excess = self.snapshots.len() - limit;
            self.snapshots.drain(..excess);
            self.cursor = self.cursor.saturating_sub(excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Element, ElementId, ElementKind};

    fn doc(ids: &[&str]) -> Document {
        Document::from_elements(
            ids.iter()
                .map(|id| Element::new(ElementId::from(*id), ElementKind::Divider))
                .collect(),
        )
    }

    #[test]
    fn test_starts_with_single_entry() {
        let history = History::default();
        assert_eq!(history.len(), 1);
        assert_eq!(history.index(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_redo() {
        let mut history = History::default();
        history.record(doc(&["a"]));
        history.record(doc(&["a", "b"]));
        assert_eq!(history.index(), 2);

        assert_eq!(history.undo(), Some(&doc(&["a"])));
        assert_eq!(history.undo(), Some(&doc(&[])));
        assert_eq!(history.undo(), None);
        assert_eq!(history.index(), 0);

        assert_eq!(history.redo(), Some(&doc(&["a"])));
        assert_eq!(history.redo(), Some(&doc(&["a", "b"])));
        assert_eq!(history.redo(), None);
    }

    #[test]
    fn test_record_truncates_future() {
        let mut history = History::default();
        history.record(doc(&["a"]));
        history.record(doc(&["a", "b"]));
        history.undo();
        history.record(doc(&["a", "c"]));

        assert_eq!(history.len(), 3);
        assert!(!history.can_redo());
        assert_eq!(history.current(), &doc(&["a", "c"]));
    }

    #[test]
    fn test_reset() {
        let mut history = History::default();
        history.record(doc(&["a"]));
        history.reset(doc(&["x", "y", "z"]));
        assert_eq!(history.len(), 1);
        assert_eq!(history.index(), 0);
        assert_eq!(history.undo(), None);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::default().with_limit(Some(3));
        history.record(doc(&["a"]));
        history.record(doc(&["a", "b"]));
        history.record(doc(&["a", "b", "c"]));

        assert_eq!(history.len(), 3);
        assert_eq!(history.index(), 2);
        assert_eq!(history.current(), &doc(&["a", "b", "c"]));
        history.undo();
        history.undo();
        assert_eq!(history.current(), &doc(&["a"]));
        assert!(!history.can_undo());
    }
}
