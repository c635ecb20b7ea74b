use crate::error::{InkError, InkResult};

/// Linear undo/redo over whole-state snapshots.
///
/// `position` always points at the entry matching what is currently on
/// screen. Saving after an undo drops the redo branch. A fresh history holds
/// exactly one entry; only `clear` empties it, and a cleared history is done
/// for good.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    position: usize,
    /// Oldest entries are evicted once this many are held
    max_entries: Option<usize>,
    cleared: bool,
}

impl<T> History<T> {
    /// Creates a history holding only the initial state
    pub fn new(initial: T) -> Self {
        Self {
            entries: vec![initial],
            position: 0,
            max_entries: None,
            cleared: false,
        }
    }

    /// Creates a history that keeps at most `max_entries` snapshots.
    /// A limit of zero is treated as one.
    pub fn with_limit(initial: T, max_entries: usize) -> Self {
        Self {
            max_entries: Some(max_entries.max(1)),
            ..Self::new(initial)
        }
    }

    /// Record a new state, abandoning anything that could have been redone
    pub fn save(&mut self, snapshot: T) -> InkResult<()> {
        if self.cleared {
            return Err(InkError::HistoryCleared);
        }

        self.entries.truncate(self.position + 1);
        self.entries.push(snapshot);

        if let Some(limit) = self.max_entries {
            if self.entries.len() > limit {
                let excess = self.entries.len() - limit;
                self.entries.drain(..excess);
                log::debug!("History limit {} reached, dropped {} oldest entries", limit, excess);
            }
        }

        self.position = self.entries.len() - 1;
        Ok(())
    }

    /// Step back one entry. Returns false when already at the oldest entry.
    pub fn undo(&mut self) -> bool {
        if self.cleared || self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    /// Step forward one entry. Returns false when already at the newest entry.
    pub fn redo(&mut self) -> bool {
        if self.cleared || self.position + 1 >= self.entries.len() {
            return false;
        }
        self.position += 1;
        true
    }

    /// The snapshot for the current state, or None once cleared
    pub fn value(&self) -> Option<&T> {
        self.entries.get(self.position)
    }

    /// Drop every entry. The history cannot be used again afterwards.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.position = 0;
        self.cleared = true;
    }

    pub fn can_undo(&self) -> bool {
        !self.cleared && self.position > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.cleared && self.position + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_cleared(&self) -> bool {
        self.cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_history_has_one_entry() {
        let history = History::new("blank");
        assert_eq!(history.len(), 1);
        assert_eq!(history.position(), 0);
        assert_eq!(history.value(), Some(&"blank"));
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_save_after_undo_drops_redo_branch() {
        let mut history = History::new(0);
        history.save(1).unwrap();
        history.save(2).unwrap();
        history.save(3).unwrap();

        assert!(history.undo());
        assert!(history.undo());
        assert_eq!(history.value(), Some(&1));

        history.save(10).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history.value(), Some(&10));
        assert!(!history.can_redo());

        assert!(history.undo());
        assert_eq!(history.value(), Some(&1));
    }

    #[test]
    fn test_limit_evicts_oldest() {
        let mut history = History::with_limit(0, 3);
        for i in 1..=5 {
            history.save(i).unwrap();
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.position(), 2);
        assert_eq!(history.value(), Some(&5));

        assert!(history.undo());
        assert!(history.undo());
        assert!(!history.undo());
        assert_eq!(history.value(), Some(&3));
    }

    #[test]
    fn test_cleared_history_rejects_use() {
        let mut history = History::new(0);
        history.save(1).unwrap();
        history.clear();

        assert!(history.is_empty());
        assert!(history.is_cleared());
        assert_eq!(history.value(), None);
        assert!(!history.undo());
        assert!(!history.redo());
        assert!(matches!(history.save(2), Err(InkError::HistoryCleared)));
    }
}
