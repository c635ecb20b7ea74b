use inkpad::{History, InkError};

#[test]
fn test_length_grows_by_one_per_save() {
    let mut history = History::new(0);
    for n in 1..=10 {
        history.save(n).unwrap();
        assert_eq!(history.len(), n + 1);
        assert_eq!(history.position(), n);
    }
}

#[test]
fn test_save_after_undo_truncates_the_tail() {
    let mut history = History::new("blank");
    history.save("a").unwrap();
    history.save("b").unwrap();
    history.save("c").unwrap();

    assert!(history.undo());
    assert!(history.undo());
    history.save("d").unwrap();

    assert_eq!(history.len(), 3);
    assert_eq!(history.value(), Some(&"d"));
    assert!(!history.can_redo());
}

#[test]
fn test_undo_then_redo_walks_every_entry() {
    let saves: Vec<u32> = (1..=6).collect();
    let mut history = History::new(0);
    for &s in &saves {
        history.save(s).unwrap();
    }

    let n = saves.len();
    for k in 1..=n {
        assert!(history.undo());
        let expected = if k == n { 0 } else { saves[n - k - 1] };
        assert_eq!(history.value(), Some(&expected));
    }
    for &s in &saves {
        assert!(history.redo());
        assert_eq!(history.value(), Some(&s));
    }
}

#[test]
fn test_boundaries_are_no_ops() {
    let mut history = History::new('x');
    assert!(!history.undo());
    assert_eq!(history.position(), 0);
    assert_eq!(history.value(), Some(&'x'));

    history.save('y').unwrap();
    assert!(!history.redo());
    assert_eq!(history.position(), 1);
    assert_eq!(history.value(), Some(&'y'));
}

#[test]
fn test_limit_evicts_oldest_entries() {
    let mut history = History::with_limit(0, 3);
    for n in 1..=5 {
        history.save(n).unwrap();
    }
    assert_eq!(history.len(), 3);
    assert_eq!(history.value(), Some(&5));

    assert!(history.undo());
    assert!(history.undo());
    assert!(!history.undo());
    assert_eq!(history.value(), Some(&3));
}

#[test]
fn test_cleared_history_rejects_saves() {
    let mut history = History::new(1);
    history.clear();
    assert!(history.is_cleared());
    assert!(matches!(history.save(2), Err(InkError::HistoryCleared)));
}
