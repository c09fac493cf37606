//! End-to-end editing scenarios driven through `EditorSession`

use kara_core::{normalize, SequentialIdGenerator, SingerTag};
use kara_editor::{
    AlignmentDocument, EditorCommand, EditorError, EditorSession, EntityId, EntityKind, Line,
    SessionConfig, SplitLineCommand, Subword, Word,
};
use pretty_assertions::assert_eq;

/// One word per `(id, start, end, text)`, each with a single subword
fn line(id: &str, words: &[(&str, f64, f64, &str)]) -> Line {
    let words = words
        .iter()
        .map(|(wid, start, end, text)| {
            Word::new(
                (*wid).into(),
                id.into(),
                vec![Subword::new(
                    format!("{wid}-s").into(),
                    (*wid).into(),
                    id.into(),
                    *start,
                    *end,
                    *text,
                )],
            )
        })
        .collect();
    Line::new(id.into(), words)
}

fn session(lines: Vec<Line>) -> EditorSession {
    EditorSession::from_document(AlignmentDocument::from_lines(lines))
        .with_id_generator(Box::new(SequentialIdGenerator::new("new")))
}

/// Route editor logs to the test harness; repeated calls are harmless
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn line_ids(doc: &AlignmentDocument) -> Vec<&str> {
    doc.lines().iter().map(|l| l.id.as_str()).collect()
}

fn word_ids(line: &Line) -> Vec<&str> {
    line.words.iter().map(|w| w.id.as_str()).collect()
}

#[test]
fn added_line_is_sorted_after_existing() {
    let mut session = session(vec![line("L1", &[("W1", 0.0, 1.0, "hi")])]);
    let hint = session.add_line(2.0, 3.0, "<>").unwrap().unwrap();

    let doc = session.document();
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.lines()[0].id.as_str(), "L1");
    assert_eq!(doc.lines()[1].id, hint.id);
    assert_eq!(doc.lines()[1].text(), "<>");
    assert_eq!((doc.lines()[1].start, doc.lines()[1].end), (2.0, 3.0));
}

#[test]
fn added_line_lands_before_later_lines() {
    let mut session = session(vec![line("L1", &[("W1", 5.0, 6.0, "late")])]);
    session.add_line(1.0, 2.0, "early").unwrap();
    assert_eq!(session.document().lines()[1].id.as_str(), "L1");
    assert_eq!(session.document().lines()[0].text(), "early");
}

#[test]
fn split_line_keeps_word_ids_and_mints_line_ids() {
    let mut session = session(vec![line(
        "L1",
        &[("W1", 0.0, 1.0, "a"), ("W2", 1.0, 2.0, "b"), ("W3", 2.0, 3.0, "c")],
    )]);
    let hint = session.split_line(&"W2".into()).unwrap().unwrap();
    assert_eq!(hint.kind, EntityKind::Line);

    let doc = session.document();
    assert_eq!(line_ids(doc), vec!["new-1", "new-2"]);
    assert_eq!(word_ids(&doc.lines()[0]), vec!["W1"]);
    assert_eq!(word_ids(&doc.lines()[1]), vec!["W2", "W3"]);
    assert_eq!(doc.lines()[1].id, hint.id);

    // Subwords follow their words onto the new lines
    let subword = &doc.lines()[1].words[1].subwords[0];
    assert_eq!(subword.line_id.as_str(), "new-2");
    assert_eq!((doc.lines()[1].start, doc.lines()[1].end), (1.0, 3.0));
}

#[test]
fn split_then_merge_restores_words() {
    let mut session = session(vec![line(
        "L1",
        &[("W1", 0.0, 1.0, "a"), ("W2", 1.0, 2.0, "b")],
    )]);
    session.split_line(&"W2".into()).unwrap();
    let first = session.document().lines()[0].id.clone();
    session.merge_line_with_next_line(&first).unwrap();

    let doc = session.document();
    assert_eq!(doc.len(), 1);
    assert_eq!(word_ids(&doc.lines()[0]), vec!["W1", "W2"]);
    assert_eq!(doc.lines()[0].text(), "a b");
}

#[test]
fn deleting_last_subword_prunes_word_and_line() {
    let mut session = session(vec![
        line("L1", &[("W1", 0.0, 1.0, "solo")]),
        line("L2", &[("W2", 2.0, 3.0, "x"), ("W3", 3.0, 4.0, "y")]),
    ]);

    session.delete_subwords(&["W2-s".into()]).unwrap();
    assert_eq!(line_ids(session.document()), vec!["L1", "L2"]);
    assert_eq!(word_ids(&session.document().lines()[1]), vec!["W3"]);
    assert_eq!(session.document().lines()[1].start, 3.0);

    session.delete_subwords(&["W1-s".into()]).unwrap();
    assert_eq!(line_ids(session.document()), vec!["L2"]);
}

#[test]
fn copy_paste_lines_retimes_with_fresh_ids() {
    let mut session = session(vec![line(
        "L1",
        &[("W1", 0.0, 1.5, "la"), ("W2", 1.5, 2.0, "la")],
    )]);
    session.copy_lines(&["L1".into()]);
    let hint = session.paste_lines(10.0).unwrap().unwrap();

    let doc = session.document();
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.lines()[0].id.as_str(), "L1");
    assert_eq!((doc.lines()[0].start, doc.lines()[0].end), (0.0, 2.0));

    let pasted = &doc.lines()[1];
    assert_eq!(pasted.id, hint.id);
    assert_eq!(pasted.start, 10.0);
    assert_eq!(pasted.end - pasted.start, 2.0);
    assert_eq!(pasted.text(), "la la");

    let originals: Vec<&EntityId> = doc.lines()[0]
        .words
        .iter()
        .flat_map(|w| std::iter::once(&w.id).chain(w.subwords.iter().map(|s| &s.id)))
        .collect();
    for id in std::iter::once(&pasted.id).chain(pasted.words.iter().map(|w| &w.id)) {
        assert!(!originals.contains(&id));
        assert_ne!(id.as_str(), "L1");
    }
    for subword in pasted.subwords() {
        assert_eq!(subword.line_id, pasted.id);
        assert!(!originals.contains(&&subword.id));
    }
}

#[test]
fn cut_paste_lines_moves_the_line() {
    let mut session = session(vec![
        line("L1", &[("W1", 0.0, 2.0, "go")]),
        line("L2", &[("W2", 4.0, 5.0, "stay")]),
    ]);
    session.cut_lines(&["L1".into()]);
    assert!(session.clipboard().is_cut());
    session.paste_lines(10.0).unwrap();

    let doc = session.document();
    assert_eq!(doc.len(), 2);
    assert_eq!(doc.lines()[0].id.as_str(), "L2");
    assert!(doc.lines().iter().all(|l| l.id.as_str() != "L1"));
    assert_eq!((doc.lines()[1].start, doc.lines()[1].end), (10.0, 12.0));
    assert_eq!(doc.lines()[1].text(), "go");

    // The originals are gone, so a second paste has nothing to copy
    assert_eq!(session.paste_lines(20.0).unwrap(), None);
}

#[test]
fn pasting_twice_never_collides() {
    let mut session = session(vec![line("L1", &[("W1", 0.0, 1.0, "hey")])]);
    session.copy_lines(&["L1".into()]);
    session.paste_lines(5.0).unwrap();
    session.paste_lines(5.0).unwrap();

    let doc = session.document();
    assert_eq!(doc.len(), 3);
    let mut ids: Vec<&EntityId> = doc.ids().collect();
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);
}

#[test]
fn paste_words_into_line_at_time() {
    let mut session = session(vec![
        line("L1", &[("W1", 0.0, 1.0, "copy"), ("W2", 1.0, 1.5, "me")]),
        line("L2", &[("W3", 10.0, 14.0, "target")]),
    ]);
    session.copy_words(&["W1".into(), "W2".into()]);
    let hint = session.paste_words(12.0).unwrap().unwrap();
    assert_eq!(hint.kind, EntityKind::Word);

    let target = &session.document().lines()[1];
    assert_eq!(target.id.as_str(), "L2");
    assert_eq!(target.words.len(), 3);
    assert_eq!(target.text(), "target copy me");
    assert_eq!((target.start, target.end), (10.0, 14.0));
    assert_eq!(target.words[1].id, hint.id);
    assert_eq!((target.words[2].start, target.words[2].end), (13.0, 13.5));

    // Nothing plays at 30s
    assert_eq!(session.paste_words(30.0).unwrap(), None);
}

#[test]
fn undo_and_redo_walk_history() {
    let mut session = session(vec![line("L1", &[("W1", 0.0, 1.0, "hi")])]);
    let original = session.document().clone();

    session.shift_lines(&["L1".into()], 3.0).unwrap();
    session.set_line_singer(&["L1".into()], Some(SingerTag::Duet)).unwrap();
    let edited = session.document().clone();
    assert_eq!(session.next_undo_description(), Some("Set singer"));

    assert!(session.undo());
    assert!(session.undo());
    assert!(!session.undo());
    assert_eq!(session.document(), &original);

    assert!(session.redo());
    assert_eq!(session.next_redo_description(), Some("Set singer"));
    assert!(session.redo());
    assert!(!session.redo());
    assert_eq!(session.document(), &edited);
    assert_eq!(session.stats().operation_count, 2);
}

#[test]
fn no_op_commands_leave_history_alone() {
    let mut session = session(vec![line(
        "L1",
        &[("W1", 0.0, 1.0, "a"), ("W2", 1.0, 2.0, "b")],
    )]);
    let before = session.document().clone();

    assert_eq!(session.delete_lines(&["missing".into()]).unwrap(), None);
    assert_eq!(session.split_line(&"W1".into()).unwrap(), None);
    assert_eq!(session.merge_line_with_next_line(&"L1".into()).unwrap(), None);
    assert_eq!(session.shift_lines(&["L1".into()], 0.0).unwrap(), None);

    assert!(!session.can_undo());
    assert_eq!(session.document(), &before);
}

#[test]
fn strict_ranges_reject_inverted_times() {
    init_tracing();
    let mut session = EditorSession::with_config(SessionConfig {
        strict_ranges: true,
        ..SessionConfig::default()
    });
    session.add_line(0.0, 1.0, "ok").unwrap();
    let subword = session.document().subwords().next().unwrap().id.clone();

    let err = session.update_subword_times(&subword, 3.0, 2.0).unwrap_err();
    assert_eq!(err, EditorError::InvalidTimeRange { start: 3.0, end: 2.0 });
    assert!(err.is_timing_error());
    assert!(session.shift_alignment(f64::NAN).is_err());
    assert_eq!(session.history_stats().undo_count, 1);

    // Permissive sessions store what they are given
    let mut loose = EditorSession::new();
    loose.add_line(0.0, 1.0, "ok").unwrap();
    let subword = loose.document().subwords().next().unwrap().id.clone();
    loose.update_subword_times(&subword, 3.0, 2.0).unwrap();
    assert_eq!(loose.document().lines()[0].start, 3.0);
}

#[test]
fn commands_are_pure() {
    let doc = normalize(AlignmentDocument::from_lines(vec![line(
        "L1",
        &[("W1", 0.0, 1.0, "a"), ("W2", 1.0, 2.0, "b")],
    )]));
    let snapshot = doc.clone();
    let mut ids = SequentialIdGenerator::new("x");
    let output = SplitLineCommand::new("W2".into())
        .execute(&doc, &mut ids)
        .unwrap();

    assert_eq!(doc, snapshot);
    assert_eq!(output.document.len(), 2);
}

#[test]
fn selection_follows_the_document() {
    let mut session = session(vec![
        line("L1", &[("W1", 0.0, 1.0, "a")]),
        line("L2", &[("W2", 2.0, 3.0, "b")]),
    ]);
    assert!(session.select_subword(&"W1-s".into()));
    assert!(session.selection().contains(&"L1".into()));
    assert!(session.selection().contains(&"W1".into()));

    session.toggle_line(&"L2".into());
    session.delete_selection().unwrap();
    assert!(session.selection().is_empty());
    assert!(session.document().is_empty());

    assert!(session.undo());
    assert_eq!(session.document().len(), 2);
    assert_eq!(session.next_redo_description(), Some("Delete selection"));
}

#[cfg(feature = "serde")]
#[test]
fn snapshot_restores_into_a_fresh_session() {
    let mut session = session(vec![line("L1", &[("W1", 0.0, 1.0, "hi")])]);
    session.add_line(2.0, 3.0, "there").unwrap();
    session.set_line_singer(&["L1".into()], Some(SingerTag::Custom(2))).unwrap();
    let json = session.snapshot_json().unwrap();

    let mut restored = EditorSession::new();
    restored.restore_json(&json).unwrap();
    assert_eq!(restored.document(), session.document());
    assert!(!restored.can_undo());

    // A bad snapshot keeps the current document
    assert!(restored.restore_json("not json").is_err());
    assert_eq!(restored.document(), session.document());
}

fn ids_are_unique(doc: &AlignmentDocument) -> bool {
    let mut ids: Vec<&EntityId> = doc.ids().collect();
    let total = ids.len();
    ids.sort();
    ids.dedup();
    ids.len() == total
}

#[test]
fn loaded_document_never_shares_minted_ids() {
    let mut first =
        EditorSession::new().with_id_generator(Box::new(SequentialIdGenerator::default()));
    first.add_line(0.0, 1.0, "one").unwrap();
    first.add_line(2.0, 3.0, "two").unwrap();

    // Same fresh sequence as the session that produced the document
    let mut second = EditorSession::from_document(first.document().clone())
        .with_id_generator(Box::new(SequentialIdGenerator::default()));
    second.add_line(4.0, 5.0, "three").unwrap();
    assert_eq!(second.document().len(), 3);
    assert!(ids_are_unique(second.document()));
}

#[cfg(feature = "serde")]
#[test]
fn restored_snapshot_never_reuses_ids() {
    let mut source =
        EditorSession::new().with_id_generator(Box::new(SequentialIdGenerator::default()));
    source.add_line(0.0, 1.0, "hello").unwrap();
    let json = source.snapshot_json().unwrap();

    let mut restored =
        EditorSession::new().with_id_generator(Box::new(SequentialIdGenerator::default()));
    restored.restore_json(&json).unwrap();
    restored.add_line(2.0, 3.0, "world").unwrap();
    let all: Vec<EntityId> = restored.document().lines().iter().map(|l| l.id.clone()).collect();
    restored.copy_lines(&all);
    restored.paste_lines(10.0).unwrap();

    let doc = restored.document();
    assert_eq!(doc.len(), 4);
    assert_eq!(doc.stats().subwords, 4);
    assert!(ids_are_unique(doc));
}

#[test]
fn emptied_subword_survives_until_next_normalizing_edit() {
    let mut session = session(vec![line(
        "L1",
        &[("W1", 0.0, 1.0, "gone"), ("W2", 1.0, 2.0, "kept")],
    )]);
    let original = session.document().clone();

    session.update_subword_text(&"W1-s".into(), "").unwrap();
    let emptied = session.document().clone();
    assert_eq!(emptied.stats().subwords, 2);
    assert_eq!(emptied.lines()[0].words[0].text(), "");
    assert!(!kara_core::normalize::is_normalized(&emptied));

    assert!(session.undo());
    assert_eq!(session.document(), &original);
    assert!(session.redo());
    assert_eq!(session.document(), &emptied);

    // Any normalizing edit prunes the empty subword and its word
    session.shift_alignment(1.0).unwrap();
    let doc = session.document();
    assert_eq!(word_ids(&doc.lines()[0]), vec!["W2"]);
    assert_eq!(doc.lines()[0].span().start, 2.0);
}

#[test]
fn cut_paste_words_within_same_line() {
    let mut session = session(vec![line(
        "L1",
        &[("W1", 0.0, 1.0, "move"), ("W2", 1.0, 2.0, "stay")],
    )]);
    let original = session.document().clone();

    session.cut_words(&["W1".into()]);
    let hint = session.paste_words(1.5).unwrap().unwrap();

    let doc = session.document();
    assert_eq!(doc.len(), 1);
    let moved = &doc.lines()[0];
    assert_eq!(word_ids(moved), vec!["W2", hint.id.as_str()]);
    assert_eq!(moved.text(), "stay move");
    assert_eq!((moved.words[1].start, moved.words[1].end), (1.5, 2.5));
    assert_eq!((moved.start, moved.end), (1.0, 2.5));
    assert!(ids_are_unique(doc));

    assert!(session.undo());
    assert_eq!(session.document(), &original);
}
