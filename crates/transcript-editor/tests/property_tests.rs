//! Property-based tests for transcript-editor
//!
//! Uses proptest to check that selections extend reversibly and that no
//! sequence of edits, successful or not, leaves a document invalid.

use proptest::prelude::*;
use transcript_core::{index, Item, ItemStream, Source, SourceTable};
use transcript_editor::{
    BreakLocation, Clipboard, EditorDocument, EditorError, Selection, SelectionEngine,
};

fn arb_duration() -> impl Strategy<Value = f64> {
    (1..=8u32).prop_map(|quarters| f64::from(quarters) * 0.25)
}

fn arb_content() -> impl Strategy<Value = Item> {
    prop_oneof![
        4 => (0..16u32, arb_duration()).prop_map(|(offset, duration)| {
            Item::word("w", "a.wav", f64::from(offset) * 0.25, duration)
        }),
        1 => arb_duration().prop_map(Item::artificial_silence),
    ]
}

fn arb_paragraph() -> impl Strategy<Value = Vec<Item>> {
    (
        prop::bool::weighted(0.2),
        prop_oneof![Just("A"), Just("B")],
        prop::collection::vec(arb_content(), 1..5),
    )
        .prop_map(|(heading, speaker, content)| {
            let mut items = Vec::with_capacity(content.len() + 3);
            if heading {
                items.push(Item::heading("Section"));
            }
            items.push(Item::paragraph_start(speaker));
            items.extend(content);
            items.push(Item::paragraph_end());
            items
        })
}

fn arb_document() -> impl Strategy<Value = EditorDocument> {
    prop::collection::vec(arb_paragraph(), 1..5).prop_map(|paragraphs| {
        let mut items: Vec<Item> = paragraphs.into_iter().flatten().collect();
        if matches!(items.first(), Some(Item::Heading { .. })) {
            items.remove(0);
        }
        let sources: SourceTable = [("a.wav", Source::new(vec![0u8; 16]))].into_iter().collect();
        EditorDocument::from_parts(ItemStream::from_items(items), sources)
            .expect("generated documents are valid")
    })
}

#[derive(Debug, Clone)]
enum Edit {
    InsertBreak(f64),
    RemoveBreak(f64),
    Delete(f64, f64),
    CopyPaste(f64, f64, usize),
    Backspace(usize),
}

/// Times are fractions of the document duration
fn arb_edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (0.0..=1.0f64).prop_map(Edit::InsertBreak),
        (0.0..=1.0f64).prop_map(Edit::RemoveBreak),
        (0.0..=1.0f64, 0.0..=1.0f64).prop_map(|(s, l)| Edit::Delete(s, l)),
        (0.0..=1.0f64, 0.0..=1.0f64, 0..40usize).prop_map(|(s, l, i)| Edit::CopyPaste(s, l, i)),
        (0..40usize).prop_map(Edit::Backspace),
    ]
}

fn run(doc: &mut EditorDocument, edit: &Edit) -> Result<(), EditorError> {
    let duration = doc.duration();
    match *edit {
        Edit::InsertBreak(t) => doc.insert_paragraph_break(t * duration).map(drop),
        Edit::RemoveBreak(t) => doc
            .remove_paragraph_break(BreakLocation::Time(t * duration))
            .map(drop),
        Edit::Delete(s, l) => {
            let start = s * duration;
            doc.apply(&transcript_editor::DeleteRange::new(start, l * (duration - start)))
                .map(drop)
        }
        Edit::CopyPaste(s, l, at) => {
            let start = s * duration;
            let mut clipboard = Clipboard::new();
            clipboard.put(doc.copy_range(start, l * (duration - start)));
            doc.set_cursor(at);
            doc.paste(&clipboard).map(drop)
        }
        Edit::Backspace(at) => {
            doc.set_cursor(at);
            doc.delete_something().map(drop)
        }
    }
}

fn same_range(a: &Selection, b: &Selection) -> bool {
    a.start_item_index == b.start_item_index
        && (a.range_start - b.range_start).abs() < 1e-9
        && (a.range_length - b.range_length).abs() < 1e-9
}

proptest! {
    #[test]
    fn edits_never_break_structure(
        mut doc in arb_document(),
        edits in prop::collection::vec(arb_edit(), 1..12),
    ) {
        for edit in &edits {
            let before = doc.stream().clone();
            match run(&mut doc, edit) {
                Ok(()) => {}
                Err(err) => {
                    prop_assert!(err.is_conflict(), "{edit:?} failed with {err}");
                    prop_assert_eq!(doc.stream(), &before);
                }
            }
            prop_assert!(doc.stream().validate().is_ok(), "{edit:?} left {:?}", doc.stream());
        }
    }

    #[test]
    fn selection_extension_is_reversible(
        doc in arb_document(),
        anchor in 0..40usize,
        moves in prop::collection::vec(any::<bool>(), 0..6),
    ) {
        let timed = index(doc.stream().items());
        let engine = SelectionEngine::new(&timed);
        let content: Vec<_> = timed.iter().filter(|t| t.item.is_content()).collect();
        let anchor = content[anchor % content.len()];

        let mut selection = Selection::of_item(anchor);
        for left in moves {
            let next = if left {
                engine.extend_left(Some(&selection), 0.0)
            } else {
                engine.extend_right(Some(&selection), 0.0)
            };
            selection = next.expect("extending a selection keeps it");
        }

        let left = engine.extend_left(Some(&selection), 0.0).expect("still selected");
        if !same_range(&left, &selection) {
            let back = engine.extend_right(Some(&left), 0.0).expect("still selected");
            prop_assert!(same_range(&back, &selection), "{selection:?} -> {left:?} -> {back:?}");
        }

        let right = engine.extend_right(Some(&selection), 0.0).expect("still selected");
        if !same_range(&right, &selection) {
            let back = engine.extend_left(Some(&right), 0.0).expect("still selected");
            prop_assert!(same_range(&back, &selection), "{selection:?} -> {right:?} -> {back:?}");
        }
    }

    #[test]
    fn selection_always_covers_its_anchor(
        doc in arb_document(),
        anchor in 0..40usize,
        targets in prop::collection::vec(0..40usize, 1..6),
    ) {
        let timed = index(doc.stream().items());
        let engine = SelectionEngine::new(&timed);
        let content: Vec<_> = timed.iter().filter(|t| t.item.is_content()).collect();
        let anchor = content[anchor % content.len()];

        let mut selection = Selection::of_item(anchor);
        for target in targets {
            let item = content[target % content.len()];
            selection = engine.include_fully(Some(&selection), item);
            prop_assert!(selection.contains(anchor));
            prop_assert!(selection.contains(item));
        }
    }
}
