//! Scenario tests for the query algebra and the render coalescer

use pretty_assertions::assert_eq;
use transcript_core::{
    render_segments, Item, ItemStream, RenderKind, RenderSegment, Sequence, StructureRule,
};

fn two_words() -> Vec<Item> {
    vec![
        Item::paragraph_start("A"),
        Item::word("good", "S", 0.0, 0.5),
        Item::word("morning", "S", 0.5, 0.5),
        Item::paragraph_end(),
    ]
}

#[test]
fn silence_is_found_inside_and_not_at_stream_end() {
    let stream = ItemStream::from_items(vec![
        Item::paragraph_start("A"),
        Item::silence("S", 0.0, 1.0),
        Item::paragraph_end(),
    ]);

    let inside = stream.timed().items_at_time(0.5);
    assert_eq!(inside.len(), 1);
    assert_eq!(inside[0].item, Item::silence("S", 0.0, 1.0));
    assert_eq!(inside[0].absolute_index, 1);

    assert!(stream.timed().items_at_time(1.0).is_empty());
}

#[test]
fn contiguous_words_render_as_one_segment() {
    let stream = ItemStream::from_items(two_words());
    let segments = render_segments(stream.timed()).unwrap();
    assert_eq!(segments, vec![RenderSegment::media(0.0, 1.0, "S", 0.0, "A")]);
}

#[test]
fn inserted_silence_breaks_the_segment() {
    let mut items = two_words();
    items.insert(2, Item::artificial_silence(0.3));
    let stream = ItemStream::from_items(items);

    let segments = render_segments(stream.timed()).unwrap();
    let kinds: Vec<RenderKind> = segments.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![RenderKind::Media, RenderKind::Silence, RenderKind::Media]
    );
    assert!((segments[2].absolute_start - 0.8).abs() < 1e-9);
    assert_eq!(segments[2].source_offset, Some(0.5));
}

#[test]
fn sliced_selection_renders_only_its_span() {
    let stream = ItemStream::from_items(two_words());
    let segments: Result<Vec<_>, _> = stream
        .timed()
        .exact_from(0.25)
        .exact_until(0.75)
        .render_segments()
        .collect();
    let segments = segments.unwrap();

    assert_eq!(segments.len(), 1);
    assert!((segments[0].absolute_start - 0.25).abs() < 1e-9);
    assert!((segments[0].duration - 0.5).abs() < 1e-9);
    assert_eq!(segments[0].source_offset, Some(0.25));
}

#[test]
fn filter_and_map_compose_before_collect() {
    let stream = ItemStream::from_items(vec![
        Item::paragraph_start("A"),
        Item::word("um", "S", 0.0, 0.25),
        Item::word("hello", "S", 0.25, 0.5),
        Item::silence("S", 0.75, 0.25),
        Item::paragraph_end(),
    ]);

    let cleaned = stream
        .timed()
        .filter(|t| t.item.text() != Some("um"))
        .map(|mut t| {
            if let Item::Word { text, .. } = &mut t.item {
                *text = text.to_uppercase();
            }
            t
        })
        .collect();

    assert_eq!(
        cleaned.items(),
        &[
            Item::paragraph_start("A"),
            Item::word("HELLO", "S", 0.25, 0.5),
            Item::silence("S", 0.75, 0.25),
            Item::paragraph_end(),
        ]
    );
    assert!(cleaned.validate().is_ok());
}

#[test]
fn orphan_content_is_reported_by_the_coalescer() {
    let stream = ItemStream::from_items(vec![
        Item::word("lost", "S", 0.0, 1.0),
        Item::paragraph_start("A"),
        Item::paragraph_end(),
    ]);
    let err = render_segments(stream.timed()).unwrap_err();
    assert_eq!(err.rule, StructureRule::ContentOutsideParagraph);
    assert_eq!(stream.validate().unwrap_err().rule, StructureRule::MissingLeadingStart);
}

#[test]
fn generic_sequences_work_on_plain_values() {
    let doubled: Vec<u32> = Sequence::new(vec![1, 2, 3])
        .map(|n| n * 2)
        .chain(vec![10])
        .to_vec();
    assert_eq!(doubled, vec![2, 4, 6, 10]);
}

#[test]
fn paragraph_view_summarises_document() {
    let stream = ItemStream::from_items(vec![
        Item::paragraph_start("Ann"),
        Item::word("hi", "S", 0.0, 1.0),
        Item::paragraph_end(),
        Item::paragraph_start("Bob"),
        Item::word("hey", "S", 1.0, 1.0),
        Item::word("there", "S", 2.0, 1.0),
        Item::paragraph_end(),
    ]);
    let paragraphs = stream.paragraphs();
    assert_eq!(paragraphs.len(), 2);
    assert_eq!(paragraphs[1].text(), "hey there");
    assert!((paragraphs[1].absolute_start - 1.0).abs() < 1e-9);
    assert_eq!(stream.speakers(), vec!["Ann", "Bob"]);
}
