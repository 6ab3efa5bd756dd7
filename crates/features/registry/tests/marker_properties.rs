use mgkit_registry::marker::{MarkerPair, TextBuffer};
use proptest::prelude::*;

const PAIR: MarkerPair = MarkerPair::new("// [START]", "// [END]");

fn body_line() -> impl Strategy<Value = String> {
    "[a-z ]{0,12}".prop_map(|s| format!("line {s}"))
}

fn document() -> impl Strategy<Value = (Vec<String>, Vec<String>, Vec<String>)> {
    (
        prop::collection::vec(body_line(), 0..5),
        prop::collection::vec(body_line(), 0..5),
        prop::collection::vec(body_line(), 0..5),
    )
}

fn assemble(before: &[String], inside: &[String], after: &[String]) -> Vec<String> {
    let mut lines = before.to_vec();
    lines.push(PAIR.start.to_owned());
    lines.extend_from_slice(inside);
    lines.push(PAIR.end.to_owned());
    lines.extend_from_slice(after);
    lines
}

proptest! {
    #[test]
    fn insert_line_adds_exactly_one_line_in_order(
        (before, inside, after) in document(),
        new_line in "insert [a-z]{1,8}",
    ) {
        let mut buffer = TextBuffer::parse(&assemble(&before, &inside, &after).join("\n"));
        prop_assert!(buffer.insert_line(PAIR, &new_line).unwrap());

        let mut expected_inside = inside.clone();
        expected_inside.push(new_line.clone());
        let expected = assemble(&before, &expected_inside, &after);
        prop_assert_eq!(buffer.lines(), expected.as_slice());

        let snapshot = buffer.clone();
        prop_assert!(!buffer.insert_line(PAIR, &new_line).unwrap());
        prop_assert_eq!(buffer, snapshot);
    }

    #[test]
    fn insert_block_is_idempotent_on_identity(
        (before, inside, after) in document(),
        id in "[a-z]{1,8}",
    ) {
        let identity = format!("id: '{id}',");
        let block = vec!["  Entry(".to_owned(), format!("    {identity}"), "  ),".to_owned()];
        let mut buffer = TextBuffer::parse(&assemble(&before, &inside, &after).join("\n"));

        prop_assert!(buffer.insert_block(PAIR, &block, &identity).unwrap());
        let mut expected_inside = inside.clone();
        expected_inside.extend(block.iter().cloned());
        let expected = assemble(&before, &expected_inside, &after);
        prop_assert_eq!(buffer.lines(), expected.as_slice());

        let rendered = buffer.render();
        prop_assert!(!buffer.insert_block(PAIR, &block, &identity).unwrap());
        prop_assert_eq!(buffer.render(), rendered);
    }
}
