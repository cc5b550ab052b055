use super::*;
use pretty_assertions::assert_eq;

fn labels(message: &Message<char>) -> Vec<&str> {
    message.expected.iter().map(String::as_str).collect()
}

#[test]
fn test_merge_same_position_unions_labels() {
    let a = Message::new(3, Some('x')).with_expected("digit");
    let b = Message::new(3, Some('x'))
        .with_expected("letter")
        .with_expected("digit");

    let merged = a.merge(b);
    assert_eq!(merged.position, 3);
    assert_eq!(labels(&merged), vec!["digit", "letter"]);
}

#[test]
fn test_merge_prefers_further_position() {
    let near = Message::new(1, Some('a')).with_expected("near");
    let far = Message::new(4, None).with_expected("far");

    assert_eq!(near.clone().merge(far.clone()), far);
    assert_eq!(far.clone().merge(near), far);
}

#[test]
fn test_relabel_replaces_all_labels() {
    let message = Message::new(0, Some('?'))
        .with_expected("'a'")
        .with_expected("'b'")
        .relabel("identifier");
    assert_eq!(labels(&message), vec!["identifier"]);
}

#[test]
fn test_message_at_state() {
    let state = State::from("ab").advance();
    let message = Message::expecting(&state, "digit");
    assert_eq!(message.position, 1);
    assert_eq!(message.unexpected, Some('b'));

    let end = Message::at(&state.advance());
    assert!(end.is_at_end());
}

#[test]
fn test_display() {
    let one = Message::new(2, Some('z')).with_expected("integer");
    assert_eq!(one.to_string(), "position 2: unexpected 'z'; expected `integer`");

    let two: Message<char> = Message::new(0, None)
        .with_expected("b")
        .with_expected("a");
    assert_eq!(
        two.to_string(),
        "position 0: unexpected end of input; expected `a` or `b`"
    );

    let three = Message::new(5, Some(')'))
        .with_expected("number")
        .with_expected("'('")
        .with_expected("'-'");
    assert_eq!(
        three.to_string(),
        "position 5: unexpected ')'; expected `'('`, `'-'`, or `number`"
    );

    let bare: Message<char> = Message::new(1, Some('q'));
    assert_eq!(bare.to_string(), "position 1: unexpected 'q'");
}

#[test]
fn test_format_expected_empty() {
    let message: Message<char> = Message::new(0, None);
    assert_eq!(message.format_expected(), "nothing");
}
