use codeview_core::{EditEvent, Message, MessageBundle, MessageCategory};
use codeview_highlight::CodeHighlighter;
use codeview_lang::LanguageConfiguration;
use pretty_assertions::assert_eq;

fn error(summary: &str) -> Message {
    Message::new(MessageCategory::Error, 3, summary).with_description("details")
}

fn apply(
    highlighter: &mut CodeHighlighter,
    text: &mut String,
    range: std::ops::Range<usize>,
    with: &str,
) -> Vec<MessageBundle> {
    let event = EditEvent::apply(text, range, with).unwrap();
    highlighter.text_did_change(text, event).evicted_messages
}

#[test]
fn test_bundle_follows_its_line() {
    let mut text = "one\ntwo\nthree\n".to_string();
    let mut highlighter = CodeHighlighter::new(LanguageConfiguration::swift(), &text);
    let bundle = highlighter.add(error("bad two"), 1).unwrap();

    // Lines inserted above shift the bundle down.
    let evicted = apply(&mut highlighter, &mut text, 0..0, "zero\nhalf\n");
    assert!(evicted.is_empty());
    assert_eq!(highlighter.line_of_bundle(bundle.id), Some(3));
    assert_eq!(highlighter.messages(3).map(|b| b.id), Some(bundle.id));
    assert!(highlighter.messages(1).is_none());

    // Removing lines above shifts it back up.
    let evicted = apply(&mut highlighter, &mut text, 0..5, "");
    assert!(evicted.is_empty());
    assert_eq!(highlighter.line_of_bundle(bundle.id), Some(2));

    // Edits below leave it alone.
    let end = text.len();
    let evicted = apply(&mut highlighter, &mut text, end..end, "four\n");
    assert!(evicted.is_empty());
    assert_eq!(highlighter.line_of_bundle(bundle.id), Some(2));
}

#[test]
fn test_bundle_survives_retokenisation_of_its_line() {
    let mut text = "a\nb\nc\n".to_string();
    let mut highlighter = CodeHighlighter::new(LanguageConfiguration::swift(), &text);
    let bundle = highlighter.add(error("on c"), 2).unwrap();

    // Line 2 is re-lexed because the comment now covers it, but its text is untouched.
    let evicted = apply(&mut highlighter, &mut text, 0..0, "/*");
    assert!(evicted.is_empty());
    assert_eq!(highlighter.messages(2).map(|b| b.id), Some(bundle.id));
    let depth = highlighter
        .lookup(2)
        .and_then(|line| line.info.as_ref())
        .map(|info| info.comment_depth_start);
    assert_eq!(depth, Some(1));
}

#[test]
fn test_bundle_is_evicted_with_its_line() {
    let mut text = "a\nb\nc\n".to_string();
    let mut highlighter = CodeHighlighter::new(LanguageConfiguration::swift(), &text);
    let keep = highlighter.add(error("on a"), 0).unwrap();
    let doomed = highlighter.add(error("on b"), 1).unwrap();

    let evicted = apply(&mut highlighter, &mut text, 2..4, "");
    assert_eq!(text, "a\nc\n");
    assert_eq!(evicted.len(), 1);
    assert_eq!(evicted[0].id, doomed.id);
    assert_eq!(evicted[0].messages, vec![error("on b")]);

    assert_eq!(highlighter.line_of_bundle(keep.id), Some(0));
    assert_eq!(highlighter.line_of_bundle(doomed.id), None);
}

#[test]
fn test_editing_a_line_evicts_its_bundle() {
    let mut text = "let a = 1\n".to_string();
    let mut highlighter = CodeHighlighter::new(LanguageConfiguration::swift(), &text);
    let bundle = highlighter.add(error("unused"), 0).unwrap();

    let evicted = apply(&mut highlighter, &mut text, 4..5, "b");
    assert_eq!(evicted.iter().map(|b| b.id).collect::<Vec<_>>(), vec![bundle.id]);
    assert!(highlighter.messages(0).is_none());
}

#[test]
fn test_messages_without_tokeniser() {
    let mut language = LanguageConfiguration::none();
    language.identifier_regex = Some("[".to_string());
    let mut text = "x\ny".to_string();
    let mut highlighter = CodeHighlighter::new(language, &text);
    assert!(highlighter.tokenizer_error().is_some());

    let bundle = highlighter.add(error("y"), 1).unwrap();
    let evicted = apply(&mut highlighter, &mut text, 0..0, "w\n");
    assert!(evicted.is_empty());
    assert_eq!(highlighter.line_of_bundle(bundle.id), Some(2));
}

#[test]
fn test_typing_after_a_lone_cr_keeps_the_previous_bundle() {
    let mut text = "a\rb\rc".to_string();
    let mut highlighter = CodeHighlighter::new(LanguageConfiguration::swift(), &text);
    let bundle = highlighter.add(error("on a"), 0).unwrap();

    let evicted = apply(&mut highlighter, &mut text, 2..2, "x");
    assert!(evicted.is_empty());
    assert_eq!(highlighter.line_of_bundle(bundle.id), Some(0));

    // A `\n` right after the `\r` does join the lines.
    let evicted = apply(&mut highlighter, &mut text, 2..2, "\n");
    assert_eq!(text, "a\r\nxb\rc");
    assert_eq!(evicted.iter().map(|b| b.id).collect::<Vec<_>>(), vec![bundle.id]);
}
