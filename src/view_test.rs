use super::*;

#[test]
fn own_messages_are_marked() {
    let msg = ChatMessage::new("Alice", "hi");
    assert_eq!(format_message(&msg, true), "Alice (you): hi");
    assert_eq!(format_message(&msg, false), "Alice: hi");
}

#[test]
fn multiline_text_is_indented() {
    let msg = ChatMessage::new("Bob", "line one\nline two");
    assert_eq!(format_message(&msg, false), "Bob: line one\n    line two");
}

#[test]
fn typing_line_reports_empty_set() {
    assert_eq!(format_typing_line(""), "* nobody is typing");
    assert_eq!(format_typing_line("Alice is typing…"), "* Alice is typing…");
}

#[test]
fn view_writes_each_update_on_its_own_line() {
    let mut view = TerminalView::new(Vec::new());
    view.message_appended(&ChatMessage::new("Bob", "hey"), false);
    view.typing_changed("Bob is typing…");

    let out = String::from_utf8(view.into_inner()).expect("utf8");
    assert_eq!(out, "Bob: hey\n* Bob is typing…\n");
}
