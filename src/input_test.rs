use super::*;

#[test]
fn blank_lines_are_ignored() {
    assert_eq!(parse_command(""), None);
    assert_eq!(parse_command("   \n"), None);
}

#[test]
fn plain_text_is_said() {
    assert_eq!(parse_command("hello there\n"), Some(Command::Say("hello there".into())));
}

#[test]
fn name_argument_is_trimmed() {
    assert_eq!(parse_command("/name  Alice "), Some(Command::SetName("Alice".into())));
    assert_eq!(parse_command("/name"), Some(Command::SetName(String::new())));
}

#[test]
fn draft_keeps_argument_verbatim() {
    assert_eq!(parse_command("/draft  two  spaces"), Some(Command::EditDraft(" two  spaces".into())));
    assert_eq!(parse_command("/draft"), Some(Command::EditDraft(String::new())));
}

#[test]
fn simple_commands_parse() {
    assert_eq!(parse_command("/send"), Some(Command::Send));
    assert_eq!(parse_command("/help"), Some(Command::Help));
    assert_eq!(parse_command("/quit\r\n"), Some(Command::Quit));
    assert_eq!(parse_command("/exit"), Some(Command::Quit));
}

#[test]
fn double_slash_escapes_a_leading_slash() {
    assert_eq!(parse_command("//shrug"), Some(Command::Say("/shrug".into())));
}

#[test]
fn unknown_commands_are_reported() {
    assert_eq!(parse_command("/dance now"), Some(Command::Unknown("dance".into())));
}

#[test]
fn help_lists_every_command() {
    for command in ["/name", "/draft", "/send", "/help", "/quit", "/exit"] {
        assert!(HELP.contains(command), "help is missing {command}");
    }
}
