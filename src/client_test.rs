use super::*;
use crate::channel::test_helpers::RecordingChannel;
use crate::client::test_helpers::RecordingView;
use crate::presence::TypingState;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::time::advance;

const WINDOW: Duration = Duration::from_millis(3000);

fn session() -> (
    ChatSession<RecordingChannel, RecordingView>,
    RecordingChannel,
    mpsc::UnboundedReceiver<TimerExpired>,
) {
    let channel = RecordingChannel::default();
    let (session, expired) = ChatSession::new(channel.clone(), RecordingView::default(), WINDOW);
    (session, channel, expired)
}

fn msg(sender: &str, text: &str) -> ChatMessage {
    ChatMessage::new(sender, text)
}

// =============================================================
// Sending
// =============================================================

#[tokio::test(start_paused = true)]
async fn send_emits_message_appends_clears_and_stops_typing() {
    let (mut session, channel, _expired) = session();
    session.set_user_name("Alice");
    session.edit_draft("hello");

    assert!(session.send_current_draft());

    assert_eq!(
        channel.take(),
        vec![
            OutboundEvent::TypingStart("Alice".into()),
            OutboundEvent::Message(msg("Alice", "hello")),
            OutboundEvent::TypingStop("Alice".into()),
        ]
    );
    assert_eq!(session.state().messages(), [msg("Alice", "hello")]);
    assert_eq!(session.state().draft(), "");
    assert_eq!(session.presence().state(), &TypingState::Idle);
    assert_eq!(session.view().appended, vec![(msg("Alice", "hello"), true)]);
}

#[tokio::test(start_paused = true)]
async fn send_while_typing_cancels_the_pending_stop() {
    let (mut session, channel, mut expired) = session();
    session.set_user_name("Alice");
    session.edit_draft("h");
    advance(Duration::from_millis(1000)).await;
    session.send_current_draft();
    channel.take();

    advance(Duration::from_millis(2500)).await;
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }

    assert!(matches!(expired.try_recv(), Err(TryRecvError::Empty)));
    assert!(channel.take().is_empty());
}

#[tokio::test(start_paused = true)]
async fn send_after_idle_stop_does_not_repeat_typing_stop() {
    let (mut session, channel, mut expired) = session();
    session.set_user_name("Alice");
    session.edit_draft("hi");
    let fired = expired.recv().await.expect("timer should fire");
    session.handle_timer_expired(fired);

    session.send_current_draft();

    assert_eq!(
        channel.take(),
        vec![
            OutboundEvent::TypingStart("Alice".into()),
            OutboundEvent::TypingStop("Alice".into()),
            OutboundEvent::Message(msg("Alice", "hi")),
        ]
    );
}

#[tokio::test]
async fn empty_draft_send_is_a_no_op() {
    let (mut session, channel, _expired) = session();
    session.set_user_name("Alice");

    assert!(!session.send_current_draft());

    assert!(channel.take().is_empty());
    assert!(session.state().messages().is_empty());
    assert!(session.view().appended.is_empty());
}

#[tokio::test]
async fn send_without_name_is_a_no_op_and_keeps_draft() {
    let (mut session, channel, _expired) = session();
    session.edit_draft("hello");

    assert!(!session.send_current_draft());

    assert!(channel.take().is_empty());
    assert_eq!(session.state().draft(), "hello");
    assert!(session.state().messages().is_empty());
}

// =============================================================
// Receiving
// =============================================================

#[tokio::test]
async fn received_messages_append_in_arrival_order() {
    let (mut session, _channel, _expired) = session();
    session.set_user_name("Alice");

    session.handle_inbound(InboundEvent::Message(msg("Bob", "hi")));
    session.edit_draft("yo");
    session.send_current_draft();
    session.handle_inbound(InboundEvent::Message(msg("Carol", "hey")));

    assert_eq!(
        session.state().messages(),
        [msg("Bob", "hi"), msg("Alice", "yo"), msg("Carol", "hey")]
    );
}

#[tokio::test]
async fn echoed_send_is_appended_again() {
    let (mut session, _channel, _expired) = session();
    session.set_user_name("Alice");
    session.edit_draft("hello");
    session.send_current_draft();

    session.handle_inbound(InboundEvent::Message(msg("Alice", "hello")));

    assert_eq!(session.state().messages(), [msg("Alice", "hello"), msg("Alice", "hello")]);
    assert_eq!(
        session.view().appended,
        vec![(msg("Alice", "hello"), true), (msg("Alice", "hello"), true)]
    );
}

#[tokio::test]
async fn received_message_from_other_user_is_not_own() {
    let (mut session, _channel, _expired) = session();
    session.set_user_name("Alice");

    session.handle_inbound(InboundEvent::Message(msg("Bob", "hi")));

    assert_eq!(session.view().appended, vec![(msg("Bob", "hi"), false)]);
}

// =============================================================
// Typing line
// =============================================================

#[tokio::test]
async fn typing_list_updates_view_only_on_change() {
    let (mut session, _channel, _expired) = session();
    session.set_user_name("Bob");

    session.handle_inbound(InboundEvent::TypingUserList(vec!["Alice".into(), "Bob".into()]));
    session.handle_inbound(InboundEvent::TypingUserList(vec!["Bob".into(), "Alice".into()]));
    session.handle_inbound(InboundEvent::TypingUserList(vec!["Bob".into()]));

    assert_eq!(session.view().typing_lines, vec!["Alice is typing…".to_owned(), String::new()]);
    assert_eq!(session.typing_display(), "");
}

#[tokio::test]
async fn renaming_refilters_the_typing_line() {
    let (mut session, _channel, _expired) = session();
    session.handle_inbound(InboundEvent::TypingUserList(vec!["Alice".into(), "Bob".into()]));
    assert_eq!(session.typing_display(), "Alice, Bob are typing…");

    session.set_user_name("Bob");

    assert_eq!(session.typing_display(), "Alice is typing…");
    assert_eq!(
        session.view().typing_lines,
        vec!["Alice, Bob are typing…".to_owned(), "Alice is typing…".to_owned()]
    );
}

#[tokio::test]
async fn edit_without_name_updates_draft_silently() {
    let (mut session, channel, _expired) = session();

    session.edit_draft("draft");

    assert_eq!(session.state().draft(), "draft");
    assert!(channel.take().is_empty());
    assert!(!session.presence().is_typing());
}
