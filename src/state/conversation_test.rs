use super::*;

// =============================================================
// Defaults
// =============================================================

#[test]
fn conversation_default_is_inactive_and_empty() {
    let state = ConversationState::default();
    assert!(!state.is_active());
    assert!(state.messages().is_empty());
}

// =============================================================
// push_user
// =============================================================

#[test]
fn push_user_rejects_empty_text() {
    let mut state = ConversationState::default();
    assert!(!state.push_user(""));
    assert!(state.messages().is_empty());
}

#[test]
fn push_user_rejects_whitespace_only_text() {
    let mut state = ConversationState::default();
    assert!(!state.push_user("   "));
    assert!(state.messages().is_empty());
}

#[test]
fn push_user_appends_exactly_one_message() {
    let mut state = ConversationState::default();
    assert!(state.push_user("hi"));
    assert_eq!(state.messages().len(), 1);
    assert_eq!(state.messages()[0].text, "hi");
    assert!(state.messages()[0].is_user);
}

// =============================================================
// push_assistant display-text resolution
// =============================================================

#[test]
fn push_assistant_prefers_answer_field() {
    let mut state = ConversationState::default();
    state.push_assistant(&serde_json::json!({ "answer": "42" }));
    assert_eq!(state.messages()[0].text, "42");
    assert!(!state.messages()[0].is_user);
}

#[test]
fn push_assistant_falls_back_to_message_field() {
    let mut state = ConversationState::default();
    state.push_assistant(&serde_json::json!({ "message": "hi" }));
    assert_eq!(state.messages()[0].text, "hi");
}

#[test]
fn push_assistant_answer_wins_over_message() {
    let mut state = ConversationState::default();
    state.push_assistant(&serde_json::json!({ "answer": "a", "message": "m" }));
    assert_eq!(state.messages()[0].text, "a");
}

#[test]
fn push_assistant_stringifies_unknown_payloads() {
    let mut state = ConversationState::default();
    state.push_assistant(&serde_json::json!({ "foo": 1 }));
    assert_eq!(state.messages().len(), 1);
    assert!(state.messages()[0].text.contains("foo"));
}

// =============================================================
// Session transitions
// =============================================================

#[test]
fn start_session_activates() {
    let mut state = ConversationState::default();
    state.start_session();
    assert!(state.is_active());
}

#[test]
fn reset_deactivates_and_clears_together() {
    let mut state = ConversationState::default();
    state.start_session();
    state.push_user("question");
    state.push_assistant(&serde_json::json!({ "answer": "reply" }));
    state.reset();
    assert!(!state.is_active());
    assert!(state.messages().is_empty());
}

#[test]
fn reset_on_fresh_state_is_a_no_op() {
    let mut state = ConversationState::default();
    state.reset();
    assert!(!state.is_active());
    assert!(state.messages().is_empty());
}

#[test]
fn messages_keep_insertion_order() {
    let mut state = ConversationState::default();
    state.push_user("first");
    state.push_assistant(&serde_json::json!({ "answer": "second" }));
    state.push_user("third");
    let texts: Vec<&str> = state.messages().iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
}
