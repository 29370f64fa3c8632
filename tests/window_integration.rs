//! Integration tests for chatsnip
//!
//! Drives Conversation and PromptWindow together through the send path,
//! the way a chat front end would before each completion request.

use chatsnip::context::{PromptWindow, SNIP_MARKER};
use chatsnip::{ChatError, Conversation, Turn};

#[test]
fn test_system_turn_passes_through_untruncated() {
    let window = PromptWindow::new(4096);

    let fitted = window.fit(&[Turn::assistant("Be helpful")]).unwrap();

    assert_eq!(fitted.prompt, "Be helpful\n");
    assert!(!fitted.was_truncated());
}

#[test]
fn test_first_exchange_prompt() {
    let mut conversation = Conversation::new();
    conversation.push_assistant("sys");
    let window = PromptWindow::new(4096);

    let prompt = conversation.submit("hi", &window).unwrap();

    assert_eq!(prompt, "sys\n[INST] hi [/INST]\n");
    assert_eq!(conversation.len(), 2);
}

#[test]
fn test_streamed_completion_is_committed_on_next_send() {
    let mut conversation = Conversation::new();
    conversation.push_assistant("You are a helpful assistant.");
    let window = PromptWindow::new(4096);

    conversation.submit("name three llama facts", &window).unwrap();

    // Completion streams in between sends
    conversation.append_completion("Llamas hum ");
    conversation.append_completion("to their young.");

    let prompt = conversation.submit("tell me more", &window).unwrap();

    assert!(prompt.contains("Llamas hum to their young."));
    assert!(prompt.ends_with("[INST] tell me more [/INST]\n"));
    assert_eq!(conversation.len(), 4);
    assert_eq!(conversation.completion(), "");
}

#[test]
fn test_long_conversation_is_truncated_and_adopted() {
    let mut conversation = Conversation::new();
    for i in 0..6 {
        let text = "x".repeat(100);
        if i % 2 == 0 {
            conversation.push_assistant(text);
        } else {
            conversation.push_user(text);
        }
    }
    let anchor = conversation.turns()[0].clone();
    let window = PromptWindow::new(250);

    let prompt = conversation.submit("x".repeat(100), &window).unwrap();

    // One eviction pass: the anchor survives, the oldest exchange after
    // it does not, and the prompt carries the elision marker.
    assert!(prompt.starts_with(SNIP_MARKER));
    assert_eq!(conversation.len(), 5);
    assert_eq!(conversation.turns()[0], anchor);
}

#[test]
fn test_oversized_message_reports_too_long_and_keeps_state() {
    let mut conversation = Conversation::new();
    conversation.push_assistant("a".repeat(20_000));
    let window = PromptWindow::new(100);

    let err = conversation.submit("u".repeat(20_000), &window).unwrap_err();

    match err {
        ChatError::PromptTooLong { estimated, max } => {
            assert!(estimated > max);
        }
    }
    assert_eq!(conversation.len(), 1, "failed send must not commit state");
}

#[test]
fn test_fit_is_deterministic() {
    let turns: Vec<Turn> = (0..9)
        .map(|i| {
            if i % 2 == 0 {
                Turn::assistant(format!("answer {}", i).repeat(30))
            } else {
                Turn::user(format!("question {}", i).repeat(30))
            }
        })
        .collect();
    let window = PromptWindow::new(300);

    let first = window.fit(&turns).unwrap();
    let second = window.fit(&turns).unwrap();

    assert_eq!(first, second);
}
