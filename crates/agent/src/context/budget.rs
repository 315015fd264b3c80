//! Token budgeting for the working sequence.
//!
//! Uses a character-based heuristic: ~4 characters per token, accurate
//! within ~10% for BPE tokenizers on English text. The budgeter prunes the
//! working sequence to fit under 90% of the provider's context window before
//! every model call; the leading system message is never dropped, even when
//! it alone exceeds the threshold.

use swimdeck_core::message::{Message, Role};
use tracing::debug;

/// Estimate the token count for a string.
///
/// Heuristic: 1 token ≈ 4 characters. Rounds up.
pub fn estimate_tokens(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    text.len().div_ceil(4)
}

/// Estimate tokens for a single message including per-message overhead.
///
/// Each message costs ~4 tokens of overhead for role name, delimiters, and
/// formatting markers in the API wire format. Tool-call names and argument
/// JSON count toward the total; they go over the wire like any other text.
pub fn estimate_message_tokens(message: &Message) -> usize {
    let overhead = 4;
    let call_tokens: usize = message
        .tool_calls
        .iter()
        .map(|tc| estimate_tokens(&tc.name) + estimate_tokens(&tc.arguments))
        .sum();
    overhead + estimate_tokens(message.text()) + call_tokens
}

/// Estimate tokens for a slice of messages.
pub fn estimate_sequence_tokens(messages: &[Message]) -> usize {
    messages.iter().map(estimate_message_tokens).sum()
}

/// Prune the sequence to fit under `context_window × 0.9` tokens.
///
/// Removes the oldest prunable message (the first message after the leading
/// system message, or the first message outright if none is system) and
/// retotals until under threshold or only the system message remains. If the
/// system message alone is still over threshold, proceed anyway: persona and
/// instructions outrank strict budget compliance.
pub fn prune_to_fit(mut messages: Vec<Message>, context_window: usize) -> Vec<Message> {
    let threshold = context_window * 9 / 10;
    let mut dropped = 0usize;

    while estimate_sequence_tokens(&messages) > threshold {
        let prunable = match messages.first() {
            Some(first) if first.role == Role::System => {
                if messages.len() > 1 {
                    1
                } else {
                    break;
                }
            }
            Some(_) => 0,
            None => break,
        };
        messages.remove(prunable);
        dropped += 1;
    }

    if dropped > 0 {
        debug!(
            dropped,
            remaining = messages.len(),
            threshold,
            "Pruned oldest messages to fit context window"
        );
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_zero() {
        assert_eq!(estimate_tokens(""), 0);
    }

    #[test]
    fn four_chars_is_one_token() {
        assert_eq!(estimate_tokens("test"), 1);
    }

    #[test]
    fn five_chars_rounds_up() {
        assert_eq!(estimate_tokens("hello"), 2);
    }

    #[test]
    fn message_includes_overhead() {
        let msg = Message::user("test"); // 1 token + 4 overhead
        assert_eq!(estimate_message_tokens(&msg), 5);
    }

    #[test]
    fn tool_call_arguments_are_counted() {
        let mut msg = Message::assistant("");
        msg.content = None;
        msg.tool_calls.push(swimdeck_core::message::ToolCallRequest {
            id: "call_1".into(),
            name: "get_swimmer_profile".into(), // 19 chars → 5 tokens
            arguments: r#"{"swimmer_id":"s1"}"#.into(), // 19 chars → 5 tokens
        });
        assert_eq!(estimate_message_tokens(&msg), 4 + 5 + 5);
    }

    #[test]
    fn under_threshold_is_unchanged() {
        let messages = vec![
            Message::system("Be helpful."),
            Message::user("Hello"),
            Message::assistant("Hi! How can I help?"),
        ];
        let pruned = prune_to_fit(messages.clone(), 16_384);
        assert_eq!(pruned.len(), messages.len());
        for (a, b) in pruned.iter().zip(messages.iter()) {
            assert_eq!(a.id, b.id);
        }
    }

    #[test]
    fn oldest_non_system_dropped_first() {
        // Each user message: 100 chars → 25 tokens + 4 overhead = 29.
        // System: 8 chars → 2 + 4 = 6. Three turns: 6 + 87 = 93 total.
        // Window 100 → threshold 90, so exactly one drop gets us to 64.
        let messages = vec![
            Message::system("persona!"),
            Message::user("a".repeat(100)),
            Message::user("b".repeat(100)),
            Message::user("c".repeat(100)),
        ];
        let pruned = prune_to_fit(messages, 100);
        assert_eq!(pruned.len(), 3);
        assert_eq!(pruned[0].role, Role::System);
        assert!(pruned[1].text().starts_with('b'));
        assert!(pruned[2].text().starts_with('c'));
    }

    #[test]
    fn system_message_never_dropped() {
        let messages = vec![
            Message::system("x".repeat(4000)), // ~1004 tokens on its own
            Message::user("y".repeat(4000)),
        ];
        let pruned = prune_to_fit(messages, 100);
        assert_eq!(pruned.len(), 1);
        assert_eq!(pruned[0].role, Role::System);
        // Over threshold but returned anyway.
        assert!(estimate_sequence_tokens(&pruned) > 90);
    }

    #[test]
    fn no_system_message_prunes_from_the_front() {
        let messages = vec![
            Message::user("a".repeat(400)),
            Message::user("b".repeat(400)),
            Message::user("c".repeat(40)),
        ];
        let pruned = prune_to_fit(messages, 100);
        assert_eq!(pruned.len(), 1);
        assert!(pruned[0].text().starts_with('c'));
    }

    #[test]
    fn empty_sequence_is_fine() {
        let pruned = prune_to_fit(Vec::new(), 100);
        assert!(pruned.is_empty());
    }
}
