//! Conversation assembly — building the working sequence for one request.
//!
//! The caller supplies prior turns (user/assistant/tool roles only); this
//! module prepends the instruction preamble: persona, the coach's first name,
//! the current date, and guidance on chart-vs-prose answers and name→id
//! resolution. Pure construction, no side effects.

use chrono::{DateTime, Utc};
use swimdeck_core::message::Message;
use swimdeck_core::roster::Coach;

/// Build the instruction preamble for the given coach at the given time.
fn instruction_preamble(coach: &Coach, now: DateTime<Utc>) -> String {
    format!(
        "You are a helpful assistant for a swimming coach. \
         The current date is {date}. The user who is talking with you \
         (who is the coach) is {name}.\n\n\
         When the coach explicitly asks for a chart or a visualization of \
         data, call the display_chart function with the relevant data instead \
         of describing it in prose. Otherwise answer in prose.\n\n\
         When the coach refers to a swimmer by name, resolve the name to an \
         internal ID with get_swimmer_id_by_name before calling any function \
         that requires a swimmer_id. If the resolution reports multiple \
         matching swimmers, ask the coach which one they mean instead of \
         guessing.",
        date = now.format("%Y-%m-%d"),
        name = coach.first_name,
    )
}

/// Assemble the working sequence: `[instruction, ...history]`.
///
/// The history is taken as-is; the caller never supplies a system message,
/// so the preamble is always the single leading one.
pub fn assemble(history: &[Message], coach: &Coach, now: DateTime<Utc>) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(Message::system(instruction_preamble(coach, now)));
    messages.extend(history.iter().cloned());
    messages
}
