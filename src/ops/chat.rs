//! Canned companion replies.
//!
//! The companion is not a conversational model. It scans the message for a
//! handful of keywords and answers with a fixed line; the first matching rule
//! wins, so a message mentioning both anxiety and sleep gets the anxiety reply.

/// Opening line shown before the user says anything.
pub const GREETING: &str = "Hi! I'm your wellness companion. How are you feeling today?";

/// Suggested first messages.
pub const QUICK_REPLIES: [&str; 4] = [
    "I feel anxious",
    "I need motivation",
    "Tips for better sleep",
    "Feeling stressed",
];

const FALLBACK_REPLY: &str = "Thank you for sharing. I'm here to support you. \
Would you like some wellness tips or exercises that might help?";

// (triggers, reply), checked in order
const RULES: &[(&[&str], &str)] = &[
    (
        &["anxious", "anxiety"],
        "I understand anxiety can be tough. Try taking some deep breaths. \
Would you like me to guide you through a breathing exercise?",
    ),
    (
        &["stress"],
        "Stress is common, but manageable. Have you tried journaling or taking a short walk? \
I'm here to help you find what works best.",
    ),
    (
        &["sleep"],
        "Good sleep is crucial for mental health. Try maintaining a consistent schedule \
and avoiding screens before bed. Check out our sleep tips section!",
    ),
    (
        &["motivation", "motivate"],
        "Remember: progress, not perfection. Every small step counts. \
You're doing better than you think!",
    ),
];

/// Picks the reply for a user message.
///
/// Matching is a case-insensitive substring search.
///
/// ```
/// use wellspring::ops::chat::reply;
///
/// assert!(reply("I feel so STRESSED").starts_with("Stress is common"));
/// assert!(reply("hello").starts_with("Thank you for sharing"));
/// ```
pub fn reply(input: &str) -> &'static str {
    let input = input.to_lowercase();
    RULES
        .iter()
        .find(|(triggers, _)| triggers.iter().any(|trigger| input.contains(trigger)))
        .map(|(_, response)| *response)
        .unwrap_or(FALLBACK_REPLY)
}
