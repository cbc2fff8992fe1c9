//! Guards used by the conversation.

use super::BotState;
use crate::core::Guard;

/// Keyword typed as text or pressed as a menu button.
pub fn command(keyword: &str) -> Guard<BotState> {
    Guard::command(keyword).or(Guard::postback(keyword))
}

/// The starburst police lets you through once you say the pass phrase.
pub fn says_pass_phrase(phrase: &str) -> Guard<BotState> {
    Guard::text_contains(phrase)
}
