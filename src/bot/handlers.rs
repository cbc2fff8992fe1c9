//! Reply composition for each conversational mode.

use super::words::WordBook;
use super::BotState;
use crate::config::{BotConfig, Commands};
use crate::engine::{HandlerContext, HandlerResult, OutboundMessage, PostbackAction, Reply};
use std::sync::Arc;

pub fn back_to_menu(
    commands: &Commands,
) -> impl Fn(&HandlerContext<'_, BotState>) -> HandlerResult + Send + Sync + 'static {
    let text = format!(
        "Back to the main menu. Type '{}' to see what I can do.",
        commands.help
    );
    move |_ctx: &HandlerContext<'_, BotState>| Ok(Some(Reply::text(text.clone())))
}

pub fn police_checkpoint(
    config: &BotConfig,
) -> impl Fn(&HandlerContext<'_, BotState>) -> HandlerResult + Send + Sync + 'static {
    let exit = config.commands.exit.clone();
    move |ctx: &HandlerContext<'_, BotState>| {
        let text = match ctx.from {
            BotState::Starburst => "Once more? Say the pass phrase again, or leave.",
            _ => "Starburst police! Say the pass phrase to continue, or leave.",
        };
        Ok(Some(Reply::buttons(
            "Starburst police",
            text,
            vec![PostbackAction::new("Leave", exit.clone())],
        )))
    }
}

pub fn starburst(
    config: &BotConfig,
) -> impl Fn(&HandlerContext<'_, BotState>) -> HandlerResult + Send + Sync + 'static {
    let image = config.media.starburst_image.clone();
    move |_ctx: &HandlerContext<'_, BotState>| {
        Ok(Some(Reply::image(image.clone()).then(OutboundMessage::Text {
            text: "Starburst Stream!".to_string(),
        })))
    }
}

pub fn meme(
    config: &BotConfig,
) -> impl Fn(&HandlerContext<'_, BotState>) -> HandlerResult + Send + Sync + 'static {
    let image = config.media.meme_image.clone();
    move |_ctx: &HandlerContext<'_, BotState>| Ok(Some(Reply::image(image.clone())))
}

pub fn help_menu(
    commands: &Commands,
) -> impl Fn(&HandlerContext<'_, BotState>) -> HandlerResult + Send + Sync + 'static {
    let actions = vec![
        PostbackAction::new("Starburst", commands.starburst.clone()),
        PostbackAction::new("Meme", commands.meme.clone()),
        PostbackAction::new("Word list", commands.manage.clone()),
        PostbackAction::new("State diagram", commands.fsm.clone()),
    ];
    move |_ctx: &HandlerContext<'_, BotState>| {
        Ok(Some(Reply::buttons(
            "Help",
            "Pick a feature or type its keyword.",
            actions.clone(),
        )))
    }
}

pub fn fsm_diagram(
    config: &BotConfig,
) -> impl Fn(&HandlerContext<'_, BotState>) -> HandlerResult + Send + Sync + 'static {
    let url = config.media.fsm_diagram.clone();
    move |_ctx: &HandlerContext<'_, BotState>| Ok(Some(Reply::image(url.clone())))
}

/// Shows the word list when word management starts.
pub fn browse_words(
    words: Arc<WordBook>,
) -> impl Fn(&HandlerContext<'_, BotState>) -> HandlerResult + Send + Sync + 'static {
    move |_ctx: &HandlerContext<'_, BotState>| {
        Ok(Some(Reply::text(list_text(&words)).then(OutboundMessage::Text {
            text: "Send 'add <word>' or 'remove <word>'. Anything else leaves.".to_string(),
        })))
    }
}

/// Applies the edit carried by the message that ends word management.
pub fn edit_words(
    words: Arc<WordBook>,
    commands: &Commands,
) -> impl Fn(&HandlerContext<'_, BotState>) -> HandlerResult + Send + Sync + 'static {
    let leave = format!("Left word management. Type '{}' for the menu.", commands.help);
    move |ctx: &HandlerContext<'_, BotState>| {
        let text = ctx.event.text().map(str::trim).unwrap_or_default();
        let reply = match WordEdit::parse(text) {
            Some(WordEdit::Add(word)) if words.add(word) => {
                format!("Added '{word}'. {}", list_text(&words))
            }
            Some(WordEdit::Add(word)) => format!("'{word}' is already in the list."),
            Some(WordEdit::Remove(word)) if words.remove(word) => {
                format!("Removed '{word}'. {}", list_text(&words))
            }
            Some(WordEdit::Remove(word)) => format!("'{word}' is not in the list."),
            None => leave.clone(),
        };
        Ok(Some(Reply::text(reply)))
    }
}

#[derive(Debug, PartialEq)]
enum WordEdit<'a> {
    Add(&'a str),
    Remove(&'a str),
}

impl<'a> WordEdit<'a> {
    fn parse(text: &'a str) -> Option<Self> {
        let (verb, word) = text.split_once(char::is_whitespace)?;
        let word = word.trim();
        if word.is_empty() {
            return None;
        }
        match verb.to_ascii_lowercase().as_str() {
            "add" => Some(Self::Add(word)),
            "remove" | "delete" => Some(Self::Remove(word)),
            _ => None,
        }
    }
}

fn list_text(words: &WordBook) -> String {
    let list = words.list();
    if list.is_empty() {
        "The word list is empty.".to_string()
    } else {
        format!("Words: {}", list.join(", "))
    }
}
