//! The bundled chat bot conversation.
//!
//! A baseline `Idle` mode plus one mode per feature:
//!
//! - `StarburstPolice` / `Starburst`: a moderated sub-flow. The police state
//!   gates entry (pass phrase) and exit independently of the feature itself,
//!   and the feature always hands control back to the police.
//! - `Meme`, `Help`, `Fsm`: single-reply modes that return to `Idle` on the
//!   next event.
//! - `WordManage`: browses the word list on entry; the next message edits it
//!   and returns to `Idle`.

mod guards;
mod handlers;
mod words;

pub use words::WordBook;

use crate::builder::{
    guarded_transition, simple_transition, BuildError, StateMachineBuilder, TransitionBuilder,
};
use crate::config::BotConfig;
use crate::engine::{StateMachine, Trigger};
use crate::state_enum;
use std::sync::Arc;

state_enum! {
    /// Conversational modes of the bot.
    pub enum BotState {
        Idle,
        StarburstPolice,
        Starburst,
        Meme,
        Help,
        WordManage,
        Fsm,
    }
}

/// Trigger names, usable with `StateMachine::fire`.
pub mod triggers {
    pub const ADVANCE: &str = "advance";
    pub const EXIT_STARBURST: &str = "exit_starburst";
    pub const CHECK: &str = "check";
    pub const CHECK_END: &str = "check_end";
    pub const STARBURST_END: &str = "starburst_end";
    pub const MANAGE_END: &str = "manage_end";
    pub const GO_BACK: &str = "go_back";
    pub const GO_FSM: &str = "go_fsm";
}

/// Build the bot's state machine.
///
/// `words` is shared with the word-management handlers and is seeded with
/// `config.seed_words`; keep a clone to inspect it from outside.
pub fn build_machine(
    config: &BotConfig,
    words: Arc<WordBook>,
) -> Result<StateMachine<BotState>, BuildError> {
    use triggers::*;

    let commands = &config.commands;
    for word in &config.seed_words {
        words.add(word);
    }
    tracing::debug!(words = words.len(), "word book seeded");

    StateMachineBuilder::new()
        .states(BotState::ALL.iter().copied())
        .initial(BotState::Idle)
        .history_limit(config.history_limit)
        .add_transition(guarded_transition(
            Trigger::on_event(ADVANCE),
            BotState::Idle,
            BotState::StarburstPolice,
            guards::command(&commands.starburst),
        ))
        .add_transition(guarded_transition(
            Trigger::on_event(EXIT_STARBURST),
            BotState::StarburstPolice,
            BotState::Idle,
            guards::command(&commands.exit),
        ))
        .add_transition(guarded_transition(
            Trigger::on_event(CHECK),
            BotState::StarburstPolice,
            BotState::Starburst,
            guards::says_pass_phrase(&config.pass_phrase),
        ))
        .add_transition(simple_transition(
            Trigger::explicit(CHECK_END),
            [BotState::StarburstPolice],
            BotState::Idle,
        ))
        .add_transition(simple_transition(
            Trigger::on_event(STARBURST_END),
            [BotState::Starburst],
            BotState::StarburstPolice,
        ))
        .transition(
            TransitionBuilder::new()
                .trigger(Trigger::on_event(MANAGE_END))
                .from(BotState::WordManage)
                .to(BotState::Idle)
                .handler(handlers::edit_words(Arc::clone(&words), commands)),
        )?
        .add_transition(guarded_transition(
            Trigger::on_event(ADVANCE),
            BotState::Idle,
            BotState::Meme,
            guards::command(&commands.meme),
        ))
        .add_transition(guarded_transition(
            Trigger::on_event(ADVANCE),
            BotState::Idle,
            BotState::WordManage,
            guards::command(&commands.manage),
        ))
        .add_transition(guarded_transition(
            Trigger::on_event(ADVANCE),
            BotState::Idle,
            BotState::Help,
            guards::command(&commands.help),
        ))
        .add_transition(guarded_transition(
            Trigger::on_event(ADVANCE),
            BotState::Idle,
            BotState::Fsm,
            guards::command(&commands.fsm),
        ))
        .add_transition(simple_transition(
            Trigger::on_event(GO_BACK),
            [BotState::Meme, BotState::Help, BotState::Fsm],
            BotState::Idle,
        ))
        .add_transition(simple_transition(
            Trigger::explicit(GO_FSM),
            [BotState::Idle],
            BotState::Fsm,
        ))
        .on_enter(BotState::Idle, handlers::back_to_menu(commands))
        .on_enter(BotState::StarburstPolice, handlers::police_checkpoint(config))
        .on_enter(BotState::Starburst, handlers::starburst(config))
        .on_enter(BotState::Meme, handlers::meme(config))
        .on_enter(BotState::Help, handlers::help_menu(commands))
        .on_enter(BotState::WordManage, handlers::browse_words(words))
        .on_enter(BotState::Fsm, handlers::fsm_diagram(config))
        .build()
}
