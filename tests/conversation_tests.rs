//! End-to-end conversations with the bundled bot.

use chatmode::bot::{build_machine, triggers, BotState, WordBook};
use chatmode::config::BotConfig;
use chatmode::core::{Event, ReplyToken, SessionId};
use chatmode::engine::{Dispatch, DispatchError, OutboundMessage, PostbackAction};
use chatmode::StateMachine;
use std::sync::Arc;

struct Chat {
    machine: StateMachine<BotState>,
    words: Arc<WordBook>,
    user: SessionId,
    turn: usize,
}

impl Chat {
    fn new() -> Self {
        chatmode::logging::init_tracing();
        let config = BotConfig {
            seed_words: vec!["apple".to_string()],
            ..BotConfig::default()
        };
        let words = Arc::new(WordBook::default());
        let machine = build_machine(&config, Arc::clone(&words)).unwrap();
        Self {
            machine,
            words,
            user: SessionId::from("U123"),
            turn: 0,
        }
    }

    fn token(&mut self) -> ReplyToken {
        self.turn += 1;
        ReplyToken::new(format!("r{}", self.turn))
    }

    fn say(&mut self, text: &str) -> Dispatch<BotState> {
        let event = Event::message(text, self.token());
        self.machine.dispatch(&self.user, &event).unwrap()
    }

    fn press(&mut self, data: &str) -> Dispatch<BotState> {
        let event = Event::postback(data, self.token());
        self.machine.dispatch(&self.user, &event).unwrap()
    }

    fn state(&self) -> BotState {
        self.machine.current_state(&self.user)
    }
}

fn texts(outcome: &Dispatch<BotState>) -> Vec<String> {
    outcome
        .effect()
        .map(|effect| {
            effect
                .reply
                .messages()
                .iter()
                .filter_map(|message| match message {
                    OutboundMessage::Text { text } => Some(text.clone()),
                    OutboundMessage::Buttons { text, .. } => Some(text.clone()),
                    OutboundMessage::Image { .. } => None,
                })
                .collect()
        })
        .unwrap_or_default()
}

#[test]
fn help_menu_offers_every_feature() {
    let mut chat = Chat::new();

    let outcome = chat.say("help");

    assert_eq!(chat.state(), BotState::Help);
    let effect = outcome.effect().unwrap();
    assert_eq!(effect.reply_token, ReplyToken::new("r1"));
    match &effect.reply.messages()[0] {
        OutboundMessage::Buttons { actions, .. } => {
            let data: Vec<&str> = actions.iter().map(|a| a.data.as_str()).collect();
            assert_eq!(data, vec!["starburst", "meme", "manage", "fsm"]);
        }
        other => panic!("Expected buttons, got {other:?}"),
    }
}

#[test]
fn help_buttons_do_not_skip_the_return_to_idle() {
    let mut chat = Chat::new();
    chat.say("help");

    // any event leaves Help, including a feature button
    let outcome = chat.press("meme");
    assert_eq!(chat.state(), BotState::Idle);
    assert!(texts(&outcome)[0].starts_with("Back to the main menu"));

    chat.press("meme");
    assert_eq!(chat.state(), BotState::Meme);
}

#[test]
fn meme_then_back_to_menu() {
    let mut chat = Chat::new();

    let outcome = chat.say("  MEME ");
    assert_eq!(chat.state(), BotState::Meme);
    assert!(matches!(
        outcome.effect().unwrap().reply.messages(),
        [OutboundMessage::Image { .. }]
    ));

    let outcome = chat.say("anything");
    assert_eq!(chat.state(), BotState::Idle);
    assert_eq!(
        texts(&outcome),
        vec!["Back to the main menu. Type 'help' to see what I can do.".to_string()]
    );
}

#[test]
fn starburst_police_round_trip() {
    let mut chat = Chat::new();

    let outcome = chat.say("starburst");
    assert_eq!(chat.state(), BotState::StarburstPolice);
    match &outcome.effect().unwrap().reply.messages()[0] {
        OutboundMessage::Buttons { actions, .. } => {
            assert_eq!(actions, &vec![PostbackAction::new("Leave", "exit")]);
        }
        other => panic!("Expected buttons, got {other:?}"),
    }

    // neither the pass phrase nor exit: the police keeps you waiting
    let outcome = chat.say("let me in");
    assert!(outcome.is_noop());
    assert_eq!(chat.state(), BotState::StarburstPolice);

    let outcome = chat.say("the phrase is C8763");
    assert_eq!(chat.state(), BotState::Starburst);
    assert_eq!(texts(&outcome), vec!["Starburst Stream!".to_string()]);

    let outcome = chat.say("again");
    assert_eq!(chat.state(), BotState::StarburstPolice);
    assert!(texts(&outcome)[0].starts_with("Once more?"));

    chat.press("exit");
    assert_eq!(chat.state(), BotState::Idle);
}

#[test]
fn word_management_edits_the_shared_book() {
    let mut chat = Chat::new();

    // seeded from the configuration, not by hand
    assert_eq!(chat.words.list(), vec!["apple".to_string()]);

    let outcome = chat.say("manage");
    assert_eq!(chat.state(), BotState::WordManage);
    assert_eq!(texts(&outcome)[0], "Words: apple");

    let outcome = chat.say("add kiwi");
    assert_eq!(chat.state(), BotState::Idle);
    assert_eq!(texts(&outcome), vec!["Added 'kiwi'. Words: apple, kiwi".to_string()]);
    assert!(chat.words.contains("kiwi"));

    chat.say("manage");
    let outcome = chat.say("remove apple");
    assert_eq!(texts(&outcome), vec!["Removed 'apple'. Words: kiwi".to_string()]);

    chat.say("manage");
    let outcome = chat.say("never mind");
    assert_eq!(chat.state(), BotState::Idle);
    assert!(texts(&outcome)[0].starts_with("Left word management"));
    assert_eq!(chat.words.list(), vec!["kiwi".to_string()]);
}

#[test]
fn unknown_text_in_idle_is_silent() {
    let mut chat = Chat::new();

    let outcome = chat.say("hello there");

    assert!(outcome.is_noop());
    assert!(outcome.effect().is_none());
    assert_eq!(chat.state(), BotState::Idle);
    // the session now exists even though nothing happened
    assert_eq!(chat.machine.session_count(), 1);
}

#[test]
fn explicit_triggers_fire_on_demand() {
    let mut chat = Chat::new();
    let user = chat.user.clone();

    let event = Event::message("", chat.token());
    let outcome = chat.machine.fire(&user, triggers::GO_FSM, &event).unwrap();
    assert_eq!(outcome.state(), &BotState::Fsm);
    assert!(outcome.effect().is_some());

    chat.say("back");
    chat.say("starburst");
    let event = Event::message("", chat.token());
    chat.machine.fire(&user, triggers::CHECK_END, &event).unwrap();
    assert_eq!(chat.state(), BotState::Idle);

    // check_end only leaves the police state
    let outcome = chat.machine.fire(&user, triggers::CHECK_END, &event).unwrap();
    assert!(outcome.is_noop());

    let error = chat.machine.fire(&user, "teleport", &event).unwrap_err();
    assert!(matches!(error, DispatchError::UnknownTrigger { trigger } if trigger == "teleport"));
}

#[test]
fn explicit_triggers_ignore_free_text() {
    let mut chat = Chat::new();

    // go_fsm is unconditional but explicit, so it never swallows chatter
    assert!(chat.say("whatever").is_noop());
    assert_eq!(chat.state(), BotState::Idle);
}

#[test]
fn history_records_the_conversation() {
    let mut chat = Chat::new();
    chat.say("meme");
    chat.say("ok");
    chat.say("fsm");

    let snapshot = chat.machine.snapshot(&chat.user).unwrap();
    let path: Vec<BotState> = snapshot.history.get_path().into_iter().copied().collect();

    assert_eq!(path, vec![BotState::Idle, BotState::Meme, BotState::Idle, BotState::Fsm]);
    assert_eq!(snapshot.transition_count, 3);
    let triggers: Vec<&str> = snapshot
        .history
        .transitions()
        .map(|t| t.trigger.as_str())
        .collect();
    assert_eq!(triggers, vec!["advance", "go_back", "advance"]);
}
