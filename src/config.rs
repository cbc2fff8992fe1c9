//! Configuration for the bundled conversation.
//!
//! Every field has a default, so a partial JSON document only needs to name
//! what it changes.

use crate::core::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {}", summarize(.problems))]
    Invalid { problems: Vec<ConfigProblem> },
}

/// One reason a configuration is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigProblem {
    #[error("command '{command}' is empty")]
    EmptyCommand { command: &'static str },

    #[error("command '{command}' has surrounding whitespace in '{keyword}'")]
    PaddedKeyword {
        command: &'static str,
        keyword: String,
    },

    #[error("commands '{first}' and '{second}' share the keyword '{keyword}'")]
    SharedKeyword {
        first: &'static str,
        second: &'static str,
        keyword: String,
    },

    #[error("pass_phrase is empty")]
    EmptyPassPhrase,

    #[error("history_limit must be at least 1")]
    ZeroHistoryLimit,
}

fn summarize(problems: &[ConfigProblem]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

type Check = Validation<(), NonEmptyVec<ConfigProblem>>;

/// Keywords that switch the conversation into a mode.
///
/// Each keyword is accepted as typed text (case-insensitive) or as postback
/// data from a menu button.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Commands {
    pub starburst: String,
    pub exit: String,
    pub meme: String,
    pub manage: String,
    pub help: String,
    pub fsm: String,
}

impl Default for Commands {
    fn default() -> Self {
        Self {
            starburst: "starburst".to_string(),
            exit: "exit".to_string(),
            meme: "meme".to_string(),
            manage: "manage".to_string(),
            help: "help".to_string(),
            fsm: "fsm".to_string(),
        }
    }
}

impl Commands {
    fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("starburst", self.starburst.as_str()),
            ("exit", self.exit.as_str()),
            ("meme", self.meme.as_str()),
            ("manage", self.manage.as_str()),
            ("help", self.help.as_str()),
            ("fsm", self.fsm.as_str()),
        ]
    }
}

/// Image locations used in replies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Media {
    pub starburst_image: String,
    pub meme_image: String,
    pub fsm_diagram: String,
}

impl Default for Media {
    fn default() -> Self {
        Self {
            starburst_image: "https://i.imgur.com/starburst.jpg".to_string(),
            meme_image: "https://i.imgur.com/meme.jpg".to_string(),
            fsm_diagram: "https://localhost:8000/show-fsm".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub commands: Commands,
    /// Phrase the starburst police wants to hear before letting you through
    pub pass_phrase: String,
    pub media: Media,
    /// Initial content of the shared word list
    pub seed_words: Vec<String>,
    pub history_limit: usize,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            commands: Commands::default(),
            pass_phrase: "C8763".to_string(),
            media: Media::default(),
            seed_words: Vec::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl BotConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Report every problem at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut checks: Vec<Check> = Vec::new();

        let entries = self.commands.entries();
        for (position, &(command, keyword)) in entries.iter().enumerate() {
            if keyword.trim().is_empty() {
                checks.push(Validation::fail(ConfigProblem::EmptyCommand { command }));
                continue;
            }
            checks.push(require(keyword == keyword.trim(), || {
                ConfigProblem::PaddedKeyword {
                    command,
                    keyword: keyword.to_string(),
                }
            }));

            let clash = entries[..position]
                .iter()
                .find(|(_, other)| other.trim().eq_ignore_ascii_case(keyword.trim()));
            if let Some(&(first, _)) = clash {
                checks.push(Validation::fail(ConfigProblem::SharedKeyword {
                    first,
                    second: command,
                    keyword: keyword.to_string(),
                }));
            }
        }

        checks.push(require(!self.pass_phrase.is_empty(), || {
            ConfigProblem::EmptyPassPhrase
        }));
        checks.push(require(self.history_limit > 0, || {
            ConfigProblem::ZeroHistoryLimit
        }));

        match Validation::all_vec(checks).map(|_| ()) {
            Validation::Success(()) => Ok(()),
            Validation::Failure(problems) => Err(ConfigError::Invalid {
                problems: problems.iter().cloned().collect(),
            }),
        }
    }
}

fn require<F>(ok: bool, problem: F) -> Check
where
    F: FnOnce() -> ConfigProblem,
{
    if ok {
        Validation::success(())
    } else {
        Validation::fail(problem())
    }
}
