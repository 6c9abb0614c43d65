//! Per-user guessing game state machine.
//!
//! The engine is synchronous and does no I/O: every operation returns the
//! chat replies to send, and delivering them is the dispatcher's job.

use std::collections::HashMap;

use crate::{
    error::GuessError,
    messages::{Catalog, Lang, Messages, format_with},
    random::{RandomSource, ThreadRandom},
};

/// Identifies one player's conversation: a user inside a chat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub chat_id: i64,
    pub user_id: u64,
}

impl SessionKey {
    pub fn new(chat_id: i64, user_id: u64) -> Self {
        Self { chat_id, user_id }
    }
}

/// Discrete phase of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    AwaitingMinimum,
    AwaitingMaximum,
    Guessing,
    AwaitingReplay,
}

/// Committed parameters of a round in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round {
    pub minimum: i64,
    pub maximum: i64,
    pub secret: i64,
    pub tries: u32,
}

impl Round {
    fn contains(&self, guess: i64) -> bool {
        (self.minimum..=self.maximum).contains(&guess)
    }
}

/// State of a single game for a user in a chat.
///
/// Each variant carries only the fields that exist in that stage, so a
/// secret is present exactly while guessing or waiting for a replay answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Session {
    AwaitingMinimum,
    AwaitingMaximum { minimum: i64 },
    Guessing(Round),
    AwaitingReplay(Round),
}

impl Session {
    pub fn stage(&self) -> Stage {
        match self {
            Session::AwaitingMinimum => Stage::AwaitingMinimum,
            Session::AwaitingMaximum { .. } => Stage::AwaitingMaximum,
            Session::Guessing(_) => Stage::Guessing,
            Session::AwaitingReplay(_) => Stage::AwaitingReplay,
        }
    }

    pub fn round(&self) -> Option<&Round> {
        match self {
            Session::Guessing(round) | Session::AwaitingReplay(round) => Some(round),
            _ => None,
        }
    }

    pub fn minimum(&self) -> Option<i64> {
        match self {
            Session::AwaitingMaximum { minimum } => Some(*minimum),
            _ => self.round().map(|r| r.minimum),
        }
    }

    pub fn maximum(&self) -> Option<i64> {
        self.round().map(|r| r.maximum)
    }

    pub fn secret(&self) -> Option<i64> {
        self.round().map(|r| r.secret)
    }

    pub fn tries(&self) -> u32 {
        self.round().map(|r| r.tries).unwrap_or(0)
    }
}

pub type SessionStore = HashMap<SessionKey, Session>;

/// What the player did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventKind {
    Start,
    Cancel,
    Text(String),
}

/// One inbound event for the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub key: SessionKey,
    pub kind: EventKind,
    /// language the replies should be written in
    pub lang: Lang,
}

impl Event {
    pub fn new(key: SessionKey, kind: EventKind, lang: Lang) -> Self {
        Self { key, kind, lang }
    }
}

/// Replies to send back, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reply {
    pub messages: Vec<String>,
}

impl Reply {
    fn one(message: String) -> Self {
        Self {
            messages: vec![message],
        }
    }
}

impl From<Vec<String>> for Reply {
    fn from(messages: Vec<String>) -> Self {
        Self { messages }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct GameOptions {
    /// After a win, ask "play again?" instead of ending the session.
    pub offer_replay: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self { offer_replay: true }
    }
}

/// Owns every session and advances them one event at a time.
pub struct GuessingGame {
    sessions: SessionStore,
    catalog: Catalog,
    options: GameOptions,
    rng: Box<dyn RandomSource>,
}

impl GuessingGame {
    pub fn new(catalog: Catalog, options: GameOptions) -> Self {
        Self {
            sessions: SessionStore::new(),
            catalog,
            options,
            rng: Box::new(ThreadRandom),
        }
    }

    /// Replace the source used to draw secrets.
    pub fn with_random(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn session(&self, key: SessionKey) -> Option<&Session> {
        self.sessions.get(&key)
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn handle(&mut self, event: Event) -> Reply {
        match event.kind {
            EventKind::Start => self.on_start(event.key, event.lang),
            EventKind::Cancel => self.on_cancel(event.key, event.lang),
            EventKind::Text(text) => self.on_text(event.key, &text, event.lang),
        }
    }

    /// Start (or restart) a game, discarding any round in progress.
    pub fn on_start(&mut self, key: SessionKey, lang: Lang) -> Reply {
        if self.sessions.insert(key, Session::AwaitingMinimum).is_some() {
            tracing::debug!(chat = key.chat_id, user = key.user_id, "restarting game");
        }
        let msgs = self.catalog.get(lang);
        vec![msgs.welcome.clone(), msgs.ask_minimum.clone()].into()
    }

    pub fn on_cancel(&mut self, key: SessionKey, lang: Lang) -> Reply {
        if self.sessions.remove(&key).is_some() {
            tracing::debug!(chat = key.chat_id, user = key.user_id, "game cancelled");
        }
        Reply::one(self.catalog.get(lang).cancelled.clone())
    }

    pub fn on_text(&mut self, key: SessionKey, text: &str, lang: Lang) -> Reply {
        match self.advance(key, text, lang) {
            Ok(reply) => reply,
            Err(err) => {
                tracing::debug!(chat = key.chat_id, user = key.user_id, "rejected input: {}", err);
                self.explain(&err, lang)
            }
        }
    }

    fn advance(&mut self, key: SessionKey, text: &str, lang: Lang) -> Result<Reply, GuessError> {
        let msgs = self.catalog.get(lang);
        let session = self
            .sessions
            .get_mut(&key)
            .ok_or(GuessError::NoActiveSession)?;

        match session {
            Session::AwaitingMinimum => {
                let minimum = parse_number(text)?;
                *session = Session::AwaitingMaximum { minimum };
                Ok(Reply::one(msgs.ask_maximum.clone()))
            }
            Session::AwaitingMaximum { minimum } => {
                let minimum = *minimum;
                let maximum = parse_number(text)?;
                if maximum <= minimum {
                    *session = Session::AwaitingMinimum;
                    return Err(GuessError::RangeOrder { minimum, maximum });
                }
                let secret = self.rng.pick(minimum, maximum);
                *session = Session::Guessing(Round {
                    minimum,
                    maximum,
                    secret,
                    tries: 0,
                });
                Ok(Reply::one(format_with(
                    &msgs.range_set,
                    &[("min", &minimum.to_string()), ("max", &maximum.to_string())],
                )))
            }
            Session::Guessing(round) => {
                let guess = parse_number(text)?;
                if !round.contains(guess) {
                    return Err(GuessError::OutOfRange {
                        guess,
                        minimum: round.minimum,
                        maximum: round.maximum,
                    });
                }
                round.tries += 1;
                if guess < round.secret {
                    return Ok(Reply::one(msgs.go_higher.clone()));
                }
                if guess > round.secret {
                    return Ok(Reply::one(msgs.go_lower.clone()));
                }

                tracing::info!(
                    chat = key.chat_id,
                    user = key.user_id,
                    tries = round.tries,
                    "number guessed"
                );
                let mut messages = vec![format_with(
                    &msgs.correct,
                    &[("tries", &round.tries.to_string())],
                )];
                if self.options.offer_replay {
                    *session = Session::AwaitingReplay(round.clone());
                    messages.push(msgs.play_again.clone());
                } else {
                    self.sessions.remove(&key);
                }
                Ok(messages.into())
            }
            Session::AwaitingReplay(_) => {
                if msgs.is_affirmative(text) {
                    *session = Session::AwaitingMinimum;
                    Ok(Reply::one(msgs.ask_minimum.clone()))
                } else {
                    self.sessions.remove(&key);
                    Ok(Reply::one(msgs.farewell.clone()))
                }
            }
        }
    }

    fn explain(&self, err: &GuessError, lang: Lang) -> Reply {
        let msgs: &Messages = self.catalog.get(lang);
        match err {
            GuessError::InvalidNumber(_) => Reply::one(msgs.invalid_number.clone()),
            GuessError::RangeOrder { minimum, .. } => vec![
                format_with(&msgs.range_order, &[("min", &minimum.to_string())]),
                msgs.ask_minimum.clone(),
            ]
            .into(),
            GuessError::OutOfRange {
                minimum, maximum, ..
            } => Reply::one(format_with(
                &msgs.out_of_range,
                &[("min", &minimum.to_string()), ("max", &maximum.to_string())],
            )),
            GuessError::NoActiveSession => Reply::one(msgs.not_started.clone()),
        }
    }
}

/// Parse an optionally signed base-10 integer, ignoring surrounding spaces.
pub fn parse_number(text: &str) -> Result<i64, GuessError> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| GuessError::InvalidNumber(text.to_string()))
}
