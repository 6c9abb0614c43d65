//! Telegram number-guessing bot.
//!
//! The player picks a range, the bot draws a secret number inside it and
//! answers every guess with a higher/lower hint until it is found.

pub mod bot;
pub mod config;
pub mod engine;
pub mod error;
pub mod messages;
pub mod random;

pub use bot::{Command, Inbound, event_from_text, run_bot, webhook_url};
pub use config::{Config, DEFAULT_PORT, Transport};
pub use engine::{
    Event, EventKind, GameOptions, GuessingGame, Reply, Round, Session, SessionKey, SessionStore,
    Stage, parse_number,
};
pub use error::{ConfigError, GuessError};
pub use messages::{
    Catalog, Lang, Messages, default_messages, format_with, lang_from_code, lang_tag,
    load_all_messages, load_messages_file, parse_lang,
};
pub use random::{FixedRandom, RandomSource, SeededRandom, ThreadRandom, rand_in_range};
