use thiserror::Error;

/// User-input problems found while advancing a session.
///
/// None of these are fatal: `GuessingGame::handle` turns each one into a
/// guidance message for the player.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("not a whole number: {0:?}")]
    InvalidNumber(String),

    #[error("maximum {maximum} does not exceed minimum {minimum}")]
    RangeOrder { minimum: i64, maximum: i64 },

    #[error("guess {guess} outside [{minimum}, {maximum}]")]
    OutOfRange { guess: i64, minimum: i64, maximum: i64 },

    #[error("no active session")]
    NoActiveSession,
}

/// Startup configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BOT_TOKEN (or TELOXIDE_TOKEN) environment variable is missing")]
    MissingToken,

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("webhook transport needs RENDER_EXTERNAL_HOSTNAME")]
    MissingWebhookHost,
}
