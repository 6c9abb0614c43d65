use std::{env, path::PathBuf};

use crate::{
    error::ConfigError,
    messages::{Lang, parse_lang},
};

/// How updates reach the bot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transport {
    /// getUpdates long polling; needs no public address.
    Polling,
    /// Telegram pushes updates to `https://<host>/webhook/<token>`.
    Webhook { host: String, port: u16 },
}

/// Runtime configuration (from environment with sensible defaults)
#[derive(Clone, Debug)]
pub struct Config {
    pub token: String,
    pub transport: Transport,
    pub default_lang: Lang,
    pub offer_replay: bool,
    pub seed: Option<u64>,
    pub messages_dir: PathBuf,
}

pub const DEFAULT_PORT: u16 = 10000;

impl Config {
    /// Read configuration from the process environment (after `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let token = var("BOT_TOKEN")
            .or_else(|| var("TELOXIDE_TOKEN"))
            .ok_or(ConfigError::MissingToken)?;

        let host = var("RENDER_EXTERNAL_HOSTNAME");
        let port = match var("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value: v,
            })?,
            None => DEFAULT_PORT,
        };
        let transport = match var("BOT_TRANSPORT").map(|v| v.to_lowercase()) {
            Some(t) if t == "polling" => Transport::Polling,
            Some(t) if t == "webhook" => Transport::Webhook {
                host: host.ok_or(ConfigError::MissingWebhookHost)?,
                port,
            },
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: "BOT_TRANSPORT",
                    value: other,
                });
            }
            None => match host {
                Some(host) => Transport::Webhook { host, port },
                None => Transport::Polling,
            },
        };

        let default_lang = match var("DEFAULT_LANG") {
            Some(v) => parse_lang(&v).ok_or(ConfigError::InvalidValue {
                key: "DEFAULT_LANG",
                value: v,
            })?,
            None => Lang::En,
        };

        let offer_replay = match var("OFFER_REPLAY") {
            Some(v) => parse_bool(&v).ok_or(ConfigError::InvalidValue {
                key: "OFFER_REPLAY",
                value: v,
            })?,
            None => true,
        };

        let seed = match var("GAME_SEED") {
            Some(v) => Some(v.parse().map_err(|_| ConfigError::InvalidValue {
                key: "GAME_SEED",
                value: v,
            })?),
            None => None,
        };

        let messages_dir = var("MESSAGES_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("messages"));

        Ok(Self {
            token,
            transport,
            default_lang,
            offer_replay,
            seed,
            messages_dir,
        })
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
