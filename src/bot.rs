//! Telegram side of the bot: turns messages into engine events and sends
//! the replies back, over long polling or a webhook.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use dotenvy::dotenv;
use teloxide::{
    prelude::*,
    update_listeners::webhooks,
    utils::command::{BotCommands, ParseError},
};
use tokio::sync::Mutex;

use crate::{
    config::{Config, Transport},
    engine::{Event, EventKind, GameOptions, GuessingGame, SessionKey},
    messages::{Catalog, Lang, lang_from_code, load_all_messages},
    random::SeededRandom,
};

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "start a new game.")]
    Start,
    #[command(description = "cancel the current game.")]
    Cancel,
    #[command(description = "show this text.")]
    Help,
    #[command(description = "check that the bot is alive.")]
    Ping,
}

/// Where an incoming text goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inbound {
    Engine(Event),
    Help,
    Ping,
    /// a `/command` we do not know
    UnknownCommand,
    /// a command addressed to another bot in a group
    Ignore,
}

/// Classify a text from `key`. Plain text goes to the engine; anything
/// starting with `/` is a command and never reaches it as a guess.
/// Command names are matched case-insensitively (`/Start` is `/start`).
pub fn event_from_text(key: SessionKey, text: &str, lang: Lang, bot_username: &str) -> Inbound {
    let text = text.trim();
    let Some(rest) = text.strip_prefix('/') else {
        return Inbound::Engine(Event::new(key, EventKind::Text(text.to_string()), lang));
    };
    let (name, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let normalized = format!("/{} {}", name.to_lowercase(), args);
    match Command::parse(normalized.trim_end(), &bot_username.to_lowercase()) {
        Ok(Command::Start) => Inbound::Engine(Event::new(key, EventKind::Start, lang)),
        Ok(Command::Cancel) => Inbound::Engine(Event::new(key, EventKind::Cancel, lang)),
        Ok(Command::Help) => Inbound::Help,
        Ok(Command::Ping) => Inbound::Ping,
        Err(ParseError::WrongBotName(_)) => Inbound::Ignore,
        Err(_) => Inbound::UnknownCommand,
    }
}

/// Public URL Telegram should post updates to.
pub fn webhook_url(host: &str, token: &str) -> String {
    format!("https://{}/webhook/{}", host, token)
}

pub type SharedGame = Arc<Mutex<GuessingGame>>;

struct BotContext {
    game: SharedGame,
    bot_username: String,
}

/// Handle an incoming message: run it through the engine, then send the
/// replies in order once the engine lock is released.
async fn handle_message(bot: &Bot, msg: &Message, ctx: &BotContext) -> Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let replies = {
        let mut game = ctx.game.lock().await;
        let default_lang = game.catalog().default_lang();
        match msg.from.as_ref() {
            None => vec![game.catalog().get(default_lang).cannot_play.clone()],
            Some(user) => {
                let lang = lang_from_code(user.language_code.as_deref(), default_lang);
                let key = SessionKey::new(msg.chat.id.0, user.id.0);
                match event_from_text(key, text, lang, &ctx.bot_username) {
                    Inbound::Engine(event) => game.handle(event).messages,
                    Inbound::Help => vec![Command::descriptions().to_string()],
                    Inbound::Ping => vec![game.catalog().get(lang).pong.clone()],
                    Inbound::UnknownCommand => {
                        vec![game.catalog().get(lang).unknown_command.clone()]
                    }
                    Inbound::Ignore => Vec::new(),
                }
            }
        }
    };

    for reply in replies {
        bot.send_message(msg.chat.id, reply).await?;
    }
    Ok(())
}

/// Run the bot: load config and messages, then serve updates until shutdown.
pub async fn run_bot() -> Result<()> {
    tracing_subscriber::fmt::init();
    dotenv().ok();

    let config = Config::from_env()?;
    let catalog = Catalog::new(load_all_messages(&config.messages_dir), config.default_lang);
    tracing::info!("languages available: {}", catalog.available().join(", "));

    let mut game = GuessingGame::new(
        catalog,
        GameOptions {
            offer_replay: config.offer_replay,
        },
    );
    if let Some(seed) = config.seed {
        tracing::info!("using seeded number generator (seed {})", seed);
        game = game.with_random(SeededRandom::new(seed));
    }

    let bot = Bot::new(config.token.clone());
    let me = bot.get_me().await?;
    if let Err(err) = bot.set_my_commands(Command::bot_commands()).await {
        tracing::warn!("failed to register bot commands: {:?}", err);
    }

    let ctx = Arc::new(BotContext {
        game: Arc::new(Mutex::new(game)),
        bot_username: me.username().to_string(),
    });
    let handler = move |bot: Bot, msg: Message| {
        let ctx = ctx.clone();
        async move {
            if let Err(err) = handle_message(&bot, &msg, &ctx).await {
                tracing::error!("handler error: {:?}", err);
            }
            respond(())
        }
    };

    match config.transport {
        Transport::Polling => {
            tracing::info!("starting long polling as @{}", me.username());
            teloxide::repl(bot, handler).await;
        }
        Transport::Webhook { host, port } => {
            let address = SocketAddr::from(([0, 0, 0, 0], port));
            let url = webhook_url(&host, &config.token).parse()?;
            tracing::info!("listening for webhook calls on {} (host {})", address, host);
            let listener = webhooks::axum(bot.clone(), webhooks::Options::new(address, url)).await?;
            teloxide::repl_with_listener(bot, handler, listener).await;
        }
    }

    Ok(())
}
