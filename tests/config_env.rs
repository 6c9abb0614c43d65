use std::collections::HashMap;
use std::path::PathBuf;

use guess_range_bot::{Config, ConfigError, DEFAULT_PORT, Lang, Transport};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_with_only_a_token() {
    let cfg = Config::from_lookup(lookup(&[("BOT_TOKEN", "123:abc")])).expect("config");
    assert_eq!(cfg.token, "123:abc");
    assert_eq!(cfg.transport, Transport::Polling);
    assert_eq!(cfg.default_lang, Lang::En);
    assert!(cfg.offer_replay);
    assert_eq!(cfg.seed, None);
    assert_eq!(cfg.messages_dir, PathBuf::from("messages"));
}

#[test]
fn teloxide_token_is_accepted_as_fallback() {
    let cfg = Config::from_lookup(lookup(&[("TELOXIDE_TOKEN", "9:z")])).expect("config");
    assert_eq!(cfg.token, "9:z");
}

#[test]
fn missing_token_is_an_error() {
    let err = Config::from_lookup(lookup(&[("BOT_TOKEN", "  ")])).unwrap_err();
    assert!(matches!(err, ConfigError::MissingToken));
}

#[test]
fn public_host_selects_webhook_transport() {
    let cfg = Config::from_lookup(lookup(&[
        ("BOT_TOKEN", "t"),
        ("RENDER_EXTERNAL_HOSTNAME", "guess.example.com"),
    ]))
    .expect("config");
    assert_eq!(
        cfg.transport,
        Transport::Webhook {
            host: "guess.example.com".to_string(),
            port: DEFAULT_PORT,
        }
    );

    let cfg = Config::from_lookup(lookup(&[
        ("BOT_TOKEN", "t"),
        ("RENDER_EXTERNAL_HOSTNAME", "guess.example.com"),
        ("BOT_TRANSPORT", "Polling"),
    ]))
    .expect("config");
    assert_eq!(cfg.transport, Transport::Polling);
}

#[test]
fn webhook_without_host_is_rejected() {
    let err = Config::from_lookup(lookup(&[("BOT_TOKEN", "t"), ("BOT_TRANSPORT", "webhook")]))
        .unwrap_err();
    assert!(matches!(err, ConfigError::MissingWebhookHost));
}

#[test]
fn explicit_values_are_parsed() {
    let cfg = Config::from_lookup(lookup(&[
        ("BOT_TOKEN", "t"),
        ("BOT_TRANSPORT", "webhook"),
        ("RENDER_EXTERNAL_HOSTNAME", "h.example"),
        ("PORT", "8443"),
        ("DEFAULT_LANG", "IT"),
        ("OFFER_REPLAY", "false"),
        ("GAME_SEED", "1234"),
        ("MESSAGES_DIR", "/srv/messages"),
    ]))
    .expect("config");
    assert_eq!(
        cfg.transport,
        Transport::Webhook {
            host: "h.example".to_string(),
            port: 8443,
        }
    );
    assert_eq!(cfg.default_lang, Lang::It);
    assert!(!cfg.offer_replay);
    assert_eq!(cfg.seed, Some(1234));
    assert_eq!(cfg.messages_dir, PathBuf::from("/srv/messages"));
}

#[test]
fn invalid_values_name_the_offending_key() {
    for (key, value) in [
        ("PORT", "http"),
        ("DEFAULT_LANG", "klingon"),
        ("OFFER_REPLAY", "perhaps"),
        ("GAME_SEED", "-1"),
        ("BOT_TRANSPORT", "carrier-pigeon"),
    ] {
        let err = Config::from_lookup(lookup(&[("BOT_TOKEN", "t"), (key, value)])).unwrap_err();
        match err {
            ConfigError::InvalidValue { key: k, .. } => assert_eq!(k, key),
            other => panic!("unexpected error for {}: {:?}", key, other),
        }
    }
}
