use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path};

/// Supported languages
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lang {
    En,
    It,
}

/// Parse a short language tag into `Lang`.
pub fn parse_lang(s: &str) -> Option<Lang> {
    match s.to_lowercase().as_str() {
        "en" => Some(Lang::En),
        "it" => Some(Lang::It),
        _ => None,
    }
}

/// Return the short tag for a Lang variant (e.g. Lang::En -> "en").
pub fn lang_tag(l: Lang) -> &'static str {
    match l {
        Lang::En => "en",
        Lang::It => "it",
    }
}

/// Pick a language from a Telegram `language_code` ("it", "en-US", ...),
/// falling back to `default` when the code is missing or unknown.
pub fn lang_from_code(code: Option<&str>, default: Lang) -> Lang {
    let Some(code) = code else {
        return default;
    };
    if let Some(parsed) = parse_lang(code) {
        return parsed;
    }
    // full locales like "en-US" carry the language in the first two chars
    code.get(..2).and_then(parse_lang).unwrap_or(default)
}

/// Message templates for one language, loaded from `messages/<tag>.json`.
#[derive(Clone, Debug, Deserialize)]
pub struct Messages {
    pub language_name: String,
    pub welcome: String,
    pub ask_minimum: String,
    pub ask_maximum: String,
    pub invalid_number: String,
    pub range_order: String,
    pub range_set: String,
    pub out_of_range: String,
    pub go_higher: String,
    pub go_lower: String,
    pub correct: String,
    pub play_again: String,
    pub affirmative: Vec<String>,
    pub farewell: String,
    pub cancelled: String,
    pub not_started: String,
    pub cannot_play: String,
    pub unknown_command: String,
    pub pong: String,
}

impl Messages {
    /// Whether `answer` is one of this language's "yes" tokens.
    pub fn is_affirmative(&self, answer: &str) -> bool {
        let answer = answer.trim().to_lowercase();
        self.affirmative
            .iter()
            .any(|token| token.trim().to_lowercase() == answer)
    }
}

/// Load a Messages struct from a given JSON file path, falling back to defaults
pub fn load_messages_file(path: &Path, lang: Lang) -> Messages {
    match fs::read_to_string(path) {
        Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
            tracing::warn!("failed to parse {}: {}. Falling back to defaults.", path.display(), e);
            default_messages(lang)
        }),
        Err(e) => {
            tracing::warn!("failed to read {}: {}. Falling back to defaults.", path.display(), e);
            default_messages(lang)
        }
    }
}

/// Return default Messages for a given language; only English is built in.
pub fn default_messages(lang: Lang) -> Messages {
    match lang {
        Lang::En => Messages {
            language_name: "English".to_string(),
            welcome: "🎲 Welcome to the Number Guessing Game!".to_string(),
            ask_minimum: "Send me the minimum number of the range.".to_string(),
            ask_maximum: "Now send me the maximum number of the range.".to_string(),
            invalid_number: "Please enter a valid whole number.".to_string(),
            range_order: "❌ The maximum must be greater than the minimum ({min}). Let's start over.".to_string(),
            range_set: "🎯 I picked a number between {min} and {max}. Start guessing!".to_string(),
            out_of_range: "Your guess must be between {min} and {max}.".to_string(),
            go_higher: "⬆️ Go higher!".to_string(),
            go_lower: "⬇️ Go lower!".to_string(),
            correct: "🎉 Correct! You guessed it in {tries} tries.".to_string(),
            play_again: "Do you want to play again? (yes/no)".to_string(),
            affirmative: vec!["yes".to_string(), "y".to_string()],
            farewell: "Thanks for playing! Send /start whenever you want a rematch.".to_string(),
            cancelled: "Game cancelled. Send /start to play again.".to_string(),
            not_started: "Please start the game using /start.".to_string(),
            cannot_play: "I can't run a game for messages without a user.".to_string(),
            unknown_command: "I don't know that command. Send /help to see what I understand.".to_string(),
            pong: "pong".to_string(),
        },
        _ => default_messages(Lang::En),
    }
}

/// Load every `*.json` file from `dir` and return a map from language tag
/// to parsed `Messages`. Files which fail to parse fall back to defaults for
/// that language.
pub fn load_all_messages(dir: &Path) -> HashMap<String, Messages> {
    let mut map = HashMap::new();
    let Ok(entries) = dir.read_dir() else {
        tracing::warn!("messages directory {} is not readable", dir.display());
        return map;
    };
    for entry in entries.flatten() {
        let Ok(fname) = entry.file_name().into_string() else {
            continue;
        };
        if !fname.to_lowercase().ends_with(".json") {
            continue;
        }
        let stem = &fname[..fname.len() - ".json".len()];
        match parse_lang(stem) {
            Some(lang) => {
                let msgs = load_messages_file(&entry.path(), lang);
                map.insert(lang_tag(lang).to_string(), msgs);
            }
            None => tracing::warn!("skipping unknown language file: {}", fname),
        }
    }
    map
}

/// Simple template formatter: replace `{key}` with `value` for each pair in `pairs`.
pub fn format_with(template: &str, pairs: &[(&str, &str)]) -> String {
    let mut s = template.to_string();
    for (k, v) in pairs {
        s = s.replace(&format!("{{{}}}", k), v);
    }
    s
}

/// Message tables for every loaded language.
///
/// English is always present, so lookups never come back empty. A default
/// language without its own table is served in English.
#[derive(Clone, Debug)]
pub struct Catalog {
    by_tag: HashMap<String, Messages>,
    default_lang: Lang,
    fallback: Messages,
}

impl Catalog {
    pub fn new(mut by_tag: HashMap<String, Messages>, default_lang: Lang) -> Self {
        let english = by_tag
            .entry(lang_tag(Lang::En).to_string())
            .or_insert_with(|| default_messages(Lang::En))
            .clone();
        if !by_tag.contains_key(lang_tag(default_lang)) {
            tracing::warn!(
                "no messages for default language {}, falling back to English",
                lang_tag(default_lang)
            );
        }
        Self {
            by_tag,
            default_lang,
            fallback: english,
        }
    }

    /// Catalog with only the built-in English table.
    pub fn english() -> Self {
        Self::new(HashMap::new(), Lang::En)
    }

    pub fn default_lang(&self) -> Lang {
        self.default_lang
    }

    /// Messages for `lang`, then the default language, then English.
    pub fn get(&self, lang: Lang) -> &Messages {
        self.by_tag
            .get(lang_tag(lang))
            .or_else(|| self.by_tag.get(lang_tag(self.default_lang)))
            .unwrap_or(&self.fallback)
    }

    /// "Name (tag)" for each loaded language, sorted.
    pub fn available(&self) -> Vec<String> {
        let mut items: Vec<String> = self
            .by_tag
            .iter()
            .map(|(k, v)| format!("{} ({})", v.language_name, k))
            .collect();
        items.sort_unstable();
        items
    }
}
