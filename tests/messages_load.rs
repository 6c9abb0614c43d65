use guess_range_bot::{Catalog, Lang, load_all_messages, load_messages_file, parse_lang};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[test]
fn messages_dir_loads_all_known_languages() {
    // list files under messages/
    let dir = Path::new("messages");
    let mut expected = Vec::new();
    if let Ok(entries) = fs::read_dir(dir) {
        for e in entries.flatten() {
            if let Some(fname) = e.file_name().to_str() {
                if let Some(stem) = fname.strip_suffix(".json") {
                    if parse_lang(stem).is_some() {
                        expected.push(stem.to_string());
                    }
                }
            }
        }
    }

    let map = load_all_messages(dir);
    for lang in expected {
        assert!(map.contains_key(&lang), "messages map missing language: {}", lang);
    }
    assert_eq!(map["it"].language_name, "Italiano");
}

#[test]
fn missing_file_falls_back_to_english_defaults() {
    let msgs = load_messages_file(Path::new("messages/does-not-exist.json"), Lang::It);
    assert_eq!(msgs.language_name, "English");
}

#[test]
fn catalog_serves_requested_language_then_default() {
    let catalog = Catalog::new(load_all_messages(Path::new("messages")), Lang::It);
    assert_eq!(catalog.get(Lang::En).language_name, "English");
    assert_eq!(catalog.get(Lang::It).language_name, "Italiano");

    // only English on disk: Italian requests fall back
    let mut only_en = HashMap::new();
    only_en.insert("en".to_string(), guess_range_bot::default_messages(Lang::En));
    let catalog = Catalog::new(only_en, Lang::En);
    assert_eq!(catalog.get(Lang::It).language_name, "English");
    assert_eq!(catalog.available(), vec!["English (en)".to_string()]);
}

#[test]
fn default_language_without_a_file_is_not_listed() {
    let mut only_en = HashMap::new();
    only_en.insert("en".to_string(), guess_range_bot::default_messages(Lang::En));
    let catalog = Catalog::new(only_en, Lang::It);
    assert_eq!(catalog.get(Lang::It).language_name, "English");
    assert_eq!(catalog.available(), vec!["English (en)".to_string()]);
}
