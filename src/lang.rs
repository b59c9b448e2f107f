//! Static language lookup tables.
//!
//! Maps logical language names to the recognizer locale tag and to the short
//! code used for synthesis voice selection. Both tables are total: unknown
//! languages fall back to the English defaults rather than failing.

/// Locale tag used when a language has no table entry.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Short code used when a language has no table entry.
pub const DEFAULT_SHORT_CODE: &str = "en";

/// Logical language name → recognizer locale tag.
const LOCALE_TAGS: &[(&str, &str)] = &[
    ("English", "en-US"),
    ("Spanish", "es-ES"),
    ("French", "fr-FR"),
    ("German", "de-DE"),
    ("Chinese", "zh-CN"),
    ("Japanese", "ja-JP"),
    ("Korean", "ko-KR"),
    ("Arabic", "ar-SA"),
    ("Hindi", "hi-IN"),
    ("Portuguese", "pt-BR"),
    ("Russian", "ru-RU"),
    ("Italian", "it-IT"),
];

/// Logical language name → short code for synthesis voice selection.
const SHORT_CODES: &[(&str, &str)] = &[
    ("English", "en"),
    ("Spanish", "es"),
    ("French", "fr"),
    ("German", "de"),
    ("Chinese", "zh"),
    ("Japanese", "ja"),
    ("Korean", "ko"),
    ("Arabic", "ar"),
    ("Hindi", "hi"),
    ("Portuguese", "pt"),
    ("Russian", "ru"),
    ("Italian", "it"),
];

/// Resolve the recognizer locale tag for a logical language name.
pub fn locale_tag(language: &str) -> &'static str {
    lookup(LOCALE_TAGS, language).unwrap_or(DEFAULT_LOCALE)
}

/// Resolve the short synthesis code for a logical language name.
pub fn short_code(language: &str) -> &'static str {
    lookup(SHORT_CODES, language).unwrap_or(DEFAULT_SHORT_CODE)
}

/// All logical language names the tables know about, in table order.
pub fn known_languages() -> impl Iterator<Item = &'static str> {
    LOCALE_TAGS.iter().map(|(name, _)| *name)
}

fn lookup(table: &'static [(&str, &str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, value)| *value)
}
