//! Localized field resolution.
//!
//! Every catalog text is stored in up to three languages. English is the
//! primary slot and the only one guaranteed by data entry; Arabic and French
//! translations are frequently missing and fall back to English.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display language chosen by the visitor. Never persisted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// Primary slot.
    #[default]
    #[serde(rename = "en")]
    English,
    /// Secondary slot.
    #[serde(rename = "ar")]
    Arabic,
    /// Tertiary slot.
    #[serde(rename = "fr")]
    French,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Arabic, Language::French];

    /// Short code used on the wire (`en`, `ar`, `fr`).
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Arabic => "ar",
            Self::French => "fr",
        }
    }

    /// Name of the language in that language, for the switcher.
    pub fn native_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Arabic => "العربية",
            Self::French => "Français",
        }
    }

    pub fn is_rtl(&self) -> bool {
        matches!(self, Self::Arabic)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when a language code is not one of the supported three.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage(pub String);

impl fmt::Display for UnknownLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported language: {}", self.0)
    }
}

impl std::error::Error for UnknownLanguage {}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Self::English),
            "ar" | "arabic" => Ok(Self::Arabic),
            "fr" | "french" | "français" | "francais" => Ok(Self::French),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

fn present(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.is_empty())
}

/// Resolve the display string for `lang` from three parallel variants.
///
/// Empty strings are treated as missing. Falls back to `primary`, and to
/// the empty string when even that is absent.
pub fn resolve(
    lang: Language,
    primary: Option<&str>,
    secondary: Option<&str>,
    tertiary: Option<&str>,
) -> String {
    if lang == Language::Arabic {
        if let Some(v) = present(secondary) {
            return v.to_string();
        }
    }
    if lang == Language::French {
        if let Some(v) = present(tertiary) {
            return v.to_string();
        }
    }
    primary.unwrap_or_default().to_string()
}

/// A text attribute stored in English, Arabic, and French.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub tertiary: Option<String>,
}

impl LocalizedText {
    pub fn new(
        primary: impl Into<String>,
        secondary: Option<String>,
        tertiary: Option<String>,
    ) -> Self {
        Self {
            primary: Some(primary.into()),
            secondary,
            tertiary,
        }
    }

    /// English-only text.
    pub fn english(primary: impl Into<String>) -> Self {
        Self::new(primary, None, None)
    }

    pub fn resolve(&self, lang: Language) -> String {
        resolve(
            lang,
            self.primary.as_deref(),
            self.secondary.as_deref(),
            self.tertiary.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> LocalizedText {
        LocalizedText::new(
            "Couscous",
            Some("كسكس".to_string()),
            Some("Couscous royal".to_string()),
        )
    }

    #[test]
    fn test_resolve_selects_requested_slot() {
        let text = full();
        assert_eq!(text.resolve(Language::English), "Couscous");
        assert_eq!(text.resolve(Language::Arabic), "كسكس");
        assert_eq!(text.resolve(Language::French), "Couscous royal");
    }

    #[test]
    fn test_resolve_falls_back_when_slot_missing() {
        let text = LocalizedText::english("Chorba");
        for lang in Language::ALL {
            assert_eq!(text.resolve(lang), "Chorba");
        }
    }

    #[test]
    fn test_resolve_treats_empty_as_missing() {
        let text = LocalizedText::new("Chorba", Some(String::new()), Some(String::new()));
        assert_eq!(text.resolve(Language::Arabic), "Chorba");
        assert_eq!(text.resolve(Language::French), "Chorba");
    }

    #[test]
    fn test_resolve_all_absent_is_empty() {
        assert_eq!(resolve(Language::Arabic, None, None, None), "");
        assert_eq!(LocalizedText::default().resolve(Language::French), "");
    }

    #[test]
    fn test_resolve_does_not_cross_slots() {
        // French requested, only Arabic present: primary wins, not Arabic.
        assert_eq!(
            resolve(Language::French, Some("Bread"), Some("خبز"), None),
            "Bread"
        );
        assert_eq!(
            resolve(Language::Arabic, Some("Bread"), None, Some("Pain")),
            "Bread"
        );
    }

    #[test]
    fn test_language_parse() {
        assert_eq!("ar".parse::<Language>().unwrap(), Language::Arabic);
        assert_eq!(" FR ".parse::<Language>().unwrap(), Language::French);
        assert_eq!("English".parse::<Language>().unwrap(), Language::English);
        assert!("de".parse::<Language>().is_err());
    }

    #[test]
    fn test_language_default_is_primary() {
        assert_eq!(Language::default(), Language::English);
        assert!(Language::Arabic.is_rtl());
        assert!(!Language::French.is_rtl());
    }

    #[test]
    fn test_language_serde_codes() {
        let json = serde_json::to_string(&Language::Arabic).unwrap();
        assert_eq!(json, "\"ar\"");
        let lang: Language = serde_json::from_str("\"fr\"").unwrap();
        assert_eq!(lang, Language::French);
    }
}
