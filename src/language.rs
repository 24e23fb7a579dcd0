use std::fmt;
use std::str::FromStr;

/// A language supported by the site. The set is closed: the embedded
/// dictionary ships exactly one tree per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    De,
    Fr,
    It,
    Es,
    Ro,
}

/// Language used when nothing else matches.
pub const DEFAULT_LANGUAGE: Language = Language::En;

impl Language {
    /// Supported languages in the order they appear in the switcher.
    pub const ALL: [Language; 6] = [
        Language::En,
        Language::De,
        Language::Fr,
        Language::It,
        Language::Es,
        Language::Ro,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::De => "de",
            Language::Fr => "fr",
            Language::It => "it",
            Language::Es => "es",
            Language::Ro => "ro",
        }
    }

    /// Display label shown in the switcher toggle and dropdown.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "🇬🇧 English",
            Language::De => "🇩🇪 Deutsch",
            Language::Fr => "🇫🇷 Français",
            Language::It => "🇮🇹 Italiano",
            Language::Es => "🇪🇸 Español",
            Language::Ro => "🇷🇴 Română",
        }
    }

    /// Map a full locale tag (e.g. `fr-CA`) to a supported language.
    ///
    /// Checks the known region variants first, then falls back to the
    /// primary subtag (the text before the first hyphen).
    pub fn from_locale_tag(tag: &str) -> Option<Language> {
        if let Some((_, language)) = LOCALE_TAG_MAP.iter().find(|(t, _)| *t == tag) {
            return Some(*language);
        }
        let primary = tag.split('-').next().unwrap_or(tag);
        primary.parse().ok()
    }
}

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|language| language.code() == s)
            .ok_or_else(|| UnsupportedLanguage(s.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned when a string is not one of the supported language codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedLanguage(pub String);

impl fmt::Display for UnsupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported language code: {}", self.0)
    }
}

impl std::error::Error for UnsupportedLanguage {}

/// An entry for the switcher UI: code plus human-readable label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageOption {
    pub code: Language,
    pub display_name: &'static str,
}

/// Ordered list of supported languages for building a picker.
pub fn supported_languages() -> Vec<LanguageOption> {
    Language::ALL
        .into_iter()
        .map(|code| LanguageOption {
            code,
            display_name: code.display_name(),
        })
        .collect()
}

// Region variants the site's audience actually reports. Anything missing
// here is still handled by the primary-subtag fallback.
static LOCALE_TAG_MAP: &[(&str, Language)] = &[
    ("en", Language::En),
    ("en-US", Language::En),
    ("en-GB", Language::En),
    ("en-AU", Language::En),
    ("en-CA", Language::En),
    ("de", Language::De),
    ("de-DE", Language::De),
    ("de-AT", Language::De),
    ("de-CH", Language::De),
    ("fr", Language::Fr),
    ("fr-FR", Language::Fr),
    ("fr-CA", Language::Fr),
    ("fr-CH", Language::Fr),
    ("fr-BE", Language::Fr),
    ("it", Language::It),
    ("it-IT", Language::It),
    ("it-CH", Language::It),
    ("es", Language::Es),
    ("es-ES", Language::Es),
    ("es-MX", Language::Es),
    ("es-AR", Language::Es),
    ("es-CO", Language::Es),
    ("es-CL", Language::Es),
    ("ro", Language::Ro),
    ("ro-RO", Language::Ro),
    ("ro-MD", Language::Ro),
];

/// Detect the visitor's preferred language.
///
/// Priority: persisted preference, then the runtime locale tag, then the
/// default. Always returns a supported language.
pub fn detect_language(persisted: Option<&str>, locale_tag: Option<&str>) -> Language {
    if let Some(saved) = persisted {
        if let Ok(language) = saved.parse() {
            return language;
        }
        tracing::warn!(code = saved, "ignoring persisted preference outside the supported set");
    }

    if let Some(tag) = locale_tag {
        if let Some(language) = Language::from_locale_tag(tag) {
            return language;
        }
    }

    DEFAULT_LANGUAGE
}
