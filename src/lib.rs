//! Client-side internationalization for the Essential Oils marketing site.
//!
//! Detects the visitor's preferred language, persists the choice, resolves
//! dot-delimited key paths against an embedded dictionary, and binds the
//! resolved strings into a page model. A small state machine drives the
//! language switcher dropdown.
//!
//! ```
//! use lavender_i18n::{Dictionary, I18n, Language, MemoryPreferenceStore, Page};
//!
//! let mut page = Page::new();
//! let mut i18n = I18n::new(Dictionary::embedded(), Box::new(MemoryPreferenceStore::new()));
//! i18n.init_with_locale(&mut page, Some("de-AT"));
//! assert_eq!(i18n.language(), Language::De);
//! assert_eq!(i18n.t("nav.home", None), "Start");
//! ```

pub mod binder;
pub mod dictionary;
pub mod error;
pub mod language;
pub mod page;
pub mod storage;
pub mod switcher;

pub use binder::{AttrTarget, Binding, TargetSlot};
pub use dictionary::{Dictionary, TranslationTree, TreeNode};
pub use error::{Error, Result};
pub use language::{
    DEFAULT_LANGUAGE, Language, LanguageOption, UnsupportedLanguage, detect_language,
    supported_languages,
};
pub use page::{Element, Page};
pub use storage::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
pub use switcher::{Switcher, SwitcherEvent, SwitcherState};

/// Payload of the notification broadcast after every successful switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageChanged {
    pub language: Language,
}

type Listener = Box<dyn Fn(&LanguageChanged)>;

/// The i18n module's process-wide state: the active language, its resolved
/// translation tree, and the wiring between detection, persistence, binding,
/// and the switcher UI.
///
/// Everything here is synchronous and runs to completion: the dictionary is
/// resident in memory and binding is a bounded scan, so a second language
/// switch cannot begin until the first has fully returned.
pub struct I18n {
    dictionary: Dictionary,
    store: Box<dyn PreferenceStore>,
    language: Language,
    translations: TranslationTree,
    switcher: Switcher,
    listeners: Vec<Listener>,
    initialized: bool,
}

impl I18n {
    /// Wire the facade around an injected dictionary and preference store.
    /// Nothing is detected or applied until [`I18n::init`].
    pub fn new(dictionary: Dictionary, store: Box<dyn PreferenceStore>) -> Self {
        let language = dictionary.default_language();
        I18n {
            dictionary,
            store,
            language,
            translations: TranslationTree::default(),
            switcher: Switcher::new(),
            listeners: Vec::new(),
            initialized: false,
        }
    }

    /// Detect the preferred language from the persisted preference and the
    /// OS locale, then apply it to the page. Called once at page load.
    pub fn init(&mut self, page: &mut Page) {
        let locale = sys_locale::get_locale();
        self.init_with_locale(page, locale.as_deref());
    }

    /// [`I18n::init`] with an explicit locale tag, for tests and embedders
    /// that source the locale themselves.
    pub fn init_with_locale(&mut self, page: &mut Page, locale_tag: Option<&str>) {
        let detected = detect_language(self.store.load().as_deref(), locale_tag);
        tracing::debug!(language = %detected, "initializing i18n");
        // first call always applies, even when the detected language equals
        // the startup default
        self.set_language(page, detected);
        self.initialized = true;
    }

    /// Synchronous string lookup against the active language's tree.
    pub fn t(&self, key_path: &str, fallback: Option<&str>) -> String {
        self.translations.lookup(key_path, fallback)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// The active language's full tree, for read-only use by page scripts.
    pub fn translations(&self) -> &TranslationTree {
        &self.translations
    }

    /// Switch the active language: persist the choice, reload the tree
    /// wholesale, re-bind the page, and notify listeners.
    ///
    /// A request for the already-active language after initialization is a
    /// no-op and emits no notification.
    pub fn set_language(&mut self, page: &mut Page, code: Language) {
        if code == self.language && self.initialized {
            tracing::debug!(language = %code, "language already active, skipping");
            return;
        }

        self.language = code;
        self.store.save(code.code());
        self.translations = self.dictionary.tree(code);
        self.apply_translations(page);

        let event = LanguageChanged { language: code };
        for listener in &self.listeners {
            listener(&event);
        }
    }

    /// String-code boundary for page scripts: unsupported codes are logged
    /// and ignored.
    pub fn set_language_code(&mut self, page: &mut Page, code: &str) {
        match code.parse::<Language>() {
            Ok(language) => self.set_language(page, language),
            Err(error) => tracing::warn!(%error, "set_language rejected"),
        }
    }

    /// Re-run binding without changing language, e.g. after dynamic content
    /// insertion. Safe to call repeatedly; output converges.
    pub fn apply_translations(&self, page: &mut Page) {
        binder::apply(page, self.language, &self.translations);
        Switcher::refresh(page, self.language);
    }

    /// Route a switcher UI event. A selected option switches the language
    /// and forces the dropdown shut.
    pub fn switcher_event(&mut self, page: &mut Page, event: SwitcherEvent) {
        if let Some(code) = self.switcher.handle(page, event) {
            self.set_language(page, code);
            self.switcher.force_close(page);
        }
    }

    pub fn switcher_state(&self) -> SwitcherState {
        self.switcher.state()
    }

    /// Register a listener for the language-changed notification.
    pub fn on_language_changed(&mut self, listener: impl Fn(&LanguageChanged) + 'static) {
        self.listeners.push(Box::new(listener));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::TEXT_MARKER;
    use crate::switcher::{
        CURRENT_CLASS, DROPDOWN_CLASS, OPTION_LANG_ATTR, SWITCHER_CLASS, TOGGLE_CLASS,
    };
    use std::cell::RefCell;
    use std::rc::Rc;

    fn site_page() -> Page {
        let mut dropdown = Element::new("div").with_class(DROPDOWN_CLASS);
        for language in Language::ALL {
            dropdown.children.push(
                Element::new("button").with_attr(OPTION_LANG_ATTR, language.code()),
            );
        }
        let switcher = Element::new("div")
            .with_class(SWITCHER_CLASS)
            .with_child(Element::new("button").with_class(TOGGLE_CLASS))
            .with_child(Element::new("span").with_class(CURRENT_CLASS))
            .with_child(dropdown);

        let mut page = Page::new();
        page.push(Element::new("meta").with_attr("name", "description"));
        page.push(Element::new("a").with_attr(TEXT_MARKER, "nav.home"));
        page.push(switcher);
        page
    }

    fn i18n_with_memory_store() -> I18n {
        I18n::new(Dictionary::embedded(), Box::new(MemoryPreferenceStore::new()))
    }

    #[test]
    fn init_detects_and_applies() {
        let mut page = site_page();
        let mut i18n = i18n_with_memory_store();
        i18n.init_with_locale(&mut page, Some("fr-CA"));

        assert_eq!(i18n.language(), Language::Fr);
        assert_eq!(page.lang, "fr");
        let link = page.root().find(&|el| el.tag == "a").unwrap();
        assert_eq!(link.text, "Accueil");
        let current = page.find_by_class(CURRENT_CLASS).unwrap();
        assert_eq!(current.text, Language::Fr.display_name());
    }

    #[test]
    fn init_applies_even_when_detected_equals_default() {
        let mut page = site_page();
        let mut i18n = i18n_with_memory_store();
        i18n.init_with_locale(&mut page, None);

        assert_eq!(i18n.language(), DEFAULT_LANGUAGE);
        let link = page.root().find(&|el| el.tag == "a").unwrap();
        assert_eq!(link.text, "Home");
    }

    #[test]
    fn persisted_preference_beats_locale() {
        let mut page = site_page();
        let mut i18n = I18n::new(
            Dictionary::embedded(),
            Box::new(MemoryPreferenceStore::with_language("ro")),
        );
        i18n.init_with_locale(&mut page, Some("de-DE"));
        assert_eq!(i18n.language(), Language::Ro);
    }

    #[test]
    fn set_language_updates_state_and_persists() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("settings.toml");

        let mut page = site_page();
        let mut i18n = I18n::new(
            Dictionary::embedded(),
            Box::new(FilePreferenceStore::at_path(&path)),
        );
        i18n.init_with_locale(&mut page, None);
        i18n.set_language(&mut page, Language::De);
        assert_eq!(i18n.language(), Language::De);
        assert_eq!(i18n.t("nav.home", None), "Start");

        // a reloaded page detects the persisted choice regardless of locale
        let mut next_visit = I18n::new(
            Dictionary::embedded(),
            Box::new(FilePreferenceStore::at_path(&path)),
        );
        let mut fresh_page = site_page();
        next_visit.init_with_locale(&mut fresh_page, Some("es-ES"));
        assert_eq!(next_visit.language(), Language::De);
    }

    #[test]
    fn redundant_switch_emits_no_notification() {
        let mut page = site_page();
        let mut i18n = i18n_with_memory_store();
        let seen: Rc<RefCell<Vec<Language>>> = Rc::default();
        let sink = Rc::clone(&seen);
        i18n.on_language_changed(move |event| sink.borrow_mut().push(event.language));

        i18n.init_with_locale(&mut page, Some("it"));
        i18n.set_language(&mut page, Language::It);
        i18n.set_language(&mut page, Language::Es);

        assert_eq!(*seen.borrow(), vec![Language::It, Language::Es]);
    }

    #[test]
    fn unsupported_code_is_rejected_without_side_effects() {
        let mut page = site_page();
        let mut i18n = i18n_with_memory_store();
        let seen: Rc<RefCell<Vec<Language>>> = Rc::default();
        let sink = Rc::clone(&seen);
        i18n.init_with_locale(&mut page, Some("de"));
        i18n.on_language_changed(move |event| sink.borrow_mut().push(event.language));

        i18n.set_language_code(&mut page, "xx");

        assert_eq!(i18n.language(), Language::De);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn apply_translations_is_idempotent_across_calls() {
        let mut page = site_page();
        let mut i18n = i18n_with_memory_store();
        i18n.init_with_locale(&mut page, Some("es"));

        let first = page.clone();
        i18n.apply_translations(&mut page);
        assert_eq!(page, first);
    }

    #[test]
    fn switcher_selection_switches_language_and_closes() {
        let mut page = site_page();
        let mut i18n = i18n_with_memory_store();
        i18n.init_with_locale(&mut page, None);

        i18n.switcher_event(&mut page, SwitcherEvent::ToggleActivated);
        assert_eq!(i18n.switcher_state(), SwitcherState::Open);

        i18n.switcher_event(&mut page, SwitcherEvent::OptionSelected(Language::Ro));
        assert_eq!(i18n.language(), Language::Ro);
        assert_eq!(i18n.switcher_state(), SwitcherState::Closed);

        // exactly the ro option is marked active
        let dropdown = page.find_by_class(DROPDOWN_CLASS).unwrap();
        let mut active = Vec::new();
        dropdown.for_each(&mut |el| {
            if el.has_class("is-active") {
                active.push(el.attr(OPTION_LANG_ATTR).unwrap_or_default().to_string());
            }
        });
        assert_eq!(active, vec!["ro".to_string()]);
    }

    #[test]
    fn t_falls_back_for_missing_keys() {
        let mut page = site_page();
        let mut i18n = i18n_with_memory_store();
        i18n.init_with_locale(&mut page, None);

        assert_eq!(i18n.t("nav.missing", Some("Menu")), "Menu");
        assert_eq!(i18n.t("nav.missing", None), "nav.missing");
        assert_ne!(i18n.t("nav.home", None), "nav.home");
    }

    #[test]
    fn translations_snapshot_replaced_wholesale() {
        let mut page = site_page();
        let mut i18n = i18n_with_memory_store();
        i18n.init_with_locale(&mut page, None);
        let english = i18n.translations().clone();

        i18n.set_language(&mut page, Language::De);
        assert_ne!(*i18n.translations(), english);
        assert_eq!(i18n.translations().resolve("nav.home"), Some("Start"));
    }
}
