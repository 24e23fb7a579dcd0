//! Scans the page for declarative translation markers and writes resolved
//! strings into text content, attributes, and document metadata.
//!
//! Binding is two-phase: [`collect`] gathers the `(key path, target slot)`
//! pairs an element declares, and [`apply`] resolves and writes them. A
//! string is only written when resolution produced something different from
//! the raw key path, so untranslated content keeps whatever the markup
//! shipped with. Resolved strings are trusted dictionary content and may
//! carry inline markup; the binder never escapes them.

use crate::dictionary::TranslationTree;
use crate::language::Language;
use crate::page::{Element, Page};

/// Marker attribute for text content translation.
pub const TEXT_MARKER: &str = "data-i18n";

/// Attribute categories that can be translated independently of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrTarget {
    Title,
    Alt,
    Placeholder,
    AriaLabel,
    Href,
    Content,
}

impl AttrTarget {
    pub const ALL: [AttrTarget; 6] = [
        AttrTarget::Title,
        AttrTarget::Alt,
        AttrTarget::Placeholder,
        AttrTarget::AriaLabel,
        AttrTarget::Href,
        AttrTarget::Content,
    ];

    /// The marker attribute an element uses to opt in.
    pub fn marker(&self) -> &'static str {
        match self {
            AttrTarget::Title => "data-i18n-title",
            AttrTarget::Alt => "data-i18n-alt",
            AttrTarget::Placeholder => "data-i18n-placeholder",
            AttrTarget::AriaLabel => "data-i18n-aria-label",
            AttrTarget::Href => "data-i18n-href",
            AttrTarget::Content => "data-i18n-content",
        }
    }

    /// The attribute the resolved string is written to.
    pub fn target(&self) -> &'static str {
        match self {
            AttrTarget::Title => "title",
            AttrTarget::Alt => "alt",
            AttrTarget::Placeholder => "placeholder",
            AttrTarget::AriaLabel => "aria-label",
            AttrTarget::Href => "href",
            AttrTarget::Content => "content",
        }
    }
}

/// Where a resolved string lands on the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSlot {
    Text,
    Attribute(AttrTarget),
}

/// One translation an element declares.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub key_path: String,
    pub slot: TargetSlot,
}

// Fixed metadata key paths, applied whether or not any element is marked.
const META_TITLE: &str = "meta.title";
const META_BINDINGS: [(&str, &str, &str); 5] = [
    ("name", "description", "meta.description"),
    ("property", "og:title", "meta.ogTitle"),
    ("property", "og:description", "meta.ogDescription"),
    ("name", "twitter:title", "meta.twitterTitle"),
    ("name", "twitter:description", "meta.twitterDescription"),
];

/// Phase 1: the bindings a single element declares through its markers.
pub fn collect(element: &Element) -> Vec<Binding> {
    let mut bindings = Vec::new();
    if let Some(key_path) = element.attr(TEXT_MARKER) {
        bindings.push(Binding {
            key_path: key_path.to_string(),
            slot: TargetSlot::Text,
        });
    }
    for target in AttrTarget::ALL {
        if let Some(key_path) = element.attr(target.marker()) {
            bindings.push(Binding {
                key_path: key_path.to_string(),
                slot: TargetSlot::Attribute(target),
            });
        }
    }
    bindings
}

/// Phase 1 over the whole page, in document order.
pub fn collect_all(page: &Page) -> Vec<Binding> {
    let mut bindings = Vec::new();
    page.for_each(&mut |element| bindings.extend(collect(element)));
    bindings
}

/// Phase 2: resolve every marked element against `tree` and write the
/// results, then update document metadata and the language attribute.
///
/// Idempotent: applying twice with the same tree converges to the same
/// rendered output. Missing metadata tags are skipped silently.
pub fn apply(page: &mut Page, language: Language, tree: &TranslationTree) {
    page.for_each_mut(&mut |element| {
        for binding in collect(element) {
            let resolved = tree.lookup(&binding.key_path, None);
            if resolved == binding.key_path {
                continue;
            }
            match binding.slot {
                TargetSlot::Text => element.text = resolved,
                TargetSlot::Attribute(target) => element.set_attr(target.target(), &resolved),
            }
        }
    });

    let title = tree.lookup(META_TITLE, None);
    if title != META_TITLE {
        page.title = title;
    }

    for (attr, value, key_path) in META_BINDINGS {
        if let Some(meta) = page.find_meta_mut(attr, value) {
            let resolved = tree.lookup(key_path, None);
            if resolved != key_path {
                meta.set_attr("content", &resolved);
            }
        }
    }

    page.lang = language.code().to_string();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::Dictionary;

    fn dictionary() -> Dictionary {
        Dictionary::embedded()
    }

    fn marked_page() -> Page {
        let mut page = Page::new();
        page.push(Element::new("meta").with_attr("name", "description"));
        page.push(Element::new("meta").with_attr("property", "og:title"));
        page.push(
            Element::new("nav").with_child(
                Element::new("a")
                    .with_attr(TEXT_MARKER, "nav.home")
                    .with_attr("data-i18n-title", "nav.home")
                    .with_text("placeholder"),
            ),
        );
        page.push(
            Element::new("img")
                .with_attr("data-i18n-alt", "download.appStoreAlt")
                .with_attr("alt", "untranslated"),
        );
        page.push(
            Element::new("span")
                .with_attr(TEXT_MARKER, "hero.downloadAppStoreMobile")
                .with_text("Download Free on App Store"),
        );
        page.push(
            Element::new("p")
                .with_attr(TEXT_MARKER, "not.a.real.key")
                .with_text("original copy"),
        );
        page
    }

    #[test]
    fn collect_reports_one_binding_per_marker() {
        let element = Element::new("a")
            .with_attr(TEXT_MARKER, "nav.home")
            .with_attr("data-i18n-title", "nav.getTheApp")
            .with_attr("data-i18n-aria-label", "nav.home");

        let bindings = collect(&element);
        assert_eq!(bindings.len(), 3);
        assert_eq!(bindings[0].slot, TargetSlot::Text);
        assert_eq!(bindings[0].key_path, "nav.home");
        assert!(bindings.contains(&Binding {
            key_path: "nav.getTheApp".to_string(),
            slot: TargetSlot::Attribute(AttrTarget::Title),
        }));
        assert!(bindings.contains(&Binding {
            key_path: "nav.home".to_string(),
            slot: TargetSlot::Attribute(AttrTarget::AriaLabel),
        }));
    }

    #[test]
    fn collect_all_walks_document_order() {
        let page = marked_page();
        let bindings = collect_all(&page);
        assert_eq!(bindings.len(), 4);
        assert_eq!(bindings[0].key_path, "nav.home");
    }

    #[test]
    fn apply_writes_text_attributes_and_metadata() {
        let mut page = marked_page();
        let tree = dictionary().tree(Language::De);
        apply(&mut page, Language::De, &tree);

        let link = page.root().find(&|el| el.tag == "a").unwrap();
        assert_eq!(link.text, "Start");
        assert_eq!(link.attr("title"), Some("Start"));

        let img = page.root().find(&|el| el.tag == "img").unwrap();
        assert_eq!(img.attr("alt"), Some("Im App Store herunterladen"));

        assert!(page.title.starts_with("Ätherische Öle"));
        assert_eq!(page.lang, "de");

        let description = page.find_meta_mut("name", "description").unwrap();
        assert!(description.attr("content").unwrap().contains("Gesundheitszustände"));
        let og_title = page.find_meta_mut("property", "og:title").unwrap();
        assert!(og_title.attr("content").unwrap().starts_with("Ätherische Öle"));
    }

    #[test]
    fn apply_preserves_inline_markup() {
        let mut page = marked_page();
        let tree = dictionary().tree(Language::Fr);
        apply(&mut page, Language::Fr, &tree);

        let span = page.root().find(&|el| el.tag == "span").unwrap();
        assert_eq!(span.text, "Télécharger Gratuitement<br>sur l'App Store");
    }

    #[test]
    fn apply_skips_untranslated_key_paths() {
        let mut page = marked_page();
        let tree = dictionary().tree(Language::En);
        apply(&mut page, Language::En, &tree);

        let paragraph = page.root().find(&|el| el.tag == "p").unwrap();
        assert_eq!(paragraph.text, "original copy");
    }

    #[test]
    fn apply_is_idempotent() {
        let mut once = marked_page();
        let tree = dictionary().tree(Language::Es);
        apply(&mut once, Language::Es, &tree);

        let mut twice = once.clone();
        apply(&mut twice, Language::Es, &tree);
        assert_eq!(once, twice);
    }

    #[test]
    fn apply_skips_missing_meta_tags() {
        // no meta tags at all: metadata updates skip silently
        let mut page = Page::new();
        page.push(Element::new("a").with_attr(TEXT_MARKER, "nav.home"));
        let tree = dictionary().tree(Language::It);
        apply(&mut page, Language::It, &tree);
        assert_eq!(page.lang, "it");
        assert!(page.title.starts_with("Guida agli Oli"));
    }
}
