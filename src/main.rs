use clap::Parser;
use lavender_i18n::binder::TEXT_MARKER;
use lavender_i18n::switcher::{
    CURRENT_CLASS, DROPDOWN_CLASS, OPTION_LANG_ATTR, SWITCHER_CLASS, TOGGLE_CLASS,
};
use lavender_i18n::{
    Dictionary, Element, I18n, Language, MemoryPreferenceStore, Page, SwitcherEvent,
    supported_languages,
};
use tracing_subscriber::EnvFilter;

/// Demonstrates detection, binding, and switching on a sample page.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Switch to this language after the initial detection (e.g. "de")
    #[arg(long)]
    lang: Option<String>,

    /// Locale tag to detect against instead of the OS locale (e.g. "fr-CA")
    #[arg(long)]
    locale: Option<String>,
}

fn sample_page() -> Page {
    let mut dropdown = Element::new("div").with_class(DROPDOWN_CLASS);
    for option in supported_languages() {
        dropdown.children.push(
            Element::new("button")
                .with_attr(OPTION_LANG_ATTR, option.code.code())
                .with_text(option.display_name),
        );
    }

    let mut page = Page::new();
    page.push(Element::new("meta").with_attr("name", "description"));
    page.push(Element::new("meta").with_attr("property", "og:title"));
    page.push(
        Element::new("nav")
            .with_child(Element::new("a").with_attr(TEXT_MARKER, "nav.home"))
            .with_child(Element::new("a").with_attr(TEXT_MARKER, "nav.benefits"))
            .with_child(Element::new("a").with_attr(TEXT_MARKER, "nav.faq")),
    );
    page.push(Element::new("h1").with_attr(TEXT_MARKER, "hero.headline"));
    page.push(
        Element::new("img")
            .with_attr("data-i18n-alt", "download.appStoreAlt")
            .with_attr("alt", "Download on App Store"),
    );
    page.push(
        Element::new("div")
            .with_class(SWITCHER_CLASS)
            .with_child(Element::new("button").with_class(TOGGLE_CLASS))
            .with_child(Element::new("span").with_class(CURRENT_CLASS))
            .with_child(dropdown),
    );
    page
}

fn print_page(page: &Page) {
    println!("  <html lang=\"{}\">", page.lang);
    println!("  title: {}", page.title);
    page.for_each(&mut |el| {
        if el.attr(TEXT_MARKER).is_some() {
            println!("  <{}> {}", el.tag, el.text);
        }
    });
    if let Some(current) = page.find_by_class(CURRENT_CLASS) {
        println!("  switcher: {}", current.text);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut page = sample_page();
    let mut i18n = I18n::new(Dictionary::embedded(), Box::new(MemoryPreferenceStore::new()));
    i18n.on_language_changed(|event| println!("-- language changed to {}", event.language));

    match args.locale.as_deref() {
        Some(tag) => i18n.init_with_locale(&mut page, Some(tag)),
        None => i18n.init(&mut page),
    }

    println!("after init ({}):", i18n.language());
    print_page(&page);

    if let Some(code) = args.lang.as_deref() {
        i18n.set_language_code(&mut page, code);
        println!("\nafter --lang {code}:");
        print_page(&page);
    }

    // a switch driven through the dropdown, like a visitor would
    i18n.switcher_event(&mut page, SwitcherEvent::ToggleActivated);
    i18n.switcher_event(&mut page, SwitcherEvent::OptionSelected(Language::Ro));
    println!("\nafter picking Română in the switcher:");
    print_page(&page);
}
