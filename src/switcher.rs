//! Presentation state for the language switcher dropdown.
//!
//! The dropdown is a two-state machine driven by UI events. The pure
//! [`transition`] function decides the next state and side effects; the
//! [`Switcher`] controller mirrors them onto the page (open class, ARIA
//! expanded flag, focus marker) and reports the selected language to the
//! caller. The switcher is located by fixed structural class names; every
//! page mutation skips silently when the element is absent.

use crate::language::Language;
use crate::page::Page;

pub const SWITCHER_CLASS: &str = "language-switcher";
pub const TOGGLE_CLASS: &str = "language-switcher__toggle";
pub const CURRENT_CLASS: &str = "language-switcher__current";
pub const DROPDOWN_CLASS: &str = "language-switcher__dropdown";

/// Attribute on option buttons naming their language code.
pub const OPTION_LANG_ATTR: &str = "data-lang";

const OPEN_CLASS: &str = "is-open";
const ACTIVE_CLASS: &str = "is-active";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwitcherState {
    #[default]
    Closed,
    Open,
}

/// User interactions the switcher reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitcherEvent {
    /// The toggle control was activated.
    ToggleActivated,
    /// A language option in the dropdown was chosen.
    OptionSelected(Language),
    /// A click landed outside the switcher's bounding region.
    OutsideClick,
    /// The cancel/escape key was pressed.
    EscapePressed,
}

/// Outcome of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: SwitcherState,
    /// Language to activate, when the event was an option selection.
    pub selection: Option<Language>,
    /// Whether focus returns to the toggle (escape while open).
    pub refocus_toggle: bool,
}

/// The switcher's transition function.
pub fn transition(state: SwitcherState, event: SwitcherEvent) -> Transition {
    let mut next = Transition {
        next: SwitcherState::Closed,
        selection: None,
        refocus_toggle: false,
    };
    match event {
        SwitcherEvent::ToggleActivated => {
            next.next = match state {
                SwitcherState::Closed => SwitcherState::Open,
                SwitcherState::Open => SwitcherState::Closed,
            };
        }
        SwitcherEvent::OptionSelected(language) => {
            next.selection = Some(language);
        }
        SwitcherEvent::OutsideClick => {}
        SwitcherEvent::EscapePressed => {
            next.refocus_toggle = state == SwitcherState::Open;
        }
    }
    next
}

/// Controller that applies switcher transitions to the page.
#[derive(Debug, Default)]
pub struct Switcher {
    state: SwitcherState,
}

impl Switcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SwitcherState {
        self.state
    }

    /// Feed one event through the state machine and sync the page.
    ///
    /// Returns the language to activate when the event selected an option;
    /// the caller runs the language change and then [`Switcher::force_close`].
    pub fn handle(&mut self, page: &mut Page, event: SwitcherEvent) -> Option<Language> {
        let outcome = transition(self.state, event);
        self.state = outcome.next;
        self.sync(page);
        if outcome.refocus_toggle {
            page.focused = Some(TOGGLE_CLASS.to_string());
        }
        outcome.selection
    }

    /// Force the dropdown shut, regardless of current state.
    pub fn force_close(&mut self, page: &mut Page) {
        self.state = SwitcherState::Closed;
        self.sync(page);
    }

    fn sync(&self, page: &mut Page) {
        let open = self.state == SwitcherState::Open;
        if let Some(switcher) = page.find_by_class_mut(SWITCHER_CLASS) {
            if open {
                switcher.add_class(OPEN_CLASS);
            } else {
                switcher.remove_class(OPEN_CLASS);
            }
        }
        if let Some(toggle) = page.find_by_class_mut(TOGGLE_CLASS) {
            toggle.set_attr("aria-expanded", if open { "true" } else { "false" });
        }
    }

    /// Refresh the switcher's display after translations were applied:
    /// current-language label and exactly one active option.
    pub fn refresh(page: &mut Page, active: Language) {
        if let Some(current) = page.find_by_class_mut(CURRENT_CLASS) {
            current.text = active.display_name().to_string();
        }
        if let Some(dropdown) = page.find_by_class_mut(DROPDOWN_CLASS) {
            dropdown.for_each_mut(&mut |option| {
                let Some(code) = option.attr(OPTION_LANG_ATTR) else {
                    return;
                };
                if code == active.code() {
                    option.add_class(ACTIVE_CLASS);
                } else {
                    option.remove_class(ACTIVE_CLASS);
                }
            });
        }
    }
}
