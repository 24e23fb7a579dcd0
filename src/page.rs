//! In-memory model of the rendered page.
//!
//! The binder and switcher consume a declarative contract (marker attributes
//! and structural class names) rather than producing markup, so the page is
//! modelled as a plain element tree. This keeps binding logic unit-testable
//! without a rendering surface; an embedder mirrors mutations onto whatever
//! actually draws the site.

use std::collections::BTreeMap;

/// One element of the page: tag name, attributes, text content, children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub tag: String,
    attrs: BTreeMap<String, String>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Element {
            tag: tag.to_string(),
            ..Element::default()
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attrs.insert(name.to_string(), value.to_string());
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let classes = match self.attr("class") {
            Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        self.set_attr("class", &classes);
    }

    pub fn remove_class(&mut self, class: &str) {
        if let Some(existing) = self.attr("class") {
            let remaining = existing
                .split_whitespace()
                .filter(|c| *c != class)
                .collect::<Vec<_>>()
                .join(" ");
            self.set_attr("class", &remaining);
        }
    }

    /// Visit this element and every descendant, depth first.
    pub fn for_each(&self, f: &mut impl FnMut(&Element)) {
        f(self);
        for child in &self.children {
            child.for_each(f);
        }
    }

    pub fn for_each_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        f(self);
        for child in &mut self.children {
            child.for_each_mut(f);
        }
    }

    /// First element in this subtree matching the predicate.
    pub fn find(&self, predicate: &impl Fn(&Element) -> bool) -> Option<&Element> {
        if predicate(self) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(predicate))
    }

    pub fn find_mut(&mut self, predicate: &impl Fn(&Element) -> bool) -> Option<&mut Element> {
        if predicate(self) {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_mut(predicate))
    }
}

/// The rendered document: metadata slots plus the element tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// Document title (the `<title>` text).
    pub title: String,
    /// The document's language attribute (`<html lang>`).
    pub lang: String,
    /// Class name of the control currently holding focus, if any.
    pub focused: Option<String>,
    root: Element,
}

impl Page {
    pub fn new() -> Self {
        Page {
            title: String::new(),
            lang: String::new(),
            focused: None,
            root: Element::new("body"),
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    pub fn push(&mut self, element: Element) {
        self.root.children.push(element);
    }

    pub fn for_each(&self, f: &mut impl FnMut(&Element)) {
        self.root.for_each(f);
    }

    pub fn for_each_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        self.root.for_each_mut(f);
    }

    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        self.root.find(&|el| el.has_class(class))
    }

    pub fn find_by_class_mut(&mut self, class: &str) -> Option<&mut Element> {
        self.root.find_mut(&|el| el.has_class(class))
    }

    /// Locate a `<meta>` tag by identifying attribute, e.g.
    /// `find_meta_mut("property", "og:title")`.
    pub fn find_meta_mut(&mut self, attr: &str, value: &str) -> Option<&mut Element> {
        self.root
            .find_mut(&|el| el.tag == "meta" && el.attr(attr) == Some(value))
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}
