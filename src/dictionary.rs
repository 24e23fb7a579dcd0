use crate::error::{Error, Result};
use crate::language::{DEFAULT_LANGUAGE, Language};
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// Locale files embedded at compile time, one `<code>.json` per language.
#[derive(RustEmbed)]
#[folder = "locales/"]
struct Locales;

/// A node in a translation tree: either a translated string or a nested
/// group of keys. Leaf strings are trusted content and may carry inline
/// markup such as `<br>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Leaf(String),
    Branch(BTreeMap<String, TreeNode>),
}

/// The fully populated translation tree for one language. Never mutated at
/// runtime; the active tree is replaced wholesale on a language switch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationTree(BTreeMap<String, TreeNode>);

impl TranslationTree {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve a dot-delimited key path to its leaf string.
    ///
    /// Resolution walks left to right; a missing segment or a leaf in an
    /// intermediate position aborts and returns `None`.
    pub fn resolve(&self, key_path: &str) -> Option<&str> {
        let mut segments = key_path.split('.');
        let first = segments.next()?;
        let mut node = self.0.get(first)?;
        for segment in segments {
            match node {
                TreeNode::Branch(children) => node = children.get(segment)?,
                TreeNode::Leaf(_) => return None,
            }
        }
        match node {
            TreeNode::Leaf(text) => Some(text),
            TreeNode::Branch(_) => None,
        }
    }

    /// Look up a key path, degrading gracefully.
    ///
    /// Returns the resolved leaf when it exists and is non-empty; otherwise
    /// the non-empty `fallback` when supplied; otherwise the key path
    /// unchanged, which signals "untranslated" without failing the caller.
    ///
    /// Every failed lookup is logged, but at different levels: a missing key
    /// warns, while a key that resolves to an empty leaf only logs at debug.
    /// Content audits that watch the warn stream will not see deliberately
    /// blanked leaves.
    pub fn lookup(&self, key_path: &str, fallback: Option<&str>) -> String {
        match self.resolve(key_path) {
            Some(text) if !text.is_empty() => return text.to_string(),
            Some(_) => {
                tracing::debug!(key_path, "translation resolved to an empty string");
            }
            None => {
                tracing::warn!(key_path, "translation key not found");
            }
        }
        match fallback {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => key_path.to_string(),
        }
    }
}

impl<const N: usize> From<[(&str, TreeNode); N]> for TranslationTree {
    fn from(entries: [(&str, TreeNode); N]) -> Self {
        TranslationTree(
            entries
                .into_iter()
                .map(|(key, node)| (key.to_string(), node))
                .collect(),
        )
    }
}

/// Immutable store of every language's translation tree.
///
/// Loaded once at startup and injected into the facade rather than accessed
/// as ambient global state, so the lookup paths stay testable.
#[derive(Debug, Clone)]
pub struct Dictionary {
    trees: HashMap<Language, TranslationTree>,
    default_language: Language,
}

impl Dictionary {
    /// Build the dictionary from the locale files embedded in the binary.
    ///
    /// Embedded assets are authored alongside the crate, so a file that
    /// fails to parse is a build defect, not a runtime condition.
    pub fn embedded() -> Self {
        let mut trees = HashMap::new();
        for file in Locales::iter() {
            let filename = file.as_ref();
            let Some(stem) = filename.strip_suffix(".json") else {
                continue;
            };
            let Ok(language) = stem.parse::<Language>() else {
                tracing::warn!(file = filename, "skipping locale file outside the supported set");
                continue;
            };
            let content = Locales::get(filename)
                .expect("embedded locale file listed but not retrievable");
            let tree: TranslationTree =
                serde_json::from_slice(content.data.as_ref()).expect("invalid embedded locale file");
            trees.insert(language, tree);
        }
        Dictionary {
            trees,
            default_language: DEFAULT_LANGUAGE,
        }
    }

    /// Empty dictionary, useful as a base for the test builder.
    pub fn empty() -> Self {
        Dictionary {
            trees: HashMap::new(),
            default_language: DEFAULT_LANGUAGE,
        }
    }

    /// Load a dictionary from a directory of `<code>.json` files.
    ///
    /// Used by content audits and tests; the site itself ships the embedded
    /// dictionary. Non-JSON files are ignored and filenames outside the
    /// supported set are skipped with a warning.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::MissingDirectory(dir.to_path_buf()));
        }

        let entries = fs::read_dir(dir).map_err(|source| Error::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut trees = HashMap::new();
        for entry in entries {
            let entry = entry.map_err(|source| Error::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let stem = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or_default();
            let Ok(language) = stem.parse::<Language>() else {
                tracing::warn!(file = %path.display(), "skipping locale file outside the supported set");
                continue;
            };
            let content = fs::read_to_string(&path).map_err(|source| Error::Io {
                path: path.clone(),
                source,
            })?;
            let tree: TranslationTree =
                serde_json::from_str(&content).map_err(|source| Error::Parse {
                    path: path.clone(),
                    source,
                })?;
            trees.insert(language, tree);
        }

        Ok(Dictionary {
            trees,
            default_language: DEFAULT_LANGUAGE,
        })
    }

    /// Replace or add one language's tree. Builder-style, mainly for tests.
    pub fn with_tree(mut self, language: Language, tree: TranslationTree) -> Self {
        self.trees.insert(language, tree);
        self
    }

    pub fn default_language(&self) -> Language {
        self.default_language
    }

    /// Snapshot of the requested language's tree.
    ///
    /// A missing language falls back to the default language's tree; when
    /// even that is absent an empty tree is returned and every lookup
    /// degrades to its fallback behavior.
    pub fn tree(&self, language: Language) -> TranslationTree {
        if let Some(tree) = self.trees.get(&language) {
            return tree.clone();
        }
        if language != self.default_language {
            if let Some(tree) = self.trees.get(&self.default_language) {
                tracing::warn!(
                    requested = %language,
                    default = %self.default_language,
                    "no dictionary for requested language, using default"
                );
                return tree.clone();
            }
        }
        TranslationTree::default()
    }
}
