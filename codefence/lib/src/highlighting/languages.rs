//! Static language registration table.
//!
//! Every supported language id is registered once, before any rendering,
//! against a grammar from the syntax set. Unregistered ids (and registered
//! ids whose grammar is missing) highlight as plain text.

use super::grammars;
use lazy_static::lazy_static;
use std::collections::BTreeMap;
use syntect::parsing::{SyntaxReference, SyntaxSet};

/// One entry in the registration table.
#[derive(Debug, Clone, Copy)]
pub struct Registration {
    /// Canonical language id, as used in `language-<id>` class names.
    pub id: &'static str,
    /// Alternative ids accepted for this language.
    pub aliases: &'static [&'static str],
    /// syntect tokens (extension or name) tried in order.
    pub tokens: &'static [&'static str],
}

/// The built-in registrations.
pub const REGISTRATIONS: &[Registration] = &[
    Registration { id: "bash", aliases: &["sh", "shell", "zsh"], tokens: &["bash", "sh"] },
    Registration { id: "c", aliases: &["h"], tokens: &["c"] },
    Registration { id: "cpp", aliases: &["c++", "hpp", "cc"], tokens: &["cpp"] },
    Registration { id: "css", aliases: &[], tokens: &["css"] },
    Registration { id: "diff", aliases: &["patch"], tokens: &["diff"] },
    Registration { id: "go", aliases: &["golang"], tokens: &["go"] },
    Registration { id: "graphql", aliases: &["gql"], tokens: &["graphql", "gql"] },
    Registration { id: "html", aliases: &["xml"], tokens: &["html"] },
    Registration { id: "java", aliases: &[], tokens: &["java"] },
    Registration { id: "javascript", aliases: &["js", "mjs", "cjs"], tokens: &["js", "javascript"] },
    Registration { id: "json", aliases: &["json5"], tokens: &["json"] },
    Registration { id: "jsx", aliases: &[], tokens: &["jsx", "js"] },
    Registration { id: "kotlin", aliases: &["kt", "kts"], tokens: &["kt", "kotlin"] },
    Registration { id: "markdown", aliases: &["md"], tokens: &["md"] },
    Registration { id: "python", aliases: &["py"], tokens: &["py"] },
    Registration { id: "ruby", aliases: &["rb"], tokens: &["rb", "ruby"] },
    Registration { id: "rust", aliases: &["rs"], tokens: &["rs", "rust"] },
    Registration { id: "sql", aliases: &[], tokens: &["sql"] },
    Registration { id: "swift", aliases: &[], tokens: &["swift"] },
    Registration { id: "toml", aliases: &[], tokens: &["toml"] },
    Registration { id: "tsx", aliases: &[], tokens: &["tsx", "ts"] },
    Registration { id: "typescript", aliases: &["ts", "mts", "cts"], tokens: &["ts", "typescript"] },
    Registration { id: "yaml", aliases: &["yml"], tokens: &["yaml"] },
    Registration { id: "text", aliases: &["plain", "plaintext", "txt"], tokens: &[] },
];

#[derive(Debug, Clone)]
struct Entry {
    id: &'static str,
    /// Name of the resolved syntect grammar; `None` means plain text.
    syntax_name: Option<String>,
}

/// Maps language ids and aliases to grammars of a syntax set.
#[derive(Debug)]
pub struct LanguageRegistry {
    syntax_set: &'static SyntaxSet,
    entries: BTreeMap<&'static str, Entry>,
}

lazy_static! {
    static ref REGISTRY: LanguageRegistry =
        LanguageRegistry::new(grammars::syntax_set(), REGISTRATIONS);
}

impl LanguageRegistry {
    /// Builds a registry for `registrations` against `syntax_set`.
    pub fn new(syntax_set: &'static SyntaxSet, registrations: &[Registration]) -> Self {
        let mut entries = BTreeMap::new();

        for registration in registrations {
            let syntax_name = registration
                .tokens
                .iter()
                .find_map(|token| syntax_set.find_syntax_by_token(token))
                .map(|syntax| syntax.name.clone());

            if syntax_name.is_none() && !registration.tokens.is_empty() {
                tracing::debug!(
                    language = registration.id,
                    "No grammar found, registering as plain text"
                );
            }

            let entry = Entry {
                id: registration.id,
                syntax_name,
            };
            for key in std::iter::once(&registration.id).chain(registration.aliases) {
                entries.insert(*key, entry.clone());
            }
        }

        Self {
            syntax_set,
            entries,
        }
    }

    /// The registry of built-in languages over the bundled grammars.
    pub fn global() -> &'static Self {
        &REGISTRY
    }

    /// The syntax set grammars are resolved from.
    pub fn syntax_set(&self) -> &'static SyntaxSet {
        self.syntax_set
    }

    /// Whether `id` (or alias) is registered.
    pub fn is_registered(&self, id: &str) -> bool {
        self.entries.contains_key(id.to_lowercase().as_str())
    }

    /// The canonical id for `id` or one of its aliases.
    pub fn canonical_id(&self, id: &str) -> Option<&'static str> {
        self.entries.get(id.to_lowercase().as_str()).map(|e| e.id)
    }

    /// Resolves a language id to a grammar, falling back to plain text.
    pub fn resolve(&self, id: &str) -> &'static SyntaxReference {
        let entry = self.entries.get(id.to_lowercase().as_str());
        let syntax = entry
            .and_then(|e| e.syntax_name.as_deref())
            .and_then(|name| self.syntax_set.find_syntax_by_name(name));

        match syntax {
            Some(syntax) => syntax,
            None => {
                if entry.is_none() {
                    tracing::debug!(language = %id, "Unregistered language, using plain text");
                }
                self.syntax_set.find_syntax_plain_text()
            }
        }
    }

    /// Canonical ids with the grammar each resolves to, sorted by id.
    pub fn languages(&self) -> Vec<(&'static str, &str)> {
        let mut seen: Vec<(&'static str, &str)> = self
            .entries
            .values()
            .map(|e| (e.id, e.syntax_name.as_deref().unwrap_or("Plain Text")))
            .collect();
        seen.sort();
        seen.dedup();
        seen
    }
}
