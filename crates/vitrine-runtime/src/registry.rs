//! Registro id → snippet. Preenchido uma vez na inicialização e só lido
//! depois disso.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use vitrine_sdk::{Console, Snippet, SnippetDef, SnippetResult};

/// Registro com todos os snippets embarcados no binário.
pub static BUILTIN_REGISTRY: Lazy<Registry> = Lazy::new(Registry::builtin);

#[derive(Default)]
pub struct Registry {
    snippets: BTreeMap<String, Box<dyn Snippet>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Todos os pacotes de snippets conhecidos.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register_all(basics_snippets::SNIPPETS);
        registry.register_all(types_snippets::SNIPPETS);
        registry.register_all(flow_snippets::SNIPPETS);
        registry
    }

    /// Associa `id` a uma closure. Um id já existente é substituído.
    pub fn register<F>(&mut self, id: impl Into<String>, snippet: F)
    where
        F: Fn(&mut dyn Console) -> SnippetResult + Send + Sync + 'static,
    {
        self.register_snippet(id, Box::new(snippet));
    }

    pub fn register_snippet(&mut self, id: impl Into<String>, snippet: Box<dyn Snippet>) {
        let id = id.into();
        if self.snippets.insert(id.clone(), snippet).is_some() {
            tracing::debug!(%id, "snippet substituído");
        }
    }

    pub fn register_all(&mut self, defs: &[SnippetDef]) {
        for def in defs {
            self.register(def.id, def.run);
        }
    }

    pub fn get(&self, id: &str) -> Option<&dyn Snippet> {
        self.snippets.get(id).map(|s| s.as_ref())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.snippets.contains_key(id)
    }

    /// Ids registrados em ordem alfabética.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.snippets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("ids", &self.snippets.keys().collect::<Vec<_>>())
            .finish()
    }
}
