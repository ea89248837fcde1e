//! Catálogo: a lista de slots de saída que a página mostra, em ordem.
//!
//! Mesmo formato de registry JSON usado para cápsulas: um array de entradas
//! com `id`, `title` e `section`.

use crate::error::CatalogError;
use crate::registry::Registry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../catalog.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub section: String,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(text)?;
        Self::from_entries(entries)
    }

    pub fn from_entries(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for (pos, entry) in entries.iter().enumerate() {
            if entry.id.trim().is_empty() {
                return Err(CatalogError::EmptyId(pos));
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(CatalogError::DuplicateId(entry.id.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), entries = catalog.len(), "catálogo carregado");
        Ok(catalog)
    }

    /// Catálogo embarcado no binário.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids do catálogo sem snippet registrado, na ordem do catálogo.
    pub fn missing(&self, registry: &Registry) -> Vec<String> {
        self.ids()
            .filter(|id| !registry.contains(id))
            .map(str::to_string)
            .collect()
    }

    /// Snippets registrados que nenhuma entrada do catálogo exibe.
    pub fn unlisted(&self, registry: &Registry) -> Vec<String> {
        registry
            .ids()
            .filter(|id| self.get(id).is_none())
            .map(str::to_string)
            .collect()
    }

    /// Falha se algum slot do catálogo não tiver snippet.
    pub fn verify(&self, registry: &Registry) -> Result<(), CatalogError> {
        let missing = self.missing(registry);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::Incomplete { missing })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::BUILTIN_REGISTRY;
    use tempfile::tempdir;
    use vitrine_sdk::Console;

    #[test]
    fn test_builtin_catalog_matches_builtin_registry() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.is_empty());
        catalog.verify(&BUILTIN_REGISTRY).unwrap();
        assert!(catalog.unlisted(&BUILTIN_REGISTRY).is_empty());
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let err = Catalog::from_json(
            r#"[{"id": "a", "title": "A"}, {"id": "a", "title": "again"}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "a"));
    }

    #[test]
    fn test_empty_id_is_rejected() {
        let err = Catalog::from_json(r#"[{"id": " ", "title": "blank"}]"#).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyId(0)));
    }

    #[test]
    fn test_missing_and_unlisted() {
        let catalog = Catalog::from_json(
            r#"[{"id": "known", "title": "K"}, {"id": "ghost", "title": "G"}]"#,
        )
        .unwrap();
        let mut registry = Registry::new();
        registry.register("known", |_: &mut dyn Console| Ok(()));
        registry.register("extra", |_: &mut dyn Console| Ok(()));

        assert_eq!(catalog.missing(&registry), vec!["ghost".to_string()]);
        assert_eq!(catalog.unlisted(&registry), vec!["extra".to_string()]);

        let err = catalog.verify(&registry).unwrap_err();
        assert_eq!(err.to_string(), "ids do catálogo sem snippet registrado: ghost");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        fs::write(&path, r#"[{"id": "x", "title": "X", "section": "S"}]"#).unwrap();

        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("x").unwrap().section, "S");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = Catalog::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }
}
