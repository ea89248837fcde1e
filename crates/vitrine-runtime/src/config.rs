//! Configuração opcional em TOML.

use crate::catalog::Catalog;
use crate::error::{CatalogError, ConfigError};
use crate::registry::Registry;
use crate::sink::NO_OUTPUT;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Catálogo alternativo ao embarcado.
    pub catalog: Option<PathBuf>,
    /// Texto mostrado quando um snippet não loga nada.
    pub placeholder: String,
    /// Verifica o catálogo contra o registro antes de qualquer dispatch.
    pub strict: bool,
    pub page_title: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            placeholder: NO_OUTPUT.to_string(),
            strict: false,
            page_title: String::from("Vitrine"),
        }
    }
}

impl RuntimeConfig {
    /// `~/.config/vitrine/config.toml` (ou equivalente da plataforma).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vitrine").join("config.toml"))
    }

    /// Carrega `explicit` (que precisa existir) ou o arquivo padrão, se houver.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) if !path.exists() => Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Em modo strict, todo slot do catálogo precisa de snippet registrado.
    /// Fora dele não verifica nada.
    pub fn check_strict(&self, catalog: &Catalog, registry: &Registry) -> Result<(), CatalogError> {
        if self.strict {
            catalog.verify(registry)?;
        }
        Ok(())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: RuntimeConfig =
            toml::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        // Caminhos relativos são relativos ao próprio arquivo de configuração.
        if let Some(catalog) = config.catalog.take() {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            config.catalog = Some(if catalog.is_relative() {
                base.join(catalog)
            } else {
                catalog
            });
        }

        tracing::debug!(path = %path.display(), "configuração carregada");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use vitrine_sdk::Console;

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.placeholder, "(no output)");
        assert!(!config.strict);
        assert!(config.catalog.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "strict = true\ncatalog = \"pages/catalog.json\"\n").unwrap();

        let config = RuntimeConfig::load(Some(&path)).unwrap();
        assert!(config.strict);
        assert_eq!(config.placeholder, "(no output)");
        assert_eq!(config.catalog, Some(dir.path().join("pages/catalog.json")));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let err = RuntimeConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "colour = \"red\"\n").unwrap();
        let err = RuntimeConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_strict_mode_requires_complete_catalog() {
        let catalog = Catalog::from_json(
            r#"[{"id": "known", "title": "K"}, {"id": "ghost", "title": "G"}]"#,
        )
        .unwrap();
        let mut registry = Registry::new();
        registry.register("known", |_: &mut dyn Console| Ok(()));

        let relaxed = RuntimeConfig::default();
        relaxed.check_strict(&catalog, &registry).unwrap();

        let strict = RuntimeConfig {
            strict: true,
            ..RuntimeConfig::default()
        };
        let err = strict.check_strict(&catalog, &registry).unwrap_err();
        assert!(matches!(err, CatalogError::Incomplete { ref missing } if missing == &["ghost"]));

        registry.register("ghost", |_: &mut dyn Console| Ok(()));
        strict.check_strict(&catalog, &registry).unwrap();
    }
}
