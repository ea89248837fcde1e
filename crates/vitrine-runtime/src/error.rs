use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("falha ao ler catálogo '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catálogo JSON inválido: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("entrada do catálogo na posição {0} tem id vazio")]
    EmptyId(usize),

    #[error("id '{0}' aparece mais de uma vez no catálogo")]
    DuplicateId(String),

    #[error("ids do catálogo sem snippet registrado: {}", .missing.join(", "))]
    Incomplete { missing: Vec<String> },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("arquivo de configuração não encontrado: {0}")]
    NotFound(PathBuf),

    #[error("falha ao ler configuração '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuração TOML inválida em '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
