//! Runtime da Vitrine: harness de captura, registro de snippets, dispatcher
//! e destinos de exibição.

pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod harness;
pub mod registry;
pub mod sink;

pub use catalog::{Catalog, CatalogEntry};
pub use config::RuntimeConfig;
pub use dispatch::{output_target, Dispatcher};
pub use error::{CatalogError, ConfigError};
pub use harness::{Transcript, ERROR_PREFIX};
pub use registry::{Registry, BUILTIN_REGISTRY};
pub use sink::{DisplayResult, DisplaySink, MemorySink, PageSink, TerminalSink, NO_OUTPUT};
