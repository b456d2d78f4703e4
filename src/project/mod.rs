//! Host-facing surface: options and the generation entry point.

pub mod generator;
pub mod options;

pub use generator::{Document, DocumentKind, GenerationResult, generate};
pub use options::{BuildOptions, DEFAULT_LANG_VERSION, DocumentOptions, OutputFormat, resolve_namespace};
