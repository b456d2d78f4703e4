//! C# code generation.
//!
//! Command tables are emitted in one of two layouts, chosen per document by
//! its output format:
//!
//! ```text
//! Nested    → {Table}.g.cs        class {Table} { class {Guid} { GuidString, Guid, ids... } }
//! FlatDual  → PackageGuids.g.cs   class PackageGuids { {Guid}String, {Guid} }
//!             PackageIds.g.cs     class PackageIds { ids... }
//! ```
//!
//! Manifests always produce `Vsix.g.cs`.

pub mod command_table;
pub mod manifest;
pub mod writer;

use std::sync::Arc;

use crate::hir::{DiagnosticCollector, SourcedTable, resolve_flat, resolve_nested};

pub use command_table::{id_literal, nested_artifact_name, write_flat, write_nested};
pub use manifest::write_manifest;
pub use writer::{CodeWriter, supports_nullable};

/// A generated source artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Namespace the artifact declares its types in.
    pub namespace: Arc<str>,
    /// Artifact (hint) name, unique within the namespace.
    pub name: String,
    pub content: String,
}

impl GeneratedFile {
    pub fn new(namespace: Arc<str>, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Command-table layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EmissionStrategy {
    /// One class per table, one nested class per GUID.
    #[default]
    Nested,
    /// `PackageGuids` and `PackageIds` shared by the whole namespace.
    FlatDual,
}

impl EmissionStrategy {
    /// Merge the tables of one scope and emit them in this layout.
    pub fn emit(
        self,
        namespace: &Arc<str>,
        tables: &[SourcedTable],
        lang_version: &str,
        sink: &mut DiagnosticCollector,
    ) -> Vec<GeneratedFile> {
        match self {
            EmissionStrategy::Nested => {
                let containers = resolve_nested(tables, sink);
                write_nested(namespace, &containers, lang_version)
            }
            EmissionStrategy::FlatDual => {
                let symbols = resolve_flat(tables, sink);
                write_flat(namespace, &symbols, lang_version)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::{CommandTable, GuidSymbol, IdSymbol};
    use uuid::Uuid;

    fn tables() -> Vec<SourcedTable> {
        let guid = |name: &str, n: u128, ids: Vec<IdSymbol>| GuidSymbol::new(name, Uuid::from_u128(n), ids);
        vec![
            SourcedTable::new(
                "One.vsct",
                CommandTable::new("One", vec![guid("guidA", 1, vec![IdSymbol::new("X", 1)])]),
            ),
            SourcedTable::new(
                "Two.vsct",
                CommandTable::new("Two", vec![guid("guidB", 2, vec![IdSymbol::new("X", 1)])]),
            ),
        ]
    }

    #[test]
    fn test_nested_emits_one_file_per_table() {
        let mut sink = DiagnosticCollector::new();
        let files = EmissionStrategy::Nested.emit(&Arc::from("Ns"), &tables(), "7.3", &mut sink);
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["One.g.cs", "Two.g.cs"]);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_flat_emits_two_files_per_namespace() {
        let mut sink = DiagnosticCollector::new();
        let files = EmissionStrategy::FlatDual.emit(&Arc::from("Ns"), &tables(), "7.3", &mut sink);
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["PackageGuids.g.cs", "PackageIds.g.cs"]);
        assert_eq!(files[1].content.matches("public const int X").count(), 1);
        // Same name, same value: coalesced silently.
        assert!(sink.is_empty());
    }
}
