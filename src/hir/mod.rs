//! Symbol layer: extracting command-table and manifest symbols from parsed
//! XML, grouping them into merge scopes and resolving duplicates.

pub mod command_table;
pub mod diagnostics;
pub mod input;
pub mod manifest;
pub mod resolve;
pub mod symbols;

pub use command_table::{CommandTableError, parse_command_table};
pub use diagnostics::{Diagnostic, DiagnosticCollector, Severity, codes};
pub use input::{NamespaceMap, ScopeKey};
pub use manifest::{Manifest, ManifestError, parse_manifest};
pub use resolve::{
    FlatSymbols, NestedContainer, NestedGuid, ResolvedGuid, ResolvedId, merge_guids,
    merge_ids_flat, merge_ids_nested, resolve_flat, resolve_nested,
};
pub use symbols::{CommandTable, GuidSymbol, IdSymbol, SourcedTable};
