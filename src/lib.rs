//! # vsix-codegen
//!
//! Generates C# symbol classes from Visual Studio extension sources:
//! command tables (`.vsct`) and the VSIX manifest
//! (`source.extension.vsixmanifest`).
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project → Options, document classification, parallel generation
//!   ↓
//! codegen → C# writer, nested and flat command-table layouts, Vsix class
//!   ↓
//! hir     → Symbol extraction, merge scopes, duplicate resolution, diagnostics
//!   ↓
//! syntax  → XML element tree (quick-xml), GUID and ID literal grammars
//!   ↓
//! base    → Primitives (LineCol, Location, name sanitization)
//! ```
//!
//! ## Example
//!
//! ```
//! use vsix_codegen::{BuildOptions, Document, generate};
//!
//! let vsct = r#"<CommandTable xmlns="http://schemas.microsoft.com/VisualStudio/2005-10-18/CommandTable">
//!   <Symbols>
//!     <GuidSymbol name="guidMyPackage" value="{e5d94a98-30f6-47da-88bb-1bdf3b4157ff}">
//!       <IDSymbol name="MyCommand" value="0x0001" />
//!     </GuidSymbol>
//!   </Symbols>
//! </CommandTable>"#;
//!
//! let result = generate(
//!     &BuildOptions::new().with_root_namespace("Foo"),
//!     &[Document::new("Commands.vsct", vsct)],
//! );
//!
//! let file = result.file("Foo", "Commands.g.cs").unwrap();
//! assert!(file.content.contains("public const int MyCommand = 0x0001;"));
//! assert!(result.diagnostics.is_empty());
//! ```

/// Foundation types: positions, locations, name sanitization
pub mod base;

/// Symbol layer: command tables, manifests, merging, diagnostics
pub mod hir;

/// C# emission
pub mod codegen;

/// Markup and literal grammars
pub mod syntax;

/// Host-facing options and the generation entry point
pub mod project;

// Re-export the host surface
pub use codegen::{EmissionStrategy, GeneratedFile};
pub use hir::{Diagnostic, Severity, codes};
pub use project::{
    BuildOptions, Document, DocumentKind, DocumentOptions, GenerationResult, OutputFormat, generate,
};

pub use base::{LineCol, LineIndex, Location};
