//! Generation entry point: from loaded documents to generated files.
//!
//! ```text
//! documents ─par_iter→ parse ─join→ NamespaceMap ─par_iter→ merge + emit
//! ```
//!
//! Each document parses independently. Merging starts only once every
//! document has been parsed, since a namespace can be fed by any of them.

use std::sync::Arc;

use rayon::prelude::*;
use rustc_hash::FxHashSet;
use tracing::{debug, trace, warn};

use super::options::{BuildOptions, DocumentOptions, resolve_namespace};
use crate::base::Location;
use crate::codegen::{EmissionStrategy, GeneratedFile, nested_artifact_name, write_manifest};
use crate::hir::{
    Diagnostic, DiagnosticCollector, Manifest, NamespaceMap, ScopeKey, SourcedTable,
    parse_command_table, parse_manifest,
};

const COMMAND_TABLE_EXTENSION: &str = "vsct";
const MANIFEST_FILE_NAME: &str = "source.extension.vsixmanifest";

/// A loaded input document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    pub path: Arc<str>,
    pub contents: String,
    pub options: DocumentOptions,
}

impl Document {
    pub fn new(path: impl Into<Arc<str>>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
            options: DocumentOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DocumentOptions) -> Self {
        self.options = options;
        self
    }

    /// File name without directories. Both separators are accepted.
    pub fn file_name(&self) -> &str {
        self.path.rsplit(['/', '\\']).next().unwrap_or_default()
    }

    /// File name without its last extension. A name that is only an
    /// extension, such as `.vsct`, has an empty stem.
    pub fn file_stem(&self) -> &str {
        let name = self.file_name();
        name.rsplit_once('.').map_or(name, |(stem, _)| stem)
    }

    pub fn kind(&self) -> Option<DocumentKind> {
        DocumentKind::classify(self.file_name())
    }
}

/// What a document is, judged by its file name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    CommandTable,
    Manifest,
}

impl DocumentKind {
    pub fn classify(file_name: &str) -> Option<Self> {
        if file_name.eq_ignore_ascii_case(MANIFEST_FILE_NAME) {
            return Some(DocumentKind::Manifest);
        }
        match file_name.rsplit_once('.') {
            Some((_, extension)) if extension.eq_ignore_ascii_case(COMMAND_TABLE_EXTENSION) => {
                Some(DocumentKind::CommandTable)
            }
            _ => None,
        }
    }
}

/// Everything a generation run produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationResult {
    pub files: Vec<GeneratedFile>,
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Look up a generated file by namespace and artifact name.
    pub fn file(&self, namespace: &str, name: &str) -> Option<&GeneratedFile> {
        self.files
            .iter()
            .find(|f| &*f.namespace == namespace && f.name == name)
    }
}

/// Outcome of parsing a single document.
enum Parsed {
    Table {
        namespace: Arc<str>,
        strategy: EmissionStrategy,
        table: SourcedTable,
    },
    Manifest {
        namespace: Arc<str>,
        path: Arc<str>,
        manifest: Manifest,
    },
    Skipped,
    Failed(Diagnostic),
}

fn parse_document(options: &BuildOptions, document: &Document) -> Parsed {
    let Some(kind) = document.kind() else {
        trace!(path = %document.path, "not a command table or manifest; skipping");
        return Parsed::Skipped;
    };

    let location = Location::file(document.path.clone());
    let mut sink = DiagnosticCollector::new();

    let Some(namespace) = resolve_namespace(options, &document.options) else {
        warn!(path = %document.path, "no namespace for document");
        sink.no_namespace(location, document.file_name());
        return failed(sink);
    };
    let namespace: Arc<str> = Arc::from(namespace);

    match kind {
        DocumentKind::CommandTable => {
            match parse_command_table(document.file_stem(), &document.contents) {
                Ok(table) => {
                    let strategy = document.options.output_format().strategy();
                    debug!(
                        path = %document.path,
                        namespace = %namespace,
                        ?strategy,
                        guids = table.guid_symbols.len(),
                        "parsed command table"
                    );
                    Parsed::Table {
                        namespace,
                        strategy,
                        table: SourcedTable::new(document.path.clone(), table),
                    }
                }
                Err(err) => {
                    warn!(path = %document.path, error = %err, "invalid command table");
                    sink.invalid_command_table(
                        location.with_position(Some(err.position())),
                        &document.path,
                        &err.to_string(),
                    );
                    failed(sink)
                }
            }
        }
        DocumentKind::Manifest => match parse_manifest(&document.contents) {
            Ok(manifest) => {
                debug!(path = %document.path, namespace = %namespace, id = %manifest.id, "parsed manifest");
                Parsed::Manifest {
                    namespace,
                    path: document.path.clone(),
                    manifest,
                }
            }
            Err(err) => {
                warn!(path = %document.path, error = %err, "invalid manifest");
                sink.invalid_manifest(location.with_position(err.position()), &err.to_string());
                failed(sink)
            }
        },
    }
}

fn failed(mut sink: DiagnosticCollector) -> Parsed {
    match sink.take().pop() {
        Some(diagnostic) => Parsed::Failed(diagnostic),
        None => Parsed::Skipped,
    }
}

/// Generate C# for every recognized document.
///
/// Output is deterministic: files follow the order in which namespaces
/// first appear among the documents, manifests come last in document order.
/// A failing document only loses its own output. When two files would share
/// a name in one namespace, the later one is dropped with a warning.
pub fn generate(options: &BuildOptions, documents: &[Document]) -> GenerationResult {
    let lang_version = options.lang_version();

    // Parse in parallel; collect keeps document order.
    let parsed: Vec<Parsed> = documents
        .par_iter()
        .map(|document| parse_document(options, document))
        .collect();

    let mut sink = DiagnosticCollector::new();
    let mut scopes = NamespaceMap::new();
    let mut manifests = Vec::new();
    for outcome in parsed {
        match outcome {
            Parsed::Table {
                namespace,
                strategy,
                table,
            } => scopes.insert(namespace, strategy, table),
            Parsed::Manifest {
                namespace,
                path,
                manifest,
            } => manifests.push((namespace, path, manifest)),
            Parsed::Skipped => {}
            Parsed::Failed(diagnostic) => sink.add(diagnostic),
        }
    }

    // Merge and emit each scope in parallel.
    let scope_list: Vec<_> = scopes.iter().collect();
    let emitted: Vec<(Vec<(GeneratedFile, Location)>, DiagnosticCollector)> = scope_list
        .into_par_iter()
        .map(|(key, tables)| {
            let mut local = DiagnosticCollector::new();
            let files = key
                .layout
                .emit(&key.namespace, tables, lang_version, &mut local)
                .into_iter()
                .map(|file| {
                    let origin = artifact_origin(key, tables, &file);
                    (file, origin)
                })
                .collect();
            (files, local)
        })
        .collect();

    let mut candidates = Vec::new();
    for (scope_files, scope_diagnostics) in emitted {
        sink.extend(scope_diagnostics);
        candidates.extend(scope_files);
    }
    candidates.extend(manifests.into_iter().map(|(namespace, path, manifest)| {
        (write_manifest(&namespace, &manifest, lang_version), Location::file(path))
    }));

    // Artifact names must be unique per namespace; the first file keeps the name.
    let mut taken = FxHashSet::default();
    let mut files = Vec::new();
    for (file, origin) in candidates {
        if !taken.insert((file.namespace.clone(), file.name.clone())) {
            warn!(
                location = %origin,
                namespace = %file.namespace,
                name = %file.name,
                "generated file name already taken; skipping"
            );
            sink.duplicate_artifact(origin, &file.namespace, &file.name);
            continue;
        }
        files.push(file);
    }

    for file in &files {
        debug!(namespace = %file.namespace, name = %file.name, bytes = file.content.len(), "generated file");
    }

    GenerationResult {
        files,
        diagnostics: sink.take(),
    }
}

/// The document a scope's file is reported against.
///
/// A nested file comes from the first table with its artifact name; a flat
/// file from the first table of the scope.
fn artifact_origin(
    key: &ScopeKey<EmissionStrategy>,
    tables: &[SourcedTable],
    file: &GeneratedFile,
) -> Location {
    let table = match key.layout {
        EmissionStrategy::Nested => tables
            .iter()
            .find(|sourced| nested_artifact_name(&sourced.table.name) == file.name),
        EmissionStrategy::FlatDual => None,
    };
    table
        .or_else(|| tables.first())
        .map_or_else(Location::none, |sourced| Location::file(sourced.path.clone()))
}
