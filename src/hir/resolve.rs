//! Symbol merging: resolving every declaration of a merge scope into one
//! collision-free, sorted set of symbols.
//!
//! All command tables that generate into the same namespace (with the same
//! layout) form one merge scope. Declarations are keyed by their sanitized
//! name:
//!
//! 1. **Ordering** - candidates are visited in ordinal order of their
//!    original name; ties keep document order, so the first document wins.
//! 2. **Coalescing** - a later declaration with the same key and the same
//!    value is dropped silently.
//! 3. **Conflicts** - a later declaration with the same key and a different
//!    value is reported as a duplicate and dropped; the first value stays.
//!
//! GUIDs always merge across the whole scope. IDs merge either across the
//! whole scope ([`merge_ids_flat`], the `PackageIds` layout where every ID
//! lands in one class) or only within their GUID ([`merge_ids_nested`], the
//! default layout where each GUID gets its own nested class).

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use uuid::Uuid;

use super::diagnostics::DiagnosticCollector;
use super::symbols::{GuidSymbol, SourcedTable};
use crate::base::{Location, sanitize_identifier, strip_guid_prefix};

// ============================================================================
// RESOLVED SYMBOLS
// ============================================================================

/// A GUID that survived merging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedGuid {
    /// Sanitized identifier, `guid` prefix removed.
    pub name: String,
    /// Name of the winning declaration as written.
    pub original: SmolStr,
    pub value: Uuid,
}

impl ResolvedGuid {
    /// The original name without its `guid` prefix, for documentation.
    pub fn display_name(&self) -> &str {
        strip_guid_prefix(&self.original)
    }
}

/// An ID that survived merging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedId {
    /// Sanitized identifier.
    pub name: String,
    pub original: SmolStr,
    pub value: i32,
}

/// Sanitized key for a GUID symbol name.
pub fn guid_key(name: &str) -> String {
    sanitize_identifier(strip_guid_prefix(name))
}

struct Candidate<'a, T> {
    original: &'a SmolStr,
    key: String,
    value: T,
    path: &'a Arc<str>,
}

/// Core of every merge pass: first declaration of a key wins.
///
/// Returns the winners sorted by key.
fn resolve<'a, T>(
    mut candidates: Vec<Candidate<'a, T>>,
    sink: &mut DiagnosticCollector,
) -> Vec<Candidate<'a, T>>
where
    T: Copy + PartialEq,
{
    // Stable: equal names keep document order.
    candidates.sort_by(|a, b| a.original.as_str().cmp(b.original.as_str()));

    let mut seen: FxHashMap<String, T> = FxHashMap::default();
    let mut winners = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        match seen.get(&candidate.key) {
            None => {
                seen.insert(candidate.key.clone(), candidate.value);
                winners.push(candidate);
            }
            Some(existing) if *existing == candidate.value => {}
            Some(_) => {
                tracing::warn!(
                    symbol = %candidate.original,
                    key = %candidate.key,
                    path = %candidate.path,
                    "conflicting duplicate symbol; keeping the first definition"
                );
                sink.duplicate_symbol(Location::file(candidate.path.clone()), candidate.original);
            }
        }
    }

    winners.sort_by(|a, b| a.key.cmp(&b.key));
    winners
}

// ============================================================================
// MERGE PASSES
// ============================================================================

/// Merge every GUID symbol of every table in the scope.
pub fn merge_guids(tables: &[SourcedTable], sink: &mut DiagnosticCollector) -> Vec<ResolvedGuid> {
    let candidates = tables
        .iter()
        .flat_map(|sourced| {
            sourced.table.guid_symbols.iter().map(move |guid| Candidate {
                original: &guid.name,
                key: guid_key(&guid.name),
                value: guid.value,
                path: &sourced.path,
            })
        })
        .collect();

    resolve(candidates, sink)
        .into_iter()
        .map(|c| ResolvedGuid {
            name: c.key,
            original: c.original.clone(),
            value: c.value,
        })
        .collect()
}

/// Merge all IDs of all GUIDs of all tables into one flat scope.
pub fn merge_ids_flat(tables: &[SourcedTable], sink: &mut DiagnosticCollector) -> Vec<ResolvedId> {
    let candidates = tables
        .iter()
        .flat_map(|sourced| {
            sourced.table.id_symbols().map(move |id| Candidate {
                original: &id.name,
                key: sanitize_identifier(&id.name),
                value: id.value,
                path: &sourced.path,
            })
        })
        .collect();

    into_ids(resolve(candidates, sink))
}

/// Merge the IDs of one GUID container.
///
/// `declarations` are the (coalesced) declarations of a single GUID symbol,
/// each with the path of its document. IDs under other GUIDs never collide
/// with these.
pub fn merge_ids_nested(
    declarations: &[(&Arc<str>, &GuidSymbol)],
    sink: &mut DiagnosticCollector,
) -> Vec<ResolvedId> {
    let candidates = declarations
        .iter()
        .flat_map(|&(path, guid)| {
            guid.id_symbols.iter().map(move |id| Candidate {
                original: &id.name,
                key: sanitize_identifier(&id.name),
                value: id.value,
                path,
            })
        })
        .collect();

    into_ids(resolve(candidates, sink))
}

fn into_ids(winners: Vec<Candidate<'_, i32>>) -> Vec<ResolvedId> {
    winners
        .into_iter()
        .map(|c| ResolvedId {
            name: c.key,
            original: c.original.clone(),
            value: c.value,
        })
        .collect()
}

// ============================================================================
// LAYOUT-SPECIFIC RESOLUTION
// ============================================================================

/// Symbols for the `PackageGuids`/`PackageIds` layout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlatSymbols {
    pub guids: Vec<ResolvedGuid>,
    pub ids: Vec<ResolvedId>,
}

/// Resolve a scope for the flat layout.
pub fn resolve_flat(tables: &[SourcedTable], sink: &mut DiagnosticCollector) -> FlatSymbols {
    FlatSymbols {
        guids: merge_guids(tables, sink),
        ids: merge_ids_flat(tables, sink),
    }
}

/// One GUID class inside a nested container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NestedGuid {
    pub guid: ResolvedGuid,
    pub ids: Vec<ResolvedId>,
}

/// One outer class of the nested layout, generated for a command table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NestedContainer {
    /// Sanitized class name.
    pub name: String,
    /// Table name as supplied by the host (file stem).
    pub table_name: SmolStr,
    pub guids: Vec<NestedGuid>,
}

/// Resolve a scope for the nested layout.
///
/// GUID values are decided scope-wide by [`merge_guids`]. Tables whose
/// sanitized names match share one container. A container lists the GUIDs
/// its tables declared with the winning value; conflicting declarations are
/// left out.
pub fn resolve_nested(
    tables: &[SourcedTable],
    sink: &mut DiagnosticCollector,
) -> Vec<NestedContainer> {
    let winners = merge_guids(tables, sink);
    let by_key: FxHashMap<&str, &ResolvedGuid> =
        winners.iter().map(|g| (g.name.as_str(), g)).collect();

    let mut groups: IndexMap<String, Vec<&SourcedTable>> = IndexMap::new();
    for sourced in tables {
        groups
            .entry(sanitize_identifier(&sourced.table.name))
            .or_default()
            .push(sourced);
    }

    let mut containers: Vec<NestedContainer> = groups
        .into_iter()
        .map(|(name, members)| {
            let mut declarations: IndexMap<&str, Vec<(&Arc<str>, &GuidSymbol)>> = IndexMap::new();
            for sourced in &members {
                for guid in &sourced.table.guid_symbols {
                    let key = guid_key(&guid.name);
                    if let Some((&key, winner)) = by_key.get_key_value(key.as_str()) {
                        if winner.value == guid.value {
                            declarations
                                .entry(key)
                                .or_default()
                                .push((&sourced.path, guid));
                        }
                    }
                }
            }

            let mut guids: Vec<NestedGuid> = declarations
                .into_iter()
                .map(|(key, declarations)| NestedGuid {
                    guid: by_key[key].clone(),
                    ids: merge_ids_nested(&declarations, sink),
                })
                .collect();
            guids.sort_by(|a, b| a.guid.name.cmp(&b.guid.name));

            NestedContainer {
                name,
                table_name: members[0].table.name.clone(),
                guids,
            }
        })
        .collect();

    containers.sort_by(|a, b| a.name.cmp(&b.name));
    containers
}
