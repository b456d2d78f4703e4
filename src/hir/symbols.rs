//! Symbols declared by a command table.

use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;
use uuid::Uuid;

use crate::syntax::literals::{format_guid, format_id};

/// An integer command identifier declared under a [`GuidSymbol`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IdSymbol {
    /// Name as written by the author (not sanitized).
    pub name: SmolStr,
    pub value: i32,
}

impl IdSymbol {
    pub fn new(name: impl Into<SmolStr>, value: i32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl fmt::Display for IdSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, format_id(self.value))
    }
}

/// A named GUID and the IDs scoped to it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GuidSymbol {
    /// Name as written by the author (not sanitized, `guid` prefix kept).
    pub name: SmolStr,
    pub value: Uuid,
    pub id_symbols: Vec<IdSymbol>,
}

impl GuidSymbol {
    pub fn new(name: impl Into<SmolStr>, value: Uuid, id_symbols: Vec<IdSymbol>) -> Self {
        Self {
            name: name.into(),
            value,
            id_symbols,
        }
    }
}

impl fmt::Display for GuidSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} [", self.name, format_guid(&self.value))?;
        for (i, id) in self.id_symbols.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{id}")?;
        }
        f.write_str("]")
    }
}

/// All symbols of one command-table document.
///
/// The order of `guid_symbols` follows the document but carries no meaning;
/// emission always re-sorts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandTable {
    /// Usually the file stem of the document (`Commands` for `Commands.vsct`).
    pub name: SmolStr,
    pub guid_symbols: Vec<GuidSymbol>,
}

impl CommandTable {
    pub fn new(name: impl Into<SmolStr>, guid_symbols: Vec<GuidSymbol>) -> Self {
        Self {
            name: name.into(),
            guid_symbols,
        }
    }

    /// Every ID of every GUID, in declaration order.
    pub fn id_symbols(&self) -> impl Iterator<Item = &IdSymbol> + '_ {
        self.guid_symbols.iter().flat_map(|guid| guid.id_symbols.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.guid_symbols.is_empty()
    }
}

/// A command table together with the path of the document it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourcedTable {
    pub path: Arc<str>,
    pub table: CommandTable,
}

impl SourcedTable {
    pub fn new(path: impl Into<Arc<str>>, table: CommandTable) -> Self {
        Self {
            path: path.into(),
            table,
        }
    }
}
