//! Symbol extraction from `.vsct` command-table documents.
//!
//! ```xml
//! <CommandTable xmlns="http://schemas.microsoft.com/VisualStudio/2005-10-18/CommandTable">
//!   <Symbols>
//!     <GuidSymbol name="guidMyPackage" value="{e5d94a98-30f6-47da-88bb-1bdf3b4157ff}">
//!       <IDSymbol name="MyCommand" value="0x0100" />
//!     </GuidSymbol>
//!   </Symbols>
//! </CommandTable>
//! ```
//!
//! Extraction is fail-fast: the first malformed literal aborts the document
//! and no partial table is returned.

use smol_str::SmolStr;
use thiserror::Error;

use super::symbols::{CommandTable, GuidSymbol, IdSymbol};
use crate::base::LineCol;
use crate::syntax::literals::{LiteralError, parse_guid, parse_id};
use crate::syntax::xml::{self, Element, XmlError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandTableError {
    #[error("could not parse the command table: {0}")]
    MalformedXml(#[from] XmlError),

    #[error("invalid GUIDSymbol '{name}' at {position}: {source}")]
    InvalidGuidSymbol {
        name: String,
        position: LineCol,
        #[source]
        source: LiteralError,
    },

    #[error("invalid IDSymbol '{name}' at {position}: {source}")]
    InvalidIdSymbol {
        name: String,
        position: LineCol,
        #[source]
        source: LiteralError,
    },
}

impl CommandTableError {
    /// Position in the document the error refers to.
    pub fn position(&self) -> LineCol {
        match self {
            CommandTableError::MalformedXml(err) => err.position,
            CommandTableError::InvalidGuidSymbol { position, .. }
            | CommandTableError::InvalidIdSymbol { position, .. } => *position,
        }
    }
}

const ROOT: &str = "CommandTable";
const SYMBOLS: &str = "Symbols";
const GUID_SYMBOL: &str = "GuidSymbol";
const ID_SYMBOL: &str = "IDSymbol";

/// Parse a command table document.
///
/// `name` becomes [`CommandTable::name`]; callers pass the file stem.
pub fn parse_command_table(
    name: impl Into<SmolStr>,
    contents: &str,
) -> Result<CommandTable, CommandTableError> {
    let document = xml::parse(contents)?;
    let root = document.root();

    let mut guid_symbols = Vec::new();
    // A document with a different root simply declares no symbols.
    if root.name() == ROOT {
        for symbols in root.children_named(SYMBOLS) {
            for element in symbols.children_named(GUID_SYMBOL) {
                guid_symbols.push(guid_symbol(element)?);
            }
        }
    }

    Ok(CommandTable::new(name, guid_symbols))
}

fn guid_symbol(element: &Element) -> Result<GuidSymbol, CommandTableError> {
    let name = element.attribute_or_empty("name");
    let value = parse_guid(element.attribute_or_empty("value")).map_err(|source| {
        CommandTableError::InvalidGuidSymbol {
            name: name.to_owned(),
            position: element.position(),
            source,
        }
    })?;

    let id_symbols = element
        .children_named(ID_SYMBOL)
        .map(id_symbol)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(GuidSymbol::new(name, value, id_symbols))
}

fn id_symbol(element: &Element) -> Result<IdSymbol, CommandTableError> {
    let name = element.attribute_or_empty("name");
    let value = parse_id(element.attribute_or_empty("value")).map_err(|source| {
        CommandTableError::InvalidIdSymbol {
            name: name.to_owned(),
            position: element.position(),
            source,
        }
    })?;
    Ok(IdSymbol::new(name, value))
}
