//! Metadata extraction from `source.extension.vsixmanifest` documents.

use thiserror::Error;

use crate::base::LineCol;
use crate::syntax::xml::{self, Element, XmlError};

/// The only manifest schema version that is understood.
pub const SUPPORTED_VERSION: [u32; 3] = [2, 0, 0];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ManifestError {
    #[error("could not parse the manifest: {0}")]
    MalformedXml(#[from] XmlError),

    #[error("only version 2.0.0 VSIX manifest files are supported")]
    UnsupportedVersion { found: Option<String> },

    #[error("the manifest is missing the required node '{0}'")]
    RequiredFieldMissing(String),
}

impl ManifestError {
    pub fn position(&self) -> Option<LineCol> {
        match self {
            ManifestError::MalformedXml(err) => Some(err.position),
            _ => None,
        }
    }
}

/// Extension metadata declared by a manifest.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Manifest {
    pub id: String,
    pub name: String,
    pub description: String,
    pub language: String,
    pub author: String,
    pub version: String,
}

const ROOT: &str = "PackageManifest";
const METADATA: &str = "Metadata";

/// Where a metadata value lives below `/PackageManifest/Metadata`.
#[derive(Clone, Copy, Debug)]
enum Field {
    /// Trimmed inner text of a child element.
    Text(&'static str),
    /// Attribute of a child element.
    Attribute(&'static str, &'static str),
}

impl Field {
    fn path(self) -> String {
        match self {
            Field::Text(element) => format!("/{ROOT}/{METADATA}/{element}"),
            Field::Attribute(element, attribute) => {
                format!("/{ROOT}/{METADATA}/{element}/@{attribute}")
            }
        }
    }

    fn read(self, metadata: Option<&Element>) -> Result<String, ManifestError> {
        let value = metadata.and_then(|metadata| match self {
            Field::Text(element) => metadata
                .child(element)
                .map(|e| e.inner_text().trim().to_owned()),
            Field::Attribute(element, attribute) => metadata
                .child(element)
                .and_then(|e| e.attribute(attribute))
                .map(str::to_owned),
        });
        value.ok_or_else(|| ManifestError::RequiredFieldMissing(self.path()))
    }
}

const AUTHOR: Field = Field::Attribute("Identity", "Publisher");
const DESCRIPTION: Field = Field::Text("Description");
const ID: Field = Field::Attribute("Identity", "Id");
const LANGUAGE: Field = Field::Attribute("Identity", "Language");
const NAME: Field = Field::Text("DisplayName");
const VERSION: Field = Field::Attribute("Identity", "Version");

/// Parse a VSIX manifest.
pub fn parse_manifest(contents: &str) -> Result<Manifest, ManifestError> {
    let document = xml::parse(contents)?;
    let root = document.root();

    let declared = (root.name() == ROOT)
        .then(|| root.attribute("Version"))
        .flatten();
    // `2.0` and `2.0.0.0` parse, but are not equal to 2.0.0.
    if declared.and_then(parse_version).as_deref() != Some(&SUPPORTED_VERSION[..]) {
        return Err(ManifestError::UnsupportedVersion {
            found: declared.map(str::to_owned),
        });
    }

    let metadata = root.child(METADATA);
    Ok(Manifest {
        author: AUTHOR.read(metadata)?,
        description: DESCRIPTION.read(metadata)?,
        id: ID.read(metadata)?,
        language: LANGUAGE.read(metadata)?,
        name: NAME.read(metadata)?,
        version: VERSION.read(metadata)?,
    })
}

/// Parse a dotted version of two to four numeric components.
fn parse_version(text: &str) -> Option<Vec<u32>> {
    let parts = text
        .trim()
        .split('.')
        .map(|part| {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                None
            } else {
                part.parse::<u32>().ok()
            }
        })
        .collect::<Option<Vec<_>>>()?;

    (2..=4).contains(&parts.len()).then_some(parts)
}
