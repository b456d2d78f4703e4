//! Generation options handed over by the host build.

use std::fmt;

use crate::codegen::EmissionStrategy;

/// Language version assumed when the host does not provide one.
pub const DEFAULT_LANG_VERSION: &str = "7.3";

/// Build-wide options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct BuildOptions {
    /// Namespace used by documents that do not set their own.
    pub root_namespace: Option<String>,
    /// C# language version of the consuming project.
    pub lang_version: Option<String>,
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.root_namespace = Some(namespace.into());
        self
    }

    pub fn with_lang_version(mut self, version: impl Into<String>) -> Self {
        self.lang_version = Some(version.into());
        self
    }

    /// The configured language version, or [`DEFAULT_LANG_VERSION`].
    pub fn lang_version(&self) -> &str {
        non_empty(self.lang_version.as_deref()).unwrap_or(DEFAULT_LANG_VERSION)
    }

    #[cfg(feature = "serde")]
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Per-document options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct DocumentOptions {
    /// Overrides the root namespace for this document.
    pub namespace: Option<String>,
    /// Output format selector, see [`OutputFormat::parse`].
    pub format: Option<String>,
}

impl DocumentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::parse(self.format.as_deref().unwrap_or_default())
    }

    #[cfg(feature = "serde")]
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Output format of a command table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    #[default]
    Default,
    /// Layout compatible with the VSIX Synchronizer extension.
    VsixSynchronizer,
}

impl OutputFormat {
    /// Select a format by name. Unknown and empty selectors mean [`OutputFormat::Default`].
    pub fn parse(selector: &str) -> Self {
        if selector.trim().eq_ignore_ascii_case("VsixSynchronizer") {
            OutputFormat::VsixSynchronizer
        } else {
            OutputFormat::Default
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Default => "Default",
            OutputFormat::VsixSynchronizer => "VsixSynchronizer",
        }
    }

    pub fn strategy(self) -> EmissionStrategy {
        match self {
            OutputFormat::Default => EmissionStrategy::Nested,
            OutputFormat::VsixSynchronizer => EmissionStrategy::FlatDual,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// The namespace a document generates into.
///
/// The document's own namespace wins over the root namespace; empty values
/// count as unset.
pub fn resolve_namespace<'a>(
    build: &'a BuildOptions,
    document: &'a DocumentOptions,
) -> Option<&'a str> {
    non_empty(document.namespace.as_deref()).or_else(|| non_empty(build.root_namespace.as_deref()))
}
