//! C# emission for manifest metadata.

use std::sync::Arc;

use super::GeneratedFile;
use super::writer::CodeWriter;
use crate::base::escape_string_literal;
use crate::hir::Manifest;

pub const VSIX_CLASS: &str = "Vsix";

/// Write the `Vsix` constants class.
pub fn write_manifest(namespace: &Arc<str>, manifest: &Manifest, lang_version: &str) -> GeneratedFile {
    let members: [(&str, &str, &str); 6] = [
        ("The author of the extension.", "Author", manifest.author.as_str()),
        ("The description of the extension.", "Description", manifest.description.as_str()),
        ("The extension identifier.", "Id", manifest.id.as_str()),
        ("The default language for the extension.", "Language", manifest.language.as_str()),
        ("The name of the extension.", "Name", manifest.name.as_str()),
        ("The version of the extension.", "Version", manifest.version.as_str()),
    ];

    let mut writer = CodeWriter::new(lang_version);
    writer.open(&format!("namespace {namespace}"));
    writer.line(
        "/// <summary>Defines constants from the <c>source.extension.vsixmanifest</c> file.</summary>",
    );
    writer.open(&format!("internal sealed partial class {VSIX_CLASS}"));
    for (i, (summary, member, value)) in members.into_iter().enumerate() {
        if i > 0 {
            writer.blank_line();
        }
        writer.line(&format!("/// <summary>{summary}</summary>"));
        writer.line(&format!(
            "public const string {member} = \"{}\";",
            escape_string_literal(value)
        ));
    }
    writer.close();
    writer.close();

    GeneratedFile::new(namespace.clone(), format!("{VSIX_CLASS}.g.cs"), writer.finish())
}
