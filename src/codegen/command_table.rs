//! C# emission for resolved command-table symbols.

use std::sync::Arc;

use super::GeneratedFile;
use super::writer::CodeWriter;
use crate::base::{escape_xml_doc, sanitize_artifact_name};
use crate::hir::{FlatSymbols, NestedContainer, ResolvedId};
use crate::syntax::literals::{format_guid, format_id};

pub const PACKAGE_GUIDS: &str = "PackageGuids";
pub const PACKAGE_IDS: &str = "PackageIds";

/// C# expression for an ID constant.
///
/// Negative values come from hex literals above `0x7FFFFFFF` and do not fit
/// a plain `int` constant, so they are wrapped in an unchecked cast.
pub fn id_literal(value: i32) -> String {
    if value < 0 {
        format!("unchecked((int){})", format_id(value))
    } else {
        format_id(value)
    }
}

/// Artifact name of the nested-layout file for a table.
pub fn nested_artifact_name(table_name: &str) -> String {
    sanitize_artifact_name(&format!("{table_name}.g.cs"))
}

fn write_id(writer: &mut CodeWriter, id: &ResolvedId) {
    writer.line(&format!(
        "public const int {} = {};",
        id.name,
        id_literal(id.value)
    ));
}

/// One artifact per container, each GUID as a nested class.
pub fn write_nested(
    namespace: &Arc<str>,
    containers: &[NestedContainer],
    lang_version: &str,
) -> Vec<GeneratedFile> {
    containers
        .iter()
        .map(|container| {
            let mut writer = CodeWriter::new(lang_version);
            writer.open(&format!("namespace {namespace}"));
            writer.line(&format!(
                "/// <summary>Defines symbols from the {}.vsct file.</summary>",
                escape_xml_doc(&container.table_name)
            ));
            writer.open(&format!("internal sealed partial class {}", container.name));

            for nested in &container.guids {
                writer.line(&format!(
                    "/// <summary>Defines the \"{}\" GUIDSymbol and its IDSymbols.</summary>",
                    escape_xml_doc(nested.guid.display_name())
                ));
                writer.open(&format!("internal sealed partial class {}", nested.guid.name));
                writer.line(&format!(
                    "public const string GuidString = \"{}\";",
                    format_guid(&nested.guid.value)
                ));
                writer.line("public static readonly System.Guid Guid = new System.Guid(GuidString);");
                for id in &nested.ids {
                    write_id(&mut writer, id);
                }
                writer.close();
            }

            writer.close();
            writer.close();

            GeneratedFile::new(
                namespace.clone(),
                nested_artifact_name(&container.table_name),
                writer.finish(),
            )
        })
        .collect()
}

/// `PackageGuids` and `PackageIds`, shared by every table of the namespace.
pub fn write_flat(
    namespace: &Arc<str>,
    symbols: &FlatSymbols,
    lang_version: &str,
) -> Vec<GeneratedFile> {
    let mut guids = CodeWriter::new(lang_version);
    guids.open(&format!("namespace {namespace}"));
    guids.line("/// <summary>Defines GUIDs from VSCT files.</summary>");
    guids.open(&format!("internal sealed partial class {PACKAGE_GUIDS}"));
    for guid in &symbols.guids {
        guids.line(&format!(
            "public const string {}String = \"{}\";",
            guid.name,
            format_guid(&guid.value)
        ));
        guids.line(&format!(
            "public static readonly System.Guid {0} = new System.Guid({0}String);",
            guid.name
        ));
    }
    guids.close();
    guids.close();

    let mut ids = CodeWriter::new(lang_version);
    ids.open(&format!("namespace {namespace}"));
    ids.line("/// <summary>Defines IDs from VSCT files.</summary>");
    ids.open(&format!("internal sealed partial class {PACKAGE_IDS}"));
    for id in &symbols.ids {
        write_id(&mut ids, id);
    }
    ids.close();
    ids.close();

    vec![
        GeneratedFile::new(namespace.clone(), format!("{PACKAGE_GUIDS}.g.cs"), guids.finish()),
        GeneratedFile::new(namespace.clone(), format!("{PACKAGE_IDS}.g.cs"), ids.finish()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::{NestedGuid, ResolvedGuid};
    use rstest::rstest;
    use uuid::Uuid;

    const PREAMBLE: &str =
        "// <auto-generated>\n//     This code was generated by vsix-codegen.\n// </auto-generated>\n\n";

    fn resolved_guid(name: &str, original: &str, value: &str) -> ResolvedGuid {
        ResolvedGuid {
            name: name.to_owned(),
            original: original.into(),
            value: Uuid::parse_str(value).unwrap(),
        }
    }

    fn resolved_id(name: &str, value: i32) -> ResolvedId {
        ResolvedId {
            name: name.to_owned(),
            original: name.into(),
            value,
        }
    }

    #[rstest]
    #[case(1, "0x0001")]
    #[case(0x1234, "0x1234")]
    #[case(0x12345, "0x12345")]
    #[case(-1, "unchecked((int)0xFFFFFFFF)")]
    #[case(i32::MIN, "unchecked((int)0x80000000)")]
    fn test_id_literal(#[case] value: i32, #[case] expected: &str) {
        assert_eq!(id_literal(value), expected);
    }

    #[test]
    fn test_nested_layout() {
        let containers = [NestedContainer {
            name: "Commands".to_owned(),
            table_name: "Commands".into(),
            guids: vec![NestedGuid {
                guid: resolved_guid(
                    "MyPackage",
                    "guidMyPackage",
                    "e5d94a98-30f6-47da-88bb-1bdf3b4157ff",
                ),
                ids: vec![resolved_id("MyCommand", 1)],
            }],
        }];

        let files = write_nested(&Arc::from("Foo"), &containers, "7.3");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "Commands.g.cs");
        assert_eq!(&*files[0].namespace, "Foo");
        assert_eq!(
            files[0].content,
            format!(
                "{PREAMBLE}namespace Foo
{{
    /// <summary>Defines symbols from the Commands.vsct file.</summary>
    internal sealed partial class Commands
    {{
        /// <summary>Defines the \"MyPackage\" GUIDSymbol and its IDSymbols.</summary>
        internal sealed partial class MyPackage
        {{
            public const string GuidString = \"e5d94a98-30f6-47da-88bb-1bdf3b4157ff\";
            public static readonly System.Guid Guid = new System.Guid(GuidString);
            public const int MyCommand = 0x0001;
        }}
    }}
}}
"
            )
        );
    }

    #[test]
    fn test_nested_artifact_name_is_sanitized() {
        let containers = [NestedContainer {
            name: "My_Commands".to_owned(),
            table_name: "My+Commands".into(),
            guids: vec![],
        }];
        let files = write_nested(&Arc::from("Foo"), &containers, "7.3");
        assert_eq!(files[0].name, "My_Commands.g.cs");
        assert!(files[0].content.contains("internal sealed partial class My_Commands"));
    }

    #[test]
    fn test_nested_doc_comments_stay_on_one_line() {
        let containers = [NestedContainer {
            name: "A_B".to_owned(),
            table_name: "A&B".into(),
            guids: vec![NestedGuid {
                guid: resolved_guid(
                    "Pkg",
                    "guidPkg</summary>\nclass Injected {}",
                    "e5d94a98-30f6-47da-88bb-1bdf3b4157ff",
                ),
                ids: vec![],
            }],
        }];

        let content = &write_nested(&Arc::from("Foo"), &containers, "7.3")[0].content;
        assert!(content.contains(
            "    /// <summary>Defines symbols from the A&amp;B.vsct file.</summary>\n"
        ));
        assert!(content.contains(
            "        /// <summary>Defines the \"Pkg&lt;/summary&gt; class Injected {}\" GUIDSymbol and its IDSymbols.</summary>\n"
        ));
        assert!(!content.contains("\nclass Injected"));
    }

    #[test]
    fn test_flat_layout() {
        let symbols = FlatSymbols {
            guids: vec![resolved_guid(
                "MyPackage",
                "guidMyPackage",
                "e5d94a98-30f6-47da-88bb-1bdf3b4157ff",
            )],
            ids: vec![resolved_id("MyCommand", 1), resolved_id("Wide", -2)],
        };

        let files = write_flat(&Arc::from("Foo.Bar"), &symbols, "latest");
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["PackageGuids.g.cs", "PackageIds.g.cs"]);

        assert!(files[0].content.contains("#nullable enable\n"));
        assert!(files[0].content.ends_with(
            "namespace Foo.Bar
{
    /// <summary>Defines GUIDs from VSCT files.</summary>
    internal sealed partial class PackageGuids
    {
        public const string MyPackageString = \"e5d94a98-30f6-47da-88bb-1bdf3b4157ff\";
        public static readonly System.Guid MyPackage = new System.Guid(MyPackageString);
    }
}
"
        ));
        assert!(files[1].content.ends_with(
            "    internal sealed partial class PackageIds
    {
        public const int MyCommand = 0x0001;
        public const int Wide = unchecked((int)0xFFFFFFFE);
    }
}
"
        ));
    }
}
