//! Name sanitization for generated C# code and output artifacts.
//!
//! Symbol names in command tables are hand-written and frequently contain
//! characters that cannot appear in a C# identifier (`Foo.Bar`, `123`).
//! These helpers map any name onto a valid identifier or artifact name by
//! character substitution, so the mapping is deterministic and stable.

use std::borrow::Cow;

/// Whether `ch` may start a C# identifier.
#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch == '_' || unicode_ident::is_xid_start(ch)
}

/// Whether `ch` may appear after the first character of a C# identifier.
#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    unicode_ident::is_xid_continue(ch)
}

/// Whether `ch` may appear in the name of a generated artifact.
///
/// Any identifier character or one of `. , - _ ( ) [ ] { }` and space.
/// `+` and `` ` `` are rejected for compatibility with older hosts.
#[inline]
pub fn is_artifact_name_char(ch: char) -> bool {
    is_identifier_part(ch)
        || matches!(
            ch,
            '.' | ',' | '-' | '_' | ' ' | '(' | ')' | '[' | ']' | '{' | '}'
        )
}

fn substitute(name: &str, valid: impl Fn(char) -> bool) -> Cow<'_, str> {
    if name.chars().all(&valid) {
        return Cow::Borrowed(name);
    }

    Cow::Owned(
        name.chars()
            .map(|ch| if valid(ch) { ch } else { '_' })
            .collect(),
    )
}

/// Turn an arbitrary symbol name into a valid C# identifier.
///
/// ```
/// use vsix_codegen::base::sanitize_identifier;
///
/// assert_eq!(sanitize_identifier("Foo.Bar"), "Foo_Bar");
/// assert_eq!(sanitize_identifier("123"), "_123");
/// ```
pub fn sanitize_identifier(name: &str) -> String {
    let name = substitute(name, is_identifier_part);

    match name.chars().next() {
        Some(first) if is_identifier_start(first) => name.into_owned(),
        _ => format!("_{name}"),
    }
}

/// Turn an arbitrary string into a valid artifact (file/hint) name.
pub fn sanitize_artifact_name(name: &str) -> String {
    substitute(name, is_artifact_name_char).into_owned()
}

/// Drop a leading `guid` from names such as `guidMyPackage`.
///
/// The prefix is only removed when followed by an uppercase ASCII letter,
/// so `guidoo` is left alone.
pub fn strip_guid_prefix(name: &str) -> &str {
    match name.strip_prefix("guid") {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_uppercase()) => rest,
        _ => name,
    }
}

/// Escape free text for embedding in a regular C# string literal.
pub fn escape_string_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Escape free text for a single-line `///` XML doc comment.
///
/// Markup characters become entities and line breaks become spaces, so the
/// text can neither end the comment line nor break the doc XML.
pub fn escape_xml_doc(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' | '\n' | '\u{2028}' | '\u{2029}' | '\u{85}' => out.push(' '),
            c => out.push(c),
        }
    }
    out
}
