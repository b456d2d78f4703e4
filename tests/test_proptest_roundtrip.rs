//! Property-based tests for the literal grammars and name sanitization.
//!
//! - Both textual GUID forms of the same 128-bit value parse to that value,
//!   and formatting then reparsing is the identity.
//! - Hex and decimal ID literals parse back to the value they were printed from.
//! - Sanitized names are always valid C# identifiers / artifact names, and
//!   sanitizing is idempotent.
#![cfg(feature = "proptest")]

use proptest::prelude::*;
use uuid::Uuid;
use vsix_codegen::base::{
    is_artifact_name_char, is_identifier_part, is_identifier_start, sanitize_artifact_name,
    sanitize_identifier,
};
use vsix_codegen::syntax::{format_guid, format_id, parse_guid, parse_id};

// ============================================================================
// PROPTEST STRATEGIES
// ============================================================================

fn arb_uuid() -> impl Strategy<Value = Uuid> {
    any::<u128>().prop_map(Uuid::from_u128)
}

/// The struct form, with random `0x`/`0X` markers, padding and spacing.
fn struct_form(value: Uuid, upper_marker: bool, pad: bool, spaced: bool) -> String {
    let (d1, d2, d3, d4) = value.as_fields();
    let marker = if upper_marker { "0X" } else { "0x" };
    let sep = if spaced { ", " } else { "," };
    let bytes: Vec<String> = d4
        .iter()
        .map(|b| if pad { format!("{marker}{b:02x}") } else { format!("{marker}{b:x}") })
        .collect();
    if pad {
        format!(
            "{{{marker}{d1:08x}{sep}{marker}{d2:04x}{sep}{marker}{d3:04X}{sep}{{{}}}}}",
            bytes.join(sep)
        )
    } else {
        format!(
            "{{{marker}{d1:x}{sep}{marker}{d2:x}{sep}{marker}{d3:X}{sep}{{{}}}}}",
            bytes.join(sep)
        )
    }
}

// ============================================================================
// GUID LITERALS
// ============================================================================

proptest! {
    #[test]
    fn registry_form_roundtrips(value in arb_uuid(), upper in any::<bool>()) {
        let text = format_guid(&value);
        let text = if upper { text.to_uppercase() } else { text };
        prop_assert_eq!(parse_guid(&format!("{{{text}}}")).unwrap(), value);
    }

    #[test]
    fn struct_form_roundtrips(
        value in arb_uuid(),
        upper_marker in any::<bool>(),
        pad in any::<bool>(),
        spaced in any::<bool>(),
    ) {
        let text = struct_form(value, upper_marker, pad, spaced);
        prop_assert_eq!(parse_guid(&text).unwrap(), value);
    }

    #[test]
    fn both_forms_agree(value in arb_uuid()) {
        let registry = parse_guid(&format!("{{{}}}", format_guid(&value))).unwrap();
        let structured = parse_guid(&struct_form(value, false, true, false)).unwrap();
        prop_assert_eq!(registry, structured);
    }

    #[test]
    fn unbraced_guid_is_rejected(value in arb_uuid()) {
        prop_assert!(parse_guid(&format_guid(&value)).is_err());
        prop_assert!(parse_guid(&value.simple().to_string()).is_err());
    }
}

// ============================================================================
// ID LITERALS
// ============================================================================

proptest! {
    #[test]
    fn hex_id_roundtrips(value in any::<i32>()) {
        prop_assert_eq!(parse_id(&format_id(value)).unwrap(), value);
        prop_assert_eq!(parse_id(&format!("0X{:x}", value as u32)).unwrap(), value);
    }

    #[test]
    fn decimal_id_roundtrips(value in 0..=i32::MAX) {
        prop_assert_eq!(parse_id(&value.to_string()).unwrap(), value);
    }

    #[test]
    fn oversized_hex_id_is_rejected(value in (u32::MAX as u64 + 1)..=u64::MAX) {
        let text = format!("0x{value:x}");
        prop_assert!(parse_id(&text).is_err());
    }
}

// ============================================================================
// SANITIZATION
// ============================================================================

proptest! {
    #[test]
    fn sanitized_identifier_is_valid(name in any::<String>()) {
        let sanitized = sanitize_identifier(&name);
        let mut chars = sanitized.chars();
        let first = chars.next();
        prop_assert!(first.is_some_and(is_identifier_start));
        prop_assert!(chars.all(is_identifier_part));
        prop_assert_eq!(sanitize_identifier(&sanitized), sanitized.clone());
    }

    #[test]
    fn valid_identifier_is_unchanged(name in "[A-Za-z_][A-Za-z0-9_]{0,24}") {
        prop_assert_eq!(sanitize_identifier(&name), name);
    }

    #[test]
    fn sanitized_artifact_name_is_valid(name in any::<String>()) {
        let sanitized = sanitize_artifact_name(&name);
        prop_assert!(sanitized.chars().all(is_artifact_name_char));
        prop_assert_eq!(sanitized.chars().count(), name.chars().count());
    }
}
