//! GUID and ID literal grammars.
//!
//! The command-table schema only documents two GUID spellings:
//!
//! ```text
//! {6D484634-E53D-4a2c-ADCB-55145C9362C8}
//! { 0x6d484634, 0xe53d, 0x4a2c, { 0xad, 0xcb, 0x55, 0x14, 0x5c, 0x93, 0x62, 0xc8 } }
//! ```
//!
//! and IDs are either decimal or `0x`-prefixed hexadecimal.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LiteralError {
    #[error("'{0}' is not a valid GUID")]
    InvalidGuid(String),
    #[error("'{0}' is not a valid ID")]
    InvalidId(String),
}

/// Parse a GUID in registry (`{8-4-4-4-12}`) or struct (`{0x..., {0x.., ...}}`) form.
pub fn parse_guid(text: &str) -> Result<Uuid, LiteralError> {
    let trimmed = text.trim();
    parse_registry_guid(trimmed)
        .or_else(|| parse_struct_guid(trimmed))
        .ok_or_else(|| LiteralError::InvalidGuid(text.to_owned()))
}

fn parse_registry_guid(text: &str) -> Option<Uuid> {
    let inner = text.strip_prefix('{')?.strip_suffix('}')?;
    // 36 characters is only accepted by uuid in the hyphenated form.
    if inner.len() != 36 {
        return None;
    }
    Uuid::try_parse(inner).ok()
}

fn parse_struct_guid(text: &str) -> Option<Uuid> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let mut cursor = HexCursor::new(&compact);

    cursor.eat("{")?;
    let d1 = cursor.hex_field(8)? as u32;
    cursor.eat(",")?;
    let d2 = cursor.hex_field(4)? as u16;
    cursor.eat(",")?;
    let d3 = cursor.hex_field(4)? as u16;
    cursor.eat(",")?;
    cursor.eat("{")?;
    let mut d4 = [0u8; 8];
    for (i, byte) in d4.iter_mut().enumerate() {
        if i > 0 {
            cursor.eat(",")?;
        }
        *byte = cursor.hex_field(2)? as u8;
    }
    cursor.eat("}")?;
    cursor.eat("}")?;

    cursor.is_empty().then(|| Uuid::from_fields(d1, d2, d3, &d4))
}

struct HexCursor<'a> {
    rest: &'a str,
}

impl<'a> HexCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    fn eat(&mut self, token: &str) -> Option<()> {
        self.rest = self.rest.strip_prefix(token)?;
        Some(())
    }

    /// `0x` followed by 1 to `width` hex digits.
    fn hex_field(&mut self, width: usize) -> Option<u64> {
        let rest = self
            .rest
            .strip_prefix("0x")
            .or_else(|| self.rest.strip_prefix("0X"))?;
        let len = rest.bytes().take_while(u8::is_ascii_hexdigit).count();
        if len == 0 || len > width {
            return None;
        }
        let value = u64::from_str_radix(&rest[..len], 16).ok()?;
        self.rest = &rest[len..];
        Some(value)
    }

    fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }
}

/// Parse an ID: decimal, or hexadecimal with a `0x`/`0X` marker.
///
/// Hex values up to 32 bits are accepted; anything above `0x7FFFFFFF` is
/// reinterpreted as a negative `i32`.
pub fn parse_id(text: &str) -> Result<i32, LiteralError> {
    let trimmed = text.trim();
    let invalid = || LiteralError::InvalidId(text.to_owned());

    let hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"));

    match hex {
        Some(digits) if digits.bytes().all(|b| b.is_ascii_hexdigit()) => {
            if digits.is_empty() {
                return Err(invalid());
            }
            u32::from_str_radix(digits, 16)
                .map(|value| value as i32)
                .map_err(|_| invalid())
        }
        _ => {
            if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            trimmed.parse::<i32>().map_err(|_| invalid())
        }
    }
}

/// Canonical lowercase hyphenated form, e.g. `e5d94a98-30f6-47da-88bb-1bdf3b4157ff`.
pub fn format_guid(value: &Uuid) -> String {
    value.hyphenated().to_string()
}

/// `0x` followed by at least four uppercase hex digits (two's complement for negatives).
pub fn format_id(value: i32) -> String {
    format!("0x{:04X}", value as u32)
}
