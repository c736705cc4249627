//! Stable identifiers for labels that arrive without one.
//!
//! When an edit form is rehydrated with only a display label, the control
//! still needs a non-null identifier to key the option by. The identifier is
//! derived from the label alone, so the same label maps to the same
//! placeholder across renders and remounts.

/// Prefix marking a synthesized identifier.
pub const PLACEHOLDER_PREFIX: &str = "temp_";

/// Derive the placeholder identifier for `label`.
///
/// 32-bit polynomial rolling hash over the UTF-16 code units, folded into a
/// non-negative integer.
pub fn placeholder_id(label: &str) -> String {
    let hash = label.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_mul(31).wrapping_add(i32::from(unit))
    });
    format!("{PLACEHOLDER_PREFIX}{}", hash.unsigned_abs())
}

/// Whether `id` has the placeholder shape (`temp_` followed by digits).
pub fn is_placeholder_id(id: &str) -> bool {
    id.strip_prefix(PLACEHOLDER_PREFIX)
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}
