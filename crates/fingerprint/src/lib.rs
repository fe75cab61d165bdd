//! Deterministic name → shape mapping.
//!
//! Every derived quantity is computed from the UTF-16 code units of the
//! trimmed, lower-cased name. That is the unit the browser UI sees, so a
//! descriptor computed here matches one computed by the page. Characters
//! outside the Basic Multilingual Plane therefore contribute two surrogate
//! units each.

pub mod color;

use shape_types::{ShapeDescriptor, ShapeKind};

pub use color::hsl_to_hex;

/// Longest name the input field accepts, in UTF-16 code units.
/// Enforced by callers, not by [`generate`].
pub const MAX_NAME_CHARS: usize = 30;

/// Number of shader variants a name can select.
pub const SHADER_VARIANTS: u32 = 5;

pub const MIN_SIZE: f64 = 0.6;
pub const MAX_SIZE: f64 = 1.2;

const SATURATION: f64 = 0.7;
const LIGHTNESS: f64 = 0.6;

/// Trim and lower-case a name. Returns `None` if nothing is left.
///
/// Trims the same characters as the browser's `String.prototype.trim`.
pub fn normalize(name: &str) -> Option<String> {
    let trimmed = name.trim_matches(is_js_whitespace);
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// Map a name to its fingerprint.
///
/// Returns `None` for empty or whitespace-only input. Any other input,
/// including digits, punctuation and emoji, produces a descriptor.
pub fn generate(name: &str) -> Option<ShapeDescriptor> {
    let normalized = normalize(name)?;
    let units: Vec<u16> = normalized.encode_utf16().collect();

    let shape = ShapeKind::from_index(u32::from(units[0]));
    let size = MIN_SIZE + (units.len() as f64 / 10.0).min(MAX_SIZE - MIN_SIZE);
    let shader_type = (vowel_count(&units) % SHADER_VARIANTS) as u8;

    let sum: u64 = units.iter().map(|&u| u64::from(u)).sum();
    let hue = (sum % 360) as f64 / 360.0;

    Some(ShapeDescriptor {
        shape,
        size,
        shader_type,
        color: hsl_to_hex(hue, SATURATION, LIGHTNESS),
        original_name: name.to_string(),
    })
}

/// One-line summary shown next to the preview.
pub fn describe(descriptor: &ShapeDescriptor) -> String {
    format!(
        "Type: {}, Size: {:.2}, Shader: {}",
        descriptor.shape, descriptor.size, descriptor.shader_type
    )
}

// JS counts U+FEFF as whitespace and U+0085 as not.
fn is_js_whitespace(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

fn vowel_count(units: &[u16]) -> u32 {
    units
        .iter()
        .filter(|&&u| matches!(u, 0x61 | 0x65 | 0x69 | 0x6f | 0x75))
        .count() as u32
}
