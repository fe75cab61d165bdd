use std::fmt;

use serde::{Deserialize, Serialize};

/// The base geometry a name maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Box,
    Sphere,
    Cylinder,
    Torus,
}

impl ShapeKind {
    /// All kinds, in selection order.
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Box,
        ShapeKind::Sphere,
        ShapeKind::Cylinder,
        ShapeKind::Torus,
    ];

    /// Pick a kind from an arbitrary integer, reduced modulo 4.
    pub fn from_index(index: u32) -> Self {
        Self::ALL[(index % 4) as usize]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Box => "box",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Cylinder => "cylinder",
            ShapeKind::Torus => "torus",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The visual fingerprint of a name.
///
/// Field names serialize in camelCase so that snapshots written by the
/// browser UI and by this crate are interchangeable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeDescriptor {
    /// Base geometry.
    pub shape: ShapeKind,
    /// Uniform scale, always within `[0.6, 1.2]`.
    pub size: f64,
    /// Shader variant index in `0..=4`.
    pub shader_type: u8,
    /// Lowercase `#rrggbb` color.
    pub color: String,
    /// The name exactly as the user typed it. Also the gallery dedup key.
    pub original_name: String,
}
