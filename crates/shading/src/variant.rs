use serde::{Deserialize, Serialize};

/// One of the five surface effects a descriptor can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShaderVariant {
    /// Lit, untextured surface. Ignores time.
    Standard,
    /// Pulsing fresnel edge glow.
    Glow,
    /// Animated grid lines.
    Pattern,
    /// Banded bark texture over the grid.
    Tree,
    /// Scanlines, flicker and glitch bands.
    Hologram,
}

impl ShaderVariant {
    pub const ALL: [ShaderVariant; 5] = [
        ShaderVariant::Standard,
        ShaderVariant::Glow,
        ShaderVariant::Pattern,
        ShaderVariant::Tree,
        ShaderVariant::Hologram,
    ];

    /// Select a variant by index, reduced modulo 5.
    pub fn from_index(index: u8) -> Self {
        Self::ALL[usize::from(index) % Self::ALL.len()]
    }

    pub fn index(&self) -> u8 {
        match self {
            ShaderVariant::Standard => 0,
            ShaderVariant::Glow => 1,
            ShaderVariant::Pattern => 2,
            ShaderVariant::Tree => 3,
            ShaderVariant::Hologram => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShaderVariant::Standard => "Standard",
            ShaderVariant::Glow => "Glow",
            ShaderVariant::Pattern => "Pattern",
            ShaderVariant::Tree => "Tree",
            ShaderVariant::Hologram => "Hologram",
        }
    }

    /// The variant after this one, wrapping back to `Standard`.
    pub fn next(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Whether the variant reads a time uniform.
    pub fn is_animated(&self) -> bool {
        !matches!(self, ShaderVariant::Standard)
    }
}
