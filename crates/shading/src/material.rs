use serde::{Deserialize, Serialize};
use shape_types::ShapeDescriptor;
use tracing::debug;

use crate::color::{ColorError, Rgb};
use crate::variant::ShaderVariant;

/// Uniforms for the plain lit material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardParams {
    pub color: Rgb,
    pub roughness: f32,
    pub metalness: f32,
}

/// Uniforms for the fresnel glow shader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlowParams {
    pub base_color: Rgb,
    pub pulse_speed: f32,
    pub glow_intensity: f32,
    pub glow_size: f32,
    pub time: f32,
}

/// Uniforms for the animated grid shader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternParams {
    pub base_color: Rgb,
    pub line_color: Rgb,
    pub grid_scale: f32,
    pub line_width: f32,
    pub anim_speed: f32,
    pub time: f32,
}

/// Uniforms for the banded bark shader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeParams {
    pub dark_color: Rgb,
    pub light_color: Rgb,
    pub fresnel_color: Rgb,
    pub time: f32,
}

/// Uniforms for the hologram shader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HologramParams {
    pub holo_color: Rgb,
    pub edge_intensity: f32,
    pub scanline_speed: f32,
    pub scanline_count: f32,
    pub glitch_intensity: f32,
    pub time: f32,
}

/// A drawable surface: the variant plus its uniform block.
///
/// The renderer dispatches on the tag. Animated variants are driven by
/// [`Material::advance`] once per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Material {
    Standard(StandardParams),
    Glow(GlowParams),
    Pattern(PatternParams),
    Tree(TreeParams),
    Hologram(HologramParams),
}

impl Material {
    /// Build the uniforms for `variant` tinted with `base`.
    pub fn new(variant: ShaderVariant, base: Rgb) -> Self {
        match variant {
            ShaderVariant::Standard => Material::Standard(StandardParams {
                color: base,
                roughness: 0.4,
                metalness: 0.1,
            }),
            ShaderVariant::Glow => Material::Glow(GlowParams {
                base_color: base,
                pulse_speed: 1.2,
                glow_intensity: 0.9,
                glow_size: 2.5,
                time: 0.0,
            }),
            ShaderVariant::Pattern => Material::Pattern(PatternParams {
                base_color: base,
                line_color: Rgb::WHITE.lerp(base, 0.3),
                grid_scale: 15.0,
                line_width: 0.05,
                anim_speed: 0.7,
                time: 0.0,
            }),
            ShaderVariant::Tree => Material::Tree(TreeParams {
                dark_color: base.scale(0.5),
                light_color: base,
                fresnel_color: base.lerp(Rgb::WHITE, 0.5),
                time: 0.0,
            }),
            ShaderVariant::Hologram => Material::Hologram(HologramParams {
                holo_color: base,
                edge_intensity: 1.8,
                scanline_speed: 2.5,
                scanline_count: 50.0,
                glitch_intensity: 0.05,
                time: 0.0,
            }),
        }
    }

    /// Build the material a descriptor selects.
    pub fn for_descriptor(descriptor: &ShapeDescriptor) -> Result<Self, ColorError> {
        let base = Rgb::from_hex(&descriptor.color)?;
        let variant = ShaderVariant::from_index(descriptor.shader_type);
        debug!(
            name = %descriptor.original_name,
            variant = variant.label(),
            "building material"
        );
        Ok(Self::new(variant, base))
    }

    pub fn variant(&self) -> ShaderVariant {
        match self {
            Material::Standard(_) => ShaderVariant::Standard,
            Material::Glow(_) => ShaderVariant::Glow,
            Material::Pattern(_) => ShaderVariant::Pattern,
            Material::Tree(_) => ShaderVariant::Tree,
            Material::Hologram(_) => ShaderVariant::Hologram,
        }
    }

    /// Set the time uniform to `elapsed` seconds since the view started.
    ///
    /// Takes absolute time rather than a delta, so replaying a frame leaves
    /// the same state. The standard variant has no time uniform.
    pub fn advance(&mut self, elapsed: f32) {
        if let Some(time) = self.time_mut() {
            *time = elapsed;
        }
    }

    /// Current time uniform, `None` for the static variant.
    pub fn time(&self) -> Option<f32> {
        match self {
            Material::Standard(_) => None,
            Material::Glow(p) => Some(p.time),
            Material::Pattern(p) => Some(p.time),
            Material::Tree(p) => Some(p.time),
            Material::Hologram(p) => Some(p.time),
        }
    }

    fn time_mut(&mut self) -> Option<&mut f32> {
        match self {
            Material::Standard(_) => None,
            Material::Glow(p) => Some(&mut p.time),
            Material::Pattern(p) => Some(&mut p.time),
            Material::Tree(p) => Some(&mut p.time),
            Material::Hologram(p) => Some(&mut p.time),
        }
    }
}
