use serde::{Deserialize, Serialize};
use shape_types::ShapeKind;

/// Mesh construction arguments for one shape, scaled by descriptor size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Box {
        width: f64,
        height: f64,
        depth: f64,
    },
    Sphere {
        radius: f64,
        width_segments: u32,
        height_segments: u32,
    },
    Cylinder {
        radius_top: f64,
        radius_bottom: f64,
        height: f64,
        radial_segments: u32,
    },
    Torus {
        radius: f64,
        tube: f64,
        radial_segments: u32,
        tubular_segments: u32,
    },
}

impl Geometry {
    pub fn for_shape(kind: ShapeKind, size: f64) -> Self {
        match kind {
            ShapeKind::Box => Geometry::Box {
                width: size,
                height: size,
                depth: size,
            },
            ShapeKind::Sphere => Geometry::Sphere {
                radius: size * 0.7,
                width_segments: 32,
                height_segments: 32,
            },
            ShapeKind::Cylinder => Geometry::Cylinder {
                radius_top: size * 0.5,
                radius_bottom: size * 0.5,
                height: size,
                radial_segments: 32,
            },
            ShapeKind::Torus => Geometry::Torus {
                radius: size * 0.5,
                tube: size * 0.2,
                radial_segments: 16,
                tubular_segments: 32,
            },
        }
    }
}

/// Vertical offset of the name label under a placed shape.
pub fn label_offset(size: f64) -> f64 {
    size * -1.5
}
