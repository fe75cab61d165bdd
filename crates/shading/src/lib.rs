//! Render-side parameters for shape descriptors.
//!
//! The GPU programs live in the page. This crate owns what feeds them: the
//! geometry arguments per shape kind, the uniform block per shader variant,
//! and the small amount of per-frame animation state.

pub mod animation;
pub mod color;
pub mod geometry;
pub mod material;
pub mod variant;

pub use animation::{ShaderCycler, Spin};
pub use color::{ColorError, Rgb};
pub use geometry::{label_offset, Geometry};
pub use material::*;
pub use variant::ShaderVariant;
