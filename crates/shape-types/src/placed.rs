use serde::{Deserialize, Serialize};

use crate::descriptor::ShapeDescriptor;

/// Scene-space position `[x, y, z]`.
pub type Position = [f64; 3];

/// A shape instance positioned inside a structure.
///
/// Serialized flat: the descriptor fields sit next to `position` and `id`,
/// matching the stored `collaborativeStructures` records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedShape {
    #[serde(flatten)]
    pub descriptor: ShapeDescriptor,
    pub position: Position,
    /// Unique within the owning structure. Derived from a millisecond timestamp.
    pub id: i64,
}

impl PlacedShape {
    pub fn new(descriptor: ShapeDescriptor, position: Position, id: i64) -> Self {
        Self {
            descriptor,
            position,
            id,
        }
    }

    pub fn name(&self) -> &str {
        &self.descriptor.original_name
    }
}
