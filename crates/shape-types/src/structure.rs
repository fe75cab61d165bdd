use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::placed::PlacedShape;

/// Name given to a fresh working structure.
pub const DEFAULT_STRUCTURE_NAME: &str = "My Collaborative Structure";

/// A named, saved composition of placed shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Structure {
    /// Unique across all saved structures.
    pub id: i64,
    pub name: String,
    /// Shapes in the order they were added.
    pub shapes: Vec<PlacedShape>,
    pub created_at: DateTime<Utc>,
}

impl Structure {
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn find_shape(&self, id: i64) -> Option<&PlacedShape> {
        self.shapes.iter().find(|s| s.id == id)
    }
}
