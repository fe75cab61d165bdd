use serde::{Deserialize, Serialize};

use shading::{Geometry, Material};
use shape_types::{PlacedShape, Position, ShapeDescriptor, Structure};

/// Messages from the UI (JavaScript) to the app core (WASM).
/// Serialized as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiToApp {
    // -- Generator --
    /// Compute the fingerprint for a typed name and hold it for saving.
    Generate { name: String },
    /// Save the most recently generated shape to the gallery.
    SaveShape,

    // -- Gallery --
    ListShapes,
    ClearGallery {
        #[serde(default)]
        confirmed: bool,
    },

    // -- Working structure --
    /// Place a gallery shape into the working structure.
    AddToStructure { original_name: String },
    /// A drag finished at a new position.
    MoveShape { id: i64, position: Position },
    /// Select a placed shape, or deselect with `None`.
    SelectShape { id: Option<i64> },
    RemoveShape { id: i64 },
    RenameStructure { name: String },
    /// Discard the working structure and start a fresh one.
    NewStructure {
        #[serde(default)]
        confirmed: bool,
    },

    // -- Saved structures --
    ListStructures,
    SaveStructure,
    LoadStructure {
        id: i64,
        #[serde(default)]
        confirmed: bool,
    },
    DeleteStructure {
        id: i64,
        #[serde(default)]
        confirmed: bool,
    },
}

/// Messages from the app core (WASM) to the UI (JavaScript).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AppToUi {
    /// A name was turned into a shape, with everything needed to draw it.
    ShapeGenerated {
        descriptor: ShapeDescriptor,
        summary: String,
        geometry: Geometry,
        material: Material,
    },

    /// The gallery contents. `stored` is false when a save was a duplicate.
    GalleryUpdated {
        shapes: Vec<ShapeDescriptor>,
        stored: bool,
    },

    /// The working structure changed.
    WorkingSetUpdated {
        name: String,
        shapes: Vec<PlacedShape>,
        selected: Option<i64>,
    },

    /// The saved structures list, newest first.
    StructuresUpdated { structures: Vec<Structure> },

    /// A structure was saved.
    StructureSaved {
        structure: Structure,
        structures: Vec<Structure>,
    },

    /// A destructive request needs the user's go-ahead. Nothing changed;
    /// resend with `confirmed: true` to proceed.
    ConfirmationRequired { prompt: String },

    /// The request failed. Nothing changed.
    Error { message: String },
}
