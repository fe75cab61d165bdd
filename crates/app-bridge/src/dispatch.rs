use shading::{Geometry, Material};
use shape_store::StoreError;
use tracing::{debug, warn};

use crate::app_state::{AppState, BridgeError};
use crate::messages::{AppToUi, UiToApp};

pub const CLEAR_GALLERY_PROMPT: &str = "Are you sure you want to clear the entire gallery?";
pub const LOAD_STRUCTURE_PROMPT: &str =
    "Loading this structure will replace your current work. Continue?";
pub const DELETE_STRUCTURE_PROMPT: &str = "Are you sure you want to delete this structure?";
pub const NEW_STRUCTURE_PROMPT: &str =
    "Starting a new structure will discard your current work. Continue?";

/// Dispatch a UI message to the app and return a response.
///
/// This is the main entry point for processing messages from the JavaScript
/// side. Failures become an `Error` response and leave the state unchanged.
pub fn dispatch(state: &mut AppState, msg: UiToApp) -> AppToUi {
    match handle_message(state, msg) {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "message failed");
            AppToUi::Error {
                message: e.to_string(),
            }
        }
    }
}

fn handle_message(state: &mut AppState, msg: UiToApp) -> Result<AppToUi, BridgeError> {
    debug!(?msg, "dispatching");
    match msg {
        // -- Generator --
        UiToApp::Generate { name } => {
            let descriptor = state.generate(&name)?;
            let material = Material::for_descriptor(&descriptor)?;
            Ok(AppToUi::ShapeGenerated {
                summary: fingerprint::describe(&descriptor),
                geometry: Geometry::for_shape(descriptor.shape, descriptor.size),
                material,
                descriptor,
            })
        }

        UiToApp::SaveShape => {
            let stored = state.save_pending()?;
            Ok(gallery_response(state, stored))
        }

        // -- Gallery --
        UiToApp::ListShapes => Ok(gallery_response(state, false)),

        UiToApp::ClearGallery { confirmed } => {
            if !confirmed {
                return Ok(confirm(CLEAR_GALLERY_PROMPT));
            }
            state.clear_gallery()?;
            Ok(gallery_response(state, false))
        }

        // -- Working structure --
        UiToApp::AddToStructure { original_name } => {
            state.add_to_structure(&original_name)?;
            Ok(working_set_response(state))
        }

        UiToApp::MoveShape { id, position } => {
            state.working_set.update_shape_position(id, position)?;
            Ok(working_set_response(state))
        }

        UiToApp::SelectShape { id } => {
            match id {
                Some(id) => state.working_set.select(id)?,
                None => state.working_set.clear_selection(),
            }
            Ok(working_set_response(state))
        }

        UiToApp::RemoveShape { id } => {
            state.working_set.remove_shape(id)?;
            Ok(working_set_response(state))
        }

        UiToApp::RenameStructure { name } => {
            state.working_set.set_name(name);
            Ok(working_set_response(state))
        }

        UiToApp::NewStructure { confirmed } => {
            if !confirmed && !state.working_set.is_empty() {
                return Ok(confirm(NEW_STRUCTURE_PROMPT));
            }
            state.working_set.reset();
            Ok(working_set_response(state))
        }

        // -- Saved structures --
        UiToApp::ListStructures => Ok(structures_response(state)),

        UiToApp::SaveStructure => {
            let structure = state.save_structure()?;
            Ok(AppToUi::StructureSaved {
                structure,
                structures: state.structures.list_structures().to_vec(),
            })
        }

        UiToApp::LoadStructure { id, confirmed } => {
            if state.structures.get(id).is_none() {
                return Err(StoreError::StructureNotFound { id }.into());
            }
            if !confirmed && !state.working_set.is_empty() {
                return Ok(confirm(LOAD_STRUCTURE_PROMPT));
            }
            state.load_structure(id)?;
            Ok(working_set_response(state))
        }

        UiToApp::DeleteStructure { id, confirmed } => {
            if state.structures.get(id).is_none() {
                return Err(StoreError::StructureNotFound { id }.into());
            }
            if !confirmed {
                return Ok(confirm(DELETE_STRUCTURE_PROMPT));
            }
            state.delete_structure(id)?;
            Ok(structures_response(state))
        }
    }
}

fn confirm(prompt: &str) -> AppToUi {
    AppToUi::ConfirmationRequired {
        prompt: prompt.to_string(),
    }
}

fn gallery_response(state: &AppState, stored: bool) -> AppToUi {
    AppToUi::GalleryUpdated {
        shapes: state.gallery.list_shapes().to_vec(),
        stored,
    }
}

fn working_set_response(state: &AppState) -> AppToUi {
    AppToUi::WorkingSetUpdated {
        name: state.working_set.name().to_string(),
        shapes: state.working_set.shapes().to_vec(),
        selected: state.working_set.selected_id(),
    }
}

fn structures_response(state: &AppState) -> AppToUi {
    AppToUi::StructuresUpdated {
        structures: state.structures.list_structures().to_vec(),
    }
}
