pub mod app_state;
pub mod dispatch;
pub mod messages;
pub mod outbox;

#[cfg(target_arch = "wasm32")]
mod local_storage;
#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

pub use app_state::{AppState, BridgeError};
pub use dispatch::dispatch;
pub use messages::{AppToUi, UiToApp};
pub use outbox::GalleryOutbox;
