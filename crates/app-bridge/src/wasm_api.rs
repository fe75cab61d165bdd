//! WASM entry points for the page script.
//!
//! This module is only compiled for the `wasm32` target. It provides the
//! `#[wasm_bindgen]` functions that JavaScript calls.

use std::cell::RefCell;

use serde::Serialize;
use shape_store::MemoryStorage;
use wasm_bindgen::prelude::*;

use crate::app_state::AppState;
use crate::dispatch;
use crate::local_storage::LocalStorage;
use crate::messages::{AppToUi, UiToApp};
use crate::outbox::GalleryOutbox;

// Single-threaded in the page. Listeners live outside `APP` so they can be
// called after its borrow is released.
thread_local! {
    static APP: RefCell<Option<WasmApp>> = const { RefCell::new(None) };
    static GALLERY_LISTENERS: RefCell<Listeners> = RefCell::new(Listeners::default());
}

struct WasmApp {
    state: AppState,
    outbox: GalleryOutbox,
}

#[derive(Default)]
struct Listeners {
    next_handle: u32,
    callbacks: Vec<(u32, js_sys::Function)>,
}

/// Initialize the app. Must be called once before any other function.
///
/// Loads the gallery and saved structures from `localStorage`. When that is
/// unavailable the app runs on in-memory storage for this session.
#[wasm_bindgen]
pub fn init() {
    console_error_panic_hook::set_once();

    let mut state = match LocalStorage::open() {
        Some(storage) => AppState::new(storage),
        None => {
            web_sys::console::warn_1(&JsValue::from_str(
                "localStorage unavailable, shapes will not persist",
            ));
            AppState::new(MemoryStorage::new())
        }
    };
    let outbox = GalleryOutbox::new();
    outbox.attach(&mut state.gallery);

    let installed = APP.with(|cell| match cell.try_borrow_mut() {
        Ok(mut slot) => {
            *slot = Some(WasmApp { state, outbox });
            true
        }
        Err(_) => false,
    });
    if !installed {
        web_sys::console::error_1(&JsValue::from_str("init() called while the app is busy"));
    }
}

/// Process a JSON message from the UI and return a JSON response.
///
/// The input should be a JSON-serialized `UiToApp` message.
/// Returns a JSON-serialized `AppToUi` response. Gallery listeners are
/// called after the response is built and may call back into this module.
#[wasm_bindgen]
pub fn process_message(json_input: &str) -> String {
    let result = with_app(|app| {
        let response = match serde_json::from_str::<UiToApp>(json_input) {
            Ok(msg) => dispatch::dispatch(&mut app.state, msg),
            Err(e) => AppToUi::Error {
                message: format!("Failed to parse message: {}", e),
            },
        };
        (response, app.outbox.take())
    });

    match result {
        Ok((response, changed)) => {
            if let Some(shapes) = changed {
                notify_gallery_listeners(&to_json(&shapes));
            }
            to_json(&response)
        }
        Err(error) => to_json(&error),
    }
}

/// The gallery as a JSON array of shape descriptors.
#[wasm_bindgen]
pub fn get_gallery() -> String {
    with_app(|app| to_json(app.state.gallery.list_shapes())).unwrap_or_else(|e| to_json(&e))
}

/// The saved structures as a JSON array, newest first.
#[wasm_bindgen]
pub fn get_structures() -> String {
    with_app(|app| to_json(app.state.structures.list_structures()))
        .unwrap_or_else(|e| to_json(&e))
}

/// Call `callback` with the gallery JSON after every gallery change.
///
/// Returns a handle for `unsubscribe_gallery`.
#[wasm_bindgen]
pub fn subscribe_gallery(callback: js_sys::Function) -> u32 {
    GALLERY_LISTENERS.with(|cell| {
        let mut listeners = cell.borrow_mut();
        let handle = listeners.next_handle;
        listeners.next_handle = handle.wrapping_add(1);
        listeners.callbacks.push((handle, callback));
        handle
    })
}

/// Returns false if `handle` was not subscribed.
#[wasm_bindgen]
pub fn unsubscribe_gallery(handle: u32) -> bool {
    GALLERY_LISTENERS.with(|cell| {
        let mut listeners = cell.borrow_mut();
        let before = listeners.callbacks.len();
        listeners.callbacks.retain(|(h, _)| *h != handle);
        listeners.callbacks.len() != before
    })
}

fn notify_gallery_listeners(json: &str) {
    // Snapshot first so listeners can subscribe or unsubscribe while called.
    let callbacks: Vec<js_sys::Function> = GALLERY_LISTENERS.with(|cell| {
        cell.borrow()
            .callbacks
            .iter()
            .map(|(_, f)| f.clone())
            .collect()
    });
    let json = JsValue::from_str(json);
    for callback in callbacks {
        if let Err(e) = callback.call1(&JsValue::NULL, &json) {
            web_sys::console::error_2(&JsValue::from_str("gallery listener failed:"), &e);
        }
    }
}

fn with_app<T>(f: impl FnOnce(&mut WasmApp) -> T) -> Result<T, AppToUi> {
    APP.with(|cell| {
        let mut slot = cell.try_borrow_mut().map_err(|_| AppToUi::Error {
            message: "App is busy processing another call.".to_string(),
        })?;
        slot.as_mut().map(f).ok_or_else(not_initialized)
    })
}

fn not_initialized() -> AppToUi {
    AppToUi::Error {
        message: "App not initialized. Call init() first.".to_string(),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        format!(
            r#"{{"type":"Error","message":"Serialization failed: {}"}}"#,
            e
        )
    })
}
