use std::cell::RefCell;
use std::rc::Rc;

use shape_store::{Gallery, SubscriptionId};
use shape_types::ShapeDescriptor;

/// Holds the latest gallery snapshot until the host is ready to hand it
/// to listeners that may call back into the app.
///
/// Only the newest snapshot is kept; listeners always get the full list.
#[derive(Debug, Clone, Default)]
pub struct GalleryOutbox {
    latest: Rc<RefCell<Option<Vec<ShapeDescriptor>>>>,
}

impl GalleryOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start collecting `gallery` changes.
    pub fn attach(&self, gallery: &mut Gallery) -> SubscriptionId {
        let latest = Rc::clone(&self.latest);
        gallery.subscribe(move |shapes| {
            *latest.borrow_mut() = Some(shapes.to_vec());
        })
    }

    /// The snapshot queued since the last call, if the gallery changed.
    pub fn take(&self) -> Option<Vec<ShapeDescriptor>> {
        self.latest.borrow_mut().take()
    }
}
