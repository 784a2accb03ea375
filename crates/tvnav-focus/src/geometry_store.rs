#![forbid(unsafe_code)]

//! Last-known on-screen rectangles for focusable elements.
//!
//! Reports overwrite; nothing is merged. Geometry for ids that are not in
//! the registry is kept but ignored by resolution.

use std::collections::HashMap;

use tvnav_core::geometry::Rect;

use crate::registry::FocusableId;

#[derive(Debug, Default, Clone)]
pub struct GeometryStore {
    rects: HashMap<FocusableId, Rect>,
}

impl GeometryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the rectangle for `id`, returning the previous one.
    pub fn report(&mut self, id: FocusableId, rect: Rect) -> Option<Rect> {
        self.rects.insert(id, rect)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<Rect> {
        self.rects.get(id).copied()
    }

    pub fn remove(&mut self, id: &str) -> Option<Rect> {
        self.rects.remove(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }
}
