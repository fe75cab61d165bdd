use rand::Rng;
use shape_types::{Position, PlacedShape, ShapeDescriptor, Structure, DEFAULT_STRUCTURE_NAME};
use tracing::debug;

use crate::clock::{timestamp_id, Clock, SystemClock};
use crate::errors::StoreError;

/// Box around the origin in which new shapes are dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementBounds {
    /// Half-size along x, y and z.
    pub half_extents: [f64; 3],
}

impl PlacementBounds {
    /// Uniform sample in `[-h, h)` per axis. A non-positive extent pins that
    /// axis to zero.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        self.half_extents.map(|h| if h > 0.0 { rng.gen_range(-h..h) } else { 0.0 })
    }

    pub fn contains(&self, position: Position) -> bool {
        position
            .iter()
            .zip(self.half_extents)
            .all(|(p, h)| p.abs() <= h.max(0.0))
    }
}

impl Default for PlacementBounds {
    fn default() -> Self {
        Self {
            half_extents: [2.0, 1.0, 2.0],
        }
    }
}

/// The structure currently being edited: placed shapes, the selection and
/// the name it will be saved under.
pub struct WorkingSet {
    name: String,
    shapes: Vec<PlacedShape>,
    selected: Option<i64>,
    bounds: PlacementBounds,
    last_id: Option<i64>,
    clock: Box<dyn Clock>,
}

impl WorkingSet {
    pub fn new() -> Self {
        Self {
            name: DEFAULT_STRUCTURE_NAME.to_string(),
            shapes: Vec::new(),
            selected: None,
            bounds: PlacementBounds::default(),
            last_id: None,
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_bounds(mut self, bounds: PlacementBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn shapes(&self) -> &[PlacedShape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn find(&self, id: i64) -> Option<&PlacedShape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    /// Place a copy of `descriptor` at a random spot with a fresh id.
    pub fn add_shape<R: Rng + ?Sized>(
        &mut self,
        descriptor: ShapeDescriptor,
        rng: &mut R,
    ) -> Result<PlacedShape, StoreError> {
        let id = timestamp_id(self.clock.now(), self.last_id)?;
        self.last_id = Some(id);

        let placed = PlacedShape::new(descriptor, self.bounds.sample(rng), id);
        debug!(id, name = placed.name(), position = ?placed.position, "shape placed");
        self.shapes.push(placed.clone());
        Ok(placed)
    }

    pub fn update_shape_position(&mut self, id: i64, position: Position) -> Result<(), StoreError> {
        let shape = self
            .shapes
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::ShapeNotFound { id })?;
        shape.position = position;
        Ok(())
    }

    /// Remove a shape. Clears the selection if it pointed at this shape.
    pub fn remove_shape(&mut self, id: i64) -> Result<PlacedShape, StoreError> {
        let pos = self
            .shapes
            .iter()
            .position(|s| s.id == id)
            .ok_or(StoreError::ShapeNotFound { id })?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        Ok(self.shapes.remove(pos))
    }

    pub fn select(&mut self, id: i64) -> Result<(), StoreError> {
        if self.find(id).is_none() {
            return Err(StoreError::ShapeNotFound { id });
        }
        self.selected = Some(id);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selected
    }

    pub fn selected(&self) -> Option<&PlacedShape> {
        self.selected.and_then(|id| self.find(id))
    }

    /// Replace the working shapes and name with a saved structure's.
    pub fn load_structure(&mut self, structure: &Structure) -> &[PlacedShape] {
        self.shapes = structure.shapes.clone();
        self.name = structure.name.clone();
        self.selected = None;
        let loaded_max = self.shapes.iter().map(|s| s.id).max();
        self.last_id = self.last_id.max(loaded_max);
        debug!(id = structure.id, count = self.shapes.len(), "structure loaded");
        &self.shapes
    }

    /// Start over with an empty, default-named structure.
    pub fn reset(&mut self) {
        self.shapes.clear();
        self.selected = None;
        self.name = DEFAULT_STRUCTURE_NAME.to_string();
    }
}

impl Default for WorkingSet {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WorkingSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkingSet")
            .field("name", &self.name)
            .field("shapes", &self.shapes)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}
