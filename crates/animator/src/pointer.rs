//! Shared pointer state.

/// Last-known pointer position, last-write-wins.
///
/// A single process-wide instance is updated from move/leave events and
/// read once per frame by every registered animator. Coordinates share the
/// origin of the layout geometry the cell centers are expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub active: bool,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.x = Some(x);
        self.y = Some(y);
        self.active = true;
    }

    /// Pointer left the surface. Coordinates are kept so decay animations
    /// can finish from the last known position.
    pub fn leave(&mut self) {
        self.active = false;
    }

    /// Coordinates, only while the pointer is active and known.
    pub fn position(&self) -> Option<(f32, f32)> {
        match (self.active, self.x, self.y) {
            (true, Some(x), Some(y)) => Some((x, y)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_inactive() {
        assert_eq!(PointerState::new().position(), None);
    }

    #[test]
    fn move_activates() {
        let mut pointer = PointerState::new();
        pointer.move_to(10.0, 20.0);
        assert_eq!(pointer.position(), Some((10.0, 20.0)));
    }

    #[test]
    fn leave_hides_position_but_keeps_coordinates() {
        let mut pointer = PointerState::new();
        pointer.move_to(10.0, 20.0);
        pointer.leave();
        assert_eq!(pointer.position(), None);
        assert_eq!(pointer.x, Some(10.0));
    }
}
