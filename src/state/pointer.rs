/// Mouse press tracking used to tell clicks apart from pans. A press is a
/// click until the pointer travels past `DRAG_THRESHOLD_PX`.
pub const DRAG_THRESHOLD_PX: f64 = 4.0;

#[derive(Default, Debug, Clone)]
pub struct Pointer {
    pub down: bool,
    pub dragging: bool,
    pub last_x: f64,
    pub last_y: f64,
    pub travel: f64,
}

impl Pointer {
    pub fn press(&mut self, x: f64, y: f64) {
        self.down = true;
        self.dragging = false;
        self.last_x = x;
        self.last_y = y;
        self.travel = 0.0;
    }

    /// Returns the pan delta to apply, once movement qualifies as a drag.
    pub fn movement(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        if !self.down {
            return None;
        }
        let dx = x - self.last_x;
        let dy = y - self.last_y;
        self.last_x = x;
        self.last_y = y;
        self.travel += dx.abs() + dy.abs();
        if self.travel > DRAG_THRESHOLD_PX {
            self.dragging = true;
        }
        if self.dragging { Some((dx, dy)) } else { None }
    }

    /// Ends the press; true when it never became a drag (i.e. a click).
    pub fn release(&mut self) -> bool {
        let was_click = self.down && !self.dragging;
        self.down = false;
        self.dragging = false;
        was_click
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_press_is_a_click() {
        let mut p = Pointer::default();
        p.press(100.0, 100.0);
        assert_eq!(p.movement(101.0, 100.0), None);
        assert!(p.release());
    }

    #[test]
    fn long_movement_becomes_a_pan() {
        let mut p = Pointer::default();
        p.press(100.0, 100.0);
        assert_eq!(p.movement(103.0, 103.0), None);
        assert_eq!(p.movement(110.0, 103.0), Some((7.0, 0.0)));
        assert!(!p.release());
    }

    #[test]
    fn movement_without_press_does_nothing() {
        let mut p = Pointer::default();
        assert_eq!(p.movement(50.0, 50.0), None);
        assert!(!p.release());
    }
}
