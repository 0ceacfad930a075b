//! Camera pan/zoom state and the pointer-to-cell coordinate mapper.
//! The transform is anchored at the canvas center (translate to center +
//! pan, scale, translate back), so the mapper undoes pan and zoom about
//! the center before flooring into grid coordinates.

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 3.0;
pub const ZOOM_STEP: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl Camera {
    /// Undo the view transform: pointer position on the canvas to a point
    /// in untransformed map space.
    pub fn map_point(&self, canvas_x: f64, canvas_y: f64, surface: Surface) -> (f64, f64) {
        let cx = surface.width * 0.5;
        let cy = surface.height * 0.5;
        (
            (canvas_x - cx - self.pan_x) / self.zoom + cx,
            (canvas_y - cy - self.pan_y) / self.zoom + cy,
        )
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - ZOOM_STEP).max(MIN_ZOOM);
    }

    /// Zoom by a wheel factor keeping the map point under the cursor fixed.
    pub fn zoom_about(&mut self, factor: f64, canvas_x: f64, canvas_y: f64, surface: Surface) {
        let (map_x, map_y) = self.map_point(canvas_x, canvas_y, surface);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let cx = surface.width * 0.5;
        let cy = surface.height * 0.5;
        self.pan_x = canvas_x - cx - (map_x - cx) * self.zoom;
        self.pan_y = canvas_y - cy - (map_y - cy) * self.zoom;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Map-space point to a grid cell, for a `grid` x `grid` layout covering
/// the whole surface. Points flooring outside `[0, grid)` on either axis
/// are rejected, never clamped.
pub fn cell_at(map_x: f64, map_y: f64, surface: Surface, grid: u32) -> Option<(u32, u32)> {
    let gx = (map_x / surface.width * grid as f64).floor();
    let gy = (map_y / surface.height * grid as f64).floor();
    if gx < 0.0 || gy < 0.0 || gx >= grid as f64 || gy >= grid as f64 {
        return None;
    }
    Some((gx as u32, gy as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    const S: Surface = Surface {
        width: 600.0,
        height: 600.0,
    };

    #[test]
    fn identity_camera_maps_straight_through() {
        let cam = Camera::default();
        assert_eq!(cam.map_point(150.0, 450.0, S), (150.0, 450.0));
        assert_eq!(cell_at(150.0, 450.0, S, 4), Some((1, 3)));
    }

    #[test]
    fn pan_and_zoom_are_undone() {
        let cam = Camera {
            zoom: 2.0,
            pan_x: 50.0,
            pan_y: -30.0,
        };
        // Forward transform of map point (p - c)*zoom + c + pan.
        let (mx, my) = (200.0, 400.0);
        let sx = (mx - 300.0) * cam.zoom + 300.0 + cam.pan_x;
        let sy = (my - 300.0) * cam.zoom + 300.0 + cam.pan_y;
        let (rx, ry) = cam.map_point(sx, sy, S);
        assert!((rx - mx).abs() < 1e-9);
        assert!((ry - my).abs() < 1e-9);
    }

    #[test]
    fn out_of_bounds_is_rejected_not_clamped() {
        assert_eq!(cell_at(-0.01, 100.0, S, 4), None);
        assert_eq!(cell_at(100.0, -5.0, S, 4), None);
        assert_eq!(cell_at(600.0, 100.0, S, 4), None);
        assert_eq!(cell_at(100.0, 612.0, S, 4), None);
    }

    #[test]
    fn cell_boundaries_floor_downwards() {
        // 150px per cell on a 600px surface with grid=4.
        assert_eq!(cell_at(0.0, 0.0, S, 4), Some((0, 0)));
        assert_eq!(cell_at(149.9, 149.9, S, 4), Some((0, 0)));
        assert_eq!(cell_at(150.0, 150.0, S, 4), Some((1, 1)));
        assert_eq!(cell_at(599.9, 599.9, S, 4), Some((3, 3)));
    }

    #[test]
    fn zoomed_out_clicks_outside_the_map_do_not_select() {
        // At 0.5x the 600px map occupies the middle 300px; a click in the
        // outer band maps outside [0, grid).
        let cam = Camera {
            zoom: 0.5,
            pan_x: 0.0,
            pan_y: 0.0,
        };
        let (mx, my) = cam.map_point(10.0, 10.0, S);
        assert_eq!(cell_at(mx, my, S, 4), None);
        let (mx, my) = cam.map_point(300.0, 300.0, S);
        assert_eq!(cell_at(mx, my, S, 4), Some((2, 2)));
    }

    #[test]
    fn wheel_zoom_keeps_cursor_point_fixed() {
        let mut cam = Camera::default();
        let before = cam.map_point(420.0, 180.0, S);
        cam.zoom_about(1.5, 420.0, 180.0, S);
        let after = cam.map_point(420.0, 180.0, S);
        assert!((before.0 - after.0).abs() < 1e-9);
        assert!((before.1 - after.1).abs() < 1e-9);
        assert!((cam.zoom - 1.5).abs() < 1e-9);
    }

    #[test]
    fn zoom_steps_clamp_to_limits() {
        let mut cam = Camera::default();
        for _ in 0..10 {
            cam.zoom_in();
        }
        assert_eq!(cam.zoom, MAX_ZOOM);
        for _ in 0..10 {
            cam.zoom_out();
        }
        assert_eq!(cam.zoom, MIN_ZOOM);
    }
}
