// Touch gesture state: single-finger tap/pan plus two-finger pinch zoom.
#[derive(Default, Debug, Clone)]
pub struct TouchState {
    pub single_active: bool,
    pub pinch: bool,
    pub start_pinch_dist: f64,
    pub start_zoom: f64,
    pub last_touch_x: f64,
    pub last_touch_y: f64,
    /// Accumulated travel, so a steady tap is not treated as a pan.
    pub travel: f64,
}
