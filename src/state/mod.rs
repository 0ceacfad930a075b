pub mod camera;
pub mod pointer;
pub mod touch;

pub use camera::{Camera, Surface, cell_at};
pub use pointer::Pointer;
pub use touch::TouchState;
