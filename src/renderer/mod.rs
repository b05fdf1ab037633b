//! CPU-side rendering
//!
//! Builds a per-frame draw list (colored quads, sprite placements, text) from
//! the game state. Uploading and compositing are left to the host.

pub mod scene;
pub mod shapes;
pub mod vertex;

pub use scene::{Align, Frame, SpriteDraw, TextDraw, build_frame};
pub use vertex::Vertex;
