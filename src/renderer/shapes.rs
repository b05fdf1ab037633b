//! Shape generation for 2D primitives

use super::vertex::Vertex;
use crate::sim::Rect;

/// Two triangles covering `r`
pub fn rect(r: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    let (l, t, rt, b) = (r.left(), r.top(), r.right(), r.bottom());
    [
        Vertex::new(l, t, color),
        Vertex::new(rt, t, color),
        Vertex::new(l, b, color),
        Vertex::new(l, b, color),
        Vertex::new(rt, t, color),
        Vertex::new(rt, b, color),
    ]
}
