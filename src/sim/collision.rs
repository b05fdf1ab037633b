//! Axis-separated collision resolution against static geometry
//!
//! Bodies are feet-anchored rectangles. Horizontal and vertical movement are
//! resolved in separate passes so a body sliding along a floor never snags on
//! the floor's side.

use glam::Vec2;

use super::rect::Rect;
use crate::consts::LANDING_TOLERANCE;

/// Outcome of the vertical pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerticalContact {
    /// Feet snapped onto a top edge
    pub landed: bool,
    /// Head snapped under a bottom edge
    pub bumped: bool,
}

/// Push a body out of every solid it overlaps after moving `dx` horizontally.
///
/// `feet` must already hold the new x and the old y. The body's edge is made
/// flush with the obstacle's facing edge, chosen by the sign of `dx`; a body
/// that did not move horizontally is left alone.
pub fn resolve_horizontal<'a>(
    feet: &mut Vec2,
    size: Vec2,
    dx: f32,
    solids: impl IntoIterator<Item = &'a Rect>,
) {
    if dx == 0.0 {
        return;
    }
    let half_w = size.x / 2.0;
    let mut rect = Rect::from_feet(*feet, size.x, size.y);

    for solid in solids {
        if !rect.intersects(solid) {
            continue;
        }
        if dx > 0.0 {
            feet.x = solid.left() - half_w;
        } else {
            feet.x = solid.right() + half_w;
        }
        rect.x = feet.x - half_w;
    }
}

/// Resolve vertical overlap after `feet.y` has moved by `*vel_y`.
///
/// Falling bodies only land when their feet started the step within
/// `LANDING_TOLERANCE` of the top edge, which lets them step onto small
/// ledges but keeps a body grazing a wall's side from being lifted onto it.
/// Rising bodies stop under the ceiling. Velocity is zeroed on contact, so at
/// most one snap happens per step.
pub fn resolve_vertical<'a>(
    feet: &mut Vec2,
    vel_y: &mut f32,
    size: Vec2,
    solids: impl IntoIterator<Item = &'a Rect>,
) -> VerticalContact {
    let rect = Rect::from_feet(*feet, size.x, size.y);
    let mut contact = VerticalContact::default();

    for solid in solids {
        if !rect.intersects(solid) {
            continue;
        }
        if *vel_y > 0.0 {
            let prev_feet = feet.y - *vel_y;
            if prev_feet <= solid.top() + LANDING_TOLERANCE {
                feet.y = solid.top();
                *vel_y = 0.0;
                contact.landed = true;
            }
        } else if *vel_y < 0.0 {
            feet.y = solid.bottom() + size.y;
            *vel_y = 0.0;
            contact.bumped = true;
        }
    }

    contact
}
