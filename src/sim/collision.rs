//! Collision and scoring tests
//!
//! The body is tested as its bounding box against the obstacle's column and
//! gap. All comparisons are strict, so touching edges never count as a hit.

use super::state::{Body, EndCause, Obstacle};

/// Check whether the body has left the field through the floor or ceiling
pub fn body_out_of_bounds(body: &Body, field_height: f32) -> Option<EndCause> {
    if body.bottom() > field_height {
        Some(EndCause::Floor)
    } else if body.top() < 0.0 {
        Some(EndCause::Ceiling)
    } else {
        None
    }
}

/// Body's horizontal extent overlaps the obstacle column
#[inline]
pub fn overlaps_column(body: &Body, obstacle: &Obstacle) -> bool {
    body.right() > obstacle.x && body.left() < obstacle.trailing_edge()
}

/// Body pokes above or below the gap
#[inline]
pub fn outside_gap(body: &Body, obstacle: &Obstacle) -> bool {
    body.top() < obstacle.gap_top || body.bottom() > obstacle.gap_bottom()
}

/// Body hits the solid part of the obstacle
pub fn body_obstacle_collision(body: &Body, obstacle: &Obstacle) -> bool {
    overlaps_column(body, obstacle) && outside_gap(body, obstacle)
}

/// Obstacle's trailing edge has passed the body's center
#[inline]
pub fn obstacle_cleared(body: &Body, obstacle: &Obstacle) -> bool {
    obstacle.trailing_edge() < body.pos.x
}

/// Obstacle is entirely past the left edge of the field
#[inline]
pub fn obstacle_offscreen(obstacle: &Obstacle) -> bool {
    obstacle.trailing_edge() < 0.0
}
