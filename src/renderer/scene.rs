//! Scene assembly: snapshot in, triangle list out

use glam::Vec2;

use super::shapes::{Color, Vertex, circle, framed_rect, rect};
use crate::sim::{GamePhase, Snapshot};

pub mod palette {
    use super::Color;

    /// Clear color outside the field
    pub const LETTERBOX: Color = [0.02, 0.02, 0.05, 1.0];
    pub const SKY: Color = [0.44, 0.77, 0.81, 1.0];
    pub const PILLAR: Color = [0.18, 0.8, 0.44, 1.0];
    pub const PILLAR_EDGE: Color = [0.08, 0.35, 0.18, 1.0];
    pub const BODY: Color = [0.95, 0.77, 0.06, 1.0];
    pub const BODY_EDGE: Color = [0.1, 0.1, 0.1, 1.0];
    pub const IDLE_SHADE: Color = [0.0, 0.0, 0.0, 0.5];
    pub const ENDED_SHADE: Color = [0.3, 0.0, 0.0, 0.25];
}

const BODY_SEGMENTS: u32 = 24;
const PILLAR_EDGE: f32 = 2.0;
const BODY_EDGE: f32 = 1.5;

/// Build all vertices for one frame, back to front
pub fn build_scene(snapshot: &Snapshot<'_>) -> Vec<Vertex> {
    let field = Vec2::new(snapshot.tuning.field_width, snapshot.tuning.field_height);
    let mut vertices = rect(Vec2::ZERO, field, palette::SKY);

    for obstacle in snapshot.obstacles {
        // Top pillar
        vertices.extend(framed_rect(
            Vec2::new(obstacle.x, 0.0),
            Vec2::new(obstacle.width, obstacle.gap_top),
            palette::PILLAR,
            palette::PILLAR_EDGE,
            PILLAR_EDGE,
        ));
        // Bottom pillar
        let bottom = obstacle.gap_bottom();
        vertices.extend(framed_rect(
            Vec2::new(obstacle.x, bottom),
            Vec2::new(obstacle.width, field.y - bottom),
            palette::PILLAR,
            palette::PILLAR_EDGE,
            PILLAR_EDGE,
        ));
    }

    let body = snapshot.body;
    vertices.extend(circle(
        body.pos,
        body.radius + BODY_EDGE,
        palette::BODY_EDGE,
        BODY_SEGMENTS,
    ));
    vertices.extend(circle(body.pos, body.radius, palette::BODY, BODY_SEGMENTS));

    match snapshot.phase {
        GamePhase::Idle => vertices.extend(rect(Vec2::ZERO, field, palette::IDLE_SHADE)),
        GamePhase::Ended => vertices.extend(rect(Vec2::ZERO, field, palette::ENDED_SHADE)),
        GamePhase::Running => {}
    }

    vertices
}
