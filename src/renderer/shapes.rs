//! Vertex format and 2D primitives
//!
//! All shapes are emitted as triangle lists in field coordinates.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use std::f32::consts::TAU;

/// Linear RGBA
pub type Color = [f32; 4];

/// Position + color, matching `VertexInput` in shader.wgsl
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub fn at(position: Vec2, color: Color) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Filled axis-aligned rectangle; degenerate sizes emit nothing
pub fn rect(min: Vec2, size: Vec2, color: Color) -> Vec<Vertex> {
    if size.x <= 0.0 || size.y <= 0.0 {
        return Vec::new();
    }
    let max = min + size;
    [
        min,
        Vec2::new(max.x, min.y),
        Vec2::new(min.x, max.y),
        Vec2::new(min.x, max.y),
        Vec2::new(max.x, min.y),
        max,
    ]
    .into_iter()
    .map(|p| Vertex::at(p, color))
    .collect()
}

/// Rectangle with a solid border drawn inside its bounds
pub fn framed_rect(min: Vec2, size: Vec2, fill: Color, edge: Color, thickness: f32) -> Vec<Vertex> {
    let mut vertices = rect(min, size, edge);
    let inset = Vec2::splat(thickness);
    vertices.extend(rect(min + inset, size - inset * 2.0, fill));
    vertices
}

/// Filled circle as a fan of `segments` triangles
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let rim = |i: u32| center + Vec2::from_angle(i as f32 / segments as f32 * TAU) * radius;
    (0..segments)
        .flat_map(|i| [center, rim(i), rim(i + 1)])
        .map(|p| Vertex::at(p, color))
        .collect()
}
