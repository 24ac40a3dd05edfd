//! Vertex format and palette

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Flat-colored 2D vertex
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub const fn at(pos: Vec2, color: [f32; 4]) -> Self {
        Self::new(pos.x, pos.y, color)
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// `0xRRGGBB` plus alpha to linear-ish RGBA floats
const fn hex(rgb: u32, alpha: f32) -> [f32; 4] {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// Scene palette
pub mod colors {
    use super::hex;

    pub const SKY_TOP: [f32; 4] = hex(0x4ec3ff, 1.0);
    pub const SKY_BOTTOM: [f32; 4] = hex(0x0b486b, 1.0);
    pub const LANE_BAND: [f32; 4] = hex(0xffffff, 0.03);
    pub const PLAYER: [f32; 4] = hex(0xffd77a, 1.0);
    pub const PLAYER_FIN: [f32; 4] = hex(0xb35b00, 1.0);
    pub const PROJECTILE: [f32; 4] = hex(0xfff8b0, 1.0);
    pub const MINE: [f32; 4] = hex(0x8b1a1a, 1.0);
    pub const BIRD: [f32; 4] = hex(0xc4e6ff, 1.0);
    pub const FIGHTER: [f32; 4] = hex(0xb8c3ff, 1.0);
    pub const END_OVERLAY: [f32; 4] = hex(0x000000, 0.6);
}
