//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BORDER: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PLAYER: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const ENEMY: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    // High contrast variants
    pub const HC_PLAYER: [f32; 4] = [1.0, 0.2, 1.0, 1.0];
    pub const HC_ENEMY: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
}

/// Resolved colors for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub border: [f32; 4],
    pub player: [f32; 4],
    pub enemy: [f32; 4],
    pub background: [f32; 4],
}

impl Palette {
    pub fn new(high_contrast: bool) -> Self {
        if high_contrast {
            Self {
                border: colors::BORDER,
                player: colors::HC_PLAYER,
                enemy: colors::HC_ENEMY,
                background: colors::BACKGROUND,
            }
        } else {
            Self {
                border: colors::BORDER,
                player: colors::PLAYER,
                enemy: colors::ENEMY,
                background: colors::BACKGROUND,
            }
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(false)
    }
}
