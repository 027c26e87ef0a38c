//! Instance types handed to the external rasterizer

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// One filled circle (ball or pocket)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct DiscInstance {
    pub center: [f32; 2],
    pub radius: f32,
    pub color: [f32; 4],
}

impl DiscInstance {
    pub fn new(center: Vec2, radius: f32, color: [f32; 4]) -> Self {
        Self {
            center: center.to_array(),
            radius,
            color,
        }
    }
}

/// One axis-aligned filled rectangle (felt or cushion)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct RectInstance {
    pub min: [f32; 2],
    pub size: [f32; 2],
    pub color: [f32; 4],
}

impl RectInstance {
    pub fn new(min: Vec2, size: Vec2, color: [f32; 4]) -> Self {
        Self {
            min: min.to_array(),
            size: size.to_array(),
            color,
        }
    }
}

/// A thick line segment (drag guide)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LineInstance {
    pub start: [f32; 2],
    pub end: [f32; 2],
    pub thickness: f32,
    pub color: [f32; 4],
}

/// Colors for table elements
pub mod colors {
    pub const CUE_BALL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const OBJECT_BALL: [f32; 4] = [0.9, 0.16, 0.22, 1.0];
    pub const FELT: [f32; 4] = [0.0, 0.89, 0.19, 1.0];
    pub const CUSHION: [f32; 4] = [0.0, 0.46, 0.17, 1.0];
    pub const POCKET: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const GUIDE: [f32; 4] = [0.99, 0.98, 0.0, 1.0];
    /// Pocketed balls are cleared to this
    pub const TRANSPARENT: [f32; 4] = [0.0, 0.0, 0.0, 0.0];
}
