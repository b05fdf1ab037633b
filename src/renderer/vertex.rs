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
}

const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Colors for game elements
pub mod colors {
    use super::rgb;

    pub const BACKGROUND: [f32; 4] = rgb(20, 20, 30);
    pub const WALL: [f32; 4] = rgb(40, 40, 50);
    pub const PLATFORM: [f32; 4] = rgb(100, 100, 120);
    pub const CASTLE: [f32; 4] = rgb(80, 50, 50);
    pub const SPAWN_ZONE: [f32; 4] = rgb(0, 100, 0);
    pub const BUTTON: [f32; 4] = rgb(60, 60, 80);

    pub const TEXT: [f32; 4] = rgb(255, 255, 255);
    pub const TITLE: [f32; 4] = rgb(255, 165, 0);
    pub const LIVES: [f32; 4] = rgb(255, 0, 0);
    pub const VICTORY: [f32; 4] = rgb(255, 215, 0);
    pub const GAME_OVER: [f32; 4] = rgb(255, 0, 0);
}
