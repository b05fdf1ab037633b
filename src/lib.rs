//! Save The Princess - a single-screen 2D platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level, physics, enemies, game state)
//! - `renderer`: CPU-side draw lists for the host compositor
//! - `audio`: Sound intents dispatched to a pluggable backend
//! - `ui`: Button layout and pointer hit-testing
//! - `settings`: Read-only configuration

pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz; movement constants are per-frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical world / screen size
    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 600.0;
    /// Grid cell size
    pub const BLOCK_SIZE: f32 = 40.0;

    /// Player physics (per-frame units)
    pub const GRAVITY: f32 = 0.6;
    pub const GRAVITY_CARRY_FACTOR: f32 = 1.3;
    pub const PLAYER_SPEED: f32 = 4.0;
    pub const PLAYER_SPEED_CARRY_FACTOR: f32 = 0.7;
    pub const JUMP_STRENGTH: f32 = -12.0;

    /// Player hitbox, anchored at the feet
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Hard horizontal margin (half the hitbox width)
    pub const SCREEN_MARGIN: f32 = 15.0;
    /// How far below a top edge the feet may start and still land on it
    pub const LANDING_TOLERANCE: f32 = 10.0;

    pub const PLAYER_LIVES: u8 = 3;
    pub const INVULNERABILITY_SECS: f32 = 1.0;

    /// Interaction sizes
    pub const PICKUP_RADIUS: f32 = 50.0;
    pub const DELIVERY_PROBE: f32 = 10.0;
    pub const ENEMY_BODY_SIZE: f32 = 40.0;
    pub const PROJECTILE_SIZE: f32 = 20.0;

    /// Seconds per animation frame
    pub const ANIM_FRAME_SECS: f32 = 0.15;
}
