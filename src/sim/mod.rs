//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Timers accumulate `dt`; movement is per frame
//! - Seeded RNG only
//! - Stable iteration order (walls, platforms, castles; enemies by ID)
//! - No rendering or platform dependencies

pub mod anim;
pub mod collision;
pub mod enemy;
pub mod level;
pub mod player;
pub mod projectile;
pub mod rect;
pub mod state;
pub mod tick;

pub use anim::{AnimState, Animator, FrameId, SpriteSheet};
pub use collision::{VerticalContact, resolve_horizontal, resolve_vertical};
pub use enemy::{Enemy, EnemyBehavior, PatrolAction, PatrolFsm, PatrolPhase, WanderFsm};
pub use level::{EnemyKind, EnemySpawn, LEVEL_MAP, Level, PlayerSpawn, Tile};
pub use player::Player;
pub use projectile::{Projectile, ProjectileKind};
pub use rect::Rect;
pub use state::{GameEvent, GamePhase, GameState, MusicCommand, Princess, SoundEffect};
pub use tick::{TickInput, apply_action, resolve_interactions, tick};
