//! Enemy behavior state machines
//!
//! Two archetypes share one [`Enemy`] body and differ only in their
//! [`EnemyBehavior`]. Each behavior is a small explicit FSM that can be
//! driven in isolation; `Enemy::update` applies its decisions to the body.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::anim::{AnimState, Animator, SpriteSheet};
use super::level::{EnemyKind, EnemySpawn};
use super::projectile::{Projectile, ProjectileKind, advance_projectiles};
use super::rect::Rect;
use super::state::{GameEvent, SoundEffect};
use crate::consts::ENEMY_BODY_SIZE;

/// Patroller walking leg duration (seconds)
pub const PATROL_WALK_SECS: f32 = 2.0;
/// Patroller pause duration before each shot (seconds)
pub const PATROL_PAUSE_SECS: f32 = 1.0;
/// Patroller walking speed (units per frame)
pub const PATROL_STEP: f32 = 1.0;
pub const FIREBALL_SPEED: f32 = 5.0;

/// Wanderer fires this often regardless of movement (seconds)
pub const WANDER_FIRE_SECS: f32 = 3.0;
/// Swords always fly left
pub const SWORD_VELOCITY: f32 = -6.0;
pub const WANDER_STEP: f32 = 1.5;
/// Distance at which the wanderer counts as arrived
pub const WANDER_ARRIVE_DIST: f32 = 5.0;
/// Per-frame chance of picking a new target once arrived
pub const WANDER_RETARGET_CHANCE: f64 = 0.02;
/// Inclusive range for new targets (right side of the level)
pub const WANDER_MIN_X: i32 = 400;
pub const WANDER_MAX_X: i32 = 750;

/// Patroller phases, in cycle order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatrolPhase {
    WalkRight,
    PauseRight,
    WalkLeft,
    PauseLeft,
}

impl PatrolPhase {
    pub fn duration(self) -> f32 {
        match self {
            PatrolPhase::WalkRight | PatrolPhase::WalkLeft => PATROL_WALK_SECS,
            PatrolPhase::PauseRight | PatrolPhase::PauseLeft => PATROL_PAUSE_SECS,
        }
    }

    pub fn next(self) -> Self {
        match self {
            PatrolPhase::WalkRight => PatrolPhase::PauseRight,
            PatrolPhase::PauseRight => PatrolPhase::WalkLeft,
            PatrolPhase::WalkLeft => PatrolPhase::PauseLeft,
            PatrolPhase::PauseLeft => PatrolPhase::WalkRight,
        }
    }

    /// +1 for right-facing phases, -1 for left-facing
    pub fn facing(self) -> f32 {
        match self {
            PatrolPhase::WalkRight | PatrolPhase::PauseRight => 1.0,
            PatrolPhase::WalkLeft | PatrolPhase::PauseLeft => -1.0,
        }
    }

    pub fn is_walking(self) -> bool {
        matches!(self, PatrolPhase::WalkRight | PatrolPhase::WalkLeft)
    }
}

/// What the patroller does this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PatrolAction {
    /// Step in this direction (+1/-1)
    Walk(f32),
    Wait,
    /// Shoot in this direction (+1/-1); only on the frame a pause ends
    Fire(f32),
}

/// Four-phase walk/pause/fire cycle driven by an accumulating timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatrolFsm {
    pub phase: PatrolPhase,
    pub elapsed: f32,
}

impl Default for PatrolFsm {
    fn default() -> Self {
        Self {
            phase: PatrolPhase::WalkRight,
            elapsed: 0.0,
        }
    }
}

impl PatrolFsm {
    /// Accumulate `dt`; when the timer strictly exceeds the phase duration,
    /// move to the next phase and reset the timer.
    pub fn advance(&mut self, dt: f32) -> PatrolAction {
        self.elapsed += dt;
        let phase = self.phase;
        let expired = self.elapsed > phase.duration();
        if expired {
            self.phase = phase.next();
            self.elapsed = 0.0;
        }

        if phase.is_walking() {
            PatrolAction::Walk(phase.facing())
        } else if expired {
            PatrolAction::Fire(phase.facing())
        } else {
            PatrolAction::Wait
        }
    }
}

/// What the wanderer does this frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WanderStep {
    /// Horizontal displacement (0 while resting at the target)
    pub dx: f32,
    pub fire: bool,
}

/// Target-seeking walk plus an independent fire timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WanderFsm {
    pub target_x: f32,
    pub fire_elapsed: f32,
}

impl WanderFsm {
    pub fn new(start_x: f32) -> Self {
        Self {
            target_x: start_x,
            fire_elapsed: 0.0,
        }
    }

    pub fn advance<R: Rng>(&mut self, x: f32, dt: f32, rng: &mut R) -> WanderStep {
        let mut step = WanderStep::default();

        self.fire_elapsed += dt;
        if self.fire_elapsed > WANDER_FIRE_SECS {
            self.fire_elapsed = 0.0;
            step.fire = true;
        }

        if (x - self.target_x).abs() < WANDER_ARRIVE_DIST {
            if rng.random_bool(WANDER_RETARGET_CHANCE) {
                self.target_x = rng.random_range(WANDER_MIN_X..=WANDER_MAX_X) as f32;
            }
        } else {
            let dir = if self.target_x > x { 1.0 } else { -1.0 };
            step.dx = dir * WANDER_STEP;
        }

        step
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EnemyBehavior {
    Patroller(PatrolFsm),
    Wanderer(WanderFsm),
}

/// An enemy body with its behavior and the projectiles it has fired
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    /// Feet anchor; y never changes
    pub pos: Vec2,
    pub anim: Animator,
    pub behavior: EnemyBehavior,
    pub projectiles: Vec<Projectile>,
}

impl Enemy {
    pub fn new(id: u32, spawn: &EnemySpawn) -> Self {
        let (sheet, behavior) = match spawn.kind {
            EnemyKind::Patroller => (
                SpriteSheet::FireMonster,
                EnemyBehavior::Patroller(PatrolFsm::default()),
            ),
            EnemyKind::Wanderer => (
                SpriteSheet::SwordMonster,
                EnemyBehavior::Wanderer(WanderFsm::new(spawn.pos.x)),
            ),
        };
        Self {
            id,
            pos: spawn.pos,
            anim: Animator::new(sheet),
            behavior,
            projectiles: Vec::new(),
        }
    }

    pub fn kind(&self) -> EnemyKind {
        match self.behavior {
            EnemyBehavior::Patroller(_) => EnemyKind::Patroller,
            EnemyBehavior::Wanderer(_) => EnemyKind::Wanderer,
        }
    }

    /// Contact-damage box centered on the anchor
    pub fn hitbox(&self) -> Rect {
        Rect::centered(self.pos, ENEMY_BODY_SIZE, ENEMY_BODY_SIZE)
    }

    /// Run one frame of behavior, then move this enemy's projectiles
    pub fn update<R: Rng>(&mut self, dt: f32, rng: &mut R, events: &mut Vec<GameEvent>) {
        match &mut self.behavior {
            EnemyBehavior::Patroller(fsm) => match fsm.advance(dt) {
                PatrolAction::Walk(dir) => {
                    self.pos.x += dir * PATROL_STEP;
                    self.anim.set(AnimState::Walk);
                }
                PatrolAction::Wait => self.anim.set(AnimState::Idle),
                PatrolAction::Fire(dir) => {
                    self.anim.set(AnimState::Idle);
                    self.projectiles.push(Projectile::new(
                        ProjectileKind::Fireball,
                        self.pos,
                        dir * FIREBALL_SPEED,
                    ));
                    events.push(GameEvent::Sound(SoundEffect::Fireball));
                }
            },
            EnemyBehavior::Wanderer(fsm) => {
                let step = fsm.advance(self.pos.x, dt, rng);
                if step.fire {
                    self.projectiles.push(Projectile::new(
                        ProjectileKind::Sword,
                        self.pos,
                        SWORD_VELOCITY,
                    ));
                    events.push(GameEvent::Sound(SoundEffect::SwordThrow));
                }
                if step.dx != 0.0 {
                    self.pos.x += step.dx;
                    self.anim.set(AnimState::Walk);
                } else {
                    self.anim.set(AnimState::Idle);
                }
            }
        }

        self.anim.advance(dt);
        advance_projectiles(&mut self.projectiles);
    }
}
