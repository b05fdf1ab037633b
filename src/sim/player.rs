//! The knight: kinematic body, lives and invulnerability

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::anim::{AnimState, Animator, SpriteSheet};
use super::collision::{resolve_horizontal, resolve_vertical};
use super::rect::Rect;
use super::state::{GameEvent, SoundEffect};
use super::tick::TickInput;
use crate::consts::*;

const SIZE: Vec2 = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Feet anchor (bottom-center of the hitbox)
    pub pos: Vec2,
    /// Velocity in units per frame
    pub vel: Vec2,
    pub on_ground: bool,
    pub carrying: bool,
    pub lives: u8,
    /// Seconds of invulnerability left; not invulnerable at or below zero
    pub invul_timer: f32,
    pub anim: Animator,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            on_ground: false,
            carrying: false,
            lives: PLAYER_LIVES,
            invul_timer: 0.0,
            anim: Animator::new(SpriteSheet::Knight),
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::from_feet(self.pos, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    #[inline]
    pub fn invulnerable(&self) -> bool {
        self.invul_timer > 0.0
    }

    /// Horizontal speed for the current carrying state
    pub fn speed(&self) -> f32 {
        if self.carrying {
            PLAYER_SPEED * PLAYER_SPEED_CARRY_FACTOR
        } else {
            PLAYER_SPEED
        }
    }

    /// Per-frame gravity for the current carrying state
    pub fn gravity(&self) -> f32 {
        if self.carrying {
            GRAVITY * GRAVITY_CARRY_FACTOR
        } else {
            GRAVITY
        }
    }

    /// Advance one frame of movement against the level's solids
    pub fn update<'a>(
        &mut self,
        input: &TickInput,
        dt: f32,
        solids: impl IntoIterator<Item = &'a Rect> + Clone,
        events: &mut Vec<GameEvent>,
    ) {
        let speed = self.speed();
        let dx = if input.left {
            -speed
        } else if input.right {
            speed
        } else {
            0.0
        };
        self.vel.x = dx;
        self.vel.y += self.gravity();

        // Horizontal: move, hard clamp, then push out of walls
        self.pos.x = (self.pos.x + dx).clamp(SCREEN_MARGIN, WIDTH - SCREEN_MARGIN);
        resolve_horizontal(&mut self.pos, SIZE, dx, solids.clone());

        // Vertical
        self.pos.y += self.vel.y;
        let contact = resolve_vertical(&mut self.pos, &mut self.vel.y, SIZE, solids);
        self.on_ground = contact.landed;

        // Safety floor
        if self.pos.y > HEIGHT {
            self.pos.y = HEIGHT;
            self.vel.y = 0.0;
            self.on_ground = true;
        }

        if self.on_ground && input.jump {
            self.vel.y = JUMP_STRENGTH;
            events.push(GameEvent::Sound(SoundEffect::Jump));
        }

        self.anim.set(self.pick_animation());
        self.anim.advance(dt);

        if self.invul_timer > 0.0 {
            self.invul_timer -= dt;
        }
    }

    fn pick_animation(&self) -> AnimState {
        match (self.on_ground, self.vel.x != 0.0, self.carrying) {
            (false, _, false) => AnimState::Jump,
            (false, _, true) => AnimState::JumpCarry,
            (true, true, false) => AnimState::Run,
            (true, true, true) => AnimState::RunCarry,
            (true, false, false) => AnimState::Idle,
            (true, false, true) => AnimState::IdleCarry,
        }
    }

    /// Take a hit. Returns true if a life was lost.
    pub fn hit(&mut self) -> bool {
        if self.invulnerable() {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        self.invul_timer = INVULNERABILITY_SECS;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::Level;

    fn held(left: bool, right: bool, jump: bool) -> TickInput {
        TickInput {
            left,
            right,
            jump,
            ..Default::default()
        }
    }

    #[test]
    fn test_gravity_accumulates_while_airborne() {
        let mut player = Player::new(Vec2::new(400.0, 100.0));
        let mut events = Vec::new();
        let none: [&Rect; 0] = [];
        player.update(&TickInput::default(), SIM_DT, none, &mut events);
        assert_eq!(player.vel.y, GRAVITY);
        player.update(&TickInput::default(), SIM_DT, none, &mut events);
        assert_eq!(player.vel.y, GRAVITY + GRAVITY);
        assert!(!player.on_ground);
        assert_eq!(player.anim.state, AnimState::Jump);
    }

    #[test]
    fn test_carrying_changes_constants() {
        let mut player = Player::new(Vec2::new(400.0, 100.0));
        player.carrying = true;
        let mut events = Vec::new();
        let none: [&Rect; 0] = [];
        player.update(&held(false, true, false), SIM_DT, none, &mut events);
        assert_eq!(player.vel.y, GRAVITY * GRAVITY_CARRY_FACTOR);
        assert_eq!(player.pos.x, 400.0 + PLAYER_SPEED * PLAYER_SPEED_CARRY_FACTOR);
        assert_eq!(player.anim.state, AnimState::JumpCarry);
    }

    #[test]
    fn test_left_wins_over_right() {
        let mut player = Player::new(Vec2::new(400.0, 100.0));
        let mut events = Vec::new();
        let none: [&Rect; 0] = [];
        player.update(&held(true, true, false), SIM_DT, none, &mut events);
        assert_eq!(player.pos.x, 396.0);
    }

    #[test]
    fn test_lands_on_floor_and_jumps() {
        let level = Level::reference();
        let spawn = level.player_spawn_or_default();
        let mut player = Player::new(spawn.pos);
        let mut events = Vec::new();

        player.update(&TickInput::default(), SIM_DT, level.solids(), &mut events);
        assert!(player.on_ground);
        assert_eq!(player.pos.y, spawn.pos.y);
        assert_eq!(player.vel.y, 0.0);
        assert_eq!(player.anim.state, AnimState::Idle);

        player.update(&held(false, false, true), SIM_DT, level.solids(), &mut events);
        assert_eq!(player.vel.y, JUMP_STRENGTH);
        assert_eq!(events, vec![GameEvent::Sound(SoundEffect::Jump)]);
    }

    #[test]
    fn test_castle_blocks_walking_left() {
        let level = Level::reference();
        // Standing on the bottom floor, right of the spawn castle
        let mut player = Player::new(Vec2::new(120.0, 560.0));
        let mut events = Vec::new();
        for _ in 0..10 {
            player.update(&held(true, false, false), SIM_DT, level.solids(), &mut events);
        }
        assert_eq!(player.pos.x, 80.0 + PLAYER_WIDTH / 2.0);
        assert!(player.on_ground);
        assert_eq!(player.anim.state, AnimState::Run);
    }

    #[test]
    fn test_safety_floor() {
        let mut player = Player::new(Vec2::new(400.0, 599.0));
        player.vel.y = 5.0;
        let mut events = Vec::new();
        let none: [&Rect; 0] = [];
        player.update(&TickInput::default(), SIM_DT, none, &mut events);
        assert_eq!(player.pos.y, HEIGHT);
        assert!(player.on_ground);
    }

    #[test]
    fn test_hit_respects_invulnerability() {
        let mut player = Player::new(Vec2::ZERO);
        assert!(player.hit());
        assert!(!player.hit());
        assert_eq!(player.lives, PLAYER_LIVES - 1);
        assert_eq!(player.invul_timer, INVULNERABILITY_SECS);
    }

    #[test]
    fn test_invulnerability_wears_off() {
        let mut player = Player::new(Vec2::new(300.0, 560.0));
        let level = Level::reference();
        let mut events = Vec::new();
        player.hit();
        // 0.5s: still protected
        for _ in 0..30 {
            player.update(&TickInput::default(), SIM_DT, level.solids(), &mut events);
        }
        assert!(!player.hit());
        // Past 1.0s total
        for _ in 0..31 {
            player.update(&TickInput::default(), SIM_DT, level.solids(), &mut events);
        }
        assert!(player.hit());
        assert_eq!(player.lives, PLAYER_LIVES - 2);
    }
}
