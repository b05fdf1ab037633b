//! Game state and core simulation types
//!
//! `GameState` is the single application context: the host builds it once,
//! then passes it to `tick` for updates and to the renderer for drawing.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::anim::{Animator, SpriteSheet};
use super::enemy::Enemy;
use super::level::{Level, PlayerSpawn};
use super::player::Player;
use crate::settings::Settings;

/// Top-level game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen (initial)
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Out of lives
    GameOver,
    /// Princess delivered home
    Victory,
}

/// One-shot sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    Jump,
    Fireball,
    SwordThrow,
    Collect,
}

impl SoundEffect {
    /// Asset name of the cue
    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::Jump => "jump",
            SoundEffect::Fireball => "fireball",
            SoundEffect::SwordThrow => "sword_throw",
            SoundEffect::Collect => "collect",
        }
    }
}

/// Background music control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MusicCommand {
    Start,
    Stop,
}

/// Side effects produced by a tick, for the host to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundEffect),
    Music(MusicCommand),
    PhaseChanged { from: GamePhase, to: GamePhase },
    /// The player lost a life
    PlayerHit { lives_left: u8 },
    /// Exit was requested from the menu
    Quit,
}

/// The captive
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Princess {
    /// Feet anchor
    pub pos: Vec2,
    /// Carried away: no longer drawn or collidable
    pub picked: bool,
    pub anim: Animator,
}

impl Princess {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            picked: false,
            anim: Animator::new(SpriteSheet::Princess),
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.anim.advance(dt);
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Sound/music toggle (survives resets)
    pub music_on: bool,
    /// Static level description; runtime entities are rebuilt from it on reset
    pub level: Level,
    pub spawn: PlayerSpawn,
    pub player: Player,
    pub princess: Option<Princess>,
    /// Enemies (sorted by id)
    pub enemies: Vec<Enemy>,
    /// Frames simulated since the last reset
    pub time_ticks: u64,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a game sitting at the menu, with the reference level loaded
    pub fn new(seed: u64) -> Self {
        Self::with_level(seed, Level::reference())
    }

    /// Create a game from settings (seed and sound toggle)
    pub fn from_settings(settings: &Settings) -> Self {
        let mut state = Self::new(settings.seed.unwrap_or(0));
        state.music_on = settings.sound_enabled;
        state
    }

    pub fn with_level(seed: u64, level: Level) -> Self {
        let spawn = level.player_spawn_or_default();
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            music_on: true,
            level,
            spawn,
            player: Player::new(spawn.pos),
            princess: None,
            enemies: Vec::new(),
            time_ticks: 0,
            next_id: 1,
        };
        state.reset();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Rebuild every runtime entity from the static level description.
    ///
    /// The RNG is reseeded so each run from the same seed plays out the same.
    /// `phase` and `music_on` are left to the caller.
    pub fn reset(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.time_ticks = 0;
        self.next_id = 1;

        self.spawn = self.level.player_spawn_or_default();
        self.player = Player::new(self.spawn.pos);
        self.princess = self.level.princess.map(Princess::new);

        let spawns = self.level.enemies.clone();
        let mut enemies = Vec::with_capacity(spawns.len());
        for spawn in &spawns {
            let id = self.next_entity_id();
            enemies.push(Enemy::new(id, spawn));
        }
        self.enemies = enemies;

        log::info!(
            "Level reset (seed {}): player at ({}, {}), {} enemies",
            self.seed,
            self.spawn.pos.x,
            self.spawn.pos.y,
            self.enemies.len()
        );
    }

    /// Change phase, recording the transition
    pub fn set_phase(&mut self, to: GamePhase, events: &mut Vec<GameEvent>) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        log::info!("Phase {:?} -> {:?}", from, to);
        events.push(GameEvent::PhaseChanged { from, to });
    }

    /// Total projectiles in flight across all enemies
    pub fn projectile_count(&self) -> usize {
        self.enemies.iter().map(|e| e.projectiles.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::PLAYER_LIVES;
    use crate::sim::level::EnemyKind;

    #[test]
    fn test_new_state_sits_at_menu() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.music_on);
        assert_eq!(state.player.pos, Vec2::new(60.0, 520.0));
        assert_eq!(state.player.lives, PLAYER_LIVES);
        assert!(state.princess.is_some());
        assert_eq!(state.enemies.len(), 2);
    }

    #[test]
    fn test_reset_rebuilds_entities() {
        let mut state = GameState::new(5);
        state.player.lives = 1;
        state.player.carrying = true;
        state.player.pos = Vec2::new(500.0, 100.0);
        if let Some(princess) = state.princess.as_mut() {
            princess.picked = true;
        }
        state.enemies.clear();

        state.reset();
        assert_eq!(state.player.lives, PLAYER_LIVES);
        assert!(!state.player.carrying);
        assert_eq!(state.player.pos, state.spawn.pos);
        assert!(!state.princess.as_ref().unwrap().picked);
        let kinds: Vec<_> = state.enemies.iter().map(Enemy::kind).collect();
        assert_eq!(kinds, vec![EnemyKind::Wanderer, EnemyKind::Patroller]);
        let ids: Vec<_> = state.enemies.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_missing_princess_and_spawn() {
        let state = GameState::with_level(0, Level::parse(&["W  W", "WWWW"]));
        assert!(state.princess.is_none());
        assert_eq!(state.player.pos, Vec2::new(100.0, 520.0));
    }

    #[test]
    fn test_set_phase_records_transition() {
        let mut state = GameState::new(0);
        let mut events = Vec::new();
        state.set_phase(GamePhase::Playing, &mut events);
        state.set_phase(GamePhase::Playing, &mut events);
        assert_eq!(
            events,
            vec![GameEvent::PhaseChanged {
                from: GamePhase::Menu,
                to: GamePhase::Playing
            }]
        );
    }

    #[test]
    fn test_sound_names() {
        assert_eq!(SoundEffect::SwordThrow.name(), "sword_throw");
        assert_eq!(SoundEffect::Collect.name(), "collect");
    }
}
