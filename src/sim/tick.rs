//! Fixed timestep simulation tick
//!
//! Processing order while playing:
//!   1. Pointer click (menu/UI action)
//!   2. Player movement against level solids
//!   3. Princess animation
//!   4. Enemies (behavior, then their projectiles)
//!   5. Interaction resolver: pickup, delivery, body damage,
//!      projectile damage, loss check

use glam::Vec2;

use super::rect::Rect;
use super::state::{GameEvent, GamePhase, GameState, MusicCommand, SoundEffect};
use crate::consts::{DELIVERY_PROBE, PICKUP_RADIUS};
use crate::ui::{self, UiAction};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held left
    pub left: bool,
    /// Held right
    pub right: bool,
    /// Held jump (space)
    pub jump: bool,
    /// Pointer click this frame, in screen coordinates
    pub click: Option<Vec2>,
}

/// Advance the game by one frame and return the side effects it produced
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if let Some(pos) = input.click {
        on_click(state, pos, &mut events);
    }

    if state.phase != GamePhase::Playing {
        return events;
    }

    state.time_ticks += 1;

    state
        .player
        .update(input, dt, state.level.solids(), &mut events);

    if let Some(princess) = state.princess.as_mut() {
        princess.update(dt);
    }

    for enemy in &mut state.enemies {
        enemy.update(dt, &mut state.rng, &mut events);
    }

    resolve_interactions(state, &mut events);

    // The sound toggle silences effects as well as music
    if !state.music_on {
        events.retain(|e| !matches!(e, GameEvent::Sound(_)));
    }

    events
}

/// Hit-test a click against the current screen's buttons and act on it
pub fn on_click(state: &mut GameState, pos: Vec2, events: &mut Vec<GameEvent>) {
    if let Some(action) = ui::hit_test(state.phase, pos) {
        apply_action(state, action, events);
    }
}

/// Game state machine transitions driven by UI actions.
///
/// Actions that do not apply to the current phase are ignored.
pub fn apply_action(state: &mut GameState, action: UiAction, events: &mut Vec<GameEvent>) {
    match (state.phase, action) {
        (GamePhase::Menu, UiAction::Start) => {
            state.reset();
            state.set_phase(GamePhase::Playing, events);
            if state.music_on {
                events.push(GameEvent::Music(MusicCommand::Start));
            }
        }
        (GamePhase::Menu | GamePhase::Playing, UiAction::ToggleSound) => {
            state.music_on = !state.music_on;
            log::info!("Sound {}", if state.music_on { "on" } else { "off" });
            let command = if state.music_on {
                MusicCommand::Start
            } else {
                MusicCommand::Stop
            };
            events.push(GameEvent::Music(command));
        }
        (GamePhase::Menu, UiAction::Exit) => events.push(GameEvent::Quit),
        (GamePhase::Playing, UiAction::Home) => {
            state.set_phase(GamePhase::Menu, events);
            events.push(GameEvent::Music(MusicCommand::Stop));
        }
        (GamePhase::GameOver | GamePhase::Victory, UiAction::Back) => {
            state.set_phase(GamePhase::Menu, events);
            events.push(GameEvent::Music(MusicCommand::Stop));
        }
        (phase, action) => {
            log::debug!("Ignoring {:?} in {:?}", action, phase);
        }
    }
}

/// Cross-entity rules, run once per frame after every entity has moved
pub fn resolve_interactions(state: &mut GameState, events: &mut Vec<GameEvent>) {
    resolve_pickup(state, events);
    resolve_delivery(state, events);
    resolve_enemy_contact(state, events);
    resolve_projectile_hits(state, events);
    resolve_loss(state, events);
}

fn resolve_pickup(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.player.carrying {
        return;
    }
    let Some(princess) = state.princess.as_mut() else {
        return;
    };
    if princess.picked {
        return;
    }
    if state.player.pos.distance(princess.pos) < PICKUP_RADIUS {
        state.player.carrying = true;
        princess.picked = true;
        log::info!("Princess picked up");
        events.push(GameEvent::Sound(SoundEffect::Collect));
    }
}

fn resolve_delivery(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if !state.player.carrying {
        return;
    }
    let probe = Rect::new(
        state.player.pos.x,
        state.player.pos.y,
        DELIVERY_PROBE,
        DELIVERY_PROBE,
    );
    if probe.intersects(&state.spawn.zone) {
        state.set_phase(GamePhase::Victory, events);
        events.push(GameEvent::Sound(SoundEffect::Collect));
    }
}

fn resolve_enemy_contact(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player_box = state.player.hitbox();
    for enemy in &state.enemies {
        if player_box.intersects(&enemy.hitbox()) && state.player.hit() {
            events.push(GameEvent::PlayerHit {
                lives_left: state.player.lives,
            });
        }
    }
}

fn resolve_projectile_hits(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player_box = state.player.hitbox();
    let player = &mut state.player;
    for enemy in &mut state.enemies {
        // Every touching projectile is consumed, even during invulnerability
        enemy.projectiles.retain(|projectile| {
            if !player_box.intersects(&projectile.hitbox()) {
                return true;
            }
            if player.hit() {
                events.push(GameEvent::PlayerHit {
                    lives_left: player.lives,
                });
            }
            false
        });
    }
}

fn resolve_loss(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.player.lives == 0 {
        state.set_phase(GamePhase::GameOver, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{INVULNERABILITY_SECS, PLAYER_LIVES, SIM_DT};
    use crate::sim::projectile::{Projectile, ProjectileKind};

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        let mut events = Vec::new();
        apply_action(&mut state, UiAction::Start, &mut events);
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    #[test]
    fn test_menu_does_not_simulate() {
        let mut state = GameState::new(1);
        let before = state.player.pos;
        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(events.is_empty());
        assert_eq!(state.player.pos, before);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_start_click_resets_and_plays() {
        let mut state = GameState::new(1);
        state.player.lives = 1;
        let input = TickInput {
            click: Some(Vec2::new(400.0, 275.0)),
            ..Default::default()
        };
        let events = tick(&mut state, &input, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.lives, PLAYER_LIVES);
        assert!(events.contains(&GameEvent::Music(MusicCommand::Start)));
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_start_with_sound_off_keeps_music_quiet() {
        let mut state = GameState::new(1);
        let mut events = Vec::new();
        apply_action(&mut state, UiAction::ToggleSound, &mut events);
        assert!(!state.music_on);
        events.clear();
        apply_action(&mut state, UiAction::Start, &mut events);
        assert!(!events.contains(&GameEvent::Music(MusicCommand::Start)));
    }

    #[test]
    fn test_sound_off_silences_effects() {
        let mut state = playing(1);
        let toggle = TickInput {
            click: Some(Vec2::new(720.0, 30.0)),
            ..Default::default()
        };
        let events = tick(&mut state, &toggle, SIM_DT);
        assert!(!state.music_on);
        assert!(events.contains(&GameEvent::Music(MusicCommand::Stop)));

        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        let mut jumped = false;
        for _ in 0..5 {
            let events = tick(&mut state, &jump, SIM_DT);
            assert!(!events.iter().any(|e| matches!(e, GameEvent::Sound(_))));
            jumped |= state.player.vel.y == crate::consts::JUMP_STRENGTH;
        }
        assert!(jumped);
    }

    #[test]
    fn test_home_returns_to_menu_without_reset() {
        let mut state = playing(1);
        state.player.lives = 2;
        let mut events = Vec::new();
        apply_action(&mut state, UiAction::Home, &mut events);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.player.lives, 2);
        assert!(events.contains(&GameEvent::Music(MusicCommand::Stop)));
    }

    #[test]
    fn test_back_only_from_end_screens() {
        let mut state = playing(1);
        let mut events = Vec::new();
        apply_action(&mut state, UiAction::Back, &mut events);
        assert_eq!(state.phase, GamePhase::Playing);

        state.set_phase(GamePhase::Victory, &mut events);
        apply_action(&mut state, UiAction::Back, &mut events);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_exit_from_menu_requests_quit() {
        let mut state = GameState::new(1);
        let mut events = Vec::new();
        apply_action(&mut state, UiAction::Exit, &mut events);
        assert_eq!(events, vec![GameEvent::Quit]);
    }

    #[test]
    fn test_pickup_then_deliver() {
        let mut state = playing(1);
        let princess_pos = state.princess.as_ref().unwrap().pos;
        let mut events = Vec::new();

        state.player.pos = princess_pos;
        resolve_interactions(&mut state, &mut events);
        assert!(state.player.carrying);
        assert!(state.princess.as_ref().unwrap().picked);
        assert_eq!(events, vec![GameEvent::Sound(SoundEffect::Collect)]);
        assert_eq!(state.phase, GamePhase::Playing);

        events.clear();
        state.player.pos = state.spawn.pos;
        resolve_interactions(&mut state, &mut events);
        assert_eq!(state.phase, GamePhase::Victory);
        assert!(events.contains(&GameEvent::Sound(SoundEffect::Collect)));
    }

    #[test]
    fn test_no_pickup_out_of_reach() {
        let mut state = playing(1);
        let princess_pos = state.princess.as_ref().unwrap().pos;
        state.player.pos = princess_pos + Vec2::new(50.0, 0.0);
        let mut events = Vec::new();
        resolve_interactions(&mut state, &mut events);
        assert!(!state.player.carrying);
    }

    #[test]
    fn test_spawn_zone_without_princess_is_not_victory() {
        let mut state = playing(1);
        let mut events = Vec::new();
        state.player.pos = state.spawn.pos;
        resolve_interactions(&mut state, &mut events);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_last_life_lost_to_enemy_body() {
        let mut state = playing(1);
        state.player.lives = 1;
        state.player.invul_timer = 0.0;
        // The patroller, well away from the princess
        state.player.pos = state.enemies[1].pos;
        let mut events = Vec::new();
        resolve_interactions(&mut state, &mut events);
        assert_eq!(state.player.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(events.contains(&GameEvent::PlayerHit { lives_left: 0 }));
    }

    #[test]
    fn test_overlapping_two_enemies_costs_one_life() {
        let mut state = playing(1);
        let pos = state.enemies[1].pos;
        state.enemies[0].pos = pos;
        state.player.pos = pos;
        let mut events = Vec::new();
        resolve_interactions(&mut state, &mut events);
        assert_eq!(state.player.lives, PLAYER_LIVES - 1);
        assert_eq!(state.player.invul_timer, INVULNERABILITY_SECS);
    }

    #[test]
    fn test_projectile_hit_consumes_projectile() {
        let mut state = playing(1);
        state.player.pos = Vec2::new(300.0, 560.0);
        // Keep enemy bodies out of the way
        for enemy in &mut state.enemies {
            enemy.pos = Vec2::new(700.0, 100.0);
        }
        state.enemies[0].projectiles.push(Projectile::new(
            ProjectileKind::Sword,
            Vec2::new(300.0, 540.0),
            -6.0,
        ));
        state.enemies[0].projectiles.push(Projectile::new(
            ProjectileKind::Sword,
            Vec2::new(600.0, 540.0),
            -6.0,
        ));
        let mut events = Vec::new();
        resolve_interactions(&mut state, &mut events);
        assert_eq!(state.player.lives, PLAYER_LIVES - 1);
        assert_eq!(state.enemies[0].projectiles.len(), 1);
        assert_eq!(state.enemies[0].projectiles[0].pos.x, 600.0);
    }

    #[test]
    fn test_loss_overrides_delivery_in_same_frame() {
        let mut state = playing(1);
        for enemy in &mut state.enemies {
            enemy.pos = Vec2::new(700.0, 100.0);
        }
        state.player.carrying = true;
        if let Some(princess) = state.princess.as_mut() {
            princess.picked = true;
        }
        state.player.lives = 1;
        state.player.invul_timer = 0.0;
        state.player.pos = state.spawn.pos;
        let at = state.spawn.pos - Vec2::new(0.0, 20.0);
        state.enemies[1]
            .projectiles
            .push(Projectile::new(ProjectileKind::Fireball, at, 5.0));

        let mut events = Vec::new();
        resolve_interactions(&mut state, &mut events);
        assert_eq!(state.player.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(events.contains(&GameEvent::PhaseChanged {
            from: GamePhase::Playing,
            to: GamePhase::Victory
        }));
        assert!(events.contains(&GameEvent::PhaseChanged {
            from: GamePhase::Victory,
            to: GamePhase::GameOver
        }));
    }

    #[test]
    fn test_determinism() {
        let mut state1 = playing(99999);
        let mut state2 = playing(99999);
        let inputs = [
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
        ];
        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            let e1 = tick(&mut state1, input, SIM_DT);
            let e2 = tick(&mut state2, input, SIM_DT);
            assert_eq!(e1, e2);
        }
        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(state1.phase, state2.phase);
        for (a, b) in state1.enemies.iter().zip(&state2.enemies) {
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.projectiles.len(), b.projectiles.len());
        }
    }
}
