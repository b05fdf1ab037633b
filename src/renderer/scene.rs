//! Frame assembly

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::{HEIGHT, WIDTH};
use crate::sim::{GamePhase, GameState, Rect, Tile};
use crate::ui;

/// How a sprite is anchored at its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Position is the bottom-center of the image
    Feet,
    /// Position is the center of the image
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpriteDraw {
    /// Image name, e.g. `knight_run_2`
    pub image: String,
    pub pos: Vec2,
    pub align: Align,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextDraw {
    pub text: String,
    /// Text center
    pub pos: Vec2,
    pub size: f32,
    pub color: [f32; 4],
}

/// Everything needed to draw one frame, back to front: quads, then sprites,
/// then text
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub clear_color: [f32; 4],
    pub vertices: Vec<Vertex>,
    pub sprites: Vec<SpriteDraw>,
    pub texts: Vec<TextDraw>,
}

impl Frame {
    fn quad(&mut self, r: &Rect, color: [f32; 4]) {
        self.vertices.extend_from_slice(&shapes::rect(r, color));
    }

    fn sprite(&mut self, image: impl ToString, pos: Vec2, align: Align) {
        self.sprites.push(SpriteDraw {
            image: image.to_string(),
            pos,
            align,
        });
    }

    fn text(&mut self, text: impl Into<String>, pos: Vec2, size: f32, color: [f32; 4]) {
        self.texts.push(TextDraw {
            text: text.into(),
            pos,
            size,
            color,
        });
    }

    fn buttons(&mut self, state: &GameState) {
        for button in ui::buttons(state.phase) {
            self.quad(&button.rect, colors::BUTTON);
            let label = ui::label(button.action, state.phase, state.music_on);
            self.text(label, button.rect.center(), 30.0, colors::TEXT);
        }
    }
}

/// Build the draw list for the current state
pub fn build_frame(state: &GameState) -> Frame {
    let mut frame = Frame {
        clear_color: colors::BACKGROUND,
        ..Default::default()
    };

    match state.phase {
        GamePhase::Menu => {
            frame.text(
                "Save The Princess",
                Vec2::new(WIDTH / 2.0, 100.0),
                60.0,
                colors::TITLE,
            );
            frame.buttons(state);
        }
        GamePhase::Playing => draw_world(&mut frame, state),
        GamePhase::GameOver | GamePhase::Victory => {
            let (msg, color) = if state.phase == GamePhase::Victory {
                ("VICTORY!", colors::VICTORY)
            } else {
                ("GAME OVER", colors::GAME_OVER)
            };
            frame.text(msg, Vec2::new(WIDTH / 2.0, HEIGHT / 2.0), 80.0, color);
            frame.buttons(state);
        }
    }

    frame
}

fn tile_color(tile: Tile) -> [f32; 4] {
    match tile {
        Tile::Wall => colors::WALL,
        Tile::Platform => colors::PLATFORM,
        Tile::Castle => colors::CASTLE,
    }
}

fn draw_world(frame: &mut Frame, state: &GameState) {
    frame.quad(&state.spawn.zone, colors::SPAWN_ZONE);
    for (tile, r) in state.level.tiles() {
        frame.quad(r, tile_color(tile));
    }

    if let Some(princess) = state.princess.as_ref().filter(|p| !p.picked) {
        frame.sprite(princess.anim.frame(), princess.pos, Align::Feet);
    }
    frame.sprite(state.player.anim.frame(), state.player.pos, Align::Feet);
    for enemy in &state.enemies {
        frame.sprite(enemy.anim.frame(), enemy.pos, Align::Feet);
        for p in &enemy.projectiles {
            frame.sprite(p.kind.sprite(), p.pos, Align::Center);
        }
    }

    frame.text(
        format!("LIVES: {}", state.player.lives),
        Vec2::new(60.0, 25.0),
        30.0,
        colors::LIVES,
    );
    frame.buttons(state);
}
