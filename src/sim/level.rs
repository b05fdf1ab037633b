//! Level grid parsing
//!
//! A level is a rectangular grid of single-character tile codes. Parsing is a
//! single pass over the cells and never fails: unknown characters are empty.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::BLOCK_SIZE;

/// The hand-authored reference level (20 x 15 cells = 800 x 600)
///
/// W=wall, P=platform, C=castle, K=princess, F=fire monster, S=sword monster
pub const LEVEL_MAP: [&str; 15] = [
    "WWWWWWWWWWWWWWWWWWWW",
    "W                  W",
    "W                  W",
    "W                  W",
    "W                  W",
    "W                  W",
    "W             KS   W",
    "W          PPCCCPPPW",
    "W        P         W",
    "W  F               W",
    "WPPPPPP            W",
    "W      P           W",
    "W         PPPPPP   W",
    "WC                 W",
    "WWWWWWWWWWWWWWWWWWWW",
];

/// Castles below this row are player spawn candidates
pub const SPAWN_ROW_THRESHOLD: usize = 10;

/// Entities stand this far below their cell center
const ENTITY_Y_OFFSET: f32 = 10.0;

/// Spawn used when the grid has no bottom castle
pub const FALLBACK_SPAWN: PlayerSpawn = PlayerSpawn {
    pos: Vec2::new(100.0, 520.0),
    zone: Rect::new(80.0, 520.0, 80.0, 40.0),
};

/// Static tile kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Platform,
    Castle,
}

/// Enemy archetypes that can be placed in a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Fire monster: walks back and forth, shooting fireballs each way
    Patroller,
    /// Sword monster: wanders the right side, throwing swords leftward
    Wanderer,
}

/// Where and what to spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    pub pos: Vec2,
}

/// Player spawn point plus the delivery zone around it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSpawn {
    pub pos: Vec2,
    pub zone: Rect,
}

/// Static level description
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Level {
    pub walls: Vec<Rect>,
    pub platforms: Vec<Rect>,
    pub castles: Vec<Rect>,
    pub princess: Option<Vec2>,
    pub player_spawn: Option<PlayerSpawn>,
    pub enemies: Vec<EnemySpawn>,
}

impl Level {
    /// Parse a grid of rows into a level
    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Self {
        let mut level = Level::default();

        for (r, row) in rows.iter().enumerate() {
            for (c, ch) in row.as_ref().chars().enumerate() {
                let cell = Rect::new(
                    c as f32 * BLOCK_SIZE,
                    r as f32 * BLOCK_SIZE,
                    BLOCK_SIZE,
                    BLOCK_SIZE,
                );
                let entity_pos = cell.center() + Vec2::new(0.0, ENTITY_Y_OFFSET);

                match ch {
                    'W' => level.walls.push(cell),
                    'P' => level.platforms.push(cell),
                    'C' => {
                        level.castles.push(cell);
                        // Last bottom castle wins
                        if r > SPAWN_ROW_THRESHOLD {
                            level.player_spawn = Some(PlayerSpawn {
                                pos: Vec2::new(cell.center().x, cell.top()),
                                zone: Rect::new(cell.x, cell.y, BLOCK_SIZE * 2.0, BLOCK_SIZE),
                            });
                        }
                    }
                    'K' => level.princess = Some(entity_pos),
                    'F' => level.enemies.push(EnemySpawn {
                        kind: EnemyKind::Patroller,
                        pos: entity_pos,
                    }),
                    'S' => level.enemies.push(EnemySpawn {
                        kind: EnemyKind::Wanderer,
                        pos: entity_pos,
                    }),
                    _ => {}
                }
            }
        }

        log::debug!(
            "Parsed level: {} walls, {} platforms, {} castles, {} enemies",
            level.walls.len(),
            level.platforms.len(),
            level.castles.len(),
            level.enemies.len()
        );

        level
    }

    /// The reference level
    pub fn reference() -> Self {
        Self::parse(&LEVEL_MAP)
    }

    /// Player spawn, or the hardcoded fallback if the grid has none
    pub fn player_spawn_or_default(&self) -> PlayerSpawn {
        self.player_spawn.unwrap_or_else(|| {
            log::warn!("Level has no bottom castle, using fallback spawn");
            FALLBACK_SPAWN
        })
    }

    /// Every solid tile with its kind: walls, then platforms, then castles
    pub fn tiles(&self) -> impl Iterator<Item = (Tile, &Rect)> + Clone {
        tagged(Tile::Wall, &self.walls)
            .chain(tagged(Tile::Platform, &self.platforms))
            .chain(tagged(Tile::Castle, &self.castles))
    }

    /// Every solid rectangle, in collision resolution order
    pub fn solids(&self) -> impl Iterator<Item = &Rect> + Clone {
        self.tiles().map(|(_, r)| r)
    }
}

fn tagged(tile: Tile, rects: &[Rect]) -> impl Iterator<Item = (Tile, &Rect)> + Clone {
    rects.iter().map(move |r| (tile, r))
}
