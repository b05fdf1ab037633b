//! Animated body capability
//!
//! Every drawable entity embeds an [`Animator`]. It tracks which clip is
//! playing and which frame of it is current; the renderer turns that into a
//! frame identifier such as `knight_run_2`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::ANIM_FRAME_SECS;

/// Which sprite sheet an entity draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteSheet {
    Knight,
    Princess,
    FireMonster,
    SwordMonster,
}

/// Animation state tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimState {
    #[default]
    Idle,
    Run,
    Jump,
    IdleCarry,
    RunCarry,
    JumpCarry,
    Walk,
}

/// A named run of numbered frames (`{prefix}_1` .. `{prefix}_{frames}`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clip {
    pub prefix: &'static str,
    pub frames: usize,
}

impl SpriteSheet {
    /// Clip for a state, or None if this sheet has no such animation
    pub fn clip(self, state: AnimState) -> Option<Clip> {
        use AnimState::*;
        let (prefix, frames) = match (self, state) {
            (SpriteSheet::Knight, Idle) => ("knight_idle", 3),
            (SpriteSheet::Knight, Run) => ("knight_run", 4),
            (SpriteSheet::Knight, Jump) => ("knight_jump", 2),
            (SpriteSheet::Knight, IdleCarry) => ("knight_princess_idle", 3),
            (SpriteSheet::Knight, RunCarry) => ("knight_princess_run", 4),
            (SpriteSheet::Knight, JumpCarry) => ("knight_princess_jump", 2),
            (SpriteSheet::Princess, Idle) => ("princess_idle", 3),
            (SpriteSheet::FireMonster, Idle) => ("fire_monster_idle", 2),
            (SpriteSheet::FireMonster, Walk) => ("fire_monster_walk", 2),
            (SpriteSheet::SwordMonster, Idle) => ("sword_monster_idle", 2),
            (SpriteSheet::SwordMonster, Walk) => ("sword_monster_walk", 2),
            _ => return None,
        };
        Some(Clip { prefix, frames })
    }
}

/// Identifier of a single image, e.g. `knight_run_2`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameId {
    pub prefix: &'static str,
    /// 1-based frame number
    pub number: usize,
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.prefix, self.number)
    }
}

/// Animation bookkeeping shared by all entities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animator {
    pub sheet: SpriteSheet,
    pub state: AnimState,
    pub frame_index: usize,
    pub timer: f32,
    /// Last frame actually shown (holds across states without a clip)
    shown: Option<(AnimState, usize)>,
}

impl Animator {
    pub fn new(sheet: SpriteSheet) -> Self {
        Self {
            sheet,
            state: AnimState::Idle,
            frame_index: 0,
            timer: 0.0,
            shown: None,
        }
    }

    /// Switch clip; the frame counter carries over
    #[inline]
    pub fn set(&mut self, state: AnimState) {
        self.state = state;
    }

    /// Advance the frame timer, stepping one frame every `ANIM_FRAME_SECS`
    pub fn advance(&mut self, dt: f32) {
        let Some(clip) = self.sheet.clip(self.state) else {
            return;
        };
        self.timer += dt;
        if self.timer >= ANIM_FRAME_SECS {
            self.timer = 0.0;
            self.frame_index = (self.frame_index + 1) % clip.frames;
            self.shown = Some((self.state, self.frame_index));
        }
    }

    /// Image to draw right now
    pub fn frame(&self) -> FrameId {
        match self.shown.and_then(|(state, index)| {
            self.sheet.clip(state).map(|clip| (clip, index))
        }) {
            Some((clip, index)) => FrameId {
                prefix: clip.prefix,
                number: index % clip.frames + 1,
            },
            None => {
                // Nothing advanced yet: first idle frame
                let clip = self.sheet.clip(AnimState::Idle).unwrap_or(Clip {
                    prefix: "missing",
                    frames: 1,
                });
                FrameId {
                    prefix: clip.prefix,
                    number: 1,
                }
            }
        }
    }
}
