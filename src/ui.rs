//! Screen layout and pointer hit-testing
//!
//! Buttons are fixed rectangles per screen. The renderer draws them from the
//! same table that clicks are tested against.

use glam::Vec2;

use crate::consts::{HEIGHT, WIDTH};
use crate::sim::{GamePhase, Rect};

/// What a button does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Start,
    ToggleSound,
    Exit,
    Home,
    Back,
}

/// A clickable button
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Button {
    pub rect: Rect,
    pub action: UiAction,
}

const CX: f32 = WIDTH / 2.0;
const CY: f32 = HEIGHT / 2.0;

const MENU_BUTTONS: [Button; 3] = [
    Button {
        rect: Rect::new(CX - 100.0, CY - 50.0, 200.0, 50.0),
        action: UiAction::Start,
    },
    Button {
        rect: Rect::new(CX - 100.0, CY + 20.0, 200.0, 50.0),
        action: UiAction::ToggleSound,
    },
    Button {
        rect: Rect::new(CX - 100.0, CY + 90.0, 200.0, 50.0),
        action: UiAction::Exit,
    },
];

const HUD_BUTTONS: [Button; 2] = [
    Button {
        rect: Rect::new(WIDTH - 50.0, 10.0, 40.0, 40.0),
        action: UiAction::Home,
    },
    Button {
        rect: Rect::new(WIDTH - 100.0, 10.0, 40.0, 40.0),
        action: UiAction::ToggleSound,
    },
];

const END_BUTTONS: [Button; 1] = [Button {
    rect: Rect::new(CX - 100.0, CY + 100.0, 200.0, 50.0),
    action: UiAction::Back,
}];

/// Buttons shown for a phase
pub fn buttons(phase: GamePhase) -> &'static [Button] {
    match phase {
        GamePhase::Menu => &MENU_BUTTONS,
        GamePhase::Playing => &HUD_BUTTONS,
        GamePhase::GameOver | GamePhase::Victory => &END_BUTTONS,
    }
}

/// First button under `pos`, if any
pub fn hit_test(phase: GamePhase, pos: Vec2) -> Option<UiAction> {
    buttons(phase)
        .iter()
        .find(|b| b.rect.contains_point(pos))
        .map(|b| b.action)
}

/// Label for a button
pub fn label(action: UiAction, phase: GamePhase, music_on: bool) -> &'static str {
    match (action, phase) {
        (UiAction::Start, _) => "PLAY",
        (UiAction::ToggleSound, GamePhase::Menu) if music_on => "SOUND ON",
        (UiAction::ToggleSound, GamePhase::Menu) => "SOUND OFF",
        (UiAction::ToggleSound, _) => "S",
        (UiAction::Exit, _) => "EXIT",
        (UiAction::Home, _) => "M",
        (UiAction::Back, _) => "Back to Menu",
    }
}
