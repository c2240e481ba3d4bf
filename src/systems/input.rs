//! Keyboard polling for the windowed demo (`window` feature).
//!
//! Space flaps (or restarts after a hit), `Q` pauses, `D` toggles debug
//! drawing, `F` toggles drawing and `R` cycles the sprite sheet.

use raylib::RaylibHandle;
use raylib::ffi::KeyboardKey;

use crate::game::GameKey;

const BINDINGS: [(KeyboardKey, GameKey); 5] = [
    (KeyboardKey::KEY_SPACE, GameKey::Flap),
    (KeyboardKey::KEY_Q, GameKey::Pause),
    (KeyboardKey::KEY_D, GameKey::Debug),
    (KeyboardKey::KEY_F, GameKey::ToggleDrawing),
    (KeyboardKey::KEY_R, GameKey::NextSheet),
];

/// Keys pressed since the previous poll, in binding order.
pub fn pressed_keys(rl: &RaylibHandle) -> Vec<GameKey> {
    BINDINGS
        .iter()
        .filter(|(key, _)| rl.is_key_pressed(*key))
        .map(|(_, game_key)| *game_key)
        .collect()
}
