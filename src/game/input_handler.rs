// game/input_handler.rs

use crate::simulation::InputFrame;
use crate::utils::vec2d::Vec2d;
use piston_window::{Button, Key, MouseButton};

/// Tracks held keys and buttons between window events and folds them into
/// one InputFrame per update tick.
#[derive(Default)]
pub struct InputState {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    fire_key: bool,
    fire_mouse: bool,
    interact_pending: bool,
}

impl InputState {
    pub fn new() -> Self {
        InputState::default()
    }

    pub fn key_press(&mut self, button: Button) {
        self.interact_pending = true;
        match button {
            Button::Keyboard(key) => match key {
                Key::W | Key::Up => self.up = true,
                Key::S | Key::Down => self.down = true,
                Key::A | Key::Left => self.left = true,
                Key::D | Key::Right => self.right = true,
                Key::Space => self.fire_key = true,
                _ => {}
            },
            Button::Mouse(MouseButton::Left) => self.fire_mouse = true,
            _ => {}
        }
    }

    pub fn key_release(&mut self, button: Button) {
        match button {
            Button::Keyboard(key) => match key {
                Key::W | Key::Up => self.up = false,
                Key::S | Key::Down => self.down = false,
                Key::A | Key::Left => self.left = false,
                Key::D | Key::Right => self.right = false,
                Key::Space => self.fire_key = false,
                _ => {}
            },
            Button::Mouse(MouseButton::Left) => self.fire_mouse = false,
            _ => {}
        }
    }

    /// Thrust direction from held keys, capped to unit length so diagonals
    /// are no faster than straight lines.
    pub fn movement_vector(&self) -> Vec2d {
        let mut movement = Vec2d::zero();
        if self.up {
            movement.y -= 1.0;
        }
        if self.down {
            movement.y += 1.0;
        }
        if self.left {
            movement.x -= 1.0;
        }
        if self.right {
            movement.x += 1.0;
        }
        if movement.length() > 1.0 {
            movement.normalized()
        } else {
            movement
        }
    }

    pub fn fire_held(&self) -> bool {
        self.fire_key || self.fire_mouse
    }

    /// One-shot latch: true if any key or button was pressed since the
    /// last call.
    pub fn consume_interaction(&mut self) -> bool {
        let pending = self.interact_pending;
        self.interact_pending = false;
        pending
    }

    pub fn frame(&mut self) -> InputFrame {
        InputFrame {
            movement: self.movement_vector(),
            fire: self.fire_held(),
            interact: self.consume_interaction(),
        }
    }
}
