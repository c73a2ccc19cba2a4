//! Input adapter: turns key events into player commands.
//!
//! Commands go over a channel the engine drains at the start of each tick,
//! so input never touches entity state directly.

use std::io::BufRead;
use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;

use skirmish_core::commands::PlayerCommand;
use skirmish_core::components::DirectionalInput;
use skirmish_sim::SharedWorld;

use crate::error::{spawn_named, Result};

/// Game keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Melee,
}

impl Key {
    /// W/A/S/D move, J attacks.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'w' => Some(Key::Up),
            's' => Some(Key::Down),
            'a' => Some(Key::Left),
            'd' => Some(Key::Right),
            'j' => Some(Key::Melee),
            _ => None,
        }
    }
}

pub struct InputAdapter {
    held: DirectionalInput,
    commands: Sender<PlayerCommand>,
}

impl InputAdapter {
    pub fn new(commands: Sender<PlayerCommand>) -> Self {
        Self {
            held: DirectionalInput::default(),
            commands,
        }
    }

    /// Create an adapter whose commands the engine in `shared` drains each tick.
    pub fn connect(shared: &SharedWorld) -> Self {
        let (tx, rx) = mpsc::channel();
        shared.with(|engine| engine.attach_input(rx));
        Self::new(tx)
    }

    /// Replace the held directions.
    pub fn apply_directional_input(&mut self, up: bool, down: bool, left: bool, right: bool) {
        self.held = DirectionalInput {
            up,
            down,
            left,
            right,
        };
        self.send(PlayerCommand::SetDirectionalInput {
            up,
            down,
            left,
            right,
        });
    }

    pub fn trigger_melee_attack(&mut self) {
        self.send(PlayerCommand::MeleeAttack);
    }

    pub fn key_pressed(&mut self, key: Key) {
        self.set_key(key, true);
    }

    pub fn key_released(&mut self, key: Key) {
        self.set_key(key, false);
    }

    /// Directions currently held.
    pub fn held(&self) -> DirectionalInput {
        self.held
    }

    /// Apply one line of text input. Each whitespace-separated token is a key
    /// (`w`), optionally prefixed with `-` for a release (`-w`). Returns the
    /// tokens that were not understood.
    pub fn handle_line<'a>(&mut self, line: &'a str) -> Vec<&'a str> {
        let mut rejected = Vec::new();
        for token in line.split_whitespace() {
            let (pressed, name) = match token.strip_prefix('-') {
                Some(rest) => (false, rest),
                None => (true, token),
            };
            let mut chars = name.chars();
            match (chars.next().and_then(Key::from_char), chars.next()) {
                (Some(key), None) if pressed => self.key_pressed(key),
                (Some(key), None) => self.key_released(key),
                _ => rejected.push(token),
            }
        }
        rejected
    }

    fn set_key(&mut self, key: Key, pressed: bool) {
        let DirectionalInput {
            mut up,
            mut down,
            mut left,
            mut right,
        } = self.held;
        match key {
            Key::Up => up = pressed,
            Key::Down => down = pressed,
            Key::Left => left = pressed,
            Key::Right => right = pressed,
            Key::Melee => {
                if pressed {
                    self.trigger_melee_attack();
                }
                return;
            }
        }
        self.apply_directional_input(up, down, left, right);
    }

    fn send(&self, command: PlayerCommand) {
        if self.commands.send(command).is_err() {
            log::debug!("simulation gone, dropped {:?}", command);
        }
    }
}

/// Feed lines from stdin into `adapter` until stdin closes.
pub fn spawn_stdin_reader(mut adapter: InputAdapter) -> Result<JoinHandle<()>> {
    spawn_named("input", move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    log::warn!("stopped reading input: {err}");
                    break;
                }
            };
            for token in adapter.handle_line(&line) {
                log::warn!("unknown key {:?} (use w/a/s/d, -w to release, j to attack)", token);
            }
        }
    })
}
