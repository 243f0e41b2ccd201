//! Hex keypad state.
//!
//! Sixteen keys, 0x0-0xF. The host writes the state each frame; the CPU only reads it.
//! The conventional layout puts the keypad on the left of a QWERTY keyboard:
//!
//! ```text
//! 1 2 3 C        1 2 3 4
//! 4 5 6 D   <-   Q W E R
//! 7 8 9 E        A S D F
//! A 0 B F        Z X C V
//! ```

/// Number of keys on the keypad.
pub const KEY_COUNT: usize = 16;

/// Keyboard characters in the order they sit on the keyboard, paired with the hex key
/// they stand for.
pub const CONVENTIONAL_LAYOUT: [(char, u8); KEY_COUNT] = [
    ('1', 0x1),
    ('2', 0x2),
    ('3', 0x3),
    ('4', 0xC),
    ('q', 0x4),
    ('w', 0x5),
    ('e', 0x6),
    ('r', 0xD),
    ('a', 0x7),
    ('s', 0x8),
    ('d', 0x9),
    ('f', 0xE),
    ('z', 0xA),
    ('x', 0x0),
    ('c', 0xB),
    ('v', 0xF),
];

/// Hex key for a keyboard character, if it is on the keypad.
pub fn key_for_char(c: char) -> Option<u8> {
    let c = c.to_ascii_lowercase();
    CONVENTIONAL_LAYOUT
        .iter()
        .find(|(k, _)| *k == c)
        .map(|&(_, key)| key)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Keypad {
    pub keys: [bool; KEY_COUNT],
}

impl Keypad {
    /// Create a keypad with no keys pressed.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: u8, pressed: bool) {
        if let Some(k) = self.keys.get_mut(key as usize) {
            *k = pressed;
        }
    }

    pub fn press(&mut self, key: u8) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: u8) {
        self.set(key, false);
    }

    pub fn release_all(&mut self) {
        self.keys = [false; KEY_COUNT];
    }

    /// Values above 0xF name no key and read as released.
    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    /// Lowest-numbered key currently held.
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|&k| k).map(|k| k as u8)
    }
}
