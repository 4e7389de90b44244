//! Request key generation for demos and tests
//!
//! Production callers bring their own identifiers (UUIDs, usually). These
//! helpers cover the two cases tests need: unpredictable keys that won't
//! collide across runs, and predictable keys for assertions.

use rand::Rng;

/// Generate a random lowercase hexadecimal key of `len` characters.
pub fn random_key(len: usize) -> String {
    const HEX: &[u8] = b"0123456789abcdef";
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| HEX[rng.gen_range(0..HEX.len())] as char)
        .collect()
}

/// Predictable key generator holding its own cursor over an alphabet.
///
/// Each call yields the next `len` characters, wrapping at the end of the
/// alphabet. State lives in the generator the caller owns, not in process
/// globals.
#[derive(Debug, Clone)]
pub struct KeySequence {
    alphabet: Vec<char>,
    cursor: usize,
}

impl KeySequence {
    /// Generator over the lowercase ASCII alphabet.
    pub fn new() -> Self {
        Self::with_alphabet("abcdefghijklmnopqrstuvwxyz")
    }

    /// Generator over a caller-chosen alphabet. Empty alphabets are
    /// replaced with the default.
    pub fn with_alphabet(alphabet: &str) -> Self {
        if alphabet.is_empty() {
            return Self::new();
        }
        Self {
            alphabet: alphabet.chars().collect(),
            cursor: 0,
        }
    }

    /// Produce the next key of `len` characters, advancing the cursor.
    pub fn next_key(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| {
                let ch = self.alphabet[self.cursor];
                self.cursor = (self.cursor + 1) % self.alphabet.len();
                ch
            })
            .collect()
    }

    /// Rewind the cursor to the start of the alphabet.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

impl Default for KeySequence {
    fn default() -> Self {
        Self::new()
    }
}
