//! Filler glyph pools for the scramble effect

use rand::Rng;

use crate::{Error, Result};

/// Letters, digits and a handful of symbols. Matches the logo morph on the site.
pub const MORPH_CHARS: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

pub const ALNUM_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
pub const UPPER_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGIT_CHARS: &str = "0123456789";
pub const BINARY_CHARS: &str = "01";
pub const BLOCK_CHARS: &str = "░▒▓█▀▄▌▐";

/// A non-empty set of characters to draw filler glyphs from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharPool {
    chars: Vec<char>,
}

impl CharPool {
    /// Build a pool from the characters of `chars`
    pub fn new(chars: &str) -> Result<Self> {
        let chars: Vec<char> = chars.chars().collect();
        if chars.is_empty() {
            return Err(Error::invalid("character pool must not be empty"));
        }
        Ok(Self { chars })
    }

    /// Resolve a named preset ("morph", "alnum", "upper", "digits", "binary", "blocks")
    pub fn preset(name: &str) -> Result<Self> {
        let chars = match name.to_lowercase().as_str() {
            "morph" | "default" => MORPH_CHARS,
            "alnum" => ALNUM_CHARS,
            "upper" => UPPER_CHARS,
            "digits" => DIGIT_CHARS,
            "binary" => BINARY_CHARS,
            "blocks" => BLOCK_CHARS,
            other => {
                return Err(Error::invalid(format!("unknown character pool: {}", other)));
            }
        };
        Self::new(chars)
    }

    /// Accept either a preset name or a literal set of characters
    pub fn from_spec(spec: &str) -> Result<Self> {
        Self::preset(spec).or_else(|_| Self::new(spec))
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    /// Draw a character uniformly from the pool
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        self.chars[rng.gen_range(0..self.chars.len())]
    }

    /// Draw a character uniformly from the pool minus `avoid`
    ///
    /// Falls back to `avoid` when it is the only character in the pool.
    pub fn pick_except<R: Rng + ?Sized>(&self, rng: &mut R, avoid: char) -> char {
        if self.chars.iter().all(|&c| c == avoid) {
            return avoid;
        }
        loop {
            let c = self.pick(rng);
            if c != avoid {
                return c;
            }
        }
    }
}

impl Default for CharPool {
    fn default() -> Self {
        Self {
            chars: MORPH_CHARS.chars().collect(),
        }
    }
}
