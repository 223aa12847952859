//! Color tint for character sprites.
//!
//! The graphic system sets each character sprite's tint from the ambient
//! tone (day/night, weather) unless the character carries
//! [`RegularTone`](crate::components::character::RegularTone). The surf base
//! copies its parent's tint.

use raylib::prelude::Color;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Tint {
    pub const NEUTRAL: Tint = Tint::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn color(&self) -> Color {
        Color::new(self.r, self.g, self.b, self.a)
    }

    /// Component-wise product, used to stack map and weather tones.
    pub fn multiply(&self, other: Tint) -> Tint {
        Tint::new(
            ((self.r as u16 * other.r as u16) / 255) as u8,
            ((self.g as u16 * other.g as u16) / 255) as u8,
            ((self.b as u16 * other.b as u16) / 255) as u8,
            ((self.a as u16 * other.a as u16) / 255) as u8,
        )
    }
}

impl Default for Tint {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_neutral() {
        let c = Tint::default().color();
        assert_eq!((c.r, c.g, c.b, c.a), (255, 255, 255, 255));
    }

    #[test]
    fn test_multiply_with_white_is_identity() {
        let t = Tint::new(90, 110, 160, 255);
        assert_eq!(t.multiply(Tint::NEUTRAL), t);
    }

    #[test]
    fn test_multiply_dims() {
        let t = Tint::new(128, 128, 255, 255);
        let c = t.multiply(Tint::new(200, 100, 50, 255));
        assert_eq!(c, Tint::new(100, 50, 50, 255));
    }
}
