use serde::{Deserialize, Serialize};

/// Multiplicative sprite tint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Default for Tint {
    fn default() -> Self {
        Self::NONE
    }
}

impl Tint {
    /// White: the sprite renders with its own colors.
    pub const NONE: Tint = Tint {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Pure red, used for the damaged look.
    pub const RED: Tint = Tint { r: 255, g: 0, b: 0 };

    /// Build a tint from a `0xRRGGBB` value. Bits above 24 are ignored.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_red_is_red() {
        assert_eq!(Tint::from_hex(0xff0000), Tint::RED);
        assert_eq!(Tint::RED.to_hex(), 0xff0000);
    }

    #[test]
    fn high_bits_ignored() {
        assert_eq!(Tint::from_hex(0xab_ff_ff_ff), Tint::NONE);
    }

    #[test]
    fn default_is_untinted() {
        assert!(Tint::default().is_none());
        assert!(!Tint::RED.is_none());
    }
}
