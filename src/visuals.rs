//! Particle colours.
//!
//! Particles carry a [`ColorToken`], an index into a fixed [`Palette`], rather
//! than a colour value. The presentation layer resolves the token when it
//! draws, either as a CSS-style hex string or as RGB.
//!
//! ```ignore
//! let palette = Palette::anniversary();
//! for p in &particles {
//!     let rgb = palette.rgb(p.color);
//!     // ...
//! }
//! ```

use glam::Vec3;

/// The ten colours of the anniversary scene: whites, pastels and a few
/// saturated accents.
pub const ANNIVERSARY_COLORS: [&str; 10] = [
    "#FFFFFF", // White
    "#FFFACD", // Lemon chiffon
    "#ADD8E6", // Light blue
    "#E6E6FA", // Lavender
    "#FFDAB9", // Peach puff
    "#F08080", // Light coral
    "#20B2AA", // Light sea green
    "#9370DB", // Medium purple
    "#87CEEB", // Sky blue
    "#FFB6C1", // Light pink
];

/// Index of a colour within a [`Palette`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ColorToken(pub u32);

impl ColorToken {
    /// The palette slot this token refers to.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A fixed, finite list of hex colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colors: &'static [&'static str],
}

impl Palette {
    /// Wrap a static list of `#RRGGBB` strings.
    pub const fn new(colors: &'static [&'static str]) -> Self {
        Self { colors }
    }

    /// The palette used by the greeting scene.
    pub const fn anniversary() -> Self {
        Self::new(&ANNIVERSARY_COLORS)
    }

    /// Number of colours.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette has no colours at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Hex string for a token. Tokens past the end wrap around.
    pub fn hex(&self, token: ColorToken) -> &'static str {
        if self.colors.is_empty() {
            return "#FFFFFF";
        }
        self.colors[token.index() % self.colors.len()]
    }

    /// RGB (each channel 0-1) for a token.
    pub fn rgb(&self, token: ColorToken) -> Vec3 {
        hex_to_rgb(self.hex(token)).unwrap_or(Vec3::ONE)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::anniversary()
    }
}

/// Convert `#RRGGBB` (leading `#` optional) to RGB in 0-1.
///
/// Returns `None` for anything that is not six hex digits.
pub fn hex_to_rgb(hex: &str) -> Option<Vec3> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| -> Option<f32> {
        u8::from_str_radix(&digits[range], 16)
            .ok()
            .map(|v| v as f32 / 255.0)
    };

    Some(Vec3::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anniversary_palette() {
        let palette = Palette::anniversary();
        assert_eq!(palette.len(), 10);
        assert_eq!(palette.hex(ColorToken(0)), "#FFFFFF");
        assert_eq!(palette.hex(ColorToken(9)), "#FFB6C1");
    }

    #[test]
    fn test_token_wraps() {
        let palette = Palette::anniversary();
        assert_eq!(palette.hex(ColorToken(12)), palette.hex(ColorToken(2)));
    }

    #[test]
    fn test_hex_to_rgb() {
        let white = hex_to_rgb("#FFFFFF").unwrap();
        assert!((white - Vec3::ONE).length() < 1e-6);

        let sea_green = hex_to_rgb("20B2AA").unwrap();
        assert!((sea_green.x - 32.0 / 255.0).abs() < 1e-6);
        assert!((sea_green.y - 178.0 / 255.0).abs() < 1e-6);
        assert!((sea_green.z - 170.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_hex_to_rgb_rejects_garbage() {
        assert!(hex_to_rgb("#FFF").is_none());
        assert!(hex_to_rgb("#GG0000").is_none());
        assert!(hex_to_rgb("#ÿÿÿ").is_none());
    }

    #[test]
    fn test_empty_palette_falls_back_to_white() {
        const NONE: [&str; 0] = [];
        let palette = Palette::new(&NONE);
        assert!(palette.is_empty());
        assert_eq!(palette.rgb(ColorToken(3)), Vec3::ONE);
    }
}
