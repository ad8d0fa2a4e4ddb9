//! Color handling for block styles.
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor`
//! type from the color crate, providing the convenience methods block styles
//! and the SVG exporter need.

use std::{
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{AlphaColor, DynamicColor, Srgb};

/// Wrapper around the `DynamicColor` type from the color crate.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenon_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Pure black
    pub fn black() -> Self {
        Self::new("#000000").expect("'#000000' is a valid CSS color")
    }

    /// Pure white
    pub fn white() -> Self {
        Self::new("#ffffff").expect("'#ffffff' is a valid CSS color")
    }

    /// Creates a new color with the specified alpha (transparency) value.
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha (transparency) component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Moves this color `factor` of the way toward another color, channel by
    /// channel in sRGB.
    ///
    /// A factor of 0.0 returns this color unchanged and 1.0 returns `toward`.
    /// Block styles use this to derive missing secondary/tertiary colours
    /// from the primary.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenon_core::color::Color;
    ///
    /// let primary = Color::new("#ff0000").unwrap();
    /// let lighter = primary.blend(Color::white(), 0.6);
    /// assert_ne!(primary, lighter);
    /// ```
    pub fn blend(self, toward: Color, factor: f32) -> Color {
        let t = factor.clamp(0.0, 1.0);
        let a = self.color.to_alpha_color::<Srgb>().components;
        let b = toward.color.to_alpha_color::<Srgb>().components;
        let mixed = AlphaColor::<Srgb>::new([
            a[0] + t * (b[0] - a[0]),
            a[1] + t * (b[1] - a[1]),
            a[2] + t * (b[2] - a[2]),
            a[3] + t * (b[3] - a[3]),
        ]);
        Color {
            color: DynamicColor::from_alpha_color(mixed),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn srgb(color: Color) -> [f32; 4] {
        color.color.to_alpha_color::<Srgb>().components
    }

    #[test]
    fn test_color_new() {
        assert!(Color::new("#4286f4").is_ok());
        assert!(Color::new("not-a-color").is_err());
    }

    #[test]
    fn test_blend_endpoints() {
        let red = Color::new("#ff0000").unwrap();

        let same = srgb(red.blend(Color::white(), 0.0));
        assert_approx_eq!(f32, same[0], 1.0);
        assert_approx_eq!(f32, same[1], 0.0);

        let white = srgb(red.blend(Color::white(), 1.0));
        assert_approx_eq!(f32, white[1], 1.0);
        assert_approx_eq!(f32, white[2], 1.0);
    }

    #[test]
    fn test_blend_toward_black_darkens() {
        let c = Color::new("#4286f4").unwrap();
        let darker = srgb(c.blend(Color::black(), 0.25));
        let original = srgb(c);
        for i in 0..3 {
            assert_approx_eq!(f32, darker[i], original[i] * 0.75, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_with_alpha() {
        let c = Color::new("red").unwrap().with_alpha(0.2);
        assert_approx_eq!(f32, c.alpha(), 0.2);
    }
}
