//! Color definitions and palette management
//!
//! All colors are RGB565, the native format of the small SPI panels the
//! carousel targets.
//!
//! # RGB565 Format
//! - Red: 5 bits (0-31)
//! - Green: 6 bits (0-63)
//! - Blue: 5 bits (0-31)
//!
//! To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::RgbColor;

// ============================================================================
// Base Colors
// ============================================================================

/// Primary background color - very dark gray-blue
pub const COLOR_BACKGROUND: Rgb565 = Rgb565::new(18 >> 3, 23 >> 2, 24 >> 3);

/// Secondary background/surface color - slightly lighter than background
pub const COLOR_FOREGROUND: Rgb565 = Rgb565::new(26 >> 3, 32 >> 2, 33 >> 3);

/// Border/stroke color - medium gray
pub const COLOR_STROKE: Rgb565 = Rgb565::new(43 >> 3, 55 >> 2, 57 >> 3);

/// Accent - bright teal-green
pub const COLOR_ACCENT: Rgb565 = Rgb565::new(95 >> 3, 185 >> 2, 141 >> 3);

// ============================================================================
// Text Colors
// ============================================================================

/// Pure white - maximum brightness in RGB565
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

/// Medium gray - for disabled buttons
pub const GRAY: Rgb565 = Rgb565::new(16, 32, 16);

// ============================================================================
// Slide Backgrounds
// ============================================================================

/// Default card colors, cycled when a slide is added without one
pub const SLIDE_COLORS: [Rgb565; 5] = [
    Rgb565::new(48 >> 3, 96 >> 2, 160 >> 3),
    Rgb565::new(150 >> 3, 70 >> 2, 120 >> 3),
    Rgb565::new(60 >> 3, 140 >> 2, 100 >> 3),
    Rgb565::new(190 >> 3, 120 >> 2, 50 >> 3),
    Rgb565::new(100 >> 3, 80 >> 2, 170 >> 3),
];

/// Linear mix from `from` (amount 0) to `to` (amount 1)
pub fn blend(from: Rgb565, to: Rgb565, amount: f32) -> Rgb565 {
    let weight = if amount <= 0.0 {
        0
    } else if amount >= 1.0 {
        256
    } else {
        (amount * 256.0) as i32
    };
    let mix = |a: u8, b: u8| -> u8 {
        let a = i32::from(a);
        let b = i32::from(b);
        (a + ((b - a) * weight) / 256) as u8
    };
    Rgb565::new(
        mix(from.r(), to.r()),
        mix(from.g(), to.g()),
        mix(from.b(), to.b()),
    )
}

// ============================================================================
// Color Palette
// ============================================================================

/// Colors used by the carousel chrome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPalette {
    /// Active indicator and enabled buttons
    pub primary: Rgb565,

    /// Widget background behind the slides
    pub background: Rgb565,

    /// Footer strip holding buttons and indicators
    pub surface: Rgb565,

    /// Slide titles and counter text
    pub text_primary: Rgb565,

    /// Disabled buttons
    pub text_secondary: Rgb565,

    /// Inactive indicator outline
    pub border: Rgb565,
}

impl Default for ColorPalette {
    /// Returns the default dark theme palette
    fn default() -> Self {
        Self::dark()
    }
}

impl ColorPalette {
    pub fn dark() -> Self {
        Self {
            primary: COLOR_ACCENT,
            background: COLOR_BACKGROUND,
            surface: COLOR_FOREGROUND,
            text_primary: WHITE,
            text_secondary: GRAY,
            border: COLOR_STROKE,
        }
    }
}
