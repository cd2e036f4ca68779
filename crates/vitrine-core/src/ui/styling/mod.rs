//! Styling for carousel widgets
//!
//! - [`colors`] - Color constants, the slide palette and [`ColorPalette`]

pub mod colors;

pub use colors::{
    COLOR_ACCENT, COLOR_BACKGROUND, COLOR_FOREGROUND, COLOR_STROKE, ColorPalette, GRAY,
    SLIDE_COLORS, WHITE, blend,
};
